// Schedule service
// Turns the backend's schedule payload into an immutable layout snapshot

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::display::{DisplayEvent, EventStyle};
use crate::models::event::CalendarEvent;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Failed to read schedule file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed schedule payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Date window the backend fetched events for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub timezone: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Schedule response body: the window plus every event in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub window: Option<ScheduleWindow>,
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
}

impl ScheduleResponse {
    pub fn from_json(json: &str) -> Result<Self, ScheduleError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ScheduleError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

/// Transient per-refresh UI state applied while building display events.
///
/// Entries are keyed by backend event id. Every event carrying a given id
/// picks up its entries, so an invite shared between calendars is hidden or
/// tagged in each of them. Events without an id never match.
#[derive(Debug, Clone, Default)]
pub struct DisplayOverrides {
    pub hidden: HashSet<String>,
    pub styles: HashMap<String, EventStyle>,
}

impl DisplayOverrides {
    pub fn hide(mut self, id: impl Into<String>) -> Self {
        self.hidden.insert(id.into());
        self
    }

    pub fn style(mut self, id: impl Into<String>, style: EventStyle) -> Self {
        self.styles.insert(id.into(), style);
        self
    }

    fn lookup(&self, event: &CalendarEvent) -> (bool, Option<EventStyle>) {
        match event.id.as_deref().filter(|id| !id.is_empty()) {
            Some(id) => (self.hidden.contains(id), self.styles.get(id).copied()),
            None => (false, None),
        }
    }
}

/// Full replacement set of display events for one refresh.
///
/// Each snapshot gets a unique generation number; layout caches key on it, so
/// a new snapshot always invalidates them even when the events are equal.
#[derive(Debug, Clone)]
pub struct ScheduleSnapshot {
    generation: u64,
    window: Option<ScheduleWindow>,
    events: Vec<Arc<DisplayEvent>>,
}

impl ScheduleSnapshot {
    pub fn new(window: Option<ScheduleWindow>, events: Vec<DisplayEvent>) -> Self {
        let generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);
        let unparsable = events.iter().filter(|e| e.event.timing().is_none()).count();
        if unparsable > 0 {
            log::warn!(
                "Snapshot {} has {} event(s) with missing or unparsable times; they will not be laid out",
                generation,
                unparsable
            );
        }
        Self {
            generation,
            window,
            events: events.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn from_events(events: Vec<CalendarEvent>) -> Self {
        Self::new(None, events.into_iter().map(DisplayEvent::new).collect())
    }

    pub fn from_response(response: ScheduleResponse, overrides: &DisplayOverrides) -> Self {
        let events = response
            .events
            .into_iter()
            .map(|event| {
                let (hidden, style) = overrides.lookup(&event);
                let mut display = DisplayEvent::new(event).hidden(hidden);
                display.style = style;
                display
            })
            .collect();
        Self::new(response.window, events)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn window(&self) -> Option<&ScheduleWindow> {
        self.window.as_ref()
    }

    pub fn events(&self) -> &[Arc<DisplayEvent>] {
        &self.events
    }

    pub fn find(&self, id: &str) -> Option<&Arc<DisplayEvent>> {
        self.events.iter().find(|e| e.id() == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for ScheduleSnapshot {
    fn default() -> Self {
        Self::new(None, Vec::new())
    }
}
