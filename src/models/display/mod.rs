// Display module
// Per-refresh wrapper around a fetched event with transient UI state

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::models::event::CalendarEvent;

/// Visual-state tag attached to an event for one refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStyle {
    #[default]
    Standard,
    Highlight,
    Update,
    Destructive,
    New,
    Past,
}

impl EventStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStyle::Standard => "standard",
            EventStyle::Highlight => "highlight",
            EventStyle::Update => "update",
            EventStyle::Destructive => "destructive",
            EventStyle::New => "new",
            EventStyle::Past => "past",
        }
    }
}

/// A [`CalendarEvent`] plus its visibility flag and optional style tag.
///
/// Built once per schedule refresh and replaced wholesale on the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayEvent {
    pub event: Arc<CalendarEvent>,
    pub hidden: bool,
    pub style: Option<EventStyle>,
}

impl DisplayEvent {
    pub fn new(event: CalendarEvent) -> Self {
        Self {
            event: Arc::new(event),
            hidden: false,
            style: None,
        }
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn with_style(mut self, style: EventStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn id(&self) -> &str {
        self.event.key()
    }

    /// Style to draw with. A focused or selected event is always highlighted;
    /// otherwise an explicit tag wins, then finished events read as past.
    pub fn resolved_style(&self, focused: Option<&str>, now: DateTime<Utc>, tz: Tz) -> EventStyle {
        if focused.is_some_and(|id| !id.is_empty() && id == self.id()) {
            return EventStyle::Highlight;
        }
        if let Some(style) = self.style {
            return style;
        }
        if self.event.ended_before(now, tz) {
            EventStyle::Past
        } else {
            EventStyle::Standard
        }
    }
}
