//! Schedule layout engine.
//!
//! Ties a schedule snapshot, an explicit [`DayCalendar`] and the layout
//! settings together and produces per-frame card placements for the all-day
//! section and the time grid. All work is synchronous; the all-day packing is
//! cached per snapshot and reused across scroll changes.

pub mod all_day;
pub mod geometry;
pub mod segments;
pub mod timed;
pub mod viewport;

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::models::display::{DisplayEvent, EventStyle};
use crate::models::geometry::{EventRect, PixelSpan};
use crate::models::segment::{AllDayRow, DayRange};
use crate::models::settings::LayoutSettings;
use crate::services::schedule::ScheduleSnapshot;
use crate::utils::date::DayCalendar;

use self::all_day::AllDayLayoutCache;
use self::geometry::{place_in_grid, timed_geometry, TimedMetrics};
use self::segments::timed_segments_for_day;
use self::timed::layout_timed;
use self::viewport::{
    is_vertically_visible, visible_day_range, visible_rows, AllDayHeightTracker, AllDayMetrics,
};

/// Scroll position and sizes reported by the host each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    /// Horizontal content offset; day index 0 starts at x = 0.
    pub scroll_x: f32,
    /// Vertical offset into the time grid.
    pub scroll_y: f32,
    pub width: f32,
    pub height: f32,
    pub day_column_width: f32,
}

/// An all-day card placed for this frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllDayCard {
    pub event_id: String,
    pub title: String,
    pub color: Option<String>,
    pub style: EventStyle,
    pub row: usize,
    pub start_day: i64,
    pub span_days: i64,
    pub rect: EventRect,
    pub title_x: f32,
}

/// A timed card placed in grid content coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimedCard {
    pub event_id: String,
    pub title: String,
    pub color: Option<String>,
    pub style: EventStyle,
    pub day: NaiveDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub column: usize,
    pub column_count: usize,
    pub rect: EventRect,
}

/// Everything the host needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameLayout {
    pub days: DayRange,
    /// Height of the all-day section, sized from the previous frame.
    pub all_day_height: f32,
    pub all_day_rows: usize,
    pub all_day: Vec<AllDayCard>,
    pub timed: Vec<TimedCard>,
}

pub struct LayoutEngine {
    calendar: DayCalendar,
    settings: LayoutSettings,
    timed_metrics: TimedMetrics,
    all_day_metrics: AllDayMetrics,
    snapshot: ScheduleSnapshot,
    all_day_cache: AllDayLayoutCache,
    height_tracker: AllDayHeightTracker,
    focused: Option<String>,
}

impl LayoutEngine {
    pub fn new(calendar: DayCalendar, settings: LayoutSettings) -> Self {
        Self {
            calendar: calendar.with_window(settings.window_days),
            timed_metrics: TimedMetrics::from(&settings),
            all_day_metrics: AllDayMetrics::from(&settings),
            settings,
            snapshot: ScheduleSnapshot::default(),
            all_day_cache: AllDayLayoutCache::new(),
            height_tracker: AllDayHeightTracker::new(),
            focused: None,
        }
    }

    /// Engine anchored on `reference`, using the timezone from `settings`.
    pub fn from_settings(settings: LayoutSettings, reference: NaiveDate) -> Self {
        let tz = settings.tz().unwrap_or_else(|| {
            log::warn!("Unknown timezone '{}'; laying out in UTC", settings.timezone);
            Tz::UTC
        });
        Self::new(DayCalendar::new(tz, reference), settings)
    }

    pub fn calendar(&self) -> &DayCalendar {
        &self.calendar
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    pub fn snapshot(&self) -> &ScheduleSnapshot {
        &self.snapshot
    }

    /// Replace the event set. The all-day packing is recomputed lazily.
    pub fn replace_snapshot(&mut self, snapshot: ScheduleSnapshot) {
        log::debug!(
            "Replacing snapshot {} with {} ({} events)",
            self.snapshot.generation(),
            snapshot.generation(),
            snapshot.len()
        );
        self.snapshot = snapshot;
    }

    /// Focused or selected event; drawn highlighted, geometry unchanged.
    pub fn set_focus(&mut self, event_id: Option<String>) {
        self.focused = event_id;
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn all_day_rows(&mut self) -> Arc<Vec<AllDayRow>> {
        self.all_day_cache.rows_for(&self.snapshot, &self.calendar)
    }

    pub fn all_day_recomputations(&self) -> usize {
        self.all_day_cache.recomputations()
    }

    fn style_for(&self, display: &DisplayEvent, now: DateTime<Utc>) -> EventStyle {
        display.resolved_style(self.focused.as_deref(), now, self.calendar.timezone())
    }

    /// Timed cards for one day, ordered by column then start.
    pub fn day_layout(&self, date: NaiveDate, day_column_width: f32, now: DateTime<Utc>) -> Vec<TimedCard> {
        let segments = timed_segments_for_day(self.snapshot.events(), date, &self.calendar);
        let assignments = layout_timed(&segments);
        let day_index = self.calendar.raw_index(date);

        let mut cards: Vec<TimedCard> = segments
            .iter()
            .filter_map(|segment| {
                let assignment = assignments.get(&segment.id())?;
                let rect = timed_geometry(
                    segment,
                    assignment.column,
                    assignment.column_count,
                    day_column_width,
                    &self.calendar,
                    &self.timed_metrics,
                );
                Some(TimedCard {
                    event_id: segment.event.id().to_string(),
                    title: segment.event.event.display_title().to_string(),
                    color: segment.event.event.calendar_color.clone(),
                    style: self.style_for(&segment.event, now),
                    day: date,
                    start: segment.start,
                    end: segment.end,
                    column: assignment.column,
                    column_count: assignment.column_count,
                    rect: place_in_grid(rect, day_index, day_column_width),
                })
            })
            .collect();

        cards.sort_by(|a, b| {
            a.column
                .cmp(&b.column)
                .then(a.start.cmp(&b.start))
                .then_with(|| a.event_id.cmp(&b.event_id))
        });
        cards
    }

    /// Lay out everything visible in `viewport`.
    pub fn frame(&mut self, viewport: &ViewportState, now: DateTime<Utc>) -> FrameLayout {
        let width = viewport.day_column_width;
        let days = visible_day_range(
            viewport.scroll_x,
            viewport.width,
            width,
            self.settings.buffer_days,
            &self.calendar,
        );

        let rows = self.all_day_rows();
        let horizontal = PixelSpan::from_offset(viewport.scroll_x, viewport.width);
        let visible = visible_rows(&rows, days, horizontal, width, &self.all_day_metrics);
        let all_day_height = self
            .height_tracker
            .height_for_frame(visible.len(), &self.all_day_metrics);

        let all_day = visible
            .iter()
            .flat_map(|row| {
                row.segments.iter().map(move |placed| (row.index, placed))
            })
            .map(|(row, placed)| {
                let display = &placed.segment.event;
                AllDayCard {
                    event_id: display.id().to_string(),
                    title: display.event.display_title().to_string(),
                    color: display.event.calendar_color.clone(),
                    style: self.style_for(display, now),
                    row,
                    start_day: placed.segment.start_day,
                    span_days: placed.segment.span_days(),
                    rect: placed.rect,
                    title_x: placed.title_x,
                }
            })
            .collect();

        let vertical = PixelSpan::from_offset(viewport.scroll_y, viewport.height);
        let timed = (days.start..days.end)
            .map(|index| self.calendar.date_for_index(index))
            .flat_map(|date| self.day_layout(date, width, now))
            .filter(|card| is_vertically_visible(&card.rect, vertical))
            .collect();

        FrameLayout {
            days,
            all_day_height,
            all_day_rows: visible.len(),
            all_day,
            timed,
        }
    }
}
