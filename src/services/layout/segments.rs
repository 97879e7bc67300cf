//! Derivation of layout segments from display events.
//!
//! All-day events become one [`AllDaySegment`] spanning day indices; timed
//! events are sliced into one [`TimedSegment`] per local day they touch, each
//! clamped to that day's `[00:00, 24:00)` bounds. Events whose boundaries are
//! missing, unparsable or non-positive in length produce nothing.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::models::display::DisplayEvent;
use crate::models::event::EventTiming;
use crate::models::segment::{AllDaySegment, DayRange, TimedSegment};
use crate::utils::date::DayCalendar;

/// Build all-day segments for every visible all-day event.
///
/// Ranges are normalised against the calendar's reference date and clamped to
/// its window; events lying wholly outside the window are skipped.
pub fn all_day_segments(events: &[Arc<DisplayEvent>], calendar: &DayCalendar) -> Vec<AllDaySegment> {
    let mut segments = Vec::new();

    for display in events.iter().filter(|e| !e.hidden) {
        let Some(EventTiming::AllDay { start, end }) = display.event.timing() else {
            continue;
        };

        let end = if end <= start { start.succ_opt().unwrap_or(start) } else { end };
        let raw_start = calendar.raw_index(start);
        let raw_end = calendar.raw_index(end);

        if raw_end <= calendar.min_index() || raw_start > calendar.max_index() {
            log::debug!(
                "All-day event '{}' lies outside the {}-day window; skipped",
                display.id(),
                calendar.window_days()
            );
            continue;
        }

        let start_day = calendar.clamp_index(raw_start);
        let end_day = raw_end.clamp(calendar.min_index() + 1, calendar.max_index() + 1);
        segments.push(AllDaySegment::new(Arc::clone(display), start_day, end_day));
    }

    segments
}

/// Slice every visible timed event that touches `day` down to that day.
pub fn timed_segments_for_day(
    events: &[Arc<DisplayEvent>],
    day: NaiveDate,
    calendar: &DayCalendar,
) -> Vec<TimedSegment> {
    let (day_start, day_end) = calendar.day_bounds(day);
    let mut segments = Vec::new();

    for (source, display) in events.iter().enumerate().filter(|(_, e)| !e.hidden) {
        let Some(EventTiming::Timed { start, end }) = display.event.timing() else {
            continue;
        };
        if end <= start {
            log::debug!("Timed event '{}' has non-positive duration; skipped", display.id());
            continue;
        }

        let clamped_start = start.max(day_start);
        let clamped_end = end.min(day_end);
        if clamped_start < clamped_end {
            segments.push(TimedSegment {
                event: Arc::clone(display),
                source,
                day,
                start: clamped_start,
                end: clamped_end,
            });
        }
    }

    segments
}

/// Timed segments for each day of `days`, keyed by calendar date.
///
/// Days with no segments are omitted.
pub fn timed_segments_by_day(
    events: &[Arc<DisplayEvent>],
    days: DayRange,
    calendar: &DayCalendar,
) -> BTreeMap<NaiveDate, Vec<TimedSegment>> {
    if days.is_empty() {
        return BTreeMap::new();
    }
    let first = calendar.clamp_index(days.start);
    let last = calendar.clamp_index(days.end - 1);

    (first..=last)
        .map(|index| calendar.date_for_index(index))
        .map(|date| (date, timed_segments_for_day(events, date, calendar)))
        .filter(|(_, segments)| !segments.is_empty())
        .collect()
}
