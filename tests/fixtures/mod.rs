// Test fixtures - reusable test data
// Provides consistent calendars and events across all test files
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use schedule_layout::models::display::DisplayEvent;
use schedule_layout::models::event::CalendarEvent;
use schedule_layout::utils::date::DayCalendar;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday, March 10 2025: the reference day for most scenarios
    pub fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    /// Sunday, March 9 2025: US daylight saving starts
    pub fn dst_start_2025() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()
    }

    pub fn day(offset: i64) -> NaiveDate {
        reference() + chrono::Duration::days(offset)
    }

    /// Instant on the reference day plus `day_offset` days, in UTC.
    pub fn at(day_offset: i64, hour: u32, minute: u32) -> DateTime<Utc> {
        let date = day(day_offset);
        Utc.from_utc_datetime(&date.and_hms_opt(hour, minute, 0).unwrap())
    }
}

/// Sample events for testing
pub mod events {
    use super::*;

    pub fn timed(id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> CalendarEvent {
        CalendarEvent::timed(id, id, start, end)
    }

    /// All-day event covering day offsets `[start, end)` from the reference day
    pub fn all_day(id: &str, start: i64, end: i64) -> CalendarEvent {
        CalendarEvent::all_day(id, id, dates::day(start), dates::day(end))
    }

    pub fn display(event: CalendarEvent) -> Arc<DisplayEvent> {
        Arc::new(DisplayEvent::new(event))
    }

    /// Standup, design review and a long planning block that all overlap at
    /// 9:45, plus a follow-up starting exactly when planning ends
    pub fn busy_morning() -> Vec<CalendarEvent> {
        vec![
            timed("A", dates::at(0, 9, 0), dates::at(0, 10, 0)),
            timed("B", dates::at(0, 9, 30), dates::at(0, 10, 30)),
            timed("C", dates::at(0, 9, 45), dates::at(0, 11, 0)),
            timed("D", dates::at(0, 11, 0), dates::at(0, 12, 0)),
        ]
    }
}

pub fn utc_calendar() -> DayCalendar {
    DayCalendar::new(chrono_tz::UTC, dates::reference())
}

pub fn calendar_in(tz: Tz, reference: NaiveDate) -> DayCalendar {
    DayCalendar::new(tz, reference)
}
