//! Pixel geometry for timed event cards inside a day column.

use crate::models::geometry::EventRect;
use crate::models::segment::TimedSegment;
use crate::models::settings::LayoutSettings;
use crate::utils::date::DayCalendar;

const HOURS_PER_DAY: f32 = 24.0;

/// Metrics that shape timed cards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedMetrics {
    pub hour_height: f32,
    pub top_inset: f32,
    pub vertical_inset: f32,
    pub min_height: f32,
    pub horizontal_inset: f32,
    pub overlap_fraction: f32,
    pub min_readable_width: f32,
}

impl From<&LayoutSettings> for TimedMetrics {
    fn from(settings: &LayoutSettings) -> Self {
        Self {
            hour_height: settings.hour_height,
            top_inset: settings.grid_top_inset,
            vertical_inset: settings.timed_vertical_inset,
            min_height: settings.timed_min_height,
            horizontal_inset: settings.timed_horizontal_inset,
            overlap_fraction: settings.overlap_fraction,
            min_readable_width: settings.min_readable_column_width,
        }
    }
}

impl Default for TimedMetrics {
    fn default() -> Self {
        Self::from(&LayoutSettings::default())
    }
}

/// Vertical placement `(top, height)` of a segment within the time grid.
pub fn vertical_extent(segment: &TimedSegment, calendar: &DayCalendar, metrics: &TimedMetrics) -> (f32, f32) {
    let start = calendar.fraction_of_day(segment.start, segment.day) as f32;
    let end = calendar.fraction_of_day(segment.end, segment.day) as f32;

    let top = metrics.top_inset + metrics.hour_height * HOURS_PER_DAY * start;
    let duration_hours = (end - start) * HOURS_PER_DAY;
    let height = (metrics.hour_height * duration_hours - metrics.vertical_inset).max(metrics.min_height);
    (top, height)
}

/// Horizontal placement `(x, width)` within a day column of `day_column_width`.
///
/// Overlapping cards are widened by the overlap fraction so neighbours shingle;
/// the fraction shrinks when a column would be narrower than the readable
/// minimum, and no card extends past the column's right edge.
pub fn horizontal_extent(
    column: usize,
    column_count: usize,
    day_column_width: f32,
    metrics: &TimedMetrics,
) -> (f32, f32) {
    if column_count <= 1 {
        let width = (day_column_width - metrics.horizontal_inset).max(0.0);
        return (metrics.horizontal_inset / 2.0, width);
    }

    let base = day_column_width / column_count as f32;
    let fraction = if base < metrics.min_readable_width {
        metrics.overlap_fraction * (base / metrics.min_readable_width)
    } else {
        metrics.overlap_fraction
    };

    let x = column.min(column_count - 1) as f32 * base;
    let width = (base * (1.0 + fraction)).min(day_column_width - x);
    (x, width.max(0.0))
}

/// Card rectangle relative to the top-left of its day column.
pub fn timed_geometry(
    segment: &TimedSegment,
    column: usize,
    column_count: usize,
    day_column_width: f32,
    calendar: &DayCalendar,
    metrics: &TimedMetrics,
) -> EventRect {
    let (y, height) = vertical_extent(segment, calendar, metrics);
    let (x, width) = horizontal_extent(column, column_count, day_column_width, metrics);
    EventRect { x, y, width, height }
}

/// Shift a column-relative rectangle into grid content coordinates, where day
/// index 0 starts at x = 0.
pub fn place_in_grid(rect: EventRect, day_index: i64, day_column_width: f32) -> EventRect {
    rect.translated(day_index as f32 * day_column_width, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::display::DisplayEvent;
    use crate::models::event::CalendarEvent;
    use chrono::{NaiveDate, TimeZone, Utc};
    use chrono_tz::UTC;
    use std::sync::Arc;
    use test_case::test_case;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn segment(start_h: u32, start_m: u32, end: chrono::DateTime<Utc>) -> TimedSegment {
        let start = Utc.with_ymd_and_hms(2025, 3, 10, start_h, start_m, 0).unwrap();
        TimedSegment {
            event: Arc::new(DisplayEvent::new(CalendarEvent::timed("e", "e", start, end))),
            source: 0,
            day: day(),
            start,
            end,
        }
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_vertical_extent_for_one_hour() {
        let metrics = TimedMetrics::default();
        let calendar = DayCalendar::new(UTC, day());
        let seg = segment(9, 0, Utc.with_ymd_and_hms(2025, 3, 10, 10, 0, 0).unwrap());
        let (top, height) = vertical_extent(&seg, &calendar, &metrics);
        assert!(close(top, 8.0 + 9.0 * 60.0));
        assert!(close(height, 58.0));
    }

    #[test]
    fn test_segment_ending_at_midnight_reaches_grid_bottom() {
        let metrics = TimedMetrics::default();
        let calendar = DayCalendar::new(UTC, day());
        let seg = segment(23, 0, Utc.with_ymd_and_hms(2025, 3, 11, 0, 0, 0).unwrap());
        let (top, height) = vertical_extent(&seg, &calendar, &metrics);
        assert!(close(top + height + metrics.vertical_inset, 8.0 + 24.0 * 60.0));
    }

    #[test]
    fn test_short_segment_gets_minimum_height() {
        let metrics = TimedMetrics::default();
        let calendar = DayCalendar::new(UTC, day());
        let seg = segment(9, 0, Utc.with_ymd_and_hms(2025, 3, 10, 9, 5, 0).unwrap());
        assert!(close(vertical_extent(&seg, &calendar, &metrics).1, metrics.min_height));
    }

    #[test]
    fn test_single_column_uses_full_width_minus_inset() {
        let (x, width) = horizontal_extent(0, 1, 200.0, &TimedMetrics::default());
        assert!(close(x, 2.0));
        assert!(close(width, 196.0));
    }

    #[test_case(0, 2, 0.0, 120.0 ; "left of two")]
    #[test_case(1, 2, 100.0, 100.0 ; "right of two clamped to edge")]
    fn test_two_columns_shingle(column: usize, count: usize, x: f32, width: f32) {
        let (got_x, got_width) = horizontal_extent(column, count, 200.0, &TimedMetrics::default());
        assert!(close(got_x, x));
        assert!(close(got_width, width));
    }

    #[test]
    fn test_overlap_fraction_shrinks_for_narrow_columns() {
        let metrics = TimedMetrics::default();
        let (_, width) = horizontal_extent(0, 3, 120.0, &metrics);
        let expected = 40.0 * (1.0 + 0.2 * 40.0 / 44.0);
        assert!(close(width, expected));
        let (x, last) = horizontal_extent(2, 3, 120.0, &metrics);
        assert!(close(x + last, 120.0));
    }

    #[test]
    fn test_place_in_grid_offsets_by_day() {
        let rect = EventRect { x: 2.0, y: 10.0, width: 50.0, height: 20.0 };
        let placed = place_in_grid(rect, -2, 100.0);
        assert!(close(placed.x, -198.0));
        assert!(close(placed.y, 10.0));
    }
}
