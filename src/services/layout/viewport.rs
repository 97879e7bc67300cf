//! Viewport projection: which packed rows and cards are on screen, and where.
//!
//! Horizontal content coordinates put day index 0 at x = 0; negative indices
//! extend to the left. Everything here is a pure view over cached packing.

use crate::models::geometry::{EventRect, PixelSpan};
use crate::models::segment::{AllDayRow, AllDaySegment, DayRange};
use crate::models::settings::LayoutSettings;
use crate::utils::date::DayCalendar;

/// Metrics for the all-day section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllDayMetrics {
    pub row_height: f32,
    pub inset: f32,
    pub padding: f32,
}

impl From<&LayoutSettings> for AllDayMetrics {
    fn from(settings: &LayoutSettings) -> Self {
        Self {
            row_height: settings.all_day_row_height,
            inset: settings.all_day_inset,
            padding: settings.all_day_padding,
        }
    }
}

impl Default for AllDayMetrics {
    fn default() -> Self {
        Self::from(&LayoutSettings::default())
    }
}

/// An all-day segment as drawn this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleSegment<'a> {
    pub segment: &'a AllDaySegment,
    pub rect: EventRect,
    /// Where the title starts; pinned to the viewport's left edge while the
    /// segment is partly scrolled off.
    pub title_x: f32,
}

/// A packed row that still has on-screen segments, renumbered without gaps.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleRow<'a> {
    pub index: usize,
    pub source_index: usize,
    pub segments: Vec<VisibleSegment<'a>>,
}

/// Horizontal extent `(x, width)` of an all-day segment.
pub fn all_day_span(segment: &AllDaySegment, day_column_width: f32, metrics: &AllDayMetrics) -> (f32, f32) {
    let x = segment.start_day as f32 * day_column_width + metrics.inset / 2.0;
    let width = (segment.span_days() as f32 * day_column_width - metrics.inset).max(0.0);
    (x, width)
}

/// Rectangle of a segment drawn in row `row_index` of the all-day section.
pub fn all_day_rect(
    segment: &AllDaySegment,
    row_index: usize,
    day_column_width: f32,
    metrics: &AllDayMetrics,
) -> EventRect {
    let (x, width) = all_day_span(segment, day_column_width, metrics);
    EventRect {
        x,
        y: metrics.padding / 2.0 + row_index as f32 * metrics.row_height,
        width,
        height: (metrics.row_height - metrics.inset / 2.0).max(0.0),
    }
}

/// Filter cached rows down to what the viewport shows.
///
/// A segment survives when its days intersect `days` and its pixel span
/// intersects `viewport`. Rows left empty are dropped and the rest are
/// renumbered `0..k`; the cached rows are not touched.
pub fn visible_rows<'a>(
    rows: &'a [AllDayRow],
    days: DayRange,
    viewport: PixelSpan,
    day_column_width: f32,
    metrics: &AllDayMetrics,
) -> Vec<VisibleRow<'a>> {
    let mut visible: Vec<VisibleRow<'a>> = Vec::new();

    for row in rows {
        let index = visible.len();
        let segments: Vec<VisibleSegment<'a>> = row
            .segments
            .iter()
            .filter(|segment| segment.intersects_days(&days))
            .filter_map(|segment| {
                let rect = all_day_rect(segment, index, day_column_width, metrics);
                if !rect.horizontal().intersects(&viewport) {
                    return None;
                }
                let title_x = viewport.start.max(rect.x).min(rect.right());
                Some(VisibleSegment { segment, rect, title_x })
            })
            .collect();

        if !segments.is_empty() {
            visible.push(VisibleRow {
                index,
                source_index: row.index,
                segments,
            });
        }
    }

    visible
}

/// Day indices to lay out for a horizontal scroll position, including
/// `buffer_days` either side, clamped to the calendar window.
pub fn visible_day_range(
    scroll_offset: f32,
    viewport_width: f32,
    day_column_width: f32,
    buffer_days: i64,
    calendar: &DayCalendar,
) -> DayRange {
    if !(day_column_width > 0.0) || !scroll_offset.is_finite() {
        return DayRange::new(0, 1);
    }

    let first = (scroll_offset / day_column_width).floor() as i64 - buffer_days;
    let last = ((scroll_offset + viewport_width.max(0.0)) / day_column_width).ceil() as i64 + buffer_days;

    let start = calendar.clamp_index(first);
    let end = last.clamp(calendar.min_index() + 1, calendar.max_index() + 1);
    DayRange::new(start, end.max(start + 1))
}

/// Whether a timed card intersects the vertical viewport.
pub fn is_vertically_visible(rect: &EventRect, viewport: PixelSpan) -> bool {
    rect.vertical().intersects(&viewport)
}

/// Height of an all-day section holding `rows` rows.
pub fn all_day_section_height(rows: usize, metrics: &AllDayMetrics) -> f32 {
    if rows == 0 {
        0.0
    } else {
        rows as f32 * metrics.row_height + metrics.padding
    }
}

/// Sizes the all-day section from the previous frame's visible row count.
///
/// The section's height shifts the grid below it, which changes scroll
/// geometry, which changes which rows are visible. Using last frame's count
/// breaks that cycle at the cost of one frame of lag.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllDayHeightTracker {
    previous_rows: usize,
}

impl AllDayHeightTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Height to use this frame; records `visible_rows` for the next one.
    pub fn height_for_frame(&mut self, visible_rows: usize, metrics: &AllDayMetrics) -> f32 {
        let height = all_day_section_height(self.previous_rows, metrics);
        self.previous_rows = visible_rows;
        height
    }

    pub fn previous_rows(&self) -> usize {
        self.previous_rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::display::DisplayEvent;
    use crate::models::event::CalendarEvent;
    use crate::services::layout::all_day::pack_all_day;
    use chrono::NaiveDate;
    use chrono_tz::UTC;
    use std::sync::Arc;

    fn seg(id: &str, start: i64, end: i64) -> AllDaySegment {
        let event = CalendarEvent {
            id: Some(id.to_string()),
            ..CalendarEvent::default()
        };
        AllDaySegment::new(Arc::new(DisplayEvent::new(event)), start, end)
    }

    fn calendar() -> DayCalendar {
        DayCalendar::new(UTC, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()).with_window(30)
    }

    #[test]
    fn test_segment_rect_from_day_index() {
        let metrics = AllDayMetrics::default();
        let (x, width) = all_day_span(&seg("a", 2, 4), 100.0, &metrics);
        assert_eq!(x, 202.0);
        assert_eq!(width, 196.0);
    }

    #[test]
    fn test_rows_collapse_and_renumber() {
        // Row 1 only holds y on days 0-1, left of the visible days.
        let rows = pack_all_day(vec![seg("x", 0, 10), seg("y", 0, 2), seg("z", 1, 6)]);
        assert_eq!(rows.len(), 3);

        let days = DayRange::new(5, 7);
        let viewport = PixelSpan::new(500.0, 700.0);
        let visible = visible_rows(&rows, days, viewport, 100.0, &AllDayMetrics::default());

        let indices: Vec<_> = visible.iter().map(|r| (r.index, r.source_index)).collect();
        assert_eq!(indices, vec![(0, 0), (1, 2)]);
        assert_eq!(visible[1].segments[0].segment.event_id(), "z");
        assert_eq!(visible[1].segments[0].rect.y, visible[0].segments[0].rect.y + 22.0);
        assert_eq!(rows[2].index, 2);
    }

    #[test]
    fn test_segment_in_buffer_day_but_off_screen_is_culled() {
        let rows = pack_all_day(vec![seg("left", -1, 0), seg("on", 0, 1)]);
        let days = DayRange::new(-1, 2);
        let viewport = PixelSpan::new(0.0, 100.0);
        let visible = visible_rows(&rows, days, viewport, 100.0, &AllDayMetrics::default());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].segments.len(), 1);
        assert_eq!(visible[0].segments[0].segment.event_id(), "on");
    }

    #[test]
    fn test_sticky_title_pins_to_viewport_edge() {
        let rows = pack_all_day(vec![seg("trip", 0, 3)]);
        let viewport = PixelSpan::new(150.0, 350.0);
        let visible = visible_rows(&rows, DayRange::new(0, 4), viewport, 100.0, &AllDayMetrics::default());
        assert_eq!(visible[0].segments[0].title_x, 150.0);
    }

    #[test]
    fn test_visible_day_range_with_buffer() {
        let range = visible_day_range(250.0, 300.0, 100.0, 1, &calendar());
        assert_eq!(range, DayRange::new(1, 7));
    }

    #[test]
    fn test_visible_day_range_clamps_to_window() {
        let range = visible_day_range(-1.0e6, 300.0, 100.0, 1, &calendar());
        assert_eq!(range.start, -30);
        assert!(range.end >= range.start + 1);

        let far = visible_day_range(1.0e6, 300.0, 100.0, 1, &calendar());
        assert_eq!(far, DayRange::new(30, 31));
    }

    #[test]
    fn test_height_tracker_lags_one_frame() {
        let metrics = AllDayMetrics::default();
        let mut tracker = AllDayHeightTracker::new();
        assert_eq!(tracker.height_for_frame(2, &metrics), 0.0);
        assert_eq!(tracker.height_for_frame(1, &metrics), 2.0 * 22.0 + 6.0);
        assert_eq!(tracker.height_for_frame(1, &metrics), 22.0 + 6.0);
    }

    #[test]
    fn test_vertical_culling() {
        let rect = EventRect { x: 0.0, y: 500.0, width: 10.0, height: 50.0 };
        assert!(is_vertically_visible(&rect, PixelSpan::new(520.0, 900.0)));
        assert!(!is_vertically_visible(&rect, PixelSpan::new(0.0, 500.0)));
    }
}
