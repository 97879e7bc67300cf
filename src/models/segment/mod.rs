// Segment module
// Derived layout units: all-day spans, per-day timed slices and their placements

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::models::display::DisplayEvent;

/// An all-day event normalised to day indices. `end_day` is exclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct AllDaySegment {
    pub event: Arc<DisplayEvent>,
    pub start_day: i64,
    pub end_day: i64,
}

impl AllDaySegment {
    pub fn new(event: Arc<DisplayEvent>, start_day: i64, end_day: i64) -> Self {
        Self {
            event,
            start_day,
            end_day: end_day.max(start_day + 1),
        }
    }

    pub fn event_id(&self) -> &str {
        self.event.id()
    }

    /// Number of day columns covered; at least one.
    pub fn span_days(&self) -> i64 {
        self.end_day - self.start_day
    }

    pub fn days(&self) -> Range<i64> {
        self.start_day..self.end_day
    }

    pub fn overlaps(&self, other: &AllDaySegment) -> bool {
        self.start_day < other.end_day && other.start_day < self.end_day
    }

    pub fn intersects_days(&self, days: &DayRange) -> bool {
        self.start_day < days.end && days.start < self.end_day
    }
}

/// One stacked row of the all-day section. Row 0 is the topmost.
#[derive(Debug, Clone, PartialEq)]
pub struct AllDayRow {
    pub index: usize,
    pub segments: Vec<AllDaySegment>,
}

/// Half-open range of day indices, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DayRange {
    pub start: i64,
    pub end: i64,
}

impl DayRange {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end: end.max(start) }
    }

    pub fn len(&self) -> i64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn contains(&self, day: i64) -> bool {
        self.start <= day && day < self.end
    }
}

/// Identifies one timed segment: an event sliced to a single local day.
///
/// Backend ids may be missing or shared between calendars, so the event's
/// position in its snapshot is part of the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId {
    pub event_id: String,
    pub source: usize,
    pub day: NaiveDate,
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}@{}", self.event_id, self.source, self.day)
    }
}

/// Portion of a timed event that falls on `day`, clamped to that day's bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedSegment {
    pub event: Arc<DisplayEvent>,
    /// Index of the event in the slice the segment was derived from.
    pub source: usize,
    pub day: NaiveDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimedSegment {
    pub fn id(&self) -> SegmentId {
        SegmentId {
            event_id: self.event.id().to_string(),
            source: self.source,
            day: self.day,
        }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn overlaps(&self, other: &TimedSegment) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Column placement of a timed segment within its overlap cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnAssignment {
    pub segment_id: SegmentId,
    pub column: usize,
    pub column_count: usize,
}

impl ColumnAssignment {
    pub fn is_full_width(&self) -> bool {
        self.column_count <= 1
    }
}
