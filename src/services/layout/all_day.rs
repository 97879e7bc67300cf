//! First-fit row packing for the all-day section.

use std::collections::HashSet;
use std::sync::Arc;

use crate::models::segment::{AllDayRow, AllDaySegment};
use crate::services::schedule::ScheduleSnapshot;
use crate::utils::date::DayCalendar;

use super::segments::all_day_segments;

/// Assign each segment to the lowest row whose occupied days it does not touch.
///
/// Segments are ordered by start day, then longest first, then event id, so
/// the result does not depend on input order. First-fit does not guarantee the
/// minimum row count; rows stay stable as events are added, which matters more
/// on screen than an optimal packing.
pub fn pack_all_day(mut segments: Vec<AllDaySegment>) -> Vec<AllDayRow> {
    segments.sort_by(|a, b| {
        a.start_day
            .cmp(&b.start_day)
            .then(b.end_day.cmp(&a.end_day))
            .then_with(|| a.event_id().cmp(b.event_id()))
    });

    let mut rows: Vec<AllDayRow> = Vec::new();
    let mut occupied: Vec<HashSet<i64>> = Vec::new();

    for segment in segments {
        let free = occupied
            .iter()
            .position(|days| !segment.days().any(|day| days.contains(&day)));

        let row = match free {
            Some(row) => row,
            None => {
                rows.push(AllDayRow {
                    index: rows.len(),
                    segments: Vec::new(),
                });
                occupied.push(HashSet::new());
                rows.len() - 1
            }
        };

        occupied[row].extend(segment.days());
        rows[row].segments.push(segment);
    }

    rows
}

/// Cached all-day packing, keyed by snapshot identity.
///
/// Scrolling never invalidates the cache; only a new snapshot (or a change of
/// reference calendar, which renumbers every day index) does.
#[derive(Debug, Default)]
pub struct AllDayLayoutCache {
    key: Option<(u64, DayCalendar)>,
    rows: Arc<Vec<AllDayRow>>,
    recomputations: usize,
}

impl AllDayLayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Packed rows for `snapshot`, recomputed only when its identity changed.
    pub fn rows_for(&mut self, snapshot: &ScheduleSnapshot, calendar: &DayCalendar) -> Arc<Vec<AllDayRow>> {
        let key = (snapshot.generation(), *calendar);
        if self.key != Some(key) {
            let segments = all_day_segments(snapshot.events(), calendar);
            let segment_count = segments.len();
            self.rows = Arc::new(pack_all_day(segments));
            self.key = Some(key);
            self.recomputations += 1;
            log::debug!(
                "Packed {} all-day segments into {} rows (snapshot {})",
                segment_count,
                self.rows.len(),
                snapshot.generation()
            );
        }
        Arc::clone(&self.rows)
    }

    pub fn invalidate(&mut self) {
        self.key = None;
    }

    /// Number of times the packing has been recomputed.
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}
