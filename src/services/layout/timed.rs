//! Side-by-side column layout for overlapping timed events on one day.
//!
//! Segments are first grouped into clusters: maximal runs connected by
//! transitive overlap. Each cluster is then partitioned greedily into columns,
//! which uses exactly as many columns as the cluster's peak concurrency.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::segment::{ColumnAssignment, SegmentId, TimedSegment};

fn by_start_then_end(a: &&TimedSegment, b: &&TimedSegment) -> Ordering {
    a.start
        .cmp(&b.start)
        .then(a.end.cmp(&b.end))
        .then_with(|| a.event.id().cmp(b.event.id()))
        .then(a.source.cmp(&b.source))
}

/// Group segments into overlap clusters, each sorted by start then end.
pub fn clusters(segments: &[TimedSegment]) -> Vec<Vec<&TimedSegment>> {
    let mut sorted: Vec<&TimedSegment> = segments.iter().collect();
    sorted.sort_by(by_start_then_end);

    let mut clusters = Vec::new();
    let mut current: Vec<&TimedSegment> = Vec::new();
    let mut cluster_end: Option<DateTime<Utc>> = None;

    for segment in sorted {
        match cluster_end {
            Some(end) if segment.start < end => {
                cluster_end = Some(end.max(segment.end));
            }
            _ => {
                if !current.is_empty() {
                    clusters.push(std::mem::take(&mut current));
                }
                cluster_end = Some(segment.end);
            }
        }
        current.push(segment);
    }
    if !current.is_empty() {
        clusters.push(current);
    }

    clusters
}

/// Place a sorted cluster into columns; returns `(segment, column)` pairs and
/// the column count.
fn partition<'a>(cluster: &[&'a TimedSegment]) -> (Vec<(&'a TimedSegment, usize)>, usize) {
    let mut column_ends: Vec<DateTime<Utc>> = Vec::new();
    let mut placed = Vec::with_capacity(cluster.len());

    for &segment in cluster {
        let column = match column_ends.iter().position(|end| *end <= segment.start) {
            Some(column) => {
                column_ends[column] = segment.end;
                column
            }
            None => {
                column_ends.push(segment.end);
                column_ends.len() - 1
            }
        };
        placed.push((segment, column));
    }

    (placed, column_ends.len())
}

/// Column index and cluster width for every segment of one day.
///
/// A segment without overlaps gets column 0 of 1. All segments in a cluster
/// report the same `column_count`. Results are keyed by [`SegmentId`], which
/// stays unique when events share or lack a backend id.
pub fn layout_timed(segments: &[TimedSegment]) -> HashMap<SegmentId, ColumnAssignment> {
    let mut assignments = HashMap::with_capacity(segments.len());

    for cluster in clusters(segments) {
        let (placed, column_count) = partition(&cluster);
        for (segment, column) in placed {
            let segment_id = segment.id();
            assignments.insert(
                segment_id.clone(),
                ColumnAssignment {
                    segment_id,
                    column,
                    column_count,
                },
            );
        }
    }

    assignments
}

/// Largest number of segments active at the same instant.
pub fn peak_concurrency(segments: &[TimedSegment]) -> usize {
    let mut edges: Vec<(DateTime<Utc>, i32)> = segments
        .iter()
        .flat_map(|s| [(s.start, 1), (s.end, -1)])
        .collect();
    // Ends sort before starts at the same instant: touching is not overlapping.
    edges.sort();

    let mut active = 0i32;
    let mut peak = 0i32;
    for (_, delta) in edges {
        active += delta;
        peak = peak.max(active);
    }
    peak as usize
}
