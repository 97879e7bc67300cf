// Benchmark for the layout packers
// Measures all-day row packing and timed column layout over growing event sets

use std::sync::Arc;

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use schedule_layout::models::display::DisplayEvent;
use schedule_layout::models::event::CalendarEvent;
use schedule_layout::services::layout::all_day::pack_all_day;
use schedule_layout::services::layout::segments::{all_day_segments, timed_segments_for_day};
use schedule_layout::services::layout::timed::layout_timed;
use schedule_layout::utils::date::DayCalendar;

fn reference() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

// Deterministic pseudo-random spread so runs are comparable
fn all_day_events(count: usize) -> Vec<Arc<DisplayEvent>> {
    (0..count)
        .map(|i| {
            let start = reference() + Duration::days(((i * 7) % 60) as i64 - 30);
            let end = start + Duration::days(1 + (i % 5) as i64);
            Arc::new(DisplayEvent::new(CalendarEvent::all_day(format!("a{}", i), "All day", start, end)))
        })
        .collect()
}

fn timed_events(count: usize) -> Vec<Arc<DisplayEvent>> {
    let midnight = Utc.from_utc_datetime(&reference().and_hms_opt(0, 0, 0).unwrap());
    (0..count)
        .map(|i| {
            let start = midnight + Duration::minutes(((i * 37) % 1320) as i64);
            let end = start + Duration::minutes(15 + ((i * 13) % 120) as i64);
            Arc::new(DisplayEvent::new(CalendarEvent::timed(format!("t{}", i), "Meeting", start, end)))
        })
        .collect()
}

fn bench_all_day_packing(c: &mut Criterion) {
    let mut group = c.benchmark_group("all_day_packing");
    let calendar = DayCalendar::new(chrono_tz::UTC, reference());

    for count in [10, 100, 1000].iter() {
        let events = all_day_events(*count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &events, |b, events| {
            b.iter(|| pack_all_day(all_day_segments(black_box(events), &calendar)));
        });
    }

    group.finish();
}

fn bench_timed_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("timed_layout");
    let calendar = DayCalendar::new(chrono_tz::UTC, reference());

    for count in [10, 50, 200].iter() {
        let events = timed_events(*count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &events, |b, events| {
            b.iter(|| {
                let segments = timed_segments_for_day(black_box(events), reference(), &calendar);
                layout_timed(&segments)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_all_day_packing, bench_timed_layout);
criterion_main!(benches);
