// Date utility functions
// Timezone-aware day arithmetic shared by both packers

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Default half-width of the addressable day window.
pub const DEFAULT_WINDOW_DAYS: i64 = 365;

/// Largest accepted window half-width, roughly a century either way.
pub const MAX_WINDOW_DAYS: i64 = 36_500;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Explicit calendar context for layout math.
///
/// Days are addressed as signed offsets from `reference` and every lookup is
/// clamped to `reference ± window_days`. Nothing here reads the device locale,
/// so the same inputs produce the same layout on any machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCalendar {
    tz: Tz,
    reference: NaiveDate,
    window_days: i64,
}

impl DayCalendar {
    pub fn new(tz: Tz, reference: NaiveDate) -> Self {
        Self {
            tz,
            reference,
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }

    /// Override the window half-width, kept within `1..=MAX_WINDOW_DAYS`.
    pub fn with_window(mut self, window_days: i64) -> Self {
        self.window_days = window_days.clamp(1, MAX_WINDOW_DAYS);
        self
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    pub fn window_days(&self) -> i64 {
        self.window_days
    }

    pub fn min_index(&self) -> i64 {
        -self.window_days
    }

    pub fn max_index(&self) -> i64 {
        self.window_days
    }

    /// Clamp an arbitrary day index into the addressable window.
    pub fn clamp_index(&self, index: i64) -> i64 {
        index.clamp(self.min_index(), self.max_index())
    }

    /// Unclamped offset of `date` from the reference date.
    pub fn raw_index(&self, date: NaiveDate) -> i64 {
        (date - self.reference).num_days()
    }

    /// Day index of `date`, clamped to the window edge.
    pub fn day_index(&self, date: NaiveDate) -> i64 {
        self.clamp_index(self.raw_index(date))
    }

    /// Calendar date for a day index, clamped to the window edge.
    ///
    /// Indices that would leave chrono's date range saturate at its limits.
    pub fn date_for_index(&self, index: i64) -> NaiveDate {
        let offset = self.clamp_index(index);
        self.reference
            .checked_add_signed(Duration::days(offset))
            .unwrap_or(if offset < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
    }

    /// Local calendar date an instant falls on.
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.tz).date_naive()
    }

    /// Wall-clock local time for an instant.
    pub fn local_datetime(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.tz).naive_local()
    }

    /// First instant of `date` in this calendar's timezone.
    ///
    /// Zones that skip local midnight (DST gaps at 00:00) start the day at the
    /// first wall-clock time that exists.
    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        let midnight = date.and_time(NaiveTime::MIN);
        let mut probe = midnight;
        for _ in 0..=24 {
            if let Some(local) = self.tz.from_local_datetime(&probe).earliest() {
                return local.with_timezone(&Utc);
            }
            match probe.checked_add_signed(Duration::minutes(30)) {
                Some(next) => probe = next,
                None => break,
            }
        }
        // No zone has a gap this long; treat midnight as UTC.
        Utc.from_utc_datetime(&midnight)
    }

    /// Half-open `[start, end)` instant range covering `date`.
    pub fn day_bounds(&self, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        let next = date.succ_opt().unwrap_or(date);
        (self.start_of_day(date), self.start_of_day(next))
    }

    /// Fraction of `day` elapsed at `instant`, measured on the wall clock.
    ///
    /// Computed as elapsed minutes and seconds since local midnight over 1440
    /// minutes rather than from hour/minute components, so the instant at the
    /// following midnight reads as 1.0 instead of wrapping to 0.0. Result is
    /// clamped to `[0, 1]`.
    pub fn fraction_of_day(&self, instant: DateTime<Utc>, day: NaiveDate) -> f64 {
        let local = self.local_datetime(instant);
        let elapsed = local - day.and_time(NaiveTime::MIN);
        let fraction = elapsed.num_seconds() as f64 / SECONDS_PER_DAY;
        fraction.clamp(0.0, 1.0)
    }
}
