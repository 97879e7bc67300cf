use std::time::{Duration, Instant};

/// Holds back rapidly changing values until they settle.
///
/// Only the latest value is kept; pushing a different value restarts the
/// quiet period, so superseded values are never emitted. The caller passes
/// the current time in, which keeps the type deterministic under test.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet_period: Duration,
    pending: Option<(T, Instant)>,
    last_emitted: Option<T>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
            last_emitted: None,
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// Queue `value`. Returns false when it matches what is already pending,
    /// in which case the timer keeps running.
    pub fn push(&mut self, value: T, now: Instant) -> bool {
        if let Some((pending, _)) = &self.pending {
            if *pending == value {
                return false;
            }
        }
        self.pending = Some((value, now));
        true
    }

    /// Emit the pending value once it has been quiet long enough.
    ///
    /// A settled value equal to the last one emitted is swallowed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let (_, since) = self.pending.as_ref()?;
        if now.saturating_duration_since(*since) < self.quiet_period {
            return None;
        }
        let (value, _) = self.pending.take()?;
        if self.last_emitted.as_ref() == Some(&value) {
            return None;
        }
        self.last_emitted = Some(value.clone());
        Some(value)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value will be released, if nothing supersedes it.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, since)| *since + self.quiet_period)
    }
}
