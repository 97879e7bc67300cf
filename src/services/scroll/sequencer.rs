use std::time::{Duration, Instant};

use chrono::NaiveDate;

use crate::utils::date::DayCalendar;

/// Where a programmatic scroll should land.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTarget {
    pub day_index: i64,
    /// Hour of day to bring into view; `None` leaves the vertical offset alone.
    pub hour: Option<f32>,
}

impl ScrollTarget {
    /// Target for `date`, clamped to the calendar window.
    pub fn for_date(date: NaiveDate, hour: Option<f32>, calendar: &DayCalendar) -> Self {
        Self {
            day_index: calendar.day_index(date),
            hour: hour.map(|h| h.clamp(0.0, 24.0)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScrollTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollCommand {
    Horizontal { ticket: ScrollTicket, day_index: i64 },
    Vertical { ticket: ScrollTicket, hour: f32 },
}

#[derive(Debug, Clone, Copy)]
struct PendingScroll {
    ticket: ScrollTicket,
    target: ScrollTarget,
    vertical_due: Option<Instant>,
}

/// Runs a programmatic scroll as horizontal-then-vertical steps.
///
/// The vertical step fires after `step_delay`, or earlier if the host reports
/// that the horizontal animation finished. A new request replaces the pending
/// one outright; nothing belonging to an older ticket is emitted afterwards.
#[derive(Debug, Clone)]
pub struct ScrollSequencer {
    step_delay: Duration,
    next_ticket: u64,
    pending: Option<PendingScroll>,
}

impl ScrollSequencer {
    pub fn new(step_delay: Duration) -> Self {
        Self {
            step_delay,
            next_ticket: 0,
            pending: None,
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    pub fn request(&mut self, target: ScrollTarget) -> ScrollTicket {
        self.next_ticket += 1;
        let ticket = ScrollTicket(self.next_ticket);
        if let Some(previous) = self.pending.replace(PendingScroll {
            ticket,
            target,
            vertical_due: None,
        }) {
            log::debug!("Scroll request {:?} superseded by {:?}", previous.ticket, ticket);
        }
        ticket
    }

    /// Commands that are due at `now`, in order.
    pub fn poll(&mut self, now: Instant) -> Vec<ScrollCommand> {
        let mut commands = Vec::new();
        let Some(pending) = self.pending.as_mut() else {
            return commands;
        };

        if pending.vertical_due.is_none() {
            commands.push(ScrollCommand::Horizontal {
                ticket: pending.ticket,
                day_index: pending.target.day_index,
            });
            match pending.target.hour {
                Some(_) => pending.vertical_due = Some(now + self.step_delay),
                None => {
                    self.pending = None;
                    return commands;
                }
            }
        }

        if let (Some(due), Some(hour)) = (pending.vertical_due, pending.target.hour) {
            if now >= due {
                commands.push(ScrollCommand::Vertical {
                    ticket: pending.ticket,
                    hour,
                });
                self.pending = None;
            }
        }

        commands
    }

    /// Host callback: the horizontal animation for `ticket` completed.
    /// Returns false for stale or unknown tickets.
    pub fn horizontal_finished(&mut self, ticket: ScrollTicket, now: Instant) -> bool {
        match self.pending.as_mut() {
            Some(pending) if pending.ticket == ticket && pending.vertical_due.is_some() => {
                pending.vertical_due = Some(now);
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_none()
    }
}
