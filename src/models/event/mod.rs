// Event module
// Calendar event snapshot as delivered by the schedule backend

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

pub const UNTITLED: &str = "Untitled";

/// One side of an event's time range, in Google Calendar's shape.
///
/// Timed events carry `dateTime`, all-day events carry `date`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBoundary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl EventBoundary {
    pub fn timed(date_time: impl Into<String>) -> Self {
        Self {
            date_time: Some(date_time.into()),
            ..Self::default()
        }
    }

    pub fn all_day(date: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            ..Self::default()
        }
    }

    pub fn is_date_only(&self) -> bool {
        self.date_time.is_none() && self.date.is_some()
    }

    /// Parse the `dateTime` field. RFC 3339 with an offset is preferred; a
    /// bare local timestamp is resolved through `timeZone` when present.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        let raw = self.date_time.as_deref()?.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").ok()?;
        let tz: Tz = self.time_zone.as_deref()?.parse().ok()?;
        tz.from_local_datetime(&naive)
            .earliest()
            .map(|local| local.with_timezone(&Utc))
    }

    /// Parse the `date` field (`YYYY-MM-DD`).
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.as_deref()?.trim(), "%Y-%m-%d").ok()
    }
}

/// Parsed time range of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTiming {
    Timed {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// `end` is exclusive, as Google Calendar reports it.
    AllDay { start: NaiveDate, end: NaiveDate },
}

/// Calendar event as fetched from the schedule collaborator.
///
/// Immutable for the lifetime of a snapshot; the layout engine only reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub start: EventBoundary,
    #[serde(default)]
    pub end: EventBoundary,
    #[serde(default)]
    pub html_link: Option<String>,
    #[serde(default)]
    pub calendar_id: Option<String>,
    #[serde(default)]
    pub calendar_name: Option<String>,
    #[serde(default)]
    pub calendar_color: Option<String>,
    #[serde(default)]
    pub is_primary: Option<bool>,
}

impl CalendarEvent {
    /// Create a timed event from two instants.
    ///
    /// # Examples
    /// ```
    /// use schedule_layout::models::event::CalendarEvent;
    /// use chrono::{TimeZone, Utc};
    ///
    /// let start = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
    /// let event = CalendarEvent::timed("standup", "Standup", start, start + chrono::Duration::minutes(15));
    /// assert!(!event.is_all_day());
    /// ```
    pub fn timed(
        id: impl Into<String>,
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            summary: Some(title.into()),
            start: EventBoundary::timed(start.to_rfc3339()),
            end: EventBoundary::timed(end.to_rfc3339()),
            ..Self::default()
        }
    }

    /// Create an all-day event covering `[start, end)`.
    pub fn all_day(
        id: impl Into<String>,
        title: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            id: Some(id.into()),
            summary: Some(title.into()),
            start: EventBoundary::all_day(start.format("%Y-%m-%d").to_string()),
            end: EventBoundary::all_day(end.format("%Y-%m-%d").to_string()),
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.calendar_color = Some(color.into());
        self
    }

    /// Identifier used for layout bookkeeping; blank when the backend sent none.
    pub fn key(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    /// Title for display, falling back to "Untitled" when blank.
    pub fn display_title(&self) -> &str {
        match self.summary.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title,
            _ => UNTITLED,
        }
    }

    pub fn is_all_day(&self) -> bool {
        self.start.is_date_only()
    }

    /// Parse start/end into an [`EventTiming`], or `None` if either side is
    /// missing or unparsable.
    pub fn timing(&self) -> Option<EventTiming> {
        if self.is_all_day() {
            let start = self.start.calendar_date()?;
            let end = self.end.calendar_date()?;
            return Some(EventTiming::AllDay { start, end });
        }
        let start = self.start.instant()?;
        let end = self.end.instant()?;
        Some(EventTiming::Timed { start, end })
    }

    /// Whether the event has finished before `now`.
    pub fn ended_before(&self, now: DateTime<Utc>, tz: Tz) -> bool {
        match self.timing() {
            Some(EventTiming::Timed { end, .. }) => end <= now,
            Some(EventTiming::AllDay { end, .. }) => end <= now.with_timezone(&tz).date_naive(),
            None => false,
        }
    }
}
