use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::ops::{Bound, RangeBounds};

mod error;
mod store;

pub use error::{Error, ErrorKind, Result};
pub use store::EventStore;

/// Closed set of event categories. Only used for display grouping; the
/// projection logic never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    Meeting,
    Appointment,
    Task,
    Reminder,
    Break,
    Other,
}

static KIND_NAMES: phf::Map<&'static str, EventKind> = phf::phf_map! {
    "meeting" => EventKind::Meeting,
    "appointment" => EventKind::Appointment,
    "task" => EventKind::Task,
    "reminder" => EventKind::Reminder,
    "break" => EventKind::Break,
    "other" => EventKind::Other,
};

impl EventKind {
    /// Unrecognized names fall back to `Other` instead of failing.
    pub fn from_name(name: &str) -> Self {
        KIND_NAMES
            .get(name.trim().to_ascii_lowercase().as_str())
            .copied()
            .unwrap_or(EventKind::Other)
    }

    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Meeting => "meeting",
            EventKind::Appointment => "appointment",
            EventKind::Task => "task",
            EventKind::Reminder => "reminder",
            EventKind::Break => "break",
            EventKind::Other => "other",
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            EventKind::Meeting => '@',
            EventKind::Appointment => '!',
            EventKind::Task => '#',
            EventKind::Reminder => '~',
            EventKind::Break => '-',
            EventKind::Other => '*',
        }
    }
}

impl Default for EventKind {
    fn default() -> Self {
        EventKind::Other
    }
}

impl From<String> for EventKind {
    fn from(name: String) -> Self {
        EventKind::from_name(&name)
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        kind.name().to_owned()
    }
}

fn generate_id() -> String {
    uuid::Uuid::new_v4().hyphenated().to_string()
}

/// A single calendar entry. Timestamps are naive local date-times; `end`
/// is supplied by producers and not validated here, so zero- or
/// negative-duration events pass through and are placed by `start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default = "generate_id")]
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub kind: EventKind,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Event {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Range filter over event start instants.
#[derive(Debug, Clone, Copy)]
pub struct EventFilter {
    pub begin: Bound<NaiveDateTime>,
    pub end: Bound<NaiveDateTime>,
}

impl Default for EventFilter {
    fn default() -> Self {
        EventFilter {
            begin: Bound::Unbounded,
            end: Bound::Unbounded,
        }
    }
}

impl EventFilter {
    pub fn datetime_range<R: RangeBounds<NaiveDateTime>>(mut self, range: R) -> Self {
        self.begin = range.start_bound().cloned();
        self.end = range.end_bound().cloned();
        self
    }

    pub fn matches(&self, event: &Event) -> bool {
        (self.begin, self.end).contains(&event.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn kind_lookup_is_case_insensitive() {
        assert_eq!(EventKind::from_name("MEETING"), EventKind::Meeting);
        assert_eq!(EventKind::from_name(" break "), EventKind::Break);
    }

    #[test]
    fn unknown_kind_falls_back_to_other() {
        assert_eq!(EventKind::from_name("yoga"), EventKind::Other);
        assert_eq!(EventKind::from_name(""), EventKind::Other);
    }

    #[test]
    fn event_without_id_gets_one() {
        let event: Event = toml::from_str(
            r#"
            title = "Standup"
            start = "2024-03-15T10:00:00"
            end = "2024-03-15T10:15:00"
            kind = "meeting"
            "#,
        )
        .unwrap();

        assert!(!event.id.is_empty());
        assert_eq!(event.kind, EventKind::Meeting);
        assert_eq!(event.start, dt(15, 10));
        assert_eq!(event.location, None);
    }

    #[test]
    fn filter_matches_start_in_range() {
        let event: Event = toml::from_str(
            r#"
            title = "Standup"
            start = "2024-03-15T10:00:00"
            end = "2024-03-17T10:00:00"
            "#,
        )
        .unwrap();

        let filter = EventFilter::default().datetime_range(dt(15, 0)..dt(16, 0));
        assert!(filter.matches(&event));

        let filter = EventFilter::default().datetime_range(dt(16, 0)..dt(18, 0));
        assert!(!filter.matches(&event));

        assert!(EventFilter::default().matches(&event));
    }
}
