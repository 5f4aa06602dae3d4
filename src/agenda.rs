use chrono::{Duration, NaiveDate, NaiveTime};
use std::path::Path;

use crate::config::Config;
use crate::grid::DateRange;
use crate::provider::{Event, EventFilter, EventStore, Result};

/// Owns the loaded event collections and answers date-window queries. The
/// projection layer never filters by range itself; it gets handed whatever
/// this returns.
#[derive(Default)]
pub struct Agenda {
    stores: Vec<EventStore>,
}

impl Agenda {
    pub fn from_config(config: &Config) -> Result<Self> {
        let stores: Vec<EventStore> = config
            .collections
            .iter()
            .map(|spec| {
                EventStore::from_dir(&spec.path).map(|store| match &spec.name {
                    Some(name) => store.with_name(name),
                    None => store,
                })
            })
            .inspect(|store| {
                if let Err(e) = store {
                    log::warn!("{}", e)
                }
            })
            .filter_map(Result::ok)
            .collect();

        Ok(Agenda { stores })
    }

    pub fn from_dir(path: &Path) -> Result<Self> {
        Ok(Agenda {
            stores: vec![EventStore::from_dir(path)?],
        })
    }

    pub fn stores(&self) -> &[EventStore] {
        &self.stores
    }

    /// All events whose start falls inside `range`. The filter is widened
    /// by a day past `end` so ranges with an inclusive-day end (month, week)
    /// are fully covered; callers always get a superset of the window.
    pub fn events_in_range(&self, range: &DateRange) -> Vec<Event> {
        let end = range.end + Duration::days(1);

        self.stores
            .iter()
            .flat_map(|store| {
                store.filter_events(EventFilter::default().datetime_range(range.start..end))
            })
            .cloned()
            .collect()
    }

    pub fn events_of_day(&self, date: &NaiveDate) -> Vec<Event> {
        let begin = date.and_time(NaiveTime::MIN);
        let end = begin + Duration::days(1);

        self.stores
            .iter()
            .flat_map(|store| {
                store.filter_events(EventFilter::default().datetime_range(begin..end))
            })
            .cloned()
            .collect()
    }
}
