use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use itertools::Itertools;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

use crate::provider::Event;

pub const MONTH_GRID_CELLS: usize = 42;
pub const WEEK_GRID_CELLS: usize = 7;
pub const DAY_GRID_HOURS: usize = 24;

/// Default number of events a month cell exposes before overflowing.
pub const DEFAULT_MONTH_EVENT_CAP: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Month,
    Week,
    Day,
}

#[derive(Debug)]
pub struct NotAViewModeError {}

impl fmt::Display for NotAViewModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value could not be converted to a view mode")
    }
}

impl Error for NotAViewModeError {}

impl FromStr for ViewMode {
    type Err = NotAViewModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "month" => Ok(ViewMode::Month),
            "week" => Ok(ViewMode::Week),
            "day" => Ok(ViewMode::Day),
            _ => Err(NotAViewModeError {}),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// Window of time a view displays. `start` is truncated to the unit boundary
/// of the view mode. For month views `end` is the *start* of the last day of
/// the month, an inclusive day boundary rather than an exclusive instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell<'a> {
    pub date: NaiveDate,
    pub in_view_month: bool,
    pub is_today: bool,
    pub events: Vec<&'a Event>,
    pub overflow: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourBucket<'a> {
    pub hour: u32,
    pub events: Vec<&'a Event>,
}

fn week_start(date: NaiveDate) -> NaiveDate {
    // weeks start on Sunday
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap()
}

fn events_by_day<'a>(events: &'a [Event]) -> HashMap<NaiveDate, Vec<&'a Event>> {
    events
        .iter()
        .into_group_map_by(|event| event.start.date())
}

pub fn view_range(reference: NaiveDateTime, mode: ViewMode) -> DateRange {
    match mode {
        ViewMode::Month => {
            let first = first_of_month(reference.date());
            let last = first.checked_add_months(Months::new(1)).unwrap() - Duration::days(1);
            DateRange {
                start: first.and_time(NaiveTime::MIN),
                end: last.and_time(NaiveTime::MIN),
            }
        }
        ViewMode::Week => {
            let start = week_start(reference.date());
            DateRange {
                start: start.and_time(NaiveTime::MIN),
                end: (start + Duration::days(6)).and_time(NaiveTime::MIN),
            }
        }
        ViewMode::Day => {
            let start = reference.date().and_time(NaiveTime::MIN);
            DateRange {
                start,
                end: start + Duration::days(1),
            }
        }
    }
}

/// Projects a month onto a fixed 6x7 grid of day cells. The grid always
/// begins on the Sunday on or before the first of the month, so cells from
/// adjacent months pad the front and back (`in_view_month` is false there).
///
/// An event lands in the cell matching its *start* date; events spanning
/// several days still appear exactly once. At most `cap` events are exposed
/// per cell, in input order, with the remainder counted in `overflow`.
pub fn month_grid<'a>(
    reference: NaiveDateTime,
    today: NaiveDate,
    events: &'a [Event],
    cap: usize,
) -> Vec<DayCell<'a>> {
    let origin = week_start(first_of_month(reference.date()));
    let by_day = events_by_day(events);

    (0..MONTH_GRID_CELLS as i64)
        .map(|offset| {
            let date = origin + Duration::days(offset);
            let matching = by_day.get(&date).map(Vec::as_slice).unwrap_or(&[]);

            DayCell {
                date,
                in_view_month: date.month() == reference.month()
                    && date.year() == reference.year(),
                is_today: date == today,
                events: matching.iter().take(cap).copied().collect(),
                overflow: matching.len().saturating_sub(cap),
            }
        })
        .collect()
}

/// Seven cells, Sunday through Saturday of the reference week. Same
/// placement rule as the month grid but without a display cap.
pub fn week_grid<'a>(
    reference: NaiveDateTime,
    today: NaiveDate,
    events: &'a [Event],
) -> Vec<DayCell<'a>> {
    let origin = week_start(reference.date());
    let by_day = events_by_day(events);

    (0..WEEK_GRID_CELLS as i64)
        .map(|offset| {
            let date = origin + Duration::days(offset);
            let matching = by_day.get(&date).map(Vec::as_slice).unwrap_or(&[]);

            DayCell {
                date,
                in_view_month: true,
                is_today: date == today,
                events: matching.to_vec(),
                overflow: 0,
            }
        })
        .collect()
}

/// One bucket per hour of the reference day. An event belongs to the bucket
/// of its start instant's hour; durations crossing an hour boundary do not
/// split the event across buckets.
pub fn day_hours<'a>(reference: NaiveDateTime, events: &'a [Event]) -> Vec<HourBucket<'a>> {
    let date = reference.date();

    let mut buckets: Vec<HourBucket<'a>> = (0..DAY_GRID_HOURS as u32)
        .map(|hour| HourBucket {
            hour,
            events: Vec::new(),
        })
        .collect();

    for event in events.iter().filter(|event| event.start.date() == date) {
        buckets[event.start.time().hour() as usize].events.push(event);
    }

    buckets
}

pub fn navigate(reference: NaiveDateTime, mode: ViewMode, direction: Direction) -> NaiveDateTime {
    match (mode, direction) {
        // calendar month arithmetic clamps to the last valid day,
        // e.g. Jan 31 -> Feb 28
        (ViewMode::Month, Direction::Next) => {
            reference.checked_add_months(Months::new(1)).unwrap()
        }
        (ViewMode::Month, Direction::Prev) => {
            reference.checked_sub_months(Months::new(1)).unwrap()
        }
        (ViewMode::Week, Direction::Next) => reference + Duration::days(7),
        (ViewMode::Week, Direction::Prev) => reference - Duration::days(7),
        (ViewMode::Day, Direction::Next) => reference + Duration::days(1),
        (ViewMode::Day, Direction::Prev) => reference - Duration::days(1),
    }
}
