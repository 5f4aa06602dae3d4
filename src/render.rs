use chrono::{Datelike, Month, NaiveDateTime};
use num_traits::FromPrimitive;
use std::fmt::Write;

use crate::grid::{DayCell, HourBucket};

const WEEKDAY_HEADER: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const CELL_WIDTH: usize = 5;

fn month_label(reference: NaiveDateTime) -> String {
    let month = Month::from_u32(reference.month()).unwrap_or(Month::January);
    format!("{} {}", month.name(), reference.year())
}

fn cell_text(cell: &DayCell<'_>) -> String {
    let today = if cell.is_today { '*' } else { ' ' };
    let busy = if cell.overflow > 0 {
        '+'
    } else if !cell.events.is_empty() {
        '.'
    } else {
        ' '
    };

    format!("{}{:>2}{}", today, cell.date.day(), busy)
}

/// Formats a 42-cell month projection as a 6x7 day-number grid followed by
/// the event listing of the view month. Pure formatting; all placement
/// decisions were already made by the grid layer.
pub fn render_month(reference: NaiveDateTime, cells: &[DayCell<'_>]) -> String {
    let mut out = String::new();

    writeln!(out, "{}", month_label(reference)).unwrap();

    for head in WEEKDAY_HEADER.iter() {
        write!(out, "{:>width$}", head, width = CELL_WIDTH).unwrap();
    }
    writeln!(out).unwrap();

    for row in cells.chunks(WEEKDAY_HEADER.len()) {
        for cell in row {
            write!(out, "{:>width$}", cell_text(cell), width = CELL_WIDTH).unwrap();
        }
        writeln!(out).unwrap();
    }

    for cell in cells
        .iter()
        .filter(|cell| cell.in_view_month && !cell.events.is_empty())
    {
        let label = cell.date.format("%b %d").to_string();

        for (i, event) in cell.events.iter().enumerate() {
            let prefix = if i == 0 { label.as_str() } else { "" };
            writeln!(
                out,
                "{:<6}  {} {} {}",
                prefix,
                event.kind.symbol(),
                event.start.format("%H:%M"),
                event.title
            )
            .unwrap();
        }

        if cell.overflow > 0 {
            writeln!(out, "{:<6}  + {} more", "", cell.overflow).unwrap();
        }
    }

    out
}

pub fn render_week(cells: &[DayCell<'_>]) -> String {
    let mut out = String::new();

    if let Some(first) = cells.first() {
        writeln!(out, "Week of {}", first.date.format("%b %d, %Y")).unwrap();
    }

    for cell in cells {
        writeln!(
            out,
            "{}{}",
            cell.date.format("%a %b %d"),
            if cell.is_today { " *" } else { "" }
        )
        .unwrap();

        for event in &cell.events {
            writeln!(
                out,
                "    {} {} {}",
                event.kind.symbol(),
                event.start.format("%H:%M"),
                event.title
            )
            .unwrap();
        }
    }

    out
}

pub fn render_day(reference: NaiveDateTime, buckets: &[HourBucket<'_>]) -> String {
    let mut out = String::new();

    writeln!(out, "{}", reference.date().format("%A, %B %d, %Y")).unwrap();

    for bucket in buckets {
        if bucket.events.is_empty() {
            writeln!(out, "{:02}:00", bucket.hour).unwrap();
            continue;
        }

        for (i, event) in bucket.events.iter().enumerate() {
            let prefix = if i == 0 {
                format!("{:02}:00", bucket.hour)
            } else {
                " ".repeat(5)
            };
            writeln!(
                out,
                "{}  {} {} {} ({} min)",
                prefix,
                event.kind.symbol(),
                event.start.format("%H:%M"),
                event.title,
                event.duration().num_minutes()
            )
            .unwrap();
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{day_hours, month_grid, week_grid};
    use crate::provider::{Event, EventKind};
    use chrono::{NaiveDate, NaiveDateTime};

    fn dt(day: u32, hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    fn event(title: &str, start: NaiveDateTime, end: NaiveDateTime) -> Event {
        Event {
            id: title.to_owned(),
            title: title.to_owned(),
            start,
            end,
            kind: EventKind::Meeting,
            location: None,
            description: None,
        }
    }

    #[test]
    fn month_render_shows_title_header_and_overflow() {
        let events: Vec<Event> = (0..5)
            .map(|i| event(&format!("e{}", i), dt(15, 9 + i, 0), dt(15, 10 + i, 0)))
            .collect();

        let reference = dt(15, 0, 0);
        let grid = month_grid(reference, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(), &events, 3);
        let text = render_month(reference, &grid);

        assert!(text.contains("March 2024"));
        assert!(text.contains("Sun"));
        assert!(text.contains("+ 2 more"));
        assert!(text.contains("e0"));
        assert!(!text.contains("e4"));
    }

    #[test]
    fn week_render_lists_every_event() {
        let events: Vec<Event> = (0..5)
            .map(|i| event(&format!("e{}", i), dt(15, 9 + i, 0), dt(15, 10 + i, 0)))
            .collect();

        let reference = dt(15, 0, 0);
        let grid = week_grid(reference, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(), &events);
        let text = render_week(&grid);

        assert!(text.contains("Week of Mar 10, 2024"));
        for i in 0..5 {
            assert!(text.contains(&format!("e{}", i)));
        }
    }

    #[test]
    fn day_render_prints_every_hour() {
        let events = vec![event("Standup", dt(15, 14, 7), dt(15, 14, 22))];
        let reference = dt(15, 0, 0);
        let text = render_day(reference, &day_hours(reference, &events));

        assert!(text.contains("Friday, March 15, 2024"));
        assert!(text.contains("14:07 Standup (15 min)"));
        assert!(text.contains("23:00"));
    }
}
