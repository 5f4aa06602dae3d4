use flexi_logger::{FileSpec, Logger};
use heron::agenda::Agenda;
use heron::config;
use heron::grid::{self, Direction, ViewMode};
use heron::render;

use chrono::{Local, NaiveDate, NaiveTime};
use std::convert::TryFrom;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "hn",
    about = "Heron - calendar grid projection on the command line."
)]
pub struct Args {
    #[structopt(help = "folder containing *.toml event files", parse(from_os_str))]
    pub events: Option<PathBuf>,

    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "v",
        long = "view",
        default_value = "month",
        help = "view mode (month, week or day)"
    )]
    pub view: ViewMode,

    #[structopt(
        short = "d",
        long = "date",
        help = "reference date (YYYY-MM-DD), defaults to today"
    )]
    pub date: Option<NaiveDate>,

    #[structopt(long = "next", default_value = "0", help = "navigate forward N steps")]
    pub next: u32,

    #[structopt(long = "prev", default_value = "0", help = "navigate backward N steps")]
    pub prev: u32,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    logger.start()?;

    let config = config::load_suitable_config(args.configfile.as_deref())?;

    let agenda = if let Some(path) = &args.events {
        Agenda::from_dir(path)?
    } else if !config.collections.is_empty() {
        Agenda::from_config(&config)?
    } else {
        // bare calendar without any event source
        Agenda::default()
    };

    let now = Local::now().naive_local();
    let mut reference = match args.date {
        Some(date) => date.and_time(NaiveTime::MIN),
        None => now,
    };

    for _ in 0..args.next {
        reference = grid::navigate(reference, args.view, Direction::Next);
    }
    for _ in 0..args.prev {
        reference = grid::navigate(reference, args.view, Direction::Prev);
    }

    let range = grid::view_range(reference, args.view);
    let events = agenda.events_in_range(&range);
    let today = now.date();

    let output = match args.view {
        ViewMode::Month => render::render_month(
            reference,
            &grid::month_grid(reference, today, &events, config.month_event_cap),
        ),
        ViewMode::Week => render::render_week(&grid::week_grid(reference, today, &events)),
        ViewMode::Day => render::render_day(reference, &grid::day_hours(reference, &events)),
    };

    print!("{}", output);

    Ok(())
}
