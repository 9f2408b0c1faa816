//! Basic command handlers for Xenophon CLI

use crate::cli::args::*;
use crate::cli::CliApp;
use crate::error::{Error, Result};
use crate::filters::{command_matches, location_matches};
use crate::provider::{CurrentDirectory, LocationGetter};
use crate::streamer::ResultSet;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

pub fn handle_insert(app: &mut CliApp, args: &InsertArgs) -> Result<()> {
    let entry = app.history.insert(&args.command)?;
    debug!(id = %entry.id, location = %entry.location, "recorded command");
    app.verbose_println(&format!("Recorded entry {}", entry.id));
    Ok(())
}

pub fn handle_list(app: &mut CliApp, args: &ListArgs) -> Result<()> {
    let location = list_location(args)?;
    let results = app.history.location(&location)?;
    let results = grep(results, args.grep.as_deref(), None)?;
    print_entries(app, &results, args.json)
}

/// The directory `list` reports on, defaulting to the working directory
fn list_location(args: &ListArgs) -> Result<String> {
    match &args.directory {
        Some(dir) => Ok(dir.clone()),
        None => CurrentDirectory.get().map_err(Error::location_resolution),
    }
}

pub fn handle_last(app: &mut CliApp, args: &LastArgs) -> Result<()> {
    let results = app.history.last_entries(args.count)?;
    let results = grep(
        results,
        args.grep.as_deref(),
        args.location_grep.as_deref(),
    )?;
    print_entries(app, &results, args.json)
}

pub fn handle_period(app: &mut CliApp, args: &PeriodArgs) -> Result<()> {
    let start = parse_time(&args.since, false)?;
    let end = match &args.until {
        Some(until) => parse_time(until, true)?,
        None => Utc::now(),
    };

    if start > end {
        return Err(Error::invalid_arguments(format!(
            "--since ({}) is after --until ({})",
            start, end
        )));
    }

    let results = app.history.period(start, end)?;
    let results = grep(results, args.grep.as_deref(), None)?;
    print_entries(app, &results, args.json)
}

/// Narrow `results` by the optional command and location patterns
fn grep(
    results: ResultSet,
    command: Option<&str>,
    location: Option<&str>,
) -> Result<ResultSet> {
    let results = match command {
        Some(pattern) => results.filter(command_matches(pattern)?),
        None => results,
    };
    let results = match location {
        Some(pattern) => results.filter(location_matches(pattern)?),
        None => results,
    };
    Ok(results)
}

fn print_entries(app: &CliApp, results: &ResultSet, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(results.output())?);
        return Ok(());
    }

    if results.is_empty() {
        if !app.quiet {
            eprintln!("No entries found");
        }
        return Ok(());
    }

    for entry in results {
        println!("{}", entry);
    }

    Ok(())
}

/// Parse a point in time given as RFC 3339, `YYYY-MM-DD` or Unix seconds
///
/// A bare date means the start of that day, or its last second when
/// `end_of_day` is set.
fn parse_time(value: &str, end_of_day: bool) -> Result<DateTime<Utc>> {
    let invalid = || Error::InvalidTimestamp {
        timestamp: value.to_string(),
    };

    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Ok(time.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let time = if end_of_day {
            date.and_hms_milli_opt(23, 59, 59, 999)
        } else {
            date.and_hms_opt(0, 0, 0)
        };
        return time.map(|t| t.and_utc()).ok_or_else(invalid);
    }

    if let Ok(secs) = value.parse::<i64>() {
        return DateTime::from_timestamp(secs, 0).ok_or_else(invalid);
    }

    Err(invalid())
}
