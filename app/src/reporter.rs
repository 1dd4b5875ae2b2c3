// In app/src/reporter.rs

use chrono::NaiveDate;
use core_types::{AveragedPoint, Event};
use serde::Serialize;
use std::io::{self, Write};
use strategies::CrossoverReport;

const RULE_WIDTH: usize = 60;

/// What was analyzed, for the banner and the JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct RunHeader {
    pub ticker: String,
    pub short_window: usize,
    pub long_window: usize,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// The JSON document handed to an external plotter.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    #[serde(flatten)]
    pub header: &'a RunHeader,
    pub points: &'a [AveragedPoint],
    pub events: &'a [Event],
}

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Prints the run banner.
pub fn write_header<W: Write>(out: &mut W, header: &RunHeader) -> io::Result<()> {
    writeln!(out, "{}", rule())?;
    writeln!(out, "MOVING AVERAGE CROSSOVER STRATEGY")?;
    writeln!(out, "{}", rule())?;
    writeln!(out, "Ticker: {}", header.ticker)?;
    writeln!(out, "Short-term MA: {} days", header.short_window)?;
    writeln!(out, "Long-term MA: {} days", header.long_window)?;
    writeln!(
        out,
        "Date Range: {} to {}",
        header.start_date.format("%Y-%m-%d"),
        header.end_date.format("%Y-%m-%d")
    )?;
    writeln!(out, "{}", rule())?;
    writeln!(out)
}

/// Formats one event as `Date: YYYY-MM-DD | Price: $X.XX`.
///
/// A price that is not a finite number prints as `N/A`.
pub fn format_event_line(event: &Event) -> String {
    let date = event.timestamp.format("%Y-%m-%d");
    if event.price.is_finite() {
        format!("Date: {} | Price: ${:.2}", date, event.price)
    } else {
        format!("Date: {} | Price: N/A", date)
    }
}

fn write_section<'a, W: Write>(
    out: &mut W,
    title: &str,
    empty_message: &str,
    events: impl Iterator<Item = &'a Event>,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", rule())?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", rule())?;

    let mut any = false;
    for event in events {
        any = true;
        writeln!(out, "{}", format_event_line(event))?;
    }
    if !any {
        writeln!(out, "{}", empty_message)?;
    }
    Ok(())
}

/// Prints the buy and sell events, each group in date order.
pub fn write_signals<W: Write>(out: &mut W, report: &CrossoverReport) -> io::Result<()> {
    write_section(
        out,
        "BUY SIGNALS (Golden Cross - Short MA crosses above Long MA)",
        "No buy signals generated in this period.",
        report.buys(),
    )?;
    write_section(
        out,
        "SELL SIGNALS (Death Cross - Short MA crosses below Long MA)",
        "No sell signals generated in this period.",
        report.sells(),
    )?;
    writeln!(out, "{}", rule())?;
    writeln!(out)
}

/// Serializes the header, averaged points and events as pretty JSON.
pub fn write_json<W: Write>(
    out: &mut W,
    header: &RunHeader,
    report: &CrossoverReport,
) -> anyhow::Result<()> {
    let doc = JsonReport {
        header,
        points: &report.points,
        events: &report.events,
    };
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out)?;
    Ok(())
}
