// In app/src/main.rs

use anyhow::Result;
use api_client::{FilePriceSource, PriceSource, YahooClient};
use app_config::Settings;
use chrono::{Days, Local, NaiveDate};
use clap::{Parser, Subcommand};
use core_types::Symbol;
use std::path::PathBuf;
use strategies::{MACrossover, MACrossoverSettings, Strategy};
use tracing_subscriber::prelude::*;

mod reporter;

use crate::reporter::RunHeader;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "Moving average crossover signals for a daily price history."
)]
struct Cli {
    /// Directory holding base.toml and the per-environment config files. Defaults to `./config`.
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Computes golden/death cross events for a symbol and prints them.
    Analyze {
        /// The ticker to analyze (e.g., "GOOGL"). Defaults to the configured ticker.
        #[arg(short, long)]
        symbol: Option<String>,

        /// First date of the range in YYYY-MM-DD format.
        #[arg(long, value_parser = parse_date)]
        start_date: Option<NaiveDate>,

        /// Last date of the range (inclusive) in YYYY-MM-DD format. Defaults to today.
        #[arg(long, value_parser = parse_date)]
        end_date: Option<NaiveDate>,

        /// Short moving average window, in trading days.
        #[arg(long)]
        short_window: Option<usize>,

        /// Long moving average window, in trading days.
        #[arg(long)]
        long_window: Option<usize>,

        /// Read closes from a local price file instead of Yahoo Finance.
        #[arg(long)]
        data_file: Option<PathBuf>,

        /// Print averages and events as JSON instead of the text report.
        #[arg(long)]
        json: bool,
    },
}

fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got '{}': {}", s, e))
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    let settings = match &cli.config_dir {
        Some(dir) => app_config::load_settings_from(dir)?,
        None => app_config::load_settings()?,
    };
    init_tracing(&settings);

    tracing::info!(environment = %settings.app.environment, "Starting macross");

    match cli.command {
        Commands::Analyze {
            symbol,
            start_date,
            end_date,
            short_window,
            long_window,
            data_file,
            json,
        } => {
            let request = AnalyzeRequest::resolve(
                &settings,
                symbol,
                start_date,
                end_date,
                short_window,
                long_window,
            );
            handle_analyze(&settings, request, data_file, json).await?;
        }
    }

    tracing::info!("Analysis complete.");

    Ok(())
}

/// Logs go to stderr so the report on stdout can be piped.
fn init_tracing(settings: &Settings) {
    let level = settings
        .app
        .log_level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(tracing_subscriber::filter::Targets::new().with_default(level));
    tracing_subscriber::registry().with(fmt_layer).init();
}

// --- "Analyze" Subcommand Logic ---

/// Command-line values merged over the configured defaults.
#[derive(Debug, Clone, PartialEq)]
struct AnalyzeRequest {
    symbol: Symbol,
    start: NaiveDate,
    end: NaiveDate,
    crossover: MACrossoverSettings,
}

impl AnalyzeRequest {
    fn resolve(
        settings: &Settings,
        symbol: Option<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        short_window: Option<usize>,
        long_window: Option<usize>,
    ) -> Self {
        let defaults = settings.analysis.crossover_settings();
        let end = end_date.unwrap_or_else(|| Local::now().date_naive());
        let start = start_date.unwrap_or_else(|| {
            end.checked_sub_days(Days::new(settings.analysis.lookback_days.into()))
                .unwrap_or(NaiveDate::MIN)
        });

        Self {
            symbol: Symbol(symbol.unwrap_or_else(|| settings.analysis.ticker.clone())),
            start,
            end,
            crossover: MACrossoverSettings {
                short_window: short_window.unwrap_or(defaults.short_window),
                long_window: long_window.unwrap_or(defaults.long_window),
            },
        }
    }

    fn header(&self) -> RunHeader {
        RunHeader {
            ticker: self.symbol.0.clone(),
            short_window: self.crossover.short_window,
            long_window: self.crossover.long_window,
            start_date: self.start,
            end_date: self.end,
        }
    }
}

/// Handles the logic for the `analyze` subcommand.
async fn handle_analyze(
    settings: &Settings,
    request: AnalyzeRequest,
    data_file: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    // --- 1. Pick the price source ---
    let source: Box<dyn PriceSource + Send + Sync> = match data_file {
        Some(path) => Box::new(FilePriceSource::new(path)),
        None => Box::new(YahooClient::new(&settings.market_data)?),
    };
    let header = request.header();
    let mut stdout = std::io::stdout();

    if !json {
        reporter::write_header(&mut stdout, &header)?;
    }

    // --- 2. Load Data ---
    tracing::info!(source = source.name(), symbol = %request.symbol, "Loading price history...");
    let series = source
        .fetch_daily_closes(&request.symbol, request.start, request.end)
        .await?;
    tracing::info!("Loaded {} daily closes for the specified date range.", series.len());

    // --- 3. Run the strategy ---
    let strategy: Box<dyn Strategy> = Box::new(MACrossover::new(request.crossover));
    let report = match strategy.run(&series) {
        Err(strategies::Error::EmptyInput) => {
            anyhow::bail!("No data retrieved. Please check the ticker symbol and try again.")
        }
        other => other?,
    };
    tracing::info!(
        strategy = strategy.name(),
        buys = report.buys().count(),
        sells = report.sells().count(),
        "Crossover scan finished."
    );

    // --- 4. Report ---
    if json {
        reporter::write_json(&mut stdout, &header, &report)?;
    } else {
        reporter::write_signals(&mut stdout, &report)?;
    }

    Ok(())
}
