#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the cartogram tile layout engine.

use std::path::{Path, PathBuf};

use cartogram_ingest::config::load_config;
use cartogram_ingest::parsing::parse_date;
use cartogram_ingest::profiles::{load_profiles, sort_by_grid};
use cartogram_ingest::records::load_records;
use cartogram_layout::CartogramView;
use cartogram_layout::legend::{category_domain, color_legend_bins, pie_legend, size_legend};
use cartogram_layout::summary::summarize_all;
use cartogram_layout_models::{FilterSignal, LayoutConfig};
use cartogram_region_models::DateRange;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cartogram_cli", about = "Cartogram tile layout engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out the tiles and write them as JSON
    Layout {
        #[command(flatten)]
        input: InputArgs,
        /// Write the JSON here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the color and size legends as JSON
    Legend {
        /// Layout config TOML (overrides `CARTOGRAM_CONFIG` env var)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Demographic profile JSON; adds the pie legend when given
        #[arg(long)]
        profiles: Option<PathBuf>,
    },
    /// Lay out the tiles and print a per-tile summary table
    Summary {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Time-series CSV (`State,date,proportionAffected`)
    #[arg(long)]
    records: PathBuf,
    /// Demographic profile JSON
    #[arg(long)]
    profiles: PathBuf,
    /// Layout config TOML (overrides `CARTOGRAM_CONFIG` env var)
    #[arg(long)]
    config: Option<PathBuf>,
    /// First day of the time window (inclusive)
    #[arg(long, value_parser = parse_date_arg, requires = "end")]
    start: Option<NaiveDate>,
    /// Last day of the time window (inclusive)
    #[arg(long, value_parser = parse_date_arg, requires = "start")]
    end: Option<NaiveDate>,
    /// Sort profiles into grid order instead of rejecting unordered input
    #[arg(long)]
    sort: bool,
}

impl InputArgs {
    fn range(&self) -> Option<DateRange> {
        self.start.zip(self.end).map(|(start, end)| DateRange::new(start, end))
    }
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).ok_or_else(|| format!("unrecognized date '{s}'"))
}

fn load_view(input: &InputArgs) -> Result<CartogramView, Box<dyn std::error::Error>> {
    let config = load_config(input.config.as_deref())?;
    let records = load_records(&input.records)?;
    let mut profiles = load_profiles(&input.profiles)?;
    if input.sort {
        sort_by_grid(&mut profiles);
    }

    let mut view = CartogramView::new(records, profiles, config)?;
    if let Some(range) = input.range() {
        view.handle(FilterSignal::TimeRangeChanged { range })?;
    }
    Ok(view)
}

fn write_json(
    value: &impl serde::Serialize,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            log::info!("Wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn print_legend(
    config: &LayoutConfig,
    profiles: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let pie = match profiles {
        Some(path) => pie_legend(&category_domain(&load_profiles(path)?)),
        None => Vec::new(),
    };
    let legend = serde_json::json!({
        "color": color_legend_bins(config.num_color_bins),
        "size": size_legend(config),
        "pie": pie,
    });
    write_json(&legend, None)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Layout { input, output } => {
            let view = load_view(&input)?;
            write_json(&view.tiles(), output.as_deref())?;
        }
        Commands::Legend { config, profiles } => {
            print_legend(&load_config(config.as_deref())?, profiles.as_deref())?;
        }
        Commands::Summary { input } => {
            let view = load_view(&input)?;
            println!(
                "{:<6} {:<22} {:>8} {:>7} {:>10} {:>16}",
                "ABBR", "REGION", "METRIC", "WHITE", "NON-WHITE", "CENTER"
            );
            println!("{}", "-".repeat(74));
            for summary in summarize_all(view.tiles()) {
                println!(
                    "{:<6} {:<22} {:>6}%{} {:>6}% {:>9}% {:>7.1},{:>7.1}",
                    summary.abbreviation,
                    summary.region_id,
                    summary.metric_percent,
                    if summary.metric_fallback { "*" } else { " " },
                    summary.white_percent,
                    summary.non_white_percent,
                    summary.center.0,
                    summary.center.1,
                );
            }
            println!();
            println!("* no records in range; all-time mean shown");
        }
    }

    Ok(())
}
