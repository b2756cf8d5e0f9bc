use std::path::PathBuf;

use clap::{Parser, Subcommand};
use holiday_checker::{Country, MonthFilter};

/// Public holiday tracker backed by the Nager.Date API.
#[derive(Parser)]
#[command(
    name = "holiday-checker",
    version,
    about = "Track public holidays and count down to the next one"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file [default: holiday-checker.toml if present].
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the holiday year from config.
    #[arg(long, global = true)]
    pub year: Option<i32>,

    /// Override the cache directory from config.
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// List the supported countries.
    Countries,
    /// List holidays, optionally for a single month.
    List(ListArgs),
    /// Show today's holiday.
    Today(CountryArgs),
    /// Show the next holiday and how many days remain.
    Next(CountryArgs),
    /// Live panel refreshed every second.
    Watch(WatchArgs),
    /// Remove cached holiday lists.
    ClearCache(ClearCacheArgs),
}

#[derive(clap::Args)]
pub struct CountryArgs {
    /// Two-letter country code [default: from config].
    #[arg(short = 'C', long)]
    pub country: Option<Country>,
}

/// Arguments for the `list` subcommand.
#[derive(clap::Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub country: CountryArgs,

    /// Month number, month name, or "all".
    #[arg(short, long, default_value = "all")]
    pub month: MonthFilter,
}

/// Arguments for the `watch` subcommand.
#[derive(clap::Args)]
pub struct WatchArgs {
    #[command(flatten)]
    pub country: CountryArgs,

    /// Month number, month name, or "all".
    #[arg(short, long, default_value = "all")]
    pub month: MonthFilter,

    /// Stop after this many ticks instead of running until interrupted.
    #[arg(long)]
    pub ticks: Option<u64>,
}

/// Arguments for the `clear-cache` subcommand.
#[derive(clap::Args)]
pub struct ClearCacheArgs {
    /// Only clear this country's entry.
    #[arg(short = 'C', long)]
    pub country: Option<Country>,
}
