use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::telemetry::LogFormat;

#[derive(Parser, Debug)]
#[command(name = "everyday")]
#[command(about = "Record daily practice entries in a markdown journal index")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
    /// Configuration file (defaults to $EVERYDAY_CONFIG, then ./everyday.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Log output format; overrides LOG_FORMAT from the configuration
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Append an entry to the index and create its file
    Add(AddArgs),
    /// Print the identifier the next entry would receive
    Next {
        /// Entry date (defaults to today)
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },
    /// Parse the index table and report its shape
    Check {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Fields of one submission.
#[derive(Args, Debug, Clone, Default)]
pub struct AddArgs {
    /// Problem title
    #[arg(long)]
    pub title: String,

    /// Site the problem comes from
    #[arg(long)]
    pub site: Option<String>,

    /// Link to the problem
    #[arg(long)]
    pub url: Option<String>,

    #[arg(long)]
    pub difficulty: Option<String>,

    /// Problem statement
    #[arg(long)]
    pub problem: Option<String>,

    /// Submitted solution
    #[arg(long)]
    pub solution: Option<String>,

    /// Reference solution published by the site
    #[arg(long)]
    pub site_solution: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    /// Value of the extra column, when enabled
    #[arg(long)]
    pub nb: Option<String>,

    /// Entry date (defaults to today)
    #[arg(long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,

    /// Use this identifier instead of the computed one
    #[arg(long)]
    pub identifier: Option<String>,

    /// Print the updated document and entry file name without writing
    #[arg(long)]
    pub dry_run: bool,
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    everyday_core::parse_date(value)
        .ok_or_else(|| format!("invalid date '{}': expected YYYY-MM-DD", value))
}
