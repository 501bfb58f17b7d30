//! Everyday CLI
//!
//! Wires configuration, logging and the file materializer around the index
//! engine. `main.rs` only parses arguments and reports errors.

pub mod cli;
pub mod config;
pub mod error;
pub mod materializer;
pub mod telemetry;

pub use cli::{AddArgs, Cli, Command};
pub use config::CliConfig;
pub use error::{CliError, CliResult};
pub use materializer::{FileMaterializer, MaterializedEntry};
pub use telemetry::{init_tracing, LogFormat};

use chrono::{Local, NaiveDate};
use everyday_core::RawEntry;
use everyday_index::{EntryTemplate, IndexTableEngine, TableReport};
use serde::Serialize;
use std::io::Write;

/// Build the materializer described by `config`.
pub fn materializer(config: &CliConfig) -> CliResult<FileMaterializer> {
    let mut engine = IndexTableEngine::new(config.table.clone());
    if let Some(path) = &config.template_path {
        let source = std::fs::read_to_string(path)?;
        engine = engine.with_template(EntryTemplate::new(source));
    }
    Ok(FileMaterializer::new(
        engine,
        config.readme_path.clone(),
        config.root.clone(),
    ))
}

/// Submission for `add`, dated `today` unless `--date` was given.
pub fn raw_entry(args: &AddArgs, today: NaiveDate) -> RawEntry {
    RawEntry {
        url: args.url.clone(),
        title: Some(args.title.clone()),
        site: args.site.clone(),
        difficulty: args.difficulty.clone(),
        problem: args.problem.clone(),
        submitted_solution: args.solution.clone(),
        site_solution: args.site_solution.clone(),
        notes: args.notes.clone(),
        notebook_ref: args.nb.clone(),
        identifier: args.identifier.clone(),
        ..RawEntry::new(args.date.unwrap_or(today))
    }
}

/// Execute one subcommand, writing user-facing output to `out`.
pub fn run(command: &Command, config: &CliConfig, out: &mut impl Write) -> CliResult<()> {
    let materializer = materializer(config)?;
    let today = Local::now().date_naive();

    match command {
        Command::Add(args) => {
            let raw = raw_entry(args, today);
            if args.dry_run {
                let applied = materializer.preview(&raw)?;
                writeln!(out, "{}", applied.file_path)?;
                write!(out, "{}", applied.document)?;
            } else {
                let entry = materializer.materialize(&raw)?;
                writeln!(out, "{}", entry.entry_path.display())?;
            }
        }
        Command::Next { date } => {
            let identifier = materializer.next_identifier(date.unwrap_or(today), None)?;
            writeln!(out, "{}", identifier)?;
        }
        Command::Check { json } => {
            let report = materializer.inspect()?;
            if *json {
                let summary = ReportSummary::from(&report);
                writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
            } else {
                write_report(out, &report)?;
            }
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct ReportSummary<'a> {
    columns: Vec<&'static str>,
    rows: usize,
    widths: &'a [usize],
    last_identifier: Option<&'a str>,
    aligned: bool,
}

impl<'a> From<&'a TableReport> for ReportSummary<'a> {
    fn from(report: &'a TableReport) -> Self {
        Self {
            columns: report.columns.iter().map(|kind| kind.default_label()).collect(),
            rows: report.rows,
            widths: &report.widths,
            last_identifier: report.last_identifier.as_deref(),
            aligned: report.aligned,
        }
    }
}

fn write_report(out: &mut impl Write, report: &TableReport) -> std::io::Result<()> {
    let columns: Vec<&str> = report.columns.iter().map(|kind| kind.default_label()).collect();
    writeln!(out, "columns: {}", columns.join(", "))?;
    writeln!(out, "rows: {}", report.rows)?;
    let widths: Vec<String> = report.widths.iter().map(usize::to_string).collect();
    writeln!(out, "widths: {}", widths.join(", "))?;
    writeln!(
        out,
        "last identifier: {}",
        report.last_identifier.as_deref().unwrap_or("-")
    )?;
    writeln!(
        out,
        "aligned: {}",
        if report.aligned { "yes" } else { "no" }
    )
}
