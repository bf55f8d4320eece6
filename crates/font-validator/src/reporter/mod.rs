//! Validation result reporting
//!
//! This module formats a [`RunReport`] as CSV, a self-contained HTML page,
//! JSON, or a console summary, and names report files after the run's start time.
//!
//! # Output Formats
//!
//! - **CSV**: one fully quoted row per result under a fixed 8-column header
//! - **HTML**: summary plus a results table with client-side status/URL filters
//! - **JSON**: the complete run for machine consumption
//! - **Console**: aggregate pass/fail counts and success rate
//!
//! # Example
//!
//! ```no_run
//! use font_validator::reporter::{OutputFormat, ReportPaths, Reporter};
//! use font_validator::runner::RunReport;
//!
//! # fn example(report: RunReport) -> Result<(), font_validator::ValidationError> {
//! let paths = ReportPaths::new("reports", chrono::Local::now().naive_local());
//! Reporter::new(OutputFormat::Csv).write_to_file(&report, &paths.csv)?;
//! Reporter::new(OutputFormat::Console).report(&report)?;
//! # Ok(())
//! # }
//! ```

mod console;
mod csv;
mod html;
mod json;

use chrono::NaiveDateTime;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::ValidationError;
use crate::runner::RunReport;

pub use self::console::ConsoleReporter;
pub use self::csv::{escape_field, CsvReporter, CSV_HEADER};
pub use self::html::{escape_html, HtmlReporter};
pub use self::json::JsonReporter;

/// Output format for validation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Csv,
    Html,
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
    /// Console summary
    #[default]
    Console,
}

/// Reporter for validation results
pub struct Reporter {
    format: OutputFormat,
}

impl Reporter {
    /// Create a new reporter with the specified output format
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Report results to stdout
    pub fn report(&self, report: &RunReport) -> Result<(), ValidationError> {
        let output = self.format_results(report)?;
        print!("{}", output);
        io::stdout().flush()?;
        Ok(())
    }

    /// Write results to a file, creating parent directories as needed
    pub fn write_to_file<P: AsRef<Path>>(
        &self,
        report: &RunReport,
        path: P,
    ) -> Result<(), ValidationError> {
        let path = path.as_ref();
        let output = self.format_results(report)?;
        write_report(path, &output)
    }

    /// Format results as a string
    pub fn format_results(&self, report: &RunReport) -> Result<String, ValidationError> {
        match self.format {
            OutputFormat::Csv => Ok(CsvReporter::format(&report.results)),
            OutputFormat::Html => HtmlReporter::format(report),
            OutputFormat::Json => JsonReporter::format(report, false),
            OutputFormat::JsonPretty => JsonReporter::format(report, true),
            OutputFormat::Console => ConsoleReporter::format(report),
        }
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(OutputFormat::default())
    }
}

fn write_report(path: &Path, contents: &str) -> Result<(), ValidationError> {
    let to_report_error = |source| ValidationError::Report {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_report_error)?;
    }
    fs::write(path, contents).map_err(to_report_error)
}

/// Timestamped report file locations for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub csv: PathBuf,
    pub html: PathBuf,
    pub json: PathBuf,
}

impl ReportPaths {
    /// `font-report-<DDMMYYYY_HHMMSS>.{csv,html,json}` inside `dir`
    pub fn new<P: AsRef<Path>>(dir: P, timestamp: NaiveDateTime) -> Self {
        let dir = dir.as_ref();
        let stem = format!("font-report-{}", Self::timestamp_label(timestamp));
        Self {
            csv: dir.join(format!("{}.csv", stem)),
            html: dir.join(format!("{}.html", stem)),
            json: dir.join(format!("{}.json", stem)),
        }
    }

    pub fn timestamp_label(timestamp: NaiveDateTime) -> String {
        timestamp.format("%d%m%Y_%H%M%S").to_string()
    }

    /// Write the CSV and HTML reports, plus JSON when requested
    pub fn write_all(&self, report: &RunReport, include_json: bool) -> Result<(), ValidationError> {
        Reporter::new(OutputFormat::Csv).write_to_file(report, &self.csv)?;
        Reporter::new(OutputFormat::Html).write_to_file(report, &self.html)?;
        if include_json {
            Reporter::new(OutputFormat::JsonPretty).write_to_file(report, &self.json)?;
        }
        Ok(())
    }
}
