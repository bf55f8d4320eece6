//! Console reporter
//!
//! Prints the aggregate summary plus the URLs that could not be loaded.

use std::fmt::Write;

use crate::error::ValidationError;
use crate::runner::RunReport;

/// Console format reporter
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn format(report: &RunReport) -> Result<String, ValidationError> {
        let summary = &report.summary;
        let mut output = String::new();

        writeln!(output)?;
        writeln!(output, "========== VALIDATION SUMMARY ==========")?;
        writeln!(output, "Total Tested Elements: {}", summary.total)?;
        writeln!(output, "Passed: {}", summary.passed)?;
        writeln!(output, "Failed: {}", summary.failed)?;
        writeln!(output, "Success Rate: {}", summary.success_rate_label())?;
        writeln!(output, "=======================================")?;

        let unreachable: Vec<_> = report
            .results
            .iter()
            .filter(|r| r.is_sentinel())
            .collect();
        if !unreachable.is_empty() {
            writeln!(output)?;
            writeln!(output, "Unreachable URLs:")?;
            for result in unreachable {
                writeln!(output, "  • {} ({})", result.url, result.actual_font)?;
            }
        }

        writeln!(output)?;
        Ok(output)
    }
}
