//! JSON reporter for validation runs

use crate::error::ValidationError;
use crate::runner::RunReport;

/// JSON format reporter
pub struct JsonReporter;

impl JsonReporter {
    /// Format a run as JSON
    ///
    /// # Arguments
    ///
    /// * `report` - The run to format
    /// * `pretty` - Whether to pretty-print the JSON
    pub fn format(report: &RunReport, pretty: bool) -> Result<String, ValidationError> {
        let output = if pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::test_support::create_test_report;

    #[test]
    fn test_json_format_compact() {
        let output = JsonReporter::format(&create_test_report(), false).unwrap();

        // Compact JSON should not have newlines
        assert!(!output.contains('\n'));
        assert!(output.contains("\"component\":\"Header\""));
    }

    #[test]
    fn test_json_format_pretty() {
        let output = JsonReporter::format(&create_test_report(), true).unwrap();

        assert!(output.contains('\n'));
        assert!(output.contains("  "));
    }

    #[test]
    fn test_json_roundtrip() {
        let report = create_test_report();
        let json = JsonReporter::format(&report, false).unwrap();
        let parsed: RunReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.summary, report.summary);
        assert_eq!(parsed.results, report.results);
    }
}
