//! CSV reporter
//!
//! Every field is wrapped in double quotes and embedded quotes are doubled,
//! so commas and newlines inside snippets survive a round trip.

use crate::runner::ValidationResult;

pub const CSV_HEADER: &str =
    "URL,Component Name,Element,Selector,Expected Font,Actual Font,Content,Status";

/// CSV format reporter
pub struct CsvReporter;

impl CsvReporter {
    /// Header line followed by one line per result, joined with `\n`
    pub fn format(results: &[ValidationResult]) -> String {
        let mut rows = Vec::with_capacity(results.len() + 1);
        rows.push(CSV_HEADER.to_string());
        rows.extend(results.iter().map(Self::row));
        rows.join("\n")
    }

    pub fn row(result: &ValidationResult) -> String {
        [
            result.url.as_str(),
            result.component.as_str(),
            result.tag.as_str(),
            result.selector.as_str(),
            result.expected_font.as_str(),
            result.actual_font.as_str(),
            result.text_snippet.as_str(),
            result.status.label(),
        ]
        .iter()
        .map(|field| escape_field(field))
        .collect::<Vec<_>>()
        .join(",")
    }
}

/// Quote-wrap a field, doubling embedded quotes
pub fn escape_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::Status;
    use crate::reporter::test_support::create_test_report;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    /// Minimal RFC 4180 reader for the quoted records this module writes
    fn parse_record(line: &str) -> Vec<String> {
        let mut fields = Vec::new();
        let mut chars = line.chars().peekable();
        loop {
            assert_eq!(chars.next(), Some('"'), "field must be quoted: {}", line);
            let mut field = String::new();
            loop {
                match chars.next() {
                    Some('"') if chars.peek() == Some(&'"') => {
                        chars.next();
                        field.push('"');
                    }
                    Some('"') => break,
                    Some(c) => field.push(c),
                    None => panic!("unterminated field: {}", line),
                }
            }
            fields.push(field);
            match chars.next() {
                Some(',') => continue,
                None => return fields,
                Some(c) => panic!("unexpected '{}' after field", c),
            }
        }
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("Inter"), "\"Inter\"");
        assert_eq!(escape_field(""), "\"\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("a, b"), "\"a, b\"");
    }

    #[test]
    fn test_format_rows() {
        let report = create_test_report();
        let csv = CsvReporter::format(&report.results);
        let lines: Vec<_> = csv.split('\n').collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(
            lines[1],
            r#""https://example.com/","Header","h1","h1.hero","lato-bold","lato-bold, Arial","Welcome ""home""","✅ Passed""#
        );
        assert_eq!(
            lines[2],
            r#""https://example.invalid/","ERROR","ERROR","ERROR","ERROR","net::ERR_NAME_NOT_RESOLVED","Error loading page","❌ Failed""#
        );
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_header_only_for_empty_results() {
        assert_eq!(CsvReporter::format(&[]), CSV_HEADER);
    }

    proptest! {
        #[test]
        fn prop_row_parses_back(
            url in "[ -~]{0,30}",
            text in "[^\\n\\r]{0,60}",
            font in "[ -~]{0,30}",
        ) {
            let result = ValidationResult {
                url: url.clone(),
                component: "Body Text".to_string(),
                tag: "p".to_string(),
                selector: "p.lead".to_string(),
                expected_font: "Inter".to_string(),
                actual_font: font.clone(),
                text_snippet: text.clone(),
                status: Status::Failed,
            };
            let fields = parse_record(&CsvReporter::row(&result));
            prop_assert_eq!(fields.len(), 8);
            prop_assert_eq!(&fields[0], &url);
            prop_assert_eq!(&fields[5], &font);
            prop_assert_eq!(&fields[6], &text);
            prop_assert_eq!(fields[7].as_str(), "❌ Failed");
        }
    }
}
