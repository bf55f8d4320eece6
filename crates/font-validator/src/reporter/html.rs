//! HTML reporter
//!
//! Produces a single self-contained page: a summary block, status and URL
//! filters, and the results table. Filtering runs entirely in the browser.

use std::fmt::Write;

use crate::error::ValidationError;
use crate::runner::RunReport;

const STYLE: &str = r#"
      body { font-family: Arial, sans-serif; margin: 20px; }
      h1 { color: #333; }
      .summary { margin: 20px 0; background: #f5f5f5; padding: 15px; border-radius: 5px; }
      table { border-collapse: collapse; width: 100%; margin-top: 20px; }
      th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
      th { background-color: #f2f2f2; }
      tr:nth-child(even) { background-color: #f9f9f9; }
      tr:hover { background-color: #f1f1f1; }
      .pass { color: green; }
      .fail { color: red; }
      .filters { margin: 20px 0; }
      button { padding: 8px 15px; margin-right: 10px; cursor: pointer; }
      select { padding: 8px; margin-right: 10px; }
      .filter-section { margin-bottom: 15px; }
      .filter-section label { font-weight: bold; margin-right: 10px; }
"#;

const SCRIPT: &str = r#"
      let currentStatusFilter = 'all';
      let currentUrlFilter = 'all';

      function filterByStatus(filter) {
        currentStatusFilter = filter;
        applyFilters();
      }

      function filterByUrl(url) {
        currentUrlFilter = url;
        applyFilters();
      }

      function applyFilters() {
        const rows = document.querySelectorAll('#resultsTable tbody tr');
        rows.forEach(row => {
          const matchesUrl = currentUrlFilter === 'all' || row.dataset.url === currentUrlFilter;
          const matchesStatus = currentStatusFilter === 'all' || row.classList.contains(currentStatusFilter);
          row.style.display = (matchesUrl && matchesStatus) ? '' : 'none';
        });
      }
"#;

const COLUMNS: [&str; 8] = [
    "URL",
    "Component",
    "Element",
    "Selector",
    "Expected Font",
    "Actual Font",
    "Content",
    "Status",
];

/// HTML format reporter
pub struct HtmlReporter;

impl HtmlReporter {
    pub fn format(report: &RunReport) -> Result<String, ValidationError> {
        let summary = &report.summary;
        let mut html = String::new();

        writeln!(html, "<!DOCTYPE html>")?;
        writeln!(html, "<html lang=\"en\">")?;
        writeln!(html, "  <head>")?;
        writeln!(html, "    <meta charset=\"UTF-8\">")?;
        writeln!(
            html,
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
        )?;
        writeln!(html, "    <title>Font Validation Report</title>")?;
        writeln!(html, "    <style>{}    </style>", STYLE)?;
        writeln!(html, "  </head>")?;
        writeln!(html, "  <body>")?;
        writeln!(html, "    <h1>Web Font Validation Report</h1>")?;

        writeln!(html, "    <div class=\"summary\">")?;
        writeln!(html, "      <h2>Summary</h2>")?;
        writeln!(html, "      <p>Started: {}</p>", escape_html(&report.started_at))?;
        writeln!(html, "      <p>Total Tests: {}</p>", summary.total)?;
        writeln!(html, "      <p>Passed: {}</p>", summary.passed)?;
        writeln!(html, "      <p>Failed: {}</p>", summary.failed)?;
        writeln!(html, "      <p>Success Rate: {}</p>", summary.success_rate_label())?;
        writeln!(html, "    </div>")?;

        Self::write_filters(&mut html, report)?;

        writeln!(html, "    <table id=\"resultsTable\">")?;
        writeln!(html, "      <thead>")?;
        writeln!(html, "        <tr>")?;
        for column in COLUMNS {
            writeln!(html, "          <th>{}</th>", column)?;
        }
        writeln!(html, "        </tr>")?;
        writeln!(html, "      </thead>")?;
        writeln!(html, "      <tbody>")?;

        for result in &report.results {
            let class = result.status.css_class();
            let url = escape_html(&result.url);
            writeln!(html, "        <tr class=\"{}\" data-url=\"{}\">", class, url)?;
            writeln!(
                html,
                "          <td><a href=\"{0}\" target=\"_blank\">{0}</a></td>",
                url
            )?;
            for cell in [
                &result.component,
                &result.tag,
                &result.selector,
                &result.expected_font,
                &result.actual_font,
                &result.text_snippet,
            ] {
                writeln!(html, "          <td>{}</td>", escape_html(cell))?;
            }
            writeln!(
                html,
                "          <td class=\"{}\">{}</td>",
                class,
                result.status.label()
            )?;
            writeln!(html, "        </tr>")?;
        }

        writeln!(html, "      </tbody>")?;
        writeln!(html, "    </table>")?;
        writeln!(html, "    <script>{}    </script>", SCRIPT)?;
        writeln!(html, "  </body>")?;
        writeln!(html, "</html>")?;

        Ok(html)
    }

    fn write_filters(html: &mut String, report: &RunReport) -> Result<(), ValidationError> {
        writeln!(html, "    <div class=\"filters\">")?;
        writeln!(html, "      <div class=\"filter-section\">")?;
        writeln!(html, "        <label>Filter by Status:</label>")?;
        writeln!(html, "        <button onclick=\"filterByStatus('all')\">Show All</button>")?;
        writeln!(
            html,
            "        <button onclick=\"filterByStatus('pass')\">Show Passed Only</button>"
        )?;
        writeln!(
            html,
            "        <button onclick=\"filterByStatus('fail')\">Show Failed Only</button>"
        )?;
        writeln!(html, "      </div>")?;
        writeln!(html, "      <div class=\"filter-section\">")?;
        writeln!(html, "        <label for=\"urlFilter\">Filter by URL:</label>")?;
        writeln!(
            html,
            "        <select id=\"urlFilter\" onchange=\"filterByUrl(this.value)\">"
        )?;
        writeln!(html, "          <option value=\"all\">All URLs</option>")?;

        let mut seen: Vec<&str> = Vec::new();
        for result in &report.results {
            if seen.contains(&result.url.as_str()) {
                continue;
            }
            seen.push(&result.url);
            let url = escape_html(&result.url);
            writeln!(html, "          <option value=\"{0}\">{0}</option>", url)?;
        }

        writeln!(html, "        </select>")?;
        writeln!(html, "      </div>")?;
        writeln!(html, "    </div>")?;
        Ok(())
    }
}

/// Escape text for use in HTML content and double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
