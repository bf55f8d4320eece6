//! Validation run orchestration
//!
//! The runner walks the URL list strictly in order with a single page:
//!
//! ```text
//! for each URL:
//!   navigate (timeout, network idle) ──┐
//!   screenshot <slug>.png              ├─ failure ─▶ one sentinel "ERROR" row
//!   extract fonts ─────────────────────┘
//!   tag findings with the URL
//! ```
//!
//! A URL that loads but matches no elements contributes no rows; only a failed
//! load produces a sentinel. Per-URL failures never abort the run.
//!
//! # Example
//!
//! ```no_run
//! use font_validator::browser::ChromiumSession;
//! use font_validator::config::{ComponentTable, RunConfig};
//! use font_validator::runner::ValidationRunner;
//!
//! # async fn example() -> Result<(), font_validator::ValidationError> {
//! let config = RunConfig::from_env();
//! let mut session = ChromiumSession::launch(&config.browser_settings()).await?;
//! let runner = ValidationRunner::from_config(&config, ComponentTable::default());
//!
//! let urls = vec!["https://example.com/".to_string()];
//! let report = runner.run(&mut session, &urls).await?;
//! println!("{} passed of {}", report.summary.passed, report.summary.total);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, instrument};

use crate::config::{ComponentTable, RunConfig};
use crate::driver::{NavigateOptions, PageDriver, ScreenshotOptions};
use crate::error::{DriverResult, ValidationError};
use crate::extractor::{ElementFinding, FontExtractor, Status};

/// Marker used in every column of a sentinel row
pub const SENTINEL: &str = "ERROR";

/// Content column of a sentinel row
pub const SENTINEL_TEXT: &str = "Error loading page";

/// Maximum length of a screenshot file stem
pub const SCREENSHOT_SLUG_MAX: usize = 50;

/// One row of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub url: String,
    pub component: String,
    pub tag: String,
    pub selector: String,
    pub expected_font: String,
    pub actual_font: String,
    pub text_snippet: String,
    pub status: Status,
}

impl ValidationResult {
    /// Tag an extractor finding with the URL it came from
    pub fn from_finding(url: &str, finding: ElementFinding) -> Self {
        Self {
            url: url.to_string(),
            component: finding.component,
            tag: finding.tag,
            selector: finding.selector,
            expected_font: finding.expected_font,
            actual_font: finding.actual_font,
            text_snippet: finding.text_snippet,
            status: finding.status,
        }
    }

    /// Failed row standing in for a URL that could not be processed
    pub fn sentinel(url: &str, message: impl Into<String>) -> Self {
        Self {
            url: url.to_string(),
            component: SENTINEL.to_string(),
            tag: SENTINEL.to_string(),
            selector: SENTINEL.to_string(),
            expected_font: SENTINEL.to_string(),
            actual_font: message.into(),
            text_snippet: SENTINEL_TEXT.to_string(),
            status: Status::Failed,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.component == SENTINEL && self.tag == SENTINEL && self.selector == SENTINEL
    }
}

/// Aggregate pass/fail counts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Percentage of passed rows, `0.0` for an empty run
    pub success_rate: f64,
}

impl RunSummary {
    pub fn from_results(results: &[ValidationResult]) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.status.is_passed()).count();
        let failed = total - passed;
        let success_rate = if total == 0 {
            0.0
        } else {
            passed as f64 / total as f64 * 100.0
        };

        Self {
            total,
            passed,
            failed,
            success_rate,
        }
    }

    /// Success rate with two decimals, e.g. `66.67%`
    pub fn success_rate_label(&self) -> String {
        format!("{:.2}%", self.success_rate)
    }
}

/// Everything a run produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// RFC 3339 start time
    pub started_at: String,
    /// URLs in processing order
    pub urls: Vec<String>,
    pub results: Vec<ValidationResult>,
    pub summary: RunSummary,
    pub total_duration_ms: u64,
}

impl RunReport {
    pub fn new(started_at: String, urls: Vec<String>, results: Vec<ValidationResult>) -> Self {
        let summary = RunSummary::from_results(&results);
        Self {
            started_at,
            urls,
            results,
            summary,
            total_duration_ms: 0,
        }
    }
}

/// File stem for a URL's screenshot: ASCII alphanumerics kept, everything
/// else replaced by `_`, cut to [`SCREENSHOT_SLUG_MAX`] characters
pub fn screenshot_slug(url: &str) -> String {
    url.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .take(SCREENSHOT_SLUG_MAX)
        .collect()
}

/// Drives the font scan across a list of URLs
#[derive(Debug, Clone)]
pub struct ValidationRunner {
    extractor: FontExtractor,
    navigate: NavigateOptions,
    screenshot: ScreenshotOptions,
    screenshot_dir: PathBuf,
}

impl ValidationRunner {
    pub fn new(
        components: ComponentTable,
        navigate: NavigateOptions,
        screenshot_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            extractor: FontExtractor::new(components),
            navigate,
            screenshot: ScreenshotOptions { full_page: false },
            screenshot_dir: screenshot_dir.into(),
        }
    }

    pub fn from_config(config: &RunConfig, components: ComponentTable) -> Self {
        Self::new(
            components,
            config.navigate_options(),
            config.screenshot_dir.clone(),
        )
    }

    pub fn screenshot_dir(&self) -> &Path {
        &self.screenshot_dir
    }

    /// Screenshot location for `url`
    pub fn screenshot_path(&self, url: &str) -> PathBuf {
        self.screenshot_dir.join(format!("{}.png", screenshot_slug(url)))
    }

    /// Validate every URL in order.
    ///
    /// # Errors
    ///
    /// Fails only for an empty URL list or when the screenshot directory
    /// cannot be created. Failures of individual URLs become sentinel rows.
    pub async fn run<P: PageDriver>(
        &self,
        page: &mut P,
        urls: &[String],
    ) -> Result<RunReport, ValidationError> {
        if urls.is_empty() {
            return Err(ValidationError::NoUrls);
        }
        fs::create_dir_all(&self.screenshot_dir)?;

        let start_time = Instant::now();
        let started_at = chrono::Utc::now().to_rfc3339();
        info!("Starting validation for {} URLs", urls.len());

        let mut results = Vec::new();
        for url in urls {
            info!("Processing URL: {}", url);
            match self.process_url(page, url).await {
                Ok(url_results) => {
                    info!(
                        "Found {} elements to validate on {}",
                        url_results.len(),
                        url
                    );
                    results.extend(url_results);
                }
                Err(e) => {
                    error!("Error processing URL {}: {}", url, e);
                    results.push(ValidationResult::sentinel(url, e.to_string()));
                }
            }
        }

        let mut report = RunReport::new(started_at, urls.to_vec(), results);
        report.total_duration_ms = start_time.elapsed().as_millis() as u64;

        info!(
            total = report.summary.total,
            passed = report.summary.passed,
            failed = report.summary.failed,
            "Validation finished in {}ms",
            report.total_duration_ms
        );
        Ok(report)
    }

    /// Load one URL, screenshot it and check its fonts
    #[instrument(skip(self, page))]
    async fn process_url<P: PageDriver>(
        &self,
        page: &mut P,
        url: &str,
    ) -> DriverResult<Vec<ValidationResult>> {
        page.navigate(url, &self.navigate).await?;
        page.screenshot(&self.screenshot_path(url), &self.screenshot)
            .await?;

        let findings = self.extractor.extract(&*page).await;
        Ok(findings
            .into_iter()
            .map(|finding| ValidationResult::from_finding(url, finding))
            .collect())
    }
}
