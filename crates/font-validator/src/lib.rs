//! Web font validation for rendered pages
//!
//! This crate checks that the UI components of live web pages render with the
//! expected font families. A run loads a list of URLs, drives a Chromium page
//! through each of them, reads the computed `font-family` of every element that
//! matches a component's selectors and records a pass/fail result per element.
//!
//! # Features
//!
//! - **Component table**: named UI roles mapped to selectors and an expected font,
//!   with a built-in default table or a TOML override
//! - **Driver abstraction**: the [`PageDriver`](driver::PageDriver) trait keeps
//!   scanning logic independent of the browser, so it can be tested against fakes
//! - **Contained failures**: element and selector errors are skipped, unreachable
//!   URLs are recorded as sentinel rows, only an empty URL list is fatal
//! - **Reports**: CSV, filterable HTML, JSON and a console summary
//!
//! # Example
//!
//! ```no_run
//! use font_validator::browser::ChromiumSession;
//! use font_validator::config::{ComponentTable, RunConfig};
//! use font_validator::reporter::{OutputFormat, Reporter};
//! use font_validator::runner::ValidationRunner;
//! use font_validator::urls::read_urls;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RunConfig::from_env();
//! let urls = read_urls("data/urls.json");
//!
//! let mut session = ChromiumSession::launch(&config.browser_settings()).await?;
//! let runner = ValidationRunner::from_config(&config, ComponentTable::default());
//! let report = runner.run(&mut session, &urls).await?;
//! session.close().await?;
//!
//! Reporter::new(OutputFormat::Csv).write_to_file(&report, "font-report.csv")?;
//! Reporter::new(OutputFormat::Console).report(&report)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Component Table
//!
//! The default table can be replaced with a TOML file:
//!
//! ```toml
//! [[components]]
//! name = "Header"
//! tags = ["h1", "h2", "h3"]
//! expected_font = "lato-bold"
//!
//! [[components]]
//! name = "Body Text"
//! tags = [".body-text", "p"]
//! expected_font = "Inter"
//! ```

pub mod browser;
pub mod config;
pub mod driver;
pub mod error;
pub mod extractor;
pub mod reporter;
pub mod runner;
pub mod urls;

// Re-export main types for convenience
pub use config::{BrowserSettings, ComponentSpec, ComponentTable, RunConfig};
pub use driver::{ElementScript, NavigateOptions, PageDriver, ScreenshotOptions, WaitUntil};
pub use error::{DriverError, DriverResult, ValidationError};
pub use extractor::{ElementFinding, FontExtractor, Status};
pub use reporter::{OutputFormat, ReportPaths, Reporter};
pub use runner::{RunReport, RunSummary, ValidationResult, ValidationRunner};
