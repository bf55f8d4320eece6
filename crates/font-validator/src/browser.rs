//! Chromium-backed [`PageDriver`]
//!
//! A [`ChromiumSession`] owns one browser and one page for the whole run.
//! The CDP event handler is drained by a spawned tokio task, the same way the
//! browser is driven everywhere else in the project.
//!
//! # Example
//!
//! ```no_run
//! use font_validator::browser::ChromiumSession;
//! use font_validator::config::BrowserSettings;
//! use font_validator::driver::{NavigateOptions, PageDriver};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = ChromiumSession::launch(&BrowserSettings::default()).await?;
//! session.navigate("https://example.com", &NavigateOptions::default()).await?;
//! let headings = session.query_all("h1").await?;
//! println!("{} headings", headings.len());
//! session.close().await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::element::Element;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use futures::StreamExt;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::BrowserSettings;
use crate::driver::{ElementScript, NavigateOptions, PageDriver, ScreenshotOptions, WaitUntil};
use crate::error::{DriverError, DriverResult, ValidationError};

/// Quiet period without new resource entries that counts as network idle
const NETWORK_IDLE_QUIET: Duration = Duration::from_millis(500);
const NETWORK_IDLE_POLL: Duration = Duration::from_millis(100);

/// Resource entry count once the document is complete, `-1` before that
const RESOURCE_COUNT_JS: &str = "document.readyState === 'complete' \
    ? performance.getEntriesByType('resource').length : -1";

/// One browser, one page
pub struct ChromiumSession {
    browser: Browser,
    page: Page,
    handle: tokio::task::JoinHandle<()>,
}

impl ChromiumSession {
    /// Launch Chromium with the given settings and open a blank page
    pub async fn launch(settings: &BrowserSettings) -> Result<Self, ValidationError> {
        let config = Self::browser_config(settings)?;

        info!(headless = settings.headless, "Launching browser");
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ValidationError::BrowserLaunch(e.to_string()))?;

        // Spawn handler to process browser events
        let handle = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ValidationError::BrowserLaunch(format!("failed to open page: {}", e)))?;

        info!("Browser launched successfully");
        Ok(Self {
            browser,
            page,
            handle,
        })
    }

    fn browser_config(settings: &BrowserSettings) -> Result<BrowserConfig, ValidationError> {
        let mut builder = BrowserConfig::builder()
            .window_size(settings.viewport_width, settings.viewport_height)
            .viewport(Viewport {
                width: settings.viewport_width,
                height: settings.viewport_height,
                ..Viewport::default()
            })
            .arg(format!("--user-agent={}", settings.user_agent));

        if !settings.headless {
            builder = builder.with_head();
        }
        if settings.ignore_https_errors {
            builder = builder.arg("--ignore-certificate-errors");
        }
        if let Some(executable) = &settings.chrome_executable {
            builder = builder.chrome_executable(executable);
        }
        if let Some(dir) = &settings.user_data_dir {
            builder = builder.user_data_dir(dir);
        }

        builder.build().map_err(ValidationError::BrowserLaunch)
    }

    /// The underlying chromiumoxide page
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Close the browser and stop the event handler
    pub async fn close(mut self) -> Result<(), ValidationError> {
        info!("Closing browser");
        let closed = self.browser.close().await;
        if let Err(e) = self.browser.wait().await {
            warn!("Browser process did not exit cleanly: {}", e);
        }
        self.handle.abort();
        closed
            .map(|_| ())
            .map_err(|e| ValidationError::BrowserLaunch(format!("failed to close browser: {}", e)))
    }

    async fn wait_for_network_idle(&self) -> DriverResult<()> {
        let mut last_count: Option<i64> = None;
        let mut quiet_since = Instant::now();

        loop {
            let count: i64 = self
                .page
                .evaluate(RESOURCE_COUNT_JS)
                .await
                .map_err(|e| DriverError::Evaluation(e.to_string()))?
                .into_value()
                .map_err(|e| DriverError::UnexpectedValue(e.to_string()))?;

            if count < 0 || last_count != Some(count) {
                last_count = (count >= 0).then_some(count);
                quiet_since = Instant::now();
            } else if quiet_since.elapsed() >= NETWORK_IDLE_QUIET {
                return Ok(());
            }

            tokio::time::sleep(NETWORK_IDLE_POLL).await;
        }
    }
}

#[async_trait]
impl PageDriver for ChromiumSession {
    type Element = Element;

    async fn navigate(&mut self, url: &str, options: &NavigateOptions) -> DriverResult<()> {
        let started = Instant::now();
        let timeout_ms = options.timeout.as_millis() as u64;

        debug!("Navigating to: {}", url);
        tokio::time::timeout(options.timeout, self.page.goto(url))
            .await
            .map_err(|_| DriverError::Timeout(timeout_ms))?
            .map_err(|e| DriverError::Navigation(e.to_string()))?;

        if options.wait_until == WaitUntil::NetworkIdle {
            let remaining = options.timeout.saturating_sub(started.elapsed());
            tokio::time::timeout(remaining, self.wait_for_network_idle())
                .await
                .map_err(|_| DriverError::Timeout(timeout_ms))??;
        }

        Ok(())
    }

    async fn query_all(&self, selector: &str) -> DriverResult<Vec<Element>> {
        self.page
            .find_elements(selector)
            .await
            .map_err(|e| DriverError::Query {
                selector: selector.to_string(),
                reason: e.to_string(),
            })
    }

    async fn inner_text(&self, element: &Element) -> DriverResult<String> {
        element
            .inner_text()
            .await
            .map(Option::unwrap_or_default)
            .map_err(|e| DriverError::Evaluation(e.to_string()))
    }

    async fn evaluate(
        &self,
        element: &Element,
        script: ElementScript,
    ) -> DriverResult<serde_json::Value> {
        let returns = element
            .call_js_fn(script.function_declaration(), false)
            .await
            .map_err(|e| DriverError::Evaluation(e.to_string()))?;

        if let Some(exception) = returns.exception_details {
            return Err(DriverError::Evaluation(exception.text));
        }

        Ok(returns.result.value.unwrap_or(serde_json::Value::Null))
    }

    async fn screenshot(&self, path: &Path, options: &ScreenshotOptions) -> DriverResult<()> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(options.full_page)
            .build();

        self.page
            .save_screenshot(params, path)
            .await
            .map_err(|e| DriverError::Screenshot(e.to_string()))?;
        debug!("Saved screenshot: {}", path.display());
        Ok(())
    }
}
