//! Browser capability abstraction
//!
//! The extractor and runner only need a handful of page operations: navigate,
//! query elements, read text, evaluate a function against an element and take
//! a screenshot. [`PageDriver`] captures exactly that, so the scanning logic
//! runs unchanged against Chromium ([`ChromiumSession`](crate::browser::ChromiumSession))
//! or against an in-memory fake in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::config::DEFAULT_TIMEOUT_MS;
use crate::error::DriverResult;

/// Condition that completes a navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitUntil {
    /// The `load` event fired
    Load,
    /// `load` fired and no new network requests started for a quiet period
    #[default]
    NetworkIdle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigateOptions {
    pub timeout: Duration,
    pub wait_until: WaitUntil,
}

impl Default for NavigateOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            wait_until: WaitUntil::NetworkIdle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenshotOptions {
    /// Capture the whole scrollable page instead of the viewport
    pub full_page: bool,
}

/// Functions evaluated in the page against a single element
///
/// Each script is a JavaScript function declaration invoked with the element
/// bound to `this`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementScript {
    /// Trimmed `textContent`, empty when absent
    TextContent,
    /// Computed `font-family` stack
    FontFamily,
    /// Lower-case tag name followed by `.class` segments
    SelectorLabel,
}

impl ElementScript {
    pub fn function_declaration(&self) -> &'static str {
        match self {
            ElementScript::TextContent => {
                "function() { return this.textContent ? this.textContent.trim() : ''; }"
            }
            ElementScript::FontFamily => {
                "function() { return window.getComputedStyle(this).fontFamily; }"
            }
            ElementScript::SelectorLabel => {
                r#"function() {
                    const tag = this.tagName.toLowerCase();
                    const cls = typeof this.className === 'string' ? this.className : '';
                    return cls ? tag + '.' + cls.split(' ').join('.') : tag;
                }"#
            }
        }
    }
}

/// Minimal page capability used by the font scan
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Handle to a DOM element returned by [`query_all`](PageDriver::query_all)
    type Element: Send + Sync;

    /// Load `url` and wait until `options.wait_until` holds, bounded by `options.timeout`
    async fn navigate(&mut self, url: &str, options: &NavigateOptions) -> DriverResult<()>;

    /// All elements matching a CSS selector, in document order
    async fn query_all(&self, selector: &str) -> DriverResult<Vec<Self::Element>>;

    /// Rendered (visible) text of an element
    async fn inner_text(&self, element: &Self::Element) -> DriverResult<String>;

    /// Evaluate `script` with the element bound to `this`
    async fn evaluate(
        &self,
        element: &Self::Element,
        script: ElementScript,
    ) -> DriverResult<serde_json::Value>;

    /// Write a PNG screenshot of the current page to `path`
    async fn screenshot(&self, path: &Path, options: &ScreenshotOptions) -> DriverResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripts_are_function_declarations() {
        for script in [
            ElementScript::TextContent,
            ElementScript::FontFamily,
            ElementScript::SelectorLabel,
        ] {
            let js = script.function_declaration().trim_start();
            assert!(js.starts_with("function()"), "{:?}", script);
            assert!(js.contains("this"));
        }
    }

    #[test]
    fn test_font_family_reads_computed_style() {
        assert!(ElementScript::FontFamily
            .function_declaration()
            .contains("getComputedStyle(this).fontFamily"));
    }

    #[test]
    fn test_default_navigate_options() {
        let options = NavigateOptions::default();
        assert_eq!(options.timeout, Duration::from_secs(60));
        assert_eq!(options.wait_until, WaitUntil::NetworkIdle);
    }

    #[test]
    fn test_default_screenshot_is_viewport_only() {
        assert!(!ScreenshotOptions::default().full_page);
    }
}
