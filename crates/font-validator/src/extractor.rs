//! Font extraction and comparison
//!
//! For every component, every selector and every matching element the
//! extractor reads the element's text and computed `font-family`, builds a
//! selector-like label from its tag and classes and classifies it by substring
//! match against the component's expected font.
//!
//! Failures are contained at the narrowest level: an element that cannot be
//! read is skipped, a selector whose query fails is skipped, and the scan of a
//! page always completes.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use crate::config::{ComponentSpec, ComponentTable};
use crate::driver::{ElementScript, PageDriver};
use crate::error::{DriverError, DriverResult};

/// Maximum number of characters kept from an element's text
pub const SNIPPET_MAX_CHARS: usize = 100;

/// Appended to snippets that were cut
pub const ELLIPSIS: &str = "...";

/// Outcome of a single font comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Passed,
    Failed,
}

impl Status {
    /// `Passed` iff `expected` occurs anywhere in the `actual` font stack (case-sensitive)
    pub fn from_fonts(actual: &str, expected: &str) -> Self {
        if actual.contains(expected) {
            Status::Passed
        } else {
            Status::Failed
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, Status::Passed)
    }

    /// Label used in every report
    pub fn label(&self) -> &'static str {
        match self {
            Status::Passed => "✅ Passed",
            Status::Failed => "❌ Failed",
        }
    }

    /// CSS class used by the HTML report filters
    pub fn css_class(&self) -> &'static str {
        match self {
            Status::Passed => "pass",
            Status::Failed => "fail",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One element checked against its component's expected font
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementFinding {
    pub component: String,
    /// Selector from the component table that matched the element
    pub tag: String,
    /// Label derived from the element itself, e.g. `p.body-text.lead`
    pub selector: String,
    pub expected_font: String,
    pub actual_font: String,
    pub text_snippet: String,
    pub status: Status,
}

/// Cut `text` to [`SNIPPET_MAX_CHARS`] characters, appending [`ELLIPSIS`] when cut
pub fn snippet(text: &str) -> String {
    let mut chars = text.char_indices();
    match chars.nth(SNIPPET_MAX_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Scans a page against a component table
#[derive(Debug, Clone, Default)]
pub struct FontExtractor {
    components: ComponentTable,
}

impl FontExtractor {
    pub fn new(components: ComponentTable) -> Self {
        Self { components }
    }

    pub fn components(&self) -> &ComponentTable {
        &self.components
    }

    /// Check every element matched by every selector of every component.
    ///
    /// Results are ordered component, then selector, then document order.
    /// Selectors whose query fails are logged and skipped.
    pub async fn extract<P: PageDriver>(&self, page: &P) -> Vec<ElementFinding> {
        let mut findings = Vec::new();

        for component in &self.components {
            for tag in &component.tags {
                match self.scan_selector(page, component, tag).await {
                    Ok(found) => findings.extend(found),
                    Err(e) => warn!("Error finding elements with tag {}: {}", tag, e),
                }
            }
        }

        debug!("Extracted {} findings", findings.len());
        findings
    }

    /// Check all elements matching one selector of a component.
    ///
    /// Fails only when the query itself fails; unreadable elements are skipped.
    pub async fn scan_selector<P: PageDriver>(
        &self,
        page: &P,
        component: &ComponentSpec,
        tag: &str,
    ) -> DriverResult<Vec<ElementFinding>> {
        let elements = page.query_all(tag).await?;
        debug!("{} elements match '{}' for {}", elements.len(), tag, component.name);

        let mut findings = Vec::with_capacity(elements.len());
        for element in &elements {
            match Self::extract_element(page, component, tag, element).await {
                Ok(finding) => findings.push(finding),
                Err(e) => warn!("Error processing element {}: {}", tag, e),
            }
        }
        Ok(findings)
    }

    async fn extract_element<P: PageDriver>(
        page: &P,
        component: &ComponentSpec,
        tag: &str,
        element: &P::Element,
    ) -> DriverResult<ElementFinding> {
        let text = Self::read_text(page, element).await?;
        let actual_font = evaluate_string(page, element, ElementScript::FontFamily).await?;

        let selector = match evaluate_string(page, element, ElementScript::SelectorLabel).await {
            Ok(label) => label,
            Err(e) => {
                debug!("Falling back to '{}' as selector label: {}", tag, e);
                tag.to_string()
            }
        };

        Ok(ElementFinding {
            component: component.name.clone(),
            tag: tag.to_string(),
            selector,
            expected_font: component.expected_font.clone(),
            status: Status::from_fonts(&actual_font, &component.expected_font),
            actual_font,
            text_snippet: snippet(&text),
        })
    }

    /// Visible text, or trimmed `textContent` when the visible text is unavailable
    async fn read_text<P: PageDriver>(page: &P, element: &P::Element) -> DriverResult<String> {
        match page.inner_text(element).await {
            Ok(text) => Ok(text),
            Err(e) => {
                debug!("innerText unavailable, using textContent: {}", e);
                evaluate_string(page, element, ElementScript::TextContent).await
            }
        }
    }
}

/// Evaluate `script` and require a string (or null, read as empty) result
async fn evaluate_string<P: PageDriver>(
    page: &P,
    element: &P::Element,
    script: ElementScript,
) -> DriverResult<String> {
    match page.evaluate(element, script).await? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(DriverError::UnexpectedValue(format!(
            "{:?} returned {}",
            script, other
        ))),
    }
}
