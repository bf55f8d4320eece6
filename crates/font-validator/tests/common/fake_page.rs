//! In-memory page driver for tests that don't need Chrome

use async_trait::async_trait;
use font_validator::driver::{ElementScript, NavigateOptions, PageDriver, ScreenshotOptions};
use font_validator::error::{DriverError, DriverResult};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A DOM element with a fixed computed font
#[derive(Debug, Clone)]
pub struct FakeElement {
    pub tag: String,
    pub classes: Vec<String>,
    pub text: String,
    pub font: String,
    pub inner_text_fails: bool,
    pub font_fails: bool,
    pub label_fails: bool,
}

#[allow(dead_code)]
impl FakeElement {
    pub fn new(tag: &str, text: &str, font: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: Vec::new(),
            text: text.to_string(),
            font: font.to_string(),
            inner_text_fails: false,
            font_fails: false,
            label_fails: false,
        }
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn inner_text_fails(mut self) -> Self {
        self.inner_text_fails = true;
        self
    }

    pub fn font_fails(mut self) -> Self {
        self.font_fails = true;
        self
    }

    pub fn label_fails(mut self) -> Self {
        self.label_fails = true;
        self
    }

    /// Supports bare tag names and single `.class` selectors
    fn matches(&self, selector: &str) -> bool {
        match selector.strip_prefix('.') {
            Some(class) => self.classes.iter().any(|c| c == class),
            None => self.tag == selector,
        }
    }
}

/// Scripted page: known URLs load a fixed document, everything else fails
#[derive(Debug, Default)]
pub struct FakePage {
    documents: HashMap<String, Vec<FakeElement>>,
    timeouts: HashSet<String>,
    failing_selectors: HashSet<String>,
    current: Option<String>,
    pub navigations: Vec<String>,
    pub screenshots: Mutex<Vec<PathBuf>>,
}

#[allow(dead_code)]
impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, url: &str, elements: Vec<FakeElement>) -> Self {
        self.documents.insert(url.to_string(), elements);
        self
    }

    pub fn with_timeout(mut self, url: &str) -> Self {
        self.timeouts.insert(url.to_string());
        self
    }

    pub fn with_failing_selector(mut self, selector: &str) -> Self {
        self.failing_selectors.insert(selector.to_string());
        self
    }

    /// Load a document directly, skipping navigation
    pub fn showing(url: &str, elements: Vec<FakeElement>) -> Self {
        let mut page = Self::new().with_document(url, elements);
        page.current = Some(url.to_string());
        page
    }

    pub fn screenshot_paths(&self) -> Vec<PathBuf> {
        self.screenshots.lock().unwrap().clone()
    }

    fn current_elements(&self) -> &[FakeElement] {
        self.current
            .as_ref()
            .and_then(|url| self.documents.get(url))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[async_trait]
impl PageDriver for FakePage {
    type Element = FakeElement;

    async fn navigate(&mut self, url: &str, options: &NavigateOptions) -> DriverResult<()> {
        self.navigations.push(url.to_string());
        self.current = None;

        if self.timeouts.contains(url) {
            return Err(DriverError::Timeout(options.timeout.as_millis() as u64));
        }
        if !self.documents.contains_key(url) {
            return Err(DriverError::Navigation(format!(
                "net::ERR_NAME_NOT_RESOLVED at {}",
                url
            )));
        }
        self.current = Some(url.to_string());
        Ok(())
    }

    async fn query_all(&self, selector: &str) -> DriverResult<Vec<FakeElement>> {
        if self.failing_selectors.contains(selector) {
            return Err(DriverError::Query {
                selector: selector.to_string(),
                reason: "invalid selector".to_string(),
            });
        }
        Ok(self
            .current_elements()
            .iter()
            .filter(|e| e.matches(selector))
            .cloned()
            .collect())
    }

    async fn inner_text(&self, element: &FakeElement) -> DriverResult<String> {
        if element.inner_text_fails {
            return Err(DriverError::Evaluation("element is not rendered".to_string()));
        }
        Ok(element.text.clone())
    }

    async fn evaluate(&self, element: &FakeElement, script: ElementScript) -> DriverResult<Value> {
        match script {
            ElementScript::TextContent => Ok(Value::String(element.text.trim().to_string())),
            ElementScript::FontFamily if element.font_fails => {
                Err(DriverError::Evaluation("node is detached".to_string()))
            }
            ElementScript::FontFamily => Ok(Value::String(element.font.clone())),
            ElementScript::SelectorLabel if element.label_fails => {
                Err(DriverError::Evaluation("className unavailable".to_string()))
            }
            ElementScript::SelectorLabel => {
                let mut label = element.tag.clone();
                for class in &element.classes {
                    label.push('.');
                    label.push_str(class);
                }
                Ok(Value::String(label))
            }
        }
    }

    async fn screenshot(&self, path: &Path, _options: &ScreenshotOptions) -> DriverResult<()> {
        std::fs::write(path, b"\x89PNG")?;
        self.screenshots.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}
