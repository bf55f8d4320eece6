//! Run configuration and the component table
//!
//! Runtime settings come from environment variables (`HEADLESS`, `TIMEOUT`,
//! `SCREENSHOT_PATH`, `CHROME_PATH`). The component table describing which
//! selectors belong to which UI role, and which font each role must use, is
//! built in but can be replaced by a TOML file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::driver::{NavigateOptions, WaitUntil};
use crate::error::ValidationError;

/// Default navigation timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;

/// Default directory for per-URL screenshots
pub const DEFAULT_SCREENSHOT_DIR: &str = "reports/screenshots";

/// Desktop user agent presented to every page
pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/112.0.0.0 Safari/537.36";

/// Settings for a single validation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Run Chromium without a window
    pub headless: bool,
    /// Upper bound for a navigation including the network-idle wait
    pub timeout: Duration,
    /// Directory receiving one screenshot per loaded URL
    pub screenshot_dir: PathBuf,
    /// Explicit Chrome executable, auto-detected when unset
    pub chrome_path: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            headless: true,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            screenshot_dir: PathBuf::from(DEFAULT_SCREENSHOT_DIR),
            chrome_path: None,
        }
    }
}

impl RunConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    ///
    /// `HEADLESS` disables headless mode only for the literal value `false`.
    /// An unparsable `TIMEOUT` falls back to [`DEFAULT_TIMEOUT_MS`].
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            headless: lookup("HEADLESS").map(|v| v != "false").unwrap_or(true),
            timeout: Duration::from_millis(
                lookup("TIMEOUT")
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_MS),
            ),
            screenshot_dir: lookup("SCREENSHOT_PATH")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SCREENSHOT_DIR)),
            chrome_path: lookup("CHROME_PATH")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Browser launch settings derived from this configuration
    pub fn browser_settings(&self) -> BrowserSettings {
        BrowserSettings {
            headless: self.headless,
            chrome_executable: self.chrome_path.clone(),
            ..BrowserSettings::default()
        }
    }

    /// Navigation options used for every URL of the run
    pub fn navigate_options(&self) -> NavigateOptions {
        NavigateOptions {
            timeout: self.timeout,
            wait_until: WaitUntil::NetworkIdle,
        }
    }
}

/// Chromium launch settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserSettings {
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub user_agent: String,
    /// Accept invalid TLS certificates (staging hosts)
    pub ignore_https_errors: bool,
    pub chrome_executable: Option<PathBuf>,
    /// Profile directory, chromiumoxide's default when unset
    pub user_data_dir: Option<PathBuf>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 800,
            user_agent: DESKTOP_USER_AGENT.to_string(),
            ignore_https_errors: true,
            chrome_executable: None,
            user_data_dir: None,
        }
    }
}

/// A named UI role, the selectors that identify it and the font it must use
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSpec {
    /// Display name, e.g. "Header"
    pub name: String,
    /// CSS selectors scanned in order
    pub tags: Vec<String>,
    /// Substring that must appear in the computed font-family stack
    #[serde(alias = "expected")]
    pub expected_font: String,
}

impl ComponentSpec {
    pub fn new<N, E, I, T>(name: N, tags: I, expected_font: E) -> Self
    where
        N: Into<String>,
        E: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            name: name.into(),
            tags: tags.into_iter().map(Into::into).collect(),
            expected_font: expected_font.into(),
        }
    }
}

/// Immutable, ordered set of components scanned on every page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentTable {
    components: Vec<ComponentSpec>,
}

impl Default for ComponentTable {
    fn default() -> Self {
        Self {
            components: vec![
                ComponentSpec::new("Header", ["h1", "h2", "h3"], "lato-bold"),
                ComponentSpec::new("Subheader", ["h4", "h5", "h6"], "Inter"),
                ComponentSpec::new("Body Text", [".body-text", "p"], "Inter"),
                ComponentSpec::new("Disclaimer Text", [".disclaimer", "small"], "Inter"),
            ],
        }
    }
}

impl ComponentTable {
    /// Create a table from explicit components
    pub fn new(components: Vec<ComponentSpec>) -> Self {
        Self { components }
    }

    /// Load a component table from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed,
    /// or the table is empty.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use font_validator::config::ComponentTable;
    ///
    /// # fn example() -> Result<(), font_validator::ValidationError> {
    /// let table = ComponentTable::from_file("components.toml")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ValidationError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ValidationError::Components(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse a component table from a TOML string
    ///
    /// ```
    /// use font_validator::config::ComponentTable;
    ///
    /// let table = ComponentTable::from_toml_str(r#"
    ///     [[components]]
    ///     name = "Header"
    ///     tags = ["h1"]
    ///     expected_font = "Inter"
    /// "#).unwrap();
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self, ValidationError> {
        let table: Self =
            toml::from_str(s).map_err(|e| ValidationError::Components(e.to_string()))?;
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.components.is_empty() {
            return Err(ValidationError::Components(
                "at least one component is required".to_string(),
            ));
        }
        if let Some(unnamed) = self.components.iter().position(|c| c.name.trim().is_empty()) {
            return Err(ValidationError::Components(format!(
                "component #{} has an empty name",
                unnamed + 1
            )));
        }
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ComponentSpec> {
        self.components.iter()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl<'a> IntoIterator for &'a ComponentTable {
    type Item = &'a ComponentSpec;
    type IntoIter = std::slice::Iter<'a, ComponentSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}
