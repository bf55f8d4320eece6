//! Browser helpers for tests that drive a real Chrome

use font_validator::browser::ChromiumSession;
use font_validator::config::BrowserSettings;

/// Check if browser tests should be skipped (when Chrome isn't available)
pub fn should_skip() -> bool {
    std::env::var("SKIP_BROWSER_TESTS").is_ok()
}

/// Macro to skip test if Chrome isn't available
#[macro_export]
macro_rules! skip_if_no_chrome {
    () => {
        if browser::should_skip() {
            eprintln!("Skipping test: SKIP_BROWSER_TESTS is set");
            return;
        }
    };
}

/// Find Chrome for Testing installed by Puppeteer
pub fn find_chrome_for_testing() -> Option<std::path::PathBuf> {
    let home = std::env::var("HOME").ok()?;
    let puppeteer_cache = std::path::Path::new(&home).join(".cache/puppeteer/chrome");

    let mut versions: Vec<_> = std::fs::read_dir(&puppeteer_cache)
        .ok()?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .collect();
    versions.sort_by_key(|v| std::cmp::Reverse(v.path()));

    versions.into_iter().find_map(|version_dir| {
        [
            "chrome-mac-arm64/Google Chrome for Testing.app/Contents/MacOS/Google Chrome for Testing",
            "chrome-mac-x64/Google Chrome for Testing.app/Contents/MacOS/Google Chrome for Testing",
            "chrome-linux64/chrome",
        ]
        .iter()
        .map(|relative| version_dir.path().join(relative))
        .find(|candidate| candidate.exists())
    })
}

/// Launch a headless session, or `None` when no Chrome can be found
pub async fn require_session() -> Option<ChromiumSession> {
    use std::sync::atomic::{AtomicU64, Ordering};
    static SESSION_ID: AtomicU64 = AtomicU64::new(0);

    // Unique profile directory so parallel tests don't fight over the lock
    let profile = std::env::temp_dir().join(format!(
        "font-validator-{}-{}",
        std::process::id(),
        SESSION_ID.fetch_add(1, Ordering::SeqCst)
    ));

    let settings = BrowserSettings {
        user_data_dir: Some(profile),
        chrome_executable: std::env::var_os("CHROME_PATH")
            .map(Into::into)
            .or_else(find_chrome_for_testing),
        ..BrowserSettings::default()
    };

    match ChromiumSession::launch(&settings).await {
        Ok(session) => Some(session),
        Err(e) => {
            if e.to_string().contains("Could not auto detect") {
                eprintln!("Skipping: Chrome not installed ({})", e);
                None
            } else {
                panic!("Unexpected browser error: {}", e);
            }
        }
    }
}
