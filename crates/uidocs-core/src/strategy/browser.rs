//! Headless browser render strategy.
//!
//! Some sections of the documentation site are client-rendered: the
//! initial HTML is an empty shell and the real content only exists after
//! script execution. For those pages a headless Chrome/Chromium process
//! loads the URL, runs scripts until the network is quiet, and dumps the
//! resulting DOM, which then feeds the same extraction pipeline as the
//! plain-HTML fallback.
//!
//! The browser is a capability, not a requirement: when no suitable
//! binary is on `PATH` the strategy is a permanent no-op and every
//! attempt falls through to the next strategy.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::extract::extract_page;
use crate::types::{FetchResult, SourceStrategy};

use super::{FetchStrategy, StrategyKind};

/// Minimum effective budget for a render.
const BROWSER_TIMEOUT_FLOOR: Duration = Duration::from_secs(30);

/// Added on top of the caller's timeout. Process startup and script
/// execution cost time a plain-HTTP timeout does not account for, so the
/// render budget always strictly exceeds it.
const BROWSER_STARTUP_MARGIN: Duration = Duration::from_secs(10);

const fn render_budget(timeout: Duration) -> Duration {
    let padded = timeout.saturating_add(BROWSER_STARTUP_MARGIN);
    if padded.as_millis() > BROWSER_TIMEOUT_FLOOR.as_millis() {
        padded
    } else {
        BROWSER_TIMEOUT_FLOOR
    }
}

/// Virtual-time budget handed to the browser. Chromium fast-forwards
/// virtual time whenever the network is idle, so this bounds the
/// quiescence wait without sleeping through it in real time.
const VIRTUAL_TIME_BUDGET_MS: u32 = 5_000;

/// Strategy rendering a page in a headless browser before extraction.
pub struct BrowserStrategy {
    binary: Option<PathBuf>,
}

impl BrowserStrategy {
    /// Discover a Chrome/Chromium binary on `PATH`.
    ///
    /// A missing binary is not an error; the strategy degrades to a
    /// no-op and the orchestrator falls through to the HTML scrape.
    #[must_use]
    pub fn discover() -> Self {
        let executables = ["google-chrome", "chromium", "chromium-browser", "chrome"];
        for exe in executables {
            if let Ok(path) = which::which(exe) {
                debug!("Using browser binary {}", path.display());
                return Self { binary: Some(path) };
            }
        }
        warn!("No Chrome/Chromium binary on PATH; browser renders disabled");
        Self { binary: None }
    }

    /// Build the strategy around a known binary (primarily for tests).
    #[must_use]
    pub fn with_binary(path: PathBuf) -> Self {
        Self { binary: Some(path) }
    }

    /// Build a permanently disabled strategy.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { binary: None }
    }

    /// Whether a render can actually run.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.binary.is_some()
    }

    async fn render_dom(&self, binary: &PathBuf, url: &str, budget: Duration) -> Option<String> {
        let budget_ms = VIRTUAL_TIME_BUDGET_MS.to_string();
        let output = Command::new(binary)
            .args([
                "--headless=new",
                "--disable-gpu",
                "--no-first-run",
                "--hide-scrollbars",
                &format!("--virtual-time-budget={budget_ms}"),
                "--dump-dom",
                url,
            ])
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(budget, output).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                warn!("Browser process for {} failed to run: {}", url, e);
                return None;
            },
            Err(_) => {
                warn!("Browser render of {} timed out after {}s", url, budget.as_secs());
                return None;
            },
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(
                exit_code = ?output.status.code(),
                stderr = %stderr.trim(),
                "Browser render of {} failed", url
            );
            return None;
        }

        let html = String::from_utf8_lossy(&output.stdout).into_owned();
        if html.trim().is_empty() {
            return None;
        }
        Some(html)
    }
}

#[async_trait]
impl FetchStrategy for BrowserStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Browser
    }

    async fn attempt(&self, url: &str, timeout: Duration) -> Option<FetchResult> {
        let binary = self.binary.as_ref()?;

        let budget = render_budget(timeout);
        let html = self.render_dom(binary, url, budget).await?;

        debug!("Browser produced {} bytes of DOM for {}", html.len(), url);
        extract_page(url, &html, SourceStrategy::Browser)
    }
}
