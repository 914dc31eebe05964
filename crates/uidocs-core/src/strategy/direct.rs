//! Direct lightweight-document fetch.
//!
//! The documentation site serves a pre-rendered, already-Markdown-like
//! variant of most pages at the canonical URL plus a suffix. Fetching it
//! is the cheapest and most reliable path when it exists, so this
//! strategy always runs first. It never parses HTML and never runs a
//! browser: trust the source format, repair escape artifacts, done.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::extract::{extract_code_blocks, first_heading_title};
use crate::types::{FetchResult, PageMetadata, SourceStrategy};

use super::{FetchStrategy, StrategyKind};

/// Strategy fetching the lightweight document variant of a page.
pub struct DirectStrategy {
    client: Client,
    suffix: String,
}

impl DirectStrategy {
    /// Create the strategy with a shared client and the site's
    /// lightweight-variant suffix (e.g. `.md`).
    #[must_use]
    pub fn new(client: Client, suffix: impl Into<String>) -> Self {
        Self {
            client,
            suffix: suffix.into(),
        }
    }
}

/// Normalize escape artifacts the lightweight variant carries over:
/// backslash-escaped quotes and entity-encoded apostrophes become literal
/// characters. Idempotent: a second pass over clean text changes nothing.
#[must_use]
pub fn unescape_document(text: &str) -> String {
    text.replace("\\\"", "\"")
        .replace("\\'", "'")
        .replace("&apos;", "'")
}

#[async_trait]
impl FetchStrategy for DirectStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Direct
    }

    async fn attempt(&self, url: &str, timeout: Duration) -> Option<FetchResult> {
        let target = format!("{url}{}", self.suffix);

        let response = match self.client.get(&target).timeout(timeout).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                debug!("Direct fetch of {} timed out", target);
                return Some(FetchResult::failure(
                    url,
                    SourceStrategy::Direct,
                    format!("timeout: direct fetch of {target} exceeded {}s", timeout.as_secs()),
                ));
            },
            Err(e) => {
                debug!("Direct fetch of {} failed: {}", target, e);
                return Some(FetchResult::failure(
                    url,
                    SourceStrategy::Direct,
                    format!("direct fetch failed: {e}"),
                ));
            },
        };

        // No lightweight variant at this path. Normal, not an error.
        if !response.status().is_success() {
            debug!("No direct document at {} ({})", target, response.status());
            return None;
        }

        let body = response.text().await.ok()?;
        let content = unescape_document(&body);
        let code_blocks = extract_code_blocks(&content);
        let metadata = PageMetadata {
            title: first_heading_title(&content),
            ..PageMetadata::default()
        };

        FetchResult::ok(url, content, SourceStrategy::Direct)
            .map(|result| result.with_metadata(metadata).with_code_blocks(code_blocks))
    }
}
