//! Plain HTTP scrape with Markdown conversion.
//!
//! The fallback of last resort: fetch the server-rendered HTML, carve out
//! the content region, convert it to Markdown. Always selected, always
//! last. Unlike the direct strategy, a failure here is terminal for the
//! URL, so every failure mode surfaces as a recorded error rather than a
//! silent fallthrough.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::extract::extract_page;
use crate::types::{FetchResult, SourceStrategy};

use super::{FetchStrategy, StrategyKind};

/// Strategy scraping server-rendered HTML and converting it to Markdown.
pub struct HtmlStrategy {
    client: Client,
}

impl HtmlStrategy {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FetchStrategy for HtmlStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Html
    }

    async fn attempt(&self, url: &str, timeout: Duration) -> Option<FetchResult> {
        let response = match self.client.get(url).timeout(timeout).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                debug!("HTML fetch of {} timed out", url);
                return Some(FetchResult::failure(
                    url,
                    SourceStrategy::Html,
                    format!("timeout: HTML fetch of {url} exceeded {}s", timeout.as_secs()),
                ));
            },
            Err(e) => {
                debug!("HTML fetch of {} failed: {}", url, e);
                return Some(FetchResult::failure(
                    url,
                    SourceStrategy::Html,
                    format!("HTML fetch failed: {e}"),
                ));
            },
        };

        let status = response.status();
        if !status.is_success() {
            return Some(FetchResult::failure(
                url,
                SourceStrategy::Html,
                format!("HTTP {status}"),
            ));
        }

        let html = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Some(FetchResult::failure(
                    url,
                    SourceStrategy::Html,
                    format!("failed to read response body: {e}"),
                ));
            },
        };

        debug!("Scraped {} bytes of HTML from {}", html.len(), url);
        extract_page(url, &html, SourceStrategy::Html).or_else(|| {
            Some(FetchResult::failure(
                url,
                SourceStrategy::Html,
                "no content region resolved from scraped page",
            ))
        })
    }
}
