//! Fetch strategies and the strategy selector.
//!
//! Three interchangeable ways of obtaining content for a URL sit behind
//! one contract: a direct lightweight-document fetch, a headless browser
//! render, and a plain HTTP scrape with Markdown conversion. The selector
//! is a pure function deciding which of them to try, in which order, for
//! a given URL shape.

mod browser;
mod direct;
mod html;

pub use browser::BrowserStrategy;
pub use direct::DirectStrategy;
pub use html::HtmlStrategy;

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::types::FetchResult;

/// Tag identifying a fetch strategy, used for ordering and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// Direct lightweight-document fetch.
    Direct,
    /// Headless browser render.
    Browser,
    /// Plain HTTP scrape plus conversion.
    Html,
}

/// One self-contained method of obtaining content for a URL.
///
/// `attempt` returns:
/// - `None`: not applicable or not found here; the orchestrator falls
///   through silently,
/// - `Some` with `success == false`: applicable but failed; the error is
///   recorded and the next strategy still runs,
/// - `Some` with `success == true`: done, no further strategies run.
#[async_trait]
pub trait FetchStrategy: Send + Sync {
    /// Which selector tag this strategy answers to.
    fn kind(&self) -> StrategyKind;

    /// Try to produce content for `url` within `timeout`.
    async fn attempt(&self, url: &str, timeout: Duration) -> Option<FetchResult>;
}

/// URL sections known to be client-rendered: static HTML for these pages
/// is an empty shell, so a browser render is worth its cost. Matched by
/// path prefix, never by content inspection.
const SCRIPT_RENDERED_MARKERS: &[&str] = &["/charts", "/themes", "/blocks", "/colors"];

fn is_script_rendered(url: &str) -> bool {
    let path_matches =
        |path: &str| SCRIPT_RENDERED_MARKERS.iter().any(|marker| path.starts_with(marker));
    Url::parse(url).map_or_else(|_| path_matches(url), |parsed| path_matches(parsed.path()))
}

/// Decide the ordered strategy list for a URL.
///
/// The ordering is deliberate and encodes the cost/reliability trade-off:
/// cheapest first (direct), the expensive browser render only for
/// sections known to need it, and the scrape fallback always last so no
/// URL shape is a dead end.
///
/// ```rust
/// use uidocs_core::strategy::{select_strategies, StrategyKind};
///
/// assert_eq!(
///     select_strategies("https://ui.shadcn.com/charts/area-1"),
///     [StrategyKind::Direct, StrategyKind::Browser, StrategyKind::Html],
/// );
/// assert_eq!(
///     select_strategies("https://ui.shadcn.com/docs/cli"),
///     [StrategyKind::Direct, StrategyKind::Html],
/// );
/// ```
#[must_use]
pub fn select_strategies(url: &str) -> Vec<StrategyKind> {
    let mut order = vec![StrategyKind::Direct];
    if is_script_rendered(url) {
        order.push(StrategyKind::Browser);
    }
    order.push(StrategyKind::Html);
    order
}
