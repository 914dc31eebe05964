//! Fetch orchestration: cache, strategy selection, sequential fallback.
//!
//! One entry point (`fetch_url`) ties the subsystems together: consult
//! the cache, ask the selector for an ordered strategy list, run the
//! strategies one at a time, stop at the first success and write it
//! through the cache. Higher-level helpers map well-known page families
//! (components, docs, installation guides) onto canonical URLs before
//! delegating.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::strategy::{
    select_strategies, BrowserStrategy, DirectStrategy, FetchStrategy, HtmlStrategy,
};
use crate::types::FetchResult;

/// Frameworks with a dedicated installation guide page.
const KNOWN_FRAMEWORKS: &[&str] = &[
    "next",
    "vite",
    "laravel",
    "react-router",
    "remix",
    "astro",
    "tanstack",
    "manual",
];

/// Per-call fetch options.
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    /// Consult and populate the cache. Disable to force a live fetch.
    pub use_cache: bool,
    /// Per-strategy attempt timeout.
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Orchestrates cached, multi-strategy page fetching.
pub struct FetchService {
    cache: Arc<CacheStore>,
    strategies: Vec<Box<dyn FetchStrategy>>,
    base_url: String,
    default_timeout: Duration,
    sweep_interval: Duration,
}

impl FetchService {
    /// Build the service from configuration: shared HTTP client, the
    /// standard strategy set, and a cache rooted per the config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed or the
    /// cache root cannot be resolved.
    pub fn new(config: &Config) -> Result<Self> {
        let client = build_client(config.fetch.timeout())?;
        let cache = Arc::new(CacheStore::new(
            config.cache_root()?,
            config.cache.memory_capacity,
            config.cache.ttl(),
        ));

        let browser = if config.fetch.browser_enabled {
            BrowserStrategy::discover()
        } else {
            BrowserStrategy::disabled()
        };

        let strategies: Vec<Box<dyn FetchStrategy>> = vec![
            Box::new(DirectStrategy::new(client.clone(), config.fetch.direct_suffix.clone())),
            Box::new(browser),
            Box::new(HtmlStrategy::new(client)),
        ];

        Ok(Self {
            cache,
            strategies,
            base_url: config.fetch.base_url.trim_end_matches('/').to_string(),
            default_timeout: config.fetch.timeout(),
            sweep_interval: config.cache.sweep_interval(),
        })
    }

    /// Build the service around an explicit strategy set (primarily for
    /// tests).
    #[must_use]
    pub fn with_strategies(
        cache: Arc<CacheStore>,
        strategies: Vec<Box<dyn FetchStrategy>>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            cache,
            strategies,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            default_timeout: Duration::from_secs(10),
            sweep_interval: Duration::from_secs(3600),
        }
    }

    /// Override the sweep interval (builder style, primarily for tests).
    #[must_use]
    pub const fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Start the periodic cache sweeper on the configured interval.
    ///
    /// Must be called from within a tokio runtime. The sweeper runs until
    /// the returned handle is aborted or the runtime shuts down; callers
    /// keep the service alive for its lifetime through the shared cache.
    pub fn spawn_sweeper(&self) -> tokio::task::JoinHandle<()> {
        self.cache.spawn_sweeper(self.sweep_interval)
    }

    /// The cache backing this service.
    #[must_use]
    pub fn cache(&self) -> &Arc<CacheStore> {
        &self.cache
    }

    /// Default per-strategy timeout from configuration.
    #[must_use]
    pub const fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Fetch the documentation page for a named component.
    ///
    /// # Errors
    ///
    /// Returns an error if every applicable strategy fails.
    pub async fn fetch_component(&self, name: &str, options: FetchOptions) -> Result<FetchResult> {
        let slug = name.trim().trim_matches('/').to_lowercase();
        let url = format!("{}/docs/components/{slug}", self.base_url);
        self.fetch_url(&url, options).await
    }

    /// Fetch a general documentation page by path under `/docs`.
    ///
    /// # Errors
    ///
    /// Returns an error if every applicable strategy fails.
    pub async fn fetch_doc(&self, path: &str, options: FetchOptions) -> Result<FetchResult> {
        let trimmed = path.trim().trim_matches('/');
        let url = if trimmed.is_empty() {
            format!("{}/docs", self.base_url)
        } else {
            format!("{}/docs/{trimmed}", self.base_url)
        };
        self.fetch_url(&url, options).await
    }

    /// Fetch the installation guide, optionally for a specific framework.
    ///
    /// An unrecognized framework falls back to the general guide and the
    /// correction is noted on the result.
    ///
    /// # Errors
    ///
    /// Returns an error if every applicable strategy fails.
    pub async fn fetch_install_guide(
        &self,
        framework: Option<&str>,
        options: FetchOptions,
    ) -> Result<FetchResult> {
        let framework = framework.map(|f| f.trim().to_lowercase());
        match framework.as_deref() {
            Some(fw) if KNOWN_FRAMEWORKS.contains(&fw) => {
                let url = format!("{}/docs/installation/{fw}", self.base_url);
                self.fetch_url(&url, options).await
            },
            Some(fw) => {
                warn!("Unknown framework '{}'; serving the general installation guide", fw);
                let url = format!("{}/docs/installation", self.base_url);
                let mut result = self.fetch_url(&url, options).await?;
                result.push_note(format!(
                    "No dedicated guide for '{fw}'; showing the general installation guide. \
                     Known frameworks: {}",
                    KNOWN_FRAMEWORKS.join(", ")
                ));
                Ok(result)
            },
            None => {
                let url = format!("{}/docs/installation", self.base_url);
                self.fetch_url(&url, options).await
            },
        }
    }

    /// Fetch an arbitrary URL through the cache and strategy chain.
    ///
    /// Strategies run strictly one at a time in selector order. The first
    /// success short-circuits the rest and is written through the cache;
    /// recorded failures are accumulated and the last one shapes the
    /// final error when everything fails. Nothing is cached on failure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when no strategy produced content, or
    /// the last recorded strategy error when at least one strategy failed
    /// outright.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn fetch_url(&self, url: &str, options: FetchOptions) -> Result<FetchResult> {
        if options.use_cache {
            if let Some(cached) = self.cache.get(url) {
                info!("Serving {} from cache", url);
                return Ok(cached);
            }
        }

        let order = select_strategies(url);
        debug!("Strategy order for {}: {:?}", url, order);

        let mut last_error: Option<String> = None;
        for kind in order {
            let Some(strategy) = self.strategies.iter().find(|s| s.kind() == kind) else {
                continue;
            };

            match strategy.attempt(url, options.timeout).await {
                Some(result) if result.success => {
                    info!("Fetched {} via {}", url, result.source_strategy);
                    if options.use_cache {
                        self.cache.put(url, &result);
                    }
                    return Ok(result);
                },
                Some(failed) => {
                    debug!(
                        "Strategy {:?} failed for {}: {}",
                        kind,
                        url,
                        failed.error.as_deref().unwrap_or("unknown error")
                    );
                    last_error = failed.error;
                },
                None => {
                    debug!("Strategy {:?} not applicable for {}", kind, url);
                },
            }
        }

        Err(match last_error {
            Some(message) if message.starts_with("timeout:") => Error::Timeout(message),
            Some(message) => Error::NotFound(format!("all fetch strategies failed for {url}: {message}")),
            None => Error::NotFound(format!("no fetch strategy produced content for {url}")),
        })
    }
}

/// Shared HTTP client used by all network strategies.
fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("uidocs/", env!("CARGO_PKG_VERSION")))
        .gzip(true)
        .brotli(true)
        .build()
        .map_err(Error::Network)
}
