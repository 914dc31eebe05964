//! Core engine for fetching and caching shadcn/ui documentation.
//!
//! The crate turns a page URL (or a well-known page family like
//! "component" or "installation guide") into normalized Markdown plus
//! metadata, using whichever acquisition strategy the URL shape calls
//! for:
//!
//! - **direct**: fetch the site's lightweight pre-rendered document
//!   variant; cheapest, tried first,
//! - **browser**: render client-side sections in headless Chromium,
//! - **html**: scrape server-rendered HTML and convert to Markdown;
//!   always the last resort.
//!
//! Results flow through a two-tier cache (in-process LRU over persistent
//! JSON files) with a fixed TTL, so repeat lookups cost nothing.
//!
//! ## Example
//!
//! ```rust,no_run
//! use uidocs_core::{Config, FetchOptions, FetchService};
//!
//! # async fn example() -> uidocs_core::Result<()> {
//! let service = FetchService::new(&Config::load()?)?;
//! let page = service.fetch_component("button", FetchOptions::default()).await?;
//! println!("{}", page.content.unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod strategy;
pub mod types;

pub use cache::{CacheEntry, CacheKey, CacheStore};
pub use config::{CacheConfig, Config, FetchConfig};
pub use error::{Error, Result};
pub use fetch::{FetchOptions, FetchService};
pub use strategy::{select_strategies, FetchStrategy, StrategyKind};
pub use types::{CodeBlock, ContentType, FetchResult, PageMetadata, SourceStrategy};
