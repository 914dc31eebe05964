//! Command implementations.

mod cache;
mod page;

pub use cache::handle_cache;
pub use page::{fetch_component, fetch_doc, fetch_install, fetch_url};
