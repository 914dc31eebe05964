//! Cache maintenance commands.

use anyhow::Result;
use colored::Colorize;
use uidocs_core::FetchService;

use crate::cli::CacheAction;

pub fn handle_cache(service: &FetchService, action: &CacheAction, json: bool) -> Result<()> {
    match action {
        CacheAction::Clear => {
            service.cache().clear();
            if json {
                println!("{}", serde_json::json!({ "cleared": true }));
            } else {
                println!("{}", "Cache cleared.".green());
            }
        },
        CacheAction::Stats => {
            let (memory, disk) = service.cache().stats();
            if json {
                println!("{}", serde_json::json!({ "memory": memory, "disk": disk }));
            } else {
                println!("{memory} entries in memory, {disk} on disk");
            }
        },
        CacheAction::Sweep => {
            let removed = service.cache().sweep();
            if json {
                println!("{}", serde_json::json!({ "removed": removed }));
            } else {
                println!("Removed {removed} expired entries.");
            }
        },
    }
    Ok(())
}
