//! Command-line interface definition.
//!
//! Standard command-subcommand layout built with clap derive macros.
//! Global options (`--json`, `--no-cache`, `--timeout`, `--verbose`)
//! apply to every fetching subcommand.

use clap::{Parser, Subcommand};

/// Fetch shadcn/ui documentation as clean Markdown.
#[derive(Debug, Parser)]
#[command(name = "uidocs", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Emit machine-readable JSON instead of formatted Markdown
    #[arg(long, global = true)]
    pub json: bool,

    /// Bypass the cache and fetch live
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch a component reference page (e.g. `button`, `dialog`)
    Component {
        /// Component name
        name: String,
    },

    /// Fetch a documentation page by path under /docs (e.g. `cli`, `theming`)
    Doc {
        /// Page path
        path: String,
    },

    /// Fetch the installation guide
    Install {
        /// Target framework (next, vite, laravel, react-router, remix,
        /// astro, tanstack, manual)
        framework: Option<String>,
    },

    /// Fetch an arbitrary documentation URL
    Get {
        /// Full page URL
        url: String,
    },

    /// Inspect or maintain the result cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum CacheAction {
    /// Remove every cached entry
    Clear,
    /// Show entry counts per tier
    Stats,
    /// Remove expired entries
    Sweep,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::parse_from(["uidocs", "component", "button", "--json", "--no-cache"]);
        assert!(cli.json);
        assert!(cli.no_cache);
        assert!(matches!(cli.command, Commands::Component { name } if name == "button"));
    }

    #[test]
    fn timeout_is_optional() {
        let cli = Cli::parse_from(["uidocs", "doc", "cli", "--timeout", "30"]);
        assert_eq!(cli.timeout, Some(30));
    }
}
