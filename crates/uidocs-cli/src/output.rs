//! Result rendering: formatted Markdown for humans, JSON for machines.

use anyhow::Result;
use colored::Colorize;
use uidocs_core::extract::strip_noise;
use uidocs_core::{Error, FetchResult};

/// Print a fetch result.
///
/// JSON mode serializes the full result verbatim. Text mode prints a
/// short provenance header, then the Markdown body with navigation noise
/// stripped for readability.
pub fn print_result(result: &FetchResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    let title = result
        .metadata
        .title
        .as_deref()
        .unwrap_or(&result.url);
    println!(
        "{} {}",
        title.bold(),
        format!("[{} · {:?}]", result.source_strategy, result.content_type).dimmed()
    );

    for note in &result.notes {
        println!("{} {}", "note:".yellow(), note);
    }

    if let Some(content) = &result.content {
        println!();
        println!("{}", strip_noise(content));
    }

    if !result.code_blocks.is_empty() {
        println!();
        println!(
            "{}",
            format!("{} code block(s) extracted", result.code_blocks.len()).dimmed()
        );
    }

    Ok(())
}

/// JSON body for a fetch that exhausted every strategy: the same
/// `success`/`error` shape as a successful result's envelope.
pub fn failure_envelope(err: &Error) -> serde_json::Value {
    serde_json::json!({
        "success": false,
        "error": err.to_string(),
        "category": err.category(),
    })
}

/// Print a fetch failure and propagate it for the exit code.
///
/// JSON mode keeps stdout machine-readable: consumers always get an
/// envelope with `success` set, even when no strategy produced content.
pub fn print_failure(err: Error, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&failure_envelope(&err))?);
    }
    Err(err.into())
}
