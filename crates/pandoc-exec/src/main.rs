/*
 * main.rs
 * Copyright (c) 2025 pandoc-exec contributors
 *
 * pandoc-exec - pandoc JSON filter entry point.
 */

//! Reads a pandoc JSON document on stdin, executes its marked code
//! blocks, and writes the filtered document to stdout. Invoke from
//! pandoc with `--filter pandoc-exec`.

use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pandoc_exec_core::SourceExecFilter;
use pandoc_exec_types::json;

/// Default log filter. Target-less so the recoverable-degradation
/// warnings from every workspace crate get through when `RUST_LOG`
/// is unset.
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser)]
#[command(name = "pandoc-exec")]
#[command(version)]
#[command(about = "Execute code blocks in a pandoc document", long_about = None)]
struct Cli {
    /// Target output format, passed by pandoc and ignored
    #[allow(dead_code)]
    format: Option<String>,
}

fn main() -> Result<()> {
    // Diagnostics go to stderr; stdout belongs to the document.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let _cli = Cli::parse();

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read stdin")?;

    let mut doc = json::read(&input).context("Failed to parse pandoc JSON")?;

    let filter = SourceExecFilter::new();
    filter
        .run(&mut doc)
        .context("Failed to process document")?;

    println!("{}", json::write_string(&doc));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_filter_is_crate_agnostic() {
        // Library-crate warnings carry their own targets; a
        // target-qualified default would suppress them all.
        assert!(!DEFAULT_LOG_FILTER.contains('='));
        assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }
}

