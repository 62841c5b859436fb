//! Tracing configuration for hosts and tests that want to see resolution.
//!
//! Supports three output formats controlled by `FWDREF_LOG_FORMAT`:
//!
//! - `text` (default): Standard `tracing-subscriber` flat output
//! - `tree`: Hierarchical indented output via `tracing-tree`
//! - `json`: One JSON object per span/event
//!
//! ## Quick start
//!
//! ```bash
//! # Every placeholder lookup, as a tree
//! FWDREF_LOG=trace FWDREF_LOG_FORMAT=tree cargo test -p fwdref-resolver
//!
//! # Only the walker
//! FWDREF_LOG="fwdref_resolver::walk=debug" cargo test
//! ```
//!
//! The subscriber is only initialised when `FWDREF_LOG` (or `RUST_LOG`) is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a format name; unknown names fall back to `Text`.
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("FWDREF_LOG_FORMAT").unwrap_or_default())
    }
}

/// Build an `EnvFilter` from `FWDREF_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("FWDREF_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `FWDREF_LOG` nor `RUST_LOG` is set, and does
/// nothing if another subscriber is already installed, so it is safe to call
/// from every test.
///
/// All output goes to stderr.
pub fn init_tracing() {
    let has_fwdref_log = std::env::var("FWDREF_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_fwdref_log && !has_rust_log {
        return;
    }

    let filter = build_filter();

    // A second init from another test thread is expected; ignore it.
    let _ = match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true)
                .with_writer(std::io::stderr);

            Registry::default().with(filter).with(tree_layer).try_init()
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).try_init()
        }
        LogFormat::Text => {
            let text_layer = fmt::layer().with_writer(std::io::stderr);

            Registry::default().with(filter).with(text_layer).try_init()
        }
    };
}

#[cfg(test)]
#[path = "../tests/tracing_config_tests.rs"]
mod tests;
