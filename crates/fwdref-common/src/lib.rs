//! Common types and utilities for the fwdref resolver.
//!
//! This crate provides foundational types shared by the fwdref crates:
//! - String interning (`Atom`, `ShardedInterner`)
//! - Resolution limits and thresholds
//! - Tracing subscriber setup for hosts and tests

// String interning for declaration and attribute names
pub mod interner;
pub use interner::{Atom, ShardedInterner};

// Centralized limits and thresholds
pub mod limits;

// Opt-in tracing subscriber
pub mod tracing_config;
pub use tracing_config::{LogFormat, init_tracing};
