//! Integration test suite for doctracks
//!
//! End-to-end tests that build a site in a temporary directory and run the
//! `doctracks` binary against it.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **resolve**: `resolve` output across versions, languages and inputs
//! - **list**: `list` output
//! - **check**: `check` errors, warnings and exit status
//! - **config**: configuration discovery and overrides

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod check;
mod config;
mod list;
mod resolve;
