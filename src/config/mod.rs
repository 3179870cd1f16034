//! Configuration for doctracks.
//!
//! A site is configured by an optional `doctracks.toml` in its root. The path
//! can be overridden with `--config` or the `DOCTRACKS_CONFIG` environment
//! variable; command-line flags such as `--strict` override file values.
//!
//! See [`SiteConfig`] for the file format and defaults.

pub mod site;

pub use site::{CONFIG_FILE, PlanConfig, SiteConfig};
