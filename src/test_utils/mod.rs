//! Test utilities for doctracks
//!
//! This module provides helpers for writing tests: logging setup and
//! throwaway site roots written to temporary directories.
//!
//! # Example
//!
//! ```rust,no_run
//! use doctracks::test_utils::{SiteFixture, init_test_logging};
//!
//! # async fn example() -> anyhow::Result<()> {
//! init_test_logging(None);
//!
//! let fixture = SiteFixture::builder()?
//!     .with_tracks("actions", "intro:\n  title: Intro\n  guides: [/actions/intro]\n")
//!     .with_page("actions/intro", "title: Introduction")
//!     .build()?;
//!
//! let site = fixture.site().await?;
//! assert_eq!(site.tracks().products()?, vec!["actions"]);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod fixtures;

pub use builder::{SiteFixture, SiteFixtureBuilder};
pub use fixtures::{ACTIONS_TRACKS, ACTIONS_TRACKS_JA, sample_config, sample_site};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Initializes the tracing subscriber once, no matter how many tests call it.
/// Uses `level` when given, otherwise `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=doctracks=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
