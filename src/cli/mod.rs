//! Command-line interface for doctracks.
//!
//! # Available Commands
//!
//! - `resolve` - Resolve learning tracks for one product, version and language
//! - `list` - List the tracks defined for a product
//! - `check` - Resolve every track in every version and language and report problems
//!
//! # Global Options
//!
//! - `--root <DIR>` - Site root (default: current directory)
//! - `--config <FILE>` - Site configuration (default: `<root>/doctracks.toml`,
//!   or `DOCTRACKS_CONFIG`)
//! - `-v, --verbose` / `-q, --quiet` - Log level; `RUST_LOG` takes precedence
//!
//! # Examples
//!
//! ```bash
//! # Tracks listed on a landing page, as JSON
//! doctracks resolve --product actions --version enterprise-server@3.9 \
//!     --page content/actions/index.md --format json
//!
//! # Named tracks in Japanese
//! doctracks resolve --product actions --version free-pro-team@latest --language ja intro advanced
//!
//! # Validate all track data before publishing
//! doctracks --root ./docs check
//! ```

mod check;
mod list;
mod resolve;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Output format shared by commands that print results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Settings derived from global flags.
///
/// Kept separate from [`Cli`] so tests and embedders can choose a log level
/// without parsing arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Default log filter, e.g. `"debug"`. `RUST_LOG` overrides it.
    pub log_level: Option<String>,
}

impl CliConfig {
    /// Create a configuration with no log level override.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// Does nothing if a subscriber is already installed.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.log_level.as_deref().unwrap_or("warn")));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Resolve and validate learning tracks for a documentation site.
#[derive(Parser)]
#[command(
    name = "doctracks",
    about = "Resolve learning tracks for a versioned documentation site",
    version,
    long_about = "doctracks resolves the learning tracks listed on documentation pages \
                  for a product, version and language, and checks track data for errors."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Site root directory
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Site configuration file (default: <root>/doctracks.toml)
    #[arg(long, global = true, env = "DOCTRACKS_CONFIG")]
    config: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve learning tracks for a product, version and language.
    ///
    /// See [`resolve::ResolveCommand`].
    Resolve(resolve::ResolveCommand),

    /// List the learning tracks defined for a product.
    ///
    /// See [`list::ListCommand`].
    List(list::ListCommand),

    /// Resolve every track in every version and language and report problems.
    ///
    /// See [`check::CheckCommand`].
    Check(check::CheckCommand),
}

impl Cli {
    /// Execute with a configuration built from the parsed flags.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the subcommand.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Build a [`CliConfig`] from the parsed flags.
    ///
    /// `--verbose` maps to `debug`, `--quiet` to `error`, and the default is `warn`
    /// so skipped guides are still reported.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            Some("warn".to_string())
        };

        CliConfig {
            log_level,
        }
    }

    /// Execute the subcommand with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the subcommand.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        let config_path = self.config.as_deref();
        match self.command {
            Commands::Resolve(cmd) => cmd.execute(&self.root, config_path).await,
            Commands::List(cmd) => cmd.execute(&self.root, config_path).await,
            Commands::Check(cmd) => cmd.execute(&self.root, config_path).await,
        }
    }
}
