//! Resolve learning tracks for one page context.
//!
//! Track names come either from the `learningTracks` frontmatter of a page
//! (`--page`) or from the command line:
//!
//! ```bash
//! doctracks resolve --product actions --version free-pro-team@latest --page content/actions/index.md
//! doctracks resolve --product actions --version enterprise-server@3.9 getting_started self_hosted
//! ```
//!
//! Text output:
//!
//! ```text
//! Featured: getting_started - Get started with Actions
//!   /en/actions/learn/understanding-actions  Understanding Actions
//!
//! Learning tracks:
//!   self_hosted - Self-hosted runners
//!     /en/actions/hosting/about-self-hosted-runners  About self-hosted runners
//! ```

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

use super::OutputFormat;
use crate::content::parse_page;
use crate::models::{LearningTrack, ProcessedTracks};
use crate::site::Site;

/// Arguments of `doctracks resolve`.
#[derive(Args, Debug)]
pub struct ResolveCommand {
    /// Product the page belongs to
    #[arg(long)]
    product: String,

    /// Version to resolve for, e.g. `enterprise-server@3.9`
    #[arg(long = "version", value_name = "VERSION")]
    site_version: String,

    /// Language to resolve for (default: the site's default language)
    #[arg(long)]
    language: Option<String>,

    /// Read track names from this page's `learningTracks` frontmatter
    #[arg(long, conflicts_with = "tracks")]
    page: Option<PathBuf>,

    /// Raw track names; may contain template conditionals
    tracks: Vec<String>,

    /// Fail when a guide points at a missing page
    #[arg(long)]
    strict: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl ResolveCommand {
    /// Run the command against the site at `root`.
    pub async fn execute(self, root: &Path, config_path: Option<&Path>) -> Result<()> {
        let site = Site::load(root, config_path, self.strict.then_some(true)).await?;
        let context = site.context(&self.product, &self.site_version, self.language.as_deref())?;

        let raw_names = match &self.page {
            Some(page) => self.page_tracks(page).await?,
            None if self.tracks.is_empty() => bail!("Give track names or --page"),
            None => self.tracks.clone(),
        };
        tracing::debug!("resolving {} track name(s) for {}", raw_names.len(), context.current_version);

        let processed = site.resolver().resolve(&raw_names, &context).await?;

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&processed)?),
            OutputFormat::Text => print_text(&processed),
        }
        Ok(())
    }

    async fn page_tracks(&self, page: &Path) -> Result<Vec<String>> {
        let content = tokio::fs::read_to_string(page)
            .await
            .with_context(|| format!("Failed to read page {}", page.display()))?;
        let frontmatter = parse_page(&content, &page.display().to_string())?;
        if frontmatter.learning_tracks.is_empty() {
            tracing::warn!("{} lists no learningTracks", page.display());
        }
        Ok(frontmatter.learning_tracks)
    }
}

fn print_track(track: &LearningTrack, indent: &str) {
    for guide in &track.guides {
        println!("{indent}{}  {}", guide.href.cyan(), guide.title);
    }
}

fn print_text(processed: &ProcessedTracks) {
    if processed.is_empty() {
        println!("{}", "No learning tracks apply.".yellow());
        return;
    }

    if let Some(featured) = &processed.featured_track {
        println!("{} {} - {}", "Featured:".bold(), featured.track_name.green(), featured.title);
        print_track(featured, "  ");
        if !processed.learning_tracks.is_empty() {
            println!();
        }
    }

    if !processed.learning_tracks.is_empty() {
        println!("{}", "Learning tracks:".bold());
        for track in &processed.learning_tracks {
            println!("  {} - {}", track.track_name.green(), track.title);
            print_track(track, "    ");
        }
    }
}
