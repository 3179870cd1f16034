//! List the tracks defined in the default-language data files.
//!
//! Text output marks a featured track with `*`, and a track whose
//! `featured_track` is a template (featured only in some versions) with `*?`.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

use super::OutputFormat;
use crate::content::TrackSource;
use crate::models::{FeaturedFlag, TrackKey};
use crate::site::Site;

/// Arguments of `doctracks list`.
#[derive(Args, Debug)]
pub struct ListCommand {
    /// Product to list (default: every product)
    #[arg(long)]
    product: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct TrackEntry {
    product: String,
    name: String,
    title: String,
    guides: usize,
    featured: Featured,
}

/// Whether a track is featured, as far as can be told without a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum Featured {
    Never,
    Always,
    /// Templated flag; depends on the version
    Conditional,
}

impl From<Option<&FeaturedFlag>> for Featured {
    fn from(flag: Option<&FeaturedFlag>) -> Self {
        match flag {
            Some(FeaturedFlag::Literal(true)) => Self::Always,
            Some(FeaturedFlag::Templated(_)) => Self::Conditional,
            Some(FeaturedFlag::Literal(false)) | None => Self::Never,
        }
    }
}

impl Featured {
    fn marker(self) -> &'static str {
        match self {
            Self::Never => "",
            Self::Always => " *",
            Self::Conditional => " *?",
        }
    }
}

impl ListCommand {
    /// Run the command against the site at `root`.
    pub async fn execute(self, root: &Path, config_path: Option<&Path>) -> Result<()> {
        let site = Site::load(root, config_path, None).await?;
        let default_language = site.config().default_language.clone();

        let products = match self.product {
            Some(product) => vec![product],
            None => site.tracks().products()?,
        };

        let mut entries = Vec::new();
        for product in &products {
            for name in site.tracks().track_names(product)? {
                let key = TrackKey::new(product.as_str(), name);
                let Some(track) = site.tracks().track(&key, &default_language)? else {
                    continue;
                };
                entries.push(TrackEntry {
                    featured: track.featured_track.as_ref().into(),
                    product: key.product,
                    name: key.track,
                    title: track.title,
                    guides: track.guides.len(),
                });
            }
        }

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
            OutputFormat::Text if entries.is_empty() => {
                println!("{}", "No learning tracks found.".yellow());
            }
            OutputFormat::Text => {
                for entry in &entries {
                    let marker = entry.featured.marker().yellow();
                    println!(
                        "{}/{}{}  {} ({} guides)",
                        entry.product,
                        entry.name.green(),
                        marker,
                        entry.title,
                        entry.guides
                    );
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_featured_from_flag() {
        assert_eq!(Featured::from(None), Featured::Never);
        assert_eq!(Featured::from(Some(&FeaturedFlag::Literal(false))), Featured::Never);
        assert_eq!(Featured::from(Some(&FeaturedFlag::Literal(true))), Featured::Always);
        assert_eq!(
            Featured::from(Some(&FeaturedFlag::Templated("{% if ghes %}true{% endif %}".to_string()))),
            Featured::Conditional
        );
        assert_eq!(serde_json::to_value(Featured::Conditional).unwrap(), "conditional");
    }
}
