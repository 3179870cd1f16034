//! Validate track data across every version and language.
//!
//! Each track is resolved on its own, with strict links, for every
//! (version, language) pair. Reported:
//!
//! - errors: unrenderable fields, bad `versions` values, missing guide pages
//! - warnings: tracks that never show a guide, and several tracks featured for
//!   the same version and language
//!
//! The command fails when any error is found.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::content::TrackSource;
use crate::models::RenderContext;
use crate::site::Site;

/// Arguments of `doctracks check`.
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// Only check this product
    #[arg(long)]
    product: Option<String>,
}

#[derive(Debug, Default)]
struct Report {
    errors: Vec<String>,
    warnings: Vec<String>,
    checked: usize,
}

impl CheckCommand {
    /// Run the command against the site at `root`.
    pub async fn execute(self, root: &Path, config_path: Option<&Path>) -> Result<()> {
        let site = Site::load(root, config_path, Some(true)).await?;
        let products = match self.product {
            Some(product) => vec![product],
            None => site.tracks().products()?,
        };

        let mut report = Report::default();
        for product in &products {
            check_product(&site, product, &mut report).await?;
        }

        for warning in &report.warnings {
            println!("{} {warning}", "warning:".yellow().bold());
        }
        for error in &report.errors {
            println!("{} {error}", "error:".red().bold());
        }

        if !report.errors.is_empty() {
            bail!(
                "{} error(s) in {} track(s) checked",
                report.errors.len(),
                report.checked
            );
        }

        println!(
            "{} {} track(s) in {} product(s), {} warning(s)",
            "✓".green(),
            report.checked,
            products.len(),
            report.warnings.len()
        );
        Ok(())
    }
}

async fn check_product(site: &Site, product: &str, report: &mut Report) -> Result<()> {
    let names = site.tracks().track_names(product)?;
    if names.is_empty() {
        report.warnings.push(format!("{product}: no learning tracks defined"));
        return Ok(());
    }

    let resolver = site.resolver();
    let versions = site.versions().all_versions();
    let languages = site.config().all_languages();

    // tracks that showed at least one guide somewhere
    let mut with_guides: BTreeMap<&str, bool> = names.iter().map(|n| (n.as_str(), false)).collect();

    for version in &versions {
        for language in &languages {
            let context = RenderContext::new(product, version.as_str(), language.as_str());
            let mut featured = Vec::new();

            for name in &names {
                match resolver.resolve(std::slice::from_ref(name), &context).await {
                    Ok(processed) => {
                        if processed.featured_track.is_some() {
                            featured.push(name.as_str());
                        }
                        if processed.iter().any(|track| !track.guides.is_empty()) {
                            with_guides.insert(name.as_str(), true);
                        }
                    }
                    Err(e) => {
                        report.errors.push(format!("{product}/{name} ({version}, {language}): {e}"));
                    }
                }
            }

            if featured.len() > 1 {
                report.warnings.push(format!(
                    "{product} ({version}, {language}): {} tracks are featured ({}); only one is shown",
                    featured.len(),
                    featured.join(", ")
                ));
            }
        }
    }

    for (name, has_guides) in with_guides {
        if !has_guides {
            report.warnings.push(format!("{product}/{name}: no guides in any version"));
        }
    }
    report.checked += names.len();
    tracing::debug!(product, tracks = names.len(), "checked product");
    Ok(())
}
