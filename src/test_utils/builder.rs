//! Site fixture builder for tests
//!
//! Writes a throwaway site root (configuration, track data, guide pages) into a
//! temporary directory.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::{CONFIG_FILE, SiteConfig};
use crate::content::tracks::TRACKS_DIR;
use crate::site::Site;

/// A builder for creating site fixtures with a fluent API
pub struct SiteFixtureBuilder {
    temp_dir: TempDir,
    config: Option<SiteConfig>,
    files: Vec<(String, String)>,
}

impl SiteFixtureBuilder {
    /// Create a new, empty site builder
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
            config: None,
            files: Vec::new(),
        })
    }

    /// Write `doctracks.toml` from `config`
    pub fn with_config(mut self, config: SiteConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Add the default-language track data file of `product`
    pub fn with_tracks(self, product: &str, yaml: &str) -> Self {
        self.with_file(format!("{TRACKS_DIR}/{product}.yml"), yaml)
    }

    /// Add a translated track data file
    pub fn with_translated_tracks(self, language: &str, product: &str, yaml: &str) -> Self {
        self.with_file(format!("translations/{language}/{TRACKS_DIR}/{product}.yml"), yaml)
    }

    /// Add a guide page at `content/<path>.md` with the given frontmatter
    pub fn with_page(self, path: &str, frontmatter: &str) -> Self {
        self.with_file(format!("content/{path}.md"), page(frontmatter))
    }

    /// Add a translated guide page
    pub fn with_translated_page(self, language: &str, path: &str, frontmatter: &str) -> Self {
        self.with_file(format!("translations/{language}/content/{path}.md"), page(frontmatter))
    }

    /// Add an arbitrary file relative to the site root
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.push((path.into(), content.into()));
        self
    }

    /// Write everything to disk
    pub fn build(self) -> Result<SiteFixture> {
        let root = self.temp_dir.path().to_path_buf();

        if let Some(config) = &self.config {
            std::fs::write(root.join(CONFIG_FILE), toml::to_string_pretty(config)?)?;
        }

        for (path, content) in &self.files {
            let full_path = root.join(path);
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(full_path, content)?;
        }

        Ok(SiteFixture {
            _temp_dir: self.temp_dir,
            root,
        })
    }
}

fn page(frontmatter: &str) -> String {
    format!("---\n{}\n---\n\nPage body.\n", frontmatter.trim_end())
}

/// A site written to a temporary directory
pub struct SiteFixture {
    _temp_dir: TempDir, // Keep temp dir alive
    root: PathBuf,
}

impl SiteFixture {
    /// Create a new site builder
    pub fn builder() -> Result<SiteFixtureBuilder> {
        SiteFixtureBuilder::new()
    }

    /// Site root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the site with its on-disk configuration
    pub async fn site(&self) -> Result<Site> {
        Ok(Site::load(&self.root, None, None).await?)
    }
}
