//! Site configuration (`doctracks.toml`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::core::{Result, TracksError};
use crate::version::{Plan, VersionRegistry};

/// File name looked up in the site root.
pub const CONFIG_FILE: &str = "doctracks.toml";

fn default_language() -> String {
    "en".to_string()
}

fn default_version() -> String {
    "free-pro-team@latest".to_string()
}

fn default_plans() -> Vec<PlanConfig> {
    vec![
        PlanConfig {
            name: "free-pro-team".to_string(),
            short_name: "fpt".to_string(),
            releases: vec!["latest".to_string()],
        },
        PlanConfig {
            name: "enterprise-cloud".to_string(),
            short_name: "ghec".to_string(),
            releases: vec!["latest".to_string()],
        },
    ]
}

/// One `[[plans]]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Full plan name, e.g. `enterprise-server`
    pub name: String,
    /// Short name used in content, e.g. `ghes`
    pub short_name: String,
    /// Releases, newest first
    pub releases: Vec<String>,
}

/// Site-wide settings.
///
/// Every field has a default, so an absent file describes a single-language
/// site with the `fpt` and `ghec` plans.
///
/// ```toml
/// default_language = "en"
/// languages = ["en", "ja"]
/// default_version = "free-pro-team@latest"
/// strict_links = false
///
/// [[plans]]
/// name = "free-pro-team"
/// short_name = "fpt"
/// releases = ["latest"]
///
/// [[plans]]
/// name = "enterprise-server"
/// short_name = "ghes"
/// releases = ["3.10", "3.9"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Language served from the site root
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Every language the site is published in; the default language is implied
    #[serde(default)]
    pub languages: Vec<String>,

    /// Version served without a version segment in hrefs
    #[serde(default = "default_version")]
    pub default_version: String,

    /// Product plans and their releases
    #[serde(default = "default_plans")]
    pub plans: Vec<PlanConfig>,

    /// Treat guide references to missing pages as errors
    #[serde(default)]
    pub strict_links: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            languages: Vec::new(),
            default_version: default_version(),
            plans: default_plans(),
            strict_links: false,
        }
    }
}

impl SiteConfig {
    /// Path of the configuration file for a site root.
    pub fn default_path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE)
    }

    /// Load the configuration for `root`.
    ///
    /// An explicit `path` must exist. Without one, `<root>/doctracks.toml` is
    /// used when present and defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`TracksError::SiteConfigError`] when the file cannot be read,
    /// parsed, or fails [`validate`](Self::validate).
    pub async fn load(root: &Path, path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load_from(path).await?,
            None => {
                let path = Self::default_path(root);
                if fs::try_exists(&path).await.unwrap_or(false) {
                    Self::load_from(&path).await?
                } else {
                    tracing::debug!("no {} in {}, using defaults", CONFIG_FILE, root.display());
                    Self::default()
                }
            }
        };

        config.validate().map_err(|reason| TracksError::SiteConfigError {
            path: path.map_or_else(|| Self::default_path(root), Path::to_path_buf).display().to_string(),
            reason,
        })?;
        Ok(config)
    }

    /// Load configuration from a specific file without validating it.
    ///
    /// # Errors
    ///
    /// Returns [`TracksError::SiteConfigError`] when the file cannot be read or parsed.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let config_error = |reason: String| TracksError::SiteConfigError {
            path: path.display().to_string(),
            reason,
        };

        let content = fs::read_to_string(path).await.map_err(|e| config_error(e.to_string()))?;
        toml::from_str(&content).map_err(|e| config_error(e.to_string()))
    }

    /// Every language, default first.
    pub fn all_languages(&self) -> Vec<String> {
        let mut languages = vec![self.default_language.clone()];
        for language in &self.languages {
            if !languages.contains(language) {
                languages.push(language.clone());
            }
        }
        languages
    }

    /// Whether `language` is published.
    pub fn has_language(&self, language: &str) -> bool {
        language == self.default_language || self.languages.iter().any(|l| l == language)
    }

    /// Check the configuration for problems the types cannot express.
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.default_language.trim().is_empty() {
            return Err("default_language must not be empty".to_string());
        }
        if let Some(bad) = self.all_languages().iter().find(|l| l.contains('/') || l.contains('.')) {
            return Err(format!("language '{bad}' must not contain '/' or '.'"));
        }
        if self.plans.is_empty() {
            return Err("at least one plan is required".to_string());
        }
        self.version_registry().map(|_| ()).map_err(|e| e.to_string())
    }

    /// Build the version registry described by `plans` and `default_version`.
    ///
    /// # Errors
    ///
    /// Returns [`TracksError::Configuration`] when the plans are inconsistent.
    pub fn version_registry(&self) -> Result<VersionRegistry> {
        let plans = self
            .plans
            .iter()
            .map(|p| Plan::new(&p.name, &p.short_name, p.releases.iter().cloned()))
            .collect();
        VersionRegistry::new(plans, &self.default_version)
    }
}
