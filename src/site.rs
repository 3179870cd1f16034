//! A documentation site on disk, wired to the track resolver.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::SiteConfig;
use crate::content::{GuideIndex, TrackStore};
use crate::core::{Result, TracksError};
use crate::models::RenderContext;
use crate::templating::TemplateRenderer;
use crate::tracks::TrackResolver;
use crate::version::VersionRegistry;

/// Resolver type used by [`Site`].
pub type SiteResolver<'a> = TrackResolver<
    'a,
    TemplateRenderer,
    VersionRegistry,
    GuideIndex<TemplateRenderer>,
    TrackStore,
>;

/// Configuration plus the file-backed collaborators for one site root.
///
/// The stores cache parsed files, so one `Site` should serve every resolution
/// of a run.
pub struct Site {
    root: PathBuf,
    config: SiteConfig,
    versions: Arc<VersionRegistry>,
    renderer: Arc<TemplateRenderer>,
    tracks: TrackStore,
    guides: GuideIndex<TemplateRenderer>,
}

impl Site {
    /// Load the site at `root`.
    ///
    /// `config_path` overrides `<root>/doctracks.toml`; `strict_links`
    /// overrides the configured value when set.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration cannot be loaded.
    pub async fn load(
        root: impl Into<PathBuf>,
        config_path: Option<&Path>,
        strict_links: Option<bool>,
    ) -> Result<Self> {
        let root = root.into();
        let mut config = SiteConfig::load(&root, config_path).await?;
        if let Some(strict) = strict_links {
            config.strict_links = strict;
        }
        Self::from_config(root, config)
    }

    /// Build a site from an already loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TracksError::Configuration`] when the plans are inconsistent.
    pub fn from_config(root: PathBuf, config: SiteConfig) -> Result<Self> {
        let versions = Arc::new(config.version_registry()?);
        let renderer = Arc::new(TemplateRenderer::new(Arc::clone(&versions)));
        let tracks = TrackStore::new(&root, &config.default_language);
        let guides = GuideIndex::new(
            &root,
            &config.default_language,
            Arc::clone(&versions),
            Arc::clone(&renderer),
        )
        .with_languages(config.all_languages())
        .strict(config.strict_links);

        tracing::debug!(
            root = %root.display(),
            versions = versions.all_versions().len(),
            languages = config.all_languages().len(),
            "site loaded"
        );

        Ok(Self {
            root,
            config,
            versions,
            renderer,
            tracks,
            guides,
        })
    }

    /// Site root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Effective configuration.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Version registry built from the configuration.
    pub fn versions(&self) -> &VersionRegistry {
        &self.versions
    }

    /// Track data store.
    pub fn tracks(&self) -> &TrackStore {
        &self.tracks
    }

    /// Guide page index.
    pub fn guides(&self) -> &GuideIndex<TemplateRenderer> {
        &self.guides
    }

    /// A resolver borrowing this site's collaborators.
    pub fn resolver(&self) -> SiteResolver<'_> {
        TrackResolver::new(self.renderer.as_ref(), self.versions.as_ref(), &self.guides, &self.tracks)
    }

    /// Build a context after checking the version and language are published.
    ///
    /// # Errors
    ///
    /// Returns [`TracksError::UnknownVersion`] or [`TracksError::Configuration`].
    pub fn context(&self, product: &str, version: &str, language: Option<&str>) -> Result<RenderContext> {
        self.versions.require(version)?;
        let language = language.unwrap_or(&self.config.default_language);
        if !self.config.has_language(language) {
            return Err(TracksError::configuration(format!(
                "language '{language}' is not configured for this site"
            )));
        }
        Ok(RenderContext::new(product, version, language))
    }
}
