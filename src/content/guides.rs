//! Guide pages and link resolution.
//!
//! A guide reference in a track is a site path such as
//! `/actions/learn/quickstart`. It resolves to the Markdown page at
//! `content/actions/learn/quickstart.md` (or `.../quickstart/index.md`),
//! preferring the translation under `translations/<language>/content/`.
//!
//! Only the page frontmatter is read:
//!
//! ```yaml
//! ---
//! title: Quickstart for Actions
//! intro: 'Try out the features of {% if ghes %}your server{% else %}GitHub{% endif %}.'
//! versions:
//!   fpt: '*'
//!   ghes: '>=3.9'
//! learningTracks:
//!   - getting_started
//! ---
//! ```

use dashmap::DashMap;
use futures::future::try_join_all;
use gray_matter::Matter;
use gray_matter::engine::YAML;
use serde::Deserialize;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use crate::core::{Result, TracksError};
use crate::models::{GuideLink, RenderContext};
use crate::templating::{ContentRenderer, RenderOptions};
use crate::version::{VersionRegistry, VersionResolver, VersionSpec};

/// Resolves guide references to links for a page context.
pub trait LinkResolver {
    /// Resolve `guides` in order, dropping guides that are not available in
    /// `context.current_version`.
    ///
    /// # Errors
    ///
    /// Returns an error when a page cannot be parsed or rendered.
    fn link_data(
        &self,
        guides: &[String],
        context: &RenderContext,
    ) -> impl Future<Output = Result<Vec<GuideLink>>> + Send;
}

/// Frontmatter of a guide page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFrontmatter {
    /// Page title; required for guide pages, optional on landing pages
    #[serde(default)]
    pub title: String,
    /// Short title used in navigation; links always use `title`
    #[serde(default)]
    pub short_title: Option<String>,
    /// Intro paragraph
    #[serde(default)]
    pub intro: Option<String>,
    /// Versions the page is published for; absent means every version
    #[serde(default)]
    pub versions: Option<VersionSpec>,
    /// Raw learning-track names listed by a product landing page
    #[serde(default)]
    pub learning_tracks: Vec<String>,
}

/// Parse the frontmatter of a page.
///
/// A page without frontmatter yields [`PageFrontmatter::default`].
///
/// # Errors
///
/// Returns [`TracksError::DataFile`] when the frontmatter is not valid YAML or
/// does not match [`PageFrontmatter`].
pub fn parse_page(content: &str, path: &str) -> Result<PageFrontmatter> {
    let invalid = |reason: String| TracksError::DataFile {
        path: path.to_string(),
        reason,
    };

    let matter = Matter::<YAML>::new();
    let parsed = matter
        .parse::<serde_yaml::Value>(content)
        .map_err(|e| invalid(e.to_string()))?;

    match parsed.data {
        Some(data) => serde_yaml::from_value(data).map_err(|e| invalid(e.to_string())),
        None => Ok(PageFrontmatter::default()),
    }
}

/// File-backed [`LinkResolver`].
///
/// Parsed pages are cached per (language, path) for the life of the index.
pub struct GuideIndex<R> {
    root: PathBuf,
    default_language: String,
    languages: Vec<String>,
    versions: Arc<VersionRegistry>,
    renderer: Arc<R>,
    strict: bool,
    pages: DashMap<(String, String), Option<Arc<PageFrontmatter>>>,
}

impl<R> GuideIndex<R>
where
    R: ContentRenderer + Send + Sync,
{
    /// Create an index for the site rooted at `root`.
    pub fn new(
        root: impl Into<PathBuf>,
        default_language: impl Into<String>,
        versions: Arc<VersionRegistry>,
        renderer: Arc<R>,
    ) -> Self {
        let default_language = default_language.into();
        Self {
            root: root.into(),
            languages: vec![default_language.clone()],
            default_language,
            versions,
            renderer,
            strict: false,
            pages: DashMap::new(),
        }
    }

    /// Languages whose prefix is stripped from guide references.
    #[must_use]
    pub fn with_languages(mut self, languages: impl IntoIterator<Item = String>) -> Self {
        for language in languages {
            if !self.languages.contains(&language) {
                self.languages.push(language);
            }
        }
        self
    }

    /// Fail with [`TracksError::PageNotFound`] instead of dropping missing pages.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Reduce a guide reference to a content path.
    ///
    /// `/ja/enterprise-server@3.9/actions/learn/` becomes `actions/learn`.
    /// Returns `None` for references with `.` or `..` segments or backslashes,
    /// which could point outside the content directory.
    pub fn normalize_ref(&self, guide: &str) -> Option<String> {
        let mut segments: Vec<&str> = guide.trim().split('/').filter(|s| !s.is_empty()).collect();
        if segments.iter().any(|s| *s == "." || *s == ".." || s.contains('\\')) {
            return None;
        }
        if segments.first().is_some_and(|s| self.languages.iter().any(|l| l == s)) {
            segments.remove(0);
        }
        if segments.first().is_some_and(|s| s.contains('@')) {
            segments.remove(0);
        }
        Some(segments.join("/"))
    }

    /// Href for `path` in the context's language and version.
    pub fn href(&self, path: &str, context: &RenderContext) -> String {
        if self.versions.is_default(&context.current_version) {
            format!("/{}/{}", context.current_language, path)
        } else {
            format!("/{}/{}/{}", context.current_language, context.current_version, path)
        }
    }

    fn candidates(&self, path: &str, language: &str) -> Vec<PathBuf> {
        let mut languages = vec![language];
        if language != self.default_language {
            languages.push(&self.default_language);
        }

        languages
            .into_iter()
            .flat_map(|language| {
                let content = if language == self.default_language {
                    self.root.join("content")
                } else {
                    self.root.join("translations").join(language).join("content")
                };
                [content.join(format!("{path}.md")), content.join(path).join("index.md")]
            })
            .collect()
    }

    /// Load the frontmatter of the page at `path`, localized when possible.
    ///
    /// # Errors
    ///
    /// Returns an error when a default-language page exists but cannot be parsed.
    pub async fn page(&self, path: &str, language: &str) -> Result<Option<Arc<PageFrontmatter>>> {
        let key = (language.to_string(), path.to_string());
        if let Some(cached) = self.pages.get(&key).map(|entry| entry.value().clone()) {
            return Ok(cached);
        }

        let mut found = None;
        for candidate in self.candidates(path, language) {
            let content = match tokio::fs::read_to_string(&candidate).await {
                Ok(content) => content,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };

            let localized = !candidate.starts_with(self.root.join("content"));
            match parse_page(&content, &candidate.display().to_string()) {
                Ok(page) => {
                    found = Some(Arc::new(page));
                    break;
                }
                Err(e) if localized => {
                    tracing::warn!("ignoring unreadable translation: {e}");
                }
                Err(e) => return Err(e),
            }
        }

        self.pages.insert(key, found.clone());
        Ok(found)
    }

    async fn resolve_guide(&self, guide: &str, context: &RenderContext) -> Result<Option<GuideLink>> {
        let page = match self.normalize_ref(guide) {
            Some(path) => self.page(&path, &context.current_language).await?.map(|page| (path, page)),
            None => None,
        };
        let Some((path, page)) = page else {
            if self.strict {
                return Err(TracksError::PageNotFound {
                    href: guide.to_string(),
                });
            }
            tracing::warn!("guide {guide} does not match any page; skipping");
            return Ok(None);
        };

        if let Some(spec) = &page.versions
            && !self.versions.applicable_versions(spec)?.contains(&context.current_version)
        {
            tracing::trace!(guide, version = %context.current_version, "guide not in version");
            return Ok(None);
        }

        if page.title.trim().is_empty() {
            if self.strict {
                return Err(TracksError::DataFile {
                    path: format!("content/{path}"),
                    reason: "missing required `title`".to_string(),
                });
            }
            tracing::warn!("guide {guide} has no title; skipping");
            return Ok(None);
        }

        let options = RenderOptions::text();
        let title = self.renderer.render(&page.title, context, options).await?;
        let intro = match &page.intro {
            Some(intro) => Some(self.renderer.render(intro, context, options).await?),
            None => None,
        };

        Ok(Some(GuideLink {
            href: self.href(&path, context),
            title,
            intro: intro.filter(|i| !i.is_empty()),
        }))
    }
}

impl<R> LinkResolver for GuideIndex<R>
where
    R: ContentRenderer + Send + Sync,
{
    async fn link_data(&self, guides: &[String], context: &RenderContext) -> Result<Vec<GuideLink>> {
        let links =
            try_join_all(guides.iter().map(|guide| self.resolve_guide(guide, context))).await?;
        Ok(links.into_iter().flatten().collect())
    }
}
