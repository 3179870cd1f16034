//! Learning-track resolution.
//!
//! A product landing page lists raw track names in its frontmatter. The names
//! may contain templating conditionals, so the set of tracks shown differs per
//! version and language:
//!
//! ```yaml
//! learningTracks:
//!   - getting_started
//!   - '{% if ghes %}self_hosted{% endif %}'
//! ```
//!
//! [`TrackResolver::resolve`] turns that list into [`ProcessedTracks`] for one
//! [`RenderContext`]. For each name, in order:
//!
//! 1. Render the name; an empty or blank result skips it.
//! 2. Reject a `.` in the product or the rendered name.
//! 3. Look up the track data, language first, default language second.
//! 4. Skip the track if its `versions` exclude the current version.
//! 5. Render title and description and resolve the guide links.
//! 6. A featured track becomes `featured_track`; any other track is listed
//!    when it has at least one guide.
//!
//! The resolver holds no state between calls. Collaborators are borrowed, so a
//! single set of caches can serve many concurrent resolutions.


use strsim::levenshtein;

use crate::content::{LinkResolver, TrackSource};
use crate::core::{Result, TracksError};
use crate::models::{FeaturedFlag, LearningTrack, ProcessedTracks, RenderContext, TrackData, TrackKey};
use crate::templating::{ContentRenderer, RenderOptions};
use crate::version::VersionResolver;

/// Maximum Levenshtein distance for "did you mean" suggestions.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Options used for every field the resolver renders.
fn render_options() -> RenderOptions {
    RenderOptions::text().encoded()
}

/// Resolves raw track names against borrowed collaborators.
pub struct TrackResolver<'a, R, V, L, S> {
    renderer: &'a R,
    versions: &'a V,
    links: &'a L,
    source: &'a S,
}

impl<'a, R, V, L, S> TrackResolver<'a, R, V, L, S>
where
    R: ContentRenderer + Sync,
    V: VersionResolver + Sync,
    L: LinkResolver + Sync,
    S: TrackSource + Sync,
{
    /// Create a resolver from its four collaborators.
    pub fn new(renderer: &'a R, versions: &'a V, links: &'a L, source: &'a S) -> Self {
        Self {
            renderer,
            versions,
            links,
            source,
        }
    }

    /// Resolve `raw_names` for `context`.
    ///
    /// # Errors
    ///
    /// - [`TracksError::Configuration`] when the product is empty, or the product
    ///   or a rendered name contains `.`
    /// - [`TracksError::Lookup`] when a rendered name has no track data
    /// - any error raised by a collaborator
    ///
    /// No partial result is returned on error.
    pub async fn resolve(
        &self,
        raw_names: &[String],
        context: &RenderContext,
    ) -> Result<ProcessedTracks> {
        if context.current_product.is_empty() {
            return Err(TracksError::configuration("Missing context.currentProduct value."));
        }

        let mut processed = ProcessedTracks::default();

        for raw_name in raw_names {
            let rendered = self.renderer.render(raw_name, context, render_options()).await?;
            let name = rendered.trim();
            if name.is_empty() {
                tracing::trace!(raw_name = %raw_name, "track name rendered empty; skipping");
                continue;
            }

            let key = Self::track_key(context, name.to_string())?;
            let track = self.lookup(&key, &context.current_language)?;

            if !self.applies(&track, context)? {
                tracing::trace!(%key, version = %context.current_version, "track not in version");
                continue;
            }

            let learning_track = self.build(&key, &track, context).await?;

            if self.is_featured(&track, context).await? {
                if let Some(previous) = &processed.featured_track {
                    tracing::warn!(
                        "tracks '{}' and '{}' are both featured for {}; using '{}'",
                        previous.track_name,
                        learning_track.track_name,
                        context.current_version,
                        learning_track.track_name
                    );
                }
                processed.featured_track = Some(learning_track);
            } else if !learning_track.guides.is_empty() {
                processed.learning_tracks.push(learning_track);
            }
        }

        Ok(processed)
    }

    fn track_key(context: &RenderContext, name: String) -> Result<TrackKey> {
        if context.current_product.contains('.') {
            return Err(TracksError::configuration(format!(
                "currentProduct can not contain a . ({})",
                context.current_product
            )));
        }
        if name.contains('.') {
            return Err(TracksError::configuration(format!(
                "renderedTrackName can not contain a . ({name})"
            )));
        }
        Ok(TrackKey::new(context.current_product.as_str(), name))
    }

    fn lookup(&self, key: &TrackKey, language: &str) -> Result<TrackData> {
        if let Some(track) = self.source.track(key, language)? {
            return Ok(track);
        }

        // suggestions are best effort; a failed listing still reports the lookup
        let known = self.source.track_names(&key.product).unwrap_or_default();
        Err(TracksError::Lookup {
            product: key.product.clone(),
            track: key.track.clone(),
            suggestions: suggest(&key.track, &known),
        })
    }

    fn applies(&self, track: &TrackData, context: &RenderContext) -> Result<bool> {
        match &track.versions {
            None => Ok(true),
            Some(spec) => {
                Ok(self.versions.applicable_versions(spec)?.contains(&context.current_version))
            }
        }
    }

    async fn build(
        &self,
        key: &TrackKey,
        track: &TrackData,
        context: &RenderContext,
    ) -> Result<LearningTrack> {
        let title = self.renderer.render(&track.title, context, render_options()).await?;
        let description =
            self.renderer.render(&track.description, context, render_options()).await?;
        let guides = self.links.link_data(&track.guides, context).await?;

        Ok(LearningTrack {
            track_name: key.track.clone(),
            track_product: Some(key.product.clone()),
            title,
            description,
            guides,
        })
    }

    async fn is_featured(&self, track: &TrackData, context: &RenderContext) -> Result<bool> {
        match &track.featured_track {
            None => Ok(false),
            Some(FeaturedFlag::Literal(featured)) => Ok(*featured),
            Some(FeaturedFlag::Templated(template)) => {
                let rendered = self.renderer.render(template, context, render_options()).await?;
                Ok(rendered == "true")
            }
        }
    }
}

/// Known names within a small edit distance of `name`, closest first.
fn suggest(name: &str, known: &[String]) -> Vec<String> {
    let mut scored: Vec<_> = known
        .iter()
        .map(|candidate| (levenshtein(name, candidate), candidate))
        .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
        .collect();
    scored.sort();
    scored.into_iter().take(3).map(|(_, candidate)| candidate.clone()).collect()
}
