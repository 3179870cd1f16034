//! Shared data models for learning-track resolution
//!
//! This module provides the data structures that flow between the resolver,
//! its collaborators, and the CLI:
//!
//! - [`RenderContext`] - product, version, and language a page is rendered for
//! - [`TrackKey`] - explicit two-part lookup key for track data
//! - [`TrackData`] - a track as written in `data/learning-tracks/<product>.yml`
//! - [`FeaturedFlag`] - boolean or templated `featured_track` value
//! - [`LearningTrack`] / [`ProcessedTracks`] - resolver output
//! - [`GuideLink`] - a resolved guide reference

use serde::{Deserialize, Serialize};

use crate::version::VersionSpec;

/// The combination of product, version, and language a page is rendered for.
///
/// Immutable for the duration of one resolution call. An empty
/// `current_product` is treated as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderContext {
    /// Product namespace, e.g. `actions`. Must not contain `.`.
    pub current_product: String,
    /// Version identifier, e.g. `free-pro-team@latest`.
    pub current_version: String,
    /// Language code, e.g. `en`.
    pub current_language: String,
}

impl RenderContext {
    /// Create a context from its three parts.
    pub fn new(
        product: impl Into<String>,
        version: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            current_product: product.into(),
            current_version: version.into(),
            current_language: language.into(),
        }
    }
}

/// Lookup key for a single track: product namespace plus track name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackKey {
    /// Product namespace
    pub product: String,
    /// Rendered track name
    pub track: String,
}

impl TrackKey {
    /// Build a key from product and rendered track name.
    pub fn new(product: impl Into<String>, track: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            track: track.into(),
        }
    }
}

impl std::fmt::Display for TrackKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.product, self.track)
    }
}

/// The `featured_track` value of a track.
///
/// Written either as a YAML boolean or as a template whose rendered text is
/// compared against the literal `"true"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeaturedFlag {
    /// `featured_track: true`
    Literal(bool),
    /// `featured_track: '{% if plan == "fpt" %}true{% endif %}'`
    Templated(String),
}

/// Structured track data as stored in the learning-track data files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackData {
    /// Renderable title
    pub title: String,
    /// Renderable description
    #[serde(default)]
    pub description: String,
    /// Guide references in display order
    #[serde(default)]
    pub guides: Vec<String>,
    /// Version applicability; absent means every version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versions: Option<VersionSpec>,
    /// Featured marker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_track: Option<FeaturedFlag>,
}

/// A guide reference resolved to a page that exists in the current version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideLink {
    /// Localized, versioned href
    pub href: String,
    /// Rendered page title
    pub title: String,
    /// Rendered page intro, if the page has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
}

/// A track resolved for one rendering context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningTrack {
    /// Rendered track name
    pub track_name: String,
    /// Product the track belongs to
    pub track_product: Option<String>,
    /// Rendered title
    pub title: String,
    /// Rendered description
    pub description: String,
    /// Guides available in the current version, possibly empty
    pub guides: Vec<GuideLink>,
}

/// Result of one resolver call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedTracks {
    /// The featured track, if any track evaluated as featured
    pub featured_track: Option<LearningTrack>,
    /// Remaining tracks with at least one guide, in input order
    pub learning_tracks: Vec<LearningTrack>,
}

impl ProcessedTracks {
    /// Whether neither output holds a track.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.featured_track.is_none() && self.learning_tracks.is_empty()
    }

    /// Iterate over every resolved track, featured first.
    pub fn iter(&self) -> impl Iterator<Item = &LearningTrack> {
        self.featured_track.iter().chain(self.learning_tracks.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_featured_flag_deserializes_both_forms() {
        let literal: FeaturedFlag = serde_yaml::from_str("true").unwrap();
        assert_eq!(literal, FeaturedFlag::Literal(true));

        let templated: FeaturedFlag =
            serde_yaml::from_str("'{% if plan == \"fpt\" %}true{% endif %}'").unwrap();
        assert!(matches!(templated, FeaturedFlag::Templated(ref s) if s.contains("plan")));
    }

    #[test]
    fn test_track_data_minimal() {
        let yaml = "title: Intro\nguides:\n  - /actions/learn/intro\n";
        let track: TrackData = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(track.title, "Intro");
        assert!(track.description.is_empty());
        assert_eq!(track.guides, vec!["/actions/learn/intro"]);
        assert!(track.versions.is_none());
        assert!(track.featured_track.is_none());
    }

    #[test]
    fn test_processed_tracks_serializes_camel_case() {
        let tracks = ProcessedTracks {
            featured_track: None,
            learning_tracks: vec![LearningTrack {
                track_name: "advanced".to_string(),
                track_product: Some("actions".to_string()),
                title: "Advanced".to_string(),
                description: String::new(),
                guides: vec![],
            }],
        };

        let json = serde_json::to_value(&tracks).unwrap();
        assert!(json["featuredTrack"].is_null());
        assert_eq!(json["learningTracks"][0]["trackName"], "advanced");
        assert_eq!(json["learningTracks"][0]["trackProduct"], "actions");
    }

    #[test]
    fn test_track_key_display() {
        assert_eq!(TrackKey::new("actions", "intro").to_string(), "actions/intro");
    }
}
