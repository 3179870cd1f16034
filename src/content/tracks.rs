//! Learning-track data files.
//!
//! Each product keeps its tracks in one YAML file, keyed by track name:
//!
//! ```yaml
//! # data/learning-tracks/actions.yml
//! getting_started:
//!   title: Get started with Actions
//!   description: Learn the basics.
//!   featured_track: true
//!   guides:
//!     - /actions/learn/understanding-actions
//!     - /actions/learn/quickstart
//! self_hosted:
//!   title: Self-hosted runners
//!   versions: 'ghes or ghec'
//!   guides:
//!     - /actions/hosting/about-self-hosted-runners
//! ```
//!
//! Translations live under `translations/<language>/data/learning-tracks/`.
//! A track missing from a translation falls back to the default language.

use dashmap::DashMap;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use crate::core::{Result, TracksError};
use crate::models::{TrackData, TrackKey};

/// Directory holding track data files, relative to a language root.
pub const TRACKS_DIR: &str = "data/learning-tracks";

type ProductTracks = Arc<BTreeMap<String, TrackData>>;

/// Language-aware lookup of track data.
pub trait TrackSource {
    /// Find the track for `key`, preferring `language` and falling back to the
    /// default language. `Ok(None)` means no such track exists.
    ///
    /// # Errors
    ///
    /// Returns an error when a default-language data file cannot be read or parsed.
    fn track(&self, key: &TrackKey, language: &str) -> Result<Option<TrackData>>;

    /// Names of every track defined for `product`, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error when the data file cannot be read or parsed.
    fn track_names(&self, product: &str) -> Result<Vec<String>>;
}

/// File-backed [`TrackSource`] with a per-(language, product) cache.
#[derive(Debug)]
pub struct TrackStore {
    root: PathBuf,
    default_language: String,
    cache: DashMap<(String, String), Option<ProductTracks>>,
}

impl TrackStore {
    /// Create a store for the site rooted at `root`.
    pub fn new(root: impl Into<PathBuf>, default_language: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            default_language: default_language.into(),
            cache: DashMap::new(),
        }
    }

    /// Path of the data file for `product` in `language`.
    pub fn data_file(&self, language: &str, product: &str) -> PathBuf {
        self.language_root(language).join(TRACKS_DIR).join(format!("{product}.yml"))
    }

    fn language_root(&self, language: &str) -> PathBuf {
        if language == self.default_language {
            self.root.clone()
        } else {
            self.root.join("translations").join(language)
        }
    }

    /// Products that have a default-language data file, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error when the data directory exists but cannot be walked.
    pub fn products(&self) -> Result<Vec<String>> {
        let dir = self.language_root(&self.default_language).join(TRACKS_DIR);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut products = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| TracksError::DataFile {
                path: dir.display().to_string(),
                reason: e.to_string(),
            })?;
            let path = entry.path();
            if entry.file_type().is_file()
                && path.extension().is_some_and(|ext| ext == "yml")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                products.push(stem.to_string());
            }
        }
        products.sort();
        Ok(products)
    }

    /// Load (or fetch from cache) the tracks of `product` in `language`.
    fn load(&self, language: &str, product: &str) -> Result<Option<ProductTracks>> {
        let key = (language.to_string(), product.to_string());
        if let Some(cached) = self.cache.get(&key).map(|entry| entry.value().clone()) {
            return Ok(cached);
        }

        let path = self.data_file(language, product);
        let loaded = match read_tracks(&path) {
            Ok(tracks) => tracks.map(Arc::new),
            Err(e) if language != self.default_language => {
                tracing::warn!(
                    "ignoring unreadable translation {}: {e}; using {} data",
                    path.display(),
                    self.default_language
                );
                None
            }
            Err(e) => return Err(e),
        };

        tracing::debug!(
            language,
            product,
            tracks = loaded.as_ref().map_or(0, |t| t.len()),
            "loaded learning tracks"
        );
        self.cache.insert(key, loaded.clone());
        Ok(loaded)
    }
}

impl TrackSource for TrackStore {
    fn track(&self, key: &TrackKey, language: &str) -> Result<Option<TrackData>> {
        if language != self.default_language {
            let localized = self.load(language, &key.product)?;
            if let Some(track) = localized.as_ref().and_then(|tracks| tracks.get(&key.track)) {
                return Ok(Some(track.clone()));
            }
            tracing::trace!(%key, language, "falling back to default language");
        }

        let tracks = self.load(&self.default_language, &key.product)?;
        Ok(tracks.and_then(|tracks| tracks.get(&key.track).cloned()))
    }

    fn track_names(&self, product: &str) -> Result<Vec<String>> {
        let tracks = self.load(&self.default_language, product)?;
        // BTreeMap keys are already sorted
        Ok(tracks.map(|t| t.keys().cloned().collect()).unwrap_or_default())
    }
}

fn read_tracks(path: &Path) -> Result<Option<BTreeMap<String, TrackData>>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    if content.trim().is_empty() {
        return Ok(Some(BTreeMap::new()));
    }

    serde_yaml::from_str(&content).map(Some).map_err(|e| TracksError::DataFile {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
