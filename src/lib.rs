//! doctracks - learning-track resolution for versioned documentation sites
//!
//! A documentation site groups guides into *learning tracks*. Tracks are
//! defined per product in YAML data files and listed by name on product landing
//! pages. Names, titles and `featured_track` flags may contain template
//! conditionals, and tracks and guides declare which versions they apply to,
//! so the tracks shown depend on the product, version and language a page is
//! rendered for.
//!
//! # Architecture Overview
//!
//! The core is [`tracks::TrackResolver`], a stateless pipeline over four
//! collaborator traits:
//!
//! | Trait                              | File-backed implementation        |
//! |------------------------------------|-----------------------------------|
//! | [`templating::ContentRenderer`]    | [`templating::TemplateRenderer`]  |
//! | [`version::VersionResolver`]       | [`version::VersionRegistry`]      |
//! | [`content::LinkResolver`]          | [`content::GuideIndex`]           |
//! | [`content::TrackSource`]           | [`content::TrackStore`]           |
//!
//! [`site::Site`] loads [`config::SiteConfig`] and wires the file-backed
//! implementations together; the [`cli`] drives it.
//!
//! # Core Modules
//!
//! - [`tracks`] - The track resolver
//! - [`models`] - Contexts, track data, and resolver output
//! - [`version`] - Plans, version ids, and version specifications
//! - [`templating`] - Tera rendering of content fields
//! - [`content`] - Track data files and guide pages
//! - [`config`] - `doctracks.toml`
//! - [`core`] - Error types and user-facing error formatting
//! - [`site`] - A site root with its collaborators
//! - [`cli`] - The `doctracks` command
//!
//! # Example
//!
//! ```rust,no_run
//! use doctracks::site::Site;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let site = Site::load("./docs", None, None).await?;
//! let context = site.context("actions", "free-pro-team@latest", Some("en"))?;
//!
//! let names = vec!["getting_started".to_string(), "{% if ghes %}self_hosted{% endif %}".to_string()];
//! let processed = site.resolver().resolve(&names, &context).await?;
//!
//! if let Some(featured) = &processed.featured_track {
//!     println!("featured: {}", featured.title);
//! }
//! for track in &processed.learning_tracks {
//!     println!("{} ({} guides)", track.title, track.guides.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod content;
pub mod core;
pub mod models;
pub mod site;
pub mod templating;
pub mod tracks;
pub mod version;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
