//! File-backed content collaborators.
//!
//! A site root is laid out as:
//!
//! ```text
//! doctracks.toml
//! data/learning-tracks/<product>.yml          # track data
//! content/<product>/.../<page>.md             # guide pages
//! translations/<language>/data/learning-tracks/<product>.yml
//! translations/<language>/content/...
//! ```
//!
//! - [`tracks`] - [`TrackStore`], the [`TrackSource`] over track data files
//! - [`guides`] - [`GuideIndex`], the [`LinkResolver`] over guide pages

pub mod guides;
pub mod tracks;

pub use guides::{GuideIndex, LinkResolver, PageFrontmatter, parse_page};
pub use tracks::{TrackSource, TrackStore};
