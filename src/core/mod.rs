//! Core types for doctracks
//!
//! This module holds the error taxonomy shared by every layer of the crate:
//!
//! - [`TracksError`] - Enumerated error types covering resolution, versioning,
//!   content and site configuration failures
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to user-friendly format
//!
//! Library operations return [`Result`], which defaults its error type to
//! [`TracksError`]. The CLI layer works in [`anyhow::Result`] and converts back with
//! [`user_friendly_error`] right before display.

pub mod error;

pub use error::{ErrorContext, TracksError, user_friendly_error};

/// Result alias used by the library operations.
pub type Result<T, E = TracksError> = std::result::Result<T, E>;
