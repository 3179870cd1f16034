//! Error handling for doctracks
//!
//! This module provides the strongly-typed error enum used by every layer of the
//! crate and the user-friendly reporting used by the CLI.
//!
//! # Architecture
//!
//! - [`TracksError`] - Enumerated error types for all failure cases
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! # Error Categories
//!
//! - **Resolution**: [`TracksError::Configuration`] and [`TracksError::Lookup`] are raised
//!   by the track resolver itself and abort the whole call
//! - **Versioning**: [`TracksError::InvalidVersionSpec`], [`TracksError::UnknownVersion`]
//! - **Content**: [`TracksError::DataFile`], [`TracksError::PageNotFound`],
//!   [`TracksError::Template`]
//! - **Site setup**: [`TracksError::SiteConfigError`], [`TracksError::IoError`]
//!
//! Skipped tracks (empty rendered name, version mismatch) are not errors and never
//! surface here.
//!
//! # Examples
//!
//! ```rust,no_run
//! use doctracks::core::{TracksError, user_friendly_error};
//!
//! let error = TracksError::configuration("Missing context.currentProduct value.");
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for doctracks operations.
///
/// The resolver contract names two failure classes, configuration and lookup.
/// The remaining variants come from the collaborators (version registry, template
/// renderer, content store) and propagate through the resolver unchanged.
#[derive(Error, Debug)]
pub enum TracksError {
    /// Invariant violation in caller-supplied context or content.
    ///
    /// Raised for a missing product, or a `.` in the product or in a rendered
    /// track name.
    #[error("{message}")]
    Configuration {
        /// Description of the violated invariant
        message: String,
    },

    /// The referenced track does not exist in the current or fallback language.
    #[error("No learning track called '{track}' for product '{product}'")]
    Lookup {
        /// Product namespace that was searched
        product: String,
        /// Rendered track name
        track: String,
        /// Similar track names that do exist
        suggestions: Vec<String>,
    },

    /// A `versions` value could not be interpreted.
    #[error("Invalid version specification '{spec}': {reason}")]
    InvalidVersionSpec {
        /// The specification as written
        spec: String,
        /// Why it was rejected
        reason: String,
    },

    /// A version identifier is not known to the version registry.
    #[error("Unknown version '{version}'")]
    UnknownVersion {
        /// The identifier that was requested
        version: String,
    },

    /// Template rendering failed.
    #[error("Template rendering failed: {message}")]
    Template {
        /// Cleaned-up Tera error message
        message: String,
    },

    /// A track data file or guide page could not be parsed.
    #[error("Invalid content file '{path}': {reason}")]
    DataFile {
        /// Path of the offending file
        path: String,
        /// Parse error description
        reason: String,
    },

    /// A guide reference points at a page that does not exist (strict link mode).
    #[error("Guide page not found: {href}")]
    PageNotFound {
        /// The guide reference as written in the track
        href: String,
    },

    /// The site configuration is missing values or inconsistent.
    #[error("Site configuration error in '{path}': {reason}")]
    SiteConfigError {
        /// Path of the configuration file
        path: String,
        /// Description of the problem
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic error for cases not covered by specific variants
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl TracksError {
    /// Shorthand for [`TracksError::Configuration`].
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether this error belongs to the configuration class of the resolver contract.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    /// Whether this error belongs to the lookup class of the resolver contract.
    #[must_use]
    pub const fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup { .. })
    }
}

impl Clone for TracksError {
    fn clone(&self) -> Self {
        match self {
            Self::Configuration {
                message,
            } => Self::Configuration {
                message: message.clone(),
            },
            Self::Lookup {
                product,
                track,
                suggestions,
            } => Self::Lookup {
                product: product.clone(),
                track: track.clone(),
                suggestions: suggestions.clone(),
            },
            Self::InvalidVersionSpec {
                spec,
                reason,
            } => Self::InvalidVersionSpec {
                spec: spec.clone(),
                reason: reason.clone(),
            },
            Self::UnknownVersion {
                version,
            } => Self::UnknownVersion {
                version: version.clone(),
            },
            Self::Template {
                message,
            } => Self::Template {
                message: message.clone(),
            },
            Self::DataFile {
                path,
                reason,
            } => Self::DataFile {
                path: path.clone(),
                reason: reason.clone(),
            },
            Self::PageNotFound {
                href,
            } => Self::PageNotFound {
                href: href.clone(),
            },
            Self::SiteConfigError {
                path,
                reason,
            } => Self::SiteConfigError {
                path: path.clone(),
                reason: reason.clone(),
            },
            // io::Error is not Clone
            Self::IoError(e) => Self::IoError(std::io::Error::new(e.kind(), e.to_string())),
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information.
///
/// When displayed, errors show:
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context about the error in yellow (optional)
/// 3. **Suggestion**: Actionable steps to resolve the issue in green (optional)
///
/// ```rust,no_run
/// use doctracks::core::{ErrorContext, TracksError};
///
/// let context = ErrorContext::new(TracksError::UnknownVersion {
///     version: "enterprise-server@2.0".to_string(),
/// })
/// .with_suggestion("Run `doctracks check` to list configured versions");
///
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: TracksError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: TracksError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions.
///
/// Recognizes [`TracksError`] (anywhere in the chain), [`std::io::Error`] and
/// [`toml::de::Error`]; everything else is reported with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(tracks_error) = error.chain().find_map(|e| e.downcast_ref::<TracksError>()) {
        return create_error_context(tracks_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(TracksError::Other {
                    message: error.to_string(),
                })
                .with_suggestion("Check that --root points at the documentation site checkout")
                .with_details("A required file or directory could not be found");
            }
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(TracksError::Other {
                    message: error.to_string(),
                })
                .with_suggestion("Check file ownership and permissions of the content directory");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(TracksError::SiteConfigError {
            path: "doctracks.toml".to_string(),
            reason: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax in doctracks.toml");
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(TracksError::Other {
        message,
    })
}

/// Map each [`TracksError`] variant to a context with tailored suggestions.
fn create_error_context(error: TracksError) -> ErrorContext {
    match &error {
        TracksError::Configuration {
            ..
        } => ErrorContext::new(error)
            .with_suggestion(
                "Product and track names are used as lookup keys and must not contain '.'",
            )
            .with_details("The whole resolution was aborted; no partial result was produced"),
        TracksError::Lookup {
            product,
            suggestions,
            ..
        } => {
            let suggestion = if suggestions.is_empty() {
                format!("Add the track to data/learning-tracks/{product}.yml")
            } else {
                format!("Did you mean: {}?", suggestions.join(", "))
            };
            ErrorContext::new(error.clone()).with_suggestion(suggestion)
        }
        TracksError::InvalidVersionSpec {
            ..
        } => ErrorContext::new(error)
            .with_suggestion(
                "Use '*', a plan map such as {ghes: '>=3.9'}, or an expression such as 'fpt or ghes > 3.8'",
            ),
        TracksError::UnknownVersion {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Versions are written as <plan>@<release>, e.g. free-pro-team@latest")
            .with_details("Only versions built from the [[plans]] table of doctracks.toml exist"),
        TracksError::Template {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "Check template syntax: variables use {{ var }}, control flow uses {% %}",
        ),
        TracksError::DataFile {
            ..
        } => ErrorContext::new(error).with_suggestion("Check the YAML syntax of the file"),
        TracksError::PageNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Guide references are content paths such as /actions/learn/intro"),
        TracksError::SiteConfigError {
            ..
        } => ErrorContext::new(error).with_suggestion("Fix doctracks.toml at the site root"),
        TracksError::IoError(_)
        | TracksError::Other {
            ..
        } => ErrorContext::new(error),
    }
}
