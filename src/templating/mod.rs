//! Content templating for track and page fields.
//!
//! Track names, titles, descriptions, `featured_track` values and page
//! frontmatter may embed Tera conditionals that depend on the page being
//! rendered:
//!
//! ```yaml
//! title: '{% if ghes %}Self-hosted runners{% else %}Hosted runners{% endif %}'
//! featured_track: '{% if version_applies(spec="fpt or ghec") %}true{% endif %}'
//! ```
//!
//! The resolver only depends on the [`ContentRenderer`] trait. The site uses
//! [`TemplateRenderer`], which renders with Tera and the variables described on
//! its type.
//!
//! # Render options
//!
//! [`RenderOptions`] post-process the rendered string:
//!
//! - `text_only`: strip markup and collapse whitespace ([`text_only`])
//! - `encode_entities`: HTML-escape the result ([`encode_entities`])

pub mod filters;
pub mod renderer;
pub mod utils;

use std::future::Future;

pub use renderer::TemplateRenderer;
pub use utils::{decode_entities, encode_entities, text_only};

use crate::core::Result;
use crate::models::RenderContext;

/// Post-processing applied after a template is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Reduce the output to its visible text
    pub text_only: bool,
    /// HTML-escape the output
    pub encode_entities: bool,
}

impl RenderOptions {
    /// Text-only output.
    #[must_use]
    pub fn text() -> Self {
        Self {
            text_only: true,
            encode_entities: false,
        }
    }

    /// Also HTML-escape the output.
    #[must_use]
    pub fn encoded(mut self) -> Self {
        self.encode_entities = true;
        self
    }

    /// Apply these options to rendered output.
    #[must_use]
    pub fn apply(self, rendered: &str) -> String {
        let text = if self.text_only {
            text_only(rendered)
        } else {
            rendered.to_string()
        };

        if self.encode_entities {
            encode_entities(&text)
        } else {
            text
        }
    }
}

/// Renders a content string for a page context.
pub trait ContentRenderer {
    /// Render `template` for `context` and apply `options` to the result.
    ///
    /// # Errors
    ///
    /// Returns [`TracksError::Template`](crate::core::TracksError::Template)
    /// when the template cannot be rendered.
    fn render(
        &self,
        template: &str,
        context: &RenderContext,
        options: RenderOptions,
    ) -> impl Future<Output = Result<String>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_order() {
        // text extraction happens before escaping
        let options = RenderOptions::text().encoded();
        assert_eq!(options.apply("<p>a &lt; b</p>"), "a &lt; b");
        assert_eq!(RenderOptions::text().apply("<p>a &lt; b</p>"), "a < b");
    }

    #[test]
    fn test_default_is_passthrough() {
        assert_eq!(RenderOptions::default().apply(" <i>x</i> "), " <i>x</i> ");
    }
}
