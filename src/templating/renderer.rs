//! Tera-backed implementation of [`ContentRenderer`].

use regex::Regex;
use std::sync::{Arc, LazyLock};
use strsim::levenshtein;
use tera::{Context as TeraContext, Tera};

use super::{ContentRenderer, RenderOptions, filters};
use crate::core::{Result, TracksError};
use crate::models::RenderContext;
use crate::version::VersionRegistry;

/// Maximum allowed Levenshtein distance as a percentage of target length for suggestions.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

static MISSING_VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Variable `([^`]+)` not found").expect("static regex is valid")
});

/// Renders content strings for a site.
///
/// Every render gets a fresh [`Tera`] instance with a context built from the
/// [`RenderContext`]:
///
/// | Variable          | Example                 |
/// |-------------------|-------------------------|
/// | `currentProduct`  | `actions`               |
/// | `currentVersion`  | `enterprise-server@3.9` |
/// | `currentLanguage` | `en`                    |
/// | `plan`            | `ghes`                  |
/// | `currentRelease`  | `3.9`                   |
/// | `<short name>`    | `ghes = true`, `fpt = false` |
///
/// plus the `version_applies` function from [`filters`].
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    versions: Arc<VersionRegistry>,
}

impl TemplateRenderer {
    /// Create a renderer that resolves plans against `versions`.
    pub fn new(versions: Arc<VersionRegistry>) -> Self {
        Self {
            versions,
        }
    }

    /// Build the Tera context for one render.
    pub fn build_context(&self, context: &RenderContext) -> TeraContext {
        let mut tera_context = TeraContext::new();
        tera_context.insert("currentProduct", &context.current_product);
        tera_context.insert("currentVersion", &context.current_version);
        tera_context.insert("currentLanguage", &context.current_language);

        let current = self.versions.plan_for(&context.current_version);
        let (plan, release) = current.map_or(("", ""), |(plan, release)| (plan.short_name.as_str(), release));
        tera_context.insert("plan", plan);
        tera_context.insert("currentRelease", release);

        for candidate in self.versions.plans() {
            tera_context.insert(&candidate.short_name, &(candidate.short_name == plan));
        }

        tera_context
    }

    /// Render `template` for `context` without post-processing.
    ///
    /// # Errors
    ///
    /// Returns [`TracksError::Template`] when Tera rejects the template.
    pub fn render_template(&self, template: &str, context: &RenderContext) -> Result<String> {
        if !template.contains("{{") && !template.contains("{%") {
            return Ok(template.to_string());
        }

        let tera_context = self.build_context(context);
        tracing::trace!(version = %context.current_version, "rendering template");

        let mut tera = Tera::default();
        tera.register_function(
            "version_applies",
            filters::create_version_applies_function(
                Arc::clone(&self.versions),
                context.current_version.clone(),
            ),
        );

        tera.render_str(template, &tera_context).map_err(|e| {
            let mut message = Self::format_tera_error(&e);
            if let Some(hint) = Self::suggest_variable(&message, &tera_context) {
                message.push_str(&format!(" (did you mean `{hint}`?)"));
            }
            tracing::debug!("template render failed: {message}");
            TracksError::Template {
                message,
            }
        })
    }

    /// Format a Tera error chain for users.
    ///
    /// Tera renders one-off strings under the internal name `__tera_one_off`,
    /// which is meaningless outside Tera and is removed here.
    pub fn format_tera_error(error: &tera::Error) -> String {
        use std::error::Error;

        let mut messages = Vec::new();
        let mut current: Option<&dyn Error> = Some(error);
        while let Some(err) = current {
            let cleaned = err
                .to_string()
                .replace("while rendering '__tera_one_off'", "")
                .replace("Failed to render '__tera_one_off'", "")
                .replace("Failed to parse '__tera_one_off'", "")
                .replace("'__tera_one_off'", "template")
                .trim()
                .to_string();
            if !cleaned.is_empty() && !messages.contains(&cleaned) {
                messages.push(cleaned);
            }
            current = err.source();
        }

        if messages.is_empty() {
            "Template syntax error".to_string()
        } else {
            messages.join(" -> ")
        }
    }

    fn suggest_variable(message: &str, context: &TeraContext) -> Option<String> {
        let missing = MISSING_VARIABLE.captures(message)?.get(1)?.as_str();
        let json = context.clone().into_json();
        let available = json.as_object()?;

        available
            .keys()
            .map(|key| (key, levenshtein(missing, key)))
            .filter(|(_, distance)| *distance <= missing.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
            .min_by_key(|(_, distance)| *distance)
            .map(|(key, _)| key.clone())
    }
}

impl ContentRenderer for TemplateRenderer {
    async fn render(
        &self,
        template: &str,
        context: &RenderContext,
        options: RenderOptions,
    ) -> Result<String> {
        let rendered = self.render_template(template, context)?;
        Ok(options.apply(&rendered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::Plan;

    fn renderer() -> TemplateRenderer {
        let registry = VersionRegistry::new(
            vec![
                Plan::new("free-pro-team", "fpt", ["latest"]),
                Plan::new("enterprise-cloud", "ghec", ["latest"]),
                Plan::new("enterprise-server", "ghes", ["3.10", "3.9"]),
            ],
            "free-pro-team@latest",
        )
        .unwrap();
        TemplateRenderer::new(Arc::new(registry))
    }

    fn context(version: &str) -> RenderContext {
        RenderContext::new("actions", version, "en")
    }

    #[test]
    fn test_plain_text_skips_tera() {
        // unbalanced markup that Tera would reject
        let rendered = renderer().render_template("Intro } to {actions", &context("free-pro-team@latest"));
        assert_eq!(rendered.unwrap(), "Intro } to {actions");
    }

    #[test]
    fn test_plan_variables() {
        let renderer = renderer();
        let template = "{% if ghes %}server {{ currentRelease }}{% else %}{{ plan }}{% endif %}";

        assert_eq!(renderer.render_template(template, &context("enterprise-server@3.9")).unwrap(), "server 3.9");
        assert_eq!(renderer.render_template(template, &context("free-pro-team@latest")).unwrap(), "fpt");
    }

    #[test]
    fn test_context_variables() {
        let rendered = renderer()
            .render_template("{{ currentProduct }}/{{ currentLanguage }}", &context("free-pro-team@latest"))
            .unwrap();
        assert_eq!(rendered, "actions/en");
    }

    #[test]
    fn test_version_applies_function() {
        let renderer = renderer();
        let template = r#"{% if version_applies(spec="ghes >= 3.10 or ghec") %}true{% endif %}"#;

        assert_eq!(renderer.render_template(template, &context("enterprise-server@3.10")).unwrap(), "true");
        assert_eq!(renderer.render_template(template, &context("enterprise-cloud@latest")).unwrap(), "true");
        assert_eq!(renderer.render_template(template, &context("enterprise-server@3.9")).unwrap(), "");
    }

    #[test]
    fn test_syntax_error_is_cleaned() {
        let err = renderer()
            .render_template("{% if plan %}unclosed", &context("free-pro-team@latest"))
            .unwrap_err();
        let TracksError::Template { message } = err else {
            panic!("expected template error");
        };
        assert!(!message.contains("__tera_one_off"));
    }

    #[test]
    fn test_unknown_variable_suggestion() {
        let err = renderer()
            .render_template("{{ currentProdct }}", &context("free-pro-team@latest"))
            .unwrap_err();
        assert!(err.to_string().contains("currentProduct"), "{err}");
    }

    #[tokio::test]
    async fn test_render_applies_options() {
        let renderer = renderer();
        let context = context("free-pro-team@latest");

        let rendered = renderer
            .render("<b>CI &amp; CD</b>", &context, RenderOptions::text().encoded())
            .await
            .unwrap();
        assert_eq!(rendered, "CI &amp; CD");

        let raw = renderer.render("<b>x</b>", &context, RenderOptions::default()).await.unwrap();
        assert_eq!(raw, "<b>x</b>");
    }
}
