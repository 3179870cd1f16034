//! Custom Tera functions available to content templates.
//!
//! # Functions
//!
//! - `version_applies(spec=...)`: whether the version being rendered is
//!   covered by a version specification. `spec` takes the same shapes as a
//!   `versions` field, either a string or a plan map:
//!
//! ```text
//! {% if version_applies(spec="ghes >= 3.9 or ghec") %}New runners{% endif %}
//! {% if version_applies(spec={"fpt": "*"}) %}Hosted only{% endif %}
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::version::{VersionRegistry, VersionResolver, VersionSpec};

/// Create the `version_applies` function bound to the version being rendered.
pub fn create_version_applies_function(
    versions: Arc<VersionRegistry>,
    current_version: String,
) -> impl tera::Function + 'static {
    move |args: &HashMap<String, tera::Value>| -> tera::Result<tera::Value> {
        let raw = args
            .get("spec")
            .ok_or_else(|| tera::Error::msg("version_applies requires a `spec` argument"))?;

        let spec: VersionSpec = serde_json::from_value(raw.clone())
            .map_err(|e| tera::Error::msg(format!("version_applies: invalid spec: {e}")))?;

        let applicable = versions
            .applicable_versions(&spec)
            .map_err(|e| tera::Error::msg(format!("version_applies: {e}")))?;

        Ok(tera::Value::Bool(applicable.contains(&current_version)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::Plan;
    use tera::Function;

    fn registry() -> Arc<VersionRegistry> {
        Arc::new(
            VersionRegistry::new(
                vec![
                    Plan::new("free-pro-team", "fpt", ["latest"]),
                    Plan::new("enterprise-server", "ghes", ["3.10", "3.9"]),
                ],
                "free-pro-team@latest",
            )
            .unwrap(),
        )
    }

    fn call(current: &str, spec: tera::Value) -> tera::Result<tera::Value> {
        let function = create_version_applies_function(registry(), current.to_string());
        let mut args = HashMap::new();
        args.insert("spec".to_string(), spec);
        function.call(&args)
    }

    #[test]
    fn test_version_applies_expression() {
        let spec = tera::Value::String("ghes >= 3.10".to_string());
        assert_eq!(call("enterprise-server@3.10", spec.clone()).unwrap(), tera::Value::Bool(true));
        assert_eq!(call("enterprise-server@3.9", spec).unwrap(), tera::Value::Bool(false));
    }

    #[test]
    fn test_version_applies_plan_map() {
        let spec = serde_json::json!({ "fpt": "*" });
        assert_eq!(call("free-pro-team@latest", spec).unwrap(), tera::Value::Bool(true));
    }

    #[test]
    fn test_version_applies_errors() {
        let function = create_version_applies_function(registry(), "free-pro-team@latest".into());
        assert!(function.call(&HashMap::new()).is_err());

        let err = call("free-pro-team@latest", tera::Value::String("ghae".to_string())).unwrap_err();
        assert!(err.to_string().contains("ghae"));
    }
}
