//! Version registry and version-set resolution.
//!
//! A documentation site is published for several *plans* (product offerings),
//! each with one or more *releases*. A version identifier joins the two:
//!
//! | Plan                | Short name | Releases            | Version ids                          |
//! |---------------------|------------|---------------------|--------------------------------------|
//! | `free-pro-team`     | `fpt`      | `latest`            | `free-pro-team@latest`               |
//! | `enterprise-cloud`  | `ghec`     | `latest`            | `enterprise-cloud@latest`            |
//! | `enterprise-server` | `ghes`     | `3.10`, `3.9`, `3.8`| `enterprise-server@3.10`, ...        |
//!
//! # Module Organization
//!
//! - [`spec`] - The [`VersionSpec`] shapes accepted in content files
//! - [`comparison`] - Release parsing and range matching
//! - [`VersionRegistry`] - The configured plans, implementing [`VersionResolver`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use doctracks::version::{Plan, VersionRegistry, VersionResolver, VersionSpec};
//!
//! # fn example() -> doctracks::core::Result<()> {
//! let registry = VersionRegistry::new(
//!     vec![
//!         Plan::new("free-pro-team", "fpt", ["latest"]),
//!         Plan::new("enterprise-server", "ghes", ["3.10", "3.9", "3.8"]),
//!     ],
//!     "free-pro-team@latest",
//! )?;
//!
//! let versions = registry.applicable_versions(&VersionSpec::from("fpt or ghes > 3.8"))?;
//! assert_eq!(
//!     versions,
//!     vec!["free-pro-team@latest", "enterprise-server@3.10", "enterprise-server@3.9"]
//! );
//! # Ok(())
//! # }
//! ```

pub mod comparison;
pub mod spec;

pub use spec::VersionSpec;

use regex::Regex;
use std::sync::LazyLock;

use crate::core::{Result, TracksError};

static TERM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][\w-]*)(?:\s*((?:>=|<=|!=|>|<|=)\s*\S+))?$")
        .expect("static regex is valid")
});

static OR_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+or\s+").expect("static regex is valid"));

/// Resolves a [`VersionSpec`] to the concrete version identifiers it covers.
pub trait VersionResolver {
    /// Every version identifier a version spec applies to, in registry order.
    ///
    /// # Errors
    ///
    /// Returns [`TracksError::InvalidVersionSpec`] when the version spec cannot be interpreted.
    fn applicable_versions(&self, spec: &VersionSpec) -> Result<Vec<String>>;
}

/// A product offering and its releases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Full plan name used in version ids, e.g. `enterprise-server`
    pub name: String,
    /// Short name used in content, e.g. `ghes`
    pub short_name: String,
    /// Releases, newest first
    pub releases: Vec<String>,
}

impl Plan {
    /// Create a plan.
    pub fn new<I, S>(name: impl Into<String>, short_name: impl Into<String>, releases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            short_name: short_name.into(),
            releases: releases.into_iter().map(Into::into).collect(),
        }
    }

    /// Version id for one release of this plan.
    #[must_use]
    pub fn version_id(&self, release: &str) -> String {
        format!("{}@{}", self.name, release)
    }

    fn version_ids(&self) -> impl Iterator<Item = String> + '_ {
        self.releases.iter().map(|r| self.version_id(r))
    }
}

/// Split a version id into plan name and release.
///
/// ```rust,no_run
/// use doctracks::version::parse_version_id;
///
/// assert_eq!(parse_version_id("enterprise-server@3.9"), Some(("enterprise-server", "3.9")));
/// assert_eq!(parse_version_id("latest"), None);
/// ```
#[must_use]
pub fn parse_version_id(id: &str) -> Option<(&str, &str)> {
    let (plan, release) = id.split_once('@')?;
    if plan.is_empty() || release.is_empty() {
        return None;
    }
    Some((plan, release))
}

/// The configured plans of a site.
#[derive(Debug, Clone)]
pub struct VersionRegistry {
    plans: Vec<Plan>,
    default_version: String,
}

impl VersionRegistry {
    /// Build a registry and check that it is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`TracksError::Configuration`] when a plan has no releases, plan
    /// names collide, or the default version is not one of the plans' versions.
    pub fn new(plans: Vec<Plan>, default_version: impl Into<String>) -> Result<Self> {
        let default_version = default_version.into();

        for (i, plan) in plans.iter().enumerate() {
            if plan.releases.is_empty() {
                return Err(TracksError::configuration(format!(
                    "plan '{}' has no releases",
                    plan.name
                )));
            }
            if plan.name.contains('@') || plan.short_name.contains('@') {
                return Err(TracksError::configuration(format!(
                    "plan '{}' must not contain '@'",
                    plan.name
                )));
            }
            let duplicate = plans[..i].iter().any(|other| {
                other.name == plan.name
                    || other.short_name == plan.short_name
                    || other.name == plan.short_name
                    || other.short_name == plan.name
            });
            if duplicate {
                return Err(TracksError::configuration(format!(
                    "plan '{}' is declared twice",
                    plan.name
                )));
            }
        }

        let registry = Self {
            plans,
            default_version,
        };
        if !registry.contains(&registry.default_version) {
            return Err(TracksError::configuration(format!(
                "default version '{}' is not provided by any plan",
                registry.default_version
            )));
        }

        Ok(registry)
    }

    /// Configured plans in declaration order.
    #[must_use]
    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    /// Version that is served without a version segment in hrefs.
    #[must_use]
    pub fn default_version(&self) -> &str {
        &self.default_version
    }

    /// Whether `id` is the default version.
    #[must_use]
    pub fn is_default(&self, id: &str) -> bool {
        self.default_version == id
    }

    /// Every version id, plan by plan.
    #[must_use]
    pub fn all_versions(&self) -> Vec<String> {
        self.plans.iter().flat_map(Plan::version_ids).collect()
    }

    /// Whether `id` names a configured version.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.plan_for(id).is_some()
    }

    /// Find a plan by short name or full name.
    #[must_use]
    pub fn find_plan(&self, key: &str) -> Option<&Plan> {
        self.plans.iter().find(|p| p.short_name == key || p.name == key)
    }

    /// The plan and release a version id refers to.
    #[must_use]
    pub fn plan_for<'a>(&'a self, id: &'a str) -> Option<(&'a Plan, &'a str)> {
        let (plan_name, release) = parse_version_id(id)?;
        let plan = self.plans.iter().find(|p| p.name == plan_name)?;
        plan.releases.iter().any(|r| r == release).then_some((plan, release))
    }

    /// Check a version id coming from outside (CLI flags, page contexts).
    ///
    /// # Errors
    ///
    /// Returns [`TracksError::UnknownVersion`] for ids not in the registry.
    pub fn require(&self, id: &str) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(TracksError::UnknownVersion {
                version: id.to_string(),
            })
        }
    }

    fn select(&self, plan: &Plan, range: &str, spec: &VersionSpec) -> Result<Vec<String>> {
        let mut selected = Vec::new();
        for release in &plan.releases {
            let matches = comparison::range_matches(range, release).map_err(|reason| {
                TracksError::InvalidVersionSpec {
                    spec: spec.to_string(),
                    reason,
                }
            })?;
            if matches {
                selected.push(plan.version_id(release));
            }
        }
        Ok(selected)
    }

    fn expression_versions(&self, expression: &str, spec: &VersionSpec) -> Result<Vec<String>> {
        let invalid = |reason: String| TracksError::InvalidVersionSpec {
            spec: spec.to_string(),
            reason,
        };

        let mut selected = Vec::new();
        for term in OR_SEPARATOR.split(expression.trim()) {
            let term = term.trim();
            if term.is_empty() {
                return Err(invalid("empty term".to_string()));
            }

            if parse_version_id(term).is_some() {
                if !self.contains(term) {
                    return Err(invalid(format!("unknown version '{term}'")));
                }
                selected.push(term.to_string());
                continue;
            }

            let caps = TERM.captures(term).ok_or_else(|| invalid(format!("cannot parse '{term}'")))?;
            let plan = self
                .find_plan(&caps[1])
                .ok_or_else(|| invalid(format!("unknown plan '{}'", &caps[1])))?;
            let range = caps.get(2).map_or("*", |m| m.as_str());
            selected.extend(self.select(plan, range, spec)?);
        }

        Ok(selected)
    }

    /// Keep registry order and drop duplicates produced by overlapping terms.
    fn in_registry_order(&self, selected: &[String]) -> Vec<String> {
        self.all_versions().into_iter().filter(|v| selected.contains(v)).collect()
    }
}

impl VersionResolver for VersionRegistry {
    fn applicable_versions(&self, spec: &VersionSpec) -> Result<Vec<String>> {
        let selected = match spec {
            VersionSpec::All => return Ok(self.all_versions()),
            VersionSpec::Expression(expression) => self.expression_versions(expression, spec)?,
            VersionSpec::Plans(plans) => {
                let mut selected = Vec::new();
                for (key, range) in plans {
                    let plan =
                        self.find_plan(key).ok_or_else(|| TracksError::InvalidVersionSpec {
                            spec: spec.to_string(),
                            reason: format!("unknown plan '{key}'"),
                        })?;
                    selected.extend(self.select(plan, range, spec)?);
                }
                selected
            }
        };

        Ok(self.in_registry_order(&selected))
    }
}
