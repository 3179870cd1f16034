//! The `versions` value written in track data and page frontmatter.
//!
//! Three shapes are accepted:
//!
//! ```yaml
//! versions: '*'                      # every version
//! versions: 'fpt or ghes >= 3.9'     # expression of plan terms joined by `or`
//! versions:                          # plan map: short name (or name) -> range
//!   fpt: '*'
//!   ghes: '>=3.9'
//! ```
//!
//! Plan-map ranges may be unquoted numbers (`ghes: 3.9`). YAML reads those as
//! floats, so a release with a trailing zero such as `3.10` must be quoted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Version applicability of a track or page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawVersionSpec", into = "RawVersionSpec")]
pub enum VersionSpec {
    /// `'*'`
    All,
    /// `'fpt or ghes > 3.8'`
    Expression(String),
    /// `{ fpt: '*', ghes: '>=3.9' }`
    Plans(BTreeMap<String, String>),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawVersionSpec {
    Text(String),
    Plans(BTreeMap<String, RawRange>),
}

/// A plan-map range: a string, or a bare release number.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawRange {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl From<RawRange> for String {
    fn from(range: RawRange) -> Self {
        match range {
            RawRange::Text(text) => text,
            RawRange::Integer(number) => number.to_string(),
            RawRange::Float(number) => number.to_string(),
        }
    }
}

impl From<RawVersionSpec> for VersionSpec {
    fn from(raw: RawVersionSpec) -> Self {
        match raw {
            RawVersionSpec::Text(text) if text.trim() == "*" => Self::All,
            RawVersionSpec::Text(text) => Self::Expression(text),
            RawVersionSpec::Plans(plans) => {
                Self::Plans(plans.into_iter().map(|(plan, range)| (plan, range.into())).collect())
            }
        }
    }
}

impl From<VersionSpec> for RawVersionSpec {
    fn from(spec: VersionSpec) -> Self {
        match spec {
            VersionSpec::All => Self::Text("*".to_string()),
            VersionSpec::Expression(text) => Self::Text(text),
            VersionSpec::Plans(plans) => Self::Plans(
                plans.into_iter().map(|(plan, range)| (plan, RawRange::Text(range))).collect(),
            ),
        }
    }
}

impl From<&str> for VersionSpec {
    fn from(text: &str) -> Self {
        RawVersionSpec::Text(text.to_string()).into()
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "*"),
            Self::Expression(text) => write!(f, "{text}"),
            Self::Plans(plans) => {
                let parts: Vec<String> =
                    plans.iter().map(|(plan, range)| format!("{plan}: {range}")).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_wildcard() {
        let spec: VersionSpec = serde_yaml::from_str("'*'").unwrap();
        assert_eq!(spec, VersionSpec::All);
    }

    #[test]
    fn test_deserialize_expression() {
        let spec: VersionSpec = serde_yaml::from_str("fpt or ghes > 3.8").unwrap();
        assert_eq!(spec, VersionSpec::Expression("fpt or ghes > 3.8".to_string()));
    }

    #[test]
    fn test_deserialize_plan_map() {
        let spec: VersionSpec = serde_yaml::from_str("fpt: '*'\nghes: '>=3.9'\n").unwrap();
        let VersionSpec::Plans(plans) = spec else {
            panic!("expected plan map");
        };
        assert_eq!(plans.get("fpt").map(String::as_str), Some("*"));
        assert_eq!(plans.get("ghes").map(String::as_str), Some(">=3.9"));
    }

    #[test]
    fn test_deserialize_unquoted_release() {
        let spec: VersionSpec = serde_yaml::from_str("ghes: 3.9\nghae: 3\n").unwrap();
        let VersionSpec::Plans(plans) = spec else {
            panic!("expected plan map");
        };
        assert_eq!(plans.get("ghes").map(String::as_str), Some("3.9"));
        assert_eq!(plans.get("ghae").map(String::as_str), Some("3"));

        let track: crate::models::TrackData =
            serde_yaml::from_str("title: T\nversions:\n  ghes: 3.9\nguides: [/a]\n").unwrap();
        assert_eq!(track.versions.map(|v| v.to_string()).as_deref(), Some("{ghes: 3.9}"));
    }

    #[test]
    fn test_display() {
        assert_eq!(VersionSpec::All.to_string(), "*");
        assert_eq!(VersionSpec::from("ghes >= 3.9").to_string(), "ghes >= 3.9");
    }
}
