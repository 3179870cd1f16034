//! Release range comparison for plan releases.
//!
//! Plan releases are short numeric strings such as `3.9` or `3.10`, or a
//! non-numeric marker such as `latest` for plans that are continuously deployed.
//! Numeric releases are padded into full semantic versions (`3.9` becomes
//! `3.9.0`) and compared with [`semver::Version`] ordering, so `3.10` sorts
//! after `3.9`.
//!
//! A range is `*`, or one or more comparators separated by whitespace or commas:
//!
//! ```rust,no_run
//! use doctracks::version::comparison::range_matches;
//!
//! # fn example() -> Result<(), String> {
//! assert!(range_matches(">=3.9", "3.10")?);
//! assert!(range_matches("> 3.8, < 3.10", "3.9")?);
//! assert!(!range_matches(">=3.9", "latest")?);
//! assert!(range_matches("*", "latest")?);
//! # Ok(())
//! # }
//! ```

use regex::Regex;
use semver::Version;
use std::cmp::Ordering;
use std::sync::LazyLock;

static COMPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(>=|<=|!=|>|<|=)?\s*v?(\d+(?:\.\d+){0,2})").expect("static regex is valid")
});

/// Comparison operator of a single range comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// `=` or no operator
    Eq,
    /// `!=`
    Ne,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
}

impl Op {
    fn parse(symbol: &str) -> Self {
        match symbol {
            "!=" => Self::Ne,
            ">" => Self::Gt,
            ">=" => Self::Ge,
            "<" => Self::Lt,
            "<=" => Self::Le,
            _ => Self::Eq,
        }
    }

    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering == Ordering::Equal,
            Self::Ne => ordering != Ordering::Equal,
            Self::Gt => ordering == Ordering::Greater,
            Self::Ge => ordering != Ordering::Less,
            Self::Lt => ordering == Ordering::Less,
            Self::Le => ordering != Ordering::Greater,
        }
    }
}

/// One `<op> <release>` term of a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparator {
    /// Operator
    pub op: Op,
    /// Release the operator compares against
    pub release: Version,
}

impl Comparator {
    /// Whether `release` satisfies this comparator.
    #[must_use]
    pub fn matches(&self, release: &Version) -> bool {
        self.op.accepts(release.cmp(&self.release))
    }
}

/// Parse a release string into a comparable version.
///
/// Returns `None` for non-numeric releases such as `latest`.
#[must_use]
pub fn parse_release(release: &str) -> Option<Version> {
    let trimmed = release.trim().trim_start_matches('v');
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }

    let parts = trimmed.split('.').count();
    let padded = match parts {
        1 => format!("{trimmed}.0.0"),
        2 => format!("{trimmed}.0"),
        _ => trimmed.to_string(),
    };
    Version::parse(&padded).ok()
}

/// Parse a range into its comparators. `*` yields an empty list.
///
/// # Errors
///
/// Returns a description of the problem when the range contains anything other
/// than comparators, whitespace, and commas.
pub fn parse_range(range: &str) -> Result<Vec<Comparator>, String> {
    let range = range.trim();
    if range == "*" {
        return Ok(Vec::new());
    }
    if range.is_empty() {
        return Err("empty range".to_string());
    }

    let mut comparators = Vec::new();
    let mut consumed = 0;
    for caps in COMPARATOR.captures_iter(range) {
        let whole = caps.get(0).map_or(0..0, |m| m.range());
        let gap = &range[consumed..whole.start];
        if !gap.chars().all(|c| c.is_whitespace() || c == ',') {
            return Err(format!("unexpected '{}'", gap.trim()));
        }
        consumed = whole.end;

        let op = Op::parse(caps.get(1).map_or("", |m| m.as_str()));
        let release = parse_release(&caps[2])
            .ok_or_else(|| format!("'{}' is not a numeric release", &caps[2]))?;
        comparators.push(Comparator {
            op,
            release,
        });
    }

    let rest = &range[consumed..];
    if !rest.chars().all(|c| c.is_whitespace() || c == ',') {
        return Err(format!("unexpected '{}'", rest.trim()));
    }
    if comparators.is_empty() {
        return Err("no comparators found".to_string());
    }

    Ok(comparators)
}

/// Check whether `release` falls inside `range`.
///
/// Non-numeric releases only match `*`.
///
/// # Errors
///
/// Returns a description of the problem when `range` cannot be parsed.
pub fn range_matches(range: &str, release: &str) -> Result<bool, String> {
    let comparators = parse_range(range)?;
    if comparators.is_empty() {
        return Ok(true);
    }

    Ok(parse_release(release).is_some_and(|v| comparators.iter().all(|c| c.matches(&v))))
}
