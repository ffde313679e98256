//! Request DTOs for the release filter API
//!
//! Defines the query string accepted by `GET /releases`.

use serde::Deserialize;

use crate::view::{FilterCriteria, SortOrder, DEFAULT_VERSION};

/// Query parameters for `GET /releases`
///
/// Every field is optional and arrives as raw text; `to_criteria` applies
/// the defaults and parses the bounds.
///
/// # Fields
/// - `version`: major version prefix (default `"3"`)
/// - `sort`: `"asc"` for oldest first, anything else for newest first
/// - `from` / `to`: inclusive release id bounds
/// - `breaking`: `"on"` to keep only breaking releases
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleaseQuery {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub breaking: Option<String>,
}

impl ReleaseQuery {
    /// Converts the raw parameters into filter criteria.
    ///
    /// Only an absent `version` falls back to the default; an empty one
    /// leaves the bare `v` prefix, which matches every release.
    pub fn to_criteria(&self) -> FilterCriteria {
        let version = self
            .version
            .clone()
            .unwrap_or_else(|| DEFAULT_VERSION.to_string());

        let sort = match self.sort.as_deref() {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        };

        FilterCriteria {
            version,
            sort,
            from: parse_bound(self.from.as_deref()),
            to: parse_bound(self.to.as_deref()),
            breaking_only: self.breaking.as_deref() == Some("on"),
        }
    }
}

/// Parses an optional id bound.
///
/// An empty value means no bound. Anything that is not a number becomes
/// `NaN`, a bound no release id satisfies.
fn parse_bound(raw: Option<&str>) -> Option<f64> {
    match raw.map(str::trim) {
        None | Some("") => None,
        Some(value) => Some(value.parse().unwrap_or(f64::NAN)),
    }
}
