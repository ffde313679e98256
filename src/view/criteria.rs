//! Filter criteria
//!
//! The per-request description of which releases to show and in what order.

use serde::Serialize;

/// Major version shown when none is requested
pub const DEFAULT_VERSION: &str = "3";

/// Requested ordering of the result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first
    Asc,
    /// Newest first, the upstream order
    #[default]
    Desc,
}

/// Filters applied by [`derive_view`](super::derive_view).
///
/// Bounds are compared numerically against release ids. A bound that is not
/// a number is `NaN` and matches no release.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterCriteria {
    /// Major version; releases must be named `v{version}...`
    pub version: String,
    pub sort: SortOrder,
    /// Inclusive lower id bound
    pub from: Option<f64>,
    /// Inclusive upper id bound
    pub to: Option<f64>,
    /// Keep only releases whose notes announce a breaking change
    pub breaking_only: bool,
}

impl FilterCriteria {
    /// Criteria for one major version with every other filter off.
    pub fn for_version(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Self::default()
        }
    }

    /// Prefix a release name must start with to match the version.
    pub fn version_prefix(&self) -> String {
        format!("v{}", self.version)
    }
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            sort: SortOrder::Desc,
            from: None,
            to: None,
            breaking_only: false,
        }
    }
}
