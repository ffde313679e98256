//! Filter/sort engine
//!
//! Derives the page payload from the full release list. Pure: no I/O, and
//! the input slice is never modified.

use crate::models::{Release, ReleaseOption};
use crate::view::{FilterCriteria, SortOrder};

/// Substring in a release body announcing an incompatible change
pub const BREAKING_CHANGE_MARKER: &str = "BREAKING CHANGE";

/// Result of filtering: the releases to show and the range selector bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseView {
    /// Releases passing every filter, in the requested order
    pub releases: Vec<Release>,
    /// Every release of the requested version, oldest first
    pub range_options: Vec<ReleaseOption>,
}

/// Filters and orders `all` according to `criteria`.
///
/// `all` is expected newest first, as the upstream returns it. Range options
/// are taken after the version filter only, so narrowing `from`/`to` or
/// enabling `breaking_only` never shrinks the selectors themselves.
///
/// The version test is a plain name prefix: `v30.0.0` matches version `3`.
pub fn derive_view(all: &[Release], criteria: &FilterCriteria) -> ReleaseView {
    let prefix = criteria.version_prefix();
    let versioned: Vec<&Release> = all
        .iter()
        .filter(|release| release.name.starts_with(&prefix))
        .collect();

    let range_options = versioned
        .iter()
        .rev()
        .map(|release| ReleaseOption::from(*release))
        .collect();

    let mut releases: Vec<Release> = versioned
        .into_iter()
        .filter(|release| !criteria.breaking_only || is_breaking(release))
        .filter(|release| criteria.from.map_or(true, |from| release.id as f64 >= from))
        .filter(|release| criteria.to.map_or(true, |to| release.id as f64 <= to))
        .cloned()
        .collect();

    if criteria.sort == SortOrder::Asc {
        releases.reverse();
    }

    ReleaseView {
        releases,
        range_options,
    }
}

/// Whether the release notes contain the breaking change marker.
pub fn is_breaking(release: &Release) -> bool {
    release.body.contains(BREAKING_CHANGE_MARKER)
}
