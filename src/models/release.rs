//! Release records
//!
//! The validated shape of one upstream release, plus the `(id, name)` pair
//! offered as a range bound.

use serde::{Deserialize, Serialize};

/// One entry from the upstream release feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Upstream identifier, increasing with publication order
    pub id: u64,
    /// Display name, normally starting with the version (`v3.0.0-beta.88`)
    pub name: String,
    /// Markdown release notes
    pub body: String,
    /// ISO-8601 publication timestamp, empty for unpublished drafts
    pub published_at: String,
    /// Link to the release page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
}

impl Release {
    /// Builds a release with only the fields the filters look at.
    pub fn new(id: u64, name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            body: body.into(),
            published_at: String::new(),
            html_url: None,
        }
    }

    pub fn with_published_at(mut self, published_at: impl Into<String>) -> Self {
        self.published_at = published_at.into();
        self
    }
}

/// A selectable range bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseOption {
    pub id: u64,
    pub name: String,
}

impl From<&Release> for ReleaseOption {
    fn from(release: &Release) -> Self {
        Self {
            id: release.id,
            name: release.name.clone(),
        }
    }
}
