//! Workspace trust requirement values.
//!
//! Values are opaque to the resolver: they are compared and passed through,
//! never interpreted beyond their precedence source.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// When (if ever) a workspace must be trusted before an extension activates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrustRequirement {
    /// The extension never requires trust.
    Never,
    /// Trust is required before any activation.
    OnStart,
    /// Trust is required only when the extension requests it at runtime.
    OnDemand,
}

impl TrustRequirement {
    /// Stable string id used in manifests and product metadata.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Never => "never",
            Self::OnStart => "onStart",
            Self::OnDemand => "onDemand",
        }
    }
}

impl Display for TrustRequirement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product-supplied trust values for one extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductTrustValues {
    /// Wins over the manifest declaration.
    #[serde(rename = "override", default, skip_serializing_if = "Option::is_none")]
    pub override_value: Option<TrustRequirement>,
    /// Used only when the manifest declares nothing.
    #[serde(rename = "default", default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<TrustRequirement>,
}
