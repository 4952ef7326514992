//! Read-only extension manifest snapshot.
//!
//! Only the fields the policy resolvers consult are modeled. Loading and
//! validating manifest files belongs to the extension loader; this type is
//! the already-parsed input handed to the resolvers.

use crate::model::identity::{gallery_id, ExtensionIdentityKey};
use crate::model::locality::DeclaredExtensionKind;
use crate::model::trust::TrustRequirement;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Extension manifest fields relevant to locality and trust resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionManifest {
    pub publisher: String,
    pub name: String,
    /// Native entry point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    /// Web entry point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension_dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension_pack: Vec<String>,
    /// Contribution-point name to opaque contribution data.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub contributes: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_kind: Option<DeclaredExtensionKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_trust: Option<WorkspaceTrustDeclaration>,
}

/// `workspaceTrust` manifest section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceTrustDeclaration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<TrustRequirement>,
}

impl ExtensionManifest {
    /// Creates a manifest with identity only; every optional field is absent.
    pub fn new(publisher: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            publisher: publisher.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn identity_key(&self) -> ExtensionIdentityKey {
        ExtensionIdentityKey::from_parts(&self.publisher, &self.name)
    }

    pub fn gallery_id(&self) -> String {
        gallery_id(&self.publisher, &self.name)
    }

    /// `true` when a non-empty native entry point is declared.
    pub fn has_main(&self) -> bool {
        is_declared(&self.main)
    }

    /// `true` when a non-empty web entry point is declared.
    pub fn has_browser(&self) -> bool {
        is_declared(&self.browser)
    }

    pub fn has_dependencies_or_pack(&self) -> bool {
        !self.extension_dependencies.is_empty() || !self.extension_pack.is_empty()
    }

    /// Contribution-point names in stable (sorted) order.
    pub fn contribution_points(&self) -> impl Iterator<Item = &str> {
        self.contributes.keys().map(String::as_str)
    }

    /// Self-declared `workspaceTrust.request`, when present.
    pub fn declared_trust_request(&self) -> Option<TrustRequirement> {
        self.workspace_trust.and_then(|section| section.request)
    }
}

fn is_declared(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|raw| !raw.is_empty())
}
