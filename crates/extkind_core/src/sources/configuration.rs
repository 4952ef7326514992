//! User/administrator settings source.

use crate::model::locality::DeclaredExtensionKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Setting key holding per-extension locality overrides.
pub const REMOTE_EXTENSION_KIND_SETTING: &str = "remote.extensionKind";

/// Settings query surface.
pub trait ConfigurationSource: Send + Sync {
    /// Current `remote.extensionKind` value keyed by extension id, if set.
    fn extension_kind_setting(&self) -> Option<BTreeMap<String, DeclaredExtensionKind>>;
}

/// In-memory settings snapshot.
///
/// Deserializes from a flat settings object; keys other than
/// `remote.extensionKind` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticConfiguration {
    #[serde(
        rename = "remote.extensionKind",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub extension_kind: Option<BTreeMap<String, DeclaredExtensionKind>>,
}

impl StaticConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces one override entry.
    pub fn with_extension_kind(
        mut self,
        extension_id: impl Into<String>,
        kind: impl Into<DeclaredExtensionKind>,
    ) -> Self {
        self.extension_kind
            .get_or_insert_with(BTreeMap::new)
            .insert(extension_id.into(), kind.into());
        self
    }
}

impl ConfigurationSource for StaticConfiguration {
    fn extension_kind_setting(&self) -> Option<BTreeMap<String, DeclaredExtensionKind>> {
        self.extension_kind.clone()
    }
}
