//! Vendor/product metadata source.

use crate::model::locality::LocalityClass;
use crate::model::trust::ProductTrustValues;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Product metadata query surface.
pub trait ProductMetadataSource: Send + Sync {
    /// Product default locality lists keyed by extension id.
    fn extension_kind(&self) -> Option<BTreeMap<String, Vec<LocalityClass>>>;
    /// Product trust override/default values keyed by extension id.
    fn extension_workspace_trust(&self) -> Option<BTreeMap<String, ProductTrustValues>>;
}

/// In-memory product metadata snapshot (`product.json` shape).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_kind: Option<BTreeMap<String, Vec<LocalityClass>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_workspace_trust: Option<BTreeMap<String, ProductTrustValues>>,
}

impl ProductMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extension_kind(
        mut self,
        extension_id: impl Into<String>,
        kinds: Vec<LocalityClass>,
    ) -> Self {
        self.extension_kind
            .get_or_insert_with(BTreeMap::new)
            .insert(extension_id.into(), kinds);
        self
    }

    pub fn with_workspace_trust(
        mut self,
        extension_id: impl Into<String>,
        values: ProductTrustValues,
    ) -> Self {
        self.extension_workspace_trust
            .get_or_insert_with(BTreeMap::new)
            .insert(extension_id.into(), values);
        self
    }
}

impl ProductMetadataSource for ProductMetadata {
    fn extension_kind(&self) -> Option<BTreeMap<String, Vec<LocalityClass>>> {
        self.extension_kind.clone()
    }

    fn extension_workspace_trust(&self) -> Option<BTreeMap<String, ProductTrustValues>> {
        self.extension_workspace_trust.clone()
    }
}
