//! Workspace trust requirement resolution.
//!
//! # Invariants
//! - Trust checking disabled, or no native entry point, always yields `never`.
//! - Otherwise: product override, then manifest request, then product
//!   default, then `onStart`.

use crate::model::identity::ExtensionIdentityKey;
use crate::model::manifest::ExtensionManifest;
use crate::model::trust::{ProductTrustValues, TrustRequirement};
use crate::resolver::cache::SnapshotCache;
use crate::sources::product::ProductMetadataSource;
use crate::sources::workspace_trust::WorkspaceTrustQuery;
use log::debug;
use std::collections::BTreeMap;
use std::sync::Arc;

type TrustByIdentity = BTreeMap<ExtensionIdentityKey, ProductTrustValues>;

/// Decides when an extension needs a trusted workspace.
pub struct WorkspaceTrustResolver {
    product: Arc<dyn ProductMetadataSource>,
    product_trust_values: SnapshotCache<TrustByIdentity>,
}

impl WorkspaceTrustResolver {
    pub fn new(product: Arc<dyn ProductMetadataSource>) -> Self {
        Self {
            product,
            product_trust_values: SnapshotCache::new("product_trust_values"),
        }
    }

    pub fn get_extension_workspace_trust_requirement(
        &self,
        manifest: &ExtensionManifest,
        trust: &dyn WorkspaceTrustQuery,
    ) -> TrustRequirement {
        if !trust.is_workspace_trust_enabled() || !manifest.has_main() {
            return TrustRequirement::Never;
        }

        let key = manifest.identity_key();
        let product_values = self
            .product_trust_values()
            .get(&key)
            .copied()
            .unwrap_or_default();

        let requirement = product_values
            .override_value
            .or_else(|| manifest.declared_trust_request())
            .or(product_values.default_value)
            .unwrap_or(TrustRequirement::OnStart);
        debug!(
            "event=trust_requirement_resolved module=trust status=ok extension={} requirement={}",
            key, requirement
        );
        requirement
    }

    /// Drops the product trust snapshot.
    pub fn reset_caches(&mut self) {
        self.product_trust_values.reset();
    }

    fn product_trust_values(&self) -> &TrustByIdentity {
        self.product_trust_values.get_or_build(|| {
            let values = self
                .product
                .extension_workspace_trust()
                .unwrap_or_default()
                .into_iter()
                .map(|(id, values)| (ExtensionIdentityKey::from_id(&id), values))
                .collect::<TrustByIdentity>();
            debug!(
                "event=product_trust_loaded module=trust status=ok entries={}",
                values.len()
            );
            values
        })
    }
}

#[cfg(test)]
mod tests {
    use super::WorkspaceTrustResolver;
    use crate::model::manifest::{ExtensionManifest, WorkspaceTrustDeclaration};
    use crate::model::trust::{ProductTrustValues, TrustRequirement};
    use crate::sources::product::ProductMetadata;
    use crate::sources::workspace_trust::FixedWorkspaceTrust;
    use std::sync::Arc;

    fn native_manifest(request: Option<TrustRequirement>) -> ExtensionManifest {
        let mut manifest = ExtensionManifest::new("Acme", "Runner");
        manifest.main = Some("./out/main.js".to_string());
        manifest.workspace_trust = Some(WorkspaceTrustDeclaration { request });
        manifest
    }

    #[test]
    fn declarative_extension_never_needs_trust() {
        let product = ProductMetadata::new().with_workspace_trust(
            "acme.runner",
            ProductTrustValues {
                override_value: Some(TrustRequirement::OnStart),
                default_value: None,
            },
        );
        let resolver = WorkspaceTrustResolver::new(Arc::new(product));
        let mut manifest = native_manifest(None);
        manifest.main = None;

        assert_eq!(
            resolver
                .get_extension_workspace_trust_requirement(&manifest, &FixedWorkspaceTrust::enabled()),
            TrustRequirement::Never
        );
    }

    #[test]
    fn manifest_request_passes_through_unchanged() {
        let resolver = WorkspaceTrustResolver::new(Arc::new(ProductMetadata::new()));
        let manifest = native_manifest(Some(TrustRequirement::OnDemand));
        assert_eq!(
            resolver
                .get_extension_workspace_trust_requirement(&manifest, &FixedWorkspaceTrust::enabled()),
            TrustRequirement::OnDemand
        );
    }

    #[test]
    fn falls_back_to_on_start() {
        let resolver = WorkspaceTrustResolver::new(Arc::new(ProductMetadata::new()));
        let manifest = native_manifest(None);
        assert_eq!(
            resolver
                .get_extension_workspace_trust_requirement(&manifest, &FixedWorkspaceTrust::enabled()),
            TrustRequirement::OnStart
        );
    }
}
