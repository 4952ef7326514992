//! Combined extension policy facade.
//!
//! Wires both resolvers over one product metadata source so hosts can ask
//! for locality and trust in a single call.

use crate::model::identity::ExtensionIdentityKey;
use crate::model::locality::LocalityList;
use crate::model::manifest::ExtensionManifest;
use crate::model::trust::TrustRequirement;
use crate::resolver::kind::{ExtensionKindResolver, ExtensionKindSource};
use crate::resolver::trust::WorkspaceTrustResolver;
use crate::sources::configuration::ConfigurationSource;
use crate::sources::extension_points::ExtensionPointRegistry;
use crate::sources::product::ProductMetadataSource;
use crate::sources::workspace_trust::WorkspaceTrustQuery;
use log::info;
use serde::Serialize;
use std::sync::Arc;

/// Resolved execution policy for one extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionPolicy {
    pub identity: ExtensionIdentityKey,
    pub kinds: LocalityList,
    pub kind_source: ExtensionKindSource,
    pub trust_requirement: TrustRequirement,
}

/// Owns the locality and trust resolvers for one host process.
pub struct ExtensionPolicyService {
    kinds: ExtensionKindResolver,
    trust: WorkspaceTrustResolver,
}

impl ExtensionPolicyService {
    pub fn new(
        configuration: Arc<dyn ConfigurationSource>,
        product: Arc<dyn ProductMetadataSource>,
        extension_points: Arc<dyn ExtensionPointRegistry>,
    ) -> Self {
        Self {
            kinds: ExtensionKindResolver::new(configuration, Arc::clone(&product), extension_points),
            trust: WorkspaceTrustResolver::new(product),
        }
    }

    pub fn kind_resolver(&self) -> &ExtensionKindResolver {
        &self.kinds
    }

    pub fn trust_resolver(&self) -> &WorkspaceTrustResolver {
        &self.trust
    }

    /// Resolves locality and trust requirement for `manifest`.
    pub fn resolve(
        &self,
        manifest: &ExtensionManifest,
        trust: &dyn WorkspaceTrustQuery,
    ) -> ExtensionPolicy {
        let resolved = self.kinds.resolve_extension_kind(manifest);
        ExtensionPolicy {
            identity: manifest.identity_key(),
            kinds: resolved.kinds,
            kind_source: resolved.source,
            trust_requirement: self
                .trust
                .get_extension_workspace_trust_requirement(manifest, trust),
        }
    }

    /// Invalidates every snapshot held by both resolvers.
    pub fn reset_caches(&mut self) {
        self.kinds.reset_caches();
        self.trust.reset_caches();
        info!("event=policy_caches_reset module=policy status=ok");
    }
}

#[cfg(test)]
mod tests {
    use super::ExtensionPolicyService;
    use crate::model::locality::LocalityClass;
    use crate::model::manifest::ExtensionManifest;
    use crate::model::trust::TrustRequirement;
    use crate::resolver::kind::ExtensionKindSource;
    use crate::sources::configuration::StaticConfiguration;
    use crate::sources::extension_points::StaticExtensionPointRegistry;
    use crate::sources::product::ProductMetadata;
    use crate::sources::workspace_trust::FixedWorkspaceTrust;
    use std::sync::Arc;

    #[test]
    fn resolves_locality_and_trust_together() {
        let service = ExtensionPolicyService::new(
            Arc::new(StaticConfiguration::new()),
            Arc::new(ProductMetadata::new()),
            Arc::new(StaticExtensionPointRegistry::new()),
        );
        let mut manifest = ExtensionManifest::new("Acme", "Server");
        manifest.main = Some("./out/main.js".to_string());

        let policy = service.resolve(&manifest, &FixedWorkspaceTrust::enabled());
        assert_eq!(policy.identity.as_str(), "acme.server");
        assert_eq!(policy.kinds.as_slice(), &[LocalityClass::Workspace]);
        assert_eq!(policy.kind_source, ExtensionKindSource::Deduced);
        assert_eq!(policy.trust_requirement, TrustRequirement::OnStart);
    }
}
