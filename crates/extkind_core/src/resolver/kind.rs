//! Execution-locality resolution.
//!
//! # Responsibility
//! - Resolve the ordered locality list for one extension manifest.
//! - Deduce a locality list from manifest shape when nobody declares one.
//!
//! # Invariants
//! - Precedence is settings, then product defaults, then the manifest, then
//!   deduction. The first source with an entry wins outright; sources are
//!   never merged.
//! - The resolved list is never empty.

use crate::model::identity::ExtensionIdentityKey;
use crate::model::locality::{DeclaredExtensionKind, LocalityClass, LocalityList};
use crate::model::manifest::ExtensionManifest;
use crate::resolver::cache::SnapshotCache;
use crate::sources::configuration::{ConfigurationSource, REMOTE_EXTENSION_KIND_SETTING};
use crate::sources::extension_points::ExtensionPointRegistry;
use crate::sources::product::ProductMetadataSource;
use log::{debug, warn};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};
use std::sync::Arc;

type KindsByIdentity = BTreeMap<ExtensionIdentityKey, LocalityList>;

/// Precedence level that answered a locality lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionKindSource {
    /// `remote.extensionKind` setting.
    Configured,
    /// Product metadata default.
    Product,
    /// Manifest `extensionKind` declaration.
    Manifest,
    /// Deduction heuristic over manifest shape.
    Deduced,
}

impl ExtensionKindSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Configured => "configured",
            Self::Product => "product",
            Self::Manifest => "manifest",
            Self::Deduced => "deduced",
        }
    }
}

impl Display for ExtensionKindSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved locality list plus the precedence level it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedExtensionKind {
    pub kinds: LocalityList,
    pub source: ExtensionKindSource,
}

/// Deduces a locality list from manifest shape alone.
///
/// `is_ui_extension_point` reports whether a contribution-point name is
/// UI-capable; unknown names must report `false`.
pub fn deduce_extension_kind(
    manifest: &ExtensionManifest,
    is_ui_extension_point: impl Fn(&str) -> bool,
) -> LocalityList {
    if manifest.has_main() {
        if manifest.has_browser() {
            return LocalityList::workspace_then_web();
        }
        return LocalityList::single(LocalityClass::Workspace);
    }

    if manifest.has_browser() {
        return LocalityList::single(LocalityClass::Web);
    }

    if manifest.has_dependencies_or_pack() {
        return LocalityList::single(LocalityClass::Workspace);
    }

    if manifest
        .contribution_points()
        .any(|point| !is_ui_extension_point(point))
    {
        return LocalityList::single(LocalityClass::Workspace);
    }

    LocalityList::anywhere()
}

/// Resolves where extension code may run.
///
/// Settings, product metadata and the extension-point registry are each read
/// once, on first need, and the derived snapshot is reused until
/// [`ExtensionKindResolver::reset_caches`].
pub struct ExtensionKindResolver {
    configuration: Arc<dyn ConfigurationSource>,
    product: Arc<dyn ProductMetadataSource>,
    extension_points: Arc<dyn ExtensionPointRegistry>,
    configured_kinds: SnapshotCache<KindsByIdentity>,
    product_kinds: SnapshotCache<KindsByIdentity>,
    ui_extension_points: SnapshotCache<BTreeSet<String>>,
}

impl ExtensionKindResolver {
    pub fn new(
        configuration: Arc<dyn ConfigurationSource>,
        product: Arc<dyn ProductMetadataSource>,
        extension_points: Arc<dyn ExtensionPointRegistry>,
    ) -> Self {
        Self {
            configuration,
            product,
            extension_points,
            configured_kinds: SnapshotCache::new("configured_kinds"),
            product_kinds: SnapshotCache::new("product_kinds"),
            ui_extension_points: SnapshotCache::new("ui_extension_points"),
        }
    }

    /// Ordered locality list for `manifest`; never empty.
    pub fn get_extension_kind(&self, manifest: &ExtensionManifest) -> LocalityList {
        self.resolve_extension_kind(manifest).kinds
    }

    /// Same as [`Self::get_extension_kind`], also reporting which source won.
    pub fn resolve_extension_kind(&self, manifest: &ExtensionManifest) -> ResolvedExtensionKind {
        let key = manifest.identity_key();
        let resolved = self.lookup_declared(&key, manifest).unwrap_or_else(|| {
            ResolvedExtensionKind {
                kinds: self.deduce_extension_kind(manifest),
                source: ExtensionKindSource::Deduced,
            }
        });
        debug!(
            "event=extension_kind_resolved module=kind status=ok extension={} source={} kinds=[{}]",
            key, resolved.source, resolved.kinds
        );
        resolved
    }

    fn lookup_declared(
        &self,
        key: &ExtensionIdentityKey,
        manifest: &ExtensionManifest,
    ) -> Option<ResolvedExtensionKind> {
        if let Some(kinds) = self.configured_kinds().get(key) {
            return Some(ResolvedExtensionKind {
                kinds: kinds.clone(),
                source: ExtensionKindSource::Configured,
            });
        }

        if let Some(kinds) = self.product_kinds().get(key) {
            return Some(ResolvedExtensionKind {
                kinds: kinds.clone(),
                source: ExtensionKindSource::Product,
            });
        }

        manifest
            .extension_kind
            .as_ref()
            .and_then(DeclaredExtensionKind::normalize)
            .map(|kinds| ResolvedExtensionKind {
                kinds,
                source: ExtensionKindSource::Manifest,
            })
    }

    pub fn prefers_execute_on_ui(&self, manifest: &ExtensionManifest) -> bool {
        self.prefers(manifest, LocalityClass::Ui)
    }

    pub fn prefers_execute_on_workspace(&self, manifest: &ExtensionManifest) -> bool {
        self.prefers(manifest, LocalityClass::Workspace)
    }

    pub fn prefers_execute_on_web(&self, manifest: &ExtensionManifest) -> bool {
        self.prefers(manifest, LocalityClass::Web)
    }

    pub fn can_execute_on_ui(&self, manifest: &ExtensionManifest) -> bool {
        self.get_extension_kind(manifest).contains(LocalityClass::Ui)
    }

    pub fn can_execute_on_workspace(&self, manifest: &ExtensionManifest) -> bool {
        self.get_extension_kind(manifest)
            .contains(LocalityClass::Workspace)
    }

    pub fn can_execute_on_web(&self, manifest: &ExtensionManifest) -> bool {
        self.get_extension_kind(manifest).contains(LocalityClass::Web)
    }

    fn prefers(&self, manifest: &ExtensionManifest, class: LocalityClass) -> bool {
        self.get_extension_kind(manifest).most_preferred() == class
    }

    /// Deduction heuristic backed by the cached UI-capable point set.
    pub fn deduce_extension_kind(&self, manifest: &ExtensionManifest) -> LocalityList {
        let ui_points = self.ui_extension_points();
        deduce_extension_kind(manifest, |point| ui_points.contains(point))
    }

    /// `true` when the registry declares `name` with a non-`workspace` default.
    pub fn is_ui_extension_point(&self, name: &str) -> bool {
        self.ui_extension_points().contains(name)
    }

    /// Drops every snapshot; the next lookup re-reads its source.
    pub fn reset_caches(&mut self) {
        self.configured_kinds.reset();
        self.product_kinds.reset();
        self.ui_extension_points.reset();
    }

    fn configured_kinds(&self) -> &KindsByIdentity {
        self.configured_kinds.get_or_build(|| {
            let setting = self.configuration.extension_kind_setting().unwrap_or_default();
            let mut kinds = KindsByIdentity::new();
            for (id, declared) in setting {
                match declared.normalize() {
                    Some(list) => {
                        kinds.insert(ExtensionIdentityKey::from_id(&id), list);
                    }
                    None => warn!(
                        "event=setting_entry_skipped module=kind status=degraded setting={} extension={} reason=empty_list",
                        REMOTE_EXTENSION_KIND_SETTING, id
                    ),
                }
            }
            debug!(
                "event=configured_kinds_loaded module=kind status=ok entries={}",
                kinds.len()
            );
            kinds
        })
    }

    fn product_kinds(&self) -> &KindsByIdentity {
        self.product_kinds.get_or_build(|| {
            let declared = self.product.extension_kind().unwrap_or_default();
            let mut kinds = KindsByIdentity::new();
            for (id, classes) in declared {
                match LocalityList::from_declared(&classes) {
                    Some(list) => {
                        kinds.insert(ExtensionIdentityKey::from_id(&id), list);
                    }
                    None => warn!(
                        "event=product_entry_skipped module=kind status=degraded extension={} reason=empty_list",
                        id
                    ),
                }
            }
            debug!(
                "event=product_kinds_loaded module=kind status=ok entries={}",
                kinds.len()
            );
            kinds
        })
    }

    fn ui_extension_points(&self) -> &BTreeSet<String> {
        self.ui_extension_points.get_or_build(|| {
            let points = self
                .extension_points
                .extension_points()
                .into_iter()
                .filter(|point| point.is_ui_capable())
                .map(|point| point.name)
                .collect::<BTreeSet<_>>();
            debug!(
                "event=ui_extension_points_loaded module=kind status=ok entries={}",
                points.len()
            );
            points
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{deduce_extension_kind, ExtensionKindResolver, ExtensionKindSource};
    use crate::model::locality::LocalityClass::{Ui, Web, Workspace};
    use crate::model::locality::{DeclaredExtensionKind, LocalityClass};
    use crate::model::manifest::ExtensionManifest;
    use crate::sources::configuration::StaticConfiguration;
    use crate::sources::extension_points::{
        ExtensionPointDescriptor, StaticExtensionPointRegistry,
    };
    use crate::sources::product::ProductMetadata;
    use std::sync::Arc;

    fn no_ui_points(_: &str) -> bool {
        false
    }

    fn resolver(
        configuration: StaticConfiguration,
        product: ProductMetadata,
    ) -> ExtensionKindResolver {
        let mut registry = StaticExtensionPointRegistry::new();
        registry
            .register(ExtensionPointDescriptor::new("themes", Some(Ui)))
            .expect("themes registration");
        registry
            .register(ExtensionPointDescriptor::new("debuggers", Some(Workspace)))
            .expect("debuggers registration");
        ExtensionKindResolver::new(Arc::new(configuration), Arc::new(product), Arc::new(registry))
    }

    #[test]
    fn main_entry_point_deduces_workspace() {
        let mut manifest = ExtensionManifest::new("acme", "native");
        manifest.main = Some("./out/main.js".to_string());
        assert_eq!(
            deduce_extension_kind(&manifest, no_ui_points).as_slice(),
            &[Workspace]
        );
    }

    #[test]
    fn main_and_browser_deduce_workspace_then_web() {
        let mut manifest = ExtensionManifest::new("acme", "hybrid");
        manifest.main = Some("./out/main.js".to_string());
        manifest.browser = Some("./out/web.js".to_string());
        manifest.extension_dependencies = vec!["acme.base".to_string()];
        assert_eq!(
            deduce_extension_kind(&manifest, no_ui_points).as_slice(),
            &[Workspace, Web]
        );
    }

    #[test]
    fn browser_only_deduces_web() {
        let mut manifest = ExtensionManifest::new("acme", "web");
        manifest.browser = Some("./out/web.js".to_string());
        assert_eq!(
            deduce_extension_kind(&manifest, no_ui_points).as_slice(),
            &[Web]
        );
    }

    #[test]
    fn pack_membership_deduces_workspace() {
        let mut manifest = ExtensionManifest::new("acme", "pack");
        manifest.extension_pack = vec!["acme.one".to_string()];
        assert_eq!(
            deduce_extension_kind(&manifest, |_| true).as_slice(),
            &[Workspace]
        );
    }

    #[test]
    fn declarative_manifest_deduces_anywhere() {
        let manifest = ExtensionManifest::new("acme", "empty");
        assert_eq!(
            deduce_extension_kind(&manifest, no_ui_points).as_slice(),
            &[Ui, Workspace, Web]
        );
    }

    #[test]
    fn configured_override_wins_over_every_other_source() {
        let resolver = resolver(
            StaticConfiguration::new().with_extension_kind("Acme.Theme", Web),
            ProductMetadata::new().with_extension_kind("acme.theme", vec![Workspace]),
        );
        let mut manifest = ExtensionManifest::new("acme", "theme");
        manifest.extension_kind = Some(Ui.into());

        let resolved = resolver.resolve_extension_kind(&manifest);
        assert_eq!(resolved.kinds.as_slice(), &[Web]);
        assert_eq!(resolved.source, ExtensionKindSource::Configured);
    }

    #[test]
    fn product_default_wins_over_manifest() {
        let resolver = resolver(
            StaticConfiguration::new(),
            ProductMetadata::new().with_extension_kind("acme.theme", vec![Workspace, Ui]),
        );
        let mut manifest = ExtensionManifest::new("acme", "theme");
        manifest.extension_kind = Some(Web.into());

        let resolved = resolver.resolve_extension_kind(&manifest);
        assert_eq!(resolved.kinds.as_slice(), &[Workspace, Ui]);
        assert_eq!(resolved.source, ExtensionKindSource::Product);
    }

    #[test]
    fn empty_declarations_fall_through_to_deduction() {
        let resolver = resolver(
            StaticConfiguration::new().with_extension_kind("acme.theme", Vec::<LocalityClass>::new()),
            ProductMetadata::new().with_extension_kind("acme.theme", vec![]),
        );
        let mut manifest = ExtensionManifest::new("acme", "theme");
        manifest.extension_kind = Some(DeclaredExtensionKind::Many(vec![]));

        let resolved = resolver.resolve_extension_kind(&manifest);
        assert_eq!(resolved.kinds.as_slice(), &[Ui, Workspace, Web]);
        assert_eq!(resolved.source, ExtensionKindSource::Deduced);
    }

    #[test]
    fn ui_extension_point_lookup_uses_registry_defaults() {
        let resolver = resolver(StaticConfiguration::new(), ProductMetadata::new());
        assert!(resolver.is_ui_extension_point("themes"));
        assert!(!resolver.is_ui_extension_point("debuggers"));
        assert!(!resolver.is_ui_extension_point("unregistered"));
    }
}
