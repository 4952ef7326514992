//! Execution policy resolution for editor extensions.
//!
//! Decides where an extension's code may run (`ui`, `workspace`, `web`) and
//! whether it needs a trusted workspace, by precedence over user settings,
//! product defaults and the extension's own manifest.

pub mod logging;
pub mod model;
pub mod policy;
pub mod resolver;
pub mod sources;

pub use logging::{
    default_log_level, init_logging, logging_status, parse_log_level, LoggingError,
};
pub use model::identity::{gallery_id, ExtensionIdentityKey};
pub use model::locality::{
    parse_locality_class, DeclaredExtensionKind, LocalityClass, LocalityClassError, LocalityList,
    LocalityListError,
};
pub use model::manifest::{ExtensionManifest, WorkspaceTrustDeclaration};
pub use model::trust::{ProductTrustValues, TrustRequirement};
pub use policy::{ExtensionPolicy, ExtensionPolicyService};
pub use resolver::cache::SnapshotCache;
pub use resolver::kind::{
    deduce_extension_kind, ExtensionKindResolver, ExtensionKindSource, ResolvedExtensionKind,
};
pub use resolver::trust::WorkspaceTrustResolver;
pub use sources::configuration::{
    ConfigurationSource, StaticConfiguration, REMOTE_EXTENSION_KIND_SETTING,
};
pub use sources::extension_points::{
    ExtensionPointDescriptor, ExtensionPointRegistry, ExtensionPointRegistryError,
    StaticExtensionPointRegistry,
};
pub use sources::product::{ProductMetadata, ProductMetadataSource};
pub use sources::workspace_trust::{FixedWorkspaceTrust, WorkspaceTrustQuery};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
