//! Read-only collaborator contracts consumed by the resolvers.
//!
//! # Responsibility
//! - Define the narrow query surfaces for settings, product metadata, the
//!   extension-point registry and the workspace trust subsystem.
//! - Provide in-memory snapshots for hosts that already hold parsed data.
//!
//! # Invariants
//! - Sources are queried synchronously and never mutated by this crate.
//! - Every map keyed by extension id is re-keyed through
//!   `ExtensionIdentityKey` by the resolver caches, not by the sources.

pub mod configuration;
pub mod extension_points;
pub mod product;
pub mod workspace_trust;
