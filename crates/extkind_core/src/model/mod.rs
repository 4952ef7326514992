//! Typed data model for extension execution policy.
//!
//! # Responsibility
//! - Define locality classes, preference lists and trust requirement values.
//! - Provide the manifest snapshot and identity key every lookup is keyed by.
//!
//! # Invariants
//! - Declared single-or-list values are normalized once into `LocalityList`.
//! - Identity keys are case-insensitive.

pub mod identity;
pub mod locality;
pub mod manifest;
pub mod trust;
