//! Extension identity canonicalization.
//!
//! # Invariants
//! - Keys are case-insensitive: `Pub.Ext` and `pub.ext` are the same key.
//! - Every identity-keyed lookup (settings, product metadata, caches) goes
//!   through `ExtensionIdentityKey`.

use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Canonical gallery identifier, `publisher.name` with case preserved.
pub fn gallery_id(publisher: &str, name: &str) -> String {
    format!("{publisher}.{name}")
}

/// Case-normalized lookup key for one extension.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ExtensionIdentityKey(String);

impl ExtensionIdentityKey {
    /// Key for a manifest's `publisher` and `name`.
    pub fn from_parts(publisher: &str, name: &str) -> Self {
        Self::from_id(&gallery_id(publisher, name))
    }

    /// Key for an already-joined identifier string.
    pub fn from_id(id: &str) -> Self {
        Self(id.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ExtensionIdentityKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
