//! Extension-point registry contracts.

use crate::model::locality::LocalityClass;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One registered contribution point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionPointDescriptor {
    /// Contribution-point name as used under manifest `contributes`.
    pub name: String,
    /// Registry-declared default locality for contributors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_extension_kind: Option<LocalityClass>,
}

impl ExtensionPointDescriptor {
    pub fn new(name: impl Into<String>, default_extension_kind: Option<LocalityClass>) -> Self {
        Self {
            name: name.into(),
            default_extension_kind,
        }
    }

    /// Contribution points not defaulting to `workspace` are UI-capable.
    pub fn is_ui_capable(&self) -> bool {
        self.default_extension_kind != Some(LocalityClass::Workspace)
    }
}

/// Extension-point registry query surface.
pub trait ExtensionPointRegistry: Send + Sync {
    fn extension_points(&self) -> Vec<ExtensionPointDescriptor>;
}

/// In-memory extension-point registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticExtensionPointRegistry {
    points: Vec<ExtensionPointDescriptor>,
}

impl StaticExtensionPointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from a descriptor list, e.g. a deserialized
    /// `[{ "name": ..., "defaultExtensionKind": ... }]` document.
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = ExtensionPointDescriptor>,
    ) -> Result<Self, ExtensionPointRegistryError> {
        let mut registry = Self::new();
        for descriptor in descriptors {
            registry.register(descriptor)?;
        }
        Ok(registry)
    }

    /// Registers one contribution point; names must be unique and non-empty.
    pub fn register(
        &mut self,
        descriptor: ExtensionPointDescriptor,
    ) -> Result<(), ExtensionPointRegistryError> {
        if descriptor.name.trim().is_empty() {
            return Err(ExtensionPointRegistryError::EmptyName);
        }
        if self.points.iter().any(|point| point.name == descriptor.name) {
            return Err(ExtensionPointRegistryError::DuplicateName(descriptor.name));
        }
        self.points.push(descriptor);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ExtensionPointDescriptor> {
        self.points.iter().find(|point| point.name == name)
    }
}

impl ExtensionPointRegistry for StaticExtensionPointRegistry {
    fn extension_points(&self) -> Vec<ExtensionPointDescriptor> {
        self.points.clone()
    }
}

/// Extension-point registration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionPointRegistryError {
    EmptyName,
    DuplicateName(String),
}

impl Display for ExtensionPointRegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "extension point name must not be empty"),
            Self::DuplicateName(name) => {
                write!(f, "extension point already registered: {name}")
            }
        }
    }
}

impl Error for ExtensionPointRegistryError {}
