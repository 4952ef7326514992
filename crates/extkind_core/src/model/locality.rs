//! Execution locality classes and ordered preference lists.
//!
//! # Responsibility
//! - Define where extension code may execute (`ui`, `workspace`, `web`).
//! - Normalize declared single-or-list values into one canonical list shape.
//!
//! # Invariants
//! - A `LocalityList` is never empty and never holds the same class twice.
//! - The first element of a `LocalityList` is the most preferred locality.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Manifest string value for UI-local execution.
pub const LOCALITY_UI: &str = "ui";
/// Manifest string value for workspace-side execution.
pub const LOCALITY_WORKSPACE: &str = "workspace";
/// Manifest string value for browser-hosted execution.
pub const LOCALITY_WEB: &str = "web";

/// Where extension code is permitted or preferred to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocalityClass {
    /// Same process/machine as the user interface.
    Ui,
    /// Wherever the workspace's backing resources live (may be remote).
    Workspace,
    /// Browser-hosted extension host.
    Web,
}

impl LocalityClass {
    /// Stable string id used in manifests and settings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ui => LOCALITY_UI,
            Self::Workspace => LOCALITY_WORKSPACE,
            Self::Web => LOCALITY_WEB,
        }
    }
}

impl Display for LocalityClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses one locality class from its manifest string value.
pub fn parse_locality_class(value: &str) -> Result<LocalityClass, LocalityClassError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(LocalityClassError::EmptyLocalityClass);
    }

    match normalized {
        LOCALITY_UI => Ok(LocalityClass::Ui),
        LOCALITY_WORKSPACE => Ok(LocalityClass::Workspace),
        LOCALITY_WEB => Ok(LocalityClass::Web),
        other => Err(LocalityClassError::UnsupportedLocalityClass(
            other.to_string(),
        )),
    }
}

/// Locality class parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalityClassError {
    EmptyLocalityClass,
    UnsupportedLocalityClass(String),
}

impl Display for LocalityClassError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyLocalityClass => write!(f, "locality class value must not be empty"),
            Self::UnsupportedLocalityClass(value) => {
                write!(f, "locality class is unsupported: {value}")
            }
        }
    }
}

impl Error for LocalityClassError {}

/// Ordered, non-empty list of locality classes.
///
/// Order encodes preference: [`LocalityList::most_preferred`] is the class the
/// extension should run in when every listed host is available.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LocalityList(Vec<LocalityClass>);

impl LocalityList {
    /// Builds a list, rejecting empty input and repeated classes.
    pub fn new(classes: Vec<LocalityClass>) -> Result<Self, LocalityListError> {
        if classes.is_empty() {
            return Err(LocalityListError::Empty);
        }
        for (index, class) in classes.iter().enumerate() {
            if classes[..index].contains(class) {
                return Err(LocalityListError::Duplicate(*class));
            }
        }
        Ok(Self(classes))
    }

    /// Builds a list from externally declared values.
    ///
    /// Later repeats of a class are dropped. Returns `None` when nothing is
    /// declared so callers fall through to the next precedence source.
    pub fn from_declared(classes: &[LocalityClass]) -> Option<Self> {
        let mut deduped = Vec::with_capacity(classes.len());
        for class in classes {
            if !deduped.contains(class) {
                deduped.push(*class);
            }
        }
        if deduped.is_empty() {
            return None;
        }
        Some(Self(deduped))
    }

    /// One-element list.
    pub fn single(class: LocalityClass) -> Self {
        Self(vec![class])
    }

    /// `[ui, workspace]`: UI-local, falling back to the workspace host.
    pub fn ui_with_workspace_fallback() -> Self {
        Self(vec![LocalityClass::Ui, LocalityClass::Workspace])
    }

    /// `[workspace, web]`: native code that also ships a web entry point.
    pub fn workspace_then_web() -> Self {
        Self(vec![LocalityClass::Workspace, LocalityClass::Web])
    }

    /// `[ui, workspace, web]`: runnable anywhere, UI first.
    pub fn anywhere() -> Self {
        Self(vec![
            LocalityClass::Ui,
            LocalityClass::Workspace,
            LocalityClass::Web,
        ])
    }

    /// The most preferred locality (first element).
    ///
    /// Every constructor rejects or refuses empty input, so the first
    /// element always exists.
    pub fn most_preferred(&self) -> LocalityClass {
        self.0[0]
    }

    /// Membership test, independent of position.
    pub fn contains(&self, class: LocalityClass) -> bool {
        self.0.contains(&class)
    }

    pub fn as_slice(&self) -> &[LocalityClass] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = LocalityClass> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Display for LocalityList {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let rendered = self
            .0
            .iter()
            .map(|class| class.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&rendered)
    }
}

/// Strict locality list construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalityListError {
    Empty,
    Duplicate(LocalityClass),
}

impl Display for LocalityListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "locality list must not be empty"),
            Self::Duplicate(class) => write!(f, "locality list repeats class: {class}"),
        }
    }
}

impl Error for LocalityListError {}

/// Wire shape of `extensionKind` declarations: one class or an ordered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeclaredExtensionKind {
    Single(LocalityClass),
    Many(Vec<LocalityClass>),
}

impl DeclaredExtensionKind {
    /// Normalizes a declaration into a preference list.
    ///
    /// A bare `ui` expands to `[ui, workspace]`; any other bare class stays a
    /// single-element list. Lists keep their order. Empty lists yield `None`.
    pub fn normalize(&self) -> Option<LocalityList> {
        match self {
            Self::Single(LocalityClass::Ui) => Some(LocalityList::ui_with_workspace_fallback()),
            Self::Single(class) => Some(LocalityList::single(*class)),
            Self::Many(classes) => LocalityList::from_declared(classes),
        }
    }
}

impl From<LocalityClass> for DeclaredExtensionKind {
    fn from(value: LocalityClass) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<LocalityClass>> for DeclaredExtensionKind {
    fn from(value: Vec<LocalityClass>) -> Self {
        Self::Many(value)
    }
}
