//! Workspace trust subsystem query surface.

/// Narrow view of the workspace trust subsystem.
pub trait WorkspaceTrustQuery {
    /// `false` when trust checking is disabled globally.
    fn is_workspace_trust_enabled(&self) -> bool;
}

/// Trust query answering with a fixed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWorkspaceTrust {
    pub enabled: bool,
}

impl FixedWorkspaceTrust {
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }
}

impl WorkspaceTrustQuery for FixedWorkspaceTrust {
    fn is_workspace_trust_enabled(&self) -> bool {
        self.enabled
    }
}
