//! Process-lifetime snapshot memoization.
//!
//! # Invariants
//! - A snapshot is built at most once between resets, even when several
//!   threads race on the first lookup.
//! - A built snapshot is never refreshed from its source implicitly; hosts
//!   whose sources change at runtime must call `reset`.

use log::debug;
use once_cell::sync::OnceCell;

/// Lazily built, read-only snapshot derived from one external source.
#[derive(Debug)]
pub struct SnapshotCache<T> {
    name: &'static str,
    cell: OnceCell<T>,
}

impl<T> SnapshotCache<T> {
    /// Creates an empty cache; `name` is only used in log events.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            cell: OnceCell::new(),
        }
    }

    /// Returns the snapshot, building it with `build` on first access.
    pub fn get_or_build(&self, build: impl FnOnce() -> T) -> &T {
        self.cell.get_or_init(|| {
            let value = build();
            debug!("event=cache_build module=resolver status=ok cache={}", self.name);
            value
        })
    }

    pub fn is_built(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Drops the snapshot so the next lookup rebuilds it from the source.
    pub fn reset(&mut self) {
        if self.cell.take().is_some() {
            debug!("event=cache_reset module=resolver status=ok cache={}", self.name);
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}
