//! Policy resolvers for extension execution locality and workspace trust.
//!
//! # Responsibility
//! - Merge settings, product metadata and manifest declarations by precedence.
//! - Memoize identity-keyed lookups for the lifetime of the resolver.
//!
//! # Invariants
//! - Resolution never fails; missing data falls through to a fixed default.
//! - Source snapshots are built once and reused until explicitly reset.

pub mod cache;
pub mod kind;
pub mod trust;
