//! Route access declarations
//!
//! Parses a route's `auth.access` value, detects whether it uses nested scopes,
//! and rewrites it with every bracketed scope expanded.

mod rewrite;
mod selection;
mod types;

pub use rewrite::{needs_expansion, rewrite_access};
pub use selection::{ScopeSelection, SelectedRule};
pub use types::{AccessConfig, AccessRule, ScopeRequirement};
