//! # CretoAI Nested Scopes
//!
//! Expands hierarchical scope declarations into the flat scope lists understood by
//! the authorization layer.
//!
//! ## Features
//!
//! - **Scope hierarchy** declared as nested `scope` / `subscopes` records
//! - **Upward expansion**: `[user]` and `[!user]` also grant or forbid every ancestor
//! - **Downward expansion**: `[+user]` also requires every descendant
//! - **Route transform** that rewrites `auth.access` declarations in place
//! - **Per-realm caching** of built hierarchies via DashMap
//!
//! ## Example
//!
//! ```rust
//! use cretoai_scopes::{expand_scopes, HierarchyGraph, ScopeDeclaration, ScopeItem};
//!
//! let declaration = ScopeDeclaration::new(vec![
//!     ScopeItem::nested("admin", vec![
//!         "app".into(),
//!         ScopeItem::nested("user", vec!["group-one".into(), "group-two".into()]),
//!     ]),
//! ]);
//!
//! let graph = HierarchyGraph::build(&declaration)?;
//!
//! let scopes = expand_scopes(&["[group-one]", "[+user]", "other"], &graph)?;
//! assert_eq!(
//!     scopes,
//!     vec!["group-one", "user", "admin", "+user", "+group-two", "+group-one", "other"]
//! );
//! # Ok::<(), cretoai_scopes::ScopeError>(())
//! ```

pub mod access;
pub mod config;
pub mod error;
pub mod expand;
pub mod hierarchy;
pub mod transform;

#[cfg(test)]
mod fixtures;

// Re-export commonly used types
pub use access::{AccessConfig, AccessRule, ScopeRequirement, ScopeSelection, SelectedRule};
pub use config::TransformConfig;
pub use error::{ConfigError, ScopeError, ScopeResult};
pub use expand::{expand_scopes, expand_token, Modifier};
pub use hierarchy::{build_hierarchy, HierarchyGraph, ScopeDeclaration, ScopeItem};
pub use transform::{HierarchyCache, NestedScopes};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
