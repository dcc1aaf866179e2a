//! Scope token recognition and expansion
//!
//! ```
//! use cretoai_scopes::hierarchy::{HierarchyGraph, ScopeDeclaration, ScopeItem};
//! use cretoai_scopes::expand::expand_scopes;
//!
//! let graph = HierarchyGraph::build(&ScopeDeclaration::new(vec![
//!     ScopeItem::nested("admin", vec!["user".into()]),
//! ])).unwrap();
//!
//! let scopes = expand_scopes(&["[user]", "other"], &graph).unwrap();
//! assert_eq!(scopes, vec!["user", "admin", "other"]);
//! ```

mod expander;
mod token;

pub use expander::{expand_scopes, expand_token};
pub use token::{is_expandable, unwrap_brackets, Modifier, ScopeToken};
