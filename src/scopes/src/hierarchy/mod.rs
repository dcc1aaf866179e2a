//! Scope hierarchy module
//!
//! Converts an operator-authored declaration of nested scopes into an immutable
//! graph that supports ancestor walks and descendant floods.
//!
//! # Examples
//!
//! ```
//! use cretoai_scopes::hierarchy::{HierarchyGraph, ScopeDeclaration};
//!
//! let declaration: ScopeDeclaration = serde_json::from_str(
//!     r#"[{ "scope": "grandpa", "subscopes": "dad" }, "grandma"]"#,
//! ).unwrap();
//!
//! let graph = HierarchyGraph::build(&declaration).unwrap();
//! assert_eq!(graph.len(), 3);
//! assert_eq!(graph.parent("dad"), Some("grandpa"));
//! ```

mod graph;
mod types;


pub use graph::{build_hierarchy, HierarchyGraph};
pub use types::{NestedScope, ScopeDeclaration, ScopeItem};
