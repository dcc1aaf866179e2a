//! Scope hierarchy graph
//!
//! One vertex per declared scope. Each vertex keeps its immediate subscopes
//! (parent → children, walked by descendant expansion) and its single parent
//! (child → parent, walked by ancestor expansion).

use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::types::{ScopeDeclaration, ScopeItem};
use crate::error::{ScopeError, ScopeResult};

/// Graph vertex for a single scope
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Vertex {
    /// Immediate subscopes, in declaration order
    children: Vec<String>,

    /// The scope that declared this one as a subscope
    parent: Option<String>,
}

/// Immutable scope hierarchy built from a [`ScopeDeclaration`]
///
/// # Example
///
/// ```
/// use cretoai_scopes::hierarchy::{HierarchyGraph, ScopeDeclaration, ScopeItem};
///
/// let declaration = ScopeDeclaration::new(vec![
///     ScopeItem::nested("admin", vec![ScopeItem::nested("user", vec!["group-one".into()])]),
/// ]);
///
/// let graph = HierarchyGraph::build(&declaration).unwrap();
/// assert_eq!(graph.ancestors("group-one").unwrap(), vec!["group-one", "user", "admin"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyGraph {
    /// Map of scope names to vertices
    vertices: HashMap<String, Vertex>,
}

impl HierarchyGraph {
    /// Builds the graph for a declaration
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::DuplicateScope`] if any scope name appears more than
    /// once anywhere in the declaration.
    pub fn build(declaration: &ScopeDeclaration) -> ScopeResult<Self> {
        let mut vertices: HashMap<String, Vertex> = HashMap::new();
        let mut stack: Vec<(&ScopeItem, Option<&str>)> =
            declaration.items().iter().map(|item| (item, None)).collect();

        while let Some((item, parent)) = stack.pop() {
            let name = item.scope();

            if vertices.contains_key(name) {
                return Err(ScopeError::DuplicateScope(name.to_string()));
            }

            let mut children = Vec::with_capacity(item.subscopes().len());
            for subscope in item.subscopes() {
                children.push(subscope.scope().to_string());
                stack.push((subscope, Some(name)));
            }

            vertices.insert(
                name.to_string(),
                Vertex {
                    children,
                    parent: parent.map(str::to_string),
                },
            );
        }

        debug!(scopes = vertices.len(), "Built scope hierarchy");

        Ok(Self { vertices })
    }

    /// Returns true if the scope is declared
    pub fn contains(&self, scope: &str) -> bool {
        self.vertices.contains_key(scope)
    }

    /// Returns the number of declared scopes
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if no scope is declared
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns all declared scope names, in no particular order
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.vertices.keys().map(String::as_str)
    }

    /// Returns the scopes that have no parent, sorted by name
    pub fn roots(&self) -> Vec<&str> {
        let mut roots: Vec<&str> = self
            .vertices
            .iter()
            .filter(|(_, vertex)| vertex.parent.is_none())
            .map(|(name, _)| name.as_str())
            .collect();
        roots.sort_unstable();
        roots
    }

    /// Returns the parent of a scope
    ///
    /// `None` if the scope is a root or is not declared.
    pub fn parent(&self, scope: &str) -> Option<&str> {
        self.vertices.get(scope)?.parent.as_deref()
    }

    /// Returns the immediate subscopes of a scope in declaration order
    pub fn children(&self, scope: &str) -> ScopeResult<&[String]> {
        Ok(&self.vertex(scope)?.children)
    }

    /// Walks from a scope up to its root
    ///
    /// The result starts with `scope` itself, followed by its parent, that parent's
    /// parent and so on.
    pub fn ancestors(&self, scope: &str) -> ScopeResult<Vec<&str>> {
        let mut current = self.vertex_entry(scope)?;
        let mut chain = vec![current.0];

        while let Some(parent) = current.1.parent.as_deref() {
            current = self.vertex_entry(parent)?;
            chain.push(current.0);
        }

        Ok(chain)
    }

    /// Floods from a scope down through all of its subscopes
    ///
    /// Depth-first with an explicit stack: subscopes are pushed in declaration order
    /// and the last one pushed is visited next. The result starts with `scope` itself
    /// and contains every descendant exactly once.
    pub fn descendants(&self, scope: &str) -> ScopeResult<Vec<&str>> {
        let (seed, _) = self.vertex_entry(scope)?;

        let mut visited: HashSet<&str> = HashSet::new();
        let mut order = Vec::new();
        let mut stack = vec![seed];

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            order.push(current);

            let (_, vertex) = self.vertex_entry(current)?;
            stack.extend(
                vertex
                    .children
                    .iter()
                    .map(String::as_str)
                    .filter(|child| !visited.contains(child)),
            );
        }

        Ok(order)
    }

    fn vertex(&self, scope: &str) -> ScopeResult<&Vertex> {
        self.vertices
            .get(scope)
            .ok_or_else(|| ScopeError::UnknownScope(scope.to_string()))
    }

    fn vertex_entry(&self, scope: &str) -> ScopeResult<(&str, &Vertex)> {
        self.vertices
            .get_key_value(scope)
            .map(|(name, vertex)| (name.as_str(), vertex))
            .ok_or_else(|| ScopeError::UnknownScope(scope.to_string()))
    }
}

/// Builds the hierarchy graph for a declaration
///
/// Shorthand for [`HierarchyGraph::build`].
pub fn build_hierarchy(declaration: &ScopeDeclaration) -> ScopeResult<HierarchyGraph> {
    HierarchyGraph::build(declaration)
}
