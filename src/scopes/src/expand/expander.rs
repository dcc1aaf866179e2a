//! Scope expander
//!
//! Turns one bracket-stripped token into the ordered list of scopes it implies.

use tracing::debug;

use super::token::{unwrap_brackets, ScopeToken};
use crate::error::ScopeResult;
use crate::hierarchy::HierarchyGraph;

/// Expands a single token against the hierarchy
///
/// The token is expected without its brackets but may carry a modifier:
///
/// - `+name` yields `name` and all of its descendants
/// - `!name` and `name` yield `name` and all of its ancestors
///
/// Every returned scope carries the token's modifier.
///
/// # Errors
///
/// Returns [`crate::ScopeError::UnknownScope`] if the scope is not declared.
///
/// # Example
///
/// ```
/// use cretoai_scopes::hierarchy::{HierarchyGraph, ScopeDeclaration, ScopeItem};
/// use cretoai_scopes::expand::expand_token;
///
/// let graph = HierarchyGraph::build(&ScopeDeclaration::new(vec![
///     ScopeItem::nested("grandpa", vec!["dad".into()]),
/// ])).unwrap();
///
/// assert_eq!(expand_token("!dad", &graph).unwrap(), vec!["!dad", "!grandpa"]);
/// assert_eq!(expand_token("+grandpa", &graph).unwrap(), vec!["+grandpa", "+dad"]);
/// ```
pub fn expand_token(token: &str, graph: &HierarchyGraph) -> ScopeResult<Vec<String>> {
    let token = ScopeToken::parse(token);

    let visited = if token.modifier.expands_downward() {
        graph.descendants(token.scope)?
    } else {
        graph.ancestors(token.scope)?
    };

    debug!(%token, expanded = visited.len(), "Expanded scope token");

    Ok(visited
        .into_iter()
        .map(|scope| token.modifier.apply(scope))
        .collect())
}

/// Rewrites a scope list, expanding every bracketed token in place
///
/// Plain tokens pass through unchanged. The result is flat, keeps input order
/// and is not deduplicated.
///
/// # Errors
///
/// Fails on the first bracketed token naming an undeclared scope.
pub fn expand_scopes<S: AsRef<str>>(
    scopes: &[S],
    graph: &HierarchyGraph,
) -> ScopeResult<Vec<String>> {
    let mut expanded = Vec::with_capacity(scopes.len());

    for scope in scopes {
        let scope = scope.as_ref();
        match unwrap_brackets(scope) {
            Some(inner) => expanded.extend(expand_token(inner, graph)?),
            None => expanded.push(scope.to_string()),
        }
    }

    Ok(expanded)
}
