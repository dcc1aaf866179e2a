//! Access declaration rewriting

use super::types::{AccessConfig, AccessRule, ScopeRequirement};
use crate::error::ScopeResult;
use crate::expand::{expand_scopes, is_expandable};
use crate::hierarchy::HierarchyGraph;

impl AccessRule {
    /// Returns true if the rule's scope list contains a bracketed token
    pub fn needs_expansion(&self) -> bool {
        self.scopes()
            .is_some_and(|scopes| scopes.iter().any(|scope| is_expandable(scope)))
    }

    /// Returns a copy of the rule with every bracketed scope expanded
    ///
    /// Rules with `scope: false` or without a scope are returned unchanged.
    pub fn expand(&self, graph: &HierarchyGraph) -> ScopeResult<Self> {
        let scope = match &self.scope {
            Some(ScopeRequirement::Scopes(scopes)) => {
                Some(ScopeRequirement::Scopes(expand_scopes(scopes, graph)?))
            }
            other => other.clone(),
        };

        Ok(Self {
            scope,
            ..self.clone()
        })
    }
}

/// Returns true if any rule of the declaration needs expansion
///
/// A declaration made only of `scope: false` rules and plain scopes never matches.
pub fn needs_expansion(access: &AccessConfig) -> bool {
    access.rules().iter().any(AccessRule::needs_expansion)
}

/// Expands every rule of an access declaration, preserving its shape
pub fn rewrite_access(access: &AccessConfig, graph: &HierarchyGraph) -> ScopeResult<AccessConfig> {
    access.try_map(|rule| rule.expand(graph))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScopeError;
    use crate::fixtures::scope_options;
    use serde_json::json;

    fn graph() -> HierarchyGraph {
        HierarchyGraph::build(&scope_options()).unwrap()
    }

    fn access(value: serde_json::Value) -> AccessConfig {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_matches_nested_scopes() {
        assert!(needs_expansion(&access(json!({ "scope": "[scope]" }))));
        assert!(needs_expansion(&access(json!({ "scope": ["others", "[scope]"] }))));
        assert!(needs_expansion(&access(
            json!({ "scope": ["others", "[scope]"], "entity": "app" })
        )));
        assert!(needs_expansion(&access(json!([{ "scope": false }, { "scope": "[scope]" }]))));
        assert!(needs_expansion(&access(json!([
            { "scope": ["others"], "entity": "app" },
            { "scope": ["others", "[scope]"], "entity": "app" }
        ]))));
    }

    #[test]
    fn test_does_not_match_plain_scopes() {
        assert!(!needs_expansion(&access(json!({ "scope": false }))));
        assert!(!needs_expansion(&access(json!({ "scope": "scope" }))));
        assert!(!needs_expansion(&access(
            json!({ "scope": ["others", "scope"], "entity": "app" })
        )));
        assert!(!needs_expansion(&access(json!([{ "scope": false }, { "scope": "scope" }]))));
        assert!(!needs_expansion(&access(json!([
            { "scope": ["others"] },
            { "scope": ["others", "scope"] }
        ]))));
        assert!(!needs_expansion(&access(json!({ "entity": "app" }))));
    }

    #[test]
    fn test_expands_and_passes_through() {
        let input = access(json!([{
            "scope": ["[dad]", "some-scope", "[group-one]", "some-other-scope"]
        }]));

        let output = rewrite_access(&input, &graph()).unwrap();

        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!([{
                "scope": [
                    "dad", "grandpa", "some-scope",
                    "group-one", "user", "admin", "some-other-scope"
                ]
            }])
        );
    }

    #[test]
    fn test_multiple_rules_and_entity() {
        let input = access(json!([
            { "scope": ["[app]"] },
            { "scope": ["[grandma]"], "entity": "app" }
        ]));

        let output = rewrite_access(&input, &graph()).unwrap();

        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!([
                { "scope": ["app", "admin"] },
                { "scope": ["grandma"], "entity": "app" }
            ])
        );
    }

    #[test]
    fn test_ignores_false_scope() {
        let input = access(json!([{ "scope": false }, { "scope": ["[grandma]"] }]));
        let output = rewrite_access(&input, &graph()).unwrap();

        assert_eq!(output.rules()[0], AccessRule::not_required());
        assert_eq!(output.rules()[1].scopes(), Some(&["grandma".to_string()][..]));
    }

    #[test]
    fn test_single_rule_shape_preserved() {
        let input = access(json!({ "scope": "[!group-one]" }));
        let output = rewrite_access(&input, &graph()).unwrap();

        assert_eq!(
            output,
            AccessConfig::Single(AccessRule::with_scopes(["!group-one", "!user", "!admin"]))
        );
    }

    #[test]
    fn test_unknown_scope_aborts_rewrite() {
        let input = access(json!([{ "scope": ["[grandma]"] }, { "scope": ["[nobody]"] }]));

        assert_eq!(
            rewrite_access(&input, &graph()),
            Err(ScopeError::UnknownScope("nobody".to_string()))
        );
    }
}
