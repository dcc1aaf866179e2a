//! Required / forbidden / selection split of an expanded scope list
//!
//! The authorization layer reads a flat scope list as three sets: `+scope` must be
//! present, `!scope` must be absent, and at least one plain scope must be present.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::types::AccessRule;
use crate::expand::{Modifier, ScopeToken};

/// Scope list classified by modifier, prefixes stripped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeSelection {
    /// Scopes that must all be present (`+scope`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    /// Scopes that must all be absent (`!scope`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub forbidden: Vec<String>,

    /// Scopes of which at least one must be present
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selection: Vec<String>,
}

impl ScopeSelection {
    /// Classifies a scope list, keeping order within each group
    pub fn from_scopes<S: AsRef<str>>(scopes: &[S]) -> Self {
        let mut split = Self::default();

        for scope in scopes {
            let token = ScopeToken::parse(scope.as_ref());
            let target = match token.modifier {
                Modifier::Require => &mut split.required,
                Modifier::Forbid => &mut split.forbidden,
                Modifier::Plain => &mut split.selection,
            };
            target.push(token.scope.to_string());
        }

        split
    }

    /// Returns true if no scope was classified
    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.forbidden.is_empty() && self.selection.is_empty()
    }
}

/// An access rule with its scope list split by modifier
///
/// Keeps `entity` and every passthrough field of the rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedRule {
    /// Split scopes; `None` for `scope: false` or a rule without scopes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<ScopeSelection>,

    /// Entity the rule applies to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,

    /// Other rule fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<&AccessRule> for SelectedRule {
    fn from(rule: &AccessRule) -> Self {
        Self {
            scope: rule.scopes().map(ScopeSelection::from_scopes),
            entity: rule.entity.clone(),
            extra: rule.extra.clone(),
        }
    }
}
