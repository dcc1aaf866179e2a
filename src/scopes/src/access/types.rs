//! Route access rule types
//!
//! Mirrors the shape of a route's `auth.access` declaration: either a single rule
//! or a list of rules, each with a `scope` that is `false`, one scope, or a list.

use serde::de::value::MapAccessDeserializer;
use serde::de::{self, MapAccess, SeqAccess, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Scope requirement of an access rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeRequirement {
    /// Written as `false`; no scope is required and nothing is expanded
    NotRequired,
    /// Scope tokens, possibly bracketed
    Scopes(Vec<String>),
}

impl ScopeRequirement {
    /// Returns the scope tokens, `None` for [`ScopeRequirement::NotRequired`]
    pub fn scopes(&self) -> Option<&[String]> {
        match self {
            Self::NotRequired => None,
            Self::Scopes(scopes) => Some(scopes),
        }
    }
}

impl From<Vec<String>> for ScopeRequirement {
    fn from(scopes: Vec<String>) -> Self {
        Self::Scopes(scopes)
    }
}

struct RequirementVisitor;

impl<'de> Visitor<'de> for RequirementVisitor {
    type Value = ScopeRequirement;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("scope must be false, a string, or a list of strings")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        if value {
            Err(E::invalid_value(Unexpected::Bool(true), &self))
        } else {
            Ok(ScopeRequirement::NotRequired)
        }
    }

    fn visit_str<E: de::Error>(self, scope: &str) -> Result<Self::Value, E> {
        Ok(ScopeRequirement::Scopes(vec![scope.to_string()]))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut scopes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(scope) = seq.next_element::<String>()? {
            scopes.push(scope);
        }
        Ok(ScopeRequirement::Scopes(scopes))
    }
}

impl<'de> Deserialize<'de> for ScopeRequirement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RequirementVisitor)
    }
}

impl Serialize for ScopeRequirement {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::NotRequired => serializer.serialize_bool(false),
            Self::Scopes(scopes) => scopes.serialize(serializer),
        }
    }
}

/// A single access rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessRule {
    /// Scope requirement; absent means the rule does not restrict scopes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<ScopeRequirement>,

    /// Entity the rule applies to (e.g. "app", "user")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,

    /// Any other rule fields, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AccessRule {
    /// Creates a rule requiring the given scope tokens
    pub fn with_scopes<I, S>(scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            scope: Some(ScopeRequirement::Scopes(
                scopes.into_iter().map(Into::into).collect(),
            )),
            entity: None,
            extra: Map::new(),
        }
    }

    /// Creates a rule that requires no scope (`scope: false`)
    pub fn not_required() -> Self {
        Self {
            scope: Some(ScopeRequirement::NotRequired),
            entity: None,
            extra: Map::new(),
        }
    }

    /// Sets the entity of this rule
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Returns the scope tokens of this rule, if any
    pub fn scopes(&self) -> Option<&[String]> {
        self.scope.as_ref().and_then(ScopeRequirement::scopes)
    }
}

/// A route's access declaration: one rule or a list of rules
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AccessConfig {
    /// A single rule
    Single(AccessRule),
    /// A list of rules
    Many(Vec<AccessRule>),
}

impl AccessConfig {
    /// Returns the rules of this declaration
    pub fn rules(&self) -> &[AccessRule] {
        match self {
            Self::Single(rule) => std::slice::from_ref(rule),
            Self::Many(rules) => rules,
        }
    }

    /// Applies a fallible function to every rule, preserving the declaration shape
    pub fn try_map<E, F>(&self, mut f: F) -> Result<Self, E>
    where
        F: FnMut(&AccessRule) -> Result<AccessRule, E>,
    {
        match self {
            Self::Single(rule) => Ok(Self::Single(f(rule)?)),
            Self::Many(rules) => rules.iter().map(f).collect::<Result<Vec<_>, _>>().map(Self::Many),
        }
    }
}

struct AccessConfigVisitor;

impl<'de> Visitor<'de> for AccessConfigVisitor {
    type Value = AccessConfig;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an access rule or a list of access rules")
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        AccessRule::deserialize(MapAccessDeserializer::new(map)).map(AccessConfig::Single)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut rules = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(rule) = seq.next_element::<AccessRule>()? {
            rules.push(rule);
        }
        Ok(AccessConfig::Many(rules))
    }
}

impl<'de> Deserialize<'de> for AccessConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AccessConfigVisitor)
    }
}

impl From<AccessRule> for AccessConfig {
    fn from(rule: AccessRule) -> Self {
        Self::Single(rule)
    }
}

impl From<Vec<AccessRule>> for AccessConfig {
    fn from(rules: Vec<AccessRule>) -> Self {
        Self::Many(rules)
    }
}
