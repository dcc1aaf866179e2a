//! Scope hierarchy declaration types
//!
//! The declaration is authored by the operator, e.g. in TOML:
//!
//! ```toml
//! scopes = [
//!     { scope = "admin", subscopes = ["app", { scope = "user", subscopes = ["group-one"] }] },
//!     "grandma",
//!     { scope = "grandpa", subscopes = "dad" },
//! ]
//! ```

use serde::de::value::MapAccessDeserializer;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One item of a scope hierarchy declaration
///
/// Deserializes from a string (bare name) or a map (record); a sequence is never
/// read as a single item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ScopeItem {
    /// A bare scope name without subscopes
    Name(String),
    /// A named scope with nested subscopes
    Nested(NestedScope),
}

/// A named scope and the subscopes it contains
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NestedScope {
    /// Scope name
    pub scope: String,

    /// Immediate subscopes, in declaration order
    pub subscopes: Vec<ScopeItem>,
}

/// Field layout of a scope record
#[derive(Deserialize)]
struct RawNestedScope {
    scope: String,
    #[serde(default, deserialize_with = "deserialize_items")]
    subscopes: Vec<ScopeItem>,
}

struct NestedScopeVisitor;

impl<'de> Visitor<'de> for NestedScopeVisitor {
    type Value = NestedScope;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a scope record with `scope` and optional `subscopes`")
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        let raw = RawNestedScope::deserialize(MapAccessDeserializer::new(map))?;
        Ok(NestedScope {
            scope: raw.scope,
            subscopes: raw.subscopes,
        })
    }
}

impl<'de> Deserialize<'de> for NestedScope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(NestedScopeVisitor)
    }
}

struct ScopeItemVisitor;

impl<'de> Visitor<'de> for ScopeItemVisitor {
    type Value = ScopeItem;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a scope name or a scope record")
    }

    fn visit_str<E: de::Error>(self, name: &str) -> Result<Self::Value, E> {
        Ok(ScopeItem::name(name))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        NestedScopeVisitor.visit_map(map).map(ScopeItem::Nested)
    }
}

impl<'de> Deserialize<'de> for ScopeItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ScopeItemVisitor)
    }
}

/// Reads a single item, a list of items, or nothing
struct ScopeItemsVisitor;

impl<'de> Visitor<'de> for ScopeItemsVisitor {
    type Value = Vec<ScopeItem>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a scope name, a scope record, or a list of them")
    }

    fn visit_str<E: de::Error>(self, name: &str) -> Result<Self::Value, E> {
        Ok(vec![ScopeItem::name(name)])
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        Ok(vec![ScopeItemVisitor.visit_map(map)?])
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<ScopeItem>()? {
            items.push(item);
        }
        Ok(items)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

fn deserialize_items<'de, D>(deserializer: D) -> Result<Vec<ScopeItem>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(ScopeItemsVisitor)
}

impl ScopeItem {
    /// Creates a bare scope item
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Creates a scope item with subscopes
    pub fn nested(name: impl Into<String>, subscopes: Vec<ScopeItem>) -> Self {
        Self::Nested(NestedScope {
            scope: name.into(),
            subscopes,
        })
    }

    /// Returns the scope name of this item
    pub fn scope(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Nested(nested) => &nested.scope,
        }
    }

    /// Returns the immediate subscopes of this item
    pub fn subscopes(&self) -> &[ScopeItem] {
        match self {
            Self::Name(_) => &[],
            Self::Nested(nested) => &nested.subscopes,
        }
    }
}

impl From<&str> for ScopeItem {
    fn from(name: &str) -> Self {
        Self::name(name)
    }
}

impl From<String> for ScopeItem {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// A complete scope hierarchy declaration
///
/// Accepts a single item, a list of items, or nothing at all (an empty hierarchy).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScopeDeclaration {
    items: Vec<ScopeItem>,
}

impl ScopeDeclaration {
    /// Creates a declaration from top-level items
    pub fn new(items: Vec<ScopeItem>) -> Self {
        Self { items }
    }

    /// Returns the top-level items
    pub fn items(&self) -> &[ScopeItem] {
        &self.items
    }

    /// Returns true if nothing is declared
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<ScopeItem>> for ScopeDeclaration {
    fn from(items: Vec<ScopeItem>) -> Self {
        Self::new(items)
    }
}

impl From<ScopeItem> for ScopeDeclaration {
    fn from(item: ScopeItem) -> Self {
        Self::new(vec![item])
    }
}

impl<'de> Deserialize<'de> for ScopeDeclaration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_items(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_name_item() {
        let item: ScopeItem = serde_json::from_str(r#""grandma""#).unwrap();
        assert_eq!(item, ScopeItem::name("grandma"));
        assert!(item.subscopes().is_empty());
    }

    #[test]
    fn test_single_subscope() {
        let item: ScopeItem =
            serde_json::from_str(r#"{ "scope": "grandpa", "subscopes": "dad" }"#).unwrap();
        assert_eq!(item.scope(), "grandpa");
        assert_eq!(item.subscopes(), &[ScopeItem::name("dad")]);
    }

    #[test]
    fn test_record_without_subscopes() {
        let item: ScopeItem = serde_json::from_str(r#"{ "scope": "app" }"#).unwrap();
        assert_eq!(item, ScopeItem::nested("app", vec![]));
    }

    #[test]
    fn test_declaration_shapes() {
        let single: ScopeDeclaration = serde_json::from_str(r#""admin""#).unwrap();
        assert_eq!(single.items().len(), 1);

        let many: ScopeDeclaration = serde_json::from_str(r#"["admin", "grandma"]"#).unwrap();
        assert_eq!(many.items().len(), 2);

        let absent: ScopeDeclaration = serde_json::from_str("null").unwrap();
        assert!(absent.is_empty());
    }

    #[test]
    fn test_declaration_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            scopes: ScopeDeclaration,
        }

        let wrapper: Wrapper = toml::from_str(
            r#"scopes = [{ scope = "grandpa", subscopes = "dad" }, "grandma"]"#,
        )
        .unwrap();

        assert_eq!(wrapper.scopes.items()[0].scope(), "grandpa");
        assert_eq!(wrapper.scopes.items()[1].scope(), "grandma");
    }

    #[test]
    fn test_two_item_list_is_siblings() {
        let item: ScopeItem = serde_json::from_str(
            r#"{ "scope": "user", "subscopes": ["group-one", "group-two"] }"#,
        )
        .unwrap();
        assert_eq!(
            item,
            ScopeItem::nested("user", vec!["group-one".into(), "group-two".into()])
        );

        let declaration: ScopeDeclaration =
            serde_json::from_str(r#"["admin", { "scope": "grandpa" }]"#).unwrap();
        assert_eq!(
            declaration.items(),
            &[ScopeItem::name("admin"), ScopeItem::nested("grandpa", vec![])]
        );
    }

    #[test]
    fn test_record_rejects_sequence() {
        assert!(serde_json::from_str::<NestedScope>(r#"["grandpa", "dad"]"#).is_err());
        assert!(serde_json::from_str::<ScopeItem>(r#"["grandpa", "dad"]"#).is_err());
    }

    #[test]
    fn test_invalid_item_error_names_expected_shape() {
        let err = serde_json::from_str::<ScopeDeclaration>("[5]").unwrap_err();
        assert!(err.to_string().contains("a scope name or a scope record"));

        let err = serde_json::from_str::<ScopeItem>(r#"{ "subscopes": "dad" }"#).unwrap_err();
        assert!(err.to_string().contains("missing field `scope`"));
    }
}
