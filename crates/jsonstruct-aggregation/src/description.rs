//! Typed view of a JSON data description.
//!
//! Only the `elements` and `aggregation` keys are modelled. Element payloads
//! stay opaque JSON; anything else in the document is ignored.

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};
use serde_json::{Map, Value};
use std::fmt;

///
/// Description
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Description {
    /// Declared elements in document order. Payloads are not interpreted.
    #[serde(default)]
    pub elements: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<AggregationDecl>,
}

impl Description {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Declare an element with an empty payload.
    #[must_use]
    pub fn with_element(mut self, name: impl Into<String>) -> Self {
        self.elements.insert(name.into(), Value::Array(Vec::new()));
        self
    }

    #[must_use]
    pub fn with_aggregation(mut self, decl: AggregationDecl) -> Self {
        self.aggregation = Some(decl);
        self
    }

    // element_names
    pub fn element_names(&self) -> impl Iterator<Item = &str> {
        self.elements.keys().map(String::as_str)
    }
}

///
/// AggregationDecl
///
/// The raw `aggregation` block. `type` stays text so an unknown kind is a
/// resolution error rather than a parse error.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AggregationDecl {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_items: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_aliases: Option<MapAliases>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_key_type: Option<String>,
}

impl AggregationDecl {
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn export_items(mut self, export: bool) -> Self {
        self.export_items = Some(export);
        self
    }

    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>, target: impl Into<String>) -> Self {
        self.map_aliases
            .get_or_insert_with(MapAliases::default)
            .push(alias, target);
        self
    }

    #[must_use]
    pub fn map_key_type(mut self, key_type: impl Into<String>) -> Self {
        self.map_key_type = Some(key_type.into());
        self
    }
}

///
/// MapAliases
///
/// `alias -> target` pairs in document order. Repeated keys are kept so the
/// resolver can report them.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MapAliases(Vec<(String, String)>);

impl MapAliases {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, alias: impl Into<String>, target: impl Into<String>) {
        self.0.push((alias.into(), target.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(a, t)| (a.as_str(), t.as_str()))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<A: Into<String>, T: Into<String>> FromIterator<(A, T)> for MapAliases {
    fn from_iter<I: IntoIterator<Item = (A, T)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(a, t)| (a.into(), t.into()))
                .collect(),
        )
    }
}

impl Serialize for MapAliases {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (alias, target) in &self.0 {
            map.serialize_entry(alias, target)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MapAliases {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AliasVisitor;

        impl<'de> Visitor<'de> for AliasVisitor {
            type Value = MapAliases;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of alias names to element names")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
                let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((alias, target)) = access.next_entry::<String, String>()? {
                    pairs.push((alias, target));
                }

                Ok(MapAliases(pairs))
            }
        }

        deserializer.deserialize_map(AliasVisitor)
    }
}

///
/// TESTS
///
