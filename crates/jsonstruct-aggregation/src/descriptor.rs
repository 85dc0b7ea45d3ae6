use crate::kind::AggregationKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// AggregationDescriptor
///
/// Validated aggregation rules for one description.
///
/// `name` is present exactly when `kind` is a container, and `map_key_type`
/// exactly when `kind` is `Map`. `elements` maps every declared element to
/// itself and, for maps, every alias to the element it names.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AggregationDescriptor {
    kind: AggregationKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,

    export_items: bool,
    elements: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    map_key_type: Option<String>,
}

impl AggregationDescriptor {
    pub(crate) const fn new(
        kind: AggregationKind,
        name: Option<String>,
        export_items: bool,
        elements: BTreeMap<String, String>,
        map_key_type: Option<String>,
    ) -> Self {
        Self {
            kind,
            name,
            export_items,
            elements,
            map_key_type,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> AggregationKind {
        self.kind
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub const fn export_items(&self) -> bool {
        self.export_items
    }

    #[must_use]
    pub const fn elements(&self) -> &BTreeMap<String, String> {
        &self.elements
    }

    #[must_use]
    pub fn map_key_type(&self) -> Option<&str> {
        self.map_key_type.as_deref()
    }

    /// Number of lookup keys, aliases included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element a key resolves to, whether the key is an element or an alias.
    #[must_use]
    pub fn canonical(&self, key: &str) -> Option<&str> {
        self.elements.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn is_alias(&self, key: &str) -> bool {
        self.canonical(key).is_some_and(|target| target != key)
    }

    /// Alias pairs only, sorted by alias.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sorted_pairs().filter(|(key, target)| key != target)
    }

    /// All keys in ascending order.
    #[must_use]
    pub fn sorted_array_elements(&self) -> Vec<&str> {
        self.elements.keys().map(String::as_str).collect()
    }

    /// All `(key, element)` pairs in ascending key order, aliases included.
    #[must_use]
    pub fn sorted_map_elements(&self) -> Vec<(&str, &str)> {
        self.sorted_pairs().collect()
    }

    // BTreeMap iteration is already key-ordered.
    fn sorted_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.elements
            .iter()
            .map(|(key, target)| (key.as_str(), target.as_str()))
    }
}

///
/// TESTS
///
