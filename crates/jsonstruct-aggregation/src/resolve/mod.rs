//! Turns a raw `aggregation` declaration into a validated descriptor.

#[cfg(test)]
mod tests;

use crate::{
    DEFAULT_MAP_KEY_TYPE,
    description::{AggregationDecl, Description, MapAliases},
    descriptor::AggregationDescriptor,
    error::{AggregationError, DefinedAs},
    kind::AggregationKind,
};
use std::collections::BTreeMap;
use tracing::debug;

/// Resolve with default options.
pub fn resolve(description: &Description) -> Result<AggregationDescriptor, AggregationError> {
    Resolver::default().resolve(description)
}

///
/// Resolver
///
/// Stateless apart from its options; safe to share and reuse.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Resolver {
    default_map_key_type: String,
}

impl Default for Resolver {
    fn default() -> Self {
        Self {
            default_map_key_type: DEFAULT_MAP_KEY_TYPE.to_string(),
        }
    }
}

impl Resolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Key type assigned to maps that do not declare `map_key_type`.
    #[must_use]
    pub fn with_default_map_key_type(mut self, key_type: impl Into<String>) -> Self {
        self.default_map_key_type = key_type.into();
        self
    }

    #[must_use]
    pub fn default_map_key_type(&self) -> &str {
        &self.default_map_key_type
    }

    pub fn resolve(
        &self,
        description: &Description,
    ) -> Result<AggregationDescriptor, AggregationError> {
        let empty = AggregationDecl::default();
        let decl = description.aggregation.as_ref().unwrap_or(&empty);

        let kind = parse_kind(decl)?;
        let name = container_name(kind, decl)?;
        let export_items = decl.export_items.unwrap_or(true);

        let mut elements: BTreeMap<String, String> = description
            .element_names()
            .map(|element| (element.to_string(), element.to_string()))
            .collect();

        // aliases and key type only exist for maps; other kinds ignore them
        let map_key_type = if kind.is_map() {
            if let Some(aliases) = &decl.map_aliases {
                add_aliases(&mut elements, aliases)?;
            }

            Some(
                decl.map_key_type
                    .clone()
                    .unwrap_or_else(|| self.default_map_key_type.clone()),
            )
        } else {
            None
        };

        debug!(
            kind = %kind,
            name = name.as_deref().unwrap_or_default(),
            elements = description.elements.len(),
            aliases = elements.len() - description.elements.len(),
            "resolved aggregation"
        );

        Ok(AggregationDescriptor::new(
            kind,
            name,
            export_items,
            elements,
            map_key_type,
        ))
    }
}

// `"type": null` is treated the same as an omitted `type`.
fn parse_kind(decl: &AggregationDecl) -> Result<AggregationKind, AggregationError> {
    match decl.kind.as_deref() {
        None => Ok(AggregationKind::None),
        Some(text) => text.parse::<AggregationKind>().inspect_err(|err| {
            debug!(kind = text, "rejecting aggregation: {err}");
        }),
    }
}

// An empty name counts as missing. Non-container kinds drop any name given.
fn container_name(
    kind: AggregationKind,
    decl: &AggregationDecl,
) -> Result<Option<String>, AggregationError> {
    if !kind.is_container() {
        return Ok(None);
    }

    match decl.name.as_deref() {
        Some(name) if !name.is_empty() => Ok(Some(name.to_string())),
        _ => {
            debug!(kind = %kind, "rejecting aggregation: container has no name");
            Err(AggregationError::missing_name(kind))
        }
    }
}

// Targets must be declared elements, so an alias can never point at another alias.
fn add_aliases(
    elements: &mut BTreeMap<String, String>,
    aliases: &MapAliases,
) -> Result<(), AggregationError> {
    for (alias, target) in aliases.iter() {
        if let Some(existing) = elements.get(alias) {
            let defined_as = if existing == alias {
                DefinedAs::Element
            } else {
                DefinedAs::Alias
            };
            debug!(alias, "rejecting aggregation: duplicate alias");

            return Err(AggregationError::duplicate_alias(alias, defined_as));
        }

        let is_element = elements.get(target).is_some_and(|t| t == target);
        if !is_element {
            debug!(alias, target, "rejecting aggregation: dangling alias");

            return Err(AggregationError::dangling_target(alias, target));
        }

        elements.insert(alias.to_string(), target.to_string());
    }

    Ok(())
}
