use super::*;
use serde_json::{Value, json};

fn resolve_json(value: Value) -> Result<AggregationDescriptor, AggregationError> {
    let description = Description::from_value(value).expect("description should parse");

    resolve(&description)
}

fn elements_of(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn defaults_without_aggregation_block() {
    let descriptor = resolve_json(json!({})).unwrap();

    assert_eq!(descriptor.kind(), AggregationKind::None);
    assert_eq!(descriptor.name(), None);
    assert!(descriptor.export_items());
    assert!(descriptor.elements().is_empty());
    assert_eq!(descriptor.map_key_type(), None);
}

#[test]
fn none_kind_maps_elements_to_themselves() {
    let descriptor = resolve_json(json!({ "elements": { "b": [], "a": {} } })).unwrap();

    assert_eq!(descriptor.kind(), AggregationKind::None);
    assert_eq!(descriptor.elements(), &elements_of(&[("a", "a"), ("b", "b")]));
}

#[test]
fn array_with_name() {
    let descriptor = resolve_json(json!({
        "elements": {},
        "aggregation": { "type": "array", "name": "TestArray" }
    }))
    .unwrap();

    assert_eq!(
        descriptor,
        AggregationDescriptor::new(
            AggregationKind::Array,
            Some("TestArray".to_string()),
            true,
            BTreeMap::new(),
            None,
        )
    );
}

#[test]
fn array_can_hide_elements() {
    let descriptor = resolve_json(json!({
        "elements": {},
        "aggregation": { "type": "array", "name": "TestArray", "export_items": false }
    }))
    .unwrap();

    assert!(!descriptor.export_items());
    assert_eq!(descriptor.map_key_type(), None);
}

#[test]
fn map_uses_default_key_type() {
    let descriptor = resolve_json(json!({
        "elements": {},
        "aggregation": { "type": "map", "name": "TestMap" }
    }))
    .unwrap();

    assert_eq!(descriptor.kind(), AggregationKind::Map);
    assert_eq!(descriptor.name(), Some("TestMap"));
    assert_eq!(descriptor.map_key_type(), Some(DEFAULT_MAP_KEY_TYPE));
}

#[test]
fn map_uses_supplied_key_type() {
    let descriptor = resolve_json(json!({
        "elements": {},
        "aggregation": { "type": "map", "name": "TestMap", "map_key_type": "chrome::CustomKey" }
    }))
    .unwrap();

    assert_eq!(descriptor.map_key_type(), Some("chrome::CustomKey"));
}

#[test]
fn map_can_hide_elements() {
    let descriptor = resolve_json(json!({
        "elements": {},
        "aggregation": { "type": "map", "name": "TestMap", "export_items": false }
    }))
    .unwrap();

    assert!(!descriptor.export_items());
    assert_eq!(descriptor.map_key_type(), Some(DEFAULT_MAP_KEY_TYPE));
}

#[test]
fn resolver_default_key_type_is_configurable() {
    let resolver = Resolver::new().with_default_map_key_type("base::StringPiece");
    let description = Description::new()
        .with_element("a")
        .with_aggregation(AggregationDecl::new("map").named("M"));

    let descriptor = resolver.resolve(&description).unwrap();
    assert_eq!(descriptor.map_key_type(), Some("base::StringPiece"));

    // an explicit key type still wins
    let description = description.with_aggregation(
        AggregationDecl::new("map")
            .named("M")
            .map_key_type("chrome::CustomKey"),
    );
    let descriptor = resolver.resolve(&description).unwrap();
    assert_eq!(descriptor.map_key_type(), Some("chrome::CustomKey"));
}

#[test]
fn sorted_array_elements_ignore_declaration_order() {
    let descriptor = resolve_json(json!({
        "elements": { "c": [], "d": [], "b": [], "a": [] },
        "aggregation": { "type": "array", "name": "TestMap" }
    }))
    .unwrap();

    assert_eq!(descriptor.sorted_array_elements(), ["a", "b", "c", "d"]);
    assert_eq!(
        descriptor.sorted_array_elements(),
        descriptor.sorted_array_elements()
    );
}

#[test]
fn sorted_map_elements_without_aliases() {
    let descriptor = resolve_json(json!({
        "elements": { "c": [], "d": [], "b": [], "a": [] },
        "aggregation": { "type": "map", "name": "TestMap" }
    }))
    .unwrap();

    assert_eq!(
        descriptor.sorted_map_elements(),
        [("a", "a"), ("b", "b"), ("c", "c"), ("d", "d")]
    );
}

#[test]
fn sorted_map_elements_include_aliases() {
    let descriptor = resolve_json(json!({
        "elements": { "c": [], "d": [] },
        "aggregation": {
            "type": "map",
            "name": "TestMap",
            "map_aliases": { "a": "d", "b": "c", "e": "c" }
        }
    }))
    .unwrap();

    assert_eq!(
        descriptor.sorted_map_elements(),
        [("a", "d"), ("b", "c"), ("c", "c"), ("d", "d"), ("e", "c")]
    );
}

#[test]
fn alias_colliding_with_element_is_rejected() {
    let err = resolve_json(json!({
        "elements": { "a": [], "b": [] },
        "aggregation": { "type": "map", "name": "TestMap", "map_aliases": { "b": "a" } }
    }))
    .unwrap_err();

    assert_eq!(
        err,
        AggregationError::DuplicateAlias {
            alias: "b".to_string(),
            existing: DefinedAs::Element,
        }
    );
    assert_eq!(err.to_string(), "alias `b` already defined as element");
}

#[test]
fn repeated_alias_is_rejected() {
    let description = Description::new()
        .with_element("a")
        .with_element("b")
        .with_aggregation(
            AggregationDecl::new("map")
                .named("M")
                .alias("x", "a")
                .alias("x", "b"),
        );

    let err = resolve(&description).unwrap_err();
    assert_eq!(err.to_string(), "alias `x` already defined as alias");
}

#[test]
fn chained_alias_is_rejected() {
    let err = resolve_json(json!({
        "elements": { "a": [] },
        "aggregation": { "type": "map", "name": "TestMap", "map_aliases": { "b": "a", "c": "b" } }
    }))
    .unwrap_err();

    assert_eq!(
        err,
        AggregationError::DanglingAliasTarget {
            alias: "c".to_string(),
            target: "b".to_string(),
        }
    );
    assert_eq!(err.to_string(), "aliased element `b` does not exist");
}

#[test]
fn alias_to_undeclared_name_is_rejected() {
    let err = resolve_json(json!({
        "elements": { "a": [] },
        "aggregation": { "type": "map", "name": "TestMap", "map_aliases": { "b": "zzz" } }
    }))
    .unwrap_err();

    assert_eq!(
        err,
        AggregationError::DanglingAliasTarget {
            alias: "b".to_string(),
            target: "zzz".to_string(),
        }
    );
    assert_eq!(err.to_string(), "aliased element `zzz` does not exist");
}

#[test]
fn null_kind_counts_as_omitted() {
    let descriptor = resolve_json(json!({
        "elements": { "a": [] },
        "aggregation": { "type": null, "export_items": false }
    }))
    .unwrap();

    assert_eq!(descriptor.kind(), AggregationKind::None);
    assert_eq!(descriptor.name(), None);
    assert!(!descriptor.export_items());
    assert_eq!(descriptor.elements(), &elements_of(&[("a", "a")]));
}

#[test]
fn unknown_kind_is_rejected() {
    let err = resolve_json(json!({
        "elements": {},
        "aggregation": { "type": "collection" }
    }))
    .unwrap_err();

    assert_eq!(err.to_string(), "'collection' is not a valid aggregation kind");
}

#[test]
fn containers_require_a_name() {
    for kind in ["array", "map"] {
        for aggregation in [
            json!({ "type": kind }),
            json!({ "type": kind, "name": "" }),
            json!({ "type": kind, "name": null }),
        ] {
            let err = resolve_json(json!({ "elements": {}, "aggregation": aggregation }))
                .unwrap_err();

            assert!(
                matches!(err, AggregationError::MissingContainerName { .. }),
                "unexpected error: {err:?}"
            );
            assert!(err.to_string().contains("needs a `name`"), "{err}");
        }
    }
}

#[test]
fn kind_is_checked_before_name() {
    let err = resolve_json(json!({ "aggregation": { "type": "collection" } })).unwrap_err();

    assert!(matches!(err, AggregationError::InvalidAggregationKind { .. }));
}

#[test]
fn non_map_kinds_ignore_map_settings() {
    for kind in ["none", "array"] {
        let descriptor = resolve_json(json!({
            "elements": { "a": [] },
            "aggregation": {
                "type": kind,
                "name": "Ignored",
                "map_aliases": { "a": "missing", "z": "nowhere" },
                "map_key_type": "chrome::CustomKey"
            }
        }))
        .unwrap();

        assert_eq!(descriptor.elements(), &elements_of(&[("a", "a")]));
        assert_eq!(descriptor.map_key_type(), None);
    }
}

#[test]
fn none_kind_drops_name() {
    let descriptor = resolve_json(json!({
        "aggregation": { "type": "none", "name": "Unused", "export_items": false }
    }))
    .unwrap();

    assert_eq!(descriptor.name(), None);
    assert!(!descriptor.export_items());
}
