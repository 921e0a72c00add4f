use crate::classify::container_type;
use crate::config::{ComponentConfig, NodeConfig, VariantSlot, Viewport};
use crate::error::ExportResult;
use crate::instance::{detect_viewport, variant_values};
use crate::walker::TreeWalker;
use figport_document::{DesignNode, NodeKind};
use indexmap::IndexMap;
use tracing::debug;

/// Group the variants of a component set into viewport buckets.
///
/// Every COMPONENT child is walked as a root-level record with `name` and
/// `type` stripped. Buckets keep the order the variants appear in and are
/// emitted in `default`, `portrait`, `landscape` order; an empty bucket is
/// left out. Returns `None` for a set without children.
pub fn group_variants(
    set: &DesignNode,
    walker: &TreeWalker<'_>,
) -> ExportResult<Option<ComponentConfig>> {
    if set.children.is_empty() {
        return Ok(None);
    }

    let mut buckets: IndexMap<Viewport, Vec<NodeConfig>> =
        Viewport::ALL.into_iter().map(|viewport| (viewport, Vec::new())).collect();

    for child in &set.children {
        let NodeKind::Component(properties) = &child.kind else {
            continue;
        };

        let values = variant_values(properties);
        let viewport = detect_viewport(&values, &child.name);

        let mut variant = walker.walk(child, None, true)?.into_variant();
        if !values.is_empty() {
            variant.variant_props = Some(values);
        }

        debug!(set = %set.name, variant = %child.name, %viewport, "Grouped variant");
        buckets.entry(viewport).or_default().push(variant);
    }

    let mut variants: IndexMap<Viewport, VariantSlot> = buckets
        .into_iter()
        .filter_map(|(viewport, bucket)| {
            VariantSlot::from_bucket(bucket).map(|slot| (viewport, slot))
        })
        .collect();

    if variants.is_empty() {
        if let Some(first) = set.children.iter().find(|child| child.kind.is_component()) {
            let variant = walker.walk(first, None, true)?.into_variant();
            variants.insert(Viewport::Default, VariantSlot::One(Box::new(variant)));
        }
    }

    Ok(Some(ComponentConfig {
        name: set.name.clone(),
        kind: container_type(&set.name).to_string(),
        variants,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::ComponentIndex;
    use serde_json::json;

    fn group(set: serde_json::Value) -> Option<ComponentConfig> {
        let set: DesignNode = serde_json::from_value(set).unwrap();
        let index = ComponentIndex::build(&set);
        let walker = TreeWalker::new(&index, 32);
        group_variants(&set, &walker).unwrap()
    }

    #[test]
    fn test_single_variant_collapses_to_record() {
        let component = group(json!({
            "id": "1", "name": "Coin", "type": "COMPONENT_SET",
            "children": [{ "id": "2", "name": "State=idle", "type": "COMPONENT",
                "componentProperties": { "State": { "type": "VARIANT", "value": "idle" } } }]
        }))
        .unwrap();

        assert_eq!(component.kind, "ComponentContainer");
        let value = serde_json::to_value(&component.variants).unwrap();
        assert_eq!(value, json!({ "default": { "variantProps": { "State": "idle" } } }));
    }

    #[test]
    fn test_buckets_keep_order_and_use_arrays() {
        let component = group(json!({
            "id": "1", "name": "SpinButton", "type": "COMPONENT_SET",
            "children": [
                { "id": "2", "name": "Landscape", "type": "COMPONENT" },
                { "id": "3", "name": "Viewport=portrait, State=on", "type": "COMPONENT",
                  "componentProperties": {
                      "Viewport": { "value": "portrait" }, "State": { "value": "on" } } },
                { "id": "4", "name": "Viewport=portrait, State=off", "type": "COMPONENT",
                  "componentProperties": {
                      "Viewport": { "value": "portrait" }, "State": { "value": "off" } } },
                { "id": "5", "name": "notes", "type": "TEXT", "characters": "ignored" }
            ]
        }))
        .unwrap();

        assert_eq!(component.kind, "AnimationButton");
        let keys: Vec<_> = component.variants.keys().copied().collect();
        assert_eq!(keys, vec![Viewport::Portrait, Viewport::Landscape]);

        let VariantSlot::Many(portrait) = &component.variants[&Viewport::Portrait] else {
            panic!("expected an array of portrait variants");
        };
        let states: Vec<_> = portrait
            .iter()
            .map(|v| v.variant_props.as_ref().unwrap()["State"].clone())
            .collect();
        assert_eq!(states, vec!["on", "off"]);
        assert!(matches!(component.variants[&Viewport::Landscape], VariantSlot::One(_)));
    }

    #[test]
    fn test_empty_set_is_skipped() {
        assert!(group(json!({ "id": "1", "name": "Empty", "type": "COMPONENT_SET" })).is_none());
    }

    #[test]
    fn test_set_without_components_has_no_variants() {
        let component = group(json!({
            "id": "1", "name": "Loose", "type": "COMPONENT_SET",
            "children": [{ "id": "2", "name": "frame", "type": "FRAME" }]
        }))
        .unwrap();
        assert!(component.variants.is_empty());
    }
}
