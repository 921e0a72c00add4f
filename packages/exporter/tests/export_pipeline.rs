/// End-to-end export tests over a small slot-game style document
///
/// The fixture covers a component set split across viewports, instances of
/// masters living on another page, anchored text, placeholders and the
/// `screen` design reference.
use figport_exporter::{
    export_components, ExportConfig, ExportError, ExportOptions, VariantSlot, Viewport,
};
use serde_json::{json, Value};

fn fixture() -> figport_document::DesignNode {
    serde_json::from_value(json!({
        "id": "0:0", "name": "Document", "type": "DOCUMENT",
        "children": [
            {
                "id": "0:1", "name": "components", "type": "CANVAS",
                "children": [
                    { "id": "5:1", "name": "Coin", "type": "COMPONENT",
                      "absoluteBoundingBox": { "x": 0, "y": 0, "width": 100, "height": 100 } }
                ]
            },
            {
                "id": "0:2", "name": "layouts", "type": "CANVAS",
                "children": [
                    { "id": "9:9", "name": "screen", "type": "RECTANGLE" },
                    {
                        "id": "1:1", "name": "Menu", "type": "COMPONENT_SET",
                        "children": [
                            { "id": "1:2", "name": "Viewport=portrait", "type": "COMPONENT",
                              "componentProperties": { "Viewport": { "type": "VARIANT", "value": "portrait" } },
                              "absoluteBoundingBox": { "x": 0, "y": 0, "width": 360, "height": 640 } },
                            { "id": "1:3", "name": "Viewport=landscape", "type": "COMPONENT",
                              "componentProperties": { "Viewport": { "type": "VARIANT", "value": "landscape" } },
                              "absoluteBoundingBox": { "x": 400, "y": 0, "width": 640, "height": 360 } }
                        ]
                    },
                    {
                        "id": "2:1", "name": "Reels", "type": "FRAME",
                        "absoluteBoundingBox": { "x": 100, "y": 0, "width": 400, "height": 300 },
                        "children": [
                            { "id": "2:2", "name": "screen", "type": "RECTANGLE" },
                            { "id": "2:3", "name": "wide coin", "type": "INSTANCE", "componentId": "5:1",
                              "absoluteBoundingBox": { "x": 110, "y": 20, "width": 150, "height": 100 } },
                            { "id": "2:4", "name": "same coin", "type": "INSTANCE", "componentId": "5:1",
                              "absoluteBoundingBox": { "x": 300, "y": 20, "width": 100.05, "height": 99.96 } },
                            { "id": "2:5", "name": "title", "type": "TEXT", "characters": "SPIN",
                              "constraints": { "horizontal": "CENTER", "vertical": "TOP" },
                              "absoluteBoundingBox": { "x": 110, "y": 200, "width": 20, "height": 10 } },
                            { "id": "2:6", "name": "coin_ph", "type": "FRAME",
                              "absoluteBoundingBox": { "x": 100, "y": 0, "width": 10, "height": 10 } },
                            { "id": "2:7", "name": "lost", "type": "INSTANCE", "componentId": "404:1",
                              "absoluteBoundingBox": { "x": 100, "y": 0, "width": 10, "height": 10 } }
                        ]
                    },
                    { "id": "3:1", "name": "Empty", "type": "COMPONENT_SET" }
                ]
            }
        ]
    }))
    .expect("fixture parses")
}

fn export() -> ExportConfig {
    export_components(&fixture(), "FILE123", &ExportOptions::default()).expect("export succeeds")
}

fn reels_children(config: &ExportConfig) -> Vec<Value> {
    let reels = config
        .components
        .iter()
        .find(|c| c.name == "Reels")
        .expect("Reels exported");
    let value = serde_json::to_value(&reels.variants[&Viewport::Default]).unwrap();
    value["children"].as_array().cloned().unwrap_or_default()
}

fn child<'a>(children: &'a [Value], name: &str) -> &'a Value {
    children
        .iter()
        .find(|c| c["name"] == name)
        .unwrap_or_else(|| panic!("missing child {}", name))
}

#[test]
fn test_top_level_components_in_page_order() {
    let config = export();
    let names: Vec<_> = config.components.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Menu", "Reels"]);
}

#[test]
fn test_component_set_split_by_viewport() {
    let config = export();
    let menu = &config.components[0];
    assert_eq!(menu.kind, "ComponentContainer");

    let keys: Vec<_> = menu.variants.keys().copied().collect();
    assert_eq!(keys, vec![Viewport::Portrait, Viewport::Landscape]);

    let portrait = serde_json::to_value(&menu.variants[&Viewport::Portrait]).unwrap();
    assert_eq!(portrait, json!({ "variantProps": { "Viewport": "portrait" } }));
}

#[test]
fn test_resized_instance_scales_per_axis() {
    let config = export();
    let children = reels_children(&config);

    let wide = child(&children, "wide coin");
    assert_eq!(wide["type"], "Coin");
    assert_eq!(wide["isInstance"], true);
    assert_eq!(wide["scale"], json!({ "x": 1.5, "y": 1.0 }));
    assert_eq!((wide["x"].clone(), wide["y"].clone()), (json!(10), json!(20)));

    let same = child(&children, "same coin");
    assert!(same.get("scale").is_none());
    assert!(same.get("variant").is_none());
}

#[test]
fn test_unresolved_instance_uses_sentinel() {
    let config = export();
    let children = reels_children(&config);
    let lost = child(&children, "lost");
    assert_eq!(lost["type"], "Component");
    assert!(lost.get("scale").is_none());
}

#[test]
fn test_centered_text_anchor() {
    let config = export();
    let children = reels_children(&config);
    let title = child(&children, "title");
    assert_eq!(title["anchorX"], json!(0.5));
    assert_eq!(title["x"], json!(20));
    assert_eq!(title["text"], "SPIN");
}

#[test]
fn test_placeholder_exact_shape() {
    let config = export();
    let children = reels_children(&config);
    assert_eq!(
        child(&children, "coin_ph"),
        &json!({ "name": "coin_ph", "type": "SuperContainer", "x": 5, "y": 5 })
    );
}

#[test]
fn test_screen_never_exported() {
    let json = export().to_json_pretty().unwrap();
    assert!(!json.contains("\"screen\""));
}

#[test]
fn test_round_trip_and_statistics() {
    let config = export();
    let json = config.to_json_pretty().unwrap();
    let parsed = ExportConfig::from_json(&json).unwrap();
    assert_eq!(parsed, config);

    let stats = &config.metadata.statistics;
    assert_eq!(stats.total_components, 2);
    assert_eq!(stats.components_with_variants, 1);
    assert_eq!(
        stats.components_with_variants + stats.components_without_variants,
        stats.total_components
    );
    assert_eq!(stats.variants_by_viewport.get(Viewport::Default), 1);
    assert_eq!(stats.variants_by_viewport.get(Viewport::Portrait), 1);
    assert_eq!(stats.variants_by_viewport.get(Viewport::Landscape), 1);
    assert_eq!(config.metadata.figma_file_key, "FILE123");
}

#[test]
fn test_single_variant_is_not_wrapped() {
    let document = serde_json::from_value(json!({
        "id": "0:0", "name": "Document", "type": "DOCUMENT",
        "children": [{
            "id": "0:1", "name": "layouts", "type": "CANVAS",
            "children": [{
                "id": "1:1", "name": "BetButton", "type": "COMPONENT_SET",
                "children": [{ "id": "1:2", "name": "idle", "type": "COMPONENT" }]
            }]
        }]
    }))
    .unwrap();

    let config = export_components(&document, "k", &ExportOptions::default()).unwrap();
    let component = &config.components[0];
    assert_eq!(component.kind, "AnimationButton");
    assert!(matches!(component.variants[&Viewport::Default], VariantSlot::One(_)));
}

#[test]
fn test_missing_layouts_page_is_fatal() {
    let document = serde_json::from_value(json!({
        "id": "0:0", "name": "Document", "type": "DOCUMENT",
        "children": [{ "id": "0:1", "name": "images", "type": "CANVAS" }]
    }))
    .unwrap();

    let err = export_components(&document, "k", &ExportOptions::default()).unwrap_err();
    assert!(matches!(err, ExportError::PageNotFound { .. }));
    assert_eq!(err.to_string(), "Page \"layouts\" not found in design file");
}

#[test]
fn test_fractional_values_survive_round_trip() {
    let document = serde_json::from_value(json!({
        "id": "0:0", "name": "Document", "type": "DOCUMENT",
        "children": [{
            "id": "0:1", "name": "layouts", "type": "CANVAS",
            "children": [{
                "id": "1:1", "name": "Paytable", "type": "FRAME",
                "absoluteBoundingBox": { "x": 0, "y": 0, "width": 300, "height": 200 },
                "children": [{
                    "id": "1:2", "name": "caption", "type": "TEXT", "characters": "x5",
                    "opacity": 0.9927407220597865,
                    "rotation": 0.1234567890123457,
                    "style": { "fontFamily": "Inter", "letterSpacing": 0.7342199993133545 },
                    "absoluteBoundingBox": { "x": 10, "y": 20, "width": 40, "height": 12 }
                }]
            }]
        }]
    }))
    .unwrap();

    let config = export_components(&document, "k", &ExportOptions::default()).unwrap();
    let parsed = ExportConfig::from_json(&config.to_json_pretty().unwrap()).unwrap();
    assert_eq!(parsed, config);

    let value = serde_json::to_value(&parsed.components[0].variants[&Viewport::Default]).unwrap();
    let caption = &value["children"][0];
    assert_eq!(caption["alpha"], json!(0.9927407220597865));
    assert_eq!(caption["style"]["letterSpacing"], json!(0.7342199993133545));
}

fn group_chain(name: &str, depth: usize) -> String {
    let mut json = format!(
        r#"{{ "id": "{name}", "name": "{name}", "type": "FRAME", "children": ["#
    );
    for level in 0..depth {
        json.push_str(&format!(
            r#"{{ "id": "{name}:{level}", "name": "g{level}", "type": "GROUP", "children": ["#
        ));
    }
    json.push_str(r#"{ "id": "leaf", "name": "leaf", "type": "TEXT", "characters": "x" }"#);
    for _ in 0..=depth {
        json.push_str("]}");
    }
    json
}

#[test]
fn test_deep_documents_parse_and_export() {
    let json = format!(
        r#"{{ "id": "0:0", "name": "Document", "type": "DOCUMENT", "children": [
            {{ "id": "0:1", "name": "layouts", "type": "CANVAS", "children": [{}, {}] }}
        ]}}"#,
        group_chain("Tower", 70),
        group_chain("Abyss", 100)
    );
    let document = figport_document::parse_node(&json).unwrap();

    let options = ExportOptions::default().with_max_depth(80);
    let config = export_components(&document, "k", &options).unwrap();
    let names: Vec<_> = config.components.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Tower"]);

    let parsed = ExportConfig::from_json(&config.to_json_pretty().unwrap()).unwrap();
    assert_eq!(parsed, config);
}
