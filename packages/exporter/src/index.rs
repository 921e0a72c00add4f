use figport_common::{walk_node, walk_tree, Visitor};
use figport_document::{DesignNode, NodeKind, Rect};
use std::collections::HashMap;
use tracing::debug;

/// Name and original size of a master component
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentInfo {
    pub name: String,
    pub width: f64,
    pub height: f64,
}

impl ComponentInfo {
    fn from_bounds(name: &str, bounds: Option<&Rect>) -> Self {
        Self {
            name: name.to_string(),
            width: bounds.map_or(0.0, |b| b.width),
            height: bounds.map_or(0.0, |b| b.height),
        }
    }

    /// Stand-in for an instance whose master is not in the document
    pub fn sentinel() -> Self {
        Self {
            name: "Component".to_string(),
            width: 0.0,
            height: 0.0,
        }
    }

    /// Both dimensions are usable as a scale reference
    pub fn has_size(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Read-only map from component id to [`ComponentInfo`], built once per run
/// over the whole document so cross-page instance references resolve.
#[derive(Debug, Clone)]
pub struct ComponentIndex {
    entries: HashMap<String, ComponentInfo>,
    fallback: ComponentInfo,
}

impl ComponentIndex {
    pub fn build(document: &DesignNode) -> Self {
        let mut builder = IndexBuilder {
            entries: HashMap::new(),
        };
        walk_tree(&mut builder, document);
        debug!(components = builder.entries.len(), "Component index built");

        Self {
            entries: builder.entries,
            fallback: ComponentInfo::sentinel(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&ComponentInfo> {
        self.entries.get(id)
    }

    /// Look up an instance's master, falling back to the zero-size sentinel
    pub fn resolve(&self, component_id: Option<&str>) -> &ComponentInfo {
        match component_id.and_then(|id| self.entries.get(id)) {
            Some(info) => info,
            None => {
                debug!(component_id = ?component_id, "Component not in index, using sentinel");
                &self.fallback
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct IndexBuilder {
    entries: HashMap<String, ComponentInfo>,
}

impl<'a> Visitor<'a> for IndexBuilder {
    fn visit_node(&mut self, node: &'a DesignNode, parent: Option<&'a DesignNode>) {
        let parent_is_set = parent.is_some_and(|p| p.kind.is_component_set());
        let is_master = matches!(node.kind, NodeKind::Component(_) | NodeKind::ComponentSet);

        if is_master && !parent_is_set && !node.id.is_empty() && !node.name.is_empty() {
            self.entries.insert(
                node.id.clone(),
                ComponentInfo::from_bounds(&node.name, node.absolute_bounding_box.as_ref()),
            );
        }

        // Variants answer to the set's name but keep their own size
        if node.kind.is_component_set() {
            for variant in node.children.iter().filter(|c| c.kind.is_component()) {
                if variant.id.is_empty() {
                    continue;
                }
                self.entries.insert(
                    variant.id.clone(),
                    ComponentInfo::from_bounds(&node.name, variant.absolute_bounding_box.as_ref()),
                );
            }
        }

        walk_node(self, node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> DesignNode {
        serde_json::from_value(json!({
            "id": "0:0", "name": "Document", "type": "DOCUMENT",
            "children": [
                { "id": "0:1", "name": "layouts", "type": "CANVAS", "children": [
                    { "id": "1:1", "name": "Coin", "type": "COMPONENT",
                      "absoluteBoundingBox": { "x": 0, "y": 0, "width": 64, "height": 64 } }
                ]},
                { "id": "0:2", "name": "library", "type": "CANVAS", "children": [
                    { "id": "2:1", "name": "SpinButton", "type": "COMPONENT_SET",
                      "absoluteBoundingBox": { "x": 0, "y": 0, "width": 300, "height": 200 },
                      "children": [
                        { "id": "2:2", "name": "Viewport=portrait", "type": "COMPONENT",
                          "absoluteBoundingBox": { "x": 0, "y": 0, "width": 100, "height": 120 } },
                        { "id": "2:3", "name": "Viewport=landscape", "type": "COMPONENT" }
                      ]}
                ]}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_indexes_every_page() {
        let index = ComponentIndex::build(&document());
        assert_eq!(index.len(), 4);
        assert_eq!(
            index.get("1:1"),
            Some(&ComponentInfo {
                name: "Coin".to_string(),
                width: 64.0,
                height: 64.0
            })
        );
    }

    #[test]
    fn test_variants_use_set_name_and_own_size() {
        let index = ComponentIndex::build(&document());
        let set = index.get("2:1").unwrap();
        assert_eq!((set.name.as_str(), set.width, set.height), ("SpinButton", 300.0, 200.0));

        let portrait = index.get("2:2").unwrap();
        assert_eq!(portrait.name, "SpinButton");
        assert_eq!((portrait.width, portrait.height), (100.0, 120.0));
    }

    #[test]
    fn test_missing_bounds_mean_zero_size() {
        let index = ComponentIndex::build(&document());
        let landscape = index.get("2:3").unwrap();
        assert_eq!(landscape.name, "SpinButton");
        assert!(!landscape.has_size());
    }

    #[test]
    fn test_unknown_id_resolves_to_sentinel() {
        let index = ComponentIndex::build(&document());
        assert_eq!(index.resolve(Some("9:9")), &ComponentInfo::sentinel());
        assert_eq!(index.resolve(None), &ComponentInfo::sentinel());
        assert_eq!(index.resolve(Some("1:1")).name, "Coin");
    }
}
