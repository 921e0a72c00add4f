use crate::config::{NodeConfig, Scale, Viewport};
use crate::index::{ComponentIndex, ComponentInfo};
use crate::position::{relative_position, round_milli};
use figport_document::{DesignNode, InstanceRef, Rect, VariantProperties};
use indexmap::IndexMap;

/// Differences at or below this are treated as no scaling
const SCALE_EPSILON: f64 = 0.001;

/// Flatten a property map to its textual values, keeping order
pub fn variant_values(properties: &VariantProperties) -> IndexMap<String, String> {
    properties
        .iter()
        .map(|(key, property)| (key.clone(), property.value_text()))
        .collect()
}

/// Viewport bucket for a variant: the first property value naming a supported
/// viewport, else the first viewport mentioned in the name, else default.
///
/// `Viewport`, `Orientation` or `Layout` keys usually carry the value, but a
/// key only counts through its value, so any property may select the bucket.
pub fn detect_viewport(values: &IndexMap<String, String>, name: &str) -> Viewport {
    if let Some(viewport) = values.values().find_map(|value| Viewport::from_token(value)) {
        return viewport;
    }

    let name = name.to_lowercase();
    Viewport::ALL
        .into_iter()
        .find(|viewport| name.contains(viewport.as_str()))
        .unwrap_or(Viewport::Default)
}

/// Scale of a placed instance against its master. `None` when the master has
/// no usable size or the instance is effectively unscaled.
pub fn instance_scale(bounds: &Rect, original: &ComponentInfo) -> Option<Scale> {
    if !original.has_size() {
        return None;
    }

    let scale_x = bounds.width / original.width;
    let scale_y = bounds.height / original.height;

    if (scale_x - 1.0).abs() <= SCALE_EPSILON && (scale_y - 1.0).abs() <= SCALE_EPSILON {
        return None;
    }

    if (scale_x - scale_y).abs() < SCALE_EPSILON {
        Some(Scale::Uniform(round_milli(scale_x)))
    } else {
        Some(Scale::Axes {
            x: round_milli(scale_x),
            y: round_milli(scale_y),
        })
    }
}

/// Viewport tag of a placed instance, `None` for the default bucket. A name
/// mentioning an orientation still counts when the properties say `default`.
fn instance_viewport(node: &DesignNode, instance: &InstanceRef) -> Option<Viewport> {
    let viewport = detect_viewport(&variant_values(&instance.component_properties), &node.name);
    if viewport != Viewport::Default {
        return Some(viewport);
    }

    let name = node.name.to_lowercase();
    [Viewport::Portrait, Viewport::Landscape]
        .into_iter()
        .find(|viewport| name.contains(viewport.as_str()))
}

/// Represent an instance by reference: its master's name as type, position,
/// scale and a viewport tag that is omitted when it is `default`.
pub fn resolve_instance(
    node: &DesignNode,
    instance: &InstanceRef,
    parent_bounds: Option<&Rect>,
    index: &ComponentIndex,
) -> NodeConfig {
    let master = index.resolve(instance.component_id.as_deref());
    let bounds = node.absolute_bounding_box.as_ref();

    let mut config = NodeConfig::named(node.name.clone(), master.name.clone());
    config.is_instance = Some(true);

    if let Some((x, y)) = relative_position(bounds, parent_bounds) {
        config.x = Some(x);
        config.y = Some(y);
    }

    config.scale = bounds.and_then(|bounds| instance_scale(bounds, master));

    config.variant = instance_viewport(node, instance);

    config
}
