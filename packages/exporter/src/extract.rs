//! Per-kind property extraction
//!
//! Each extractor returns only the fields it found; the walker merges them
//! onto the record built from the common properties.

use crate::classify::TypeTag;
use crate::config::{
    ContentAlign, CornerRadius, NodeConfig, PaintProps, PaintValue, Size, StrokeProps,
    TextStyleConfig,
};
use crate::position::round_half_up;
use figport_document::{
    CornerRadii, DesignNode, FrameLayout, NodeKind, PaintKind, TextAlignHorizontal, TextContent,
};

const HUG: &str = "HUG";

/// Name, type, size, local offset and non-default visibility/opacity/rotation
pub fn common_props(node: &DesignNode, is_root_level: bool, tag: &TypeTag) -> NodeConfig {
    let mut config = NodeConfig::named(node.name.clone(), tag.as_str());

    if let (Some(bounds), false) = (&node.absolute_bounding_box, is_root_level) {
        match &node.kind {
            NodeKind::Frame(layout) => {
                config.size = Some(frame_size(layout, bounds.width, bounds.height));
            }
            NodeKind::Component(_)
            | NodeKind::Instance(_)
            | NodeKind::Rectangle(_)
            | NodeKind::Ellipse
                if !matches!(tag, TypeTag::SuperContainer | TypeTag::Text) =>
            {
                config.width = Some(round_half_up(bounds.width));
                config.height = Some(round_half_up(bounds.height));
            }
            _ => {}
        }
    }

    if let (Some(transform), false) = (&node.relative_transform, is_root_level) {
        config.local_x = Some(round_half_up(transform[0][2]));
        config.local_y = Some(round_half_up(transform[1][2]));
    }

    config.visible = node.visible.filter(|visible| !visible);
    config.paint.alpha = node.opacity.filter(|opacity| *opacity != 1.0);
    config.rotation = node.rotation.filter(|rotation| *rotation != 0.0);

    config
}

fn frame_size(layout: &FrameLayout, width: f64, height: f64) -> Size {
    let hugs = |mode: &Option<String>| mode.as_deref() == Some(HUG);
    Size {
        width: (!hugs(&layout.layout_sizing_horizontal)).then(|| round_half_up(width)),
        height: (!hugs(&layout.layout_sizing_vertical)).then(|| round_half_up(height)),
    }
}

/// Auto-layout flow, gap and content alignment of a FRAME
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutProps {
    pub flow: Option<String>,
    pub gap: Option<f64>,
    pub content_align: Option<ContentAlign>,
}

pub fn layout_props(layout: &FrameLayout) -> LayoutProps {
    let Some(mode) = &layout.layout_mode else {
        return LayoutProps::default();
    };

    let lower = |value: &Option<String>, fallback: &str| {
        value
            .as_deref()
            .map_or_else(|| fallback.to_string(), str::to_lowercase)
    };

    LayoutProps {
        flow: Some(mode.to_lowercase()),
        gap: layout.item_spacing,
        content_align: Some(ContentAlign {
            x: lower(&layout.primary_axis_align_items, "left"),
            y: lower(&layout.counter_axis_align_items, "top"),
        }),
    }
}

/// Fill of the last visible paint. Text keeps gradients whole; other kinds
/// collapse a gradient to its first stop.
pub fn fill_props(node: &DesignNode) -> PaintProps {
    let Some(fill) = node.fills.iter().filter(|paint| paint.is_visible()).last() else {
        return PaintProps::default();
    };
    let is_text = matches!(node.kind, NodeKind::Text(_));

    match fill.kind {
        PaintKind::Solid => {
            let Some(color) = fill.color else {
                return PaintProps::default();
            };
            let hex = color.to_hex();
            let alpha = fill.translucent_opacity().or(color.translucent_alpha());
            if matches!(node.kind, NodeKind::Rectangle(_)) {
                PaintProps {
                    color: Some(hex),
                    alpha,
                    ..PaintProps::default()
                }
            } else {
                PaintProps {
                    fill: Some(PaintValue::Color(hex)),
                    alpha,
                    ..PaintProps::default()
                }
            }
        }
        kind if kind.is_layout_gradient() && !fill.gradient_stops.is_empty() => {
            if is_text {
                PaintProps {
                    fill: Some(PaintValue::Gradient(
                        fill.gradient_stops.iter().map(|s| s.color.to_hex()).collect(),
                    )),
                    fill_gradient_stops: Some(
                        fill.gradient_stops.iter().map(|s| s.position).collect(),
                    ),
                    alpha: fill.translucent_opacity(),
                    ..PaintProps::default()
                }
            } else {
                let first = fill.gradient_stops[0].color;
                PaintProps {
                    color: Some(first.to_hex()),
                    alpha: fill.translucent_opacity().or(first.translucent_alpha()),
                    ..PaintProps::default()
                }
            }
        }
        _ => PaintProps::default(),
    }
}

/// First visible stroke, plus the stroke weight whenever the node has one
pub fn stroke_props(node: &DesignNode) -> StrokeProps {
    let mut props = StrokeProps {
        stroke_width: node.stroke_weight,
        ..StrokeProps::default()
    };

    let Some(stroke) = node.strokes.iter().find(|paint| paint.is_visible()) else {
        return props;
    };

    match (stroke.kind, stroke.color) {
        (PaintKind::Solid, Some(color)) => {
            props.stroke = Some(PaintValue::Color(color.to_hex()));
        }
        (kind, _)
            if matches!(node.kind, NodeKind::Text(_))
                && kind.is_layout_gradient()
                && !stroke.gradient_stops.is_empty() =>
        {
            props.stroke = Some(PaintValue::Gradient(
                stroke.gradient_stops.iter().map(|s| s.color.to_hex()).collect(),
            ));
            if stroke.gradient_stops.len() > 1 {
                props.stroke_gradient_stops =
                    Some(stroke.gradient_stops.iter().map(|s| s.position).collect());
            }
        }
        _ => {}
    }

    props
}

/// Per-corner radii win over the uniform radius
pub fn corner_radius(corners: &CornerRadii) -> Option<CornerRadius> {
    if let Some([tl, tr, br, bl]) = corners.rectangle_corner_radii {
        return Some(CornerRadius::PerCorner {
            top_left: tl,
            top_right: tr,
            bottom_right: br,
            bottom_left: bl,
        });
    }
    corners.corner_radius.map(CornerRadius::Uniform)
}

pub fn text_align(align: TextAlignHorizontal) -> &'static str {
    match align {
        TextAlignHorizontal::Left => "left",
        TextAlignHorizontal::Center => "center",
        TextAlignHorizontal::Right => "right",
        TextAlignHorizontal::Justified => "justify",
        TextAlignHorizontal::Unknown => "left",
    }
}

/// Text content and a style record with fill and stroke folded in
pub fn text_props(node: &DesignNode, text: &TextContent) -> (String, TextStyleConfig) {
    let mut style = TextStyleConfig::default();

    if let Some(source) = &text.style {
        style.font_family = source.font_family.clone().filter(|family| !family.is_empty());
        style.font_size = source.font_size.filter(|size| *size != 0.0);
        style.font_weight = source.font_weight.filter(|weight| *weight != 0.0);
        style.letter_spacing = source.letter_spacing.filter(|spacing| *spacing != 0.0);
        style.align = source
            .text_align_horizontal
            .map(|align| text_align(align).to_string());
    }

    style.paint = fill_props(node);
    style.stroke = stroke_props(node);

    (text.characters.clone().unwrap_or_default(), style)
}
