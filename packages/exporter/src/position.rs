use figport_document::{HorizontalConstraint, LayoutConstraint, Rect, VerticalConstraint};

/// Round half toward positive infinity, the rounding the engine side expects
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Round to three decimals with the same tie rule
pub fn round_milli(value: f64) -> f64 {
    round_half_up(value * 1000.0) as f64 / 1000.0
}

/// Position of `bounds` relative to the parent's origin. Root-level nodes
/// (no parent bounds) and nodes without bounds get no position.
pub fn relative_position(bounds: Option<&Rect>, parent: Option<&Rect>) -> Option<(i64, i64)> {
    let (bounds, parent) = (bounds?, parent?);
    Some((
        round_half_up(bounds.x - parent.x),
        round_half_up(bounds.y - parent.y),
    ))
}

/// Center of a placeholder's box, relative to the parent when there is one
pub fn placeholder_center(bounds: &Rect, parent: Option<&Rect>) -> (i64, i64) {
    let (cx, cy) = bounds.center();
    match parent {
        Some(parent) => (round_half_up(cx - parent.x), round_half_up(cy - parent.y)),
        None => (round_half_up(cx), round_half_up(cy)),
    }
}

pub fn horizontal_anchor(constraint: HorizontalConstraint) -> f64 {
    match constraint {
        HorizontalConstraint::Left => 0.0,
        HorizontalConstraint::Center => 0.5,
        HorizontalConstraint::Right => 1.0,
        HorizontalConstraint::LeftRight => 0.0,
        HorizontalConstraint::Scale => 0.5,
        HorizontalConstraint::Unknown => 0.0,
    }
}

pub fn vertical_anchor(constraint: VerticalConstraint) -> f64 {
    match constraint {
        VerticalConstraint::Top => 0.0,
        VerticalConstraint::Center => 0.5,
        VerticalConstraint::Bottom => 1.0,
        VerticalConstraint::TopBottom => 0.0,
        VerticalConstraint::Scale => 0.5,
        VerticalConstraint::Unknown => 0.0,
    }
}

/// Anchor of a text node and the coordinates re-derived from it
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextAnchor {
    pub anchor_x: Option<f64>,
    pub anchor_y: Option<f64>,
    pub x: Option<i64>,
    pub y: Option<i64>,
}

fn anchored(relative: f64, extent: f64, anchor: f64) -> i64 {
    round_half_up(relative + extent * anchor)
}

/// Anchor a text box the way the engine will re-render it: a centered
/// anchor moves the stored point to the box middle, an end anchor to its far edge.
pub fn text_anchor(
    constraints: &LayoutConstraint,
    bounds: &Rect,
    parent: Option<&Rect>,
) -> TextAnchor {
    let anchor_x = constraints.horizontal.map(horizontal_anchor);
    let anchor_y = constraints.vertical.map(vertical_anchor);

    let Some(parent) = parent else {
        return TextAnchor {
            anchor_x,
            anchor_y,
            ..TextAnchor::default()
        };
    };

    let relative_x = bounds.x - parent.x;
    let relative_y = bounds.y - parent.y;

    TextAnchor {
        anchor_x,
        anchor_y,
        x: anchor_x.map(|anchor| anchored(relative_x, bounds.width, anchor)),
        y: anchor_y.map(|anchor| anchored(relative_y, bounds.height, anchor)),
    }
}
