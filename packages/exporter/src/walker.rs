use crate::classify::classify;
use crate::config::NodeConfig;
use crate::error::{ExportError, ExportResult};
use crate::extract::{
    common_props, corner_radius, fill_props, layout_props, stroke_props, text_props,
};
use crate::index::ComponentIndex;
use crate::instance::resolve_instance;
use crate::position::{placeholder_center, relative_position, text_anchor};
use figport_common::{is_design_reference, is_placeholder};
use figport_document::{DesignNode, NodeKind, Rect};
use tracing::trace;

/// Recursive transform of a node subtree into a [`NodeConfig`]
pub struct TreeWalker<'a> {
    index: &'a ComponentIndex,
    max_depth: usize,
}

impl<'a> TreeWalker<'a> {
    pub fn new(index: &'a ComponentIndex, max_depth: usize) -> Self {
        Self { index, max_depth }
    }

    pub fn index(&self) -> &'a ComponentIndex {
        self.index
    }

    /// Transform `node`, positioned against `parent_bounds`
    pub fn walk(
        &self,
        node: &DesignNode,
        parent_bounds: Option<&Rect>,
        is_root_level: bool,
    ) -> ExportResult<NodeConfig> {
        self.walk_at(node, parent_bounds, is_root_level, 0)
    }

    fn walk_at(
        &self,
        node: &DesignNode,
        parent_bounds: Option<&Rect>,
        is_root_level: bool,
        depth: usize,
    ) -> ExportResult<NodeConfig> {
        if depth > self.max_depth {
            return Err(ExportError::DepthExceeded {
                name: node.name.clone(),
                limit: self.max_depth,
            });
        }
        trace!(node = %node.name, kind = %node.kind, depth, "Walking node");

        if is_placeholder(&node.name) {
            return Ok(placeholder(node, parent_bounds));
        }

        if let NodeKind::Instance(instance) = &node.kind {
            return Ok(resolve_instance(node, instance, parent_bounds, self.index));
        }

        let tag = classify(node, is_root_level);
        let mut config = common_props(node, is_root_level, &tag);

        let bounds = node.absolute_bounding_box.as_ref();
        if let Some((x, y)) = relative_position(bounds, parent_bounds) {
            config.x = Some(x);
            config.y = Some(y);
        }

        match &node.kind {
            NodeKind::Frame(layout) => {
                let layout = layout_props(layout);
                config.flow = layout.flow;
                config.gap = layout.gap;
                config.content_align = layout.content_align;
            }
            NodeKind::Text(text) => {
                let (content, style) = text_props(node, text);
                config.text = Some(content);
                config.style = Some(style);

                if let (Some(constraints), Some(bounds)) =
                    (&node.constraints, &node.absolute_bounding_box)
                {
                    let anchor = text_anchor(constraints, bounds, parent_bounds);
                    config.anchor_x = anchor.anchor_x;
                    config.anchor_y = anchor.anchor_y;
                    config.x = anchor.x.or(config.x);
                    config.y = anchor.y.or(config.y);
                }
            }
            NodeKind::Rectangle(corners) => {
                config.paint = config.paint.merge(fill_props(node));
                config.stroke = stroke_props(node);
                config.corner_radius = corner_radius(corners);
            }
            NodeKind::Ellipse | NodeKind::Vector => {
                config.paint = config.paint.merge(fill_props(node));
                config.stroke = stroke_props(node);
            }
            NodeKind::Group
            | NodeKind::Component(_)
            | NodeKind::ComponentSet
            | NodeKind::Instance(_)
            | NodeKind::Document
            | NodeKind::Canvas
            | NodeKind::Other(_) => {}
        }

        if !node.children.is_empty() && exports_children(&node.kind, is_root_level) {
            let children = node
                .children
                .iter()
                .filter(|child| !is_design_reference(&child.name))
                .map(|child| self.walk_at(child, bounds, false, depth + 1))
                .collect::<ExportResult<Vec<_>>>()?;
            config.children = Some(children);
        }

        Ok(config)
    }
}

/// Whether a node's children are part of its exported record. Everything is
/// exported at root level; below it components are opaque references.
pub fn exports_children(kind: &NodeKind, is_root_level: bool) -> bool {
    if is_root_level {
        return true;
    }
    match kind {
        NodeKind::Group | NodeKind::Frame(_) => true,
        NodeKind::Component(_) | NodeKind::ComponentSet | NodeKind::Instance(_) => false,
        NodeKind::Document
        | NodeKind::Canvas
        | NodeKind::Text(_)
        | NodeKind::Rectangle(_)
        | NodeKind::Ellipse
        | NodeKind::Vector
        | NodeKind::Other(_) => true,
    }
}

/// A placeholder keeps only its name and the center of its box
fn placeholder(node: &DesignNode, parent_bounds: Option<&Rect>) -> NodeConfig {
    let mut config = NodeConfig::named(node.name.clone(), "SuperContainer");
    if let Some(bounds) = &node.absolute_bounding_box {
        let (x, y) = placeholder_center(bounds, parent_bounds);
        config.x = Some(x);
        config.y = Some(y);
    }
    config
}
