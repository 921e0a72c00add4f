use figport_common::is_button;
use figport_document::{DesignNode, NodeKind};

/// Display-object type the rendering engine instantiates for a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeTag {
    AnimationButton,
    ComponentContainer,
    Component,
    SuperContainer,
    AutoLayout,
    Text,
    Rectangle,
    Ellipse,
    Graphics,
    /// Kinds without an engine counterpart pass through by name
    Raw(String),
}

impl TypeTag {
    pub fn as_str(&self) -> &str {
        match self {
            TypeTag::AnimationButton => "AnimationButton",
            TypeTag::ComponentContainer => "ComponentContainer",
            TypeTag::Component => "Component",
            TypeTag::SuperContainer => "SuperContainer",
            TypeTag::AutoLayout => "AutoLayout",
            TypeTag::Text => "Text",
            TypeTag::Rectangle => "Rectangle",
            TypeTag::Ellipse => "Ellipse",
            TypeTag::Graphics => "Graphics",
            TypeTag::Raw(kind) => kind,
        }
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a node. First match wins: the `Button` naming convention, then
/// the root-level role, then component kinds, then the per-kind table.
pub fn classify(node: &DesignNode, is_root_level: bool) -> TypeTag {
    if is_button(&node.name) {
        return TypeTag::AnimationButton;
    }
    if is_root_level {
        return TypeTag::ComponentContainer;
    }

    match &node.kind {
        NodeKind::Component(_) | NodeKind::ComponentSet | NodeKind::Instance(_) => {
            TypeTag::Component
        }
        NodeKind::Group => TypeTag::SuperContainer,
        NodeKind::Frame(_) => TypeTag::AutoLayout,
        NodeKind::Text(_) => TypeTag::Text,
        NodeKind::Rectangle(_) => TypeTag::Rectangle,
        NodeKind::Ellipse => TypeTag::Ellipse,
        NodeKind::Vector => TypeTag::Graphics,
        NodeKind::Document | NodeKind::Canvas | NodeKind::Other(_) => {
            TypeTag::Raw(node.kind.as_str().to_string())
        }
    }
}

/// Type of an exported top-level component, decided by its own name only
pub fn container_type(name: &str) -> TypeTag {
    if is_button(name) {
        TypeTag::AnimationButton
    } else {
        TypeTag::ComponentContainer
    }
}
