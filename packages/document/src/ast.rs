use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Response body of the file endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    pub document: DesignNode,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub schema_version: u32,
}

/// Axis-aligned box in document space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// 2x3 affine matrix `[[a, c, tx], [b, d, ty]]`
pub type Transform = [[f64; 3]; 2];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

/// RGBA color with channels in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
}

impl Color {
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: None }
    }

    /// `#rrggbb`, alpha ignored
    pub fn to_hex(&self) -> String {
        fn channel(v: f64) -> u8 {
            (v * 255.0).round().clamp(0.0, 255.0) as u8
        }
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }

    /// Alpha channel when it is present and not fully opaque
    pub fn translucent_alpha(&self) -> Option<f64> {
        self.a.filter(|a| *a != 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaintKind {
    Solid,
    GradientLinear,
    GradientRadial,
    GradientAngular,
    GradientDiamond,
    Image,
    Emoji,
    Video,
    #[serde(other)]
    Unknown,
}

impl PaintKind {
    /// Gradients the layout export understands
    pub fn is_layout_gradient(self) -> bool {
        matches!(
            self,
            PaintKind::GradientLinear | PaintKind::GradientRadial | PaintKind::GradientAngular
        )
    }

    pub fn is_gradient(self) -> bool {
        self.is_layout_gradient() || self == PaintKind::GradientDiamond
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub position: f64,
    pub color: Color,
}

/// A single fill or stroke layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    #[serde(rename = "type")]
    pub kind: PaintKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gradient_stops: Vec<ColorStop>,
}

impl Paint {
    /// Hidden only when explicitly switched off
    pub fn is_visible(&self) -> bool {
        self.visible != Some(false)
    }

    /// Paint opacity when it is present and not fully opaque
    pub fn translucent_opacity(&self) -> Option<f64> {
        self.opacity.filter(|o| *o != 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectKind {
    DropShadow,
    InnerShadow,
    LayerBlur,
    BackgroundBlur,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    #[serde(rename = "type")]
    pub kind: EffectKind,
    #[serde(default)]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<Vector>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HorizontalConstraint {
    Left,
    Right,
    Center,
    LeftRight,
    Scale,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerticalConstraint {
    Top,
    Bottom,
    Center,
    TopBottom,
    Scale,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConstraint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<HorizontalConstraint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical: Option<VerticalConstraint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAlignHorizontal {
    Left,
    Center,
    Right,
    Justified,
    #[serde(other)]
    Unknown,
}

/// Text style record attached to TEXT nodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height_px: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph_indent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align_horizontal: Option<TextAlignHorizontal>,
}

/// One entry of a component's or instance's property map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentProperty {
    pub value: serde_json::Value,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl ComponentProperty {
    /// Value rendered as text; booleans and numbers use their JSON spelling
    pub fn value_text(&self) -> String {
        match &self.value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Variant key/value map in declaration order
pub type VariantProperties = IndexMap<String, ComponentProperty>;

/// Auto-layout settings of a FRAME
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameLayout {
    pub layout_mode: Option<String>,
    pub item_spacing: Option<f64>,
    pub primary_axis_align_items: Option<String>,
    pub counter_axis_align_items: Option<String>,
    pub layout_sizing_horizontal: Option<String>,
    pub layout_sizing_vertical: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextContent {
    pub characters: Option<String>,
    pub style: Option<TypeStyle>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CornerRadii {
    pub corner_radius: Option<f64>,
    /// `[top-left, top-right, bottom-right, bottom-left]`
    pub rectangle_corner_radii: Option<[f64; 4]>,
}

/// Weak reference from an instance to its master component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstanceRef {
    pub component_id: Option<String>,
    pub component_properties: VariantProperties,
}

/// Node kind with the data only that kind carries
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Document,
    Canvas,
    Group,
    Frame(FrameLayout),
    Component(VariantProperties),
    ComponentSet,
    Instance(InstanceRef),
    Text(TextContent),
    Rectangle(CornerRadii),
    Ellipse,
    Vector,
    /// Any kind the exporter has no dedicated handling for, by its raw name
    Other(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Document => "DOCUMENT",
            NodeKind::Canvas => "CANVAS",
            NodeKind::Group => "GROUP",
            NodeKind::Frame(_) => "FRAME",
            NodeKind::Component(_) => "COMPONENT",
            NodeKind::ComponentSet => "COMPONENT_SET",
            NodeKind::Instance(_) => "INSTANCE",
            NodeKind::Text(_) => "TEXT",
            NodeKind::Rectangle(_) => "RECTANGLE",
            NodeKind::Ellipse => "ELLIPSE",
            NodeKind::Vector => "VECTOR",
            NodeKind::Other(kind) => kind,
        }
    }

    pub fn is_component(&self) -> bool {
        matches!(self, NodeKind::Component(_))
    }

    pub fn is_component_set(&self) -> bool {
        matches!(self, NodeKind::ComponentSet)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of the design tree. Parents own their children; the tree is acyclic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawNode", into = "RawNode")]
pub struct DesignNode {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    pub visible: Option<bool>,
    pub opacity: Option<f64>,
    pub rotation: Option<f64>,
    pub absolute_bounding_box: Option<Rect>,
    pub relative_transform: Option<Transform>,
    pub constraints: Option<LayoutConstraint>,
    pub fills: Vec<Paint>,
    pub strokes: Vec<Paint>,
    pub stroke_weight: Option<f64>,
    pub effects: Vec<Effect>,
    pub children: Vec<DesignNode>,
}

impl DesignNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            visible: None,
            opacity: None,
            rotation: None,
            absolute_bounding_box: None,
            relative_transform: None,
            constraints: None,
            fills: Vec::new(),
            strokes: Vec::new(),
            stroke_weight: None,
            effects: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.absolute_bounding_box = Some(bounds);
        self
    }

    pub fn with_children(mut self, children: Vec<DesignNode>) -> Self {
        self.children = children;
        self
    }

    /// Direct child page (or any child) with the given name
    pub fn page(&self, name: &str) -> Option<&DesignNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Variant properties for components and instances, empty for other kinds
    pub fn variant_properties(&self) -> Option<&VariantProperties> {
        match &self.kind {
            NodeKind::Component(props) => Some(props),
            NodeKind::Instance(instance) => Some(&instance.component_properties),
            _ => None,
        }
    }
}

/// Wire shape of a node: every field of every kind, all optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    absolute_bounding_box: Option<Rect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    relative_transform: Option<Transform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    constraints: Option<LayoutConstraint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    fills: Vec<Paint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    strokes: Vec<Paint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stroke_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    effects: Vec<Effect>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<DesignNode>,

    // FRAME
    #[serde(default, skip_serializing_if = "Option::is_none")]
    layout_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    item_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    primary_axis_align_items: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    counter_axis_align_items: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    layout_sizing_horizontal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    layout_sizing_vertical: Option<String>,

    // TEXT
    #[serde(default, skip_serializing_if = "Option::is_none")]
    characters: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    style: Option<TypeStyle>,

    // RECTANGLE
    #[serde(default, skip_serializing_if = "Option::is_none")]
    corner_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rectangle_corner_radii: Option<[f64; 4]>,

    // COMPONENT / INSTANCE
    #[serde(default, skip_serializing_if = "Option::is_none")]
    component_id: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    component_properties: VariantProperties,
}

impl From<RawNode> for DesignNode {
    fn from(raw: RawNode) -> Self {
        let kind = match raw.kind.as_str() {
            "DOCUMENT" => NodeKind::Document,
            "CANVAS" => NodeKind::Canvas,
            "GROUP" => NodeKind::Group,
            "FRAME" => NodeKind::Frame(FrameLayout {
                layout_mode: raw.layout_mode,
                item_spacing: raw.item_spacing,
                primary_axis_align_items: raw.primary_axis_align_items,
                counter_axis_align_items: raw.counter_axis_align_items,
                layout_sizing_horizontal: raw.layout_sizing_horizontal,
                layout_sizing_vertical: raw.layout_sizing_vertical,
            }),
            "COMPONENT" => NodeKind::Component(raw.component_properties),
            "COMPONENT_SET" => NodeKind::ComponentSet,
            "INSTANCE" => NodeKind::Instance(InstanceRef {
                component_id: raw.component_id,
                component_properties: raw.component_properties,
            }),
            "TEXT" => NodeKind::Text(TextContent {
                characters: raw.characters,
                style: raw.style,
            }),
            "RECTANGLE" => NodeKind::Rectangle(CornerRadii {
                corner_radius: raw.corner_radius,
                rectangle_corner_radii: raw.rectangle_corner_radii,
            }),
            "ELLIPSE" => NodeKind::Ellipse,
            "VECTOR" => NodeKind::Vector,
            _ => NodeKind::Other(raw.kind),
        };

        DesignNode {
            id: raw.id,
            name: raw.name,
            kind,
            visible: raw.visible,
            opacity: raw.opacity,
            rotation: raw.rotation,
            absolute_bounding_box: raw.absolute_bounding_box,
            relative_transform: raw.relative_transform,
            constraints: raw.constraints,
            fills: raw.fills,
            strokes: raw.strokes,
            stroke_weight: raw.stroke_weight,
            effects: raw.effects,
            children: raw.children,
        }
    }
}

impl From<DesignNode> for RawNode {
    fn from(node: DesignNode) -> Self {
        let mut raw = RawNode {
            id: node.id,
            name: node.name,
            kind: node.kind.as_str().to_string(),
            visible: node.visible,
            opacity: node.opacity,
            rotation: node.rotation,
            absolute_bounding_box: node.absolute_bounding_box,
            relative_transform: node.relative_transform,
            constraints: node.constraints,
            fills: node.fills,
            strokes: node.strokes,
            stroke_weight: node.stroke_weight,
            effects: node.effects,
            children: node.children,
            ..RawNode::default()
        };

        match node.kind {
            NodeKind::Frame(layout) => {
                raw.layout_mode = layout.layout_mode;
                raw.item_spacing = layout.item_spacing;
                raw.primary_axis_align_items = layout.primary_axis_align_items;
                raw.counter_axis_align_items = layout.counter_axis_align_items;
                raw.layout_sizing_horizontal = layout.layout_sizing_horizontal;
                raw.layout_sizing_vertical = layout.layout_sizing_vertical;
            }
            NodeKind::Component(props) => raw.component_properties = props,
            NodeKind::Instance(instance) => {
                raw.component_id = instance.component_id;
                raw.component_properties = instance.component_properties;
            }
            NodeKind::Text(text) => {
                raw.characters = text.characters;
                raw.style = text.style;
            }
            NodeKind::Rectangle(corners) => {
                raw.corner_radius = corners.corner_radius;
                raw.rectangle_corner_radii = corners.rectangle_corner_radii;
            }
            NodeKind::Document
            | NodeKind::Canvas
            | NodeKind::Group
            | NodeKind::ComponentSet
            | NodeKind::Ellipse
            | NodeKind::Vector
            | NodeKind::Other(_) => {}
        }

        raw
    }
}
