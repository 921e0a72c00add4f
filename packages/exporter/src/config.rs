//! Output model of `components.config.json`
//!
//! Every record is built from `Option` fields that are only serialized when
//! set, so an extractor that has nothing to say simply leaves its field empty.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Device layout bucket a variant is selected for at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    Default,
    Portrait,
    Landscape,
}

impl Viewport {
    /// Bucket order in grouped output
    pub const ALL: [Viewport; 3] = [Viewport::Default, Viewport::Portrait, Viewport::Landscape];

    pub fn as_str(&self) -> &'static str {
        match self {
            Viewport::Default => "default",
            Viewport::Portrait => "portrait",
            Viewport::Landscape => "landscape",
        }
    }

    /// Case-insensitive exact match against a supported token
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.to_lowercase();
        Viewport::ALL
            .into_iter()
            .find(|viewport| viewport.as_str() == token)
    }
}

impl std::fmt::Display for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Instance scale relative to its master component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scale {
    Uniform(f64),
    Axes { x: f64, y: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CornerRadius {
    Uniform(f64),
    #[serde(rename_all = "camelCase")]
    PerCorner {
        top_left: f64,
        top_right: f64,
        bottom_right: f64,
        bottom_left: f64,
    },
}

/// A single hex color or the colors of a gradient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaintValue {
    Gradient(Vec<String>),
    Color(String),
}

/// Fill-derived properties. Shapes use `color`, text and others use `fill`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<PaintValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_gradient_stops: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
}

impl PaintProps {
    /// Overlay `other` onto `self`; fields set in `other` win
    pub fn merge(self, other: PaintProps) -> PaintProps {
        PaintProps {
            color: other.color.or(self.color),
            fill: other.fill.or(self.fill),
            fill_gradient_stops: other.fill_gradient_stops.or(self.fill_gradient_stops),
            alpha: other.alpha.or(self.alpha),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<PaintValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_gradient_stops: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentAlign {
    pub x: String,
    pub y: String,
}

/// Explicit frame size; an axis that hugs its content is left out
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    #[serde(flatten)]
    pub paint: PaintProps,
    #[serde(flatten)]
    pub stroke: StrokeProps,
}

/// Layout-property record of one node, recursively holding its children.
/// At variant level `name` and `type` are stripped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_instance: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_x: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_y: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_align: Option<ContentAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<TextStyleConfig>,
    #[serde(flatten)]
    pub paint: PaintProps,
    #[serde(flatten)]
    pub stroke: StrokeProps,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<CornerRadius>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<Scale>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<Viewport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_props: Option<IndexMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NodeConfig>>,
}

impl NodeConfig {
    pub fn named(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    /// Drop `name` and `type` for use as a variant value
    pub fn into_variant(mut self) -> Self {
        self.name = None;
        self.kind = None;
        self
    }
}

/// Variants stored under one viewport: a lone record or an ordered list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariantSlot {
    Many(Vec<NodeConfig>),
    One(Box<NodeConfig>),
}

impl VariantSlot {
    /// Collapse a bucket: `None` when empty, the record itself when alone
    pub fn from_bucket(mut configs: Vec<NodeConfig>) -> Option<Self> {
        match configs.len() {
            0 => None,
            1 => configs.pop().map(|config| VariantSlot::One(Box::new(config))),
            _ => Some(VariantSlot::Many(configs)),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            VariantSlot::Many(configs) => configs.len(),
            VariantSlot::One(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One exported top-level component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub variants: IndexMap<Viewport, VariantSlot>,
}

impl ComponentConfig {
    /// More than one viewport bucket is populated
    pub fn has_variants(&self) -> bool {
        self.variants.len() > 1
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewportCounts {
    pub default: usize,
    pub portrait: usize,
    pub landscape: usize,
}

impl ViewportCounts {
    pub fn get(&self, viewport: Viewport) -> usize {
        match viewport {
            Viewport::Default => self.default,
            Viewport::Portrait => self.portrait,
            Viewport::Landscape => self.landscape,
        }
    }

    fn increment(&mut self, viewport: Viewport) {
        match viewport {
            Viewport::Default => self.default += 1,
            Viewport::Portrait => self.portrait += 1,
            Viewport::Landscape => self.landscape += 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_components: usize,
    pub components_with_variants: usize,
    pub components_without_variants: usize,
    pub variants_by_viewport: ViewportCounts,
}

impl Statistics {
    pub fn collect(components: &[ComponentConfig]) -> Self {
        let with_variants = components.iter().filter(|c| c.has_variants()).count();
        let mut by_viewport = ViewportCounts::default();
        for component in components {
            for viewport in component.variants.keys() {
                by_viewport.increment(*viewport);
            }
        }

        Self {
            total_components: components.len(),
            components_with_variants: with_variants,
            components_without_variants: components.len() - with_variants,
            variants_by_viewport: by_viewport,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub exported_at: String,
    pub figma_file_key: String,
    pub statistics: Statistics,
}

/// The whole `components.config.json` artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    pub components: Vec<ComponentConfig>,
    pub metadata: Metadata,
}

impl ExportConfig {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        figport_document::from_json_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_record_serializes_to_empty_object() {
        let value = serde_json::to_value(NodeConfig::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_flattened_paint_and_stroke() {
        let config = NodeConfig {
            paint: PaintProps {
                color: Some("#ff0000".to_string()),
                alpha: Some(0.5),
                ..PaintProps::default()
            },
            stroke: StrokeProps {
                stroke_width: Some(2.0),
                ..StrokeProps::default()
            },
            ..NodeConfig::named("bg", "Rectangle")
        };

        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({
                "name": "bg",
                "type": "Rectangle",
                "color": "#ff0000",
                "alpha": 0.5,
                "strokeWidth": 2.0
            })
        );
    }

    #[test]
    fn test_merge_prefers_overlay() {
        let base = PaintProps {
            alpha: Some(0.3),
            ..PaintProps::default()
        };
        let overlay = PaintProps {
            fill: Some(PaintValue::Color("#000000".to_string())),
            alpha: Some(0.8),
            ..PaintProps::default()
        };
        let merged = base.merge(overlay);
        assert_eq!(merged.alpha, Some(0.8));
        assert_eq!(merged.fill, Some(PaintValue::Color("#000000".to_string())));

        let kept = PaintProps {
            alpha: Some(0.3),
            ..PaintProps::default()
        }
        .merge(PaintProps::default());
        assert_eq!(kept.alpha, Some(0.3));
    }

    #[test]
    fn test_scale_forms() {
        assert_eq!(serde_json::to_value(Scale::Uniform(1.5)).unwrap(), json!(1.5));
        assert_eq!(
            serde_json::to_value(Scale::Axes { x: 1.5, y: 1.0 }).unwrap(),
            json!({ "x": 1.5, "y": 1.0 })
        );
    }

    #[test]
    fn test_per_corner_radius_keys() {
        let radius = CornerRadius::PerCorner {
            top_left: 1.0,
            top_right: 2.0,
            bottom_right: 3.0,
            bottom_left: 4.0,
        };
        assert_eq!(
            serde_json::to_value(radius).unwrap(),
            json!({ "topLeft": 1.0, "topRight": 2.0, "bottomRight": 3.0, "bottomLeft": 4.0 })
        );
    }

    #[test]
    fn test_bucket_collapse() {
        assert_eq!(VariantSlot::from_bucket(vec![]), None);

        let one = VariantSlot::from_bucket(vec![NodeConfig::default()]).unwrap();
        assert!(matches!(one, VariantSlot::One(_)));
        assert_eq!(serde_json::to_value(&one).unwrap(), json!({}));

        let many =
            VariantSlot::from_bucket(vec![NodeConfig::default(), NodeConfig::default()]).unwrap();
        assert_eq!(many.len(), 2);
        assert_eq!(serde_json::to_value(&many).unwrap(), json!([{}, {}]));
    }

    #[test]
    fn test_viewport_tokens() {
        assert_eq!(Viewport::from_token("Portrait"), Some(Viewport::Portrait));
        assert_eq!(Viewport::from_token("LANDSCAPE"), Some(Viewport::Landscape));
        assert_eq!(Viewport::from_token("wide"), None);
    }
}
