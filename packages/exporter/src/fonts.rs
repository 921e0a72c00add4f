//! Text-style export for the `fonts` page
//!
//! Every TEXT layer on the page becomes a named text style for the rendering
//! engine, emitted as a generated JavaScript module.

use crate::config::PaintValue;
use crate::error::{ExportError, ExportResult};
use crate::extract::text_align;
use crate::options::ExportOptions;
use figport_common::{walk_tree, Visitor};
use figport_document::{DesignNode, EffectKind, Paint, PaintKind, TextContent};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{info, instrument};

/// File name of the generated module
pub const FONTS_MODULE_FILE: &str = "FontsStyle.js";

const FALLBACK_FILL: &str = "#000000";

/// Constructor options of one engine text style
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FontStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    pub align: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<f64>,
    pub fill: Option<PaintValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_gradient_stops: Option<Vec<f64>>,
    /// 0 linear, 1 radial
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_gradient_type: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_shadow: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_shadow_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_shadow_blur: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_shadow_angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_shadow_distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_wrap: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_wrap_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraph_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraph_indent: Option<f64>,
}

impl FontStyle {
    pub fn from_text(node: &DesignNode, text: &TextContent) -> Self {
        let mut style = FontStyle {
            align: "left".to_string(),
            ..FontStyle::default()
        };

        if let Some(source) = &text.style {
            style.font_family = source.font_family.clone();
            style.font_size = source.font_size;
            style.letter_spacing = source.letter_spacing;
            style.line_height = source.line_height_px;
            style.font_weight = source.font_weight;
            if let Some(align) = source.text_align_horizontal {
                style.align = text_align(align).to_string();
            }
            style.paragraph_spacing = source.paragraph_spacing.filter(|v| *v != 0.0);
            style.paragraph_indent = source.paragraph_indent.filter(|v| *v != 0.0);
        }

        // The first layer is used as-is, even when hidden
        style.apply_fill(node.fills.first());

        if let Some(shadow) = node
            .effects
            .iter()
            .find(|effect| effect.kind == EffectKind::DropShadow && effect.visible)
        {
            style.drop_shadow = Some(true);
            style.drop_shadow_color = shadow.color.map(|color| color.to_hex());
            style.drop_shadow_blur = shadow.radius;
            if let Some(offset) = shadow.offset {
                style.drop_shadow_angle = Some(offset.y.atan2(offset.x));
                style.drop_shadow_distance = Some(offset.x.hypot(offset.y));
            }
        }

        if let Some(width) = node
            .absolute_bounding_box
            .map(|bounds| bounds.width)
            .filter(|width| *width != 0.0)
        {
            style.word_wrap = Some(true);
            style.word_wrap_width = Some(width);
        }

        style
    }

    fn apply_fill(&mut self, paint: Option<&Paint>) {
        let fallback = || Some(PaintValue::Color(FALLBACK_FILL.to_string()));

        self.fill = match paint {
            Some(paint) if paint.kind == PaintKind::Solid => match paint.color {
                Some(color) => Some(PaintValue::Color(color.to_hex())),
                None => fallback(),
            },
            Some(paint) if paint.kind.is_gradient() => {
                self.fill_gradient_stops =
                    Some(paint.gradient_stops.iter().map(|stop| stop.position).collect());
                self.fill_gradient_type = Some(u8::from(paint.kind == PaintKind::GradientRadial));
                Some(PaintValue::Gradient(
                    paint.gradient_stops.iter().map(|stop| stop.color.to_hex()).collect(),
                ))
            }
            _ => fallback(),
        };
    }
}

/// Styles keyed by layer name plus the font families they use
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontExport {
    pub styles: IndexMap<String, FontStyle>,
    pub families: IndexMap<String, String>,
    /// TEXT layers found, counting layers that share a name
    pub text_nodes: usize,
}

impl FontExport {
    /// Render the generated JavaScript module
    pub fn render_module(&self) -> ExportResult<String> {
        let families = serde_json::to_string_pretty(&self.families)?;
        let styles = self
            .styles
            .iter()
            .map(|(name, style)| -> ExportResult<String> {
                Ok(format!(
                    "  {}: new PIXI.TextStyle({})",
                    serde_json::to_string(name)?,
                    serde_json::to_string_pretty(style)?
                ))
            })
            .collect::<ExportResult<Vec<_>>>()?
            .join(",\n");

        Ok(format!(
            "// AUTO-GENERATED. Do NOT edit manually.\n\
             import * as PIXI from 'pixi.js';\n\n\
             /** Font families used across fonts page of Figma */\n\
             export const FontFamilies = {families};\n\n\
             /** PIXI.TextStyle map keyed by layer name */\n\
             export const FontsStyle = {{\n{styles}\n}};\n"
        ))
    }
}

struct TextCollector<'a> {
    nodes: Vec<(&'a DesignNode, &'a TextContent)>,
}

impl<'a> Visitor<'a> for TextCollector<'a> {
    fn visit_text(&mut self, node: &'a DesignNode, text: &'a TextContent) {
        self.nodes.push((node, text));
    }
}

/// Collect a style for every TEXT layer on the fonts page. A later layer
/// with the same name replaces the earlier one in place.
#[instrument(skip(document, options), fields(page = %options.fonts_page))]
pub fn export_fonts(document: &DesignNode, options: &ExportOptions) -> ExportResult<FontExport> {
    let page = document
        .page(&options.fonts_page)
        .ok_or_else(|| ExportError::PageNotFound {
            page: options.fonts_page.clone(),
        })?;

    let mut collector = TextCollector { nodes: Vec::new() };
    walk_tree(&mut collector, page);

    let mut export = FontExport {
        text_nodes: collector.nodes.len(),
        ..FontExport::default()
    };

    for (node, text) in collector.nodes {
        let style = FontStyle::from_text(node, text);
        if let Some(family) = &style.font_family {
            export.families.insert(family.clone(), family.clone());
        }

        let name = if node.name.is_empty() {
            format!("Style_{}", node.id)
        } else {
            node.name.clone()
        };
        export.styles.insert(name, style);
    }

    info!(
        styles = export.styles.len(),
        families = export.families.len(),
        "Collected text styles"
    );
    Ok(export)
}
