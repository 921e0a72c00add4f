//! Image export planning.
//!
//! The images page is laid out as folders (`path/<folder>` layers) holding
//! exportable layers. A layer ending in one of the group suffixes exports each
//! of its children under a combined alias, a component set exports each
//! variant, and any other layer exports itself. This module only decides what
//! to render and where; fetching and writing files is left to the caller.

use crate::error::{ExportError, ExportResult};
use crate::options::ExportOptions;
use figport_common::{folder_name, image_group_suffix, VARIANT_TYPE_PREFIX};
use figport_document::DesignNode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, instrument};

pub const IMAGE_MANIFEST_FILE: &str = "meta.json";

/// Prefix of every `src` in the manifest, as the engine's loader sees it
pub const ASSET_URL_BASE: &str = "./assets/img";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Webp,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Webp => "webp",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Formats requested for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatSelection {
    #[default]
    Png,
    Webp,
    Both,
}

impl FormatSelection {
    /// Formats in the order they are fetched
    pub fn formats(self) -> &'static [ImageFormat] {
        match self {
            FormatSelection::Png => &[ImageFormat::Png],
            FormatSelection::Webp => &[ImageFormat::Webp],
            FormatSelection::Both => &[ImageFormat::Webp, ImageFormat::Png],
        }
    }
}

impl FromStr for FormatSelection {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "png" => Ok(FormatSelection::Png),
            "webp" => Ok(FormatSelection::Webp),
            "both" => Ok(FormatSelection::Both),
            other => Err(ExportError::InvalidImageFormat {
                value: other.to_string(),
            }),
        }
    }
}

/// A node to render, where its files go and the alias it is loaded by
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTarget {
    pub node_id: String,
    /// Folder below the image output directory, `/`-separated, empty for the root
    pub export_path: String,
    pub alias: String,
    /// File name without extension
    pub file_stem: String,
}

impl ImageTarget {
    pub fn file_name(&self, format: ImageFormat) -> String {
        format!("{}.{}", self.file_stem, format.extension())
    }

    pub fn output_path(&self, out_dir: &Path, format: ImageFormat) -> PathBuf {
        out_dir
            .join(&self.export_path)
            .join(self.file_name(format))
    }

    /// Manifest record for the formats that ended up on disk
    pub fn manifest_entry(&self, exported: &[ImageFormat]) -> ManifestEntry {
        ManifestEntry {
            alias: self.alias.clone(),
            src: asset_src(&self.export_path, &self.file_stem, exported),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub alias: String,
    pub src: String,
}

/// Loader path of an image. Several formats share one brace pattern, with
/// png listed before webp.
pub fn asset_src(export_path: &str, file_stem: &str, exported: &[ImageFormat]) -> String {
    let base = format!("{}/{}/{}", ASSET_URL_BASE, export_path, file_stem).replacen("//", "/", 1);

    match exported {
        [single] => format!("{}.{}", base, single),
        [ImageFormat::Webp, ImageFormat::Png] | [ImageFormat::Png, ImageFormat::Webp] => {
            format!("{}.{{png,webp}}", base)
        }
        formats => {
            let list: Vec<_> = formats.iter().map(|format| format.extension()).collect();
            format!("{}.{{{}}}", base, list.join(","))
        }
    }
}

/// Manifest text: one entry per line inside the array
pub fn render_manifest(entries: &[ManifestEntry]) -> ExportResult<String> {
    let json = serde_json::to_string(entries)?;
    Ok(json
        .replace("},{", "},\n    {")
        .replace("[{", "[\n    {")
        .replace("}]", "}\n]"))
}

/// Plan the image export of the images page
#[instrument(skip(document, options), fields(page = %options.images_page))]
pub fn collect_images(
    document: &DesignNode,
    options: &ExportOptions,
) -> ExportResult<Vec<ImageTarget>> {
    let page = document
        .page(&options.images_page)
        .ok_or_else(|| ExportError::PageNotFound {
            page: options.images_page.clone(),
        })?;

    let mut targets = Vec::new();
    collect_folder(page, "", &mut targets);
    info!(images = targets.len(), "Planned image export");
    Ok(targets)
}

fn join_path(base: &str, segment: &str) -> String {
    match (base.is_empty(), segment.is_empty()) {
        (true, _) => segment.to_string(),
        (false, true) => base.to_string(),
        (false, false) => format!("{}/{}", base, segment),
    }
}

fn collect_folder(node: &DesignNode, export_path: &str, targets: &mut Vec<ImageTarget>) {
    for child in &node.children {
        match folder_name(&child.name) {
            Some(folder) => collect_folder(child, &join_path(export_path, folder), targets),
            None => collect_element(child, export_path, targets),
        }
    }
}

fn collect_element(node: &DesignNode, export_path: &str, targets: &mut Vec<ImageTarget>) {
    // A suffixed layer without children falls through to the plain cases
    if let Some(suffix) = image_group_suffix(&node.name) {
        if !node.children.is_empty() {
            let group = node.name.replacen(suffix, "", 1);
            let group_path = join_path(export_path, &group);
            targets.extend(node.children.iter().map(|child| ImageTarget {
                node_id: child.id.clone(),
                export_path: group_path.clone(),
                alias: format!("{}{}_{}", group, suffix, child.name),
                file_stem: child.name.clone(),
            }));
            return;
        }
    }

    if node.kind.is_component_set() {
        let set_path = join_path(export_path, &node.name);
        targets.extend(node.children.iter().map(|variant| {
            let variant_name = variant.name.replacen(VARIANT_TYPE_PREFIX, "", 1);
            ImageTarget {
                node_id: variant.id.clone(),
                export_path: set_path.clone(),
                alias: format!("{}_{}", node.name, variant_name),
                file_stem: variant_name,
            }
        }));
        return;
    }

    targets.push(ImageTarget {
        node_id: node.id.clone(),
        export_path: export_path.to_string(),
        alias: node.name.clone(),
        file_stem: node.name.clone(),
    });
}
