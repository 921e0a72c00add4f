//! # Figport Exporter
//!
//! Compiles the `layouts` page of a design file into `components.config.json`,
//! the layout description the rendering engine instantiates at runtime.
//!
//! The pipeline for each top-level node is: classify, extract per-kind
//! properties, resolve the parent-relative position, resolve instances
//! against the [`ComponentIndex`], group component-set variants by viewport,
//! and recurse into children.
//!
//! ```rust
//! use figport_exporter::{export_components, ExportOptions};
//!
//! let document = figport_document::parse_node(r#"{
//!     "id": "0:0", "name": "Document", "type": "DOCUMENT",
//!     "children": [{
//!         "id": "0:1", "name": "layouts", "type": "CANVAS",
//!         "children": [{ "id": "1:1", "name": "SpinButton", "type": "FRAME" }]
//!     }]
//! }"#).unwrap();
//!
//! let config = export_components(&document, "file-key", &ExportOptions::default()).unwrap();
//! assert_eq!(config.components[0].kind, "AnimationButton");
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod fonts;
pub mod images;
pub mod index;
pub mod instance;
pub mod options;
pub mod position;
pub mod variants;
pub mod walker;

pub use classify::{classify, container_type, TypeTag};
pub use config::{
    ComponentConfig, ExportConfig, Metadata, NodeConfig, Scale, Statistics, VariantSlot, Viewport,
};
pub use error::{ExportError, ExportResult};
pub use export::export_components;
pub use fonts::{export_fonts, FontExport, FontStyle, FONTS_MODULE_FILE};
pub use images::{
    collect_images, render_manifest, FormatSelection, ImageFormat, ImageTarget, ManifestEntry,
    IMAGE_MANIFEST_FILE,
};
pub use index::{ComponentIndex, ComponentInfo};
pub use instance::resolve_instance;
pub use options::ExportOptions;
pub use variants::group_variants;
pub use walker::TreeWalker;
