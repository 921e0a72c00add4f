//! # Figport Document
//!
//! Typed model of the node tree returned by the design tool's file API.
//!
//! Nodes are a tagged union keyed by their `type` field ([`NodeKind`]), so the
//! export passes can match exhaustively on the kind and only reach kind-specific
//! data (auto-layout settings, text content, corner radii, instance references)
//! through the variant that owns it.
//!
//! ```rust
//! use figport_document::{parse_file, NodeKind};
//!
//! let json = r#"{
//!     "name": "Slots",
//!     "document": {
//!         "id": "0:0", "name": "Document", "type": "DOCUMENT",
//!         "children": [{ "id": "0:1", "name": "layouts", "type": "CANVAS" }]
//!     }
//! }"#;
//!
//! let file = parse_file(json).unwrap();
//! let page = file.document.page("layouts").unwrap();
//! assert_eq!(page.kind, NodeKind::Canvas);
//! ```

pub mod ast;
pub mod error;

pub use ast::*;
pub use error::{DocumentError, DocumentResult};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

/// Deserialize JSON with no nesting limit, growing the stack while parsing.
///
/// Every node level costs two levels of JSON nesting (the node object and its
/// `children` array), so serde_json's default limit of 128 would reject files
/// only 64 nodes deep.
pub fn from_json_str<T: DeserializeOwned>(json: &str) -> serde_json::Result<T> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    deserializer.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(value)
}

/// Parse a file response from its JSON text
pub fn parse_file(json: &str) -> DocumentResult<FileResponse> {
    Ok(from_json_str(json)?)
}

/// Read and parse a file response saved on disk
pub fn read_file(path: &Path) -> DocumentResult<FileResponse> {
    let content = std::fs::read_to_string(path)?;
    parse_file(&content)
}

/// Parse a single node (and its subtree)
pub fn parse_node(json: &str) -> DocumentResult<DesignNode> {
    Ok(from_json_str(json)?)
}
