use crate::classify::container_type;
use crate::config::{ComponentConfig, ExportConfig, Metadata, Statistics, VariantSlot, Viewport};
use crate::error::{ExportError, ExportResult};
use crate::index::ComponentIndex;
use crate::options::ExportOptions;
use crate::variants::group_variants;
use crate::walker::TreeWalker;
use chrono::{SecondsFormat, Utc};
use figport_common::is_design_reference;
use figport_document::DesignNode;
use indexmap::IndexMap;
use tracing::{info, instrument, warn};

/// Export every top-level node of the layouts page.
///
/// A failure inside one top-level node is logged and that node is left out;
/// the rest of the page still exports. Only a missing page fails the run.
#[instrument(skip(document, options), fields(page = %options.layouts_page))]
pub fn export_components(
    document: &DesignNode,
    file_key: &str,
    options: &ExportOptions,
) -> ExportResult<ExportConfig> {
    let page = document
        .page(&options.layouts_page)
        .ok_or_else(|| ExportError::PageNotFound {
            page: options.layouts_page.clone(),
        })?;

    let index = ComponentIndex::build(document);
    info!(components = index.len(), "Indexed components");

    let walker = TreeWalker::new(&index, options.max_depth);
    let mut components = Vec::new();

    for node in &page.children {
        if is_design_reference(&node.name) {
            continue;
        }

        match export_top_level(node, &walker) {
            Ok(Some(component)) => {
                info!(name = %component.name, kind = %component.kind, "Exported component");
                components.push(component);
            }
            Ok(None) => {}
            Err(err) => warn!(name = %node.name, error = %err, "Skipping component"),
        }
    }

    let statistics = Statistics::collect(&components);
    info!(
        total = statistics.total_components,
        with_variants = statistics.components_with_variants,
        "Export complete"
    );

    Ok(ExportConfig {
        components,
        metadata: Metadata {
            exported_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            figma_file_key: file_key.to_string(),
            statistics,
        },
    })
}

/// Component sets are grouped by viewport; anything else becomes a single
/// `default` variant so both share one output shape.
fn export_top_level(
    node: &DesignNode,
    walker: &TreeWalker<'_>,
) -> ExportResult<Option<ComponentConfig>> {
    if node.kind.is_component_set() {
        return group_variants(node, walker);
    }

    let config = walker.walk(node, None, true)?;
    let mut variants = IndexMap::new();
    variants.insert(
        Viewport::Default,
        VariantSlot::One(Box::new(config.into_variant())),
    );

    Ok(Some(ComponentConfig {
        name: node.name.clone(),
        kind: container_type(&node.name).to_string(),
        variants,
    }))
}
