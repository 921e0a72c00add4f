use super::{Environment, Source};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use figport_exporter::{ExportConfig, Statistics, Viewport};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

#[derive(Debug, Args)]
pub struct ExportComponentsArgs {
    /// Design file key (defaults to FILE_KEY)
    #[arg(short, long)]
    pub file_key: Option<String>,

    /// Read a saved file response instead of fetching
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Output to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}

#[instrument(skip(env, cwd))]
pub async fn export_components(
    args: ExportComponentsArgs,
    env: &Environment,
    cwd: &Path,
) -> Result<()> {
    let config = Config::load(cwd)?;
    let source = Source::resolve(args.input, args.file_key.or_else(|| env.file_key.clone()))?;
    let file = source.load(env, &config, cwd).await?;

    let exported = figport_exporter::export_components(
        &file.document,
        source.file_key(),
        &config.export_options(),
    )?;
    let json = exported.to_json_pretty()?;

    if args.stdout {
        println!("{}", json);
        return Ok(());
    }

    let output_path = config.components_path(cwd, args.out_dir.as_deref());
    write_output(&output_path, &json)?;

    println!();
    println!(
        "{} Components config saved: {}",
        "✓".green(),
        output_path.display()
    );
    print_statistics(&exported);
    Ok(())
}

pub(crate) fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    debug!(path = %path.display(), bytes = content.len(), "Writing output");
    fs::write(path, content)?;
    Ok(())
}

fn print_statistics(config: &ExportConfig) {
    let Statistics {
        total_components,
        components_with_variants,
        components_without_variants,
        variants_by_viewport,
    } = &config.metadata.statistics;

    println!();
    println!("{}", "Export statistics:".bright_white().bold());
    println!("  Total components: {}", total_components);
    println!("  With variants: {}", components_with_variants);
    println!("  Without variants: {}", components_without_variants);

    if *components_with_variants > 0 {
        println!();
        println!("{}", "Variants by viewport:".bright_white().bold());
        for viewport in Viewport::ALL {
            let count = variants_by_viewport.get(viewport);
            if count > 0 {
                println!("  {}: {}", viewport, count);
            }
        }
    }

    println!();
    println!("{} Export complete", "✅".green());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_export_from_saved_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("slots.json");
        fs::write(
            &input,
            r#"{
                "name": "Slots",
                "document": { "id": "0:0", "name": "Document", "type": "DOCUMENT", "children": [
                    { "id": "0:1", "name": "layouts", "type": "CANVAS", "children": [
                        { "id": "1:1", "name": "Header", "type": "FRAME" }
                    ]}
                ]}
            }"#,
        )
        .unwrap();

        let args = ExportComponentsArgs {
            file_key: None,
            input: Some(input),
            out_dir: Some("out".to_string()),
            stdout: false,
        };
        export_components(args, &Environment::default(), dir.path())
            .await
            .unwrap();

        let written = fs::read_to_string(dir.path().join("out/components.config.json")).unwrap();
        let config = ExportConfig::from_json(&written).unwrap();
        assert_eq!(config.components[0].name, "Header");
        assert_eq!(config.metadata.figma_file_key, "slots");
    }

    #[tokio::test]
    async fn test_missing_page_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.json");
        fs::write(
            &input,
            r#"{ "document": { "id": "0:0", "name": "Document", "type": "DOCUMENT" } }"#,
        )
        .unwrap();

        let args = ExportComponentsArgs {
            file_key: Some("KEY".to_string()),
            input: Some(input),
            out_dir: None,
            stdout: false,
        };
        let err = export_components(args, &Environment::default(), dir.path())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("layouts"));
        assert!(!dir.path().join("assets").exists());
    }
}
