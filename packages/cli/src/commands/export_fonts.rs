use super::export_components::write_output;
use super::{Environment, Source};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use figport_exporter::FONTS_MODULE_FILE;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

#[derive(Debug, Args)]
pub struct ExportFontsArgs {
    /// Design file key (defaults to FILE_KEY)
    #[arg(short, long)]
    pub file_key: Option<String>,

    /// Read a saved file response instead of fetching
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,
}

#[instrument(skip(env, cwd))]
pub async fn export_fonts(args: ExportFontsArgs, env: &Environment, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let source = Source::resolve(args.input, args.file_key.or_else(|| env.file_key.clone()))?;
    let file = source.load(env, &config, cwd).await?;

    let fonts = figport_exporter::export_fonts(&file.document, &config.export_options())?;
    info!(
        styles = fonts.styles.len(),
        families = fonts.families.len(),
        "Collected text styles"
    );
    let output_path = config
        .fonts_dir(cwd, args.out_dir.as_deref())
        .join(FONTS_MODULE_FILE);
    write_output(&output_path, &fonts.render_module()?)?;

    println!(
        "{} Extracted {} styles ({} fonts) -> {}",
        "✓".green(),
        fonts.text_nodes,
        fonts.families.len(),
        output_path.strip_prefix(cwd).unwrap_or(&output_path).display()
    );
    Ok(())
}
