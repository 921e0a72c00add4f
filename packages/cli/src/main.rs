mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    export_components, export_fonts, export_images, oauth_check, Environment,
    ExportComponentsArgs, ExportFontsArgs, ExportImagesArgs, OauthCheckArgs,
};

/// Figport - compile design files into engine layout configs
#[derive(Parser, Debug)]
#[command(name = "figport")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export component layouts to components.config.json
    ExportComponents(ExportComponentsArgs),

    /// Export text styles to a generated FontsStyle.js module
    ExportFonts(ExportFontsArgs),

    /// Render image-page layers to files and write the asset manifest
    ExportImages(ExportImagesArgs),

    /// Check OAuth configuration and callback ports
    OauthCheck(OauthCheckArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let env = Environment::from_env();

    let result = match std::env::current_dir() {
        Ok(cwd) => match cli.command {
            Command::ExportComponents(args) => export_components(args, &env, &cwd).await,
            Command::ExportFonts(args) => export_fonts(args, &env, &cwd).await,
            Command::ExportImages(args) => export_images(args, &env, &cwd).await,
            Command::OauthCheck(args) => oauth_check(args, &env).await,
        },
        Err(err) => Err(anyhow::anyhow!("Cannot get current directory: {}", err)),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
