use super::export_components::write_output;
use super::{connect, Environment, FILE_KEY_VAR};
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use figport_client::{AuthProvider, FigmaClient, HttpTransport};
use figport_exporter::{
    collect_images, render_manifest, FormatSelection, ImageFormat, ImageTarget, ManifestEntry,
    IMAGE_MANIFEST_FILE,
};
use std::path::{Path, PathBuf};
use tracing::{instrument, warn};

#[derive(Debug, Args)]
pub struct ExportImagesArgs {
    /// Design file key (defaults to FILE_KEY)
    #[arg(short, long)]
    pub file_key: Option<String>,

    /// Read the node tree from a saved file response; images are still fetched
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Image formats: png, webp or both
    #[arg(long, default_value = "png")]
    pub formats: FormatSelection,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,
}

#[instrument(skip(env, cwd))]
pub async fn export_images(args: ExportImagesArgs, env: &Environment, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let file_key = args
        .file_key
        .or_else(|| env.file_key.clone())
        .ok_or_else(|| anyhow!("{} is not set; pass --file-key or set it", FILE_KEY_VAR))?;

    let client = connect(env, &config, cwd).await?;
    let file = match &args.input {
        Some(path) => {
            println!("{} {}", "Reading".bright_blue(), path.display());
            figport_document::read_file(path)?
        }
        None => {
            println!("{}", "Fetching design file...".bright_blue());
            client.get_file(&file_key).await?
        }
    };

    let targets = collect_images(&file.document, &config.export_options())?;
    let formats = args.formats.formats();
    let format_names: Vec<_> = formats
        .iter()
        .map(|format| format.extension().to_uppercase())
        .collect();
    println!("Formats: {}", format_names.join(", "));
    println!();

    let out_dir = config.images_dir(cwd, args.out_dir.as_deref());
    let entries = export_targets(&client, &file_key, &targets, &out_dir, formats).await;

    let manifest_path = out_dir.join(IMAGE_MANIFEST_FILE);
    write_output(&manifest_path, &render_manifest(&entries)?)?;

    println!();
    println!("{} Meta file saved: {}", "✓".green(), manifest_path.display());
    println!(
        "{} Export complete! Processed: {} elements",
        "✅".green(),
        entries.len()
    );
    Ok(())
}

/// Export every target in order. A target that fails is reported and left out
/// of the manifest; the others still export.
pub async fn export_targets<A: AuthProvider, T: HttpTransport>(
    client: &FigmaClient<A, T>,
    file_key: &str,
    targets: &[ImageTarget],
    out_dir: &Path,
    formats: &[ImageFormat],
) -> Vec<ManifestEntry> {
    let mut entries = Vec::with_capacity(targets.len());

    for (i, target) in targets.iter().enumerate() {
        println!("[{}/{}] Processing: {}", i + 1, targets.len(), target.alias);
        match export_target(client, file_key, target, out_dir, formats).await {
            Ok(entry) => entries.push(entry),
            Err(err) => {
                warn!(alias = %target.alias, error = %err, "Image export failed");
                eprintln!("{} {}: {}", "Error processing".red(), target.alias, err);
            }
        }
    }

    entries
}

/// Fetch each missing format of one target. Files already on disk count as
/// exported without a request.
async fn export_target<A: AuthProvider, T: HttpTransport>(
    client: &FigmaClient<A, T>,
    file_key: &str,
    target: &ImageTarget,
    out_dir: &Path,
    formats: &[ImageFormat],
) -> Result<ManifestEntry> {
    tokio::fs::create_dir_all(out_dir.join(&target.export_path)).await?;
    let mut exported = Vec::new();

    for &format in formats {
        let file_name = target.file_name(format);
        let output = target.output_path(out_dir, format);

        if tokio::fs::try_exists(&output).await? {
            println!("   {} already exists, skipping", file_name);
            exported.push(format);
            continue;
        }

        println!(
            "   Exporting {}: {}",
            format.extension().to_uppercase(),
            file_name
        );
        let urls = client
            .get_images(file_key, &[target.node_id.as_str()], format.extension())
            .await?;

        match urls.get(&target.node_id) {
            Some(url) => {
                client.download_image(url, &output).await?;
                exported.push(format);
            }
            None => println!("   {} no URL for format {}", "Warning:".yellow(), format),
        }
    }

    Ok(target.manifest_entry(&exported))
}

#[cfg(test)]
mod tests {
    use super::*;
    use figport_client::{BinaryResponse, ClientResult, HttpResponse};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    struct StaticToken;

    impl AuthProvider for StaticToken {
        async fn valid_token(&self) -> ClientResult<String> {
            Ok("token".to_string())
        }

        async fn refresh(&self) -> ClientResult<String> {
            Ok("token".to_string())
        }
    }

    #[derive(Default)]
    struct Responses {
        renders: VecDeque<HttpResponse>,
        downloads: VecDeque<BinaryResponse>,
        render_urls: Vec<String>,
    }

    #[derive(Clone, Default)]
    struct CannedTransport {
        responses: Arc<Mutex<Responses>>,
    }

    impl CannedTransport {
        fn render(&self, body: &str) -> &Self {
            let mut responses = self.responses.lock().unwrap();
            responses.renders.push_back(HttpResponse::new(200, body));
            self
        }

        fn download(&self, status: u16, bytes: &[u8]) -> &Self {
            let mut responses = self.responses.lock().unwrap();
            responses
                .downloads
                .push_back(BinaryResponse::new(status, bytes));
            self
        }

        fn render_urls(&self) -> Vec<String> {
            self.responses.lock().unwrap().render_urls.clone()
        }
    }

    impl HttpTransport for CannedTransport {
        async fn get(&self, url: &str, _token: &str) -> ClientResult<HttpResponse> {
            let mut responses = self.responses.lock().unwrap();
            responses.render_urls.push(url.to_string());
            Ok(responses.renders.pop_front().expect("unexpected render"))
        }

        async fn get_bytes(&self, _url: &str) -> ClientResult<BinaryResponse> {
            let mut responses = self.responses.lock().unwrap();
            Ok(responses.downloads.pop_front().expect("unexpected download"))
        }

        async fn post_form(
            &self,
            _url: &str,
            _form: &[(&str, &str)],
        ) -> ClientResult<HttpResponse> {
            panic!("unexpected POST")
        }
    }

    fn target(id: &str, path: &str, alias: &str, stem: &str) -> ImageTarget {
        ImageTarget {
            node_id: id.to_string(),
            export_path: path.to_string(),
            alias: alias.to_string(),
            file_stem: stem.to_string(),
        }
    }

    #[tokio::test]
    async fn test_formats_download_into_folders() {
        let dir = tempfile::tempdir().unwrap();
        let transport = CannedTransport::default();
        transport
            .render(r#"{ "images": { "1:2": "https://cdn/idle.webp" } }"#)
            .download(200, b"webp")
            .render(r#"{ "images": { "1:2": "https://cdn/idle.png" } }"#)
            .download(200, b"png");
        let client = FigmaClient::new(StaticToken, transport.clone());

        let targets = [target("1:2", "spin", "spin_btn_idle", "idle")];
        let formats = FormatSelection::Both.formats();
        let entries = export_targets(&client, "KEY", &targets, dir.path(), formats).await;

        assert_eq!(
            entries,
            vec![ManifestEntry {
                alias: "spin_btn_idle".to_string(),
                src: "./assets/img/spin/idle.{png,webp}".to_string(),
            }]
        );
        assert_eq!(std::fs::read(dir.path().join("spin/idle.webp")).unwrap(), b"webp");
        assert_eq!(std::fs::read(dir.path().join("spin/idle.png")).unwrap(), b"png");
        assert!(transport.render_urls()[0].ends_with("/images/KEY?ids=1:2&format=webp"));
    }

    #[tokio::test]
    async fn test_existing_files_are_not_fetched() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("logo.png"), b"old").unwrap();
        let transport = CannedTransport::default();
        let client = FigmaClient::new(StaticToken, transport.clone());

        let targets = [target("1:1", "", "logo", "logo")];
        let entries =
            export_targets(&client, "KEY", &targets, dir.path(), &[ImageFormat::Png]).await;

        assert_eq!(entries[0].src, "./assets/img/logo.png");
        assert!(transport.render_urls().is_empty());
        assert_eq!(std::fs::read(dir.path().join("logo.png")).unwrap(), b"old");
    }

    #[tokio::test]
    async fn test_failed_target_is_left_out() {
        let dir = tempfile::tempdir().unwrap();
        let transport = CannedTransport::default();
        transport
            .render(r#"{ "images": { "1:1": "https://cdn/a.png" } }"#)
            .download(500, b"")
            .render(r#"{ "images": { "2:1": null } }"#)
            .render(r#"{ "images": { "3:1": "https://cdn/c.png" } }"#)
            .download(200, b"c");
        let client = FigmaClient::new(StaticToken, transport.clone());

        let targets = [
            target("1:1", "", "broken", "broken"),
            target("2:1", "", "blank", "blank"),
            target("3:1", "ui", "coin", "coin"),
        ];
        let entries =
            export_targets(&client, "KEY", &targets, dir.path(), &[ImageFormat::Png]).await;

        let aliases: Vec<_> = entries.iter().map(|entry| entry.alias.as_str()).collect();
        assert_eq!(aliases, vec!["blank", "coin"]);
        assert_eq!(entries[0].src, "./assets/img/blank.{}");
        assert!(!dir.path().join("broken.png").exists());
        assert!(dir.path().join("ui/coin.png").exists());
    }

    #[tokio::test]
    async fn test_file_key_required() {
        let dir = tempfile::tempdir().unwrap();
        let args = ExportImagesArgs {
            file_key: None,
            input: None,
            formats: FormatSelection::Png,
            out_dir: None,
        };
        let err = export_images(args, &Environment::default(), dir.path())
            .await
            .unwrap_err();
        assert!(err.to_string().contains(FILE_KEY_VAR));
    }
}
