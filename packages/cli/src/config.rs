use figport_exporter::options::{
    DEFAULT_FONTS_PAGE, DEFAULT_IMAGES_PAGE, DEFAULT_LAYOUTS_PAGE, DEFAULT_MAX_DEPTH,
};
use figport_exporter::ExportOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "figport.config.json";

/// Figport configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory receiving the components file
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    #[serde(default = "default_components_file")]
    pub components_file: String,

    /// Page whose children are exported as components
    #[serde(default = "default_layouts_page")]
    pub layouts_page: String,

    /// Page scanned for text styles
    #[serde(default = "default_fonts_page")]
    pub fonts_page: String,

    #[serde(default = "default_fonts_out_dir")]
    pub fonts_out_dir: String,

    /// Page whose layers are rendered to image files
    #[serde(default = "default_images_page")]
    pub images_page: String,

    #[serde(default = "default_images_out_dir")]
    pub images_out_dir: String,

    /// OAuth token file, relative to the project directory
    #[serde(default = "default_token_file")]
    pub token_file: String,

    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_out_dir() -> String {
    "assets".to_string()
}

fn default_components_file() -> String {
    "components.config.json".to_string()
}

fn default_layouts_page() -> String {
    DEFAULT_LAYOUTS_PAGE.to_string()
}

fn default_fonts_page() -> String {
    DEFAULT_FONTS_PAGE.to_string()
}

fn default_fonts_out_dir() -> String {
    "assets/font".to_string()
}

fn default_images_page() -> String {
    DEFAULT_IMAGES_PAGE.to_string()
}

fn default_images_out_dir() -> String {
    "assets/img".to_string()
}

fn default_token_file() -> String {
    ".figma-tokens.json".to_string()
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            components_file: default_components_file(),
            layouts_page: default_layouts_page(),
            fonts_page: default_fonts_page(),
            fonts_out_dir: default_fonts_out_dir(),
            images_page: default_images_page(),
            images_out_dir: default_images_out_dir(),
            token_file: default_token_file(),
            max_depth: default_max_depth(),
        }
    }
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions::default()
            .with_layouts_page(&self.layouts_page)
            .with_fonts_page(&self.fonts_page)
            .with_images_page(&self.images_page)
            .with_max_depth(self.max_depth)
    }

    /// Path of the components file, with an optional output directory override
    pub fn components_path(&self, cwd: &Path, out_dir: Option<&str>) -> PathBuf {
        cwd.join(out_dir.unwrap_or(&self.out_dir))
            .join(&self.components_file)
    }

    pub fn fonts_dir(&self, cwd: &Path, out_dir: Option<&str>) -> PathBuf {
        cwd.join(out_dir.unwrap_or(&self.fonts_out_dir))
    }

    pub fn images_dir(&self, cwd: &Path, out_dir: Option<&str>) -> PathBuf {
        cwd.join(out_dir.unwrap_or(&self.images_out_dir))
    }

    pub fn token_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.token_file)
    }
}
