pub const DEFAULT_LAYOUTS_PAGE: &str = "layouts";
pub const DEFAULT_FONTS_PAGE: &str = "fonts";
pub const DEFAULT_IMAGES_PAGE: &str = "images";
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Configuration options for an export run
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Page whose direct children become exported components
    pub layouts_page: String,

    /// Page scanned for text styles by the font export
    pub fonts_page: String,

    /// Page whose layers are rendered to image files
    pub images_page: String,

    /// Deepest nesting the tree walk accepts below a top-level node.
    /// A node past this depth fails its top-level component only.
    pub max_depth: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            layouts_page: DEFAULT_LAYOUTS_PAGE.to_string(),
            fonts_page: DEFAULT_FONTS_PAGE.to_string(),
            images_page: DEFAULT_IMAGES_PAGE.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ExportOptions {
    pub fn with_layouts_page(mut self, page: impl Into<String>) -> Self {
        self.layouts_page = page.into();
        self
    }

    pub fn with_fonts_page(mut self, page: impl Into<String>) -> Self {
        self.fonts_page = page.into();
        self
    }

    pub fn with_images_page(mut self, page: impl Into<String>) -> Self {
        self.images_page = page.into();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
