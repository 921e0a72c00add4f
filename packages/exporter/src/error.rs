use thiserror::Error;

/// Errors that can occur while exporting a design file
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Page \"{page}\" not found in design file")]
    PageNotFound { page: String },

    #[error("Node '{name}' is nested deeper than {limit} levels")]
    DepthExceeded { name: String, limit: usize },

    #[error("Invalid image format '{value}'; use png, webp or both")]
    InvalidImageFormat { value: String },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;
