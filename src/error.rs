use thiserror::Error;

/// Errors surfaced by the region editor.
///
/// Gestures never fail; everything here comes from the edges of the
/// session: decoding input, encoding the export, touching the filesystem.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Export failed: {0}")]
    Encode(#[source] image::ImageError),

    #[error("File access failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("No image loaded")]
    NoImage,

    #[error("Dropped file is not a supported image: {0}")]
    UnsupportedFile(String),
}

/// Result type for fallible editor operations
pub type EditorResult<T> = Result<T, EditorError>;
