use std::path::PathBuf;

/// Result type for file and window operations around the engine
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from the surfaces wrapped around the mind-map engine.
///
/// Extraction, layout and rendering never fail; only reading inputs,
/// writing outputs and driving a window can.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("window error: {0}")]
    Window(#[from] minifb::Error),

    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("no topic found in {}", .0.display())]
    EmptyDocument(PathBuf),
}
