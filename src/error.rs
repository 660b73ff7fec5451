// Crate error type. Every variant states *where* things went wrong.
// The overlay operations themselves never fail; errors only come from the
// edges (window, image files, configuration, buffer sizes).
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("window init error: {0}")]
    WindowInit(String), // Creating the window failed
    #[error("window update error: {0}")]
    WindowUpdate(String), // Pushing the frame to the window failed
    #[error("failed to load image {path}: {source}")]
    ImageLoad {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to save image {path}: {source}")]
    ImageSave {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("invalid color {0:?}: expected #RRGGBB or #AARRGGBB")]
    InvalidColor(String),
    #[error("invalid config value for {key}: {value:?}")]
    InvalidConfig { key: &'static str, value: String },
    #[error("surface must be at least 1x1, got {width}x{height}")]
    EmptySurface { width: usize, height: usize },
    #[error("frame claims {width}x{height} but holds {len} pixels")]
    PixelCount { width: usize, height: usize, len: usize },
    #[error("buffer size mismatch: expected {expected:?}, got {actual:?}")]
    SizeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
}

pub type Result<T> = std::result::Result<T, Error>;
