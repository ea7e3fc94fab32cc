use tagsight_core::ImageError;

/// Errors produced by a detection session.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    /// The engine or the raster bridge could not allocate `what`.
    #[error("failed to allocate {what}")]
    Allocation { what: &'static str },

    #[error(transparent)]
    InvalidImage(#[from] ImageError),

    #[error("image of {width}x{height} (stride {stride}) does not fit the engine's 32-bit raster")]
    RasterTooLarge {
        width: usize,
        height: usize,
        stride: usize,
    },

    #[error("detection engine failed: {message}")]
    Engine { message: String },

    #[error("engine record {index} has invalid {field} ({value})")]
    InvalidRecord {
        index: usize,
        field: &'static str,
        value: i64,
    },

    #[error("detector is closed")]
    Closed,
}
