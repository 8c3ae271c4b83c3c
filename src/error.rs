use alloc::string::String;
use enough::StopReason;

/// Errors from BMP decoding/encoding and grid construction.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("invalid signature: data does not start with BM")]
    InvalidSignature,

    #[error("unsupported bit depth: {0} (only 24 and 32 are accepted)")]
    UnsupportedBitDepth(u16),

    #[error("unsupported compression method: {0}")]
    UnsupportedCompression(u32),

    #[error("size mismatch: image needs {needed} bytes, file size field states {stated}")]
    SizeMismatch { needed: u64, stated: u32 },

    #[error("truncated data: need {needed} bytes, got {actual}")]
    TruncatedData { needed: usize, actual: usize },

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("invalid grid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("buffer too small: need {needed} cells, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    CellOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}
