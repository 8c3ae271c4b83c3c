use crate::error::BitmapError;
use crate::pixel::{BitDepth, RowOrder};

/// Header-level facts about a BMP, read without decoding pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub bit_depth: BitDepth,
    pub row_order: RowOrder,
    /// Byte offset of the pixel array.
    pub data_offset: u32,
    /// Stored row length including padding.
    pub row_stride: usize,
}

impl ImageInfo {
    /// Read the BMP headers without decoding pixels.
    ///
    /// The file size field is not checked here; [`crate::DecodeRequest`]
    /// applies the configured permissiveness.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BitmapError> {
        crate::bmp::read_header_info(data)
    }
}
