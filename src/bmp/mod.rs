//! BMP container codec (internal).
//!
//! Use [`crate::DecodeRequest`], [`crate::EncodeRequest`],
//! [`crate::decode_bmp`] or [`crate::encode_bmp`].

mod decode;
mod encode;

pub use decode::BmpPermissiveness;

use crate::error::BitmapError;
use crate::grid::PixelGrid;
use crate::info::ImageInfo;
use crate::limits::Limits;
use crate::pixel::RowOrder;
use alloc::vec::Vec;
use enough::Stop;

/// Decode BMP data into a fully set grid.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    permissiveness: BmpPermissiveness,
    stop: &dyn Stop,
) -> Result<PixelGrid, BitmapError> {
    let header = decode::parse_bmp_header(data, permissiveness)?;
    if let Some(limits) = limits {
        limits.check_grid(header.width, header.height)?;
    }
    stop.check()?;
    decode::decode_bmp_pixels(data, &header, stop)
}

/// Header fields for ImageInfo, without decoding pixels.
pub(crate) fn read_header_info(data: &[u8]) -> Result<ImageInfo, BitmapError> {
    // Probing uses Permissive to avoid rejecting files before the caller has
    // chosen a permissiveness level.
    let header = decode::parse_bmp_header(data, BmpPermissiveness::Permissive)?;
    Ok(ImageInfo {
        width: header.width,
        height: header.height,
        bit_depth: header.depth,
        row_order: header.row_order,
        data_offset: header.data_offset,
        row_stride: header.row_stride()?,
    })
}

/// Encode a grid as a 24-bit BMP.
pub(crate) fn encode(
    grid: &PixelGrid,
    row_order: RowOrder,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BitmapError> {
    encode::encode_bmp(grid, row_order, stop)
}
