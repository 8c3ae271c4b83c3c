use alloc::vec::Vec;
use enough::Stop;

use crate::error::BitmapError;
use crate::grid::PixelGrid;
use crate::pixel::RowOrder;

/// Encode request. Output is always 24-bit uncompressed BMP.
#[derive(Clone, Copy, Debug, Default)]
pub struct EncodeRequest {
    row_order: RowOrder,
}

impl EncodeRequest {
    /// Top-down output (negative height field).
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose row storage order. Both orders decode to the same grid.
    pub fn with_row_order(mut self, row_order: RowOrder) -> Self {
        self.row_order = row_order;
        self
    }

    /// Serialize `grid`. Unset cells are written as black.
    pub fn encode(&self, grid: &PixelGrid, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
        crate::bmp::encode(grid, self.row_order, &stop)
    }
}

/// Encode a grid as a top-down 24-bit BMP.
pub fn encode_bmp(grid: &PixelGrid, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
    EncodeRequest::new().encode(grid, stop)
}
