//! # pixelgrid-bmp
//!
//! Pixel-art grid model and BMP codec for a drawing surface with an LCD
//! subpixel preview.
//!
//! ## Pixel grid
//!
//! [`PixelGrid`] is a rectangle of cells. A cell is either unset (`None`,
//! shown as background) or an [`Rgb`] color. Edits are available in place
//! for the owner, or as copy-on-write `with_*` methods that leave the
//! previous grid untouched for anyone still reading it.
//!
//! ## Supported Formats
//!
//! - **Decode**: uncompressed BMP, 24-bit and 32-bit (alpha is dropped),
//!   bottom-up or top-down row order.
//! - **Encode**: uncompressed 24-bit BMP, top-down by default. Unset cells
//!   are written as black.
//!
//! ## Non-Goals
//!
//! - RLE and bitfield compression
//! - Palette / indexed images, bit depths other than 24 and 32
//! - Alpha round-tripping, color management
//!
//! ## Usage
//!
//! ```no_run
//! use pixelgrid_bmp::{DecodeRequest, EncodeRequest, ImageInfo, PixelGrid, Tool, hex_to_rgb};
//! use enough::Unstoppable;
//!
//! let mut grid = PixelGrid::square(16)?;
//! if let Some(color) = hex_to_rgb("#ff8800") {
//!     grid.apply(Tool::Brush(color), 3, 4)?;
//! }
//!
//! let bytes = EncodeRequest::new().encode(&grid, Unstoppable)?;
//!
//! // Inspect without decoding
//! let info = ImageInfo::from_bytes(&bytes)?;
//! println!("{}x{} {:?}", info.width, info.height, info.bit_depth);
//!
//! let decoded = DecodeRequest::new(&bytes).decode(Unstoppable)?;
//! assert_eq!(decoded.get(3, 4), grid.get(3, 4));
//! # Ok::<(), pixelgrid_bmp::BitmapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod color;
mod error;
mod grid;
mod info;
mod limits;
mod pixel;

pub mod bmp;

mod decode;
mod encode;

// Re-exports
pub use bmp::BmpPermissiveness;
pub use color::{BLACK, Cell, Rgb, cell_to_hex, hex_to_cell, hex_to_rgb, rgb_to_hex};
pub use decode::{DecodeRequest, decode_bmp};
pub use encode::{EncodeRequest, encode_bmp};
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
pub use grid::{Channel, DEFAULT_GRID_SIZE, GRID_SIZE_RANGE, PixelGrid, Tool};
pub use info::ImageInfo;
pub use limits::Limits;
pub use pixel::{BitDepth, RowOrder};
