//! BMP encoder: uncompressed 24-bit BMP.

use alloc::vec::Vec;
use enough::Stop;

use crate::color::BLACK;
use crate::error::BitmapError;
use crate::grid::PixelGrid;
use crate::pixel::{BitDepth, RowOrder};

/// Size of BITMAPFILEHEADER + BITMAPINFOHEADER.
pub(crate) const HEADER_SIZE: usize = 54;

/// Encode a grid as a 24-bit BMP. Unset cells are written as black.
pub(crate) fn encode_bmp(
    grid: &PixelGrid,
    row_order: RowOrder,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BitmapError> {
    let width = grid.width();
    let height = grid.height();
    let too_large = || BitmapError::DimensionsTooLarge { width, height };
    let w = width as usize;
    let h = height as usize;

    let row_stride = BitDepth::Bgr24.row_stride(width).ok_or_else(too_large)?;
    let pixel_data_size = row_stride.checked_mul(h).ok_or_else(too_large)?;
    let file_size = pixel_data_size
        .checked_add(HEADER_SIZE)
        .ok_or_else(too_large)?;
    let signed_height = i32::try_from(height).map_err(|_| too_large())?;
    let header = HeaderFields {
        file_size: u32::try_from(file_size).map_err(|_| too_large())?,
        pixel_data_size: pixel_data_size as u32,
        width: i32::try_from(width).map_err(|_| too_large())?,
        height: match row_order {
            // negative = top-down
            RowOrder::TopDown => -signed_height,
            RowOrder::BottomUp => signed_height,
        },
    };

    stop.check()?;

    let mut out = Vec::with_capacity(file_size);
    write_bmp_header(&mut out, &header);

    let pad_bytes = row_stride - w * 3;
    let cells = grid.cells();
    for i in 0..h {
        if i % 16 == 0 {
            stop.check()?;
        }
        let row = match row_order {
            RowOrder::TopDown => i,
            RowOrder::BottomUp => h - 1 - i,
        };
        for cell in &cells[row * w..(row + 1) * w] {
            let c = cell.unwrap_or(BLACK);
            out.push(c.b);
            out.push(c.g);
            out.push(c.r);
        }
        out.extend(core::iter::repeat_n(0u8, pad_bytes));
    }

    log::debug!("encoded {width}x{height} BMP, {file_size} bytes, {row_order:?}");

    Ok(out)
}

struct HeaderFields {
    file_size: u32,
    pixel_data_size: u32,
    width: i32,
    height: i32,
}

fn write_bmp_header(out: &mut Vec<u8>, header: &HeaderFields) {
    // File header (14 bytes)
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&header.file_size.to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&(HEADER_SIZE as u32).to_le_bytes()); // data offset

    // DIB header (BITMAPINFOHEADER, 40 bytes)
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&header.width.to_le_bytes());
    out.extend_from_slice(&header.height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&BitDepth::Bgr24.bits().to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // compression
    out.extend_from_slice(&header.pixel_data_size.to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes()); // h resolution (72 DPI)
    out.extend_from_slice(&2835u32.to_le_bytes()); // v resolution
    out.extend_from_slice(&0u32.to_le_bytes()); // colors used
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use enough::Unstoppable;

    fn u32_at(data: &[u8], off: usize) -> u32 {
        u32::from_le_bytes(data[off..off + 4].try_into().unwrap())
    }

    fn i32_at(data: &[u8], off: usize) -> i32 {
        i32::from_le_bytes(data[off..off + 4].try_into().unwrap())
    }

    #[test]
    fn header_is_byte_exact() {
        let grid = PixelGrid::new(5, 3).unwrap();
        let out = encode_bmp(&grid, RowOrder::TopDown, &Unstoppable).unwrap();

        assert_eq!(&out[0..2], b"BM");
        assert_eq!(out.len(), 54 + 16 * 3);
        assert_eq!(u32_at(&out, 2), out.len() as u32);
        assert_eq!(u32_at(&out, 6), 0);
        assert_eq!(u32_at(&out, 10), 54);
        assert_eq!(u32_at(&out, 14), 40);
        assert_eq!(i32_at(&out, 18), 5);
        assert_eq!(i32_at(&out, 22), -3);
        assert_eq!(u16::from_le_bytes([out[26], out[27]]), 1);
        assert_eq!(u16::from_le_bytes([out[28], out[29]]), 24);
        assert_eq!(u32_at(&out, 30), 0);
        assert_eq!(u32_at(&out, 34), 48);
        assert_eq!(u32_at(&out, 38), 2835);
        assert_eq!(u32_at(&out, 42), 2835);
        assert_eq!(u32_at(&out, 46), 0);
        assert_eq!(u32_at(&out, 50), 0);
    }

    #[test]
    fn pixels_are_bgr_with_row_padding() {
        let grid = PixelGrid::new(1, 2)
            .unwrap()
            .with_cell(0, 0, Some(Rgb::new(1, 2, 3)))
            .unwrap();
        let out = encode_bmp(&grid, RowOrder::TopDown, &Unstoppable).unwrap();
        // top row first, then the unset bottom cell as black
        assert_eq!(&out[54..], &[3, 2, 1, 0, 0, 0, 0, 0]);

        let out = encode_bmp(&grid, RowOrder::BottomUp, &Unstoppable).unwrap();
        assert_eq!(i32_at(&out, 22), 2);
        assert_eq!(&out[54..], &[0, 0, 0, 0, 3, 2, 1, 0]);
    }
}
