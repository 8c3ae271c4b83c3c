//! BMP decoder for uncompressed 24-bit and 32-bit images.
//!
//! Header layout follows BITMAPFILEHEADER + BITMAPINFOHEADER. Later info
//! header versions (V4, V5) share the first 40 bytes and are accepted; the
//! extra fields are skipped via the pixel data offset.

use alloc::vec::Vec;

use enough::Stop;

use crate::color::{Cell, Rgb};
use crate::error::BitmapError;
use crate::grid::PixelGrid;
use crate::pixel::{BitDepth, RowOrder};

// ── Permissiveness ──────────────────────────────────────────────────

/// Controls how strictly the BMP decoder validates input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BmpPermissiveness {
    /// Also reject files whose bookkeeping fields are wrong even though the
    /// pixels could be read: planes != 1, file size field != actual length,
    /// image data size field neither 0 nor `stride * height`, pixel data
    /// offset pointing inside the headers.
    Strict,

    /// Default behavior. Reject files whose dimensions don't fit in the
    /// stated file size, or whose pixel data is cut short.
    #[default]
    Standard,

    /// Ignore the file size field entirely. Truncated pixel data is still
    /// an error.
    Permissive,
}

// ── Cursor for reading from &[u8] ───────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn truncated(&self, n: usize) -> BitmapError {
        BitmapError::TruncatedData {
            needed: self.pos.saturating_add(n),
            actual: self.data.len(),
        }
    }

    fn skip(&mut self, n: usize) -> Result<(), BitmapError> {
        let new_pos = self.pos.checked_add(n).ok_or_else(|| self.truncated(n))?;
        if new_pos > self.data.len() {
            return Err(self.truncated(n));
        }
        self.pos = new_pos;
        Ok(())
    }

    fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BitmapError> {
        let bytes = self
            .data
            .get(self.pos..self.pos + N)
            .ok_or_else(|| self.truncated(N))?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(bytes);
        self.pos += N;
        Ok(buf)
    }

    fn read_u8(&mut self) -> Result<u8, BitmapError> {
        let [b] = self.read_fixed_bytes::<1>()?;
        Ok(b)
    }

    fn get_u16_le(&mut self) -> Result<u16, BitmapError> {
        self.read_fixed_bytes().map(u16::from_le_bytes)
    }

    fn get_u32_le(&mut self) -> Result<u32, BitmapError> {
        self.read_fixed_bytes().map(u32::from_le_bytes)
    }

    fn get_i32_le(&mut self) -> Result<i32, BitmapError> {
        self.read_fixed_bytes().map(i32::from_le_bytes)
    }
}

// ── Parsed BMP header info ──────────────────────────────────────────

/// Header fields the pixel pass needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BmpHeader {
    pub width: u32,
    pub height: u32,
    pub row_order: RowOrder,
    pub depth: BitDepth,
    pub data_offset: u32,
    pub file_size: u32,
}

impl BmpHeader {
    pub(crate) fn row_stride(&self) -> Result<usize, BitmapError> {
        self.depth.row_stride(self.width).ok_or(self.too_large())
    }

    fn too_large(&self) -> BitmapError {
        BitmapError::DimensionsTooLarge {
            width: self.width,
            height: self.height,
        }
    }
}

/// Parse and validate the file and info headers.
///
/// Checks run in file order and stop at the first failure, so a bad
/// signature is reported without looking at anything past byte 1.
pub(crate) fn parse_bmp_header(
    data: &[u8],
    permissiveness: BmpPermissiveness,
) -> Result<BmpHeader, BitmapError> {
    let is_strict = permissiveness == BmpPermissiveness::Strict;
    let mut bytes = Cursor::new(data);

    if bytes.read_u8()? != b'B' || bytes.read_u8()? != b'M' {
        return Err(BitmapError::InvalidSignature);
    }

    let file_size = bytes.get_u32_le()?;
    bytes.skip(4)?; // reserved
    let data_offset = bytes.get_u32_le()?;

    let ihsize = bytes.get_u32_le()?;
    if ihsize < 40 {
        return Err(BitmapError::InvalidHeader(alloc::format!(
            "unsupported BMP info header size: {ihsize}"
        )));
    }

    let raw_width = bytes.get_i32_le()?;
    let raw_height = bytes.get_i32_le()?;
    if raw_width <= 0 {
        return Err(BitmapError::InvalidHeader(alloc::format!(
            "BMP width must be positive, got {raw_width}"
        )));
    }
    if raw_height == 0 {
        return Err(BitmapError::InvalidHeader("BMP height is zero".into()));
    }
    let width = raw_width.unsigned_abs();
    let height = raw_height.unsigned_abs();
    let row_order = if raw_height < 0 {
        RowOrder::TopDown
    } else {
        RowOrder::BottomUp
    };

    let planes = bytes.get_u16_le()?;
    let bits = bytes.get_u16_le()?;
    let depth = BitDepth::from_bits(bits).ok_or(BitmapError::UnsupportedBitDepth(bits))?;

    let compression = bytes.get_u32_le()?;
    if compression != 0 {
        return Err(BitmapError::UnsupportedCompression(compression));
    }
    let image_size = bytes.get_u32_le()?;

    let header = BmpHeader {
        width,
        height,
        row_order,
        depth,
        data_offset,
        file_size,
    };

    log::trace!("BMP width: {width}, height: {height}, order: {row_order:?}");
    log::trace!("BMP depth: {bits} bpp, data offset: {data_offset}, file size: {file_size}");

    if is_strict {
        check_strict(&header, data.len(), ihsize, planes, image_size)?;
    }

    if permissiveness != BmpPermissiveness::Permissive {
        let needed = u64::from(width)
            .checked_mul(u64::from(height))
            .and_then(|wh| wh.checked_mul(depth.bytes_per_pixel() as u64))
            .and_then(|n| n.checked_add(u64::from(data_offset)))
            .ok_or(header.too_large())?;
        if needed > u64::from(file_size) {
            return Err(BitmapError::SizeMismatch {
                needed,
                stated: file_size,
            });
        }
    }

    Ok(header)
}

fn check_strict(
    header: &BmpHeader,
    data_len: usize,
    ihsize: u32,
    planes: u16,
    image_size: u32,
) -> Result<(), BitmapError> {
    if planes != 1 {
        return Err(BitmapError::InvalidHeader(alloc::format!(
            "BMP planes field is {planes}, expected 1"
        )));
    }
    if header.file_size as usize != data_len {
        return Err(BitmapError::InvalidHeader(alloc::format!(
            "BMP file size field ({}) doesn't match actual size ({data_len})",
            header.file_size
        )));
    }
    if u64::from(header.data_offset) < 14 + u64::from(ihsize) {
        return Err(BitmapError::InvalidHeader(alloc::format!(
            "BMP pixel data offset ({}) points inside the headers",
            header.data_offset
        )));
    }
    if image_size != 0 {
        let expected = (header.row_stride()? as u64).saturating_mul(u64::from(header.height));
        if u64::from(image_size) != expected {
            return Err(BitmapError::InvalidHeader(alloc::format!(
                "BMP image data size field ({image_size}) doesn't match expected ({expected})"
            )));
        }
    }
    Ok(())
}

// ── Pixel pass ──────────────────────────────────────────────────────

/// Read every pixel into a fully set grid.
///
/// The whole pixel array is bounds-checked up front, so either every cell
/// is read or nothing is returned.
pub(crate) fn decode_bmp_pixels(
    data: &[u8],
    header: &BmpHeader,
    stop: &dyn Stop,
) -> Result<PixelGrid, BitmapError> {
    let w = header.width as usize;
    let h = header.height as usize;
    let bpp = header.depth.bytes_per_pixel();
    let row_stride = header.row_stride()?;

    let needed = row_stride
        .checked_mul(h)
        .and_then(|n| n.checked_add(header.data_offset as usize))
        .ok_or(header.too_large())?;
    if data.len() < needed {
        return Err(BitmapError::TruncatedData {
            needed,
            actual: data.len(),
        });
    }
    let cell_count = w.checked_mul(h).ok_or(header.too_large())?;

    let pixel_data = &data[header.data_offset as usize..needed];
    let mut cells: Vec<Cell> = Vec::with_capacity(cell_count);

    for y in 0..h {
        if y % 16 == 0 {
            stop.check()?;
        }
        let src_row = match header.row_order {
            RowOrder::BottomUp => h - 1 - y,
            RowOrder::TopDown => y,
        };
        let row_start = src_row * row_stride;
        let row = &pixel_data[row_start..row_start + w * bpp];
        cells.extend(
            row.chunks_exact(bpp)
                .map(|px| Some(Rgb::new(px[2], px[1], px[0]))),
        );
    }

    log::debug!(
        "decoded {}x{} BMP ({:?}, {:?})",
        header.width,
        header.height,
        header.depth,
        header.row_order
    );

    PixelGrid::from_cells(header.width, header.height, cells)
}
