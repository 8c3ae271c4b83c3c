use crate::color::Cell;
use crate::error::BitmapError;

/// Caps applied to a decoded grid before its cells are allocated.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum cell count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for the grid's cell storage.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check a `width` x `height` grid against every cap.
    ///
    /// Memory is counted as cells times `size_of::<Cell>()`, the storage a
    /// decoded [`crate::PixelGrid`] actually holds.
    pub(crate) fn check_grid(&self, width: u32, height: u32) -> Result<(), BitmapError> {
        exceeds("width", u64::from(width), self.max_width)?;
        exceeds("height", u64::from(height), self.max_height)?;

        let cells = u64::from(width) * u64::from(height);
        exceeds("cell count", cells, self.max_pixels)?;

        let bytes = cells.saturating_mul(core::mem::size_of::<Cell>() as u64);
        exceeds("grid memory (bytes)", bytes, self.max_memory_bytes)
    }
}

fn exceeds(what: &str, value: u64, cap: Option<u64>) -> Result<(), BitmapError> {
    match cap {
        Some(max) if value > max => Err(BitmapError::LimitExceeded(alloc::format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}
