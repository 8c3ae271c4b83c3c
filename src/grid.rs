//! The pixel grid exchanged between the drawing surface and the codec.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::RangeInclusive;

use crate::color::{BLACK, Cell, Rgb};
use crate::error::BitmapError;

/// Grid sizes offered by the editor's size slider.
pub const GRID_SIZE_RANGE: RangeInclusive<u32> = 4..=32;

/// Grid size the editor starts with.
pub const DEFAULT_GRID_SIZE: u32 = 16;

/// A drawing tool applied to a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    /// Paint the cell with a color.
    Brush(Rgb),
    /// Unset the cell.
    Eraser,
}

/// One stripe of an LCD subpixel triad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Left-to-right position of this stripe inside a pixel.
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }

    /// Stripe at position `index` (0..3) inside a pixel.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Channel::Red),
            1 => Some(Channel::Green),
            2 => Some(Channel::Blue),
            _ => None,
        }
    }
}

/// A rectangular, row-major buffer of cells.
///
/// The grid is always a full `width * height` rectangle. Edits either go
/// through `&mut self` (single owner) or the `with_*` methods, which return a
/// fresh grid and leave the original untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl PixelGrid {
    /// Create an all-unset grid.
    pub fn new(width: u32, height: u32) -> Result<Self, BitmapError> {
        let len = cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![None; len],
        })
    }

    /// Create an all-unset `size` x `size` grid.
    pub fn square(size: u32) -> Result<Self, BitmapError> {
        Self::new(size, size)
    }

    /// Build a grid from row-major cells.
    pub fn from_cells(width: u32, height: u32, cells: Vec<Cell>) -> Result<Self, BitmapError> {
        let len = cell_count(width, height)?;
        if cells.len() != len {
            return Err(BitmapError::BufferTooSmall {
                needed: len,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows from top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(self.width as usize)
    }

    /// Cell at `(x, y)`, or `None` if the position is outside the grid.
    pub fn get(&self, x: u32, y: u32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Whether every cell holds a concrete color.
    pub fn is_fully_set(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Set one cell in place.
    pub fn set(&mut self, x: u32, y: u32, cell: Cell) -> Result<(), BitmapError> {
        let i = self.checked_index(x, y)?;
        self.cells[i] = cell;
        Ok(())
    }

    /// Copy of this grid with one cell replaced.
    pub fn with_cell(&self, x: u32, y: u32, cell: Cell) -> Result<Self, BitmapError> {
        let mut next = self.clone();
        next.set(x, y, cell)?;
        Ok(next)
    }

    /// Apply a drawing tool in place.
    pub fn apply(&mut self, tool: Tool, x: u32, y: u32) -> Result<(), BitmapError> {
        let cell = match tool {
            Tool::Brush(color) => Some(color),
            Tool::Eraser => None,
        };
        self.set(x, y, cell)
    }

    /// Copy of this grid with a drawing tool applied.
    pub fn with_tool(&self, tool: Tool, x: u32, y: u32) -> Result<Self, BitmapError> {
        let mut next = self.clone();
        next.apply(tool, x, y)?;
        Ok(next)
    }

    /// Turn one subpixel stripe fully on.
    ///
    /// An unset cell is treated as black before the stripe is lit, so the
    /// result is always a concrete color.
    pub fn light_subpixel(&mut self, x: u32, y: u32, channel: Channel) -> Result<(), BitmapError> {
        let i = self.checked_index(x, y)?;
        let mut color = self.cells[i].unwrap_or(BLACK);
        match channel {
            Channel::Red => color.r = u8::MAX,
            Channel::Green => color.g = u8::MAX,
            Channel::Blue => color.b = u8::MAX,
        }
        self.cells[i] = Some(color);
        Ok(())
    }

    /// Copy of this grid with one subpixel stripe lit.
    pub fn with_subpixel(&self, x: u32, y: u32, channel: Channel) -> Result<Self, BitmapError> {
        let mut next = self.clone();
        next.light_subpixel(x, y, channel)?;
        Ok(next)
    }

    /// A same-size grid with every cell unset.
    pub fn cleared(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            cells: vec![None; self.cells.len()],
        }
    }

    /// A new, all-unset grid of another size. Contents are not carried over.
    pub fn resized(&self, width: u32, height: u32) -> Result<Self, BitmapError> {
        Self::new(width, height)
    }

    /// Collapse a one-byte-per-stripe glyph mask into a grid.
    ///
    /// `mask` holds `mask_width * height` bytes, row-major. Each group of three
    /// columns becomes one cell whose red, green and blue stripes are lit when
    /// the matching byte is nonzero. Trailing columns that do not fill a triad
    /// are dropped.
    pub fn from_subpixel_mask(
        mask_width: u32,
        height: u32,
        mask: &[u8],
    ) -> Result<Self, BitmapError> {
        let width = mask_width / 3;
        let needed = cell_count(mask_width, height)?;
        if mask.len() != needed {
            return Err(BitmapError::BufferTooSmall {
                needed,
                actual: mask.len(),
            });
        }
        cell_count(width, height)?;

        let lit = |v: u8| if v == 0 { 0 } else { u8::MAX };
        let cells = mask
            .chunks_exact(mask_width as usize)
            .flat_map(|row| row.chunks_exact(3))
            .map(|triad| Some(Rgb::new(lit(triad[0]), lit(triad[1]), lit(triad[2]))))
            .collect();
        Self::from_cells(width, height, cells)
    }

    /// Unroll each cell into its three stripe intensities, `width * 3` bytes
    /// per row. Unset cells are dark.
    pub fn to_subpixel_mask(&self) -> Vec<u8> {
        self.cells
            .iter()
            .flat_map(|cell| {
                let c = cell.unwrap_or(BLACK);
                [c.r, c.g, c.b]
            })
            .collect()
    }

    /// Flatten into opaque pixels, painting unset cells with `background`.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self, background: Rgb) -> imgref::ImgVec<Rgb> {
        let pixels = self.cells.iter().map(|c| c.unwrap_or(background)).collect();
        imgref::ImgVec::new(pixels, self.width as usize, self.height as usize)
    }

    /// Build a fully set grid from an image view.
    #[cfg(feature = "imgref")]
    pub fn from_imgref(img: imgref::ImgRef<'_, Rgb>) -> Result<Self, BitmapError> {
        let too_large = || BitmapError::DimensionsTooLarge {
            width: u32::MAX,
            height: u32::MAX,
        };
        let width = u32::try_from(img.width()).map_err(|_| too_large())?;
        let height = u32::try_from(img.height()).map_err(|_| too_large())?;
        let cells = img.rows().flat_map(|row| row.iter().copied().map(Some)).collect();
        Self::from_cells(width, height, cells)
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    fn checked_index(&self, x: u32, y: u32) -> Result<usize, BitmapError> {
        self.index(x, y).ok_or(BitmapError::CellOutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })
    }
}

fn cell_count(width: u32, height: u32) -> Result<usize, BitmapError> {
    if width == 0 || height == 0 {
        return Err(BitmapError::InvalidDimensions { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };

    #[test]
    fn new_grid_is_unset_rectangle() {
        let grid = PixelGrid::new(5, 3).unwrap();
        assert_eq!(grid.cells().len(), 15);
        assert_eq!(grid.rows().len(), 3);
        assert!(grid.rows().all(|row| row.len() == 5));
        assert!(grid.cells().iter().all(Option::is_none));
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert!(matches!(
            PixelGrid::new(0, 4),
            Err(BitmapError::InvalidDimensions { width: 0, height: 4 })
        ));
        assert!(matches!(
            PixelGrid::new(4, 0),
            Err(BitmapError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn from_cells_requires_exact_length() {
        let cells = vec![Some(RED); 5];
        match PixelGrid::from_cells(2, 3, cells) {
            Err(BitmapError::BufferTooSmall { needed, actual }) => {
                assert_eq!(needed, 6);
                assert_eq!(actual, 5);
            }
            other => panic!("expected BufferTooSmall, got {other:?}"),
        }
    }

    #[test]
    fn with_cell_leaves_original_untouched() {
        let before = PixelGrid::square(DEFAULT_GRID_SIZE).unwrap();
        let after = before.with_cell(3, 7, Some(RED)).unwrap();
        assert_eq!(before.get(3, 7), Some(None));
        assert_eq!(after.get(3, 7), Some(Some(RED)));
        assert_eq!(after.cells().iter().filter(|c| c.is_some()).count(), 1);
    }

    #[test]
    fn out_of_bounds_edit_is_an_error() {
        let mut grid = PixelGrid::new(4, 4).unwrap();
        assert_eq!(grid.get(4, 0), None);
        match grid.set(4, 0, Some(RED)) {
            Err(BitmapError::CellOutOfBounds { x: 4, y: 0, .. }) => {}
            other => panic!("expected CellOutOfBounds, got {other:?}"),
        }
        assert!(grid.with_tool(Tool::Eraser, 0, 9).is_err());
    }

    #[test]
    fn brush_and_eraser() {
        let mut grid = PixelGrid::new(4, 4).unwrap();
        grid.apply(Tool::Brush(RED), 1, 2).unwrap();
        assert_eq!(grid.get(1, 2), Some(Some(RED)));
        grid.apply(Tool::Eraser, 1, 2).unwrap();
        assert_eq!(grid.get(1, 2), Some(None));
    }

    #[test]
    fn subpixels_accumulate_from_black() {
        let grid = PixelGrid::new(4, 4).unwrap();
        let grid = grid.with_subpixel(0, 0, Channel::Green).unwrap();
        assert_eq!(grid.get(0, 0), Some(Some(Rgb::new(0, 255, 0))));
        let grid = grid.with_subpixel(0, 0, Channel::Blue).unwrap();
        assert_eq!(grid.get(0, 0), Some(Some(Rgb::new(0, 255, 255))));
        assert_eq!(Channel::from_index(Channel::Blue.index()), Some(Channel::Blue));
        assert_eq!(Channel::from_index(3), None);
    }

    #[test]
    fn cleared_and_resized() {
        let grid = PixelGrid::new(4, 4).unwrap().with_cell(0, 0, Some(RED)).unwrap();
        let cleared = grid.cleared();
        assert_eq!((cleared.width(), cleared.height()), (4, 4));
        assert!(cleared.cells().iter().all(Option::is_none));

        let resized = grid.resized(8, 2).unwrap();
        assert_eq!((resized.width(), resized.height()), (8, 2));
        assert!(!resized.is_fully_set());
        assert!(GRID_SIZE_RANGE.contains(&DEFAULT_GRID_SIZE));
    }

    #[test]
    fn subpixel_mask_lights_stripes() {
        // Two rows of a 7-column mask: the seventh column is dropped.
        let mask = [
            9, 0, 0, 0, 1, 200, 5, //
            0, 0, 0, 255, 255, 255, 0,
        ];
        let grid = PixelGrid::from_subpixel_mask(7, 2, &mask).unwrap();
        assert_eq!((grid.width(), grid.height()), (2, 2));
        assert!(grid.is_fully_set());
        assert_eq!(grid.get(0, 0), Some(Some(Rgb::new(255, 0, 0))));
        assert_eq!(grid.get(1, 0), Some(Some(Rgb::new(0, 255, 255))));
        assert_eq!(grid.get(0, 1), Some(Some(BLACK)));
        assert_eq!(grid.get(1, 1), Some(Some(Rgb::new(255, 255, 255))));

        assert_eq!(
            grid.to_subpixel_mask(),
            [255, 0, 0, 0, 255, 255, 0, 0, 0, 255, 255, 255]
        );
    }

    #[test]
    fn subpixel_mask_shape_errors() {
        assert!(matches!(
            PixelGrid::from_subpixel_mask(2, 1, &[1, 1]),
            Err(BitmapError::InvalidDimensions { width: 0, height: 1 })
        ));
        assert!(matches!(
            PixelGrid::from_subpixel_mask(6, 2, &[0; 11]),
            Err(BitmapError::BufferTooSmall {
                needed: 12,
                actual: 11
            })
        ));
    }

    #[test]
    fn unset_cells_unroll_dark() {
        let grid = PixelGrid::new(2, 1).unwrap().with_cell(1, 0, Some(RED)).unwrap();
        assert_eq!(grid.to_subpixel_mask(), [0, 0, 0, 255, 0, 0]);
    }

    #[cfg(feature = "imgref")]
    #[test]
    fn imgvec_fills_unset_with_background() {
        let grid = PixelGrid::new(2, 1).unwrap().with_cell(1, 0, Some(RED)).unwrap();
        let img = grid.to_imgvec(Rgb::new(1, 2, 3));
        assert_eq!(img.buf(), &[Rgb::new(1, 2, 3), RED]);

        let back = PixelGrid::from_imgref(img.as_ref()).unwrap();
        assert!(back.is_fully_set());
        assert_eq!(back.get(1, 0), Some(Some(RED)));
    }
}
