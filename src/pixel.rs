/// Stored bit depth of BMP pixel data.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BitDepth {
    /// 3 bytes per pixel, B, G, R.
    Bgr24,
    /// 4 bytes per pixel, B, G, R, A. Alpha is read but not kept.
    Bgra32,
}

impl BitDepth {
    /// Map a `biBitCount` header value to a supported depth.
    pub fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            24 => Some(Self::Bgr24),
            32 => Some(Self::Bgra32),
            _ => None,
        }
    }

    /// Bits per pixel as written in the header.
    pub fn bits(&self) -> u16 {
        match self {
            Self::Bgr24 => 24,
            Self::Bgra32 => 32,
        }
    }

    /// Bytes per pixel for this depth.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Bgr24 => 3,
            Self::Bgra32 => 4,
        }
    }

    /// Stored row length in bytes, padded to a 4-byte boundary.
    ///
    /// Returns `None` on overflow.
    pub fn row_stride(&self, width: u32) -> Option<usize> {
        let bits = u64::from(self.bits()).checked_mul(u64::from(width))?;
        let stride = bits.checked_add(31)? / 32 * 4;
        usize::try_from(stride).ok()
    }
}

/// Vertical storage order of rows in the pixel array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RowOrder {
    /// First stored row is the top of the image (negative height field).
    #[default]
    TopDown,
    /// First stored row is the bottom of the image (positive height field).
    BottomUp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_pads_to_four_bytes() {
        assert_eq!(BitDepth::Bgr24.row_stride(5), Some(16));
        assert_eq!(BitDepth::Bgr24.row_stride(4), Some(12));
        assert_eq!(BitDepth::Bgr24.row_stride(1), Some(4));
        assert_eq!(BitDepth::Bgra32.row_stride(5), Some(20));
    }

    #[test]
    fn only_24_and_32_bits() {
        assert_eq!(BitDepth::from_bits(24), Some(BitDepth::Bgr24));
        assert_eq!(BitDepth::from_bits(32), Some(BitDepth::Bgra32));
        for bits in [0, 1, 4, 8, 16, 48] {
            assert_eq!(BitDepth::from_bits(bits), None);
        }
    }
}
