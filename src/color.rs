//! Color values and hex text conversion.
//!
//! Inside the crate a color is always a byte triple. Hex strings such as
//! `#1a2b3c` only appear at the UI boundary, through the functions here.

use alloc::string::String;

/// An 8-bit-per-channel RGB color.
pub type Rgb = rgb::RGB8;

/// One grid position: `None` is an unset cell, `Some` a concrete color.
pub type Cell = Option<Rgb>;

/// Opaque black, the color unset cells are stored as.
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Parse `rrggbb` or `#rrggbb` (case-insensitive).
///
/// Any other input returns `None`; callers treat that as "no color".
pub fn hex_to_rgb(text: &str) -> Option<Rgb> {
    let digits = text.strip_prefix('#').unwrap_or(text).as_bytes();
    if digits.len() != 6 {
        return None;
    }
    let r = hex_pair(digits[0], digits[1])?;
    let g = hex_pair(digits[2], digits[3])?;
    let b = hex_pair(digits[4], digits[5])?;
    Some(Rgb::new(r, g, b))
}

/// Format as `#rrggbb`, lowercase.
pub fn rgb_to_hex(color: Rgb) -> String {
    alloc::format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

/// Like [`hex_to_rgb`], but yields an unset cell for unparseable text.
pub fn hex_to_cell(text: &str) -> Cell {
    hex_to_rgb(text)
}

/// Format a cell; unset cells become the empty string.
pub fn cell_to_hex(cell: Cell) -> String {
    cell.map(rgb_to_hex).unwrap_or_default()
}

fn hex_pair(hi: u8, lo: u8) -> Option<u8> {
    Some((hex_digit(hi)? << 4) | hex_digit(lo)?)
}

fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_hash() {
        assert_eq!(hex_to_rgb("#ff8000"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(hex_to_rgb("ff8000"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(hex_to_rgb("#FfA0c3"), Some(Rgb::new(0xff, 0xa0, 0xc3)));
    }

    #[test]
    fn rejects_malformed_text() {
        for bad in [
            "", "#", "#fff", "fff", "#ff80000", "##ff8000", "#gg0000", "#+f0000", " ff8000",
            "ff 800", "#ff800",
        ] {
            assert_eq!(hex_to_rgb(bad), None, "{bad:?} should not parse");
        }
    }

    #[test]
    fn formats_lowercase_zero_padded() {
        assert_eq!(rgb_to_hex(Rgb::new(0, 0, 0)), "#000000");
        assert_eq!(rgb_to_hex(Rgb::new(10, 11, 255)), "#0a0bff");
        assert_eq!(rgb_to_hex(Rgb::new(0xAB, 0xCD, 0xEF)), "#abcdef");
    }

    #[test]
    fn hex_is_inverse_of_rgb() {
        let samples = [0u8, 1, 15, 16, 127, 128, 200, 254, 255];
        for &r in &samples {
            for &g in &samples {
                for &b in &samples {
                    let c = Rgb::new(r, g, b);
                    assert_eq!(hex_to_rgb(&rgb_to_hex(c)), Some(c));
                }
            }
        }
    }

    #[test]
    fn unset_cells_format_empty() {
        assert_eq!(cell_to_hex(None), "");
        assert_eq!(cell_to_hex(Some(BLACK)), "#000000");
        assert_eq!(hex_to_cell(""), None);
        assert_eq!(hex_to_cell("#010203"), Some(Rgb::new(1, 2, 3)));
    }
}
