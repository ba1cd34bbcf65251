//! Module responsible for formatting black & white bitmaps into Unicode braille characters.
//!
//! See the [`Cell`] documentation for more.

use std::ops::BitOr;

/// The unicode scalar value for the first ("empty") braille codepoint.
pub const BRAILLE_BASE_CODEPOINT: u32 = 0x2800;
/// The number of bytes required to encode a braille unicode character into utf-8. This is a constant value,
/// because the characters have codepoints between `U+0800` and `U+FFFF`.
pub const BRAILLE_UTF8_BYTES: usize = 3;

/// A cell is exactly 2 pixels wide, since it consists of one braille character.
pub const PIXEL_WIDTH: u8 = 2;
/// A cell is exactly 4 pixels tall, since it consists of one braille character.
pub const PIXEL_HEIGHT: u8 = 4;

/// One terminal character worth of pixels, stored with its bits permuted. More specifically,
/// its bits follow the following format:
/// ```txt
/// 0 1
/// 2 3
/// 4 5
/// 6 7
/// ```
///
/// That is, the top left pixel of a cell is stored into the 0th bit, the top right pixel is the 1st
/// bit, and so on.
///
/// On the contrary, the Unicode specification for braille characters provides the following format:
/// ```txt
/// 0 3
/// 1 4
/// 2 5
/// 6 7
/// ```
/// That is, the braille character with the top left and top right dots set is encoded as an 8-bit offset
/// from [`BRAILLE_BASE_CODEPOINT`] with the 0th and 3rd bits set, i.e. `0b1001`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
#[repr(transparent)]
pub struct Cell {
    /// The internal storage bits.
    pub bits: u8,
}

impl Cell {
    /// Create a new cell with the specified bits.
    pub const fn new(bits: u8) -> Self {
        Self { bits }
    }

    /// A cell with every pixel set.
    pub const fn full() -> Self {
        Self { bits: u8::MAX }
    }

    /// A cell with only the pixel at subcell position `(x, y)` set.
    /// Returns `None` if the position lies outside the 2x4 grid.
    pub const fn from_bit_position(x: u8, y: u8) -> Option<Self> {
        if x < PIXEL_WIDTH && y < PIXEL_HEIGHT {
            Some(Self::new(1 << (y * PIXEL_WIDTH + x)))
        } else {
            None
        }
    }

    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Computes the Unicode codepoint offset format of the braille character.
    pub const fn braille_offset(self) -> u8 {
        (self.bits & 0b11100001)
            | ((self.bits & 0b10) << 2)
            | ((self.bits & 0b100) >> 1)
            | ((self.bits & 0b1000) << 1)
            | ((self.bits & 0b10000) >> 2)
    }

    /// The braille character for this cell.
    pub fn to_braille(self) -> char {
        // every 8-bit offset from the base lands inside the braille block
        char::from_u32(BRAILLE_BASE_CODEPOINT + self.braille_offset() as u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    /// Encodes the cell as a sequence of UTF-8 bytes representing
    /// its braille encoded character.
    pub fn to_braille_utf8(self) -> [u8; BRAILLE_UTF8_BYTES] {
        let mut b = [0; BRAILLE_UTF8_BYTES];
        self.to_braille().encode_utf8(&mut b);
        b
    }
}

impl BitOr for Cell {
    type Output = Cell;

    fn bitor(self, rhs: Self) -> Self::Output {
        Cell::new(self.bits | rhs.bits)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn unique_offset() {
        let map: HashSet<_> = (0u8..=255).map(|n| Cell::new(n).braille_offset()).collect();
        assert_eq!(map.len(), 256)
    }

    #[test]
    fn correct_braille() {
        assert_eq!(Cell::new(0).to_braille_utf8(), [226, 160, 128]);
        assert_eq!(Cell::new(1).to_braille_utf8(), [226, 160, 129]);
        assert_eq!(Cell::new(2).to_braille_utf8(), [226, 160, 136]);
        assert_eq!(Cell::new(4).to_braille_utf8(), [226, 160, 130]);
        assert_eq!(Cell::new(128).to_braille_utf8(), [226, 162, 128]);
        assert_eq!(Cell::full().to_braille(), '⣿');
    }

    #[test]
    fn bit_positions() {
        assert_eq!(Cell::from_bit_position(0, 0), Some(Cell::new(1)));
        assert_eq!(Cell::from_bit_position(1, 0), Some(Cell::new(2)));
        assert_eq!(Cell::from_bit_position(1, 3), Some(Cell::new(128)));
        assert_eq!(Cell::from_bit_position(2, 0), None);
        assert_eq!(Cell::from_bit_position(0, 4), None);
        let all = (0..PIXEL_HEIGHT)
            .flat_map(|y| (0..PIXEL_WIDTH).map(move |x| (x, y)))
            .filter_map(|(x, y)| Cell::from_bit_position(x, y))
            .fold(Cell::default(), |acc, c| acc | c);
        assert_eq!(all, Cell::full());
        assert!(!all.is_empty());
    }
}
