//! Internal module for keeping track of units.
//! Using pixels when cells are expected is a no no.
//!
//! Pixel x/y position/length: usize
//! Terminal cell (column/row) position/length: u16 at the terminal boundary, usize inside
//! Subcell pixel x/y position: u8

use crate::cell::{PIXEL_HEIGHT, PIXEL_WIDTH};

// https://github.com/rust-lang/rust/issues/88581
pub(crate) const fn div_ceil(a: usize, b: usize) -> usize {
    (a + b - 1) / b
}

/// Converts a terminal size in columns and rows to a screen size in pixels.
pub(crate) const fn cells_to_pixels(columns: u16, rows: u16) -> (usize, usize) {
    (
        columns as usize * PIXEL_WIDTH as usize,
        rows as usize * PIXEL_HEIGHT as usize,
    )
}

/// Splits a pixel position into its cell coordinate and subcell coordinate.
///
/// Returns a pair of pairs:
/// `((x cell coordinate, x subcell coordinate), (y cell coordinate, y subcell coordinate))`
pub(crate) const fn pos_components(x: usize, y: usize) -> ((usize, u8), (usize, u8)) {
    (
        (x / PIXEL_WIDTH as usize, (x % PIXEL_WIDTH as usize) as u8),
        (y / PIXEL_HEIGHT as usize, (y % PIXEL_HEIGHT as usize) as u8),
    )
}

/// Converts from a (x, y) position to an array index.
pub(crate) const fn index(x: usize, y: usize, width: usize) -> usize {
    y * width + x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions() {
        assert_eq!(div_ceil(3, 2), 2);
        assert_eq!(div_ceil(4, 2), 2);
        assert_eq!(cells_to_pixels(80, 24), (160, 96));
        assert_eq!(pos_components(5, 9), ((2, 1), (2, 1)));
        assert_eq!(index(3, 2, 10), 23);
    }
}
