//! Module for writing output to the screen.
//! Contains the [Screen] type and its public interface.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Print, ResetColor, SetForegroundColor},
};

use crate::{
    cell::{Cell, BRAILLE_UTF8_BYTES, PIXEL_HEIGHT, PIXEL_WIDTH},
    color::ColorMode,
    sprite::Sprite,
    tint::Rgb,
    units::{cells_to_pixels, div_ceil, index, pos_components},
};

/// Type used to write to the screen. Contains public methods
/// to write pixels and sprites to the screen, as well as colors.
///
/// The point (0, 0) represents the top left pixel of the screen.
///
/// The [`Screen::rasterize`] method generates plain braille text, while
/// [`Screen::render`] writes the screen, colors included, to a terminal.
pub struct Screen {
    cells: Vec<Cell>,
    colors: Vec<Option<Rgb>>,
    width: usize,
    height: usize,
}

/// A blit type used to select the type of operation
/// when writing to the screen. In the case of single pixels,
/// this is used to determine whether the output pixel is
/// set to 1, set to 0 or flipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blit {
    /// Sets the output bits to 0
    Unset,
    /// Set the output bits to 1
    Set,
    /// Flips the output bits, i.e. sets 1 to 0 and 0 to 1
    Toggle,
}

impl Screen {
    /// Create a new empty screen with the given dimensions in pixels.
    /// The cell grid is rounded up to fit every pixel.
    pub fn new(width: usize, height: usize) -> Self {
        let len = div_ceil(width, PIXEL_WIDTH as usize) * div_ceil(height, PIXEL_HEIGHT as usize);
        Self {
            cells: vec![Cell::default(); len],
            colors: vec![None; len],
            width,
            height,
        }
    }

    /// Create a screen covering a terminal of `columns` x `rows` characters.
    pub fn for_terminal(columns: u16, rows: u16) -> Self {
        let (width, height) = cells_to_pixels(columns, rows);
        Self::new(width, height)
    }

    /// Compute the height of the screen, in number of cells.
    pub fn cell_height(&self) -> usize {
        div_ceil(self.height, PIXEL_HEIGHT as usize)
    }
    /// Compute the width of the screen, in number of cells.
    pub fn cell_width(&self) -> usize {
        div_ceil(self.width, PIXEL_WIDTH as usize)
    }
    pub fn pixel_height(&self) -> usize {
        self.height
    }
    pub fn pixel_width(&self) -> usize {
        self.width
    }

    /// Blanks every pixel and forgets every color.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
        self.colors.fill(None);
    }

    fn pixel_index(&self, x: usize, y: usize) -> (usize, Cell) {
        let ((cell_x, px_x), (cell_y, px_y)) = pos_components(x, y);
        let bit = Cell::from_bit_position(px_x, px_y).unwrap_or_default();
        (index(cell_x, cell_y, self.cell_width()), bit)
    }

    /// Whether the pixel at `(x, y)` is set. Out of bounds pixels are not.
    pub fn pixel_at(&self, x: usize, y: usize) -> bool {
        if x < self.width && y < self.height {
            let (index, bit) = self.pixel_index(x, y);
            self.cells[index].bits & bit.bits != 0
        } else {
            false
        }
    }

    /// The color of the cell containing pixel `(x, y)`.
    pub fn color_at(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            self.colors[self.pixel_index(x, y).0]
        } else {
            None
        }
    }

    /// Transforms the pixel value at the given coordinates with a generic given blitting strategy.
    /// Returns `true` if a value was changed, and `false` if the given coordinate was out of bounds.
    pub fn transform_pixel(&mut self, x: usize, y: usize, blit: Blit) -> bool {
        if x < self.width && y < self.height {
            let (index, bit) = self.pixel_index(x, y);
            let orig = self.cells[index].bits;
            self.cells[index].bits = match blit {
                Blit::Set => orig | bit.bits,
                Blit::Unset => orig & !bit.bits,
                Blit::Toggle => orig ^ bit.bits,
            };
            true
        } else {
            false
        }
    }

    /// Sets the pixel value at the given coordinates to be the given value.
    ///
    /// **Ignores** out-of-bounds input.
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        self.transform_pixel(x, y, if value { Blit::Set } else { Blit::Unset });
    }

    /// Draws `sprite` with its top left corner at pixel `(x, y)`. Pixels falling off the
    /// screen are clipped. Every cell the sprite touches takes the sprite's color.
    pub fn draw_sprite(&mut self, sprite: &Sprite, x: usize, y: usize, blit: Blit) {
        for (sx, sy) in sprite.set_pixels() {
            let (px, py) = (x + sx, y + sy);
            if self.transform_pixel(px, py, blit) {
                let (index, _) = self.pixel_index(px, py);
                self.colors[index] = sprite.color();
            }
        }
    }

    /// Converts the screen to a utf-8 sequence of bytes that can be rendered in a terminal.
    /// Includes newlines in its output, and no colors.
    pub fn rasterize(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.cells.len() * BRAILLE_UTF8_BYTES + self.cell_height());
        for row in self.cells.chunks(self.cell_width().max(1)) {
            for cell in row {
                buf.extend_from_slice(&cell.to_braille_utf8());
            }
            buf.push(b'\n');
        }
        buf
    }

    /// Writes the whole screen to `out`, row by row, switching foreground colors only where
    /// they change. The caller is responsible for flushing.
    pub fn render<W: Write>(&self, out: &mut W, mode: ColorMode) -> io::Result<()> {
        let width = self.cell_width();
        if width == 0 {
            return Ok(());
        }
        let mut current = None;
        queue!(out, ResetColor)?;
        for (y, (cells, colors)) in self
            .cells
            .chunks(width)
            .zip(self.colors.chunks(width))
            .enumerate()
        {
            queue!(out, MoveTo(0, y as u16))?;
            let mut line = String::with_capacity(width * BRAILLE_UTF8_BYTES);
            for (&cell, &color) in cells.iter().zip(colors) {
                // empty cells look the same in any color
                if color != current && !cell.is_empty() {
                    queue!(out, Print(&line))?;
                    line.clear();
                    match color {
                        Some(c) => queue!(out, SetForegroundColor(mode.to_crossterm_color(c)))?,
                        None => queue!(out, ResetColor)?,
                    }
                    current = color;
                }
                line.push(cell.to_braille());
            }
            queue!(out, Print(&line))?;
        }
        queue!(out, ResetColor)
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;

    #[test]
    fn simple_screen_size() {
        let screen = Screen::new(16, 24);
        assert_eq!(screen.cell_width(), 8);
        assert_eq!(screen.cell_height(), 6);
    }

    #[test]
    fn odd_screen_size() {
        let screen = Screen::new(3, 3);
        assert_eq!(screen.cell_width(), 2);
        assert_eq!(screen.cell_height(), 1);
    }

    #[test]
    fn terminal_size() {
        let screen = Screen::for_terminal(80, 24);
        assert_eq!(screen.pixel_width(), 160);
        assert_eq!(screen.pixel_height(), 96);
        assert_eq!(screen.cell_width(), 80);
    }

    #[test]
    fn make_square() {
        let mut screen = Screen::new(8, 8);
        for i in 0..8 {
            screen.set(i, 0, true);
            screen.set(i, 7, true);
            screen.set(0, i, true);
            screen.set(7, i, true);
        }
        assert_eq!(
            std::str::from_utf8(&screen.rasterize()).unwrap(),
            "⡏⠉⠉⢹\n⣇⣀⣀⣸\n"
        )
    }

    #[test]
    fn blit_types() {
        let mut screen = Screen::new(1, 1);
        assert!(!screen.pixel_at(0, 0));
        screen.set(0, 0, true);
        assert!(screen.pixel_at(0, 0));
        screen.set(0, 0, false);
        assert!(!screen.pixel_at(0, 0));
        screen.transform_pixel(0, 0, Blit::Toggle);
        assert!(screen.pixel_at(0, 0));
        assert!(!screen.transform_pixel(1, 0, Blit::Set));
    }

    #[test]
    fn sprite_is_clipped_and_colored() {
        let image = RgbaImage::from_pixel(4, 4, Rgba([0, 38, 255, 255]));
        let sprite = Sprite::from_image(&image, 4, 4);
        let mut screen = Screen::new(6, 6);
        screen.draw_sprite(&sprite, 4, 4, Blit::Set);
        assert!(screen.pixel_at(5, 5));
        assert!(!screen.pixel_at(3, 3));
        assert_eq!(screen.color_at(5, 5), Some(Rgb::new(0, 38, 255)));
        assert_eq!(screen.color_at(0, 0), None);

        screen.clear();
        assert!(!screen.pixel_at(5, 5));
        assert_eq!(screen.color_at(5, 5), None);
    }

    #[test]
    fn render_switches_colors() {
        let image = RgbaImage::from_pixel(2, 4, Rgba([255, 0, 0, 255]));
        let sprite = Sprite::from_image(&image, 2, 4);
        let mut screen = Screen::new(4, 4);
        screen.draw_sprite(&sprite, 2, 0, Blit::Set);

        let mut out = Vec::new();
        screen.render(&mut out, ColorMode::TrueColor).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("\u{1b}[38;2;255;0;0m"));
        assert!(out.contains("⠀"));
        assert!(out.contains("⣿"));
        assert!(out.find('⠀') < out.find('⣿'));
    }
}
