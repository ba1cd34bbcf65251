//! Module for turning images into [`Sprite`]s, i.e. single-colored pixel masks that can be
//! drawn onto a [`Screen`](crate::screen::Screen).
use std::collections::HashMap;

use image::{imageops, imageops::FilterType, Rgba, RgbaImage};
use smallvec::{smallvec, SmallVec};

use crate::{tint::Rgb, units::index};

/// Stack allocation size for each sprite's pixel data
const SPRITE_STACK_SIZE: usize = 64;

/// Pixels with an alpha value above this are drawn.
const ALPHA_THRESHOLD: u8 = 128;

type SpriteData = SmallVec<[bool; SPRITE_STACK_SIZE]>;

/// A rectangular pixel mask with a single color.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pixels: SpriteData,
    width: usize,
    height: usize,
    color: Option<Rgb>,
}

impl Sprite {
    /// Create a new empty [`Sprite`] with the given dimensions in pixels.
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            pixels: smallvec![false; width * height],
            width,
            height,
            color: None,
        }
    }

    /// Resamples `image` to `width` x `height` pixels with nearest neighbor sampling and
    /// keeps the pixels that are mostly opaque.
    ///
    /// The sprite's color is the most common color among the kept pixels. For a tinted
    /// logo that is simply the tint.
    pub fn from_image(image: &RgbaImage, width: usize, height: usize) -> Self {
        if width == 0 || height == 0 || image.width() == 0 || image.height() == 0 {
            return Self::empty(width, height);
        }
        let resized = imageops::resize(image, width as u32, height as u32, FilterType::Nearest);

        let mut pixels = smallvec![false; width * height];
        let mut counts: HashMap<Rgb, usize> = HashMap::new();
        for (x, y, &Rgba([r, g, b, a])) in resized.enumerate_pixels() {
            if a > ALPHA_THRESHOLD {
                pixels[index(x as usize, y as usize, width)] = true;
                *counts.entry(Rgb::new(r, g, b)).or_default() += 1;
            }
        }
        let color = counts.into_iter().max_by_key(|&(_, n)| n).map(|(c, _)| c);

        Self {
            pixels,
            width,
            height,
            color,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn color(&self) -> Option<Rgb> {
        self.color
    }

    /// Whether the pixel at `(x, y)` is set. Out of bounds pixels are not.
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.pixels[index(x, y, self.width)]
    }

    /// Iterates over the coordinates of every set pixel.
    pub fn set_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pixels
            .iter()
            .enumerate()
            .filter(|&(_, &on)| on)
            .map(|(i, _)| (i % self.width, i / self.width))
    }
}
