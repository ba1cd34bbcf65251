//! Recoloring the logo.
//!
//! A tint is applied with "source-atop" compositing: a solid fill is drawn over the image,
//! but only where the image already has coverage. The result keeps the image's alpha
//! channel (its shape) and takes every color channel from the fill.

use std::{fmt, str::FromStr};

use image::{Rgba, RgbaImage};

use crate::error::{Error, Result};

/// An opaque 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` or `rrggbb`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_hex(s).ok_or_else(|| format!("`{s}` is not a #rrggbb color"))
    }
}

/// An ordered, never empty list of tint colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Creates a palette. Fails if `colors` is empty, since the logo always needs a color
    /// to switch to.
    pub fn new(colors: Vec<Rgb>) -> Result<Self> {
        if colors.is_empty() {
            Err(Error::config("the palette needs at least one color"))
        } else {
            Ok(Self { colors })
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Never `true` for a palette built through [`Palette::new`].
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The color at `index`, wrapping around the palette.
    pub fn get(&self, index: usize) -> Rgb {
        self.colors[index % self.colors.len()]
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }
}

impl Default for Palette {
    /// Purple, pink, orange, blue and yellow, like the DVD player screensavers of old.
    fn default() -> Self {
        Self {
            colors: vec![
                Rgb::new(190, 0, 255),
                Rgb::new(255, 0, 139),
                Rgb::new(255, 131, 0),
                Rgb::new(0, 38, 255),
                Rgb::new(255, 250, 0),
            ],
        }
    }
}

/// Returns a copy of `image` filled with `color`, masked by the image's own alpha.
pub fn tint(image: &RgbaImage, color: Rgb) -> RgbaImage {
    let mut out = image.clone();
    for Rgba([r, g, b, _]) in out.pixels_mut() {
        *r = color.r;
        *g = color.g;
        *b = color.b;
    }
    out
}
