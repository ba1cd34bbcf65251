//! Getting tint colors onto the terminal.
//!
//! Terminals that advertise 24-bit color get the tint as-is. Everywhere else it is
//! approximated by one of the 256 ANSI colors, represented by [`Color`].

use std::{cmp::Ordering, env};

use crossterm::style;

use crate::tint::Rgb;

/// An 8-bit ANSI color value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Color(pub u8);

// RGB, GREYSCALE: These are the values most terminals seem to use
// RGB must begin with 0 and end with 255
const RGB: [u8; 6] = [0, 95, 135, 175, 215, 255];
const GREYSCALE: [u8; 24] = {
    let mut x = [0u8; 24];
    let mut i = 0u8;
    while i < 24 {
        x[i as usize] = i * 10 + 8;
        i += 1;
    }
    x
};

/// Picks the step of `scale` closest to `target`.
fn nearest_step(scale: &[u8], target: u8) -> u8 {
    let next = scale
        .iter()
        .position(|&v| v >= target)
        .unwrap_or(scale.len() - 1);

    match target.cmp(&scale[next]) {
        // exact hit, or target beyond the last step
        Ordering::Greater | Ordering::Equal => next as u8,
        Ordering::Less if next == 0 => 0,
        Ordering::Less => {
            let prev = next - 1;
            if target - scale[prev] > scale[next] - target {
                next as u8
            } else {
                prev as u8
            }
        }
    }
}

/// Cube-norm distance between two colors.
fn distance(a: (u8, u8, u8), b: (u8, u8, u8)) -> f32 {
    let d = |x: u8, y: u8| (x as f32 - y as f32).abs().powi(3);
    (d(a.0, b.0) + d(a.1, b.1) + d(a.2, b.2)).cbrt()
}

impl Color {
    pub const fn new(color: u8) -> Self {
        Self(color)
    }

    /// Returns the ANSI color visually closest to the given RGB value.
    ///
    /// Both the 6x6x6 color cube and the greyscale ramp are searched, componentwise, and the
    /// candidate nearer to the input wins (the cube on a tie).
    pub fn from_rgb_approximate(r: u8, g: u8, b: u8) -> Self {
        let cube = Self::from_ansi_components(
            nearest_step(&RGB, r),
            nearest_step(&RGB, g),
            nearest_step(&RGB, b),
        );
        let grey = Self::from_ansi_greyscale(nearest_step(
            &GREYSCALE,
            ((r as u16 + g as u16 + b as u16) / 3) as u8,
        ));

        if distance(cube.to_rgb_approximate(), (r, g, b))
            > distance(grey.to_rgb_approximate(), (r, g, b))
        {
            grey
        } else {
            cube
        }
    }

    /// A color from the 6x6x6 cube. Components above 5 are clipped.
    pub fn from_ansi_components(r: u8, g: u8, b: u8) -> Self {
        Self(r.min(5) * 36 + g.min(5) * 6 + b.min(5) + 16)
    }

    /// A color from the 24 step greyscale ramp. Steps above 23 are clipped.
    pub fn from_ansi_greyscale(step: u8) -> Self {
        Self(232 + step.min(23))
    }

    /// Returns the approximate RGB value of this ANSI color. The 16 standard colors
    /// follow the windows XP console, since every theme disagrees on them anyway.
    pub fn to_rgb_approximate(self) -> (u8, u8, u8) {
        match self.0 {
            0 => (0, 0, 0),
            1 => (128, 0, 0),
            2 => (0, 128, 0),
            3 => (128, 128, 0),
            4 => (0, 0, 128),
            5 => (128, 0, 128),
            6 => (0, 128, 128),
            7 => (192, 192, 192),
            8 => (128, 128, 128),
            9 => (255, 0, 0),
            10 => (0, 255, 0),
            11 => (255, 255, 0),
            12 => (0, 0, 255),
            13 => (255, 0, 255),
            14 => (0, 255, 255),
            15 => (255, 255, 255),
            16..=231 => {
                let offset = self.0 - 16;
                (
                    RGB[(offset / 36 % 6) as usize],
                    RGB[(offset / 6 % 6) as usize],
                    RGB[(offset % 6) as usize],
                )
            }
            232..=255 => {
                let v = GREYSCALE[(self.0 - 232) as usize];
                (v, v, v)
            }
        }
    }

    pub fn to_crossterm_color(self) -> style::Color {
        style::Color::AnsiValue(self.0)
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Self::from_rgb_approximate(c.r, c.g, c.b)
    }
}

/// How tints are written to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// 24-bit escape sequences.
    TrueColor,
    /// The nearest of the 256 ANSI colors.
    Ansi256,
}

impl ColorMode {
    /// Picks [`ColorMode::TrueColor`] when `COLORTERM` advertises it.
    pub fn detect() -> Self {
        Self::from_colorterm(env::var("COLORTERM").ok().as_deref())
    }

    fn from_colorterm(value: Option<&str>) -> Self {
        match value {
            Some("truecolor" | "24bit") => ColorMode::TrueColor,
            _ => ColorMode::Ansi256,
        }
    }

    pub fn to_crossterm_color(self, color: Rgb) -> style::Color {
        match self {
            ColorMode::TrueColor => style::Color::Rgb {
                r: color.r,
                g: color.g,
                b: color.b,
            },
            ColorMode::Ansi256 => Color::from(color).to_crossterm_color(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn ansi_components() {
        assert_eq!(Color::from_ansi_components(1, 2, 3), Color::new(67));
        assert_eq!(Color::from_ansi_components(0, 0, 0), Color::new(16));
        assert_eq!(Color::from_ansi_components(6, 7, 8), Color::new(231));
    }

    #[test]
    fn ansi_greyscale() {
        assert_eq!(Color::from_ansi_greyscale(0), Color::new(232));
        assert_eq!(Color::from_ansi_greyscale(10), Color::new(242));
        assert_eq!(Color::from_ansi_greyscale(100), Color::new(255));
    }

    #[rstest]
    #[case((0, 0, 0), Color::from_ansi_components(0, 0, 0))]
    #[case((255, 255, 255), Color::from_ansi_components(5, 5, 5))]
    #[case((95, 135, 215), Color::from_ansi_components(1, 2, 4))]
    #[case((129, 251, 2), Color::from_ansi_components(2, 5, 0))]
    #[case((58, 58, 58), Color::from_ansi_greyscale(5))]
    #[case((64, 59, 62), Color::from_ansi_greyscale(5))]
    fn rgb_approximation(#[case] rgb: (u8, u8, u8), #[case] expected: Color) {
        assert_eq!(Color::from_rgb_approximate(rgb.0, rgb.1, rgb.2), expected);
    }

    #[test]
    fn palette_lands_in_cube() {
        // the default pink: 255 -> 5, 0 -> 0, 139 -> 2
        assert_eq!(
            Color::from(Rgb::new(255, 0, 139)),
            Color::from_ansi_components(5, 0, 2)
        );
    }

    #[test]
    fn crossterm_colors() {
        let c = Rgb::new(190, 0, 255);
        assert_eq!(
            ColorMode::TrueColor.to_crossterm_color(c),
            style::Color::Rgb {
                r: 190,
                g: 0,
                b: 255
            }
        );
        assert!(matches!(
            ColorMode::Ansi256.to_crossterm_color(c),
            style::Color::AnsiValue(_)
        ));
    }

    #[test]
    fn colorterm_detection() {
        assert_eq!(
            ColorMode::from_colorterm(Some("truecolor")),
            ColorMode::TrueColor
        );
        assert_eq!(ColorMode::from_colorterm(Some("24bit")), ColorMode::TrueColor);
        assert_eq!(ColorMode::from_colorterm(Some("yes")), ColorMode::Ansi256);
        assert_eq!(ColorMode::from_colorterm(None), ColorMode::Ansi256);
    }
}
