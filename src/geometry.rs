//! Floating point rectangles used for the logo and its container.
//!
//! Coordinates are in screen pixels with (0, 0) at the top left; `y` grows downwards.

/// An axis aligned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The x coordinate of the right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// The y coordinate of the bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Length of the diagonal.
    pub fn diagonal(&self) -> f64 {
        self.width.hypot(self.height)
    }

    /// Returns `true` if `other` lies entirely inside `self`. Edges may touch.
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}
