//! The bouncing logo.
//!
//! [`MovingLogo`] keeps the logo's rectangle inside a container rectangle, moving it a little
//! every time [`MovingLogo::animate`] is called. Whenever the logo touches an edge it bounces
//! off and switches to the next color of its [`Palette`].
//!
//! The logo doesn't draw anything itself. Instead it reports to a [`LogoListener`]:
//! [`LogoListener::on_new_position`] after every tick, and [`LogoListener::on_redraw`] with a
//! freshly tinted image whenever the color changes.

use std::time::Duration;

use image::RgbaImage;
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    clock::{Clock, Stopwatch},
    geometry::Rect,
    tint::{tint, Palette, Rgb},
};

/// Selects how the direction flags turn into movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum MoveMode {
    /// Constant speed along both axes, i.e. 45 degree diagonals.
    #[default]
    Normal,
    /// Travels along the container's diagonal.
    Opposite,
    /// Reserved. The logo stands still in this mode.
    #[value(skip)]
    AllCorners,
}

/// Speed settings, fixed for the lifetime of a logo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Pixels moved per `time_unit`.
    pub speed: f64,
    /// Elapsed time is divided by this to get the step multiplier, which keeps the speed
    /// independent of the frame rate.
    pub time_unit: Duration,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            speed: 2.0,
            time_unit: Duration::from_millis(10),
        }
    }
}

/// Receives updates from a [`MovingLogo`]. Both methods are called synchronously from
/// within the logo's operations.
pub trait LogoListener {
    /// The logo moved (or may have moved) to `rect`.
    fn on_new_position(&mut self, rect: Rect);
    /// The logo was recolored; `image` is the tinted logo at its source resolution.
    fn on_redraw(&mut self, image: &RgbaImage);
}

/// A logo bouncing around inside a container.
pub struct MovingLogo<L, C = Stopwatch> {
    image: RgbaImage,
    palette: Palette,
    motion: Motion,
    listener: L,
    clock: C,
    rng: StdRng,
    rect: Rect,
    bounds: Rect,
    scale: f64,
    mode: MoveMode,
    moving_right: bool,
    moving_down: bool,
    color_idx: Option<usize>,
}

impl<L: LogoListener> MovingLogo<L> {
    /// Creates a logo timed by the wall clock.
    pub fn new(image: RgbaImage, palette: Palette, motion: Motion, listener: L) -> Self {
        Self::with_clock(image, palette, motion, listener, Stopwatch::start())
    }
}

impl<L: LogoListener, C: Clock> MovingLogo<L, C> {
    /// Creates a logo timed by `clock`.
    ///
    /// The logo starts in the top left corner at the image's own size, heading right and down,
    /// with no color selected. Call [`MovingLogo::rescale`] before animating so it knows its
    /// container.
    pub fn with_clock(
        image: RgbaImage,
        palette: Palette,
        motion: Motion,
        listener: L,
        clock: C,
    ) -> Self {
        let rect = Rect::new(0.0, 0.0, image.width() as f64, image.height() as f64);
        Self {
            image,
            palette,
            motion,
            listener,
            clock,
            rng: StdRng::from_entropy(),
            rect,
            bounds: Rect::default(),
            scale: 1.0,
            mode: MoveMode::Normal,
            moving_right: true,
            moving_down: true,
            color_idx: None,
        }
    }

    /// Makes random placement reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_mode(mut self, mode: MoveMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn mode(&self) -> MoveMode {
        self.mode
    }

    /// Index into the palette of the current color, or `None` before the first
    /// [`MovingLogo::next_color`].
    pub fn color_index(&self) -> Option<usize> {
        self.color_idx
    }

    pub fn current_color(&self) -> Option<Rgb> {
        self.color_idx.map(|i| self.palette.get(i))
    }

    pub fn moving_right(&self) -> bool {
        self.moving_right
    }

    pub fn moving_down(&self) -> bool {
        self.moving_down
    }

    pub fn set_direction(&mut self, right: bool, down: bool) {
        self.moving_right = right;
        self.moving_down = down;
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Fits the logo to a new container.
    ///
    /// The logo's width becomes `bounds.diagonal() / scale`, keeping the image's aspect ratio.
    /// A logo that would still overflow the container is shrunk until it fits. The origin is
    /// pulled back inside the container, then the logo takes a step.
    pub fn rescale(&mut self, bounds: Rect, scale: f64) {
        self.bounds = bounds;
        self.scale = scale;

        let mut width = bounds.diagonal() / scale;
        let mut height = width / self.aspect_ratio();
        let fit = (bounds.width / width).min(bounds.height / height);
        if fit < 1.0 {
            width *= fit;
            height *= fit;
        }
        self.rect.width = width;
        self.rect.height = height;
        self.clamp_to_bounds();
        debug!("rescaled logo to {width:.1}x{height:.1} in {bounds:?}");

        self.animate();
    }

    /// Advances the logo by one tick.
    ///
    /// Bounces off any edge the logo is touching (switching color once, even in a corner),
    /// then moves by the current mode's displacement scaled by the time since the last tick.
    pub fn animate(&mut self) {
        if self.bounce() {
            debug!(
                "bounce at ({:.1}, {:.1}), right: {}, down: {}",
                self.rect.x, self.rect.y, self.moving_right, self.moving_down
            );
            self.next_color();
        }

        let (dx, dy) = self.displacement();
        let step = self.step();
        self.rect.x += dx * step;
        self.rect.y += dy * step;
        self.clamp_to_bounds();

        self.listener.on_new_position(self.rect);
        self.clock.restart();
    }

    /// Switches to the next palette color and hands the tinted image to the listener.
    pub fn next_color(&mut self) {
        let idx = self
            .color_idx
            .map_or(0, |i| (i + 1) % self.palette.len());
        self.color_idx = Some(idx);
        let image = tint(&self.image, self.palette.get(idx));
        self.listener.on_redraw(&image);
    }

    /// Teleports the logo to a random whole-pixel position inside the container, then
    /// takes a step.
    pub fn place_in_random_spot(&mut self) {
        let x = self.random_offset(self.bounds.width - self.rect.width);
        let y = self.random_offset(self.bounds.height - self.rect.height);
        self.rect.x = self.bounds.x + x;
        self.rect.y = self.bounds.y + y;
        self.animate();
    }

    /// Moves the logo to `(x, y)`, clamped into the container, then takes a step.
    pub fn place_at(&mut self, x: f64, y: f64) {
        self.rect.x = x;
        self.rect.y = y;
        self.clamp_to_bounds();
        self.animate();
    }

    /// Cycles `Normal -> Opposite -> Normal`. Returning to normal also moves the logo to a
    /// random spot.
    pub fn next_mode(&mut self) {
        match self.mode {
            MoveMode::Normal => self.mode = MoveMode::Opposite,
            MoveMode::Opposite => {
                self.mode = MoveMode::Normal;
                self.place_in_random_spot();
            }
            MoveMode::AllCorners => self.mode = MoveMode::Normal,
        }
        debug!("switched to {:?} mode", self.mode);
    }

    fn aspect_ratio(&self) -> f64 {
        let (w, h) = self.image.dimensions();
        if w == 0 || h == 0 {
            1.0
        } else {
            w as f64 / h as f64
        }
    }

    /// Updates the direction flags. Returns `true` if any edge was touched.
    fn bounce(&mut self) -> bool {
        let mut touched = false;

        if self.rect.right() >= self.bounds.right() {
            self.moving_right = false;
            touched = true;
        } else if self.rect.x <= self.bounds.x {
            self.moving_right = true;
            touched = true;
        }

        if self.rect.bottom() >= self.bounds.bottom() {
            self.moving_down = false;
            touched = true;
        } else if self.rect.y <= self.bounds.y {
            self.moving_down = true;
            touched = true;
        }

        touched
    }

    /// Movement for a single time unit.
    fn displacement(&self) -> (f64, f64) {
        let speed = self.motion.speed;
        let sx = if self.moving_right { speed } else { -speed };
        let sy = if self.moving_down { speed } else { -speed };

        match self.mode {
            MoveMode::Normal => (sx, sy),
            MoveMode::Opposite => {
                let travel_w = self.bounds.width - self.rect.width;
                let travel_h = self.bounds.height - self.rect.height;
                let theta = travel_h.atan2(travel_w);
                let hyp = (self.rect.x - self.bounds.x).hypot(self.rect.y - self.bounds.y);
                let x = self.bounds.x + (hyp + sx * 2.0) * theta.cos();
                let y = self.bounds.y + (hyp + sy * 2.0) * theta.sin();
                (x - self.rect.x, y - self.rect.y)
            }
            MoveMode::AllCorners => (0.0, 0.0),
        }
    }

    fn step(&self) -> f64 {
        let unit = self.motion.time_unit.as_secs_f64() * 1000.0;
        if unit > 0.0 {
            self.clock.elapsed_millis() / unit
        } else {
            0.0
        }
    }

    fn clamp_to_bounds(&mut self) {
        let b = self.bounds;
        self.rect.x = self.rect.x.min(b.right() - self.rect.width).max(b.x);
        self.rect.y = self.rect.y.min(b.bottom() - self.rect.height).max(b.y);
    }

    fn random_offset(&mut self, span: f64) -> f64 {
        if span > 0.0 && span.is_finite() {
            self.rng.gen_range(0.0..span).floor()
        } else {
            0.0
        }
    }
}
