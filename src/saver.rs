//! Hosting a [`MovingLogo`] in a terminal.
//!
//! [`LogoView`] is the listener end: it remembers where the logo is and what it currently
//! looks like, and draws it onto a [`Screen`]. [`Saver`] wires the logo, the screen, the
//! frame timer and terminal events together.

use std::{
    io::{self, Write},
    ops::ControlFlow,
    time::Instant,
};

use crossterm::{
    cursor, event as term_event, execute,
    terminal::{self, ClearType},
};
use image::RgbaImage;
use log::{debug, info};

use crate::{
    config::Config,
    error::Result,
    event::Event,
    geometry::Rect,
    logo::{LogoListener, MovingLogo},
    screen::{Blit, Screen},
    sprite::Sprite,
    units::cells_to_pixels,
};

/// Tracks the logo's rectangle and tinted image, and renders them on demand.
///
/// The sprite is rebuilt lazily, only when the image or the logo's pixel size changes.
#[derive(Debug, Default)]
pub struct LogoView {
    rect: Rect,
    image: Option<RgbaImage>,
    sprite: Option<Sprite>,
}

impl LogoView {
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    fn pixel_size(&self) -> (usize, usize) {
        (
            self.rect.width.round().max(0.0) as usize,
            self.rect.height.round().max(0.0) as usize,
        )
    }

    /// The logo at its current size, or `None` before the first color was picked.
    pub fn sprite(&mut self) -> Option<&Sprite> {
        let (width, height) = self.pixel_size();
        if self.sprite.is_none() {
            let image = self.image.as_ref()?;
            self.sprite = Some(Sprite::from_image(image, width, height));
            debug!("rebuilt logo sprite at {width}x{height}");
        }
        self.sprite.as_ref()
    }

    /// Draws the logo onto `screen` at its current position.
    pub fn draw(&mut self, screen: &mut Screen) {
        let (x, y) = (
            self.rect.x.round().max(0.0) as usize,
            self.rect.y.round().max(0.0) as usize,
        );
        if let Some(sprite) = self.sprite() {
            screen.draw_sprite(sprite, x, y, Blit::Set);
        }
    }
}

impl LogoListener for LogoView {
    fn on_new_position(&mut self, rect: Rect) {
        let old_size = self.pixel_size();
        self.rect = rect;
        if self.pixel_size() != old_size {
            self.sprite = None;
        }
    }

    fn on_redraw(&mut self, image: &RgbaImage) {
        self.image = Some(image.clone());
        self.sprite = None;
    }
}

/// Raw mode, alternate screen and hidden cursor for as long as it lives.
struct TerminalSession<W: Write> {
    out: W,
}

impl<W: Write> TerminalSession<W> {
    fn enter(mut out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        Ok(Self { out })
    }
}

impl<W: Write> Drop for TerminalSession<W> {
    fn drop(&mut self) {
        // nothing left to report errors to
        let _ = execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// The screensaver: a bouncing logo on a terminal sized screen.
pub struct Saver {
    config: Config,
    logo: MovingLogo<LogoView>,
    screen: Screen,
}

impl Saver {
    /// Sets up the logo without touching the terminal.
    pub fn new(config: Config, image: RgbaImage) -> Self {
        let logo = MovingLogo::new(
            image,
            config.palette.clone(),
            config.motion,
            LogoView::default(),
        )
        .with_mode(config.mode);
        let logo = match config.seed {
            Some(seed) => logo.with_seed(seed),
            None => logo,
        };
        Self {
            config,
            logo,
            screen: Screen::new(0, 0),
        }
    }

    pub fn logo(&self) -> &MovingLogo<LogoView> {
        &self.logo
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Picks the first color, fits the logo to the terminal and drops it somewhere random.
    pub fn start(&mut self, columns: u16, rows: u16) {
        self.logo.next_color();
        self.resize(columns, rows);
        self.logo.place_in_random_spot();
    }

    /// Refits the screen and the logo to a terminal of `columns` x `rows` characters.
    pub fn resize(&mut self, columns: u16, rows: u16) {
        let (width, height) = cells_to_pixels(columns, rows);
        info!("terminal is {columns}x{rows}, {width}x{height} pixels");
        self.screen = Screen::new(width, height);
        self.logo.rescale(
            Rect::new(0.0, 0.0, width as f64, height as f64),
            self.config.scale,
        );
    }

    /// Advances the animation by one frame.
    pub fn tick(&mut self) {
        self.logo.animate();
    }

    /// Redraws the screen from the logo's current state.
    pub fn draw(&mut self) {
        self.screen.clear();
        self.logo.listener_mut().draw(&mut self.screen);
    }

    pub fn handle(&mut self, event: Event) -> ControlFlow<()> {
        debug!("event: {event:?}");
        match event {
            Event::Quit => return ControlFlow::Break(()),
            Event::NextMode => self.logo.next_mode(),
            Event::NextColor => self.logo.next_color(),
            Event::RandomSpot => self.logo.place_in_random_spot(),
            Event::Resize { columns, rows } => self.resize(columns, rows),
        }
        ControlFlow::Continue(())
    }

    /// Takes over the terminal and animates until asked to quit.
    ///
    /// Input is polled until the next frame is due, so ticks arrive one at a time at
    /// the configured rate while key presses and resizes are still handled promptly.
    pub fn run(&mut self) -> Result<()> {
        let (columns, rows) = terminal::size()?;
        let mut session = TerminalSession::enter(io::stdout())?;
        self.start(columns, rows);

        let interval = self.config.frame_interval();
        let mut next_frame = Instant::now();
        loop {
            let timeout = next_frame.saturating_duration_since(Instant::now());
            if term_event::poll(timeout)? {
                if let Some(event) = Event::from_crossterm_event(term_event::read()?) {
                    if self.handle(event).is_break() {
                        info!("quitting");
                        return Ok(());
                    }
                }
                continue;
            }

            self.tick();
            self.draw();
            self.screen
                .render(&mut session.out, self.config.color_mode)?;
            session.out.flush()?;

            next_frame += interval;
            let now = Instant::now();
            if next_frame < now {
                // fell behind, e.g. after a suspend; don't try to catch up
                next_frame = now + interval;
            }
        }
    }
}
