//! Command line arguments and the validated configuration built from them.

use std::{path::PathBuf, time::Duration};

use clap::{Parser, ValueEnum};
use image::RgbaImage;

use crate::{
    color::ColorMode,
    error::{Error, Result},
    logo::{MoveMode, Motion},
    tint::{Palette, Rgb},
};

/// The logo shipped with the binary.
const BUNDLED_LOGO: &[u8] = include_bytes!("../assets/dvd_logo.png");

/// Which color escapes to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// 24-bit color if `COLORTERM` says so, 256 colors otherwise
    #[default]
    Auto,
    Truecolor,
    Ansi256,
}

/// A bouncing logo screensaver for your terminal.
///
/// Keys: `m` switches the movement mode, `c` the color, `r` jumps to a random spot,
/// `q` or `Esc` quits.
#[derive(Debug, Parser)]
#[command(name = "dvdsaver", version, about)]
pub struct Args {
    /// Image to bounce instead of the bundled logo; its alpha channel gives the shape
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// The logo is as wide as the screen diagonal divided by this
    #[arg(long, default_value_t = 6.0)]
    pub scale: f64,

    /// Pixels moved per time unit
    #[arg(long, default_value_t = 2.0)]
    pub speed: f64,

    /// Frames per second
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Length of one time unit in milliseconds
    #[arg(long, default_value_t = 10.0)]
    pub time_unit_ms: f64,

    /// Movement mode to start in
    #[arg(long, value_enum, default_value_t = MoveMode::Normal)]
    pub mode: MoveMode,

    /// Comma separated `#rrggbb` colors to cycle through
    #[arg(long, value_delimiter = ',')]
    pub palette: Vec<Rgb>,

    /// Color escapes to emit
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Seed for random placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file; `RUST_LOG` controls the level
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Where the logo image comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogoSource {
    #[default]
    Bundled,
    File(PathBuf),
}

impl LogoSource {
    /// Reads and decodes the logo.
    pub fn load(&self) -> Result<RgbaImage> {
        let image = match self {
            LogoSource::Bundled => image::load_from_memory(BUNDLED_LOGO)?,
            LogoSource::File(path) => image::open(path)?,
        }
        .to_rgba8();
        if image.width() == 0 || image.height() == 0 {
            return Err(Error::config("the logo image is empty"));
        }
        Ok(image)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub logo: LogoSource,
    pub scale: f64,
    pub motion: Motion,
    pub fps: u32,
    pub mode: MoveMode,
    pub palette: Palette,
    pub color_mode: ColorMode,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logo: LogoSource::Bundled,
            scale: 6.0,
            motion: Motion::default(),
            fps: 60,
            mode: MoveMode::Normal,
            palette: Palette::default(),
            color_mode: ColorMode::TrueColor,
            seed: None,
            log_file: None,
        }
    }
}

impl TryFrom<Args> for Config {
    type Error = Error;

    fn try_from(args: Args) -> Result<Self> {
        if !(args.scale.is_finite() && args.scale > 0.0) {
            return Err(Error::config(format!(
                "scale must be positive, got {}",
                args.scale
            )));
        }
        if !(args.speed.is_finite() && args.speed >= 0.0) {
            return Err(Error::config(format!(
                "speed must not be negative, got {}",
                args.speed
            )));
        }
        if !(1..=1000).contains(&args.fps) {
            return Err(Error::config(format!(
                "fps must be between 1 and 1000, got {}",
                args.fps
            )));
        }
        if !(args.time_unit_ms.is_finite() && args.time_unit_ms > 0.0) {
            return Err(Error::config(format!(
                "time unit must be positive, got {}",
                args.time_unit_ms
            )));
        }

        let palette = if args.palette.is_empty() {
            Palette::default()
        } else {
            Palette::new(args.palette)?
        };
        let color_mode = match args.color {
            ColorChoice::Auto => ColorMode::detect(),
            ColorChoice::Truecolor => ColorMode::TrueColor,
            ColorChoice::Ansi256 => ColorMode::Ansi256,
        };

        Ok(Self {
            logo: args.image.map_or(LogoSource::Bundled, LogoSource::File),
            scale: args.scale,
            motion: Motion {
                speed: args.speed,
                time_unit: Duration::from_secs_f64(args.time_unit_ms / 1000.0),
            },
            fps: args.fps,
            mode: args.mode,
            palette,
            color_mode,
            seed: args.seed,
            log_file: args.log_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn parse(args: &[&str]) -> Result<Config> {
        let args = Args::try_parse_from(std::iter::once("dvdsaver").chain(args.iter().copied()))
            .map_err(|e| Error::config(e.to_string()))?;
        Config::try_from(args)
    }

    #[test]
    fn defaults() {
        let config = parse(&["--color", "truecolor"]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.frame_interval(), Duration::from_nanos(16_666_666));
    }

    #[test]
    fn everything() {
        let config = parse(&[
            "--image",
            "logo.png",
            "--scale",
            "4",
            "--speed",
            "3.5",
            "--fps",
            "30",
            "--time-unit-ms",
            "20",
            "--mode",
            "opposite",
            "--palette",
            "#ff0000,#00ff00",
            "--color",
            "ansi256",
            "--seed",
            "42",
            "--log-file",
            "saver.log",
        ])
        .unwrap();
        assert_eq!(config.logo, LogoSource::File("logo.png".into()));
        assert_eq!(config.scale, 4.0);
        assert_eq!(config.motion.speed, 3.5);
        assert_eq!(config.motion.time_unit, Duration::from_millis(20));
        assert_eq!(config.fps, 30);
        assert_eq!(config.mode, MoveMode::Opposite);
        assert_eq!(
            config.palette.colors(),
            &[Rgb::new(255, 0, 0), Rgb::new(0, 255, 0)]
        );
        assert_eq!(config.color_mode, ColorMode::Ansi256);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.log_file, Some("saver.log".into()));
    }

    #[rstest]
    #[case(&["--scale", "0"])]
    #[case(&["--scale", "-2"])]
    #[case(&["--speed", "-1"])]
    #[case(&["--fps", "0"])]
    #[case(&["--time-unit-ms", "0"])]
    #[case(&["--palette", "#12345"])]
    #[case(&["--mode", "all-corners"])]
    fn rejected(#[case] args: &[&str]) {
        assert!(matches!(parse(args), Err(Error::Config(_))));
    }

    #[test]
    fn bundled_logo_loads() {
        let logo = LogoSource::Bundled.load().unwrap();
        assert_eq!(logo.dimensions(), (96, 48));
        // transparent background, opaque letters
        assert_eq!(logo.get_pixel(0, 0)[3], 0);
        assert!(logo.pixels().any(|p| p[3] == 255));
    }

    #[test]
    fn missing_logo_file() {
        let source = LogoSource::File("this/does/not/exist.png".into());
        assert!(matches!(source.load(), Err(Error::Image(_))));
    }
}
