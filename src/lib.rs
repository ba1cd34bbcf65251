//! # `dvdsaver`
//!
//! `dvdsaver` is a terminal screensaver that bounces a logo around the screen,
//! changing its color every time it touches an edge.
//!
//! The motion itself lives in [`logo::MovingLogo`], which knows nothing about terminals:
//! it reports new positions and recolored images through a [`logo::LogoListener`].
//! The [`saver`] module hosts it inside a terminal, drawing the logo with unicode
//! Braille characters.
pub mod cell;
pub mod clock;
pub mod color;
pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod logo;
pub mod saver;
pub mod screen;
pub mod sprite;
pub mod tint;
pub(crate) mod units;

pub use error::{Error, Result};
