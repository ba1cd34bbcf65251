//! Errors that can abort the screensaver during setup or while talking to the terminal.
//!
//! The animation itself never fails; everything here comes from the outside world.

use std::io;

use thiserror::Error;

/// Shorthand for results produced by this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The logo could not be read or decoded.
    #[error("failed to load logo image: {0}")]
    Image(#[from] image::ImageError),
    /// Terminal or file I/O failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}
