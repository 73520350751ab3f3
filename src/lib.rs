//! SSD1306 OLED framebuffer driver
//!
//! Keeps an off-device, byte-per-pixel framebuffer, composites bitmaps and
//! 8x8 glyph text into it with edge clipping, and serializes the result into
//! the controller's bit-packed, page-addressed wire format over I2C.
//!
//! The SSD1306 is page addressed: the display RAM is organised in
//! 8-pixel-tall horizontal strips ("pages"), one bit per pixel, one column
//! per byte. The framebuffer deliberately uses a whole byte per pixel so
//! that clipping arithmetic stays plain byte arithmetic; the transpose into
//! page format is paid once per frame in [`Framebuffer::serialize_to`].
//!
//! ### Usage
//!
//! 1. create a [`Framebuffer`] matching the display [`Config`]
//! 1. each frame: [`Framebuffer::clear`], then composite content with
//!    [`Framebuffer::blit_bitmap`] and [`Framebuffer::blit_text`]
//! 1. send the frame to the controller with [`Ssd1306::draw`]
//!
//! Drawing coordinates may lie anywhere on the integer plane; everything is
//! clipped against the buffer edges, never rejected.
#![deny(missing_docs)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

use core::fmt;

use display_interface::DisplayError;

pub mod cmd;
pub mod config;
pub mod driver;
pub mod flag;
pub mod font;
pub mod framebuffer;
pub mod interface;

pub use crate::config::Config;
pub use crate::driver::Ssd1306;
pub use crate::framebuffer::{Framebuffer, PageSink};
pub use crate::interface::DisplayInterface;

/// Height in pixels of one display page. The controller packs this many
/// vertically stacked rows into each byte of a page.
pub const PAGE_HEIGHT: usize = 8;

/// Errors surfaced by buffer creation and the transmission path.
///
/// Clipped or out-of-bounds drawing is never an error; only configuration,
/// allocation, and bus failures are.
#[derive(Debug, Clone)]
pub enum Error {
    /// Dimensions are unusable: `rows` must be a positive multiple of
    /// [`PAGE_HEIGHT`] and `cols` must be positive.
    InvalidDimensions {
        /// Offending height in pixels.
        rows: usize,
        /// Offending width in pixels.
        cols: usize,
    },
    /// Framebuffer memory could not be obtained.
    Allocation,
    /// The bus transport reported a failure. Nothing is retried and
    /// partially sent frames are not rolled back.
    Bus(DisplayError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDimensions { rows, cols } => write!(
                f,
                "invalid display dimensions {rows}x{cols}: rows must be a positive multiple of {PAGE_HEIGHT}, cols must be positive"
            ),
            Error::Allocation => write!(f, "framebuffer allocation failed"),
            Error::Bus(e) => write!(f, "display bus error: {e:?}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Error::Bus(e)
    }
}
