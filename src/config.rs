//! Display configuration
//!
//! Bus address and panel size live in an explicit object rather than
//! compile-time constants, so several display instances (or test doubles)
//! can coexist in one process.

use crate::{Error, PAGE_HEIGHT};

/// Default 7-bit I2C address of SSD1306 modules.
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Bus address and panel dimensions for one display instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// 7-bit I2C address of the controller.
    pub address: u8,
    /// Panel height in pixels; must be a positive multiple of
    /// [`PAGE_HEIGHT`].
    pub rows: usize,
    /// Panel width in pixels; must be positive.
    pub cols: usize,
}

impl Default for Config {
    /// The common 128x64 module at the default address.
    fn default() -> Self {
        Config {
            address: DEFAULT_ADDRESS,
            rows: 64,
            cols: 128,
        }
    }
}

impl Config {
    /// Configuration for a panel of the given size at the default address.
    pub fn with_size(rows: usize, cols: usize) -> Self {
        Config {
            address: DEFAULT_ADDRESS,
            rows,
            cols,
        }
    }

    /// Check the dimension rules; a failure here is a configuration error,
    /// not something to recover from at runtime.
    pub fn validate(&self) -> Result<(), Error> {
        if self.rows == 0 || self.rows % PAGE_HEIGHT != 0 || self.cols == 0 {
            return Err(Error::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    /// Number of display pages the panel is divided into.
    pub fn pages(&self) -> usize {
        self.rows / PAGE_HEIGHT
    }
}
