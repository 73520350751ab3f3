//! SSD1306 display driver
//!
//! High-level operations on one display instance: the power-on command
//! sequence, device RAM clear, contrast, and per-frame transmission of a
//! composited [`Framebuffer`]. All bus traffic goes through the
//! [`DisplayInterface`]; this module decides *what* to send, never how.
//!
//! Per-frame flow is clear, composite, [`Ssd1306::draw`]. Transmission is
//! blocking, with no retry and no mid-frame cancellation: a frame is sent
//! to completion or the error is handed to the render loop, which decides
//! whether to skip, redraw, or abort.

use display_interface::DisplayError;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;

use crate::cmd::Cmd;
use crate::config::Config;
use crate::flag::Flag;
use crate::framebuffer::{Framebuffer, PageSink};
use crate::interface::DisplayInterface;
use crate::Error;

/// Driver for one SSD1306 controller on an I2C bus.
pub struct Ssd1306<I2C> {
    interface: DisplayInterface<I2C>,
    config: Config,
}

impl<I2C: I2c> Ssd1306<I2C> {
    /// Create a driver for the display described by `config`.
    ///
    /// Validates the configuration but does not touch the bus; call
    /// [`Ssd1306::init`] before the first frame.
    pub fn new(i2c: I2C, config: Config) -> Result<Self, Error> {
        config.validate()?;
        Ok(Ssd1306 {
            interface: DisplayInterface::new(i2c, config.address),
            config,
        })
    }

    /// The configuration this driver was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Allocate a framebuffer matching this display's dimensions.
    pub fn framebuffer(&self) -> Result<Framebuffer, Error> {
        Framebuffer::with_config(&self.config)
    }

    /// Run the power-on command sequence: charge pump on, reversed
    /// left-right and up-bottom mapping, display on.
    pub fn init(&mut self) -> Result<(), Error> {
        let result = self.interface.cmds(&[
            Cmd::SET_CHARGE_PUMP,
            Flag::CHARGE_PUMP_ENABLE,
            Cmd::SET_SEGMENT_REMAP,  // reverse left-right mapping
            Cmd::SET_COM_SCAN_MODE,  // reverse up-bottom mapping
            Cmd::DISPLAY_ON,
        ]);
        match result {
            Ok(()) => {
                log::info!("OLED configured successfully");
                Ok(())
            }
            Err(e) => {
                log::error!("OLED configuration failed: {:?}", e);
                Err(e.into())
            }
        }
    }

    /// Zero the controller's display RAM, page by page, independent of any
    /// framebuffer contents.
    pub fn clear_device(&mut self) -> Result<(), Error> {
        let zero = vec![0u8; self.config.cols];
        for page in 0..self.config.pages() {
            self.interface.send_page(page, &zero)?;
        }
        Ok(())
    }

    /// Set the display contrast (0x00..=0xFF).
    ///
    /// Side channel outside the per-frame pipeline; safe to call between
    /// frames at any time.
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), Error> {
        self.interface.cmds(&[Cmd::SET_CONTRAST, contrast])?;
        Ok(())
    }

    /// Serialize a framebuffer into pages and transmit them in order.
    ///
    /// The framebuffer must match the configured panel dimensions. On a
    /// bus error, pages already sent stay on the device and may be visibly
    /// stale against the rest of the frame.
    pub fn draw(&mut self, framebuffer: &Framebuffer) -> Result<(), Error> {
        if framebuffer.rows() != self.config.rows || framebuffer.cols() != self.config.cols {
            return Err(Error::InvalidDimensions {
                rows: framebuffer.rows(),
                cols: framebuffer.cols(),
            });
        }
        framebuffer.serialize_to(&mut self.interface)?;
        Ok(())
    }

    /// Give the bus handle back.
    pub fn release(self) -> I2C {
        self.interface.release()
    }
}

impl<I2C> Ssd1306<I2C> {
    /// Pulse the hardware reset line: low for 100 ms, then high.
    ///
    /// The reset pin is not part of the per-frame pipeline, so it is
    /// borrowed only for the pulse instead of being owned by the driver.
    pub fn reset<RST, D>(rst: &mut RST, delay: &mut D) -> Result<(), Error>
    where
        RST: OutputPin,
        D: DelayNs,
    {
        rst.set_low().map_err(|_| Error::Bus(DisplayError::RSError))?;
        delay.delay_ms(100);
        rst.set_high().map_err(|_| Error::Bus(DisplayError::RSError))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    fn small_config() -> Config {
        Config {
            address: 0x3C,
            rows: 16,
            cols: 4,
        }
    }

    #[test]
    fn new_rejects_bad_config() {
        let mut i2c = I2cMock::new(&[]);
        let result = Ssd1306::new(&mut i2c, Config::with_size(10, 128));
        assert!(matches!(
            result.err(),
            Some(Error::InvalidDimensions { rows: 10, cols: 128 })
        ));
        i2c.done();
    }

    #[test]
    fn init_sends_power_on_sequence() {
        let expectations = [I2cTransaction::write(
            0x3C,
            vec![
                Flag::CONTROL_CMD_STREAM,
                Cmd::SET_CHARGE_PUMP,
                Flag::CHARGE_PUMP_ENABLE,
                Cmd::SET_SEGMENT_REMAP,
                Cmd::SET_COM_SCAN_MODE,
                Cmd::DISPLAY_ON,
            ],
        )];
        let mut i2c = I2cMock::new(&expectations);
        {
            let mut display = Ssd1306::new(&mut i2c, Config::default()).unwrap();
            display.init().unwrap();
        }
        i2c.done();
    }

    #[test]
    fn set_contrast_sends_level() {
        let expectations = [I2cTransaction::write(
            0x3C,
            vec![Flag::CONTROL_CMD_STREAM, Cmd::SET_CONTRAST, 0xAB],
        )];
        let mut i2c = I2cMock::new(&expectations);
        {
            let mut display = Ssd1306::new(&mut i2c, Config::default()).unwrap();
            display.set_contrast(0xAB).unwrap();
        }
        i2c.done();
    }

    #[test]
    fn clear_device_zeroes_every_page() {
        let expectations = [
            I2cTransaction::write(
                0x3C,
                vec![
                    Flag::CONTROL_CMD_SINGLE,
                    Cmd::PAGE_START,
                    Flag::CONTROL_DATA_STREAM,
                    0,
                    0,
                    0,
                    0,
                ],
            ),
            I2cTransaction::write(
                0x3C,
                vec![
                    Flag::CONTROL_CMD_SINGLE,
                    Cmd::PAGE_START | 0x01,
                    Flag::CONTROL_DATA_STREAM,
                    0,
                    0,
                    0,
                    0,
                ],
            ),
        ];
        let mut i2c = I2cMock::new(&expectations);
        {
            let mut display = Ssd1306::new(&mut i2c, small_config()).unwrap();
            display.clear_device().unwrap();
        }
        i2c.done();
    }

    #[test]
    fn draw_transmits_serialized_pages() {
        // 16x4 panel, pixel (0, 0) on: page 0 byte 0 carries bit 0.
        let expectations = [
            I2cTransaction::write(
                0x3C,
                vec![
                    Flag::CONTROL_CMD_SINGLE,
                    Cmd::PAGE_START,
                    Flag::CONTROL_DATA_STREAM,
                    0x01,
                    0,
                    0,
                    0,
                ],
            ),
            I2cTransaction::write(
                0x3C,
                vec![
                    Flag::CONTROL_CMD_SINGLE,
                    Cmd::PAGE_START | 0x01,
                    Flag::CONTROL_DATA_STREAM,
                    0,
                    0,
                    0,
                    0,
                ],
            ),
        ];
        let mut i2c = I2cMock::new(&expectations);
        {
            let mut display = Ssd1306::new(&mut i2c, small_config()).unwrap();
            let mut fb = display.framebuffer().unwrap();
            fb.set_pixel(0, 0, true);
            display.draw(&fb).unwrap();
        }
        i2c.done();
    }

    #[test]
    fn draw_rejects_mismatched_framebuffer() {
        let mut i2c = I2cMock::new(&[]);
        {
            let mut display = Ssd1306::new(&mut i2c, small_config()).unwrap();
            let fb = Framebuffer::new(8, 8).unwrap();
            assert!(matches!(
                display.draw(&fb).unwrap_err(),
                Error::InvalidDimensions { rows: 8, cols: 8 }
            ));
        }
        i2c.done();
    }

    #[test]
    fn reset_pulses_the_line() {
        let expectations = [
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ];
        let mut rst = PinMock::new(&expectations);
        Ssd1306::<I2cMock>::reset(&mut rst, &mut NoopDelay::new()).unwrap();
        rst.done();
    }
}
