//! Display interface using I2C
//!
//! Owns the bus handle and knows the controller's wire framing: one control
//! byte per transaction segment, then command or data payload. Everything
//! above this layer deals in whole commands and whole pages.

use display_interface::DisplayError;
use embedded_hal::i2c::I2c;

use crate::cmd::Cmd;
use crate::flag::Flag;
use crate::framebuffer::PageSink;

/// I2C connection to an SSD1306 controller.
pub struct DisplayInterface<I2C> {
    /// I2C bus handle
    i2c: I2C,
    /// 7-bit device address
    address: u8,
}

impl<I2C> DisplayInterface<I2C> {
    /// Wrap a bus handle for the controller at `address`.
    pub fn new(i2c: I2C, address: u8) -> Self {
        DisplayInterface { i2c, address }
    }

    /// Give the bus handle back.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> DisplayInterface<I2C> {
    /// Send a stream of command bytes in a single bus transaction.
    pub(crate) fn cmds(&mut self, commands: &[u8]) -> Result<(), DisplayError> {
        let mut payload = Vec::with_capacity(commands.len() + 1);
        payload.push(Flag::CONTROL_CMD_STREAM);
        payload.extend_from_slice(commands);

        match self.i2c.write(self.address, &payload) {
            Ok(()) => Ok(()),
            Err(e) => {
                log::error!("I2C write error for command stream {:02X?}: {:?}", commands, e);
                Err(DisplayError::BusWriteError)
            }
        }
    }
}

impl<I2C: I2c> PageSink for DisplayInterface<I2C> {
    /// One transaction per page: select the page start address, switch to
    /// the data stream, then the column bytes.
    fn send_page(&mut self, index: usize, data: &[u8]) -> Result<(), DisplayError> {
        debug_assert!(index < 0x10);

        let mut payload = Vec::with_capacity(data.len() + 3);
        payload.push(Flag::CONTROL_CMD_SINGLE);
        payload.push(Cmd::PAGE_START | index as u8);
        payload.push(Flag::CONTROL_DATA_STREAM);
        payload.extend_from_slice(data);

        match self.i2c.write(self.address, &payload) {
            Ok(()) => Ok(()),
            Err(e) => {
                log::error!("I2C write error for page {}: {:?}", index, e);
                Err(DisplayError::BusWriteError)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    #[test]
    fn command_stream_framing() {
        let expectations = [I2cTransaction::write(
            0x3C,
            vec![Flag::CONTROL_CMD_STREAM, Cmd::SET_CONTRAST, 0x7F],
        )];
        let mut i2c = I2cMock::new(&expectations);
        {
            let mut interface = DisplayInterface::new(&mut i2c, 0x3C);
            interface.cmds(&[Cmd::SET_CONTRAST, 0x7F]).unwrap();
        }
        i2c.done();
    }

    #[test]
    fn page_framing_selects_page_then_streams_data() {
        let expectations = [I2cTransaction::write(
            0x3D,
            vec![
                Flag::CONTROL_CMD_SINGLE,
                Cmd::PAGE_START | 0x02,
                Flag::CONTROL_DATA_STREAM,
                0xAA,
                0x55,
                0x00,
                0xFF,
            ],
        )];
        let mut i2c = I2cMock::new(&expectations);
        {
            let mut interface = DisplayInterface::new(&mut i2c, 0x3D);
            interface.send_page(2, &[0xAA, 0x55, 0x00, 0xFF]).unwrap();
        }
        i2c.done();
    }

    #[test]
    fn bus_failure_maps_to_bus_write_error() {
        let expectations = [I2cTransaction::write(0x3C, vec![Flag::CONTROL_CMD_STREAM, Cmd::DISPLAY_ON])
            .with_error(embedded_hal::i2c::ErrorKind::Other)];
        let mut i2c = I2cMock::new(&expectations);
        {
            let mut interface = DisplayInterface::new(&mut i2c, 0x3C);
            let err = interface.cmds(&[Cmd::DISPLAY_ON]).unwrap_err();
            assert!(matches!(err, DisplayError::BusWriteError));
        }
        i2c.done();
    }
}
