//! Control bytes and flag values for the SSD1306 I2C protocol.
//!
//! Every I2C transaction starts with a control byte: bit 7 (Co) marks a
//! single command follow-up, bit 6 (D/C#) selects data versus command for
//! the rest of the stream.

/// Flag values and control bytes for the SSD1306 controller.
pub struct Flag;

#[allow(missing_docs)]
impl Flag {
    // Control bytes
    pub const CONTROL_CMD_SINGLE: u8 = 0x80; // one command byte follows, more control bytes after
    pub const CONTROL_CMD_STREAM: u8 = 0x00; // everything that follows is commands
    pub const CONTROL_DATA_STREAM: u8 = 0x40; // everything that follows is display RAM data

    // Charge Pump Setting (0x8D) flags
    pub const CHARGE_PUMP_ENABLE: u8 = 0x14;
    pub const CHARGE_PUMP_DISABLE: u8 = 0x10;
}
