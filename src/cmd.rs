//! SSD1306 command bytes used by this driver.

/// Command constants for the SSD1306 controller.
pub struct Cmd;

#[allow(missing_docs)]
impl Cmd {
    // Init
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const SET_SEGMENT_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_MODE: u8 = 0xC8;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const DISPLAY_OFF: u8 = 0xAE;

    // Per-frame
    pub const SET_CONTRAST: u8 = 0x81;

    /// OR the page index into the low nibble to address pages 0..=15.
    pub const PAGE_START: u8 = 0xB0;
}

/*
Datasheet command set used by this driver:
0x81 - Set Contrast Control
0x8D - Charge Pump Setting
0xA1 - Set Segment Re-map (column 127 mapped to SEG0)
0xAE - Display OFF
0xAF - Display ON
0xC8 - Set COM Output Scan Direction (remapped)
0xB0..0xB7 - Set Page Start Address for page addressing mode
*/
