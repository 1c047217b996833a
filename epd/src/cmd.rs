//! Controller command set of the 5.83" black/red panel.
//! Only the commands used by the init/refresh/sleep sequences are listed.

pub const PANEL_SETTING: u8 = 0x00;
pub const POWER_SETTING: u8 = 0x01;
pub const POWER_OFF: u8 = 0x02;
pub const POWER_ON: u8 = 0x04;
pub const BOOSTER_SOFT_START: u8 = 0x06;
pub const DEEP_SLEEP: u8 = 0x07;
pub const DATA_START_TRANSMISSION_1: u8 = 0x10;
pub const DISPLAY_REFRESH: u8 = 0x12;
pub const PLL_CONTROL: u8 = 0x30;
pub const TEMPERATURE_CALIBRATION: u8 = 0x41;
pub const VCOM_AND_DATA_INTERVAL_SETTING: u8 = 0x50;
pub const TCON_SETTING: u8 = 0x60;
pub const TCON_RESOLUTION: u8 = 0x61;
pub const VCM_DC_SETTING: u8 = 0x82;
pub const FLASH_MODE: u8 = 0xE5;

/// Check code required by DEEP_SLEEP
pub const DEEP_SLEEP_CHECK: u8 = 0xA5;

// Pixel codes, 4 bits per pixel on the wire
pub const PIXEL_BLACK: u8 = 0x00;
pub const PIXEL_WHITE: u8 = 0x03;
pub const PIXEL_RED: u8 = 0x04;
