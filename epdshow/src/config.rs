/// Configuration module for epdshow
/// Wiring of the panel and run options, all keys optional.
use serde::Deserialize;
use serde_piecewise_default::DeserializePiecewiseDefault;
use std::fs;
use std::path::PathBuf;

use crate::error::{ParseConfig, ReadConfig, Result, ResultExt};
use epd::Wiring;

/// Configuration file structure
#[derive(DeserializePiecewiseDefault, Debug, PartialEq)]
pub struct ShowConfig {
    pub spi_device: PathBuf,
    pub spi_speed: u32,
    pub rst_pin: u64,
    pub dc_pin: u64,
    pub busy_pin: u64,
    /// Put the panel in deep sleep after the refresh
    pub sleep_after: bool,
}

// Waveshare HAT wiring
impl Default for ShowConfig {
    fn default() -> Self {
        let w = Wiring::default();
        ShowConfig {
            spi_device: w.spi_device,
            spi_speed: w.spi_speed,
            rst_pin: w.rst_pin,
            dc_pin: w.dc_pin,
            busy_pin: w.busy_pin,
            sleep_after: true,
        }
    }
}

impl ShowConfig {
    pub fn load(cfile: &PathBuf) -> Result<ShowConfig> {
        let yml = fs::read_to_string(cfile).context(ReadConfig { filename: cfile })?;
        Self::parse(&yml).context(ParseConfig { filename: cfile })
    }

    fn parse(yml: &str) -> std::result::Result<ShowConfig, serde_yaml::Error> {
        // serde_yaml rejects an empty document
        if yml.trim().is_empty() {
            return Ok(ShowConfig::default());
        }
        serde_yaml::from_str(yml)
    }

    pub fn wiring(&self) -> Wiring {
        Wiring {
            spi_device: self.spi_device.clone(),
            spi_speed: self.spi_speed,
            rst_pin: self.rst_pin,
            dc_pin: self.dc_pin,
            busy_pin: self.busy_pin,
        }
    }
}
