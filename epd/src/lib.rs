//! EPD module for the 600x448 black/red e-paper panel.
//! Converts images into the two 1-bit planes the panel takes and drives the
//! controller through Linux spidev and sysfs gpio.
//!
//! Usage is always the same three steps:
//! 1. `init()` the panel.
//! 2. turn each plane into a [`FrameBuffer`] with `get_frame_buffer()`.
//! 3. `display_frame(black, red)` to transfer and refresh.
//!

#[macro_use]
extern crate log;

use image::DynamicImage;

pub mod cmd;
pub mod epd5in83b;
pub mod error;
pub mod frame;
pub mod interface;

pub use epd5in83b::{Epd5in83b, EPD_HEIGHT, EPD_WIDTH};
pub use error::{Error, Result};
pub use frame::FrameBuffer;
pub use interface::{Interface, LinuxInterface, Wiring};

/// Contract of a two plane (black/red) panel driver
pub trait Epd {
    /// Panel width in pixels
    fn width(&self) -> u32;
    /// Panel height in pixels
    fn height(&self) -> u32;
    /// Reset and configure the controller
    fn init(&mut self) -> Result<()>;
    /// Convert an image of exactly the panel size into a plane
    fn get_frame_buffer(&self, image: &DynamicImage) -> Result<FrameBuffer>;
    /// Transfer both planes and refresh. Blocks until the refresh finishes.
    fn display_frame(&mut self, black: &FrameBuffer, red: &FrameBuffer) -> Result<()>;
    /// Power the panel down into deep sleep, `init()` wakes it again
    fn sleep(&mut self) -> Result<()>;
}
