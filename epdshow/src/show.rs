///! Show module
/// Builds the black/red planes from the user image and hands them to a driver
use epd::Epd;
use image::{DynamicImage, GrayImage, Luma};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Driver, ImageLoad, Result, ResultExt};

/// Luma of a pixel with no ink
const CLEAR: u8 = 255;

/// Color plane the user image goes to
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Channel {
    Black,
    Red,
}

impl Channel {
    pub const NAMES: [&'static str; 2] = ["red", "black"];
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "black" => Ok(Channel::Black),
            "red" => Ok(Channel::Red),
            other => Err(format!("unknown channel '{}', use red or black", other)),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Black => write!(f, "black"),
            Channel::Red => write!(f, "red"),
        }
    }
}

/// The two images after channel assignment.
/// One of them is always the blank placeholder.
#[derive(Debug, Clone)]
pub struct Planes {
    pub black: DynamicImage,
    pub red: DynamicImage,
}

impl Planes {
    /// Put `image` on `channel` and a blank `width`x`height` image on the other one
    pub fn assign(image: DynamicImage, channel: Channel, width: u32, height: u32) -> Planes {
        let blank = blank_image(width, height);
        match channel {
            Channel::Black => Planes { black: image, red: blank },
            Channel::Red => Planes { black: blank, red: image },
        }
    }
}

/// Image with every pixel clear
pub fn blank_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([CLEAR])))
}

pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let img = image::open(path).context(ImageLoad { filename: path })?;
    debug!(
        "Loaded {} ({}x{})",
        path.display(),
        img.width(),
        img.height()
    );
    Ok(img)
}

/// Push the planes to the panel: init, convert both planes, display.
/// With `sleep` the panel goes to deep sleep afterwards.
pub fn show<D: Epd>(epd: &mut D, planes: &Planes, sleep: bool) -> Result<()> {
    epd.init().context(Driver)?;
    let black = epd.get_frame_buffer(&planes.black).context(Driver)?;
    let red = epd.get_frame_buffer(&planes.red).context(Driver)?;
    epd.display_frame(&black, &red).context(Driver)?;
    if sleep {
        epd.sleep().context(Driver)?;
    }
    Ok(())
}
