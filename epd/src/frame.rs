//! Frame buffers: packed 1-bit planes as the driver expects them.
//!
//! A plane holds one bit per pixel, row major, with the most significant bit
//! being the leftmost pixel of the byte. A set bit is a clear (white) pixel,
//! a cleared bit is ink (black or red depending on the plane).

use image::{DynamicImage, GenericImageView};

use crate::cmd::{PIXEL_BLACK, PIXEL_RED, PIXEL_WHITE};
use crate::error::{ensure, Dimensions, Result};

/// Luma at or above this value is a clear pixel
pub const LUMA_THRESHOLD: u8 = 128;

/// Packed 1-bit plane of a full panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl FrameBuffer {
    /// Plane with every pixel clear
    pub fn clear(width: u32, height: u32) -> Self {
        FrameBuffer {
            width,
            height,
            data: vec![0xFF; Self::size_for(width, height)],
        }
    }

    /// Convert `image` into a plane for a `width`x`height` panel.
    /// The image must match the panel exactly, there is no scaling.
    pub fn from_image(image: &DynamicImage, width: u32, height: u32) -> Result<Self> {
        let (w, h) = image.dimensions();
        ensure!(
            w == width && h == height,
            Dimensions {
                width: w,
                height: h,
                expected_width: width,
                expected_height: height,
            }
        );
        let luma = image.to_luma8();
        let mut data = vec![0x00u8; Self::size_for(width, height)];
        for (x, y, p) in luma.enumerate_pixels() {
            if p[0] >= LUMA_THRESHOLD {
                let idx = (x + y * width) as usize;
                data[idx / 8] |= 0x80 >> (idx % 8);
            }
        }
        Ok(FrameBuffer {
            width,
            height,
            data,
        })
    }

    /// Bytes needed by a plane of the given size
    #[inline]
    pub fn size_for(width: u32, height: u32) -> usize {
        (width as usize * height as usize) / 8
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// true if pixel (x,y) carries no ink
    pub fn is_clear(&self, x: u32, y: u32) -> bool {
        let idx = (x + y * self.width) as usize;
        self.data[idx / 8] & (0x80 >> (idx % 8)) != 0
    }
}

/// Wire code of the pixel at `bit` of the black/red plane bytes.
/// Red ink wins over black ink.
#[inline]
fn pixel_code(black: u8, red: u8, bit: u8) -> u8 {
    if (red >> bit) & 1 == 0 {
        PIXEL_RED
    } else if (black >> bit) & 1 == 0 {
        PIXEL_BLACK
    } else {
        PIXEL_WHITE
    }
}

/// Merge the black and red planes into the controller format:
/// 4 bits per pixel, two pixels per byte, first pixel in the high nibble.
/// Both planes must have the same length.
pub fn pack_pixels(black: &[u8], red: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(black.len() * 4);
    for (&b, &r) in black.iter().zip(red.iter()) {
        for pair in 0..4u8 {
            let first = pixel_code(b, r, 7 - 2 * pair);
            let second = pixel_code(b, r, 6 - 2 * pair);
            out.push((first << 4) | second);
        }
    }
    out
}
