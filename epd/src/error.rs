pub use snafu::{ensure, ResultExt, Snafu};
use std::path::PathBuf;

/// Error type for the driver
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Couldn't open spi device {}: {}", dev.display(), source))]
    SpiOpen { dev: PathBuf, source: std::io::Error },
    #[snafu(display("Spi transfer failed: {}", source))]
    SpiWrite { source: std::io::Error },
    #[snafu(display("Couldn't drive gpio pin {}: {}", pin, source))]
    Gpio { pin: u64, source: sysfs_gpio::Error },
    #[snafu(display(
        "Image must be same dimensions as display ({}x{}), got {}x{}",
        expected_width,
        expected_height,
        width,
        height
    ))]
    Dimensions {
        width: u32,
        height: u32,
        expected_width: u32,
        expected_height: u32,
    },
    #[snafu(display(
        "Frame buffers must be {} bytes, got black:{} red:{}",
        expected,
        black,
        red
    ))]
    FrameSize {
        expected: usize,
        black: usize,
        red: usize,
    },
}

/// Result type for the module
pub type Result<T, E = Error> = std::result::Result<T, E>;
