pub use snafu::{ResultExt, Snafu};
use std::path::PathBuf;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Couldn't read file {}: {}", filename.display(), source))]
    ReadConfig {
        filename: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Invalid config in {}: {}", filename.display(), source))]
    ParseConfig {
        filename: PathBuf,
        source: serde_yaml::Error,
    },
    #[snafu(display("Couldn't load image {}: {}", filename.display(), source))]
    ImageLoad {
        filename: PathBuf,
        source: image::ImageError,
    },
    #[snafu(display("Display driver failed: {}", source))]
    Driver { source: epd::Error },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
