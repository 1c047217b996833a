/// Crates
#[macro_use]
extern crate log;

use ansi_term::Colour::{Green, Red};
use clap::{App, Arg, ArgMatches, ErrorKind};
use epd::{Epd, Epd5in83b};
use log::Level;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::exit;

// Modules declaration
mod config;
mod error;
mod show;

use crate::config::ShowConfig;
use crate::error::{Driver, Result, ResultExt};
use crate::show::{load_image, show, Channel, Planes};

// Constant
const VERSION: &'static str = env!("CARGO_PKG_VERSION");

/// One parsed invocation
#[derive(Debug, PartialEq)]
struct Invocation {
    image: PathBuf,
    channel: Channel,
    config: Option<PathBuf>,
    no_sleep: bool,
    quiet: bool,
    verbose: bool,
}

impl Invocation {
    fn log_level(&self) -> Level {
        if self.quiet {
            Level::Error
        } else if self.verbose {
            Level::Debug
        } else {
            Level::Info
        }
    }
}

fn app() -> App<'static, 'static> {
    App::new("epdshow")
        .version(VERSION)
        .author("boros")
        .about("Show an image on the 600x448 black/red e-paper panel")
        .args_from_usage(
            "-c, --config=[config]  'YAML file with the panel wiring'
             -n, --no-sleep         'Leave the panel powered after the refresh'
             -q, --quiet            'Only report errors'
             -v, --verbose          'Verbose log'
             <IMAGE>                'Image file, must be 600x448'",
        )
        .arg(
            Arg::with_name("CHANNEL")
                .help("Color plane for the image")
                .required(true)
                .possible_values(&Channel::NAMES),
        )
}

fn invocation(m: &ArgMatches) -> Invocation {
    Invocation {
        // clap enforces both positionals and the channel literals
        image: PathBuf::from(m.value_of_os("IMAGE").unwrap_or_default()),
        channel: m
            .value_of("CHANNEL")
            .and_then(|c| c.parse().ok())
            .unwrap_or(Channel::Black),
        config: m.value_of_os("config").map(PathBuf::from),
        no_sleep: m.is_present("no-sleep"),
        quiet: m.is_present("quiet"),
        verbose: m.is_present("verbose"),
    }
}

fn parse_args<I, T>(args: I) -> std::result::Result<Invocation, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = app().get_matches_from_safe(args)?;
    Ok(invocation(&matches))
}

fn run(inv: &Invocation) -> Result<()> {
    let cfg = match &inv.config {
        Some(path) => ShowConfig::load(path)?,
        None => ShowConfig::default(),
    };
    debug!("Using {:?}", cfg);

    let image = load_image(&inv.image)?;
    let mut epd = Epd5in83b::open(&cfg.wiring()).context(Driver)?;
    let planes = Planes::assign(image, inv.channel, epd.width(), epd.height());
    info!(
        "Showing {} on the {} channel",
        inv.image.display(),
        inv.channel
    );
    show(&mut epd, &planes, cfg.sleep_after && !inv.no_sleep)
}

fn show_error(e: &dyn std::error::Error) -> ! {
    eprintln!("{} => {}", Red.paint("ERROR"), e);
    exit(1);
}

fn show_success(msg: &str, quiet: bool) -> ! {
    if !quiet {
        println!("{} => {}", Green.paint("SUCCESS"), msg);
    }
    exit(0);
}

fn main() {
    let inv = match parse_args(std::env::args_os()) {
        Ok(inv) => inv,
        Err(e) => match e.kind {
            ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => e.exit(),
            _ => {
                eprintln!("{}", e.message);
                exit(1);
            }
        },
    };

    // Init log
    if let Err(e) = simple_logger::init_with_level(inv.log_level()) {
        eprintln!("Logger not available: {}", e);
    }

    match run(&inv) {
        Ok(()) => show_success(
            &format!("{} shown on {} channel", inv.image.display(), inv.channel),
            inv.quiet,
        ),
        Err(e) => show_error(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_black() {
        let inv = parse_args(vec!["epdshow", "photo.png", "black"]).unwrap();
        assert_eq!(inv.image, PathBuf::from("photo.png"));
        assert_eq!(inv.channel, Channel::Black);
        assert_eq!(inv.config, None);
        assert!(!inv.no_sleep);
        assert_eq!(inv.log_level(), Level::Info);
    }

    #[test]
    fn parse_red_with_options() {
        let inv = parse_args(vec![
            "epdshow", "-c", "panel.yml", "-n", "-v", "photo.png", "red",
        ])
        .unwrap();
        assert_eq!(inv.channel, Channel::Red);
        assert_eq!(inv.config, Some(PathBuf::from("panel.yml")));
        assert!(inv.no_sleep);
        assert_eq!(inv.log_level(), Level::Debug);
    }

    #[test]
    fn quiet_wins_over_verbose() {
        let inv = parse_args(vec!["epdshow", "-q", "-v", "photo.png", "red"]).unwrap();
        assert_eq!(inv.log_level(), Level::Error);
    }

    #[test]
    fn missing_channel_is_usage_error() {
        let e = parse_args(vec!["epdshow", "photo.png"]).unwrap_err();
        assert_eq!(e.kind, ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn no_arguments_is_usage_error() {
        let e = parse_args(vec!["epdshow"]).unwrap_err();
        assert_eq!(e.kind, ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn unknown_channel_is_rejected() {
        let e = parse_args(vec!["epdshow", "photo.png", "blue"]).unwrap_err();
        assert_eq!(e.kind, ErrorKind::InvalidValue);
        let e = parse_args(vec!["epdshow", "photo.png", "RED"]).unwrap_err();
        assert_eq!(e.kind, ErrorKind::InvalidValue);
    }
}
