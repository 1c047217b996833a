//! Wire interface of the panel: SPI for bytes, three gpio lines for control.
//!
use spidev::{SpiModeFlags, Spidev, SpidevOptions};
use std::io::Write;
use std::path::PathBuf;
use std::thread::sleep;
use std::time::Duration;
use sysfs_gpio::{Direction, Pin};

use crate::error::{Gpio, Result, ResultExt, SpiOpen, SpiWrite};

/// Largest single spidev transfer (kernel default bufsiz)
const SPI_CHUNK: usize = 4096;
/// Reset pulse length, low and high phases
const RESET_MS: u64 = 200;
/// Busy line poll period
const BUSY_POLL_MS: u64 = 100;
/// Settle time after exporting pins, udev needs it to fix permissions
const EXPORT_SETTLE_MS: u64 = 100;

/// Operations the panel drivers need from the wire
pub trait Interface {
    /// Send a command byte (DC low)
    fn command(&mut self, cmd: u8) -> Result<()>;
    /// Send data bytes (DC high)
    fn data(&mut self, data: &[u8]) -> Result<()>;
    /// Hardware reset through the RST line
    fn reset(&mut self) -> Result<()>;
    /// Block until the panel releases the busy line
    fn wait_until_idle(&mut self) -> Result<()>;
    /// Plain pause between steps of a sequence
    fn delay_ms(&mut self, ms: u64) {
        sleep(Duration::from_millis(ms));
    }

    /// Command followed by its parameters
    fn command_with_data(&mut self, cmd: u8, data: &[u8]) -> Result<()> {
        self.command(cmd)?;
        self.data(data)
    }
}

/// Wiring of the panel on a Linux SBC. Pins use kernel (BCM) numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wiring {
    /// spidev node, chip select is handled by the controller
    pub spi_device: PathBuf,
    /// SPI clock in Hz
    pub spi_speed: u32,
    pub rst_pin: u64,
    pub dc_pin: u64,
    pub busy_pin: u64,
}

/// Waveshare e-paper HAT defaults
impl Default for Wiring {
    fn default() -> Self {
        Wiring {
            spi_device: PathBuf::from("/dev/spidev0.0"),
            spi_speed: 2_000_000,
            rst_pin: 17,
            dc_pin: 25,
            busy_pin: 24,
        }
    }
}

/// spidev + sysfs gpio interface
pub struct LinuxInterface {
    spi: Spidev,
    rst: Pin,
    dc: Pin,
    busy: Pin,
}

impl LinuxInterface {
    /// Open the spi device and export the control pins
    pub fn open(wiring: &Wiring) -> Result<Self> {
        let mut spi = Spidev::open(&wiring.spi_device).context(SpiOpen {
            dev: &wiring.spi_device,
        })?;
        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(wiring.spi_speed)
            .mode(SpiModeFlags::SPI_MODE_0)
            .build();
        spi.configure(&options).context(SpiOpen {
            dev: &wiring.spi_device,
        })?;
        debug!(
            "SPI {} configured at {}Hz",
            wiring.spi_device.display(),
            wiring.spi_speed
        );

        let rst = Self::export(wiring.rst_pin, Direction::Out)?;
        let dc = Self::export(wiring.dc_pin, Direction::Out)?;
        let busy = Self::export(wiring.busy_pin, Direction::In)?;
        Ok(LinuxInterface { spi, rst, dc, busy })
    }

    fn export(num: u64, dir: Direction) -> Result<Pin> {
        let pin = Pin::new(num);
        pin.export().context(Gpio { pin: num })?;
        sleep(Duration::from_millis(EXPORT_SETTLE_MS));
        pin.set_direction(dir).context(Gpio { pin: num })?;
        trace!("Exported gpio {}", num);
        Ok(pin)
    }

    #[inline]
    fn set(pin: &Pin, value: u8) -> Result<()> {
        pin.set_value(value).context(Gpio {
            pin: pin.get_pin_num(),
        })
    }

    fn write(&mut self, buff: &[u8]) -> Result<()> {
        for chunk in buff.chunks(SPI_CHUNK) {
            self.spi.write_all(chunk).context(SpiWrite)?;
        }
        Ok(())
    }
}

impl Interface for LinuxInterface {
    fn command(&mut self, cmd: u8) -> Result<()> {
        trace!("CMD 0x{:02X}", cmd);
        Self::set(&self.dc, 0)?;
        self.write(&[cmd])
    }

    fn data(&mut self, data: &[u8]) -> Result<()> {
        if data.len() <= 8 {
            let u: Vec<String> = data.iter().map(|b| format!("{:02X}", b)).collect();
            trace!("DATA {}", u.join(" "));
        } else {
            trace!("DATA {} bytes", data.len());
        }
        Self::set(&self.dc, 1)?;
        self.write(data)
    }

    fn reset(&mut self) -> Result<()> {
        Self::set(&self.rst, 0)?;
        self.delay_ms(RESET_MS);
        Self::set(&self.rst, 1)?;
        self.delay_ms(RESET_MS);
        Ok(())
    }

    fn wait_until_idle(&mut self) -> Result<()> {
        let num = self.busy.get_pin_num();
        // BUSY reads 0 while the panel works
        while self.busy.get_value().context(Gpio { pin: num })? == 0 {
            self.delay_ms(BUSY_POLL_MS);
        }
        Ok(())
    }
}

/// Release the pins so the next run can export them again
impl Drop for LinuxInterface {
    fn drop(&mut self) {
        for pin in &[&self.rst, &self.dc, &self.busy] {
            let _ = pin.unexport();
        }
    }
}
