//! Driver for the 5.83" 600x448 black/red panel.
//!
//! The sequences are the fixed ones published by the panel vendor, there is
//! no LUT or waveform handling.
use image::DynamicImage;

use crate::cmd::*;
use crate::error::{ensure, FrameSize, Result};
use crate::frame::{pack_pixels, FrameBuffer};
use crate::interface::{Interface, LinuxInterface, Wiring};
use crate::Epd;

/// Panel width in pixels
pub const EPD_WIDTH: u32 = 600;
/// Panel height in pixels
pub const EPD_HEIGHT: u32 = 448;

/// Pause between the refresh command and the first busy poll
const REFRESH_SETTLE_MS: u64 = 100;

pub struct Epd5in83b<I> {
    interface: I,
}

impl Epd5in83b<LinuxInterface> {
    /// Open the panel on the given wiring. The panel is not initialised here.
    pub fn open(wiring: &Wiring) -> Result<Self> {
        Ok(Self::new(LinuxInterface::open(wiring)?))
    }
}

impl<I: Interface> Epd5in83b<I> {
    pub fn new(interface: I) -> Self {
        Epd5in83b { interface }
    }

    /// Give back the interface
    pub fn release(self) -> I {
        self.interface
    }
}

impl<I: Interface> Epd for Epd5in83b<I> {
    fn width(&self) -> u32 {
        EPD_WIDTH
    }

    fn height(&self) -> u32 {
        EPD_HEIGHT
    }

    fn init(&mut self) -> Result<()> {
        info!("Initializing {}x{} black/red panel", EPD_WIDTH, EPD_HEIGHT);
        let i = &mut self.interface;
        i.reset()?;
        i.command_with_data(POWER_SETTING, &[0x37, 0x00])?;
        i.command_with_data(PANEL_SETTING, &[0xCF, 0x08])?;
        i.command_with_data(BOOSTER_SOFT_START, &[0xC7, 0xCC, 0x28])?;
        i.command(POWER_ON)?;
        i.wait_until_idle()?;
        i.command_with_data(PLL_CONTROL, &[0x3C])?;
        i.command_with_data(TEMPERATURE_CALIBRATION, &[0x00])?;
        i.command_with_data(VCOM_AND_DATA_INTERVAL_SETTING, &[0x77])?;
        i.command_with_data(TCON_SETTING, &[0x22])?;
        // source 600, gate 448
        i.command_with_data(
            TCON_RESOLUTION,
            &[
                (EPD_WIDTH >> 8) as u8,
                (EPD_WIDTH & 0xFF) as u8,
                (EPD_HEIGHT >> 8) as u8,
                (EPD_HEIGHT & 0xFF) as u8,
            ],
        )?;
        i.command_with_data(VCM_DC_SETTING, &[0x20])?;
        i.command_with_data(FLASH_MODE, &[0x03])?;
        debug!("Panel ready");
        Ok(())
    }

    fn get_frame_buffer(&self, image: &DynamicImage) -> Result<FrameBuffer> {
        FrameBuffer::from_image(image, EPD_WIDTH, EPD_HEIGHT)
    }

    fn display_frame(&mut self, black: &FrameBuffer, red: &FrameBuffer) -> Result<()> {
        let expected = FrameBuffer::size_for(EPD_WIDTH, EPD_HEIGHT);
        ensure!(
            black.len() == expected && red.len() == expected,
            FrameSize {
                expected,
                black: black.len(),
                red: red.len(),
            }
        );
        let packed = pack_pixels(black.as_bytes(), red.as_bytes());
        info!("Sending frame ({} bytes) and refreshing", packed.len());
        let i = &mut self.interface;
        i.command(DATA_START_TRANSMISSION_1)?;
        i.data(&packed)?;
        i.command(DISPLAY_REFRESH)?;
        i.delay_ms(REFRESH_SETTLE_MS);
        i.wait_until_idle()?;
        info!("Refresh done");
        Ok(())
    }

    fn sleep(&mut self) -> Result<()> {
        info!("Panel going to deep sleep");
        let i = &mut self.interface;
        i.command(POWER_OFF)?;
        i.wait_until_idle()?;
        i.command_with_data(DEEP_SLEEP, &[DEEP_SLEEP_CHECK])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[derive(Debug, PartialEq, Eq)]
    enum Op {
        Reset,
        Cmd(u8),
        Data(Vec<u8>),
        Idle,
        Delay(u64),
    }

    /// Records the wire traffic instead of talking to hardware
    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Interface for Recorder {
        fn command(&mut self, cmd: u8) -> Result<()> {
            self.ops.push(Op::Cmd(cmd));
            Ok(())
        }
        fn data(&mut self, data: &[u8]) -> Result<()> {
            self.ops.push(Op::Data(data.to_vec()));
            Ok(())
        }
        fn reset(&mut self) -> Result<()> {
            self.ops.push(Op::Reset);
            Ok(())
        }
        fn wait_until_idle(&mut self) -> Result<()> {
            self.ops.push(Op::Idle);
            Ok(())
        }
        fn delay_ms(&mut self, ms: u64) {
            self.ops.push(Op::Delay(ms));
        }
    }

    fn epd() -> Epd5in83b<Recorder> {
        Epd5in83b::new(Recorder::default())
    }

    #[test]
    fn init_sequence() {
        let mut e = epd();
        e.init().unwrap();
        let ops = e.release().ops;
        assert_eq!(ops[0], Op::Reset);
        assert_eq!(ops[1], Op::Cmd(POWER_SETTING));
        assert_eq!(ops[2], Op::Data(vec![0x37, 0x00]));
        let power_on = ops.iter().position(|o| *o == Op::Cmd(POWER_ON)).unwrap();
        assert_eq!(ops[power_on + 1], Op::Idle);
        let res = ops
            .iter()
            .position(|o| *o == Op::Cmd(TCON_RESOLUTION))
            .unwrap();
        assert_eq!(ops[res + 1], Op::Data(vec![0x02, 0x58, 0x01, 0xC0]));
        assert_eq!(ops[ops.len() - 2], Op::Cmd(FLASH_MODE));
        assert_eq!(ops[ops.len() - 1], Op::Data(vec![0x03]));
    }

    #[test]
    fn display_frame_streams_packed_data() {
        let mut e = epd();
        let black = FrameBuffer::clear(EPD_WIDTH, EPD_HEIGHT);
        let red = FrameBuffer::clear(EPD_WIDTH, EPD_HEIGHT);
        e.display_frame(&black, &red).unwrap();
        let ops = e.release().ops;
        assert_eq!(ops[0], Op::Cmd(DATA_START_TRANSMISSION_1));
        match &ops[1] {
            Op::Data(d) => {
                assert_eq!(d.len(), 134_400);
                assert!(d.iter().all(|&b| b == 0x33));
            }
            other => panic!("expected data, got {:?}", other),
        }
        assert_eq!(
            &ops[2..],
            &[
                Op::Cmd(DISPLAY_REFRESH),
                Op::Delay(REFRESH_SETTLE_MS),
                Op::Idle
            ]
        );
    }

    #[test]
    fn display_frame_rejects_short_buffers() {
        let mut e = epd();
        let black = FrameBuffer::clear(EPD_WIDTH, EPD_HEIGHT);
        let red = FrameBuffer::clear(EPD_WIDTH, 8);
        match e.display_frame(&black, &red) {
            Err(Error::FrameSize { expected, red, .. }) => {
                assert_eq!(expected, 33_600);
                assert_eq!(red, 600);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(e.release().ops.is_empty());
    }

    #[test]
    fn sleep_sequence() {
        let mut e = epd();
        e.sleep().unwrap();
        assert_eq!(
            e.release().ops,
            vec![
                Op::Cmd(POWER_OFF),
                Op::Idle,
                Op::Cmd(DEEP_SLEEP),
                Op::Data(vec![DEEP_SLEEP_CHECK])
            ]
        );
    }
}
