use core::fmt::Write as _;

use anyhow::{anyhow, Result};
use embedded_hal::i2c::I2c;
use ssd1306::mode::TerminalMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

use chromapost::ports::StatusDisplay;

/// SSD1306 at the usual 0x3C address, driven in terminal mode; the status
/// surface is a few lines of text, nothing more.
pub struct Oled<I2C> {
    display: Ssd1306<I2CInterface<I2C>, DisplaySize128x64, TerminalMode>,
}

impl<I2C: I2c> Oled<I2C> {
    pub fn init(i2c: I2C) -> Result<Self> {
        let interface = I2CDisplayInterface::new(i2c);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_terminal_mode();
        display.init().map_err(|e| anyhow!("SSD1306 init: {e:?}"))?;
        display.clear().map_err(|e| anyhow!("SSD1306 clear: {e:?}"))?;
        Ok(Self { display })
    }
}

impl<I2C: I2c> StatusDisplay for Oled<I2C> {
    fn render(&mut self, lines: &[String]) {
        // Fire and forget: a render error must not reach the control loop.
        if self.display.clear().is_err() {
            return;
        }
        for line in lines {
            let _ = writeln!(self.display, "{line}");
        }
    }
}
