use anyhow::{anyhow, Result};
use embedded_hal::i2c::I2c;
use esp_idf_hal::delay::FreeRtos;
use log::{info, warn};

use chromapost::ports::ColorSensor;
use chromapost::sample::ColorSample;

const TCS34725_ADDR: u8 = 0x29;

// Command register bits
const COMMAND_BIT: u8 = 0x80;
const COMMAND_AUTO_INC: u8 = 0x20;

// TCS34725 registers
const REG_ENABLE: u8 = 0x00;
const REG_ATIME: u8 = 0x01;
const REG_CONTROL: u8 = 0x0F;
const REG_ID: u8 = 0x12;
const REG_CDATAL: u8 = 0x14;

const ENABLE_PON: u8 = 0x01;
const ENABLE_AEN: u8 = 0x02;

// 256 integration cycles (~614 ms) at 1x gain, the reference tuning.
const ATIME_600MS: u8 = 0x00;
const GAIN_1X: u8 = 0x00;

const ID_TCS34725: u8 = 0x44;
const ID_TCS34727: u8 = 0x4D;

pub struct Tcs34725<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Tcs34725<I2C> {
    /// Try to bring up the sensor. Returns None if it is not on the bus or
    /// does not identify as a TCS3472x.
    pub fn probe(mut i2c: I2C) -> Option<Self> {
        let mut id = [0u8];
        if i2c
            .write_read(TCS34725_ADDR, &[COMMAND_BIT | REG_ID], &mut id)
            .is_err()
        {
            warn!("TCS34725 not found on I2C bus");
            return None;
        }
        if id[0] != ID_TCS34725 && id[0] != ID_TCS34727 {
            warn!("Unexpected TCS34725 ID 0x{:02X}", id[0]);
            return None;
        }
        info!("TCS34725 found (ID 0x{:02X})", id[0]);

        let mut sensor = Self { i2c };
        if sensor.configure().is_err() {
            warn!("TCS34725 configuration failed");
            return None;
        }
        Some(sensor)
    }

    fn configure(&mut self) -> Result<(), I2C::Error> {
        self.i2c
            .write(TCS34725_ADDR, &[COMMAND_BIT | REG_ATIME, ATIME_600MS])?;
        self.i2c
            .write(TCS34725_ADDR, &[COMMAND_BIT | REG_CONTROL, GAIN_1X])?;
        // Power on, then enable the ADC; the datasheet wants a 2.4 ms
        // warmup between PON and AEN.
        self.i2c
            .write(TCS34725_ADDR, &[COMMAND_BIT | REG_ENABLE, ENABLE_PON])?;
        FreeRtos::delay_ms(3);
        self.i2c.write(
            TCS34725_ADDR,
            &[COMMAND_BIT | REG_ENABLE, ENABLE_PON | ENABLE_AEN],
        )?;
        // First valid RGBC data is one integration period away.
        FreeRtos::delay_ms(700);
        Ok(())
    }
}

impl<I2C: I2c> ColorSensor for Tcs34725<I2C> {
    fn read_sample(&mut self) -> Result<ColorSample> {
        // CDATAL through BDATAH are contiguous little-endian words in the
        // order clear, red, green, blue.
        let mut raw = [0u8; 8];
        self.i2c
            .write_read(
                TCS34725_ADDR,
                &[COMMAND_BIT | COMMAND_AUTO_INC | REG_CDATAL],
                &mut raw,
            )
            .map_err(|e| anyhow!("TCS34725 read: {e:?}"))?;

        Ok(ColorSample {
            clear: u16::from_le_bytes([raw[0], raw[1]]),
            red: u16::from_le_bytes([raw[2], raw[3]]),
            green: u16::from_le_bytes([raw[4], raw[5]]),
            blue: u16::from_le_bytes([raw[6], raw[7]]),
        })
    }
}
