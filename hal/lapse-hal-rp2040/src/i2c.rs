//! Blocking I2C adapter

use lapse_hal::{I2cBus, I2cConfig};

/// Any embedded-hal 1.0 blocking I2C master as an [`I2cBus`]
///
/// The LCD is written from the tick task between awaits, so a blocking
/// transfer of a few bytes is fine.
pub struct BlockingI2c<T>(T);

impl<T: embedded_hal::i2c::I2c> BlockingI2c<T> {
    /// Wrap an I2C master
    pub fn new(i2c: T) -> Self {
        Self(i2c)
    }
}

impl<T: embedded_hal::i2c::I2c> I2cBus for BlockingI2c<T> {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.0.write(address, data)
    }
}

/// embassy-rp I2C settings for a bus config
pub fn rp_config(config: I2cConfig) -> embassy_rp::i2c::Config {
    let mut rp = embassy_rp::i2c::Config::default();
    rp.frequency = config.frequency;
    rp
}
