//! Chip-agnostic DAC interface.

use embedded_hal::i2c::I2c;

use crate::{Error, MAX581x};

/// A multi-channel digital-to-analog converter.
///
/// Application code can be written against this trait rather than a particular
/// driver, for example to swap a MAX5813 for a MAX5815 without changes.
pub trait Dac {
    /// Error returned when an output cannot be set.
    type Error;

    /// Set the output of `channel` to `voltage`, scaled by the current reference.
    fn set_voltage(&mut self, voltage: f64, channel: u8) -> Result<(), Self::Error>;

    /// Set the output of `channel` with a raw digital input code.
    fn set_input_code(&mut self, code: u16, channel: u8) -> Result<(), Self::Error>;
}

impl<I2C: I2c> Dac for MAX581x<I2C> {
    type Error = Error<I2C::Error>;

    fn set_voltage(&mut self, voltage: f64, channel: u8) -> Result<(), Self::Error> {
        MAX581x::set_voltage(self, voltage, channel)
    }

    fn set_input_code(&mut self, code: u16, channel: u8) -> Result<(), Self::Error> {
        MAX581x::set_input_code(self, code, channel)
    }
}
