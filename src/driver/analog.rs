use embedded_hal::i2c::I2c;

use super::MAX581x;
use crate::analog::{self, Reference};
use crate::commands::Command;
use crate::Error;

impl<I2C: I2c> MAX581x<I2C> {
    /// Select the voltage reference used by all four outputs.
    ///
    /// The cached reference used by [`MAX581x::set_voltage`] is only updated once
    /// the device has accepted the command. Output codes are not rewritten, so the
    /// output voltages scale with the new reference.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedReference`] for an external reference that is not a
    /// finite, positive voltage, or [`Error::I2c`] if the write failed.
    ///
    /// # Datasheet
    ///
    /// See the REF command in the command summary table.
    pub fn set_reference(&mut self, reference: Reference) -> Result<(), Error<I2C::Error>> {
        let reference = reference.validated::<I2C::Error>()?;
        self.send(Command::SelectReference(reference))?;
        #[cfg(feature = "defmt")]
        defmt::debug!("{}: reference set to {}", self.profile.name(), reference);
        self.reference = reference;
        Ok(())
    }

    /// Select the internal reference with the given voltage.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedReference`] if `volts` is not 2.5, 2.048 or 4.096,
    /// in which case nothing is written, or [`Error::I2c`] if the write failed.
    pub fn set_reference_volts(&mut self, volts: f64) -> Result<(), Error<I2C::Error>> {
        self.set_reference(Reference::from_volts::<I2C::Error>(volts)?)
    }

    /// Set the output of a channel to the given voltage.
    ///
    /// The voltage is converted to the nearest input code for the current
    /// reference, `round(voltage / vref * (2^resolution - 1))`. Voltages below 0V
    /// or above the reference saturate at the lowest or highest code.
    ///
    /// # Errors
    ///
    /// [`Error::NonFiniteVoltage`] for NaN or infinite voltages,
    /// [`Error::InvalidChannel`] if `channel` is not an output, or [`Error::I2c`]
    /// if the write failed.
    pub fn set_voltage(&mut self, voltage: f64, channel: u8) -> Result<(), Error<I2C::Error>> {
        let code = self.voltage_to_code(voltage)?;
        self.set_input_code(code, channel)
    }

    /// Set the output of a channel with a raw digital input code.
    ///
    /// The code is written and the output updated in a single command
    /// (CODEn_LOADn).
    ///
    /// # Errors
    ///
    /// The code is checked before the channel, and no bus transaction is made if
    /// either is out of range.
    ///
    /// - [`Error::InvalidCode`] if `code` is not below `2^resolution`.
    /// - [`Error::InvalidChannel`] if `channel` is not an output.
    /// - [`Error::I2c`] if the write failed.
    pub fn set_input_code(&mut self, code: u16, channel: u8) -> Result<(), Error<I2C::Error>> {
        self.profile.check_input::<I2C::Error>(code, channel)?;
        self.send(Command::WriteThrough { channel, code })
    }

    /// Convert a voltage to the input code [`MAX581x::set_voltage`] would write.
    ///
    /// # Errors
    ///
    /// [`Error::NonFiniteVoltage`] for NaN or infinite voltages.
    pub fn voltage_to_code(&self, voltage: f64) -> Result<u16, Error<I2C::Error>> {
        analog::voltage_to_code(voltage, self.reference, self.profile.resolution())
    }
}
