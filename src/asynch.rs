//! Async driver using the `embedded-hal-async` I2C trait.
//!
//! This mirrors the blocking [`crate::MAX581x`] and encodes and validates commands
//! in exactly the same way. Enable the `async` feature to use it.

use embedded_hal::i2c::SevenBitAddress;
use embedded_hal_async::i2c::I2c;

use crate::analog::{self, Reference};
use crate::commands::Command;
use crate::profile::{ChipProfile, MAX5813, MAX5814, MAX5815};
use crate::Error;

/// Async driver for the MAX5813, MAX5814 and MAX5815 quad DACs.
///
/// See [`crate::MAX581x`] for details of each operation.
#[derive(Debug)]
pub struct MAX581x<I2C> {
    /// Underlying bus.
    i2c: I2C,
    /// 7-bit device address, set by the ADDR pins.
    address: SevenBitAddress,
    /// Variant-specific limits and command bytes.
    profile: ChipProfile,
    /// Reference most recently selected on the device.
    reference: Reference,
}

impl<I2C: I2c> MAX581x<I2C> {
    /// Create a driver for the given chip variant and select its voltage reference.
    pub async fn new(
        i2c: I2C,
        address: SevenBitAddress,
        profile: ChipProfile,
        reference: Reference,
    ) -> Result<Self, Error<I2C::Error>> {
        let mut dac = Self {
            i2c,
            address,
            profile,
            reference: reference.validated::<I2C::Error>()?,
        };
        dac.set_reference(reference).await?;
        Ok(dac)
    }

    /// Create a driver for the 8-bit MAX5813.
    pub async fn max5813(
        i2c: I2C,
        address: SevenBitAddress,
        reference: Reference,
    ) -> Result<Self, Error<I2C::Error>> {
        Self::new(i2c, address, MAX5813, reference).await
    }

    /// Create a driver for the 10-bit MAX5814.
    pub async fn max5814(
        i2c: I2C,
        address: SevenBitAddress,
        reference: Reference,
    ) -> Result<Self, Error<I2C::Error>> {
        Self::new(i2c, address, MAX5814, reference).await
    }

    /// Create a driver for the 12-bit MAX5815.
    pub async fn max5815(
        i2c: I2C,
        address: SevenBitAddress,
        reference: Reference,
    ) -> Result<Self, Error<I2C::Error>> {
        Self::new(i2c, address, MAX5815, reference).await
    }

    /// Select the voltage reference used by all four outputs.
    ///
    /// The cached reference is only updated once the write succeeds.
    pub async fn set_reference(&mut self, reference: Reference) -> Result<(), Error<I2C::Error>> {
        let reference = reference.validated::<I2C::Error>()?;
        self.send(Command::SelectReference(reference)).await?;
        #[cfg(feature = "defmt")]
        defmt::debug!("{}: reference set to {}", self.profile.name(), reference);
        self.reference = reference;
        Ok(())
    }

    /// Select the internal reference with the given voltage.
    pub async fn set_reference_volts(&mut self, volts: f64) -> Result<(), Error<I2C::Error>> {
        self.set_reference(Reference::from_volts::<I2C::Error>(volts)?).await
    }

    /// Set the output of a channel to the given voltage.
    pub async fn set_voltage(&mut self, voltage: f64, channel: u8) -> Result<(), Error<I2C::Error>> {
        let code = self.voltage_to_code(voltage)?;
        self.set_input_code(code, channel).await
    }

    /// Set the output of a channel with a raw digital input code.
    ///
    /// The code is checked before the channel.
    pub async fn set_input_code(&mut self, code: u16, channel: u8) -> Result<(), Error<I2C::Error>> {
        self.profile.check_input::<I2C::Error>(code, channel)?;
        self.send(Command::WriteThrough { channel, code }).await
    }

    /// Convert a voltage to the input code [`MAX581x::set_voltage`] would write.
    ///
    /// # Errors
    ///
    /// [`Error::NonFiniteVoltage`] for NaN or infinite voltages.
    pub fn voltage_to_code(&self, voltage: f64) -> Result<u16, Error<I2C::Error>> {
        analog::voltage_to_code(voltage, self.reference, self.profile.resolution())
    }

    async fn send(&mut self, command: Command) -> Result<(), Error<I2C::Error>> {
        let frame = command.frame(&self.profile);
        #[cfg(feature = "defmt")]
        defmt::trace!("{} @ {=u8:#x}: write {:#x}", self.profile.name(), self.address, frame);
        self.i2c.write(self.address, &frame).await?;
        Ok(())
    }
}

impl<I2C> MAX581x<I2C> {
    /// Borrow the underlying bus.
    pub fn i2c(&self) -> &I2C {
        &self.i2c
    }

    /// Mutably borrow the underlying bus.
    pub fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Destroy the driver and return the underlying bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// 7-bit I2C address of the device.
    pub fn address(&self) -> SevenBitAddress {
        self.address
    }

    /// Profile of the chip variant this driver was created for.
    pub fn profile(&self) -> &ChipProfile {
        &self.profile
    }

    /// Reference currently selected on the device.
    pub fn reference(&self) -> Reference {
        self.reference
    }
}
