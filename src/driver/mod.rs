use embedded_hal::i2c::{I2c, SevenBitAddress};

use crate::analog::Reference;
use crate::commands::Command;
use crate::error::Error;
use crate::profile::{ChipProfile, MAX5813, MAX5814, MAX5815};

mod analog;

/// Driver for the MAX5813, MAX5814 and MAX5815 quad DACs.
///
/// # Quick start
///
/// Create the driver with [`MAX581x::new`] and one of the chip profiles, or with
/// the per-chip shorthands such as [`MAX581x::max5815`]. Construction selects the
/// given voltage reference on the device, so a failure there means the chip did
/// not respond.
///
/// ```
/// # use embedded_hal_mock::eh1::i2c::{Mock, Transaction};
/// use max581x::{MAX581x, Reference};
///
/// # let i2c = Mock::new(&[
/// #     Transaction::write(0x1C, vec![0x75, 0x00, 0x00]),
/// #     Transaction::write(0x1C, vec![0x31, 0x85, 0x10]),
/// # ]);
/// let mut dac = MAX581x::max5815(i2c, 0x1C, Reference::Internal2V5)?;
/// dac.set_voltage(1.3, 1)?;
/// # dac.release().done();
/// # Ok::<(), max581x::Error<embedded_hal::i2c::ErrorKind>>(())
/// ```
///
/// # Sharing the bus
///
/// The driver takes any [`I2c`] implementation by value. To keep using the bus
/// elsewhere, pass `&mut bus`, or a shared device from [`embedded-hal-bus`] when
/// several drivers need the same bus. The driver never locks the bus itself, but
/// each command is a single I2C write so frames cannot be split.
///
/// [`embedded-hal-bus`]: https://docs.rs/embedded-hal-bus
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
    ////////////////////////////////////////////////////////////////////////////////
    // Constructors
    ////////////////////////////////////////////////////////////////////////////////

    /// Create a driver for the given chip variant and select its voltage reference.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedReference`] is returned for an unusable external
    /// reference voltage, and [`Error::I2c`] if the reference could not be
    /// written to the device. In both cases the bus is dropped with the driver.
    pub fn new(
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
        dac.set_reference(reference)?;
        Ok(dac)
    }

    /// Create a driver for the 8-bit MAX5813.
    pub fn max5813(
        i2c: I2C,
        address: SevenBitAddress,
        reference: Reference,
    ) -> Result<Self, Error<I2C::Error>> {
        Self::new(i2c, address, MAX5813, reference)
    }

    /// Create a driver for the 10-bit MAX5814.
    pub fn max5814(
        i2c: I2C,
        address: SevenBitAddress,
        reference: Reference,
    ) -> Result<Self, Error<I2C::Error>> {
        Self::new(i2c, address, MAX5814, reference)
    }

    /// Create a driver for the 12-bit MAX5815.
    pub fn max5815(
        i2c: I2C,
        address: SevenBitAddress,
        reference: Reference,
    ) -> Result<Self, Error<I2C::Error>> {
        Self::new(i2c, address, MAX5815, reference)
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Frame exchange with the MAX581x
    ////////////////////////////////////////////////////////////////////////////////

    /// Write the frame for the given command to the device.
    fn send(&mut self, command: Command) -> Result<(), Error<I2C::Error>> {
        let frame = command.frame(&self.profile);
        #[cfg(feature = "defmt")]
        defmt::trace!("{} @ {=u8:#x}: write {:#x}", self.profile.name(), self.address, frame);
        self.i2c.write(self.address, &frame)?;
        Ok(())
    }
}

impl<I2C> MAX581x<I2C> {
    /// Borrow the underlying bus.
    pub fn i2c(&self) -> &I2C {
        &self.i2c
    }

    /// Mutably borrow the underlying bus.
    ///
    /// Writing to the DAC address directly will leave [`MAX581x::reference`] out
    /// of step with the device if the reference is changed.
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
