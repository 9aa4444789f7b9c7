//! Voltage reference selection and voltage-to-code conversion.

use crate::Error;
use crate::profile::Resolution;

/// Voltage reference used as the full-scale output of every channel.
///
/// The internal references are kept powered in all modes, matching the REF command
/// codes `0x75..=0x77`. Selecting [`Reference::External`] powers the internal
/// reference down and uses the voltage applied to the REF pin instead.
///
/// # Datasheet
///
/// See the REF command in the command summary table.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reference {
    /// Internal 2.5V reference.
    Internal2V5,
    /// Internal 2.048V reference.
    Internal2V048,
    /// Internal 4.096V reference.
    Internal4V096,
    /// External reference applied to the REF pin, in volts.
    ///
    /// The voltage must be finite and greater than zero.
    External(f64),
}

impl Reference {
    /// REF command byte that selects this reference.
    pub const fn command(&self) -> u8 {
        match self {
            Reference::External(_) => 0x70,
            Reference::Internal2V5 => 0x75,
            Reference::Internal2V048 => 0x76,
            Reference::Internal4V096 => 0x77,
        }
    }

    /// Full-scale output voltage.
    pub const fn volts(&self) -> f64 {
        match *self {
            Reference::Internal2V5 => 2.5,
            Reference::Internal2V048 => 2.048,
            Reference::Internal4V096 => 4.096,
            Reference::External(volts) => volts,
        }
    }

    /// Find the internal reference with exactly the given voltage.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedReference`] if `volts` is not one of 2.5V, 2.048V or
    /// 4.096V. Use [`Reference::External`] for anything else.
    pub fn from_volts<E>(volts: f64) -> Result<Self, Error<E>> {
        [
            Reference::Internal2V5,
            Reference::Internal2V048,
            Reference::Internal4V096,
        ]
        .into_iter()
        .find(|reference| reference.volts() == volts)
        .ok_or(Error::UnsupportedReference)
    }

    /// Reject external references that cannot be used to scale a voltage.
    pub(crate) fn validated<E>(self) -> Result<Self, Error<E>> {
        match self {
            Reference::External(volts) if !(volts.is_finite() && volts > 0.0) => {
                Err(Error::UnsupportedReference)
            }
            reference => Ok(reference),
        }
    }
}

/// Map a voltage onto one of the internal references.
///
/// See [`Reference::from_volts`], which returns an error that converts into the
/// driver's error type.
impl TryFrom<f64> for Reference {
    type Error = Error<core::convert::Infallible>;

    fn try_from(volts: f64) -> Result<Self, Self::Error> {
        Self::from_volts(volts)
    }
}

/// Convert a voltage to the nearest input code for the given reference.
///
/// Voltages below zero or above the reference saturate at the ends of the code
/// range. NaN and infinite voltages are rejected.
pub(crate) fn voltage_to_code<E>(
    voltage: f64,
    reference: Reference,
    resolution: Resolution,
) -> Result<u16, Error<E>> {
    if !voltage.is_finite() {
        return Err(Error::NonFiniteVoltage);
    }
    let max_code = f64::from(resolution.max_code());
    let scaled = (voltage / reference.volts() * max_code).clamp(0.0, max_code);
    // Round half away from zero. `f64::round` is unavailable without std, but the
    // value is non-negative here so adding one half and truncating is equivalent.
    Ok((scaled + 0.5) as u16)
}
