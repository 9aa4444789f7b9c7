use core::fmt;

use embedded_hal::i2c;

/// Problems when validating a request or communicating with the DAC.
///
/// `E` is the error type of the underlying I2C bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// A digital input code outside the range of the chip's resolution.
    ///
    /// No bus transaction is made.
    InvalidCode {
        /// The rejected code.
        code: u16,
        /// Exclusive upper bound of valid codes (`2^resolution`).
        limit: u16,
    },
    /// A channel index that does not address one of the DAC outputs.
    ///
    /// No bus transaction is made.
    InvalidChannel(u8),
    /// A NaN or infinite voltage was requested.
    NonFiniteVoltage,
    /// The requested voltage reference cannot be selected.
    ///
    /// This occurs when converting a voltage that is not one of the internal
    /// reference levels, or for an external reference that is not a finite,
    /// positive voltage.
    UnsupportedReference,
    /// The I2C bus reported a failure while writing a command frame.
    ///
    /// The bus error is passed through unchanged and the command is not retried.
    I2c(E),
}

#[doc(hidden)]
impl<E> From<E> for Error<E> {
    fn from(value: E) -> Self {
        Self::I2c(value)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCode { code, limit } => write!(
                f,
                "digital input code {code} is out of range of 0 <= code < {limit}"
            ),
            Error::InvalidChannel(channel) => write!(f, "{channel} is not a valid channel"),
            Error::NonFiniteVoltage => write!(f, "voltage must be finite"),
            Error::UnsupportedReference => write!(f, "unsupported voltage reference"),
            Error::I2c(e) => write!(f, "I2C error: {e:?}"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}

impl<E: i2c::Error> i2c::Error for Error<E> {
    fn kind(&self) -> i2c::ErrorKind {
        // Validation failures never reach the bus, so there is no more specific kind.
        match self {
            Error::I2c(e) => e.kind(),
            _ => i2c::ErrorKind::Other,
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::InvalidCode { code, limit } => defmt::write!(
                f,
                "digital input code {} is out of range of 0 <= code < {}",
                code,
                limit
            ),
            Error::InvalidChannel(channel) => {
                defmt::write!(f, "{} is not a valid channel", channel)
            }
            Error::NonFiniteVoltage => defmt::write!(f, "voltage must be finite"),
            Error::UnsupportedReference => defmt::write!(f, "unsupported voltage reference"),
            Error::I2c(e) => defmt::write!(f, "I2C error: {}", e),
        }
    }
}
