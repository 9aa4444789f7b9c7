//! Static descriptions of the MAX581x chip variants.
//!
//! The three variants share the command set and channel layout and differ only in
//! output resolution, so each is described by a [`ChipProfile`] value rather than
//! its own type.

use crate::Error;

/// Output resolution of a MAX581x variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    /// 8-bit codes (MAX5813).
    Bits8,
    /// 10-bit codes (MAX5814).
    Bits10,
    /// 12-bit codes (MAX5815).
    Bits12,
}

impl Resolution {
    /// Width of the digital input code in bits.
    pub const fn bits(self) -> u8 {
        match self {
            Resolution::Bits8 => 8,
            Resolution::Bits10 => 10,
            Resolution::Bits12 => 12,
        }
    }

    /// Exclusive upper bound of the input code, `2^bits`.
    pub const fn code_limit(self) -> u16 {
        1 << self.bits()
    }

    /// Largest valid input code, corresponding to full-scale output.
    pub const fn max_code(self) -> u16 {
        self.code_limit() - 1
    }
}

/// Command base for CODEn_LOADn, which writes a code and updates the output at once.
///
/// The target channel is added to the base to form the command byte.
const WRITE_THROUGH_BASE: u8 = 0x30;

/// Descriptor of one MAX581x variant.
///
/// Use one of the provided constants: [`MAX5813`], [`MAX5814`] or [`MAX5815`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChipProfile {
    name: &'static str,
    resolution: Resolution,
    channel_count: u8,
    output_command_base: u8,
}

/// Quad 8-bit DAC.
pub const MAX5813: ChipProfile = ChipProfile {
    name: "MAX5813",
    resolution: Resolution::Bits8,
    channel_count: 4,
    output_command_base: WRITE_THROUGH_BASE,
};

/// Quad 10-bit DAC.
pub const MAX5814: ChipProfile = ChipProfile {
    name: "MAX5814",
    resolution: Resolution::Bits10,
    channel_count: 4,
    output_command_base: WRITE_THROUGH_BASE,
};

/// Quad 12-bit DAC.
pub const MAX5815: ChipProfile = ChipProfile {
    name: "MAX5815",
    resolution: Resolution::Bits12,
    channel_count: 4,
    output_command_base: WRITE_THROUGH_BASE,
};

impl ChipProfile {
    /// Part number of the variant.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Output resolution of the variant.
    pub const fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Number of independently addressable output channels.
    pub const fn channel_count(&self) -> u8 {
        self.channel_count
    }

    /// Command byte base for writing a channel's output code.
    pub const fn output_command_base(&self) -> u8 {
        self.output_command_base
    }

    /// Returns true if `channel` addresses one of the outputs.
    pub const fn is_valid_channel(&self, channel: u8) -> bool {
        channel < self.channel_count
    }

    /// Check an input code and channel against the variant's limits.
    ///
    /// The code is checked first, so a call where both are out of range reports
    /// [`Error::InvalidCode`].
    pub(crate) fn check_input<E>(&self, code: u16, channel: u8) -> Result<(), Error<E>> {
        let limit = self.resolution.code_limit();
        if code >= limit {
            return Err(Error::InvalidCode { code, limit });
        }
        if !self.is_valid_channel(channel) {
            return Err(Error::InvalidChannel(channel));
        }
        Ok(())
    }
}
