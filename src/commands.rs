use bit_field::BitField;

use crate::analog::Reference;
use crate::profile::{ChipProfile, Resolution};

/// Length of every command frame written to the MAX581x.
pub(crate) const FRAME_LEN: usize = 3;

/// Device commands issued by the driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Command {
    /// Select the voltage reference for all channels (REF).
    ///
    /// The two data bytes are unused and sent as zero.
    SelectReference(Reference),
    /// Write a code to one channel and update its output immediately (CODEn_LOADn).
    ///
    /// The code and channel must already have been checked against the profile.
    WriteThrough {
        /// Output channel, added to the profile's command base.
        channel: u8,
        /// Right-justified input code.
        code: u16,
    },
}

impl Command {
    /// Build the bytes written to the device for this command.
    pub(crate) fn frame(&self, profile: &ChipProfile) -> [u8; FRAME_LEN] {
        match *self {
            Command::SelectReference(reference) => [reference.command(), 0x00, 0x00],
            Command::WriteThrough { channel, code } => {
                let [high, low] = encode_code(code, profile.resolution());
                [profile.output_command_base() + channel, high, low]
            }
        }
    }
}

/// Left-justify an input code into the two data bytes of a command frame.
///
/// The most significant eight bits of the code go in the first byte and the
/// remaining bits fill the top of the second byte, with unused low bits zero.
/// Bits above the resolution are discarded.
///
/// ```
/// use max581x::{Resolution, encode_code};
///
/// assert_eq!(encode_code(0x333, Resolution::Bits12), [0x33, 0x30]);
/// assert_eq!(encode_code(1023, Resolution::Bits10), [0xFF, 0xC0]);
/// ```
pub fn encode_code(code: u16, resolution: Resolution) -> [u8; 2] {
    let bits = usize::from(resolution.bits());
    let mut field = 0u16;
    field.set_bits(16 - bits..16, code.get_bits(0..bits));
    [field.get_bits(8..16) as u8, field.get_bits(0..8) as u8]
}

/// Recover an input code from the two data bytes of a command frame.
///
/// This is the inverse of [`encode_code`] for codes within the resolution.
pub fn decode_code(data: [u8; 2], resolution: Resolution) -> u16 {
    let bits = usize::from(resolution.bits());
    u16::from_be_bytes(data).get_bits(16 - bits..16)
}
