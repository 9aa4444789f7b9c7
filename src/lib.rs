#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

mod analog;
#[cfg(feature = "async")]
pub mod asynch;
mod commands;
mod dac;
mod driver;
mod error;
pub mod profile;

pub use analog::Reference;
pub use commands::{decode_code, encode_code};
pub use dac::Dac;
pub use driver::MAX581x;
pub use error::Error;
pub use profile::{ChipProfile, MAX5813, MAX5814, MAX5815, Resolution};
