//! Test the driver against a mock I2C bus.
//!
//! Each test lists the exact frames the DAC should receive. The mock checks them
//! in order and `done()` asserts that none were left unsent.
use std::cell::RefCell;

use embedded_hal::i2c::ErrorKind;
use embedded_hal_bus::i2c::RefCellDevice;
use embedded_hal_mock::eh1::i2c::{Mock, Transaction};
use max581x::{Dac, Error, MAX581x, MAX5813, MAX5814, MAX5815, Reference};

const ADDRESS: u8 = 0x1C;

type Result = std::result::Result<(), Error<ErrorKind>>;

fn write(bytes: [u8; 3]) -> Transaction {
    Transaction::write(ADDRESS, bytes.to_vec())
}

fn failing_write(bytes: [u8; 3]) -> Transaction {
    write(bytes).with_error(ErrorKind::Other)
}

/// Creating each variant selects the reference and records the resolution.
#[test]
fn new_selects_reference() -> Result {
    for (profile, bits) in [(MAX5813, 8), (MAX5814, 10), (MAX5815, 12)] {
        let i2c = Mock::new(&[write([0x76, 0x00, 0x00])]);
        let dac = MAX581x::new(i2c, ADDRESS, profile, Reference::Internal2V048)?;
        assert_eq!(dac.profile().resolution().bits(), bits);
        assert_eq!(dac.reference(), Reference::Internal2V048);
        dac.release().done();
    }
    Ok(())
}

/// Every internal reference has a fixed REF command with empty data bytes.
#[test]
fn set_reference_frames() -> Result {
    let mut i2c = Mock::new(&[
        write([0x75, 0x00, 0x00]),
        write([0x75, 0x00, 0x00]),
        write([0x76, 0x00, 0x00]),
        write([0x77, 0x00, 0x00]),
        write([0x70, 0x00, 0x00]),
    ]);
    let mut dac = MAX581x::max5813(&mut i2c, ADDRESS, Reference::Internal2V5)?;
    for reference in [
        Reference::Internal2V5,
        Reference::Internal2V048,
        Reference::Internal4V096,
        Reference::External(5.0),
    ] {
        dac.set_reference(reference)?;
        assert_eq!(dac.reference(), reference);
    }
    drop(dac);
    i2c.done();
    Ok(())
}

/// Voltages are scaled by the reference and written to the channel's command.
#[test]
fn set_voltage_frames() -> Result {
    let cases = [
        (MAX5813, Reference::Internal2V5, 2.5, 1, [0x31, 0xFF, 0x00]),
        (MAX5813, Reference::External(5.0), 0.0, 2, [0x32, 0x00, 0x00]),
        (MAX5814, Reference::External(5.0), 5.0, 2, [0x32, 0xFF, 0xC0]),
        (MAX5814, Reference::External(5.0), 0.0, 2, [0x32, 0x00, 0x00]),
        (MAX5815, Reference::Internal2V5, 2.5, 3, [0x33, 0xFF, 0xF0]),
        (MAX5815, Reference::External(10.0), 2.0, 3, [0x33, 0x33, 0x30]),
    ];
    for (profile, reference, voltage, channel, expected) in cases {
        let i2c = Mock::new(&[write([reference.command(), 0x00, 0x00]), write(expected)]);
        let mut dac = MAX581x::new(i2c, ADDRESS, profile, reference)?;
        dac.set_voltage(voltage, channel)?;
        dac.release().done();
    }
    Ok(())
}

/// Voltages outside 0V..=vref saturate instead of failing.
#[test]
fn set_voltage_saturates() -> Result {
    let i2c = Mock::new(&[
        write([0x77, 0x00, 0x00]),
        write([0x30, 0x00, 0x00]),
        write([0x30, 0xFF, 0xF0]),
    ]);
    let mut dac = MAX581x::max5815(i2c, ADDRESS, Reference::Internal4V096)?;
    dac.set_voltage(-0.5, 0)?;
    dac.set_voltage(12.0, 0)?;
    dac.release().done();
    Ok(())
}

/// Non-finite voltages are rejected without touching the bus.
#[test]
fn set_voltage_rejects_nan() -> Result {
    let i2c = Mock::new(&[write([0x75, 0x00, 0x00])]);
    let mut dac = MAX581x::max5814(i2c, ADDRESS, Reference::Internal2V5)?;
    assert_eq!(dac.set_voltage(f64::NAN, 0), Err(Error::NonFiniteVoltage));
    dac.release().done();
    Ok(())
}

/// Codes at or above 2^resolution are rejected with the documented message.
#[test]
fn set_input_code_with_invalid_code() -> Result {
    let cases = [
        (MAX5813, 256),
        (MAX5814, 1024),
        (MAX5815, 4096),
        (MAX5815, u16::MAX),
    ];
    for (profile, code) in cases {
        let i2c = Mock::new(&[write([0x75, 0x00, 0x00])]);
        let mut dac = MAX581x::new(i2c, ADDRESS, profile, Reference::Internal2V5)?;
        let limit = profile.resolution().code_limit();
        let error = dac.set_input_code(code, 1).unwrap_err();
        assert_eq!(error, Error::InvalidCode { code, limit });
        assert_eq!(
            error.to_string(),
            format!("digital input code {code} is out of range of 0 <= code < {limit}")
        );
        dac.release().done();
    }
    Ok(())
}

/// Channels past the last output are rejected with the documented message.
#[test]
fn set_input_code_with_invalid_channel() -> Result {
    let i2c = Mock::new(&[write([0x75, 0x00, 0x00])]);
    let mut dac = MAX581x::max5814(i2c, ADDRESS, Reference::Internal2V5)?;
    for channel in [4, 200, u8::MAX] {
        let error = dac.set_input_code(512, channel).unwrap_err();
        assert_eq!(error, Error::InvalidChannel(channel));
        assert_eq!(error.to_string(), format!("{channel} is not a valid channel"));
    }
    dac.release().done();
    Ok(())
}

/// When both the code and channel are invalid, the code is reported.
#[test]
fn set_input_code_checks_code_first() -> Result {
    let i2c = Mock::new(&[write([0x75, 0x00, 0x00])]);
    let mut dac = MAX581x::max5813(i2c, ADDRESS, Reference::Internal2V5)?;
    assert_eq!(
        dac.set_input_code(300, 7),
        Err(Error::InvalidCode {
            code: 300,
            limit: 256
        })
    );
    dac.release().done();
    Ok(())
}

/// A failed reference write makes construction fail with the bus error.
#[test]
fn new_with_failing_bus() {
    for profile in [MAX5813, MAX5814, MAX5815] {
        let mut i2c = Mock::new(&[failing_write([0x76, 0x00, 0x00])]);
        let result = MAX581x::new(&mut i2c, ADDRESS, profile, Reference::Internal2V048);
        assert!(matches!(result, Err(Error::I2c(ErrorKind::Other))));
        i2c.done();
    }
}

/// Bus errors during writes are passed through, and the reference is kept.
#[test]
fn operations_with_failing_bus() -> Result {
    let i2c = Mock::new(&[
        write([0x76, 0x00, 0x00]),
        failing_write([0x75, 0x00, 0x00]),
        failing_write([0x31, 0x80, 0x00]),
        failing_write([0x31, 0xFF, 0x00]),
    ]);
    let mut dac = MAX581x::max5813(i2c, ADDRESS, Reference::Internal2V048)?;

    let result = dac.set_reference(Reference::Internal2V5);
    assert_eq!(result, Err(Error::I2c(ErrorKind::Other)));
    assert_eq!(dac.reference(), Reference::Internal2V048);

    assert_eq!(dac.set_input_code(128, 1), Err(Error::I2c(ErrorKind::Other)));
    assert_eq!(dac.set_voltage(2.048, 1), Err(Error::I2c(ErrorKind::Other)));

    dac.release().done();
    Ok(())
}

/// An unusable external reference is rejected before anything is written.
#[test]
fn invalid_external_reference() -> Result {
    let mut i2c = Mock::new(&[write([0x75, 0x00, 0x00])]);
    let result = MAX581x::max5815(&mut i2c, ADDRESS, Reference::External(0.0));
    assert!(matches!(result, Err(Error::UnsupportedReference)));

    let mut dac = MAX581x::max5815(&mut i2c, ADDRESS, Reference::Internal2V5)?;
    let result = dac.set_reference(Reference::External(f64::NAN));
    assert_eq!(result, Err(Error::UnsupportedReference));
    assert_eq!(dac.reference(), Reference::Internal2V5);
    drop(dac);
    i2c.done();
    Ok(())
}

/// The bus handle given at construction is the one the driver writes to.
#[test]
fn bus_accessors() -> Result {
    let mut i2c = Mock::new(&[write([0x75, 0x00, 0x00])]);
    let handle: *const Mock = &i2c;
    let mut dac = MAX581x::max5813(&mut i2c, ADDRESS, Reference::Internal2V5)?;
    assert_eq!(dac.address(), ADDRESS);
    assert_eq!(dac.profile(), &MAX5813);
    assert!(std::ptr::eq(&**dac.i2c(), handle));
    assert!(std::ptr::eq(&**dac.i2c_mut(), handle));

    let bus: &mut Mock = dac.release();
    assert!(std::ptr::eq(&*bus, handle));
    bus.done();
    Ok(())
}

/// A voltage can select an internal reference when it matches one exactly.
#[test]
fn set_reference_from_volts() -> Result {
    let i2c = Mock::new(&[write([0x75, 0x00, 0x00]), write([0x76, 0x00, 0x00])]);
    let mut dac = MAX581x::max5814(i2c, ADDRESS, Reference::Internal2V5)?;
    dac.set_reference_volts(2.048)?;
    assert_eq!(dac.reference(), Reference::Internal2V048);

    assert_eq!(dac.set_reference_volts(3.3), Err(Error::UnsupportedReference));
    assert_eq!(dac.reference(), Reference::Internal2V048);
    dac.release().done();
    Ok(())
}

/// Two DACs on one bus each write to their own address.
#[test]
fn shared_bus() -> Result {
    let bus = RefCell::new(Mock::new(&[
        Transaction::write(0x1C, vec![0x75, 0x00, 0x00]),
        Transaction::write(0x1D, vec![0x77, 0x00, 0x00]),
        Transaction::write(0x1C, vec![0x30, 0xFF, 0x00]),
        Transaction::write(0x1D, vec![0x30, 0xFF, 0xF0]),
    ]));
    {
        let mut low = MAX581x::max5813(RefCellDevice::new(&bus), 0x1C, Reference::Internal2V5)?;
        let mut high =
            MAX581x::max5815(RefCellDevice::new(&bus), 0x1D, Reference::Internal4V096)?;
        low.set_voltage(2.5, 0)?;
        high.set_voltage(4.096, 0)?;
    }
    bus.into_inner().done();
    Ok(())
}

/// The driver can be used through the chip-agnostic trait.
#[test]
fn dac_trait() -> Result {
    fn full_scale<D: Dac>(dac: &mut D, channel: u8) -> std::result::Result<(), D::Error> {
        dac.set_voltage(f64::MAX, channel)
    }

    let i2c = Mock::new(&[write([0x75, 0x00, 0x00]), write([0x32, 0xFF, 0xC0])]);
    let mut dac = MAX581x::max5814(i2c, ADDRESS, Reference::Internal2V5)?;
    full_scale(&mut dac, 2)?;
    assert_eq!(
        Dac::set_input_code(&mut dac, 0, 9),
        Err(Error::InvalidChannel(9))
    );
    dac.release().done();
    Ok(())
}
