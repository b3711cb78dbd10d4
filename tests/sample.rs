//! Tests for the sample conversions

use sal_audio_dsp::sample::*;

#[test]
fn signed_16bit() {
    assert_eq!(f32_to_i16(0.0), 0);
    assert_eq!(f32_to_i16(0.5), 16384);
    assert_eq!(f32_to_i16(-1.0), i16::MIN);
    assert_eq!(f32_to_i16(1.0), i16::MAX);
    assert_eq!(f32_to_i16(2.0), i16::MAX);
    assert_eq!(f32_to_i16(-2.0), i16::MIN);
    assert_eq!(f32_to_i16(f32::NAN), 0);

    assert_eq!(i16_to_f32(0), 0.0);
    assert_eq!(i16_to_f32(-16384), -0.5);
    assert_eq!(i16_to_f32(i16::MIN), -1.0);
}

#[test]
fn offset_binary_16bit() {
    assert_eq!(f32_to_u16(0.0), U16_ZERO_POINT);
    assert_eq!(f32_to_u16(0.5), 49151);
    assert_eq!(f32_to_u16(-0.5), 16383);
    assert_eq!(f32_to_u16(1.0), u16::MAX);
    assert_eq!(f32_to_u16(-1.0), 0);
    assert_eq!(f32_to_u16(-3.0), 0);
    assert_eq!(f32_to_u16(f32::NAN), U16_ZERO_POINT);

    assert_eq!(u16_to_f32(U16_ZERO_POINT), 0.0);
    assert_eq!(u16_to_f32(49151), 0.5);
    assert_eq!(u16_to_f32(u16::MAX), 1.0);
}

#[test]
fn zero_points() {
    assert_eq!(<f32 as Sample>::ZERO_POINT, 0.0);
    assert_eq!(<i16 as Sample>::ZERO_POINT, 0);
    assert_eq!(<u16 as Sample>::ZERO_POINT, U16_ZERO_POINT);

    assert_eq!(U16_ZERO_POINT.to_normalized(), 0.0);
    assert_eq!(<u16 as Sample>::from_normalized(0.0), U16_ZERO_POINT);
    assert_eq!(0i16.to_normalized(), 0.0);
}

#[test]
fn raw_values() {
    assert_eq!(<u16 as Sample>::from_raw(40000.4), 40000);
    assert_eq!(<u16 as Sample>::from_raw(-12.0), 0);
    assert_eq!(<u16 as Sample>::from_raw(70000.0), u16::MAX);
    assert_eq!(<i16 as Sample>::from_raw(-40000.0), i16::MIN);
    assert_eq!(<i16 as Sample>::from_raw(-99.6), -100);
    assert_eq!(<f32 as Sample>::from_raw(1234.5), 1234.5);

    assert_eq!(1000u16.to_raw(), 1000.0);
    assert_eq!((-7i16).to_raw(), -7.0);
}

#[test]
fn normalized_codes_survive() {
    for code in [i16::MIN, -12345, -1, 0, 1, 23456, i16::MAX] {
        assert_eq!(f32_to_i16(i16_to_f32(code)), code);
    }

    for code in [0, 1, 12345, U16_ZERO_POINT, 54321, u16::MAX] {
        assert_eq!(f32_to_u16(u16_to_f32(code)), code);
    }
}
