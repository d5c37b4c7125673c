//! 표시 단위 변환과 입력 해석 테스트.

use approx::assert_relative_eq;
use imaging_design_toolbox::{
    conversion::{self, ConversionError},
    quantity::QuantityKind,
    units::{convert_angle, convert_length, AngleUnit, DisplayUnit, LengthUnit},
};

#[test]
fn length_conversions() {
    assert_relative_eq!(convert_length(1.0, LengthUnit::Foot, LengthUnit::Inch), 12.0);
    assert_relative_eq!(convert_length(1.0, LengthUnit::Meter, LengthUnit::Inch), 39.3701);
    assert_relative_eq!(
        convert_length(600.0, LengthUnit::Kilometer, LengthUnit::Inch),
        23_622_060.0,
        max_relative = 1e-12
    );
    assert_relative_eq!(
        convert_length(1.0, LengthUnit::NauticalMile, LengthUnit::Meter),
        1852.0,
        max_relative = 1e-5
    );
    assert_relative_eq!(
        convert_length(500.0, LengthUnit::Nanometer, LengthUnit::Micrometer),
        0.5,
        max_relative = 1e-12
    );
}

#[test]
fn angle_conversions() {
    assert_relative_eq!(
        convert_angle(180.0, AngleUnit::Degree, AngleUnit::Radian),
        std::f64::consts::PI,
        max_relative = 1e-15
    );
    assert_relative_eq!(convert_angle(1.0, AngleUnit::Degree, AngleUnit::ArcSecond), 3600.0, max_relative = 1e-12);
    assert_relative_eq!(convert_angle(2.0, AngleUnit::Milliradian, AngleUnit::Microradian), 2000.0, max_relative = 1e-12);
}

#[test]
fn string_conversion_checks_dimension() {
    let v = conversion::convert(QuantityKind::Length, 2.0, "kft", "ft").unwrap();
    assert_relative_eq!(v, 2000.0, max_relative = 1e-12);
    assert!(matches!(
        conversion::convert(QuantityKind::Length, 1.0, "deg", "m"),
        Err(ConversionError::UnknownUnit(_))
    ));
    assert!(matches!(
        conversion::parse_display_unit(QuantityKind::Dimensionless, "m"),
        Err(ConversionError::IncompatibleUnit { .. })
    ));
    assert_eq!(
        conversion::parse_any_unit("mas").unwrap(),
        DisplayUnit::Angle(AngleUnit::MilliArcSecond)
    );
}

#[test]
fn string_conversion_matches_typed_conversion() {
    let typed = convert_length(3.0, LengthUnit::NauticalMile, LengthUnit::KiloFoot);
    let by_name = conversion::convert(QuantityKind::Length, 3.0, "nmi", "kft").unwrap();
    assert_relative_eq!(by_name, typed, max_relative = 1e-15);
    let by_name = conversion::convert(QuantityKind::Angle, 1.0, "as", "mas").unwrap();
    assert_relative_eq!(by_name, 1000.0, max_relative = 1e-12);
    assert_eq!(conversion::convert(QuantityKind::Dimensionless, 7.0, "", "").unwrap(), 7.0);
}

#[test]
fn parse_input_handles_blank_and_garbage() {
    assert_eq!(conversion::parse_input("").unwrap(), None);
    assert_eq!(conversion::parse_input("  \t").unwrap(), None);
    assert_eq!(conversion::parse_input(" 1.5e3 ").unwrap(), Some(1500.0));
    assert!(matches!(
        conversion::parse_input("12abc"),
        Err(ConversionError::InvalidNumber(_))
    ));
    assert!(conversion::parse_input("NaN").is_err());
    assert!(conversion::parse_input("inf").is_err());
}

#[test]
fn format_value_uses_fixed_or_scientific() {
    assert_eq!(conversion::format_value(393.701), "393.701");
    assert_eq!(conversion::format_value(0.0), "0.000");
    assert_eq!(conversion::format_value(0.0000197), "1.970e-5");
    assert_eq!(conversion::format_value(23_622_047.0), "2.362e7");
}
