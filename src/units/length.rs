use serde::{Deserialize, Serialize};

/// 길이 단위. 내부 기준은 인치이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthUnit {
    Inch,
    Foot,
    KiloFoot,
    NauticalMile,
    Meter,
    Kilometer,
    Micrometer,
    Nanometer,
}

pub const INCH_PER_FOOT: f64 = 12.0;
pub const INCH_PER_NAUTICAL_MILE: f64 = 72_913.398_659;
pub const INCH_PER_METER: f64 = 39.3701;

impl LengthUnit {
    /// 표시 단위 순환 순서.
    pub const ALL: [LengthUnit; 8] = [
        LengthUnit::Inch,
        LengthUnit::Foot,
        LengthUnit::KiloFoot,
        LengthUnit::NauticalMile,
        LengthUnit::Meter,
        LengthUnit::Kilometer,
        LengthUnit::Micrometer,
        LengthUnit::Nanometer,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Inch => "in",
            LengthUnit::Foot => "ft",
            LengthUnit::KiloFoot => "kft",
            LengthUnit::NauticalMile => "nmi",
            LengthUnit::Meter => "m",
            LengthUnit::Kilometer => "km",
            LengthUnit::Micrometer => "um",
            LengthUnit::Nanometer => "nm",
        }
    }

    fn inches_per_unit(self) -> f64 {
        match self {
            LengthUnit::Inch => 1.0,
            LengthUnit::Foot => INCH_PER_FOOT,
            LengthUnit::KiloFoot => INCH_PER_FOOT * 1000.0,
            LengthUnit::NauticalMile => INCH_PER_NAUTICAL_MILE,
            LengthUnit::Meter => INCH_PER_METER,
            LengthUnit::Kilometer => INCH_PER_METER * 1000.0,
            LengthUnit::Micrometer => INCH_PER_METER * 1e-6,
            LengthUnit::Nanometer => INCH_PER_METER * 1e-9,
        }
    }
}

pub fn to_inch(value: f64, unit: LengthUnit) -> f64 {
    value * unit.inches_per_unit()
}

pub fn from_inch(value_in: f64, unit: LengthUnit) -> f64 {
    value_in / unit.inches_per_unit()
}

/// 길이를 다른 단위로 변환한다.
pub fn convert_length(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    let inch = to_inch(value, from);
    from_inch(inch, to)
}
