use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// 각도 단위. 내부 기준은 라디안이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AngleUnit {
    Radian,
    Milliradian,
    Microradian,
    Degree,
    ArcSecond,
    MilliArcSecond,
}

const RAD_PER_DEG: f64 = PI / 180.0;
const RAD_PER_ARCSEC: f64 = RAD_PER_DEG / 3600.0;

impl AngleUnit {
    /// 표시 단위 순환 순서.
    pub const ALL: [AngleUnit; 6] = [
        AngleUnit::Radian,
        AngleUnit::Milliradian,
        AngleUnit::Microradian,
        AngleUnit::Degree,
        AngleUnit::ArcSecond,
        AngleUnit::MilliArcSecond,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            AngleUnit::Radian => "r",
            AngleUnit::Milliradian => "mr",
            AngleUnit::Microradian => "ur",
            AngleUnit::Degree => "deg",
            AngleUnit::ArcSecond => "as",
            AngleUnit::MilliArcSecond => "mas",
        }
    }

    fn radians_per_unit(self) -> f64 {
        match self {
            AngleUnit::Radian => 1.0,
            AngleUnit::Milliradian => 1e-3,
            AngleUnit::Microradian => 1e-6,
            AngleUnit::Degree => RAD_PER_DEG,
            AngleUnit::ArcSecond => RAD_PER_ARCSEC,
            AngleUnit::MilliArcSecond => RAD_PER_ARCSEC * 1e-3,
        }
    }
}

pub fn to_radian(value: f64, unit: AngleUnit) -> f64 {
    value * unit.radians_per_unit()
}

pub fn from_radian(value_rad: f64, unit: AngleUnit) -> f64 {
    value_rad / unit.radians_per_unit()
}

/// 각도를 다른 단위로 변환한다.
pub fn convert_angle(value: f64, from: AngleUnit, to: AngleUnit) -> f64 {
    from_radian(to_radian(value, from), to)
}
