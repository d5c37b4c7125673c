//! 표시 단위 정의 및 변환 모듈 모음.
//!
//! 해석기는 항상 내부 기준 단위(길이=inch, 각도=rad)로 계산하고,
//! 단위 변환은 화면 입출력에서만 일어난다.

pub mod angle;
pub mod length;

pub use angle::{convert_angle, AngleUnit};
pub use length::{convert_length, LengthUnit};

use crate::quantity::QuantityKind;

/// 한 칸에 값을 표시할 단위.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayUnit {
    Length(LengthUnit),
    Angle(AngleUnit),
    Unitless,
}

impl DisplayUnit {
    pub fn kind(self) -> QuantityKind {
        match self {
            DisplayUnit::Length(_) => QuantityKind::Length,
            DisplayUnit::Angle(_) => QuantityKind::Angle,
            DisplayUnit::Unitless => QuantityKind::Dimensionless,
        }
    }

    /// 무차원량은 빈 문자열.
    pub fn symbol(self) -> &'static str {
        match self {
            DisplayUnit::Length(u) => u.symbol(),
            DisplayUnit::Angle(u) => u.symbol(),
            DisplayUnit::Unitless => "",
        }
    }

    /// 표시 값을 내부 기준 값으로.
    pub fn to_base(self, value: f64) -> f64 {
        match self {
            DisplayUnit::Length(u) => length::to_inch(value, u),
            DisplayUnit::Angle(u) => angle::to_radian(value, u),
            DisplayUnit::Unitless => value,
        }
    }

    /// 내부 기준 값을 표시 값으로.
    pub fn from_base(self, value: f64) -> f64 {
        match self {
            DisplayUnit::Length(u) => length::from_inch(value, u),
            DisplayUnit::Angle(u) => angle::from_radian(value, u),
            DisplayUnit::Unitless => value,
        }
    }

    /// 같은 차원의 다음 단위 (마지막이면 처음으로).
    pub fn next(self) -> DisplayUnit {
        match self {
            DisplayUnit::Length(u) => DisplayUnit::Length(cycle(&LengthUnit::ALL, u)),
            DisplayUnit::Angle(u) => DisplayUnit::Angle(cycle(&AngleUnit::ALL, u)),
            DisplayUnit::Unitless => DisplayUnit::Unitless,
        }
    }

    /// 해당 차원에서 고를 수 있는 모든 단위.
    pub fn options(kind: QuantityKind) -> Vec<DisplayUnit> {
        match kind {
            QuantityKind::Length => LengthUnit::ALL.iter().map(|u| DisplayUnit::Length(*u)).collect(),
            QuantityKind::Angle => AngleUnit::ALL.iter().map(|u| DisplayUnit::Angle(*u)).collect(),
            QuantityKind::Dimensionless => vec![DisplayUnit::Unitless],
        }
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T) -> T {
    let pos = all.iter().position(|u| *u == current).unwrap_or(0);
    all[(pos + 1) % all.len()]
}
