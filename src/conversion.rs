use crate::quantity::QuantityKind;
use crate::units::*;

/// 단위 변환/입력 해석 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    #[error("unknown unit: {0}")]
    UnknownUnit(String),
    /// 해당 물리량에 쓸 수 없는 단위
    #[error("unit {unit} cannot be used for a {kind:?} quantity")]
    IncompatibleUnit { unit: String, kind: QuantityKind },
    /// 숫자로 읽을 수 없는 입력
    #[error("not a number: {0}")]
    InvalidNumber(String),
}

/// 문자열로 전달된 단위명을 해석해 지정된 단위로 환산한다.
///
/// 무차원량은 빈 문자열만 단위로 받는다.
pub fn convert(
    kind: QuantityKind,
    value: f64,
    from_unit_str: &str,
    to_unit_str: &str,
) -> Result<f64, ConversionError> {
    let from = parse_display_unit(kind, from_unit_str)?;
    let to = parse_display_unit(kind, to_unit_str)?;
    match (from, to) {
        (DisplayUnit::Length(a), DisplayUnit::Length(b)) => Ok(convert_length(value, a, b)),
        (DisplayUnit::Angle(a), DisplayUnit::Angle(b)) => Ok(convert_angle(value, a, b)),
        (DisplayUnit::Unitless, DisplayUnit::Unitless) => Ok(value),
        _ => Err(ConversionError::IncompatibleUnit {
            unit: to.symbol().to_string(),
            kind: from.kind(),
        }),
    }
}

/// 물리량 차원에 맞는 표시 단위를 해석한다.
pub fn parse_display_unit(kind: QuantityKind, s: &str) -> Result<DisplayUnit, ConversionError> {
    let trimmed = s.trim();
    match kind {
        QuantityKind::Length => parse_length_unit(trimmed).map(DisplayUnit::Length),
        QuantityKind::Angle => parse_angle_unit(trimmed).map(DisplayUnit::Angle),
        QuantityKind::Dimensionless if trimmed.is_empty() => Ok(DisplayUnit::Unitless),
        QuantityKind::Dimensionless => Err(ConversionError::IncompatibleUnit {
            unit: trimmed.to_string(),
            kind,
        }),
    }
}

/// 차원을 모를 때 단위 문자열로부터 표시 단위를 추정한다.
pub fn parse_any_unit(s: &str) -> Result<DisplayUnit, ConversionError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(DisplayUnit::Unitless);
    }
    parse_length_unit(trimmed)
        .map(DisplayUnit::Length)
        .or_else(|_| parse_angle_unit(trimmed).map(DisplayUnit::Angle))
}

pub fn parse_length_unit(s: &str) -> Result<LengthUnit, ConversionError> {
    match s.to_lowercase().as_str() {
        "in" | "inch" | "\"" => Ok(LengthUnit::Inch),
        "ft" | "foot" | "feet" => Ok(LengthUnit::Foot),
        "kft" => Ok(LengthUnit::KiloFoot),
        "nmi" => Ok(LengthUnit::NauticalMile),
        "m" | "meter" | "metre" => Ok(LengthUnit::Meter),
        "km" => Ok(LengthUnit::Kilometer),
        "um" | "µm" | "micron" => Ok(LengthUnit::Micrometer),
        "nm" | "nanometer" => Ok(LengthUnit::Nanometer),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

pub fn parse_angle_unit(s: &str) -> Result<AngleUnit, ConversionError> {
    match s.to_lowercase().as_str() {
        "r" | "rad" | "radian" => Ok(AngleUnit::Radian),
        "mr" | "mrad" => Ok(AngleUnit::Milliradian),
        "ur" | "urad" | "µrad" => Ok(AngleUnit::Microradian),
        "deg" | "°" | "degree" => Ok(AngleUnit::Degree),
        "as" | "arcsec" | "\"" => Ok(AngleUnit::ArcSecond),
        "mas" => Ok(AngleUnit::MilliArcSecond),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

/// 입력 칸의 문자열을 해석한다. 비어 있으면 값을 지우라는 뜻으로 `None`.
pub fn parse_input(s: &str) -> Result<Option<f64>, ConversionError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(ConversionError::InvalidNumber(trimmed.to_string())),
    }
}

/// 화면 표시용 숫자 형식. 아주 작거나 큰 값은 지수 표기로 바꾼다.
pub fn format_value(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-3..1e7).contains(&magnitude) {
        format!("{value:.3e}")
    } else {
        format!("{value:.3}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_switches_to_scientific() {
        assert_eq!(format_value(3.28084), "3.281");
        assert_eq!(format_value(0.0), "0.000");
        assert_eq!(format_value(2.0e-7), "2.000e-7");
        assert_eq!(format_value(23_622_047.0), "2.362e7");
    }

    #[test]
    fn dimensionless_rejects_units() {
        assert_eq!(
            parse_display_unit(QuantityKind::Dimensionless, ""),
            Ok(DisplayUnit::Unitless)
        );
        assert!(matches!(
            parse_display_unit(QuantityKind::Dimensionless, "m"),
            Err(ConversionError::IncompatibleUnit { .. })
        ));
    }
}
