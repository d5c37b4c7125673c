use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 물리량의 차원 종류. 표시 단위 선택에만 사용한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantityKind {
    /// 길이 (내부 기준: inch)
    Length,
    /// 각도 (내부 기준: rad)
    Angle,
    /// 개수, 비율 등 무차원량
    Dimensionless,
}

/// 계산기가 다루는 18개의 물리량.
///
/// 선언 순서가 곧 레지스트리 순서이며, 선형계의 열 번호([`Quantity::index`])로도 쓰인다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quantity {
    FocalRatio,
    FocalLength,
    PrimaryDiameter,
    Altitude,
    GroundSampleDistance,
    PixelPitch,
    PixelCountX,
    PixelCountY,
    SensorSizeX,
    SensorSizeY,
    DiffractionLimitedAngle,
    DiffractionLimitedSpot,
    SamplingRatio,
    SwathWidthX,
    SwathWidthY,
    Wavelength,
    AngularFovX,
    AngularFovY,
}

/// 등록된 물리량 개수.
pub const QUANTITY_COUNT: usize = 18;

/// 입력 문자열을 물리량으로 해석할 수 없을 때의 오류.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown quantity: {0}")]
pub struct UnknownQuantity(pub String);

impl Quantity {
    /// 레지스트리 순서의 전체 목록.
    pub const ALL: [Quantity; QUANTITY_COUNT] = [
        Quantity::FocalRatio,
        Quantity::FocalLength,
        Quantity::PrimaryDiameter,
        Quantity::Altitude,
        Quantity::GroundSampleDistance,
        Quantity::PixelPitch,
        Quantity::PixelCountX,
        Quantity::PixelCountY,
        Quantity::SensorSizeX,
        Quantity::SensorSizeY,
        Quantity::DiffractionLimitedAngle,
        Quantity::DiffractionLimitedSpot,
        Quantity::SamplingRatio,
        Quantity::SwathWidthX,
        Quantity::SwathWidthY,
        Quantity::Wavelength,
        Quantity::AngularFovX,
        Quantity::AngularFovY,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Quantity> {
        Self::ALL.get(index).copied()
    }

    /// 수식 표기에 쓰는 짧은 기호. 대소문자를 구분한다 (`f`와 `F`는 다른 양).
    pub fn symbol(self) -> &'static str {
        match self {
            Quantity::FocalRatio => "f",
            Quantity::FocalLength => "F",
            Quantity::PrimaryDiameter => "D",
            Quantity::Altitude => "A",
            Quantity::GroundSampleDistance => "g",
            Quantity::PixelPitch => "p",
            Quantity::PixelCountX => "Px",
            Quantity::PixelCountY => "Py",
            Quantity::SensorSizeX => "Sx",
            Quantity::SensorSizeY => "Sy",
            Quantity::DiffractionLimitedAngle => "theta_d",
            Quantity::DiffractionLimitedSpot => "d",
            Quantity::SamplingRatio => "Q",
            Quantity::SwathWidthX => "Wx",
            Quantity::SwathWidthY => "Wy",
            Quantity::Wavelength => "wl",
            Quantity::AngularFovX => "alpha_x",
            Quantity::AngularFovY => "alpha_y",
        }
    }

    /// 화면 표시용 이름.
    pub fn name(self) -> &'static str {
        match self {
            Quantity::FocalRatio => "Focal Ratio",
            Quantity::FocalLength => "Focal Length",
            Quantity::PrimaryDiameter => "Primary Diameter",
            Quantity::Altitude => "Altitude",
            Quantity::GroundSampleDistance => "GSD",
            Quantity::PixelPitch => "Pixel Pitch",
            Quantity::PixelCountX => "X Pixels",
            Quantity::PixelCountY => "Y Pixels",
            Quantity::SensorSizeX => "Sens. Size X",
            Quantity::SensorSizeY => "Sens. Size Y",
            Quantity::DiffractionLimitedAngle => "Diff. Lim. Angle",
            Quantity::DiffractionLimitedSpot => "Diff. Lim. GSD",
            Quantity::SamplingRatio => "Q",
            Quantity::SwathWidthX => "Swath Width X",
            Quantity::SwathWidthY => "Swath Width Y",
            Quantity::Wavelength => "Wavelength",
            Quantity::AngularFovX => "Ang. FoV X",
            Quantity::AngularFovY => "Ang. FoV Y",
        }
    }

    /// 설정 파일이나 명령행에서 쓰는 snake_case 키.
    pub fn key(self) -> &'static str {
        match self {
            Quantity::FocalRatio => "focal_ratio",
            Quantity::FocalLength => "focal_length",
            Quantity::PrimaryDiameter => "primary_diameter",
            Quantity::Altitude => "altitude",
            Quantity::GroundSampleDistance => "ground_sample_distance",
            Quantity::PixelPitch => "pixel_pitch",
            Quantity::PixelCountX => "pixel_count_x",
            Quantity::PixelCountY => "pixel_count_y",
            Quantity::SensorSizeX => "sensor_size_x",
            Quantity::SensorSizeY => "sensor_size_y",
            Quantity::DiffractionLimitedAngle => "diffraction_limited_angle",
            Quantity::DiffractionLimitedSpot => "diffraction_limited_spot",
            Quantity::SamplingRatio => "sampling_ratio",
            Quantity::SwathWidthX => "swath_width_x",
            Quantity::SwathWidthY => "swath_width_y",
            Quantity::Wavelength => "wavelength",
            Quantity::AngularFovX => "angular_fov_x",
            Quantity::AngularFovY => "angular_fov_y",
        }
    }

    pub fn kind(self) -> QuantityKind {
        match self {
            Quantity::FocalRatio
            | Quantity::PixelCountX
            | Quantity::PixelCountY
            | Quantity::SamplingRatio => QuantityKind::Dimensionless,
            Quantity::DiffractionLimitedAngle | Quantity::AngularFovX | Quantity::AngularFovY => {
                QuantityKind::Angle
            }
            _ => QuantityKind::Length,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Quantity {
    type Err = UnknownQuantity;

    /// 기호는 대소문자를 구분해 먼저 찾고, 없으면 snake_case 키를 대소문자 무시로 찾는다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(q) = Quantity::ALL.iter().find(|q| q.symbol() == s) {
            return Ok(*q);
        }
        let lower = s.to_lowercase();
        Quantity::ALL
            .iter()
            .find(|q| q.key() == lower)
            .copied()
            .ok_or_else(|| UnknownQuantity(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_registry_order() {
        for (i, q) in Quantity::ALL.iter().enumerate() {
            assert_eq!(q.index(), i);
            assert_eq!(Quantity::from_index(i), Some(*q));
        }
        assert_eq!(Quantity::from_index(QUANTITY_COUNT), None);
    }

    #[test]
    fn symbols_are_case_sensitive() {
        assert_eq!("f".parse::<Quantity>(), Ok(Quantity::FocalRatio));
        assert_eq!("F".parse::<Quantity>(), Ok(Quantity::FocalLength));
        assert_eq!("Focal_Length".parse::<Quantity>(), Ok(Quantity::FocalLength));
        assert!("zz".parse::<Quantity>().is_err());
    }

    #[test]
    fn kinds() {
        assert_eq!(Quantity::SamplingRatio.kind(), QuantityKind::Dimensionless);
        assert_eq!(Quantity::AngularFovY.kind(), QuantityKind::Angle);
        assert_eq!(Quantity::Wavelength.kind(), QuantityKind::Length);
    }
}
