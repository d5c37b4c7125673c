use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::quantity::QuantityKind;
use crate::solver::SolverConfig;
use crate::units::*;

/// 기본 설정 파일 경로.
pub const CONFIG_FILE: &str = "config.toml";

/// 사용 가능한 단위 시스템 프리셋을 정의한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitSystem {
    /// 인치/라디안. 내부 계산 기준과 같다.
    Imperial,
    /// 미터/밀리라디안
    Metric,
}

impl UnitSystem {
    pub fn default_units(self) -> DefaultUnits {
        match self {
            UnitSystem::Imperial => DefaultUnits {
                length: LengthUnit::Inch,
                angle: AngleUnit::Radian,
            },
            UnitSystem::Metric => DefaultUnits {
                length: LengthUnit::Meter,
                angle: AngleUnit::Milliradian,
            },
        }
    }
}

/// 차원별 기본 표시 단위.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultUnits {
    pub length: LengthUnit,
    pub angle: AngleUnit,
}

impl Default for DefaultUnits {
    fn default() -> Self {
        UnitSystem::Imperial.default_units()
    }
}

impl DefaultUnits {
    /// 차원에 맞는 기본 표시 단위.
    pub fn for_kind(&self, kind: QuantityKind) -> DisplayUnit {
        match kind {
            QuantityKind::Length => DisplayUnit::Length(self.length),
            QuantityKind::Angle => DisplayUnit::Angle(self.angle),
            QuantityKind::Dimensionless => DisplayUnit::Unitless,
        }
    }
}

/// 애플리케이션 설정을 표현한다. 고정값(핀)은 저장하지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드. "auto"면 시스템 로케일을 따른다.
    pub language: String,
    pub unit_system: UnitSystem,
    pub default_units: DefaultUnits,
    pub solver: SolverConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            unit_system: UnitSystem::Imperial,
            default_units: DefaultUnits::default(),
            solver: SolverConfig::default(),
        }
    }
}

impl Config {
    /// 단위 시스템 프리셋을 바꾸고 기본 단위도 함께 맞춘다.
    pub fn apply_unit_system(&mut self, system: UnitSystem) {
        self.unit_system = system;
        self.default_units = system.default_units();
    }

    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(CONFIG_FILE)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), content)?;
        info!(path = %path.as_ref().display(), "config saved");
        Ok(())
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("config file I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_from(CONFIG_FILE)
}

/// 지정 경로의 설정을 로드한다. 파일이 없으면 기본값으로 새로 만든다.
pub fn load_from(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        info!(path = %path.display(), "creating default config");
        cfg.save_to(path)?;
        Ok(cfg)
    }
}
