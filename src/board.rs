//! 18칸 파라미터 보드. CLI와 GUI가 공유하는 화면 상태 모델이다.
//!
//! 각 칸은 표시 단위와 내부 기준 값을 들고 있고, 해석 요청이 올 때마다
//! 현재 고정값으로 처음부터 다시 계산한다.

use tracing::debug;

use crate::config::{Config, DefaultUnits};
use crate::conversion::{self, ConversionError};
use crate::pins::{InvalidPin, PinSet};
use crate::quantity::Quantity;
use crate::solver::{Contradiction, Solver};
use crate::state::{self, Classification, ParamStatus};
use crate::units::DisplayUnit;

/// 화면 배치 (6행 3열).
pub const LAYOUT: [[Quantity; 3]; 6] = [
    [
        Quantity::FocalRatio,
        Quantity::FocalLength,
        Quantity::PrimaryDiameter,
    ],
    [
        Quantity::Wavelength,
        Quantity::DiffractionLimitedAngle,
        Quantity::DiffractionLimitedSpot,
    ],
    [
        Quantity::Altitude,
        Quantity::GroundSampleDistance,
        Quantity::SamplingRatio,
    ],
    [
        Quantity::PixelPitch,
        Quantity::PixelCountX,
        Quantity::PixelCountY,
    ],
    [
        Quantity::SensorSizeX,
        Quantity::AngularFovX,
        Quantity::SwathWidthX,
    ],
    [
        Quantity::SensorSizeY,
        Quantity::AngularFovY,
        Quantity::SwathWidthY,
    ],
];

/// 보드 조작 중 발생 가능한 오류. 오류가 나면 보드는 바뀌지 않는다.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BoardError {
    #[error(transparent)]
    InvalidPin(#[from] InvalidPin),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// 보드의 한 칸.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    quantity: Quantity,
    unit: DisplayUnit,
    value: Option<f64>,
    status: ParamStatus,
    conflicting: bool,
}

impl Cell {
    fn new(quantity: Quantity, defaults: &DefaultUnits) -> Self {
        Self {
            quantity,
            unit: defaults.for_kind(quantity.kind()),
            value: None,
            status: ParamStatus::Unset,
            conflicting: false,
        }
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn unit(&self) -> DisplayUnit {
        self.unit
    }

    /// 내부 기준 단위 값.
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn status(&self) -> ParamStatus {
        self.status
    }

    /// 모순에 관여한 고정값인지.
    pub fn is_conflicting(&self) -> bool {
        self.conflicting
    }

    /// 표시 단위로 환산한 값.
    pub fn display_value(&self) -> Option<f64> {
        self.value.map(|v| self.unit.from_base(v))
    }

    /// 표시용 문자열. 값이 없으면 빈 문자열.
    pub fn display_text(&self) -> String {
        self.display_value()
            .map(conversion::format_value)
            .unwrap_or_default()
    }
}

/// 파라미터 보드.
#[derive(Debug, Clone)]
pub struct Board {
    cells: Vec<Cell>,
    pins: PinSet,
    solver: Solver,
    contradiction: Option<Contradiction>,
    degrees_of_freedom: Option<usize>,
}

impl Board {
    pub fn new(config: &Config) -> Self {
        let cells = Quantity::ALL
            .iter()
            .map(|q| Cell::new(*q, &config.default_units))
            .collect();
        Self {
            cells,
            pins: PinSet::new(),
            solver: Solver::new(config.solver),
            contradiction: None,
            degrees_of_freedom: None,
        }
    }

    pub fn cell(&self, quantity: Quantity) -> &Cell {
        &self.cells[quantity.index()]
    }

    fn cell_mut(&mut self, quantity: Quantity) -> &mut Cell {
        &mut self.cells[quantity.index()]
    }

    /// 레지스트리 순서의 모든 칸.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// 화면 배치 순서의 행들.
    pub fn rows(&self) -> impl Iterator<Item = [&Cell; 3]> + '_ {
        LAYOUT.into_iter().map(move |row| row.map(|q| self.cell(q)))
    }

    pub fn pins(&self) -> &PinSet {
        &self.pins
    }

    pub fn solver(&self) -> &Solver {
        &self.solver
    }

    /// 표시 단위 값으로 고정한다. 해석은 하지 않는다.
    pub fn pin(&mut self, quantity: Quantity, display_value: f64) -> Result<(), BoardError> {
        let unit = self.cell(quantity).unit;
        let base = unit.to_base(display_value);
        self.pins.pin(quantity, base)?;
        debug!(%quantity, base, "pinned");
        let cell = self.cell_mut(quantity);
        cell.value = Some(base);
        cell.status = ParamStatus::Manual;
        Ok(())
    }

    /// 고정을 해제하고 칸을 비운다.
    pub fn clear(&mut self, quantity: Quantity) {
        if self.pins.unpin(quantity).is_some() {
            debug!(%quantity, "unpinned");
        }
        let cell = self.cell_mut(quantity);
        cell.value = None;
        cell.status = ParamStatus::Unset;
        cell.conflicting = false;
    }

    pub fn clear_all(&mut self) {
        for q in Quantity::ALL {
            self.clear(q);
        }
        self.contradiction = None;
        self.degrees_of_freedom = None;
    }

    /// 입력 확정(Enter) 동작: 비어 있으면 지우고, 숫자면 고정한 뒤 다시 해석한다.
    pub fn submit(&mut self, quantity: Quantity, text: &str) -> Result<Classification, BoardError> {
        match conversion::parse_input(text)? {
            None => self.clear(quantity),
            Some(v) => self.pin(quantity, v)?,
        }
        Ok(self.resolve())
    }

    /// 현재 고정값으로 전체를 다시 해석하고 각 칸에 반영한다.
    pub fn resolve(&mut self) -> Classification {
        let outcome = self.solver.resolve(&self.pins);
        let classification = state::classify(&self.pins, &outcome);

        for q in Quantity::ALL {
            let status = classification.status(q);
            let pinned = self.pins.get(q);
            let computed = outcome.as_ref().ok().and_then(|s| s.get(q));
            let cell = self.cell_mut(q);
            cell.status = status;
            cell.conflicting = classification.is_conflicting(q);
            cell.value = match status {
                ParamStatus::Manual => pinned,
                ParamStatus::Computed => computed,
                ParamStatus::Unset | ParamStatus::Overconstrained => None,
            };
        }

        match outcome {
            Ok(solution) => {
                self.degrees_of_freedom = Some(solution.degrees_of_freedom());
                self.contradiction = None;
            }
            Err(contradiction) => {
                self.degrees_of_freedom = None;
                self.contradiction = Some(contradiction);
            }
        }
        classification
    }

    pub fn is_overconstrained(&self) -> bool {
        self.contradiction.is_some()
    }

    /// 마지막 해석이 모순이었다면 그 내용.
    pub fn contradiction(&self) -> Option<&Contradiction> {
        self.contradiction.as_ref()
    }

    /// 마지막 해석의 남은 자유도.
    pub fn degrees_of_freedom(&self) -> Option<usize> {
        self.degrees_of_freedom
    }

    /// 표시 단위를 다음 것으로 바꾼다.
    pub fn cycle_unit(&mut self, quantity: Quantity) -> DisplayUnit {
        let cell = self.cell_mut(quantity);
        cell.unit = cell.unit.next();
        cell.unit
    }

    /// 표시 단위를 지정한다. 차원이 맞지 않으면 오류.
    pub fn set_unit(&mut self, quantity: Quantity, unit: DisplayUnit) -> Result<(), ConversionError> {
        if unit.kind() != quantity.kind() {
            return Err(ConversionError::IncompatibleUnit {
                unit: unit.symbol().to_string(),
                kind: quantity.kind(),
            });
        }
        self.cell_mut(quantity).unit = unit;
        Ok(())
    }

    /// 모든 칸의 표시 단위를 기본값으로 되돌린다.
    pub fn apply_default_units(&mut self, defaults: &DefaultUnits) {
        for cell in &mut self.cells {
            cell.unit = defaults.for_kind(cell.quantity.kind());
        }
    }

    pub fn display_value(&self, quantity: Quantity) -> Option<f64> {
        self.cell(quantity).display_value()
    }
}
