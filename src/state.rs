use crate::pins::PinSet;
use crate::quantity::{Quantity, QUANTITY_COUNT};
use crate::solver::{Contradiction, Solution};

/// 각 물리량의 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamStatus {
    /// 고정되지도 유도되지도 않음
    Unset,
    /// 사용자가 직접 고정함
    Manual,
    /// 해석기가 유도함
    Computed,
    /// 해석이 모순으로 실패해 값을 줄 수 없음
    Overconstrained,
}

/// 한 번의 해석에 대한 물리량별 상태. 해석할 때마다 새로 만든다.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    statuses: [ParamStatus; QUANTITY_COUNT],
    conflicting: Vec<Quantity>,
}

impl Classification {
    pub fn status(&self, quantity: Quantity) -> ParamStatus {
        self.statuses[quantity.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Quantity, ParamStatus)> + '_ {
        Quantity::ALL.iter().map(|q| (*q, self.statuses[q.index()]))
    }

    pub fn count(&self, status: ParamStatus) -> usize {
        self.statuses.iter().filter(|s| **s == status).count()
    }

    /// 해석 전체가 모순으로 실패했는지.
    pub fn is_overconstrained(&self) -> bool {
        self.statuses.contains(&ParamStatus::Overconstrained)
            || !self.conflicting.is_empty()
    }

    /// 모순에 관여한 고정값이면 true. 화면에서 강조할 때 쓴다.
    pub fn is_conflicting(&self, quantity: Quantity) -> bool {
        self.conflicting.contains(&quantity)
    }
}

/// 핀 집합과 해석 결과로부터 상태를 정한다.
///
/// 모순이면 고정값은 Manual로 남고 나머지는 모두 Overconstrained가 된다.
pub fn classify(pins: &PinSet, outcome: &Result<Solution, Contradiction>) -> Classification {
    let mut statuses = [ParamStatus::Unset; QUANTITY_COUNT];
    for q in Quantity::ALL {
        statuses[q.index()] = if pins.contains(q) {
            ParamStatus::Manual
        } else {
            match outcome {
                Ok(solution) if solution.is_determined(q) => ParamStatus::Computed,
                Ok(_) => ParamStatus::Unset,
                Err(_) => ParamStatus::Overconstrained,
            }
        };
    }
    let conflicting = match outcome {
        Err(contradiction) => contradiction.pins.clone(),
        Ok(_) => Vec::new(),
    };
    Classification {
        statuses,
        conflicting,
    }
}
