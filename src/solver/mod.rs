//! 핀 집합과 관계식을 결합해 나머지 물리량을 구하는 제약 해석기.
//!
//! 모든 관계식이 양수에 대한 단항식이므로 `x = ln(value)` 치환으로 선형계가 된다.
//! 관계식 11행과 핀 행을 쌓아 가우스-조르단 소거를 한 번 수행하고,
//! - 계수가 모두 0인데 우변이 남는 행이 있으면 모순,
//! - 자유 열에 묶이지 않은 피벗 변수는 결정,
//! - 나머지는 미결정으로 보고한다.
//!
//! 반복이나 근 찾기가 없으므로 항상 유한 시간에 끝나고 결과는 결정적이다.

mod elimination;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::pins::PinSet;
use crate::quantity::{Quantity, QUANTITY_COUNT};
use crate::relation::RelationSet;

use elimination::LinearSystem;

/// 해석기 허용오차. `config.toml`의 `[solver]` 테이블에 대응한다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// 모순 판정 기준. 로그 공간의 차이이므로 곧 상대 오차다.
    pub tolerance: f64,
    /// 이보다 작은 계수는 0으로 본다.
    pub pivot_epsilon: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            pivot_epsilon: 1e-12,
        }
    }
}

/// 한 번의 해석 결과. 결정된 물리량만 값을 가진다.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    values: BTreeMap<Quantity, f64>,
    degrees_of_freedom: usize,
}

impl Solution {
    pub fn get(&self, quantity: Quantity) -> Option<f64> {
        self.values.get(&quantity).copied()
    }

    pub fn is_determined(&self, quantity: Quantity) -> bool {
        self.values.contains_key(&quantity)
    }

    /// 결정된 값들을 레지스트리 순서로 순회한다.
    pub fn iter(&self) -> impl Iterator<Item = (Quantity, f64)> + '_ {
        self.values.iter().map(|(q, v)| (*q, *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 결정되지 않은 물리량.
    pub fn undetermined(&self) -> Vec<Quantity> {
        Quantity::ALL
            .iter()
            .copied()
            .filter(|q| !self.values.contains_key(q))
            .collect()
    }

    /// 18개 모두 결정되었는지.
    pub fn is_complete(&self) -> bool {
        self.values.len() == QUANTITY_COUNT
    }

    /// 선형계의 자유도 (미지수 수 - 계수). 0이면 모든 값이 결정된다.
    pub fn degrees_of_freedom(&self) -> usize {
        self.degrees_of_freedom
    }
}

/// 고정값들이 관계식과 동시에 성립할 수 없음을 나타낸다.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error(
    "pinned values contradict the relations (pins: {}; relative discrepancy {:.3e})",
    symbols(.pins),
    discrepancy(.log_discrepancy)
)]
pub struct Contradiction {
    /// 모순에 관여한 고정 물리량 (레지스트리 순서)
    pub pins: Vec<Quantity>,
    /// 모순에 관여한 관계식 인덱스 (0부터)
    pub relations: Vec<usize>,
    /// 같은 양을 두 경로로 유도했을 때의 로그 차이
    pub log_discrepancy: f64,
}

impl Contradiction {
    /// 두 유도값의 상대 차이 `exp(|r|) - 1`.
    pub fn relative_discrepancy(&self) -> f64 {
        relative(self.log_discrepancy)
    }

    pub fn involves(&self, quantity: Quantity) -> bool {
        self.pins.contains(&quantity)
    }
}

fn relative(log_discrepancy: f64) -> f64 {
    log_discrepancy.abs().exp_m1()
}

fn discrepancy(log_discrepancy: &f64) -> f64 {
    relative(*log_discrepancy)
}

fn symbols(pins: &[Quantity]) -> String {
    pins.iter()
        .map(|q| q.symbol())
        .collect::<Vec<_>>()
        .join(", ")
}

/// 관계식 집합과 허용오차를 묶은 해석기. 상태가 없으므로 여러 번 재사용해도 된다.
#[derive(Debug, Clone, Copy, Default)]
pub struct Solver {
    relations: RelationSet,
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            relations: RelationSet::standard(),
            config,
        }
    }

    pub fn relations(&self) -> RelationSet {
        self.relations
    }

    pub fn config(&self) -> SolverConfig {
        self.config
    }

    /// 핀 집합을 해석한다. 같은 입력에는 항상 같은 결과를 돌려준다.
    pub fn resolve(&self, pins: &PinSet) -> Result<Solution, Contradiction> {
        let relation_rows = self.relations.len();
        let rows = relation_rows + pins.len();
        let mut system = LinearSystem::new(rows, QUANTITY_COUNT);

        for (row, relation) in self.relations.iter().enumerate() {
            system.add_coefficient(row, relation.output.index(), 1.0);
            for factor in relation.factors {
                system.add_coefficient(row, factor.quantity.index(), -f64::from(factor.exponent));
            }
            system.set_rhs(row, relation.coefficient.ln());
        }

        let pinned: Vec<(Quantity, f64)> = pins.iter().collect();
        for (offset, (quantity, value)) in pinned.iter().enumerate() {
            let row = relation_rows + offset;
            system.add_coefficient(row, quantity.index(), 1.0);
            system.set_rhs(row, value.ln());
        }

        let echelon = system.reduce(self.config.pivot_epsilon);
        let rank = echelon.rank();
        debug!(rows, rank, pins = pins.len(), "log-linear system reduced");

        if let Some(inc) = echelon.inconsistency(self.config.tolerance) {
            let mut contradiction = Contradiction {
                pins: Vec::new(),
                relations: Vec::new(),
                log_discrepancy: inc.residual,
            };
            for row in inc.source_rows {
                if row < relation_rows {
                    contradiction.relations.push(row);
                } else {
                    contradiction.pins.push(pinned[row - relation_rows].0);
                }
            }
            contradiction.pins.sort();
            info!(%contradiction, "resolution failed");
            return Err(contradiction);
        }

        let mut values = BTreeMap::new();
        for (col, log_value) in echelon.determined().into_iter().enumerate() {
            let (Some(quantity), Some(x)) = (Quantity::from_index(col), log_value) else {
                continue;
            };
            // 고정값은 로그 왕복 오차 없이 그대로 돌려준다.
            let value = pins.get(quantity).unwrap_or_else(|| x.exp());
            values.insert(quantity, value);
        }
        debug!(determined = values.len(), "resolution complete");

        Ok(Solution {
            values,
            degrees_of_freedom: QUANTITY_COUNT - rank,
        })
    }
}

/// 표준 관계식과 기본 허용오차로 해석한다.
pub fn resolve(pins: &PinSet) -> Result<Solution, Contradiction> {
    Solver::default().resolve(pins)
}
