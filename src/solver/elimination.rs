//! 행 출처를 추적하는 가우스-조르단 소거.

use nalgebra::DMatrix;

/// `A·x = b` 형태의 선형계. 행을 채운 뒤 [`LinearSystem::reduce`]로 소거한다.
#[derive(Debug, Clone)]
pub(crate) struct LinearSystem {
    coefficients: DMatrix<f64>,
    rhs: Vec<f64>,
}

impl LinearSystem {
    pub(crate) fn new(rows: usize, unknowns: usize) -> Self {
        Self {
            coefficients: DMatrix::zeros(rows, unknowns),
            rhs: vec![0.0; rows],
        }
    }

    pub(crate) fn add_coefficient(&mut self, row: usize, col: usize, value: f64) {
        self.coefficients[(row, col)] += value;
    }

    pub(crate) fn set_rhs(&mut self, row: usize, value: f64) {
        self.rhs[row] = value;
    }

    /// 부분 피벗팅으로 기약 행사다리꼴을 만든다.
    ///
    /// 내부적으로 `[A | b | I]`를 소거하므로, 결과의 각 행이 원래 어떤 행들의
    /// 선형결합인지 단위행렬 블록에 남는다.
    pub(crate) fn reduce(self, pivot_epsilon: f64) -> Echelon {
        let rows = self.coefficients.nrows();
        let unknowns = self.coefficients.ncols();
        let width = unknowns + 1 + rows;

        let mut aug = DMatrix::<f64>::zeros(rows, width);
        for r in 0..rows {
            for c in 0..unknowns {
                aug[(r, c)] = self.coefficients[(r, c)];
            }
            aug[(r, unknowns)] = self.rhs[r];
            aug[(r, unknowns + 1 + r)] = 1.0;
        }

        let mut pivots = Vec::new();
        let mut rank = 0;
        for col in 0..unknowns {
            if rank == rows {
                break;
            }
            let mut best_row = rank;
            let mut best_abs = aug[(rank, col)].abs();
            for r in rank + 1..rows {
                let a = aug[(r, col)].abs();
                if a > best_abs {
                    best_row = r;
                    best_abs = a;
                }
            }
            if best_abs <= pivot_epsilon {
                continue;
            }
            aug.swap_rows(rank, best_row);

            let pivot = aug[(rank, col)];
            for c in 0..width {
                aug[(rank, c)] /= pivot;
            }
            for r in 0..rows {
                if r == rank {
                    continue;
                }
                let factor = aug[(r, col)];
                if factor == 0.0 {
                    continue;
                }
                for c in 0..width {
                    let v = aug[(rank, c)];
                    aug[(r, c)] -= factor * v;
                }
                aug[(r, col)] = 0.0;
            }
            pivots.push((rank, col));
            rank += 1;
        }

        Echelon {
            aug,
            rows,
            unknowns,
            pivots,
            epsilon: pivot_epsilon,
        }
    }
}

/// 모순 행 하나: 계수는 모두 0인데 우변이 0이 아님.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Inconsistency {
    pub residual: f64,
    /// 이 행을 만든 원래 행 번호들 (오름차순)
    pub source_rows: Vec<usize>,
}

/// 소거가 끝난 선형계.
#[derive(Debug, Clone)]
pub(crate) struct Echelon {
    aug: DMatrix<f64>,
    rows: usize,
    unknowns: usize,
    pivots: Vec<(usize, usize)>,
    epsilon: f64,
}

impl Echelon {
    pub(crate) fn rank(&self) -> usize {
        self.pivots.len()
    }

    fn is_pivot_column(&self, col: usize) -> bool {
        self.pivots.iter().any(|&(_, c)| c == col)
    }

    /// 허용오차를 넘는 모순 행 중 잔차가 가장 큰 것을 찾는다.
    pub(crate) fn inconsistency(&self, tolerance: f64) -> Option<Inconsistency> {
        let rhs_col = self.unknowns;
        let worst = (self.rank()..self.rows)
            .map(|r| (r, self.aug[(r, rhs_col)]))
            .filter(|(_, residual)| residual.abs() > tolerance)
            .fold(None::<(usize, f64)>, |best, (r, residual)| match best {
                Some((_, b)) if b.abs() >= residual.abs() => best,
                _ => Some((r, residual)),
            })?;

        let (row, residual) = worst;
        let source_rows = (0..self.rows)
            .filter(|&k| self.aug[(row, rhs_col + 1 + k)].abs() > self.epsilon)
            .collect();
        Some(Inconsistency {
            residual,
            source_rows,
        })
    }

    /// 미지수별 해. 자유 변수에 묶인 미지수는 None.
    pub(crate) fn determined(&self) -> Vec<Option<f64>> {
        let free: Vec<usize> = (0..self.unknowns)
            .filter(|&c| !self.is_pivot_column(c))
            .collect();
        let mut out = vec![None; self.unknowns];
        for &(row, col) in &self.pivots {
            let bound_to_free = free
                .iter()
                .any(|&fc| self.aug[(row, fc)].abs() > self.epsilon);
            if !bound_to_free {
                out[col] = Some(self.aug[(row, self.unknowns)]);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_solution() {
        // x + y = 3, x - y = 1
        let mut sys = LinearSystem::new(2, 2);
        sys.add_coefficient(0, 0, 1.0);
        sys.add_coefficient(0, 1, 1.0);
        sys.set_rhs(0, 3.0);
        sys.add_coefficient(1, 0, 1.0);
        sys.add_coefficient(1, 1, -1.0);
        sys.set_rhs(1, 1.0);
        let ech = sys.reduce(1e-12);
        assert_eq!(ech.rank(), 2);
        assert!(ech.inconsistency(1e-9).is_none());
        let sol = ech.determined();
        assert!((sol[0].unwrap() - 2.0).abs() < 1e-12);
        assert!((sol[1].unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn partially_determined() {
        // x = 1, y + z = 2
        let mut sys = LinearSystem::new(2, 3);
        sys.add_coefficient(0, 0, 1.0);
        sys.set_rhs(0, 1.0);
        sys.add_coefficient(1, 1, 1.0);
        sys.add_coefficient(1, 2, 1.0);
        sys.set_rhs(1, 2.0);
        let sol = sys.reduce(1e-12).determined();
        assert_eq!(sol[0], Some(1.0));
        assert_eq!(sol[1], None);
        assert_eq!(sol[2], None);
    }

    #[test]
    fn inconsistent_rows_are_traced() {
        // x = 1, y = 5, x - y = 0  (row 2 contradicts rows 0 and 1)
        let mut sys = LinearSystem::new(3, 2);
        sys.add_coefficient(0, 0, 1.0);
        sys.set_rhs(0, 1.0);
        sys.add_coefficient(1, 1, 1.0);
        sys.set_rhs(1, 5.0);
        sys.add_coefficient(2, 0, 1.0);
        sys.add_coefficient(2, 1, -1.0);
        let ech = sys.reduce(1e-12);
        let inc = ech.inconsistency(1e-9).expect("inconsistent");
        assert!((inc.residual.abs() - 4.0).abs() < 1e-12);
        assert_eq!(inc.source_rows, vec![0, 1, 2]);
    }
}
