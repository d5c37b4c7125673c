//! 물리량 사이의 고정 관계식 모음.
//!
//! 모든 관계식은 `output = constant × ∏ input^exponent` 형태의 단항식이며 지수는 ±1 뿐이다.

use std::fmt;

use crate::quantity::Quantity;

/// 단항식의 한 인자.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Factor {
    pub quantity: Quantity,
    /// +1 또는 -1
    pub exponent: i8,
}

const fn mul(quantity: Quantity) -> Factor {
    Factor {
        quantity,
        exponent: 1,
    }
}

const fn div(quantity: Quantity) -> Factor {
    Factor {
        quantity,
        exponent: -1,
    }
}

/// 단항식 관계 하나.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relation {
    pub output: Quantity,
    pub coefficient: f64,
    pub factors: &'static [Factor],
}

impl Relation {
    /// 모든 입력이 알려져 있으면 우변 값을 계산한다.
    pub fn evaluate<F>(&self, lookup: F) -> Option<f64>
    where
        F: Fn(Quantity) -> Option<f64>,
    {
        self.factors.iter().try_fold(self.coefficient, |acc, factor| {
            let v = lookup(factor.quantity)?;
            Some(if factor.exponent > 0 { acc * v } else { acc / v })
        })
    }

    /// `|lhs / rhs - 1|`. 관계식의 멤버 중 하나라도 값이 없으면 None.
    pub fn relative_residual<F>(&self, lookup: F) -> Option<f64>
    where
        F: Fn(Quantity) -> Option<f64>,
    {
        let lhs = lookup(self.output)?;
        let rhs = self.evaluate(&lookup)?;
        Some((lhs / rhs - 1.0).abs())
    }

    /// 좌변과 우변에 등장하는 모든 물리량.
    pub fn members(&self) -> impl Iterator<Item = Quantity> + '_ {
        std::iter::once(self.output).chain(self.factors.iter().map(|f| f.quantity))
    }

    pub fn involves(&self, quantity: Quantity) -> bool {
        self.members().any(|q| q == quantity)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = ", self.output)?;
        let mut first = true;
        if self.coefficient != 1.0 {
            write!(f, "{}", self.coefficient)?;
            first = false;
        }
        for factor in self.factors.iter().filter(|fa| fa.exponent > 0) {
            if !first {
                f.write_str(" · ")?;
            }
            write!(f, "{}", factor.quantity)?;
            first = false;
        }
        if first {
            f.write_str("1")?;
        }
        for factor in self.factors.iter().filter(|fa| fa.exponent < 0) {
            write!(f, " / {}", factor.quantity)?;
        }
        Ok(())
    }
}

/// 회절 한계 각도의 계수 (원형 개구의 첫 번째 암환).
pub const AIRY_COEFFICIENT: f64 = 1.22;

use crate::quantity::Quantity::*;

static STANDARD_RELATIONS: [Relation; 11] = [
    Relation {
        output: FocalRatio,
        coefficient: 1.0,
        factors: &[mul(FocalLength), div(PrimaryDiameter)],
    },
    Relation {
        output: AngularFovX,
        coefficient: 1.0,
        factors: &[mul(SensorSizeX), div(FocalLength)],
    },
    Relation {
        output: AngularFovY,
        coefficient: 1.0,
        factors: &[mul(SensorSizeY), div(FocalLength)],
    },
    Relation {
        output: SwathWidthX,
        coefficient: 1.0,
        factors: &[mul(Altitude), mul(SensorSizeX), div(FocalLength)],
    },
    Relation {
        output: SwathWidthY,
        coefficient: 1.0,
        factors: &[mul(Altitude), mul(SensorSizeY), div(FocalLength)],
    },
    Relation {
        output: GroundSampleDistance,
        coefficient: 1.0,
        factors: &[mul(Altitude), mul(PixelPitch), div(FocalLength)],
    },
    Relation {
        output: DiffractionLimitedAngle,
        coefficient: AIRY_COEFFICIENT,
        factors: &[mul(Wavelength), div(PrimaryDiameter)],
    },
    Relation {
        output: DiffractionLimitedSpot,
        coefficient: 1.0,
        factors: &[mul(DiffractionLimitedAngle), mul(Altitude)],
    },
    Relation {
        output: SensorSizeX,
        coefficient: 1.0,
        factors: &[mul(PixelPitch), mul(PixelCountX)],
    },
    Relation {
        output: SensorSizeY,
        coefficient: 1.0,
        factors: &[mul(PixelPitch), mul(PixelCountY)],
    },
    Relation {
        output: SamplingRatio,
        coefficient: 1.0,
        factors: &[mul(DiffractionLimitedSpot), div(GroundSampleDistance)],
    },
];

/// 불변 관계식 집합. 정적 데이터에 대한 참조일 뿐이므로 복사와 스레드 간 공유가 자유롭다.
#[derive(Debug, Clone, Copy)]
pub struct RelationSet {
    relations: &'static [Relation],
}

impl RelationSet {
    /// 광학/센서/고도 관계식 11개.
    pub fn standard() -> Self {
        Self {
            relations: &STANDARD_RELATIONS,
        }
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'static Relation> {
        self.relations.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'static, Relation> {
        self.relations.iter()
    }

    /// 주어진 물리량을 포함하는 관계식의 인덱스.
    pub fn involving(&self, quantity: Quantity) -> Vec<usize> {
        self.relations
            .iter()
            .enumerate()
            .filter(|(_, r)| r.involves(quantity))
            .map(|(i, _)| i)
            .collect()
    }

    /// 모든 관계식 중 가장 큰 상대 잔차. 값이 빠진 관계식이 있으면 None.
    pub fn max_relative_residual<F>(&self, lookup: F) -> Option<f64>
    where
        F: Fn(Quantity) -> Option<f64>,
    {
        self.relations.iter().try_fold(0.0_f64, |worst, r| {
            r.relative_residual(&lookup).map(|res| worst.max(res))
        })
    }
}

impl Default for RelationSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> IntoIterator for &'a RelationSet {
    type Item = &'static Relation;
    type IntoIter = std::slice::Iter<'static, Relation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_set_has_distinct_outputs() {
        let set = RelationSet::standard();
        assert_eq!(set.len(), 11);
        let mut outputs: Vec<_> = set.iter().map(|r| r.output).collect();
        outputs.sort();
        outputs.dedup();
        assert_eq!(outputs.len(), 11);
    }

    #[test]
    fn exponents_are_unit() {
        for r in &RelationSet::standard() {
            assert!(r.factors.iter().all(|f| f.exponent == 1 || f.exponent == -1));
        }
    }

    #[test]
    fn display_formats() {
        let set = RelationSet::standard();
        assert_eq!(set.get(0).map(|r| r.to_string()).as_deref(), Some("f = F / D"));
        assert_eq!(
            set.get(6).map(|r| r.to_string()).as_deref(),
            Some("theta_d = 1.22 · wl / D")
        );
        assert_eq!(
            set.get(3).map(|r| r.to_string()).as_deref(),
            Some("Wx = A · Sx / F")
        );
    }

    #[test]
    fn evaluate_needs_all_inputs() {
        let rel = RelationSet::standard().get(0).copied().expect("relation 1");
        let lookup = |q: Quantity| match q {
            Quantity::FocalLength => Some(400.0),
            Quantity::PrimaryDiameter => Some(100.0),
            _ => None,
        };
        assert_eq!(rel.evaluate(lookup), Some(4.0));
        assert_eq!(rel.relative_residual(lookup), None);
        assert_eq!(rel.evaluate(|_| None), None);
    }

    #[test]
    fn involving_focal_length() {
        let idx = RelationSet::standard().involving(Quantity::FocalLength);
        assert_eq!(idx, vec![0, 1, 2, 3, 4, 5]);
    }
}
