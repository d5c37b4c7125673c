use std::collections::BTreeMap;

use crate::quantity::Quantity;

/// 고정값이 유한한 양수가 아닐 때의 오류. 이 경우 핀 집합은 바뀌지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("invalid value {value} for {quantity}: must be a finite positive number")]
pub struct InvalidPin {
    pub quantity: Quantity,
    pub value: f64,
}

/// 사용자가 직접 고정한 물리량과 그 값(내부 기준 단위).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PinSet {
    values: BTreeMap<Quantity, f64>,
}

impl PinSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 값을 고정한다. 이전에 고정된 값이 있으면 돌려준다.
    pub fn pin(&mut self, quantity: Quantity, value: f64) -> Result<Option<f64>, InvalidPin> {
        if !value.is_finite() || value <= 0.0 {
            return Err(InvalidPin { quantity, value });
        }
        Ok(self.values.insert(quantity, value))
    }

    /// 고정을 해제한다.
    pub fn unpin(&mut self, quantity: Quantity) -> Option<f64> {
        self.values.remove(&quantity)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn get(&self, quantity: Quantity) -> Option<f64> {
        self.values.get(&quantity).copied()
    }

    pub fn contains(&self, quantity: Quantity) -> bool {
        self.values.contains_key(&quantity)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 레지스트리 순서로 순회한다.
    pub fn iter(&self) -> impl Iterator<Item = (Quantity, f64)> + '_ {
        self.values.iter().map(|(q, v)| (*q, *v))
    }

    /// 여러 값을 한 번에 고정한다. 하나라도 잘못되면 아무것도 만들지 않는다.
    pub fn try_from_pairs<I>(pairs: I) -> Result<Self, InvalidPin>
    where
        I: IntoIterator<Item = (Quantity, f64)>,
    {
        let mut pins = PinSet::new();
        for (quantity, value) in pairs {
            pins.pin(quantity, value)?;
        }
        Ok(pins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_and_non_finite() {
        let mut pins = PinSet::new();
        pins.pin(Quantity::Altitude, 10.0).unwrap();
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = pins.pin(Quantity::Altitude, bad).unwrap_err();
            assert_eq!(err.quantity, Quantity::Altitude);
        }
        assert_eq!(pins.get(Quantity::Altitude), Some(10.0));
    }

    #[test]
    fn repin_returns_previous() {
        let mut pins = PinSet::new();
        assert_eq!(pins.pin(Quantity::FocalLength, 1.0).unwrap(), None);
        assert_eq!(pins.pin(Quantity::FocalLength, 2.0).unwrap(), Some(1.0));
        assert_eq!(pins.unpin(Quantity::FocalLength), Some(2.0));
        assert!(pins.is_empty());
    }

    #[test]
    fn iterates_in_registry_order() {
        let pins = PinSet::try_from_pairs([
            (Quantity::Wavelength, 1.0),
            (Quantity::FocalRatio, 2.0),
            (Quantity::Altitude, 3.0),
        ])
        .unwrap();
        let order: Vec<_> = pins.iter().map(|(q, _)| q).collect();
        assert_eq!(
            order,
            vec![Quantity::FocalRatio, Quantity::Altitude, Quantity::Wavelength]
        );
    }
}
