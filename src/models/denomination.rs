use serde::{Deserialize, Serialize};
use std::fmt;

/// Bill denomination, whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum Denomination {
    One,
    Five,
    Ten,
    Twenty,
}

/// All denominations, largest first. Every enumeration in the crate walks this order.
pub const DENOMINATIONS: [Denomination; 4] = [
    Denomination::Twenty,
    Denomination::Ten,
    Denomination::Five,
    Denomination::One,
];

impl Denomination {
    pub const fn value(self) -> u32 {
        match self {
            Denomination::Twenty => 20,
            Denomination::Ten => 10,
            Denomination::Five => 5,
            Denomination::One => 1,
        }
    }

    pub fn from_value(value: u32) -> Option<Self> {
        DENOMINATIONS.into_iter().find(|d| d.value() == value)
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.value())
    }
}

impl From<Denomination> for u32 {
    fn from(d: Denomination) -> Self {
        d.value()
    }
}

impl TryFrom<u32> for Denomination {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_value(value).ok_or_else(|| format!("unsupported denomination: {}", value))
    }
}

/// One line of a breakdown: `quantity` bills of `denomination`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillCount {
    pub denomination: Denomination,
    pub quantity: u32,
}

impl BillCount {
    pub fn value(&self) -> u64 {
        u64::from(self.denomination.value()) * u64::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denominations_are_descending() {
        let values: Vec<u32> = DENOMINATIONS.iter().map(|d| d.value()).collect();
        assert_eq!(values, vec![20, 10, 5, 1]);
    }

    #[test]
    fn serializes_as_face_value() {
        let json = serde_json::to_string(&Denomination::Five).unwrap();
        assert_eq!(json, "5");
        let back: Denomination = serde_json::from_str("20").unwrap();
        assert_eq!(back, Denomination::Twenty);
    }

    #[test]
    fn rejects_unknown_face_value() {
        assert!(serde_json::from_str::<Denomination>("50").is_err());
        assert_eq!(Denomination::from_value(2), None);
    }
}
