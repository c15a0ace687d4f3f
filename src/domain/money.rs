use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use crate::domain::Error;

/// Exact signed amount of money.
///
/// Every operation returns a new value; additions are checked so that
/// exceeding the decimal range is reported instead of silently wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);
    pub const DISPLAY_DECIMALS: usize = 4;

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn of(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }

    pub fn add(self, other: Money) -> Result<Money, Error> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or(Error::Overflow)
    }

    pub fn subtract(self, other: Money) -> Result<Money, Error> {
        self.add(other.negate())
    }

    pub fn negate(self) -> Money {
        Money(-self.0)
    }

    pub fn is_positive_or_zero(&self) -> bool {
        self.0 >= Decimal::ZERO
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl FromStr for Money {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::Validation("Money amount is empty".to_string()));
        }
        Decimal::from_str_exact(s)
            .map(Money)
            .map_err(|e| Error::Validation(format!("Invalid Money format {}: {}", s, e)))
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.*}", Self::DISPLAY_DECIMALS, self.0)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Money>().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::Money;
    use crate::domain::Error;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn money() -> impl Strategy<Value = Money> {
        (any::<i64>(), 0u32..=4).prop_map(|(mantissa, scale)| Money::new(Decimal::new(mantissa, scale)))
    }

    #[test]
    fn zero_is_the_identity_of_add() {
        let amount = Money::of(42);
        assert_eq!(amount.add(Money::ZERO).unwrap(), amount);
        assert_eq!(Money::ZERO.add(amount).unwrap(), amount);
    }

    #[test]
    fn add_reports_overflow() {
        let max = Money::new(Decimal::MAX);
        assert!(matches!(max.add(Money::of(1)), Err(Error::Overflow)));
    }

    #[test]
    fn sign_checks() {
        assert!(Money::ZERO.is_positive_or_zero());
        assert!(Money::ZERO.negate().is_positive_or_zero());
        assert!(Money::of(1).is_positive());
        assert!(Money::of(-1).is_negative());
        assert!(!Money::of(-1).is_positive_or_zero());
    }

    #[test]
    fn subtract_goes_below_zero() {
        let result = Money::of(100).subtract(Money::of(150)).unwrap();
        assert_eq!(result, Money::of(-50));
    }

    #[test]
    fn parses_and_displays_four_decimals() {
        let v: Money = "100.5".parse().unwrap();
        assert_eq!(format!("{}", v), "100.5000");
        let v: Money = " -0.25 ".parse().unwrap();
        assert_eq!(format!("{}", v), "-0.2500");
    }

    #[test]
    fn rejects_malformed_amounts() {
        assert!("".parse::<Money>().is_err());
        assert!("12.3.4".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
    }

    proptest! {
        #[test]
        fn prop_add_negate_is_zero(a in money()) {
            prop_assert_eq!(a.add(a.negate()).unwrap(), Money::ZERO);
        }

        #[test]
        fn prop_add_is_commutative(a in money(), b in money()) {
            prop_assert_eq!(a.add(b).unwrap(), b.add(a).unwrap());
        }

        #[test]
        fn prop_add_is_associative(a in money(), b in money(), c in money()) {
            let left = a.add(b).unwrap().add(c).unwrap();
            let right = a.add(b.add(c).unwrap()).unwrap();
            prop_assert_eq!(left, right);
        }
    }
}
