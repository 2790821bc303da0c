//! Money value object.
//!
//! All monetary values are integer cents (i64), never floats. Percentage
//! discounts truncate toward zero, so the documented tier boundaries stay
//! exact (15000 * 12 at 20% off is exactly 144000).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use super::Percentage;

/// Monetary amount in integer cents.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates a Money value from integer cents.
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the amount in cents.
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns true if the amount is strictly greater than zero.
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies the amount by a whole-number factor.
    pub fn times(&self, factor: u32) -> Self {
        Self(self.0 * i64::from(factor))
    }

    /// Returns this amount reduced by the given percentage.
    ///
    /// Cents truncate toward zero.
    pub fn percent_off(&self, discount: Percentage) -> Self {
        Self(self.0 * i64::from(100 - discount.value()) / 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.abs();
        write!(f, "{}{}.{:02}", sign, cents / 100, cents % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn money_from_cents_roundtrips() {
        assert_eq!(Money::from_cents(15000).cents(), 15000);
    }

    #[test]
    fn money_is_positive_only_above_zero() {
        assert!(Money::from_cents(1).is_positive());
        assert!(!Money::ZERO.is_positive());
        assert!(!Money::from_cents(-1).is_positive());
    }

    #[test]
    fn money_times_multiplies() {
        assert_eq!(Money::from_cents(15000).times(12), Money::from_cents(180000));
    }

    #[test]
    fn money_percent_off_is_exact_at_tier_boundaries() {
        let total = Money::from_cents(180000);
        assert_eq!(total.percent_off(Percentage::new(20)), Money::from_cents(144000));
        assert_eq!(total.percent_off(Percentage::new(0)), total);
    }

    #[test]
    fn money_percent_off_truncates_toward_zero() {
        // 89997 * 95 / 100 = 85497.15, truncated to 85497
        let total = Money::from_cents(89997);
        assert_eq!(total.percent_off(Percentage::new(5)), Money::from_cents(85497));
    }

    #[test]
    fn money_sums_over_iterators() {
        let amounts = [Money::from_cents(100), Money::from_cents(250)];
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total, Money::from_cents(350));
    }

    #[test]
    fn money_displays_with_two_decimal_places() {
        assert_eq!(format!("{}", Money::from_cents(144000)), "1440.00");
        assert_eq!(format!("{}", Money::from_cents(29999)), "299.99");
        assert_eq!(format!("{}", Money::from_cents(5)), "0.05");
        assert_eq!(format!("{}", Money::from_cents(-150)), "-1.50");
    }

    #[test]
    fn money_serializes_as_plain_cents() {
        let json = serde_json::to_string(&Money::from_cents(29999)).unwrap();
        assert_eq!(json, "29999");
    }

    proptest! {
        #[test]
        fn percent_off_never_exceeds_original(cents in 0i64..10_000_000, pct in 0u8..=100) {
            let amount = Money::from_cents(cents);
            let discounted = amount.percent_off(Percentage::new(pct));
            prop_assert!(discounted <= amount);
            prop_assert!(discounted.cents() >= 0);
        }

        #[test]
        fn percent_off_zero_is_identity(cents in 0i64..10_000_000) {
            let amount = Money::from_cents(cents);
            prop_assert_eq!(amount.percent_off(Percentage::ZERO), amount);
        }
    }
}
