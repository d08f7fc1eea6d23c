use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign},
};

use serde::{Deserialize, Serialize};

use crate::Currency;

const MINOR_PER_MAJOR: i64 = 100;

/// Money amount represented as **integer minor units** (cents for EUR).
///
/// Every cost stored on a record (fuel purchases, service invoices, premiums,
/// purchase prices) uses this type, so sums over a vehicle's history never
/// drift. Derived analytics that can be fractional (monthly spreads,
/// averages, depreciation) are reported in major units as `f64` via
/// [`Money::to_major`].
///
/// `+` saturates at the `i64` bounds so analytics over any snapshot stay
/// total. Use [`Money::checked_add`] where overflow must be reported.
///
/// Serialized as the raw integer of minor units.
///
/// ```rust
/// use engine::Money;
///
/// let cost = Money::new(52_30);
/// assert_eq!(cost.minor(), 5230);
/// assert_eq!(cost.to_string(), "52.30€");
/// assert_eq!(cost.to_major(), 52.3);
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns the value in major units.
    #[must_use]
    pub fn to_major(self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// `None` on overflow.
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / MINOR_PER_MAJOR.unsigned_abs();
        let cents = abs % MINOR_PER_MAJOR.unsigned_abs();
        write!(f, "{sign}{units}.{cents:02}{}", Currency::default().symbol())
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_eur() {
        assert_eq!(Money::new(0).to_string(), "0.00€");
        assert_eq!(Money::new(7).to_string(), "0.07€");
        assert_eq!(Money::new(4599).to_string(), "45.99€");
        assert_eq!(Money::new(-1050).to_string(), "-10.50€");
    }

    #[test]
    fn sums_over_iterators() {
        let costs = [Money::new(100), Money::new(250), Money::new(-50)];
        assert_eq!(costs.iter().sum::<Money>(), Money::new(300));
        assert_eq!(costs.into_iter().sum::<Money>(), Money::new(300));
    }

    #[test]
    fn addition_saturates() {
        let big = Money::new(i64::MAX / 2 + 1);
        assert_eq!(big + big, Money::new(i64::MAX));
        assert_eq!([big, big, big].iter().sum::<Money>(), Money::new(i64::MAX));

        let mut total = Money::new(i64::MIN);
        total += Money::new(-1);
        assert_eq!(total, Money::new(i64::MIN));
    }

    #[test]
    fn checked_add_reports_overflow() {
        assert_eq!(Money::new(2).checked_add(Money::new(3)), Some(Money::new(5)));
        assert_eq!(Money::new(i64::MAX).checked_add(Money::new(1)), None);
    }
}
