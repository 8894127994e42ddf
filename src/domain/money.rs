use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

const CENTS_PER_UNIT: i64 = 100;

/// Largest magnitude a single amount may carry, in cents.
///
/// Amounts are stored as JSON numbers in units; below this bound `cents / 100` survives the
/// trip through an `f64` and back without losing a cent.
pub const MAX_CENTS: i64 = 999_999_999_999_999;

/// Monetary amount in integer cents of the ledger's single currency.
///
/// On the wire it is a plain decimal number (`12.5`), matching the records written by
/// earlier versions of the cart app.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid amount `{0}`")]
pub struct ParseMoneyError(String);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Converts a decimal amount, rounding to the nearest cent.
    pub fn from_units(value: f64) -> Self {
        Self((value * CENTS_PER_UNIT as f64).round() as i64)
    }

    pub fn as_units(self) -> f64 {
        self.0 as f64 / CENTS_PER_UNIT as f64
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// True when the magnitude fits within [`MAX_CENTS`].
    pub fn is_within_limit(self) -> bool {
        self.0.unsigned_abs() <= MAX_CENTS as u64
    }

    /// Whole units and the two-digit cent remainder of the absolute value.
    pub fn split_abs(self) -> (u64, u8) {
        let abs = self.0.unsigned_abs();
        (
            abs / CENTS_PER_UNIT as u64,
            (abs % CENTS_PER_UNIT as u64) as u8,
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (units, cents) = self.split_abs();
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{sign}{units}.{cents:02}")
    }
}

/// Accepts `12`, `12.5`, `12,50` and `-3.10`; at most two fraction digits and no more than
/// [`MAX_CENTS`] in magnitude.
impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseMoneyError(raw.to_string());
        let trimmed = raw.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        if body.is_empty() {
            return Err(invalid());
        }

        let (whole, fraction) = match body.rfind(|c: char| c == '.' || c == ',') {
            Some(idx) => (&body[..idx], &body[idx + 1..]),
            None => (body, ""),
        };
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if !all_digits(whole) || !all_digits(fraction) || fraction.len() > 2 {
            return Err(invalid());
        }
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };
        let total = units
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|value| value.checked_add(cents))
            .filter(|value| *value <= MAX_CENTS)
            .ok_or_else(invalid)?;
        Ok(Self(if negative { -total } else { total }))
    }
}

// Totals saturate instead of wrapping; a single record never exceeds `MAX_CENTS`.
impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        *self = *self - rhs;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_units())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        if !value.is_finite() {
            return Err(de::Error::custom("monetary amount must be finite"));
        }
        Ok(Money::from_units(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_and_dot_decimals() {
        assert_eq!("12,50".parse::<Money>().unwrap(), Money::from_cents(1250));
        assert_eq!("12.5".parse::<Money>().unwrap(), Money::from_cents(1250));
        assert_eq!("7".parse::<Money>().unwrap(), Money::from_cents(700));
        assert_eq!(",99".parse::<Money>().unwrap(), Money::from_cents(99));
        assert_eq!("-3.10".parse::<Money>().unwrap(), Money::from_cents(-310));
    }

    #[test]
    fn rejects_malformed_amounts() {
        for raw in ["", "-", "abc", "1.234", "1.2.3", "12a", ","] {
            assert!(raw.parse::<Money>().is_err(), "`{raw}` should not parse");
        }
    }

    #[test]
    fn rejects_amounts_beyond_the_limit() {
        assert_eq!(
            "9999999999999.99".parse::<Money>().unwrap(),
            Money::from_cents(MAX_CENTS)
        );
        assert_eq!(
            "-9999999999999.99".parse::<Money>().unwrap(),
            Money::from_cents(-MAX_CENTS)
        );
        for raw in ["10000000000000", "90071992547409.93", "92233720368547758"] {
            assert!(raw.parse::<Money>().is_err(), "`{raw}` should not parse");
        }
        assert!(Money::from_cents(MAX_CENTS).is_within_limit());
        assert!(!Money::from_cents(MAX_CENTS + 1).is_within_limit());
    }

    #[test]
    fn sums_saturate_instead_of_overflowing() {
        let huge = Money::from_cents(i64::MAX - 1);
        let total: Money = [huge, huge, Money::from_cents(5)].into_iter().sum();
        assert_eq!(total, Money::from_cents(i64::MAX));
        assert_eq!(Money::from_cents(i64::MIN) - huge, Money::from_cents(i64::MIN));
        assert_eq!(-Money::from_cents(i64::MIN), Money::from_cents(i64::MAX));
    }

    #[test]
    fn largest_amounts_survive_the_wire() {
        for cents in [MAX_CENTS, MAX_CENTS - 1, 987_654_321_098_765, 900_719_925_474_099] {
            let amount = Money::from_cents(cents);
            let json = serde_json::to_string(&amount).unwrap();
            let back: Money = serde_json::from_str(&json).unwrap();
            assert_eq!(back, amount, "{json}");
        }
    }

    #[test]
    fn repeated_cent_sums_do_not_drift() {
        let total: Money = std::iter::repeat(Money::from_cents(10)).take(1000).sum();
        assert_eq!(total, Money::from_cents(10_000));
        assert_eq!(total.to_string(), "100.00");
    }

    #[test]
    fn serializes_as_decimal_number() {
        let json = serde_json::to_string(&Money::from_cents(1250)).unwrap();
        assert_eq!(json, "12.5");
        let back: Money = serde_json::from_str("0.1").unwrap();
        assert_eq!(back, Money::from_cents(10));
        let whole: Money = serde_json::from_str("35").unwrap();
        assert_eq!(whole, Money::from_cents(3500));
    }

    #[test]
    fn display_keeps_sign_and_two_places() {
        assert_eq!(Money::from_cents(-805).to_string(), "-8.05");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }
}
