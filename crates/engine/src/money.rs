use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};

use crate::{Currency, EngineError};

/// Signed money amount represented as integer **minor units** (paise, cents).
///
/// Use this type for **all** monetary values in the engine (expense amounts,
/// shares, balances, transfers) so that splitting and settling never drift:
/// a balance is settled when it is exactly [`Money::ZERO`].
///
/// The value is signed:
/// - positive = owed money (creditor)
/// - negative = owes money (debtor)
///
/// # Examples
///
/// ```rust
/// use engine::{Currency, Money};
///
/// let amount = Money::new(12_34);
/// assert_eq!(amount.minor(), 1234);
/// assert_eq!(amount.format(Currency::Inr), "₹12.34");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects
/// more fraction digits than the currency has):
///
/// ```rust
/// use engine::{Currency, Money};
///
/// assert_eq!(Money::parse_major("10", Currency::Inr).unwrap().minor(), 1000);
/// assert_eq!(Money::parse_major("10,5", Currency::Eur).unwrap().minor(), 1050);
/// assert!(Money::parse_major("12.345", Currency::Usd).is_err());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer minor units.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Splits the amount into `parts` shares that sum exactly to `self`.
    ///
    /// Shares differ by at most one minor unit; the leftover units go to the
    /// earliest shares. Returns an empty vector when `parts` is 0.
    ///
    /// ```rust
    /// use engine::Money;
    ///
    /// let shares = Money::new(100).split_even(3);
    /// assert_eq!(shares, vec![Money::new(34), Money::new(33), Money::new(33)]);
    /// ```
    #[must_use]
    pub fn split_even(self, parts: usize) -> Vec<Money> {
        let Ok(divisor) = i64::try_from(parts) else {
            return Vec::new();
        };
        if divisor == 0 {
            return Vec::new();
        }
        let base = self.0.div_euclid(divisor);
        let remainder = self.0.rem_euclid(divisor);
        (0..divisor)
            .map(|index| Money(if index < remainder { base + 1 } else { base }))
            .collect()
    }

    /// Parses a decimal string expressed in major units into minor units.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    ///
    /// Validation rules:
    /// - at most `currency.minor_units()` fractional digits
    /// - rejects empty/invalid strings and values that overflow `i64`
    pub fn parse_major(raw: &str, currency: Currency) -> Result<Money, EngineError> {
        let empty = || EngineError::InvalidAmount("empty amount".to_string());
        let invalid = || EngineError::InvalidAmount(format!("invalid amount: {}", raw.trim()));
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(empty());
        }

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let major_str = parts.next().ok_or_else(invalid)?;
        let fraction_str = parts.next();

        if parts.next().is_some() {
            return Err(invalid());
        }

        if major_str.is_empty() || !major_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let major: i64 = major_str.parse().map_err(|_| overflow())?;

        let digits = usize::from(currency.minor_units());
        let minor: i64 = match fraction_str {
            None | Some("") => 0,
            Some(fraction) => {
                if !fraction.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                if fraction.len() > digits {
                    return Err(EngineError::InvalidAmount(format!(
                        "too many decimals for {}",
                        currency.code()
                    )));
                }
                let padded = format!("{fraction:0<digits$}");
                padded.parse::<i64>().map_err(|_| invalid())?
            }
        };

        let total = major
            .checked_mul(currency.scale())
            .and_then(|v| v.checked_add(minor))
            .ok_or_else(overflow)?;

        let signed = if negative {
            total.checked_neg().ok_or_else(overflow)?
        } else {
            total
        };

        Ok(Money(signed))
    }

    /// Formats the amount in major units with the currency symbol, e.g.
    /// `₹1234.50` or `-€0.07`.
    #[must_use]
    pub fn format(self, currency: Currency) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = currency.scale().unsigned_abs();
        let digits = usize::from(currency.minor_units());
        let major = abs / scale;
        let minor = abs % scale;
        format!(
            "{sign}{symbol}{major}.{minor:0digits$}",
            symbol = currency.symbol()
        )
    }
}

impl fmt::Display for Money {
    /// Formats without a currency symbol, assuming two minor digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
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
    fn format_uses_currency_symbol() {
        assert_eq!(Money::new(0).format(Currency::Inr), "₹0.00");
        assert_eq!(Money::new(1).format(Currency::Inr), "₹0.01");
        assert_eq!(Money::new(10).format(Currency::Eur), "€0.10");
        assert_eq!(Money::new(1050).format(Currency::Usd), "$10.50");
        assert_eq!(Money::new(-1050).format(Currency::Inr), "-₹10.50");
        assert_eq!(Money::new(-1050).to_string(), "-10.50");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        let parse = |raw| Money::parse_major(raw, Currency::Inr).unwrap().minor();
        assert_eq!(parse("10"), 1000);
        assert_eq!(parse("10.5"), 1050);
        assert_eq!(parse("10,50"), 1050);
        assert_eq!(parse("10."), 1000);
        assert_eq!(parse("-0.01"), -1);
        assert_eq!(parse("+1.00"), 100);
        assert_eq!(parse("  2.30 "), 230);
    }

    #[test]
    fn parse_rejects_garbage() {
        for raw in ["", "  ", "-", "abc", "1.2.3", ".5", "1e3", "12.345", "0.001"] {
            assert!(
                Money::parse_major(raw, Currency::Inr).is_err(),
                "{raw:?} should be rejected"
            );
        }
        assert_eq!(
            Money::parse_major("99999999999999999999", Currency::Inr),
            Err(EngineError::InvalidAmount("amount too large".to_string()))
        );
    }

    #[test]
    fn split_even_distributes_remainder_to_first_shares() {
        assert_eq!(
            Money::new(1000).split_even(3),
            vec![Money::new(334), Money::new(333), Money::new(333)]
        );
        assert_eq!(Money::new(90).split_even(3), vec![Money::new(30); 3]);
        assert_eq!(
            Money::new(-100).split_even(3),
            vec![Money::new(-33), Money::new(-33), Money::new(-34)]
        );
        assert!(Money::new(100).split_even(0).is_empty());
    }

    #[test]
    fn split_even_always_sums_to_amount() {
        for amount in [1, 7, 100, 1001, 99_999] {
            for parts in 1..=9 {
                let total: Money = Money::new(amount).split_even(parts).iter().sum();
                assert_eq!(total, Money::new(amount));
            }
        }
    }
}
