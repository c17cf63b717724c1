use std::{
    fmt,
    iter::Sum,
    ops::{Add, Neg, Sub},
    str::FromStr,
};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use thiserror::Error;

/// Number of fractional digits every ledger amount is kept at.
pub const SCALE: u32 = 2;

/// Amount as it arrives at the ledger boundary, before it is quantized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawAmount<'a> {
    Text(&'a str),
    Integer(i64),
    Real(f64),
    Decimal(Decimal),
}

impl<'a> From<&'a str> for RawAmount<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for RawAmount<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for RawAmount<'_> {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for RawAmount<'_> {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for RawAmount<'_> {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<Decimal> for RawAmount<'_> {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("Amount `{input}` is not a decimal number")]
    NotNumeric { input: String },
    #[error("Amount must be a finite number")]
    NotFinite,
    #[error("Amount `{input}` is outside the representable range")]
    OutOfRange { input: String },
    #[error("Adding {amount} to balance {balance} overflows")]
    Overflow { balance: Money, amount: Money },
}

/// Exact decimal amount, always quantized to hundredths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub fn zero() -> Self {
        Self(Decimal::new(0, SCALE))
    }

    /// Converts raw input into an amount with two fractional digits,
    /// rounding ties away from zero.
    ///
    /// Text may carry surrounding whitespace, a sign, any number of fractional
    /// digits, or an exponent (`1.5e3`). Reals are taken at their exact binary
    /// value, so `1.005_f64` (really `1.00499...`) becomes `1.00`.
    pub fn quantize<'a>(raw: impl Into<RawAmount<'a>>) -> Result<Self, AmountError> {
        let value = match raw.into() {
            RawAmount::Text(text) => parse_decimal(text)?,
            RawAmount::Integer(value) => Decimal::from(value),
            RawAmount::Real(value) if !value.is_finite() => return Err(AmountError::NotFinite),
            RawAmount::Real(value) => {
                Decimal::from_f64_retain(value).ok_or_else(|| AmountError::OutOfRange {
                    input: value.to_string(),
                })?
            }
            RawAmount::Decimal(value) => value,
        };
        Ok(Self::from_decimal(value))
    }

    fn from_decimal(value: Decimal) -> Self {
        let mut value = value.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero);
        // only pads with zeros, the value has at most `SCALE` digits by now
        value.rescale(SCALE);
        Self(value)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Exact sum, or `None` when it does not fit the decimal range.
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }
}

fn parse_decimal(text: &str) -> Result<Decimal, AmountError> {
    let trimmed = text.trim();
    let parsed = if trimmed.contains(['e', 'E']) {
        Decimal::from_scientific(trimmed)
            .or_else(|err| round_tiny_scientific(trimmed).ok_or(err))
    } else {
        Decimal::from_str(trimmed)
    };
    parsed.map_err(|err| match err {
        rust_decimal::Error::ExceedsMaximumPossibleValue
        | rust_decimal::Error::LessThanMinimumPossibleValue => AmountError::OutOfRange {
            input: text.to_owned(),
        },
        _ => AmountError::NotNumeric {
            input: text.to_owned(),
        },
    })
}

/// Handles exponents that push the scale past what `Decimal` can hold
/// (`1e-30`). The digits are rounded straight to hundredths, so no precision
/// is lost on the way. `None` when the scale is not the problem.
fn round_tiny_scientific(text: &str) -> Option<Decimal> {
    let (mantissa, exponent) = text.split_once(['e', 'E'])?;
    let mantissa = Decimal::from_str(mantissa).ok()?;
    let exponent: i64 = exponent.parse().ok()?;
    let scale = i64::from(mantissa.scale()) - exponent;
    if scale <= i64::from(Decimal::MAX_SCALE) {
        return None;
    }
    let digits = mantissa.mantissa();
    // a 96 bit mantissa has at most 29 digits, everything beyond is zero
    let dropped = u32::try_from(scale - i64::from(SCALE)).ok()?;
    if dropped > 29 {
        return Some(Decimal::new(0, SCALE));
    }
    let divisor = 10_i128.pow(dropped);
    let mut hundredths = digits / divisor;
    if (digits % divisor).abs() * 2 >= divisor {
        hundredths += digits.signum();
    }
    Some(Decimal::from_i128_with_scale(hundredths, SCALE))
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl FromStr for Money {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::quantize(s)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}
