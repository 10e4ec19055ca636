//! Arbitrary-precision decimal numbers
//!
//! The wire protocol carries numbers as exact decimals. [`Number`] keeps that
//! precision: it is a `BigInt` mantissa scaled by a power of ten, never an
//! approximation through `f64`.
//!
//! ## Normal form
//!
//! Numbers are always stored normalized: the mantissa has no trailing decimal
//! zeros and zero is stored as `0 × 10^0`. Derived equality and hashing are
//! therefore value equality: `1.50 == 1.5 == 15e-1`.
//!
//! ## Narrowing
//!
//! [`Number::to_i64_exact`] and [`Number::to_f64_exact`] return `None` when
//! the value has no exact representation at the target width. Float narrowing
//! accepts a decimal if it is the exact binary value of an `f64` or that
//! `f64`'s shortest round-trip text, so `0.1` narrows but `1e1000` does not.
//!
//! ## Exponent range
//!
//! The normalized exponent must lie within `±`[`MAX_EXPONENT`]. Text with a
//! larger exponent fails to parse with [`NumberParseError::InvalidExponent`].

use crate::error::NumberParseError;
use num_bigint::{BigInt, Sign};
use num_traits::{Signed, ToPrimitive, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Largest normalized decimal exponent, in either direction
pub const MAX_EXPONENT: i64 = i64::MAX / 4;

/// Exact decimal number: `mantissa × 10^exponent`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Number {
    mantissa: BigInt,
    exponent: i64,
}

impl Number {
    /// The number zero
    pub fn zero() -> Self {
        Number {
            mantissa: BigInt::zero(),
            exponent: 0,
        }
    }

    /// Build a number from a mantissa and decimal exponent
    ///
    /// Returns `None` if the normalized exponent is outside `±MAX_EXPONENT`.
    pub fn new(mantissa: BigInt, exponent: i64) -> Option<Self> {
        let (mantissa, shift) = strip_trailing_zeros(mantissa);
        if mantissa.is_zero() {
            return Some(Number::zero());
        }
        let exponent = exponent.checked_add(shift)?;
        if !(-MAX_EXPONENT..=MAX_EXPONENT).contains(&exponent) {
            return None;
        }
        Some(Number { mantissa, exponent })
    }

    /// Normal form of an integer; the exponent is at most the digit count
    fn from_integer(value: BigInt) -> Self {
        let (mantissa, exponent) = strip_trailing_zeros(value);
        Number { mantissa, exponent }
    }

    /// Convert a finite `f64` using its shortest round-trip decimal text
    ///
    /// Returns `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        format!("{:e}", value).parse().ok()
    }

    /// The exact binary value of a finite `f64` as a decimal
    fn from_f64_binary(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        if value == 0.0 {
            return Some(Number::zero());
        }
        let bits = value.to_bits();
        let negative = bits >> 63 == 1;
        let biased = ((bits >> 52) & 0x7ff) as i64;
        let fraction = bits & ((1u64 << 52) - 1);
        let (significand, power_of_two) = if biased == 0 {
            (fraction, -1074)
        } else {
            (fraction | (1u64 << 52), biased - 1075)
        };

        let mut mantissa = BigInt::from(significand);
        let exponent = if power_of_two >= 0 {
            mantissa <<= power_of_two as usize;
            0
        } else {
            // m × 2^-k == m × 5^k × 10^-k
            mantissa *= num_traits::pow(BigInt::from(5u8), (-power_of_two) as usize);
            power_of_two
        };
        if negative {
            mantissa = -mantissa;
        }
        Self::new(mantissa, exponent)
    }

    /// The mantissa in normal form
    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    /// The decimal exponent in normal form
    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    /// Check if this number is zero
    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    /// Check if this number is negative
    pub fn is_negative(&self) -> bool {
        self.mantissa.sign() == Sign::Minus
    }

    /// Check if this number has no fractional part
    pub fn is_integer(&self) -> bool {
        self.exponent >= 0
    }

    /// Narrow to `i64` if the value is integral and in range
    pub fn to_i64_exact(&self) -> Option<i64> {
        if self.exponent < 0 {
            return None;
        }
        // |mantissa| >= 1, so |value| >= 10^exponent
        if self.exponent > 18 {
            return None;
        }
        let scale = num_traits::pow(BigInt::from(10u8), self.exponent as usize);
        (&self.mantissa * scale).to_i64()
    }

    /// Narrow to `f64` if the decimal has an exact 64-bit float form
    pub fn to_f64_exact(&self) -> Option<f64> {
        let nearest: f64 = self.to_string().parse().ok()?;
        if !nearest.is_finite() {
            return None;
        }
        if Self::from_f64_binary(nearest).as_ref() == Some(self) {
            return Some(nearest);
        }
        match Self::from_f64(nearest) {
            Some(shortest) if shortest == *self => Some(nearest),
            _ => None,
        }
    }

    /// Position of the decimal point relative to the first mantissa digit
    fn magnitude(&self) -> i64 {
        let digits = i64::try_from(self.mantissa.magnitude().to_string().len()).unwrap_or(i64::MAX);
        digits.saturating_add(self.exponent)
    }
}

/// Divide out trailing decimal zeros; returns the stripped mantissa and count
fn strip_trailing_zeros(mut mantissa: BigInt) -> (BigInt, i64) {
    if mantissa.is_zero() {
        return (mantissa, 0);
    }
    let ten = BigInt::from(10u8);
    let mut shift = 0i64;
    while (&mantissa % &ten).is_zero() {
        mantissa /= &ten;
        shift += 1;
    }
    (mantissa, shift)
}

impl Default for Number {
    fn default() -> Self {
        Number::zero()
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::from_integer(BigInt::from(value))
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Number::from_integer(BigInt::from(value))
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::from(i64::from(value))
    }
}

impl FromStr for Number {
    type Err = NumberParseError;

    /// Parse decimal or scientific text: `-12`, `0.5`, `1.5e+10`, `3E-2`
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.is_empty() {
            return Err(NumberParseError::Empty);
        }

        let mut chars = input.char_indices().peekable();
        let mut negative = false;
        if let Some((_, sign @ ('-' | '+'))) = chars.peek().copied() {
            negative = sign == '-';
            chars.next();
        }

        let mut digits = String::new();
        let mut fraction_digits: i64 = 0;
        let mut seen_dot = false;
        let mut exponent_text = None;

        for (position, ch) in chars.by_ref() {
            match ch {
                '0'..='9' => {
                    digits.push(ch);
                    if seen_dot {
                        fraction_digits += 1;
                    }
                }
                '.' if !seen_dot => seen_dot = true,
                'e' | 'E' => {
                    exponent_text = Some(&input[position + 1..]);
                    break;
                }
                _ => {
                    return Err(NumberParseError::UnexpectedChar {
                        input: input.to_string(),
                        ch,
                        position,
                    })
                }
            }
        }

        if digits.is_empty() {
            return Err(NumberParseError::NoDigits(input.to_string()));
        }

        let exponent = match exponent_text {
            None => 0,
            Some(text) => parse_exponent(text)
                .ok_or_else(|| NumberParseError::InvalidExponent(input.to_string()))?,
        };

        let mut mantissa = BigInt::parse_bytes(digits.as_bytes(), 10)
            .ok_or_else(|| NumberParseError::NoDigits(input.to_string()))?;
        if negative {
            mantissa = -mantissa;
        }
        exponent
            .checked_sub(fraction_digits)
            .and_then(|exponent| Number::new(mantissa, exponent))
            .ok_or_else(|| NumberParseError::InvalidExponent(input.to_string()))
    }
}

/// Exponent digits with at most one leading sign
fn parse_exponent(text: &str) -> Option<i64> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let magnitude = digits.parse::<i64>().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        if self.is_negative() {
            write!(f, "-")?;
        }
        let digits = self.mantissa.magnitude().to_string();
        let point = self.magnitude();

        if self.exponent >= 0 && point <= 21 {
            write!(f, "{}{}", digits, "0".repeat(self.exponent as usize))
        } else if self.exponent < 0 && point > -6 {
            if point > 0 {
                let (whole, fraction) = digits.split_at(point as usize);
                write!(f, "{}.{}", whole, fraction)
            } else {
                write!(f, "0.{}{}", "0".repeat((-point) as usize), digits)
            }
        } else {
            let (first, rest) = digits.split_at(1);
            write!(f, "{}", first)?;
            if !rest.is_empty() {
                write!(f, ".{}", rest)?;
            }
            let shown = point - 1;
            if shown < 0 {
                write!(f, "e-{}", -shown)
            } else {
                write!(f, "e+{}", shown)
            }
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        let by_sign = self.mantissa.sign().cmp(&other.mantissa.sign());
        if by_sign != Ordering::Equal || self.is_zero() {
            return by_sign;
        }

        // Same sign, both nonzero: compare magnitudes
        let by_magnitude = match self.magnitude().cmp(&other.magnitude()) {
            Ordering::Equal => {
                let common = self.exponent.min(other.exponent);
                let ten = BigInt::from(10u8);
                let lhs = self.mantissa.abs()
                    * num_traits::pow(ten.clone(), (self.exponent - common) as usize);
                let rhs =
                    other.mantissa.abs() * num_traits::pow(ten, (other.exponent - common) as usize);
                lhs.cmp(&rhs)
            }
            ordering => ordering,
        };
        if self.is_negative() {
            by_magnitude.reverse()
        } else {
            by_magnitude
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
