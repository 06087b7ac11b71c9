//! Arbitrary precision decimal (`decimal`)
//!
//! A decimal is an unscaled big integer plus a power-of-ten scale:
//! `unscaled * 10^-scale`. Comparison follows Cassandra's decimal comparator,
//! which orders by scale first and unscaled value second, so `1.0` and `1.00`
//! are different values.

use super::{export_twos_complement, import_twos_complement, Numeric};
use crate::error::{Error, Result};
use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_traits::{Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Widest scale gap `add`, `sub` and `modulo` will bridge
const MAX_SCALE_GAP: u32 = 100_000;

/// Longest zero padding rendered in plain notation
const PLAIN_ZEROS_LIMIT: u64 = 64;

/// A CQL `decimal`
///
/// Field order matters: the derived ordering compares `scale` before `unscaled`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimal {
    scale: i32,
    unscaled: BigInt,
}

impl Decimal {
    pub fn new(unscaled: impl Into<BigInt>, scale: i32) -> Self {
        Self {
            scale,
            unscaled: unscaled.into(),
        }
    }

    pub fn from_i64(value: i64) -> Self {
        Self::new(value, 0)
    }

    /// Uses the shortest decimal rendering that round-trips the double
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::expecting("a finite double", value));
        }
        value.to_string().parse()
    }

    /// Decode a big-endian two's-complement unscaled value with its scale
    pub fn from_bytes(bytes: &[u8], scale: i32) -> Self {
        Self::new(import_twos_complement(bytes), scale)
    }

    /// Minimal big-endian two's-complement encoding of the unscaled value
    pub fn to_bytes(&self) -> Vec<u8> {
        export_twos_complement(&self.unscaled)
    }

    pub fn scale(&self) -> i32 {
        self.scale
    }

    pub fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    pub fn is_zero(&self) -> bool {
        self.unscaled.is_zero()
    }

    pub fn to_big_decimal(&self) -> BigDecimal {
        BigDecimal::new(self.unscaled.clone(), i64::from(self.scale))
    }

    fn from_big_decimal(value: BigDecimal) -> Result<Self> {
        let (unscaled, exponent) = value.into_bigint_and_exponent();
        let scale = i32::try_from(exponent)
            .map_err(|_| Error::range(format!("scale {} does not fit in 32 bits", exponent)))?;
        Ok(Self::new(unscaled, scale))
    }

    /// Decimal digits before the point; zero or less below one
    fn integer_digits(&self) -> i64 {
        let len = i64::try_from(self.unscaled.magnitude().to_string().len()).unwrap_or(i64::MAX);
        len - i64::from(self.scale)
    }

    /// Unscaled values of `self` and `other` brought to their common, larger scale
    fn aligned(&self, other: &Self) -> Result<(BigInt, BigInt, i32)> {
        let gap = self.scale.abs_diff(other.scale);
        if gap > MAX_SCALE_GAP {
            return Err(Error::range(format!(
                "scales {} and {} are too far apart",
                self.scale, other.scale
            )));
        }
        Ok(match self.scale.cmp(&other.scale) {
            Ordering::Equal => (self.unscaled.clone(), other.unscaled.clone(), self.scale),
            Ordering::Less => (
                upscale(&self.unscaled, gap),
                other.unscaled.clone(),
                other.scale,
            ),
            Ordering::Greater => (
                self.unscaled.clone(),
                upscale(&other.unscaled, gap),
                self.scale,
            ),
        })
    }
}

fn upscale(value: &BigInt, digits: u32) -> BigInt {
    value * BigInt::from(10u32).pow(digits)
}

impl Numeric for Decimal {
    fn add(&self, other: &Self) -> Result<Self> {
        let (a, b, scale) = self.aligned(other)?;
        Ok(Self::new(a + b, scale))
    }

    fn sub(&self, other: &Self) -> Result<Self> {
        let (a, b, scale) = self.aligned(other)?;
        Ok(Self::new(a - b, scale))
    }

    fn mul(&self, other: &Self) -> Result<Self> {
        let scale = self
            .scale
            .checked_add(other.scale)
            .ok_or_else(|| Error::range("scale overflow"))?;
        Ok(Self::new(&self.unscaled * &other.unscaled, scale))
    }

    fn div(&self, other: &Self) -> Result<Self> {
        if other.is_zero() {
            return Err(Error::divide_by_zero("Cannot divide by zero"));
        }
        Self::from_big_decimal(self.to_big_decimal() / other.to_big_decimal())
    }

    fn modulo(&self, other: &Self) -> Result<Self> {
        if other.is_zero() {
            return Err(Error::divide_by_zero("Cannot modulo by zero"));
        }
        let (a, b, scale) = self.aligned(other)?;
        Ok(Self::new(a % b, scale))
    }

    fn abs(&self) -> Result<Self> {
        Ok(Self::new(self.unscaled.abs(), self.scale))
    }

    fn neg(&self) -> Result<Self> {
        Ok(Self::new(-&self.unscaled, self.scale))
    }

    fn sqrt(&self) -> Result<Self> {
        if self.unscaled.sign() == Sign::Minus {
            return Err(Error::range(
                "Cannot take a square root of a negative number",
            ));
        }
        let root = self
            .to_big_decimal()
            .sqrt()
            .ok_or_else(|| Error::range("square root is undefined"))?;
        Self::from_big_decimal(root)
    }

    fn to_i64(&self) -> Result<i64> {
        let digits = self.integer_digits();
        if self.is_zero() || digits <= 0 {
            return Ok(0);
        }
        if digits > 19 {
            return Err(Error::range("Value is too big"));
        }
        self.to_big_decimal()
            .to_i64()
            .ok_or_else(|| Error::range("Value is too big"))
    }

    fn to_f64(&self) -> f64 {
        let negative = self.unscaled.sign() == Sign::Minus;
        let digits = self.integer_digits();
        if !self.is_zero() && digits > 310 {
            return if negative { f64::NEG_INFINITY } else { f64::INFINITY };
        }
        if self.is_zero() || digits < -400 {
            return if negative { -0.0 } else { 0.0 };
        }
        self.to_big_decimal().to_f64().unwrap_or(f64::NAN)
    }
}

impl FromStr for Decimal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parsed = BigDecimal::from_str(s)
            .map_err(|_| Error::expecting("a decimal string", format!("{:?}", s)))?;
        Self::from_big_decimal(parsed)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.unscaled.sign() == Sign::Minus { "-" } else { "" };
        let digits = self.unscaled.magnitude().to_string();

        if self.scale <= 0 && self.unscaled.is_zero() {
            return f.write_str("0");
        }

        // Scientific notation once the zero padding gets long
        let padding = if self.scale <= 0 {
            u64::from(self.scale.unsigned_abs())
        } else {
            u64::try_from(i64::from(self.scale) - digits.len() as i64).unwrap_or(0)
        };
        if padding > PLAIN_ZEROS_LIMIT {
            if self.unscaled.is_zero() {
                return write!(f, "0E{:+}", -i64::from(self.scale));
            }
            let exponent = digits.len() as i64 - 1 - i64::from(self.scale);
            let (head, tail) = digits.split_at(1);
            return if tail.is_empty() {
                write!(f, "{}{}E{:+}", sign, head, exponent)
            } else {
                write!(f, "{}{}.{}E{:+}", sign, head, tail, exponent)
            };
        }

        if self.scale <= 0 {
            let zeros = "0".repeat(self.scale.unsigned_abs() as usize);
            return write!(f, "{}{}{}", sign, digits, zeros);
        }

        let scale = self.scale as usize;
        let padded = if digits.len() <= scale {
            format!("{}{}", "0".repeat(scale + 1 - digits.len()), digits)
        } else {
            digits
        };
        let (whole, fraction) = padded.split_at(padded.len() - scale);
        write!(f, "{}{}.{}", sign, whole, fraction)
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_keeps_scale() {
        let value = d("123.450");
        assert_eq!(value.unscaled(), &BigInt::from(123450));
        assert_eq!(value.scale(), 3);
        assert_eq!(d("-0.01"), Decimal::new(-1, 2));
        assert_eq!(d("1.5e3").to_string(), "1500");
        assert!(matches!("1.2.3".parse::<Decimal>(), Err(Error::InvalidArgument(_))));
        assert!("abc".parse::<Decimal>().is_err());
    }

    #[test]
    fn test_scale_sensitive_equality() {
        let a = Decimal::new(100, 2);
        let b = Decimal::new(1000, 3);
        assert_ne!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Less);
        // Scale wins over magnitude
        assert!(Decimal::new(1_000_000, 1) < Decimal::new(1, 2));
        assert!(Decimal::new(-5, 2) < Decimal::new(5, 2));
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(Decimal::from_f64(0.1).unwrap(), Decimal::new(1, 1));
        assert_eq!(Decimal::from_f64(-2.5).unwrap(), Decimal::new(-25, 1));
        assert!(matches!(
            Decimal::from_f64(f64::NAN),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Decimal::new(12345, 2).to_string(), "123.45");
        assert_eq!(Decimal::new(-5, 3).to_string(), "-0.005");
        assert_eq!(Decimal::new(7, -2).to_string(), "700");
        assert_eq!(Decimal::new(0, 2).to_string(), "0.00");
        assert_eq!(Decimal::new(0, -2).to_string(), "0");
        assert_eq!(Decimal::new(1, -64).to_string(), format!("1{}", "0".repeat(64)));
    }

    #[test]
    fn test_display_extreme_scales() {
        assert_eq!(Decimal::new(1, i32::MIN).to_string(), "1E+2147483648");
        assert_eq!(Decimal::new(-15, 100).to_string(), "-1.5E-99");
        assert_eq!(Decimal::new(0, i32::MAX).to_string(), "0E-2147483647");
        assert_eq!(Decimal::new(0, i32::MIN).to_string(), "0");
    }

    #[test]
    fn test_scale_gap_is_bounded() {
        let far = Decimal::new(1, i32::MAX).add(&Decimal::new(1, i32::MIN));
        assert!(matches!(far, Err(Error::Range(_))));
        assert!(matches!(
            Decimal::new(1, 200_000).modulo(&Decimal::new(3, 0)),
            Err(Error::Range(_))
        ));
        let near = Decimal::new(1, 1000).add(&Decimal::new(1, 0)).unwrap();
        assert_eq!(near.scale(), 1000);
    }

    #[test]
    fn test_conversions_at_extreme_scales() {
        assert!(matches!(Decimal::new(1, i32::MIN).to_i64(), Err(Error::Range(_))));
        assert_eq!(Decimal::new(1, i32::MAX).to_i64().unwrap(), 0);
        assert_eq!(Decimal::new(1, i32::MIN).to_f64(), f64::INFINITY);
        assert_eq!(Decimal::new(-1, i32::MIN).to_f64(), f64::NEG_INFINITY);
        assert_eq!(Decimal::new(1, i32::MAX).to_f64(), 0.0);
        assert_eq!(Decimal::new(987, 1).to_i64().unwrap(), 98);
    }

    #[test]
    fn test_arithmetic_aligns_scale() {
        let sum = d("1.5").add(&d("0.25")).unwrap();
        assert_eq!(sum, Decimal::new(175, 2));
        let diff = d("1").sub(&d("0.001")).unwrap();
        assert_eq!(diff, Decimal::new(999, 3));
        let product = d("1.5").mul(&d("0.25")).unwrap();
        assert_eq!(product, Decimal::new(375, 3));
        let rem = d("7.5").modulo(&d("2")).unwrap();
        assert_eq!(rem, Decimal::new(15, 1));
    }

    #[test]
    fn test_division() {
        let q = d("10").div(&d("4")).unwrap();
        assert_eq!(q.to_f64(), 2.5);
        assert!(matches!(d("1").div(&d("0.00")), Err(Error::DivideByZero(_))));
        assert!(matches!(d("1").modulo(&d("0")), Err(Error::DivideByZero(_))));
    }

    #[test]
    fn test_unary_and_conversions() {
        assert_eq!(d("-1.25").abs().unwrap(), d("1.25"));
        assert_eq!(d("1.25").neg().unwrap(), d("-1.25"));
        assert_eq!(d("2.25").sqrt().unwrap().to_f64(), 1.5);
        assert!(matches!(d("-4").sqrt(), Err(Error::Range(_))));
        assert_eq!(d("42.9").to_i64().unwrap(), 42);
        assert!(matches!(d("1e30").to_i64(), Err(Error::Range(_))));
    }

    #[test]
    fn test_bytes() {
        let value = Decimal::new(-129, 4);
        assert_eq!(value.to_bytes(), vec![0xFF, 0x7F]);
        assert_eq!(Decimal::from_bytes(&value.to_bytes(), 4), value);
    }
}
