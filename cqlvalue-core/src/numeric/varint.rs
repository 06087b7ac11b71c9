//! Arbitrary precision integer (`varint`)

use super::{export_twos_complement, import_twos_complement, Numeric};
use crate::error::{Error, Result};
use num_bigint::{BigInt, Sign};
use num_traits::{FromPrimitive, Signed, ToPrimitive, Zero};
use std::fmt;
use std::str::FromStr;

/// A CQL `varint`: an unbounded signed integer
///
/// Equality and ordering are plain signed magnitude comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Varint(BigInt);

impl Varint {
    pub fn new(value: impl Into<BigInt>) -> Self {
        Self(value.into())
    }

    /// Truncates toward zero; non-finite input is rejected
    pub fn from_f64(value: f64) -> Result<Self> {
        BigInt::from_f64(value.trunc())
            .map(Self)
            .ok_or_else(|| Error::expecting("a finite double", value))
    }

    /// Decode a big-endian two's-complement byte string
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(import_twos_complement(bytes))
    }

    /// Minimal big-endian two's-complement encoding
    pub fn to_bytes(&self) -> Vec<u8> {
        export_twos_complement(&self.0)
    }

    pub fn value(&self) -> &BigInt {
        &self.0
    }

    pub fn into_inner(self) -> BigInt {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Numeric for Varint {
    fn add(&self, other: &Self) -> Result<Self> {
        Ok(Self(&self.0 + &other.0))
    }

    fn sub(&self, other: &Self) -> Result<Self> {
        Ok(Self(&self.0 - &other.0))
    }

    fn mul(&self, other: &Self) -> Result<Self> {
        Ok(Self(&self.0 * &other.0))
    }

    fn div(&self, other: &Self) -> Result<Self> {
        if other.is_zero() {
            return Err(Error::divide_by_zero("Cannot divide by zero"));
        }
        Ok(Self(&self.0 / &other.0))
    }

    fn modulo(&self, other: &Self) -> Result<Self> {
        if other.is_zero() {
            return Err(Error::divide_by_zero("Cannot modulo by zero"));
        }
        Ok(Self(&self.0 % &other.0))
    }

    fn abs(&self) -> Result<Self> {
        Ok(Self(self.0.abs()))
    }

    fn neg(&self) -> Result<Self> {
        Ok(Self(-&self.0))
    }

    fn sqrt(&self) -> Result<Self> {
        if self.0.sign() == Sign::Minus {
            return Err(Error::range(
                "Cannot take a square root of a negative number",
            ));
        }
        Ok(Self(self.0.sqrt()))
    }

    fn to_i64(&self) -> Result<i64> {
        self.0
            .to_i64()
            .ok_or_else(|| Error::range("Value is too big"))
    }

    fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }
}

impl FromStr for Varint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        BigInt::from_str(s)
            .map(Self)
            .map_err(|_| Error::expecting("a numeric string", format!("{:?}", s)))
    }
}

impl fmt::Display for Varint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Varint {
    fn from(value: i64) -> Self {
        Self(BigInt::from(value))
    }
}

impl From<BigInt> for Varint {
    fn from(value: BigInt) -> Self {
        Self(value)
    }
}
