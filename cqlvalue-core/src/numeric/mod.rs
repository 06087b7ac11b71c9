//! Numeric wrappers and arbitrary precision support
//!
//! Every numeric wrapper implements [`Numeric`]. Operations never mutate the
//! receiver; they return a new value or an error.

pub mod decimal;
pub mod varint;

pub use decimal::Decimal;
pub use varint::Varint;

use crate::error::Result;
use num_bigint::BigInt;

/// Arithmetic shared by the CQL numeric wrappers
///
/// Binary operations only accept another instance of the same wrapper; mixing
/// wrapper types is rejected at the dynamic [`ScalarValue`](crate::ScalarValue)
/// layer with an invalid argument error.
pub trait Numeric: Sized {
    fn add(&self, other: &Self) -> Result<Self>;

    fn sub(&self, other: &Self) -> Result<Self>;

    fn mul(&self, other: &Self) -> Result<Self>;

    /// Fails with a divide by zero error when `other` is zero
    fn div(&self, other: &Self) -> Result<Self>;

    /// Fails with a divide by zero error when `other` is zero
    fn modulo(&self, other: &Self) -> Result<Self>;

    fn abs(&self) -> Result<Self>;

    fn neg(&self) -> Result<Self>;

    /// Fails with a range error for negative values
    fn sqrt(&self) -> Result<Self>;

    /// Fails with a range error when the value does not fit in an `i64`
    fn to_i64(&self) -> Result<i64>;

    fn to_f64(&self) -> f64;
}

/// Minimal big-endian two's-complement encoding of `value`
///
/// A sign byte is only prepended when the top bit of the magnitude would
/// otherwise flip the sign. Zero encodes as a single `0x00`.
pub fn export_twos_complement(value: &BigInt) -> Vec<u8> {
    value.to_signed_bytes_be()
}

/// Inverse of [`export_twos_complement`]; an empty slice decodes to zero
pub fn import_twos_complement(bytes: &[u8]) -> BigInt {
    BigInt::from_signed_bytes_be(bytes)
}
