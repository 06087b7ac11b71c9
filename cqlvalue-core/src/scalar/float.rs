//! IEEE-754 wrappers (`float`, `double`)
//!
//! NaN payloads are canonicalised on construction, so every NaN of one wrapper
//! type has the same bit pattern. Ordering is numeric first; numerically equal
//! values (`-0.0` and `+0.0`) fall back to the signed bit pattern. Under that
//! rule NaN equals NaN and sorts after positive infinity.

use crate::config::DisplayConfig;
use crate::error::{Error, Result};
use crate::numeric::Numeric;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

macro_rules! float_wrapper {
    ($(#[$meta:meta])* $name:ident, $prim:ty, $bits:ty, $signed:ty, $nan:expr, $cql:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name($prim);

        impl $name {
            /// Bit pattern every NaN is normalised to
            pub const CANONICAL_NAN: $bits = $nan;

            pub fn new(value: $prim) -> Self {
                if value.is_nan() {
                    Self(<$prim>::from_bits(Self::CANONICAL_NAN))
                } else {
                    Self(value)
                }
            }

            pub fn value(self) -> $prim {
                self.0
            }

            /// IEEE-754 bit pattern, NaN already canonical
            pub fn bits(self) -> $bits {
                self.0.to_bits()
            }

            pub fn is_nan(self) -> bool {
                self.0.is_nan()
            }

            pub fn is_infinite(self) -> bool {
                self.0.is_infinite()
            }

            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }

            pub fn min() -> Self {
                Self(<$prim>::MIN)
            }

            pub fn max() -> Self {
                Self(<$prim>::MAX)
            }

            pub fn from_f64(value: f64) -> Self {
                Self::new(value as $prim)
            }

            pub fn from_i64(value: i64) -> Self {
                Self::new(value as $prim)
            }

            /// Fixed-point rendering with `precision` decimals
            pub fn format(self, precision: usize) -> String {
                format!("{:.*}", precision, self.0)
            }
        }

        impl Numeric for $name {
            fn add(&self, other: &Self) -> Result<Self> {
                Ok(Self::new(self.0 + other.0))
            }

            fn sub(&self, other: &Self) -> Result<Self> {
                Ok(Self::new(self.0 - other.0))
            }

            fn mul(&self, other: &Self) -> Result<Self> {
                Ok(Self::new(self.0 * other.0))
            }

            fn div(&self, other: &Self) -> Result<Self> {
                if other.0 == 0.0 {
                    return Err(Error::divide_by_zero("Cannot divide by zero"));
                }
                Ok(Self::new(self.0 / other.0))
            }

            fn modulo(&self, other: &Self) -> Result<Self> {
                if other.0 == 0.0 {
                    return Err(Error::divide_by_zero("Cannot modulo by zero"));
                }
                Ok(Self::new(self.0 % other.0))
            }

            fn abs(&self) -> Result<Self> {
                Ok(Self::new(self.0.abs()))
            }

            fn neg(&self) -> Result<Self> {
                Ok(Self::new(-self.0))
            }

            fn sqrt(&self) -> Result<Self> {
                if self.0 < 0.0 {
                    return Err(Error::range(
                        "Cannot take a square root of a negative number",
                    ));
                }
                Ok(Self::new(self.0.sqrt()))
            }

            fn to_i64(&self) -> Result<i64> {
                let truncated = f64::from(self.0).trunc();
                if !truncated.is_finite()
                    || truncated < i64::MIN as f64
                    || truncated >= i64::MAX as f64
                {
                    return Err(Error::range("Value is too big"));
                }
                Ok(truncated as i64)
            }

            fn to_f64(&self) -> f64 {
                f64::from(self.0)
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.cmp(other) == Ordering::Equal
            }
        }

        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                if self.0 < other.0 {
                    Ordering::Less
                } else if self.0 > other.0 {
                    Ordering::Greater
                } else {
                    (self.bits() as $signed).cmp(&(other.bits() as $signed))
                }
            }
        }

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.bits().hash(state);
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                s.parse::<$prim>()
                    .map(Self::new)
                    .map_err(|_| Error::expecting(concat!("a valid ", $cql, " string"), format!("{:?}", s)))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.format(DisplayConfig::default().float_precision))
            }
        }

        impl From<$prim> for $name {
            fn from(value: $prim) -> Self {
                Self::new(value)
            }
        }
    };
}

float_wrapper!(
    /// A CQL `float`: IEEE-754 binary32
    Float,
    f32,
    u32,
    i32,
    0x7fc0_0000,
    "float"
);

float_wrapper!(
    /// A CQL `double`: IEEE-754 binary64
    Double,
    f64,
    u64,
    i64,
    0x7ff8_0000_0000_0000,
    "double"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_is_canonical() {
        let quiet = Double::new(f64::NAN);
        let payload = Double::new(f64::from_bits(0x7ff0_0000_0000_0001));
        assert_eq!(quiet.bits(), Double::CANONICAL_NAN);
        assert_eq!(payload.bits(), Double::CANONICAL_NAN);
        assert_eq!(quiet, payload);
        assert_eq!(Float::new(-f32::NAN).bits(), Float::CANONICAL_NAN);
        assert!(Double::new(f64::NAN).is_nan());
    }

    #[test]
    fn test_ordering() {
        assert!(Double::new(-0.0) < Double::new(0.0));
        assert_ne!(Double::new(-0.0), Double::new(0.0));
        assert!(Double::new(f64::INFINITY) < Double::new(f64::NAN));
        assert!(Double::new(f64::NEG_INFINITY) < Double::new(-1.0));
        assert!(Float::new(1.5) > Float::new(1.25));
    }

    #[test]
    fn test_divide_by_zero() {
        assert!(matches!(Double::new(1.0).div(&Double::new(0.0)), Err(Error::DivideByZero(_))));
        assert!(matches!(Float::new(1.0).modulo(&Float::new(-0.0)), Err(Error::DivideByZero(_))));
        assert_eq!(Double::new(7.5).modulo(&Double::new(2.0)).unwrap(), Double::new(1.5));
    }

    #[test]
    fn test_sqrt_of_negative_fails() {
        assert!(matches!(Double::new(-1.0).sqrt(), Err(Error::Range(_))));
        assert_eq!(Float::new(2.25).sqrt().unwrap(), Float::new(1.5));
        assert!(Double::new(f64::NAN).sqrt().unwrap().is_nan());
    }

    #[test]
    fn test_classification_and_bounds() {
        assert!(Double::new(f64::INFINITY).is_infinite());
        assert!(!Double::new(f64::INFINITY).is_finite());
        assert!(Float::new(3.0).is_finite());
        assert_eq!(Double::min().value(), f64::MIN);
        assert_eq!(Float::max().value(), f32::MAX);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Double::new(-3.7).to_i64().unwrap(), -3);
        assert!(matches!(Double::new(f64::NAN).to_i64(), Err(Error::Range(_))));
        assert!(Double::new(1e300).to_i64().is_err());
        assert_eq!(Float::from_i64(3).value(), 3.0);
        assert!(matches!("1.2.3".parse::<Double>(), Err(Error::InvalidArgument(_))));
        assert!(" 1.5".parse::<Double>().is_err());
        assert_eq!("1.5".parse::<Float>().unwrap(), Float::new(1.5));
    }

    #[test]
    fn test_formatting() {
        assert_eq!(Double::new(1.5).format(2), "1.50");
        assert_eq!(Double::new(0.1).to_string(), "0.10000000000000");
        assert_eq!(Float::new(-2.0).format(0), "-2");
    }
}
