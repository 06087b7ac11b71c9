//! Fixed-width integer wrappers (`int`, `bigint`, `counter`)

use crate::error::{Error, Result};
use crate::numeric::Numeric;
use std::fmt;
use std::str::FromStr;

macro_rules! integer_wrapper {
    ($(#[$meta:meta])* $name:ident, $prim:ty, $cql:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name($prim);

        impl $name {
            pub const MIN: Self = Self(<$prim>::MIN);
            pub const MAX: Self = Self(<$prim>::MAX);

            pub fn new(value: $prim) -> Self {
                Self(value)
            }

            pub fn value(self) -> $prim {
                self.0
            }

            pub fn min() -> Self {
                Self::MIN
            }

            pub fn max() -> Self {
                Self::MAX
            }

            /// Truncates toward zero. Non-finite or out of range input is rejected.
            pub fn from_f64(value: f64) -> Result<Self> {
                let truncated = value.trunc();
                if !truncated.is_finite()
                    || truncated < <$prim>::MIN as f64
                    || truncated >= <$prim>::MAX as f64 + 1.0
                {
                    return Err(Error::expecting(
                        concat!("a double within the ", $cql, " range"),
                        value,
                    ));
                }
                Ok(Self(truncated as $prim))
            }

            pub fn from_i64(value: i64) -> Result<Self> {
                <$prim>::try_from(value)
                    .map(Self)
                    .map_err(|_| Error::expecting(concat!("a value within the ", $cql, " range"), value))
            }
        }

        impl Numeric for $name {
            fn add(&self, other: &Self) -> Result<Self> {
                self.0.checked_add(other.0).map(Self).ok_or_else(overflow)
            }

            fn sub(&self, other: &Self) -> Result<Self> {
                self.0.checked_sub(other.0).map(Self).ok_or_else(overflow)
            }

            fn mul(&self, other: &Self) -> Result<Self> {
                self.0.checked_mul(other.0).map(Self).ok_or_else(overflow)
            }

            fn div(&self, other: &Self) -> Result<Self> {
                if other.0 == 0 {
                    return Err(Error::divide_by_zero("Cannot divide by zero"));
                }
                self.0.checked_div(other.0).map(Self).ok_or_else(overflow)
            }

            fn modulo(&self, other: &Self) -> Result<Self> {
                if other.0 == 0 {
                    return Err(Error::divide_by_zero("Cannot modulo by zero"));
                }
                // MIN % -1 is mathematically zero
                Ok(Self(self.0.wrapping_rem(other.0)))
            }

            fn abs(&self) -> Result<Self> {
                if self.0 == <$prim>::MIN {
                    return Err(Error::range("Value doesn't exist"));
                }
                Ok(Self(self.0.abs()))
            }

            fn neg(&self) -> Result<Self> {
                self.0.checked_neg().map(Self).ok_or_else(overflow)
            }

            fn sqrt(&self) -> Result<Self> {
                if self.0 < 0 {
                    return Err(Error::range(
                        "Cannot take a square root of a negative number",
                    ));
                }
                Ok(Self(isqrt(i128::from(self.0)) as $prim))
            }

            fn to_i64(&self) -> Result<i64> {
                Ok(i64::from(self.0))
            }

            fn to_f64(&self) -> f64 {
                self.0 as f64
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                s.parse::<$prim>()
                    .map(Self)
                    .map_err(|_| Error::expecting(concat!("a valid ", $cql, " string"), format!("{:?}", s)))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$prim> for $name {
            fn from(value: $prim) -> Self {
                Self(value)
            }
        }
    };
}

integer_wrapper!(
    /// A CQL `int`: signed 32-bit integer
    Int,
    i32,
    "int"
);

integer_wrapper!(
    /// A CQL `bigint` (also the representation of `counter`): signed 64-bit integer
    Bigint,
    i64,
    "bigint"
);

fn overflow() -> Error {
    Error::range("Value is too big")
}

/// Floor of the square root of a non-negative value
fn isqrt(value: i128) -> i128 {
    let mut root = (value as f64).sqrt() as i128;
    while root * root > value {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= value {
        root += 1;
    }
    root
}
