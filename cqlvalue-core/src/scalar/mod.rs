//! Scalar CQL values
//!
//! [`ScalarValue`] is a closed union over the sixteen scalar kinds. Each variant
//! owns its representation outright and is immutable once built; arithmetic
//! returns a fresh value.

pub mod blob;
pub mod float;
pub mod identifier;
pub mod inet;
pub mod integer;
pub mod timestamp;

pub use blob::Blob;
pub use float::{Double, Float};
pub use identifier::{Timeuuid, Uuid};
pub use inet::Inet;
pub use integer::{Bigint, Int};
pub use timestamp::Timestamp;

use crate::config::DisplayConfig;
use crate::error::{Error, Result};
use crate::numeric::{Decimal, Numeric, Varint};
use crate::types::{ScalarKind, TypeTag};
use std::fmt;

/// A single scalar CQL value
#[derive(Debug, Clone)]
pub enum ScalarValue {
    /// US-ASCII text
    Ascii(String),
    /// UTF-8 text
    Varchar(String),
    /// UTF-8 text, alias of varchar
    Text(String),
    Blob(Blob),
    Boolean(bool),
    Int(Int),
    Bigint(Bigint),
    /// Counter column value, stored as a 64-bit integer
    Counter(Bigint),
    Timestamp(Timestamp),
    Float(Float),
    Double(Double),
    Decimal(Decimal),
    Varint(Varint),
    Uuid(Uuid),
    Timeuuid(Timeuuid),
    Inet(Inet),
}

macro_rules! binary_op {
    ($op:ident) => {
        pub fn $op(&self, other: &ScalarValue) -> Result<ScalarValue> {
            match (self, other) {
                (ScalarValue::Int(a), ScalarValue::Int(b)) => Numeric::$op(a, b).map(ScalarValue::Int),
                (ScalarValue::Bigint(a), ScalarValue::Bigint(b)) => {
                    Numeric::$op(a, b).map(ScalarValue::Bigint)
                }
                (ScalarValue::Counter(a), ScalarValue::Counter(b)) => {
                    Numeric::$op(a, b).map(ScalarValue::Counter)
                }
                (ScalarValue::Float(a), ScalarValue::Float(b)) => {
                    Numeric::$op(a, b).map(ScalarValue::Float)
                }
                (ScalarValue::Double(a), ScalarValue::Double(b)) => {
                    Numeric::$op(a, b).map(ScalarValue::Double)
                }
                (ScalarValue::Decimal(a), ScalarValue::Decimal(b)) => {
                    Numeric::$op(a, b).map(ScalarValue::Decimal)
                }
                (ScalarValue::Varint(a), ScalarValue::Varint(b)) => {
                    Numeric::$op(a, b).map(ScalarValue::Varint)
                }
                _ => Err(self.operand_error(other)),
            }
        }
    };
}

macro_rules! unary_op {
    ($op:ident) => {
        pub fn $op(&self) -> Result<ScalarValue> {
            match self {
                ScalarValue::Int(a) => Numeric::$op(a).map(ScalarValue::Int),
                ScalarValue::Bigint(a) => Numeric::$op(a).map(ScalarValue::Bigint),
                ScalarValue::Counter(a) => Numeric::$op(a).map(ScalarValue::Counter),
                ScalarValue::Float(a) => Numeric::$op(a).map(ScalarValue::Float),
                ScalarValue::Double(a) => Numeric::$op(a).map(ScalarValue::Double),
                ScalarValue::Decimal(a) => Numeric::$op(a).map(ScalarValue::Decimal),
                ScalarValue::Varint(a) => Numeric::$op(a).map(ScalarValue::Varint),
                other => Err(Error::expecting("a numeric value", other.kind())),
            }
        }
    };
}

impl ScalarValue {
    /// ASCII text; non-ASCII input is rejected
    pub fn ascii(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        blob::check_ascii(&text)?;
        Ok(ScalarValue::Ascii(text))
    }

    pub fn varchar(text: impl Into<String>) -> Self {
        ScalarValue::Varchar(text.into())
    }

    pub fn text(text: impl Into<String>) -> Self {
        ScalarValue::Text(text.into())
    }

    pub fn counter(value: i64) -> Self {
        ScalarValue::Counter(Bigint::new(value))
    }

    /// The scalar kind of this value
    pub fn kind(&self) -> ScalarKind {
        match self {
            ScalarValue::Ascii(_) => ScalarKind::Ascii,
            ScalarValue::Varchar(_) => ScalarKind::Varchar,
            ScalarValue::Text(_) => ScalarKind::Text,
            ScalarValue::Blob(_) => ScalarKind::Blob,
            ScalarValue::Boolean(_) => ScalarKind::Boolean,
            ScalarValue::Int(_) => ScalarKind::Int,
            ScalarValue::Bigint(_) => ScalarKind::Bigint,
            ScalarValue::Counter(_) => ScalarKind::Counter,
            ScalarValue::Timestamp(_) => ScalarKind::Timestamp,
            ScalarValue::Float(_) => ScalarKind::Float,
            ScalarValue::Double(_) => ScalarKind::Double,
            ScalarValue::Decimal(_) => ScalarKind::Decimal,
            ScalarValue::Varint(_) => ScalarKind::Varint,
            ScalarValue::Uuid(_) => ScalarKind::Uuid,
            ScalarValue::Timeuuid(_) => ScalarKind::Timeuuid,
            ScalarValue::Inet(_) => ScalarKind::Inet,
        }
    }

    pub fn type_tag(&self) -> TypeTag {
        TypeTag::Scalar(self.kind())
    }

    pub fn is_numeric(&self) -> bool {
        self.kind().is_numeric()
    }

    /// Borrow the text of an ascii, varchar or text value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::Ascii(s) | ScalarValue::Varchar(s) | ScalarValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Re-tag a value as `kind`, which must accept this value's kind
    pub(crate) fn into_kind(self, kind: ScalarKind) -> Result<Self> {
        match (self, kind) {
            (
                ScalarValue::Ascii(s) | ScalarValue::Varchar(s) | ScalarValue::Text(s),
                ScalarKind::Ascii,
            ) => {
                blob::check_ascii(&s)?;
                Ok(ScalarValue::Ascii(s))
            }
            (value, kind) if value.kind() == kind => Ok(value),
            (ScalarValue::Text(s), ScalarKind::Varchar) => Ok(ScalarValue::Varchar(s)),
            (ScalarValue::Varchar(s), ScalarKind::Text) => Ok(ScalarValue::Text(s)),
            (value, kind) => Err(Error::expecting(kind, value.kind())),
        }
    }

    binary_op!(add);
    binary_op!(sub);
    binary_op!(mul);
    binary_op!(div);
    binary_op!(modulo);
    unary_op!(abs);
    unary_op!(neg);
    unary_op!(sqrt);

    pub fn to_i64(&self) -> Result<i64> {
        match self {
            ScalarValue::Int(v) => v.to_i64(),
            ScalarValue::Bigint(v) | ScalarValue::Counter(v) => v.to_i64(),
            ScalarValue::Float(v) => v.to_i64(),
            ScalarValue::Double(v) => v.to_i64(),
            ScalarValue::Decimal(v) => v.to_i64(),
            ScalarValue::Varint(v) => v.to_i64(),
            ScalarValue::Timestamp(v) => Ok(v.millis()),
            other => Err(Error::expecting("a numeric value", other.kind())),
        }
    }

    pub fn to_f64(&self) -> Result<f64> {
        match self {
            ScalarValue::Int(v) => Ok(v.to_f64()),
            ScalarValue::Bigint(v) | ScalarValue::Counter(v) => Ok(v.to_f64()),
            ScalarValue::Float(v) => Ok(v.to_f64()),
            ScalarValue::Double(v) => Ok(v.to_f64()),
            ScalarValue::Decimal(v) => Ok(v.to_f64()),
            ScalarValue::Varint(v) => Ok(v.to_f64()),
            other => Err(Error::expecting("a numeric value", other.kind())),
        }
    }

    /// Render with the configured float precision
    pub fn format(&self, config: &DisplayConfig) -> String {
        match self {
            ScalarValue::Float(v) => v.format(config.float_precision),
            ScalarValue::Double(v) => v.format(config.float_precision),
            other => other.to_string(),
        }
    }

    fn operand_error(&self, other: &ScalarValue) -> Error {
        if self.is_numeric() {
            Error::expecting(format!("an instance of {}", self.kind()), other.kind())
        } else {
            Error::expecting("a numeric value", self.kind())
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Ascii(s) | ScalarValue::Varchar(s) | ScalarValue::Text(s) => f.write_str(s),
            ScalarValue::Blob(v) => write!(f, "{}", v),
            ScalarValue::Boolean(v) => write!(f, "{}", v),
            ScalarValue::Int(v) => write!(f, "{}", v),
            ScalarValue::Bigint(v) | ScalarValue::Counter(v) => write!(f, "{}", v),
            ScalarValue::Timestamp(v) => write!(f, "{}", v),
            ScalarValue::Float(v) => write!(f, "{}", v),
            ScalarValue::Double(v) => write!(f, "{}", v),
            ScalarValue::Decimal(v) => write!(f, "{}", v),
            ScalarValue::Varint(v) => write!(f, "{}", v),
            ScalarValue::Uuid(v) => write!(f, "{}", v),
            ScalarValue::Timeuuid(v) => write!(f, "{}", v),
            ScalarValue::Inet(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! scalar_from {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for ScalarValue {
                fn from(value: $source) -> Self {
                    ScalarValue::$variant(value.into())
                }
            }
        )*
    };
}

scalar_from! {
    bool => Boolean,
    i32 => Int,
    i64 => Bigint,
    f32 => Float,
    f64 => Double,
    String => Varchar,
    &str => Varchar,
    Int => Int,
    Bigint => Bigint,
    Float => Float,
    Double => Double,
    Decimal => Decimal,
    Varint => Varint,
    Blob => Blob,
    Timestamp => Timestamp,
    Uuid => Uuid,
    Timeuuid => Timeuuid,
    Inet => Inet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(ScalarValue::from(1i32).kind(), ScalarKind::Int);
        assert_eq!(ScalarValue::from(1i64).kind(), ScalarKind::Bigint);
        assert_eq!(ScalarValue::from("x").kind(), ScalarKind::Varchar);
        assert_eq!(ScalarValue::counter(3).kind(), ScalarKind::Counter);
        assert_eq!(ScalarValue::text("x").type_tag(), TypeTag::Scalar(ScalarKind::Text));
    }

    #[test]
    fn test_ascii_validation() {
        assert!(ScalarValue::ascii("hello").is_ok());
        assert!(matches!(ScalarValue::ascii("h\u{e9}llo"), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_dispatch_arithmetic() {
        let sum = ScalarValue::from(2i32).add(&ScalarValue::from(3i32)).unwrap();
        assert_eq!(sum.to_i64().unwrap(), 5);
        assert!(matches!(sum, ScalarValue::Int(_)));

        let quotient = ScalarValue::from(Decimal::new(10, 0))
            .div(&ScalarValue::from(Decimal::new(4, 0)))
            .unwrap();
        assert_eq!(quotient.to_f64().unwrap(), 2.5);
    }

    #[test]
    fn test_dispatch_rejects_mixed_kinds() {
        let err = ScalarValue::from(1i32).add(&ScalarValue::from(1i64)).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(err.to_string().contains("an instance of int"));

        let err = ScalarValue::from("a").add(&ScalarValue::from("b")).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(ScalarValue::from(true).neg().is_err());
    }

    #[test]
    fn test_dispatch_preserves_errors() {
        assert!(matches!(
            ScalarValue::from(10i32).div(&ScalarValue::from(0i32)),
            Err(Error::DivideByZero(_))
        ));
        assert!(matches!(
            ScalarValue::from(i32::MIN).abs(),
            Err(Error::Range(_))
        ));
    }

    #[test]
    fn test_retag_aliases() {
        let value = ScalarValue::text("abc").into_kind(ScalarKind::Varchar).unwrap();
        assert!(matches!(value, ScalarValue::Varchar(ref s) if s == "abc"));
        let value = ScalarValue::text("abc").into_kind(ScalarKind::Ascii).unwrap();
        assert!(matches!(value, ScalarValue::Ascii(ref s) if s == "abc"));
        assert!(matches!(
            ScalarValue::varchar("caf\u{e9}").into_kind(ScalarKind::Ascii),
            Err(Error::InvalidArgument(_))
        ));
        // The public variant skips the constructor check
        assert!(ScalarValue::Ascii("caf\u{e9}".into())
            .into_kind(ScalarKind::Ascii)
            .is_err());
        assert!(ScalarValue::ascii("abc")
            .unwrap()
            .into_kind(ScalarKind::Varchar)
            .is_err());
    }

    #[test]
    fn test_format() {
        let config = DisplayConfig { float_precision: 3 };
        assert_eq!(ScalarValue::from(1.5f64).format(&config), "1.500");
        assert_eq!(ScalarValue::from(7i64).format(&config), "7");
        assert_eq!(ScalarValue::from(Blob::new(vec![1u8, 2])).to_string(), "0x0102");
    }
}
