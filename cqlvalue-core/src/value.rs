//! The dynamic CQL value
//!
//! [`Value`] is what containers store and what the hash/compare engine in
//! [`ops`](crate::ops) dispatches over. Equality, ordering and hashing of
//! `Value` all go through that engine.

use crate::collections::{List, Map, Set};
use crate::config::DisplayConfig;
use crate::error::{Error, Result};
use crate::numeric::{Decimal, Varint};
use crate::scalar::{
    Bigint, Blob, Double, Float, Inet, Int, ScalarValue, Timestamp, Timeuuid, Uuid,
};
use crate::types::TypeTag;
use std::fmt;

/// Any CQL value, including collections and the absent value
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absent value. Never stored inside a collection.
    #[default]
    Null,
    Scalar(ScalarValue),
    List(List),
    Set(Set),
    Map(Map),
}

macro_rules! value_binary_op {
    ($op:ident) => {
        pub fn $op(&self, other: &Value) -> Result<Value> {
            match (self, other) {
                (Value::Scalar(a), Value::Scalar(b)) => a.$op(b).map(Value::Scalar),
                (Value::Scalar(_), other) => Err(Error::expecting("a numeric value", other.type_name())),
                (value, _) => Err(Error::expecting("a numeric value", value.type_name())),
            }
        }
    };
}

macro_rules! value_unary_op {
    ($op:ident) => {
        pub fn $op(&self) -> Result<Value> {
            match self {
                Value::Scalar(a) => a.$op().map(Value::Scalar),
                value => Err(Error::expecting("a numeric value", value.type_name())),
            }
        }
    };
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Type descriptor of this value; `None` for null
    pub fn type_tag(&self) -> Option<TypeTag> {
        match self {
            Value::Null => None,
            Value::Scalar(v) => Some(v.type_tag()),
            Value::List(v) => Some(v.type_tag()),
            Value::Set(v) => Some(v.type_tag()),
            Value::Map(v) => Some(v.type_tag()),
        }
    }

    /// CQL type name, or `null`
    pub fn type_name(&self) -> String {
        self.type_tag()
            .map_or_else(|| "null".to_string(), |tag| tag.name())
    }

    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match self {
            Value::Scalar(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&Set> {
        match self {
            Value::Set(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(ScalarValue::as_str)
    }

    /// Hash used by set and map lookups
    pub fn hash_code(&self) -> u32 {
        crate::ops::hash(self)
    }

    value_binary_op!(add);
    value_binary_op!(sub);
    value_binary_op!(mul);
    value_binary_op!(div);
    value_binary_op!(modulo);
    value_unary_op!(abs);
    value_unary_op!(neg);
    value_unary_op!(sqrt);

    /// Render with the configured float precision, recursing into collections
    pub fn format(&self, config: &DisplayConfig) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Scalar(v) => v.format(config),
            Value::List(v) => format!("[{}]", join(v.iter(), config)),
            Value::Set(v) => format!("{{{}}}", join(v.iter(), config)),
            Value::Map(v) => {
                let entries: Vec<String> = v
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key.format(config), value.format(config)))
                    .collect();
                format!("{{{}}}", entries.join(", "))
            }
        }
    }
}

fn join<'a>(values: impl Iterator<Item = &'a Value>, config: &DisplayConfig) -> String {
    values
        .map(|value| value.format(config))
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(&DisplayConfig::default()))
    }
}

macro_rules! value_from_scalar {
    ($($source:ty),* $(,)?) => {
        $(
            impl From<$source> for Value {
                fn from(value: $source) -> Self {
                    Value::Scalar(ScalarValue::from(value))
                }
            }
        )*
    };
}

value_from_scalar!(
    bool, i32, i64, f32, f64, String, &str, Int, Bigint, Float, Double, Decimal, Varint, Blob,
    Timestamp, Uuid, Timeuuid, Inet,
);

impl From<ScalarValue> for Value {
    fn from(value: ScalarValue) -> Self {
        Value::Scalar(value)
    }
}

impl From<List> for Value {
    fn from(value: List) -> Self {
        Value::List(value)
    }
}

impl From<Set> for Value {
    fn from(value: Set) -> Self {
        Value::Set(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Map(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScalarKind;

    #[test]
    fn test_type_tags() {
        assert_eq!(Value::Null.type_tag(), None);
        assert_eq!(Value::from(5i32).type_tag(), Some(TypeTag::Scalar(ScalarKind::Int)));
        let list = List::new(ScalarKind::Int.into());
        assert_eq!(Value::from(list).type_name(), "list<int>");
        assert_eq!(Value::Null.type_name(), "null");
    }

    #[test]
    fn test_option_conversion() {
        assert!(Value::from(None::<i32>).is_null());
        assert_eq!(Value::from(Some(3i32)), Value::from(3i32));
    }

    #[test]
    fn test_value_arithmetic() {
        let product = Value::from(6i64).mul(&Value::from(7i64)).unwrap();
        assert_eq!(product, Value::from(42i64));
        assert!(matches!(Value::Null.neg(), Err(Error::InvalidArgument(_))));
        assert!(matches!(
            Value::from(1i32).add(&Value::Null),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_display() {
        let mut map = Map::new(ScalarKind::Varchar.into(), ScalarKind::Double.into());
        map.set("a", 1.5f64).unwrap();
        let config = DisplayConfig { float_precision: 1 };
        assert_eq!(Value::from(map).format(&config), "{a: 1.5}");

        let mut list = List::new(ScalarKind::Int.into());
        list.add(1i32).unwrap();
        list.add(2i32).unwrap();
        assert_eq!(Value::from(list).to_string(), "[1, 2]");
        assert_eq!(Value::Null.to_string(), "null");
    }
}
