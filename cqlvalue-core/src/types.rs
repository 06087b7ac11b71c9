//! CQL type descriptors
//!
//! [`TypeTag`] is a plain value: it is cheap to construct, compared structurally,
//! and carries nested element types for collections. Scalar type names parse from
//! a closed vocabulary of sixteen lowercase CQL names.

use crate::error::{Error, Result};
use nom::{
    bytes::complete::take_while1,
    character::complete::{char, multispace0},
    combinator::{all_consuming, consumed, opt},
    multi::separated_list1,
    sequence::{delimited, pair},
    IResult,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Package prefix of Cassandra's marshal classes
const MARSHAL_PREFIX: &str = "org.apache.cassandra.db.marshal.";

/// Scalar CQL kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    Ascii,
    Bigint,
    Blob,
    Boolean,
    Counter,
    Decimal,
    Double,
    Float,
    Int,
    Text,
    Timestamp,
    Uuid,
    Varchar,
    Varint,
    Timeuuid,
    Inet,
}

impl ScalarKind {
    /// Every scalar kind, in declaration order
    pub const ALL: [ScalarKind; 16] = [
        ScalarKind::Ascii,
        ScalarKind::Bigint,
        ScalarKind::Blob,
        ScalarKind::Boolean,
        ScalarKind::Counter,
        ScalarKind::Decimal,
        ScalarKind::Double,
        ScalarKind::Float,
        ScalarKind::Int,
        ScalarKind::Text,
        ScalarKind::Timestamp,
        ScalarKind::Uuid,
        ScalarKind::Varchar,
        ScalarKind::Varint,
        ScalarKind::Timeuuid,
        ScalarKind::Inet,
    ];

    /// Canonical lowercase CQL name
    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::Ascii => "ascii",
            ScalarKind::Bigint => "bigint",
            ScalarKind::Blob => "blob",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Counter => "counter",
            ScalarKind::Decimal => "decimal",
            ScalarKind::Double => "double",
            ScalarKind::Float => "float",
            ScalarKind::Int => "int",
            ScalarKind::Text => "text",
            ScalarKind::Timestamp => "timestamp",
            ScalarKind::Uuid => "uuid",
            ScalarKind::Varchar => "varchar",
            ScalarKind::Varint => "varint",
            ScalarKind::Timeuuid => "timeuuid",
            ScalarKind::Inet => "inet",
        }
    }

    /// Parse a scalar type name. Matching is case-sensitive.
    pub fn parse(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| Error::unsupported_type(name))
    }

    /// Check if values of this kind support arithmetic
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            ScalarKind::Int
                | ScalarKind::Bigint
                | ScalarKind::Counter
                | ScalarKind::Float
                | ScalarKind::Double
                | ScalarKind::Decimal
                | ScalarKind::Varint
        )
    }

    /// Check if this kind is one of the string kinds
    pub fn is_textual(self) -> bool {
        matches!(
            self,
            ScalarKind::Ascii | ScalarKind::Text | ScalarKind::Varchar
        )
    }

    /// Whether a value of kind `other` may be stored where `self` is declared.
    ///
    /// `text` is an alias of `varchar`. `ascii` also takes either of them, subject
    /// to a content check on conversion. Every other kind only accepts itself.
    pub fn accepts(self, other: ScalarKind) -> bool {
        self == other
            || matches!(
                (self, other),
                (ScalarKind::Text, ScalarKind::Varchar)
                    | (ScalarKind::Varchar, ScalarKind::Text)
                    | (ScalarKind::Ascii, ScalarKind::Varchar | ScalarKind::Text)
            )
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScalarKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A CQL type descriptor
///
/// Equality is structural: same variant and, recursively, equal nested tags.
/// The derived ordering is only a deterministic tie-breaker between values of
/// different types.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    Scalar(ScalarKind),
    List(Box<TypeTag>),
    Set(Box<TypeTag>),
    Map(Box<TypeTag>, Box<TypeTag>),
    Custom(String),
}

impl TypeTag {
    pub fn scalar(kind: ScalarKind) -> Self {
        TypeTag::Scalar(kind)
    }

    pub fn list(element: TypeTag) -> Self {
        TypeTag::List(Box::new(element))
    }

    pub fn set(element: TypeTag) -> Self {
        TypeTag::Set(Box::new(element))
    }

    pub fn map(key: TypeTag, value: TypeTag) -> Self {
        TypeTag::Map(Box::new(key), Box::new(value))
    }

    pub fn custom(name: impl Into<String>) -> Self {
        TypeTag::Custom(name.into())
    }

    /// Parse one of the sixteen scalar type names
    pub fn parse(name: &str) -> Result<Self> {
        ScalarKind::parse(name).map(TypeTag::Scalar)
    }

    /// Deep structural equality
    pub fn equals(&self, other: &TypeTag) -> bool {
        self == other
    }

    /// Canonical CQL name, e.g. `bigint` or `map<text, int>`
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// The scalar kind, if this is a scalar tag
    pub fn as_scalar(&self) -> Option<ScalarKind> {
        match self {
            TypeTag::Scalar(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Check if this tag describes a list, set or map
    pub fn is_collection(&self) -> bool {
        matches!(self, TypeTag::List(_) | TypeTag::Set(_) | TypeTag::Map(_, _))
    }

    /// Parse a Cassandra marshal class name such as
    /// `org.apache.cassandra.db.marshal.MapType(UTF8Type,Int32Type)`.
    ///
    /// `ReversedType` and `FrozenType` wrappers are unwrapped. Classes outside the
    /// supported vocabulary become [`TypeTag::Custom`].
    pub fn from_validator(validator: &str) -> Result<Self> {
        let (_, raw) = all_consuming(delimited(multispace0, marshal_type, multispace0))(validator)
            .map_err(|_| Error::unsupported_type(format!("invalid validator: {}", validator)))?;
        raw.resolve()
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Scalar(kind) => write!(f, "{}", kind),
            TypeTag::List(element) => write!(f, "list<{}>", element),
            TypeTag::Set(element) => write!(f, "set<{}>", element),
            TypeTag::Map(key, value) => write!(f, "map<{}, {}>", key, value),
            TypeTag::Custom(name) => write!(f, "{}", name),
        }
    }
}

impl From<ScalarKind> for TypeTag {
    fn from(kind: ScalarKind) -> Self {
        TypeTag::Scalar(kind)
    }
}

impl FromStr for TypeTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A marshal class reference before resolution
#[derive(Debug)]
struct RawType<'a> {
    text: &'a str,
    name: &'a str,
    params: Vec<RawType<'a>>,
}

impl RawType<'_> {
    fn resolve(&self) -> Result<TypeTag> {
        let short = self.name.strip_prefix(MARSHAL_PREFIX).unwrap_or(self.name);

        let params = self
            .params
            .iter()
            .map(RawType::resolve)
            .collect::<Result<Vec<_>>>()?;

        let arity = |expected: usize| -> Result<()> {
            if params.len() == expected {
                Ok(())
            } else {
                Err(Error::unsupported_type(format!(
                    "{} expects {} parameter(s): {}",
                    short, expected, self.text
                )))
            }
        };

        let scalar = |kind: ScalarKind| -> Result<TypeTag> {
            arity(0)?;
            Ok(TypeTag::Scalar(kind))
        };

        match short {
            "ReversedType" | "FrozenType" => {
                arity(1)?;
                Ok(params[0].clone())
            }
            "ListType" => {
                arity(1)?;
                Ok(TypeTag::list(params[0].clone()))
            }
            "SetType" => {
                arity(1)?;
                Ok(TypeTag::set(params[0].clone()))
            }
            "MapType" => {
                arity(2)?;
                Ok(TypeTag::map(params[0].clone(), params[1].clone()))
            }
            "AsciiType" => scalar(ScalarKind::Ascii),
            "LongType" => scalar(ScalarKind::Bigint),
            "BytesType" => scalar(ScalarKind::Blob),
            "BooleanType" => scalar(ScalarKind::Boolean),
            "CounterColumnType" => scalar(ScalarKind::Counter),
            "DecimalType" => scalar(ScalarKind::Decimal),
            "DoubleType" => scalar(ScalarKind::Double),
            "FloatType" => scalar(ScalarKind::Float),
            "Int32Type" => scalar(ScalarKind::Int),
            "UTF8Type" => scalar(ScalarKind::Varchar),
            "TimestampType" | "DateType" => scalar(ScalarKind::Timestamp),
            "UUIDType" | "LexicalUUIDType" => scalar(ScalarKind::Uuid),
            "TimeUUIDType" => scalar(ScalarKind::Timeuuid),
            "IntegerType" => scalar(ScalarKind::Varint),
            "InetAddressType" => scalar(ScalarKind::Inet),
            _ => Ok(TypeTag::Custom(self.text.to_string())),
        }
    }
}

fn class_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || matches!(c, '_' | '.' | '$'))(input)
}

fn type_params(input: &str) -> IResult<&str, Vec<RawType<'_>>> {
    delimited(
        char('('),
        separated_list1(
            char(','),
            delimited(multispace0, marshal_type, multispace0),
        ),
        char(')'),
    )(input)
}

fn marshal_type(input: &str) -> IResult<&str, RawType<'_>> {
    let (rest, (text, (name, params))) =
        consumed(pair(class_name, opt(type_params)))(input)?;
    Ok((
        rest,
        RawType {
            text,
            name,
            params: params.unwrap_or_default(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_names_round_trip() {
        for kind in ScalarKind::ALL {
            assert_eq!(ScalarKind::parse(kind.name()).unwrap(), kind);
            assert_eq!(TypeTag::parse(kind.name()).unwrap(), TypeTag::Scalar(kind));
        }
    }

    #[test]
    fn test_parse_rejects_unknown_and_mixed_case() {
        for name in ["BIGINT", "Int", "integer", "list<int>", "", "smallint"] {
            match TypeTag::parse(name) {
                Err(Error::UnsupportedType(n)) => assert_eq!(n, name),
                other => panic!("expected UnsupportedType for {:?}, got {:?}", name, other),
            }
        }
    }

    #[test]
    fn test_structural_equality() {
        let a = TypeTag::map(ScalarKind::Text.into(), TypeTag::list(ScalarKind::Int.into()));
        let b = TypeTag::map(ScalarKind::Text.into(), TypeTag::list(ScalarKind::Int.into()));
        let swapped = TypeTag::map(TypeTag::list(ScalarKind::Int.into()), ScalarKind::Text.into());
        assert!(a.equals(&b));
        assert!(!a.equals(&swapped));
        assert!(!TypeTag::list(ScalarKind::Int.into()).equals(&TypeTag::set(ScalarKind::Int.into())));
    }

    #[test]
    fn test_names() {
        assert_eq!(TypeTag::scalar(ScalarKind::Bigint).name(), "bigint");
        assert_eq!(
            TypeTag::map(ScalarKind::Text.into(), TypeTag::set(ScalarKind::Uuid.into())).name(),
            "map<text, set<uuid>>"
        );
        assert_eq!(TypeTag::custom("com.example.Point").name(), "com.example.Point");
    }

    #[test]
    fn test_alias_acceptance() {
        assert!(ScalarKind::Text.accepts(ScalarKind::Varchar));
        assert!(ScalarKind::Varchar.accepts(ScalarKind::Text));
        assert!(ScalarKind::Ascii.accepts(ScalarKind::Text));
        assert!(!ScalarKind::Text.accepts(ScalarKind::Ascii));
        assert!(!ScalarKind::Bigint.accepts(ScalarKind::Counter));
    }

    #[test]
    fn test_validator_scalars() {
        assert_eq!(
            TypeTag::from_validator("org.apache.cassandra.db.marshal.Int32Type").unwrap(),
            TypeTag::Scalar(ScalarKind::Int)
        );
        assert_eq!(
            TypeTag::from_validator("UTF8Type").unwrap(),
            TypeTag::Scalar(ScalarKind::Varchar)
        );
    }

    #[test]
    fn test_validator_collections() {
        let tag = TypeTag::from_validator(
            "org.apache.cassandra.db.marshal.MapType(org.apache.cassandra.db.marshal.UTF8Type, \
             org.apache.cassandra.db.marshal.ListType(org.apache.cassandra.db.marshal.LongType))",
        )
        .unwrap();
        assert_eq!(
            tag,
            TypeTag::map(ScalarKind::Varchar.into(), TypeTag::list(ScalarKind::Bigint.into()))
        );

        let reversed = TypeTag::from_validator(
            "org.apache.cassandra.db.marshal.ReversedType(org.apache.cassandra.db.marshal.TimeUUIDType)",
        )
        .unwrap();
        assert_eq!(reversed, TypeTag::Scalar(ScalarKind::Timeuuid));

        let frozen = TypeTag::from_validator("FrozenType(SetType(InetAddressType))").unwrap();
        assert_eq!(frozen, TypeTag::set(ScalarKind::Inet.into()));
    }

    #[test]
    fn test_validator_custom_and_errors() {
        assert_eq!(
            TypeTag::from_validator("com.example.PointType").unwrap(),
            TypeTag::custom("com.example.PointType")
        );
        assert!(matches!(
            TypeTag::from_validator("ListType(Int32Type"),
            Err(Error::UnsupportedType(_))
        ));
        assert!(matches!(
            TypeTag::from_validator("MapType(Int32Type)"),
            Err(Error::UnsupportedType(_))
        ));
        assert!(TypeTag::from_validator("").is_err());
    }

    #[test]
    fn test_type_tag_serde() {
        let tag = TypeTag::set(ScalarKind::Timeuuid.into());
        let json = serde_json::to_string(&tag).unwrap();
        assert_eq!(json, r#"{"Set":{"Scalar":"timeuuid"}}"#);
        assert_eq!(serde_json::from_str::<TypeTag>(&json).unwrap(), tag);
    }
}
