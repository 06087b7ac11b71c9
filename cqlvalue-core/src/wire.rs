//! Driver collection builder boundary
//!
//! A collection is serialized by handing its elements, one at a time and in
//! iteration order, to a [`CollectionBuilder`]. Lists and sets append each
//! element once; maps append each key followed by its value. The first failure
//! aborts the build and is reported as a serialization error, and the caller
//! discards the builder.
//!
//! [`WireCollectionBuilder`] is the bundled builder. It produces the native
//! protocol collection layout:
//!
//! ```text
//! [count][len][element bytes][len][element bytes]...
//! ```
//!
//! `count` and `len` are unsigned 16-bit under protocol v2 and signed 32-bit
//! from v3 onward, all big-endian.

use crate::collections::{List, Map, Set};
use crate::config::{ProtocolVersion, WireConfig};
use crate::error::{Error, Result};
use crate::scalar::blob::check_ascii;
use crate::scalar::ScalarValue;
use crate::types::{ScalarKind, TypeTag};
use crate::value::Value;
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;

/// Accumulator fed one type-tagged element at a time
pub trait CollectionBuilder {
    fn append_element(&mut self, element_type: &TypeTag, value: &Value) -> Result<()>;
}

/// Shape of the collection being built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    List,
    Set,
    Map,
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CollectionKind::List => "list",
            CollectionKind::Set => "set",
            CollectionKind::Map => "map",
        };
        f.write_str(name)
    }
}

/// All-or-nothing collection encoder
#[derive(Debug)]
pub struct WireCollectionBuilder {
    kind: CollectionKind,
    protocol: ProtocolVersion,
    entries: usize,
    appended: usize,
    buf: BytesMut,
}

impl WireCollectionBuilder {
    /// Builder for a collection of `entries` elements (or key/value pairs for a map)
    pub fn new(kind: CollectionKind, protocol: ProtocolVersion, entries: usize) -> Self {
        Self {
            kind,
            protocol,
            entries,
            appended: 0,
            buf: BytesMut::new(),
        }
    }

    pub fn with_config(kind: CollectionKind, config: &WireConfig, entries: usize) -> Self {
        Self::new(kind, config.protocol_version, entries)
    }

    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    pub fn protocol(&self) -> ProtocolVersion {
        self.protocol
    }

    fn expected_elements(&self) -> usize {
        match self.kind {
            CollectionKind::Map => self.entries * 2,
            CollectionKind::List | CollectionKind::Set => self.entries,
        }
    }

    /// Prepend the element count and return the framed collection
    pub fn finish(self) -> Result<Bytes> {
        let expected = self.expected_elements();
        if self.appended != expected {
            return Err(Error::serialization(format!(
                "{} expected {} elements, got {}",
                self.kind, expected, self.appended
            )));
        }

        let mut out = BytesMut::with_capacity(self.protocol.length_width() + self.buf.len());
        write_length(&mut out, self.entries, self.protocol)?;
        out.extend_from_slice(&self.buf);
        Ok(out.freeze())
    }
}

impl CollectionBuilder for WireCollectionBuilder {
    fn append_element(&mut self, element_type: &TypeTag, value: &Value) -> Result<()> {
        if self.appended >= self.expected_elements() {
            return Err(Error::serialization(format!(
                "{} already holds {} elements",
                self.kind, self.appended
            )));
        }
        let encoded = encode_value(element_type, value, self.protocol)?;
        write_length(&mut self.buf, encoded.len(), self.protocol)?;
        self.buf.extend_from_slice(&encoded);
        self.appended += 1;
        Ok(())
    }
}

fn write_length(buf: &mut BytesMut, len: usize, protocol: ProtocolVersion) -> Result<()> {
    if len > protocol.max_length() {
        return Err(Error::serialization(format!(
            "length {} exceeds the {:?} limit of {}",
            len,
            protocol,
            protocol.max_length()
        )));
    }
    match protocol {
        ProtocolVersion::V2 => buf.put_u16(len as u16),
        _ => buf.put_i32(len as i32),
    }
    Ok(())
}

/// Encode a single value according to its declared type
pub fn encode_value(element_type: &TypeTag, value: &Value, protocol: ProtocolVersion) -> Result<Vec<u8>> {
    match (element_type, value) {
        (_, Value::Null) => Err(Error::serialization(format!(
            "cannot encode null as {}",
            element_type
        ))),
        (TypeTag::Custom(name), _) => Err(Error::unsupported_type(name.clone())),
        (TypeTag::Scalar(kind), Value::Scalar(scalar)) if kind.accepts(scalar.kind()) => {
            if *kind == ScalarKind::Ascii {
                if let Some(text) = scalar.as_str() {
                    check_ascii(text).map_err(|e| Error::serialization(e.to_string()))?;
                }
            }
            Ok(encode_scalar(scalar))
        }
        (TypeTag::List(_), Value::List(list)) if list.type_tag() == *element_type => {
            list.to_bytes(protocol).map(|b| b.to_vec())
        }
        (TypeTag::Set(_), Value::Set(set)) if set.type_tag() == *element_type => {
            set.to_bytes(protocol).map(|b| b.to_vec())
        }
        (TypeTag::Map(_, _), Value::Map(map)) if map.type_tag() == *element_type => {
            map.to_bytes(protocol).map(|b| b.to_vec())
        }
        (declared, value) => Err(Error::serialization(format!(
            "cannot encode {} as {}",
            value.type_name(),
            declared
        ))),
    }
}

/// Native protocol encoding of a scalar
pub fn encode_scalar(value: &ScalarValue) -> Vec<u8> {
    match value {
        ScalarValue::Ascii(s) | ScalarValue::Varchar(s) | ScalarValue::Text(s) => s.as_bytes().to_vec(),
        ScalarValue::Blob(v) => v.as_bytes().to_vec(),
        ScalarValue::Boolean(v) => vec![u8::from(*v)],
        ScalarValue::Int(v) => v.value().to_be_bytes().to_vec(),
        ScalarValue::Bigint(v) | ScalarValue::Counter(v) => v.value().to_be_bytes().to_vec(),
        ScalarValue::Timestamp(v) => v.millis().to_be_bytes().to_vec(),
        ScalarValue::Float(v) => v.bits().to_be_bytes().to_vec(),
        ScalarValue::Double(v) => v.bits().to_be_bytes().to_vec(),
        ScalarValue::Decimal(v) => {
            let mut out = v.scale().to_be_bytes().to_vec();
            out.extend(v.to_bytes());
            out
        }
        ScalarValue::Varint(v) => v.to_bytes(),
        ScalarValue::Uuid(v) => v.as_bytes().to_vec(),
        ScalarValue::Timeuuid(v) => v.as_bytes().to_vec(),
        ScalarValue::Inet(v) => v.octets(),
    }
}

/// Run `feed` against `builder`, folding every failure into a serialization error
fn build<B, F>(kind: CollectionKind, count: usize, builder: &mut B, feed: F) -> Result<()>
where
    B: CollectionBuilder + ?Sized,
    F: FnOnce(&mut B) -> Result<()>,
{
    log::trace!("Building {} of {} entries", kind, count);
    feed(builder).map_err(|e| {
        log::debug!("Aborted {} build: {}", kind, e);
        match e {
            Error::Serialization(_) | Error::UnsupportedType(_) => e,
            other => Error::serialization(other.to_string()),
        }
    })
}

impl List {
    /// Append every element to `builder` in order
    pub fn append_to<B: CollectionBuilder + ?Sized>(&self, builder: &mut B) -> Result<()> {
        build(CollectionKind::List, self.len(), builder, |b| {
            self.iter()
                .try_for_each(|value| b.append_element(self.element_type(), value))
        })
    }

    /// Frozen wire bytes of the whole list
    pub fn to_bytes(&self, protocol: ProtocolVersion) -> Result<Bytes> {
        let mut builder = WireCollectionBuilder::new(CollectionKind::List, protocol, self.len());
        self.append_to(&mut builder)?;
        builder.finish()
    }
}

impl Set {
    /// Append every element to `builder` in insertion order
    pub fn append_to<B: CollectionBuilder + ?Sized>(&self, builder: &mut B) -> Result<()> {
        build(CollectionKind::Set, self.len(), builder, |b| {
            self.iter()
                .try_for_each(|value| b.append_element(self.element_type(), value))
        })
    }

    pub fn to_bytes(&self, protocol: ProtocolVersion) -> Result<Bytes> {
        let mut builder = WireCollectionBuilder::new(CollectionKind::Set, protocol, self.len());
        self.append_to(&mut builder)?;
        builder.finish()
    }
}

impl Map {
    /// Append each key then its value to `builder` in insertion order
    pub fn append_to<B: CollectionBuilder + ?Sized>(&self, builder: &mut B) -> Result<()> {
        build(CollectionKind::Map, self.len(), builder, |b| {
            self.iter().try_for_each(|(key, value)| {
                b.append_element(self.key_type(), key)?;
                b.append_element(self.value_type(), value)
            })
        })
    }

    pub fn to_bytes(&self, protocol: ProtocolVersion) -> Result<Bytes> {
        let mut builder = WireCollectionBuilder::new(CollectionKind::Map, protocol, self.len());
        self.append_to(&mut builder)?;
        builder.finish()
    }
}
