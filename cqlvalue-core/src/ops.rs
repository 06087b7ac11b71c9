//! Hash, compare and equality engine
//!
//! These functions mirror Cassandra's per-type comparators. `equals(a, b)` is
//! `compare(a, b) == Equal`, and equal values always hash to the same `u32`.
//! Set and map lookups rely on that agreement through the `Hash` and `Eq`
//! impls at the bottom of this module.

use crate::scalar::ScalarValue;
use crate::value::Value;
use num_bigint::BigInt;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Golden ratio constant mixed into every combine step
const GOLDEN_RATIO: u32 = 0x9e37_79b9;

/// `seed ^ (h + 0x9e3779b9 + (seed << 6) + (seed >> 2))` in wrapping `u32` arithmetic
pub fn combine_hash(seed: u32, h: u32) -> u32 {
    seed ^ h
        .wrapping_add(GOLDEN_RATIO)
        .wrapping_add(seed << 6)
        .wrapping_add(seed >> 2)
}

/// XOR-fold a 64-bit value into 32 bits
pub fn fold_i64(value: i64) -> u32 {
    (value ^ (value >> 32)) as u32
}

/// Content hash of a byte buffer
pub fn hash_bytes(bytes: &[u8]) -> u32 {
    crc32fast::hash(bytes)
}

fn hash_big(seed: u32, value: &BigInt) -> u32 {
    value
        .magnitude()
        .iter_u64_digits()
        .fold(seed, |h, limb| combine_hash(h, fold_i64(limb as i64)))
}

fn hash_halves((hi, lo): (u64, u64)) -> u32 {
    combine_hash(fold_i64(hi as i64), fold_i64(lo as i64))
}

pub fn hash_scalar(value: &ScalarValue) -> u32 {
    match value {
        ScalarValue::Ascii(s) | ScalarValue::Varchar(s) | ScalarValue::Text(s) => {
            hash_bytes(s.as_bytes())
        }
        ScalarValue::Blob(v) => hash_bytes(v.as_bytes()),
        ScalarValue::Boolean(v) => u32::from(*v),
        ScalarValue::Int(v) => v.value() as u32,
        ScalarValue::Bigint(v) | ScalarValue::Counter(v) => fold_i64(v.value()),
        ScalarValue::Timestamp(v) => fold_i64(v.millis()),
        ScalarValue::Float(v) => v.bits(),
        ScalarValue::Double(v) => fold_i64(v.bits() as i64),
        ScalarValue::Decimal(v) => hash_big(v.scale() as u32, v.unscaled()),
        ScalarValue::Varint(v) => hash_big(0, v.value()),
        ScalarValue::Uuid(v) => hash_halves(v.halves()),
        ScalarValue::Timeuuid(v) => hash_halves(v.halves()),
        ScalarValue::Inet(v) => hash_bytes(&v.octets()),
    }
}

/// Hash of any value. Collections answer from their cached hash.
pub fn hash(value: &Value) -> u32 {
    match value {
        Value::Null => 0,
        Value::Scalar(v) => hash_scalar(v),
        Value::List(v) => v.hash_code(),
        Value::Set(v) => v.hash_code(),
        Value::Map(v) => v.hash_code(),
    }
}

/// Fold `combine_hash` over element hashes, starting from zero
pub(crate) fn hash_elements<'a>(values: impl IntoIterator<Item = &'a Value>) -> u32 {
    values
        .into_iter()
        .fold(0, |seed, value| combine_hash(seed, hash(value)))
}

/// Shorter buffers first, then lexicographic bytes
pub fn compare_bytes(a: &[u8], b: &[u8]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

pub fn compare_scalar(a: &ScalarValue, b: &ScalarValue) -> Ordering {
    use ScalarValue as S;

    match (a, b) {
        (S::Ascii(x), S::Ascii(y)) | (S::Varchar(x), S::Varchar(y)) | (S::Text(x), S::Text(y)) => {
            compare_bytes(x.as_bytes(), y.as_bytes())
        }
        (S::Blob(x), S::Blob(y)) => compare_bytes(x.as_bytes(), y.as_bytes()),
        (S::Boolean(x), S::Boolean(y)) => x.cmp(y),
        (S::Int(x), S::Int(y)) => x.cmp(y),
        (S::Bigint(x), S::Bigint(y)) | (S::Counter(x), S::Counter(y)) => x.cmp(y),
        (S::Timestamp(x), S::Timestamp(y)) => x.cmp(y),
        (S::Float(x), S::Float(y)) => x.cmp(y),
        (S::Double(x), S::Double(y)) => x.cmp(y),
        (S::Decimal(x), S::Decimal(y)) => x.cmp(y),
        (S::Varint(x), S::Varint(y)) => x.cmp(y),
        (S::Uuid(x), S::Uuid(y)) => x.halves().cmp(&y.halves()),
        (S::Timeuuid(x), S::Timeuuid(y)) => x.halves().cmp(&y.halves()),
        (S::Inet(x), S::Inet(y)) => compare_bytes(&x.octets(), &y.octets()),
        // Different kinds are ordered by kind alone
        _ => a.kind().cmp(&b.kind()),
    }
}

/// Count first, then element-wise until the first difference
pub(crate) fn compare_elements<'a, I>(a: I, a_len: usize, b: I, b_len: usize) -> Ordering
where
    I: IntoIterator<Item = &'a Value>,
{
    a_len.cmp(&b_len).then_with(|| {
        a.into_iter()
            .zip(b)
            .map(|(x, y)| compare(x, y))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    })
}

fn variant_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Scalar(_) => 1,
        Value::List(_) => 2,
        Value::Set(_) => 3,
        Value::Map(_) => 4,
    }
}

/// Three-way comparison following the CQL comparators
pub fn compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Scalar(x), Value::Scalar(y)) => compare_scalar(x, y),
        (Value::List(x), Value::List(y)) => x
            .element_type()
            .cmp(y.element_type())
            .then_with(|| compare_elements(x.iter(), x.len(), y.iter(), y.len())),
        (Value::Set(x), Value::Set(y)) => x
            .element_type()
            .cmp(y.element_type())
            .then_with(|| compare_elements(x.canonical(), x.len(), y.canonical(), y.len())),
        (Value::Map(x), Value::Map(y)) => x
            .key_type()
            .cmp(y.key_type())
            .then_with(|| x.value_type().cmp(y.value_type()))
            .then_with(|| x.len().cmp(&y.len()))
            .then_with(|| {
                x.iter()
                    .zip(y.iter())
                    .map(|((xk, xv), (yk, yv))| compare(xk, yk).then_with(|| compare(xv, yv)))
                    .find(|ordering| ordering.is_ne())
                    .unwrap_or(Ordering::Equal)
            }),
        _ => variant_rank(a).cmp(&variant_rank(b)),
    }
}

pub fn equals(a: &Value, b: &Value) -> bool {
    compare(a, b) == Ordering::Equal
}

impl PartialEq for ScalarValue {
    fn eq(&self, other: &Self) -> bool {
        compare_scalar(self, other) == Ordering::Equal
    }
}

impl Eq for ScalarValue {}

impl PartialOrd for ScalarValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScalarValue {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_scalar(self, other)
    }
}

impl Hash for ScalarValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(hash_scalar(self));
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        equals(self, other)
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(hash(self));
    }
}
