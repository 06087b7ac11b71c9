//! `map<K, V>`: key/value entries in first-insertion order

use super::{admit, Cursor, HashCache};
use crate::error::Result;
use crate::ops;
use crate::types::TypeTag;
use crate::value::Value;
use indexmap::IndexMap;

#[derive(Debug, Clone)]
pub struct Map {
    key_type: TypeTag,
    value_type: TypeTag,
    entries: IndexMap<Value, Value>,
    cursor: Cursor,
    hash: HashCache,
}

impl Map {
    pub fn new(key_type: TypeTag, value_type: TypeTag) -> Self {
        Self {
            key_type,
            value_type,
            entries: IndexMap::new(),
            cursor: Cursor::default(),
            hash: HashCache::new(),
        }
    }

    /// Create a map from scalar type names, e.g. `("text", "int")`
    pub fn with_type_names(key_type: &str, value_type: &str) -> Result<Self> {
        Ok(Self::new(TypeTag::parse(key_type)?, TypeTag::parse(value_type)?))
    }

    pub fn key_type(&self) -> &TypeTag {
        &self.key_type
    }

    pub fn value_type(&self) -> &TypeTag {
        &self.value_type
    }

    pub fn type_tag(&self) -> TypeTag {
        TypeTag::map(self.key_type.clone(), self.value_type.clone())
    }

    /// Insert or replace the value under `key`
    ///
    /// Both key and value are validated before the map is touched. Replacing an
    /// existing key keeps its position.
    pub fn set(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> Result<()> {
        let key = admit(&self.key_type, key.into(), "key")?;
        let value = admit(&self.value_type, value.into(), "value")?;
        self.entries.insert(key, value);
        self.hash.invalidate();
        Ok(())
    }

    /// Value under `key`, or `None` when absent
    pub fn get(&self, key: impl Into<Value>) -> Result<Option<&Value>> {
        let key = admit(&self.key_type, key.into(), "key")?;
        Ok(self.entries.get(&key))
    }

    pub fn contains(&self, key: impl Into<Value>) -> Result<bool> {
        let key = admit(&self.key_type, key.into(), "key")?;
        Ok(self.entries.contains_key(&key))
    }

    pub fn has(&self, key: impl Into<Value>) -> Result<bool> {
        self.contains(key)
    }

    /// Remove the entry under `key`, returning whether one was present
    pub fn remove(&mut self, key: impl Into<Value>) -> Result<bool> {
        let key = admit(&self.key_type, key.into(), "key")?;
        match self.entries.shift_remove_full(&key) {
            Some((index, _, _)) => {
                self.cursor.on_remove(index);
                self.hash.invalidate();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor.on_clear();
        self.hash.invalidate();
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Value, Value> {
        self.entries.iter()
    }

    pub fn keys(&self) -> Vec<Value> {
        self.entries.keys().cloned().collect()
    }

    pub fn values(&self) -> Vec<Value> {
        self.entries.values().cloned().collect()
    }

    pub fn rewind(&mut self) {
        self.cursor.rewind();
    }

    pub fn valid(&self) -> bool {
        self.cursor.position(self.entries.len()).is_some()
    }

    fn entry_at_cursor(&self) -> Option<(&Value, &Value)> {
        self.cursor
            .position(self.entries.len())
            .and_then(|index| self.entries.get_index(index))
    }

    pub fn current(&self) -> Option<&Value> {
        self.entry_at_cursor().map(|(_, value)| value)
    }

    /// Key of the entry under the cursor
    pub fn key(&self) -> Option<&Value> {
        self.entry_at_cursor().map(|(key, _)| key)
    }

    pub fn advance(&mut self) {
        self.cursor.advance();
    }

    pub fn hash_code(&self) -> u32 {
        self.hash.get_or_compute(|| {
            self.entries.iter().fold(0, |seed, (key, value)| {
                ops::combine_hash(ops::combine_hash(seed, ops::hash(key)), ops::hash(value))
            })
        })
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a Value, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Value, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::ScalarKind;

    fn int_map(keys: &[i32]) -> Map {
        let mut map = Map::new(ScalarKind::Int.into(), ScalarKind::Varchar.into());
        for k in keys {
            map.set(*k, format!("v{}", k)).unwrap();
        }
        map
    }

    #[test]
    fn test_set_and_get() {
        let map = int_map(&[1, 2]);
        assert_eq!(map.get(1).unwrap(), Some(&Value::from("v1")));
        assert_eq!(map.get(9).unwrap(), None);
        assert!(matches!(map.get("1"), Err(Error::InvalidArgument(_))));
        assert!(map.contains(2).unwrap());
        assert_eq!(map.keys(), vec![Value::from(1), Value::from(2)]);
    }

    #[test]
    fn test_null_rejection() {
        let mut map = int_map(&[1]);
        assert!(matches!(map.set(Value::Null, "x"), Err(Error::InvalidArgument(_))));
        assert!(matches!(map.set(2, Value::Null), Err(Error::InvalidArgument(_))));
        assert!(matches!(map.set(2, 5i32), Err(Error::InvalidArgument(_))));
        assert_eq!(map.count(), 1);
        assert!(!map.contains(2).unwrap());
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut map = int_map(&[1, 2, 3]);
        let before = map.hash_code();
        map.set(2, "changed").unwrap();
        assert_eq!(map.keys(), vec![Value::from(1), Value::from(2), Value::from(3)]);
        assert_eq!(map.get(2).unwrap(), Some(&Value::from("changed")));
        assert_ne!(map.hash_code(), before);
    }

    #[test]
    fn test_iteration_removal_fix_up() {
        let mut map = int_map(&[1, 2, 3]);
        map.rewind();
        assert_eq!(map.key(), Some(&Value::from(1)));
        map.advance();
        assert_eq!(map.key(), Some(&Value::from(2)));

        assert!(map.remove(2).unwrap());
        map.advance();
        assert_eq!(map.key(), Some(&Value::from(3)));
        assert_eq!(map.current(), Some(&Value::from("v3")));
        map.advance();
        assert!(!map.valid());
    }

    #[test]
    fn test_removing_earlier_entry_keeps_cursor() {
        let mut map = int_map(&[1, 2, 3]);
        map.rewind();
        map.advance();
        map.advance();
        assert!(map.remove(1).unwrap());
        assert_eq!(map.key(), Some(&Value::from(3)));
        assert!(!map.remove(42).unwrap());
    }

    #[test]
    fn test_order_sensitive_equality() {
        let a = Value::from(int_map(&[1, 2]));
        let b = Value::from(int_map(&[2, 1]));
        assert_ne!(a, b);
        assert_eq!(a, Value::from(int_map(&[1, 2])));
    }

    #[test]
    fn test_with_type_names() {
        let map = Map::with_type_names("text", "bigint").unwrap();
        assert_eq!(map.type_tag().name(), "map<text, bigint>");
        assert!(matches!(
            Map::with_type_names("text", "BIGINT"),
            Err(Error::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_ascii_keys_from_native_strings() {
        let mut map = Map::new(ScalarKind::Ascii.into(), ScalarKind::Int.into());
        map.set("k", 1).unwrap();
        assert_eq!(map.get("k").unwrap(), Some(&Value::from(1)));
        assert!(matches!(
            map.keys()[0],
            Value::Scalar(crate::ScalarValue::Ascii(ref k)) if k == "k"
        ));
        assert!(matches!(map.set("\u{fc}ber", 2), Err(Error::InvalidArgument(_))));
        assert_eq!(map.count(), 1);
    }
}
