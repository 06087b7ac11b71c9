//! `set<T>`: deduplicated values in first-insertion order

use super::{admit, Cursor, HashCache};
use crate::error::Result;
use crate::ops;
use crate::types::TypeTag;
use crate::value::Value;
use indexmap::IndexSet;

/// A typed set
///
/// Iteration follows first-insertion order, while equality, ordering and the
/// hash use the elements in sorted order so that two sets holding the same
/// members are equal however they were built.
#[derive(Debug, Clone)]
pub struct Set {
    element_type: TypeTag,
    elements: IndexSet<Value>,
    cursor: Cursor,
    hash: HashCache,
}

impl Set {
    pub fn new(element_type: TypeTag) -> Self {
        Self {
            element_type,
            elements: IndexSet::new(),
            cursor: Cursor::default(),
            hash: HashCache::new(),
        }
    }

    pub fn with_type_name(element_type: &str) -> Result<Self> {
        TypeTag::parse(element_type).map(Self::new)
    }

    pub fn element_type(&self) -> &TypeTag {
        &self.element_type
    }

    pub fn type_tag(&self) -> TypeTag {
        TypeTag::set(self.element_type.clone())
    }

    /// Insert a value, returning `false` if an equal value was already present.
    /// A duplicate keeps its original position.
    pub fn add(&mut self, value: impl Into<Value>) -> Result<bool> {
        let value = admit(&self.element_type, value.into(), "element")?;
        let inserted = self.elements.insert(value);
        if inserted {
            self.hash.invalidate();
        }
        Ok(inserted)
    }

    pub fn contains(&self, value: impl Into<Value>) -> Result<bool> {
        let value = admit(&self.element_type, value.into(), "element")?;
        Ok(self.elements.contains(&value))
    }

    pub fn has(&self, value: impl Into<Value>) -> Result<bool> {
        self.contains(value)
    }

    pub fn remove(&mut self, value: impl Into<Value>) -> Result<bool> {
        let value = admit(&self.element_type, value.into(), "element")?;
        match self.elements.shift_remove_full(&value) {
            Some((index, _)) => {
                self.cursor.on_remove(index);
                self.hash.invalidate();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn clear(&mut self) {
        self.elements.clear();
        self.cursor.on_clear();
        self.hash.invalidate();
    }

    pub fn count(&self) -> usize {
        self.elements.len()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> indexmap::set::Iter<'_, Value> {
        self.elements.iter()
    }

    /// Copy of the elements in insertion order
    pub fn values(&self) -> Vec<Value> {
        self.elements.iter().cloned().collect()
    }

    /// Elements in comparator order
    pub(crate) fn canonical(&self) -> Vec<&Value> {
        let mut sorted: Vec<&Value> = self.elements.iter().collect();
        sorted.sort();
        sorted
    }

    pub fn rewind(&mut self) {
        self.cursor.rewind();
    }

    pub fn valid(&self) -> bool {
        self.cursor.position(self.elements.len()).is_some()
    }

    pub fn current(&self) -> Option<&Value> {
        self.cursor
            .position(self.elements.len())
            .and_then(|index| self.elements.get_index(index))
    }

    /// Zero-based position of the cursor
    pub fn key(&self) -> Option<usize> {
        self.cursor.position(self.elements.len())
    }

    pub fn advance(&mut self) {
        self.cursor.advance();
    }

    pub fn hash_code(&self) -> u32 {
        self.hash
            .get_or_compute(|| ops::hash_elements(self.canonical()))
    }
}

impl<'a> IntoIterator for &'a Set {
    type Item = &'a Value;
    type IntoIter = indexmap::set::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
