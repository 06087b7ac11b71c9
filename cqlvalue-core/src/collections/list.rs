//! `list<T>`: positional sequence of values

use super::{admit, Cursor, HashCache};
use crate::error::Result;
use crate::ops;
use crate::types::TypeTag;
use crate::value::Value;

#[derive(Debug, Clone)]
pub struct List {
    element_type: TypeTag,
    elements: Vec<Value>,
    cursor: Cursor,
    hash: HashCache,
}

impl List {
    pub fn new(element_type: TypeTag) -> Self {
        Self {
            element_type,
            elements: Vec::new(),
            cursor: Cursor::default(),
            hash: HashCache::new(),
        }
    }

    /// Create a list from a scalar type name such as `"int"`
    pub fn with_type_name(element_type: &str) -> Result<Self> {
        TypeTag::parse(element_type).map(Self::new)
    }

    pub fn element_type(&self) -> &TypeTag {
        &self.element_type
    }

    pub fn type_tag(&self) -> TypeTag {
        TypeTag::list(self.element_type.clone())
    }

    /// Append a value. Null or mistyped values are rejected and the list is left untouched.
    pub fn add(&mut self, value: impl Into<Value>) -> Result<()> {
        let value = admit(&self.element_type, value.into(), "element")?;
        self.elements.push(value);
        self.hash.invalidate();
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.elements.get(index)
    }

    /// Index of the first element equal to `value`
    pub fn find(&self, value: impl Into<Value>) -> Result<Option<usize>> {
        let value = admit(&self.element_type, value.into(), "element")?;
        Ok(self.elements.iter().position(|element| *element == value))
    }

    pub fn contains(&self, value: impl Into<Value>) -> Result<bool> {
        self.find(value).map(|index| index.is_some())
    }

    /// Remove the element at `index`, returning it
    pub fn remove(&mut self, index: usize) -> Option<Value> {
        if index >= self.elements.len() {
            return None;
        }
        let removed = self.elements.remove(index);
        self.cursor.on_remove(index);
        self.hash.invalidate();
        Some(removed)
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

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.elements.iter()
    }

    /// Copy of the elements in order
    pub fn values(&self) -> Vec<Value> {
        self.elements.clone()
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
            .and_then(|index| self.elements.get(index))
    }

    /// Zero-based position of the cursor
    pub fn key(&self) -> Option<usize> {
        self.cursor.position(self.elements.len())
    }

    pub fn advance(&mut self) {
        self.cursor.advance();
    }

    /// Hash of the elements in order, cached until the next mutation
    pub fn hash_code(&self) -> u32 {
        self.hash
            .get_or_compute(|| ops::hash_elements(&self.elements))
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
