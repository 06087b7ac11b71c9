//! Typed CQL collections
//!
//! Every collection is created with a fixed element type (or key and value
//! types for maps) and validates each value on the way in, so its contents
//! always match the declared signature. Each one also carries:
//!
//! - a lazily recomputed hash, invalidated by every structural mutation
//! - a stateful cursor (`rewind`/`valid`/`current`/`key`/`advance`) that
//!   survives removal of the entry it points at

pub mod list;
pub mod map;
pub mod set;

pub use list::List;
pub use map::Map;
pub use set::Set;

use crate::error::{Error, Result};
use crate::types::TypeTag;
use crate::value::Value;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Cached collection hash guarded by a dirty flag
#[derive(Debug)]
pub(crate) struct HashCache {
    dirty: AtomicBool,
    value: AtomicU32,
}

impl HashCache {
    pub(crate) fn new() -> Self {
        Self {
            dirty: AtomicBool::new(true),
            value: AtomicU32::new(0),
        }
    }

    pub(crate) fn invalidate(&mut self) {
        *self.dirty.get_mut() = true;
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Cached hash, recomputed with `compute` when dirty
    pub(crate) fn get_or_compute(&self, compute: impl FnOnce() -> u32) -> u32 {
        if !self.is_dirty() {
            return self.value.load(Ordering::Acquire);
        }
        let hash = compute();
        self.value.store(hash, Ordering::Release);
        self.dirty.store(false, Ordering::Release);
        log::trace!("Recomputed collection hash: {:#010x}", hash);
        hash
    }
}

impl Default for HashCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for HashCache {
    fn clone(&self) -> Self {
        Self {
            dirty: AtomicBool::new(self.is_dirty()),
            value: AtomicU32::new(self.value.load(Ordering::Acquire)),
        }
    }
}

/// Position of a collection's iteration cursor
///
/// When the entry under the cursor is removed, the cursor keeps its index
/// (which now names the following entry) and marks itself detached, so the
/// next `advance` stays put instead of skipping an entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Cursor {
    position: usize,
    detached: bool,
}

impl Cursor {
    pub(crate) fn rewind(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn position(&self, len: usize) -> Option<usize> {
        (self.position < len).then_some(self.position)
    }

    pub(crate) fn advance(&mut self) {
        if self.detached {
            self.detached = false;
        } else {
            self.position = self.position.saturating_add(1);
        }
    }

    /// Fix up after the entry at `index` was removed
    pub(crate) fn on_remove(&mut self, index: usize) {
        if index < self.position {
            self.position -= 1;
        } else if index == self.position {
            self.detached = true;
        }
    }

    /// Reset after the whole collection was cleared
    pub(crate) fn on_clear(&mut self) {
        self.rewind();
    }
}

/// Check `value` against the declared type and normalise text aliases
///
/// Text bound for an `ascii` slot is content checked on the way in.
///
/// `role` names the slot in error messages (`element`, `key`, `value`).
pub(crate) fn admit(declared: &TypeTag, value: Value, role: &str) -> Result<Value> {
    match (declared, value) {
        (_, Value::Null) => Err(Error::invalid_argument(format!(
            "Invalid {}: null is not supported inside collections",
            role
        ))),
        (TypeTag::Custom(name), value) => Err(Error::invalid_argument(format!(
            "Invalid {}: custom type {} cannot hold {}",
            role,
            name,
            value.type_name()
        ))),
        (TypeTag::Scalar(kind), Value::Scalar(scalar)) if kind.accepts(scalar.kind()) => {
            scalar.into_kind(*kind).map(Value::Scalar)
        }
        (declared, value) => {
            if value.type_tag().as_ref() == Some(declared) {
                Ok(value)
            } else {
                Err(Error::invalid_argument(format!(
                    "Invalid {}: expected {}, got {}",
                    role,
                    declared,
                    value.type_name()
                )))
            }
        }
    }
}
