//! CQLValue Core
//!
//! Typed CQL values with Cassandra comparator semantics: scalar wrappers,
//! arbitrary precision numerics, and typed `list`/`set`/`map` collections
//! that validate every element against a declared type and serialize into
//! native protocol collection bytes.
//!
//! ```rust
//! use cqlvalue_core::{ScalarKind, Set, Value};
//!
//! let mut set = Set::new(ScalarKind::Int.into());
//! set.add(3)?;
//! set.add(1)?;
//! set.add(3)?;
//! assert_eq!(set.count(), 2);
//! assert!(set.add("three").is_err());
//! assert_eq!(set.values(), vec![Value::from(3), Value::from(1)]);
//! # Ok::<(), cqlvalue_core::Error>(())
//! ```

#![allow(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod collections;
pub mod config;
pub mod error;
pub mod numeric;
pub mod ops;
pub mod scalar;
pub mod types;
pub mod value;
pub mod wire;

// Re-export main types for convenience
pub use crate::{
    collections::{List, Map, Set},
    config::{Config, DisplayConfig, ProtocolVersion, WireConfig},
    error::{Error, ErrorCategory, Result},
    numeric::{Decimal, Numeric, Varint},
    scalar::{
        Bigint, Blob, Double, Float, Inet, Int, ScalarValue, Timestamp, Timeuuid, Uuid,
    },
    types::{ScalarKind, TypeTag},
    value::Value,
    wire::{CollectionBuilder, CollectionKind, WireCollectionBuilder},
};
