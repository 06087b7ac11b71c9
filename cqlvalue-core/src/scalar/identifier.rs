//! `uuid` and `timeuuid` identifiers

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A CQL `uuid`: any 128-bit identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uuid(uuid::Uuid);

impl Uuid {
    pub fn new(value: uuid::Uuid) -> Self {
        Self(value)
    }

    /// A random (version 4) identifier
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Uuid::from_bytes(bytes))
    }

    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// Most and least significant 64-bit halves
    pub fn halves(&self) -> (u64, u64) {
        self.0.as_u64_pair()
    }

    pub fn version(&self) -> usize {
        self.0.get_version_num()
    }
}

impl FromStr for Uuid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s).map(Self)
    }
}

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl From<uuid::Uuid> for Uuid {
    fn from(value: uuid::Uuid) -> Self {
        Self(value)
    }
}

/// A CQL `timeuuid`: a version 1 identifier carrying a timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timeuuid(uuid::Uuid);

impl Timeuuid {
    /// Only version 1 identifiers are accepted
    pub fn new(value: uuid::Uuid) -> Result<Self> {
        match value.get_version_num() {
            1 => Ok(Self(value)),
            version => Err(Error::expecting(
                "a version 1 uuid",
                format!("version {} uuid {}", version, value),
            )),
        }
    }

    /// A time-based identifier for the current instant with a random node id
    pub fn now() -> Self {
        let random = uuid::Uuid::new_v4();
        let mut node = [0u8; 6];
        node.copy_from_slice(&random.as_bytes()[..6]);
        Self(uuid::Uuid::now_v1(&node))
    }

    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    pub fn halves(&self) -> (u64, u64) {
        self.0.as_u64_pair()
    }

    pub fn version(&self) -> usize {
        self.0.get_version_num()
    }

    /// Milliseconds since the Unix epoch encoded in the identifier
    pub fn timestamp_millis(&self) -> i64 {
        self.0
            .get_timestamp()
            .map(|ts| {
                let (seconds, nanos) = ts.to_unix();
                seconds as i64 * 1000 + i64::from(nanos / 1_000_000)
            })
            .unwrap_or_default()
    }
}

impl FromStr for Timeuuid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s).and_then(Self::new)
    }
}

impl fmt::Display for Timeuuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

fn parse(text: &str) -> Result<uuid::Uuid> {
    uuid::Uuid::parse_str(text)
        .map_err(|e| Error::invalid_argument(format!("invalid uuid {:?}: {}", text, e)))
}
