//! Byte-buffer scalars: `blob` and ASCII validation for `ascii`

use crate::error::{Error, Result};
use bytes::Bytes;
use std::fmt;
use std::str::FromStr;

/// A CQL `blob`
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Blob(Bytes);

impl Blob {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    /// Parse hex text, with or without a `0x` prefix
    pub fn from_hex(text: &str) -> Result<Self> {
        let digits = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(text);
        hex::decode(digits)
            .map(Self::new)
            .map_err(|e| Error::invalid_argument(format!("invalid blob hex {:?}: {}", text, e)))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn bytes(&self) -> Bytes {
        self.0.clone()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for Blob {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl From<Vec<u8>> for Blob {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for Blob {
    fn from(bytes: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(bytes))
    }
}

/// Reject text that is not 7-bit ASCII
pub(crate) fn check_ascii(text: &str) -> Result<()> {
    match text.bytes().position(|b| !b.is_ascii()) {
        None => Ok(()),
        Some(offset) => Err(Error::invalid_argument(format!(
            "ascii value contains a non-ASCII byte at offset {}",
            offset
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let blob = Blob::from_hex("0xcafe00").unwrap();
        assert_eq!(blob.as_bytes(), &[0xCA, 0xFE, 0x00]);
        assert_eq!(blob.to_string(), "0xcafe00");
        assert_eq!(Blob::from_hex("CAFE00").unwrap(), blob);
        assert_eq!(Blob::new(Vec::new()).to_string(), "0x");
    }

    #[test]
    fn test_invalid_hex() {
        assert!(matches!(Blob::from_hex("0xabc"), Err(Error::InvalidArgument(_))));
        assert!(matches!("zz".parse::<Blob>(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_ascii_check() {
        assert!(check_ascii("plain text ~").is_ok());
        assert!(matches!(check_ascii("caf\u{e9}"), Err(Error::InvalidArgument(_))));
    }
}
