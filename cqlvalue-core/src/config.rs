//! Configuration management for CQLValue

use serde::{Deserialize, Serialize};

/// Largest number of fixed decimals accepted for float formatting
pub const MAX_FLOAT_PRECISION: usize = 40;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Text rendering of values
    pub display: DisplayConfig,

    /// Collection wire encoding
    pub wire: WireConfig,
}

/// Text rendering configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Fixed decimals used when formatting float and double values (default: 14)
    pub float_precision: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { float_precision: 14 }
    }
}

/// Wire encoding configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireConfig {
    /// Native protocol version that decides collection framing
    pub protocol_version: ProtocolVersion,
}

/// Native protocol version
///
/// Version 2 frames collection sizes and element lengths as unsigned 16-bit
/// integers; version 3 and later use signed 32-bit integers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProtocolVersion {
    V2,
    V3,
    #[default]
    V4,
    V5,
}

impl ProtocolVersion {
    /// Width in bytes of a collection count or element length
    pub fn length_width(self) -> usize {
        match self {
            ProtocolVersion::V2 => 2,
            _ => 4,
        }
    }

    /// Largest count or element length the framing can express
    pub fn max_length(self) -> usize {
        match self {
            ProtocolVersion::V2 => u16::MAX as usize,
            _ => i32::MAX as usize,
        }
    }
}

impl Config {
    /// Configuration for peers that only speak protocol version 2
    pub fn legacy_protocol() -> Self {
        Self {
            wire: WireConfig {
                protocol_version: ProtocolVersion::V2,
            },
            ..Self::default()
        }
    }

    /// Validate configuration settings
    pub fn validate(&self) -> crate::Result<()> {
        if self.display.float_precision > MAX_FLOAT_PRECISION {
            return Err(crate::Error::configuration(format!(
                "float_precision must be at most {}",
                MAX_FLOAT_PRECISION
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.display.float_precision, 14);
        assert_eq!(config.wire.protocol_version, ProtocolVersion::V4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_legacy_protocol_config() {
        let config = Config::legacy_protocol();
        assert_eq!(config.wire.protocol_version.length_width(), 2);
        assert_eq!(config.wire.protocol_version.max_length(), 65_535);
        assert_eq!(config.display, DisplayConfig::default());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.display.float_precision = MAX_FLOAT_PRECISION + 1;
        assert!(matches!(
            config.validate(),
            Err(crate::Error::Configuration(_))
        ));
    }

    #[test]
    fn test_config_serde() {
        let config = Config::legacy_protocol();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
