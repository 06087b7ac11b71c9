//! CQL `inet`: an IPv4 or IPv6 address

use crate::error::{Error, Result};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Inet(IpAddr);

impl Inet {
    pub fn new(address: IpAddr) -> Self {
        Self(address)
    }

    /// Decode 4 (IPv4) or 16 (IPv6) raw address bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if let Ok(v4) = <[u8; 4]>::try_from(bytes) {
            return Ok(Self(IpAddr::V4(Ipv4Addr::from(v4))));
        }
        if let Ok(v6) = <[u8; 16]>::try_from(bytes) {
            return Ok(Self(IpAddr::V6(Ipv6Addr::from(v6))));
        }
        Err(Error::expecting("4 or 16 address bytes", bytes.len()))
    }

    pub fn address(&self) -> IpAddr {
        self.0
    }

    /// Raw address bytes: 4 for IPv4, 16 for IPv6
    pub fn octets(&self) -> Vec<u8> {
        match self.0 {
            IpAddr::V4(v4) => v4.octets().to_vec(),
            IpAddr::V6(v6) => v6.octets().to_vec(),
        }
    }
}

impl FromStr for Inet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<IpAddr>()
            .map(Self)
            .map_err(|_| Error::expecting("an IP address", format!("{:?}", s)))
    }
}

impl fmt::Display for Inet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<IpAddr> for Inet {
    fn from(address: IpAddr) -> Self {
        Self(address)
    }
}
