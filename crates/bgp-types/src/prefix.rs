//! CIDR prefix type with network-address normalization.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// An IP network prefix in CIDR notation (e.g. `10.0.0.0/24` or `2001:db8::/32`).
///
/// The stored address is always the network address: bits past the prefix
/// length are cleared on construction.
///
/// # Examples
///
/// ```
/// use bgp_types::IpPrefix;
///
/// let prefix: IpPrefix = "10.0.0.7/24".parse().unwrap();
/// assert_eq!(prefix.to_string(), "10.0.0.0/24");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IpPrefix {
    address: IpAddr,
    prefix_len: u8,
}

impl IpPrefix {
    /// Creates a prefix, masking `address` down to its network address.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix length is invalid for the address family
    /// (>32 for IPv4, >128 for IPv6).
    pub fn new(address: IpAddr, prefix_len: u8) -> Result<Self, ParseError> {
        let max_len = max_len(&address);
        if prefix_len > max_len {
            return Err(ParseError::InvalidIpPrefix(format!(
                "prefix length {} exceeds maximum {} for address family",
                prefix_len, max_len
            )));
        }

        Ok(IpPrefix {
            address: mask(address, prefix_len),
            prefix_len,
        })
    }

    /// Returns the network address of this prefix.
    pub const fn address(&self) -> IpAddr {
        self.address
    }

    /// Returns the prefix length in bits.
    pub const fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    pub const fn is_ipv4(&self) -> bool {
        self.address.is_ipv4()
    }

    pub const fn is_ipv6(&self) -> bool {
        self.address.is_ipv6()
    }

    /// Returns true if this is a host route (/32 for IPv4, /128 for IPv6).
    pub fn is_host_route(&self) -> bool {
        self.prefix_len == max_len(&self.address)
    }

    /// Returns true if this is the default route (0.0.0.0/0 or ::/0).
    pub fn is_default(&self) -> bool {
        self.prefix_len == 0
    }

    /// Returns true if `addr` falls inside this prefix. Addresses of the
    /// other family are never contained.
    pub fn contains(&self, addr: IpAddr) -> bool {
        if addr.is_ipv4() != self.address.is_ipv4() {
            return false;
        }
        mask(addr, self.prefix_len) == self.address
    }
}

fn max_len(address: &IpAddr) -> u8 {
    match address {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}

fn mask(address: IpAddr, prefix_len: u8) -> IpAddr {
    match address {
        IpAddr::V4(v4) => {
            let bits = u32::from(v4);
            let netmask = u32::MAX.checked_shl(32 - u32::from(prefix_len)).unwrap_or(0);
            IpAddr::V4(Ipv4Addr::from(bits & netmask))
        }
        IpAddr::V6(v6) => {
            let bits = u128::from(v6);
            let netmask = u128::MAX.checked_shl(128 - u32::from(prefix_len)).unwrap_or(0);
            IpAddr::V6(Ipv6Addr::from(bits & netmask))
        }
    }
}

impl fmt::Display for IpPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_len)
    }
}

impl FromStr for IpPrefix {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr_str, len_str) = s
            .rsplit_once('/')
            .ok_or_else(|| ParseError::InvalidIpPrefix(s.to_string()))?;

        let address: IpAddr = addr_str
            .parse()
            .map_err(|_| ParseError::InvalidIpAddress(addr_str.to_string()))?;

        // u8::from_str accepts a leading '+'; CIDR lengths are plain digits.
        if len_str.is_empty() || !len_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidIpPrefix(s.to_string()));
        }
        let prefix_len: u8 = len_str
            .parse()
            .map_err(|_| ParseError::InvalidIpPrefix(s.to_string()))?;

        IpPrefix::new(address, prefix_len)
    }
}

impl TryFrom<String> for IpPrefix {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<IpPrefix> for String {
    fn from(prefix: IpPrefix) -> Self {
        prefix.to_string()
    }
}
