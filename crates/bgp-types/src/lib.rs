//! Value types exchanged between the route announcer and BGP peer sessions.
//!
//! - [`IpPrefix`]: IPv4/IPv6 network prefixes in CIDR notation
//! - [`Advertisement`]: a single prefix announced to a peer

mod advertisement;
mod prefix;

pub use advertisement::Advertisement;
pub use prefix::IpPrefix;

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid IP address format: {0}")]
    InvalidIpAddress(String),

    #[error("invalid IP prefix format: {0}")]
    InvalidIpPrefix(String),
}
