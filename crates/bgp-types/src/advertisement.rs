//! A single route advertisement.

use crate::{IpPrefix, ParseError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One route prefix advertised to a BGP peer as reachable via this node.
///
/// Advertisements are plain values: a batch is built per announcement and
/// dropped once every peer session has been updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Advertisement {
    prefix: IpPrefix,
}

impl Advertisement {
    pub const fn new(prefix: IpPrefix) -> Self {
        Self { prefix }
    }

    /// Returns the advertised prefix.
    pub const fn prefix(&self) -> &IpPrefix {
        &self.prefix
    }
}

impl From<IpPrefix> for Advertisement {
    fn from(prefix: IpPrefix) -> Self {
        Self::new(prefix)
    }
}

impl FromStr for Advertisement {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<IpPrefix>().map(Self::new)
    }
}

impl fmt::Display for Advertisement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.prefix.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_prefix() {
        let prefix: IpPrefix = "10.244.0.0/24".parse().unwrap();
        let advert = Advertisement::from(prefix);
        assert_eq!(advert.prefix(), &prefix);
        assert_eq!(advert.to_string(), "10.244.0.0/24");
    }

    #[test]
    fn test_parse() {
        let advert: Advertisement = "fd00:10:244::/64".parse().unwrap();
        assert!(advert.prefix().is_ipv6());
        assert!("not-a-prefix".parse::<Advertisement>().is_err());
    }

    #[test]
    fn test_structural_equality() {
        let a: Advertisement = "10.0.0.0/24".parse().unwrap();
        let b: Advertisement = "10.0.0.9/24".parse().unwrap();
        assert_eq!(a, b);
    }
}
