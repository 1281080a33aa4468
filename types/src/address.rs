//! Participant address type with `0x` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A participant (delegator) address, always prefixed with `0x`.
///
/// The pool treats addresses as opaque identities — derivation from a public
/// key happens in the wallet layer, outside this workspace.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    /// The standard prefix for all addresses.
    pub const PREFIX: &'static str = "0x";

    /// Create a new address from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `0x`.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "address must start with 0x");
        Self(s)
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this address is well-formed.
    pub fn is_valid(&self) -> bool {
        self.0.starts_with(Self::PREFIX)
            && self.0.len() > Self::PREFIX.len()
            && self.0[Self::PREFIX.len()..]
                .chars()
                .all(|c| c.is_ascii_hexdigit())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Address {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_hex_address() {
        let a = Address::new("0xdeadbeef01");
        assert!(a.is_valid());
        assert_eq!(a.as_str(), "0xdeadbeef01");
    }

    #[test]
    fn non_hex_suffix_is_invalid() {
        let a = Address::new("0xnothex");
        assert!(!a.is_valid());
    }

    #[test]
    #[should_panic]
    fn missing_prefix_panics() {
        Address::new("deadbeef");
    }
}
