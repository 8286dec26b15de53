//! Validated identifier newtypes.
//!
//! Wallet ids, addresses, transaction hashes, policy ids and account
//! indexes are all constrained strings or integers on the wire; wrapping
//! them keeps one kind from being passed where another is expected.

use std::fmt;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::json;
use crate::validate;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident, $rule:path, $expected:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Validates and wraps a raw string.
            pub fn new(value: impl Into<String>) -> Result<Self> {
                let value = value.into();
                if $rule(&value) {
                    Ok(Self(value))
                } else {
                    Err(Error::invalid_argument(stringify!($name), $expected))
                }
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub(crate) fn from_json(path: &str, value: &Value) -> Result<Self> {
                let raw = value
                    .as_str()
                    .ok_or_else(|| Error::invalid_field(path, "string", json::type_name(value)))?;
                if $rule(raw) {
                    Ok(Self(raw.to_string()))
                } else {
                    Err(Error::invalid_field(path, $expected, format!("\"{}\"", raw)))
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Server-assigned wallet identifier (alphanumeric, 8-128 chars).
    WalletId,
    validate::wallet_identifier,
    "alphanumeric string of 8-128 characters"
);

string_id!(
    /// A payment address (alphanumeric, 8-256 chars, checksum not verified).
    Address,
    validate::address,
    "alphanumeric string of 8-256 characters"
);

string_id!(
    /// A 32-byte hash rendered as 64 hex characters.
    Hash64,
    validate::hash64,
    "64 hex characters"
);

string_id!(
    /// Native-asset minting policy id (56 hex characters).
    PolicyId,
    validate::policy_id,
    "56 hex characters"
);

/// A hardened account derivation index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountIndex(u32);

impl AccountIndex {
    /// Validates and wraps a raw index.
    pub fn new(index: u32) -> Result<Self> {
        if validate::account_index(index) {
            Ok(Self(index))
        } else {
            Err(Error::invalid_argument(
                "AccountIndex",
                "index outside the hardened derivation range",
            ))
        }
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub(crate) fn from_json(path: &str, value: &Value) -> Result<Self> {
        let raw = value
            .as_i64()
            .ok_or_else(|| Error::invalid_field(path, "integer", json::type_name(value)))?;
        let index = u32::try_from(raw)
            .ok()
            .filter(|i| validate::account_index(*i))
            .ok_or_else(|| {
                Error::invalid_field(path, "hardened account index", raw.to_string())
            })?;
        Ok(Self(index))
    }
}

impl fmt::Display for AccountIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
