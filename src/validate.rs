//! Stateless validation rules shared by request builders and response models.
//!
//! Each predicate encodes exactly one external-API contract, so the read
//! path and the write path accept exactly the same values.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{MAX_ACCOUNT_INDEX, MIN_ACCOUNT_INDEX, SCALE};

static WALLET_NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w\s.\-]{3,32}$").unwrap());
static ACCOUNT_NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w\s.:\-]{1,32}$").unwrap());
static HASH64_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?i)[a-f0-9]{64}$").unwrap());
static POLICY_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?i)[a-f0-9]{56}$").unwrap());
static HEX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?i)(?:[a-f0-9]{2})+$").unwrap());
static BASE16_PASSWORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-f0-9]{16,64}$").unwrap());
static ADA_AMOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^\d+(?:\.\d{{1,{}}})?$", SCALE)).unwrap());

/// Wallet identifier: alphanumeric, 8-128 characters.
pub fn wallet_identifier(id: &str) -> bool {
    (8..=128).contains(&id.len()) && id.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Address: alphanumeric, 8-256 characters.
///
/// Deliberately permissive; no bech32/Base58 checksum verification is done.
pub fn address(addr: &str) -> bool {
    (8..=256).contains(&addr.len()) && addr.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Wallet name: word characters, whitespace, `.` and `-`, 3-32 characters.
pub fn wallet_name(name: &str) -> bool {
    WALLET_NAME_RE.is_match(name)
}

/// Account name: wallet-name character set plus `:`, 1-32 characters.
pub fn account_name(name: &str) -> bool {
    ACCOUNT_NAME_RE.is_match(name)
}

/// 64 hex characters, case-insensitive (transaction ids, hashed passwords).
pub fn hash64(hash: &str) -> bool {
    HASH64_RE.is_match(hash)
}

/// Native-asset minting policy id: 56 hex characters, case-insensitive.
pub fn policy_id(id: &str) -> bool {
    POLICY_ID_RE.is_match(id)
}

/// Non-empty, even-length hex string (hex-encoded asset names).
pub fn asset_name_hex(name: &str) -> bool {
    HEX_RE.is_match(name)
}

/// v1 spending password wire form: 16-64 lowercase hexits.
pub fn base16_password(password: &str) -> bool {
    BASE16_PASSWORD_RE.is_match(password)
}

/// Account index within the hardened derivation range.
pub fn account_index(index: u32) -> bool {
    (MIN_ACCOUNT_INDEX..=MAX_ACCOUNT_INDEX).contains(&index)
}

/// Decimal ADA amount: `digits[.digits]`, at most [`SCALE`] fractional
/// digits, no sign.
pub fn ada_amount(amount: &str) -> bool {
    ADA_AMOUNT_RE.is_match(amount)
}

/// v1 address ownership marker.
pub fn address_ownership(value: &str) -> bool {
    matches!(value, "isOurs" | "ambiguousOwnership")
}

/// v1 wallet sync-state tag.
pub fn sync_state_tag(tag: &str) -> bool {
    matches!(tag, "restoring" | "synced")
}

/// v1 transaction status tag (compared lowercased).
pub fn tx_status_tag(tag: &str) -> bool {
    matches!(
        tag,
        "applying" | "innewestblocks" | "persisted" | "wontapply" | "creating"
    )
}

/// v2 transaction status.
pub fn tx_status_v2(status: &str) -> bool {
    matches!(status, "pending" | "in_ledger" | "expired")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_identifier() {
        assert!(wallet_identifier("Ae2tdPwUPEZ8uEsGhfB6"));
        assert!(wallet_identifier("abcdefgh"));
        assert!(!wallet_identifier("short"));
        assert!(!wallet_identifier("has-dashes-in-it"));
        assert!(!wallet_identifier("under_scored_id1"));
        assert!(!wallet_identifier(&"a".repeat(129)));
    }

    #[test]
    fn test_address() {
        assert!(address("abcdefgh"));
        assert!(address(&"A".repeat(256)));
        assert!(!address("short"));
        assert!(!address("bad!chars"));
        assert!(!address(&"A".repeat(257)));
    }

    #[test]
    fn test_wallet_name() {
        assert!(wallet_name("My ADA Wallet"));
        assert!(wallet_name("primary-wallet.2"));
        assert!(!wallet_name("ab"));
        assert!(!wallet_name("bad:colon"));
        assert!(!wallet_name(&"x".repeat(33)));
    }

    #[test]
    fn test_account_name() {
        assert!(account_name("a"));
        assert!(account_name("savings:main"));
        assert!(!account_name(""));
        assert!(!account_name(&"x".repeat(33)));
    }

    #[test]
    fn test_hash64() {
        assert!(hash64(&"a1".repeat(32)));
        assert!(hash64(&"A1".repeat(32)));
        assert!(!hash64(&"a1".repeat(31)));
        assert!(!hash64(&"g1".repeat(32)));
    }

    #[test]
    fn test_policy_id() {
        assert!(policy_id(&"ab".repeat(28)));
        assert!(!policy_id(&"ab".repeat(27)));
        assert!(!policy_id(&"zz".repeat(28)));
    }

    #[test]
    fn test_asset_name_hex() {
        assert!(asset_name_hex("7453554e444145"));
        assert!(!asset_name_hex(""));
        assert!(!asset_name_hex("abc"));
        assert!(!asset_name_hex("token"));
    }

    #[test]
    fn test_base16_password() {
        assert!(base16_password(&"ab".repeat(8)));
        assert!(base16_password(&"ab".repeat(32)));
        assert!(!base16_password(&"ab".repeat(7)));
        assert!(!base16_password(&"AB".repeat(8)));
    }

    #[test]
    fn test_account_index() {
        assert!(account_index(2_147_483_648));
        assert!(account_index(4_294_967_295));
        assert!(!account_index(0));
        assert!(!account_index(2_147_483_647));
    }

    #[test]
    fn test_ada_amount() {
        assert!(ada_amount("1"));
        assert!(ada_amount("1.5"));
        assert!(ada_amount("0.000001"));
        assert!(ada_amount("45000000000.000000"));
        assert!(!ada_amount("1.1234567"));
        assert!(!ada_amount("-1.5"));
        assert!(!ada_amount("1."));
        assert!(!ada_amount(".5"));
        assert!(!ada_amount(""));
    }

    #[test]
    fn test_enumerations() {
        assert!(address_ownership("isOurs"));
        assert!(address_ownership("ambiguousOwnership"));
        assert!(!address_ownership("ours"));
        assert!(sync_state_tag("restoring"));
        assert!(!sync_state_tag("syncing"));
        assert!(tx_status_tag("innewestblocks"));
        assert!(!tx_status_tag("inNewestBlocks"));
        assert!(tx_status_v2("in_ledger"));
        assert!(!tx_status_v2("persisted"));
    }
}
