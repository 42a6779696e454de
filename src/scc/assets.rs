//! Logical assets and wrap-group equivalence.
//!
//! Two mints are the same *logical asset* if they belong to the same
//! wrap-group: native-SOL and wrapped-SOL form one group; every other mint
//! is its own singleton group. All delta collection, role assignment, and
//! validation operate on wrap-group keys, never raw mint strings.

use crate::scc::ids::Mint;
use std::fmt;

/// A deduplicated logical token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub mint: Mint,
    pub decimals: u8,
    pub symbol: Option<String>,
}

impl Asset {
    pub fn new(mint: Mint, decimals: u8, symbol: Option<String>) -> Self {
        Self {
            mint,
            decimals,
            symbol,
        }
    }

    /// Whether this asset belongs to the native wrap-group (native-SOL or
    /// wrapped-SOL).
    pub fn is_native_wrap_group(&self) -> bool {
        wrap_group_key(&self.mint) == WRAP_GROUP_NATIVE
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.symbol {
            Some(s) => write!(f, "{}", s),
            None => write!(f, "{}", self.mint),
        }
    }
}

/// The canonical key used to group wrap-equivalent mints. Every non-SOL
/// mint is its own group, keyed by its own address.
pub const WRAP_GROUP_NATIVE: &str = "wrap-group:native-sol";

/// Resolve a mint to its wrap-group key. Native-SOL and wrapped-SOL both
/// resolve to `WRAP_GROUP_NATIVE`; every other mint resolves to itself.
pub fn wrap_group_key(mint: &Mint) -> String {
    if mint.is_native_sol() || mint.is_wrapped_sol() {
        WRAP_GROUP_NATIVE.to_string()
    } else {
        mint.as_str().to_string()
    }
}

/// Whether a mint belongs to the native wrap-group.
pub fn is_native_wrap_group_mint(mint: &Mint) -> bool {
    wrap_group_key(mint) == WRAP_GROUP_NATIVE
}
