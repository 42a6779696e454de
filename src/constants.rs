/// Global constants used across the Swap Classification Core
///
/// This module contains system-wide constants that are not configurable
/// and are used across multiple modules. Anything an operator might
/// reasonably want to change (core-token lists, deny-lists, rent epsilon)
/// lives in `scc::config` instead, built once at construction and injected
/// into the parser rather than read from a global at call time.

// ============================================================================
// SOLANA BLOCKCHAIN CONSTANTS
// ============================================================================

/// Wrapped-SOL mint address.
pub const WRAPPED_SOL_MINT: &str = "So11111111111111111111111111111111111111112";

/// Sentinel mint key native-SOL balance changes arrive under, before being
/// folded into the same wrap-group as wrapped SOL.
pub const NATIVE_SOL_MINT: &str = "native:SOL";

/// Decimals for native SOL (lamports).
pub const NATIVE_SOL_DECIMALS: u8 = 9;
