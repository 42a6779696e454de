//! The pipeline's output types.

use crate::scc::amounts::Amounts;
use crate::scc::assets::Asset;
use crate::scc::config::Confidence;
use crate::scc::ids::{Account, Mint, Signature};
use crate::scc::raw_tx::ProtocolTag;
use crate::scc::roles::Direction;
use crate::scc::swapper::SwapperIdMethod;

/// A single classified swap leg.
#[derive(Debug, Clone)]
pub struct ParsedSwap {
    pub signature: Signature,
    pub swapper: Account,
    pub timestamp_ms: i64,
    pub direction: Direction,
    pub base: Asset,
    pub quote: Asset,
    pub amounts: Amounts,
    pub protocol: Option<ProtocolTag>,
    pub swapper_id_method: SwapperIdMethod,
    pub confidence: Confidence,
    /// Mints touched by the transaction's actions that netted to zero for
    /// the swapper — pass-through intermediates in a multi-hop route.
    pub intermediate_assets_collapsed: Vec<Mint>,
}

/// A synthesized pair of legs for a swap routed through two non-core
/// assets via a core pivot: a SELL of the first non-core asset into the
/// pivot, and a BUY of the second non-core asset from the pivot.
#[derive(Debug, Clone)]
pub struct SplitSwapPair {
    pub sell: ParsedSwap,
    pub buy: ParsedSwap,
}

/// The result of successfully classifying a transaction.
#[derive(Debug, Clone)]
pub enum Parsed {
    Single(ParsedSwap),
    Split(SplitSwapPair),
}
