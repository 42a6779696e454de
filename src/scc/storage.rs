//! Storage mapper (component 4.8).
//!
//! Projects a `ParsedSwap` into the flat, persistence-ready shape the
//! `scc::persistence` collaborator writes to disk. A split pair maps to
//! two `StorageRecord`s sharing a signature but distinguished by
//! `classification_source`.

use crate::scc::amounts::{Amounts, FeeBreakdown};
use crate::scc::assets::Asset;
use crate::scc::config::Confidence;
use crate::scc::ids::{Account, Mint, Signature};
use crate::scc::parsed::{Parsed, ParsedSwap};
use crate::scc::raw_tx::ProtocolTag;
use crate::scc::roles::Direction;
use rust_decimal::Decimal;

/// `{mint, amount, symbol?}` — what moved on one side of the swapper's
/// wallet, from the swapper's own perspective (what went out / what came
/// in), as opposed to `Asset` which names a logical token with no amount
/// attached.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenFlow {
    pub mint: Mint,
    pub decimals: u8,
    pub symbol: Option<String>,
    pub amount: Decimal,
}

impl TokenFlow {
    fn new(asset: &Asset, amount: Decimal) -> Self {
        Self {
            mint: asset.mint.clone(),
            decimals: asset.decimals,
            symbol: asset.symbol.clone(),
            amount,
        }
    }

    pub fn is_native_wrap_group(&self) -> bool {
        crate::scc::assets::is_native_wrap_group_mint(&self.mint)
    }
}

/// Where a record's classification came from — distinguishes a directly
/// classified swap from either leg of a synthesized split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationSource {
    V2ParserSingle,
    V2ParserSplitSell,
    V2ParserSplitBuy,
}

impl ClassificationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationSource::V2ParserSingle => "v2_parser_single",
            ClassificationSource::V2ParserSplitSell => "v2_parser_split_sell",
            ClassificationSource::V2ParserSplitBuy => "v2_parser_split_buy",
        }
    }
}

/// `sell_amount`/`buy_amount` expressed in each leg's own base units.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmountRecord {
    pub sell_amount: Option<Decimal>,
    pub buy_amount: Option<Decimal>,
}

/// `sell_sol_amount`/`buy_sol_amount` — populated only when the quote
/// side of the leg is the native wrap-group.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolAmountRecord {
    pub sell_sol_amount: Option<Decimal>,
    pub buy_sol_amount: Option<Decimal>,
}

/// The flat, persistence-ready shape of a single classified leg.
#[derive(Debug, Clone)]
pub struct StorageRecord {
    pub signature: Signature,
    pub swapper: Account,
    pub timestamp_ms: i64,
    pub r#type: Direction,
    pub classification_source: ClassificationSource,
    pub token_in: TokenFlow,
    pub token_out: TokenFlow,
    pub amount: AmountRecord,
    pub sol_amount: SolAmountRecord,
    pub confidence: Confidence,
    pub protocol: Option<ProtocolTag>,
    pub fee_breakdown: FeeBreakdown,
}

fn map_leg(swap: &ParsedSwap, source: ClassificationSource) -> StorageRecord {
    let quote_is_native = swap.quote.is_native_wrap_group();

    // token_in/token_out carry wallet-level amounts — what the swapper
    // actually paid or received, not the swap-level venue-boundary
    // figures — mirroring `total_wallet_cost`/`net_wallet_received` on
    // the quote side and `base_amount` on the base side.
    let (token_in, token_out) = match swap.direction {
        Direction::Buy => {
            let quote_amount = swap
                .amounts
                .total_wallet_cost
                .unwrap_or(swap.amounts.base_amount);
            (
                TokenFlow::new(&swap.quote, quote_amount),
                TokenFlow::new(&swap.base, swap.amounts.base_amount),
            )
        }
        Direction::Sell => {
            let quote_amount = swap
                .amounts
                .net_wallet_received
                .unwrap_or(swap.amounts.base_amount);
            (
                TokenFlow::new(&swap.base, swap.amounts.base_amount),
                TokenFlow::new(&swap.quote, quote_amount),
            )
        }
    };

    let amount = match swap.direction {
        Direction::Buy => AmountRecord {
            sell_amount: None,
            buy_amount: Some(swap.amounts.base_amount),
        },
        Direction::Sell => AmountRecord {
            sell_amount: Some(swap.amounts.base_amount),
            buy_amount: None,
        },
    };

    // `sell_sol_amount` carries `swap_output_amount` on a sell leg;
    // `buy_sol_amount` carries `swap_input_amount` on a buy leg — the SOL
    // side is always the amount that moved *through* the quote leg, not
    // the wallet-level total paid/received carried in token_in/token_out.
    let sol_amount = if quote_is_native {
        match swap.direction {
            Direction::Buy => SolAmountRecord {
                sell_sol_amount: None,
                buy_sol_amount: swap.amounts.swap_input_amount,
            },
            Direction::Sell => SolAmountRecord {
                sell_sol_amount: swap.amounts.swap_output_amount,
                buy_sol_amount: None,
            },
        }
    } else {
        SolAmountRecord::default()
    };

    StorageRecord {
        signature: swap.signature.clone(),
        swapper: swap.swapper.clone(),
        timestamp_ms: swap.timestamp_ms,
        r#type: swap.direction,
        classification_source: source,
        token_in,
        token_out,
        amount,
        sol_amount,
        confidence: swap.confidence,
        protocol: swap.protocol.clone(),
        fee_breakdown: swap.amounts.fee_breakdown.clone(),
    }
}

/// Project a pipeline result into one or two storage records.
pub fn to_storage_records(parsed: &Parsed) -> Vec<StorageRecord> {
    match parsed {
        Parsed::Single(swap) => vec![map_leg(swap, ClassificationSource::V2ParserSingle)],
        Parsed::Split(pair) => vec![
            map_leg(&pair.sell, ClassificationSource::V2ParserSplitSell),
            map_leg(&pair.buy, ClassificationSource::V2ParserSplitBuy),
        ],
    }
}
