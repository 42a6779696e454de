//! Amount reconstructor (component 4.6).
//!
//! Computes swap-level and wallet-level amounts, fee attribution, and
//! identifies intermediates touched by the transaction's actions that the
//! swapper's own wrap-group delta nets to zero on (used both to populate
//! `intermediate_assets_collapsed` and, when one such intermediate is a
//! core asset with non-zero venue flow, to drive the split-swap
//! synthesizer in `scc::split`).

use crate::scc::assets::wrap_group_key;
use crate::scc::deltas::AssetDeltaSet;
use crate::scc::ids::{Account, Mint};
use crate::scc::raw_tx::Action;
use crate::scc::roles::Direction;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Normalize a raw integer amount by its decimals into an arbitrary
/// precision decimal. Used everywhere a raw on-chain amount needs to
/// become a human-scale quantity.
pub fn normalize_raw(raw: i128, decimals: u8) -> Decimal {
    let mut d = Decimal::from_i128_with_scale(raw.unsigned_abs() as i128, decimals as u32);
    if raw < 0 {
        d.set_sign_negative(true);
    }
    d
}

/// `{tx_fee_native, tx_fee_quote, platform_fee, priority_fee,
/// total_fee_quote}`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeBreakdown {
    pub tx_fee_native: Decimal,
    pub tx_fee_quote: Decimal,
    pub platform_fee: Decimal,
    pub priority_fee: Decimal,
    pub total_fee_quote: Decimal,
}

/// The swap-level and wallet-level amounts for a classified swap.
#[derive(Debug, Clone, PartialEq)]
pub struct Amounts {
    pub base_amount: Decimal,
    pub swap_input_amount: Option<Decimal>,
    pub swap_output_amount: Option<Decimal>,
    pub total_wallet_cost: Option<Decimal>,
    pub net_wallet_received: Option<Decimal>,
    pub fee_breakdown: FeeBreakdown,
}

/// Venue-boundary amounts read from the first/last `Swap` action legs, when
/// the action list describes one.
struct SwapBoundary {
    quote_in: Option<Decimal>,
    quote_out: Option<Decimal>,
    base_in: Option<Decimal>,
    base_out: Option<Decimal>,
}

fn find_swap_boundary(actions: &[Action], base_mint: &Mint, quote_mint: &Mint) -> SwapBoundary {
    let mut boundary = SwapBoundary {
        quote_in: None,
        quote_out: None,
        base_in: None,
        base_out: None,
    };

    for action in actions {
        if let Action::Swap {
            token_in, token_out, ..
        } = action
        {
            if &token_in.mint == quote_mint {
                boundary.quote_in = Some(token_in.normalized());
            }
            if &token_in.mint == base_mint {
                boundary.base_in = Some(token_in.normalized());
            }
            if &token_out.mint == quote_mint {
                boundary.quote_out = Some(token_out.normalized());
            }
            if &token_out.mint == base_mint {
                boundary.base_out = Some(token_out.normalized());
            }
        }
    }

    boundary
}

/// Reconstruct swap- and wallet-level amounts for a direct (non-split)
/// swap.
pub fn reconstruct_amounts(
    direction: Direction,
    swapper: &Account,
    base_mint: &Mint,
    quote_mint: &Mint,
    quote_is_native_wrap_group: bool,
    deltas: &AssetDeltaSet,
    actions: &[Action],
    fee_native_lamports: u64,
) -> Amounts {
    let base_key = wrap_group_key(base_mint);
    let quote_key = wrap_group_key(quote_mint);

    let base_wallet_delta = deltas.wrap_group_delta(swapper, &base_key);
    let quote_wallet_delta = deltas.wrap_group_delta(swapper, &quote_key);

    let base_amount = base_wallet_delta.abs();
    let boundary = find_swap_boundary(actions, base_mint, quote_mint);

    let tx_fee_native = normalize_raw(fee_native_lamports as i128, crate::constants::NATIVE_SOL_DECIMALS);
    let tx_fee_quote = if quote_is_native_wrap_group {
        tx_fee_native
    } else {
        Decimal::ZERO
    };

    match direction {
        Direction::Buy => {
            let swap_input_amount = boundary.quote_in.unwrap_or_else(|| quote_wallet_delta.abs());
            let swap_output_amount = boundary.base_out;
            let total_wallet_cost = quote_wallet_delta.abs();

            let residual_fee = (total_wallet_cost - swap_input_amount).max(Decimal::ZERO);
            let fee_breakdown = FeeBreakdown {
                tx_fee_native,
                tx_fee_quote,
                platform_fee: residual_fee,
                priority_fee: Decimal::ZERO,
                total_fee_quote: residual_fee,
            };

            Amounts {
                base_amount,
                swap_input_amount: Some(swap_input_amount),
                swap_output_amount,
                total_wallet_cost: Some(total_wallet_cost),
                net_wallet_received: None,
                fee_breakdown,
            }
        }
        Direction::Sell => {
            let swap_input_amount = boundary.base_in.unwrap_or(base_amount);
            let swap_output_amount = boundary.quote_out.unwrap_or_else(|| quote_wallet_delta.abs());
            let net_wallet_received = quote_wallet_delta.abs();

            let residual_fee = (swap_output_amount - net_wallet_received).max(Decimal::ZERO);
            let fee_breakdown = FeeBreakdown {
                tx_fee_native,
                tx_fee_quote,
                platform_fee: residual_fee,
                priority_fee: Decimal::ZERO,
                total_fee_quote: residual_fee,
            };

            Amounts {
                base_amount,
                swap_input_amount: Some(swap_input_amount),
                swap_output_amount: Some(swap_output_amount),
                total_wallet_cost: None,
                net_wallet_received: Some(net_wallet_received),
                fee_breakdown,
            }
        }
    }
}

/// An intermediate mint touched by the transaction's actions whose net
/// swapper delta is zero but whose venue flow magnitude is non-zero.
#[derive(Debug, Clone, PartialEq)]
pub struct IntermediateFlow {
    pub mint: Mint,
    pub flow_magnitude: Decimal,
}

/// Find mints that appear in `Swap` actions with non-zero flow but whose
/// net wrap-group delta for `swapper` is zero — these are the
/// `intermediate_assets_collapsed` candidates, and the split-swap
/// synthesizer looks among them for a core pivot.
pub fn find_intermediate_flows(
    swapper: &Account,
    actions: &[Action],
    deltas: &AssetDeltaSet,
    excluding: &[&Mint],
) -> Vec<IntermediateFlow> {
    let mut flow_by_mint: HashMap<Mint, Decimal> = HashMap::new();

    for action in actions {
        if let Action::Swap {
            token_in, token_out, ..
        } = action
        {
            for leg in [token_in, token_out] {
                let entry = flow_by_mint.entry(leg.mint.clone()).or_insert(Decimal::ZERO);
                let magnitude = leg.normalized();
                if magnitude > *entry {
                    *entry = magnitude;
                }
            }
        }
    }

    flow_by_mint
        .into_iter()
        .filter(|(mint, _)| !excluding.iter().any(|ex| *ex == mint))
        .filter(|(mint, _)| {
            let key = wrap_group_key(mint);
            deltas.wrap_group_delta(swapper, &key).is_zero()
        })
        .map(|(mint, flow_magnitude)| IntermediateFlow {
            mint,
            flow_magnitude,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_raw_preserves_sign_and_scale() {
        assert_eq!(normalize_raw(-1_000_000_000, 9), Decimal::new(-1, 0));
        assert_eq!(normalize_raw(1500, 3), Decimal::new(1500, 3));
    }
}
