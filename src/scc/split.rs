//! Split-swap synthesizer (component 4.7).
//!
//! When neither of the swapper's two traded assets is a core token, the
//! transaction is routed through a core asset the venue used internally
//! (e.g. token A -> SOL -> token B) that nets to zero for the swapper and
//! so never shows up as one of their two non-zero wrap-group deltas. This
//! synthesizes the two legs the swapper actually experienced: selling A
//! for the pivot, then buying B with the pivot — sharing one signature,
//! swapper, timestamp, protocol tag, and confidence level.

use crate::scc::amounts::{find_intermediate_flows, Amounts, FeeBreakdown};
use crate::scc::assets::Asset;
use crate::scc::config::{Confidence, CoreConfig};
use crate::scc::deltas::AssetDeltaSet;
use crate::scc::error::{EraseMetadata, EraseResult, RejectionReason};
use crate::scc::ids::{Account, Mint};
use crate::scc::parsed::{ParsedSwap, SplitSwapPair};
use crate::scc::raw_tx::{Action, ProtocolTag, RawTx};
use crate::scc::roles::Direction;
use crate::scc::swapper::SwapperIdMethod;
use rust_decimal::Decimal;

fn asset_from_mint(mint: &Mint, deltas: &AssetDeltaSet) -> Asset {
    let decimals = deltas.decimals_by_mint.get(mint).copied().unwrap_or(0);
    Asset::new(mint.clone(), decimals, None)
}

/// Find the highest-priority core token among a transaction's collapsed
/// intermediates, to serve as the pivot asset of a synthesized split.
fn choose_pivot(
    config: &CoreConfig,
    swapper: &Account,
    actions: &[Action],
    deltas: &AssetDeltaSet,
    excluding: &[&Mint],
) -> Option<(Mint, Decimal)> {
    let candidates = find_intermediate_flows(swapper, actions, deltas, excluding);

    candidates
        .into_iter()
        .filter(|flow| config.is_core_token(&flow.mint) && !flow.flow_magnitude.is_zero())
        .min_by_key(|flow| config.core_priority(&flow.mint).unwrap_or(usize::MAX))
        .map(|flow| (flow.mint, flow.flow_magnitude))
}

/// Synthesize a sell/buy leg pair for a swap routed through a core pivot,
/// or `erase(unresolvable_split)` if no such pivot can be found among the
/// transaction's collapsed intermediates.
#[allow(clippy::too_many_arguments)]
pub fn synthesize_split(
    config: &CoreConfig,
    raw: &RawTx,
    swapper: &Account,
    swapper_id_method: SwapperIdMethod,
    asset_a_mint: &Mint,
    asset_a_delta: Decimal,
    asset_b_mint: &Mint,
    asset_b_delta: Decimal,
    deltas: &AssetDeltaSet,
    confidence: Confidence,
) -> Result<SplitSwapPair, EraseResult> {
    let (pivot_mint, pivot_magnitude) = choose_pivot(
        config,
        swapper,
        &raw.actions,
        deltas,
        &[asset_a_mint, asset_b_mint],
    )
    .ok_or_else(|| {
        EraseResult::with_metadata(
            RejectionReason::UnresolvableSplit,
            EraseMetadata::new()
                .with("asset_a", asset_a_mint.to_string())
                .with("asset_b", asset_b_mint.to_string()),
        )
    })?;

    // The asset the swapper lost sells into the pivot; the asset they
    // gained is bought with it.
    let (sold_mint, sold_delta) = if asset_a_delta < Decimal::ZERO {
        (asset_a_mint, asset_a_delta)
    } else {
        (asset_b_mint, asset_b_delta)
    };
    let (bought_mint, bought_delta) = if sold_mint == asset_a_mint {
        (asset_b_mint, asset_b_delta)
    } else {
        (asset_a_mint, asset_a_delta)
    };

    let tx_fee_native = crate::scc::amounts::normalize_raw(
        raw.fee as i128,
        crate::constants::NATIVE_SOL_DECIMALS,
    );
    let no_fee = FeeBreakdown {
        tx_fee_native: Decimal::ZERO,
        tx_fee_quote: Decimal::ZERO,
        platform_fee: Decimal::ZERO,
        priority_fee: Decimal::ZERO,
        total_fee_quote: Decimal::ZERO,
    };

    // The transaction-level fee is attributed once, to the sell leg, so a
    // consumer summing both legs never double-counts it. When the pivot
    // itself is the native wrap-group, that fee also comes straight out of
    // the quote the sell leg nets.
    let pivot_is_native = crate::scc::assets::is_native_wrap_group_mint(&pivot_mint);
    let tx_fee_quote = if pivot_is_native {
        tx_fee_native
    } else {
        Decimal::ZERO
    };
    let net_wallet_received = (pivot_magnitude - tx_fee_quote).max(Decimal::ZERO);

    let sell_amounts = Amounts {
        base_amount: sold_delta.abs(),
        swap_input_amount: Some(sold_delta.abs()),
        swap_output_amount: Some(pivot_magnitude),
        total_wallet_cost: None,
        net_wallet_received: Some(net_wallet_received),
        fee_breakdown: FeeBreakdown {
            tx_fee_native,
            tx_fee_quote,
            total_fee_quote: tx_fee_quote,
            ..no_fee.clone()
        },
    };

    let buy_amounts = Amounts {
        base_amount: bought_delta.abs(),
        swap_input_amount: Some(pivot_magnitude),
        swap_output_amount: Some(bought_delta.abs()),
        total_wallet_cost: Some(pivot_magnitude),
        net_wallet_received: None,
        fee_breakdown: no_fee,
    };

    let pivot_asset = asset_from_mint(&pivot_mint, deltas);
    let sold_asset = asset_from_mint(sold_mint, deltas);
    let bought_asset = asset_from_mint(bought_mint, deltas);

    let protocol: Option<ProtocolTag> = raw.protocol.clone();

    let sell = ParsedSwap {
        signature: raw.signature.clone(),
        swapper: swapper.clone(),
        timestamp_ms: raw.timestamp_ms,
        direction: Direction::Sell,
        base: sold_asset,
        quote: pivot_asset.clone(),
        amounts: sell_amounts,
        protocol: protocol.clone(),
        swapper_id_method,
        confidence,
        intermediate_assets_collapsed: vec![pivot_mint.clone()],
    };

    let buy = ParsedSwap {
        signature: raw.signature.clone(),
        swapper: swapper.clone(),
        timestamp_ms: raw.timestamp_ms,
        direction: Direction::Buy,
        base: bought_asset,
        quote: pivot_asset,
        amounts: buy_amounts,
        protocol,
        swapper_id_method,
        confidence,
        intermediate_assets_collapsed: vec![pivot_mint],
    };

    Ok(SplitSwapPair { sell, buy })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoreConfigSchema;
    use crate::scc::deltas::collect_deltas;
    use crate::scc::raw_tx::{AssetAmt, BalanceChange, TxStatus};
    use std::collections::HashMap;

    fn config() -> CoreConfig {
        CoreConfig::from_schema(&CoreConfigSchema {
            core_mints: vec![crate::constants::WRAPPED_SOL_MINT.to_string()],
            deny_list: Vec::new(),
            decimals_overrides: HashMap::new(),
            rent_epsilon_lamports: 5000,
            min_value_threshold: "0".to_string(),
            confidence_rules: Vec::new(),
        })
        .unwrap()
    }

    fn bc(owner: &str, mint: &str, change_raw: i128, decimals: u8) -> BalanceChange {
        BalanceChange {
            owner: Account::parse(owner),
            mint: Mint::new(mint),
            pre_raw: 0,
            post_raw: change_raw,
            change_raw,
            decimals,
            symbol: None,
        }
    }

    #[test]
    fn split_resolves_via_native_sol_pivot() {
        let swapper = Account::parse("alice");
        let changes = vec![bc("alice", "TKNA", -1000, 0), bc("alice", "TKNB", 500, 0)];
        let deltas = collect_deltas(&changes, 5000);

        let actions = vec![
            Action::Swap {
                swapper: Some(swapper.clone()),
                token_in: AssetAmt {
                    mint: Mint::new("TKNA"),
                    amount_raw: 1000,
                    decimals: 0,
                    symbol: None,
                },
                token_out: AssetAmt {
                    mint: Mint::new(crate::constants::WRAPPED_SOL_MINT),
                    amount_raw: 1_000_000_000,
                    decimals: 9,
                    symbol: None,
                },
            },
            Action::Swap {
                swapper: Some(swapper.clone()),
                token_in: AssetAmt {
                    mint: Mint::new(crate::constants::WRAPPED_SOL_MINT),
                    amount_raw: 1_000_000_000,
                    decimals: 9,
                    symbol: None,
                },
                token_out: AssetAmt {
                    mint: Mint::new("TKNB"),
                    amount_raw: 500,
                    decimals: 0,
                    symbol: None,
                },
            },
        ];

        let raw = RawTx {
            signature: crate::scc::ids::Signature::new("sig"),
            timestamp_ms: 0,
            status: TxStatus::Success,
            fee: 5000,
            fee_payer: swapper.clone(),
            signers: vec![swapper.clone()],
            protocol: None,
            balance_changes: changes,
            actions,
            missing_decimals: std::collections::HashSet::new(),
        };

        let cfg = config();
        let pair = synthesize_split(
            &cfg,
            &raw,
            &swapper,
            SwapperIdMethod::UniqueSigner,
            &Mint::new("TKNA"),
            Decimal::from(-1000),
            &Mint::new("TKNB"),
            Decimal::from(500),
            &deltas,
            Confidence::High,
        )
        .unwrap();

        assert_eq!(pair.sell.direction, Direction::Sell);
        assert_eq!(pair.buy.direction, Direction::Buy);
        assert_eq!(pair.sell.quote.mint, Mint::new(crate::constants::WRAPPED_SOL_MINT));

        // The sell leg's quote-side proceeds are the pivot flow (1 SOL),
        // less the tx fee attributed to that leg, not the base quantity.
        let expected_net = Decimal::from(1) - Decimal::new(5000, 9);
        assert_eq!(pair.sell.amounts.net_wallet_received, Some(expected_net));
        assert_eq!(pair.sell.amounts.swap_output_amount, Some(Decimal::from(1)));
    }

    #[test]
    fn no_core_pivot_erases_as_unresolvable() {
        let swapper = Account::parse("alice");
        let changes = vec![bc("alice", "TKNA", -1000, 0), bc("alice", "TKNB", 500, 0)];
        let deltas = collect_deltas(&changes, 5000);
        let raw = RawTx {
            signature: crate::scc::ids::Signature::new("sig"),
            timestamp_ms: 0,
            status: TxStatus::Success,
            fee: 5000,
            fee_payer: swapper.clone(),
            signers: vec![swapper.clone()],
            protocol: None,
            balance_changes: changes,
            actions: Vec::new(),
            missing_decimals: std::collections::HashSet::new(),
        };
        let cfg = config();
        let err = synthesize_split(
            &cfg,
            &raw,
            &swapper,
            SwapperIdMethod::UniqueSigner,
            &Mint::new("TKNA"),
            Decimal::from(-1000),
            &Mint::new("TKNB"),
            Decimal::from(500),
            &deltas,
            Confidence::High,
        )
        .unwrap_err();
        assert_eq!(err.reason, RejectionReason::UnresolvableSplit);
    }
}
