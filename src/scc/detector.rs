//! Swap detector (component 4.4).
//!
//! Having identified the swapper, decide whether this transaction is a
//! swap at all: exactly two non-zero wrap-group deltas, neither on the
//! deny list, combined quote-side magnitude above the configured dust
//! threshold, and per-mint conservation across all owners (total minted
//! or burned per mint sums to what the transaction's net non-owner flow
//! accounts for — a non-zero unexplained residual means the balance
//! changes don't add up and the record can't be trusted).

use crate::scc::assets::wrap_group_key;
use crate::scc::config::CoreConfig;
use crate::scc::deltas::AssetDeltaSet;
use crate::scc::error::{EraseMetadata, EraseResult, RejectionReason};
use crate::scc::ids::{Account, Mint};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// The two wrap-group assets the swapper traded, in no particular role
/// order — role assignment happens downstream in `scc::roles`.
#[derive(Debug, Clone)]
pub struct SwapCandidate {
    pub asset_a_key: String,
    pub asset_a_delta: Decimal,
    pub asset_b_key: String,
    pub asset_b_delta: Decimal,
}

/// Gate a transaction into a two-asset swap candidate, or reject it.
///
/// `conservation_sums` is the per-mint sum of every balance change raw
/// value across all owners in the transaction; a non-zero sum for a mint
/// that isn't expected to be minted/burned by the venue indicates the
/// reported balance changes don't conserve and the record is untrustworthy.
pub fn detect_swap(
    config: &CoreConfig,
    swapper: &Account,
    deltas: &AssetDeltaSet,
    conservation_sums: &HashMap<Mint, i128>,
    decimals_by_mint: &HashMap<Mint, u8>,
) -> Result<SwapCandidate, EraseResult> {
    let entries = deltas.nonzero_wrap_group_entries(swapper);

    if entries.len() != 2 {
        return Err(EraseResult::with_metadata(
            RejectionReason::InvalidAssetCount,
            EraseMetadata::new().with("asset_count", entries.len()),
        ));
    }

    let (a_key, a_delta) = entries[0].clone();
    let (b_key, b_delta) = entries[1].clone();

    for mint in deltas
        .raw
        .get(swapper)
        .into_iter()
        .flat_map(|m| m.keys())
    {
        let key = wrap_group_key(mint);
        if (key == a_key || key == b_key) && config.is_denied(mint) {
            return Err(EraseResult::with_metadata(
                RejectionReason::DeniedAsset,
                EraseMetadata::new().with("mint", mint.to_string()),
            ));
        }
    }

    if let Some(threshold) = config.min_value_threshold_quote() {
        let quote_magnitude = a_delta.abs().max(b_delta.abs());
        if quote_magnitude < threshold {
            return Err(EraseResult::with_metadata(
                RejectionReason::BelowMinimumValueThreshold,
                EraseMetadata::new()
                    .with("magnitude", quote_magnitude)
                    .with("threshold", threshold),
            ));
        }
    }

    for (mint, sum) in conservation_sums {
        if *sum != 0 {
            let decimals = decimals_by_mint.get(mint).copied().unwrap_or(0);
            let normalized = crate::scc::amounts::normalize_raw(*sum, decimals);
            return Err(EraseResult::with_metadata(
                RejectionReason::ConservationViolation,
                EraseMetadata::new()
                    .with("mint", mint.to_string())
                    .with("unexplained_residual", normalized),
            ));
        }
    }

    Ok(SwapCandidate {
        asset_a_key: a_key,
        asset_a_delta: a_delta,
        asset_b_key: b_key,
        asset_b_delta: b_delta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoreConfigSchema;
    use crate::scc::deltas::collect_deltas;
    use crate::scc::raw_tx::BalanceChange;
    use std::collections::HashMap as Map;

    fn config() -> CoreConfig {
        CoreConfig::from_schema(&CoreConfigSchema {
            core_mints: vec![crate::constants::WRAPPED_SOL_MINT.to_string()],
            deny_list: vec!["bad-mint".to_string()],
            decimals_overrides: Map::new(),
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
    fn unbalanced_single_sided_changes_fail_conservation() {
        let changes = vec![
            bc("alice", "TKN", 100, 0),
            bc("alice", crate::constants::NATIVE_SOL_MINT, -1_000_000_000, 9),
        ];
        let deltas = collect_deltas(&changes, 5000);
        let sums = crate::scc::deltas::per_mint_conservation_sums(&changes);
        let cfg = config();
        let owner = Account::parse("alice");
        let err = detect_swap(&cfg, &owner, &deltas, &sums, &deltas.decimals_by_mint).unwrap_err();
        assert_eq!(err.reason, RejectionReason::ConservationViolation);
    }

    #[test]
    fn single_asset_rejected_as_invalid_count() {
        let changes = vec![bc("alice", "TKN", 100, 0)];
        let deltas = collect_deltas(&changes, 5000);
        let sums = crate::scc::deltas::per_mint_conservation_sums(&changes);
        let cfg = config();
        let owner = Account::parse("alice");
        let err = detect_swap(&cfg, &owner, &deltas, &sums, &deltas.decimals_by_mint).unwrap_err();
        assert_eq!(err.reason, RejectionReason::InvalidAssetCount);
    }

    #[test]
    fn denied_mint_is_rejected() {
        let changes = vec![
            bc("alice", "bad-mint", 100, 0),
            bc("alice", crate::constants::NATIVE_SOL_MINT, -1_000_000_000, 9),
            bc("venue", "bad-mint", -100, 0),
            bc("venue", crate::constants::NATIVE_SOL_MINT, 1_000_000_000, 9),
        ];
        let deltas = collect_deltas(&changes, 5000);
        let sums = crate::scc::deltas::per_mint_conservation_sums(&changes);
        let cfg = config();
        let owner = Account::parse("alice");
        let err = detect_swap(&cfg, &owner, &deltas, &sums, &deltas.decimals_by_mint).unwrap_err();
        assert_eq!(err.reason, RejectionReason::DeniedAsset);
    }

    #[test]
    fn conserved_two_party_swap_passes() {
        let changes = vec![
            bc("alice", "TKN", 100, 0),
            bc("alice", crate::constants::NATIVE_SOL_MINT, -1_000_000_000, 9),
            bc("venue", "TKN", -100, 0),
            bc("venue", crate::constants::NATIVE_SOL_MINT, 1_000_000_000, 9),
        ];
        let deltas = collect_deltas(&changes, 5000);
        let sums = crate::scc::deltas::per_mint_conservation_sums(&changes);
        let cfg = config();
        let owner = Account::parse("alice");
        let result = detect_swap(&cfg, &owner, &deltas, &sums, &deltas.decimals_by_mint);
        assert!(result.is_ok());
    }
}
