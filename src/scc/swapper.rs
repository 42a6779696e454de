//! Swapper identifier (component 4.3).
//!
//! Determines which wallet in the transaction is "the swapper" — the
//! owner whose balance changes are reinterpreted as swap input/output.
//! Tried in order: an explicit action-level hint, a lone signer, the
//! account with the largest quote-side (core-token) delta magnitude among
//! every account the transaction touches, then the fee payer. A
//! candidate only qualifies if it shows both a net loss and a net gain
//! across its non-zero deltas — a wallet that only ever gains (an
//! airdrop recipient) or only ever loses (a fee payer with no other
//! involvement) isn't a swapper.

use crate::scc::config::CoreConfig;
use crate::scc::deltas::AssetDeltaSet;
use crate::scc::error::{EraseResult, RejectionReason};
use crate::scc::ids::Account;
use crate::scc::raw_tx::{Action, RawTx};
use rust_decimal::Decimal;

/// How the swapper's identity was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapperIdMethod {
    ActionHint,
    UniqueSigner,
    MaxDelta,
    FeePayerFallback,
}

impl SwapperIdMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwapperIdMethod::ActionHint => "action_hint",
            SwapperIdMethod::UniqueSigner => "unique_signer",
            SwapperIdMethod::MaxDelta => "max_delta",
            SwapperIdMethod::FeePayerFallback => "fee_payer_fallback",
        }
    }
}

/// A resolved swapper and the method used to resolve it.
#[derive(Debug, Clone)]
pub struct SwapperIdentification {
    pub swapper: Account,
    pub method: SwapperIdMethod,
}

/// Whether `owner` has at least one non-zero positive and one non-zero
/// negative delta — the minimal signature of a wallet that traded one
/// asset for another. Deliberately the raw per-mint view, not the
/// wrap-group view: a wallet whose native-SOL loss and wrapped-SOL gain
/// cancel into one net wrap-group figure still showed the transaction
/// moving two distinct rows on its own balance, which is enough to
/// qualify it as a swapper candidate — whether the *shape* of its two
/// wrap-group deltas resolves into a clean buy/sell is a separate
/// question the detector/role-assigner answer downstream (see
/// `roles::determine_direction`, which can still reject a qualified
/// swapper with `ambiguous_direction`).
fn has_swap_signature(deltas: &AssetDeltaSet, owner: &Account) -> bool {
    let Some(owner_deltas) = deltas.raw.get(owner) else {
        return false;
    };
    let mut has_positive = false;
    let mut has_negative = false;
    for delta in owner_deltas.values() {
        if *delta > Decimal::ZERO {
            has_positive = true;
        } else if *delta < Decimal::ZERO {
            has_negative = true;
        }
    }
    has_positive && has_negative
}

/// The largest-magnitude delta an owner shows on a core (quote-side) mint —
/// the "absolute quote-side magnitude" the max-delta rule ranks candidates
/// by. An owner with no core-token delta at all ranks at zero rather than
/// falling back to some other mint's magnitude.
fn quote_side_magnitude(config: &CoreConfig, deltas: &AssetDeltaSet, owner: &Account) -> Decimal {
    deltas
        .raw
        .get(owner)
        .map(|m| {
            m.iter()
                .filter(|(mint, _)| config.is_core_token(mint))
                .map(|(_, d)| d.abs())
                .max()
                .unwrap_or(Decimal::ZERO)
        })
        .unwrap_or(Decimal::ZERO)
}

/// Identify the swapper for a transaction, or `erase(no_swap_signature)`
/// if no candidate in the transaction qualifies.
pub fn identify_swapper(
    raw: &RawTx,
    deltas: &AssetDeltaSet,
    config: &CoreConfig,
) -> Result<SwapperIdentification, EraseResult> {
    for action in &raw.actions {
        if let Action::Swap {
            swapper: Some(candidate),
            ..
        } = action
        {
            if has_swap_signature(deltas, candidate) {
                return Ok(SwapperIdentification {
                    swapper: candidate.clone(),
                    method: SwapperIdMethod::ActionHint,
                });
            }
        }
    }

    if raw.signers.len() == 1 {
        let candidate = &raw.signers[0];
        if has_swap_signature(deltas, candidate) {
            return Ok(SwapperIdentification {
                swapper: candidate.clone(),
                method: SwapperIdMethod::UniqueSigner,
            });
        }
    }

    // Rule 3 ranges over every account that shows up in the transaction's
    // deltas, not just declared signers.
    let mut qualifying: Vec<&Account> = deltas
        .raw
        .keys()
        .filter(|owner| has_swap_signature(deltas, owner))
        .collect();

    if !qualifying.is_empty() {
        qualifying.sort_by(|a, b| {
            quote_side_magnitude(config, deltas, a)
                .cmp(&quote_side_magnitude(config, deltas, b))
                .reverse()
                .then_with(|| {
                    let a_is_payer = **a == raw.fee_payer;
                    let b_is_payer = **b == raw.fee_payer;
                    b_is_payer.cmp(&a_is_payer)
                })
                .then_with(|| a.to_string().cmp(&b.to_string()))
        });
        return Ok(SwapperIdentification {
            swapper: qualifying[0].clone(),
            method: SwapperIdMethod::MaxDelta,
        });
    }

    if has_swap_signature(deltas, &raw.fee_payer) {
        return Ok(SwapperIdentification {
            swapper: raw.fee_payer.clone(),
            method: SwapperIdMethod::FeePayerFallback,
        });
    }

    Err(EraseResult::new(RejectionReason::NoSwapSignature))
}
