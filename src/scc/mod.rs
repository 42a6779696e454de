//! Swap Classification Core.
//!
//! `Parser::parse` is the single entrypoint: a normalized `RawTx` goes in,
//! and either a `Parsed` (single swap or synthesized split pair) comes out,
//! or an `EraseResult` explaining why the transaction wasn't a swap.
//! Everything the pipeline needs — core-token priority, deny list,
//! thresholds, telemetry — is handed to `Parser::new` once; nothing here
//! reaches for global, mutable state.

pub mod amounts;
pub mod assets;
pub mod config;
pub mod deltas;
pub mod detector;
pub mod error;
pub mod ids;
pub mod ingest;
pub mod parsed;
pub mod persistence;
pub mod raw_tx;
pub mod roles;
pub mod split;
pub mod state;
pub mod storage;
pub mod swapper;
pub mod telemetry;
pub mod validator;

use crate::scc::assets::Asset;
use crate::scc::config::{Confidence, CoreConfig};
use crate::scc::detector::detect_swap;
use crate::scc::error::{EraseMetadata, EraseResult, RejectionReason};
use crate::scc::ids::Mint;
use crate::scc::parsed::{Parsed, ParsedSwap};
use crate::scc::raw_tx::RawTx;
use crate::scc::roles::{assign_roles, determine_direction, RoleAssignment};
use crate::scc::swapper::{identify_swapper, SwapperIdMethod};
use crate::scc::telemetry::{EmissionKind, NoopTelemetry, Telemetry};
use rust_decimal::Decimal;

/// Estimate a confidence level for how the swapper was identified.
///
/// A direct action-level hint or a lone signer is as sure as this pipeline
/// gets; picking the largest delta among several signers is a reasonable
/// guess but a guess; falling all the way back to the fee payer is the
/// weakest signal available. When the host configures explicit
/// `confidence_rules`, the first rule whose `min_vote_share` this method's
/// built-in vote share clears wins; otherwise the built-in mapping below
/// applies directly.
fn estimate_confidence(config: &CoreConfig, method: SwapperIdMethod) -> Confidence {
    let vote_share = match method {
        SwapperIdMethod::ActionHint | SwapperIdMethod::UniqueSigner => Decimal::ONE,
        SwapperIdMethod::MaxDelta => Decimal::new(5, 1),
        SwapperIdMethod::FeePayerFallback => Decimal::ZERO,
    };

    if !config.confidence_rules().is_empty() {
        for rule in config.confidence_rules() {
            if vote_share >= rule.min_vote_share {
                return rule.min_confidence;
            }
        }
        return Confidence::Low;
    }

    match method {
        SwapperIdMethod::ActionHint | SwapperIdMethod::UniqueSigner => Confidence::High,
        SwapperIdMethod::MaxDelta => Confidence::Medium,
        SwapperIdMethod::FeePayerFallback => Confidence::Low,
    }
}

/// Reject the transaction if any of the given mints had no upstream
/// decimals and no `decimals_overrides` entry either — trading on a
/// fabricated `0` would silently corrupt every amount derived from it.
fn check_missing_decimals(raw: &RawTx, mints: &[&Mint]) -> Result<(), EraseResult> {
    for mint in mints {
        if raw.missing_decimals.contains(*mint) {
            return Err(EraseResult::with_metadata(
                RejectionReason::MissingDecimals,
                EraseMetadata::new().with("mint", mint.as_str()),
            ));
        }
    }
    Ok(())
}

fn asset_from_key(key: &str, mint_hint: &Mint, decimals_by_mint: &std::collections::HashMap<Mint, u8>) -> Asset {
    let mint = if key == crate::scc::assets::WRAP_GROUP_NATIVE {
        mint_hint.clone()
    } else {
        Mint::new(key.to_string())
    };
    let decimals = decimals_by_mint.get(&mint).copied().unwrap_or(0);
    Asset::new(mint, decimals, None)
}

/// The Swap Classification Core's single pipeline entrypoint.
pub struct Parser {
    config: CoreConfig,
    telemetry: Box<dyn Telemetry>,
}

impl Parser {
    pub fn new(config: CoreConfig, telemetry: Box<dyn Telemetry>) -> Self {
        Self { config, telemetry }
    }

    /// Build a `Parser` with a no-op telemetry sink.
    pub fn with_config(config: CoreConfig) -> Self {
        Self::new(config, Box::new(NoopTelemetry))
    }

    /// Classify a single normalized transaction.
    pub fn parse(&self, raw: RawTx) -> Result<Parsed, EraseResult> {
        let result = self.parse_inner(&raw);
        match &result {
            Ok(Parsed::Single(_)) => self.telemetry.on_emitted(EmissionKind::Single),
            Ok(Parsed::Split(_)) => {
                self.telemetry.on_emitted(EmissionKind::SplitSell);
                self.telemetry.on_emitted(EmissionKind::SplitBuy);
            }
            Err(reason) => self.telemetry.on_erased(&reason.reason),
        }
        result
    }

    fn parse_inner(&self, raw: &RawTx) -> Result<Parsed, EraseResult> {
        let deltas = crate::scc::deltas::collect_deltas(&raw.balance_changes, self.config.rent_epsilon_native());
        let conservation_sums = crate::scc::deltas::per_mint_conservation_sums(&raw.balance_changes);

        let swapper_id = identify_swapper(raw, &deltas, &self.config)?;
        let swapper = &swapper_id.swapper;

        let candidate = detect_swap(
            &self.config,
            swapper,
            &deltas,
            &conservation_sums,
            &deltas.decimals_by_mint,
        )?;

        let confidence = estimate_confidence(&self.config, swapper_id.method);

        // Prefer the native-SOL mint constant when a wrap-group key
        // represents the collapsed native/wrapped pair, so the emitted
        // asset always carries a real, displayable mint.
        let wrapped_sol_mint = Mint::new(crate::constants::WRAPPED_SOL_MINT);

        let asset_a = asset_from_key(&candidate.asset_a_key, &wrapped_sol_mint, &deltas.decimals_by_mint);
        let asset_b = asset_from_key(&candidate.asset_b_key, &wrapped_sol_mint, &deltas.decimals_by_mint);

        match assign_roles(&self.config, asset_a, asset_b) {
            RoleAssignment::Assigned { base, quote } => {
                check_missing_decimals(raw, &[&base.mint, &quote.mint])?;

                let base_key = crate::scc::assets::wrap_group_key(&base.mint);
                let quote_key = crate::scc::assets::wrap_group_key(&quote.mint);
                let base_delta = deltas.wrap_group_delta(swapper, &base_key);
                let quote_delta = deltas.wrap_group_delta(swapper, &quote_key);

                let direction = determine_direction(base_delta, quote_delta)?;

                let quote_is_native = quote.is_native_wrap_group();
                let amounts = crate::scc::amounts::reconstruct_amounts(
                    direction,
                    swapper,
                    &base.mint,
                    &quote.mint,
                    quote_is_native,
                    &deltas,
                    &raw.actions,
                    raw.fee,
                );

                let intermediates = crate::scc::amounts::find_intermediate_flows(
                    swapper,
                    &raw.actions,
                    &deltas,
                    &[&base.mint, &quote.mint],
                )
                .into_iter()
                .map(|flow| flow.mint)
                .collect();

                let swap = ParsedSwap {
                    signature: raw.signature.clone(),
                    swapper: swapper.clone(),
                    timestamp_ms: raw.timestamp_ms,
                    direction,
                    base,
                    quote,
                    amounts,
                    protocol: raw.protocol.clone(),
                    swapper_id_method: swapper_id.method,
                    confidence,
                    intermediate_assets_collapsed: intermediates,
                };

                self.emit_single(swap)
            }
            RoleAssignment::SplitCandidate { asset_a, asset_b } => {
                let pair = crate::scc::split::synthesize_split(
                    &self.config,
                    raw,
                    swapper,
                    swapper_id.method,
                    &asset_a.mint,
                    candidate.asset_a_delta,
                    &asset_b.mint,
                    candidate.asset_b_delta,
                    &deltas,
                    confidence,
                )?;
                check_missing_decimals(
                    raw,
                    &[&pair.sell.base.mint, &pair.sell.quote.mint, &pair.buy.base.mint],
                )?;
                self.emit_split(pair)
            }
        }
    }

    fn emit_single(&self, swap: ParsedSwap) -> Result<Parsed, EraseResult> {
        let parsed = Parsed::Single(swap);
        let records = crate::scc::storage::to_storage_records(&parsed);
        crate::scc::validator::validate_all(&records)?;
        Ok(parsed)
    }

    fn emit_split(&self, pair: crate::scc::parsed::SplitSwapPair) -> Result<Parsed, EraseResult> {
        let parsed = Parsed::Split(pair);
        let records = crate::scc::storage::to_storage_records(&parsed);
        crate::scc::validator::validate_all(&records)?;
        Ok(parsed)
    }
}
