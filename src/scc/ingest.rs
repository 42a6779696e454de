//! Ingest adapter (component 4.1).
//!
//! Converts an upstream enrichment payload into the pipeline's normalized
//! `RawTx`. A failed transaction is rejected immediately; a missing
//! decimals field is filled with `0` and flagged to telemetry rather than
//! rejecting the whole transaction over one field.

use crate::scc::config::CoreConfig;
use crate::scc::error::{EraseResult, RejectionReason};
use crate::scc::ids::{Account, Mint, Signature};
use crate::scc::raw_tx::{Action, AssetAmt, BalanceChange, ProtocolTag, RawTx, TxStatus};
use crate::scc::telemetry::Telemetry;
use serde::Deserialize;
use std::collections::HashSet;

/// The shape of an upstream balance-change entry, as reported by the
/// enrichment collaborator, before decimals-filling and typing.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBalanceChange {
    pub owner: String,
    pub mint: String,
    pub pre_raw: i128,
    pub post_raw: i128,
    pub decimals: Option<u8>,
    pub symbol: Option<String>,
}

/// The shape of an upstream action entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawAction {
    Swap {
        swapper: Option<String>,
        token_in_mint: String,
        token_in_amount_raw: u128,
        token_in_decimals: Option<u8>,
        token_out_mint: String,
        token_out_amount_raw: u128,
        token_out_decimals: Option<u8>,
    },
    TokenTransfer {
        sender: String,
        receiver: String,
        mint: String,
        amount_raw: u128,
        decimals: Option<u8>,
    },
    NativeTransfer {
        sender: String,
        receiver: String,
        amount_lamports: u64,
    },
    #[serde(other)]
    Other,
}

/// The shape of an upstream enrichment payload, as received over the
/// wire, before normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamPayload {
    pub signature: String,
    pub timestamp_ms: i64,
    pub status: String,
    pub fee: u64,
    pub fee_payer: String,
    pub signers: Vec<String>,
    pub protocol_name: Option<String>,
    pub protocol_program_id: Option<String>,
    pub balance_changes: Vec<RawBalanceChange>,
    pub actions: Vec<RawAction>,
}

/// Fill in a mint's decimals, consulting `CoreConfig::decimals_overrides`
/// before falling back to `0`. A mint that had neither an upstream value
/// nor an override is recorded into `missing` so the pipeline can reject
/// the transaction later if that mint ends up selected as a base or quote
/// asset, instead of silently trading on a fabricated `0`.
fn fill_decimals(
    mint: &str,
    decimals: Option<u8>,
    config: &CoreConfig,
    telemetry: &dyn Telemetry,
    missing: &mut HashSet<Mint>,
) -> u8 {
    if let Some(d) = decimals {
        return d;
    }
    let mint_id = Mint::new(mint);
    if let Some(d) = config.decimals_override(&mint_id) {
        return d;
    }
    telemetry.on_erased(&RejectionReason::MissingDecimals);
    tracing_fallback(mint);
    missing.insert(mint_id);
    0
}

fn tracing_fallback(mint: &str) {
    crate::logger::warning(
        crate::logger::LogTag::Ingest,
        &format!("missing decimals for mint {mint}, defaulting to 0"),
    );
}

/// Convert an upstream payload into a normalized `RawTx`, or
/// `erase(tx_failed)` if the transaction did not succeed on-chain.
pub fn ingest(
    payload: UpstreamPayload,
    config: &CoreConfig,
    telemetry: &dyn Telemetry,
) -> Result<RawTx, EraseResult> {
    let status = match payload.status.to_uppercase().as_str() {
        "SUCCESS" => TxStatus::Success,
        _ => return Err(EraseResult::new(RejectionReason::TxFailed)),
    };

    let mut missing_decimals: HashSet<Mint> = HashSet::new();

    let balance_changes = payload
        .balance_changes
        .into_iter()
        .map(|bc| {
            let decimals = fill_decimals(&bc.mint, bc.decimals, config, telemetry, &mut missing_decimals);
            BalanceChange {
                owner: Account::parse(&bc.owner),
                mint: Mint::new(bc.mint),
                pre_raw: bc.pre_raw,
                post_raw: bc.post_raw,
                change_raw: bc.post_raw - bc.pre_raw,
                decimals,
                symbol: bc.symbol,
            }
        })
        .collect();

    let actions = payload
        .actions
        .into_iter()
        .map(|action| match action {
            RawAction::Swap {
                swapper,
                token_in_mint,
                token_in_amount_raw,
                token_in_decimals,
                token_out_mint,
                token_out_amount_raw,
                token_out_decimals,
            } => Action::Swap {
                swapper: swapper.map(|s| Account::parse(&s)),
                token_in: AssetAmt {
                    mint: Mint::new(token_in_mint.clone()),
                    amount_raw: token_in_amount_raw,
                    decimals: fill_decimals(&token_in_mint, token_in_decimals, config, telemetry, &mut missing_decimals),
                    symbol: None,
                },
                token_out: AssetAmt {
                    mint: Mint::new(token_out_mint.clone()),
                    amount_raw: token_out_amount_raw,
                    decimals: fill_decimals(&token_out_mint, token_out_decimals, config, telemetry, &mut missing_decimals),
                    symbol: None,
                },
            },
            RawAction::TokenTransfer {
                sender,
                receiver,
                mint,
                amount_raw,
                decimals,
            } => Action::TokenTransfer {
                sender: Account::parse(&sender),
                receiver: Account::parse(&receiver),
                mint: Mint::new(mint.clone()),
                amount: AssetAmt {
                    mint: Mint::new(mint.clone()),
                    amount_raw,
                    decimals: fill_decimals(&mint, decimals, config, telemetry, &mut missing_decimals),
                    symbol: None,
                },
            },
            RawAction::NativeTransfer {
                sender,
                receiver,
                amount_lamports,
            } => Action::NativeTransfer {
                sender: Account::parse(&sender),
                receiver: Account::parse(&receiver),
                amount_lamports,
            },
            RawAction::Other => Action::Other {
                kind: "unknown".to_string(),
            },
        })
        .collect();

    let protocol = match (payload.protocol_name, payload.protocol_program_id) {
        (Some(name), Some(program_id)) => Some(ProtocolTag { name, program_id }),
        _ => None,
    };

    // Canonical signer order: fee payer first, matching the convention
    // everything downstream (swapper identification's unique-signer and
    // fee-payer-fallback rules) relies on.
    let fee_payer = Account::parse(&payload.fee_payer);
    let mut signers: Vec<Account> = payload.signers.iter().map(|s| Account::parse(s)).collect();
    signers.retain(|s| *s != fee_payer);
    signers.insert(0, fee_payer.clone());

    telemetry.on_ingested();

    Ok(RawTx {
        signature: Signature::new(payload.signature),
        timestamp_ms: payload.timestamp_ms,
        status,
        fee: payload.fee,
        fee_payer,
        signers,
        protocol,
        balance_changes,
        actions,
        missing_decimals,
    })
}
