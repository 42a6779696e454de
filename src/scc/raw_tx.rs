//! The normalized input to the pipeline, and the upstream-shaped types it's
//! built from.

use crate::scc::ids::{Account, Mint, Signature};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Transaction finality as reported by the enrichment collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TxStatus {
    Success,
    Failed,
}

/// A single `(owner, mint)` balance delta observed in the transaction.
///
/// Invariant: `post_raw - pre_raw == change_raw` (enforced by the ingest
/// adapter, not by this type — the upstream payload is untrusted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceChange {
    pub owner: Account,
    pub mint: Mint,
    pub pre_raw: i128,
    pub post_raw: i128,
    pub change_raw: i128,
    pub decimals: u8,
    pub symbol: Option<String>,
}

/// A token amount, raw units plus the decimals needed to normalize it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetAmt {
    pub mint: Mint,
    pub amount_raw: u128,
    pub decimals: u8,
    pub symbol: Option<String>,
}

impl AssetAmt {
    pub fn normalized(&self) -> Decimal {
        crate::scc::amounts::normalize_raw(self.amount_raw as i128, self.decimals)
    }
}

/// A typed, upstream-reported effect of the transaction.
///
/// Unknown action kinds fold into `Other` rather than being represented as
/// an untyped map with optional fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Swap {
        swapper: Option<Account>,
        token_in: AssetAmt,
        token_out: AssetAmt,
    },
    TokenTransfer {
        sender: Account,
        receiver: Account,
        mint: Mint,
        amount: AssetAmt,
    },
    NativeTransfer {
        sender: Account,
        receiver: Account,
        amount_lamports: u64,
    },
    Other {
        kind: String,
    },
}

/// An optional protocol/program tag attached to a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolTag {
    pub name: String,
    pub program_id: String,
}

/// The normalized pipeline input, produced by the ingest adapter from an
/// upstream enrichment payload.
#[derive(Debug, Clone)]
pub struct RawTx {
    pub signature: Signature,
    /// UTC epoch milliseconds.
    pub timestamp_ms: i64,
    pub status: TxStatus,
    /// Native-chain smallest unit (lamports).
    pub fee: u64,
    pub fee_payer: Account,
    /// Fee payer first, by convention.
    pub signers: Vec<Account>,
    pub protocol: Option<ProtocolTag>,
    pub balance_changes: Vec<BalanceChange>,
    pub actions: Vec<Action>,
    /// Mints the upstream payload reported with no `decimals` field and
    /// that `CoreConfig::decimals_overrides` had no entry for either —
    /// normalized to `0` for arithmetic purposes, but flagged so the
    /// pipeline can reject the transaction if one of these mints ends up
    /// selected as a base or quote asset (see `scc::error::RejectionReason::MissingDecimals`).
    pub missing_decimals: HashSet<Mint>,
}
