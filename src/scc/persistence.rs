//! Persistence collaborator.
//!
//! Owns the `swap_records` table and the atomicity guarantee a
//! synthesized split pair needs: both legs land, or neither does.
//! Amounts are stored as their `Decimal` string representation — sqlite
//! has no arbitrary-precision numeric type, and round-tripping through
//! `f64` would reintroduce the precision loss the rest of this pipeline
//! exists to avoid.

use crate::database::Database;
use crate::scc::config::Confidence;
use crate::scc::storage::StorageRecord;
use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

fn confidence_str(c: Confidence) -> &'static str {
    match c {
        Confidence::Low => "low",
        Confidence::Medium => "medium",
        Confidence::High => "high",
    }
}

/// Owns the swap-classification table. Built on the generic `Database`
/// connection wrapper rather than managing its own `rusqlite::Connection`.
pub struct SqliteSwapStore {
    db: Database,
}

const CREATE_TABLE_SQL: &str = "
CREATE TABLE IF NOT EXISTS swap_records (
    id                      INTEGER PRIMARY KEY AUTOINCREMENT,
    signature               TEXT NOT NULL,
    type                    TEXT NOT NULL,
    classification_source   TEXT NOT NULL,
    swapper                 TEXT NOT NULL,
    timestamp_ms            INTEGER NOT NULL,
    token_in_mint            TEXT NOT NULL,
    token_in_decimals        INTEGER NOT NULL,
    token_in_amount          TEXT NOT NULL,
    token_out_mint           TEXT NOT NULL,
    token_out_decimals       INTEGER NOT NULL,
    token_out_amount         TEXT NOT NULL,
    sell_amount              TEXT,
    buy_amount               TEXT,
    sell_sol_amount          TEXT,
    buy_sol_amount           TEXT,
    confidence               TEXT NOT NULL,
    protocol_name            TEXT,
    protocol_program_id      TEXT,
    total_fee_quote          TEXT NOT NULL,
    UNIQUE(signature, type)
)";

impl SqliteSwapStore {
    pub fn new(db_path: &str) -> Result<Self> {
        let db = Database::new(db_path)?;
        let store = Self { db };
        store.init_schema()?;
        Ok(store)
    }

    pub fn with_database(db: Database) -> Result<Self> {
        let store = Self { db };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.db
            .with_conn(|conn| conn.execute_batch(CREATE_TABLE_SQL).context("creating swap_records table"))
    }

    fn insert_stmt_params(record: &StorageRecord) -> InsertParams {
        let (protocol_name, protocol_program_id) = match &record.protocol {
            Some(tag) => (Some(tag.name.clone()), Some(tag.program_id.clone())),
            None => (None, None),
        };

        InsertParams {
            signature: record.signature.to_string(),
            r#type: record.r#type.as_str().to_string(),
            classification_source: record.classification_source.as_str().to_string(),
            swapper: record.swapper.to_string(),
            timestamp_ms: record.timestamp_ms,
            token_in_mint: record.token_in.mint.to_string(),
            token_in_decimals: record.token_in.decimals,
            token_in_amount: record.token_in.amount.to_string(),
            token_out_mint: record.token_out.mint.to_string(),
            token_out_decimals: record.token_out.decimals,
            token_out_amount: record.token_out.amount.to_string(),
            sell_amount: record.amount.sell_amount.map(|d| d.to_string()),
            buy_amount: record.amount.buy_amount.map(|d| d.to_string()),
            sell_sol_amount: record.sol_amount.sell_sol_amount.map(|d| d.to_string()),
            buy_sol_amount: record.sol_amount.buy_sol_amount.map(|d| d.to_string()),
            confidence: confidence_str(record.confidence).to_string(),
            protocol_name,
            protocol_program_id,
            total_fee_quote: record.fee_breakdown.total_fee_quote.to_string(),
        }
    }

    /// Insert a single record. Idempotent: a conflicting `(signature,
    /// type)` is silently ignored rather than erroring, so re-processing
    /// a transaction never produces a duplicate row.
    pub fn insert_one(&self, record: &StorageRecord) -> Result<()> {
        let p = Self::insert_stmt_params(record);
        self.db.with_conn(|conn| {
            conn.execute(INSERT_SQL, params![
                p.signature,
                p.r#type,
                p.classification_source,
                p.swapper,
                p.timestamp_ms,
                p.token_in_mint,
                p.token_in_decimals,
                p.token_in_amount,
                p.token_out_mint,
                p.token_out_decimals,
                p.token_out_amount,
                p.sell_amount,
                p.buy_amount,
                p.sell_sol_amount,
                p.buy_sol_amount,
                p.confidence,
                p.protocol_name,
                p.protocol_program_id,
                p.total_fee_quote,
            ])
            .context("inserting swap record")?;
            Ok(())
        })
    }

    /// Insert a synthesized split pair atomically: both legs commit in
    /// one transaction, or neither does.
    pub fn insert_pair_atomic(&self, sell: &StorageRecord, buy: &StorageRecord) -> Result<()> {
        let sell_p = Self::insert_stmt_params(sell);
        let buy_p = Self::insert_stmt_params(buy);
        self.db.with_conn_mut(|conn| {
            let tx = conn.transaction().context("starting swap-pair transaction")?;
            for p in [&sell_p, &buy_p] {
                tx.execute(INSERT_SQL, params![
                    p.signature,
                    p.r#type,
                    p.classification_source,
                    p.swapper,
                    p.timestamp_ms,
                    p.token_in_mint,
                    p.token_in_decimals,
                    p.token_in_amount,
                    p.token_out_mint,
                    p.token_out_decimals,
                    p.token_out_amount,
                    p.sell_amount,
                    p.buy_amount,
                    p.sell_sol_amount,
                    p.buy_sol_amount,
                    p.confidence,
                    p.protocol_name,
                    p.protocol_program_id,
                    p.total_fee_quote,
                ])
                .context("inserting swap-pair leg")?;
            }
            tx.commit().context("committing swap-pair transaction")?;
            Ok(())
        })
    }

    /// Whether a record for this `(signature, type)` has already been
    /// persisted — used by the diagnostic CLI to report replays.
    pub fn exists(&self, signature: &str, r#type: &str) -> Result<bool> {
        self.db.with_conn(|conn| {
            let found: Option<i64> = conn
                .query_row(
                    "SELECT id FROM swap_records WHERE signature = ?1 AND type = ?2",
                    params![signature, r#type],
                    |row| row.get(0),
                )
                .optional()
                .context("checking swap record existence")?;
            Ok(found.is_some())
        })
    }
}

struct InsertParams {
    signature: String,
    r#type: String,
    classification_source: String,
    swapper: String,
    timestamp_ms: i64,
    token_in_mint: String,
    token_in_decimals: u8,
    token_in_amount: String,
    token_out_mint: String,
    token_out_decimals: u8,
    token_out_amount: String,
    sell_amount: Option<String>,
    buy_amount: Option<String>,
    sell_sol_amount: Option<String>,
    buy_sol_amount: Option<String>,
    confidence: String,
    protocol_name: Option<String>,
    protocol_program_id: Option<String>,
    total_fee_quote: String,
}

const INSERT_SQL: &str = "
INSERT OR IGNORE INTO swap_records (
    signature, type, classification_source, swapper, timestamp_ms,
    token_in_mint, token_in_decimals, token_in_amount,
    token_out_mint, token_out_decimals, token_out_amount,
    sell_amount, buy_amount, sell_sol_amount, buy_sol_amount, confidence,
    protocol_name, protocol_program_id, total_fee_quote
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)";
