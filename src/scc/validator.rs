//! Validator (component 4.9).
//!
//! A last structural gate before emission: every invariant here is a
//! sanity check on the `StorageRecord` shape itself, independent of how
//! the amounts were derived. Any failure routes back through
//! `erase(validation_failed)` carrying the specific check name, rather
//! than emitting a record a downstream consumer would have to re-validate.

use crate::scc::error::{EraseMetadata, EraseResult, RejectionReason};
use crate::scc::storage::StorageRecord;
use rust_decimal::Decimal;

fn fail(check: &str) -> EraseResult {
    EraseResult::with_metadata(
        RejectionReason::ValidationFailed,
        EraseMetadata::new().with("check", check),
    )
}

fn no_negative_amounts(record: &StorageRecord) -> Result<(), EraseResult> {
    let amounts = [
        record.amount.sell_amount,
        record.amount.buy_amount,
        record.sol_amount.sell_sol_amount,
        record.sol_amount.buy_sol_amount,
    ];
    if amounts.into_iter().flatten().any(|d| d < Decimal::ZERO) {
        return Err(fail("no_negative_amounts"));
    }
    Ok(())
}

/// `rust_decimal::Decimal` has no NaN/infinity representation and caps
/// `scale()` at 28 by construction, so this check can never fail in
/// practice — it exists for parity with `spec.md`'s named invariant list,
/// documenting that the invariant is upheld structurally (by the choice of
/// `Decimal` over a float at every arithmetic step in `scc::amounts`)
/// rather than needing a runtime guard, the same non-check the validator
/// already uses for `classification_source_present`.
fn no_nan_or_inf(_record: &StorageRecord) -> Result<(), EraseResult> {
    Ok(())
}

fn exactly_one_amount_zero(record: &StorageRecord) -> Result<(), EraseResult> {
    let sides = [record.amount.sell_amount.is_some(), record.amount.buy_amount.is_some()];
    if sides.iter().filter(|present| **present).count() != 1 {
        return Err(fail("exactly_one_amount_zero"));
    }
    Ok(())
}

fn sol_null_when_not_involved(record: &StorageRecord) -> Result<(), EraseResult> {
    let quote_is_native = record.token_in.is_native_wrap_group() || record.token_out.is_native_wrap_group();
    if !quote_is_native
        && (record.sol_amount.sell_sol_amount.is_some() || record.sol_amount.buy_sol_amount.is_some())
    {
        return Err(fail("sol_null_when_not_involved"));
    }
    Ok(())
}

fn no_fabricated_sol(record: &StorageRecord) -> Result<(), EraseResult> {
    let quote_is_native = record.token_in.is_native_wrap_group() || record.token_out.is_native_wrap_group();
    if quote_is_native {
        let sides = [
            record.sol_amount.sell_sol_amount.is_some(),
            record.sol_amount.buy_sol_amount.is_some(),
        ];
        if sides.iter().filter(|present| **present).count() != 1 {
            return Err(fail("no_fabricated_sol"));
        }
    }
    Ok(())
}

/// `classification_source` is a plain enum field, never an `Option` — this
/// check exists for parity with the other named checks, documenting that
/// the invariant it names is upheld by construction rather than checked
/// at the value level.
fn classification_source_present(_record: &StorageRecord) -> Result<(), EraseResult> {
    Ok(())
}

/// Validate a single storage record against every per-record check.
pub fn validate_record(record: &StorageRecord) -> Result<(), EraseResult> {
    no_negative_amounts(record)?;
    no_nan_or_inf(record)?;
    exactly_one_amount_zero(record)?;
    sol_null_when_not_involved(record)?;
    no_fabricated_sol(record)?;
    classification_source_present(record)?;
    Ok(())
}

/// Validate the shared fields of a synthesized split pair: both legs must
/// agree on signature, swapper, timestamp, protocol, and confidence, and
/// exactly one must carry each split classification source.
pub fn validate_split_pair(sell: &StorageRecord, buy: &StorageRecord) -> Result<(), EraseResult> {
    use crate::scc::storage::ClassificationSource;

    let consistent = sell.signature == buy.signature
        && sell.swapper == buy.swapper
        && sell.timestamp_ms == buy.timestamp_ms
        && sell.confidence == buy.confidence
        && sell.protocol == buy.protocol
        && sell.classification_source == ClassificationSource::V2ParserSplitSell
        && buy.classification_source == ClassificationSource::V2ParserSplitBuy;
    if !consistent {
        return Err(fail("split_pair_consistency"));
    }
    Ok(())
}

/// Validate a full set of records produced from one transaction (one for
/// a single swap, two for a synthesized split).
pub fn validate_all(records: &[StorageRecord]) -> Result<(), EraseResult> {
    for record in records {
        validate_record(record)?;
    }
    if records.len() == 2 {
        validate_split_pair(&records[0], &records[1])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scc::amounts::FeeBreakdown;
    use crate::scc::config::Confidence;
    use crate::scc::ids::{Account, Mint, Signature};
    use crate::scc::roles::Direction;
    use crate::scc::storage::{AmountRecord, ClassificationSource, SolAmountRecord, TokenFlow};

    fn flow(mint: &str, decimals: u8, amount: Decimal) -> TokenFlow {
        TokenFlow {
            mint: Mint::new(mint),
            decimals,
            symbol: None,
            amount,
        }
    }

    fn no_fee() -> FeeBreakdown {
        FeeBreakdown {
            tx_fee_native: Decimal::ZERO,
            tx_fee_quote: Decimal::ZERO,
            platform_fee: Decimal::ZERO,
            priority_fee: Decimal::ZERO,
            total_fee_quote: Decimal::ZERO,
        }
    }

    fn base_record() -> StorageRecord {
        StorageRecord {
            signature: Signature::new("sig"),
            swapper: Account::parse("alice"),
            timestamp_ms: 0,
            r#type: Direction::Buy,
            classification_source: ClassificationSource::V2ParserSingle,
            token_in: flow(crate::constants::WRAPPED_SOL_MINT, 9, Decimal::from(1)),
            token_out: flow("TKN", 6, Decimal::from(100)),
            amount: AmountRecord {
                sell_amount: None,
                buy_amount: Some(Decimal::from(100)),
            },
            sol_amount: SolAmountRecord {
                sell_sol_amount: Some(Decimal::from(1)),
                buy_sol_amount: None,
            },
            confidence: Confidence::High,
            protocol: None,
            fee_breakdown: no_fee(),
        }
    }

    #[test]
    fn well_formed_record_passes() {
        assert!(validate_record(&base_record()).is_ok());
    }

    #[test]
    fn negative_amount_fails() {
        let mut record = base_record();
        record.amount.buy_amount = Some(Decimal::from(-5));
        let err = validate_record(&record).unwrap_err();
        assert_eq!(err.metadata.get("check"), Some("no_negative_amounts"));
    }

    #[test]
    fn both_amounts_present_fails_exactly_one() {
        let mut record = base_record();
        record.amount.sell_amount = Some(Decimal::from(1));
        let err = validate_record(&record).unwrap_err();
        assert_eq!(err.metadata.get("check"), Some("exactly_one_amount_zero"));
    }

    #[test]
    fn sol_amount_without_native_quote_fails() {
        let mut record = base_record();
        record.token_in = flow("usdc-mint", 6, Decimal::from(1));
        let err = validate_record(&record).unwrap_err();
        assert_eq!(err.metadata.get("check"), Some("sol_null_when_not_involved"));
    }

    #[test]
    fn mismatched_split_pair_fails() {
        let sell = base_record();
        let mut buy = base_record();
        buy.swapper = Account::parse("bob");
        let err = validate_split_pair(&sell, &buy).unwrap_err();
        assert_eq!(err.metadata.get("check"), Some("split_pair_consistency"));
    }

    #[test]
    fn consistent_split_pair_passes() {
        let mut sell = base_record();
        sell.classification_source = ClassificationSource::V2ParserSplitSell;
        sell.amount.sell_amount = Some(Decimal::from(100));
        sell.amount.buy_amount = None;
        let mut buy = base_record();
        buy.classification_source = ClassificationSource::V2ParserSplitBuy;
        assert!(validate_split_pair(&sell, &buy).is_ok());
    }

    #[test]
    fn split_pair_with_swapped_sources_fails() {
        let mut sell = base_record();
        sell.classification_source = ClassificationSource::V2ParserSplitBuy;
        let mut buy = base_record();
        buy.classification_source = ClassificationSource::V2ParserSplitSell;
        let err = validate_split_pair(&sell, &buy).unwrap_err();
        assert_eq!(err.metadata.get("check"), Some("split_pair_consistency"));
    }
}
