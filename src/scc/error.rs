//! Data-shape rejection taxonomy.
//!
//! `EraseResult` is the pipeline's "normal failure" channel: rejecting a
//! transaction that isn't a swap is an expected, routine outcome, not an
//! error in the `std::error::Error` sense. It is returned, never thrown —
//! see `scc::CoreError` (in `crate::errors`) for the narrow set of
//! conditions that genuinely are fatal.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// The closed set of reasons a transaction can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    TxFailed,
    NoSwapSignature,
    InvalidAssetCount,
    AmbiguousDirection,
    DeniedAsset,
    ConservationViolation,
    MissingDecimals,
    UnresolvableSplit,
    BelowMinimumValueThreshold,
    ValidationFailed,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RejectionReason::TxFailed => "tx_failed",
            RejectionReason::NoSwapSignature => "no_swap_signature",
            RejectionReason::InvalidAssetCount => "invalid_asset_count",
            RejectionReason::AmbiguousDirection => "ambiguous_direction",
            RejectionReason::DeniedAsset => "denied_asset",
            RejectionReason::ConservationViolation => "conservation_violation",
            RejectionReason::MissingDecimals => "missing_decimals",
            RejectionReason::UnresolvableSplit => "unresolvable_split",
            RejectionReason::BelowMinimumValueThreshold => "below_minimum_value_threshold",
            RejectionReason::ValidationFailed => "validation_failed",
        };
        write!(f, "{}", s)
    }
}

/// A rejected transaction's numeric witness.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EraseMetadata(HashMap<String, String>);

impl EraseMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.0.insert(key.into(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|s| s.as_str())
    }
}

/// The result of rejecting a transaction from the pipeline.
#[derive(Debug, Clone)]
pub struct EraseResult {
    pub reason: RejectionReason,
    pub metadata: EraseMetadata,
}

impl EraseResult {
    pub fn new(reason: RejectionReason) -> Self {
        Self {
            reason,
            metadata: EraseMetadata::new(),
        }
    }

    pub fn with_metadata(reason: RejectionReason, metadata: EraseMetadata) -> Self {
        Self { reason, metadata }
    }
}

impl fmt::Display for EraseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)
    }
}
