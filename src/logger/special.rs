//! Logging helpers for pipeline-specific outcomes.
//!
//! These wrap the generic level/tag API in `super` with shapes that match
//! what the classification pipeline actually needs to report: why a
//! transaction was erased, and what a transaction was ultimately emitted as.

use super::tags::LogTag;
use crate::logger;
use crate::scc::error::RejectionReason;
use crate::scc::telemetry::EmissionKind;
use colored::*;

/// Log a transaction being erased (rejected) from the pipeline.
///
/// Erasure is an expected, routine outcome — most transactions observed by
/// a whale-tracking feed are not swaps — so this logs at DEBUG, not WARNING.
pub fn log_rejection(signature: &str, reason: &RejectionReason) {
    let message = format!(
        "{} {}",
        format!("{}", signature).dimmed(),
        format!("{}", reason).yellow()
    );
    logger::debug(LogTag::Validator, &message);
}

/// Log a transaction being emitted as a classified swap.
pub fn log_emission(signature: &str, kind: EmissionKind) {
    let kind_str = match kind {
        EmissionKind::Single => "single".green().bold(),
        EmissionKind::SplitSell => "split/sell".cyan().bold(),
        EmissionKind::SplitBuy => "split/buy".cyan().bold(),
    };
    let message = format!("{} emitted as {}", signature, kind_str);
    logger::info(LogTag::Validator, &message);
}
