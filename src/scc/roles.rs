//! Role assigner (component 4.5).
//!
//! Assigns base/quote roles to the swapper's two wrap-group assets using
//! the core-token priority ladder, and determines swap direction from the
//! sign of the swapper's deltas on each.

use crate::scc::assets::Asset;
use crate::scc::config::CoreConfig;
use crate::scc::error::{EraseMetadata, EraseResult, RejectionReason};
use rust_decimal::Decimal;

/// Trade direction from the swapper's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Buy => "buy",
            Direction::Sell => "sell",
        }
    }
}

/// The outcome of role assignment for a pair of assets.
pub enum RoleAssignment {
    /// Exactly one asset is core; it is quote, the other base.
    Assigned { base: Asset, quote: Asset },
    /// Neither asset is core — deferred to the split-swap synthesizer.
    SplitCandidate { asset_a: Asset, asset_b: Asset },
}

/// Assign base/quote roles to a pair of candidate assets.
pub fn assign_roles(config: &CoreConfig, asset_a: Asset, asset_b: Asset) -> RoleAssignment {
    let a_core = config.is_core_token(&asset_a.mint);
    let b_core = config.is_core_token(&asset_b.mint);

    match (a_core, b_core) {
        (true, false) => RoleAssignment::Assigned {
            base: asset_b,
            quote: asset_a,
        },
        (false, true) => RoleAssignment::Assigned {
            base: asset_a,
            quote: asset_b,
        },
        (true, true) => {
            let a_priority = config.core_priority(&asset_a.mint).unwrap_or(usize::MAX);
            let b_priority = config.core_priority(&asset_b.mint).unwrap_or(usize::MAX);
            if a_priority <= b_priority {
                RoleAssignment::Assigned {
                    base: asset_b,
                    quote: asset_a,
                }
            } else {
                RoleAssignment::Assigned {
                    base: asset_a,
                    quote: asset_b,
                }
            }
        }
        (false, false) => RoleAssignment::SplitCandidate { asset_a, asset_b },
    }
}

/// Determine swap direction from the swapper's signed deltas on the base
/// and quote wrap-groups.
pub fn determine_direction(base_delta: Decimal, quote_delta: Decimal) -> Result<Direction, EraseResult> {
    if base_delta > Decimal::ZERO && quote_delta < Decimal::ZERO {
        Ok(Direction::Buy)
    } else if base_delta < Decimal::ZERO && quote_delta > Decimal::ZERO {
        Ok(Direction::Sell)
    } else {
        Err(EraseResult::with_metadata(
            RejectionReason::AmbiguousDirection,
            EraseMetadata::new()
                .with("base_delta", base_delta)
                .with("quote_delta", quote_delta),
        ))
    }
}
