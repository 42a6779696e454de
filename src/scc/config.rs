//! Immutable, construction-time configuration.
//!
//! A plain immutable value handed to `Parser::new` once, rather than shared
//! configuration mutated at module load. `CoreConfig` never changes for the
//! lifetime of a `Parser`; reconfiguring means building a new one. The core
//! itself never reads a file or environment variable — only
//! `CoreConfig::from_schema`, called by the host, does that translation.

use crate::config::{ConfidenceRuleSchema, CoreConfigSchema};
use crate::scc::ids::Mint;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::str::FromStr;

/// A confidence level assigned to a classified swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// A deterministic rule mapping swap shape to a confidence level.
///
/// `min_vote_share` and `min_confidence` are placeholders for the
/// operator-defined shape of "how sure are we this was really a swap" —
/// the core only needs to be able to evaluate rules in order and stop at
/// the first match; the exact vote semantics are host-defined per
/// `spec.md`'s explicit "do not guess" note on confidence tie-breaking.
#[derive(Debug, Clone)]
pub struct ConfidenceRule {
    pub min_vote_share: Decimal,
    pub min_confidence: Confidence,
}

impl ConfidenceRule {
    fn from_schema(schema: &ConfidenceRuleSchema) -> Result<Self, String> {
        let min_vote_share = Decimal::from_str(&schema.min_vote_share)
            .map_err(|e| format!("invalid min_vote_share '{}': {}", schema.min_vote_share, e))?;
        let min_confidence = match schema.min_confidence.to_lowercase().as_str() {
            "low" => Confidence::Low,
            "medium" => Confidence::Medium,
            "high" => Confidence::High,
            other => return Err(format!("unknown confidence level '{}'", other)),
        };
        Ok(Self {
            min_vote_share,
            min_confidence,
        })
    }
}

/// Immutable configuration for a `Parser`.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Ordered priority ladder of core/quote mints (native wrap-group,
    /// stablecoins, liquid-staking derivatives). Index 0 is highest
    /// priority.
    core_tokens: Vec<Mint>,

    /// Mints whose presence forces `erase(denied_asset)`.
    denied_mints: HashSet<Mint>,

    /// Decimals to use when the upstream payload omits them.
    decimals_overrides: HashMap<Mint, u8>,

    /// Upper bound (lamports) for positive native-SOL deltas classified as
    /// rent refunds rather than swap proceeds.
    rent_epsilon_native: u64,

    /// Optional lower bound on quote-side magnitude; `None` means the core
    /// never drops a record on a "dust" threshold.
    min_value_threshold_quote: Option<Decimal>,

    /// Deterministic confidence rules, evaluated in order.
    confidence_rules: Vec<ConfidenceRule>,
}

impl CoreConfig {
    /// Build a `CoreConfig` from a host-loaded, serde-deserialized schema.
    pub fn from_schema(schema: &CoreConfigSchema) -> Result<Self, String> {
        let core_tokens = schema.core_mints.iter().map(|m| Mint::new(m.clone())).collect();

        let denied_mints = schema
            .deny_list
            .iter()
            .map(|m| Mint::new(m.clone()))
            .collect();

        let decimals_overrides = schema
            .decimals_overrides
            .iter()
            .map(|(mint, decimals)| (Mint::new(mint.clone()), *decimals))
            .collect();

        let min_value_threshold_quote = if schema.min_value_threshold.trim().is_empty()
            || schema.min_value_threshold == "0"
        {
            None
        } else {
            Some(
                Decimal::from_str(&schema.min_value_threshold)
                    .map_err(|e| format!("invalid min_value_threshold: {}", e))?,
            )
        };

        let confidence_rules = schema
            .confidence_rules
            .iter()
            .map(ConfidenceRule::from_schema)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            core_tokens,
            denied_mints,
            decimals_overrides,
            rent_epsilon_native: schema.rent_epsilon_lamports,
            min_value_threshold_quote,
            confidence_rules,
        })
    }

    /// Construct directly from already-validated parts — used by tests and
    /// by hosts that build configuration programmatically rather than from
    /// a file.
    pub fn new(
        core_tokens: Vec<Mint>,
        denied_mints: HashSet<Mint>,
        decimals_overrides: HashMap<Mint, u8>,
        rent_epsilon_native: u64,
        min_value_threshold_quote: Option<Decimal>,
        confidence_rules: Vec<ConfidenceRule>,
    ) -> Self {
        Self {
            core_tokens,
            denied_mints,
            decimals_overrides,
            rent_epsilon_native,
            min_value_threshold_quote,
            confidence_rules,
        }
    }

    /// Whether a mint is in the core-token priority ladder.
    pub fn is_core_token(&self, mint: &Mint) -> bool {
        crate::scc::assets::is_native_wrap_group_mint(mint) || self.core_tokens.iter().any(|m| m == mint)
    }

    /// The priority rank of a core mint (lower is higher priority), `None`
    /// if the mint isn't a core token.
    pub fn core_priority(&self, mint: &Mint) -> Option<usize> {
        if crate::scc::assets::is_native_wrap_group_mint(mint) {
            return self
                .core_tokens
                .iter()
                .position(|m| crate::scc::assets::is_native_wrap_group_mint(m))
                .or(Some(0));
        }
        self.core_tokens.iter().position(|m| m == mint)
    }

    pub fn is_denied(&self, mint: &Mint) -> bool {
        self.denied_mints.contains(mint)
    }

    pub fn decimals_override(&self, mint: &Mint) -> Option<u8> {
        self.decimals_overrides.get(mint).copied()
    }

    pub fn rent_epsilon_native(&self) -> u64 {
        self.rent_epsilon_native
    }

    pub fn min_value_threshold_quote(&self) -> Option<Decimal> {
        self.min_value_threshold_quote
    }

    pub fn confidence_rules(&self) -> &[ConfidenceRule] {
        &self.confidence_rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> CoreConfigSchema {
        CoreConfigSchema {
            core_mints: vec![
                crate::constants::WRAPPED_SOL_MINT.to_string(),
                "usdc-mint".to_string(),
            ],
            deny_list: vec!["denied-mint".to_string()],
            decimals_overrides: HashMap::new(),
            rent_epsilon_lamports: 5000,
            min_value_threshold: "0".to_string(),
            confidence_rules: Vec::new(),
        }
    }

    #[test]
    fn native_wrap_group_is_always_core() {
        let cfg = CoreConfig::from_schema(&schema()).unwrap();
        assert!(cfg.is_core_token(&Mint::new(crate::constants::NATIVE_SOL_MINT)));
        assert!(cfg.is_core_token(&Mint::new(crate::constants::WRAPPED_SOL_MINT)));
    }

    #[test]
    fn denied_mint_is_denied() {
        let cfg = CoreConfig::from_schema(&schema()).unwrap();
        assert!(cfg.is_denied(&Mint::new("denied-mint")));
        assert!(!cfg.is_denied(&Mint::new("usdc-mint")));
    }

    #[test]
    fn no_threshold_when_zero() {
        let cfg = CoreConfig::from_schema(&schema()).unwrap();
        assert_eq!(cfg.min_value_threshold_quote(), None);
    }
}
