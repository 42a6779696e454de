/// Configuration schemas - all config structures defined once with defaults
///
/// This module contains the on-disk configuration shape for the host
/// process. It covers ambient concerns (logging, persistence) plus the
/// schema form of the core's own configuration, which is deserialized here
/// and then converted into an immutable `scc::config::CoreConfig` via
/// `CoreConfig::from_schema` — the core pipeline itself never reads a file
/// or an environment variable.
use crate::config_struct;
use std::collections::HashMap;

// ============================================================================
// LOGGING CONFIGURATION
// ============================================================================

config_struct! {
    /// Logging configuration
    pub struct LoggingConfig {
        /// Minimum level to show: "error" | "warning" | "info" | "debug" | "verbose"
        min_level: String = "info".to_string(),

        /// Disable ANSI colors (e.g. when output is piped to a file)
        colors_enabled: bool = true,
    }
}

// ============================================================================
// PERSISTENCE CONFIGURATION
// ============================================================================

config_struct! {
    /// Persistence backend configuration
    pub struct PersistenceConfig {
        /// Path to the sqlite database file holding classified swap records
        database_path: String = "data/swaps.db".to_string(),
    }
}

// ============================================================================
// CORE (SWAP CLASSIFICATION) CONFIGURATION
// ============================================================================

/// On-disk representation of a single confidence rule.
///
/// Mirrors `scc::config::ConfidenceRule` field-for-field; kept as a
/// separate type so the core crate's own types never derive `Deserialize`
/// directly from an untrusted file.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ConfidenceRuleSchema {
    pub min_vote_share: String,
    pub min_confidence: String,
}

config_struct! {
    /// Schema form of the core pipeline's own configuration.
    pub struct CoreConfigSchema {
        /// Mints treated as core/quote assets (wrapped SOL, USDC, USDT, ...)
        core_mints: Vec<String> = vec![
            "So11111111111111111111111111111111111111112".to_string(),
        ],

        /// Mints never eligible to be chosen as the swapper's traded asset
        deny_list: Vec<String> = Vec::new(),

        /// Decimals overrides for mints whose on-chain decimals are absent
        /// or untrustworthy in the ingested payload
        decimals_overrides: HashMap<String, u8> = HashMap::new(),

        /// Lamports below which a native-SOL delta is treated as rent/fee
        /// noise rather than a swap leg
        rent_epsilon_lamports: u64 = 5000,

        /// Minimum notional value (in core-asset units, as a decimal string)
        /// a swap must clear to be emitted
        min_value_threshold: String = "0".to_string(),

        /// Ordered confidence rules used by the swapper identifier
        confidence_rules: Vec<ConfidenceRuleSchema> = Vec::new(),
    }
}

// ============================================================================
// ROOT CONFIGURATION
// ============================================================================

config_struct! {
    /// Root configuration structure containing all sub-configurations
    pub struct Config {
        /// Logging configuration
        logging: LoggingConfig = LoggingConfig::default(),

        /// Persistence configuration
        persistence: PersistenceConfig = PersistenceConfig::default(),

        /// Core pipeline configuration (schema form)
        core: CoreConfigSchema = CoreConfigSchema::default(),
    }
}
