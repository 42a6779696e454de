//! Log tags for the Swap Classification Core pipeline.
//!
//! One tag per pipeline stage, plus `System`/`Cli` for ambient concerns and
//! `Other` as an escape hatch, mirroring one variant per subsystem.

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogTag {
    /// Ingest adapter: normalizing upstream payloads into `RawTx`.
    Ingest,
    /// Asset-delta collector.
    Deltas,
    /// Swapper identifier.
    Swapper,
    /// Swap detector gating predicate.
    Detector,
    /// Role assigner.
    Roles,
    /// Amount reconstructor.
    Amounts,
    /// Split-swap synthesizer.
    Split,
    /// Storage mapper.
    Storage,
    /// Validator.
    Validator,
    /// Configuration loading.
    Config,
    /// General/system-level messages.
    System,
    /// The `scc-diagnose` CLI host.
    Cli,
    /// Catch-all for ad-hoc tags (tests, tools).
    Other(String),
}

impl LogTag {
    /// Key used for `--debug-<module>` / `--verbose-<module>` flag lookups.
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::Ingest => "ingest".to_string(),
            LogTag::Deltas => "deltas".to_string(),
            LogTag::Swapper => "swapper".to_string(),
            LogTag::Detector => "detector".to_string(),
            LogTag::Roles => "roles".to_string(),
            LogTag::Amounts => "amounts".to_string(),
            LogTag::Split => "split".to_string(),
            LogTag::Storage => "storage".to_string(),
            LogTag::Validator => "validator".to_string(),
            LogTag::Config => "config".to_string(),
            LogTag::System => "system".to_string(),
            LogTag::Cli => "cli".to_string(),
            LogTag::Other(s) => s.to_lowercase(),
        }
    }

    /// Plain (uncolored) text used for file logging.
    pub fn to_plain_string(&self) -> String {
        match self {
            LogTag::Ingest => "INGEST".to_string(),
            LogTag::Deltas => "DELTAS".to_string(),
            LogTag::Swapper => "SWAPPER".to_string(),
            LogTag::Detector => "DETECTOR".to_string(),
            LogTag::Roles => "ROLES".to_string(),
            LogTag::Amounts => "AMOUNTS".to_string(),
            LogTag::Split => "SPLIT".to_string(),
            LogTag::Storage => "STORAGE".to_string(),
            LogTag::Validator => "VALIDATOR".to_string(),
            LogTag::Config => "CONFIG".to_string(),
            LogTag::System => "SYSTEM".to_string(),
            LogTag::Cli => "CLI".to_string(),
            LogTag::Other(s) => s.to_uppercase(),
        }
    }
}
