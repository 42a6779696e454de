/// Configuration module - organized config system with zero repetition
///
/// This module provides the host-level configuration system: logging
/// toggles, the persistence database path, and the on-disk schema for the
/// core pipeline's own configuration (converted to an immutable
/// `scc::config::CoreConfig` at startup via `CoreConfig::from_schema`).
///
/// # Architecture
///
/// - `macros.rs` - The `config_struct!` macro for defining configs with embedded defaults
/// - `schemas.rs` - All configuration structures defined once with defaults
/// - `utils.rs` - Loading, reloading, and access utilities
///
/// # Usage
///
/// ```
/// use scc::config::load_config;
///
/// fn main() -> Result<(), String> {
///     load_config()?;
///     Ok(())
/// }
/// ```
// Export the macro
#[macro_use]
mod macros;

// Export schemas (all config structures)
pub mod schemas;

// Export utilities (loading, reloading, access)
pub mod utils;

pub use schemas::{Config, ConfidenceRuleSchema, CoreConfigSchema, LoggingConfig, PersistenceConfig};

pub use utils::{
    get_config_clone, is_config_initialized, load_config, load_config_from_path, reload_config,
    reload_config_from_path, save_config, with_config, CONFIG,
};
