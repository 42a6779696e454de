use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

// Re-export argument handling for backwards-compatible call sites.
pub use crate::arguments::{
    get_arg_value, get_cmd_args, get_enabled_debug_modes, has_arg, is_quiet_enabled,
    is_verbose_enabled, set_cmd_args, CMD_ARGS,
};

/// Process start timestamp, used to tag diagnostic output.
pub static STARTUP_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);
