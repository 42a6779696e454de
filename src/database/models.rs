/// Database configuration and connection details
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: Option<u32>,
    pub timeout_seconds: Option<u64>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "data/swaps.db".to_string(),
            pool_size: Some(10),
            timeout_seconds: Some(30),
        }
    }
}

/// Result wrapper for database operations
pub type DatabaseResult<T> = anyhow::Result<T>;
