//! Configuration for the home aggregate query.

use std::time::Duration;

use airtime_core::{AirtimeResult, ConfigError};

/// Rows taken from each collection when building the home aggregate.
pub const DEFAULT_ROW_LIMIT: usize = 20;

/// How long a cached home snapshot stays valid.
pub const HOME_TTL: Duration = Duration::from_secs(292);

/// Configuration for [`HomeQueryService`](crate::HomeQueryService).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeQueryConfig {
    /// Maximum rows per collection in the aggregate.
    pub row_limit: usize,
    /// TTL for the cached aggregate.
    pub ttl: Duration,
}

impl Default for HomeQueryConfig {
    fn default() -> Self {
        Self {
            row_limit: DEFAULT_ROW_LIMIT,
            ttl: HOME_TTL,
        }
    }
}

impl HomeQueryConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-collection row limit.
    pub fn with_row_limit(mut self, row_limit: usize) -> Self {
        self.row_limit = row_limit;
        self
    }

    /// Set the snapshot TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Returns Ok(()) if valid, Err(ConfigError) if invalid.
    pub fn validate(&self) -> AirtimeResult<()> {
        if self.row_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "row_limit".to_string(),
                value: "0".to_string(),
                reason: "must be positive".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
