//! Error types for airtime operations

use crate::{EntityId, EntityType};
use thiserror::Error;

/// Data-access layer errors.
///
/// The query layer performs no retries and no local recovery; every
/// failure surfaces to the caller as-is.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DataSourceError {
    #[error("Data source unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Query failed for {entity_type:?}: {reason}")]
    QueryFailed {
        entity_type: EntityType,
        reason: String,
    },

    #[error("Insert failed for {entity_type:?}: {reason}")]
    InsertFailed {
        entity_type: EntityType,
        reason: String,
    },

    #[error("Unresolved {entity_type:?} reference: {id}")]
    ReferenceViolation { entity_type: EntityType, id: EntityId },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for all airtime errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AirtimeError {
    #[error("Data source error: {0}")]
    DataSource(#[from] DataSourceError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for airtime operations.
pub type AirtimeResult<T> = Result<T, AirtimeError>;
