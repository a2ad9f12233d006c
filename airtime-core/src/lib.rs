//! airtime core - entity types for the catalog query layer
//!
//! Pure data structures with no behavior. All other crates depend on this.
//! The relational store owns these records; the query layer only reads
//! them and projects them into view types.

pub mod entities;
pub mod error;

pub use entities::{
    EntityType, Genre, HomeSnapshot, Performer, Track, TrackRecord, TrackView,
};
pub use error::{AirtimeError, AirtimeResult, ConfigError, DataSourceError};

/// Row identifier assigned by the relational store.
pub type EntityId = i64;

/// Genre row identifier.
pub type GenreId = EntityId;

/// Performer row identifier.
pub type PerformerId = EntityId;

/// Track row identifier.
pub type TrackId = EntityId;
