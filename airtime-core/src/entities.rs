//! Core entity structures

use crate::{GenreId, PerformerId, TrackId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Entity kind, used in error payloads and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Genre,
    Performer,
    Track,
}

/// Genre - a musical genre row.
/// Immutable once read; the relational store owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

/// Performer - a solo artist or group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Performer {
    pub id: PerformerId,
    pub name: String,
    pub is_group: bool,
}

/// Track - a catalog entry referencing its genre and performer by id.
///
/// The store guarantees both references resolve; the query layer never
/// re-checks them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub name: String,
    pub duration: Duration,
    pub creation_date: NaiveDate,
    pub rating: f32,
    pub genre_id: GenreId,
    pub performer_id: PerformerId,
}

/// A track joined with its genre and performer rows, in the store's
/// natural join order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub track: Track,
    pub genre: Genre,
    pub performer: Performer,
}

/// Flattened read-only projection of a joined track row.
/// Produced fresh per query and never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackView {
    pub id: TrackId,
    pub name: String,
    pub performer: String,
    pub genre: String,
    pub duration: Duration,
    pub creation_date: NaiveDate,
    pub rating: f32,
}

impl TrackView {
    /// Project a joined row into the flat view shape.
    pub fn from_record(record: &TrackRecord) -> Self {
        Self {
            id: record.track.id,
            name: record.track.name.clone(),
            performer: record.performer.name.clone(),
            genre: record.genre.name.clone(),
            duration: record.track.duration,
            creation_date: record.track.creation_date,
            rating: record.track.rating,
        }
    }
}

impl From<&TrackRecord> for TrackView {
    fn from(record: &TrackRecord) -> Self {
        Self::from_record(record)
    }
}

/// Immutable landing-page aggregate: the first rows of each collection.
///
/// Once cached, a snapshot is shared by all readers until it expires.
/// Callers receive it behind `Arc` and must treat it as read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeSnapshot {
    pub genres: Vec<Genre>,
    pub performers: Vec<Performer>,
    pub tracks: Vec<TrackView>,
}

impl HomeSnapshot {
    /// True when all three sequences are empty.
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty() && self.performers.is_empty() && self.tracks.is_empty()
    }
}
