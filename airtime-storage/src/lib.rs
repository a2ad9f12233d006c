//! airtime storage - data-source trait and in-memory reference store
//!
//! Defines the read-only data-access abstraction the query layer consumes.
//! A production deployment implements [`DataSource`] against the relational
//! store; [`InMemoryDataSource`] is the reference implementation used by
//! tests and embedders that run without a database.

pub mod cache;

pub use cache::{CacheStats, CacheStore, MemoryCache};

use std::collections::HashMap;
use std::sync::RwLock;

use airtime_core::{
    AirtimeResult, DataSourceError, EntityType, Genre, GenreId, Performer, PerformerId, Track,
    TrackRecord,
};

// ============================================================================
// DATA SOURCE TRAIT
// ============================================================================

/// Read-only access to the catalog collections.
///
/// "First N" ordering is whatever the implementation's natural iteration
/// order is; callers impose limits, never sorts. Implementations must be
/// safe to share across request-handling threads.
pub trait DataSource: Send + Sync {
    /// First `limit` genres in natural order.
    fn genres(&self, limit: usize) -> AirtimeResult<Vec<Genre>>;

    /// First `limit` performers in natural order.
    fn performers(&self, limit: usize) -> AirtimeResult<Vec<Performer>>;

    /// First `limit` tracks joined with their genre and performer rows.
    fn tracks_with_relations(&self, limit: usize) -> AirtimeResult<Vec<TrackRecord>>;

    /// Every track joined with its genre and performer rows.
    fn all_tracks_with_relations(&self) -> AirtimeResult<Vec<TrackRecord>>;
}

// ============================================================================
// IN-MEMORY REFERENCE IMPLEMENTATION
// ============================================================================

/// Insertion-ordered catalog rows plus id indexes for join resolution.
#[derive(Default)]
struct Catalog {
    genres: Vec<Genre>,
    performers: Vec<Performer>,
    tracks: Vec<Track>,
    genre_index: HashMap<GenreId, usize>,
    performer_index: HashMap<PerformerId, usize>,
}

impl Catalog {
    fn join(&self, track: &Track) -> AirtimeResult<TrackRecord> {
        let genre = self
            .genre_index
            .get(&track.genre_id)
            .map(|&i| self.genres[i].clone())
            .ok_or(DataSourceError::ReferenceViolation {
                entity_type: EntityType::Genre,
                id: track.genre_id,
            })?;
        let performer = self
            .performer_index
            .get(&track.performer_id)
            .map(|&i| self.performers[i].clone())
            .ok_or(DataSourceError::ReferenceViolation {
                entity_type: EntityType::Performer,
                id: track.performer_id,
            })?;
        Ok(TrackRecord {
            track: track.clone(),
            genre,
            performer,
        })
    }
}

/// In-memory [`DataSource`] with insertion order as its natural order.
///
/// Enforces the referential invariant on insert: a track is rejected when
/// its genre or performer id does not resolve to an existing row.
#[derive(Default)]
pub struct InMemoryDataSource {
    inner: RwLock<Catalog>,
}

impl InMemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a genre row. Fails on duplicate id.
    pub fn insert_genre(&self, genre: Genre) -> AirtimeResult<()> {
        let mut catalog = self.inner.write().unwrap();
        if catalog.genre_index.contains_key(&genre.id) {
            return Err(DataSourceError::InsertFailed {
                entity_type: EntityType::Genre,
                reason: "already exists".to_string(),
            }
            .into());
        }
        let index = catalog.genres.len();
        catalog.genre_index.insert(genre.id, index);
        catalog.genres.push(genre);
        Ok(())
    }

    /// Insert a performer row. Fails on duplicate id.
    pub fn insert_performer(&self, performer: Performer) -> AirtimeResult<()> {
        let mut catalog = self.inner.write().unwrap();
        if catalog.performer_index.contains_key(&performer.id) {
            return Err(DataSourceError::InsertFailed {
                entity_type: EntityType::Performer,
                reason: "already exists".to_string(),
            }
            .into());
        }
        let index = catalog.performers.len();
        catalog.performer_index.insert(performer.id, index);
        catalog.performers.push(performer);
        Ok(())
    }

    /// Insert a track row. Fails on duplicate id or an unresolved
    /// genre/performer reference.
    pub fn insert_track(&self, track: Track) -> AirtimeResult<()> {
        let mut catalog = self.inner.write().unwrap();
        if catalog.tracks.iter().any(|t| t.id == track.id) {
            return Err(DataSourceError::InsertFailed {
                entity_type: EntityType::Track,
                reason: "already exists".to_string(),
            }
            .into());
        }
        if !catalog.genre_index.contains_key(&track.genre_id) {
            return Err(DataSourceError::ReferenceViolation {
                entity_type: EntityType::Genre,
                id: track.genre_id,
            }
            .into());
        }
        if !catalog.performer_index.contains_key(&track.performer_id) {
            return Err(DataSourceError::ReferenceViolation {
                entity_type: EntityType::Performer,
                id: track.performer_id,
            }
            .into());
        }
        catalog.tracks.push(track);
        Ok(())
    }

    /// Number of track rows currently stored.
    pub fn track_count(&self) -> usize {
        self.inner.read().unwrap().tracks.len()
    }
}

impl DataSource for InMemoryDataSource {
    fn genres(&self, limit: usize) -> AirtimeResult<Vec<Genre>> {
        let catalog = self.inner.read().unwrap();
        Ok(catalog.genres.iter().take(limit).cloned().collect())
    }

    fn performers(&self, limit: usize) -> AirtimeResult<Vec<Performer>> {
        let catalog = self.inner.read().unwrap();
        Ok(catalog.performers.iter().take(limit).cloned().collect())
    }

    fn tracks_with_relations(&self, limit: usize) -> AirtimeResult<Vec<TrackRecord>> {
        let catalog = self.inner.read().unwrap();
        catalog
            .tracks
            .iter()
            .take(limit)
            .map(|t| catalog.join(t))
            .collect()
    }

    fn all_tracks_with_relations(&self) -> AirtimeResult<Vec<TrackRecord>> {
        let catalog = self.inner.read().unwrap();
        catalog.tracks.iter().map(|t| catalog.join(t)).collect()
    }
}
