//! airtime test utilities
//!
//! Centralized test infrastructure for the airtime workspace:
//! - Row constructors for catalog entities
//! - Seeded in-memory catalogs for common scenarios
//! - A call-counting DataSource decorator for cache-behavior assertions

// Re-export the reference store and core types for convenience
pub use airtime_core::{
    AirtimeError, AirtimeResult, DataSourceError, EntityType, Genre, GenreId, HomeSnapshot,
    Performer, PerformerId, Track, TrackId, TrackRecord, TrackView,
};
pub use airtime_storage::{CacheStats, CacheStore, DataSource, InMemoryDataSource, MemoryCache};

use chrono::NaiveDate;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

// ============================================================================
// ROW CONSTRUCTORS
// ============================================================================

pub fn genre(id: GenreId, name: &str) -> Genre {
    Genre {
        id,
        name: name.to_string(),
    }
}

pub fn performer(id: PerformerId, name: &str, is_group: bool) -> Performer {
    Performer {
        id,
        name: name.to_string(),
        is_group,
    }
}

pub fn track(id: TrackId, name: &str, genre_id: GenreId, performer_id: PerformerId) -> Track {
    Track {
        id,
        name: name.to_string(),
        duration: Duration::from_secs(180 + id as u64),
        creation_date: NaiveDate::from_ymd_opt(1990, 6, 1).unwrap(),
        rating: 3.5,
        genre_id,
        performer_id,
    }
}

// ============================================================================
// SEEDED CATALOGS
// ============================================================================

/// Small curated catalog used across the workspace tests.
///
/// Genres carry a duplicated name ("Rock" twice under distinct ids) so
/// distinct-name contracts are observable, and performers include both an
/// exact and a differently-cased prefix sibling ("ABBA", "Abba Cover
/// Band") for case-folded search assertions.
pub fn sample_catalog() -> InMemoryDataSource {
    let source = InMemoryDataSource::new();

    source.insert_genre(genre(1, "Rock")).unwrap();
    source.insert_genre(genre(2, "Rock")).unwrap();
    source.insert_genre(genre(3, "Jazz")).unwrap();

    source.insert_performer(performer(1, "ABBA", true)).unwrap();
    source
        .insert_performer(performer(2, "Abba Cover Band", true))
        .unwrap();
    source.insert_performer(performer(3, "Queen", true)).unwrap();

    source.insert_track(track(1, "Waterloo", 1, 1)).unwrap();
    source.insert_track(track(2, "Waterloo Again", 1, 2)).unwrap();
    source
        .insert_track(track(3, "Bohemian Rhapsody", 1, 3))
        .unwrap();
    source.insert_track(track(4, "Take Five", 3, 3)).unwrap();

    source
}

/// Catalog with `rows` genres, performers, and tracks, for limit-bound
/// assertions.
pub fn large_catalog(rows: usize) -> InMemoryDataSource {
    let source = InMemoryDataSource::new();
    for i in 0..rows as i64 {
        source.insert_genre(genre(i + 1, &format!("Genre {i}"))).unwrap();
        source
            .insert_performer(performer(i + 1, &format!("Performer {i}"), i % 2 == 0))
            .unwrap();
    }
    for i in 0..rows as i64 {
        source
            .insert_track(track(i + 1, &format!("Track {i}"), i + 1, i + 1))
            .unwrap();
    }
    source
}

// ============================================================================
// COUNTING DECORATOR
// ============================================================================

/// DataSource decorator that counts calls to each read method.
///
/// Cache-behavior tests wrap a real source in this to observe whether a
/// query was served from the cache or re-executed underneath it.
pub struct CountingDataSource<D> {
    inner: D,
    genre_calls: AtomicUsize,
    performer_calls: AtomicUsize,
    track_calls: AtomicUsize,
}

impl<D: DataSource> CountingDataSource<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            genre_calls: AtomicUsize::new(0),
            performer_calls: AtomicUsize::new(0),
            track_calls: AtomicUsize::new(0),
        }
    }

    /// Total reads across all methods.
    pub fn fetch_count(&self) -> usize {
        self.genre_calls.load(Ordering::SeqCst)
            + self.performer_calls.load(Ordering::SeqCst)
            + self.track_calls.load(Ordering::SeqCst)
    }

    /// Number of joined-track reads (limited and unlimited).
    pub fn track_fetch_count(&self) -> usize {
        self.track_calls.load(Ordering::SeqCst)
    }
}

impl<D: DataSource> DataSource for CountingDataSource<D> {
    fn genres(&self, limit: usize) -> AirtimeResult<Vec<Genre>> {
        self.genre_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.genres(limit)
    }

    fn performers(&self, limit: usize) -> AirtimeResult<Vec<Performer>> {
        self.performer_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.performers(limit)
    }

    fn tracks_with_relations(&self, limit: usize) -> AirtimeResult<Vec<TrackRecord>> {
        self.track_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.tracks_with_relations(limit)
    }

    fn all_tracks_with_relations(&self) -> AirtimeResult<Vec<TrackRecord>> {
        self.track_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.all_tracks_with_relations()
    }
}

/// DataSource that fails every read, for propagation tests.
#[derive(Default)]
pub struct FailingDataSource;

impl FailingDataSource {
    fn unavailable<T>(&self) -> AirtimeResult<T> {
        Err(DataSourceError::Unavailable {
            reason: "injected failure".to_string(),
        }
        .into())
    }
}

impl DataSource for FailingDataSource {
    fn genres(&self, _limit: usize) -> AirtimeResult<Vec<Genre>> {
        self.unavailable()
    }

    fn performers(&self, _limit: usize) -> AirtimeResult<Vec<Performer>> {
        self.unavailable()
    }

    fn tracks_with_relations(&self, _limit: usize) -> AirtimeResult<Vec<TrackRecord>> {
        self.unavailable()
    }

    fn all_tracks_with_relations(&self) -> AirtimeResult<Vec<TrackRecord>> {
        self.unavailable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_shape() {
        let source = sample_catalog();
        assert_eq!(source.genres(10).unwrap().len(), 3);
        assert_eq!(source.performers(10).unwrap().len(), 3);
        assert_eq!(source.all_tracks_with_relations().unwrap().len(), 4);
    }

    #[test]
    fn test_large_catalog_row_counts() {
        let source = large_catalog(25);
        assert_eq!(source.genres(100).unwrap().len(), 25);
        assert_eq!(source.performers(100).unwrap().len(), 25);
        assert_eq!(source.tracks_with_relations(100).unwrap().len(), 25);
    }

    #[test]
    fn test_counting_decorator_observes_reads() {
        let source = CountingDataSource::new(sample_catalog());
        assert_eq!(source.fetch_count(), 0);

        source.genres(5).unwrap();
        source.all_tracks_with_relations().unwrap();
        assert_eq!(source.fetch_count(), 2);
        assert_eq!(source.track_fetch_count(), 1);
    }

    #[test]
    fn test_failing_source_propagates_unavailable() {
        let source = FailingDataSource;
        let err = source.genres(1).unwrap_err();
        assert!(matches!(
            err,
            AirtimeError::DataSource(DataSourceError::Unavailable { .. })
        ));
    }
}
