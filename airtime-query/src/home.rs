//! Read-through cached home aggregate.

use std::sync::Arc;

use airtime_core::{AirtimeResult, HomeSnapshot, TrackView};
use airtime_storage::{CacheStore, DataSource};

use crate::config::HomeQueryConfig;

/// Serves the landing-page aggregate through a read-through TTL cache.
///
/// On a hit the cached `Arc` is returned without touching the data
/// source; on a miss the three limited queries run, the snapshot is
/// assembled, stored, and returned. Concurrent cold misses may each
/// rebuild; the last `set` wins, which is harmless because every rebuild
/// reflects the same read-only data.
///
/// # Type Parameters
///
/// - `D`: the data source queried on cache miss
/// - `C`: the cache store holding `Arc<HomeSnapshot>` values
pub struct HomeQueryService<D, C>
where
    D: DataSource + ?Sized,
    C: CacheStore<Arc<HomeSnapshot>> + ?Sized,
{
    source: Arc<D>,
    cache: Arc<C>,
    config: HomeQueryConfig,
}

impl<D, C> HomeQueryService<D, C>
where
    D: DataSource + ?Sized,
    C: CacheStore<Arc<HomeSnapshot>> + ?Sized,
{
    /// Create a new home query service.
    pub fn new(source: Arc<D>, cache: Arc<C>, config: HomeQueryConfig) -> Self {
        Self {
            source,
            cache,
            config,
        }
    }

    /// Create a new home query service with default configuration.
    pub fn with_defaults(source: Arc<D>, cache: Arc<C>) -> Self {
        Self::new(source, cache, HomeQueryConfig::default())
    }

    /// Get the service configuration.
    pub fn config(&self) -> &HomeQueryConfig {
        &self.config
    }

    /// Return the home aggregate for `cache_key`, building and caching it
    /// on miss.
    ///
    /// The key is caller-supplied so embedders (and tests) can use
    /// isolated keys. The returned snapshot is immutable and shared; a
    /// caller that abandons its request simply drops the `Arc` without
    /// affecting cache state.
    pub fn home_snapshot(&self, cache_key: &str) -> AirtimeResult<Arc<HomeSnapshot>> {
        if let Some(snapshot) = self.cache.get(cache_key) {
            tracing::debug!(key = cache_key, "home snapshot served from cache");
            return Ok(snapshot);
        }

        let limit = self.config.row_limit;
        let genres = self.source.genres(limit)?;
        let performers = self.source.performers(limit)?;
        let tracks: Vec<TrackView> = self
            .source
            .tracks_with_relations(limit)?
            .iter()
            .map(TrackView::from_record)
            .collect();

        tracing::info!(
            key = cache_key,
            genres = genres.len(),
            performers = performers.len(),
            tracks = tracks.len(),
            "rebuilt home snapshot"
        );

        let snapshot = Arc::new(HomeSnapshot {
            genres,
            performers,
            tracks,
        });
        // The assembled snapshot itself goes into the cache, so every
        // reader inside the TTL window shares this exact allocation.
        self.cache
            .set(cache_key, Arc::clone(&snapshot), self.config.ttl);

        Ok(snapshot)
    }
}

impl<D, C> Clone for HomeQueryService<D, C>
where
    D: DataSource + ?Sized,
    C: CacheStore<Arc<HomeSnapshot>> + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            cache: Arc::clone(&self.cache),
            config: self.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airtime_test_utils::{
        large_catalog, sample_catalog, AirtimeError, CountingDataSource, DataSourceError,
        FailingDataSource, InMemoryDataSource, MemoryCache,
    };
    use std::thread;
    use std::time::Duration;

    type SnapshotCache = MemoryCache<Arc<HomeSnapshot>>;
    type CountingSource = CountingDataSource<InMemoryDataSource>;

    fn service_over(
        source: CountingSource,
        config: HomeQueryConfig,
    ) -> (
        HomeQueryService<CountingSource, SnapshotCache>,
        Arc<CountingSource>,
        Arc<SnapshotCache>,
    ) {
        let source = Arc::new(source);
        let cache = Arc::new(SnapshotCache::new());
        let service = HomeQueryService::new(Arc::clone(&source), Arc::clone(&cache), config);
        (service, source, cache)
    }

    #[test]
    fn test_second_call_is_a_cache_hit() {
        let (service, source, _) = service_over(
            CountingDataSource::new(sample_catalog()),
            HomeQueryConfig::default(),
        );

        let first = service.home_snapshot("home").unwrap();
        let fetches_after_first = source.fetch_count();
        let second = service.home_snapshot("home").unwrap();

        // Bit-identical aggregates, and no further source reads.
        assert_eq!(
            serde_json::to_string(&*first).unwrap(),
            serde_json::to_string(&*second).unwrap()
        );
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.fetch_count(), fetches_after_first);
    }

    #[test]
    fn test_expired_snapshot_is_rebuilt() {
        let (service, source, _) = service_over(
            CountingDataSource::new(sample_catalog()),
            HomeQueryConfig::new().with_ttl(Duration::from_millis(10)),
        );

        service.home_snapshot("home").unwrap();
        assert_eq!(source.fetch_count(), 3);

        thread::sleep(Duration::from_millis(30));
        service.home_snapshot("home").unwrap();
        assert_eq!(source.fetch_count(), 6);
    }

    #[test]
    fn test_row_limit_bounds_every_collection() {
        let (service, _, _) = service_over(
            CountingDataSource::new(large_catalog(25)),
            HomeQueryConfig::default(),
        );

        let snapshot = service.home_snapshot("home").unwrap();
        assert_eq!(snapshot.genres.len(), 20);
        assert_eq!(snapshot.performers.len(), 20);
        assert_eq!(snapshot.tracks.len(), 20);
    }

    #[test]
    fn test_cached_value_is_the_returned_snapshot() {
        // The snapshot handed back must be the exact value stored, not a
        // placeholder left over from before assembly.
        let (service, _, cache) = service_over(
            CountingDataSource::new(sample_catalog()),
            HomeQueryConfig::default(),
        );

        let returned = service.home_snapshot("home").unwrap();
        let cached = cache.get("home").expect("snapshot was cached");

        assert!(Arc::ptr_eq(&returned, &cached));
        assert!(!cached.is_empty());
        assert_eq!(cached.tracks[0].performer, "ABBA");
    }

    #[test]
    fn test_distinct_keys_are_isolated() {
        let (service, source, _) = service_over(
            CountingDataSource::new(sample_catalog()),
            HomeQueryConfig::default(),
        );

        service.home_snapshot("home-a").unwrap();
        service.home_snapshot("home-b").unwrap();
        // Two keys, two rebuilds.
        assert_eq!(source.fetch_count(), 6);
    }

    #[test]
    fn test_track_views_carry_joined_names() {
        let (service, _, _) = service_over(
            CountingDataSource::new(sample_catalog()),
            HomeQueryConfig::default(),
        );

        let snapshot = service.home_snapshot("home").unwrap();
        let view = &snapshot.tracks[2];
        assert_eq!(view.name, "Bohemian Rhapsody");
        assert_eq!(view.performer, "Queen");
        assert_eq!(view.genre, "Rock");
    }

    #[test]
    fn test_source_failure_propagates_unchanged() {
        let source = Arc::new(FailingDataSource);
        let cache = Arc::new(SnapshotCache::new());
        let service = HomeQueryService::with_defaults(source, Arc::clone(&cache));

        let err = service.home_snapshot("home").unwrap_err();
        assert!(matches!(
            err,
            AirtimeError::DataSource(DataSourceError::Unavailable { .. })
        ));
        // A failed rebuild must not poison the cache.
        assert!(cache.get("home").is_none());
    }

    #[test]
    fn test_concurrent_cold_misses_each_observe_full_snapshot() {
        let (service, source, _) = service_over(
            CountingDataSource::new(large_catalog(25)),
            HomeQueryConfig::default(),
        );
        let service = Arc::new(service);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let service = Arc::clone(&service);
            handles.push(thread::spawn(move || {
                let snapshot = service.home_snapshot("home").unwrap();
                assert_eq!(snapshot.genres.len(), 20);
                assert_eq!(snapshot.performers.len(), 20);
                assert_eq!(snapshot.tracks.len(), 20);
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        // Between one rebuild (warm winner) and eight (all raced).
        let rebuilds = source.track_fetch_count();
        assert!((1..=8).contains(&rebuilds), "rebuilds = {rebuilds}");
    }
}
