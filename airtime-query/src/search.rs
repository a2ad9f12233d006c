//! Uncached filtered track search.

use std::sync::Arc;

use airtime_core::{AirtimeResult, TrackRecord, TrackView};
use airtime_storage::DataSource;

/// Case-insensitive prefix search over performer and genre names.
///
/// Every call re-executes against the data source: result sets are too
/// numerous and variable to cache profitably under a key scheme like the
/// home aggregate's. Result order is the source's natural join order.
pub struct TrackSearch<D: DataSource + ?Sized> {
    source: Arc<D>,
}

impl<D: DataSource + ?Sized> TrackSearch<D> {
    pub fn new(source: Arc<D>) -> Self {
        Self { source }
    }

    /// Return every track whose performer name starts with `performer`
    /// and whose genre name starts with `genre`, both case-folded.
    ///
    /// Empty filters match everything. No pagination; all matches are
    /// returned.
    pub fn search_tracks(&self, performer: &str, genre: &str) -> AirtimeResult<Vec<TrackView>> {
        let performer = performer.to_lowercase();
        let genre = genre.to_lowercase();

        let matches: Vec<TrackView> = self
            .source
            .all_tracks_with_relations()?
            .iter()
            .filter(|record| matches_filters(record, &performer, &genre))
            .map(TrackView::from_record)
            .collect();

        tracing::debug!(
            performer = %performer,
            genre = %genre,
            matches = matches.len(),
            "track search executed"
        );

        Ok(matches)
    }
}

impl<D: DataSource + ?Sized> Clone for TrackSearch<D> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

/// Both filters must already be lowercased.
fn matches_filters(record: &TrackRecord, performer: &str, genre: &str) -> bool {
    record.performer.name.to_lowercase().starts_with(performer)
        && record.genre.name.to_lowercase().starts_with(genre)
}
