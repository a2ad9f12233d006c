//! Distinct genre names for filter controls.

use std::collections::HashSet;
use std::sync::Arc;

use airtime_core::AirtimeResult;
use airtime_storage::DataSource;

/// Lists each distinct genre name exactly once.
///
/// Order is first occurrence in the source's natural order, so repeated
/// calls against unchanged data return the same sequence.
pub struct GenreCatalog<D: DataSource + ?Sized> {
    source: Arc<D>,
}

impl<D: DataSource + ?Sized> GenreCatalog<D> {
    pub fn new(source: Arc<D>) -> Self {
        Self { source }
    }

    /// Distinct genre names, deduplicated by exact name.
    pub fn genre_names(&self) -> AirtimeResult<Vec<String>> {
        let genres = self.source.genres(usize::MAX)?;

        let mut seen = HashSet::new();
        Ok(genres
            .into_iter()
            .filter(|g| seen.insert(g.name.clone()))
            .map(|g| g.name)
            .collect())
    }
}

impl<D: DataSource + ?Sized> Clone for GenreCatalog<D> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}
