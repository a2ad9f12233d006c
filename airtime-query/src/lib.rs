//! airtime query - the synchronous query API behind the HTTP layer
//!
//! Three services, each constructed once with explicit `Arc` handles and
//! shared across request-handling threads:
//!
//! - [`HomeQueryService`] — the landing-page aggregate, served through a
//!   read-through TTL cache. The expensive fan-out (two limited list
//!   queries plus a limited join) is paid once per TTL window.
//! - [`TrackSearch`] — uncached case-insensitive prefix search over
//!   performer and genre names.
//! - [`GenreCatalog`] — distinct genre names for filter controls.
//!
//! No service retries or recovers locally; data-source failures surface
//! to the caller unchanged.

pub mod catalog;
pub mod config;
pub mod home;
pub mod search;

pub use catalog::GenreCatalog;
pub use config::{HomeQueryConfig, DEFAULT_ROW_LIMIT, HOME_TTL};
pub use home::HomeQueryService;
pub use search::TrackSearch;
