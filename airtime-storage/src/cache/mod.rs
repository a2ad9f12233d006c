//! Process-wide cache layer with per-entry absolute expiration.
//!
//! The store is deliberately small: string keys, set-with-TTL, and a get
//! where expired entries behave exactly like absent ones. Absence is the
//! only "failure" a caller can observe; infrastructure never leaks through
//! this interface.
//!
//! Values are stored by clone. Callers that cache large aggregates wrap
//! them in `Arc` so a hit hands out a shared reference instead of a copy,
//! and readers can never mutate what other requests see.

pub mod memory;
pub mod traits;

pub use memory::MemoryCache;
pub use traits::{CacheStats, CacheStore};
