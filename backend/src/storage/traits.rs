//! # Storage Traits
//!
//! Defines the storage abstraction the domain layer depends on, so that
//! different backends (JSON file, database, in-memory) can be swapped
//! without touching the services.

use anyhow::Result;
use shared::TrackerDocument;

/// Trait defining the interface for document storage operations.
///
/// The tracker persists one document per data directory; the whole
/// document is the unit of persistence. There is no partial-field update
/// contract — every write replaces the stored record completely, so a
/// race between two writers resolves to last-write-wins rather than an
/// interleaved document.
pub trait DocumentStorage: Send + Sync {
    /// Load the stored document, or the default empty document when none
    /// has been written yet.
    fn load_document(&self) -> Result<TrackerDocument>;

    /// Replace the stored document wholesale.
    fn save_document(&self, document: &TrackerDocument) -> Result<()>;
}
