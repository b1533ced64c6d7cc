//! # JSON Document Repository
//!
//! File-based storage for the tracker document. The whole document lives
//! in a single `database.json` inside the data directory and is replaced
//! wholesale on every save.
//!
//! ## File Structure
//!
//! ```text
//! data/
//! └── database.json    ← This module manages this file
//! ```
//!
//! ## Features
//!
//! - Missing file reads as the default empty document
//! - Lenient field parsing (numeric strings, junk values) via the shared model
//! - Atomic writes with a temp file + rename
//! - Fields owned by other layers (academic years, theme) survive round-trips

use anyhow::{Context, Result};
use log::{debug, info};
use shared::TrackerDocument;
use std::fs;

use super::connection::JsonConnection;
use crate::storage::traits::DocumentStorage;

/// JSON-file-backed document repository.
#[derive(Clone)]
pub struct DocumentRepository {
    connection: JsonConnection,
}

impl DocumentRepository {
    /// Create a new document repository over a connection.
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl DocumentStorage for DocumentRepository {
    fn load_document(&self) -> Result<TrackerDocument> {
        let path = self.connection.database_file_path();

        if !path.exists() {
            debug!("No document at {}, starting empty", path.display());
            return Ok(TrackerDocument::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read document from {}", path.display()))?;
        let document: TrackerDocument = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse document at {}", path.display()))?;

        debug!(
            "Loaded document: {} classes, {} assignments",
            document.classes.len(),
            document.assignments.len()
        );
        Ok(document)
    }

    fn save_document(&self, document: &TrackerDocument) -> Result<()> {
        let path = self.connection.database_file_path();
        let temp_path = path.with_extension("json.tmp");

        let contents = serde_json::to_string_pretty(document)
            .context("Failed to serialize document")?;

        // Write to a temporary file first, then rename into place, so a
        // crash mid-write never leaves a truncated document behind.
        fs::write(&temp_path, contents)
            .with_context(|| format!("Failed to write document to {}", temp_path.display()))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to replace document at {}", path.display()))?;

        info!(
            "Saved document: {} classes, {} assignments",
            document.classes.len(),
            document.assignments.len()
        );
        Ok(())
    }
}
