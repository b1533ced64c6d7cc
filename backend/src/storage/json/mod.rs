//! # JSON Storage Module
//!
//! Single-file JSON storage for the tracker document. The domain layer
//! only sees the [`DocumentStorage`](crate::storage::traits::DocumentStorage)
//! trait; this module provides the file-backed implementation used by the
//! running app.

pub mod connection;
pub mod document_repository;

pub use connection::JsonConnection;
pub use document_repository::DocumentRepository;
