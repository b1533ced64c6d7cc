//! # Storage Module
//!
//! Data persistence for the grade tracker. The persisted unit is the whole
//! tracker document; see [`traits::DocumentStorage`] for the contract and
//! [`json`] for the file-backed implementation.

pub mod json;
pub mod traits;

pub use json::{DocumentRepository, JsonConnection};
pub use traits::DocumentStorage;
