//! Abstract storage traits for heroclash.
//!
//! The hero store is a read-only provider of hero records by id. The
//! comparison core never talks to it directly; the request boundary in
//! [`crate::engine`] resolves ids first and only then compares.

use thiserror::Error;

use crate::hero::{Hero, HeroId};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Two records share an id.
    #[error("Duplicate hero id: {0}")]
    DuplicateKey(HeroId),

    /// Backend error.
    #[error("Storage backend error: {0}")]
    BackendError(String),

    /// The snapshot could not be decoded.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The snapshot could not be read.
    #[error("I/O error reading {path}: {message}")]
    Io {
        /// Path being read.
        path: String,
        /// Underlying error message.
        message: String,
    },
}

/// Storage trait for hero lookups.
///
/// Implementations must be safe to share across request handlers.
pub trait HeroStore: Send + Sync {
    /// Get a hero by id. `Ok(None)` is the explicit "not found" signal.
    fn get(&self, id: HeroId) -> Result<Option<Hero>, StorageError>;

    /// All heroes, in snapshot order.
    fn list(&self) -> Result<Vec<Hero>, StorageError>;

    /// Number of heroes.
    fn count(&self) -> Result<usize, StorageError>;
}
