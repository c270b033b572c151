//! JSON hero snapshots.
//!
//! A snapshot file is a JSON array of hero records. Loading it yields an
//! [`InMemoryHeroStore`] plus [`SnapshotInfo`] describing what was loaded: a
//! BLAKE3 fingerprint of the raw bytes, the hero count and the load time.
//! Malformed powerstats are accepted as-is; duplicate ids are not.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::hero::Hero;
use crate::storage::memory::InMemoryHeroStore;
use crate::storage::traits::StorageError;

/// Metadata about a loaded snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotInfo {
    /// Hex-encoded BLAKE3 hash of the snapshot bytes.
    pub fingerprint: String,
    /// Number of heroes loaded.
    pub hero_count: usize,
    /// When the snapshot was parsed.
    pub loaded_at: DateTime<Utc>,
}

/// A loaded snapshot.
#[derive(Debug)]
pub struct Snapshot {
    /// The loaded heroes.
    pub store: InMemoryHeroStore,
    /// What was loaded, and when.
    pub info: SnapshotInfo,
}

/// Parses snapshot bytes.
pub fn parse_snapshot(bytes: &[u8]) -> Result<Snapshot, StorageError> {
    let heroes: Vec<Hero> = serde_json::from_slice(bytes)
        .map_err(|e| StorageError::SerializationError(format!("invalid hero snapshot: {e}")))?;

    let hero_count = heroes.len();
    let with_defaults = heroes
        .iter()
        .filter(|hero| !hero.powerstats.defaulted().is_empty())
        .count();
    if with_defaults > 0 {
        debug!(with_defaults, "heroes with missing or malformed powerstats (read as 0)");
    }

    let store = InMemoryHeroStore::from_heroes(heroes)?;
    let info = SnapshotInfo {
        fingerprint: blake3::hash(bytes).to_hex().to_string(),
        hero_count,
        loaded_at: Utc::now(),
    };
    Ok(Snapshot { store, info })
}

/// Reads and parses a snapshot file.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Snapshot, StorageError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| StorageError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let snapshot = parse_snapshot(&bytes)?;
    info!(
        path = %path.display(),
        heroes = snapshot.info.hero_count,
        fingerprint = %snapshot.info.fingerprint,
        "loaded hero snapshot"
    );
    Ok(snapshot)
}
