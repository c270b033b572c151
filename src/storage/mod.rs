//! Hero storage.
//!
//! The [`HeroStore`] trait is the lookup contract; [`InMemoryHeroStore`] is
//! the backend, populated from a JSON snapshot.

mod memory;
mod snapshot;
mod traits;

pub use memory::InMemoryHeroStore;
pub use snapshot::{load_snapshot, parse_snapshot, Snapshot, SnapshotInfo};
pub use traits::{HeroStore, StorageError};
