//! # heroclash - head-to-head superhero comparisons
//!
//! heroclash scores two superhero records across six fixed powerstats and
//! returns a structured verdict, and models how a user narrows a roster down
//! to exactly two heroes to compare.
//!
//! ## Core Concepts
//!
//! - **Hero**: a record with an id, name, image and loosely typed powerstats
//! - **Powerstat**: one of six canonical attributes, compared in a fixed order
//! - **Comparison**: per-category winners plus a majority-of-categories verdict
//! - **Selection**: a bounded (at most two) ordered pick of heroes, oldest evicted first
//!
//! ## Usage
//!
//! ```rust
//! use heroclash::{compare, Hero, HeroId, Powerstats, Selection, Side};
//!
//! let a = Hero::new(1u64, "A-Bomb").with_powerstats(Powerstats::from([38, 100, 17, 80, 24, 64]));
//! let b = Hero::new(2u64, "Brainwave").with_powerstats(Powerstats::from([100, 18, 23, 28, 32, 32]));
//!
//! let selection = Selection::new().toggle(a.id).toggle(b.id);
//! assert!(selection.is_ready());
//!
//! let verdict = compare(&a, &b);
//! assert_eq!(verdict.overall_winner, Side::Tie);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Core: schema, records and the two pure state machines
pub mod compare;
pub mod error;
pub mod hero;
pub mod powerstat;
pub mod selection;
pub mod value;

// Surroundings: storage, request boundary, sessions, configuration
pub mod config;
pub mod engine;
pub mod session;
pub mod storage;

#[cfg(feature = "transport-http")]
pub mod transport;

// Re-export primary types at crate root for convenience
pub use compare::{compare, compare_powerstats, CategoryResult, ComparisonResult, Side};
pub use error::{ConfigError, ExecutionError, HeroError, HeroResult, ValidationError};
pub use hero::{Hero, HeroId};
pub use powerstat::{Powerstat, Powerstats};
pub use selection::{Selection, SelectionEvent};
pub use value::{Score, StatValue};

pub use engine::HeroEngine;
pub use session::{SessionId, SessionRegistry, SessionSnapshot};
pub use storage::{HeroStore, InMemoryHeroStore, StorageError};
