//! Request boundary for hero lookups and comparisons.
//!
//! [`HeroEngine`] turns raw request input into calls on the pure core. It owns
//! the fatal-vs-recoverable decisions: malformed ids are rejected as invalid
//! requests before any lookup, unknown ids are reported as not found, and
//! [`compare`] only runs once both heroes exist.

use std::sync::Arc;

use tracing::debug;

use crate::compare::{compare, ComparisonResult};
use crate::error::{ExecutionError, HeroError, HeroResult};
use crate::hero::{Hero, HeroId};
use crate::powerstat::Powerstats;
use crate::selection::Selection;
use crate::storage::{HeroStore, StorageError};

/// Field name reported when the first identifier is invalid.
pub const ID1_FIELD: &str = "id1";
/// Field name reported when the second identifier is invalid.
pub const ID2_FIELD: &str = "id2";

/// Hero lookup and comparison service.
#[derive(Clone)]
pub struct HeroEngine {
    heroes: Arc<dyn HeroStore>,
}

impl HeroEngine {
    /// Create a new engine over the given store.
    #[must_use]
    pub fn new(heroes: Arc<dyn HeroStore>) -> Self {
        Self { heroes }
    }

    fn storage_err(err: StorageError) -> HeroError {
        HeroError::Execution(ExecutionError::Storage {
            message: err.to_string(),
        })
    }

    /// All heroes in snapshot order.
    pub fn heroes(&self) -> HeroResult<Vec<Hero>> {
        self.heroes.list().map_err(Self::storage_err)
    }

    /// Number of heroes in the store.
    pub fn hero_count(&self) -> HeroResult<usize> {
        self.heroes.count().map_err(Self::storage_err)
    }

    /// Looks up one hero.
    pub fn hero(&self, id: HeroId) -> HeroResult<Hero> {
        self.heroes
            .get(id)
            .map_err(Self::storage_err)?
            .ok_or_else(|| ExecutionError::HeroNotFound { id }.into())
    }

    /// Looks up one hero's raw powerstats.
    pub fn powerstats(&self, id: HeroId) -> HeroResult<Powerstats> {
        self.hero(id).map(|hero| hero.powerstats)
    }

    /// Fails with `HeroNotFound` unless `id` resolves.
    pub fn ensure_hero_exists(&self, id: HeroId) -> HeroResult<()> {
        match self.heroes.get(id).map_err(Self::storage_err)? {
            Some(_) => Ok(()),
            None => Err(ExecutionError::HeroNotFound { id }.into()),
        }
    }

    /// Compares two heroes given raw request identifiers.
    ///
    /// Missing or non-numeric identifiers fail with a validation error before
    /// the store is consulted.
    pub fn compare_raw(&self, id1: Option<&str>, id2: Option<&str>) -> HeroResult<ComparisonResult> {
        let id1 = HeroId::parse_required(ID1_FIELD, id1)?;
        let id2 = HeroId::parse_required(ID2_FIELD, id2)?;
        self.compare_ids(id1, id2)
    }

    /// Compares two heroes by id.
    ///
    /// If either id is unknown, fails with `ComparisonHeroesNotFound` listing
    /// every missing id and never runs the comparison. Equal ids are allowed
    /// and produce an all-tie result.
    pub fn compare_ids(&self, id1: HeroId, id2: HeroId) -> HeroResult<ComparisonResult> {
        let first = self.heroes.get(id1).map_err(Self::storage_err)?;
        let second = self.heroes.get(id2).map_err(Self::storage_err)?;

        let (first, second) = match (first, second) {
            (Some(first), Some(second)) => (first, second),
            (first, second) => {
                let mut missing: Vec<HeroId> = [(id1, first.is_none()), (id2, second.is_none())]
                    .into_iter()
                    .filter_map(|(id, absent)| absent.then_some(id))
                    .collect();
                missing.dedup();
                return Err(ExecutionError::ComparisonHeroesNotFound { missing }.into());
            }
        };

        let result = compare(&first, &second);
        debug!(%id1, %id2, winner = %result.overall_winner, "compared heroes");
        Ok(result)
    }

    /// Compares the pair held by a ready selection.
    pub fn compare_selection(&self, selection: &Selection) -> HeroResult<ComparisonResult> {
        let (id1, id2) = selection.pair().ok_or(ExecutionError::SelectionIncomplete {
            selected: selection.len(),
        })?;
        self.compare_ids(id1, id2)
    }
}
