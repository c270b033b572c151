//! The bounded selection state machine.
//!
//! A [`Selection`] holds at most two hero ids in insertion order. It changes
//! only through [`Selection::toggle`] and [`Selection::clear`]; both return a
//! new value and leave the old one untouched, so a selection can be treated
//! as reducer state (`old state + event -> new state`).
//!
//! Toggling a third hero evicts the oldest member. This sliding window is
//! observable to users and must not change to newest-evicted or rejection.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::hero::HeroId;

/// An event fed into the selection reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectionEvent {
    /// Select the hero, or deselect it if already selected.
    Toggle {
        /// The hero being toggled.
        hero_id: HeroId,
    },
    /// Reset to empty, e.g. when the user leaves the comparison view.
    Clear,
}

/// Ordered selection of at most [`Selection::CAPACITY`] distinct heroes.
///
/// # Examples
///
/// ```
/// use heroclash::{HeroId, Selection};
///
/// let [x, y, z] = [1, 2, 3].map(HeroId::new);
/// let selection = Selection::new().toggle(x).toggle(y).toggle(z);
/// assert_eq!(selection.ids(), &[y, z]);
/// assert!(selection.is_ready());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<HeroId>", into = "Vec<HeroId>")]
pub struct Selection {
    ids: Vec<HeroId>,
}

impl Selection {
    /// Maximum number of selected heroes.
    pub const CAPACITY: usize = 2;

    /// The empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a toggle.
    ///
    /// - selected already: removed
    /// - room left: appended
    /// - full: the oldest member is evicted and `id` appended
    #[must_use]
    pub fn toggle(&self, id: HeroId) -> Self {
        let mut ids = self.ids.clone();
        if let Some(pos) = ids.iter().position(|&selected| selected == id) {
            ids.remove(pos);
        } else {
            if ids.len() >= Self::CAPACITY {
                ids.remove(0);
            }
            ids.push(id);
        }
        Self { ids }
    }

    /// The empty selection.
    #[must_use]
    pub fn clear(&self) -> Self {
        Self::new()
    }

    /// Reduces one event.
    #[must_use]
    pub fn apply(&self, event: SelectionEvent) -> Self {
        match event {
            SelectionEvent::Toggle { hero_id } => self.toggle(hero_id),
            SelectionEvent::Clear => self.clear(),
        }
    }

    /// True when exactly two heroes are selected; gates comparison requests.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ids.len() == Self::CAPACITY
    }

    /// The selected pair, oldest first, if the selection is ready.
    #[must_use]
    pub fn pair(&self) -> Option<(HeroId, HeroId)> {
        match self.ids.as_slice() {
            [first, second] => Some((*first, *second)),
            _ => None,
        }
    }

    /// True if `id` is currently selected.
    #[must_use]
    pub fn contains(&self, id: HeroId) -> bool {
        self.ids.contains(&id)
    }

    /// Selected ids, oldest first.
    #[must_use]
    pub fn ids(&self) -> &[HeroId] {
        &self.ids
    }

    /// Number of selected heroes, at most [`Self::CAPACITY`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl TryFrom<Vec<HeroId>> for Selection {
    type Error = ValidationError;

    fn try_from(ids: Vec<HeroId>) -> Result<Self, Self::Error> {
        if ids.len() > Self::CAPACITY {
            return Err(ValidationError::InvalidSelection {
                reason: format!("{} heroes exceed capacity {}", ids.len(), Self::CAPACITY),
            });
        }
        if let [a, b] = ids.as_slice() {
            if a == b {
                return Err(ValidationError::InvalidSelection {
                    reason: format!("hero {a} selected twice"),
                });
            }
        }
        Ok(Self { ids })
    }
}

impl From<Selection> for Vec<HeroId> {
    fn from(selection: Selection) -> Self {
        selection.ids
    }
}
