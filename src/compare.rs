//! The comparison engine.
//!
//! [`compare`] scores two heroes across the six canonical powerstats and
//! derives a per-category and an overall winner. It is pure: no I/O, no
//! shared state, and it never fails. Malformed stat data reads as zero
//! through [`StatValue::safe_numeric`](crate::value::StatValue::safe_numeric).
//!
//! The serialized shape of [`ComparisonResult`] is a compatibility surface:
//! field names, category order and the `1 | 2 | "tie"` winner domain are
//! consumed verbatim by renderers.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hero::{Hero, HeroId};
use crate::powerstat::{Powerstat, Powerstats};
use crate::value::Score;

/// Which side of a comparison won.
///
/// Serialized as `1`, `2` or `"tie"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SideRepr", into = "SideRepr")]
pub enum Side {
    /// The first hero (`id1`).
    First,
    /// The second hero (`id2`).
    Second,
    /// Neither side.
    Tie,
}

impl Side {
    /// The same outcome seen from the other side.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
            Self::Tie => Self::Tie,
        }
    }

    fn from_ordering(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Greater => Self::First,
            Ordering::Less => Self::Second,
            Ordering::Equal => Self::Tie,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "1"),
            Self::Second => write!(f, "2"),
            Self::Tie => write!(f, "tie"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum SideRepr {
    Number(u8),
    Text(String),
}

impl TryFrom<SideRepr> for Side {
    type Error = String;

    fn try_from(value: SideRepr) -> Result<Self, Self::Error> {
        match value {
            SideRepr::Number(1) => Ok(Self::First),
            SideRepr::Number(2) => Ok(Self::Second),
            SideRepr::Text(s) if s == "tie" => Ok(Self::Tie),
            SideRepr::Number(n) => Err(format!("invalid winner: {n}")),
            SideRepr::Text(s) => Err(format!("invalid winner: {s:?}")),
        }
    }
}

impl From<Side> for SideRepr {
    fn from(value: Side) -> Self {
        match value {
            Side::First => Self::Number(1),
            Side::Second => Self::Number(2),
            Side::Tie => Self::Text("tie".to_string()),
        }
    }
}

/// Outcome of one powerstat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResult {
    /// The powerstat compared.
    pub name: Powerstat,
    /// Normalized value for the first hero.
    pub id1_value: Score,
    /// Normalized value for the second hero.
    pub id2_value: Score,
    /// Strictly greater value wins; equal values tie.
    pub winner: Side,
}

/// Full comparison verdict between two heroes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// The first hero, as requested.
    pub id1: HeroId,
    /// The second hero, as requested.
    pub id2: HeroId,
    /// One entry per powerstat, in canonical order.
    pub categories: Vec<CategoryResult>,
    /// Side with more category wins; `Tie` when the counts are equal.
    pub overall_winner: Side,
}

impl ComparisonResult {
    /// Number of categories won by `side`. For `Side::Tie`, the number of tied categories.
    #[must_use]
    pub fn wins(&self, side: Side) -> usize {
        self.categories.iter().filter(|c| c.winner == side).count()
    }

    /// The same comparison with the two heroes swapped.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        Self {
            id1: self.id2,
            id2: self.id1,
            categories: self
                .categories
                .iter()
                .map(|c| CategoryResult {
                    name: c.name,
                    id1_value: c.id2_value,
                    id2_value: c.id1_value,
                    winner: c.winner.flip(),
                })
                .collect(),
            overall_winner: self.overall_winner.flip(),
        }
    }
}

/// Compares two heroes.
///
/// # Examples
///
/// ```
/// use heroclash::{compare, Hero, Powerstats, Side};
///
/// let a = Hero::new(1u64, "A").with_powerstats(Powerstats::from([38, 100, 17, 80, 24, 64]));
/// let b = Hero::new(2u64, "B").with_powerstats(Powerstats::from([100, 18, 23, 28, 32, 32]));
///
/// let result = compare(&a, &b);
/// assert_eq!(result.categories.len(), 6);
/// assert_eq!(result.overall_winner, Side::Tie);
/// ```
#[must_use]
pub fn compare(first: &Hero, second: &Hero) -> ComparisonResult {
    compare_powerstats(first.id, &first.powerstats, second.id, &second.powerstats)
}

/// Compares two raw powerstat mappings on behalf of `id1` and `id2`.
#[must_use]
pub fn compare_powerstats(
    id1: HeroId,
    first: &Powerstats,
    id2: HeroId,
    second: &Powerstats,
) -> ComparisonResult {
    let categories: Vec<CategoryResult> = Powerstat::ALL
        .into_iter()
        .map(|stat| {
            let v1 = first.score(stat);
            let v2 = second.score(stat);
            CategoryResult {
                name: stat,
                id1_value: v1,
                id2_value: v2,
                winner: Side::from_ordering(v1.cmp_finite(v2)),
            }
        })
        .collect();

    let (first_wins, second_wins) =
        categories
            .iter()
            .fold((0usize, 0usize), |(a, b), c| match c.winner {
                Side::First => (a + 1, b),
                Side::Second => (a, b + 1),
                Side::Tie => (a, b),
            });

    ComparisonResult {
        id1,
        id2,
        categories,
        overall_winner: Side::from_ordering(first_wins.cmp(&second_wins)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::StatValue;
    use serde_json::json;

    fn hero(id: u64, stats: [u8; 6]) -> Hero {
        Hero::new(id, format!("hero-{id}")).with_powerstats(Powerstats::from(stats))
    }

    fn winners(result: &ComparisonResult) -> Vec<Side> {
        result.categories.iter().map(|c| c.winner).collect()
    }

    #[test]
    fn test_split_decision_is_overall_tie() {
        let a = hero(1, [38, 100, 17, 80, 24, 64]);
        let b = hero(2, [100, 18, 23, 28, 32, 32]);
        let result = compare(&a, &b);

        use Side::{First, Second};
        assert_eq!(winners(&result), vec![Second, First, Second, First, Second, First]);
        assert_eq!(result.wins(First), 3);
        assert_eq!(result.wins(Second), 3);
        assert_eq!(result.overall_winner, Side::Tie);
    }

    #[test]
    fn test_majority_not_magnitude() {
        // B wins one category by a mile, A wins two narrowly.
        let a = hero(1, [51, 51, 0, 0, 0, 0]);
        let b = hero(2, [50, 50, 100, 0, 0, 0]);
        let result = compare(&a, &b);
        assert_eq!(result.wins(Side::First), 2);
        assert_eq!(result.wins(Side::Second), 1);
        assert_eq!(result.wins(Side::Tie), 3);
        assert_eq!(result.overall_winner, Side::First);
    }

    #[test]
    fn test_categories_follow_canonical_order() {
        let result = compare(&hero(1, [1; 6]), &hero(2, [2; 6]));
        let names: Vec<Powerstat> = result.categories.iter().map(|c| c.name).collect();
        assert_eq!(names, Powerstat::ALL.to_vec());
        assert_eq!(result.overall_winner, Side::Second);
    }

    #[test]
    fn test_same_hero_is_all_tie() {
        let a = hero(7, [10, 20, 30, 40, 50, 60]);
        let result = compare(&a, &a);
        assert!(result.categories.iter().all(|c| c.winner == Side::Tie));
        assert_eq!(result.overall_winner, Side::Tie);
        assert_eq!(result.id1, result.id2);
    }

    #[test]
    fn test_missing_and_garbage_read_as_zero() {
        let mut stats = Powerstats::new();
        stats.set(Powerstat::Intelligence, StatValue::Missing);
        stats.set(Powerstat::Strength, "invalid");
        stats.set(Powerstat::Speed, StatValue::Invalid(json!({"x": 1})));
        stats.set(Powerstat::Durability, "15");
        let a = Hero::new(1u64, "Sparse").with_powerstats(stats);
        let b = hero(2, [0, 0, 0, 10, 0, 0]);

        let result = compare(&a, &b);
        assert_eq!(result.categories.len(), 6);
        assert_eq!(result.categories[0].id1_value, Score::ZERO);
        assert_eq!(result.categories[1].id1_value, Score::ZERO);
        assert_eq!(result.categories[3].id1_value, Score::new(15.0));
        assert_eq!(result.wins(Side::First), 1);
        assert_eq!(result.wins(Side::Tie), 5);
        assert_eq!(result.overall_winner, Side::First);
    }

    #[test]
    fn test_empty_heroes_tie_everywhere() {
        let result = compare(&Hero::new(1u64, "a"), &Hero::new(2u64, "b"));
        assert_eq!(result.wins(Side::Tie), 6);
        assert_eq!(result.overall_winner, Side::Tie);
    }

    #[test]
    fn test_mirrored_matches_swapped_compare() {
        let a = hero(1, [90, 5, 50, 50, 12, 0]);
        let b = hero(2, [10, 95, 50, 49, 13, 1]);
        assert_eq!(compare(&a, &b).mirrored(), compare(&b, &a));
    }

    #[test]
    fn test_side_serialization() {
        assert_eq!(serde_json::to_value(Side::First).unwrap(), json!(1));
        assert_eq!(serde_json::to_value(Side::Second).unwrap(), json!(2));
        assert_eq!(serde_json::to_value(Side::Tie).unwrap(), json!("tie"));
        assert_eq!(serde_json::from_value::<Side>(json!(2)).unwrap(), Side::Second);
        assert!(serde_json::from_value::<Side>(json!(3)).is_err());
        assert!(serde_json::from_value::<Side>(json!("draw")).is_err());
    }

    #[test]
    fn test_result_wire_shape() {
        let a = hero(1, [38, 100, 17, 80, 24, 64]);
        let b = hero(2, [100, 18, 23, 28, 32, 32]);
        let value = serde_json::to_value(compare(&a, &b)).unwrap();

        assert_eq!(value["id1"], json!(1));
        assert_eq!(value["id2"], json!(2));
        assert_eq!(value["overall_winner"], json!("tie"));
        assert_eq!(
            value["categories"][0],
            json!({"name": "intelligence", "id1_value": 38, "id2_value": 100, "winner": 2})
        );
        assert_eq!(
            value["categories"][5],
            json!({"name": "combat", "id1_value": 64, "id2_value": 32, "winner": 1})
        );
    }
}
