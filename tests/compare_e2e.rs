use std::path::PathBuf;
use std::sync::Arc;

use heroclash::storage::load_snapshot;
use heroclash::{
    ExecutionError, Hero, HeroEngine, HeroError, HeroId, InMemoryHeroStore, Powerstat, Powerstats,
    Score, Selection, Side, StatValue, ValidationError,
};

fn engine_with_heroes(heroes: Vec<Hero>) -> HeroEngine {
    let store = InMemoryHeroStore::from_heroes(heroes).unwrap();
    HeroEngine::new(Arc::new(store))
}

fn scenario_engine() -> HeroEngine {
    engine_with_heroes(vec![
        Hero::new(1u64, "A-Bomb").with_powerstats(Powerstats::from([38, 100, 17, 80, 24, 64])),
        Hero::new(2u64, "Brainwave").with_powerstats(Powerstats::from([100, 18, 23, 28, 32, 32])),
    ])
}

#[test]
fn split_decision_yields_overall_tie() {
    let result = scenario_engine().compare_raw(Some("1"), Some("2")).unwrap();

    let expected = [
        (Powerstat::Intelligence, Side::Second),
        (Powerstat::Strength, Side::First),
        (Powerstat::Speed, Side::Second),
        (Powerstat::Durability, Side::First),
        (Powerstat::Power, Side::Second),
        (Powerstat::Combat, Side::First),
    ];
    let actual: Vec<(Powerstat, Side)> = result.categories.iter().map(|c| (c.name, c.winner)).collect();
    assert_eq!(actual, expected);
    assert_eq!(result.overall_winner, Side::Tie);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["overall_winner"], "tie");
    assert_eq!(json["categories"][1]["winner"], 1);
    assert_eq!(json["categories"][1]["id1_value"], 100);
}

#[test]
fn missing_or_non_numeric_id_is_invalid_request() {
    let engine = scenario_engine();

    for (id1, id2) in [(None, Some("2")), (Some("abc"), Some("2")), (Some(""), Some("2"))] {
        let err = engine.compare_raw(id1, id2).unwrap_err();
        assert!(err.is_validation(), "{id1:?}: {err}");
        assert!(!err.is_not_found());
    }

    let err = engine.compare_raw(Some("1"), Some("two")).unwrap_err();
    assert!(matches!(
        err,
        HeroError::Validation(ValidationError::InvalidId { ref field, .. }) if field == "id2"
    ));
}

#[test]
fn unknown_id2_is_not_found_and_never_compared() {
    let err = scenario_engine().compare_raw(Some("1"), Some("999")).unwrap_err();
    assert!(err.is_not_found());
    assert!(!err.is_validation());
    assert!(err.to_string().contains("One or both superheroes not found"));
    assert!(matches!(
        err,
        HeroError::Execution(ExecutionError::ComparisonHeroesNotFound { ref missing })
            if missing == &[HeroId::new(999)]
    ));
}

#[test]
fn malformed_stats_degrade_to_zero_without_skipping() {
    let mut patchy = Powerstats::new();
    patchy.set(Powerstat::Intelligence, StatValue::Missing);
    patchy.set(Powerstat::Strength, "invalid");
    patchy.set(Powerstat::Speed, "55");
    // durability, power, combat absent entirely

    let engine = engine_with_heroes(vec![
        Hero::new(10u64, "Patchy").with_powerstats(patchy),
        Hero::new(11u64, "Zero").with_powerstats(Powerstats::from([0, 0, 0, 0, 0, 0])),
    ]);
    let result = engine.compare_ids(HeroId::new(10), HeroId::new(11)).unwrap();

    assert_eq!(result.categories.len(), 6);
    assert!(result
        .categories
        .iter()
        .filter(|c| c.name != Powerstat::Speed)
        .all(|c| c.winner == Side::Tie && c.id1_value == Score::ZERO));
    assert_eq!(result.categories[2].id1_value, Score::new(55.0));
    assert_eq!(result.overall_winner, Side::First);
}

#[test]
fn swapping_sides_mirrors_the_verdict() {
    let engine = scenario_engine();
    let forward = engine.compare_ids(HeroId::new(1), HeroId::new(2)).unwrap();
    let backward = engine.compare_ids(HeroId::new(2), HeroId::new(1)).unwrap();
    assert_eq!(forward.mirrored(), backward);
}

#[test]
fn selection_drives_comparison() {
    let engine = scenario_engine();
    let [x, y, z] = [1, 2, 3].map(HeroId::new);

    // Third pick evicts the oldest; the reducer itself does not validate ids.
    let selection = Selection::new().toggle(z).toggle(x).toggle(y);
    assert_eq!(selection.ids(), &[x, y]);
    let result = engine.compare_selection(&selection).unwrap();
    assert_eq!((result.id1, result.id2), (x, y));

    let incomplete = selection.toggle(y);
    let err = engine.compare_selection(&incomplete).unwrap_err();
    assert!(matches!(
        err,
        HeroError::Execution(ExecutionError::SelectionIncomplete { selected: 1 })
    ));
}

#[test]
fn bundled_snapshot_loads_and_compares() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/superheroes.json");
    let snapshot = load_snapshot(&path).unwrap();
    assert!(snapshot.info.hero_count >= 2);

    let engine = HeroEngine::new(Arc::new(snapshot.store));
    let result = engine.compare_raw(Some("1"), Some("2")).unwrap();
    assert_eq!(result.overall_winner, Side::Tie);

    // Agent Bob carries null and "null" stats; Ajax is missing four stats.
    let sparse = engine.compare_raw(Some("8"), Some("9")).unwrap();
    assert_eq!(sparse.categories.len(), 6);
    assert_eq!(sparse.categories[4].id1_value, Score::ZERO);
    assert_eq!(sparse.categories[5].id2_value, Score::ZERO);
}
