use std::{
    collections::{hash_map::DefaultHasher, BTreeMap},
    hash::{Hash, Hasher},
};

use alien_invasion_core::{BattleReport, CityLayout, Direction};
use alien_invasion_world::{alien_positions, Planet};

const DAYS: usize = 60;

#[test]
fn same_seed_replays_identical_battles() {
    let first = replay(0x0bad_5eed);
    let second = replay(0x0bad_5eed);

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
}

#[test]
fn seeded_replay_matches_recorded_history() {
    let placement = BTreeMap::from([
        ("c0_0".to_owned(), vec!["ash".to_owned(), "bex".to_owned()]),
        ("c1_1".to_owned(), vec!["cor".to_owned()]),
        ("c2_2".to_owned(), vec!["dun".to_owned()]),
        ("c0_2".to_owned(), vec!["eli".to_owned()]),
        ("c2_0".to_owned(), vec!["fay".to_owned()]),
    ]);
    let mut planet = Planet::with_placement(&grid(3), &placement, 0x0bad_5eed).expect("planet");

    let history: Vec<(Vec<BattleReport>, BTreeMap<String, Vec<String>>)> = (0..5)
        .map(|_| (planet.next_day(), alien_positions(&planet)))
        .collect();

    let expected = vec![
        (
            vec![battle("c0_0", &["ash", "bex"])],
            positions(&[("c0_2", &["eli"]), ("c1_1", &["cor"]), ("c2_0", &["fay"]), ("c2_2", &["dun"])]),
        ),
        (
            vec![battle("c1_2", &["cor", "eli"])],
            positions(&[("c2_1", &["fay"]), ("c2_2", &["dun"])]),
        ),
        (Vec::new(), positions(&[("c2_0", &["fay"]), ("c2_1", &["dun"])])),
        (vec![battle("c2_0", &["dun", "fay"])], BTreeMap::new()),
        (Vec::new(), BTreeMap::new()),
    ];
    assert_eq!(history, expected, "recorded history diverged");
}

fn battle(city: &str, aliens: &[&str]) -> BattleReport {
    BattleReport::new(city, aliens.iter().map(|alien| (*alien).to_owned()).collect())
}

fn positions(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(city, aliens)| {
            (
                (*city).to_owned(),
                aliens.iter().map(|alien| (*alien).to_owned()).collect(),
            )
        })
        .collect()
}

#[test]
fn different_seeds_change_the_initial_population() {
    let first = Planet::new(&grid(6), 20, 1).expect("planet");
    let second = Planet::new(&grid(6), 20, 2).expect("planet");

    assert_ne!(alien_positions(&first), alien_positions(&second));
}

#[test]
fn battles_only_reduce_population() {
    let mut planet = Planet::new(&grid(5), 18, 77).expect("planet");
    let mut alive = planet.alien_count();

    for _ in 0..DAYS {
        let battles = planet.next_day();
        let killed: usize = battles.iter().map(|battle| battle.involved_aliens.len()).sum();
        assert_eq!(planet.alien_count(), alive - killed);
        for battle in &battles {
            assert!(battle.involved_aliens.len() >= 2);
            assert_eq!(planet.is_city_enabled(&battle.city), Some(false));
            for alien in &battle.involved_aliens {
                assert!(planet.alien_location(alien).is_none());
            }
        }
        for (_, city) in planet.aliens() {
            assert_eq!(planet.is_city_enabled(city), Some(true));
        }
        alive = planet.alien_count();
    }
}

fn replay(seed: u64) -> ReplayOutcome {
    let mut planet = Planet::new(&grid(5), 15, seed).expect("planet");
    let mut days = Vec::with_capacity(DAYS);
    for _ in 0..DAYS {
        days.push(planet.next_day());
    }

    ReplayOutcome {
        days,
        survivors: alien_positions(&planet).into_iter().collect(),
    }
}

/// Square grid of `size * size` cities with reciprocal roads between neighbours.
fn grid(size: usize) -> CityLayout {
    let name = |row: usize, column: usize| format!("c{row}_{column}");
    let mut layout = CityLayout::new();
    for row in 0..size {
        for column in 0..size {
            let roads = layout.entry(name(row, column)).or_default();
            if row > 0 {
                let _ = roads.insert(Direction::North, name(row - 1, column));
            }
            if row + 1 < size {
                let _ = roads.insert(Direction::South, name(row + 1, column));
            }
            if column > 0 {
                let _ = roads.insert(Direction::West, name(row, column - 1));
            }
            if column + 1 < size {
                let _ = roads.insert(Direction::East, name(row, column + 1));
            }
        }
    }
    layout
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    days: Vec<Vec<BattleReport>>,
    survivors: Vec<(String, Vec<String>)>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}
