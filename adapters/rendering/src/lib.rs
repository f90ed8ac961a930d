#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared display contracts for alien invasion adapters.
//!
//! Adapters receive one [`TickReport`] per simulated day, fold it into a
//! [`WorldMap`] that remembers destroyed cities and running tallies, and hand
//! a [`Frame`] to their [`DisplaySink`].

use std::{collections::HashMap, fmt};

use alien_invasion_core::{BattleReport, TickReport};
use anyhow::Result as AnyResult;

/// Weapons cycled through when narrating battles.
pub const WEAPONS: [&str; 8] = [
    "knife",
    "ray gun",
    "bomb",
    "wrench",
    "poison",
    "syringe",
    "flamethrower",
    "paper clip",
];

/// Latest known state of a single city.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CityState {
    /// City name.
    pub name: String,
    /// Aliens standing in the city, or the aliens that died there once destroyed.
    pub aliens: Vec<String>,
    /// Whether a battle destroyed the city.
    pub destroyed: bool,
}

impl fmt::Display for CityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.destroyed {
            write!(f, "{} [destroyed]", self.name)?;
        } else {
            f.write_str(&self.name)?;
        }
        if !self.aliens.is_empty() {
            write!(f, " ({})", self.aliens.join(", "))?;
        }
        Ok(())
    }
}

/// Display-side model of the planet accumulated from tick reports.
#[derive(Clone, Debug, Default)]
pub struct WorldMap {
    cities: Vec<CityState>,
    index: HashMap<String, usize>,
    standing: usize,
    destroyed: usize,
    alive: usize,
    dead: usize,
}

impl WorldMap {
    /// Creates a map holding `cities` untouched cities and `aliens` living aliens.
    pub fn new<I>(cities: I, aliens: usize) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut map = Self {
            alive: aliens,
            ..Self::default()
        };
        for city in cities {
            let _ = map.insert(city.into());
        }
        map
    }

    fn insert(&mut self, name: String) -> usize {
        if let Some(position) = self.index.get(&name) {
            return *position;
        }
        let position = self.cities.len();
        let _ = self.index.insert(name.clone(), position);
        self.cities.push(CityState {
            name,
            aliens: Vec::new(),
            destroyed: false,
        });
        self.standing += 1;
        position
    }

    /// Folds one day into the map.
    ///
    /// Destroyed cities keep the aliens that died there and never change
    /// again. Standing cities are cleared and refilled from the snapshot.
    pub fn apply(&mut self, report: &TickReport) {
        for city in self.cities.iter_mut().filter(|city| !city.destroyed) {
            city.aliens.clear();
        }

        for battle in &report.battles {
            let position = self.insert(battle.city.clone());
            let city = &mut self.cities[position];
            if city.destroyed {
                continue;
            }
            city.destroyed = true;
            city.aliens = battle.involved_aliens.clone();
            self.standing -= 1;
            self.destroyed += 1;
            self.alive = self.alive.saturating_sub(battle.involved_aliens.len());
            self.dead += battle.involved_aliens.len();
        }

        for (name, aliens) in &report.alien_positions {
            let position = self.insert(name.clone());
            let city = &mut self.cities[position];
            if !city.destroyed {
                city.aliens = aliens.clone();
            }
        }
    }

    /// Cities in first-seen order.
    #[must_use]
    pub fn cities(&self) -> &[CityState] {
        &self.cities
    }

    /// Number of aliens still alive.
    #[must_use]
    pub const fn alive(&self) -> usize {
        self.alive
    }

    /// Number of aliens killed so far.
    #[must_use]
    pub const fn dead(&self) -> usize {
        self.dead
    }

    /// Number of cities still standing.
    #[must_use]
    pub const fn standing(&self) -> usize {
        self.standing
    }

    /// Number of destroyed cities.
    #[must_use]
    pub const fn destroyed(&self) -> usize {
        self.destroyed
    }

    /// One-line summary of the tallies.
    #[must_use]
    pub fn status_line(&self, tick: u64) -> String {
        format!(
            "day {tick} | alive {} | dead {} | standing {} | destroyed {}",
            self.alive, self.dead, self.standing, self.destroyed
        )
    }
}

/// Everything a sink needs to draw one day.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// Zero-based day index.
    pub tick: u64,
    /// Battles fought during the day.
    pub battles: &'a [BattleReport],
    /// World state after the day has been folded in.
    pub world: &'a WorldMap,
}

/// Destination for rendered frames.
pub trait DisplaySink {
    /// Draws a single day.
    fn present(&mut self, frame: &Frame<'_>) -> AnyResult<()>;

    /// Called once after the last frame with the final world state.
    fn finish(&mut self, world: &WorldMap) -> AnyResult<()>;
}

/// Picks the weapon for the `battle`-th battle of day `tick`.
#[must_use]
pub fn weapon_for(tick: u64, battle: usize) -> &'static str {
    let tick = usize::try_from(tick % WEAPONS.len() as u64).unwrap_or(0);
    WEAPONS[(tick + battle) % WEAPONS.len()]
}

/// Narrates a battle, for example `"a, b and c killed each other in Foo in a knife duel"`.
#[must_use]
pub fn battle_log(report: &BattleReport, weapon: &str) -> String {
    let fighters = match report.involved_aliens.as_slice() {
        [] => String::from("nobody"),
        [only] => only.clone(),
        [rest @ .., last] => format!("{} and {last}", rest.join(", ")),
    };
    format!(
        "{fighters} killed each other in {} in a {weapon} duel",
        report.city
    )
}
