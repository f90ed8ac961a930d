#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Day-by-day orchestration of an alien invasion.
//!
//! [`Invasion`] owns a [`Planet`], counts simulated days against a configured
//! limit, and packages every day into a [`TickReport`] for display adapters.
//! Deciding whether the population is extinct is left to the caller.

use alien_invasion_core::{CityLayout, TickReport};
use alien_invasion_world::{alien_positions, Planet, PlanetError};
use tracing::trace;

/// Simulation driver that enforces the day limit.
#[derive(Debug)]
pub struct Invasion {
    planet: Planet,
    tick_count: u64,
    tick_limit: u64,
    layout: CityLayout,
}

impl Invasion {
    /// Builds a planet from `layout`, lands `aliens` aliens on it, and allows `tick_limit` days.
    pub fn new(
        layout: CityLayout,
        aliens: usize,
        tick_limit: u64,
        seed: u64,
    ) -> Result<Self, PlanetError> {
        let planet = Planet::new(&layout, aliens, seed)?;
        Ok(Self::from_planet(planet, layout, tick_limit))
    }

    /// Wraps an already constructed planet. `layout` is kept for [`Invasion::cities`].
    #[must_use]
    pub fn from_planet(planet: Planet, layout: CityLayout, tick_limit: u64) -> Self {
        Self {
            planet,
            tick_count: 0,
            tick_limit,
            layout,
        }
    }

    /// Simulates one day.
    ///
    /// Returns whether another call is allowed under the day limit together
    /// with the day's report. The report's tick index starts at zero.
    pub fn tick(&mut self) -> (bool, TickReport) {
        let tick = self.tick_count;
        self.tick_count += 1;

        let battles = self.planet.next_day();
        let report = TickReport {
            battles,
            alien_positions: alien_positions(&self.planet),
            tick,
        };
        trace!(
            tick,
            battles = report.battles.len(),
            alive = self.planet.alien_count(),
            "day simulated"
        );

        (self.tick_count < self.tick_limit, report)
    }

    /// Copy of the layout the invasion was started with.
    #[must_use]
    pub fn cities(&self) -> CityLayout {
        self.layout.clone()
    }

    /// Number of aliens still alive.
    #[must_use]
    pub fn alive_aliens(&self) -> usize {
        self.planet.alien_count()
    }

    /// Number of days simulated so far.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Configured day limit.
    #[must_use]
    pub const fn tick_limit(&self) -> u64 {
        self.tick_limit
    }

    /// Read-only access to the simulated planet.
    #[must_use]
    pub const fn planet(&self) -> &Planet {
        &self.planet
    }
}
