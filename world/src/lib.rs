#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative planet state for the alien invasion.
//!
//! A [`Planet`] owns the city [`Graph`], the registry of living aliens, and the
//! seeded random source that drives both the initial placement and every
//! subsequent move. The planet advances one day per [`Planet::next_day`] call
//! and reports the battles fought that day.

pub mod graph;
pub mod names;
mod placement;

use std::collections::BTreeMap;

use alien_invasion_core::{BattleReport, CityLayout};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::debug;

pub use graph::{Graph, GraphError, Vertex, VertexId};
pub use names::NameGenerator;

use placement::CitySelector;

/// Errors that prevent a planet from being constructed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlanetError {
    /// The layout could not be turned into a graph.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// Aliens were requested for a layout without a single city.
    #[error("cannot place {aliens} aliens on a planet without cities")]
    NoCities {
        /// Number of aliens that were requested.
        aliens: usize,
    },
    /// An explicit placement named a city missing from the layout.
    #[error("placement references unknown city {0:?}")]
    UnknownCity(String),
    /// An explicit placement used the same alien name twice.
    #[error("alien {0:?} is placed more than once")]
    DuplicateAlien(String),
}

/// Aliens standing in each city, keyed by vertex.
type Occupancy = BTreeMap<VertexId, Vec<String>>;

/// Initial placement, kept so the first day resolves without any movement.
#[derive(Clone, Debug)]
struct DayZero(Occupancy);

/// Cities, aliens, and the random source that moves them.
#[derive(Debug)]
pub struct Planet {
    graph: Graph,
    aliens: BTreeMap<String, VertexId>,
    day_zero: Option<DayZero>,
    rng: ChaCha8Rng,
}

impl Planet {
    /// Builds a planet from `layout` and scatters `aliens` freshly named aliens over it.
    ///
    /// Every city receives one alien before any city receives a second one.
    pub fn new(layout: &CityLayout, aliens: usize, seed: u64) -> Result<Self, PlanetError> {
        Self::with_generator(layout, aliens, seed, NameGenerator::default())
    }

    /// Same as [`Planet::new`] but draws alien names from `generator`.
    pub fn with_generator(
        layout: &CityLayout,
        aliens: usize,
        seed: u64,
        mut generator: NameGenerator,
    ) -> Result<Self, PlanetError> {
        let graph = build_graph(layout)?;
        if aliens > 0 && graph.is_empty() {
            return Err(PlanetError::NoCities { aliens });
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let cities: Vec<VertexId> = graph.handles().collect();
        let mut selector = CitySelector::new(&cities, &mut rng);

        let mut registry = BTreeMap::new();
        let mut occupancy = Occupancy::new();
        for name in generator.names(aliens, &mut rng) {
            let Some(city) = selector.pick(&mut rng) else {
                return Err(PlanetError::NoCities { aliens });
            };
            let _ = registry.insert(name.clone(), city);
            occupancy.entry(city).or_default().push(name);
        }

        Ok(Self::assemble(graph, registry, occupancy, rng))
    }

    /// Builds a planet whose initial placement is given as city name to alien names.
    pub fn with_placement(
        layout: &CityLayout,
        placement: &BTreeMap<String, Vec<String>>,
        seed: u64,
    ) -> Result<Self, PlanetError> {
        let graph = build_graph(layout)?;

        let mut registry = BTreeMap::new();
        let mut occupancy = Occupancy::new();
        for (city, aliens) in placement {
            let handle = graph
                .find(city)
                .ok_or_else(|| PlanetError::UnknownCity(city.clone()))?;
            for alien in aliens {
                if registry.insert(alien.clone(), handle).is_some() {
                    return Err(PlanetError::DuplicateAlien(alien.clone()));
                }
                occupancy.entry(handle).or_default().push(alien.clone());
            }
        }

        let rng = ChaCha8Rng::seed_from_u64(seed);
        Ok(Self::assemble(graph, registry, occupancy, rng))
    }

    fn assemble(
        graph: Graph,
        aliens: BTreeMap<String, VertexId>,
        occupancy: Occupancy,
        rng: ChaCha8Rng,
    ) -> Self {
        debug!(
            cities = graph.len(),
            aliens = aliens.len(),
            "planet constructed"
        );
        Self {
            graph,
            aliens,
            day_zero: Some(DayZero(occupancy)),
            rng,
        }
    }

    /// Simulates one day and returns the battles fought during it.
    ///
    /// The first call resolves the initial placement without moving anyone.
    /// Later calls move every living alien to a uniformly chosen enabled
    /// neighbour or keep it in place, then resolve battles. Every city holding
    /// two or more aliens is destroyed together with those aliens.
    pub fn next_day(&mut self) -> Vec<BattleReport> {
        if let Some(DayZero(occupancy)) = self.day_zero.take() {
            return self.resolve(occupancy);
        }

        let mut occupancy = Occupancy::new();
        for (name, location) in &mut self.aliens {
            let roads = self.graph.all_edges(*location);
            // One extra slot past the roads stands for staying put.
            let choice = self.rng.gen_range(0..=roads.len());
            if let Some(next) = roads
                .get(choice)
                .and_then(|direction| self.graph.vertex(*location).adjacent(*direction))
            {
                *location = next;
            }
            occupancy.entry(*location).or_default().push(name.clone());
        }

        self.resolve(occupancy)
    }

    fn resolve(&mut self, occupancy: Occupancy) -> Vec<BattleReport> {
        let mut reports = Vec::new();
        for (city, involved) in occupancy {
            if involved.len() < 2 {
                continue;
            }

            for alien in &involved {
                let _ = self.aliens.remove(alien);
            }
            let vertex = self.graph.vertex_mut(city);
            vertex.disable();
            debug!(city = vertex.id(), aliens = ?involved, "battle destroyed city");
            reports.push(BattleReport::new(vertex.id(), involved));
        }
        reports
    }

    /// Living aliens paired with the city they stand in, ordered by alien name.
    pub fn aliens(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliens
            .iter()
            .map(|(name, city)| (name.as_str(), self.graph.vertex(*city).id()))
    }

    /// City currently holding `alien`, if it is alive.
    #[must_use]
    pub fn alien_location(&self, alien: &str) -> Option<&str> {
        self.aliens
            .get(alien)
            .map(|city| self.graph.vertex(*city).id())
    }

    /// Number of living aliens.
    #[must_use]
    pub fn alien_count(&self) -> usize {
        self.aliens.len()
    }

    /// Whether the city named `city` still stands, or `None` for unknown cities.
    #[must_use]
    pub fn is_city_enabled(&self, city: &str) -> Option<bool> {
        self.graph
            .find(city)
            .map(|handle| self.graph.vertex(handle).is_enabled())
    }

    /// Read-only access to the city graph.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }
}

/// Creates every city first and wires roads afterwards so forward references resolve.
///
/// A road that duplicates an existing link between the same two cities is
/// dropped; any other topology error aborts the build.
fn build_graph(layout: &CityLayout) -> Result<Graph, GraphError> {
    let mut graph = Graph::new();
    for city in layout.keys() {
        let _ = graph.add_vertex(city.as_str())?;
    }

    for (city, roads) in layout {
        for (direction, adjacent) in roads {
            match graph.add_edge(*direction, city, adjacent) {
                Ok(()) | Err(GraphError::DuplicateEdge { .. }) => {}
                Err(error) => return Err(error),
            }
        }
    }

    Ok(graph)
}

/// Living aliens grouped by city name. Each list is ordered by alien name.
#[must_use]
pub fn alien_positions(planet: &Planet) -> BTreeMap<String, Vec<String>> {
    let mut positions: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (alien, city) in planet.aliens() {
        positions
            .entry(city.to_owned())
            .or_default()
            .push(alien.to_owned());
    }
    positions
}
