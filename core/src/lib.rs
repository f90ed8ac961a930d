#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the alien invasion engine.
//!
//! This crate defines the vocabulary that connects the layout loader, the
//! authoritative planet, the invasion orchestrator, and display adapters. A
//! layout is described as a [`CityLayout`], the planet advances one simulated
//! day at a time producing [`BattleReport`] values, and the orchestrator wraps
//! each day into a [`TickReport`] that adapters render.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// City name mapped to its outgoing roads, keyed by compass direction.
pub type CityLayout = BTreeMap<String, BTreeMap<Direction, String>>;

/// City name mapped to the aliens currently standing in it.
pub type AlienPositions = BTreeMap<String, Vec<String>>;

/// Compass directions labelling the roads that leave a city.
///
/// The declaration order doubles as the canonical enumeration order used
/// whenever roads are listed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Road leading north.
    North,
    /// Road leading east.
    East,
    /// Road leading south.
    South,
    /// Road leading west.
    West,
}

impl Direction {
    /// Every direction in canonical order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Direction pointing back along the same road.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Stable slot used by fixed-size adjacency tables.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Lowercase keyword used by layout files.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Error returned when a layout keyword does not name a direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownDirection(pub String);

impl fmt::Display for UnknownDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown direction '{}'", self.0)
    }
}

impl std::error::Error for UnknownDirection {}

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|direction| direction.keyword() == value)
            .ok_or_else(|| UnknownDirection(value.to_owned()))
    }
}

/// Battle detected in a city at the end of a simulated day.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BattleReport {
    /// City where the battle took place. The city is destroyed afterwards.
    pub city: String,
    /// Aliens present when the battle was detected. All of them die.
    pub involved_aliens: Vec<String>,
}

impl BattleReport {
    /// Creates a new battle report.
    #[must_use]
    pub fn new(city: impl Into<String>, involved_aliens: Vec<String>) -> Self {
        Self {
            city: city.into(),
            involved_aliens,
        }
    }
}

/// Everything a display collaborator needs to render one simulated day.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Battles fought during the day.
    pub battles: Vec<BattleReport>,
    /// Positions of every surviving alien after the day resolved.
    pub alien_positions: AlienPositions,
    /// Zero-based index of the day.
    pub tick: u64,
}

impl TickReport {
    /// Number of aliens still alive according to the position snapshot.
    #[must_use]
    pub fn surviving_aliens(&self) -> usize {
        self.alien_positions.values().map(Vec::len).sum()
    }
}

const ROMAN_NUMERALS: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Renders a positive integer as a roman numeral. Zero renders as an empty string.
#[must_use]
pub fn roman_numeral(mut value: u32) -> String {
    let mut rendered = String::new();
    for (weight, symbol) in ROMAN_NUMERALS {
        while value >= weight {
            rendered.push_str(symbol);
            value -= weight;
        }
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::{roman_numeral, AlienPositions, BattleReport, Direction, TickReport};

    #[test]
    fn roman_numerals_cover_subtractive_forms() {
        assert_eq!(roman_numeral(1), "I");
        assert_eq!(roman_numeral(4), "IV");
        assert_eq!(roman_numeral(9), "IX");
        assert_eq!(roman_numeral(14), "XIV");
        assert_eq!(roman_numeral(40), "XL");
        assert_eq!(roman_numeral(1994), "MCMXCIV");
        assert_eq!(roman_numeral(0), "");
    }

    #[test]
    fn direction_parses_layout_keywords() {
        for direction in Direction::ALL {
            assert_eq!(direction.keyword().parse::<Direction>(), Ok(direction));
        }
        assert!("up".parse::<Direction>().is_err());
        assert!("North".parse::<Direction>().is_err());
    }

    #[test]
    fn opposite_is_an_involution() {
        for direction in Direction::ALL {
            assert_ne!(direction.opposite(), direction);
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }

    #[test]
    fn tick_report_round_trips_through_bincode() {
        let mut positions = AlienPositions::new();
        let _ = positions.insert("Foo".to_owned(), vec!["Zorg on".to_owned()]);
        let report = TickReport {
            battles: vec![BattleReport::new(
                "Bar",
                vec!["Krel ax".to_owned(), "Mort ul".to_owned()],
            )],
            alien_positions: positions,
            tick: 3,
        };

        let bytes = bincode::serialize(&report).expect("serialize");
        let restored: TickReport = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, report);
        assert_eq!(restored.surviving_aliens(), 1);
    }
}
