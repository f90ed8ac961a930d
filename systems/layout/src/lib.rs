#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Layout loading for the alien invasion.
//!
//! Layouts are plain text, one city per line:
//!
//! ```text
//! Foo north=Bar west=Baz south=Qu-ux
//! Bar south=Foo west=Bee
//! ```
//!
//! Loading happens in two steps. [`parse_records`] turns the text into raw
//! [`LayoutRecords`] keyed by strings, rejecting malformed lines and repeated
//! keys. [`validate`] then checks directions, declared neighbours, and road
//! reciprocity before producing the typed [`CityLayout`] the planet is built
//! from.

mod generator;

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use alien_invasion_core::{CityLayout, Direction};
use thiserror::Error;
use tracing::debug;

pub use generator::{generate, CITY_NAME_POOL};

/// Raw layout records: city name mapped to its `key=value` road declarations.
pub type LayoutRecords = BTreeMap<String, BTreeMap<String, String>>;

/// Errors raised while reading or validating a layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The layout file could not be read.
    #[error("failed to read layout file {}: {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// A road declaration is not of the form `<direction>=<city>`.
    #[error("line {line}: malformed road declaration {token:?}")]
    MalformedLine {
        /// One-based line number.
        line: usize,
        /// Offending token.
        token: String,
    },
    /// The same road key appears twice on one line.
    #[error("line {line}: city {city:?} declares {key:?} more than once")]
    DuplicateDirection {
        /// One-based line number.
        line: usize,
        /// City declared on the line.
        city: String,
        /// Repeated key.
        key: String,
    },
    /// The same city is declared on two lines.
    #[error("line {line}: city {city:?} is declared more than once")]
    DuplicateCity {
        /// One-based line number of the second declaration.
        line: usize,
        /// Repeated city name.
        city: String,
    },
    /// A road key is not one of north, south, east, or west.
    #[error("city {city:?} uses unknown direction {key:?}")]
    UnknownDirection {
        /// City declaring the road.
        city: String,
        /// Unrecognised key.
        key: String,
    },
    /// A road leads to a city that has no line of its own.
    #[error("city {city:?} leads {direction} to undeclared city {target:?}")]
    UndeclaredCity {
        /// City declaring the road.
        city: String,
        /// Direction of the road.
        direction: Direction,
        /// Missing destination.
        target: String,
    },
    /// A road is not matched by the opposite road back from its destination.
    #[error("road {direction} from {city:?} to {target:?} has no {} road back", .direction.opposite())]
    MissingReciprocal {
        /// City declaring the road.
        city: String,
        /// Direction of the road.
        direction: Direction,
        /// Destination lacking the return road.
        target: String,
    },
}

/// Parses layout text into raw records without interpreting directions.
pub fn parse_records(text: &str) -> Result<LayoutRecords, LayoutError> {
    let mut records = LayoutRecords::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let mut tokens = raw.split_whitespace();
        let Some(city) = tokens.next() else {
            continue;
        };

        let mut roads = BTreeMap::new();
        for token in tokens {
            let (key, value) = split_road(token).ok_or_else(|| LayoutError::MalformedLine {
                line,
                token: token.to_owned(),
            })?;
            if roads.insert(key.to_owned(), value.to_owned()).is_some() {
                return Err(LayoutError::DuplicateDirection {
                    line,
                    city: city.to_owned(),
                    key: key.to_owned(),
                });
            }
        }

        if records.insert(city.to_owned(), roads).is_some() {
            return Err(LayoutError::DuplicateCity {
                line,
                city: city.to_owned(),
            });
        }
    }

    Ok(records)
}

fn split_road(token: &str) -> Option<(&str, &str)> {
    let (key, value) = token.split_once('=')?;
    if key.is_empty() || value.is_empty() || value.contains('=') {
        return None;
    }
    Some((key, value))
}

/// Checks raw records and converts them into a typed layout.
///
/// Every key must name a direction, every destination must be declared, and
/// every road from `A` to `B` heading `d` must be answered by a road from `B`
/// back to `A` heading the opposite of `d`.
pub fn validate(records: &LayoutRecords) -> Result<CityLayout, LayoutError> {
    let mut layout = CityLayout::new();

    for (city, roads) in records {
        let mut typed = BTreeMap::new();
        for (key, target) in roads {
            let direction: Direction =
                key.parse().map_err(|_| LayoutError::UnknownDirection {
                    city: city.clone(),
                    key: key.clone(),
                })?;
            let _ = typed.insert(direction, target.clone());
        }
        let _ = layout.insert(city.clone(), typed);
    }

    for (city, roads) in &layout {
        for (direction, target) in roads {
            let Some(target_roads) = layout.get(target) else {
                return Err(LayoutError::UndeclaredCity {
                    city: city.clone(),
                    direction: *direction,
                    target: target.clone(),
                });
            };
            if target_roads.get(&direction.opposite()) != Some(city) {
                return Err(LayoutError::MissingReciprocal {
                    city: city.clone(),
                    direction: *direction,
                    target: target.clone(),
                });
            }
        }
    }

    Ok(layout)
}

/// Parses and validates layout text.
pub fn parse(text: &str) -> Result<CityLayout, LayoutError> {
    validate(&parse_records(text)?)
}

/// Reads, parses, and validates the layout file at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<CityLayout, LayoutError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LayoutError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let layout = parse(&text)?;
    debug!(path = %path.display(), cities = layout.len(), "layout loaded");
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_records_keyed_by_first_word() {
        let records =
            parse_records("Foo north=Bar west=Baz south=Qu-ux\nBar south=Foo west=Bee").expect("valid");

        assert_eq!(records.len(), 2);
        assert_eq!(records["Foo"]["north"], "Bar");
        assert_eq!(records["Foo"]["west"], "Baz");
        assert_eq!(records["Foo"]["south"], "Qu-ux");
        assert_eq!(records["Bar"]["south"], "Foo");
        assert_eq!(records["Bar"]["west"], "Bee");
    }

    #[test]
    fn isolated_cities_and_blank_lines_are_accepted() {
        let records = parse_records("Foo\n\n   \nBar\n").expect("valid");
        assert_eq!(records.len(), 2);
        assert!(records["Foo"].is_empty());
    }

    #[test]
    fn rejects_malformed_roads() {
        for text in ["Foo north", "Foo north=Bar=Baz", "Foo =Bar", "Foo north="] {
            assert!(
                matches!(
                    parse_records(text),
                    Err(LayoutError::MalformedLine { line: 1, .. })
                ),
                "{text:?} should be malformed"
            );
        }
    }

    #[test]
    fn rejects_repeated_keys() {
        assert!(matches!(
            parse_records("Foo north=Bar north=Baz"),
            Err(LayoutError::DuplicateDirection { line: 1, .. })
        ));
        assert!(matches!(
            parse_records("Foo north=Bar\nFoo west=Baz"),
            Err(LayoutError::DuplicateCity { line: 2, .. })
        ));
    }

    #[test]
    fn validation_produces_typed_layout() {
        let layout = parse("A south=B east=C\nB north=A\nC west=A").expect("valid");

        assert_eq!(layout["A"][&Direction::South], "B");
        assert_eq!(layout["A"][&Direction::East], "C");
        assert_eq!(layout["B"][&Direction::North], "A");
    }

    #[test]
    fn validation_rejects_unknown_directions() {
        assert!(matches!(
            parse("A up=B\nB down=A"),
            Err(LayoutError::UnknownDirection { .. })
        ));
    }

    #[test]
    fn validation_rejects_undeclared_neighbours() {
        assert!(matches!(
            parse("A south=B"),
            Err(LayoutError::UndeclaredCity { direction: Direction::South, .. })
        ));
    }

    #[test]
    fn validation_requires_the_opposite_road_back() {
        assert!(matches!(
            parse("A south=B\nB"),
            Err(LayoutError::MissingReciprocal { .. })
        ));
        assert!(matches!(
            parse("A south=B\nB south=A"),
            Err(LayoutError::MissingReciprocal { .. })
        ));
        assert!(matches!(
            parse("A south=B\nB north=C\nC south=B"),
            Err(LayoutError::MissingReciprocal { .. })
        ));
    }
}
