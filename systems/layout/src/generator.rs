//! Random square-grid layouts used when no layout file is supplied.

use std::collections::{BTreeMap, BTreeSet};

use alien_invasion_core::{roman_numeral, Direction};
use rand::{seq::index, Rng};

/// City names handed out in order before names start repeating with a numeral.
pub const CITY_NAME_POOL: [&str; 20] = [
    "new_york",
    "los_angeles",
    "buenos_aires",
    "paris",
    "phoenix",
    "shanghai",
    "san_antonio",
    "new_delhi",
    "dallas",
    "san_jose",
    "austin",
    "jacksonville",
    "fort_worth",
    "columbus",
    "san_francisco",
    "brasilia",
    "south_africa",
    "denver",
    "washington",
    "medellin",
];

/// Scatters `cities` cities over a `matrix * matrix` grid and renders the layout text.
///
/// Each city gets a distinct random cell; neighbouring occupied cells are
/// linked in both directions, so the output always validates. Requests for
/// more cities than cells are clamped to the number of cells. Only occupied
/// cells are stored, so memory grows with `cities` rather than the grid area.
pub fn generate<R: Rng + ?Sized>(cities: usize, matrix: usize, rng: &mut R) -> String {
    let grid: BTreeMap<(usize, usize), String> = occupied_cells(cities, matrix, rng)
        .into_iter()
        .enumerate()
        .map(|(position, cell)| (cell, city_name(position)))
        .collect();

    let mut text = String::new();
    for (&(row, column), name) in &grid {
        text.push_str(name);
        for direction in [Direction::North, Direction::South, Direction::East, Direction::West] {
            let neighbour =
                neighbour(row, column, direction, matrix).and_then(|cell| grid.get(&cell));
            if let Some(neighbour) = neighbour {
                text.push_str(&format!(" {direction}={neighbour}"));
            }
        }
        text.push('\n');
    }
    text
}

/// Distinct `(row, column)` cells in the order cities are assigned to them.
fn occupied_cells<R: Rng + ?Sized>(cities: usize, matrix: usize, rng: &mut R) -> Vec<(usize, usize)> {
    match matrix.checked_mul(matrix) {
        Some(cells) => index::sample(rng, cells, cities.min(cells))
            .into_iter()
            .map(|cell| (cell / matrix, cell % matrix))
            .collect(),
        // The area does not fit in usize, so it dwarfs any city count and
        // rejection sampling terminates quickly.
        None => {
            let mut taken = BTreeSet::new();
            let mut order = Vec::with_capacity(cities);
            while order.len() < cities {
                let cell = (rng.gen_range(0..matrix), rng.gen_range(0..matrix));
                if taken.insert(cell) {
                    order.push(cell);
                }
            }
            order
        }
    }
}

fn city_name(index: usize) -> String {
    let pool = CITY_NAME_POOL.len();
    if index < pool {
        return CITY_NAME_POOL[index].to_owned();
    }
    let overflow = index - pool;
    let round = u32::try_from(overflow + 1).unwrap_or(u32::MAX);
    format!("{}_{}", CITY_NAME_POOL[overflow % pool], roman_numeral(round))
}

fn neighbour(row: usize, column: usize, direction: Direction, matrix: usize) -> Option<(usize, usize)> {
    let (row, column) = match direction {
        Direction::North => (row.checked_sub(1)?, column),
        Direction::South => (row + 1, column),
        Direction::East => (row, column + 1),
        Direction::West => (row, column.checked_sub(1)?),
    };
    (row < matrix && column < matrix).then_some((row, column))
}
