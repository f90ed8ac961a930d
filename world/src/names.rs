//! Alien name generation.

use std::collections::{HashMap, HashSet};

use alien_invasion_core::roman_numeral;
use rand::Rng;

const DEFAULT_PREFIXES: [&str; 10] = [
    "Zorg", "Vort", "Gork", "Gorbl", "Borg", "Krel", "Mort", "Snag", "Thrag", "Zug",
];
const DEFAULT_SUFFIXES: [&str; 10] = ["on", "ax", "ik", "ar", "or", "ul", "ith", "ol", "arx", "ath"];

/// Builds globally unique alien names from a prefix pool and a suffix pool.
///
/// A base name is `"<prefix> <suffix>"`. The first time a base name is drawn it
/// is issued verbatim; every repeat gets a roman-numeral counter appended,
/// starting at `I` and growing with each repeat of that base name.
#[derive(Clone, Debug)]
pub struct NameGenerator {
    prefixes: Vec<String>,
    suffixes: Vec<String>,
    repeats: HashMap<String, u32>,
    issued: HashSet<String>,
}

impl NameGenerator {
    /// Creates a generator drawing from the provided pools.
    ///
    /// Empty pools fall back to a single empty fragment, so names are still
    /// unique thanks to the numeral counter.
    #[must_use]
    pub fn new<P, S>(prefixes: P, suffixes: S) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            prefixes: non_empty(prefixes),
            suffixes: non_empty(suffixes),
            repeats: HashMap::new(),
            issued: HashSet::new(),
        }
    }

    /// Draws the next unique name.
    pub fn next_name<R: Rng + ?Sized>(&mut self, rng: &mut R) -> String {
        let prefix = &self.prefixes[rng.gen_range(0..self.prefixes.len())];
        let suffix = &self.suffixes[rng.gen_range(0..self.suffixes.len())];
        let base = format!("{prefix} {suffix}");

        let mut candidate = base.clone();
        while self.issued.contains(&candidate) {
            let counter = self.repeats.entry(base.clone()).or_insert(0);
            *counter += 1;
            candidate = format!("{base} {}", roman_numeral(*counter));
        }

        let _ = self.issued.insert(candidate.clone());
        candidate
    }

    /// Draws `amount` unique names.
    pub fn names<R: Rng + ?Sized>(&mut self, amount: usize, rng: &mut R) -> Vec<String> {
        (0..amount).map(|_| self.next_name(rng)).collect()
    }
}

impl Default for NameGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIXES, DEFAULT_SUFFIXES)
    }
}

fn non_empty<I>(fragments: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let fragments: Vec<String> = fragments.into_iter().map(Into::into).collect();
    if fragments.is_empty() {
        vec![String::new()]
    } else {
        fragments
    }
}
