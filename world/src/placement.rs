//! Initial alien placement.

use rand::{seq::SliceRandom, Rng};

/// Picks cities so that every city is chosen once before any city is chosen twice.
///
/// The first pass walks a uniformly shuffled copy of the candidates. Once the
/// pass is exhausted every further pick is uniform with replacement.
#[derive(Clone, Debug)]
pub(crate) struct CitySelector<T> {
    order: Vec<T>,
    cursor: usize,
}

impl<T: Copy> CitySelector<T> {
    pub(crate) fn new<R: Rng + ?Sized>(candidates: &[T], rng: &mut R) -> Self {
        let mut order = candidates.to_vec();
        order.shuffle(rng);
        Self { order, cursor: 0 }
    }

    /// Returns the next city, or `None` when there are no candidates at all.
    pub(crate) fn pick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<T> {
        if self.order.is_empty() {
            return None;
        }

        if let Some(item) = self.order.get(self.cursor).copied() {
            self.cursor += 1;
            return Some(item);
        }

        self.order.choose(rng).copied()
    }
}
