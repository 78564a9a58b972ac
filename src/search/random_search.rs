//! Random searcher (C7): a uniform sample of a fixed fraction, without
//! replacement.
//!
//! Implementation: shuffle `[0, N)` once with a seeded PRNG and emit the
//! prefix of the requested length.

use std::rc::Rc;

use rand::seq::SliceRandom;

use crate::configuration::ConfigIndex;
use crate::cost::{Cost, History};
use crate::random::Random;
use crate::search::{fractional_budget, Searcher};
use crate::space::Space;

pub struct RandomSearcher {
    space: Rc<Space>,
    order: Vec<usize>,
    cursor: usize,
    history: History,
}

impl RandomSearcher {
    pub fn new(space: Rc<Space>, fraction: f64, seed: u64) -> Self {
        let budget = fractional_budget(&space, fraction).min(space.len());
        let mut rng = Random::seeded(seed);
        let mut order: Vec<usize> = (0..space.len()).collect();
        order.shuffle(&mut rng);
        order.truncate(budget);

        RandomSearcher {
            space,
            order,
            cursor: 0,
            history: History::new(),
        }
    }
}

impl Searcher for RandomSearcher {
    fn configuration(&self) -> ConfigIndex {
        ConfigIndex(self.order[self.cursor])
    }

    fn report(&mut self, cost: Cost) {
        self.history.record(self.configuration(), cost);
    }

    fn next(&mut self) {
        self.cursor += 1;
    }

    fn done(&self) -> bool {
        self.cursor >= self.order.len()
    }

    fn budget(&self) -> usize {
        self.order.len()
    }

    fn history(&self) -> &History {
        &self.history
    }
}
