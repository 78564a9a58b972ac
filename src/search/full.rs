//! Full searcher (C6): a deterministic walk over every configuration.

use std::rc::Rc;

use crate::configuration::ConfigIndex;
use crate::cost::{Cost, History};
use crate::search::Searcher;
use crate::space::Space;

pub struct FullSearcher {
    space: Rc<Space>,
    current: usize,
    history: History,
}

impl FullSearcher {
    pub fn new(space: Rc<Space>) -> Self {
        FullSearcher {
            space,
            current: 0,
            history: History::new(),
        }
    }
}

impl Searcher for FullSearcher {
    fn configuration(&self) -> ConfigIndex {
        ConfigIndex(self.current)
    }

    fn report(&mut self, cost: Cost) {
        self.history.record(ConfigIndex(self.current), cost);
    }

    fn next(&mut self) {
        self.current += 1;
    }

    fn done(&self) -> bool {
        self.current >= self.space.len()
    }

    fn budget(&self) -> usize {
        self.space.len()
    }

    fn history(&self) -> &History {
        &self.history
    }
}
