//! Annealing searcher (C8): a Markov walk with Metropolis acceptance over a
//! Hamming-1 neighbourhood.

use std::collections::HashSet;
use std::rc::Rc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::configuration::ConfigIndex;
use crate::cost::{Cost, History};
use crate::random::Random;
use crate::search::{fractional_budget, Searcher};
use crate::space::Space;

/// After this many consecutive already-visited redraws, the searcher
/// declares `done()` instead of looping forever on an exhausted
/// neighbourhood (`NeighbourhoodExhausted`, a graceful termination, not an
/// error).
const MAX_ALREADY_VISITED: usize = 10;

/// Floor for the linear cooling schedule so acceptance probabilities never
/// divide by (near) zero.
const MIN_TEMPERATURE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Waiting for the report of the initial point `c`.
    Initial,
    /// Waiting for the report of the candidate `n`.
    Candidate,
}

pub struct AnnealingSearcher {
    space: Rc<Space>,
    rng: Random,
    budget: usize,
    temperature: f64,
    current: ConfigIndex,
    candidate: ConfigIndex,
    current_cost: f64,
    phase: Phase,
    visited: HashSet<ConfigIndex>,
    stuck: usize,
    emitted: usize,
    terminated: bool,
    history: History,
}

impl AnnealingSearcher {
    pub fn new(space: Rc<Space>, fraction: f64, max_temperature: f64, seed: u64) -> Self {
        let budget = fractional_budget(&space, fraction);
        let mut rng = Random::seeded(seed);
        let current = space.sample_uniform_index(&mut rng);
        let mut visited = HashSet::new();
        visited.insert(current);

        AnnealingSearcher {
            space,
            rng,
            budget,
            temperature: max_temperature,
            current,
            candidate: current,
            current_cost: f64::INFINITY,
            phase: Phase::Initial,
            visited,
            stuck: 0,
            emitted: 0,
            terminated: false,
            history: History::new(),
        }
    }

    /// Draws a neighbour of `current` not yet in `visited`, redrawing up to
    /// `MAX_ALREADY_VISITED` times. Returns `None` if the neighbourhood is
    /// empty or the stuck counter trips.
    fn pick_unvisited_neighbour(&mut self) -> Option<ConfigIndex> {
        let neighbours = self.space.neighbours(self.current);
        if neighbours.is_empty() {
            return None;
        }
        for _ in 0..MAX_ALREADY_VISITED {
            let candidate = *neighbours.choose(&mut self.rng).expect("non-empty");
            if !self.visited.contains(&candidate) {
                return Some(candidate);
            }
            self.stuck += 1;
            if self.stuck >= MAX_ALREADY_VISITED {
                return None;
            }
        }
        None
    }

    fn cool(&mut self) {
        let decay = 1.0 - 1.0 / self.budget as f64;
        self.temperature = (self.temperature * decay).max(MIN_TEMPERATURE);
    }
}

impl Searcher for AnnealingSearcher {
    fn configuration(&self) -> ConfigIndex {
        match self.phase {
            Phase::Initial => self.current,
            Phase::Candidate => self.candidate,
        }
    }

    fn report(&mut self, cost: Cost) {
        if self.terminated {
            return;
        }
        let measured = cost.as_f64();

        match self.phase {
            Phase::Initial => {
                self.history.record(self.current, cost);
                self.emitted += 1;
                self.current_cost = measured;

                match self.pick_unvisited_neighbour() {
                    Some(n) => {
                        self.candidate = n;
                        self.visited.insert(n);
                        self.phase = Phase::Candidate;
                    }
                    None => self.terminated = true,
                }
            }
            Phase::Candidate => {
                self.history.record(self.candidate, cost);
                self.emitted += 1;

                let delta = measured - self.current_cost;
                let accept = if delta < 0.0 {
                    true
                } else {
                    let p = (-delta / self.temperature).exp();
                    self.rng.gen::<f64>() < p
                };

                if accept {
                    self.current = self.candidate;
                    self.current_cost = measured;
                    self.stuck = 0;
                }

                self.cool();

                if self.emitted >= self.budget {
                    self.terminated = true;
                    return;
                }

                match self.pick_unvisited_neighbour() {
                    Some(n) => {
                        self.candidate = n;
                        self.visited.insert(n);
                    }
                    None => self.terminated = true,
                }
            }
        }
    }

    fn next(&mut self) {
        if self.emitted >= self.budget {
            self.terminated = true;
        }
    }

    fn done(&self) -> bool {
        self.terminated
    }

    fn budget(&self) -> usize {
        self.budget
    }

    fn history(&self) -> &History {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::SpaceBuilder;

    fn linear_cost_space(n: i64) -> Rc<Space> {
        let mut builder = SpaceBuilder::new();
        builder.add_parameter("X", (0..n).collect()).unwrap();
        Rc::new(builder.build().unwrap())
    }

    fn cost_of(space: &Space, index: ConfigIndex) -> Cost {
        let position = space.positions(index)[0];
        Cost::Measured(position as f64)
    }

    #[test]
    fn s4_best_so_far_is_monotonically_non_increasing() {
        let space = linear_cost_space(50);
        let mut searcher = AnnealingSearcher::new(Rc::clone(&space), 0.5, 1.0, 7);

        let mut best_so_far = f64::INFINITY;
        while !searcher.done() {
            let idx = searcher.configuration();
            let cost = cost_of(&space, idx);
            searcher.report(cost);
            if let Some(best) = searcher.history().best() {
                let value = best.cost.as_f64();
                assert!(value <= best_so_far + 1e-9);
                best_so_far = value;
            }
            searcher.next();
        }
    }

    #[test]
    fn s4_descent_reaches_global_optimum_with_high_probability() {
        let mut successes = 0;
        for seed in 0..100u64 {
            let space = linear_cost_space(50);
            let mut searcher = AnnealingSearcher::new(Rc::clone(&space), 1.0, 1.0, seed);
            while !searcher.done() {
                let idx = searcher.configuration();
                let cost = cost_of(&space, idx);
                searcher.report(cost);
                searcher.next();
            }
            if let Some(best) = searcher.history().best() {
                if best.cost.as_f64() == 0.0 {
                    successes += 1;
                }
            }
        }
        assert!(successes > 90, "only {successes}/100 reached the optimum");
    }

    #[test]
    fn s5_terminates_when_neighbourhood_exhausted() {
        // A, B partitioned by a constraint into two disconnected 2-node
        // islands: {(0,0),(0,1)} and {(1,2),(1,3)}. Every "differs in A"
        // move crosses islands and is filtered out, so each node's only
        // neighbour is the other node in its own island.
        let mut builder = SpaceBuilder::new();
        builder.add_parameter("A", vec![0, 1]).unwrap();
        builder.add_parameter("B", vec![0, 1, 2, 3]).unwrap();
        builder
            .add_constraint(vec!["A".into(), "B".into()], |v| {
                (v[0] == 0 && v[1] < 2) || (v[0] == 1 && v[1] >= 2)
            })
            .unwrap();
        let space = Rc::new(builder.build().unwrap());
        assert_eq!(space.len(), 4);

        let mut searcher = AnnealingSearcher::new(Rc::clone(&space), 1.0, 1.0, 3);

        let mut steps = 0;
        while !searcher.done() && steps <= MAX_ALREADY_VISITED + 1 {
            let _ = searcher.configuration();
            searcher.report(Cost::Measured(1.0));
            searcher.next();
            steps += 1;
        }
        assert!(searcher.done());
        assert!(steps <= MAX_ALREADY_VISITED + 1);
    }

    #[test]
    fn negative_delta_always_accepts() {
        let space = linear_cost_space(30);
        let mut searcher = AnnealingSearcher::new(Rc::clone(&space), 1.0, 2.0, 5);
        searcher.phase = Phase::Candidate;
        searcher.current_cost = 10.0;
        searcher.candidate = ConfigIndex(0);
        searcher.temperature = 1e-9; // would reject almost any positive delta
        searcher.report(Cost::Measured(5.0)); // delta = -5 < 0
        assert_eq!(searcher.current, ConfigIndex(0));
        assert_eq!(searcher.current_cost, 5.0);
    }

    #[test]
    fn positive_delta_acceptance_matches_metropolis_criterion() {
        let delta = 3.0;
        let temperature = 4.0;
        let expected_p = (-delta / temperature).exp();
        let trials = 20_000u64;
        let mut accepted = 0;

        for seed in 0..trials {
            let space = linear_cost_space(30);
            let mut searcher = AnnealingSearcher::new(Rc::clone(&space), 1.0, temperature, seed);
            searcher.phase = Phase::Candidate;
            searcher.current_cost = 0.0;
            searcher.temperature = temperature;
            searcher.current = ConfigIndex(0);
            searcher.candidate = ConfigIndex(1);
            searcher.report(Cost::Measured(delta));
            if searcher.current == ConfigIndex(1) {
                accepted += 1;
            }
        }

        let observed_p = accepted as f64 / trials as f64;
        float_eq::assert_float_eq!(observed_p, expected_p, abs <= 0.02);
    }

    #[test]
    fn emitted_configurations_always_belong_to_the_space() {
        let space = linear_cost_space(30);
        let mut searcher = AnnealingSearcher::new(Rc::clone(&space), 0.6, 2.0, 11);
        while !searcher.done() {
            let idx = searcher.configuration();
            assert!(idx.0 < space.len());
            searcher.report(cost_of(&space, idx));
            searcher.next();
        }
    }
}
