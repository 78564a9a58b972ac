//! Particle-swarm searcher (C9): a population of particles with
//! velocity-biased coordinate resampling over the parameter-index space.

use std::rc::Rc;

use rand::Rng;

use crate::configuration::ConfigIndex;
use crate::cost::{Cost, History};
use crate::random::Random;
use crate::search::{fractional_budget, Searcher};
use crate::space::Space;

struct Particle {
    position: Vec<usize>,
    velocity: Vec<f64>,
    pbest_position: Vec<usize>,
    pbest_cost: f64,
}

pub struct PsoSearcher {
    space: Rc<Space>,
    rng: Random,
    particles: Vec<Particle>,
    gbest_position: Vec<usize>,
    gbest_cost: f64,
    w: f64,
    c1: f64,
    c2: f64,
    budget: usize,
    emitted: usize,
    turn: usize,
    history: History,
}

impl PsoSearcher {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        space: Rc<Space>,
        fraction: f64,
        swarms: usize,
        w: f64,
        c1: f64,
        c2: f64,
        seed: u64,
    ) -> Self {
        let budget = fractional_budget(&space, fraction);
        let mut rng = Random::seeded(seed);
        let dimension = space.parameters().len();

        let particles = (0..swarms)
            .map(|_| {
                let position = space.sample_uniform_positions(&mut rng);
                Particle {
                    position: position.clone(),
                    velocity: vec![0.0; dimension],
                    pbest_position: position,
                    pbest_cost: f64::INFINITY,
                }
            })
            .collect();

        PsoSearcher {
            space,
            rng,
            particles,
            gbest_position: vec![0; dimension],
            gbest_cost: f64::INFINITY,
            w,
            c1,
            c2,
            budget,
            emitted: 0,
            turn: 0,
            history: History::new(),
        }
    }

    fn current_index(&self) -> ConfigIndex {
        self.space
            .encode(&self.particles[self.turn].position)
            .expect("particle positions are always kept feasible")
    }
}

impl Searcher for PsoSearcher {
    fn configuration(&self) -> ConfigIndex {
        self.current_index()
    }

    fn report(&mut self, cost: Cost) {
        let measured = cost.as_f64();
        let index = self.current_index();
        self.history.record(index, cost);
        self.emitted += 1;

        let space = Rc::clone(&self.space);
        let particle = &mut self.particles[self.turn];

        if measured < particle.pbest_cost {
            particle.pbest_cost = measured;
            particle.pbest_position = particle.position.clone();
        }
        if measured < self.gbest_cost {
            self.gbest_cost = measured;
            self.gbest_position = particle.position.clone();
        }

        for d in 0..particle.position.len() {
            let r1: f64 = self.rng.gen_range(0.0..1.0);
            let r2: f64 = self.rng.gen_range(0.0..1.0);
            let x = particle.position[d] as f64;
            let pbest = particle.pbest_position[d] as f64;
            let gbest = self.gbest_position[d] as f64;
            particle.velocity[d] = self.w * particle.velocity[d]
                + self.c1 * r1 * (pbest - x)
                + self.c2 * r2 * (gbest - x);
        }

        for d in 0..particle.position.len() {
            let max_index = space.parameters()[d].len().saturating_sub(1) as f64;
            let proposed = particle.position[d] as f64 + particle.velocity[d];
            let clamped = proposed.round().clamp(0.0, max_index);
            particle.position[d] = clamped as usize;
        }

        if space.encode(&particle.position).is_none() {
            particle.position = space.sample_uniform_positions(&mut self.rng);
            particle.velocity = vec![0.0; particle.velocity.len()];
        }
    }

    fn next(&mut self) {
        self.turn = (self.turn + 1) % self.particles.len();
    }

    fn done(&self) -> bool {
        self.emitted >= self.budget
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

    fn grid_space() -> Rc<Space> {
        let mut builder = SpaceBuilder::new();
        builder.add_parameter("X", (0..10).collect()).unwrap();
        builder.add_parameter("Y", (0..10).collect()).unwrap();
        Rc::new(builder.build().unwrap())
    }

    fn sphere_cost(space: &Space, index: ConfigIndex) -> Cost {
        let positions = space.positions(index);
        let x = positions[0] as f64 - 5.0;
        let y = positions[1] as f64 - 5.0;
        Cost::Measured(x * x + y * y)
    }

    #[test]
    fn positions_always_feasible_and_within_bounds() {
        let space = grid_space();
        let mut searcher = PsoSearcher::new(Rc::clone(&space), 1.0, 5, 0.5, 1.5, 1.5, 9);
        while !searcher.done() {
            let idx = searcher.configuration();
            assert!(idx.0 < space.len());
            let positions = space.positions(idx);
            assert!(positions[0] < 10);
            assert!(positions[1] < 10);
            searcher.report(sphere_cost(&space, idx));
            searcher.next();
        }
    }

    #[test]
    fn s6_converges_to_minimum_with_high_probability() {
        let mut successes = 0;
        for seed in 0..20u64 {
            let space = grid_space();
            // Run several PSO generations worth of evaluations.
            let mut searcher = PsoSearcher::new(Rc::clone(&space), 1.0, 5, 0.5, 1.5, 1.5, seed);
            searcher.budget = 40 * 5;
            while !searcher.done() {
                let idx = searcher.configuration();
                searcher.report(sphere_cost(&space, idx));
                searcher.next();
            }
            if searcher.gbest_cost == 0.0 {
                successes += 1;
            }
        }
        assert!(successes >= 16, "only {successes}/20 seeds converged");
    }
}
