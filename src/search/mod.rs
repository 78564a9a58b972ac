//! Pluggable search strategies (C5-C9).
//!
//! Every strategy implements [`Searcher`], a small stateful contract the
//! driver advances in lockstep: ask for a configuration, evaluate it
//! externally, report the cost, then advance.

pub mod annealing;
pub mod full;
pub mod pso;
pub mod random_search;

use std::rc::Rc;

use crate::configuration::ConfigIndex;
use crate::cost::{Cost, History};
use crate::error::{TuneError, TuneResult};
use crate::space::Space;

pub use annealing::AnnealingSearcher;
pub use full::FullSearcher;
pub use pso::PsoSearcher;
pub use random_search::RandomSearcher;

/// The common contract every search strategy exposes to its driver.
///
/// Ordering contract: the driver calls [`Searcher::configuration`],
/// evaluates it externally, calls [`Searcher::report`], then
/// [`Searcher::next`]. Between `report` and `next` a strategy may update
/// internal state using the reported cost.
pub trait Searcher {
    /// The configuration to evaluate next.
    fn configuration(&self) -> ConfigIndex;

    /// Informs the searcher of the last configuration's measured cost.
    fn report(&mut self, cost: Cost);

    /// Advances internal state. Must be called after `report`.
    fn next(&mut self);

    /// True when the searcher will emit no new indices.
    fn done(&self) -> bool;

    /// Total number of configurations the searcher intends to visit.
    fn budget(&self) -> usize;

    /// The shared, append-only record of every index visited so far.
    fn history(&self) -> &History;
}

/// Tag selecting which search strategy [`build_searcher`] should construct.
#[derive(Debug, Clone)]
pub enum StrategyOptions {
    /// Deterministic walk over every configuration.
    Full,
    /// Uniform sample of a fixed fraction, without replacement.
    Random { fraction: f64, seed: u64 },
    /// Markov walk with Metropolis acceptance over single-coordinate moves.
    Annealing {
        fraction: f64,
        max_temperature: f64,
        seed: u64,
    },
    /// Population of particles with velocity-biased coordinate resampling.
    Pso {
        fraction: f64,
        swarms: usize,
        w: f64,
        c1: f64,
        c2: f64,
        seed: u64,
    },
}

fn validate_fraction(fraction: f64) -> TuneResult<()> {
    if fraction > 0.0 && fraction <= 1.0 {
        Ok(())
    } else {
        Err(TuneError::InvalidStrategyOptions(format!(
            "fraction must be in (0, 1], got {fraction}"
        )))
    }
}

/// Budget for a fractional strategy: `ceil(fraction * space.len())`, at
/// least 1.
pub(crate) fn fractional_budget(space: &Space, fraction: f64) -> usize {
    ((fraction * space.len() as f64).ceil() as usize).max(1)
}

/// Builds a searcher for the given space and strategy.
pub fn build_searcher(space: Rc<Space>, options: StrategyOptions) -> TuneResult<Box<dyn Searcher>> {
    match options {
        StrategyOptions::Full => Ok(Box::new(FullSearcher::new(space))),
        StrategyOptions::Random { fraction, seed } => {
            validate_fraction(fraction)?;
            Ok(Box::new(RandomSearcher::new(space, fraction, seed)))
        }
        StrategyOptions::Annealing {
            fraction,
            max_temperature,
            seed,
        } => {
            validate_fraction(fraction)?;
            if !(max_temperature > 0.0) {
                return Err(TuneError::InvalidStrategyOptions(format!(
                    "max_temperature must be > 0, got {max_temperature}"
                )));
            }
            Ok(Box::new(AnnealingSearcher::new(
                space,
                fraction,
                max_temperature,
                seed,
            )))
        }
        StrategyOptions::Pso {
            fraction,
            swarms,
            w,
            c1,
            c2,
            seed,
        } => {
            validate_fraction(fraction)?;
            if swarms == 0 {
                return Err(TuneError::InvalidStrategyOptions(
                    "swarms must be >= 1".into(),
                ));
            }
            if !(0.0..=1.0).contains(&w) {
                return Err(TuneError::InvalidStrategyOptions(format!(
                    "w must be in [0, 1], got {w}"
                )));
            }
            if c1 < 0.0 || c2 < 0.0 || c1 + c2 > 4.0 {
                return Err(TuneError::InvalidStrategyOptions(format!(
                    "c1, c2 must be >= 0 with c1 + c2 <= 4, got c1={c1}, c2={c2}"
                )));
            }
            Ok(Box::new(PsoSearcher::new(
                space, fraction, swarms, w, c1, c2, seed,
            )))
        }
    }
}
