//! Ties the search space and a chosen searcher together for a single tuning
//! session, and offers a thin driver loop for callers that don't want to
//! hand-roll the `configuration()` / `report()` / `next()` dance.
//!
//! The driver loop itself is an external concern (§1); what's provided here
//! is a convenience, not a required entry point. A caller is free to drive
//! a [`crate::search::Searcher`] directly instead.

use std::rc::Rc;

use crate::cost::MeasuredPoint;
use crate::error::TuneResult;
use crate::runner::KernelRunner;
use crate::search::{build_searcher, Searcher, StrategyOptions};
use crate::space::{Space, SpaceBuilder};
use crate::tracking::TuningLog;

/// A built space plus the strategy chosen to search it.
pub struct TuningSession {
    space: Rc<Space>,
}

impl TuningSession {
    /// Builds the feasible space from `builder` and starts a new session
    /// over it.
    pub fn build(builder: SpaceBuilder) -> TuneResult<Self> {
        Ok(TuningSession {
            space: Rc::new(builder.build()?),
        })
    }

    pub fn space(&self) -> &Space {
        &self.space
    }

    /// Constructs a searcher for this session's space.
    pub fn searcher(&self, options: StrategyOptions) -> TuneResult<Box<dyn Searcher>> {
        build_searcher(Rc::clone(&self.space), options)
    }

    /// Runs `searcher` to completion against `runner`, logging every
    /// evaluation, and returns the final ranked list of (index, cost).
    pub fn run<R: KernelRunner>(
        &self,
        mut searcher: Box<dyn Searcher>,
        runner: &mut R,
        log: &mut TuningLog,
    ) -> Vec<MeasuredPoint> {
        while !searcher.done() {
            let index = searcher.configuration();
            let configuration = self.space.configuration(index);
            let cost = runner.evaluate(configuration).into();

            searcher.report(cost);
            let best_cost = searcher.history().best().map(|p| p.cost.as_f64());
            log.log_evaluation(index, cost, best_cost);
            searcher.next();
        }
        log.finalize();
        searcher.history().ranked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::InfeasibilityKind;

    struct LinearCostRunner;

    impl KernelRunner for LinearCostRunner {
        fn evaluate(
            &mut self,
            configuration: &crate::configuration::Configuration,
        ) -> Result<f64, InfeasibilityKind> {
            match configuration.get("TS") {
                Some(v) if v == 0 => Err(InfeasibilityKind::ResourceExceeded),
                Some(v) => Ok(v as f64),
                None => Err(InfeasibilityKind::ValidationFailed),
            }
        }
    }

    #[test]
    fn full_session_ranks_configurations_by_cost() {
        let mut builder = SpaceBuilder::new();
        builder.add_parameter("TS", vec![0, 4, 2, 8]).unwrap();
        let session = TuningSession::build(builder).unwrap();

        let searcher = session.searcher(StrategyOptions::Full).unwrap();
        let mut runner = LinearCostRunner;
        let mut log = TuningLog::new();
        let ranked = session.run(searcher, &mut runner, &mut log);

        assert_eq!(ranked.len(), 4);
        assert_eq!(ranked[0].cost.as_f64(), 2.0);
        assert_eq!(ranked.last().unwrap().cost.as_f64(), f64::INFINITY);
        assert_eq!(log.entries().len(), 4);
    }
}
