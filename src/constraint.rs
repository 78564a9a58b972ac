//! Constraint engine (C2).
//!
//! A constraint is a predicate over a named subset of parameters. It is
//! declared with the names of the parameters it reads, in the order its
//! predicate expects to receive their values.

use crate::error::{TuneError, TuneResult};
use crate::param::ParameterRegistry;

/// A predicate over a named subset of parameters, plus the global positions
/// of those parameters so their current values can be pulled out of a
/// candidate's full value vector in the predicate's expected order.
pub struct Constraint {
    names: Vec<String>,
    positions: Vec<usize>,
    predicate: Box<dyn Fn(&[i64]) -> bool>,
}

impl Constraint {
    fn values_in_order(&self, full_values: &[i64]) -> Vec<i64> {
        self.positions.iter().map(|&i| full_values[i]).collect()
    }

    /// Parameter names this constraint reads, in declared order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Holds all constraints added so far and evaluates them against candidates.
#[derive(Default)]
pub struct ConstraintEngine {
    constraints: Vec<Constraint>,
}

impl ConstraintEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a constraint. `names` must already be registered in `registry`;
    /// an unknown name is a configuration error detected here, not at
    /// evaluation time.
    pub fn add(
        &mut self,
        registry: &ParameterRegistry,
        names: Vec<String>,
        predicate: impl Fn(&[i64]) -> bool + 'static,
    ) -> TuneResult<()> {
        let mut positions = Vec::with_capacity(names.len());
        for name in &names {
            let pos = registry
                .index_of(name)
                .ok_or_else(|| TuneError::UnknownParameter {
                    context: "constraint",
                    name: name.clone(),
                })?;
            positions.push(pos);
        }
        self.constraints.push(Constraint {
            names,
            positions,
            predicate: Box::new(predicate),
        });
        Ok(())
    }

    /// Evaluates all constraints against `full_values` (one entry per
    /// registered parameter, in declaration order). Short-circuits on the
    /// first failing predicate.
    pub fn evaluate(&self, full_values: &[i64]) -> bool {
        self.constraints
            .iter()
            .all(|c| (c.predicate)(&c.values_in_order(full_values)))
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}
