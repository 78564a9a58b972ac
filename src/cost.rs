//! Measured costs and the shared, append-only search history.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::configuration::ConfigIndex;

/// The measured cost of evaluating a configuration.
///
/// An explicit tagged value rather than a magic float: the kernel runner's
/// `CompileFailed` / `ResourceExceeded` / `LaunchFailed` / `ValidationFailed`
/// all collapse to [`Cost::Infeasible`] here, since the core never
/// distinguishes between them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Cost {
    /// A positive runtime in seconds.
    Measured(f64),
    /// Did not run, or ran but was rejected (compile failure, resource
    /// overflow, launch failure, or validation mismatch).
    Infeasible,
}

impl Cost {
    /// The measured runtime, or `None` if infeasible.
    pub fn seconds(&self) -> Option<f64> {
        match self {
            Cost::Measured(s) => Some(*s),
            Cost::Infeasible => None,
        }
    }

    /// Treats infeasibility as infinite cost for acceptance/ranking decisions.
    pub fn as_f64(&self) -> f64 {
        match self {
            Cost::Measured(s) => *s,
            Cost::Infeasible => f64::INFINITY,
        }
    }
}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.as_f64().partial_cmp(&other.as_f64())
    }
}

/// A single recorded observation: which configuration, and at what cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasuredPoint {
    pub index: ConfigIndex,
    pub cost: Cost,
}

/// The append-only record of every configuration a searcher has visited and
/// the cost it measured there. Owned exclusively by a single searcher
/// instance.
#[derive(Debug, Default)]
pub struct History {
    records: HashMap<ConfigIndex, Cost>,
    order: Vec<ConfigIndex>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an observation. Re-recording an index overwrites its cost but
    /// does not duplicate it in emission order.
    pub fn record(&mut self, index: ConfigIndex, cost: Cost) {
        if self.records.insert(index, cost).is_none() {
            self.order.push(index);
        }
    }

    pub fn contains(&self, index: ConfigIndex) -> bool {
        self.records.contains_key(&index)
    }

    pub fn cost_of(&self, index: ConfigIndex) -> Option<Cost> {
        self.records.get(&index).copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The lowest-cost observation so far, if any finite or infeasible
    /// observation has been recorded.
    pub fn best(&self) -> Option<MeasuredPoint> {
        self.order
            .iter()
            .map(|&index| MeasuredPoint {
                index,
                cost: self.records[&index],
            })
            .min_by(|a, b| a.cost.partial_cmp(&b.cost).unwrap())
    }

    /// All observations, ranked ascending by cost (infeasible points last).
    pub fn ranked(&self) -> Vec<MeasuredPoint> {
        let mut points: Vec<_> = self
            .order
            .iter()
            .map(|&index| MeasuredPoint {
                index,
                cost: self.records[&index],
            })
            .collect();
        points.sort_by(|a, b| a.cost.partial_cmp(&b.cost).unwrap());
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infeasible_sorts_last() {
        let mut history = History::new();
        history.record(ConfigIndex(0), Cost::Infeasible);
        history.record(ConfigIndex(1), Cost::Measured(2.0));
        history.record(ConfigIndex(2), Cost::Measured(1.0));

        let ranked = history.ranked();
        assert_eq!(ranked[0].index, ConfigIndex(2));
        assert_eq!(ranked[1].index, ConfigIndex(1));
        assert_eq!(ranked[2].index, ConfigIndex(0));
    }

    #[test]
    fn best_tracks_minimum_cost() {
        let mut history = History::new();
        history.record(ConfigIndex(0), Cost::Measured(5.0));
        assert_eq!(history.best().unwrap().index, ConfigIndex(0));
        history.record(ConfigIndex(1), Cost::Measured(1.0));
        assert_eq!(history.best().unwrap().index, ConfigIndex(1));
    }
}
