//! Space enumerator (C4).
//!
//! Computes the Cartesian product over parameters in declaration order,
//! filters by the constraint engine, and returns the resulting sequence.
//! Neighbourhoods (configurations differing in exactly one parameter) are
//! computed on demand against a position-tuple membership index rather than
//! materializing the full neighbour graph.

use std::collections::BTreeMap;
use std::collections::HashMap;

use itertools::Itertools;
use rand::Rng;

use crate::configuration::{ConfigIndex, Configuration};
use crate::constraint::ConstraintEngine;
use crate::error::{TuneError, TuneResult};
use crate::param::{Parameter, ParameterRegistry};

/// Accumulates parameters and constraints before enumerating the feasible
/// space once, at the start of a tuning session.
#[derive(Default)]
pub struct SpaceBuilder {
    registry: ParameterRegistry,
    constraints: ConstraintEngine,
}

impl SpaceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_parameter(&mut self, name: impl Into<String>, values: Vec<i64>) -> TuneResult<()> {
        self.registry.add(name, values)
    }

    pub fn add_constraint(
        &mut self,
        names: Vec<String>,
        predicate: impl Fn(&[i64]) -> bool + 'static,
    ) -> TuneResult<()> {
        self.constraints.add(&self.registry, names, predicate)
    }

    pub fn registry(&self) -> &ParameterRegistry {
        &self.registry
    }

    /// Enumerates the Cartesian product over registered parameters, in
    /// declaration order, filtered by every registered constraint.
    pub fn build(self) -> TuneResult<Space> {
        let parameters = self.registry.parameters().to_vec();

        let mut configurations = Vec::new();
        let mut positions = Vec::new();
        let mut index_of_positions = HashMap::new();

        if !parameters.is_empty() {
            let axes: Vec<_> = parameters.iter().map(|p| 0..p.len()).collect();
            for candidate in axes.into_iter().multi_cartesian_product() {
                let full_values: Vec<i64> = candidate
                    .iter()
                    .zip(&parameters)
                    .map(|(&pos, param)| param.values()[pos])
                    .collect();

                if !self.constraints.evaluate(&full_values) {
                    continue;
                }

                // Defensive: the Cartesian product can't produce the same
                // position tuple twice, but check anyway per C4's contract.
                if index_of_positions.contains_key(&candidate) {
                    continue;
                }

                let values: BTreeMap<String, i64> = parameters
                    .iter()
                    .map(Parameter::name)
                    .map(str::to_owned)
                    .zip(full_values)
                    .collect();

                let index = ConfigIndex(configurations.len());
                index_of_positions.insert(candidate.clone(), index);
                positions.push(candidate);
                configurations.push(Configuration::new(values));
            }
        }

        if configurations.is_empty() {
            return Err(TuneError::EmptySearchSpace);
        }

        Ok(Space {
            parameters,
            configurations,
            positions,
            index_of_positions,
        })
    }
}

/// The ordered, deterministic sequence of feasible configurations.
///
/// Immutable after construction; may be shared by reference across
/// searchers within a session.
pub struct Space {
    parameters: Vec<Parameter>,
    configurations: Vec<Configuration>,
    positions: Vec<Vec<usize>>,
    index_of_positions: HashMap<Vec<usize>, ConfigIndex>,
}

impl Space {
    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn configuration(&self, index: ConfigIndex) -> &Configuration {
        &self.configurations[index.0]
    }

    /// The per-parameter value-list positions (not values) a configuration
    /// was built from. Decoding an index and re-encoding the result yields
    /// the same index.
    pub fn positions(&self, index: ConfigIndex) -> &[usize] {
        &self.positions[index.0]
    }

    /// Inverse of [`Space::positions`]: looks up the index for a per-parameter
    /// position tuple, if it is feasible.
    pub fn encode(&self, positions: &[usize]) -> Option<ConfigIndex> {
        self.index_of_positions.get(positions).copied()
    }

    /// Indices of every feasible configuration differing from `index` in
    /// exactly one parameter's position.
    pub fn neighbours(&self, index: ConfigIndex) -> Vec<ConfigIndex> {
        let positions = &self.positions[index.0];
        let mut neighbours = Vec::new();
        for (axis, param) in self.parameters.iter().enumerate() {
            for alt in 0..param.len() {
                if alt == positions[axis] {
                    continue;
                }
                let mut candidate = positions.clone();
                candidate[axis] = alt;
                if let Some(&idx) = self.index_of_positions.get(&candidate) {
                    neighbours.push(idx);
                }
            }
        }
        neighbours
    }

    /// Draws an index uniformly from `[0, len)`.
    pub fn sample_uniform_index(&self, rng: &mut impl Rng) -> ConfigIndex {
        ConfigIndex(rng.gen_range(0..self.len()))
    }

    /// Draws a position tuple uniformly from the feasible space by drawing a
    /// random index and decoding it.
    pub fn sample_uniform_positions(&self, rng: &mut impl Rng) -> Vec<usize> {
        self.positions(self.sample_uniform_index(rng)).to_vec()
    }
}
