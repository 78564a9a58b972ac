//! Thread-geometry model (C3).
//!
//! Derives global and local work-group dimensions from a configuration's
//! parameter values via multiplicative modifiers applied, in declaration
//! order, on top of a user-provided base geometry.

use contracts::requires;

use crate::configuration::Configuration;
use crate::error::{TuneError, TuneResult};
use crate::param::ParameterRegistry;

/// Which work-size vector a modifier targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadTarget {
    Global,
    Local,
}

/// Whether a modifier multiplies or divides the targeted axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadOp {
    Multiply,
    Divide,
}

/// A directive that scales one axis of the global or local work-size by the
/// current value of a named parameter.
pub struct ThreadModifier {
    pub target: ThreadTarget,
    pub axis: usize,
    pub parameter: String,
    pub op: ThreadOp,
}

impl ThreadModifier {
    pub fn new(
        target: ThreadTarget,
        axis: usize,
        parameter: impl Into<String>,
        op: ThreadOp,
    ) -> Self {
        ThreadModifier {
            target,
            axis,
            parameter: parameter.into(),
            op,
        }
    }
}

/// The effective (global, local) work-size pair produced for a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkGeometry {
    pub global: Vec<usize>,
    pub local: Vec<usize>,
}

impl WorkGeometry {
    /// True iff every axis's local size evenly divides its global size.
    pub fn divides_evenly(&self) -> bool {
        self.global
            .iter()
            .zip(&self.local)
            .all(|(&g, &l)| l != 0 && g % l == 0)
    }
}

/// Base geometry plus the ordered list of modifiers applied on top of it.
pub struct ThreadGeometryModel {
    base_global: Vec<usize>,
    base_local: Vec<usize>,
    modifiers: Vec<ThreadModifier>,
}

impl ThreadGeometryModel {
    #[requires((1..=3).contains(&base_global.len()), "global work-size must have 1-3 axes")]
    #[requires((1..=3).contains(&base_local.len()), "local work-size must have 1-3 axes")]
    pub fn new(base_global: Vec<usize>, base_local: Vec<usize>) -> Self {
        ThreadGeometryModel {
            base_global,
            base_local,
            modifiers: Vec::new(),
        }
    }

    /// Adds a modifier. `parameter` must already be registered; an unknown
    /// name is a configuration error detected here.
    pub fn add_modifier(
        &mut self,
        registry: &ParameterRegistry,
        modifier: ThreadModifier,
    ) -> TuneResult<()> {
        if registry.index_of(&modifier.parameter).is_none() {
            return Err(TuneError::UnknownParameter {
                context: "thread modifier",
                name: modifier.parameter,
            });
        }
        self.modifiers.push(modifier);
        Ok(())
    }

    /// Applies every modifier, in declaration order, to the base geometry
    /// using `configuration`'s parameter values.
    pub fn effective(&self, configuration: &Configuration) -> WorkGeometry {
        let mut global = self.base_global.clone();
        let mut local = self.base_local.clone();

        for modifier in &self.modifiers {
            let value = configuration
                .get(&modifier.parameter)
                .expect("modifier parameter was validated against the registry at add time");
            let axes = match modifier.target {
                ThreadTarget::Global => &mut global,
                ThreadTarget::Local => &mut local,
            };
            let Some(axis) = axes.get_mut(modifier.axis) else {
                continue;
            };
            match modifier.op {
                ThreadOp::Multiply => *axis = axis.saturating_mul(value.max(0) as usize),
                ThreadOp::Divide if value != 0 => *axis /= value as usize,
                ThreadOp::Divide => {}
            }
        }

        WorkGeometry { global, local }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ParameterRegistry {
        let mut reg = ParameterRegistry::new();
        reg.add("TS", vec![8, 16, 32]).unwrap();
        reg.add("WPT", vec![1, 2, 4]).unwrap();
        reg
    }

    #[test]
    fn applies_modifiers_in_order() {
        let reg = registry();
        let mut model = ThreadGeometryModel::new(vec![1024], vec![8]);
        model
            .add_modifier(
                &reg,
                ThreadModifier::new(ThreadTarget::Local, 0, "TS", ThreadOp::Multiply),
            )
            .unwrap();
        model
            .add_modifier(
                &reg,
                ThreadModifier::new(ThreadTarget::Global, 0, "WPT", ThreadOp::Divide),
            )
            .unwrap();

        let config = Configuration::from_pairs(vec![("TS", 16), ("WPT", 2)]);
        let geometry = model.effective(&config);
        assert_eq!(geometry.local, vec![128]); // 8 * 16
        assert_eq!(geometry.global, vec![512]); // 1024 / 2
    }

    #[test]
    fn rejects_unknown_modifier_parameter() {
        let reg = registry();
        let mut model = ThreadGeometryModel::new(vec![1024], vec![8]);
        let err = model
            .add_modifier(
                &reg,
                ThreadModifier::new(ThreadTarget::Local, 0, "NOPE", ThreadOp::Multiply),
            )
            .unwrap_err();
        assert_eq!(
            err,
            TuneError::UnknownParameter {
                context: "thread modifier",
                name: "NOPE".into()
            }
        );
    }

    #[test]
    fn divides_evenly_invariant() {
        let geometry = WorkGeometry {
            global: vec![1024, 64],
            local: vec![128, 16],
        };
        assert!(geometry.divides_evenly());
        let bad = WorkGeometry {
            global: vec![1000],
            local: vec![128],
        };
        assert!(!bad.divides_evenly());
    }
}
