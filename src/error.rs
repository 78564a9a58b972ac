//! Error types raised by the tuning core.
//!
//! Infeasibility reported by the kernel runner is data, not an error, and is
//! represented by [`crate::cost::Cost::Infeasible`] instead. Everything in
//! this module is fatal for the current tuning session.

use thiserror::Error;

/// Errors raised while building a search space or constructing a searcher.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TuneError {
    /// A parameter with this name was already added to the registry.
    #[error("parameter `{0}` is already registered")]
    DuplicateParameter(String),

    /// A constraint or thread modifier named a parameter that was never registered.
    #[error("{context} references unknown parameter `{name}`")]
    UnknownParameter {
        /// What referenced the parameter, e.g. `"constraint"` or `"thread modifier"`.
        context: &'static str,
        name: String,
    },

    /// Enumeration produced zero feasible configurations.
    #[error("search space is empty after applying constraints")]
    EmptySearchSpace,

    /// Strategy options failed validation (out-of-range fraction, temperature, weights, ...).
    #[error("invalid strategy options: {0}")]
    InvalidStrategyOptions(String),
}

/// Convenience alias for fallible core operations.
pub type TuneResult<T> = Result<T, TuneError>;
