//! External interface consumed from the kernel runner (§6).
//!
//! The GPU-API wrapper layer, kernel source manipulation, argument binding,
//! and reference-output validation all live outside this crate. The core
//! only needs a way to ask "compile this configuration and run it" and get
//! back either a runtime or a reason it couldn't.

use crate::configuration::Configuration;
use crate::cost::Cost;

/// Why a configuration could not be timed. The core never distinguishes
/// between these beyond collapsing them all to [`Cost::Infeasible`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfeasibilityKind {
    CompileFailed,
    ResourceExceeded,
    LaunchFailed,
    ValidationFailed,
}

/// Implemented by the external kernel-runner collaborator: compiles and
/// executes one configuration against the reference output and reports a
/// runtime or a reason it is infeasible.
pub trait KernelRunner {
    fn evaluate(&mut self, configuration: &Configuration) -> Result<f64, InfeasibilityKind>;
}

impl From<Result<f64, InfeasibilityKind>> for Cost {
    fn from(result: Result<f64, InfeasibilityKind>) -> Self {
        match result {
            Ok(seconds) => Cost::Measured(seconds),
            Err(_) => Cost::Infeasible,
        }
    }
}
