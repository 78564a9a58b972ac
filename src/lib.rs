//! Auto-tuner core for parameterized GPU compute kernels.
//!
//! This crate implements the search-space construction and search-strategy
//! subsystem of a kernel auto-tuner: a constraint model over named integer
//! parameters, a thread-geometry model deriving work dimensions from those
//! parameters, a combinatorial enumerator, and four pluggable search
//! strategies (full, random, simulated annealing, particle swarm) that
//! traverse the enumerated space using measured execution times as an
//! objective.
//!
//! What this crate does *not* do: produce kernel source, compile or launch
//! anything on a device, validate kernel output, or provide a command-line
//! front-end. Those are external collaborators; this crate only needs
//! [`runner::KernelRunner`] from them.
//!
//! A typical session:
//!
//! ```
//! use kerneltune::space::SpaceBuilder;
//! use kerneltune::search::StrategyOptions;
//! use kerneltune::session::TuningSession;
//! use kerneltune::runner::{KernelRunner, InfeasibilityKind};
//! use kerneltune::configuration::Configuration;
//! use kerneltune::tracking::TuningLog;
//!
//! struct ConstantRunner;
//! impl KernelRunner for ConstantRunner {
//!     fn evaluate(&mut self, config: &Configuration) -> Result<f64, InfeasibilityKind> {
//!         Ok(config.get("TS").unwrap() as f64)
//!     }
//! }
//!
//! let mut builder = SpaceBuilder::new();
//! builder.add_parameter("TS", vec![8, 16, 32]).unwrap();
//! let session = TuningSession::build(builder).unwrap();
//! let searcher = session.searcher(StrategyOptions::Full).unwrap();
//! let mut log = TuningLog::new();
//! let ranked = session.run(searcher, &mut ConstantRunner, &mut log);
//! assert_eq!(ranked[0].cost.as_f64(), 8.0);
//! ```

pub mod configuration;
pub mod constraint;
pub mod cost;
pub mod error;
pub mod geometry;
pub mod param;
pub mod random;
pub mod runner;
pub mod search;
pub mod session;
pub mod space;
pub mod tracking;

pub use configuration::{ConfigIndex, Configuration};
pub use cost::{Cost, History, MeasuredPoint};
pub use error::{TuneError, TuneResult};
pub use search::{Searcher, StrategyOptions};
pub use space::{Space, SpaceBuilder};
