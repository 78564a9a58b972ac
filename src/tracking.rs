//! Tracking and logging of a tuning session's progress.
//!
//! Mirrors the shape of a conventional evaluation log: one entry per
//! observation, with an optional stride so only every Nth evaluation is
//! retained for long runs. The final entry is always kept.

use serde::{Deserialize, Serialize};

use crate::configuration::ConfigIndex;
use crate::cost::Cost;

/// A single logged observation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EvaluationEntry {
    pub evaluation: u32,
    pub index: ConfigIndex,
    pub cost: Cost,
    pub best_cost: Option<f64>,
}

/// Accumulates [`EvaluationEntry`] records for a tuning session.
pub struct TuningLog {
    stride: u32,
    count: u32,
    entries: Vec<EvaluationEntry>,
    pending: Option<EvaluationEntry>,
}

impl TuningLog {
    /// Logs every evaluation.
    pub fn new() -> Self {
        Self::every(1)
    }

    /// Logs only every `stride`-th evaluation, always keeping the last one
    /// once [`TuningLog::finalize`] is called.
    pub fn every(stride: u32) -> Self {
        TuningLog {
            stride: stride.max(1),
            count: 0,
            entries: Vec::new(),
            pending: None,
        }
    }

    pub fn log_evaluation(&mut self, index: ConfigIndex, cost: Cost, best_cost: Option<f64>) {
        self.count += 1;
        let entry = EvaluationEntry {
            evaluation: self.count,
            index,
            cost,
            best_cost,
        };
        if self.count % self.stride == 0 {
            self.entries.push(entry);
            self.pending = None;
        } else {
            self.pending = Some(entry);
        }
    }

    /// Ensures the final evaluation is retained even if it fell between
    /// logging strides.
    pub fn finalize(&mut self) {
        if let Some(entry) = self.pending.take() {
            self.entries.push(entry);
        }
    }

    pub fn entries(&self) -> &[EvaluationEntry] {
        &self.entries
    }

    /// Serializes the log in RON, matching the rest of the core's
    /// human-readable configuration and result formats.
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(&self.entries, ron::ser::PrettyConfig::default())
    }
}

impl Default for TuningLog {
    fn default() -> Self {
        Self::new()
    }
}
