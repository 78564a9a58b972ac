//! Configurations: total, immutable mappings from parameter name to value.

use std::collections::BTreeMap;

use derive_more::{Deref, DerefMut};
use serde::{Deserialize, Serialize};

/// A stable position of a configuration within its enumerated [`crate::space::Space`].
///
/// Search strategies operate on indices, not configurations directly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deref, DerefMut, Serialize, Deserialize,
)]
pub struct ConfigIndex(pub usize);

/// A total mapping from parameter name to one of its allowed values.
///
/// Equality is by mapping content, independent of any particular ordering.
/// Configurations are immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    values: BTreeMap<String, i64>,
}

impl Configuration {
    pub(crate) fn new(values: BTreeMap<String, i64>) -> Self {
        Configuration { values }
    }

    /// Builds a configuration from name/value pairs. Intended for tests and
    /// for callers constructing one-off configurations outside enumeration.
    pub fn from_pairs(pairs: Vec<(&str, i64)>) -> Self {
        Configuration {
            values: pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.values.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.values.iter().map(|(k, &v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
