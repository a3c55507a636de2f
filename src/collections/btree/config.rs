//! Tree configuration: the minimum degree and the node bounds derived from it.

use super::{TreeError, DEFAULT_DEGREE, MIN_DEGREE};
use serde::{Deserialize, Serialize};

/// Validated shape parameters for a [`BTree`](super::BTree).
///
/// A node holds between `t - 1` and `2t - 1` keys (the root may hold fewer)
/// and, when internal, between `t` and `2t` children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreeConfig {
    minimum_degree: usize,
}

impl TreeConfig {
    /// Creates a configuration with minimum degree `minimum_degree`.
    ///
    /// # Errors
    /// Returns [`TreeError::InvalidConfiguration`] if `minimum_degree` is below
    /// [`MIN_DEGREE`] or `2 * minimum_degree` does not fit in `usize`.
    pub fn new(minimum_degree: usize) -> Result<Self, TreeError> {
        let config = Self { minimum_degree };
        config.validate()?;
        Ok(config)
    }

    /// Re-checks the bounds. Used on configurations that bypassed
    /// [`TreeConfig::new`], e.g. deserialized ones.
    pub(crate) fn validate(self) -> Result<(), TreeError> {
        if self.minimum_degree < MIN_DEGREE || self.minimum_degree.checked_mul(2).is_none() {
            return Err(TreeError::InvalidConfiguration {
                minimum_degree: self.minimum_degree,
            });
        }
        Ok(())
    }

    /// The minimum degree `t`.
    pub fn minimum_degree(&self) -> usize {
        self.minimum_degree
    }

    /// Fewest keys a non-root node may hold: `t - 1`.
    pub fn min_keys(&self) -> usize {
        self.minimum_degree - 1
    }

    /// Most keys any node may hold: `2t - 1`.
    pub fn max_keys(&self) -> usize {
        2 * self.minimum_degree - 1
    }

    /// Most children an internal node may hold: `2t`.
    pub fn max_children(&self) -> usize {
        2 * self.minimum_degree
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            minimum_degree: DEFAULT_DEGREE,
        }
    }
}
