//! Configuration for the solver entry points.
//!
//! `SolverConfig` centralizes the behavioral knobs shared by both entry
//! points so callers can tune the edge store without touching the search.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Per-left-vertex cap on retained edges. `None` selects the default cap
    /// (the engine-side left vertex count), which is the largest cap known to
    /// preserve an optimal matching. Smaller caps shrink the edge store but
    /// may cost optimality.
    pub retention_cap: Option<usize>,
    /// Seed the search with a greedy pass over tight edges before the first
    /// augmentation. Correctness-neutral; typically matches a large fraction
    /// of vertices immediately.
    pub greedy_seed: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            retention_cap: None,
            greedy_seed: true,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retention_cap == Some(0) {
            return Err(ConfigError::ZeroRetentionCap);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("retention_cap must be at least 1")]
    ZeroRetentionCap,
}
