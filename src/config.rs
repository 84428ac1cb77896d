//! Machine configuration.
//!
//! Defaults reproduce the classic behavior: self-transitions are no-ops and
//! only the resolved initial leaf is entered at bootstrap.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default bound on hierarchy depth and escalation hops.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Default number of transition records kept.
pub const DEFAULT_HISTORY_CAPACITY: usize = 30;

/// What a transition to the current leaf does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfTransition {
    /// Nothing happens; no `Exit` or `Enter` is delivered.
    #[default]
    Ignore,
    /// The leaf receives `Exit` followed by `Enter`.
    Reenter,
}

/// Which handlers receive `Enter` when the machine bootstraps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BootstrapEntry {
    /// Only the resolved initial leaf.
    #[default]
    LeafOnly,
    /// Every handler from the root down to the resolved initial leaf.
    FullPath,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_depth must be at least 1")]
    ZeroMaxDepth,
}

/// Tunables for a [`Machine`](crate::machine::Machine).
///
/// # Example
///
/// ```rust
/// use hierarch::config::{MachineConfig, SelfTransition};
///
/// let config = MachineConfig::default()
///     .with_max_depth(8)
///     .with_self_transition(SelfTransition::Reenter);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Longest ancestor chain accepted before a hierarchy is declared cyclic
    pub max_depth: usize,
    pub self_transition: SelfTransition,
    pub bootstrap_entry: BootstrapEntry,
    /// Transition records retained; zero disables history
    pub history_capacity: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            self_transition: SelfTransition::default(),
            bootstrap_entry: BootstrapEntry::default(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl MachineConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_self_transition(mut self, policy: SelfTransition) -> Self {
        self.self_transition = policy;
        self
    }

    pub fn with_bootstrap_entry(mut self, policy: BootstrapEntry) -> Self {
        self.bootstrap_entry = policy;
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroMaxDepth);
        }
        Ok(())
    }
}
