//! Faults detected by the dispatch core.
//!
//! These are programming errors in a handler set (an ill-formed hierarchy,
//! a bootstrap that goes nowhere). They are reported, never recovered.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MachineError {
    #[error("Initial state '{initial}' answered Enter with {response} instead of a transition")]
    BootstrapDidNotTransition { initial: String, response: String },

    #[error("State '{state}' answered ParentQuery with {response}")]
    MalformedParentAnswer { state: String, response: String },

    #[error("Ancestor chain of '{state}' revisits '{repeated}'")]
    HierarchyCycle { state: String, repeated: String },

    #[error("Ancestor chain of '{state}' exceeds maximum depth {max_depth}")]
    HierarchyTooDeep { state: String, max_depth: usize },

    #[error("Signal {signal} from '{state}' escalated more than {max_depth} levels")]
    EscalationTooDeep {
        state: String,
        signal: &'static str,
        max_depth: usize,
    },
}

impl MachineError {
    /// True for faults caused by the shape of the hierarchy.
    pub fn is_structural(&self) -> bool {
        !matches!(self, Self::BootstrapDidNotTransition { .. })
    }
}
