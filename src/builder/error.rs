//! Build errors for the machine builder.

use crate::config::ConfigError;
use crate::core::HierarchyError;
use crate::machine::MachineError;
use thiserror::Error;

/// Errors that can occur when building a machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Invalid parent registration: {0}")]
    InvalidHierarchy(#[from] HierarchyError),

    #[error("Bootstrap failed: {0}")]
    Bootstrap(#[from] MachineError),
}
