//! Core hierarchical state machine types.
//!
//! This module contains the vocabulary shared by every machine:
//! - State identities via the `State` trait
//! - Signals and the responses handlers return
//! - The `Handlers` trait a domain implements
//! - Lineages, static parent tables, and transition history
//!
//! Nothing here drives a machine; see [`crate::machine`] for dispatch.

mod handlers;
mod history;
mod lineage;
mod parents;
mod signal;
mod state;

pub use handlers::{from_fn, FnHandlers, Handlers};
pub use history::{TransitionHistory, TransitionRecord};
pub use lineage::Lineage;
pub use parents::{HierarchyError, ParentTable};
pub use signal::{Response, Signal};
pub use state::State;
