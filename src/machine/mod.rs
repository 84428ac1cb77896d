//! Signal dispatch and transitions.
//!
//! The [`Machine`] owns the single active leaf. It routes each signal from
//! that leaf up through its ancestors, and runs transitions that deliver
//! `Exit` leaf to root and `Enter` root to leaf, never touching the least
//! common ancestor of the old and new leaves.
//!
//! # Parent discovery
//!
//! By default a handler's parent is discovered by asking it `ParentQuery`,
//! so parentage may depend on runtime conditions. Installing a
//! [`ParentTable`](crate::core::ParentTable) through
//! [`MachineBuilder`](crate::builder::MachineBuilder) replaces the queries
//! with table lookups.

mod dispatcher;
mod error;
mod resolver;
mod transition;

pub use dispatcher::Machine;
pub use error::MachineError;
pub use transition::TransitionPlan;
