//! Hierarch: a hierarchical state machine dispatch core
//!
//! Handlers are plain values naming states. A machine keeps one of them
//! current, routes each signal from that leaf up through its ancestors,
//! and runs transitions that fire `Exit` and `Enter` in statechart order.
//! Ancestors are discovered by asking handlers `ParentQuery`, so no parent
//! map has to be maintained; a static [`ParentTable`] is supported for
//! hierarchies that never change shape.
//!
//! Dispatch is synchronous and single-threaded. A handler must not drive
//! its own machine while it is being invoked.
//!
//! # Core Concepts
//!
//! - **State**: identity and label of one handler via the `State` trait
//! - **Signal**: `Enter`, `Exit`, `ParentQuery`, or a domain `Event`
//! - **Response**: `Handled`, `Unhandled`, `Parent(state)`, or `Transition(state)`
//! - **Machine**: the dispatcher owning the current leaf
//!
//! # Example
//!
//! ```rust
//! use hierarch::core::{Handlers, Response, Signal};
//! use hierarch::machine::Machine;
//! use hierarch::state_enum;
//!
//! state_enum! {
//!     enum Radar {
//!         Initial,
//!         Active,
//!         GetTargets,
//!         UpdateDisplay,
//!     }
//! }
//!
//! enum Tick {
//!     Update,
//!     Reset,
//! }
//!
//! struct RadarHandlers {
//!     frames: u32,
//! }
//!
//! impl Handlers for RadarHandlers {
//!     type State = Radar;
//!     type Event = Tick;
//!
//!     fn handle(&mut self, state: Radar, signal: &Signal<Tick>) -> Response<Radar> {
//!         match (state, signal) {
//!             (Radar::Initial, Signal::Enter) => Response::Transition(Radar::GetTargets),
//!             (Radar::Initial, _) => Response::Handled,
//!             (Radar::Active, Signal::Event(Tick::Reset)) => {
//!                 Response::Transition(Radar::GetTargets)
//!             }
//!             (Radar::Active, _) => Response::Handled,
//!             (Radar::GetTargets, Signal::Event(Tick::Update)) => {
//!                 Response::Transition(Radar::UpdateDisplay)
//!             }
//!             (Radar::UpdateDisplay, Signal::Event(Tick::Update)) => {
//!                 self.frames += 1;
//!                 Response::Handled
//!             }
//!             (Radar::GetTargets | Radar::UpdateDisplay, _) => Response::Parent(Radar::Active),
//!         }
//!     }
//! }
//!
//! let mut machine = Machine::new(RadarHandlers { frames: 0 }, Radar::Initial).unwrap();
//! machine.dispatch(Tick::Update).unwrap();
//! machine.dispatch(Tick::Update).unwrap();
//! assert_eq!(machine.current_label(), "UpdateDisplay");
//!
//! machine.dispatch(Tick::Reset).unwrap();
//! assert_eq!(machine.current_label(), "GetTargets");
//! assert_eq!(machine.handlers().frames, 1);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, MachineBuilder};
pub use config::MachineConfig;
pub use crate::core::{Handlers, Lineage, ParentTable, Response, Signal, State};
pub use machine::{Machine, MachineError};
