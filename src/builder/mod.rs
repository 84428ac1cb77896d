//! Builder API for ergonomic machine construction.
//!
//! This module provides a fluent builder and the `state_enum!` macro for
//! declaring handler identities with minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::MachineBuilder;

use crate::core::{Handlers, ParentTable};

/// Build a machine over a static hierarchy given as `(parent, children)`
/// groups.
///
/// # Example
///
/// ```
/// use hierarch::builder::with_parents;
/// use hierarch::core::{from_fn, Response, Signal};
/// use hierarch::state_enum;
///
/// state_enum! {
///     enum Indy {
///         Initial,
///         Active,
///         Scan,
///         Report,
///     }
/// }
///
/// let handlers = from_fn(|state: Indy, signal: &Signal<()>| match (state, signal) {
///     (Indy::Initial, Signal::Enter) => Response::Transition(Indy::Scan),
///     (Indy::Scan, Signal::Event(())) => Response::Transition(Indy::Report),
///     (Indy::Report, Signal::Event(())) => Response::Transition(Indy::Scan),
///     (Indy::Scan | Indy::Report, _) => Response::Unhandled,
///     _ => Response::Handled,
/// });
///
/// let mut machine = with_parents(
///     handlers,
///     Indy::Initial,
///     [(Indy::Active, vec![Indy::Scan, Indy::Report])],
/// )
/// .unwrap();
///
/// machine.dispatch(()).unwrap();
/// assert_eq!(machine.current_label(), "Report");
/// ```
pub fn with_parents<H, I, C>(
    handlers: H,
    initial: H::State,
    groups: I,
) -> Result<crate::machine::Machine<H>, BuildError>
where
    H: Handlers,
    I: IntoIterator<Item = (H::State, C)>,
    C: IntoIterator<Item = H::State>,
{
    let mut table = ParentTable::new();
    for (parent, children) in groups {
        table.register_children(parent, children)?;
    }

    MachineBuilder::new(handlers)
        .initial(initial)
        .parents(table)
        .build()
}
