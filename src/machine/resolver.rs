//! Parent discovery and lineage resolution.

use crate::core::{Handlers, Lineage, ParentTable, Response, Signal, State};
use crate::machine::error::MachineError;
use tracing::error;

/// Parent of `state`, or `None` for a root.
///
/// With a table installed the table is authoritative. Otherwise the
/// handler is asked with `ParentQuery`: `Handled` marks a root and
/// `Parent(p)` names the parent. Anything else is malformed.
pub(crate) fn parent_of<H: Handlers>(
    handlers: &mut H,
    parents: Option<&ParentTable<H::State>>,
    state: H::State,
) -> Result<Option<H::State>, MachineError> {
    if let Some(table) = parents {
        return Ok(table.parent_of(state));
    }

    match handlers.handle(state, &Signal::ParentQuery) {
        Response::Handled => Ok(None),
        Response::Parent(parent) => Ok(Some(parent)),
        response @ (Response::Unhandled | Response::Transition(_)) => {
            error!(
                state = state.name(),
                ?response,
                "handler answered ParentQuery without naming a parent"
            );
            Err(MachineError::MalformedParentAnswer {
                state: state.name().to_string(),
                response: format!("{response:?}"),
            })
        }
    }
}

/// Root-to-leaf ancestor chain of `state`.
///
/// Fails when the chain revisits a state or grows past `max_depth`.
pub(crate) fn resolve_lineage<H: Handlers>(
    handlers: &mut H,
    parents: Option<&ParentTable<H::State>>,
    state: H::State,
    max_depth: usize,
) -> Result<Lineage<H::State>, MachineError> {
    let mut chain = vec![state];
    let mut cursor = state;

    while let Some(parent) = parent_of(handlers, parents, cursor)? {
        if chain.contains(&parent) {
            error!(
                state = state.name(),
                repeated = parent.name(),
                "hierarchy cycle detected"
            );
            return Err(MachineError::HierarchyCycle {
                state: state.name().to_string(),
                repeated: parent.name().to_string(),
            });
        }
        if chain.len() >= max_depth {
            error!(state = state.name(), max_depth, "hierarchy too deep");
            return Err(MachineError::HierarchyTooDeep {
                state: state.name().to_string(),
                max_depth,
            });
        }
        chain.push(parent);
        cursor = parent;
    }

    Ok(Lineage::from_leaf(chain))
}
