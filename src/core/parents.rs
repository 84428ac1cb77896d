//! Static parent registration.
//!
//! For hierarchies whose shape never changes, parents can be registered
//! once up front instead of being answered through `ParentQuery`. When a
//! table is installed on a machine it is the only source of parentage.

use super::state::State;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while registering parents.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("State '{0}' cannot be its own parent")]
    SelfParent(String),

    #[error("Registering '{parent}' as parent of '{child}' would create a cycle")]
    Cycle { parent: String, child: String },

    #[error("State '{child}' already has parent '{existing}'")]
    AlreadyRegistered { child: String, existing: String },
}

/// Child to parent lookup table.
///
/// # Example
///
/// ```rust
/// use hierarch::core::{ParentTable, State};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Indy { Active, Scan, Assemblers, Refineries }
///
/// impl State for Indy {
///     fn name(&self) -> &str {
///         match self {
///             Self::Active => "Active",
///             Self::Scan => "Scan",
///             Self::Assemblers => "Assemblers",
///             Self::Refineries => "Refineries",
///         }
///     }
/// }
///
/// let mut table = ParentTable::new();
/// table
///     .register_children(Indy::Active, [Indy::Scan, Indy::Assemblers, Indy::Refineries])
///     .unwrap();
///
/// assert_eq!(table.parent_of(Indy::Scan), Some(Indy::Active));
/// assert_eq!(table.parent_of(Indy::Active), None);
/// ```
#[derive(Clone, Debug)]
pub struct ParentTable<S: State> {
    parents: HashMap<S, S>,
}

impl<S: State> Default for ParentTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> ParentTable<S> {
    pub fn new() -> Self {
        Self {
            parents: HashMap::new(),
        }
    }

    /// Declare `parent` as the parent of `child`.
    ///
    /// A child has at most one parent, and no registration may close a cycle.
    pub fn register_child(&mut self, parent: S, child: S) -> Result<(), HierarchyError> {
        if parent == child {
            return Err(HierarchyError::SelfParent(child.name().to_string()));
        }

        if let Some(existing) = self.parents.get(&child) {
            if *existing == parent {
                return Ok(());
            }
            return Err(HierarchyError::AlreadyRegistered {
                child: child.name().to_string(),
                existing: existing.name().to_string(),
            });
        }

        // The table is acyclic before this insert, so walking up from the
        // new parent terminates.
        let mut ancestor = Some(parent);
        while let Some(state) = ancestor {
            if state == child {
                return Err(HierarchyError::Cycle {
                    parent: parent.name().to_string(),
                    child: child.name().to_string(),
                });
            }
            ancestor = self.parents.get(&state).copied();
        }

        self.parents.insert(child, parent);
        Ok(())
    }

    /// Declare `parent` as the parent of every state in `children`.
    pub fn register_children<I>(&mut self, parent: S, children: I) -> Result<(), HierarchyError>
    where
        I: IntoIterator<Item = S>,
    {
        for child in children {
            self.register_child(parent, child)?;
        }
        Ok(())
    }

    /// The registered parent of `state`, or `None` for a root.
    pub fn parent_of(&self, state: S) -> Option<S> {
        self.parents.get(&state).copied()
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}
