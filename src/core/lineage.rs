//! Root-to-leaf ancestor chains.

use super::state::State;
use serde::Serialize;

/// Ordered chain of handlers, root first and leaf last.
///
/// Lineages are computed on demand and never cached across transitions,
/// since a handler's parent may depend on runtime conditions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(bound(serialize = "S: Serialize"))]
pub struct Lineage<S: State> {
    states: Vec<S>,
}

impl<S: State> Lineage<S> {
    /// Build a lineage from states ordered root first.
    pub fn from_root(states: Vec<S>) -> Self {
        Self { states }
    }

    /// Build a lineage from states ordered leaf first, as collected while
    /// walking up a hierarchy.
    pub fn from_leaf(mut states: Vec<S>) -> Self {
        states.reverse();
        Self { states }
    }

    pub fn root(&self) -> Option<S> {
        self.states.first().copied()
    }

    pub fn leaf(&self) -> Option<S> {
        self.states.last().copied()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Depth index of `state` in this chain (root is 0).
    pub fn position(&self, state: S) -> Option<usize> {
        self.states.iter().position(|s| *s == state)
    }

    pub fn contains(&self, state: S) -> bool {
        self.position(state).is_some()
    }

    /// The part of the chain strictly below `index`.
    pub fn below(&self, index: usize) -> &[S] {
        self.states.get(index + 1..).unwrap_or(&[])
    }

    pub fn states(&self) -> &[S] {
        &self.states
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = S> + '_ {
        self.states.iter().copied()
    }

    /// Labels of every state in the chain, root first.
    pub fn names(&self) -> Vec<&str> {
        self.states.iter().map(|s| s.name()).collect()
    }
}

impl<S: State> IntoIterator for Lineage<S> {
    type Item = S;
    type IntoIter = std::vec::IntoIter<S>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.into_iter()
    }
}
