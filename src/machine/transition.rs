//! Exit/entry planning for transitions between leaves.

use crate::core::{Lineage, State};

/// The notifications a transition delivers, in order.
///
/// `exits` runs leaf to root and stops below the least common ancestor;
/// `entries` runs from just below that ancestor down to the target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionPlan<S: State> {
    pub exits: Vec<S>,
    pub entries: Vec<S>,
}

impl<S: State> TransitionPlan<S> {
    /// Plan the move from the leaf of `source` to the leaf of `target`.
    ///
    /// Walks upward from the source leaf. The first state found in the
    /// target lineage is the common ancestor: it is neither exited nor
    /// entered, and only the target states below it are entered. With no
    /// common ancestor the whole source chain is exited and the whole
    /// target chain entered.
    ///
    /// States in unrelated trees (separate roots) are exited and entered in full.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hierarch::core::{Lineage, State};
    /// use hierarch::machine::TransitionPlan;
    ///
    /// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    /// enum S { Root, Mid, A, C }
    ///
    /// impl State for S {
    ///     fn name(&self) -> &str {
    ///         match self {
    ///             Self::Root => "Root",
    ///             Self::Mid => "Mid",
    ///             Self::A => "A",
    ///             Self::C => "C",
    ///         }
    ///     }
    /// }
    ///
    /// let source = Lineage::from_root(vec![S::Root, S::Mid, S::A]);
    /// let target = Lineage::from_root(vec![S::Root, S::Mid, S::C]);
    /// let plan = TransitionPlan::between(&source, &target);
    ///
    /// assert_eq!(plan.exits, vec![S::A]);
    /// assert_eq!(plan.entries, vec![S::C]);
    /// ```
    pub fn between(source: &Lineage<S>, target: &Lineage<S>) -> Self {
        let mut exits = Vec::new();

        for state in source.iter().rev() {
            if let Some(index) = target.position(state) {
                return Self {
                    exits,
                    entries: target.below(index).to_vec(),
                };
            }
            exits.push(state);
        }

        Self {
            exits,
            entries: target.states().to_vec(),
        }
    }

    /// Exit and re-enter a single leaf.
    pub fn reenter(state: S) -> Self {
        Self {
            exits: vec![state],
            entries: vec![state],
        }
    }
}
