//! Bounded transition history.
//!
//! Keeps the most recent completed transitions for diagnostics. When the
//! history is full the oldest record is evicted.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use std::time::Duration;

/// Record of one completed transition.
///
/// `exited` is in delivery order (leaf to root), as is `entered` (root to
/// leaf).
///
/// # Example
///
/// ```rust
/// use hierarch::core::{State, TransitionRecord};
/// use chrono::Utc;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Light { Red, Green }
///
/// impl State for Light {
///     fn name(&self) -> &str {
///         match self {
///             Self::Red => "Red",
///             Self::Green => "Green",
///         }
///     }
/// }
///
/// let record = TransitionRecord {
///     from: Light::Red,
///     to: Light::Green,
///     exited: vec![Light::Red],
///     entered: vec![Light::Green],
///     timestamp: Utc::now(),
/// };
/// assert!(!record.is_self_transition());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(bound(serialize = "S: Serialize"))]
pub struct TransitionRecord<S: State> {
    /// The leaf active before the transition
    pub from: S,
    /// The leaf active after the transition
    pub to: S,
    /// Handlers that received `Exit`
    pub exited: Vec<S>,
    /// Handlers that received `Enter`
    pub entered: Vec<S>,
    /// When the transition completed
    pub timestamp: DateTime<Utc>,
}

impl<S: State> TransitionRecord<S> {
    pub fn is_self_transition(&self) -> bool {
        self.from == self.to
    }
}

/// Ring of the most recent transition records, oldest first.
///
/// # Example
///
/// ```rust
/// use hierarch::core::{State, TransitionHistory, TransitionRecord};
/// use chrono::Utc;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Step { A, B, C }
///
/// impl State for Step {
///     fn name(&self) -> &str {
///         match self {
///             Self::A => "A",
///             Self::B => "B",
///             Self::C => "C",
///         }
///     }
/// }
///
/// let mut history = TransitionHistory::with_capacity(1);
/// for (from, to) in [(Step::A, Step::B), (Step::B, Step::C)] {
///     history.record(TransitionRecord {
///         from,
///         to,
///         exited: vec![from],
///         entered: vec![to],
///         timestamp: Utc::now(),
///     });
/// }
///
/// assert_eq!(history.len(), 1);
/// assert_eq!(history.latest().map(|r| r.to), Some(Step::C));
/// ```
#[derive(Clone, Debug, Serialize)]
#[serde(bound(serialize = "S: Serialize"))]
pub struct TransitionHistory<S: State> {
    capacity: usize,
    records: VecDeque<TransitionRecord<S>>,
}

impl<S: State> TransitionHistory<S> {
    /// Create an empty history holding at most `capacity` records.
    ///
    /// A capacity of zero disables recording. Storage grows with use up
    /// to `capacity`; nothing is reserved up front.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            records: VecDeque::new(),
        }
    }

    /// Append a record, evicting the oldest one when full.
    pub fn record(&mut self, record: TransitionRecord<S>) {
        if self.capacity == 0 {
            return;
        }
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn records(&self) -> impl DoubleEndedIterator<Item = &TransitionRecord<S>> + '_ {
        self.records.iter()
    }

    pub fn latest(&self) -> Option<&TransitionRecord<S>> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Leaves visited across the retained records.
    ///
    /// Returns the `from` of the oldest record followed by the `to` of
    /// every record.
    pub fn get_path(&self) -> Vec<S> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(first.from);
        }
        path.extend(self.records.iter().map(|r| r.to));
        path
    }

    /// Time between the oldest and newest retained records.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }
}
