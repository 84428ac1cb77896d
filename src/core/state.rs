//! The `State` trait naming individual state handlers.
//!
//! A state value is the handler's identity: it is compared to decide
//! whether two handlers are the same, used as a key in parent tables,
//! and rendered as a label for logging.

use std::fmt::Debug;
use std::hash::Hash;

/// Identity of one state handler.
///
/// Implementors are normally fieldless enums, one variant per handler.
/// Equality must be identity equality: two values are equal only when
/// they name the same handler.
///
/// # Example
///
/// ```rust
/// use hierarch::core::State;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Radar {
///     Initial,
///     Active,
///     Scan,
/// }
///
/// impl State for Radar {
///     fn name(&self) -> &str {
///         match self {
///             Self::Initial => "Initial",
///             Self::Active => "Active",
///             Self::Scan => "Scan",
///         }
///     }
/// }
///
/// assert_eq!(Radar::Scan.name(), "Scan");
/// ```
pub trait State: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Stable human-readable label for display and logging.
    ///
    /// Never consulted by dispatch or transition logic.
    fn name(&self) -> &str;
}
