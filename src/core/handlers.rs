//! The set of state handlers a machine routes signals to.

use super::signal::{Response, Signal};
use super::state::State;
use std::marker::PhantomData;

/// A domain's collection of state handlers.
///
/// `handle` runs the handler named by `state` for one signal. Every handler
/// must answer every signal, and answering `ParentQuery` must not change
/// anything: the machine asks it freely while resolving lineages.
///
/// Handlers own whatever domain data they need as fields of the
/// implementing type. A handler must never drive its own machine from
/// inside `handle`.
///
/// # Example
///
/// ```rust
/// use hierarch::core::{Handlers, Response, Signal, State};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Lamp { Initial, Powered, On, Off }
///
/// impl State for Lamp {
///     fn name(&self) -> &str {
///         match self {
///             Self::Initial => "Initial",
///             Self::Powered => "Powered",
///             Self::On => "On",
///             Self::Off => "Off",
///         }
///     }
/// }
///
/// struct LampHandlers;
///
/// impl Handlers for LampHandlers {
///     type State = Lamp;
///     type Event = ();
///
///     fn handle(&mut self, state: Lamp, signal: &Signal<()>) -> Response<Lamp> {
///         match (state, signal) {
///             (Lamp::Initial, Signal::Enter) => Response::Transition(Lamp::Off),
///             (Lamp::Powered, _) => Response::Handled,
///             (Lamp::On, Signal::Event(())) => Response::Transition(Lamp::Off),
///             (Lamp::Off, Signal::Event(())) => Response::Transition(Lamp::On),
///             (Lamp::On | Lamp::Off, _) => Response::Parent(Lamp::Powered),
///             (Lamp::Initial, _) => Response::Handled,
///         }
///     }
/// }
/// ```
pub trait Handlers {
    /// Names one handler of this set.
    type State: State;
    /// Domain payload carried by `Signal::Event`.
    type Event;

    fn handle(&mut self, state: Self::State, signal: &Signal<Self::Event>)
        -> Response<Self::State>;
}

/// Handler set backed by a single closure.
///
/// Built by [`from_fn`].
pub struct FnHandlers<S, E, F> {
    func: F,
    _phantom: PhantomData<fn(S, &E)>,
}

impl<S, E, F> Handlers for FnHandlers<S, E, F>
where
    S: State,
    F: FnMut(S, &Signal<E>) -> Response<S>,
{
    type State = S;
    type Event = E;

    fn handle(&mut self, state: S, signal: &Signal<E>) -> Response<S> {
        (self.func)(state, signal)
    }
}

/// Build a handler set from a closure over `(state, signal)`.
///
/// # Example
///
/// ```rust
/// use hierarch::core::{from_fn, Handlers, Response, Signal, State};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Door { Closed }
///
/// impl State for Door {
///     fn name(&self) -> &str { "Closed" }
/// }
///
/// let mut handlers = from_fn(|_state: Door, _signal: &Signal<()>| Response::Handled);
/// assert!(handlers.handle(Door::Closed, &Signal::Enter).is_handled());
/// ```
pub fn from_fn<S, E, F>(func: F) -> FnHandlers<S, E, F>
where
    S: State,
    F: FnMut(S, &Signal<E>) -> Response<S>,
{
    FnHandlers {
        func,
        _phantom: PhantomData,
    }
}
