//! Signals delivered into a machine and the responses handlers return.

use super::state::State;

/// A value dispatched into the machine.
///
/// `Enter`, `Exit` and `ParentQuery` are reserved for the core. Everything a
/// domain raises travels as `Event`, whose payload is opaque to the core.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Signal<E> {
    /// The handler is becoming part of the active path.
    Enter,
    /// The handler is leaving the active path.
    Exit,
    /// Asks a handler to name its parent.
    ParentQuery,
    /// A domain-defined signal.
    Event(E),
}

impl<E> Signal<E> {
    /// True for the three signals reserved by the core.
    pub fn is_reserved(&self) -> bool {
        !matches!(self, Self::Event(_))
    }

    /// The domain payload, if this is a domain signal.
    pub fn event(&self) -> Option<&E> {
        match self {
            Self::Event(event) => Some(event),
            _ => None,
        }
    }

    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Enter => "Enter",
            Self::Exit => "Exit",
            Self::ParentQuery => "ParentQuery",
            Self::Event(_) => "Event",
        }
    }
}

impl<E> From<E> for Signal<E> {
    fn from(event: E) -> Self {
        Self::Event(event)
    }
}

/// Outcome of delivering one signal to one handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Response<S: State> {
    /// The signal was fully processed.
    Handled,

    /// Not processed here; escalate to whatever parent is known for this
    /// handler. With a parent table installed the table is consulted,
    /// otherwise the parent is discovered with `ParentQuery`. A root that
    /// answers `Unhandled` drops the signal.
    Unhandled,

    /// Not processed here; this is my parent. Answers `ParentQuery` and
    /// escalates any other signal to the named handler.
    Parent(S),

    /// Make the named handler the active leaf.
    Transition(S),
}

impl<S: State> Response<S> {
    /// The handler reference carried by `Parent` or `Transition`.
    pub fn target(&self) -> Option<S> {
        match self {
            Self::Parent(state) | Self::Transition(state) => Some(*state),
            Self::Handled | Self::Unhandled => None,
        }
    }

    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handled)
    }
}
