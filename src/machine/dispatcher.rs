//! The dispatcher: owns the active leaf, escalates signals, runs transitions.

use crate::config::{BootstrapEntry, MachineConfig, SelfTransition};
use crate::core::{
    Handlers, Lineage, ParentTable, Response, Signal, State, TransitionHistory, TransitionRecord,
};
use crate::machine::error::MachineError;
use crate::machine::resolver::{parent_of, resolve_lineage};
use crate::machine::transition::TransitionPlan;
use chrono::Utc;
use tracing::{debug, error, trace, warn};

/// Hierarchical state machine over a set of handlers.
///
/// Exactly one handler is current at any time. Signals go to the current
/// leaf first and bubble up its ancestors until one handles them or asks
/// for a transition. `current` changes only inside a transition and is
/// always settled when [`handle`](Self::handle) returns.
///
/// # Example
///
/// ```rust
/// use hierarch::core::{Handlers, Response, Signal, State};
/// use hierarch::machine::Machine;
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
/// struct Toggle;
///
/// struct LampHandlers {
///     switched: usize,
/// }
///
/// impl Handlers for LampHandlers {
///     type State = Lamp;
///     type Event = Toggle;
///
///     fn handle(&mut self, state: Lamp, signal: &Signal<Toggle>) -> Response<Lamp> {
///         match (state, signal) {
///             (Lamp::Initial, Signal::Enter) => Response::Transition(Lamp::Off),
///             (Lamp::Initial, _) | (Lamp::Powered, _) => Response::Handled,
///             (_, Signal::Enter) => {
///                 self.switched += 1;
///                 Response::Handled
///             }
///             (Lamp::On, Signal::Event(Toggle)) => Response::Transition(Lamp::Off),
///             (Lamp::Off, Signal::Event(Toggle)) => Response::Transition(Lamp::On),
///             (Lamp::On | Lamp::Off, _) => Response::Parent(Lamp::Powered),
///         }
///     }
/// }
///
/// let mut machine = Machine::new(LampHandlers { switched: 0 }, Lamp::Initial).unwrap();
/// assert_eq!(machine.current_label(), "Off");
///
/// machine.dispatch(Toggle).unwrap();
/// assert_eq!(machine.current(), Lamp::On);
/// assert_eq!(machine.handlers().switched, 2);
/// ```
pub struct Machine<H: Handlers> {
    handlers: H,
    current: H::State,
    parents: Option<ParentTable<H::State>>,
    config: MachineConfig,
    history: TransitionHistory<H::State>,
}

impl<H: Handlers> Machine<H> {
    /// Create a machine with default configuration and dynamic parent
    /// discovery, then bootstrap it from `initial`.
    ///
    /// `initial` is a pseudo-handler whose only job is to answer `Enter`
    /// with a transition to the real starting leaf.
    pub fn new(handlers: H, initial: H::State) -> Result<Self, MachineError> {
        Self::assemble(handlers, initial, MachineConfig::default(), None)
    }

    pub(crate) fn assemble(
        handlers: H,
        initial: H::State,
        config: MachineConfig,
        parents: Option<ParentTable<H::State>>,
    ) -> Result<Self, MachineError> {
        let history = TransitionHistory::with_capacity(config.history_capacity);
        let mut machine = Self {
            handlers,
            current: initial,
            parents,
            config,
            history,
        };
        machine.bootstrap()?;
        Ok(machine)
    }

    fn bootstrap(&mut self) -> Result<(), MachineError> {
        let initial = self.current;

        let target = match self.handlers.handle(initial, &Signal::Enter) {
            Response::Transition(target) => target,
            response => {
                error!(initial = initial.name(), ?response, "bootstrap did not transition");
                return Err(MachineError::BootstrapDidNotTransition {
                    initial: initial.name().to_string(),
                    response: format!("{response:?}"),
                });
            }
        };

        let entries = match self.config.bootstrap_entry {
            BootstrapEntry::LeafOnly => vec![target],
            BootstrapEntry::FullPath => self.lineage(target)?.into_iter().collect(),
        };

        self.apply(
            initial,
            target,
            TransitionPlan {
                exits: Vec::new(),
                entries,
            },
        );
        Ok(())
    }

    /// Deliver `signal` to the current leaf, escalating to ancestors until
    /// it is handled or a transition is requested.
    ///
    /// The same signal is redelivered at each level, strictly leaf to root.
    pub fn handle(&mut self, signal: Signal<H::Event>) -> Result<(), MachineError> {
        let mut state = self.current;
        let mut hops = 0;

        loop {
            let response = self.handlers.handle(state, &signal);
            trace!(
                state = state.name(),
                signal = signal.kind(),
                ?response,
                "signal delivered"
            );

            let next = match response {
                Response::Handled => return Ok(()),
                Response::Transition(target) => return self.transition(target),
                Response::Parent(parent) => parent,
                Response::Unhandled => match self.parent_of(state)? {
                    Some(parent) => parent,
                    None => {
                        trace!(state = state.name(), "signal unhandled at root");
                        return Ok(());
                    }
                },
            };

            hops += 1;
            if hops >= self.config.max_depth {
                error!(
                    state = self.current.name(),
                    signal = signal.kind(),
                    max_depth = self.config.max_depth,
                    "escalation exceeded maximum depth"
                );
                return Err(MachineError::EscalationTooDeep {
                    state: self.current.name().to_string(),
                    signal: signal.kind(),
                    max_depth: self.config.max_depth,
                });
            }
            state = next;
        }
    }

    /// Deliver a domain event. Shorthand for `handle(Signal::Event(event))`.
    pub fn dispatch(&mut self, event: H::Event) -> Result<(), MachineError> {
        self.handle(Signal::Event(event))
    }

    fn transition(&mut self, target: H::State) -> Result<(), MachineError> {
        let from = self.current;

        let plan = if from == target {
            match self.config.self_transition {
                SelfTransition::Ignore => {
                    trace!(state = target.name(), "self-transition ignored");
                    return Ok(());
                }
                SelfTransition::Reenter => TransitionPlan::reenter(target),
            }
        } else {
            // Both chains are resolved before any Exit fires so a structural
            // fault leaves `current` untouched.
            let target_lineage = self.lineage(target)?;
            let source_lineage = self.lineage(from)?;
            TransitionPlan::between(&source_lineage, &target_lineage)
        };

        self.apply(from, target, plan);
        Ok(())
    }

    fn apply(&mut self, from: H::State, target: H::State, plan: TransitionPlan<H::State>) {
        for &state in &plan.exits {
            self.notify(state, Signal::Exit);
        }
        for &state in &plan.entries {
            self.notify(state, Signal::Enter);
        }

        self.current = target;

        debug!(
            from = from.name(),
            to = target.name(),
            exited = plan.exits.len(),
            entered = plan.entries.len(),
            "transition complete"
        );

        self.history.record(TransitionRecord {
            from,
            to: target,
            exited: plan.exits,
            entered: plan.entries,
            timestamp: Utc::now(),
        });
    }

    // Enter/Exit go straight to the handler on the path; answers are not acted on.
    fn notify(&mut self, state: H::State, signal: Signal<H::Event>) {
        let response = self.handlers.handle(state, &signal);
        if let Response::Transition(requested) = response {
            warn!(
                state = state.name(),
                signal = signal.kind(),
                requested = requested.name(),
                "transition requested during entry/exit was discarded"
            );
        }
    }

    fn parent_of(&mut self, state: H::State) -> Result<Option<H::State>, MachineError> {
        parent_of(&mut self.handlers, self.parents.as_ref(), state)
    }

    /// Root-to-leaf ancestor chain of `state`, resolved now.
    pub fn lineage(&mut self, state: H::State) -> Result<Lineage<H::State>, MachineError> {
        resolve_lineage(
            &mut self.handlers,
            self.parents.as_ref(),
            state,
            self.config.max_depth,
        )
    }

    /// Ancestor chain of the current leaf.
    pub fn current_lineage(&mut self) -> Result<Lineage<H::State>, MachineError> {
        self.lineage(self.current)
    }

    /// True when `state` is the current leaf or one of its ancestors.
    pub fn is_in(&mut self, state: H::State) -> Result<bool, MachineError> {
        if state == self.current {
            return Ok(true);
        }
        Ok(self.current_lineage()?.contains(state))
    }

    pub fn current(&self) -> H::State {
        self.current
    }

    /// Label of the current leaf, for logging and display only.
    pub fn current_label(&self) -> &str {
        self.current.name()
    }

    pub fn history(&self) -> &TransitionHistory<H::State> {
        &self.history
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn parents(&self) -> Option<&ParentTable<H::State>> {
        self.parents.as_ref()
    }

    pub fn handlers(&self) -> &H {
        &self.handlers
    }

    /// Mutable access to domain data held by the handlers.
    ///
    /// Does not change which handler is current.
    pub fn handlers_mut(&mut self) -> &mut H {
        &mut self.handlers
    }

    pub fn into_handlers(self) -> H {
        self.handlers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::from_fn;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum TestState {
        Initial,
        Root,
        Mid,
        A,
        C,
        Stuck,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Initial => "Initial",
                Self::Root => "Root",
                Self::Mid => "Mid",
                Self::A => "A",
                Self::C => "C",
                Self::Stuck => "Stuck",
            }
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    enum Event {
        Go(TestState),
        Ping,
    }

    #[derive(Default)]
    struct Recorder {
        log: Vec<String>,
    }

    impl Handlers for Recorder {
        type State = TestState;
        type Event = Event;

        fn handle(&mut self, state: TestState, signal: &Signal<Event>) -> Response<TestState> {
            if !matches!(signal, Signal::ParentQuery) {
                self.log.push(format!("{}:{}", signal.kind(), state.name()));
            }
            let parent = match state {
                TestState::Initial => {
                    return match signal {
                        Signal::Enter => Response::Transition(TestState::A),
                        _ => Response::Handled,
                    }
                }
                TestState::Root => return Response::Handled,
                TestState::Mid => TestState::Root,
                TestState::A | TestState::C => TestState::Mid,
                TestState::Stuck => return Response::Parent(TestState::Stuck),
            };
            match signal {
                Signal::Event(Event::Go(target)) if state == TestState::Mid => {
                    Response::Transition(*target)
                }
                _ => Response::Parent(parent),
            }
        }
    }

    #[test]
    fn bootstrap_enters_only_the_leaf() {
        let machine = Machine::new(Recorder::default(), TestState::Initial).unwrap();

        assert_eq!(machine.current(), TestState::A);
        assert_eq!(machine.handlers().log, vec!["Enter:Initial", "Enter:A"]);
        assert_eq!(machine.history().len(), 1);
    }

    #[test]
    fn bootstrap_can_enter_full_path() {
        let machine = Machine::assemble(
            Recorder::default(),
            TestState::Initial,
            MachineConfig::default().with_bootstrap_entry(BootstrapEntry::FullPath),
            None,
        )
        .unwrap();

        assert_eq!(
            machine.handlers().log,
            vec!["Enter:Initial", "Enter:Root", "Enter:Mid", "Enter:A"]
        );
    }

    #[test]
    fn bootstrap_without_transition_fails() {
        let handlers = from_fn(|_state: TestState, _signal: &Signal<()>| Response::Handled);
        let result = Machine::new(handlers, TestState::Initial);

        assert!(matches!(
            result,
            Err(MachineError::BootstrapDidNotTransition { .. })
        ));
    }

    #[test]
    fn escalated_transition_moves_between_siblings() {
        let mut machine = Machine::new(Recorder::default(), TestState::Initial).unwrap();
        machine.handlers_mut().log.clear();

        machine.dispatch(Event::Go(TestState::C)).unwrap();

        assert_eq!(machine.current(), TestState::C);
        assert_eq!(
            machine.handlers().log,
            vec!["Event:A", "Event:Mid", "Exit:A", "Enter:C"]
        );
    }

    #[test]
    fn escalation_reaches_root_handler() {
        let mut machine = Machine::new(Recorder::default(), TestState::Initial).unwrap();
        machine.handlers_mut().log.clear();

        machine.dispatch(Event::Ping).unwrap();

        assert_eq!(machine.current(), TestState::A);
        assert_eq!(
            machine.handlers().log,
            vec!["Event:A", "Event:Mid", "Event:Root"]
        );
    }

    // A and Mid leave domain events unhandled; Root either handles or drops them.
    fn unhandled_chain(
        state: TestState,
        signal: &Signal<Event>,
        root_handles: bool,
        seen: &mut Vec<TestState>,
    ) -> Response<TestState> {
        match (state, signal) {
            (TestState::Initial, Signal::Enter) => Response::Transition(TestState::A),
            (TestState::A, Signal::ParentQuery) => Response::Parent(TestState::Mid),
            (TestState::Mid, Signal::ParentQuery) => Response::Parent(TestState::Root),
            (_, Signal::Event(_)) => {
                seen.push(state);
                match state {
                    TestState::Root if root_handles => Response::Handled,
                    _ => Response::Unhandled,
                }
            }
            _ => Response::Handled,
        }
    }

    #[test]
    fn unhandled_escalates_through_parent_query() {
        let mut seen = Vec::new();
        let handlers = from_fn(|state: TestState, signal: &Signal<Event>| {
            unhandled_chain(state, signal, true, &mut seen)
        });
        let mut machine = Machine::new(handlers, TestState::Initial).unwrap();

        machine.dispatch(Event::Ping).unwrap();
        assert_eq!(machine.current(), TestState::A);
        drop(machine);

        assert_eq!(seen, vec![TestState::A, TestState::Mid, TestState::Root]);
    }

    #[test]
    fn unhandled_escalates_through_parent_table() {
        let mut queried = Vec::new();
        let mut seen = Vec::new();
        let handlers = from_fn(|state: TestState, signal: &Signal<Event>| {
            if matches!(signal, Signal::ParentQuery) {
                queried.push(state);
            }
            // The table sends A straight to Root, bypassing Mid.
            unhandled_chain(state, signal, true, &mut seen)
        });
        let mut table = ParentTable::new();
        table.register_child(TestState::Root, TestState::A).unwrap();
        let mut machine =
            Machine::assemble(handlers, TestState::Initial, MachineConfig::default(), Some(table))
                .unwrap();

        machine.dispatch(Event::Ping).unwrap();
        assert_eq!(machine.current(), TestState::A);
        drop(machine);

        assert_eq!(seen, vec![TestState::A, TestState::Root]);
        assert!(queried.is_empty());
    }

    #[test]
    fn unhandled_at_root_is_dropped() {
        let mut seen = Vec::new();
        let handlers = from_fn(|state: TestState, signal: &Signal<Event>| {
            unhandled_chain(state, signal, false, &mut seen)
        });
        let mut machine = Machine::new(handlers, TestState::Initial).unwrap();

        assert!(machine.dispatch(Event::Ping).is_ok());
        assert_eq!(machine.current(), TestState::A);
        assert_eq!(machine.history().len(), 1);
        drop(machine);

        assert_eq!(seen, vec![TestState::A, TestState::Mid, TestState::Root]);
    }

    #[test]
    fn cyclic_target_leaves_current_untouched() {
        let mut machine = Machine::new(Recorder::default(), TestState::Initial).unwrap();
        machine.handlers_mut().log.clear();

        let error = machine.dispatch(Event::Go(TestState::Stuck)).unwrap_err();

        assert!(matches!(error, MachineError::HierarchyCycle { .. }));
        assert!(error.is_structural());
        assert_eq!(machine.current(), TestState::A);
        assert_eq!(machine.handlers().log, vec!["Event:A", "Event:Mid"]);
    }

    #[test]
    fn runaway_escalation_is_bounded() {
        let handlers = from_fn(|state: TestState, signal: &Signal<()>| match (state, signal) {
            (TestState::Initial, Signal::Enter) => Response::Transition(TestState::Stuck),
            (TestState::Stuck, Signal::Event(())) => Response::Parent(TestState::Stuck),
            _ => Response::Handled,
        });
        let config = MachineConfig::default().with_max_depth(4);
        let mut machine = Machine::assemble(handlers, TestState::Initial, config, None).unwrap();

        let error = machine.dispatch(()).unwrap_err();

        assert_eq!(
            error,
            MachineError::EscalationTooDeep {
                state: "Stuck".to_string(),
                signal: "Event",
                max_depth: 4,
            }
        );
        assert_eq!(machine.current(), TestState::Stuck);
    }

    #[test]
    fn is_in_checks_ancestors() {
        let mut machine = Machine::new(Recorder::default(), TestState::Initial).unwrap();

        assert!(machine.is_in(TestState::A).unwrap());
        assert!(machine.is_in(TestState::Mid).unwrap());
        assert!(machine.is_in(TestState::Root).unwrap());
        assert!(!machine.is_in(TestState::C).unwrap());
    }
}
