//! Property-based tests for transitions over generated hierarchies.
//!
//! These tests use proptest to build random trees and check that every
//! transition exits and enters exactly the states below the least common
//! ancestor, in the right order, whichever way parents are discovered.

use hierarch::core::{Handlers, ParentTable, Response, Signal, State};
use hierarch::machine::Machine;
use hierarch::MachineBuilder;
use proptest::prelude::*;

const NAMES: [&str; 13] = [
    "N0", "N1", "N2", "N3", "N4", "N5", "N6", "N7", "N8", "N9", "N10", "N11", "Initial",
];
const INITIAL: Node = Node(12);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
struct Node(usize);

impl State for Node {
    fn name(&self) -> &str {
        NAMES[self.0]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Note {
    Enter(Node),
    Exit(Node),
}

/// Tree where `parents[i]` names the parent of node `i`; node 0 is the root.
struct RandomTree {
    parents: Vec<Option<usize>>,
    start: Node,
    log: Vec<Note>,
}

impl RandomTree {
    fn path_from_root(&self, node: usize) -> Vec<Node> {
        let mut path = vec![Node(node)];
        let mut cursor = node;
        while let Some(parent) = self.parents[cursor] {
            path.push(Node(parent));
            cursor = parent;
        }
        path.reverse();
        path
    }
}

impl Handlers for RandomTree {
    type State = Node;
    type Event = Node;

    fn handle(&mut self, state: Node, signal: &Signal<Node>) -> Response<Node> {
        if state == INITIAL {
            return match signal {
                Signal::Enter => Response::Transition(self.start),
                _ => Response::Handled,
            };
        }

        match signal {
            Signal::Event(target) => return Response::Transition(*target),
            Signal::Enter => self.log.push(Note::Enter(state)),
            Signal::Exit => self.log.push(Note::Exit(state)),
            Signal::ParentQuery => {}
        }

        match self.parents[state.0] {
            Some(parent) => Response::Parent(Node(parent)),
            None => Response::Handled,
        }
    }
}

/// Expected notifications computed from root paths alone.
fn expected_notes(tree: &RandomTree, from: usize, to: usize) -> Vec<Note> {
    let source = tree.path_from_root(from);
    let target = tree.path_from_root(to);
    let shared = source
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let exits = source[shared..].iter().rev().map(|n| Note::Exit(*n));
    let entries = target[shared..].iter().map(|n| Note::Enter(*n));
    exits.chain(entries).collect()
}

prop_compose! {
    fn arbitrary_tree()(size in 2..12usize)
        (picks in prop::collection::vec(any::<prop::sample::Index>(), size - 1),
         from in 0..size,
         to in 0..size)
        -> (Vec<Option<usize>>, usize, usize)
    {
        let mut parents = vec![None];
        for (i, pick) in picks.iter().enumerate() {
            parents.push(Some(pick.index(i + 1)));
        }
        (parents, from, to)
    }
}

fn dynamic_machine(parents: Vec<Option<usize>>, start: usize) -> Machine<RandomTree> {
    let tree = RandomTree {
        parents,
        start: Node(start),
        log: Vec::new(),
    };
    let mut machine = Machine::new(tree, INITIAL).unwrap();
    machine.handlers_mut().log.clear();
    machine
}

fn static_machine(parents: Vec<Option<usize>>, start: usize) -> Machine<RandomTree> {
    let mut table = ParentTable::new();
    for (child, parent) in parents.iter().enumerate() {
        if let Some(parent) = parent {
            table.register_child(Node(*parent), Node(child)).unwrap();
        }
    }
    let tree = RandomTree {
        parents,
        start: Node(start),
        log: Vec::new(),
    };
    let mut machine = MachineBuilder::new(tree)
        .initial(INITIAL)
        .parents(table)
        .build()
        .unwrap();
    machine.handlers_mut().log.clear();
    machine
}

proptest! {
    #[test]
    fn transition_notes_match_common_ancestor_path((parents, from, to) in arbitrary_tree()) {
        let mut machine = dynamic_machine(parents, from);
        machine.dispatch(Node(to)).unwrap();

        let expected = expected_notes(machine.handlers(), from, to);
        prop_assert_eq!(&machine.handlers().log, &expected);
        prop_assert_eq!(machine.current(), Node(to));
        prop_assert_eq!(machine.current_label(), NAMES[to]);
    }

    #[test]
    fn static_and_dynamic_parents_agree((parents, from, to) in arbitrary_tree()) {
        let mut dynamic = dynamic_machine(parents.clone(), from);
        let mut fixed = static_machine(parents, from);

        dynamic.dispatch(Node(to)).unwrap();
        fixed.dispatch(Node(to)).unwrap();

        prop_assert_eq!(&dynamic.handlers().log, &fixed.handlers().log);
        prop_assert_eq!(dynamic.current(), fixed.current());
    }

    #[test]
    fn no_state_is_both_exited_and_entered((parents, from, to) in arbitrary_tree()) {
        prop_assume!(from != to);
        let mut machine = dynamic_machine(parents, from);
        machine.dispatch(Node(to)).unwrap();

        let log = &machine.handlers().log;
        for note in log {
            if let Note::Exit(node) = note {
                prop_assert!(!log.contains(&Note::Enter(*node)));
            }
        }
        let first_enter = log.iter().position(|n| matches!(n, Note::Enter(_)));
        let last_exit = log.iter().rposition(|n| matches!(n, Note::Exit(_)));
        if let (Some(enter), Some(exit)) = (first_enter, last_exit) {
            prop_assert!(exit < enter);
        }
    }

    #[test]
    fn lineage_matches_parent_chain((parents, from, _to) in arbitrary_tree()) {
        let mut machine = dynamic_machine(parents, from);
        let expected = machine.handlers().path_from_root(from);

        let lineage = machine.current_lineage().unwrap();
        prop_assert_eq!(lineage.states(), expected.as_slice());
        prop_assert_eq!(lineage.root(), Some(Node(0)));
    }
}
