//! Flat, index-addressed automaton storage.
//!
//! States are plain indices into a vector; state `0` is the start state
//! whenever the store is non-empty. Each state keeps its outgoing
//! transitions sorted by symbol, so per-symbol lookup is a binary search
//! and iteration order is deterministic.

use smallvec::SmallVec;

use super::symbol::Symbol;

/// A single automaton state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct State<T: Symbol> {
    /// Outgoing transitions, kept in ascending symbol order.
    transitions: SmallVec<[(T, usize); 4]>,
    /// Number of distinct words ending at this state.
    final_count: usize,
}

/// The transition graph backing a lexicon.
///
/// The builder is the only writer; everything else treats the store as
/// read-only. Deleting a state is only possible from the top of the index
/// space (`truncate_last`), which is all the construction algorithm needs:
/// merge candidates are always the most recently appended state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Automaton<T: Symbol> {
    states: Vec<State<T>>,
}

impl<T: Symbol> Automaton<T> {
    pub(crate) fn new() -> Self {
        Automaton { states: Vec::new() }
    }

    pub(crate) fn with_capacity(states: usize) -> Self {
        Automaton {
            states: Vec::with_capacity(states),
        }
    }

    /// Rebuilds a store from per-state transition rows and final counts.
    ///
    /// Rows are re-sorted by symbol so the ascending-order invariant holds
    /// regardless of how the caller stored them.
    pub(crate) fn from_columns(
        transitions: Vec<Vec<(T, usize)>>,
        final_counts: Vec<usize>,
    ) -> Self {
        let states = transitions
            .into_iter()
            .zip(final_counts)
            .map(|(row, final_count)| {
                let mut transitions: SmallVec<[(T, usize); 4]> = row.into_iter().collect();
                transitions.sort_unstable_by_key(|&(symbol, _)| symbol);
                State {
                    transitions,
                    final_count,
                }
            })
            .collect();
        Automaton { states }
    }

    pub(crate) fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Outgoing transitions of `state` in ascending symbol order.
    pub(crate) fn transitions_of(&self, state: usize) -> &[(T, usize)] {
        &self.states[state].transitions
    }

    /// The state reached from `state` on `symbol`, if any.
    pub(crate) fn child(&self, state: usize, symbol: T) -> Option<usize> {
        let transitions = &self.states[state].transitions;
        transitions
            .binary_search_by_key(&symbol, |&(s, _)| s)
            .ok()
            .map(|i| transitions[i].1)
    }

    pub(crate) fn is_final(&self, state: usize) -> bool {
        self.states[state].final_count > 0
    }

    pub(crate) fn final_count(&self, state: usize) -> usize {
        self.states[state].final_count
    }

    /// Total number of words accepted by the automaton.
    pub(crate) fn words(&self) -> usize {
        self.states.iter().map(|state| state.final_count).sum()
    }

    /// Appends a fresh state with no transitions and returns its index.
    pub(crate) fn append_state(&mut self) -> usize {
        self.states.push(State {
            transitions: SmallVec::new(),
            final_count: 0,
        });
        self.states.len() - 1
    }

    /// Points `state --symbol--> child`, replacing an existing transition on
    /// the same symbol or inserting a new one in sorted position.
    pub(crate) fn set_transition(&mut self, state: usize, symbol: T, child: usize) {
        let transitions = &mut self.states[state].transitions;
        match transitions.binary_search_by_key(&symbol, |&(s, _)| s) {
            Ok(i) => transitions[i].1 = child,
            Err(i) => transitions.insert(i, (symbol, child)),
        }
    }

    /// Adds `count` to the number of words ending at `state`.
    pub(crate) fn add_final(&mut self, state: usize, count: usize) {
        self.states[state].final_count += count;
    }

    /// Removes the highest-indexed state. The caller guarantees no remaining
    /// state holds a transition to it.
    pub(crate) fn truncate_last(&mut self) {
        self.states.pop().expect("truncate_last on an empty store");
        let remaining = self.states.len();
        debug_assert!(
            self.states.iter().all(|state| {
                state.transitions.iter().all(|&(_, child)| child < remaining)
            }),
            "dangling transition into the removed state"
        );
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fresh_states_have_no_transitions() {
        let mut store = Automaton::<char>::new();
        let s = store.append_state();
        assert_eq!(s, 0);
        assert!(store.transitions_of(s).is_empty());
        assert!(!store.is_final(s));
        assert_eq!(store.final_count(s), 0);
    }

    #[test]
    fn transitions_stay_sorted_by_symbol() {
        let mut store = Automaton::new();
        let parent = store.append_state();
        let a = store.append_state();
        let b = store.append_state();
        let c = store.append_state();
        store.set_transition(parent, 'c', c);
        store.set_transition(parent, 'a', a);
        store.set_transition(parent, 'b', b);
        assert_eq!(store.transitions_of(parent), &[('a', a), ('b', b), ('c', c)]);
        assert_eq!(store.child(parent, 'b'), Some(b));
        assert_eq!(store.child(parent, 'd'), None);
    }

    #[test]
    fn set_transition_replaces_on_same_symbol() {
        let mut store = Automaton::new();
        let parent = store.append_state();
        let first = store.append_state();
        let second = store.append_state();
        store.set_transition(parent, 'x', first);
        store.set_transition(parent, 'x', second);
        assert_eq!(store.transitions_of(parent), &[('x', second)]);
    }

    #[test]
    fn final_counts_accumulate() {
        let mut store = Automaton::<u8>::new();
        let s = store.append_state();
        store.add_final(s, 1);
        store.add_final(s, 2);
        assert!(store.is_final(s));
        assert_eq!(store.final_count(s), 3);
        assert_eq!(store.words(), 3);
    }

    #[test]
    fn truncate_removes_the_top_state() {
        let mut store = Automaton::new();
        let root = store.append_state();
        let child = store.append_state();
        store.set_transition(root, 'a', child);
        let doomed = store.append_state();
        assert_eq!(doomed, 2);
        store.truncate_last();
        assert_eq!(store.state_count(), 2);
        assert_eq!(store.child(root, 'a'), Some(child));
    }

    #[test]
    fn from_columns_normalizes_row_order() {
        let store = Automaton::from_columns(
            vec![vec![('b', 2), ('a', 1)], vec![], vec![]],
            vec![0, 1, 1],
        );
        assert_eq!(store.transitions_of(0), &[('a', 1), ('b', 2)]);
        assert_eq!(store.words(), 2);
    }
}
