//! Right-language fingerprints used to deduplicate states during
//! construction.

use smallvec::SmallVec;

use super::store::Automaton;
use super::symbol::Symbol;

/// Canonical fingerprint of a state's right-language: the finality flag plus
/// the sorted `(symbol, child)` transition list.
///
/// Children are minimised before their parents are signed, so within one
/// build two states have equal signatures exactly when they accept the same
/// suffix set. The registry keys on the full signature value, not a reduced
/// hash, so a hash collision between inequivalent states can never merge
/// them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Signature<T: Symbol> {
    is_final: bool,
    transitions: SmallVec<[(T, usize); 4]>,
}

impl<T: Symbol> Signature<T> {
    /// Fingerprints `state` as it currently stands in `automaton`.
    pub(crate) fn of(automaton: &Automaton<T>, state: usize) -> Self {
        Signature {
            is_final: automaton.is_final(state),
            transitions: automaton.transitions_of(state).iter().copied().collect(),
        }
    }
}
