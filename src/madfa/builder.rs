use hashbrown::HashMap;
use itertools::{Itertools, Position};
use smallvec::SmallVec;

use std::error::Error;
use std::fmt;

use super::lexicon::Lexicon;
use super::signature::Signature;
use super::store::Automaton;
use super::symbol::Symbol;

/// Trait for types that can be used as a word when building or querying a
/// lexicon.
///
/// Implemented for common string and sequence types so that
/// [`Builder::add_word`], [`Lexicon::contains`] and friends accept them
/// directly without manual conversion.
pub trait IntoWord<T: Symbol> {
    /// Collects this word into a symbol buffer.
    fn into_symbols(self) -> SmallVec<[T; 32]>;
}

// String types → char

impl IntoWord<char> for &str {
    fn into_symbols(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoWord<char> for &&str {
    fn into_symbols(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoWord<char> for String {
    fn into_symbols(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoWord<char> for &String {
    fn into_symbols(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

// Generic sequence types → T

impl<T: Symbol> IntoWord<T> for &[T] {
    fn into_symbols(self) -> SmallVec<[T; 32]> {
        self.iter().copied().collect()
    }
}

impl<T: Symbol> IntoWord<T> for Vec<T> {
    fn into_symbols(self) -> SmallVec<[T; 32]> {
        self.into_iter().collect()
    }
}

impl<T: Symbol> IntoWord<T> for &Vec<T> {
    fn into_symbols(self) -> SmallVec<[T; 32]> {
        self.iter().copied().collect()
    }
}

impl<T: Symbol, const N: usize> IntoWord<T> for [T; N] {
    fn into_symbols(self) -> SmallVec<[T; 32]> {
        self.into_iter().collect()
    }
}

impl<T: Symbol, const N: usize> IntoWord<T> for &[T; N] {
    fn into_symbols(self) -> SmallVec<[T; 32]> {
        self.iter().copied().collect()
    }
}

/// Errors that can occur when constructing a lexicon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexiconError<T: Symbol> {
    /// Words were not provided in strictly ascending lexicographic order.
    ///
    /// Contains the two words that were out of order (previous word, current
    /// word). Duplicated words are reported the same way.
    Order(Vec<T>, Vec<T>),
    /// The empty word was offered; lexicons hold non-empty words only.
    EmptyWord,
    /// A transition table and a final-count table of unequal lengths were
    /// given. Contains both lengths (transition rows, final counts).
    DimensionMismatch(usize, usize),
}

impl<T: Symbol> fmt::Display for LexiconError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexiconError::Order(previous, word) => {
                write!(f, "order violation: {word:?} added after {previous:?}")
            }
            LexiconError::EmptyWord => write!(f, "the empty word cannot be a lexicon member"),
            LexiconError::DimensionMismatch(transitions, finals) => {
                write!(
                    f,
                    "dimension mismatch: {transitions} transition rows, {finals} final counts"
                )
            }
        }
    }
}

impl<T: Symbol> Error for LexiconError<T> {}

/// Online constructor of minimal automata from sorted word streams.
///
/// Words must be added in strictly ascending lexicographic order; the
/// builder then maintains minimality after every insertion, following the
/// incremental algorithm of Daciuk et al. (2000). Equivalent states are
/// detected through a registry of right-language signatures and merged as
/// soon as their suffix languages can no longer grow.
///
/// ```
/// use liblexicon::madfa::Builder;
///
/// let mut builder = Builder::new();
/// for word in ["bake", "cake", "lake"] {
///     builder.add_word(word).unwrap();
/// }
/// let lexicon = builder.build();
/// assert_eq!(lexicon.len(), 3);
/// ```
pub struct Builder<T: Symbol> {
    automaton: Automaton<T>,
    /// Frozen right-languages, mapped to their representative state.
    registry: HashMap<Signature<T>, usize>,
    last_word: SmallVec<[T; 32]>,
    /// States created for `last_word`, shallowest first, start state
    /// excluded. Everything deeper than the common prefix of the next word
    /// is frozen when that word arrives.
    chain: Vec<usize>,
}

impl<T: Symbol> Builder<T> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Builder {
            automaton: Automaton::new(),
            registry: HashMap::new(),
            last_word: SmallVec::new(),
            chain: Vec::new(),
        }
    }

    /// Creates a builder with storage pre-reserved for roughly
    /// `expected_words` insertions.
    pub fn with_capacity(expected_words: usize) -> Self {
        Builder {
            automaton: Automaton::with_capacity(expected_words),
            registry: HashMap::with_capacity(expected_words),
            last_word: SmallVec::new(),
            chain: Vec::new(),
        }
    }

    /// Adds a word to the lexicon under construction.
    ///
    /// The word can be any type that implements [`IntoWord`], including
    /// `&str`, `String`, `&[T]`, `Vec<T>`, or fixed-size arrays.
    ///
    /// # Errors
    ///
    /// [`LexiconError::EmptyWord`] for the empty word, and
    /// [`LexiconError::Order`] when the word is not strictly greater than
    /// the previously added one. After an order violation the builder's
    /// state is unspecified.
    pub fn add_word(&mut self, word: impl IntoWord<T>) -> Result<(), LexiconError<T>> {
        let word = word.into_symbols();
        self.add_word_slice(&word)
    }

    fn add_word_slice(&mut self, word: &[T]) -> Result<(), LexiconError<T>> {
        if word.is_empty() {
            return Err(LexiconError::EmptyWord);
        }
        let prefix_len = self.common_prefix(word)?;
        if self.automaton.state_count() == 0 {
            self.automaton.append_state();
        }
        self.freeze_chain(prefix_len);
        self.append_suffix(prefix_len, word);
        self.last_word.clear();
        self.last_word.extend_from_slice(word);
        Ok(())
    }

    /// Length of the common prefix of `word` and the previous word, checking
    /// the strict ascending order along the way.
    fn common_prefix(&self, word: &[T]) -> Result<usize, LexiconError<T>> {
        let prefix_len = word
            .iter()
            .zip(&self.last_word)
            .take_while(|(a, b)| a == b)
            .count();
        let ascending = match (word.get(prefix_len), self.last_word.get(prefix_len)) {
            (Some(next), Some(previous)) => next > previous,
            // The word strictly extends the previous one.
            (Some(_), None) => true,
            // The word is a prefix of, or equal to, the previous one.
            (None, _) => false,
        };
        if !ascending {
            return Err(LexiconError::Order(self.last_word.to_vec(), word.to_vec()));
        }
        Ok(prefix_len)
    }

    /// Runs replace-or-register over every chain state deeper than `depth`,
    /// deepest first. Those states' right-languages can no longer grow.
    fn freeze_chain(&mut self, depth: usize) {
        while self.chain.len() > depth {
            let child = self.chain.pop().expect("chain is non-empty");
            let parent = self.chain.last().copied().unwrap_or(0);
            let symbol = self.last_word[self.chain.len()];
            self.replace_or_register(parent, symbol, child);
        }
    }

    /// Merges `child` with an already-registered equivalent state, or
    /// registers it as the representative of its right-language.
    fn replace_or_register(&mut self, parent: usize, symbol: T, child: usize) {
        let signature = Signature::of(&self.automaton, child);
        if let Some(&twin) = self.registry.get(&signature) {
            // Merge candidates are always the newest state: once one chain
            // state registers, every shallower one references it and cannot
            // match anything older.
            debug_assert_eq!(child + 1, self.automaton.state_count());
            debug_assert_ne!(twin, child);
            let old_parent_signature = Signature::of(&self.automaton, parent);
            let merged_count = self.automaton.final_count(child);
            self.automaton.set_transition(parent, symbol, twin);
            self.automaton.add_final(twin, merged_count);
            self.automaton.truncate_last();
            // Redirecting the edge changed the parent's signature; a stale
            // registry entry for the parent would leave duplicate states.
            if self.registry.get(&old_parent_signature) == Some(&parent) {
                self.registry.remove(&old_parent_signature);
                self.registry
                    .insert(Signature::of(&self.automaton, parent), parent);
            }
        } else {
            self.registry.insert(signature, child);
        }
    }

    /// Creates one state per remaining symbol of `word` past the common
    /// prefix, chains them from the prefix endpoint, and marks the terminal
    /// state as accepting.
    fn append_suffix(&mut self, prefix_len: usize, word: &[T]) {
        let mut state = match prefix_len {
            0 => 0,
            depth => self.chain[depth - 1],
        };
        for (position, symbol) in word[prefix_len..].iter().copied().with_position() {
            let next = self.automaton.append_state();
            self.automaton.set_transition(state, symbol, next);
            self.chain.push(next);
            if matches!(position, Position::Last | Position::Only) {
                self.automaton.add_final(next, 1);
            }
            state = next;
        }
    }

    /// Finalises the construction and returns the finished lexicon.
    ///
    /// Consumes the builder; the remaining unfrozen states are minimised
    /// first. An empty builder yields the empty lexicon.
    pub fn build(mut self) -> Lexicon<T> {
        self.freeze_chain(0);
        Lexicon::from_automaton(self.automaton)
    }
}

impl<T: Symbol> Default for Builder<T> {
    fn default() -> Self {
        Builder::new()
    }
}
