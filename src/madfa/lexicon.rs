use smallvec::SmallVec;

use std::fmt::{self, Write as _};
use std::ops::{Add, Sub};

use super::builder::{Builder, IntoWord, LexiconError};
use super::store::Automaton;
use super::symbol::Symbol;

/// Graph id used by [`Lexicon::dot_default`].
pub const DEFAULT_DOT_ID: &str = "MADFA";

/// An immutable, sorted set of non-empty words stored as a minimal acyclic
/// deterministic finite automaton.
///
/// Shared prefixes and suffixes of the member words collapse into shared
/// states, so large word sets compress well, and every query runs in time
/// proportional to the word being looked at rather than to the set size.
///
/// Lexicons are value types: the modifying operations ([`insert`],
/// [`remove`], [`range`] and the `+`/`-` operators) leave `self` untouched
/// and return a new lexicon. Because the stored automaton is minimal and
/// construction is canonical, two lexicons compare equal exactly when they
/// hold the same word set.
///
/// ```
/// use liblexicon::madfa::Lexicon;
///
/// let lexicon = Lexicon::from_words(["BAKE", "CAKE", "FAKE", "LAKE"]).unwrap();
/// assert!(lexicon.contains("CAKE"));
/// assert!(!lexicon.contains("AKE"));
/// assert_eq!(lexicon.len(), 4);
/// ```
///
/// [`insert`]: Lexicon::insert
/// [`remove`]: Lexicon::remove
/// [`range`]: Lexicon::range
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lexicon<T: Symbol> {
    automaton: Automaton<T>,
    /// Cached total of the per-state final counts.
    words: usize,
}

impl<T: Symbol> Lexicon<T> {
    /// Creates an empty lexicon.
    pub fn new() -> Self {
        Lexicon {
            automaton: Automaton::new(),
            words: 0,
        }
    }

    pub(crate) fn from_automaton(automaton: Automaton<T>) -> Self {
        let words = automaton.words();
        Lexicon { automaton, words }
    }

    /// Builds a lexicon from words in any order, ignoring duplicates.
    ///
    /// The words are sorted and deduplicated before construction. Use
    /// [`from_sorted`](Lexicon::from_sorted) to skip that pass when the
    /// input is already strictly ascending.
    ///
    /// # Errors
    ///
    /// [`LexiconError::EmptyWord`] if any word is empty.
    pub fn from_words<W>(words: impl IntoIterator<Item = W>) -> Result<Self, LexiconError<T>>
    where
        W: IntoWord<T>,
    {
        let mut collected: Vec<SmallVec<[T; 32]>> = Vec::new();
        for word in words {
            let word = word.into_symbols();
            if word.is_empty() {
                return Err(LexiconError::EmptyWord);
            }
            collected.push(word);
        }
        collected.sort_unstable();
        collected.dedup();
        let mut builder = Builder::with_capacity(collected.len());
        for word in &collected {
            builder.add_word(&word[..])?;
        }
        Ok(builder.build())
    }

    /// Builds a lexicon from a pre-sorted, pre-deduplicated word stream.
    ///
    /// # Errors
    ///
    /// [`LexiconError::Order`] on the first word that is not strictly
    /// greater than its predecessor, [`LexiconError::EmptyWord`] on an
    /// empty word.
    pub fn from_sorted<W>(words: impl IntoIterator<Item = W>) -> Result<Self, LexiconError<T>>
    where
        W: IntoWord<T>,
    {
        let mut builder = Builder::new();
        for word in words {
            builder.add_word(word)?;
        }
        Ok(builder.build())
    }

    /// Reassembles a lexicon from per-state transition rows and final
    /// counts, the tuple produced by [`to_parts`](Lexicon::to_parts).
    ///
    /// This is the re-entry point for persistence layers; the tables must
    /// describe an automaton previously obtained from a lexicon.
    ///
    /// # Errors
    ///
    /// [`LexiconError::DimensionMismatch`] when the two tables have
    /// different lengths.
    pub fn from_parts(
        transitions: Vec<Vec<(T, usize)>>,
        final_counts: Vec<usize>,
    ) -> Result<Self, LexiconError<T>> {
        if transitions.len() != final_counts.len() {
            return Err(LexiconError::DimensionMismatch(
                transitions.len(),
                final_counts.len(),
            ));
        }
        Ok(Self::from_automaton(Automaton::from_columns(
            transitions,
            final_counts,
        )))
    }

    /// Dumps the automaton as per-state transition rows and final counts,
    /// for persistence layers. Round-trips through
    /// [`from_parts`](Lexicon::from_parts).
    pub fn to_parts(&self) -> (Vec<Vec<(T, usize)>>, Vec<usize>) {
        let transitions = (0..self.state_count())
            .map(|state| self.automaton.transitions_of(state).to_vec())
            .collect();
        let final_counts = (0..self.state_count())
            .map(|state| self.automaton.final_count(state))
            .collect();
        (transitions, final_counts)
    }

    /// Number of words in the lexicon.
    pub fn len(&self) -> usize {
        self.words
    }

    /// True if the lexicon holds no words.
    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// Number of automaton states. Useful for diagnostics; this is not the
    /// number of words.
    pub fn state_count(&self) -> usize {
        self.automaton.state_count()
    }

    /// Outgoing transitions of `state` in ascending symbol order.
    ///
    /// # Panics
    ///
    /// Panics if `state >= state_count()`.
    pub fn transitions_of(&self, state: usize) -> &[(T, usize)] {
        self.automaton.transitions_of(state)
    }

    /// Number of words ending at `state`.
    ///
    /// # Panics
    ///
    /// Panics if `state >= state_count()`.
    pub fn final_count(&self, state: usize) -> usize {
        self.automaton.final_count(state)
    }

    /// True if reaching `state` completes a word.
    ///
    /// # Panics
    ///
    /// Panics if `state >= state_count()`.
    pub fn is_final(&self, state: usize) -> bool {
        self.automaton.is_final(state)
    }

    /// True if `word` is a member. The empty word never is.
    pub fn contains(&self, word: impl IntoWord<T>) -> bool {
        let word = word.into_symbols();
        !word.is_empty() && self.walk(&word).is_some_and(|s| self.automaton.is_final(s))
    }

    /// Follows `symbols` from the start state, returning the state reached.
    fn walk(&self, symbols: &[T]) -> Option<usize> {
        if self.automaton.state_count() == 0 {
            return None;
        }
        symbols
            .iter()
            .try_fold(0, |state, &symbol| self.automaton.child(state, symbol))
    }

    /// Iterates over all member words in ascending lexicographic order.
    ///
    /// The traversal is lazy, borrows the lexicon, and keeps only a stack
    /// proportional to the longest word; member words may be arbitrarily
    /// long without risking call-stack overflow.
    pub fn iter(&self) -> Words<'_, T> {
        match self.automaton.state_count() {
            0 => Words::empty(self),
            _ => Words::rooted(self, 0, Vec::new()),
        }
    }

    /// Iterates over the member words starting with `prefix`, in ascending
    /// order. If `prefix` itself is a member it comes first. An empty
    /// prefix is equivalent to [`iter`](Lexicon::iter).
    pub fn iter_prefix(&self, prefix: impl IntoWord<T>) -> Words<'_, T> {
        let prefix = prefix.into_symbols();
        match self.walk(&prefix) {
            Some(state) => Words::rooted(self, state, prefix.to_vec()),
            None => Words::empty(self),
        }
    }

    /// Projects the members `w` with `from <= w < until` into a new
    /// lexicon. A `None` bound is unconstrained on that side.
    pub fn range(&self, from: Option<&[T]>, until: Option<&[T]>) -> Lexicon<T> {
        let mut builder = Builder::new();
        for word in self.iter() {
            if let Some(until) = until {
                if word.as_slice() >= until {
                    break;
                }
            }
            if from.map_or(true, |from| word.as_slice() >= from) {
                builder
                    .add_word(&word[..])
                    .expect("members enumerate in strictly ascending order");
            }
        }
        builder.build()
    }

    /// Scans `input` from `start` and returns the end position of the
    /// longest member word beginning there, or `None` when no member
    /// starts at `start`.
    ///
    /// The scan walks the automaton symbol by symbol, remembering the last
    /// accepting position, and stops at the first missing transition; it is
    /// a longest match, not a first match. Positions past the end of
    /// `input` yield `None`.
    pub fn index_of(&self, input: &[T], start: usize) -> Option<usize> {
        if start > input.len() || self.automaton.state_count() == 0 {
            return None;
        }
        let mut state = 0;
        let mut matched = None;
        for position in start..=input.len() {
            if self.automaton.is_final(state) {
                matched = Some(position);
            }
            match input
                .get(position)
                .and_then(|&symbol| self.automaton.child(state, symbol))
            {
                Some(child) => state = child,
                None => break,
            }
        }
        matched
    }

    /// Like [`index_of`](Lexicon::index_of), but returns the matched slice
    /// of `input` instead of its end position.
    pub fn lookup<'i>(&self, input: &'i [T], start: usize) -> Option<&'i [T]> {
        self.index_of(input, start).map(|end| &input[start..end])
    }

    /// Returns a lexicon that also contains `word`.
    ///
    /// When `word` is already a member the result is an unchanged copy;
    /// otherwise the automaton is rebuilt with `word` spliced into sorted
    /// position, so the result is minimal again.
    ///
    /// # Errors
    ///
    /// [`LexiconError::EmptyWord`] if `word` is empty.
    pub fn insert(&self, word: impl IntoWord<T>) -> Result<Lexicon<T>, LexiconError<T>> {
        let word = word.into_symbols();
        if word.is_empty() {
            return Err(LexiconError::EmptyWord);
        }
        if self.contains(&word[..]) {
            return Ok(self.clone());
        }
        let mut builder = Builder::with_capacity(self.words + 1);
        let mut placed = false;
        for member in self.iter() {
            if !placed && member.as_slice() > &word[..] {
                builder.add_word(&word[..])?;
                placed = true;
            }
            builder.add_word(&member[..])?;
        }
        if !placed {
            builder.add_word(&word[..])?;
        }
        Ok(builder.build())
    }

    /// Returns a lexicon without `word`.
    ///
    /// When `word` is not a member (the empty word never is) the result is
    /// an unchanged copy. Otherwise the automaton is rebuilt from the
    /// remaining members; clearing the final flag in place would leave
    /// shared suffix states unminimised.
    pub fn remove(&self, word: impl IntoWord<T>) -> Lexicon<T> {
        let word = word.into_symbols();
        if !self.contains(&word[..]) {
            return self.clone();
        }
        let mut builder = Builder::with_capacity(self.words.saturating_sub(1));
        for member in self.iter() {
            if member.as_slice() != &word[..] {
                builder
                    .add_word(&member[..])
                    .expect("members enumerate in strictly ascending order");
            }
        }
        builder.build()
    }
}

impl<T: Symbol + fmt::Display> Lexicon<T> {
    /// Renders the automaton in the Graphviz DOT language.
    ///
    /// States appear in index order, labelled `S` for the start state and
    /// with their final count otherwise; each state's transitions follow in
    /// ascending symbol order.
    pub fn dot(&self, id: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "digraph {id} {{");
        let _ = writeln!(out, "  node [shape=circle]");
        for state in 0..self.automaton.state_count() {
            if state == 0 {
                let _ = writeln!(out, "  {state} [label=S]");
            } else {
                let _ = writeln!(out, "  {state} [label={}]", self.automaton.final_count(state));
            }
            for &(symbol, child) in self.automaton.transitions_of(state) {
                let _ = writeln!(out, "    {state} -> {child} [label=\" {symbol} \"]");
            }
        }
        out.push('}');
        out
    }

    /// [`dot`](Lexicon::dot) with the canonical graph id.
    pub fn dot_default(&self) -> String {
        self.dot(DEFAULT_DOT_ID)
    }
}

impl<T: Symbol> Default for Lexicon<T> {
    fn default() -> Self {
        Lexicon::new()
    }
}

/// `lexicon + word` is [`Lexicon::insert`] as an operator.
impl<T: Symbol, W: IntoWord<T>> Add<W> for &Lexicon<T> {
    type Output = Lexicon<T>;

    /// # Panics
    ///
    /// Panics when `word` is empty; use [`Lexicon::insert`] to handle that
    /// case as an error.
    fn add(self, word: W) -> Lexicon<T> {
        match self.insert(word) {
            Ok(lexicon) => lexicon,
            Err(err) => panic!("{err}"),
        }
    }
}

/// `lexicon - word` is [`Lexicon::remove`] as an operator.
impl<T: Symbol, W: IntoWord<T>> Sub<W> for &Lexicon<T> {
    type Output = Lexicon<T>;

    fn sub(self, word: W) -> Lexicon<T> {
        self.remove(word)
    }
}

impl<'a, T: Symbol> IntoIterator for &'a Lexicon<T> {
    type Item = Vec<T>;
    type IntoIter = Words<'a, T>;

    fn into_iter(self) -> Words<'a, T> {
        self.iter()
    }
}

/// Lazy iterator over the words of a [`Lexicon`], in ascending
/// lexicographic order.
///
/// Returned by [`Lexicon::iter`] and [`Lexicon::iter_prefix`].
#[derive(Clone)]
pub struct Words<'a, T: Symbol> {
    lexicon: &'a Lexicon<T>,
    /// Depth-first traversal frames: a state and the index of its next
    /// unvisited transition.
    stack: Vec<(usize, usize)>,
    path: Vec<T>,
    /// True when the root of the traversal is itself accepting and has not
    /// been emitted yet.
    pending: bool,
}

impl<'a, T: Symbol> Words<'a, T> {
    fn empty(lexicon: &'a Lexicon<T>) -> Self {
        Words {
            lexicon,
            stack: Vec::new(),
            path: Vec::new(),
            pending: false,
        }
    }

    fn rooted(lexicon: &'a Lexicon<T>, state: usize, path: Vec<T>) -> Self {
        Words {
            lexicon,
            stack: vec![(state, 0)],
            pending: lexicon.automaton.is_final(state),
            path,
        }
    }
}

impl<T: Symbol> Iterator for Words<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.pending {
            self.pending = false;
            return Some(self.path.clone());
        }
        loop {
            let &mut (state, ref mut cursor) = self.stack.last_mut()?;
            let next = self
                .lexicon
                .automaton
                .transitions_of(state)
                .get(*cursor)
                .copied();
            match next {
                Some((symbol, child)) => {
                    *cursor += 1;
                    self.path.push(symbol);
                    self.stack.push((child, 0));
                    if self.lexicon.automaton.is_final(child) {
                        return Some(self.path.clone());
                    }
                }
                None => {
                    self.stack.pop();
                    // The bottom frame owns no symbol of the path.
                    if !self.stack.is_empty() {
                        self.path.pop();
                    }
                }
            }
        }
    }
}
