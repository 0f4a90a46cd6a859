//! # liblexicon
//!
//! Immutable, sorted word sets stored as minimal acyclic deterministic
//! finite automata (MADFA, also known as
//! [DAWGs](https://en.wikipedia.org/wiki/Deterministic_acyclic_finite_state_automaton)).
//!
//! Shared prefixes and suffixes collapse into shared automaton states, so
//! large dictionaries compress well while membership tests stay
//! O(word length). Construction is the incremental minimisation algorithm
//! of [Daciuk et al. (2000)](https://arxiv.org/abs/cs/0007009v1): words are
//! absorbed one at a time from a sorted stream and the automaton is minimal
//! after every step.
//!
//! ## Features
//!
//! - **Generic over the symbol type**: works with `char`, `u8`, `u16`, or
//!   any type implementing [`Symbol`](madfa::Symbol)
//! - **Immutable values**: [`insert`](madfa::Lexicon::insert),
//!   [`remove`](madfa::Lexicon::remove) and
//!   [`range`](madfa::Lexicon::range) return new lexicons; equal word sets
//!   compare equal
//! - **Sub-linear scanning**: [`index_of`](madfa::Lexicon::index_of) and
//!   [`lookup`](madfa::Lexicon::lookup) find the longest member word
//!   starting at an offset of an input sequence
//! - **Graphviz export**: [`dot`](madfa::Lexicon::dot) renders the
//!   automaton for inspection
//!
//! ## Quick Start
//!
//! ```
//! use liblexicon::madfa::Lexicon;
//!
//! let lexicon = Lexicon::from_words(["BAKE", "CAKE", "FAKE", "LAKE", "MAKE"]).unwrap();
//! assert!(lexicon.contains("CAKE"));
//! assert!(!lexicon.contains("AKE"));
//! assert_eq!(lexicon.len(), 5);
//!
//! let words: Vec<String> = lexicon
//!     .iter_prefix("CAKE")
//!     .map(|word| word.into_iter().collect())
//!     .collect();
//! assert_eq!(words, ["CAKE"]);
//! ```
//!
//! For explicit control over construction, feed a pre-sorted stream to the
//! [`Builder`](madfa::Builder):
//!
//! ```
//! use liblexicon::madfa::Builder;
//!
//! let mut builder = Builder::new();
//! for word in ["APPLE", "BANANA", "CHERRY"] {
//!     builder.add_word(word).unwrap();
//! }
//! let lexicon = builder.build();
//! assert_eq!(lexicon.iter().count(), 3);
//! ```
//!
//! ## Longest-match scanning
//!
//! ```
//! use liblexicon::madfa::Lexicon;
//!
//! let lexicon = Lexicon::from_words(["cake", "cakewalk"]).unwrap();
//! let text: Vec<char> = "a cakewalk!".chars().collect();
//!
//! assert_eq!(lexicon.index_of(&text, 2), Some(10));
//! let matched: String = lexicon.lookup(&text, 2).unwrap().iter().collect();
//! assert_eq!(matched, "cakewalk");
//! ```
//!
//! ## Generic Usage
//!
//! The lexicon is generic over the symbol type:
//!
//! ```
//! use liblexicon::madfa::Lexicon;
//!
//! let words: Vec<Vec<u8>> = vec![vec![1, 2, 3], vec![1, 2, 4], vec![2, 3, 4]];
//! let lexicon = Lexicon::from_words(words).unwrap();
//!
//! assert!(lexicon.contains([1, 2, 3]));
//! assert!(!lexicon.contains([1, 2, 5]));
//! assert!(!lexicon.contains([1, 2]));
//! ```

#![warn(missing_docs)]

/// Core lexicon data structure: automaton store, builder, and read-side
/// operations.
pub mod madfa;
