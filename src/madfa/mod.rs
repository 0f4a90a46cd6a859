//! Minimal acyclic deterministic finite automata over generic symbols.
//!
//! [`Builder`] absorbs a sorted word stream and keeps the automaton minimal
//! after every insertion; [`Lexicon`] wraps the finished automaton as an
//! immutable set value with membership tests, ordered enumeration, ranged
//! projection, longest-match scanning and Graphviz export.

/// Online construction of minimal automata from sorted word streams.
pub mod builder;
/// The immutable lexicon value and its read-side algorithms.
pub mod lexicon;
/// Right-language fingerprints used for state deduplication.
pub(crate) mod signature;
/// Flat index-addressed automaton storage.
pub(crate) mod store;
/// Trait for types that can serve as word symbols.
pub mod symbol;

pub use builder::{Builder, IntoWord, LexiconError};
pub use lexicon::{Lexicon, Words, DEFAULT_DOT_ID};
pub use symbol::Symbol;

#[cfg(test)]
mod test {
    use super::{Lexicon, LexiconError};
    use proptest::prelude::*;

    fn word_strategy() -> impl Strategy<Value = Vec<u8>> {
        // A tiny alphabet forces heavy prefix and suffix sharing.
        prop::collection::vec(0u8..4, 1..6)
    }

    fn words_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
        prop::collection::vec(word_strategy(), 0..40)
    }

    fn sorted_set(words: &[Vec<u8>]) -> Vec<Vec<u8>> {
        let mut set = words.to_vec();
        set.sort();
        set.dedup();
        set
    }

    proptest! {
        #[test]
        fn members_and_only_members_are_contained(
            words in words_strategy(),
            probes in words_strategy(),
        ) {
            let lexicon = Lexicon::from_words(words.clone()).unwrap();
            let set = sorted_set(&words);
            for word in set.iter().chain(probes.iter()) {
                prop_assert_eq!(lexicon.contains(&word[..]), set.contains(word));
            }
        }

        #[test]
        fn enumeration_is_sorted_and_deduplicated(words in words_strategy()) {
            let lexicon = Lexicon::from_words(words.clone()).unwrap();
            let members: Vec<Vec<u8>> = lexicon.iter().collect();
            prop_assert_eq!(members, sorted_set(&words));
        }

        #[test]
        fn size_counts_distinct_words(words in words_strategy()) {
            let lexicon = Lexicon::from_words(words.clone()).unwrap();
            prop_assert_eq!(lexicon.len(), sorted_set(&words).len());
        }

        #[test]
        fn construction_ignores_order_and_multiplicity(words in words_strategy()) {
            let lexicon = Lexicon::from_words(words.clone()).unwrap();
            let mut noisy = words.clone();
            noisy.reverse();
            noisy.extend(words.iter().cloned());
            let other = Lexicon::from_words(noisy).unwrap();
            prop_assert_eq!(lexicon, other);
        }

        #[test]
        fn equal_sets_build_equal_automata(words in words_strategy()) {
            // The same set assembled in one pass and by repeated insertion.
            let all_at_once = Lexicon::from_words(words.clone()).unwrap();
            let mut incremental = Lexicon::new();
            for word in &words {
                incremental = incremental.insert(&word[..]).unwrap();
            }
            prop_assert_eq!(all_at_once.state_count(), incremental.state_count());
            prop_assert_eq!(&all_at_once, &incremental);
        }

        #[test]
        fn sorted_feed_matches_unsorted_feed(words in words_strategy()) {
            let set = sorted_set(&words);
            let from_sorted = Lexicon::from_sorted(set).unwrap();
            prop_assert_eq!(from_sorted, Lexicon::from_words(words).unwrap());
        }

        #[test]
        fn unsorted_feed_is_reported(words in words_strategy()) {
            prop_assume!(sorted_set(&words).len() < words.len());
            // With duplicates or disorder present, some adjacent pair must
            // violate the strictly-ascending contract.
            let result = Lexicon::from_sorted(words);
            prop_assert!(matches!(result, Err(LexiconError::Order(_, _))));
        }

        #[test]
        fn insert_law(words in words_strategy(), word in word_strategy()) {
            let lexicon = Lexicon::from_words(words).unwrap();
            let grown = lexicon.insert(&word[..]).unwrap();
            prop_assert!(grown.contains(&word[..]));
            let expected = lexicon.len() + usize::from(!lexicon.contains(&word[..]));
            prop_assert_eq!(grown.len(), expected);
        }

        #[test]
        fn remove_law(words in words_strategy(), word in word_strategy()) {
            let lexicon = Lexicon::from_words(words).unwrap();
            let shrunk = lexicon.remove(&word[..]);
            prop_assert!(!shrunk.contains(&word[..]));
            let expected = lexicon.len() - usize::from(lexicon.contains(&word[..]));
            prop_assert_eq!(shrunk.len(), expected);
        }

        #[test]
        fn insert_then_remove_is_identity(words in words_strategy(), word in word_strategy()) {
            let lexicon = Lexicon::from_words(words).unwrap();
            prop_assume!(!lexicon.contains(&word[..]));
            let round_tripped = lexicon.insert(&word[..]).unwrap().remove(&word[..]);
            prop_assert_eq!(round_tripped, lexicon);
        }

        #[test]
        fn longest_match_law(
            words in words_strategy(),
            input in prop::collection::vec(0u8..4, 0..12),
            offset in 0usize..12,
        ) {
            let lexicon = Lexicon::from_words(words).unwrap();
            let start = offset.min(input.len());
            match lexicon.lookup(&input, start) {
                Some(matched) => {
                    prop_assert!(lexicon.contains(matched));
                    prop_assert_eq!(
                        lexicon.index_of(&input, start),
                        Some(start + matched.len())
                    );
                    // Nothing longer starting at `start` is a member.
                    for end in start + matched.len() + 1..=input.len() {
                        prop_assert!(!lexicon.contains(&input[start..end]));
                    }
                }
                None => {
                    for end in start + 1..=input.len() {
                        prop_assert!(!lexicon.contains(&input[start..end]));
                    }
                }
            }
        }

        #[test]
        fn prefix_iteration_filters_members(
            words in words_strategy(),
            prefix in prop::collection::vec(0u8..4, 0..4),
        ) {
            let lexicon = Lexicon::from_words(words.clone()).unwrap();
            let under_prefix: Vec<Vec<u8>> = lexicon.iter_prefix(&prefix[..]).collect();
            let expected: Vec<Vec<u8>> = sorted_set(&words)
                .into_iter()
                .filter(|word| word.starts_with(&prefix))
                .collect();
            prop_assert_eq!(under_prefix, expected);
        }

        #[test]
        fn range_agrees_with_filtering(
            words in words_strategy(),
            low in word_strategy(),
            high in word_strategy(),
        ) {
            let lexicon = Lexicon::from_words(words.clone()).unwrap();
            let ranged = lexicon.range(Some(&low[..]), Some(&high[..]));
            let expected: Vec<Vec<u8>> = sorted_set(&words)
                .into_iter()
                .filter(|word| word[..] >= low[..] && word[..] < high[..])
                .collect();
            prop_assert_eq!(ranged.iter().collect::<Vec<_>>(), expected);
        }

        #[test]
        fn parts_round_trip(words in words_strategy()) {
            let lexicon = Lexicon::from_words(words).unwrap();
            let (transitions, final_counts) = lexicon.to_parts();
            let rebuilt = Lexicon::from_parts(transitions, final_counts).unwrap();
            prop_assert_eq!(rebuilt, lexicon);
        }
    }
}
