use std::fmt::Debug;
use std::hash::Hash;

/// Trait for types that can serve as symbols of a lexicon's words.
///
/// This trait is automatically implemented for any type satisfying all the
/// required bounds (`char`, `u8`, `u16`, `u32`, etc.).
///
/// - `Copy`: transitions store symbols by value
/// - `Eq + Ord`: comparing symbols and ordering words lexicographically
/// - `Hash`: right-language signatures during minimisation
/// - `Debug`: error payloads and debug printing
pub trait Symbol: Copy + Eq + Ord + Hash + Debug {}

impl<T: Copy + Eq + Ord + Hash + Debug> Symbol for T {}
