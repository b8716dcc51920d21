//! Dictionary loading and word-key encoding.
//!
//! A word key packs letter presence into the low 26 bits of a `u32`. Only
//! five-letter words with five distinct letters are candidates; anagrams
//! share a key and collapse to the first spelling seen.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::Result;
use itertools::Itertools;
use rayon::prelude::*;

/// The deduplicated candidate set plus the key -> spelling lookup.
pub struct WordList {
    keys: Vec<u32>,
    spelling: HashMap<u32, [u8; 5]>,
}

impl WordList {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let wordfile = BufReader::new(File::open(path)?);
        let lines: Vec<String> = wordfile.lines().try_collect()?;
        Ok(Self::from_words(&lines))
    }

    pub fn from_words<S: AsRef<str> + Sync>(words: &[S]) -> Self {
        let encoded: Vec<(u32, [u8; 5])> = words
            .par_iter()
            .filter_map(|w| encode(w.as_ref().trim()))
            .collect();

        // Anagrams share a key; keep the first spelling seen for each.
        let deduped = encoded
            .into_iter()
            .sorted_by_key(|&(key, _)| key)
            .dedup_by(|a, b| a.0 == b.0)
            .collect_vec();

        let keys = deduped.iter().map(|&(key, _)| key).collect_vec();
        let spelling = deduped.into_iter().collect();
        WordList { keys, spelling }
    }

    /// Candidate keys, sorted ascending.
    pub fn keys(&self) -> &[u32] {
        &self.keys
    }

    /// Resolve a key back to its source word.
    pub fn spell(&self, key: u32) -> Option<&[u8; 5]> {
        self.spelling.get(&key)
    }
}

/// One bit per letter. Words that are not exactly five distinct ASCII
/// lowercase letters can never take part in a 25-letter cover and encode
/// to `None`.
pub fn encode(word: &str) -> Option<(u32, [u8; 5])> {
    let bytes: [u8; 5] = word.as_bytes().try_into().ok()?;
    let mut key = 0u32;
    for b in bytes {
        if !b.is_ascii_lowercase() {
            return None;
        }
        let bit = 1u32 << (b - b'a');
        if key & bit != 0 {
            return None;
        }
        key |= bit;
    }
    Some((key, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_sets_one_bit_per_letter() {
        assert_eq!(encode("abcde"), Some((0b11111, *b"abcde")));
        assert_eq!(
            encode("vwxyz").unwrap().0,
            0b11_1110_0000_0000_0000_0000_0000
        );
    }

    #[test]
    fn encode_rejects_non_candidates() {
        assert_eq!(encode("hello"), None); // repeated letter
        assert_eq!(encode("abcd"), None); // too short
        assert_eq!(encode("abcdef"), None); // too long
        assert_eq!(encode("Abcde"), None); // not lowercase
        assert_eq!(encode("ab de"), None); // not a letter
    }

    #[test]
    fn anagrams_collapse_to_first_spelling() {
        let words = WordList::from_words(&["abcde", "badce", "fghij"]);
        assert_eq!(words.keys().len(), 2);
        assert_eq!(words.spell(0b11111), Some(b"abcde"));
    }

    #[test]
    fn keys_are_sorted_and_unique() {
        let words = WordList::from_words(&["uvwxy", "abcde", "klmno", "abced"]);
        let keys = words.keys();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(keys.len(), 3);
    }
}
