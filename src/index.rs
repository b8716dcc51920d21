//! The tiered candidate index the solver walks.
//!
//! Words are bucketed by their rarest letter into 26 letter groups, rarest
//! first. Each group carries 16 pre-filtered tiers keyed by which of four
//! tie-break letters the running usage mask has already consumed, and every
//! tier is laid out so that a sub-range compatible with two further
//! tie-break letters falls out of offset arithmetic alone.

use std::array;

use itertools::Itertools;

use crate::words::WordList;

pub const NUM_LETTERS: usize = 26;
pub const NUM_TIERS: usize = 16;

/// Width of one compatibility scan. Tiers carry this many sentinel entries
/// past their true length so a scan may overrun it.
pub const SCAN_WIDTH: usize = 8;

/// All bits set: intersects every non-empty usage mask, so padding can never
/// be reported as compatible.
pub const SENTINEL: u32 = u32::MAX;

/// While choosing the word at 0-based depth `d`, the letters of every group
/// before the chosen one must already be covered by the 5*(d+1) bits of the
/// usage mask plus the single group the search may skip, so no anchor beyond
/// group 5*(d+1)+1 is reachable. The solver's group-loop limit is
/// `MIN_SEARCH_DEPTH + d + 1`, which stays complete for every d in 0..4
/// as long as MIN_SEARCH_DEPTH >= 4*d + 6.
pub const MIN_SEARCH_DEPTH: usize = 18;

/// One of a group's 16 candidate sub-arrays.
///
/// `keys` holds `len` true entries in four classes — contains both tie-break
/// letters, contains `tm5` only, contains neither, contains `tm6` only —
/// followed by `SCAN_WIDTH` sentinels. The class boundaries are `toff1`,
/// `toff2`, `toff3`, giving the solver these sub-ranges:
///
/// - `tm5` and `tm6` both unused: `[0, len)`
/// - `tm5` used:                  `[toff2, len)`
/// - `tm6` used:                  `[toff1, toff3)`
/// - both used:                   `[toff2, toff3)`
///
/// A scan overrunning a sub-range end only reaches entries containing an
/// already-used tie-break letter, or sentinels; neither can match.
pub struct Tier {
    pub keys: Vec<u32>,
    pub len: usize,
    pub toff1: usize,
    pub toff2: usize,
    pub toff3: usize,
}

/// A frequency-ranked bucket of word keys, anchored at one letter.
pub struct LetterGroup {
    /// The anchor letter. A usage mask intersecting this disqualifies the
    /// whole group.
    pub m: u32,
    /// The next six letters in rarity order after the anchor.
    pub tm: [u32; 6],
    pub tiers: [Tier; NUM_TIERS],
}

pub struct CandidateIndex {
    pub groups: Vec<LetterGroup>,
}

impl CandidateIndex {
    /// Builds the full index. Read-only from here on.
    pub fn build(words: &WordList) -> Self {
        let mut counts = [0usize; NUM_LETTERS];
        for &key in words.keys() {
            let mut k = key;
            while k != 0 {
                counts[k.trailing_zeros() as usize] += 1;
                k &= k - 1;
            }
        }

        // Rarity order; ties broken by letter so reruns are stable.
        let order = (0..NUM_LETTERS)
            .sorted_by_key(|&l| (counts[l], l))
            .collect_vec();
        let mut rank = [0usize; NUM_LETTERS];
        for (r, &l) in order.iter().enumerate() {
            rank[l] = r;
        }

        let mut buckets: Vec<Vec<u32>> = vec![Vec::new(); NUM_LETTERS];
        for &key in words.keys() {
            buckets[anchor_rank(key, &rank)].push(key);
        }

        let groups = buckets
            .iter()
            .enumerate()
            .map(|(g, keys)| {
                let m = 1u32 << order[g];
                let tm: [u32; 6] =
                    array::from_fn(|i| 1u32 << order[(g + 1 + i).min(NUM_LETTERS - 1)]);
                let tiers = array::from_fn(|ti| {
                    let eligible = keys
                        .iter()
                        .copied()
                        .filter(|&k| (0..4).all(|b| ti >> b & 1 == 0 || k & tm[b] == 0))
                        .collect_vec();
                    build_tier(&eligible, tm[4], tm[5])
                });
                LetterGroup { m, tm, tiers }
            })
            .collect_vec();

        CandidateIndex { groups }
    }

    /// Top-level seed keys for one group: every member, no padding.
    pub fn seeds(&self, group: usize) -> &[u32] {
        let t = &self.groups[group].tiers[0];
        &t.keys[..t.len]
    }
}

/// Rank of the rarest letter in `key`.
fn anchor_rank(key: u32, rank: &[usize; NUM_LETTERS]) -> usize {
    let mut best = usize::MAX;
    let mut k = key;
    while k != 0 {
        best = best.min(rank[k.trailing_zeros() as usize]);
        k &= k - 1;
    }
    best
}

fn build_tier(keys: &[u32], tm5: u32, tm6: u32) -> Tier {
    let mut parts: [Vec<u32>; 4] = Default::default();
    for &k in keys {
        let class = match (k & tm5 != 0, k & tm6 != 0) {
            (true, true) => 0,
            (true, false) => 1,
            (false, false) => 2,
            (false, true) => 3,
        };
        parts[class].push(k);
    }
    let toff1 = parts[0].len();
    let toff2 = toff1 + parts[1].len();
    let toff3 = toff2 + parts[2].len();
    let len = toff3 + parts[3].len();

    let mut keys = Vec::with_capacity(len + SCAN_WIDTH);
    for part in &parts {
        keys.extend_from_slice(part);
    }
    keys.resize(len + SCAN_WIDTH, SENTINEL);

    Tier {
        keys,
        len,
        toff1,
        toff2,
        toff3,
    }
}
