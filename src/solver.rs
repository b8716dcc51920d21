//! The search engine: recursive backtracking over the tiered index, atomic
//! work distribution across a fixed thread pool, and lock-free solution
//! recording.

use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use crate::index::{CandidateIndex, MIN_SEARCH_DEPTH};
use crate::scan::scan8;
use crate::words::WordList;

/// Comfortable headroom over the known solution count for the full english
/// dictionary (538 anagram-free combinations).
pub const MAX_SOLUTIONS: usize = 4096;

/// Five words of five letters, each followed by a tab, the last by a newline.
pub const RECORD_LEN: usize = 30;

type Record = [u8; RECORD_LEN];

/// Pre-sized, append-only output buffer. Slots are reserved with an atomic
/// increment-and-fetch, so no two threads ever write the same slot, and
/// entries are never overwritten or removed.
pub struct SolutionLog {
    slots: Box<[UnsafeCell<Record>]>,
    count: AtomicUsize,
}

// Writers touch disjoint slots (each index is handed out exactly once) and
// readers need `&mut self`, so shared access is sound.
unsafe impl Sync for SolutionLog {}

impl SolutionLog {
    /// `capacity` must be at least the true maximum number of solutions;
    /// overflow is out of contract and panics on the slot index.
    pub fn with_capacity(capacity: usize) -> Self {
        let slots = (0..capacity)
            .map(|_| UnsafeCell::new([0u8; RECORD_LEN]))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        SolutionLog {
            slots,
            count: AtomicUsize::new(0),
        }
    }

    fn push(&self, record: Record) {
        let pos = self.count.fetch_add(1, Ordering::Relaxed);
        unsafe {
            *self.slots[pos].get() = record;
        }
    }

    pub fn len(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All recorded lines, in recording order. Exclusive access guarantees
    /// every writer is done.
    pub fn records(&mut self) -> impl Iterator<Item = &Record> {
        let filled = self.len().min(self.slots.len());
        self.slots[..filled].iter_mut().map(|slot| &*slot.get_mut())
    }
}

/// One top-level pass: a seed array with a shared claim cursor, the group
/// the recursion resumes from, and whether a group skip is already spent.
struct Pass<'a> {
    seeds: &'a [u32],
    from: usize,
    skipped: bool,
    cursor: AtomicUsize,
}

impl<'a> Pass<'a> {
    fn new(seeds: &'a [u32], from: usize, skipped: bool) -> Self {
        Pass {
            seeds,
            from,
            skipped,
            cursor: AtomicUsize::new(0),
        }
    }
}

struct Solver<'a> {
    index: &'a CandidateIndex,
    words: &'a WordList,
    log: &'a SolutionLog,
}

impl Solver<'_> {
    /// Claims seeds of granularity 1 off each pass cursor until both passes
    /// are exhausted.
    fn work(&self, passes: &[Pass; 2]) {
        let mut partial = [0u32; 5];
        for pass in passes {
            loop {
                let at = pass.cursor.fetch_add(1, Ordering::Relaxed);
                let Some(&seed) = pass.seeds.get(at) else { break };
                self.descend(0, pass.from, 0, pass.skipped, &mut partial, seed);
            }
        }
    }

    /// Places `key` at position `depth` and explores every extension to five
    /// words. Groups are visited from `from` in ascending rarity order;
    /// exactly one uncovered group may be passed over per path, so that a
    /// single alphabet letter can sit out the 25-letter cover.
    fn descend(
        &self,
        depth: usize,
        from: usize,
        mask: u32,
        mut skipped: bool,
        partial: &mut [u32; 5],
        key: u32,
    ) {
        partial[depth] = key;
        if depth == 4 {
            return self.record(partial);
        }
        let mask = mask | key;

        let end = (MIN_SEARCH_DEPTH + depth + 1).min(self.index.groups.len());
        for gi in from..end {
            let group = &self.index.groups[gi];
            if mask & group.m != 0 {
                continue;
            }

            let ti = (mask & group.tm[0] != 0) as usize
                | ((mask & group.tm[1] != 0) as usize) << 1
                | ((mask & group.tm[2] != 0) as usize) << 2
                | ((mask & group.tm[3] != 0) as usize) << 3;
            let tier = &group.tiers[ti];

            let mf = (mask & group.tm[4] != 0) as usize;
            let ms = (mask & group.tm[5] != 0) as usize;

            // Branchless sub-range selection from the tier offsets.
            let stop = ms * tier.toff3 + (1 - ms) * tier.len;
            let ms = ms & (1 - mf);
            let mut at = (mf & (1 - ms)) * tier.toff2 + ms * tier.toff1;

            while at < stop {
                let mut hits = scan8(mask, &tier.keys[at..at + 8]);
                while hits != 0 {
                    let bit = hits.trailing_zeros();
                    let next = tier.keys[at + (bit >> 2) as usize];
                    self.descend(depth + 1, gi + 1, mask, skipped, partial, next);
                    hits ^= 0xF << bit;
                }
                at += 8;
            }

            if skipped {
                break;
            }
            skipped = true;
        }
    }

    fn record(&self, partial: &[u32; 5]) {
        let mut record = [0u8; RECORD_LEN];
        for (i, &key) in partial.iter().enumerate() {
            let word = self
                .words
                .spell(key)
                .expect("search produced a key the word table cannot resolve");
            record[i * 6..i * 6 + 5].copy_from_slice(word);
            record[i * 6 + 5] = if i < 4 { b'\t' } else { b'\n' };
        }
        self.log.push(record);
    }
}

/// Runs the full search over `nthreads` workers, the calling thread
/// included. Pass (a) seeds from the most restrictive letter group; pass (b)
/// seeds from the next group with the first conceptually skipped. Workers
/// signal a shared completion counter and the caller busy-spins on it
/// instead of blocking.
pub fn solve(index: &CandidateIndex, words: &WordList, log: &SolutionLog, nthreads: usize) {
    let solver = Solver { index, words, log };
    let passes = [
        Pass::new(index.seeds(0), 1, false),
        Pass::new(index.seeds(1), 2, true),
    ];
    let nthreads = nthreads.max(1);
    let done = AtomicUsize::new(0);

    thread::scope(|s| {
        for _ in 1..nthreads {
            s.spawn(|| {
                solver.work(&passes);
                done.fetch_add(1, Ordering::Release);
            });
        }
        solver.work(&passes);
        done.fetch_add(1, Ordering::Release);

        while done.load(Ordering::Acquire) < nthreads {
            std::hint::spin_loop();
        }
    });
}
