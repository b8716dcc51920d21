//! End-to-end properties of the search engine on small hand-verified
//! dictionaries.

use wordquint::index::CandidateIndex;
use wordquint::solver::{solve, SolutionLog};
use wordquint::words::{encode, WordList};

/// Five disjoint pangram-minus-z words: exactly one cover.
const PANGRAM: [&str; 5] = ["abcde", "fghij", "klmno", "pqrst", "uvwxy"];

/// Eight words with exactly four covers: {abcde,fghij} or {abcdf,eghij},
/// crossed with uvwxy (z sits out) or vwxyz (u sits out).
const RICH: [&str; 8] = [
    "abcde", "abcdf", "eghij", "fghij", "klmno", "pqrst", "uvwxy", "vwxyz",
];

fn run(dict: &[&str], nthreads: usize) -> Vec<String> {
    let words = WordList::from_words(dict);
    let index = CandidateIndex::build(&words);
    let mut log = SolutionLog::with_capacity(64);
    solve(&index, &words, &log, nthreads);
    let mut lines: Vec<String> = log
        .records()
        .map(|r| String::from_utf8(r.to_vec()).unwrap())
        .collect();
    lines.sort();
    lines
}

fn solution_keys(line: &str) -> Vec<u32> {
    line.trim_end()
        .split('\t')
        .map(|w| encode(w).unwrap().0)
        .collect()
}

#[test]
fn pangram_minus_z_has_exactly_one_solution() {
    let lines = run(&PANGRAM, 1);
    assert_eq!(lines, ["abcde\tfghij\tklmno\tpqrst\tuvwxy\n"]);
}

#[test]
fn collision_edit_kills_the_only_solution() {
    // klmno -> klmna now shares a letter with abcde.
    let dict = ["abcde", "fghij", "klmna", "pqrst", "uvwxy"];
    assert!(run(&dict, 1).is_empty());
}

#[test]
fn one_group_may_sit_out_the_cover() {
    let lines = run(&RICH, 1);
    assert_eq!(lines.len(), 4);
    // Two covers leave out z, two leave out u.
    let missing: Vec<u32> = lines
        .iter()
        .map(|l| !solution_keys(l).iter().fold(0, |m, k| m | k) & ((1 << 26) - 1))
        .collect();
    let z = 1 << 25;
    let u = 1 << 20;
    assert_eq!(missing.iter().filter(|&&m| m == z).count(), 2);
    assert_eq!(missing.iter().filter(|&&m| m == u).count(), 2);
}

#[test]
fn solutions_are_pairwise_disjoint() {
    for line in run(&RICH, 1) {
        let keys = solution_keys(&line);
        assert_eq!(keys.len(), 5);
        for i in 0..5 {
            for j in i + 1..5 {
                assert_eq!(keys[i] & keys[j], 0, "overlap in {line:?}");
            }
        }
    }
}

#[test]
fn no_duplicate_combinations() {
    let lines = run(&RICH, 1);
    let mut deduped = lines.clone();
    deduped.dedup();
    assert_eq!(lines, deduped);
}

#[test]
fn record_layout_is_tab_separated_and_newline_terminated() {
    let line = run(&PANGRAM, 1).remove(0);
    assert_eq!(line.len(), 30);
    assert!(line.ends_with('\n'));
    assert_eq!(line.matches('\t').count(), 4);
    assert!(line.trim_end().split('\t').all(|w| w.len() == 5));
}

#[test]
fn rerun_is_identical() {
    assert_eq!(run(&RICH, 1), run(&RICH, 1));
}

#[test]
fn worker_count_does_not_change_the_solution_set() {
    let single = run(&RICH, 1);
    for nthreads in [2, 4, 8] {
        assert_eq!(run(&RICH, nthreads), single);
    }
}

#[test]
fn anagrams_do_not_multiply_solutions() {
    let mut dict = PANGRAM.to_vec();
    dict.push("badce"); // anagram of abcde
    let lines = run(&dict, 1);
    assert_eq!(lines, ["abcde\tfghij\tklmno\tpqrst\tuvwxy\n"]);
}

#[test]
fn empty_dictionary_finds_nothing() {
    assert!(run(&[], 1).is_empty());
}

#[test]
fn fewer_than_25_letters_finds_nothing() {
    // Both u and z are absent: no 25-letter cover exists.
    let dict = ["abcde", "fghij", "klmno", "pqrst", "vwxya"];
    assert!(run(&dict, 1).is_empty());
}
