use std::env;
use std::io::{self, Write};

use anyhow::Result;

use wordquint::index::CandidateIndex;
use wordquint::solver::{solve, SolutionLog, MAX_SOLUTIONS};
use wordquint::words::WordList;

fn main() -> Result<()> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "words_alpha.txt".to_string());

    let words = WordList::load(&path)?;
    let index = CandidateIndex::build(&words);

    let mut log = SolutionLog::with_capacity(MAX_SOLUTIONS);
    solve(&index, &words, &log, rayon::current_num_threads());

    let mut out = io::stdout().lock();
    for record in log.records() {
        out.write_all(record)?;
    }
    Ok(())
}
