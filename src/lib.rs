//! Exhaustive search for five five-letter words whose combined letters are
//! all distinct, covering 25 of the 26 alphabet letters.
//!
//! The search works on 26-bit letter-occurrence keys. Candidates are bucketed
//! by their rarest letter into frequency-ranked groups ([`index`]), scanned
//! eight at a time against the running usage mask ([`scan`]), and expanded by
//! a recursive backtracking solver that spreads its top-level seeds over a
//! fixed thread pool with atomic cursors ([`solver`]).

pub mod index;
pub mod scan;
pub mod solver;
pub mod words;
