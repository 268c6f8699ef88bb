//! In-memory sequence storage and live query results.
//!
//! A [`SequenceRepository`](store::SequenceRepository) owns sequences keyed by
//! their id. Queries filter the stored sequences by alphabet kind plus an
//! organism or subsequence predicate, and return a
//! [`QueryResult`](query::QueryResult) holding a snapshot of the matching ids.
//!
//! Query results stay consistent with the repository: removing a sequence
//! removes its id from every query result the repository issued, before
//! `remove` returns. Results only ever shrink; sequences added later are not
//! picked up by earlier results.
//!
//! ## Example
//!
//! ```rust
//! use seqrepo::core::alphabet::{AlphabetKind, DNA};
//! use seqrepo::{Sequence, SequenceRepository};
//!
//! let mut repository = SequenceRepository::new();
//! repository.add(Sequence::new("GLOBIN", "chicken", "ATGN", &DNA).unwrap()).unwrap();
//! repository.add(Sequence::new("EPO", "mouse", "ACGTN", &DNA).unwrap()).unwrap();
//!
//! let with_acg = repository.ids_for_subsequence("ACG", &AlphabetKind::Dna).unwrap();
//! assert!(with_acg.contains("EPO"));
//!
//! repository.remove_id("EPO").unwrap();
//! assert!(!with_acg.contains("EPO"));
//! ```

pub mod query;
pub mod store;
