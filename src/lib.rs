//! # seqrepo
//!
//! A library for validating, mutating and querying DNA/RNA sequences.
//!
//! Every sequence carries an id, the organism it comes from, and the alphabet
//! its nucleotides are validated against. Sequences are collected in an
//! in-memory repository that answers queries by alphabet, organism or
//! subsequence.
//!
//! ## Features
//!
//! - **Alphabet validation**: Built-in DNA and RNA alphabets, open to custom ones
//! - **Sequence operations**: Composition, complement, concatenation and range-checked mutation
//! - **Live query results**: Removing a sequence removes its id from every earlier result
//! - **Sequence files**: FASTA-layout records with `id|...|organism` headers, plain or gzipped
//!
//! ## Example
//!
//! ```rust
//! use seqrepo::core::alphabet::{AlphabetKind, DNA, RNA};
//! use seqrepo::{Sequence, SequenceRepository};
//!
//! let mut repository = SequenceRepository::new();
//! repository.add(Sequence::new("DNAGLAPROTEIN", "human", "ACGTN", &DNA).unwrap()).unwrap();
//! repository.add(Sequence::new("RNAGLAPROTEIN", "human", "ACGUN", &RNA).unwrap()).unwrap();
//!
//! let dna = repository.all_ids_of(&AlphabetKind::Dna).unwrap();
//! assert_eq!(dna.len(), 1);
//!
//! let sequence = repository.get("DNAGLAPROTEIN").unwrap().unwrap();
//! assert_eq!(sequence.complement().unwrap().nucleotides(), "TGCAN");
//! assert_eq!(sequence.mutate(1, 2, "TT").unwrap(), "ATTTN");
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Alphabets, sequences and their errors
//! - [`repository`]: Sequence repository and live query results
//! - [`parsing`]: Sequence file parser
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod parsing;
pub mod repository;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::alphabet::{Alphabet, AlphabetKind, Symbol, DNA, RNA};
pub use crate::core::error::SequenceError;
pub use crate::core::sequence::Sequence;
pub use repository::query::QueryResult;
pub use repository::store::SequenceRepository;
