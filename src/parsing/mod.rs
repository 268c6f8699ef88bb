//! Parsers turning sequence files into [`Sequence`](crate::core::sequence::Sequence)s.
//!
//! Records use the FASTA layout with a structured header:
//!
//! | Part | Content |
//! |------|---------|
//! | Header | `>` followed by `field1\|field2\|...\|organism` |
//! | Id | every field before the organism, joined with `-` |
//! | Body | one or more lines of nucleotides, concatenated |
//!
//! The caller picks the alphabet; every record is validated against it.
//!
//! ## Example
//!
//! ```rust,no_run
//! use seqrepo::core::alphabet::DNA;
//! use seqrepo::parsing::fasta::parse_sequence_file;
//! use std::path::Path;
//!
//! let sequences = parse_sequence_file(Path::new("dna.fa"), &DNA).unwrap();
//! for sequence in &sequences {
//!     println!("{} ({}): {}", sequence.id(), sequence.organism(), sequence.len());
//! }
//! ```

pub mod fasta;
