//! Core data types for nucleotide sequences.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Symbol`](alphabet::Symbol): A nucleotide and its complementary nucleotide
//! - [`Alphabet`](alphabet::Alphabet): A named set of symbols that validates nucleotide strings
//! - [`Sequence`](sequence::Sequence): An identified, organism-tagged nucleotide string
//! - [`SequenceError`](error::SequenceError): Errors raised by all of the above
//!
//! ## Built-in Alphabets
//!
//! | Alphabet | Symbols | Complements |
//! |----------|---------|-------------|
//! | DNA      | A C G T N | T G C A N |
//! | RNA      | A C G U N | U G C A N |
//!
//! Validation is case-insensitive. Other alphabets can be created with
//! [`Alphabet::new`](alphabet::Alphabet::new) and an
//! [`AlphabetKind::Custom`](alphabet::AlphabetKind::Custom) tag.

pub mod alphabet;
pub mod error;
pub mod sequence;
