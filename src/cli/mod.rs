//! Command-line interface for seqrepo.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **inspect**: Show identity, composition and complement of every record in a file
//! - **mutate**: Splice a replacement into every record of a file
//! - **query**: Load files into a repository, query it, and watch removals update the result
//! - **alphabets**: Show the symbols of the built-in alphabets
//!
//! ## Usage
//!
//! ```text
//! # Inspect a DNA file
//! seqrepo inspect dna.fa
//!
//! # Replace two nucleotides starting at position 1
//! seqrepo mutate dna.fa --start 1 --length 2 --replacement AT
//!
//! # All DNA sequences containing ACG, before and after removing one of them
//! seqrepo query --dna dna.fa --rna rna.fa --subsequence ACG --remove EPO
//!
//! # JSON output for scripting
//! seqrepo alphabets --format json
//! ```

use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::warn;

use crate::core::alphabet::{Alphabet, AlphabetKind, DNA, RNA};
use crate::core::sequence::Sequence;
use crate::parsing::fasta::{is_fasta_file, parse_sequence_file};

pub mod alphabets;
pub mod inspect;
pub mod mutate;
pub mod query;

#[derive(Parser)]
#[command(name = "seqrepo")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Validate, mutate and query DNA/RNA sequences")]
#[command(
    long_about = "seqrepo reads nucleotide sequences from FASTA-layout files, validates them against the DNA or RNA alphabet, and provides:\n- Composition, checksum and complement of each sequence\n- Range-checked mutation\n- Repository queries by alphabet, organism or subsequence whose results track removals"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show details of every sequence in a file
    Inspect(inspect::InspectArgs),

    /// Replace part of every sequence in a file
    Mutate(mutate::MutateArgs),

    /// Query a repository built from sequence files
    Query(query::QueryArgs),

    /// Show the built-in alphabets
    Alphabets,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Built-in alphabet selectable on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum AlphabetArg {
    Dna,
    Rna,
}

impl AlphabetArg {
    pub fn alphabet(self) -> &'static Alphabet {
        match self {
            Self::Dna => &DNA,
            Self::Rna => &RNA,
        }
    }

    pub fn kind(self) -> AlphabetKind {
        self.alphabet().kind().clone()
    }
}

/// Read a sequence file with the context the CLI reports on failure
pub(crate) fn load_sequences(path: &Path, alphabet: &Alphabet) -> anyhow::Result<Vec<Sequence>> {
    if !is_fasta_file(path) {
        warn!(
            path = %path.display(),
            "Unrecognized extension, reading as a FASTA-layout sequence file"
        );
    }

    parse_sequence_file(path, alphabet)
        .with_context(|| format!("Failed to read sequences from {}", path.display()))
}
