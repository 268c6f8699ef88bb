use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::cli::{load_sequences, AlphabetArg, OutputFormat};

#[derive(Args)]
pub struct MutateArgs {
    /// Sequence file (FASTA layout, optionally gzipped)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Alphabet the records and the replacement are validated against
    #[arg(short, long, value_enum, default_value = "dna")]
    pub alphabet: AlphabetArg,

    /// Zero-based position of the first nucleotide to replace
    #[arg(long)]
    pub start: usize,

    /// Number of nucleotides to replace
    #[arg(long)]
    pub length: usize,

    /// Nucleotides inserted in place of the replaced range
    #[arg(long)]
    pub replacement: String,
}

#[derive(Debug, Serialize)]
struct Mutation {
    id: String,
    original: String,
    mutated: String,
}

pub fn run(args: MutateArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let sequences = load_sequences(&args.input, args.alphabet.alphabet())?;

    if verbose {
        eprintln!(
            "Replacing {} nucleotide(s) at position {} with '{}' in {} sequence(s)",
            args.length,
            args.start,
            args.replacement,
            sequences.len()
        );
    }

    let mut mutations = Vec::with_capacity(sequences.len());
    for sequence in &sequences {
        let mutated = sequence
            .mutate(args.start, args.length, &args.replacement)
            .map_err(|e| anyhow::anyhow!("Cannot mutate '{}': {e}", sequence.id()))?;
        mutations.push(Mutation {
            id: sequence.id().to_string(),
            original: sequence.nucleotides().to_string(),
            mutated,
        });
    }

    match format {
        OutputFormat::Text => {
            for mutation in &mutations {
                println!("{}", mutation.id);
                println!("  Original: {}", mutation.original);
                println!("  Mutated:  {}", mutation.mutated);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&mutations)?),
        OutputFormat::Tsv => {
            println!("id\toriginal\tmutated");
            for mutation in &mutations {
                println!(
                    "{}\t{}\t{}",
                    mutation.id, mutation.original, mutation.mutated
                );
            }
        }
    }

    Ok(())
}
