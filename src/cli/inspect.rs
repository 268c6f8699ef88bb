use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::cli::{load_sequences, AlphabetArg, OutputFormat};
use crate::core::sequence::Sequence;

#[derive(Args)]
pub struct InspectArgs {
    /// Sequence file (FASTA layout, optionally gzipped)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Alphabet the records are validated against
    #[arg(short, long, value_enum, default_value = "dna")]
    pub alphabet: AlphabetArg,
}

/// Everything `inspect` reports about one sequence
#[derive(Debug, Serialize)]
struct SequenceReport<'a> {
    id: &'a str,
    organism: &'a str,
    alphabet: &'a str,
    length: usize,
    checksum: String,
    symbols: BTreeSet<char>,
    counts: BTreeMap<char, usize>,
    complement: String,
}

impl<'a> SequenceReport<'a> {
    fn new(sequence: &'a Sequence) -> anyhow::Result<Self> {
        Ok(Self {
            id: sequence.id(),
            organism: sequence.organism(),
            alphabet: sequence.alphabet().name(),
            length: sequence.len(),
            checksum: sequence.checksum(),
            symbols: sequence.distinct_symbols(),
            counts: sequence.histogram(),
            complement: sequence.complement()?.nucleotides().to_string(),
        })
    }
}

pub fn run(args: InspectArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let sequences = load_sequences(&args.input, args.alphabet.alphabet())?;

    if verbose {
        eprintln!(
            "Loaded {} {} sequence(s) from {}",
            sequences.len(),
            args.alphabet.alphabet(),
            args.input.display()
        );
    }

    let reports = sequences
        .iter()
        .map(SequenceReport::new)
        .collect::<anyhow::Result<Vec<_>>>()?;

    match format {
        OutputFormat::Text => print_text(&sequences, &reports),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Tsv => print_tsv(&reports),
    }

    Ok(())
}

fn print_text(sequences: &[Sequence], reports: &[SequenceReport<'_>]) {
    for (sequence, report) in sequences.iter().zip(reports) {
        println!("Sequence: {}", report.id);
        println!("{}", "=".repeat(60));
        println!("  Organism: {}", report.organism);
        println!("  Alphabet: {}", report.alphabet);
        println!("  Length: {}", report.length);
        println!("  MD5: {}", report.checksum);
        println!("  Nucleotides: {}", sequence.nucleotides());

        let symbols: Vec<String> = report.symbols.iter().map(char::to_string).collect();
        println!("  Symbols: {}", symbols.join(" "));

        println!("  Counts:");
        for (symbol, count) in &report.counts {
            println!("    {symbol}: {count}");
        }

        println!("  Complement: {}", report.complement);
        println!();
    }
}

fn print_tsv(reports: &[SequenceReport<'_>]) {
    println!("id\torganism\talphabet\tlength\tmd5\tcomplement");
    for report in reports {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            report.id,
            report.organism,
            report.alphabet,
            report.length,
            report.checksum,
            report.complement
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::alphabet::DNA;

    #[test]
    fn test_sequence_report() {
        let sequence = Sequence::new("EPO", "human", "ACTGGN", &DNA).unwrap();
        let report = SequenceReport::new(&sequence).unwrap();

        assert_eq!(report.length, 6);
        assert_eq!(report.complement, "TGACCN");
        assert_eq!(report.counts.get(&'G'), Some(&2));
        assert_eq!(report.symbols.len(), 5);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["counts"]["G"], 2);
        assert_eq!(json["alphabet"], "DNA");
    }
}
