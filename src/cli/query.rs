use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use crate::cli::{load_sequences, AlphabetArg, OutputFormat};
use crate::core::alphabet::{DNA, RNA};
use crate::repository::query::QueryResult;
use crate::repository::store::SequenceRepository;

#[derive(Args)]
pub struct QueryArgs {
    /// DNA sequence file(s) to load into the repository
    #[arg(long, value_name = "FILE")]
    pub dna: Vec<PathBuf>,

    /// RNA sequence file(s) to load into the repository
    #[arg(long, value_name = "FILE")]
    pub rna: Vec<PathBuf>,

    /// Only report sequences using this alphabet
    #[arg(short, long, value_enum, default_value = "dna")]
    pub alphabet: AlphabetArg,

    /// Only report sequences from this organism
    #[arg(long, conflicts_with = "subsequence")]
    pub organism: Option<String>,

    /// Only report sequences containing this subsequence
    #[arg(long)]
    pub subsequence: Option<String>,

    /// Remove sequence(s) with this id after querying
    #[arg(long, value_name = "ID")]
    pub remove: Vec<String>,
}

#[derive(Debug, Serialize)]
struct QueryReport {
    query: String,
    alphabet: String,
    repository_size: usize,
    matches: BTreeSet<String>,
    removed: Vec<String>,
    repository_size_after_removal: usize,
    remaining: BTreeSet<String>,
}

pub fn run(args: QueryArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    if args.dna.is_empty() && args.rna.is_empty() {
        anyhow::bail!("No sequence files given, use --dna and/or --rna");
    }

    let mut repository = SequenceRepository::new();
    let inputs = args
        .dna
        .iter()
        .map(|path| (path, &DNA))
        .chain(args.rna.iter().map(|path| (path, &RNA)));

    for (path, alphabet) in inputs {
        let sequences = load_sequences(path, alphabet)?;
        if verbose {
            eprintln!(
                "Loaded {} {alphabet} sequence(s) from {}",
                sequences.len(),
                path.display()
            );
        }
        for sequence in sequences {
            repository
                .add(sequence)
                .with_context(|| format!("Failed to load {}", path.display()))?;
        }
    }

    let kind = args.alphabet.kind();
    let (description, result) = match (&args.organism, &args.subsequence) {
        (Some(organism), _) => (
            format!("organism '{organism}'"),
            repository.ids_for_organism(organism, &kind)?,
        ),
        (None, Some(subsequence)) => (
            format!("subsequence '{subsequence}'"),
            repository.ids_for_subsequence(subsequence, &kind)?,
        ),
        (None, None) => ("all".to_string(), repository.all_ids_of(&kind)?),
    };

    let repository_size = repository.len();
    let matches = result.ids();

    for id in &args.remove {
        repository.remove_id(id)?;
    }

    let report = QueryReport {
        query: description,
        alphabet: kind.to_string(),
        repository_size,
        matches,
        removed: args.remove.clone(),
        repository_size_after_removal: repository.len(),
        remaining: result.ids(),
    };

    match format {
        OutputFormat::Text => print_text(&report, &result),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Tsv => print_tsv(&report),
    }

    Ok(())
}

fn print_text(report: &QueryReport, result: &QueryResult) {
    println!("Query: {} {} sequences", report.query, report.alphabet);
    println!("{}", "=".repeat(60));
    println!("Repository size: {}", report.repository_size);

    println!("\nMatches ({}):", report.matches.len());
    for id in &report.matches {
        println!("  {id}");
    }

    if report.removed.is_empty() {
        return;
    }

    println!("\nRemoved: {}", report.removed.join(", "));
    println!(
        "Repository size after removal: {}",
        report.repository_size_after_removal
    );
    println!("\nMatches after removal ({}):", result.len());
    for id in &report.remaining {
        println!("  {id}");
    }
}

fn print_tsv(report: &QueryReport) {
    println!("id\tstatus");
    for id in &report.matches {
        let status = if report.remaining.contains(id) {
            "present"
        } else {
            "removed"
        };
        println!("{id}\t{status}");
    }
}
