//! Parser for sequence files in FASTA layout using noodles.
//!
//! Each record starts with a header line of `|`-separated fields, the last of
//! which names the organism:
//!
//! ```text
//! >sp|P01588|EPO|Homo sapiens
//! ACGTTGCA
//! NNACGT
//! ```
//!
//! All fields before the organism are joined with `-` to form the sequence id
//! (`sp-P01588-EPO` above). Body lines are concatenated.
//!
//! Supports both uncompressed and gzip/bgzip compressed files.

use std::ffi::OsStr;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use noodles::fasta;
use thiserror::Error;
use tracing::debug;

use crate::core::alphabet::Alphabet;
use crate::core::error::SequenceError;
use crate::core::sequence::{Sequence, UNKNOWN_ORGANISM};
use crate::utils::validation::{check_record_limit, MAX_RECORDS};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid sequence file format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Too many records: {0} exceeds maximum allowed ({MAX_RECORDS})")]
    TooManyRecords(usize),

    #[error("Invalid record '{header}': {source}")]
    InvalidRecord {
        header: String,
        source: SequenceError,
    },
}

/// Check if the path has a FASTA-like extension
pub fn is_fasta_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();

    // Check for gzipped FASTA
    if path_str.ends_with(".fa.gz")
        || path_str.ends_with(".fasta.gz")
        || path_str.ends_with(".fna.gz")
        || path_str.ends_with(".fa.bgz")
        || path_str.ends_with(".fasta.bgz")
        || path_str.ends_with(".fna.bgz")
    {
        return true;
    }

    matches!(
        path.extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .as_deref(),
        Some("fa" | "fasta" | "fna" | "txt")
    )
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Split a header line into `(id, organism)`.
///
/// The leading `>` is optional. An empty last field yields
/// [`UNKNOWN_ORGANISM`]. A header with a single field yields an empty id,
/// which [`Sequence::new`] rejects.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the header is empty.
pub fn parse_header(header: &str) -> Result<(String, String), ParseError> {
    let header = header.trim();
    let header = header.strip_prefix('>').unwrap_or(header);
    if header.is_empty() {
        return Err(ParseError::InvalidFormat("empty header line".to_string()));
    }

    let fields: Vec<&str> = header.split('|').collect();
    let (organism, id_fields) = fields
        .split_last()
        .ok_or_else(|| ParseError::InvalidFormat(format!("no fields in header '{header}'")))?;

    let organism = if organism.trim().is_empty() {
        UNKNOWN_ORGANISM.to_string()
    } else {
        organism.trim().to_string()
    };

    Ok((id_fields.join("-"), organism))
}

/// Parse a sequence file, validating every record against `alphabet`.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles`
/// if parsing fails, `ParseError::InvalidFormat` if no records are found,
/// `ParseError::InvalidRecord` if a record does not form a valid sequence, or
/// `ParseError::TooManyRecords` if the limit is exceeded.
pub fn parse_sequence_file(path: &Path, alphabet: &Alphabet) -> Result<Vec<Sequence>, ParseError> {
    let file = std::fs::File::open(path)?;

    let sequences = if is_gzipped(path) {
        read_sequences(BufReader::new(GzDecoder::new(file)), alphabet)?
    } else {
        read_sequences(BufReader::new(file), alphabet)?
    };

    debug!(
        path = %path.display(),
        records = sequences.len(),
        alphabet = %alphabet,
        "Parsed sequence file"
    );
    Ok(sequences)
}

/// Read every record from `reader` as a sequence over `alphabet`.
///
/// # Errors
///
/// Same as [`parse_sequence_file`], minus file access.
pub fn read_sequences<R: BufRead>(
    reader: R,
    alphabet: &Alphabet,
) -> Result<Vec<Sequence>, ParseError> {
    let mut fasta_reader = fasta::io::Reader::new(reader);
    let mut sequences = Vec::new();
    let mut definition = String::new();
    let mut raw_sequence = Vec::new();

    loop {
        definition.clear();
        let bytes_read = fasta_reader
            .read_definition(&mut definition)
            .map_err(|e| ParseError::Noodles(format!("Failed to read record header: {e}")))?;
        if bytes_read == 0 {
            break;
        }

        // Check record limit for DOS protection
        if check_record_limit(sequences.len()).is_some() {
            return Err(ParseError::TooManyRecords(sequences.len()));
        }

        raw_sequence.clear();
        fasta_reader
            .read_sequence(&mut raw_sequence)
            .map_err(|e| ParseError::Noodles(format!("Failed to read record body: {e}")))?;

        // Keep the definition line verbatim; noodles' parsed name stops at whitespace
        let trimmed = definition.trim();
        let header = trimmed.strip_prefix('>').unwrap_or(trimmed).to_string();
        let (id, organism) = parse_header(&header)?;

        raw_sequence.retain(|b| !b.is_ascii_whitespace());
        let nucleotides = String::from_utf8_lossy(&raw_sequence).into_owned();

        let sequence = Sequence::new(id, organism, nucleotides, alphabet)
            .map_err(|source| ParseError::InvalidRecord { header, source })?;
        sequences.push(sequence);
    }

    if sequences.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in sequence file".to_string(),
        ));
    }

    Ok(sequences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::alphabet::{DNA, RNA};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_is_fasta_file() {
        assert!(is_fasta_file(Path::new("test.fa")));
        assert!(is_fasta_file(Path::new("test.fasta")));
        assert!(is_fasta_file(Path::new("dna.txt")));
        assert!(is_fasta_file(Path::new("test.fa.gz")));
        assert!(is_fasta_file(Path::new("/path/to/Reference.FA")));

        assert!(!is_fasta_file(Path::new("test.bam")));
        assert!(!is_fasta_file(Path::new("test.fai")));
    }

    #[test]
    fn test_parse_header() {
        let (id, organism) = parse_header(">sp|P01588|EPO|Homo sapiens").unwrap();
        assert_eq!(id, "sp-P01588-EPO");
        assert_eq!(organism, "Homo sapiens");

        let (id, organism) = parse_header("GLOBIN|chicken").unwrap();
        assert_eq!(id, "GLOBIN");
        assert_eq!(organism, "chicken");
    }

    #[test]
    fn test_parse_header_single_field() {
        let (id, organism) = parse_header(">chicken").unwrap();
        assert_eq!(id, "");
        assert_eq!(organism, "chicken");
    }

    #[test]
    fn test_parse_header_empty_organism() {
        let (id, organism) = parse_header(">A|B|").unwrap();
        assert_eq!(id, "A-B");
        assert_eq!(organism, UNKNOWN_ORGANISM);
    }

    #[test]
    fn test_parse_header_empty() {
        assert!(matches!(
            parse_header(">"),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_read_sequences() {
        let content = b">sp|P01588|EPO|Homo sapiens\nACGT\nNNGG\n>GLOBIN|chicken\nATGN\n";

        let sequences = read_sequences(&content[..], &DNA).unwrap();
        assert_eq!(sequences.len(), 2);
        assert_eq!(sequences[0].id(), "sp-P01588-EPO");
        assert_eq!(sequences[0].organism(), "Homo sapiens");
        assert_eq!(sequences[0].nucleotides(), "ACGTNNGG");
        assert_eq!(sequences[1].id(), "GLOBIN");
        assert_eq!(sequences[1].nucleotides(), "ATGN");
    }

    #[test]
    fn test_read_sequences_wrong_alphabet() {
        let content = b">EPO|human\nACGT\n";

        let result = read_sequences(&content[..], &RNA);
        match result {
            Err(ParseError::InvalidRecord { header, source }) => {
                assert_eq!(header, "EPO|human");
                assert!(matches!(source, SequenceError::InvalidSequence { .. }));
            }
            other => panic!("Expected InvalidRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_read_sequences_strips_padded_lines() {
        let content = b">EPO|human  \nACGT  \n  NN\t\r\n";

        let sequences = read_sequences(&content[..], &DNA).unwrap();
        assert_eq!(sequences[0].id(), "EPO");
        assert_eq!(sequences[0].organism(), "human");
        assert_eq!(sequences[0].nucleotides(), "ACGTNN");
    }

    #[test]
    fn test_read_sequences_keeps_organism_spacing() {
        let content = b">EPO|Homo  sapiens\nACGT\n";

        let sequences = read_sequences(&content[..], &DNA).unwrap();
        assert_eq!(sequences[0].organism(), "Homo  sapiens");
    }

    #[test]
    fn test_read_sequences_missing_id() {
        let content = b">human\nACGT\n";

        let result = read_sequences(&content[..], &DNA);
        assert!(matches!(
            result,
            Err(ParseError::InvalidRecord {
                source: SequenceError::InvalidId(_),
                ..
            })
        ));
    }

    #[test]
    fn test_parse_sequence_file() {
        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(b">NM|000518|human\nACGU\nACGU\n").unwrap();
        temp.flush().unwrap();

        let sequences = parse_sequence_file(temp.path(), &RNA).unwrap();
        assert_eq!(sequences.len(), 1);
        assert_eq!(sequences[0].id(), "NM-000518");
        assert_eq!(sequences[0].len(), 8);
    }

    #[test]
    fn test_parse_gzipped_sequence_file() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b">EPO|mouse\nACGTN\n").unwrap();
        let compressed = encoder.finish().unwrap();

        let mut temp = NamedTempFile::with_suffix(".fa.gz").unwrap();
        temp.write_all(&compressed).unwrap();
        temp.flush().unwrap();

        let sequences = parse_sequence_file(temp.path(), &DNA).unwrap();
        assert_eq!(sequences[0].id(), "EPO");
        assert_eq!(sequences[0].organism(), "mouse");
        assert_eq!(sequences[0].nucleotides(), "ACGTN");
    }

    #[test]
    fn test_parse_empty_file() {
        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(b"").unwrap();
        temp.flush().unwrap();

        let result = parse_sequence_file(temp.path(), &DNA);
        assert!(matches!(result, Err(ParseError::InvalidFormat(_))));
    }
}
