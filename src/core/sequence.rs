use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};

use crate::core::alphabet::Alphabet;
use crate::core::error::{Result, SequenceError};

/// Organism assigned when none is given
pub const UNKNOWN_ORGANISM: &str = "unknown";

/// An identified, organism-tagged nucleotide string validated against an alphabet.
///
/// The nucleotides always validate against the alphabet: every constructor and
/// mutator checks the new state before committing it, and the nucleotide string
/// is only ever replaced as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sequence {
    id: String,
    organism: String,
    #[serde(serialize_with = "serialize_alphabet_name")]
    alphabet: Alphabet,
    nucleotides: String,
}

fn serialize_alphabet_name<S: Serializer>(
    alphabet: &Alphabet,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(alphabet.name())
}

impl Sequence {
    /// Create a sequence from its parts.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::InvalidId` if `id` is empty, or
    /// `SequenceError::InvalidSequence` if `nucleotides` does not validate
    /// against `alphabet`.
    pub fn new(
        id: impl Into<String>,
        organism: impl Into<String>,
        nucleotides: impl Into<String>,
        alphabet: &Alphabet,
    ) -> Result<Self> {
        let id = id.into();
        if !Self::is_valid_id(&id) {
            return Err(SequenceError::InvalidId(
                "a sequence id cannot be empty".to_string(),
            ));
        }

        let nucleotides = nucleotides.into();
        alphabet.check_sequence(&nucleotides)?;

        Ok(Self {
            id,
            organism: organism.into(),
            alphabet: alphabet.clone(),
            nucleotides,
        })
    }

    /// Create a sequence whose organism is [`UNKNOWN_ORGANISM`].
    ///
    /// # Errors
    ///
    /// Same as [`Sequence::new`].
    pub fn with_unknown_organism(
        id: impl Into<String>,
        nucleotides: impl Into<String>,
        alphabet: &Alphabet,
    ) -> Result<Self> {
        Self::new(id, UNKNOWN_ORGANISM, nucleotides, alphabet)
    }

    /// Concatenate two sequences sharing the same alphabet.
    ///
    /// The result keeps the id, organism and alphabet of `first`.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::InvalidAlphabet` if the alphabets differ.
    pub fn concat(first: &Sequence, second: &Sequence) -> Result<Self> {
        if first.alphabet != second.alphabet {
            return Err(SequenceError::InvalidAlphabet(format!(
                "cannot concatenate a {} sequence with a {} sequence",
                first.alphabet, second.alphabet
            )));
        }

        let mut nucleotides = String::with_capacity(first.len() + second.len());
        nucleotides.push_str(&first.nucleotides);
        nucleotides.push_str(&second.nucleotides);

        Self::new(
            first.id.clone(),
            first.organism.clone(),
            nucleotides,
            &first.alphabet,
        )
    }

    /// An id is valid when it is not empty
    pub fn is_valid_id(id: &str) -> bool {
        !id.is_empty()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn organism(&self) -> &str {
        &self.organism
    }

    pub fn set_organism(&mut self, organism: impl Into<String>) {
        self.organism = organism.into();
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn nucleotides(&self) -> &str {
        &self.nucleotides
    }

    /// Number of nucleotides
    pub fn len(&self) -> usize {
        self.nucleotides.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.nucleotides.is_empty()
    }

    /// Count the exact occurrences of `symbol`.
    ///
    /// Validity is checked case-insensitively, but only matching characters
    /// of the same case are counted.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::InvalidSymbol` if `symbol` is not part of the alphabet.
    pub fn count_of(&self, symbol: char) -> Result<usize> {
        self.alphabet
            .check_symbol(symbol)
            .map_err(|_| SequenceError::InvalidSymbol {
                symbol,
                alphabet: self.alphabet.name().to_string(),
            })?;

        Ok(self
            .nucleotides
            .chars()
            .filter(|&c| c == symbol)
            .count())
    }

    /// Count every character present in the nucleotides, as written
    pub fn histogram(&self) -> BTreeMap<char, usize> {
        let mut counts = BTreeMap::new();
        for c in self.nucleotides.chars() {
            *counts.entry(c).or_default() += 1;
        }
        counts
    }

    /// The distinct characters present in the nucleotides, in ascending order
    pub fn distinct_symbols(&self) -> BTreeSet<char> {
        self.nucleotides.chars().collect()
    }

    /// Literal substring test; `text` is not validated against the alphabet
    pub fn contains_subsequence(&self, text: &str) -> bool {
        self.nucleotides.contains(text)
    }

    /// Build the complementary sequence.
    ///
    /// The result has the same id, organism and alphabet. Each nucleotide is
    /// replaced by the complementary character of its (uppercased) symbol.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::InvalidSequence` if a nucleotide has no matching
    /// symbol in the alphabet.
    pub fn complement(&self) -> Result<Sequence> {
        let complementary = self
            .nucleotides
            .chars()
            .map(|c| {
                self.alphabet
                    .complement_of_symbol(c)
                    .ok_or_else(|| SequenceError::InvalidSequence {
                        sequence: self.nucleotides.clone(),
                        alphabet: self.alphabet.name().to_string(),
                    })
            })
            .collect::<Result<String>>()?;

        Self::new(
            self.id.clone(),
            self.organism.clone(),
            complementary,
            &self.alphabet,
        )
    }

    /// Compute the nucleotides obtained by replacing `length` nucleotides at
    /// `start` with `replacement`.
    ///
    /// The sequence itself is left unchanged; see [`Sequence::apply_mutation`].
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::InvalidRange` if `start` is not inside the
    /// sequence, if `length` exceeds the sequence length, or if the range
    /// runs past the end. Returns `SequenceError::InvalidSequence` if
    /// `replacement` does not validate against the alphabet.
    pub fn mutate(&self, start: usize, length: usize, replacement: &str) -> Result<String> {
        let nucleotides: Vec<char> = self.nucleotides.chars().collect();
        let len = nucleotides.len();

        if start >= len {
            return Err(SequenceError::InvalidRange(format!(
                "bad start: {start} is outside a sequence of length {len}"
            )));
        }
        if length > len {
            return Err(SequenceError::InvalidRange(format!(
                "bad length: {length} exceeds a sequence of length {len}"
            )));
        }
        if start + length > len {
            return Err(SequenceError::InvalidRange(format!(
                "bad start+length combo: {start}+{length} exceeds a sequence of length {len}"
            )));
        }
        self.alphabet.check_sequence(replacement)?;

        let mut mutated = String::with_capacity(len - length + replacement.len());
        mutated.extend(&nucleotides[..start]);
        mutated.push_str(replacement);
        mutated.extend(&nucleotides[start + length..]);
        Ok(mutated)
    }

    /// Replace the nucleotides with the result of [`Sequence::mutate`].
    ///
    /// # Errors
    ///
    /// Same as [`Sequence::mutate`]; the sequence is unchanged on error.
    pub fn apply_mutation(&mut self, start: usize, length: usize, replacement: &str) -> Result<()> {
        self.nucleotides = self.mutate(start, length, replacement)?;
        Ok(())
    }

    /// Lowercase hex MD5 of the uppercased nucleotides
    pub fn checksum(&self) -> String {
        let uppercase = self.nucleotides.to_ascii_uppercase();
        format!("{:x}", md5::compute(uppercase.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::alphabet::{DNA, RNA};

    fn actgg() -> Sequence {
        Sequence::new("EPO", "HUMAN", "ACTGG", &DNA).unwrap()
    }

    #[test]
    fn test_new() {
        let seq = Sequence::new("EPO", "HUMAN", "GGATTAATAC", &DNA).unwrap();
        assert_eq!(seq.id(), "EPO");
        assert_eq!(seq.organism(), "HUMAN");
        assert_eq!(seq.nucleotides(), "GGATTAATAC");
        assert_eq!(seq.alphabet(), &DNA);
        assert_eq!(seq.len(), 10);
    }

    #[test]
    fn test_new_rejects_empty_id() {
        let result = Sequence::new("", "HUMAN", "GGATTAATAC", &DNA);
        assert!(matches!(result, Err(SequenceError::InvalidId(_))));
    }

    #[test]
    fn test_new_rejects_invalid_nucleotides() {
        let result = Sequence::new("EPO", "HUMAN", "GGAUUAAUAC", &DNA);
        assert!(matches!(
            result,
            Err(SequenceError::InvalidSequence { .. })
        ));
    }

    #[test]
    fn test_unknown_organism() {
        let seq = Sequence::with_unknown_organism("ALB", "GGTATAC", &DNA).unwrap();
        assert_eq!(seq.id(), "ALB");
        assert_eq!(seq.organism(), UNKNOWN_ORGANISM);
        assert_eq!(seq.nucleotides(), "GGTATAC");

        assert!(Sequence::with_unknown_organism("", "GGTATAC", &DNA).is_err());
        assert!(Sequence::with_unknown_organism("ALB", "GGUAUAC", &DNA).is_err());
    }

    #[test]
    fn test_set_organism() {
        let mut seq = actgg();
        seq.set_organism("MOUSE");
        assert_eq!(seq.organism(), "MOUSE");
    }

    #[test]
    fn test_concat_same_alphabet() {
        let first = Sequence::new("A1", "human", "ACGT", &DNA).unwrap();
        let second = Sequence::new("A2", "mouse", "NNGG", &DNA).unwrap();

        let joined = Sequence::concat(&first, &second).unwrap();
        assert_eq!(joined.id(), "A1");
        assert_eq!(joined.organism(), "human");
        assert_eq!(joined.nucleotides(), "ACGTNNGG");
        assert_eq!(joined.alphabet(), &DNA);
    }

    #[test]
    fn test_concat_different_alphabets() {
        let first = Sequence::new("A1", "human", "ACGT", &DNA).unwrap();
        let second = Sequence::new("A2", "human", "ACGU", &RNA).unwrap();

        let result = Sequence::concat(&first, &second);
        assert!(matches!(result, Err(SequenceError::InvalidAlphabet(_))));
    }

    #[test]
    fn test_count_of() {
        let seq = actgg();
        assert_eq!(seq.count_of('A').unwrap(), 1);
        assert_eq!(seq.count_of('G').unwrap(), 2);
        assert_eq!(seq.count_of('g').unwrap(), 0);
        assert_eq!(seq.count_of('N').unwrap(), 0);
    }

    #[test]
    fn test_count_of_agrees_with_histogram() {
        let seq = Sequence::new("MIXED", "human", "ACgGA", &DNA).unwrap();
        let histogram = seq.histogram();
        for symbol in ['A', 'C', 'G', 'g'] {
            assert_eq!(seq.count_of(symbol).unwrap(), histogram[&symbol]);
        }
        assert_eq!(seq.count_of('G').unwrap(), 1);
    }

    #[test]
    fn test_count_of_invalid_symbol() {
        let result = actgg().count_of('U');
        assert_eq!(
            result,
            Err(SequenceError::InvalidSymbol {
                symbol: 'U',
                alphabet: "DNA".to_string(),
            })
        );
    }

    #[test]
    fn test_histogram_and_distinct_symbols() {
        let seq = Sequence::new("X", "human", "ACgGA", &DNA).unwrap();

        let histogram = seq.histogram();
        assert_eq!(histogram.get(&'A'), Some(&2));
        assert_eq!(histogram.get(&'C'), Some(&1));
        assert_eq!(histogram.get(&'G'), Some(&1));
        assert_eq!(histogram.get(&'g'), Some(&1));
        assert_eq!(histogram.len(), 4);

        let distinct: Vec<char> = seq.distinct_symbols().into_iter().collect();
        assert_eq!(distinct, vec!['A', 'C', 'G', 'g']);
    }

    #[test]
    fn test_contains_subsequence() {
        let seq = actgg();
        assert!(seq.contains_subsequence("CTG"));
        assert!(!seq.contains_subsequence("GA"));
        // Not validated against the alphabet
        assert!(!seq.contains_subsequence("XYZ"));
    }

    #[test]
    fn test_complement() {
        let seq = Sequence::new("C1", "human", "ACTGGN", &DNA).unwrap();
        let complement = seq.complement().unwrap();

        assert_eq!(complement.nucleotides(), "TGACCN");
        assert_eq!(complement.id(), "C1");
        assert_eq!(complement.organism(), "human");
        assert_eq!(complement.alphabet(), &DNA);
    }

    #[test]
    fn test_complement_lowercase_and_rna() {
        let seq = Sequence::new("C1", "human", "actg", &DNA).unwrap();
        assert_eq!(seq.complement().unwrap().nucleotides(), "TGAC");

        let rna = Sequence::new("R1", "human", "ACGUN", &RNA).unwrap();
        assert_eq!(rna.complement().unwrap().nucleotides(), "UGCAN");
    }

    #[test]
    fn test_complement_twice_is_identity() {
        for (nucleotides, alphabet) in [("GATTACANN", &DNA), ("GAUUACANN", &RNA)] {
            let seq = Sequence::new("ID", "human", nucleotides, alphabet).unwrap();
            let twice = seq.complement().unwrap().complement().unwrap();
            assert_eq!(twice.nucleotides(), nucleotides);
        }
    }

    #[test]
    fn test_mutate() {
        assert_eq!(actgg().mutate(1, 2, "AT").unwrap(), "AATGG");
        assert_eq!(actgg().mutate(0, 5, "N").unwrap(), "N");
        assert_eq!(actgg().mutate(4, 0, "CC").unwrap(), "ACTGCCG");
    }

    #[test]
    fn test_mutate_bad_ranges() {
        let seq = actgg();
        for (start, length) in [(5, 0), (9, 1), (1, 8), (3, 3), (4, 2)] {
            assert!(
                matches!(
                    seq.mutate(start, length, "AT"),
                    Err(SequenceError::InvalidRange(_))
                ),
                "start={start} length={length} should be rejected"
            );
        }
    }

    #[test]
    fn test_mutate_range_checked_before_replacement() {
        let err = actgg().mutate(1, 8, "HS").unwrap_err();
        assert!(err.to_string().contains("bad length"));
    }

    #[test]
    fn test_mutate_invalid_replacement() {
        let result = actgg().mutate(1, 1, "HS");
        assert!(matches!(
            result,
            Err(SequenceError::InvalidSequence { .. })
        ));
    }

    #[test]
    fn test_apply_mutation() {
        let mut seq = actgg();
        seq.apply_mutation(1, 2, "AT").unwrap();
        assert_eq!(seq.nucleotides(), "AATGG");

        assert!(seq.apply_mutation(1, 1, "U").is_err());
        assert_eq!(seq.nucleotides(), "AATGG");
    }

    #[test]
    fn test_checksum() {
        // "ACGT" uppercase -> MD5 = f1f8f4bf413b16ad135722aa4591043e
        let upper = Sequence::new("M", "human", "ACGT", &DNA).unwrap();
        let lower = Sequence::new("M", "human", "acgt", &DNA).unwrap();
        assert_eq!(upper.checksum(), "f1f8f4bf413b16ad135722aa4591043e");
        assert_eq!(lower.checksum(), upper.checksum());
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_value(actgg()).unwrap();
        assert_eq!(json["id"], "EPO");
        assert_eq!(json["alphabet"], "DNA");
        assert_eq!(json["nucleotides"], "ACTGG");
    }
}
