use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{BTreeSet, HashSet};

use crate::core::error::{Result, SequenceError};

/// A nucleotide in single-letter code together with its complement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    pub actual: char,
    pub complementary: char,
}

impl Symbol {
    pub const fn new(actual: char, complementary: char) -> Self {
        Self {
            actual,
            complementary,
        }
    }
}

/// Variant tag of an alphabet, used to filter repository queries
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphabetKind {
    Dna,
    Rna,
    Custom(String),
}

impl std::fmt::Display for AlphabetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dna => write!(f, "DNA"),
            Self::Rna => write!(f, "RNA"),
            Self::Custom(name) => write!(f, "{name}"),
        }
    }
}

const DNA_SYMBOLS: &[Symbol] = &[
    Symbol::new('A', 'T'),
    Symbol::new('C', 'G'),
    Symbol::new('G', 'C'),
    Symbol::new('T', 'A'),
    Symbol::new('N', 'N'),
];

const RNA_SYMBOLS: &[Symbol] = &[
    Symbol::new('A', 'U'),
    Symbol::new('C', 'G'),
    Symbol::new('G', 'C'),
    Symbol::new('U', 'A'),
    Symbol::new('N', 'N'),
];

/// The built-in DNA alphabet: A, C, G, T and N
pub static DNA: Alphabet = Alphabet {
    kind: AlphabetKind::Dna,
    name: Cow::Borrowed("DNA"),
    symbols: Cow::Borrowed(DNA_SYMBOLS),
};

/// The built-in RNA alphabet: A, C, G, U and N
pub static RNA: Alphabet = Alphabet {
    kind: AlphabetKind::Rna,
    name: Cow::Borrowed("RNA"),
    symbols: Cow::Borrowed(RNA_SYMBOLS),
};

/// A named set of symbols that defines which nucleotide strings are legal.
///
/// Validation is case-insensitive: a lowercase `a` is accepted wherever the
/// alphabet holds an `A` symbol.
///
/// Two alphabets are equal when every symbol of each one has an identical
/// (actual and complementary) symbol in the other. The order of the symbols,
/// the kind and the name play no part in equality.
#[derive(Debug, Clone, Serialize)]
pub struct Alphabet {
    kind: AlphabetKind,
    name: Cow<'static, str>,
    symbols: Cow<'static, [Symbol]>,
}

impl Alphabet {
    /// Create a user-defined alphabet.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::InvalidAlphabet` if `symbols` is empty or if two
    /// symbols share the same actual character (ignoring case).
    pub fn new(
        kind: AlphabetKind,
        name: impl Into<String>,
        symbols: Vec<Symbol>,
    ) -> Result<Self> {
        let name = name.into();
        if symbols.is_empty() {
            return Err(SequenceError::InvalidAlphabet(format!(
                "the {name} alphabet has no symbols"
            )));
        }

        let mut seen = HashSet::new();
        for symbol in &symbols {
            if !seen.insert(symbol.actual.to_ascii_uppercase()) {
                return Err(SequenceError::InvalidAlphabet(format!(
                    "symbol '{}' appears more than once in the {name} alphabet",
                    symbol.actual
                )));
            }
        }

        Ok(Self {
            kind,
            name: Cow::Owned(name),
            symbols: Cow::Owned(symbols),
        })
    }

    /// Return the built-in alphabet for a kind, if there is one
    pub fn for_kind(kind: &AlphabetKind) -> Option<&'static Alphabet> {
        match kind {
            AlphabetKind::Dna => Some(&DNA),
            AlphabetKind::Rna => Some(&RNA),
            AlphabetKind::Custom(_) => None,
        }
    }

    pub fn kind(&self) -> &AlphabetKind {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// The set of characters accepted by this alphabet, in uppercase
    pub fn valid_symbols(&self) -> BTreeSet<char> {
        self.symbols
            .iter()
            .map(|s| s.actual.to_ascii_uppercase())
            .collect()
    }

    fn find(&self, c: char) -> Option<&Symbol> {
        self.symbols
            .iter()
            .find(|s| s.actual.eq_ignore_ascii_case(&c))
    }

    /// Check that every character of `text` is a symbol of this alphabet.
    ///
    /// An empty string does not form a nucleotide sequence and is rejected.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::InvalidSequence` naming the text and this alphabet.
    pub fn check_sequence(&self, text: &str) -> Result<()> {
        if !text.is_empty() && text.chars().all(|c| self.find(c).is_some()) {
            Ok(())
        } else {
            Err(SequenceError::InvalidSequence {
                sequence: text.to_string(),
                alphabet: self.name.to_string(),
            })
        }
    }

    /// Check that `symbol` belongs to this alphabet.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::InvalidSequence`, the same kind as `check_sequence`.
    pub fn check_symbol(&self, symbol: char) -> Result<()> {
        match self.find(symbol) {
            Some(_) => Ok(()),
            None => Err(SequenceError::InvalidSequence {
                sequence: symbol.to_string(),
                alphabet: self.name.to_string(),
            }),
        }
    }

    /// Return the complementary character of `symbol`, if it belongs to this alphabet
    pub fn complement_of_symbol(&self, symbol: char) -> Option<char> {
        self.find(symbol).map(|s| s.complementary)
    }

    fn covers(&self, other: &Alphabet) -> bool {
        self.symbols.iter().all(|s| other.symbols.contains(s))
    }
}

impl PartialEq for Alphabet {
    fn eq(&self, other: &Self) -> bool {
        self.covers(other) && other.covers(self)
    }
}

impl Eq for Alphabet {}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
