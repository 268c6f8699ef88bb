use thiserror::Error;

/// Errors raised by alphabets, sequences, repositories and query results.
///
/// Every variant is raised at the point of detection, before any state is
/// changed. None of them are transient.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Invalid sequence id: {0}")]
    InvalidId(String),

    #[error("'{sequence}' has one or more symbols not valid for the {alphabet} alphabet")]
    InvalidSequence { sequence: String, alphabet: String },

    #[error("'{symbol}' is not a valid symbol of the {alphabet} alphabet")]
    InvalidSymbol { symbol: char, alphabet: String },

    #[error("Invalid alphabet: {0}")]
    InvalidAlphabet(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Sequence id '{0}' is already stored in this repository")]
    DuplicateId(String),

    #[error("Sequence '{0}' is not stored in this repository")]
    NotFound(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("The {0} has already been terminated")]
    AlreadyTerminated(&'static str),
}

pub type Result<T> = std::result::Result<T, SequenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SequenceError::InvalidSequence {
            sequence: "GMUBAA".to_string(),
            alphabet: "DNA".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "'GMUBAA' has one or more symbols not valid for the DNA alphabet"
        );

        let err = SequenceError::AlreadyTerminated("repository");
        assert_eq!(err.to_string(), "The repository has already been terminated");
    }
}
