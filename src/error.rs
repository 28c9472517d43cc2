//! The [`MotifProfileError`] `enum` definition and error messages.
//!
use crate::Position;
use genomap::GenomeMapError;
use std::num::ParseIntError;
use std::string::FromUtf8Error;
use thiserror::Error;

/// The [`MotifProfileError`] defines the standard set of errors that should
/// be passed to the user.
#[derive(Debug, Error)]
pub enum MotifProfileError {
    // IO related errors
    #[error("File reading error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("TSV reading/writing error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Invalid UTF8 in input: {0}")]
    Utf8Error(#[from] FromUtf8Error),

    // File parsing related errors
    #[error("Integer parsing error: {0}")]
    ParseIntError(#[from] ParseIntError),
    #[error("Genome file is invalid: {0}")]
    InvalidGenomeFile(String),
    #[error("Invalid coordinate entry on line {0}: {1}")]
    InvalidCoordinateLine(u64, String),
    #[error("Invalid strand '{0}': must be either '+' or '-'")]
    InvalidStrand(String),

    // Configuration errors
    #[error("Invalid pattern: the pattern must be a non-empty string")]
    InvalidPattern,
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    // Invalid genomic range errors
    #[error("Range invalid: start ({0}) must be greater than end ({1})")]
    InvalidGenomicRange(Position, Position),
    #[error("Range [{0}, {1}] is invalid for sequence of length {2}")]
    InvalidGenomicRangeForSequence(Position, Position, Position),
    #[error("Sequence name '{0}' is not in the sequence container")]
    MissingSequence(String),
    #[error("Retrieved {2} bases for {0}:{1}, expected {3}")]
    TruncatedSequence(String, Position, usize, usize),
    #[error("Error encountered in genomap::GenomeMap")]
    GenomeMapError(#[from] GenomeMapError),
}
