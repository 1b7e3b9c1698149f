//! Custom error types for the gedcom-reader crate.

use std::fmt;

use thiserror::Error;

use super::models::Codec;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum GedcomError {
    /// An error originating from the underlying byte source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding negotiation failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A decoded line does not follow the GEDCOM line grammar.
    #[error(transparent)]
    Parser(#[from] ParserError),

    /// Raw bytes could not be decoded under the active codec in strict mode.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Failure to agree on a codec for the stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The `CHAR` declaration names an encoding the reader does not know.
    #[error("unknown codec name {name:?} declared on line {line_number}")]
    UnknownCodec { name: String, line_number: u64 },

    /// The `CHAR` declaration disagrees with the byte-order mark.
    #[error("declared codec {declared} disagrees with byte-order mark {bom} on line {line_number}")]
    BomMismatch {
        bom: Codec,
        declared: Codec,
        line_number: u64,
    },
}

/// The specific grammar rule a line violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserErrorKind {
    NonNumericLevel,
    LevelOutOfRange,
    MalformedXref,
    MissingTag,
    NonAlphanumericTag,
}

impl fmt::Display for ParserErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            ParserErrorKind::NonNumericLevel => "level must be numeric",
            ParserErrorKind::LevelOutOfRange => "level is out of range",
            ParserErrorKind::MalformedXref => "cross-reference must be @ID@ starting with a letter or digit",
            ParserErrorKind::MissingTag => "tag is missing",
            ParserErrorKind::NonAlphanumericTag => "tag must be alphanumeric",
        };
        f.write_str(msg)
    }
}

/// A grammar violation, carrying the offending raw line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} (line {line_number}: {line:?})")]
pub struct ParserError {
    pub kind: ParserErrorKind,
    pub line_number: u64,
    pub line: String,
}

/// Bytes that are malformed under the active codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot decode bytes {bytes:02x?} as {codec} at offset {offset} of line {line_number}")]
pub struct DecodeError {
    pub codec: Codec,
    pub line_number: u64,
    /// Byte offset of the malformed sequence within the raw line.
    pub offset: usize,
    pub bytes: Vec<u8>,
}

/// A convenience `Result` type alias using the crate's `GedcomError` type.
pub type Result<T> = std::result::Result<T, GedcomError>;
