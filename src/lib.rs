//! # gedcom-reader
//!
//! A streaming, line-level reader for GEDCOM genealogy files.
//!
//! The character encoding of a GEDCOM file is found out while reading it: a
//! byte-order mark gives the first guess, ANSEL is assumed otherwise, and a
//! `1 CHAR` line in the header may switch to another codec for the rest of
//! the file. Each decoded line is parsed into a [`GedcomLine`].
//!
//! ```
//! use gedcom_reader::{gedcom_lines, GedcomLine};
//!
//! let data: &[u8] = b"0 HEAD\n1 CHAR UTF-8\n0 @I1@ INDI\n1 NAME \xc2\xb5 /Doe/\n0 TRLR";
//! let lines: Vec<GedcomLine> = gedcom_lines(data).collect::<Result<_, _>>().unwrap();
//! assert_eq!(lines[2].xref_id.as_deref(), Some("@I1@"));
//! assert_eq!(lines[3].value.as_deref(), Some("\u{b5} /Doe/"));
//! ```
pub mod gedcom;

// Re-export the main types for convenience
pub use gedcom::{
    detect_bom, gedcom_lines, gedcom_lines_with_mode, open, parse_lines, read_bom, read_lines, Codec, CodecError,
    CodecFamily, DecodeError, DecodeErrors, GedcomError, GedcomLine, GedcomLines, LineReader, ParserError,
    ParserErrorKind, Result,
};
