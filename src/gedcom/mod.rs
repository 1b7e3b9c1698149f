//! Core GEDCOM reader module

pub mod codec;
pub mod format;
pub mod iter;
pub mod types;
mod utils;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::info;

pub use format::bom::{detect_bom, read_bom};
pub use format::lines::LineReader;
pub use iter::GedcomLines;
pub use types::error::{CodecError, DecodeError, GedcomError, ParserError, ParserErrorKind, Result};
pub use types::models::{Codec, CodecFamily, DecodeErrors, GedcomLine};

/// Returns the decoded lines of a GEDCOM byte stream.
///
/// Equivalent to [`LineReader::with_mode`].
pub fn read_lines<R: BufRead>(reader: R, mode: DecodeErrors) -> LineReader<R> {
    LineReader::with_mode(reader, mode)
}

/// Returns the parsed lines of a GEDCOM byte stream, failing on undecodable bytes.
pub fn gedcom_lines<R: BufRead>(reader: R) -> GedcomLines<LineReader<R>> {
    GedcomLines::new(reader)
}

/// Like [`gedcom_lines`] with an explicit treatment of undecodable bytes.
pub fn gedcom_lines_with_mode<R: BufRead>(reader: R, mode: DecodeErrors) -> GedcomLines<LineReader<R>> {
    GedcomLines::with_mode(reader, mode)
}

/// Parses lines that were decoded elsewhere.
///
/// ```
/// use gedcom_reader::parse_lines;
///
/// let tags: Vec<String> = parse_lines(["0 HEAD", "0 TRLR"])
///     .map(|line| line.unwrap().tag)
///     .collect();
/// assert_eq!(tags, ["HEAD", "TRLR"]);
/// ```
pub fn parse_lines<J, S>(lines: J) -> GedcomLines<impl Iterator<Item = Result<String>>>
where
    J: IntoIterator<Item = S>,
    S: Into<String>,
{
    GedcomLines::from_lines(lines.into_iter().map(|line| Ok(line.into())))
}

/// Opens a GEDCOM file for parsing.
pub fn open(path: impl AsRef<Path>, mode: DecodeErrors) -> Result<GedcomLines<LineReader<BufReader<File>>>> {
    let path = path.as_ref();
    info!("Opening GEDCOM file: {}", path.display());
    let file = File::open(path)?;
    Ok(gedcom_lines_with_mode(BufReader::new(file), mode))
}
