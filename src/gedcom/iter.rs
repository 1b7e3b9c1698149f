//! Iterator adapting a decoded line stream into parsed [`GedcomLine`]s.
//!
//! # Example
//! ```no_run
//! # use std::fs::File;
//! # use std::io::BufReader;
//! use gedcom_reader::gedcom_lines;
//!
//! let file = BufReader::new(File::open("family.ged").unwrap());
//! for result in gedcom_lines(file) {
//!     let line = result.unwrap();
//!     println!("{} {}", line.level, line.tag);
//! }
//! ```

use std::io::BufRead;
use std::iter::FusedIterator;

use super::format::lines::LineReader;
use super::types::error::{ParserError, Result};
use super::types::models::{Codec, DecodeErrors, GedcomLine};

/// Iterator over parsed GEDCOM lines.
///
/// Wraps any iterator of decoded lines; errors from the inner iterator are
/// passed through unchanged, grammar violations become
/// [`GedcomError::Parser`](crate::GedcomError::Parser), an empty line
/// included. The first error ends the iteration.
#[derive(Debug)]
pub struct GedcomLines<I> {
    lines: I,
    line_number: u64,
    finished: bool,
}

impl<I> GedcomLines<I>
where
    I: Iterator<Item = Result<String>>,
{
    /// Parses lines that have already been decoded.
    pub fn from_lines(lines: I) -> Self {
        Self {
            lines,
            line_number: 0,
            finished: false,
        }
    }

    /// 1-based number of the last line consumed.
    pub fn line_number(&self) -> u64 {
        self.line_number
    }

    fn parse_next(&mut self) -> Option<Result<GedcomLine>> {
        let line = match self.lines.next()? {
            Ok(line) => line,
            Err(e) => return Some(Err(e)),
        };
        self.line_number += 1;

        Some(GedcomLine::parse(&line).map_err(|kind| {
            ParserError {
                kind,
                line_number: self.line_number,
                line,
            }
            .into()
        }))
    }
}

impl<R: BufRead> GedcomLines<LineReader<R>> {
    /// Parses a raw byte stream, failing on undecodable bytes.
    pub fn new(reader: R) -> Self {
        Self::from_lines(LineReader::new(reader))
    }

    /// Parses a raw byte stream with an explicit treatment of undecodable bytes.
    pub fn with_mode(reader: R, mode: DecodeErrors) -> Self {
        Self::from_lines(LineReader::with_mode(reader, mode))
    }

    /// The codec currently in effect for the underlying stream.
    pub fn codec(&self) -> Codec {
        self.lines.codec()
    }
}

impl<I> Iterator for GedcomLines<I>
where
    I: Iterator<Item = Result<String>>,
{
    type Item = Result<GedcomLine>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let item = self.parse_next();
        if !matches!(item, Some(Ok(_))) {
            self.finished = true;
        }
        item
    }
}

impl<I> FusedIterator for GedcomLines<I> where I: Iterator<Item = Result<String>> {}
