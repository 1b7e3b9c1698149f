//! # Decoded line stream
//!
//! [`LineReader`] turns raw bytes into decoded text lines and negotiates the
//! codec on the way:
//!
//! 1. A byte-order mark, if present, fixes the initial codec; otherwise the
//!    stream starts as ANSEL.
//! 2. Every decoded line is checked for a `1 CHAR <name>` declaration. The
//!    declared codec applies to the lines *after* it.
//! 3. When a byte-order mark was seen, the declaration must belong to the
//!    same codec family; the mark's byte order is kept.

use std::io::{BufRead, Chain, Cursor, Read};
use std::iter::FusedIterator;

use log::{debug, info, trace};

use crate::gedcom::codec::{decode::decode_line, names};
use crate::gedcom::format::bom::read_bom;
use crate::gedcom::types::error::{CodecError, Result};
use crate::gedcom::types::models::{Codec, DecodeErrors, GedcomLine};
use crate::gedcom::utils::LineSplitter;

/// Tag of the header line that declares the character set.
const CHAR_TAG: &str = "CHAR";

/// Lazy iterator over the decoded lines of a GEDCOM byte stream.
///
/// Yields `Result<String>` with terminators stripped. The first error ends
/// the iteration; lines yielded before it remain valid.
///
/// Created by [`read_lines()`](crate::read_lines) or [`LineReader::new()`].
#[derive(Debug)]
pub struct LineReader<R> {
    /// Bytes read while looking for a byte-order mark, then the rest of the stream.
    reader: Chain<Cursor<Vec<u8>>, R>,
    mode: DecodeErrors,
    codec: Codec,
    bom_codec: Option<Codec>,
    splitter: LineSplitter,
    buf: Vec<u8>,
    line_number: u64,
    started: bool,
    finished: bool,
}

impl<R: BufRead> LineReader<R> {
    /// Creates a reader that fails on undecodable bytes.
    pub fn new(reader: R) -> Self {
        Self::with_mode(reader, DecodeErrors::default())
    }

    /// Creates a reader with an explicit treatment of undecodable bytes.
    pub fn with_mode(reader: R, mode: DecodeErrors) -> Self {
        Self {
            reader: Cursor::new(Vec::new()).chain(reader),
            mode,
            codec: Codec::Ansel,
            bom_codec: None,
            splitter: LineSplitter::new(),
            buf: Vec::new(),
            line_number: 0,
            started: false,
            finished: false,
        }
    }

    /// The codec that will decode the next line.
    ///
    /// Before the first line is pulled this is the ANSEL default, since the
    /// byte-order mark has not been inspected yet.
    pub fn codec(&self) -> Codec {
        self.codec
    }

    /// The codec announced by the byte-order mark, if any.
    pub fn bom_codec(&self) -> Option<Codec> {
        self.bom_codec
    }

    pub fn mode(&self) -> DecodeErrors {
        self.mode
    }

    /// 1-based number of the last line read; 0 before the first.
    pub fn line_number(&self) -> u64 {
        self.line_number
    }

    fn start(&mut self) -> Result<()> {
        let (head, inner) = self.reader.get_mut();
        let (bom_codec, sniffed) = read_bom(inner)?;
        *head = Cursor::new(sniffed);
        self.bom_codec = bom_codec;
        match self.bom_codec {
            Some(codec) => {
                self.codec = codec;
                info!("Reading GEDCOM stream: codec {} from byte-order mark, errors={}", codec, self.mode);
            }
            None => {
                info!("Reading GEDCOM stream: default codec {}, errors={}", self.codec, self.mode);
            }
        }
        Ok(())
    }

    fn read_next(&mut self) -> Result<Option<String>> {
        if !self.started {
            self.started = true;
            self.start()?;
        }

        if !self.splitter.read_line(&mut self.reader, self.codec, &mut self.buf)? {
            return Ok(None);
        }
        self.line_number += 1;
        trace!("Line {}: {} raw bytes as {}", self.line_number, self.buf.len(), self.codec);

        let line = decode_line(&self.buf, self.codec, self.mode, self.line_number)?;
        self.apply_declaration(&line)?;
        Ok(Some(line))
    }

    /// Switches codec if `line` is a `1 CHAR` declaration.
    fn apply_declaration(&mut self, line: &str) -> Result<()> {
        let declaration = match GedcomLine::parse(line) {
            Ok(parsed) if parsed.level == 1 && parsed.tag == CHAR_TAG => parsed,
            _ => return Ok(()),
        };
        let name = match declaration.value.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => return Ok(()),
        };

        let declared = names::lookup(name).ok_or_else(|| CodecError::UnknownCodec {
            name: name.to_string(),
            line_number: self.line_number,
        })?;
        debug!("Line {}: CHAR {} resolves to {}", self.line_number, name, declared);

        let next = match self.bom_codec {
            Some(bom) if !bom.accepts_declaration(declared) => {
                return Err(CodecError::BomMismatch {
                    bom,
                    declared,
                    line_number: self.line_number,
                }
                .into());
            }
            Some(bom) => bom,
            None => declared,
        };

        if next != self.codec {
            self.splitter.settle(&mut self.reader, self.codec)?;
            info!("Switching codec from {} to {} after line {}", self.codec, next, self.line_number);
            self.codec = next;
        }
        Ok(())
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.read_next() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: BufRead> FusedIterator for LineReader<R> {}
