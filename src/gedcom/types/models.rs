//! Core data structures shared by the codec and format layers.
//!
//! - [`GedcomLine`]: one parsed line of a GEDCOM document
//! - [`Codec`]: the closed set of character decoders
//! - [`DecodeErrors`]: how malformed bytes are treated

use std::fmt;
use std::str::FromStr;

use encoding_rs::Encoding;

use super::error::ParserErrorKind;
use crate::gedcom::format::record;

/// A single parsed GEDCOM line.
///
/// ```text
/// 0 @I1@ INDI          level=0, xref_id=Some("@I1@"), tag="INDI", value=None
/// 1 NAME John /Smith/  level=1, xref_id=None, tag="NAME", value=Some("John /Smith/")
/// ```
///
/// A value of `Some("")` means the tag was followed by a single space and
/// nothing else; `None` means nothing followed the tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GedcomLine {
    pub level: u32,
    pub xref_id: Option<String>,
    pub tag: String,
    pub value: Option<String>,
}

impl GedcomLine {
    /// Builds a line from its parts, enforcing the same rules as the grammar.
    pub fn new(
        level: u32,
        xref_id: Option<&str>,
        tag: &str,
        value: Option<&str>,
    ) -> std::result::Result<Self, ParserErrorKind> {
        if let Some(xref) = xref_id {
            if !record::is_valid_xref(xref) {
                return Err(ParserErrorKind::MalformedXref);
            }
        }
        if tag.is_empty() {
            return Err(ParserErrorKind::MissingTag);
        }
        if !record::is_valid_tag(tag) {
            return Err(ParserErrorKind::NonAlphanumericTag);
        }
        Ok(Self {
            level,
            xref_id: xref_id.map(str::to_owned),
            tag: tag.to_owned(),
            value: value.map(str::to_owned),
        })
    }
}

impl fmt::Display for GedcomLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.level)?;
        if let Some(xref) = &self.xref_id {
            write!(f, " {}", xref)?;
        }
        write!(f, " {}", self.tag)?;
        if let Some(value) = &self.value {
            write!(f, " {}", value)?;
        }
        Ok(())
    }
}

/// A character decoder the reader can switch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    /// ANSI Z39.47 with the GEDCOM additions; the default without a BOM.
    Ansel,
    Ascii,
    Utf8,
    Utf16Le,
    Utf16Be,
    Windows1252,
    MacRoman,
}

/// Groups codecs that may legitimately describe the same byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecFamily {
    Unicode8,
    Unicode16,
    Legacy,
}

impl Codec {
    /// Canonical lowercase name, as used in log output and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Codec::Ansel => "ansel",
            Codec::Ascii => "ascii",
            Codec::Utf8 => "utf-8",
            Codec::Utf16Le => "utf-16le",
            Codec::Utf16Be => "utf-16be",
            Codec::Windows1252 => "windows-1252",
            Codec::MacRoman => "macintosh",
        }
    }

    /// Backing `encoding_rs` decoder, if the codec is not implemented locally.
    pub fn encoding(&self) -> Option<&'static Encoding> {
        match self {
            Codec::Ansel | Codec::Ascii => None,
            Codec::Utf8 => Some(encoding_rs::UTF_8),
            Codec::Utf16Le => Some(encoding_rs::UTF_16LE),
            Codec::Utf16Be => Some(encoding_rs::UTF_16BE),
            Codec::Windows1252 => Some(encoding_rs::WINDOWS_1252),
            Codec::MacRoman => Some(encoding_rs::MACINTOSH),
        }
    }

    /// Size in bytes of one code unit; line terminators are scanned per unit.
    pub fn unit_width(&self) -> usize {
        match self {
            Codec::Utf16Le | Codec::Utf16Be => 2,
            _ => 1,
        }
    }

    pub fn family(&self) -> CodecFamily {
        match self {
            Codec::Utf8 => CodecFamily::Unicode8,
            Codec::Utf16Le | Codec::Utf16Be => CodecFamily::Unicode16,
            Codec::Ansel | Codec::Ascii | Codec::Windows1252 | Codec::MacRoman => CodecFamily::Legacy,
        }
    }

    /// Whether a `CHAR` declaration of `declared` may follow this byte-order mark.
    ///
    /// ASCII is a strict subset of UTF-8 and is accepted under a UTF-8 mark.
    pub fn accepts_declaration(&self, declared: Codec) -> bool {
        self.family() == declared.family() || (*self == Codec::Utf8 && declared == Codec::Ascii)
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Treatment of bytes that are malformed under the active codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeErrors {
    /// Stop with [`GedcomError::Decode`](crate::GedcomError::Decode).
    #[default]
    Strict,
    /// Drop the malformed bytes.
    Ignore,
    /// Substitute one U+FFFD per malformed sequence.
    Replace,
}

impl FromStr for DecodeErrors {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(DecodeErrors::Strict),
            "ignore" => Ok(DecodeErrors::Ignore),
            "replace" => Ok(DecodeErrors::Replace),
            _ => Err(format!("Unknown decode error mode: {} (expected strict, ignore or replace)", s)),
        }
    }
}

impl fmt::Display for DecodeErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DecodeErrors::Strict => write!(f, "strict"),
            DecodeErrors::Ignore => write!(f, "ignore"),
            DecodeErrors::Replace => write!(f, "replace"),
        }
    }
}
