//! Mapping from `CHAR` declaration values to codecs.

use crate::gedcom::types::models::Codec;

/// Encoding names GEDCOM producers write after `1 CHAR`.
///
/// `UNICODE` carries no byte order of its own. Without a byte-order mark it
/// resolves to little-endian, which is what the producers that emit it write.
static CODEC_NAMES: &[(&str, Codec)] = &[
    ("ANSEL", Codec::Ansel),
    ("ASCII", Codec::Ascii),
    ("ANSI", Codec::Windows1252),
    ("MACINTOSH", Codec::MacRoman),
    ("UTF-8", Codec::Utf8),
    ("UTF8", Codec::Utf8),
    ("UNICODE", Codec::Utf16Le),
    ("UTF-16", Codec::Utf16Le),
    ("UTF-16LE", Codec::Utf16Le),
    ("UTF-16BE", Codec::Utf16Be),
];

/// Resolves a declared encoding name, ignoring case and surrounding whitespace.
pub fn lookup(name: &str) -> Option<Codec> {
    let name = name.trim();
    CODEC_NAMES
        .iter()
        .find(|(declared, _)| declared.eq_ignore_ascii_case(name))
        .map(|&(_, codec)| codec)
}
