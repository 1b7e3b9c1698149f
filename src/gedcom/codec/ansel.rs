//! ANSEL (ANSI Z39.47) decoding with the GEDCOM 5.5 additions.
//!
//! Byte ranges:
//! - `0x00..=0x7F`: ASCII
//! - `0xA1..=0xCF`: spacing graphic characters (sparse)
//! - `0xE0..=0xFE`: combining diacritics (sparse)
//!
//! ANSEL writes a diacritic *before* the letter it modifies while Unicode
//! expects combining marks *after* it, so pending marks are held back and
//! emitted right after the next base character.

use crate::gedcom::types::error::Result;

/// Spacing characters in the upper half.
fn graphic(byte: u8) -> Option<char> {
    let c = match byte {
        0xA1 => '\u{0141}', // Ł
        0xA2 => '\u{00D8}', // Ø
        0xA3 => '\u{0110}', // Đ
        0xA4 => '\u{00DE}', // Þ
        0xA5 => '\u{00C6}', // Æ
        0xA6 => '\u{0152}', // Œ
        0xA7 => '\u{02B9}', // soft sign
        0xA8 => '\u{00B7}', // middle dot
        0xA9 => '\u{266D}', // music flat
        0xAA => '\u{00AE}', // ®
        0xAB => '\u{00B1}', // ±
        0xAC => '\u{01A0}', // Ơ
        0xAD => '\u{01AF}', // Ư
        0xAE => '\u{02BC}', // alif
        0xB0 => '\u{02BB}', // ayn
        0xB1 => '\u{0142}', // ł
        0xB2 => '\u{00F8}', // ø
        0xB3 => '\u{0111}', // đ
        0xB4 => '\u{00FE}', // þ
        0xB5 => '\u{00E6}', // æ
        0xB6 => '\u{0153}', // œ
        0xB7 => '\u{02BA}', // hard sign
        0xB8 => '\u{0131}', // ı
        0xB9 => '\u{00A3}', // £
        0xBA => '\u{00F0}', // ð
        0xBC => '\u{01A1}', // ơ
        0xBD => '\u{01B0}', // ư
        0xBE => '\u{25A1}', // empty box (GEDCOM)
        0xBF => '\u{25A0}', // black box (GEDCOM)
        0xC0 => '\u{00B0}', // °
        0xC1 => '\u{2113}', // ℓ
        0xC2 => '\u{2117}', // ℗
        0xC3 => '\u{00A9}', // ©
        0xC4 => '\u{266F}', // music sharp
        0xC5 => '\u{00BF}', // ¿
        0xC6 => '\u{00A1}', // ¡
        0xCD => '\u{0065}', // midline e (GEDCOM)
        0xCE => '\u{006F}', // midline o (GEDCOM)
        0xCF => '\u{00DF}', // ß (GEDCOM)
        _ => return None,
    };
    Some(c)
}

/// Non-spacing marks that precede their base character.
fn combining(byte: u8) -> Option<char> {
    let c = match byte {
        0xE0 => '\u{0309}', // hook above
        0xE1 => '\u{0300}', // grave
        0xE2 => '\u{0301}', // acute
        0xE3 => '\u{0302}', // circumflex
        0xE4 => '\u{0303}', // tilde
        0xE5 => '\u{0304}', // macron
        0xE6 => '\u{0306}', // breve
        0xE7 => '\u{0307}', // dot above
        0xE8 => '\u{0308}', // diaeresis
        0xE9 => '\u{030C}', // caron
        0xEA => '\u{030A}', // ring above
        0xEB => '\u{FE20}', // ligature, left half
        0xEC => '\u{FE21}', // ligature, right half
        0xED => '\u{0315}', // comma above right
        0xEE => '\u{030B}', // double acute
        0xEF => '\u{0310}', // candrabindu
        0xF0 => '\u{0327}', // cedilla
        0xF1 => '\u{0328}', // ogonek
        0xF2 => '\u{0323}', // dot below
        0xF3 => '\u{0324}', // diaeresis below
        0xF4 => '\u{0325}', // ring below
        0xF5 => '\u{0333}', // double low line
        0xF6 => '\u{0332}', // low line
        0xF7 => '\u{0326}', // comma below
        0xF8 => '\u{031C}', // left half ring below
        0xF9 => '\u{032E}', // breve below
        0xFA => '\u{FE22}', // double tilde, left half
        0xFB => '\u{FE23}', // double tilde, right half
        0xFE => '\u{0313}', // comma above
        _ => return None,
    };
    Some(c)
}

/// Decodes `raw` into `out`.
///
/// Every undefined byte is reported to `on_malformed` together with its
/// offset; the callback decides whether to substitute, skip or fail.
pub fn decode_into<F>(raw: &[u8], out: &mut String, mut on_malformed: F) -> Result<()>
where
    F: FnMut(&mut String, usize, &[u8]) -> Result<()>,
{
    let mut pending: Vec<char> = Vec::new();

    for (offset, &byte) in raw.iter().enumerate() {
        let base = if byte.is_ascii() {
            Some(byte as char)
        } else if let Some(mark) = combining(byte) {
            pending.push(mark);
            continue;
        } else {
            graphic(byte)
        };

        match base {
            Some(c) => {
                out.push(c);
                out.extend(pending.drain(..));
            }
            None => {
                // Held marks go after the substitute, never onto a later base.
                on_malformed(out, offset, &raw[offset..=offset])?;
                out.extend(pending.drain(..));
            }
        }
    }

    // Marks with no base left at end of line are kept as-is.
    out.extend(pending);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_lossy(raw: &[u8]) -> String {
        let mut out = String::new();
        decode_into(raw, &mut out, |out, _, _| {
            out.push('\u{FFFD}');
            Ok(())
        })
        .unwrap();
        out
    }

    #[test]
    fn ascii_passes_through() {
        assert_eq!(decode_lossy(b"0 HEAD"), "0 HEAD");
    }

    #[test]
    fn graphic_characters() {
        assert_eq!(decode_lossy(b"\xa1odz"), "\u{0141}odz");
        assert_eq!(decode_lossy(b"\xc3 1999"), "\u{00A9} 1999");
        assert_eq!(decode_lossy(b"Stra\xcfe"), "Stra\u{00DF}e");
    }

    #[test]
    fn combining_marks_follow_their_base() {
        // "José" with acute written before the 'e'
        assert_eq!(decode_lossy(b"Jos\xe2e"), "Jose\u{0301}");
        // two marks keep their order
        assert_eq!(decode_lossy(b"\xe3\xe2a"), "a\u{0302}\u{0301}");
    }

    #[test]
    fn trailing_mark_is_kept() {
        assert_eq!(decode_lossy(b"a\xe8"), "a\u{0308}");
    }

    #[test]
    fn marks_do_not_jump_over_an_undefined_byte() {
        assert_eq!(decode_lossy(b"\xe2\xc7a"), "\u{FFFD}\u{0301}a");
        assert_eq!(decode_lossy(b"x\xe8\xc7\xe2e"), "x\u{FFFD}\u{0308}e\u{0301}");
    }

    #[test]
    fn undefined_bytes_are_reported_with_offset() {
        let mut seen = Vec::new();
        let mut out = String::new();
        decode_into(b"OK \xc7\x80", &mut out, |_, offset, bytes| {
            seen.push((offset, bytes.to_vec()));
            Ok(())
        })
        .unwrap();
        assert_eq!(out, "OK ");
        assert_eq!(seen, vec![(3, vec![0xC7]), (4, vec![0x80])]);
    }
}
