//! Per-line decoding under a [`DecodeErrors`] mode.

use encoding_rs::{DecoderResult, Encoding};
use log::warn;

use super::ansel;
use crate::gedcom::types::error::{DecodeError, Result};
use crate::gedcom::types::models::{Codec, DecodeErrors};

/// Decodes one raw line (terminator already stripped) with `codec`.
///
/// `line_number` is only used to annotate errors and log output.
pub fn decode_line(raw: &[u8], codec: Codec, mode: DecodeErrors, line_number: u64) -> Result<String> {
    let on_malformed = |out: &mut String, offset: usize, bytes: &[u8]| -> Result<()> {
        match mode {
            DecodeErrors::Strict => Err(DecodeError {
                codec,
                line_number,
                offset,
                bytes: bytes.to_vec(),
            }
            .into()),
            DecodeErrors::Ignore => {
                warn!("Dropping undecodable bytes {:02x?} ({}) on line {}", bytes, codec, line_number);
                Ok(())
            }
            DecodeErrors::Replace => {
                warn!("Replacing undecodable bytes {:02x?} ({}) on line {}", bytes, codec, line_number);
                out.push(char::REPLACEMENT_CHARACTER);
                Ok(())
            }
        }
    };

    let mut out = String::with_capacity(raw.len());
    match codec.encoding() {
        Some(encoding) => decode_with_encoding(raw, encoding, &mut out, on_malformed)?,
        None if codec == Codec::Ansel => ansel::decode_into(raw, &mut out, on_malformed)?,
        None => {
            for (offset, &byte) in raw.iter().enumerate() {
                if byte.is_ascii() {
                    out.push(byte as char);
                } else {
                    on_malformed(&mut out, offset, &raw[offset..=offset])?;
                }
            }
        }
    }
    Ok(out)
}

/// Drives an `encoding_rs` decoder, surfacing each malformed sequence.
fn decode_with_encoding<F>(
    raw: &[u8],
    encoding: &'static Encoding,
    out: &mut String,
    mut on_malformed: F,
) -> Result<()>
where
    F: FnMut(&mut String, usize, &[u8]) -> Result<()>,
{
    let mut decoder = encoding.new_decoder_without_bom_handling();
    let mut pos = 0;

    loop {
        let needed = decoder
            .max_utf8_buffer_length_without_replacement(raw.len() - pos)
            .unwrap_or(raw.len() - pos);
        out.reserve(needed);

        let (result, read) = decoder.decode_to_string_without_replacement(&raw[pos..], out, true);
        pos += read;

        match result {
            DecoderResult::InputEmpty => return Ok(()),
            DecoderResult::OutputFull => continue,
            DecoderResult::Malformed(bad, consumed_after) => {
                let end = pos.saturating_sub(consumed_after as usize);
                let start = end.saturating_sub(bad as usize);
                on_malformed(out, start, &raw[start..end])?;
            }
        }
    }
}
