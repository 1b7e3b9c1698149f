//! Low-level byte reading utilities

use std::io::{self, BufRead};

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use super::types::models::Codec;

const LF: u16 = 0x0A;
const CR: u16 = 0x0D;

/// Reads one code unit of `codec` from the start of `bytes`.
fn code_unit(codec: Codec, bytes: &[u8]) -> u16 {
    match codec {
        Codec::Utf16Le => LittleEndian::read_u16(bytes),
        Codec::Utf16Be => BigEndian::read_u16(bytes),
        _ => bytes[0] as u16,
    }
}

/// Bytes of the LF unit in `codec`.
fn lf_bytes(codec: Codec) -> &'static [u8] {
    match codec {
        Codec::Utf16Le => &[0x0A, 0x00],
        Codec::Utf16Be => &[0x00, 0x0A],
        _ => &[0x0A],
    }
}

/// Splits a byte stream into raw lines on LF, CR or CR LF.
///
/// Terminators are recognised per code unit, so a UTF-16 line break is the
/// unit `0x000A`/`0x000D` rather than a lone byte. After a CR the splitter
/// remembers to drop an LF that starts the next line; this keeps CR LF a
/// single terminator even when the pair straddles two buffer fills.
#[derive(Debug, Default)]
pub struct LineSplitter {
    pending_lf: bool,
}

impl LineSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the next raw line into `buf`, terminator stripped.
    ///
    /// Returns `false` once the stream is exhausted and no line was read.
    /// A trailing byte that does not complete a code unit stays in `buf`
    /// for the decoder to reject.
    pub fn read_line<R: BufRead>(&mut self, reader: &mut R, codec: Codec, buf: &mut Vec<u8>) -> io::Result<bool> {
        buf.clear();
        let width = codec.unit_width();

        loop {
            let available = match reader.fill_buf() {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                self.pending_lf = false;
                return Ok(!buf.is_empty());
            }

            let mut used = 0;
            let mut terminator = None;
            for &byte in available {
                used += 1;
                buf.push(byte);
                if buf.len() % width != 0 {
                    continue;
                }

                let unit = code_unit(codec, &buf[buf.len() - width..]);
                if self.pending_lf {
                    self.pending_lf = false;
                    if unit == LF {
                        buf.clear();
                        continue;
                    }
                }
                if unit == LF || unit == CR {
                    buf.truncate(buf.len() - width);
                    terminator = Some(unit);
                    break;
                }
            }
            reader.consume(used);

            if let Some(unit) = terminator {
                self.pending_lf = unit == CR;
                return Ok(true);
            }
        }
    }

    /// Drops the LF of a CR LF pair still pending under `codec`.
    ///
    /// Must run before the reader switches codec: the LF is encoded in the
    /// old codec's unit width and byte order and would otherwise misalign
    /// the first unit read under the new one.
    pub fn settle<R: BufRead>(&mut self, reader: &mut R, codec: Codec) -> io::Result<()> {
        if !std::mem::take(&mut self.pending_lf) {
            return Ok(());
        }
        let lf = lf_bytes(codec);
        let is_lf = loop {
            match reader.fill_buf() {
                Ok(available) => break available.starts_with(lf),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };
        if is_lf {
            reader.consume(lf.len());
        }
        Ok(())
    }
}
