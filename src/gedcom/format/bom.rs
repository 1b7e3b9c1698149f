//! Byte-order mark detection.

use std::io::{self, BufRead};

use log::debug;

use crate::gedcom::types::models::Codec;

/// Marks ordered so that no shorter mark is tried before a longer one it prefixes.
const BOMS: &[(&[u8], Codec)] = &[
    (&[0xEF, 0xBB, 0xBF], Codec::Utf8),
    (&[0xFF, 0xFE], Codec::Utf16Le),
    (&[0xFE, 0xFF], Codec::Utf16Be),
];

/// Length of the longest mark.
const MAX_MARK_LEN: usize = 3;

fn match_mark(head: &[u8]) -> Option<(usize, Codec)> {
    BOMS.iter()
        .find(|(mark, _)| head.starts_with(mark))
        .map(|&(mark, codec)| (mark.len(), codec))
}

/// Whether `head` could still grow into a mark.
fn is_partial_mark(head: &[u8]) -> bool {
    BOMS.iter()
        .any(|(mark, _)| head.len() < mark.len() && mark.starts_with(head))
}

/// Runs `inspect` on the reader's buffered bytes, retrying interrupted fills.
fn peek<R, T, F>(reader: &mut R, inspect: F) -> io::Result<T>
where
    R: BufRead + ?Sized,
    F: FnOnce(&[u8]) -> T,
{
    loop {
        match reader.fill_buf() {
            Ok(available) => return Ok(inspect(available)),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

fn log_result(found: Option<(usize, Codec)>) -> Option<Codec> {
    match found {
        Some((len, codec)) => {
            debug!("Byte-order mark found: {} ({} bytes)", codec, len);
            Some(codec)
        }
        None => {
            debug!("No byte-order mark found");
            None
        }
    }
}

/// Guesses the initial codec from a byte-order mark.
///
/// Only the mark itself is consumed. Without a mark the reader is left
/// exactly where it was and `None` is returned. Only the bytes of a single
/// `fill_buf` are inspected; for readers that may hand out fewer than three
/// bytes at a time use [`read_bom`].
pub fn detect_bom<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<Option<Codec>> {
    let found = peek(reader, match_mark)?;
    if let Some((len, _)) = found {
        reader.consume(len);
    }
    Ok(log_result(found))
}

/// Like [`detect_bom`], but keeps reading while the bytes seen so far could
/// still be the start of a mark.
///
/// Returns the codec together with the bytes that had to be consumed to rule
/// a mark out. They belong to the stream and come before whatever is left in
/// `reader`. When the first fill already decides, nothing but the mark is
/// consumed and the returned bytes are empty.
pub fn read_bom<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<(Option<Codec>, Vec<u8>)> {
    let decided = peek(reader, |available| (!is_partial_mark(available)).then(|| match_mark(available)))?;
    if let Some(found) = decided {
        if let Some((len, _)) = found {
            reader.consume(len);
        }
        return Ok((log_result(found), Vec::new()));
    }

    let mut head = Vec::with_capacity(MAX_MARK_LEN);
    while is_partial_mark(&head) {
        let byte = match peek(reader, |available| available.first().copied())? {
            Some(byte) => byte,
            None => break,
        };
        reader.consume(1);
        head.push(byte);
    }

    let found = match_mark(&head);
    if let Some((len, _)) = found {
        head.drain(..len);
    }
    Ok((log_result(found), head))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor, Read};

    fn detect(bytes: &[u8]) -> (Option<Codec>, u64) {
        let mut cursor = Cursor::new(bytes);
        let codec = detect_bom(&mut cursor).unwrap();
        (codec, cursor.position())
    }

    #[test]
    fn no_mark_leaves_cursor_untouched() {
        assert_eq!(detect(b"0 HEAD"), (None, 0));
        assert_eq!(detect(b"0"), (None, 0));
        assert_eq!(detect(b""), (None, 0));
        // UTF-8 mark prefix that is not a full mark
        assert_eq!(detect(b"\xef\xbb0 HEAD"), (None, 0));
    }

    #[test]
    fn marks_are_consumed() {
        assert_eq!(detect(b"\xef\xbb\xbf0 HEAD"), (Some(Codec::Utf8), 3));
        assert_eq!(detect(b"\xff\xfe0\x00"), (Some(Codec::Utf16Le), 2));
        assert_eq!(detect(b"\xfe\xff\x000"), (Some(Codec::Utf16Be), 2));
    }

    #[test]
    fn bare_mark_at_end_of_stream() {
        assert_eq!(detect(b"\xfe\xff"), (Some(Codec::Utf16Be), 2));
        assert_eq!(detect(b"\xff\xfe"), (Some(Codec::Utf16Le), 2));
        assert_eq!(detect(b"\xef\xbb\xbf"), (Some(Codec::Utf8), 3));
    }

    /// Runs `read_bom` over a reader that hands out one byte per fill and
    /// returns the codec with every byte the stream still yields.
    fn read_split(bytes: &[u8]) -> (Option<Codec>, Vec<u8>) {
        let mut reader = BufReader::with_capacity(1, Cursor::new(bytes.to_vec()));
        let (codec, head) = read_bom(&mut reader).unwrap();
        let mut rest = head;
        reader.read_to_end(&mut rest).unwrap();
        (codec, rest)
    }

    #[test]
    fn marks_split_across_fills() {
        assert_eq!(read_split(b"\xef\xbb\xbf0 HEAD"), (Some(Codec::Utf8), b"0 HEAD".to_vec()));
        assert_eq!(read_split(b"\xff\xfe0\x00"), (Some(Codec::Utf16Le), b"0\x00".to_vec()));
        assert_eq!(read_split(b"\xfe\xff"), (Some(Codec::Utf16Be), Vec::new()));
    }

    #[test]
    fn bytes_read_past_a_partial_mark_are_returned() {
        assert_eq!(read_split(b"\xef\xbb0 HEAD"), (None, b"\xef\xbb0 HEAD".to_vec()));
        assert_eq!(read_split(b"\xff0"), (None, b"\xff0".to_vec()));
        assert_eq!(read_split(b"0 HEAD"), (None, b"0 HEAD".to_vec()));
        assert_eq!(read_split(b""), (None, Vec::new()));
    }

    #[test]
    fn read_bom_consumes_only_the_mark_when_buffered() {
        let mut cursor = Cursor::new(&b"\xef\xbb\xbf0 HEAD"[..]);
        assert_eq!(read_bom(&mut cursor).unwrap(), (Some(Codec::Utf8), Vec::new()));
        assert_eq!(cursor.position(), 3);

        let mut cursor = Cursor::new(&b"0 HEAD"[..]);
        assert_eq!(read_bom(&mut cursor).unwrap(), (None, Vec::new()));
        assert_eq!(cursor.position(), 0);
    }
}
