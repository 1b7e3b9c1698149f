//! # GEDCOM line grammar
//!
//! ```text
//! line  := level SP (xref SP)? tag (SP value)?
//! level := DIGIT+
//! xref  := "@" (ALPHA | DIGIT) (any char except "@")* "@"
//! tag   := (ALPHA | DIGIT)+
//! value := rest of the line, verbatim, possibly empty
//! ```
//!
//! Tokens are separated by exactly one space. Only the single space after the
//! tag is consumed; any further spaces belong to the value.

use crate::gedcom::types::error::ParserErrorKind;
use crate::gedcom::types::models::GedcomLine;

/// `@ID@` where the identifier starts with a letter or digit.
pub(crate) fn is_valid_xref(token: &str) -> bool {
    let inner = match token.strip_prefix('@').and_then(|t| t.strip_suffix('@')) {
        Some(inner) => inner,
        None => return false,
    };
    match inner.chars().next() {
        Some(first) => first.is_ascii_alphanumeric() && !inner.contains('@'),
        None => false,
    }
}

pub(crate) fn is_valid_tag(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Splits off the next space-delimited token.
fn next_token(s: &str) -> (&str, Option<&str>) {
    match s.split_once(' ') {
        Some((token, rest)) => (token, Some(rest)),
        None => (s, None),
    }
}

impl GedcomLine {
    /// Parses one decoded line.
    pub fn parse(line: &str) -> Result<Self, ParserErrorKind> {
        let (level_token, rest) = next_token(line);
        if level_token.is_empty() || !level_token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParserErrorKind::NonNumericLevel);
        }
        let level: u32 = level_token.parse().map_err(|_| ParserErrorKind::LevelOutOfRange)?;

        let rest = rest.ok_or(ParserErrorKind::MissingTag)?;
        let (mut token, mut rest) = next_token(rest);

        let xref_id = if token.starts_with('@') {
            if !is_valid_xref(token) {
                return Err(ParserErrorKind::MalformedXref);
            }
            let xref = token;
            let after = rest.ok_or(ParserErrorKind::MissingTag)?;
            (token, rest) = next_token(after);
            Some(xref.to_owned())
        } else {
            None
        };

        if token.is_empty() {
            return Err(ParserErrorKind::MissingTag);
        }
        if !is_valid_tag(token) {
            return Err(ParserErrorKind::NonAlphanumericTag);
        }

        Ok(Self {
            level,
            xref_id,
            tag: token.to_owned(),
            value: rest.map(str::to_owned),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(level: u32, xref_id: Option<&str>, tag: &str, value: Option<&str>) -> GedcomLine {
        GedcomLine::new(level, xref_id, tag, value).unwrap()
    }

    #[test]
    fn simple_lines() {
        assert_eq!(GedcomLine::parse("0 HEAD"), Ok(line(0, None, "HEAD", None)));
        assert_eq!(GedcomLine::parse("1 SOUR PIF PAF"), Ok(line(1, None, "SOUR", Some("PIF PAF"))));
        assert_eq!(GedcomLine::parse("0 @i1@ INDI"), Ok(line(0, Some("@i1@"), "INDI", None)));
        assert_eq!(GedcomLine::parse("12 CONT"), Ok(line(12, None, "CONT", None)));
    }

    #[test]
    fn value_keeps_extra_spaces_and_empty_is_distinct() {
        assert_eq!(GedcomLine::parse("2 NOTE  two"), Ok(line(2, None, "NOTE", Some(" two"))));
        assert_eq!(GedcomLine::parse("2 NOTE "), Ok(line(2, None, "NOTE", Some(""))));
        assert_eq!(GedcomLine::parse("2 NOTE").unwrap().value, None);
    }

    #[test]
    fn xref_with_value() {
        let parsed = GedcomLine::parse("0 @N1@ NOTE some text").unwrap();
        assert_eq!(parsed.xref_id.as_deref(), Some("@N1@"));
        assert_eq!(parsed.tag, "NOTE");
        assert_eq!(parsed.value.as_deref(), Some("some text"));
    }

    #[test]
    fn pointer_values_are_not_xrefs() {
        let parsed = GedcomLine::parse("1 FAMC @F1@").unwrap();
        assert_eq!(parsed.xref_id, None);
        assert_eq!(parsed.value.as_deref(), Some("@F1@"));
    }

    #[test]
    fn level_errors() {
        assert_eq!(GedcomLine::parse("X HEAD"), Err(ParserErrorKind::NonNumericLevel));
        assert_eq!(GedcomLine::parse(" 0 HEAD"), Err(ParserErrorKind::NonNumericLevel));
        assert_eq!(GedcomLine::parse("1a HEAD"), Err(ParserErrorKind::NonNumericLevel));
        assert_eq!(GedcomLine::parse("99999999999 HEAD"), Err(ParserErrorKind::LevelOutOfRange));
    }

    #[test]
    fn tag_errors() {
        assert_eq!(GedcomLine::parse("0 H@EAD"), Err(ParserErrorKind::NonAlphanumericTag));
        assert_eq!(GedcomLine::parse("0 _UID x"), Err(ParserErrorKind::NonAlphanumericTag));
        assert_eq!(GedcomLine::parse("0"), Err(ParserErrorKind::MissingTag));
        assert_eq!(GedcomLine::parse("0 "), Err(ParserErrorKind::MissingTag));
        assert_eq!(GedcomLine::parse("0  HEAD"), Err(ParserErrorKind::MissingTag));
        assert_eq!(GedcomLine::parse("0 @I1@"), Err(ParserErrorKind::MissingTag));
    }

    #[test]
    fn xref_errors() {
        assert_eq!(GedcomLine::parse("0 @!ref@ HEAD"), Err(ParserErrorKind::MalformedXref));
        assert_eq!(GedcomLine::parse("0 @@ HEAD"), Err(ParserErrorKind::MalformedXref));
        assert_eq!(GedcomLine::parse("0 @I1 INDI"), Err(ParserErrorKind::MalformedXref));
        assert_eq!(GedcomLine::parse("0 @I@1@ INDI"), Err(ParserErrorKind::MalformedXref));
    }

    #[test]
    fn checked_constructor() {
        assert_eq!(GedcomLine::new(0, None, "", None), Err(ParserErrorKind::MissingTag));
        assert_eq!(GedcomLine::new(0, Some("I1"), "INDI", None), Err(ParserErrorKind::MalformedXref));
        assert_eq!(GedcomLine::new(0, None, "HE AD", None), Err(ParserErrorKind::NonAlphanumericTag));
        assert_eq!(line(1, None, "NAME", Some("Jo /Doe/")).to_string(), "1 NAME Jo /Doe/");
    }
}
