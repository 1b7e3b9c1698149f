//! Codec layer: character decoding for raw GEDCOM lines.
//!
//! # Submodules
//!
//! - [`names`][]: `CHAR` declaration names to [`Codec`](crate::Codec)
//! - [`ansel`][]: the ANSEL decoder, which `encoding_rs` does not provide
//! - [`decode`][]: line decoding under a [`DecodeErrors`](crate::DecodeErrors) mode

pub mod ansel;
pub mod decode;
pub mod names;
