//! Stream format layer for GEDCOM documents.
//!
//! # Module Organization
//!
//! - [`bom`]: initial codec guess from a byte-order mark
//! - [`lines`]: decoded line stream with in-band codec switching
//! - [`record`]: the per-line grammar producing [`GedcomLine`](crate::GedcomLine)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Byte stream    │ ← bom::read_bom()        (once)
//! ├─────────────────┤
//! │  Raw lines      │ ← lines::LineReader      (decode, watch 1 CHAR)
//! ├─────────────────┤
//! │  GedcomLine     │ ← GedcomLine::parse()    (per line)
//! └─────────────────┘
//! ```

pub mod bom;
pub mod lines;
pub mod record;
