#![no_std]

//! Bounds-checked decoders for the Foundation Fieldbus HSE and Wi-Fi
//! Neighbor Awareness Networking wire formats.
//!
//! Fieldwire turns a borrowed byte buffer into a stream of typed field
//! records, nested groups and diagnostics, reported to a caller-supplied
//! [`sink::FieldSink`]. Decoding never reads out of bounds and never
//! panics on malformed input: a structure that does not fit is reported as
//! a [`sink::Diagnostic`], and decoding resumes with its next sibling.
//!
//! Most users should begin with [`ff::decode`] for fieldbus messages and
//! [`nan::decode_action`], [`nan::decode_beacon`] or
//! [`nan::decode_service_discovery`] for NAN frames, collecting output with
//! a [`sink::Recorder`]. New structures are decoded with a
//! [`reader::Reader`], which pairs a [`cursor::Cursor`] with a sink.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: implement `std::error::Error` and emit logs through `std`
//!   (default).

extern crate alloc;

pub mod cursor;
pub mod error;
pub mod ff;
pub mod nan;
pub mod reader;
pub mod sink;
pub mod tables;

pub use error::{DiagnosticKind, Error, LengthRule};
