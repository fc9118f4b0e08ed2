//! Receivers for decoded fields.
//!
//! Decoders publish what they find to a [`FieldSink`]: one [`FieldRecord`]
//! per decoded field, a [`GroupStart`] and matching exit for every nested
//! structure, and a [`Diagnostic`] wherever the input was malformed.
//!
//! Every method of [`FieldSink`] has a default implementation that ignores
//! its input, so `()` and [`NullSink`] decode without reporting anything.
//! [`Recorder`] collects everything into an ordered list of [`Event`]s.

use alloc::{borrow::Cow, string::String, string::ToString};
use core::ops::Range;

use crate::{
    error::{DiagnosticKind, Error},
    nan::channel::Channels,
};

pub mod recorder;

pub use recorder::{Event, Recorder};

/// The wire representation of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    U8,
    U16,
    U24,
    U32,
    U48,
    U64,
    I16,
    /// A single byte read as a boolean.
    Bool,
    Bytes,
    String,
    Ether,
    Ipv6,
    /// Channel numbers derived from an operating class and bitmap.
    Channels,
    /// A value with no bytes of its own.
    None,
}

impl Kind {
    /// Width in bytes of fixed-width kinds.
    pub const fn width(self) -> Option<usize> {
        match self {
            Self::U8 | Self::Bool => Some(1),
            Self::U16 | Self::I16 => Some(2),
            Self::U24 => Some(3),
            Self::U32 => Some(4),
            Self::U48 | Self::Ether => Some(6),
            Self::U64 => Some(8),
            Self::Ipv6 => Some(16),
            _ => None,
        }
    }
}

/// Static description of a field.
///
/// A non-zero `mask` marks a bitfield: the value reported is the masked
/// bits of the containing word, shifted down to bit zero.
#[derive(Debug)]
pub struct Field {
    pub name: &'static str,
    pub abbrev: &'static str,
    pub kind: Kind,
    pub mask: u64,
    pub strings: Option<fn(u64) -> &'static str>,
}

impl Field {
    pub const fn new(name: &'static str, abbrev: &'static str, kind: Kind) -> Self {
        Self {
            name,
            abbrev,
            kind,
            mask: 0,
            strings: None,
        }
    }

    pub const fn mask(self, mask: u64) -> Self {
        Self { mask, ..self }
    }

    pub const fn strings(self, strings: fn(u64) -> &'static str) -> Self {
        Self {
            strings: Some(strings),
            ..self
        }
    }

    /// The label for a value, if this field has a translation table.
    pub fn label(&self, value: u64) -> Option<&'static str> {
        self.strings.map(|f| f(value))
    }
}

/// A decoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value<'a> {
    None,
    Uint(u64),
    Int(i64),
    Bool(bool),
    Bytes(Cow<'a, [u8]>),
    String(Cow<'a, str>),
    Ether([u8; 6]),
    Ipv6([u8; 16]),
    Channels(Channels),
}

impl Value<'_> {
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Self::Uint(v) => Some(*v),
            Self::Bool(b) => Some(u64::from(*b)),
            _ => None,
        }
    }

    pub fn into_owned(self) -> Value<'static> {
        match self {
            Self::None => Value::None,
            Self::Uint(v) => Value::Uint(v),
            Self::Int(v) => Value::Int(v),
            Self::Bool(v) => Value::Bool(v),
            Self::Bytes(v) => Value::Bytes(Cow::Owned(v.into_owned())),
            Self::String(v) => Value::String(Cow::Owned(v.into_owned())),
            Self::Ether(v) => Value::Ether(v),
            Self::Ipv6(v) => Value::Ipv6(v),
            Self::Channels(v) => Value::Channels(v),
        }
    }
}

/// One decoded field.
#[derive(Debug, Clone)]
pub struct FieldRecord<'a> {
    pub field: &'static Field,
    /// Absolute byte range in the decoded buffer.
    pub range: Range<usize>,
    pub raw: Cow<'a, [u8]>,
    pub value: Value<'a>,
    /// A translated label for the value, where one applies.
    pub label: Option<&'static str>,
}

impl FieldRecord<'_> {
    pub fn into_owned(self) -> FieldRecord<'static> {
        FieldRecord {
            field: self.field,
            range: self.range,
            raw: Cow::Owned(self.raw.into_owned()),
            value: self.value.into_owned(),
            label: self.label,
        }
    }
}

/// The start of a nested structure.
#[derive(Debug, Clone)]
pub struct GroupStart<'p> {
    pub label: &'static str,
    pub range: Range<usize>,
    /// Category path of the structure, e.g. `["fda", "open_sess", "req"]`.
    /// Empty for most groups.
    pub path: &'p [&'static str],
}

/// An opaque token pairing a group's start with its exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupHandle(pub usize);

/// A report of malformed or unrecognized input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub range: Range<usize>,
    pub error: Error,
}

impl Diagnostic {
    pub fn new(range: Range<usize>, error: Error) -> Self {
        Self {
            kind: error.kind(),
            range,
            error,
        }
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

/// Receive decoded fields, groups and diagnostics.
///
/// The default implementation of each method ignores its input.
#[allow(unused_variables)]
pub trait FieldSink {
    /// Receive a decoded field.
    fn field(&mut self, record: FieldRecord<'_>) {}
    /// Open a nested structure.
    fn enter_group(&mut self, group: GroupStart<'_>) -> GroupHandle {
        GroupHandle(0)
    }
    /// Close the structure opened with `handle`.
    fn exit_group(&mut self, handle: GroupHandle) {}
    /// Receive a diagnostic.
    fn diagnostic(&mut self, diagnostic: Diagnostic) {}
}

/// A sink discarding everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl FieldSink for NullSink {}

impl FieldSink for () {}

impl<S: FieldSink + ?Sized> FieldSink for &mut S {
    fn field(&mut self, record: FieldRecord<'_>) {
        (**self).field(record)
    }
    fn enter_group(&mut self, group: GroupStart<'_>) -> GroupHandle {
        (**self).enter_group(group)
    }
    fn exit_group(&mut self, handle: GroupHandle) {
        (**self).exit_group(handle)
    }
    fn diagnostic(&mut self, diagnostic: Diagnostic) {
        (**self).diagnostic(diagnostic)
    }
}
