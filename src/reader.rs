//! A cursor paired with a sink.
//!
//! Decode routines read through a [`Reader`]: every read both advances the
//! cursor and publishes a [`FieldRecord`] describing the bytes consumed.
//! Nested structures are decoded with [`Reader::group`], which is also the
//! recovery boundary for errors.

use alloc::borrow::Cow;
use core::ops::Range;

use tracing::debug;

use crate::{
    cursor::{Cursor, Endian, bits},
    error::Error,
    sink::{Diagnostic, Field, FieldRecord, FieldSink, GroupStart, Kind, Value},
};

/// Trailing bytes no routine claimed.
pub static UNKNOWN: Field = Field::new("Unknown", "fieldwire.unknown", Kind::Bytes);

pub struct Reader<'a, 's, S: FieldSink + ?Sized> {
    cursor: Cursor<'a>,
    sink: &'s mut S,
    endian: Endian,
}

impl<'a, 's, S: FieldSink + ?Sized> Reader<'a, 's, S> {
    pub fn new(cursor: Cursor<'a>, sink: &'s mut S, endian: Endian) -> Self {
        Self {
            cursor,
            sink,
            endian,
        }
    }

    pub fn cursor(&self) -> &Cursor<'a> {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut Cursor<'a> {
        &mut self.cursor
    }

    pub fn sink(&mut self) -> &mut S {
        self.sink
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    pub fn offset(&self) -> usize {
        self.cursor.offset()
    }

    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }

    pub fn at_end(&self) -> bool {
        self.cursor.at_end()
    }

    /// Publish a field over bytes already consumed.
    pub fn emit(
        &mut self,
        field: &'static Field,
        start: usize,
        raw: &'a [u8],
        value: Value<'a>,
        label: Option<&'static str>,
    ) {
        self.sink.field(FieldRecord {
            field,
            range: start..start + raw.len(),
            raw: Cow::Borrowed(raw),
            value,
            label,
        });
    }

    /// Take bytes, returning them with their starting offset.
    fn take(&mut self, n: usize) -> Result<(usize, &'a [u8]), Error> {
        let start = self.cursor.offset();
        Ok((start, self.cursor.take(n)?))
    }

    /// Read an unsigned integer sized by the field's kind, in the reader's
    /// byte order.
    pub fn uint(&mut self, field: &'static Field) -> Result<u64, Error> {
        self.uint_as(field, self.endian)
    }

    /// Read an unsigned integer in an explicit byte order.
    pub fn uint_as(&mut self, field: &'static Field, endian: Endian) -> Result<u64, Error> {
        let width = field.kind.width().unwrap_or(1);
        let start = self.cursor.offset();
        let value = self.cursor.uint(width, endian)?;
        let raw = self.consumed(start);
        self.emit(field, start, raw, Value::Uint(value), field.label(value));
        Ok(value)
    }

    pub fn u8(&mut self, field: &'static Field) -> Result<u8, Error> {
        self.uint(field).map(|v| v as u8)
    }

    pub fn u16(&mut self, field: &'static Field) -> Result<u16, Error> {
        self.uint(field).map(|v| v as u16)
    }

    pub fn u32(&mut self, field: &'static Field) -> Result<u32, Error> {
        self.uint(field).map(|v| v as u32)
    }

    /// Read a one-byte code whose label comes from a caller-chosen table.
    pub fn u8_labeled(
        &mut self,
        field: &'static Field,
        label: impl FnOnce(u8) -> &'static str,
    ) -> Result<u8, Error> {
        let (start, raw) = self.take(1)?;
        let value = raw[0];
        self.emit(field, start, raw, Value::Uint(value.into()), Some(label(value)));
        Ok(value)
    }

    /// Read a signed 16-bit integer.
    pub fn i16(&mut self, field: &'static Field) -> Result<i16, Error> {
        let start = self.cursor.offset();
        let value = self.cursor.i16(self.endian)?;
        let raw = self.consumed(start);
        self.emit(field, start, raw, Value::Int(value.into()), None);
        Ok(value)
    }

    /// Read a one-byte boolean.
    pub fn boolean(&mut self, field: &'static Field) -> Result<bool, Error> {
        let (start, raw) = self.take(1)?;
        let value = raw[0] != 0;
        self.emit(field, start, raw, Value::Bool(value), None);
        Ok(value)
    }

    pub fn bytes(&mut self, field: &'static Field, n: usize) -> Result<&'a [u8], Error> {
        let (start, raw) = self.take(n)?;
        self.emit(field, start, raw, Value::Bytes(Cow::Borrowed(raw)), None);
        Ok(raw)
    }

    /// Read every remaining byte as one field, if any remain.
    pub fn rest(&mut self, field: &'static Field) -> &'a [u8] {
        let start = self.cursor.offset();
        let raw = self.cursor.rest();
        if !raw.is_empty() {
            self.emit(field, start, raw, Value::Bytes(Cow::Borrowed(raw)), None);
        }
        raw
    }

    /// Read a fixed-width text field, padding included.
    pub fn string(&mut self, field: &'static Field, n: usize) -> Result<(), Error> {
        let start = self.cursor.offset();
        let value = self.cursor.fixed_string(n)?;
        let raw = self.consumed(start);
        self.emit(field, start, raw, Value::String(value), None);
        Ok(())
    }

    pub fn ether(&mut self, field: &'static Field) -> Result<[u8; 6], Error> {
        let start = self.cursor.offset();
        let value = self.cursor.ether()?;
        let raw = self.consumed(start);
        self.emit(field, start, raw, Value::Ether(value), None);
        Ok(value)
    }

    pub fn ipv6(&mut self, field: &'static Field) -> Result<[u8; 16], Error> {
        let start = self.cursor.offset();
        let value = self.cursor.ipv6()?;
        let raw = self.consumed(start);
        self.emit(field, start, raw, Value::Ipv6(value), None);
        Ok(value)
    }

    /// Read a bitmask word and publish each of its subfields.
    pub fn bitmask(&mut self, field: &'static Field, subfields: &[&'static Field]) -> Result<u64, Error> {
        self.bitmask_as(field, subfields, self.endian)
    }

    pub fn bitmask_as(
        &mut self,
        field: &'static Field,
        subfields: &[&'static Field],
        endian: Endian,
    ) -> Result<u64, Error> {
        let width = field.kind.width().unwrap_or(1);
        let start = self.cursor.offset();
        let word = self.cursor.uint(width, endian)?;
        let raw = self.consumed(start);

        self.emit(field, start, raw, Value::Uint(word), field.label(word));
        self.subfields(field.name, start, raw, word, subfields);

        Ok(word)
    }

    /// Publish the subfields of a word already read, as a group.
    pub fn subfields(
        &mut self,
        label: &'static str,
        start: usize,
        raw: &'a [u8],
        word: u64,
        subfields: &[&'static Field],
    ) {
        let handle = self.sink.enter_group(GroupStart {
            label,
            range: start..start + raw.len(),
            path: &[],
        });

        for field in subfields {
            let v = bits(word, field.mask);
            let value = if field.kind == Kind::Bool {
                Value::Bool(v != 0)
            } else {
                Value::Uint(v)
            };
            self.emit(field, start, raw, value, field.label(v));
        }

        self.sink.exit_group(handle);
    }

    /// Publish every remaining byte as an unknown field.
    pub fn unknown_tail(&mut self) {
        self.rest(&UNKNOWN);
    }

    /// Report a diagnostic.
    pub fn report(&mut self, range: Range<usize>, error: Error) {
        debug!(%error, start = range.start, end = range.end, "decode diagnostic");
        self.sink.diagnostic(Diagnostic::new(range, error));
    }

    /// Report an error over the bytes not yet consumed.
    pub fn report_rest(&mut self, error: Error) {
        let range = self.cursor.offset()..self.cursor.end();
        self.report(range, error);
    }

    /// Decode the next `len` bytes as a nested structure.
    ///
    /// Only failing to take the `len` bytes is an error for the caller.
    /// An error inside `f` becomes a diagnostic over what `f` left
    /// undecoded, and bytes `f` left unread become an unknown field.
    pub fn group<F>(&mut self, label: &'static str, len: usize, f: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Reader<'a, '_, S>) -> Result<(), Error>,
    {
        self.group_at(label, &[], len, f)
    }

    /// Like [`Reader::group`], tagging the group with a category path.
    pub fn group_at<F>(
        &mut self,
        label: &'static str,
        path: &[&'static str],
        len: usize,
        f: F,
    ) -> Result<(), Error>
    where
        F: FnOnce(&mut Reader<'a, '_, S>) -> Result<(), Error>,
    {
        let cursor = self.cursor.split(len)?;
        let handle = self.sink.enter_group(GroupStart {
            label,
            range: cursor.offset()..cursor.end(),
            path,
        });

        let mut inner = Reader {
            cursor,
            sink: &mut *self.sink,
            endian: self.endian,
        };
        match f(&mut inner) {
            Ok(()) => inner.unknown_tail(),
            Err(error) => inner.report_rest(error),
        }

        self.sink.exit_group(handle);
        Ok(())
    }

    /// Bytes consumed since `start`.
    fn consumed(&self, start: usize) -> &'a [u8] {
        let end = self.cursor.offset();
        self.cursor.before(end - start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{Event, Recorder};

    static A: Field = Field::new("A", "t.a", Kind::U16);
    static FLAGS: Field = Field::new("Flags", "t.flags", Kind::U8);
    static HI: Field = Field::new("High", "t.flags.hi", Kind::U8).mask(0xF0);
    static LO: Field = Field::new("Low", "t.flags.lo", Kind::Bool).mask(0x01);

    #[test]
    fn fields_carry_absolute_ranges() {
        let data = [0xAA, 0x01, 0x02, 0x31];
        let mut sink = Recorder::new();
        let mut c = Cursor::new(&data);
        c.skip(1).unwrap();

        let mut r = Reader::new(c, &mut sink, Endian::Little);
        assert_eq!(r.u16(&A).unwrap(), 0x0201);
        assert_eq!(r.bitmask(&FLAGS, &[&HI, &LO]).unwrap(), 0x31);

        let a = sink.field("t.a").unwrap();
        assert_eq!(a.range, 1..3);
        assert_eq!(&a.raw[..], &[0x01, 0x02]);
        assert_eq!(sink.field("t.flags.hi").unwrap().value, Value::Uint(3));
        assert_eq!(sink.field("t.flags.lo").unwrap().value, Value::Bool(true));
        assert_eq!(sink.field("t.flags.lo").unwrap().range, 3..4);
    }

    #[test]
    fn group_errors_become_diagnostics() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut sink = Recorder::new();
        let mut r = Reader::new(Cursor::new(&data), &mut sink, Endian::Big);

        r.group("G", 3, |r| {
            r.u16(&A)?;
            r.u16(&A)?;
            Ok(())
        })
        .unwrap();
        assert_eq!(r.remaining(), 1);
        assert!(r.group("H", 2, |_| Ok(())).is_err());

        let diagnostics: alloc::vec::Vec<_> = sink.diagnostics().collect();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].range, 2..3);
        assert!(matches!(sink.events.last(), Some(Event::Exit)));
    }

    #[test]
    fn unread_bytes_become_unknown() {
        let data = [0x01, 0x02, 0x03];
        let mut sink = Recorder::new();
        let mut r = Reader::new(Cursor::new(&data), &mut sink, Endian::Big);

        r.group("G", 3, |r| r.u8(&FLAGS).map(|_| ())).unwrap();

        let unknown = sink.field("fieldwire.unknown").unwrap();
        assert_eq!(unknown.range, 1..3);
    }
}
