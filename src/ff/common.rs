//! Structures shared by routines of several protocols.

use crate::{
    error::Error,
    reader::Reader,
    sink::{Field, FieldSink, Kind},
};

use super::tables::{err_class, err_code};

pub static ERR_CLASS: Field = Field::new("Error Class", "ff.err.class", Kind::U8).strings(err_class);
pub static ERR_CODE: Field = Field::new("Error Code", "ff.err.code", Kind::U8);
pub static ADDITIONAL_CODE: Field = Field::new("Additional Code", "ff.err.additional_code", Kind::I16);
pub static ADDITIONAL_DESC: Field =
    Field::new("Additional Description", "ff.err.additional_desc", Kind::String);

pub static RESERVED: Field = Field::new("Reserved", "ff.reserved", Kind::Bytes);

pub static PD_TAG: Field = Field::new("PD Tag", "ff.pd_tag", Kind::String);
pub static DEV_ID: Field = Field::new("Device ID", "ff.dev_id", Kind::String);

/// Width of the text identifiers carried by several services.
pub const TAG_LEN: usize = 32;

/// Decode the 20-byte error tail: class, code, additional code and
/// description.
///
/// The code's label depends on the class read before it.
pub fn error_tail<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    let class = r.u8(&ERR_CLASS)?;
    r.u8_labeled(&ERR_CODE, |code| err_code(class, code))?;
    r.i16(&ADDITIONAL_CODE)?;
    r.string(&ADDITIONAL_DESC, 16)?;
    Ok(())
}

/// A body with no fields of its own.
pub fn empty<S: FieldSink + ?Sized>(_: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    Ok(())
}

pub fn reserved<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>, n: usize) -> Result<(), Error> {
    r.bytes(&RESERVED, n).map(|_| ())
}

pub fn pd_tag<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.string(&PD_TAG, TAG_LEN)
}

pub fn dev_id<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.string(&DEV_ID, TAG_LEN)
}

/// Decode `count` records of `size` bytes each as one group.
///
/// The records must fit in what remains before the first is read.
pub fn list<'a, S, F>(
    r: &mut Reader<'a, '_, S>,
    label: &'static str,
    count: usize,
    size: usize,
    mut f: F,
) -> Result<(), Error>
where
    S: FieldSink + ?Sized,
    F: FnMut(&mut Reader<'a, '_, S>) -> Result<(), Error>,
{
    r.cursor().expect_records(count, size)?;
    r.group(label, count * size, |r| {
        for _ in 0..count {
            f(r)?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cursor::{Cursor, Endian},
        error::DiagnosticKind,
        sink::{Recorder, Value},
    };

    #[test]
    fn error_code_label_follows_class() {
        let mut data = alloc::vec![5, 14, 0xFF, 0xFE];
        data.extend_from_slice(b"busy\0\0\0\0\0\0\0\0\0\0\0\0");

        let mut sink = Recorder::new();
        let mut r = Reader::new(Cursor::new(&data), &mut sink, Endian::Big);
        error_tail(&mut r).unwrap();
        assert!(r.at_end());

        assert_eq!(sink.field("ff.err.class").unwrap().label, Some("Service"));
        assert_eq!(sink.field("ff.err.code").unwrap().label, Some("response time-out"));
        assert_eq!(sink.field("ff.err.additional_code").unwrap().value, Value::Int(-2));
    }

    #[test]
    fn oversized_counts_fail_before_reading() {
        static ENTRY: Field = Field::new("Entry", "t.entry", Kind::U32);

        let data = [0u8; 8];
        let mut sink = Recorder::new();
        let mut r = Reader::new(Cursor::new(&data), &mut sink, Endian::Big);

        r.group("Body", 8, |r| list(r, "Entries", 0xFFFF_FFFF, 4, |r| r.u32(&ENTRY).map(|_| ())))
            .unwrap();

        assert!(sink.field("t.entry").is_none());
        let diagnostics: alloc::vec::Vec<_> = sink.diagnostics().collect();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::MalformedLength);
        assert_eq!(diagnostics[0].range, 0..8);
    }
}
