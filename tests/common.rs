#![cfg(feature = "std")]

use std::path::Path;

use csv::ReaderBuilder;
use fieldwire::sink::{Diagnostic, FieldRecord, FieldSink, GroupHandle, GroupStart};

#[test]
fn decode_open_session() {
    const PATH: &str = "fixtures/open-session.bin";
    let data = std::fs::read(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    let summary = fieldwire::ff::decode(&data, &mut validator).unwrap();
    assert_eq!(summary.label, Some("FDA Open Session Request"));
    validator.finish();
}

#[test]
fn decode_open_session_stream() {
    const PATH: &str = "fixtures/open-session.bin";
    let data = std::fs::read(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    let summaries = fieldwire::ff::decode_stream(&data, &mut validator);
    assert_eq!(summaries.len(), 1);
    validator.finish();
}

#[test]
fn decode_nan_action() {
    const PATH: &str = "fixtures/nan-action.bin";
    let data = std::fs::read(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    fieldwire::nan::decode_action(&data, &mut validator);
    validator.finish();
}

/// Checks every event against the rows of a CSV file beside a fixture.
///
/// Rows are `f,abbrev,start,end,raw[,label]` for fields, `+,label` and `-`
/// for groups, and `!,kind,start,end` for diagnostics.
struct Validator(Vec<Vec<String>>, usize);

impl Validator {
    fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().with_extension("csv");

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_path(path)
            .unwrap();

        let expected: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(|f| f.to_string()).collect())
            .collect();

        Self(expected, 0)
    }

    fn next(&mut self) -> Vec<String> {
        assert!(!self.0.is_empty(), "unexpected event after row {}", self.1);
        self.1 += 1;
        self.0.remove(0)
    }

    fn finish(self) {
        assert!(self.0.is_empty(), "{} events missing, next: {:?}", self.0.len(), self.0.first());
    }
}

impl FieldSink for Validator {
    fn field(&mut self, record: FieldRecord<'_>) {
        let row = self.next();
        let raw: String = record.raw.iter().map(|b| format!("{b:02x}")).collect();
        let mut actual = vec![
            "f".to_string(),
            record.field.abbrev.to_string(),
            record.range.start.to_string(),
            record.range.end.to_string(),
            raw,
        ];
        if let Some(label) = record.label {
            actual.push(label.to_string());
        }
        assert_eq!(row, actual, "row {}", self.1);
    }

    fn enter_group(&mut self, group: GroupStart<'_>) -> GroupHandle {
        let row = self.next();
        assert_eq!(row, ["+", group.label], "row {}", self.1);
        GroupHandle(self.1)
    }

    fn exit_group(&mut self, _: GroupHandle) {
        let row = self.next();
        assert_eq!(row, ["-"], "row {}", self.1);
    }

    fn diagnostic(&mut self, diagnostic: Diagnostic) {
        let row = self.next();
        let actual = [
            "!".to_string(),
            format!("{:?}", diagnostic.kind),
            diagnostic.range.start.to_string(),
            diagnostic.range.end.to_string(),
        ];
        assert_eq!(row, actual, "row {}", self.1);
    }
}
