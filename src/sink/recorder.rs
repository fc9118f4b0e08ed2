//! A sink collecting everything it receives.

use alloc::vec::Vec;
use core::ops::Range;

use super::{Diagnostic, FieldRecord, FieldSink, GroupHandle, GroupStart};

/// An event received by a [`Recorder`].
#[derive(Debug, Clone)]
pub enum Event {
    Field(FieldRecord<'static>),
    Enter {
        label: &'static str,
        range: Range<usize>,
        path: Vec<&'static str>,
    },
    Exit,
    Diagnostic(Diagnostic),
}

/// Collect fields, groups and diagnostics in the order they were emitted.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub events: Vec<Event>,
    depth: usize,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every field, in order, regardless of nesting.
    pub fn fields(&self) -> impl Iterator<Item = &FieldRecord<'static>> {
        fields(&self.events)
    }

    /// The first field with a filter abbreviation.
    pub fn field(&self, abbrev: &str) -> Option<&FieldRecord<'static>> {
        self.fields().find(|r| r.field.abbrev == abbrev)
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.events.iter().filter_map(|e| match e {
            Event::Diagnostic(d) => Some(d),
            _ => None,
        })
    }

    /// The events inside each group with a label, outermost first.
    pub fn groups(&self, label: &str) -> Vec<&[Event]> {
        let mut found = Vec::new();

        for (i, event) in self.events.iter().enumerate() {
            if let Event::Enter { label: l, .. } = event {
                if *l == label {
                    let body = &self.events[i + 1..];
                    found.push(&body[..closing(body)]);
                }
            }
        }

        found
    }

    /// The events inside the first group with a label.
    pub fn group(&self, label: &str) -> Option<&[Event]> {
        self.groups(label).into_iter().next()
    }

    /// The category path of the first group carrying one.
    pub fn path(&self) -> Option<&[&'static str]> {
        self.events.iter().find_map(|e| match e {
            Event::Enter { path, .. } if !path.is_empty() => Some(path.as_slice()),
            _ => None,
        })
    }
}

/// Fields within a slice of events.
pub fn fields(events: &[Event]) -> impl Iterator<Item = &FieldRecord<'static>> {
    events.iter().filter_map(|e| match e {
        Event::Field(r) => Some(r),
        _ => None,
    })
}

/// Fields directly inside a slice of events, skipping nested groups.
pub fn direct_fields(events: &[Event]) -> Vec<&FieldRecord<'static>> {
    let mut depth = 0usize;
    let mut found = Vec::new();

    for event in events {
        match event {
            Event::Enter { .. } => depth += 1,
            Event::Exit => depth = depth.saturating_sub(1),
            Event::Field(r) if depth == 0 => found.push(r),
            _ => {}
        }
    }

    found
}

/// Index of the exit closing a group whose body starts at `body[0]`.
fn closing(body: &[Event]) -> usize {
    let mut depth = 0usize;

    for (i, event) in body.iter().enumerate() {
        match event {
            Event::Enter { .. } => depth += 1,
            Event::Exit if depth == 0 => return i,
            Event::Exit => depth -= 1,
            _ => {}
        }
    }

    body.len()
}

impl FieldSink for Recorder {
    fn field(&mut self, record: FieldRecord<'_>) {
        self.events.push(Event::Field(record.into_owned()));
    }

    fn enter_group(&mut self, group: GroupStart<'_>) -> GroupHandle {
        self.events.push(Event::Enter {
            label: group.label,
            range: group.range,
            path: group.path.to_vec(),
        });
        self.depth += 1;
        GroupHandle(self.depth)
    }

    fn exit_group(&mut self, handle: GroupHandle) {
        debug_assert_eq!(handle.0, self.depth);
        self.depth -= 1;
        self.events.push(Event::Exit);
    }

    fn diagnostic(&mut self, diagnostic: Diagnostic) {
        self.events.push(Event::Diagnostic(diagnostic));
    }
}
