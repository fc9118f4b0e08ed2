use fieldwire::{
    DiagnosticKind, Error,
    ff::{self, HEADER_LEN},
    sink::{
        Recorder, Value,
        recorder::{direct_fields, fields},
    },
};

const FDA: u8 = 1 << 2;
const SM: u8 = 2 << 2;
const FMS: u8 = 3 << 2;

const REQUEST: u8 = 0;
const RESPONSE: u8 = 1;
const ERROR: u8 = 2;

const CONFIRMED: u8 = 0x80;

fn message(options: u8, proto_and_type: u8, service: u8, fda_address: u32, body: &[u8], tail: &[u8]) -> Vec<u8> {
    let length = (HEADER_LEN + body.len() + tail.len()) as u32;
    let mut r = vec![1, options, proto_and_type, service];
    r.extend_from_slice(&fda_address.to_be_bytes());
    r.extend_from_slice(&length.to_be_bytes());
    r.extend_from_slice(body);
    r.extend_from_slice(tail);
    r
}

fn tag(text: &[u8]) -> [u8; 32] {
    let mut r = [0u8; 32];
    r[..text.len()].copy_from_slice(text);
    r
}

fn open_session_body() -> Vec<u8> {
    let mut r = Vec::new();
    r.extend_from_slice(&1u32.to_be_bytes());
    r.extend_from_slice(&1024u32.to_be_bytes());
    r.extend_from_slice(&512u32.to_be_bytes());
    r.push(0);
    r.push(1);
    r.extend_from_slice(&30u16.to_be_bytes());
    r.extend_from_slice(&5u32.to_be_bytes());
    r.extend_from_slice(&tag(b"DEV1"));
    r
}

fn decode(data: &[u8]) -> (Option<&'static str>, Recorder) {
    let mut sink = Recorder::new();
    let summary = ff::decode(data, &mut sink).unwrap();
    (summary.label, sink)
}

#[test]
fn open_session_request() {
    let body = open_session_body();
    assert_eq!(body.len(), 52);
    let data = message(0, FDA | REQUEST, CONFIRMED | 1, 0, &body, &[]);

    let (label, sink) = decode(&data);
    assert_eq!(label, Some("FDA Open Session Request"));
    assert_eq!(sink.path(), Some(&["fda", "open_sess", "req"][..]));
    assert!(sink.diagnostics().next().is_none());

    let group = sink.group("FDA Open Session Request").unwrap();
    let body_fields = direct_fields(group);
    assert_eq!(body_fields.len(), 8);
    assert_eq!(body_fields[0].value, Value::Uint(1));
    assert_eq!(body_fields[1].value, Value::Uint(1024));
    assert_eq!(body_fields[2].value, Value::Uint(512));
    assert_eq!(body_fields[5].value, Value::Uint(30));
    assert_eq!(body_fields[6].value, Value::Uint(5));

    let pd_tag = sink.field("ff.pd_tag").unwrap();
    assert_eq!(pd_tag.range, 32..64);
    assert_eq!(&pd_tag.raw[..], &tag(b"DEV1")[..]);
    let Value::String(text) = &pd_tag.value else {
        panic!("pd tag decoded as {:?}", pd_tag.value);
    };
    assert_eq!(text.len(), 32);
    assert!(text.starts_with("DEV1\0"));
}

#[test]
fn header_subfields_are_labeled() {
    let data = message(0, FDA | REQUEST, CONFIRMED | 1, 0, &open_session_body(), &[]);
    let (_, sink) = decode(&data);

    assert_eq!(
        sink.field("ff.hdr.proto_and_type.proto").unwrap().label,
        Some("FDA Session Management")
    );
    assert_eq!(
        sink.field("ff.hdr.proto_and_type.msg_type").unwrap().label,
        Some("Request Message")
    );
    assert_eq!(sink.field("ff.hdr.srv.confirm_flag").unwrap().label, Some("Confirmed"));
    assert_eq!(sink.field("ff.hdr.srv.id").unwrap().value, Value::Uint(1));
    assert_eq!(sink.field("ff.hdr.len").unwrap().value, Value::Uint(64));
}

#[test]
fn length_beyond_buffer_is_truncated() {
    let mut data = message(0, FDA | REQUEST, CONFIRMED | 1, 0, &[0; 50], &[]);
    data[8..12].copy_from_slice(&100u32.to_be_bytes());

    let (label, sink) = decode(&data);
    assert_eq!(label, None);

    let diagnostics: Vec<_> = sink.diagnostics().collect();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::MalformedLength);
    assert_eq!(diagnostics[0].range, 12..62);
    assert_eq!(
        diagnostics[0].error,
        Error::Truncated {
            requested: 88,
            available: 50
        }
    );
    assert!(sink.group("FDA Open Session Request").is_none());
}

#[test]
fn short_body_stops_inside_its_group() {
    let body = open_session_body();
    let data = message(0, FDA | REQUEST, CONFIRMED | 1, 0, &body[..30], &[]);

    let (label, sink) = decode(&data);
    assert_eq!(label, Some("FDA Open Session Request"));

    let group = sink.group("FDA Open Session Request").unwrap();
    assert_eq!(direct_fields(group).len(), 7);
    assert!(sink.field("ff.pd_tag").is_none());

    let diagnostics: Vec<_> = sink.diagnostics().collect();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].range, 32..42);
}

#[test]
fn error_code_follows_error_class() {
    let mut body = vec![5, 14, 0x00, 0x00];
    body.extend_from_slice(b"no answer\0\0\0\0\0\0\0");
    let data = message(0, FDA | ERROR, CONFIRMED | 1, 0, &body, &[]);

    let (label, sink) = decode(&data);
    assert_eq!(label, Some("FDA Open Session Error"));
    assert_eq!(sink.path(), Some(&["fda", "open_sess", "err"][..]));
    assert_eq!(sink.field("ff.err.class").unwrap().label, Some("Service"));
    assert_eq!(sink.field("ff.err.code").unwrap().label, Some("response time-out"));
    assert_eq!(sink.field("ff.err.additional_code").unwrap().value, Value::Int(0));
    assert!(sink.field("fieldwire.unknown").is_none());
}

#[test]
fn unknown_service_is_published_whole() {
    let data = message(0, FDA | REQUEST, CONFIRMED | 9, 0, &[1, 2, 3, 4, 5], &[]);

    let (label, sink) = decode(&data);
    assert_eq!(label, None);
    let unknown = sink.field("ff.unknown_service").unwrap();
    assert_eq!(unknown.range, 12..17);
    assert_eq!(&unknown.raw[..], &[1, 2, 3, 4, 5]);
    assert!(sink.diagnostics().next().is_none());
}

#[test]
fn extra_body_bytes_are_unknown() {
    let data = message(0, FMS | REQUEST, CONFIRMED | 26, 0, &[0, 0, 0, 7, 0xEE, 0xFF], &[]);

    let (label, sink) = decode(&data);
    assert_eq!(label, Some("FMS Read Request"));
    assert_eq!(sink.field("ff.fms.idx").unwrap().value, Value::Uint(7));
    let unknown = sink.field("fieldwire.unknown").unwrap();
    assert_eq!(unknown.range, 16..18);
}

fn identity_body(entries: &[[u8; 4]]) -> Vec<u8> {
    let mut r = vec![0x81, 0x20, 0x00, 0x00];
    r.extend_from_slice(&3u16.to_be_bytes());
    r.extend_from_slice(&8u16.to_be_bytes());
    r.extend_from_slice(&[0; 16]);
    r.extend_from_slice(&tag(b"ID-42"));
    r.extend_from_slice(&tag(b"FT-101"));
    r.extend_from_slice(&1000u32.to_be_bytes());
    r.extend_from_slice(&1090u16.to_be_bytes());
    r.extend_from_slice(&[0, 0]);
    r.extend_from_slice(&1u32.to_be_bytes());
    r.extend_from_slice(&2u32.to_be_bytes());
    r.extend_from_slice(&(entries.len() as u32).to_be_bytes());
    for entry in entries {
        r.extend_from_slice(entry);
    }
    r
}

#[test]
fn identify_response_lists_links_for_low_addresses() {
    let body = identity_body(&[[0x00, 0x10, 0x00, 0x01], [0x00, 0x11, 0x00, 0x02]]);
    assert_eq!(body.len(), 108 + 8);
    let data = message(0, SM | RESPONSE, CONFIRMED | 3, 0x0000_0042, &body, &[]);

    let (label, sink) = decode(&data);
    assert_eq!(label, Some("SM Identify Response"));
    assert!(sink.diagnostics().next().is_none());

    let entries = sink.groups("Link Entry");
    assert_eq!(entries.len(), 2);
    assert!(sink.group("Node Entry").is_none());
    let link_ids: Vec<_> = entries
        .iter()
        .flat_map(|e| fields(e))
        .filter(|f| f.field.abbrev == "ff.sm.ver_list.link_id")
        .map(|f| f.value.clone())
        .collect();
    assert_eq!(link_ids, [Value::Uint(0x10), Value::Uint(0x11)]);

    assert_eq!(sink.field("ff.sm.smk_state.sync").unwrap().value, Value::Bool(true));
    assert_eq!(sink.field("ff.sm.dev_type.hse").unwrap().value, Value::Bool(true));
    assert_eq!(sink.field("ff.sm.lr_port").unwrap().value, Value::Uint(1090));
}

#[test]
fn device_annunciation_lists_nodes_for_high_addresses() {
    let body = identity_body(&[[0x14, 0x00, 0x00, 0x09]]);
    let data = message(0, SM | REQUEST, 16, 0x0001_0000, &body, &[]);

    let (label, sink) = decode(&data);
    assert_eq!(label, Some("SM Device Annunciation Request"));
    assert_eq!(sink.path(), Some(&["sm", "dev_annunc", "req"][..]));

    let entry = sink.group("Node Entry").unwrap();
    let entry_fields = direct_fields(entry);
    assert_eq!(entry_fields[0].field.abbrev, "ff.sm.h1_node_addr");
    assert_eq!(entry_fields[0].value, Value::Uint(0x14));
    assert_eq!(entry_fields[2].value, Value::Uint(9));
    assert!(sink.group("Link Entry").is_none());
}

#[test]
fn version_list_count_is_checked_first() {
    let mut body = identity_body(&[[0x00, 0x10, 0x00, 0x01]]);
    body[104..108].copy_from_slice(&u32::MAX.to_be_bytes());
    let data = message(0, SM | RESPONSE, CONFIRMED | 3, 0, &body, &[]);

    let (_, sink) = decode(&data);
    assert!(sink.group("Version Number List").is_none());
    let diagnostics: Vec<_> = sink.diagnostics().collect();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::MalformedLength);
    assert_eq!(diagnostics[0].range, 120..124);
}

#[test]
fn padding_and_trailer_follow_the_body() {
    let tail = [0, 0, 0, 0, 0, 7];
    let data = message(0x82, FDA | REQUEST, CONFIRMED | 2, 0, &[], &tail);

    let (label, sink) = decode(&data);
    assert_eq!(label, Some("FDA Idle Request"));
    assert_eq!(sink.field("ff.hdr.opts.pad_len").unwrap().value, Value::Uint(2));
    assert_eq!(sink.field("ff.padding").unwrap().range, 12..14);

    let trailer = sink.group("Message Trailer").unwrap();
    let trailer_fields = direct_fields(trailer);
    assert_eq!(trailer_fields.len(), 1);
    assert_eq!(trailer_fields[0].field.abbrev, "ff.trailer.msg_num");
    assert_eq!(trailer_fields[0].value, Value::Uint(7));
    assert!(sink.diagnostics().next().is_none());
}

#[test]
fn length_shorter_than_trailer_is_invalid() {
    let mut data = message(0x80, FDA | REQUEST, CONFIRMED | 2, 0, &[], &[0, 0, 0, 1]);
    data[8..12].copy_from_slice(&14u32.to_be_bytes());

    let (label, sink) = decode(&data);
    assert_eq!(label, None);
    let diagnostic = sink.diagnostics().next().unwrap();
    assert_eq!(diagnostic.kind, DiagnosticKind::MalformedLength);
    assert!(matches!(diagnostic.error, Error::LengthInvalid { found: 14, .. }));
}

#[test]
fn buffer_shorter_than_header_fails() {
    let mut sink = Recorder::new();
    assert!(ff::decode(&[1, 0, 4, 0x81, 0], &mut sink).is_err());
    assert_eq!(sink.diagnostics().count(), 1);
}

#[test]
fn stream_walks_messages_and_reports_partial_tail() {
    let mut data = message(0, FDA | REQUEST, CONFIRMED | 2, 0, &[], &[]);
    data.extend(message(0, FDA | REQUEST, CONFIRMED | 1, 0, &open_session_body(), &[]));
    let complete = data.len();
    data.extend_from_slice(&[1, 0, 4, 0x81, 0]);

    let mut sink = Recorder::new();
    let summaries = ff::decode_stream(&data, &mut sink);

    let labels: Vec<_> = summaries.iter().map(|s| s.label).collect();
    assert_eq!(labels, [Some("FDA Idle Request"), Some("FDA Open Session Request")]);
    assert_eq!(sink.groups("Message Header").len(), 2);

    let diagnostics: Vec<_> = sink.diagnostics().collect();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].range, complete..data.len());
    assert_eq!(
        diagnostics[0].error,
        Error::Truncated {
            requested: HEADER_LEN,
            available: 5
        }
    );

    let pd_tag = sink
        .fields()
        .find(|f| f.field.abbrev == "ff.pd_tag")
        .unwrap();
    assert_eq!(pd_tag.range, 12 + 32..12 + 64);
}
