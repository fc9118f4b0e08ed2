use fieldwire::{
    DiagnosticKind, Error, LengthRule,
    nan::{self, ElementDecoder, RawElements},
    reader::Reader,
    sink::{
        Event, Field, FieldSink, Kind, Recorder, Value,
        recorder::{direct_fields, fields},
    },
};

/// An availability attribute with one committed entry of three channel
/// entries: operating classes 115, 81 and 124.
const AVAILABILITY: &[u8] = &[
    0x12, 0x14, 0x00, 0x01, 0x01, 0x00, 0x0F, 0x00, 0x01, 0x00, 0x31, 0x73, 0x05, 0x00, 0x01, 0x51,
    0x01, 0x00, 0x00, 0x7C, 0x0F, 0x00, 0x00,
];

fn decode(data: &[u8]) -> Recorder {
    let mut sink = Recorder::new();
    nan::decode_attributes(data, &mut sink);
    sink
}

fn group_ranges(sink: &Recorder, label: &str) -> Vec<core::ops::Range<usize>> {
    sink.events
        .iter()
        .filter_map(|e| match e {
            Event::Enter { label: l, range, .. } if *l == label => Some(range.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn master_indication() {
    let sink = decode(&[0x00, 0x02, 0x00, 0x80, 0x10]);

    let group = sink.group("Master Indication Attribute").unwrap();
    let values: Vec<_> = direct_fields(group)
        .into_iter()
        .filter(|f| !f.field.abbrev.starts_with("wifi_nan.attribute."))
        .map(|f| (f.field.abbrev, f.value.clone()))
        .collect();
    assert_eq!(
        values,
        [
            ("wifi_nan.master_indication.preference", Value::Uint(0x80)),
            ("wifi_nan.master_indication.random_factor", Value::Uint(0x10)),
        ]
    );
    assert!(sink.field("fieldwire.unknown").is_none());
    assert!(sink.diagnostics().next().is_none());
}

#[test]
fn service_id_list_of_invalid_length() {
    let mut data = vec![0x02, 0x0D, 0x00];
    data.extend(1..=13);
    data.extend_from_slice(&[0x0B, 0x02, 0x00, b'U', b'S']);

    let sink = decode(&data);

    let diagnostics: Vec<_> = sink.diagnostics().collect();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::MalformedLength);
    assert_eq!(diagnostics[0].range, 3..16);
    assert_eq!(
        diagnostics[0].error,
        Error::LengthInvalid {
            found: 13,
            expected: LengthRule::MultipleOf(6)
        }
    );
    assert!(sink.field("wifi_nan.service_id").is_none());

    let country = sink.field("wifi_nan.country_code").unwrap();
    assert_eq!(country.range, 19..21);
    assert_eq!(country.value, Value::String("US".into()));
}

#[test]
fn availability_channel_entries() {
    let sink = decode(AVAILABILITY);
    assert!(sink.diagnostics().next().is_none());

    assert_eq!(group_ranges(&sink, "Channel Entry"), [11..15, 15..19, 19..23]);

    assert_eq!(sink.field("wifi_nan.band_channel.ctrl.num_entries").unwrap().value, Value::Uint(3));
    assert_eq!(sink.field("wifi_nan.band_channel.ctrl.non_contiguous_bw").unwrap().value, Value::Bool(false));

    let sets: Vec<Vec<u8>> = sink
        .fields()
        .filter_map(|f| match &f.value {
            Value::Channels(channels) => Some(channels.to_vec()),
            _ => None,
        })
        .collect();
    assert_eq!(sets, [vec![36, 44], vec![1], vec![149, 153, 157, 161]]);
}

#[test]
fn unknown_operating_class_ends_the_entry_list() {
    let mut data = AVAILABILITY.to_vec();
    data[15] = 0;

    let sink = decode(&data);

    let diagnostics: Vec<_> = sink.diagnostics().collect();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::UnknownOperatingClass);
    assert_eq!(diagnostics[0].range, 19..23);
    assert_eq!(sink.groups("Channel Entry").len(), 2);
}

#[test]
fn malformed_attributes_do_not_shift_their_siblings() {
    let mut data = vec![0x00, 0x02, 0x00, 0x80, 0x10];
    data.extend_from_slice(&[0x03, 0x0C, 0x00, 1, 2, 3, 4, 5, 6, 0x01, 0x00, 0x04, 0x20, 0xAA, 0xBB]);
    data.extend_from_slice(&[0x30, 0x02, 0x00, 0x01, 0x02]);
    data.extend_from_slice(&[0x0B, 0x02, 0x00, b'J', b'P']);
    data.extend_from_slice(&[0x04, 0x02, 0x00, 0x01, 0x00]);

    let sink = decode(&data);

    let diagnostics: Vec<_> = sink.diagnostics().collect();
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::MalformedLength);
    assert_eq!(diagnostics[0].range, 18..20);
    assert_eq!(diagnostics[1].kind, DiagnosticKind::UnknownAttributeId);
    assert_eq!(diagnostics[1].range, 23..25);
    assert_eq!(group_ranges(&sink, "Unknown attribute ID (48)"), [20..25]);

    assert_eq!(sink.field("wifi_nan.master_indication.preference").unwrap().value, Value::Uint(0x80));
    assert_eq!(sink.field("wifi_nan.country_code").unwrap().range, 28..30);
    assert_eq!(sink.field("wifi_nan.conn_cap.wfd").unwrap().value, Value::Bool(true));

    let types: Vec<_> = sink
        .fields()
        .filter(|f| f.field.abbrev == "wifi_nan.attribute.type")
        .map(|f| f.range.start)
        .collect();
    assert_eq!(types, [0, 5, 20, 25, 30]);
}

#[test]
fn ndp_extension_tlvs() {
    let mut data = vec![0x28, 27, 0x00];
    data.extend_from_slice(&[0x07, 0x01, 0x00, 2, 0, 0, 0, 0, 9, 0x01, 0x00]);
    data.extend_from_slice(&[0x00, 0x08, 0x00, 0x12, 0x34, 0, 0, 0, 0, 0, 0x01]);
    data.extend_from_slice(&[0x05, 0x02, 0x00, 0xCA, 0xFE]);

    let sink = decode(&data);
    assert!(sink.diagnostics().next().is_none());

    let link_local = sink.group("IPv6 Link Local").unwrap();
    let fields = direct_fields(link_local);
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].range, 17..25);

    let value = sink.field("wifi_nan.ndpe.tlv.value").unwrap();
    assert_eq!(&value.raw[..], &[0xCA, 0xFE]);
    assert_eq!(sink.field("wifi_nan.ndp.id").unwrap().value, Value::Uint(1));
}

#[test]
fn service_discovery_extension() {
    let data = [
        0x0E, 15, 0x00, 0x07, 0x00, 0x03, 0x10, 0x00, 0x20, 0x00, 0x02, 0x05, 0x00, 0x50, 0x6F,
        0x9A, 0x02, 0x42,
    ];

    let mut sink = Recorder::new();
    nan::decode_service_discovery(&data, &mut sink);
    assert!(sink.diagnostics().next().is_none());

    assert_eq!(sink.field("wifi_nan.sdea.ctrl.range_limit").unwrap().value, Value::Bool(true));
    assert_eq!(sink.field("wifi_nan.sdea.ingress_range_limit").unwrap().value, Value::Uint(16));
    assert_eq!(sink.field("wifi_nan.sdea.egress_range_limit").unwrap().value, Value::Uint(32));
    assert_eq!(sink.field("wifi_nan.sdea.service_update_indicator").unwrap().value, Value::Uint(2));
    assert_eq!(sink.field("wifi_nan.sdea.service_info.oui").unwrap().value, Value::Uint(0x506F9A));

    let info = sink.group("Service Info").unwrap();
    let specific = fields(info)
        .find(|f| f.field.abbrev == "wifi_nan.sdea.service_info.specific_info")
        .unwrap();
    assert_eq!(&specific.raw[..], &[0x42]);
}

static SSID: Field = Field::new("SSID", "test.ssid", Kind::String);
static VENDOR: Field = Field::new("Vendor Body", "test.vendor", Kind::Bytes);

#[derive(Default)]
struct Elements {
    seen: Vec<u8>,
}

impl ElementDecoder for Elements {
    fn decode<S: FieldSink + ?Sized>(&mut self, id: u8, r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
        self.seen.push(id);
        match id {
            0 => {
                let len = r.remaining();
                r.string(&SSID, len)
            }
            nan::container::VENDOR_SPECIFIC_ELEMENT_ID => {
                r.rest(&VENDOR);
                Ok(())
            }
            _ => RawElements.decode(id, r),
        }
    }
}

#[test]
fn embedded_elements_reach_the_decoder() {
    let mut data = vec![0x0D];
    data.extend_from_slice(&[0x1C, 0x09, 0x00, 0x01, 0x00, 0x03, b'n', b'a', b'n', 0x2D, 0x01, 0xEE]);
    data.extend_from_slice(&[0xDD, 0x05, 0x00, 0x00, 0x10, 0x18, 0x01, 0x02]);

    let mut sink = Recorder::new();
    let mut elements = Elements::default();
    nan::decode_action_with(&data, &mut sink, &mut elements);

    assert_eq!(elements.seen, [0x00, 0x2D, 0xDD]);
    assert!(sink.diagnostics().next().is_none());
    assert_eq!(sink.field("test.ssid").unwrap().value, Value::String("nan".into()));
    assert_eq!(&sink.field("wifi_nan.element.data").unwrap().raw[..], &[0xEE]);
    assert_eq!(sink.field("wifi_nan.vendor.oui").unwrap().value, Value::Uint(0x001018));
    assert_eq!(&sink.field("test.vendor").unwrap().raw[..], &[0x01, 0x02]);
}

#[test]
fn raw_elements_by_default() {
    let data = [0x1C, 0x05, 0x00, 0x01, 0x00, 0x02, b'h', b'i'];
    let sink = decode(&data);

    assert_eq!(sink.groups("Element").len(), 1);
    let raw = sink.field("wifi_nan.element.data").unwrap();
    assert_eq!(raw.range, 6..8);
}

#[test]
fn discovery_beacon() {
    let mut sink = Recorder::new();
    nan::decode_beacon(&[0x00, 0x02, 0x00, 0x80, 0x10], nan::DISCOVERY_BEACON_INTERVAL, &mut sink);

    let kind = sink.field("wifi_nan.beacon.type").unwrap();
    assert_eq!(kind.label, Some("Discovery Beacon"));
    assert_eq!(kind.range, 0..0);
    assert!(sink.field("wifi_nan.master_indication.preference").is_some());
}

#[test]
fn unknown_beacon_still_decodes_attributes() {
    let mut sink = Recorder::new();
    nan::decode_beacon(&[0x0B, 0x02, 0x00, b'D', b'E'], 200, &mut sink);

    let diagnostic = sink.diagnostics().next().unwrap();
    assert_eq!(diagnostic.kind, DiagnosticKind::UnknownBeaconType);
    assert_eq!(diagnostic.error, Error::UnknownBeaconType(200));
    assert_eq!(sink.field("wifi_nan.country_code").unwrap().value, Value::String("DE".into()));
}
