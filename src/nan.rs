//! Wi-Fi Neighbor Awareness Networking attributes.
//!
//! NAN information travels as a flat run of little-endian attributes inside
//! beacons, service discovery frames and NAN action frames. The frame
//! carrying the attributes delimits them: every entry point here decodes
//! attributes until its buffer is exhausted.
//!
//! Attributes embedding IEEE 802.11 elements hand those elements to an
//! [`ElementDecoder`]. The plain entry points use [`RawElements`], and the
//! `*_with` variants accept any decoder.

use tracing::debug;

use crate::{
    cursor::{Cursor, Endian},
    error::Error,
    reader::Reader,
    sink::{Field, FieldSink, Kind, Value},
};

pub mod attribute;
pub mod channel;
pub mod container;
pub mod datapath;
pub mod discovery;
pub mod infra;
pub mod schedule;
pub mod security;
pub mod tables;

pub use channel::{ChannelSet, Channels, channel_set};
pub use container::{ElementDecoder, RawElements};
pub use schedule::{BandChannelEntries, UnalignedShape};

/// The Wi-Fi Alliance OUI.
pub const WFA_OUI: [u8; 3] = [0x50, 0x6F, 0x9A];

/// OUI type of NAN action frames.
pub const ACTION_OUI_TYPE: u8 = 0x18;

/// OUI type of NAN service discovery frames.
pub const SERVICE_DISCOVERY_OUI_TYPE: u8 = 0x13;

/// OUI type of the NAN information element in beacons.
pub const IE_OUI_TYPE: u8 = 0x13;

/// Beacon interval of discovery beacons, in TU.
pub const DISCOVERY_BEACON_INTERVAL: u16 = 100;

/// Beacon interval of synchronization beacons, in TU.
pub const SYNC_BEACON_INTERVAL: u16 = 512;

/// The kind of a NAN beacon, told apart by its interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeaconType {
    Discovery,
    Sync,
}

impl BeaconType {
    pub fn from_interval(interval: u16) -> Option<Self> {
        Some(match interval {
            DISCOVERY_BEACON_INTERVAL => Self::Discovery,
            SYNC_BEACON_INTERVAL => Self::Sync,
            _ => return None,
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Discovery => "Discovery Beacon",
            Self::Sync => "Sync Beacon",
        }
    }
}

static BEACON_TYPE: Field = Field::new("Beacon Type", "wifi_nan.beacon.type", Kind::None);
static ACTION_SUBTYPE: Field =
    Field::new("Subtype", "wifi_nan.action.subtype", Kind::U8).strings(tables::action_subtype);

fn reader<'a, 's, S: FieldSink + ?Sized>(buf: &'a [u8], sink: &'s mut S) -> Reader<'a, 's, S> {
    Reader::new(Cursor::new(buf), sink, Endian::Little)
}

/// Decode a bare attribute stream.
pub fn decode_attributes<S: FieldSink + ?Sized>(buf: &[u8], sink: &mut S) {
    decode_attributes_with(buf, sink, &mut RawElements)
}

pub fn decode_attributes_with<S, D>(buf: &[u8], sink: &mut S, elements: &mut D)
where
    S: FieldSink + ?Sized,
    D: ElementDecoder + ?Sized,
{
    attribute::dissect(&mut reader(buf, sink), elements);
}

/// Decode the attributes of a NAN beacon's information element.
///
/// The beacon interval of the carrying frame tells discovery and
/// synchronization beacons apart. Any other interval is reported, and the
/// attributes are decoded regardless.
pub fn decode_beacon<S: FieldSink + ?Sized>(buf: &[u8], beacon_interval: u16, sink: &mut S) {
    decode_beacon_with(buf, beacon_interval, sink, &mut RawElements)
}

pub fn decode_beacon_with<S, D>(buf: &[u8], beacon_interval: u16, sink: &mut S, elements: &mut D)
where
    S: FieldSink + ?Sized,
    D: ElementDecoder + ?Sized,
{
    let mut r = reader(buf, sink);

    match BeaconType::from_interval(beacon_interval) {
        Some(kind) => {
            let start = r.offset();
            r.emit(&BEACON_TYPE, start, &[], Value::None, Some(kind.label()));
        }
        None => {
            debug!(beacon_interval, "unknown beacon type");
            let start = r.offset();
            r.report(start..start, Error::UnknownBeaconType(beacon_interval));
        }
    }

    attribute::dissect(&mut r, elements);
}

/// Decode the body of a NAN action frame: a subtype, then attributes.
pub fn decode_action<S: FieldSink + ?Sized>(buf: &[u8], sink: &mut S) {
    decode_action_with(buf, sink, &mut RawElements)
}

pub fn decode_action_with<S, D>(buf: &[u8], sink: &mut S, elements: &mut D)
where
    S: FieldSink + ?Sized,
    D: ElementDecoder + ?Sized,
{
    let mut r = reader(buf, sink);

    if let Err(error) = r.u8(&ACTION_SUBTYPE) {
        r.report_rest(error);
        return;
    }

    attribute::dissect(&mut r, elements);
}

/// Decode the attributes of a NAN service discovery frame.
pub fn decode_service_discovery<S: FieldSink + ?Sized>(buf: &[u8], sink: &mut S) {
    decode_service_discovery_with(buf, sink, &mut RawElements)
}

pub fn decode_service_discovery_with<S, D>(buf: &[u8], sink: &mut S, elements: &mut D)
where
    S: FieldSink + ?Sized,
    D: ElementDecoder + ?Sized,
{
    attribute::dissect(&mut reader(buf, sink), elements);
}
