//! The fixed message header and the optional trailer.

use tartan_bitfield::bitfield;
use zerocopy::FromBytes;

use crate::{
    error::Error,
    reader::Reader,
    sink::{Field, FieldSink, Kind},
};

use super::{
    dispatch::ServiceKey,
    tables::{confirmed, msg_type, protocol},
};

/// Length of the fixed header.
pub const HEADER_LEN: usize = 12;

bitfield! {
    /// Which trailer fields follow the body, and how much padding.
    pub struct Options(u8) {
        [7] pub message_number,
        [6] pub invoke_id,
        [5] pub time_stamp,
        [4] pub reserved,
        [3] pub extended_control,
        [0..3] pub pad_length: u8,
    }
}

bitfield! {
    struct ProtocolAndType(u8) {
        [2..8] protocol: u8,
        [0..2] kind: u8,
    }
}

bitfield! {
    struct Service(u8) {
        [7] confirmed,
        [0..7] id: u8,
    }
}

#[repr(C, packed)]
#[derive(FromBytes)]
struct RawHeader {
    version: u8,
    options: u8,
    protocol_and_type: u8,
    service: u8,
    fda_address: [u8; 4],
    length: [u8; 4],
}

/// A decoded message header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub version: u8,
    options: u8,
    pub protocol_and_type: u8,
    pub service: u8,
    pub fda_address: u32,
    /// Length of the whole message, header and trailer included.
    pub length: u32,
}

impl Header {
    pub fn parse(r: [u8; HEADER_LEN]) -> Self {
        let RawHeader {
            version,
            options,
            protocol_and_type,
            service,
            fda_address,
            length,
        } = zerocopy::transmute!(r);

        Self {
            version,
            options,
            protocol_and_type,
            service,
            fda_address: u32::from_be_bytes(fda_address),
            length: u32::from_be_bytes(length),
        }
    }

    pub fn options(&self) -> Options {
        Options(self.options)
    }

    /// The dispatch key selecting the body's decode routine.
    pub fn key(&self) -> ServiceKey {
        let pt = ProtocolAndType(self.protocol_and_type);
        let service = Service(self.service);

        ServiceKey {
            protocol: pt.protocol(),
            kind: pt.kind(),
            confirmed: service.confirmed(),
            service: service.id(),
        }
    }

    pub fn pad_len(&self) -> usize {
        self.options().pad_length().into()
    }

    /// Combined size of the trailer fields flagged present.
    pub fn trailer_len(&self) -> usize {
        let options = self.options();
        [
            (options.message_number(), 4),
            (options.invoke_id(), 4),
            (options.time_stamp(), 8),
            (options.extended_control(), 4),
        ]
        .iter()
        .filter(|(present, _)| *present)
        .map(|(_, n)| n)
        .sum()
    }

    /// Length of the service body, if the message length leaves room for
    /// one.
    pub fn body_len(&self) -> Option<usize> {
        (self.length as usize)
            .checked_sub(HEADER_LEN)?
            .checked_sub(self.pad_len())?
            .checked_sub(self.trailer_len())
    }
}

static VERSION: Field = Field::new("FDA Message Version", "ff.hdr.ver", Kind::U8);

static OPTIONS: Field = Field::new("Options", "ff.hdr.opts", Kind::U8);
static OPT_MSG_NUM: Field =
    Field::new("Message Number Present", "ff.hdr.opts.msg_num", Kind::Bool).mask(0x80);
static OPT_INVOKE_ID: Field =
    Field::new("Invoke Id Present", "ff.hdr.opts.invoke_id", Kind::Bool).mask(0x40);
static OPT_TIMESTAMP: Field =
    Field::new("Time Stamp Present", "ff.hdr.opts.timestamp", Kind::Bool).mask(0x20);
static OPT_RESERVED: Field =
    Field::new("Reserved", "ff.hdr.opts.reserved", Kind::Bool).mask(0x10);
static OPT_EXT_CTRL: Field =
    Field::new("Extended Control Field Present", "ff.hdr.opts.ext_ctrl", Kind::Bool).mask(0x08);
static OPT_PAD_LEN: Field =
    Field::new("Pad Length", "ff.hdr.opts.pad_len", Kind::U8).mask(0x07);

static PROTO_AND_TYPE: Field = Field::new("Protocol And Type", "ff.hdr.proto_and_type", Kind::U8);
static PROTOCOL: Field = Field::new("Protocol Id", "ff.hdr.proto_and_type.proto", Kind::U8)
    .mask(0xFC)
    .strings(protocol);
static MSG_TYPE: Field = Field::new("Confirmed Msg Type", "ff.hdr.proto_and_type.msg_type", Kind::U8)
    .mask(0x03)
    .strings(msg_type);

static SERVICE: Field = Field::new("Service", "ff.hdr.srv", Kind::U8);
static CONFIRMED: Field = Field::new("Confirmed Flag", "ff.hdr.srv.confirm_flag", Kind::U8)
    .mask(0x80)
    .strings(confirmed);
static SERVICE_ID: Field = Field::new("Service Id", "ff.hdr.srv.id", Kind::U8).mask(0x7F);

static FDA_ADDRESS: Field = Field::new("FDA Address", "ff.hdr.fda_addr", Kind::U32);
static LENGTH: Field = Field::new("Message Length", "ff.hdr.len", Kind::U32);

/// Publish the header fields.
pub fn dissect<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u8(&VERSION)?;
    r.bitmask(
        &OPTIONS,
        &[
            &OPT_MSG_NUM,
            &OPT_INVOKE_ID,
            &OPT_TIMESTAMP,
            &OPT_RESERVED,
            &OPT_EXT_CTRL,
            &OPT_PAD_LEN,
        ],
    )?;
    r.bitmask(&PROTO_AND_TYPE, &[&PROTOCOL, &MSG_TYPE])?;
    r.bitmask(&SERVICE, &[&CONFIRMED, &SERVICE_ID])?;
    r.u32(&FDA_ADDRESS)?;
    r.u32(&LENGTH)?;
    Ok(())
}

static MSG_NUM: Field = Field::new("Message Number", "ff.trailer.msg_num", Kind::U32);
static INVOKE_ID: Field = Field::new("Invoke Id", "ff.trailer.invoke_id", Kind::U32);
static TIME_STAMP: Field = Field::new("Time Stamp", "ff.trailer.time_stamp", Kind::U64);
static EXT_CTRL: Field =
    Field::new("Extended Control Field", "ff.trailer.ext_ctrl_field", Kind::U32);

/// Publish the trailer fields flagged present in `options`.
pub fn dissect_trailer<S: FieldSink + ?Sized>(
    r: &mut Reader<'_, '_, S>,
    options: Options,
) -> Result<(), Error> {
    if options.message_number() {
        r.u32(&MSG_NUM)?;
    }
    if options.invoke_id() {
        r.u32(&INVOKE_ID)?;
    }
    if options.time_stamp() {
        r.uint(&TIME_STAMP)?;
    }
    if options.extended_control() {
        r.u32(&EXT_CTRL)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(options: u8, length: u32) -> Header {
        let mut r = [0u8; HEADER_LEN];
        r[0] = 1;
        r[1] = options;
        r[2] = 2 << 2 | 1;
        r[3] = 0x80 | 3;
        r[4..8].copy_from_slice(&0x0001_0002u32.to_be_bytes());
        r[8..12].copy_from_slice(&length.to_be_bytes());
        Header::parse(r)
    }

    #[test]
    fn parses_big_endian_header() {
        let h = header(0, 40);
        assert_eq!(h.version, 1);
        assert_eq!(h.fda_address, 0x0001_0002);
        assert_eq!(h.length, 40);

        let key = h.key();
        assert_eq!(key.protocol, 2);
        assert_eq!(key.kind, 1);
        assert!(key.confirmed);
        assert_eq!(key.service, 3);
        assert_eq!(key.discriminant(), 0x0983);
    }

    #[test]
    fn trailer_sizes_follow_options() {
        assert_eq!(header(0x00, 12).trailer_len(), 0);
        assert_eq!(header(0x80, 12).trailer_len(), 4);
        assert_eq!(header(0xE8, 12).trailer_len(), 20);
        assert_eq!(header(0x20, 12).trailer_len(), 8);
        // The reserved bit adds nothing.
        assert_eq!(header(0x10, 12).trailer_len(), 0);
    }

    #[test]
    fn body_length_subtracts_pad_and_trailer() {
        assert_eq!(header(0x83, 40).body_len(), Some(40 - 12 - 3 - 4));
        assert_eq!(header(0x00, 12).body_len(), Some(0));
        assert_eq!(header(0x00, 11).body_len(), None);
        assert_eq!(header(0xE8, 30).body_len(), None);
    }

    #[test]
    fn options_round_trip_every_byte() {
        for b in 0..=u8::MAX {
            let o = Options(b);
            let rebuilt = u8::from(o.message_number()) << 7
                | u8::from(o.invoke_id()) << 6
                | u8::from(o.time_stamp()) << 5
                | u8::from(o.reserved()) << 4
                | u8::from(o.extended_control()) << 3
                | o.pad_length();
            assert_eq!(rebuilt, b);
        }
    }

    #[test]
    fn protocol_and_service_round_trip_every_byte() {
        for b in 0..=u8::MAX {
            let pt = ProtocolAndType(b);
            assert_eq!(pt.protocol() << 2 | pt.kind(), b);

            let s = Service(b);
            assert_eq!(u8::from(s.confirmed()) << 7 | s.id(), b);
        }
    }
}
