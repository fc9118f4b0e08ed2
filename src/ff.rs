//! Foundation Fieldbus High Speed Ethernet messages.
//!
//! A message is a fixed 12-byte big-endian [`Header`], a service body
//! selected by the header's protocol, message type and service id, optional
//! padding, and a trailer holding whichever of the message number, invoke
//! id, time stamp and extended control fields the header flags present.
//!
//! [`decode`] takes one complete message: a UDP datagram, or a TCP message
//! already split off with [`framing::split_pdu`]. [`decode_stream`] walks
//! a TCP byte stream message by message.

use alloc::vec::Vec;

use either::Either::{Left, Right};
use tracing::{debug, trace};

use crate::{
    cursor::{Cursor, Endian},
    error::{Error, LengthRule},
    reader::Reader,
    sink::{Diagnostic, Field, FieldSink, Kind},
};

pub mod common;
pub mod dispatch;
pub mod fda;
pub mod fms;
pub mod framing;
pub mod header;
pub mod lan;
pub mod sm;
pub mod tables;

pub use dispatch::{MsgType, Protocol, ServiceKey};
pub use header::{HEADER_LEN, Header};

/// UDP ports messages are exchanged on.
pub const UDP_PORTS: [u16; 4] = [1089, 1090, 1091, 3622];

/// TCP ports messages are exchanged on.
pub const TCP_PORTS: [u16; 3] = [1089, 1090, 1091];

static PADDING: Field = Field::new("Padding", "ff.padding", Kind::Bytes);

/// What a decoded message turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub header: Header,
    /// Label of the service body, e.g. `"FDA Open Session Request"`.
    /// `None` if the body was not decoded or matched no service.
    pub label: Option<&'static str>,
}

impl Summary {
    pub fn key(&self) -> ServiceKey {
        self.header.key()
    }
}

/// Decode one complete message.
///
/// Returns an error only if the buffer cannot hold a header. Any other
/// malformation is reported to the sink as a diagnostic.
pub fn decode<S: FieldSink + ?Sized>(buf: &[u8], sink: &mut S) -> Result<Summary, Error> {
    decode_at(Cursor::new(buf), sink)
}

fn decode_at<S: FieldSink + ?Sized>(cursor: Cursor<'_>, sink: &mut S) -> Result<Summary, Error> {
    let mut r = Reader::new(cursor, sink, Endian::Big);

    let raw = match r.cursor().clone().array::<HEADER_LEN>() {
        Ok(raw) => raw,
        Err(error) => {
            r.report_rest(error.clone());
            return Err(error);
        }
    };
    let header = Header::parse(raw);
    r.group("Message Header", HEADER_LEN, header::dissect)?;

    let key = header.key();
    trace!(
        protocol = key.protocol,
        service = key.service,
        length = header.length,
        "decoding message"
    );

    let mut summary = Summary {
        header,
        label: None,
    };

    let Some(len) = header.body_len() else {
        let minimum = HEADER_LEN + header.pad_len() + header.trailer_len();
        r.report_rest(Error::LengthInvalid {
            found: header.length as usize,
            expected: LengthRule::AtLeast(minimum),
        });
        return Ok(summary);
    };

    let available = r.remaining();
    if len > available {
        debug!(len, available, "message body truncated");
        r.report_rest(Error::Truncated {
            requested: len,
            available,
        });
        return Ok(summary);
    }

    summary.label = dispatch::dissect(&mut r, &header, len)?;

    if let Err(error) = dissect_tail(&mut r, &header) {
        r.report_rest(error);
        return Ok(summary);
    }

    r.unknown_tail();
    Ok(summary)
}

/// Decode the padding and trailer following a body.
fn dissect_tail<S: FieldSink + ?Sized>(
    r: &mut Reader<'_, '_, S>,
    header: &Header,
) -> Result<(), Error> {
    let pad = header.pad_len();
    if pad > 0 {
        r.bytes(&PADDING, pad)?;
    }

    let trailer = header.trailer_len();
    if trailer > 0 {
        let options = header.options();
        r.group("Message Trailer", trailer, |r| {
            header::dissect_trailer(r, options)
        })?;
    }

    Ok(())
}

/// Decode every message of a TCP byte stream.
///
/// Returns a summary per message decoded. A partial message at the end of
/// the stream is reported as truncated.
pub fn decode_stream<S: FieldSink + ?Sized>(buf: &[u8], sink: &mut S) -> Vec<Summary> {
    let mut cursor = Cursor::new(buf);
    let mut summaries = Vec::new();

    while !cursor.at_end() {
        let start = cursor.offset();
        match framing::split_pdu(cursor.clone().rest()) {
            Left((pdu, _)) => {
                let Ok(pdu) = cursor.split(pdu.len()) else {
                    break;
                };
                if let Ok(summary) = decode_at(pdu, &mut *sink) {
                    summaries.push(summary);
                }
            }
            Right(needed) => {
                let error = Error::Truncated {
                    requested: needed,
                    available: cursor.remaining(),
                };
                debug!(%error, start, "partial message at end of stream");
                sink.diagnostic(Diagnostic::new(start..cursor.end(), error));
                break;
            }
        }
    }

    summaries
}
