//! Selection of the decode routine for a message body.

use tracing::{debug, trace};

use crate::{
    error::Error,
    reader::Reader,
    sink::{Field, FieldSink, Kind},
};

use super::{fda, fms, header::Header, lan, sm, tables};

/// A protocol of the HSE family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Fda = 1,
    Sm = 2,
    Fms = 3,
    Lan = 4,
}

impl Protocol {
    pub fn from_id(id: u8) -> Option<Self> {
        Some(match id {
            1 => Self::Fda,
            2 => Self::Sm,
            3 => Self::Fms,
            4 => Self::Lan,
            _ => return None,
        })
    }

    /// Filter abbreviation of the protocol.
    pub fn abbrev(self) -> &'static str {
        match self {
            Self::Fda => "fda",
            Self::Sm => "sm",
            Self::Fms => "fms",
            Self::Lan => "lr",
        }
    }
}

/// Whether a body is a request, a response or an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsgType {
    Request = 0,
    Response = 1,
    Error = 2,
}

impl MsgType {
    pub fn from_id(id: u8) -> Option<Self> {
        Some(match id {
            0 => Self::Request,
            1 => Self::Response,
            2 => Self::Error,
            _ => return None,
        })
    }

    pub fn abbrev(self) -> &'static str {
        match self {
            Self::Request => "req",
            Self::Response => "rsp",
            Self::Error => "err",
        }
    }
}

/// The discriminant of a message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceKey {
    /// Protocol identifier, six bits.
    pub protocol: u8,
    /// Confirmed message type, two bits.
    pub kind: u8,
    pub confirmed: bool,
    /// Service identifier, seven bits.
    pub service: u8,
}

impl ServiceKey {
    /// The header's protocol-and-type and service bytes, as one word.
    pub fn discriminant(&self) -> u16 {
        u16::from(self.protocol) << 10
            | u16::from(self.kind) << 8
            | u16::from(self.confirmed) << 7
            | u16::from(self.service)
    }

    pub fn protocol(&self) -> Option<Protocol> {
        Protocol::from_id(self.protocol)
    }

    pub fn msg_type(&self) -> Option<MsgType> {
        MsgType::from_id(self.kind)
    }
}

/// Where and how a selected routine decodes its body.
pub struct Leaf<'h> {
    pub header: &'h Header,
    pub msg_type: MsgType,
    pub len: usize,
    pub path: [&'static str; 3],
}

impl Leaf<'_> {
    /// Decode the body as a group, returning its label.
    pub fn run<'a, S, F>(
        &self,
        r: &mut Reader<'a, '_, S>,
        label: &'static str,
        f: F,
    ) -> Result<Option<&'static str>, Error>
    where
        S: FieldSink + ?Sized,
        F: FnOnce(&mut Reader<'a, '_, S>) -> Result<(), Error>,
    {
        trace!(label, len = self.len, "decoding service body");
        r.group_at(label, &self.path, self.len, f)?;
        Ok(Some(label))
    }

    /// Pick the label and routine matching the message type.
    pub fn by_type<'a, S, Q, P, E>(
        &self,
        r: &mut Reader<'a, '_, S>,
        labels: [&'static str; 3],
        req: Q,
        rsp: P,
        err: E,
    ) -> Result<Option<&'static str>, Error>
    where
        S: FieldSink + ?Sized,
        Q: FnOnce(&mut Reader<'a, '_, S>) -> Result<(), Error>,
        P: FnOnce(&mut Reader<'a, '_, S>) -> Result<(), Error>,
        E: FnOnce(&mut Reader<'a, '_, S>) -> Result<(), Error>,
    {
        let [lq, lp, le] = labels;
        match self.msg_type {
            MsgType::Request => self.run(r, lq, req),
            MsgType::Response => self.run(r, lp, rsp),
            MsgType::Error => self.run(r, le, err),
        }
    }
}

pub static UNKNOWN_SERVICE: Field = Field::new("Unknown Service", "ff.unknown_service", Kind::Bytes);

/// Decode a body of `len` bytes selected by the header's service key.
///
/// Returns the label of the routine chosen, or `None` if no routine
/// matches, in which case the body is published as one unknown field.
pub fn dissect<S: FieldSink + ?Sized>(
    r: &mut Reader<'_, '_, S>,
    header: &Header,
    len: usize,
) -> Result<Option<&'static str>, Error> {
    let key = header.key();
    let selected = match (key.protocol(), key.msg_type()) {
        (Some(protocol), Some(msg_type)) if key.confirmed || msg_type == MsgType::Request => {
            let service = tables::services(protocol, key.confirmed)
                .iter()
                .find(|(id, ..)| *id == key.service)
                .map_or("unknown", |(_, _, abbrev)| *abbrev);
            let leaf = Leaf {
                header,
                msg_type,
                len,
                path: [protocol.abbrev(), service, msg_type.abbrev()],
            };

            match protocol {
                Protocol::Fda => fda::dissect(r, &key, &leaf)?,
                Protocol::Sm => sm::dissect(r, &key, &leaf)?,
                Protocol::Fms => fms::dissect(r, &key, &leaf)?,
                Protocol::Lan => lan::dissect(r, &key, &leaf)?,
            }
        }
        _ => None,
    };

    if selected.is_none() {
        debug!(discriminant = key.discriminant(), len, "unknown service");
        r.bytes(&UNKNOWN_SERVICE, len)?;
    }

    Ok(selected)
}
