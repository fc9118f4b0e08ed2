//! The attribute stream: type, length and value records filling a region.
//!
//! Each attribute is decoded as a group spanning its declared length, so an
//! attribute whose content is malformed never shifts the attributes after
//! it. Only a length running past the region stops the stream.

use tracing::{debug, trace};

use crate::{
    cursor::Endian,
    error::{Error, LengthRule},
    reader::Reader,
    sink::{Field, FieldSink, Kind},
};

use super::{
    container::{self, ElementDecoder},
    datapath, discovery, infra, schedule, security,
    tables::{attribute, attribute_code},
};

/// Size of an attribute's identifier and length.
pub const HEADER_LEN: usize = 3;

pub static ATTRIBUTE_TYPE: Field =
    Field::new("Attribute Type", "wifi_nan.attribute.type", Kind::U8).strings(attribute_code);
pub static ATTRIBUTE_LEN: Field = Field::new("Attribute Length", "wifi_nan.attribute.len", Kind::U16);

/// The length an attribute's value must have, if it is constrained.
pub fn length_rule(id: u8) -> Option<LengthRule> {
    use LengthRule::*;

    Some(match id {
        0x00 => Exact(2),
        0x01 => Exact(13),
        0x02 | 0x27 => MultipleOf(discovery::SERVICE_ID_LEN),
        0x03 => AtLeast(9),
        0x04 => Exact(2),
        0x05 => AtLeast(15),
        0x06 => AtLeast(9),
        0x07 => AtLeast(14),
        0x08 | 0x0A | 0x0C | 0x12 => AtLeast(8),
        0x09 => AtLeast(5),
        0x0B => Exact(2),
        0x0D => Exact(22),
        0x0E => AtLeast(3),
        0x0F => Exact(9),
        0x10 | 0x13 | 0x28 => AtLeast(11),
        0x14 | 0x1A | 0x22 | 0x26 => AtLeast(4),
        0x15 => Exact(3),
        0x17 => AtLeast(16),
        0x19 | 0x1C | 0x23 => AtLeast(1),
        0x1D => Exact(13),
        0x1E => Exact(7),
        0x1F => Exact(12),
        0x20 => AtLeast(7),
        0x21 | 0xDD => AtLeast(3),
        _ => return None,
    })
}

/// Decode one attribute value of `id`.
fn value<S, D>(id: u8, r: &mut Reader<'_, '_, S>, elements: &mut D) -> Result<(), Error>
where
    S: FieldSink + ?Sized,
    D: ElementDecoder + ?Sized,
{
    match id {
        0x00 => discovery::master_indication(r),
        0x01 => discovery::cluster(r),
        0x02 | 0x27 => discovery::service_id_list(r),
        0x03 => discovery::service_descriptor(r),
        0x04 => discovery::connection_capability(r),
        0x05 => infra::wlan_infra(r),
        0x06 => infra::p2p_operation(r),
        0x07 => infra::ibss(r),
        0x08 => infra::mesh(r),
        0x09 => discovery::further_service_discovery(r),
        0x0A => discovery::further_availability_map(r),
        0x0B => discovery::country_code(r),
        0x0C => infra::ranging(r),
        0x0D => discovery::cluster_discovery(r),
        0x0E => discovery::service_descriptor_extension(r),
        0x0F => discovery::device_capability(r),
        0x10 => datapath::ndp(r),
        0x12 => schedule::availability(r),
        0x13 => datapath::ndc(r),
        0x14 => datapath::ndl(r),
        0x15 => datapath::ndl_qos(r),
        0x17 => schedule::unaligned_schedule(r),
        0x19 => datapath::ranging_info(r),
        0x1A => datapath::ranging_setup(r),
        0x1B => datapath::ftm_report(r),
        0x1C => container::element_container(r, elements),
        0x1D => infra::ext_wlan_infra(r),
        0x1E => infra::ext_p2p_operation(r),
        0x1F => infra::ext_ibss(r),
        0x20 => infra::ext_mesh(r),
        0x21 => security::cipher_suite_info(r),
        0x22 => security::security_context_info(r),
        0x23 => security::shared_key_descriptor(r),
        0x26 => schedule::public_availability(r),
        0x28 => datapath::ndp_extension(r),
        0xDD => container::vendor_specific(r, elements),
        _ => {
            debug!(id, "unknown attribute");
            Err(Error::UnknownAttributeId(id))
        }
    }
}

/// Peek at the identifier and length of the next attribute.
fn peek_header<S: FieldSink + ?Sized>(r: &Reader<'_, '_, S>) -> Result<(u8, usize), Error> {
    let mut c = r.cursor().clone();
    let id = c.u8()?;
    let len = c.u16(Endian::Little)?;
    Ok((id, len.into()))
}

/// Decode attributes until the region is exhausted.
///
/// A region ending inside an attribute header, or an attribute whose
/// length runs past the region, is reported once and ends the stream.
pub fn dissect<S, D>(r: &mut Reader<'_, '_, S>, elements: &mut D)
where
    S: FieldSink + ?Sized,
    D: ElementDecoder + ?Sized,
{
    while !r.at_end() {
        let (id, len) = match peek_header(r) {
            Ok(header) => header,
            Err(error) => {
                debug!(remaining = r.remaining(), "attribute stream ends inside a header");
                r.report_rest(error);
                return;
            }
        };

        let available = r.remaining();
        if HEADER_LEN + len > available {
            debug!(id, len, available, "attribute overruns its region");
            r.report_rest(Error::Truncated {
                requested: HEADER_LEN + len,
                available,
            });
            return;
        }

        trace!(id, len, "decoding attribute");
        let decoded = r.group(attribute(id), HEADER_LEN + len, |r| {
            r.u8(&ATTRIBUTE_TYPE)?;
            r.u16(&ATTRIBUTE_LEN)?;
            if let Some(rule) = length_rule(id) {
                Error::check(len, rule)?;
            }
            value(id, r, elements)
        });
        if let Err(error) = decoded {
            r.report_rest(error);
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cursor::Cursor,
        error::DiagnosticKind,
        sink::{Recorder, recorder::direct_fields},
    };

    use container::RawElements;

    fn decode(data: &[u8]) -> Recorder {
        let mut sink = Recorder::new();
        let mut r = Reader::new(Cursor::new(data), &mut sink, Endian::Little);
        dissect(&mut r, &mut RawElements);
        sink
    }

    #[test]
    fn decoded_attributes_have_length_rules() {
        for (id, _) in super::super::tables::ATTRIBUTES {
            let unconstrained = matches!(*id, 0x11 | 0x16 | 0x18 | 0x1B | 0x24 | 0x25);
            assert_eq!(length_rule(*id).is_some(), !unconstrained, "attribute {id:#04x}");
        }
    }

    #[test]
    fn header_fields_lead_each_group() {
        let sink = decode(&[0x00, 0x02, 0x00, 0x80, 0x10]);
        let group = sink.group("Master Indication Attribute").unwrap();
        let fields = direct_fields(group);
        let abbrevs: alloc::vec::Vec<_> = fields.iter().map(|f| f.field.abbrev).collect();
        assert_eq!(
            abbrevs,
            [
                "wifi_nan.attribute.type",
                "wifi_nan.attribute.len",
                "wifi_nan.master_indication.preference",
                "wifi_nan.master_indication.random_factor",
            ]
        );
        assert_eq!(fields[0].label, Some("Master Indication Attribute"));
    }

    #[test]
    fn reserved_ids_are_reported_and_skipped() {
        let sink = decode(&[0x11, 0x01, 0x00, 0xAA, 0x0B, 0x02, 0x00, b'U', b'S']);
        let diagnostics: alloc::vec::Vec<_> = sink.diagnostics().collect();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::UnknownAttributeId);
        assert_eq!(diagnostics[0].range, 3..4);
        assert!(sink.field("wifi_nan.country_code").is_some());
    }

    #[test]
    fn overrun_stops_the_stream() {
        let sink = decode(&[0x00, 0x02, 0x00, 0x80, 0x10, 0x01, 0x20, 0x00, 0x00]);
        let diagnostics: alloc::vec::Vec<_> = sink.diagnostics().collect();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::MalformedLength);
        assert_eq!(diagnostics[0].range, 5..9);
        assert_eq!(sink.groups("Master Indication Attribute").len(), 1);
        assert!(sink.group("Cluster Attribute").is_none());
    }

    #[test]
    fn header_fragment_is_reported() {
        let sink = decode(&[0x00, 0x02]);
        assert_eq!(sink.diagnostics().count(), 1);
        assert!(sink.fields().next().is_none());
    }
}
