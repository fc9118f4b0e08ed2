//! Data path, data link and ranging negotiation attributes.

use crate::{
    error::Error,
    reader::Reader,
    sink::{Field, FieldSink, Kind},
    tables::{present, yes_no},
};

use super::{
    discovery::service_info,
    schedule::schedule_entries,
    tables::{
        ndl_kind, ndl_setup_reason, ndl_type, ndp_type, ndpe_tlv_type, ranging_type, reason_code,
        status_data_path, status_ranging,
    },
};

static DIALOG_TOKEN: Field = Field::new("Dialog Token", "wifi_nan.dialog_token", Kind::U8);
static REASON_CODE: Field = Field::new("Reason Code", "wifi_nan.reason_code", Kind::U8).strings(reason_code);

static NDP_TYPE_STATUS: Field = Field::new("Type and Status", "wifi_nan.ndp.type_status", Kind::U8);
static NDP_TYPE: Field = Field::new("Type", "wifi_nan.ndp.type", Kind::U8).mask(0x0F).strings(ndp_type);
static NDP_STATUS: Field = Field::new("Status", "wifi_nan.ndp.status", Kind::U8)
    .mask(0xF0)
    .strings(status_data_path);
static NDP_INITIATOR: Field = Field::new("Initiator NDI", "wifi_nan.ndp.initiator_ndi", Kind::Ether);
static NDP_ID: Field = Field::new("NDP ID", "wifi_nan.ndp.id", Kind::U8);
static NDP_CTRL: Field = Field::new("NDP Control", "wifi_nan.ndp.ctrl", Kind::U8);
static NDP_CTRL_CONFIRM: Field = Field::new("Confirm Required", "wifi_nan.ndp.ctrl.confirm", Kind::Bool)
    .mask(0x01)
    .strings(yes_no);
static NDP_CTRL_SECURITY: Field = Field::new("Security Present", "wifi_nan.ndp.ctrl.security_present", Kind::Bool)
    .mask(0x04)
    .strings(present);
static NDP_CTRL_PUBLISH_ID: Field = Field::new("Publish ID Present", "wifi_nan.ndp.ctrl.publish_id_present", Kind::Bool)
    .mask(0x08)
    .strings(present);
static NDP_CTRL_RESPONDER: Field =
    Field::new("Responder NDI Present", "wifi_nan.ndp.ctrl.responder_ndi_present", Kind::Bool)
        .mask(0x10)
        .strings(present);
static NDP_CTRL_SPECIFIC_INFO: Field =
    Field::new("NDP Specific Info Present", "wifi_nan.ndp.ctrl.specific_info_present", Kind::Bool)
        .mask(0x20)
        .strings(present);
static NDP_CTRL_RESERVED: Field =
    Field::new("Reserved", "wifi_nan.ndp.ctrl.reserved", Kind::U8).mask(0xC2);
static NDP_PUBLISH_ID: Field = Field::new("Publish ID", "wifi_nan.ndp.publish_id", Kind::U8);
static NDP_RESPONDER: Field = Field::new("Responder NDI", "wifi_nan.ndp.responder_ndi", Kind::Ether);
static NDP_SPECIFIC_INFO: Field = Field::new("NDP Specific Info", "wifi_nan.ndp.specific_info", Kind::Bytes);

/// Decode the fields NDP and NDP Extension share, returning the control
/// byte.
fn ndp_base<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<u8, Error> {
    r.u8(&DIALOG_TOKEN)?;
    r.bitmask(&NDP_TYPE_STATUS, &[&NDP_TYPE, &NDP_STATUS])?;
    r.u8(&REASON_CODE)?;
    r.ether(&NDP_INITIATOR)?;
    r.u8(&NDP_ID)?;
    let control = r.bitmask(
        &NDP_CTRL,
        &[
            &NDP_CTRL_CONFIRM,
            &NDP_CTRL_SECURITY,
            &NDP_CTRL_PUBLISH_ID,
            &NDP_CTRL_RESPONDER,
            &NDP_CTRL_SPECIFIC_INFO,
            &NDP_CTRL_RESERVED,
        ],
    )? as u8;

    if control & 0x08 != 0 {
        r.u8(&NDP_PUBLISH_ID)?;
    }
    if control & 0x10 != 0 {
        r.ether(&NDP_RESPONDER)?;
    }
    Ok(control)
}

/// NDP.
pub fn ndp<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    let control = ndp_base(r)?;
    if control & 0x20 != 0 {
        r.rest(&NDP_SPECIFIC_INFO);
    }
    Ok(())
}

static NDPE_TLV_TYPE: Field = Field::new("Type", "wifi_nan.ndpe.tlv.type", Kind::U8).strings(ndpe_tlv_type);
static NDPE_TLV_LEN: Field = Field::new("Length", "wifi_nan.ndpe.tlv.len", Kind::U16);
static NDPE_TLV_VALUE: Field = Field::new("Value", "wifi_nan.ndpe.tlv.value", Kind::Bytes);
static NDPE_INTERFACE_ID: Field = Field::new("Interface Identifier", "wifi_nan.ndpe.tlv.ipv6_interface_id", Kind::Bytes);

/// Length of an IPv6 link-local interface identifier.
pub const INTERFACE_ID_LEN: usize = 8;

fn ipv6_link_local<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.bytes(&NDPE_INTERFACE_ID, INTERFACE_ID_LEN)?;
    Ok(())
}

/// NDP Extension: the NDP fields followed by TLVs filling the attribute.
pub fn ndp_extension<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    ndp_base(r)?;

    while !r.at_end() {
        let kind = r.u8(&NDPE_TLV_TYPE)?;
        let len = usize::from(r.u16(&NDPE_TLV_LEN)?);
        match kind {
            0 => r.group("IPv6 Link Local", len, ipv6_link_local)?,
            1 => r.group("Service Info", len, service_info)?,
            _ => {
                r.bytes(&NDPE_TLV_VALUE, len)?;
            }
        }
    }
    Ok(())
}

static NDC_ID: Field = Field::new("NDC ID", "wifi_nan.ndc.id", Kind::Ether);
static NDC_CTRL: Field = Field::new("Attribute Control", "wifi_nan.ndc.ctrl", Kind::U8);
static NDC_CTRL_SELECTED: Field = Field::new("Selected NDC", "wifi_nan.ndc.ctrl.selected", Kind::Bool)
    .mask(0x01)
    .strings(yes_no);
static NDC_CTRL_RESERVED: Field =
    Field::new("Reserved", "wifi_nan.ndc.ctrl.reserved", Kind::U8).mask(0xFE);

/// NDC.
pub fn ndc<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.ether(&NDC_ID)?;
    r.bitmask(&NDC_CTRL, &[&NDC_CTRL_SELECTED, &NDC_CTRL_RESERVED])?;
    schedule_entries(r)
}

static NDL_TYPE_STATUS: Field = Field::new("Type and Status", "wifi_nan.ndl.type_status", Kind::U8);
static NDL_TYPE: Field = Field::new("Type", "wifi_nan.ndl.type", Kind::U8).mask(0x0F).strings(ndl_type);
static NDL_STATUS: Field = Field::new("Status", "wifi_nan.ndl.status", Kind::U8)
    .mask(0xF0)
    .strings(status_data_path);
static NDL_CTRL: Field = Field::new("NDL Control", "wifi_nan.ndl.ctrl", Kind::U8);
static NDL_CTRL_PEER_ID: Field = Field::new("Peer ID Present", "wifi_nan.ndl.ctrl.peer_id_present", Kind::Bool)
    .mask(0x01)
    .strings(present);
static NDL_CTRL_IMMUTABLE: Field =
    Field::new("Immutable Schedule Present", "wifi_nan.ndl.ctrl.immutable_schedule_present", Kind::Bool)
        .mask(0x02)
        .strings(present);
static NDL_CTRL_NDC: Field = Field::new("NDC Attribute Present", "wifi_nan.ndl.ctrl.ndc_present", Kind::Bool)
    .mask(0x04)
    .strings(present);
static NDL_CTRL_QOS: Field = Field::new("NDL QoS Present", "wifi_nan.ndl.ctrl.qos_present", Kind::Bool)
    .mask(0x08)
    .strings(present);
static NDL_CTRL_MAX_IDLE: Field =
    Field::new("Max Idle Period Present", "wifi_nan.ndl.ctrl.max_idle_present", Kind::Bool)
        .mask(0x10)
        .strings(present);
static NDL_CTRL_KIND: Field = Field::new("NDL Type", "wifi_nan.ndl.ctrl.kind", Kind::U8)
    .mask(0x20)
    .strings(ndl_kind);
static NDL_CTRL_SETUP_REASON: Field = Field::new("NDL Setup Reason", "wifi_nan.ndl.ctrl.setup_reason", Kind::U8)
    .mask(0xC0)
    .strings(ndl_setup_reason);
static NDL_PEER_ID: Field = Field::new("NDL Peer ID", "wifi_nan.ndl.peer_id", Kind::U8);
static NDL_MAX_IDLE: Field = Field::new("Max Idle Period", "wifi_nan.ndl.max_idle", Kind::U16);

/// NDL.
pub fn ndl<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u8(&DIALOG_TOKEN)?;
    r.bitmask(&NDL_TYPE_STATUS, &[&NDL_TYPE, &NDL_STATUS])?;
    r.u8(&REASON_CODE)?;
    let control = r.bitmask(
        &NDL_CTRL,
        &[
            &NDL_CTRL_PEER_ID,
            &NDL_CTRL_IMMUTABLE,
            &NDL_CTRL_NDC,
            &NDL_CTRL_QOS,
            &NDL_CTRL_MAX_IDLE,
            &NDL_CTRL_KIND,
            &NDL_CTRL_SETUP_REASON,
        ],
    )?;

    if control & 0x01 != 0 {
        r.u8(&NDL_PEER_ID)?;
    }
    if control & 0x10 != 0 {
        r.u16(&NDL_MAX_IDLE)?;
    }
    if control & 0x02 != 0 {
        schedule_entries(r)?;
    }
    Ok(())
}

static QOS_MIN_SLOTS: Field = Field::new("Minimum Time Slots", "wifi_nan.ndl_qos.min_slots", Kind::U8);
static QOS_MAX_LATENCY: Field = Field::new("Maximum Latency", "wifi_nan.ndl_qos.max_latency", Kind::U16);

/// NDL QoS.
pub fn ndl_qos<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u8(&QOS_MIN_SLOTS)?;
    r.u16(&QOS_MAX_LATENCY)?;
    Ok(())
}

static LOCATION_INFO: Field =
    Field::new("Location Info Availability", "wifi_nan.ranging_info.location", Kind::U8);
static LOCATION_LCI: Field = Field::new("LCI Local Coordinates", "wifi_nan.ranging_info.location.lci", Kind::Bool)
    .mask(0x01)
    .strings(yes_no);
static LOCATION_GEO: Field = Field::new("Geospatial LCI WGS84", "wifi_nan.ranging_info.location.geo", Kind::Bool)
    .mask(0x02)
    .strings(yes_no);
static LOCATION_CIVIC: Field = Field::new("Civic Location", "wifi_nan.ranging_info.location.civic", Kind::Bool)
    .mask(0x04)
    .strings(yes_no);
static LOCATION_LAST_MOVEMENT_PRESENT: Field =
    Field::new("Last Movement Indication", "wifi_nan.ranging_info.location.last_movement", Kind::Bool)
        .mask(0x08)
        .strings(present);
static LOCATION_INFO_RESERVED: Field =
    Field::new("Reserved", "wifi_nan.ranging_info.location.reserved", Kind::U8).mask(0xF0);
static LAST_MOVEMENT: Field =
    Field::new("Last Movement Indication", "wifi_nan.ranging_info.last_movement", Kind::U16);

/// Ranging Information.
pub fn ranging_info<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    let location = r.bitmask(
        &LOCATION_INFO,
        &[
            &LOCATION_LCI,
            &LOCATION_GEO,
            &LOCATION_CIVIC,
            &LOCATION_LAST_MOVEMENT_PRESENT,
            &LOCATION_INFO_RESERVED,
        ],
    )?;
    if location & 0x08 != 0 {
        r.u16(&LAST_MOVEMENT)?;
    }
    Ok(())
}

static RANGING_TYPE_STATUS: Field = Field::new("Type and Status", "wifi_nan.ranging_setup.type_status", Kind::U8);
static RANGING_TYPE: Field = Field::new("Type", "wifi_nan.ranging_setup.type", Kind::U8)
    .mask(0x0F)
    .strings(ranging_type);
static RANGING_STATUS: Field = Field::new("Status", "wifi_nan.ranging_setup.status", Kind::U8)
    .mask(0xF0)
    .strings(status_ranging);
static RANGING_CTRL: Field = Field::new("Ranging Control", "wifi_nan.ranging_setup.ctrl", Kind::U8);
static RANGING_CTRL_REPORT: Field = Field::new("FTM Report Required", "wifi_nan.ranging_setup.ctrl.report", Kind::Bool)
    .mask(0x01)
    .strings(yes_no);
static RANGING_CTRL_FTM: Field =
    Field::new("FTM Parameters Present", "wifi_nan.ranging_setup.ctrl.ftm_params_present", Kind::Bool)
        .mask(0x02)
        .strings(present);
static RANGING_CTRL_SCHEDULE: Field =
    Field::new("Schedule Entry List Present", "wifi_nan.ranging_setup.ctrl.schedule_present", Kind::Bool)
        .mask(0x04)
        .strings(present);
static RANGING_CTRL_RESERVED: Field =
    Field::new("Reserved", "wifi_nan.ranging_setup.ctrl.reserved", Kind::U8).mask(0xF8);

static FTM_PARAMS: Field = Field::new("FTM Parameters", "wifi_nan.ranging_setup.ftm", Kind::U24);
static FTM_MAX_BURST_DURATION: Field =
    Field::new("Max Burst Duration", "wifi_nan.ranging_setup.ftm.max_burst_duration", Kind::U24).mask(0x00_000F);
static FTM_MIN_DELTA: Field =
    Field::new("Min Delta FTM", "wifi_nan.ranging_setup.ftm.min_delta", Kind::U24).mask(0x00_03F0);
static FTM_MAX_PER_BURST: Field =
    Field::new("Max FTMs per Burst", "wifi_nan.ranging_setup.ftm.max_per_burst", Kind::U24).mask(0x00_7C00);
static FTM_FORMAT_BW: Field =
    Field::new("FTM Format and Bandwidth", "wifi_nan.ranging_setup.ftm.format_bw", Kind::U24).mask(0x1F_8000);
static FTM_PARAMS_RESERVED: Field =
    Field::new("Reserved", "wifi_nan.ranging_setup.ftm.reserved", Kind::U24).mask(0xE00000);

/// Ranging Setup.
pub fn ranging_setup<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u8(&DIALOG_TOKEN)?;
    r.bitmask(&RANGING_TYPE_STATUS, &[&RANGING_TYPE, &RANGING_STATUS])?;
    r.u8(&REASON_CODE)?;
    let control = r.bitmask(
        &RANGING_CTRL,
        &[&RANGING_CTRL_REPORT, &RANGING_CTRL_FTM, &RANGING_CTRL_SCHEDULE, &RANGING_CTRL_RESERVED],
    )?;

    if control & 0x02 != 0 {
        r.bitmask(
            &FTM_PARAMS,
            &[
                &FTM_MAX_BURST_DURATION,
                &FTM_MIN_DELTA,
                &FTM_MAX_PER_BURST,
                &FTM_FORMAT_BW,
                &FTM_PARAMS_RESERVED,
            ],
        )?;
    }
    if control & 0x04 != 0 {
        schedule_entries(r)?;
    }
    Ok(())
}

static FTM_REPORT: Field = Field::new("FTM Range Report", "wifi_nan.ftm.report", Kind::Bytes);

/// FTM Ranging Report.
pub fn ftm_report<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.rest(&FTM_REPORT);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cursor::{Cursor, Endian},
        sink::{Recorder, Value},
    };

    fn decode(data: &[u8], f: fn(&mut Reader<'_, '_, Recorder>) -> Result<(), Error>) -> Recorder {
        let mut sink = Recorder::new();
        let mut r = Reader::new(Cursor::new(data), &mut sink, Endian::Little);
        f(&mut r).unwrap();
        assert!(r.at_end());
        sink
    }

    fn ndp_prefix(control: u8) -> alloc::vec::Vec<u8> {
        let mut data = alloc::vec![7, 0x10, 0];
        data.extend_from_slice(&[2, 0, 0, 0, 0, 1]);
        data.extend_from_slice(&[4, control]);
        data
    }

    #[test]
    fn ndp_status_uses_data_path_labels() {
        let mut data = ndp_prefix(0x08 | 0x10);
        data.push(0x21);
        data.extend_from_slice(&[2, 0, 0, 0, 0, 2]);

        let sink = decode(&data, ndp);
        assert_eq!(sink.field("wifi_nan.ndp.type").unwrap().label, Some("Request"));
        assert_eq!(sink.field("wifi_nan.ndp.status").unwrap().label, Some("Accepted"));
        assert_eq!(sink.field("wifi_nan.ndp.publish_id").unwrap().value, Value::Uint(0x21));
        assert_eq!(sink.field("wifi_nan.ndp.responder_ndi").unwrap().value, Value::Ether([2, 0, 0, 0, 0, 2]));
        assert!(sink.field("wifi_nan.ndp.specific_info").is_none());
    }

    #[test]
    fn ranging_status_uses_ranging_labels() {
        let sink = decode(&[1, 0x10, 0, 0], ranging_setup);
        assert_eq!(sink.field("wifi_nan.ranging_setup.status").unwrap().label, Some("Rejected"));
    }

    #[test]
    fn ndpe_tlvs() {
        let mut data = ndp_prefix(0);
        data.extend_from_slice(&[0, 8, 0, 1, 2, 3, 4, 5, 6, 7, 8]);
        data.extend_from_slice(&[1, 5, 0, 0x50, 0x6F, 0x9A, 1, 0xAB]);
        data.extend_from_slice(&[9, 1, 0, 0xCC]);

        let sink = decode(&data, ndp_extension);
        assert_eq!(sink.groups("IPv6 Link Local").len(), 1);
        assert_eq!(sink.groups("Service Info").len(), 1);
        assert_eq!(
            sink.field("wifi_nan.sdea.service_info.protocol_type").unwrap().label,
            Some("Bonjour")
        );
        assert_eq!(&sink.field("wifi_nan.ndpe.tlv.value").unwrap().raw[..], &[0xCC]);
        assert!(sink.diagnostics().next().is_none());
    }

    #[test]
    fn ndpe_tlv_overrun_is_an_error() {
        let mut data = ndp_prefix(0);
        data.extend_from_slice(&[0, 0xFF, 0xFF, 1, 2]);

        let mut sink = Recorder::new();
        let mut r = Reader::new(Cursor::new(&data), &mut sink, Endian::Little);
        assert!(matches!(ndp_extension(&mut r), Err(Error::Truncated { requested: 0xFFFF, .. })));
    }
}
