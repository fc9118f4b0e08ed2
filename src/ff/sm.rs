//! SM system management services.

use crate::{
    error::Error,
    reader::Reader,
    sink::{Field, FieldSink, Kind},
    tables::yes_no,
};

use super::{
    common::{dev_id, empty, error_tail, list, pd_tag, reserved},
    dispatch::{Leaf, ServiceKey},
    tables::{dev_redundancy_role, interface, query_type, redundant_dev_type, smk_state},
};

pub const FIND_TAG_QUERY: u8 = 1;
pub const FIND_TAG_REPLY: u8 = 2;
pub const IDENTIFY: u8 = 3;
pub const CLEAR_ADDRESS: u8 = 12;
pub const SET_ASSIGNMENT_INFO: u8 = 14;
pub const CLEAR_ASSIGNMENT_INFO: u8 = 15;
pub const DEVICE_ANNUNCIATION: u8 = 16;

static QUERY_TYPE: Field = Field::new("Query Type", "ff.sm.query_type", Kind::U8).strings(query_type);
static IDX_SPECIFIED: Field = Field::new("Index Specified", "ff.sm.idx_specified", Kind::U32);
static VFD_REF: Field = Field::new("VFD Reference", "ff.sm.vfd_ref", Kind::U32);
static TAG: Field = Field::new("Tag", "ff.sm.tag", Kind::String);

fn find_tag_query<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u8(&QUERY_TYPE)?;
    reserved(r, 3)?;
    r.u32(&IDX_SPECIFIED)?;
    r.u32(&VFD_REF)?;
    r.string(&TAG, 32)
}

static H1_NODE_ADDR: Field = Field::new("H1 Node Address", "ff.sm.h1_node_addr", Kind::U8);
static FDA_ADDR_LINK_ID: Field = Field::new("FDA Address Link Id", "ff.sm.fda_addr_link_id", Kind::U16);
static OD_IDX: Field = Field::new("OD Index", "ff.sm.od_idx", Kind::U32);
static IP_ADDR: Field = Field::new("IP Address", "ff.sm.ip_addr", Kind::Ipv6);
static OD_VER: Field = Field::new("OD Version", "ff.sm.od_ver", Kind::U32);

static DUP_DETECTION_STATE: Field =
    Field::new("Duplicate Detection State", "ff.sm.dup_detection_state", Kind::U8);
static DUP_INTERFACE_B: Field =
    Field::new("Interface B Duplicate Detected", "ff.sm.dup_detection_state.b", Kind::Bool)
        .mask(0x02)
        .strings(yes_no);
static DUP_INTERFACE_A: Field =
    Field::new("Interface A Duplicate Detected", "ff.sm.dup_detection_state.a", Kind::Bool)
        .mask(0x01)
        .strings(yes_no);
static DUP_DETECTION_STATE_RESERVED: Field =
    Field::new("Reserved", "ff.sm.dup_detection_state.reserved", Kind::U8).mask(0xFC);

static NUM_SELECTORS: Field =
    Field::new("Number of FDA Address Selectors", "ff.sm.num_of_fda_addr_selectors", Kind::U16);
static SELECTOR: Field = Field::new("FDA Address Selector", "ff.sm.fda_addr_selector", Kind::U16);

fn find_tag_reply<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u8(&QUERY_TYPE)?;
    r.u8(&H1_NODE_ADDR)?;
    r.u16(&FDA_ADDR_LINK_ID)?;
    r.u32(&VFD_REF)?;
    r.u32(&OD_IDX)?;
    r.ipv6(&IP_ADDR)?;
    r.u32(&OD_VER)?;
    dev_id(r)?;
    pd_tag(r)?;
    reserved(r, 1)?;
    r.bitmask(
        &DUP_DETECTION_STATE,
        &[&DUP_INTERFACE_B, &DUP_INTERFACE_A, &DUP_DETECTION_STATE_RESERVED],
    )?;

    let count = r.u16(&NUM_SELECTORS)?;
    list(r, "FDA Address Selectors", count.into(), 2, |r| {
        r.u16(&SELECTOR).map(|_| ())
    })
}

static SMK_STATE: Field = Field::new("SMK State", "ff.sm.smk_state", Kind::U8);
static SMK_SYNC: Field =
    Field::new("Synchronized with SNTP Time Server", "ff.sm.smk_state.sync", Kind::Bool)
        .mask(0x80)
        .strings(yes_no);
static SMK_STATE_VALUE: Field = Field::new("State", "ff.sm.smk_state.state", Kind::U8)
    .mask(0x7F)
    .strings(smk_state);

static DEV_TYPE: Field = Field::new("Device Type", "ff.sm.dev_type", Kind::U8);
static DEV_TYPE_LINK: Field = Field::new("Linking Device", "ff.sm.dev_type.link", Kind::Bool)
    .mask(0x80)
    .strings(yes_no);
static DEV_TYPE_IOGW: Field = Field::new("I/O Gateway", "ff.sm.dev_type.iogw", Kind::Bool)
    .mask(0x40)
    .strings(yes_no);
static DEV_TYPE_HSE: Field = Field::new("HSE Field Device", "ff.sm.dev_type.hse", Kind::Bool)
    .mask(0x20)
    .strings(yes_no);
static DEV_TYPE_H1: Field = Field::new("H1 Device", "ff.sm.dev_type.h1", Kind::Bool)
    .mask(0x10)
    .strings(yes_no);
static DEV_TYPE_RESERVED: Field =
    Field::new("Reserved", "ff.sm.dev_type.reserved", Kind::U8).mask(0x08);
static DEV_TYPE_REDUNDANT: Field =
    Field::new("Redundant Device Type Capability", "ff.sm.dev_type.redundant", Kind::U8)
        .mask(0x07)
        .strings(redundant_dev_type);

static DEV_REDUNDANCY_STATE: Field =
    Field::new("Device Redundancy State", "ff.sm.dev_redundancy_state", Kind::U8);
static DEV_REDUNDANCY_RESERVED: Field =
    Field::new("Reserved", "ff.sm.dev_redundancy_state.reserved", Kind::U8).mask(0xF0);
static DEV_REDUNDANCY_ROLE: Field =
    Field::new("Device Redundancy Role", "ff.sm.dev_redundancy_state.role", Kind::U8)
        .mask(0x0C)
        .strings(dev_redundancy_role);
static DEV_REDUNDANCY_TYPE: Field =
    Field::new("Assigned Redundant Device Type", "ff.sm.dev_redundancy_state.type", Kind::U8)
        .mask(0x03)
        .strings(redundant_dev_type);

static DEV_IDX: Field = Field::new("Device Index", "ff.sm.dev_idx", Kind::U16);
static MAX_DEV_IDX: Field = Field::new("Max Device Index", "ff.sm.max_dev_idx", Kind::U16);
static OPERATIONAL_IP: Field = Field::new("Operational IP Address", "ff.sm.operational_ip", Kind::Ipv6);
static HSE_REPEAT_TIME: Field = Field::new("HSE Repeat Time", "ff.sm.hse_repeat_time", Kind::U32);
static LR_PORT: Field = Field::new("LAN Redundancy Port", "ff.sm.lr_port", Kind::U16);
static ANNUNC_VER_NUM: Field =
    Field::new("Annunciation Version Number", "ff.sm.annunc_ver_num", Kind::U32);
static HSE_DEV_VER_NUM: Field =
    Field::new("HSE Device Version Number", "ff.sm.hse_dev_ver_num", Kind::U32);
static NUM_ENTRIES: Field =
    Field::new("Number of Entries in Version Number List", "ff.sm.num_of_entries", Kind::U32);

static LINK_ID: Field = Field::new("Link Id", "ff.sm.ver_list.link_id", Kind::U16);
static VERSION_NUMBER: Field = Field::new("Version Number", "ff.sm.ver_list.ver_num", Kind::U16);

/// Size of one version number list entry, of either shape.
const VERSION_ENTRY_LEN: usize = 4;

/// Decode a version number list of `count` entries.
///
/// Entries name an H1 link when `link_id_present`, and an H1 node address
/// otherwise.
pub fn decode_version_list<S: FieldSink + ?Sized>(
    r: &mut Reader<'_, '_, S>,
    count: usize,
    link_id_present: bool,
) -> Result<(), Error> {
    list(r, "Version Number List", count, VERSION_ENTRY_LEN, |r| {
        if link_id_present {
            r.group("Link Entry", VERSION_ENTRY_LEN, |r| {
                r.u16(&LINK_ID)?;
                r.u16(&VERSION_NUMBER)?;
                Ok(())
            })
        } else {
            r.group("Node Entry", VERSION_ENTRY_LEN, |r| {
                r.u8(&H1_NODE_ADDR)?;
                reserved(r, 1)?;
                r.u16(&VERSION_NUMBER)?;
                Ok(())
            })
        }
    })
}

/// Whether a version number list carries link identifiers.
///
/// The list names links when the upper half of the FDA address is zero.
pub fn link_id_present(fda_address: u32) -> bool {
    (fda_address >> 16) as u16 == 0
}

/// Identify response and device annunciation share one layout.
fn identity<S: FieldSink + ?Sized>(
    r: &mut Reader<'_, '_, S>,
    link_id_present: bool,
) -> Result<(), Error> {
    r.bitmask(&SMK_STATE, &[&SMK_SYNC, &SMK_STATE_VALUE])?;
    r.bitmask(
        &DEV_TYPE,
        &[
            &DEV_TYPE_LINK,
            &DEV_TYPE_IOGW,
            &DEV_TYPE_HSE,
            &DEV_TYPE_H1,
            &DEV_TYPE_RESERVED,
            &DEV_TYPE_REDUNDANT,
        ],
    )?;
    dev_redundancy_state(r)?;
    r.bitmask(
        &DUP_DETECTION_STATE,
        &[&DUP_INTERFACE_B, &DUP_INTERFACE_A, &DUP_DETECTION_STATE_RESERVED],
    )?;
    r.u16(&DEV_IDX)?;
    r.u16(&MAX_DEV_IDX)?;
    r.ipv6(&OPERATIONAL_IP)?;
    dev_id(r)?;
    pd_tag(r)?;
    r.u32(&HSE_REPEAT_TIME)?;
    r.u16(&LR_PORT)?;
    reserved(r, 2)?;
    r.u32(&ANNUNC_VER_NUM)?;
    r.u32(&HSE_DEV_VER_NUM)?;

    let count = r.u32(&NUM_ENTRIES)?;
    decode_version_list(r, count as usize, link_id_present)
}

fn dev_redundancy_state<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.bitmask(
        &DEV_REDUNDANCY_STATE,
        &[&DEV_REDUNDANCY_RESERVED, &DEV_REDUNDANCY_ROLE, &DEV_REDUNDANCY_TYPE],
    )
    .map(|_| ())
}

static INTERFACE_TO_CLEAR: Field =
    Field::new("Interface to Clear", "ff.sm.interface_to_clear", Kind::U8).strings(interface);

fn clear_address<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    dev_id(r)?;
    pd_tag(r)?;
    r.u8(&INTERFACE_TO_CLEAR)?;
    reserved(r, 3)
}

static CLEAR_DUP_DETECTION_STATE: Field =
    Field::new("Clear Duplicate Detection State", "ff.sm.clear_dup_detection_state", Kind::U8);
static CLEAR_DUP_INTERFACE_B: Field =
    Field::new("Clear Interface B Duplicate", "ff.sm.clear_dup_detection_state.b", Kind::Bool)
        .mask(0x02)
        .strings(yes_no);
static CLEAR_DUP_INTERFACE_A: Field =
    Field::new("Clear Interface A Duplicate", "ff.sm.clear_dup_detection_state.a", Kind::Bool)
        .mask(0x01)
        .strings(yes_no);
static CLEAR_DUP_DETECTION_STATE_RESERVED: Field =
    Field::new("Reserved", "ff.sm.clear_dup_detection_state.reserved", Kind::U8).mask(0xFC);

fn set_assignment_info_req<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    dev_redundancy_state(r)?;
    r.bitmask(
        &CLEAR_DUP_DETECTION_STATE,
        &[&CLEAR_DUP_INTERFACE_B, &CLEAR_DUP_INTERFACE_A, &CLEAR_DUP_DETECTION_STATE_RESERVED],
    )?;
    reserved(r, 2)?;
    dev_id(r)?;
    pd_tag(r)?;
    r.ipv6(&OPERATIONAL_IP)?;
    r.u16(&DEV_IDX)?;
    r.u16(&MAX_DEV_IDX)?;
    r.u32(&HSE_REPEAT_TIME)?;
    r.u16(&LR_PORT)?;
    reserved(r, 2)
}

fn set_assignment_info_rsp<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u32(&HSE_REPEAT_TIME)?;
    r.u16(&MAX_DEV_IDX)?;
    reserved(r, 2)
}

fn clear_assignment_info<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    dev_id(r)?;
    pd_tag(r)
}

pub(super) fn dissect<S: FieldSink + ?Sized>(
    r: &mut Reader<'_, '_, S>,
    key: &ServiceKey,
    leaf: &Leaf<'_>,
) -> Result<Option<&'static str>, Error> {
    let link = link_id_present(leaf.header.fda_address);

    match (key.confirmed, key.service) {
        (false, FIND_TAG_QUERY) => leaf.run(r, "SM Find Tag Query Request", find_tag_query),
        (false, FIND_TAG_REPLY) => leaf.run(r, "SM Find Tag Reply Request", find_tag_reply),
        (false, DEVICE_ANNUNCIATION) => {
            leaf.run(r, "SM Device Annunciation Request", |r| identity(r, link))
        }
        (true, IDENTIFY) => leaf.by_type(
            r,
            ["SM Identify Request", "SM Identify Response", "SM Identify Error"],
            empty,
            |r| identity(r, link),
            error_tail,
        ),
        (true, CLEAR_ADDRESS) => leaf.by_type(
            r,
            [
                "SM Clear Address Request",
                "SM Clear Address Response",
                "SM Clear Address Error",
            ],
            clear_address,
            empty,
            error_tail,
        ),
        (true, SET_ASSIGNMENT_INFO) => leaf.by_type(
            r,
            [
                "SM Set Assignment Info Request",
                "SM Set Assignment Info Response",
                "SM Set Assignment Info Error",
            ],
            set_assignment_info_req,
            set_assignment_info_rsp,
            error_tail,
        ),
        (true, CLEAR_ASSIGNMENT_INFO) => leaf.by_type(
            r,
            [
                "SM Clear Assignment Info Request",
                "SM Clear Assignment Info Response",
                "SM Clear Assignment Info Error",
            ],
            clear_assignment_info,
            empty,
            error_tail,
        ),
        _ => Ok(None),
    }
}
