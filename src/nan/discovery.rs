//! Synchronization, discovery and capability attributes.

use crate::{
    error::Error,
    reader::Reader,
    sink::{Field, FieldSink, Kind},
    tables::yes_no,
};

use super::{
    infra::{availability_bitmap, map_control},
    tables::{
        data_path_type, map_id_apply, multicast_type, service_control_type, service_protocol_type, srf_include,
        srf_type,
    },
};

/// Size of a service identifier.
pub const SERVICE_ID_LEN: usize = 6;

static MASTER_PREFERENCE: Field = Field::new("Master Preference", "wifi_nan.master_indication.preference", Kind::U8);
static RANDOM_FACTOR: Field =
    Field::new("Random Factor", "wifi_nan.master_indication.random_factor", Kind::U8);

/// Master Indication.
pub fn master_indication<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u8(&MASTER_PREFERENCE)?;
    r.u8(&RANDOM_FACTOR)?;
    Ok(())
}

static ANCHOR_MASTER_RANK: Field = Field::new("Anchor Master Rank", "wifi_nan.cluster.amr", Kind::U64);
static HOP_COUNT: Field = Field::new("Hop Count to Anchor Master", "wifi_nan.cluster.hop_count", Kind::U8);
static AMBTT: Field =
    Field::new("Anchor Master Beacon Transmission Time", "wifi_nan.cluster.ambtt", Kind::U32);

/// Cluster.
pub fn cluster<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.uint(&ANCHOR_MASTER_RANK)?;
    r.u8(&HOP_COUNT)?;
    r.u32(&AMBTT)?;
    Ok(())
}

static SERVICE_ID: Field = Field::new("Service ID", "wifi_nan.service_id", Kind::Bytes);

/// Service ID List and Subscribe Service ID List.
pub fn service_id_list<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    while !r.at_end() {
        r.bytes(&SERVICE_ID, SERVICE_ID_LEN)?;
    }
    Ok(())
}

static INSTANCE_ID: Field = Field::new("Instance ID", "wifi_nan.sda.instance_id", Kind::U8);
static REQUESTOR_INSTANCE_ID: Field =
    Field::new("Requestor Instance ID", "wifi_nan.sda.requestor_instance_id", Kind::U8);
static SERVICE_CTRL: Field = Field::new("Service Control", "wifi_nan.sda.ctrl", Kind::U8);
static SERVICE_CTRL_TYPE: Field = Field::new("Service Control Type", "wifi_nan.sda.ctrl.type", Kind::U8)
    .mask(0x03)
    .strings(service_control_type);
static SERVICE_CTRL_MATCHING_FILTER: Field =
    Field::new("Matching Filter Present", "wifi_nan.sda.ctrl.matching_filter", Kind::Bool)
        .mask(0x04)
        .strings(yes_no);
static SERVICE_CTRL_SRF: Field =
    Field::new("Service Response Filter Present", "wifi_nan.sda.ctrl.service_response_filter", Kind::Bool)
        .mask(0x08)
        .strings(yes_no);
static SERVICE_CTRL_SERVICE_INFO: Field =
    Field::new("Service Info Present", "wifi_nan.sda.ctrl.service_info", Kind::Bool)
        .mask(0x10)
        .strings(yes_no);
static SERVICE_CTRL_DISCOVERY_RANGE: Field =
    Field::new("Discovery Range Limited", "wifi_nan.sda.ctrl.discovery_range", Kind::Bool)
        .mask(0x20)
        .strings(yes_no);
static SERVICE_CTRL_BINDING_BITMAP: Field =
    Field::new("Binding Bitmap Present", "wifi_nan.sda.ctrl.binding_bitmap", Kind::Bool)
        .mask(0x40)
        .strings(yes_no);
static SERVICE_CTRL_RESERVED: Field =
    Field::new("Reserved", "wifi_nan.sda.ctrl.reserved", Kind::U8).mask(0x80);

static BINDING_BITMAP: Field = Field::new("Binding Bitmap", "wifi_nan.sda.binding_bitmap", Kind::U16);
static MATCHING_FILTER_LEN: Field =
    Field::new("Matching Filter Length", "wifi_nan.sda.matching_filter_len", Kind::U8);
static MATCHING_FILTER_ENTRY_LEN: Field =
    Field::new("Length", "wifi_nan.sda.matching_filter.entry_len", Kind::U8);
static MATCHING_FILTER_ENTRY: Field =
    Field::new("Matching Filter", "wifi_nan.sda.matching_filter.entry", Kind::Bytes);

static SRF_LEN: Field = Field::new("Service Response Filter Length", "wifi_nan.sda.srf_len", Kind::U8);
static SRF_CTRL: Field = Field::new("SRF Control", "wifi_nan.sda.srf_ctrl", Kind::U8);
static SRF_TYPE: Field = Field::new("SRF Type", "wifi_nan.sda.srf_ctrl.type", Kind::U8)
    .mask(0x01)
    .strings(srf_type);
static SRF_INCLUDE: Field = Field::new("Include", "wifi_nan.sda.srf_ctrl.include", Kind::U8)
    .mask(0x02)
    .strings(srf_include);
static SRF_BLOOM_FILTER_INDEX: Field =
    Field::new("Bloom Filter Index", "wifi_nan.sda.srf_ctrl.bloom_filter_index", Kind::U8).mask(0x0C);
static SRF_CTRL_RESERVED: Field =
    Field::new("Reserved", "wifi_nan.sda.srf_ctrl.reserved", Kind::U8).mask(0xF0);
static SRF_BLOOM_FILTER: Field = Field::new("Bloom Filter", "wifi_nan.sda.srf.bloom_filter", Kind::Bytes);
static SRF_ADDRESS: Field = Field::new("MAC Address", "wifi_nan.sda.srf.mac", Kind::Ether);

static SERVICE_INFO_LEN: Field = Field::new("Service Info Length", "wifi_nan.sda.service_info_len", Kind::U8);
static SERVICE_INFO: Field = Field::new("Service Info", "wifi_nan.sda.service_info", Kind::Bytes);

/// Decode length-prefixed matching filter entries until the region is
/// exhausted.
fn matching_filter<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    while !r.at_end() {
        let len = r.u8(&MATCHING_FILTER_ENTRY_LEN)?;
        r.bytes(&MATCHING_FILTER_ENTRY, len.into())?;
    }
    Ok(())
}

/// Decode a service response filter, control byte included.
fn service_response_filter<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    let control = r.bitmask(
        &SRF_CTRL,
        &[&SRF_TYPE, &SRF_INCLUDE, &SRF_BLOOM_FILTER_INDEX, &SRF_CTRL_RESERVED],
    )?;

    if control & 0x01 != 0 {
        r.rest(&SRF_BLOOM_FILTER);
    } else {
        while !r.at_end() {
            r.ether(&SRF_ADDRESS)?;
        }
    }
    Ok(())
}

/// Service Descriptor.
pub fn service_descriptor<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.bytes(&SERVICE_ID, SERVICE_ID_LEN)?;
    r.u8(&INSTANCE_ID)?;
    r.u8(&REQUESTOR_INSTANCE_ID)?;
    let control = r.bitmask(
        &SERVICE_CTRL,
        &[
            &SERVICE_CTRL_TYPE,
            &SERVICE_CTRL_MATCHING_FILTER,
            &SERVICE_CTRL_SRF,
            &SERVICE_CTRL_SERVICE_INFO,
            &SERVICE_CTRL_DISCOVERY_RANGE,
            &SERVICE_CTRL_BINDING_BITMAP,
            &SERVICE_CTRL_RESERVED,
        ],
    )?;

    if control & 0x40 != 0 {
        r.u16(&BINDING_BITMAP)?;
    }

    if control & 0x04 != 0 {
        let len = r.u8(&MATCHING_FILTER_LEN)?;
        r.group("Matching Filter", len.into(), matching_filter)?;
    }

    if control & 0x08 != 0 {
        let len = r.u8(&SRF_LEN)?;
        r.group("Service Response Filter", len.into(), service_response_filter)?;
    }

    if control & 0x10 != 0 {
        let len = r.u8(&SERVICE_INFO_LEN)?;
        r.bytes(&SERVICE_INFO, len.into())?;
    }

    Ok(())
}

static CONNECTION_CAPABILITY: Field = Field::new("Connection Capability Bitmap", "wifi_nan.conn_cap", Kind::U16);
static CONN_CAP_WFD: Field = Field::new("Wi-Fi Direct", "wifi_nan.conn_cap.wfd", Kind::Bool)
    .mask(0x0001)
    .strings(yes_no);
static CONN_CAP_WFDS: Field = Field::new("Wi-Fi Direct Services", "wifi_nan.conn_cap.wfds", Kind::Bool)
    .mask(0x0002)
    .strings(yes_no);
static CONN_CAP_TDLS: Field = Field::new("TDLS", "wifi_nan.conn_cap.tdls", Kind::Bool)
    .mask(0x0004)
    .strings(yes_no);
static CONN_CAP_WLAN_INFRA: Field = Field::new("WLAN Infrastructure", "wifi_nan.conn_cap.wlan_infra", Kind::Bool)
    .mask(0x0008)
    .strings(yes_no);
static CONN_CAP_IBSS: Field = Field::new("IBSS", "wifi_nan.conn_cap.ibss", Kind::Bool)
    .mask(0x0010)
    .strings(yes_no);
static CONN_CAP_MESH: Field = Field::new("Mesh", "wifi_nan.conn_cap.mesh", Kind::Bool)
    .mask(0x0020)
    .strings(yes_no);
static CONNECTION_CAPABILITY_RESERVED: Field =
    Field::new("Reserved", "wifi_nan.conn_cap.reserved", Kind::U16).mask(0xFFC0);

/// NAN Connection Capability.
pub fn connection_capability<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.bitmask(
        &CONNECTION_CAPABILITY,
        &[
            &CONN_CAP_WFD,
            &CONN_CAP_WFDS,
            &CONN_CAP_TDLS,
            &CONN_CAP_WLAN_INFRA,
            &CONN_CAP_IBSS,
            &CONN_CAP_MESH,
            &CONNECTION_CAPABILITY_RESERVED,
        ],
    )
    .map(|_| ())
}

/// Further NAN Service Discovery.
pub fn further_service_discovery<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    map_control(r)?;
    availability_bitmap(r)
}

static FAM_MAP_ID: Field = Field::new("Map ID", "wifi_nan.fam.map_id", Kind::U8);
static FAM_ENTRY_CTRL: Field = Field::new("Entry Control", "wifi_nan.fam.entry_ctrl", Kind::U8);
static FAM_DURATION: Field = Field::new("Availability Interval Duration", "wifi_nan.fam.entry_ctrl.duration", Kind::U8)
    .mask(0x03)
    .strings(super::tables::availability_interval_duration);
static FAM_REPEAT: Field = Field::new("Repeat", "wifi_nan.fam.entry_ctrl.repeat", Kind::Bool)
    .mask(0x04)
    .strings(yes_no);
static FAM_ENTRY_CTRL_RESERVED: Field =
    Field::new("Reserved", "wifi_nan.fam.entry_ctrl.reserved", Kind::U8).mask(0xF8);
static FAM_OP_CLASS: Field = Field::new("Operating Class", "wifi_nan.fam.op_class", Kind::U8);
static FAM_CHANNEL: Field = Field::new("Channel", "wifi_nan.fam.channel", Kind::U8);

/// Further Availability Map.
pub fn further_availability_map<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u8(&FAM_MAP_ID)?;
    r.bitmask(&FAM_ENTRY_CTRL, &[&FAM_DURATION, &FAM_REPEAT, &FAM_ENTRY_CTRL_RESERVED])?;
    r.u8(&FAM_OP_CLASS)?;
    r.u8(&FAM_CHANNEL)?;
    availability_bitmap(r)
}

static COUNTRY_CODE: Field = Field::new("Condensed Country String", "wifi_nan.country_code", Kind::String);

/// Country Code.
pub fn country_code<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.string(&COUNTRY_CODE, 2)
}

static CLUSTER_ID: Field = Field::new("Cluster ID", "wifi_nan.cluster_disc.id", Kind::Ether);
static CLUSTER_TIME_OFFSET: Field =
    Field::new("Cluster Time Offset", "wifi_nan.cluster_disc.time_offset", Kind::U64);
static CLUSTER_ANCHOR_MASTER_RANK: Field =
    Field::new("Anchor Master Rank", "wifi_nan.cluster_disc.amr", Kind::U64);

/// Cluster Discovery.
pub fn cluster_discovery<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.ether(&CLUSTER_ID)?;
    r.uint(&CLUSTER_TIME_OFFSET)?;
    r.uint(&CLUSTER_ANCHOR_MASTER_RANK)?;
    Ok(())
}

static SDEA_INSTANCE_ID: Field = Field::new("Instance ID", "wifi_nan.sdea.instance_id", Kind::U8);
static SDEA_CTRL: Field = Field::new("Control", "wifi_nan.sdea.ctrl", Kind::U16);
static SDEA_FSD: Field = Field::new("FSD Required", "wifi_nan.sdea.ctrl.fsd", Kind::Bool)
    .mask(0x0001)
    .strings(yes_no);
static SDEA_FSD_GAS: Field = Field::new("FSD with GAS", "wifi_nan.sdea.ctrl.fsd_gas", Kind::Bool)
    .mask(0x0002)
    .strings(yes_no);
static SDEA_DATA_PATH: Field = Field::new("Data Path Required", "wifi_nan.sdea.ctrl.data_path", Kind::Bool)
    .mask(0x0004)
    .strings(yes_no);
static SDEA_DATA_PATH_TYPE: Field = Field::new("Data Path Type", "wifi_nan.sdea.ctrl.data_path_type", Kind::U16)
    .mask(0x0008)
    .strings(data_path_type);
static SDEA_MULTICAST_TYPE: Field =
    Field::new("Multicast Type", "wifi_nan.sdea.ctrl.multicast_type", Kind::U16)
        .mask(0x0010)
        .strings(multicast_type);
static SDEA_QOS: Field = Field::new("QoS Required", "wifi_nan.sdea.ctrl.qos", Kind::Bool)
    .mask(0x0020)
    .strings(yes_no);
static SDEA_SECURITY: Field = Field::new("Security Required", "wifi_nan.sdea.ctrl.security", Kind::Bool)
    .mask(0x0040)
    .strings(yes_no);
static SDEA_RANGING: Field = Field::new("Ranging Required", "wifi_nan.sdea.ctrl.ranging", Kind::Bool)
    .mask(0x0080)
    .strings(yes_no);
static SDEA_RANGE_LIMIT_PRESENT: Field =
    Field::new("Range Limit Present", "wifi_nan.sdea.ctrl.range_limit", Kind::Bool)
        .mask(0x0100)
        .strings(yes_no);
static SDEA_SERVICE_UPDATE_PRESENT: Field = Field::new(
    "Service Update Indicator Present",
    "wifi_nan.sdea.ctrl.service_update_indicator",
    Kind::Bool,
)
.mask(0x0200)
.strings(yes_no);
static SDEA_CTRL_RESERVED: Field =
    Field::new("Reserved", "wifi_nan.sdea.ctrl.reserved", Kind::U16).mask(0xFC00);

static SDEA_INGRESS: Field = Field::new("Ingress Range Limit", "wifi_nan.sdea.ingress_range_limit", Kind::U16);
static SDEA_EGRESS: Field = Field::new("Egress Range Limit", "wifi_nan.sdea.egress_range_limit", Kind::U16);
static SDEA_SERVICE_UPDATE: Field =
    Field::new("Service Update Indicator", "wifi_nan.sdea.service_update_indicator", Kind::U8);
static SDEA_SERVICE_INFO_LEN: Field =
    Field::new("Service Info Length", "wifi_nan.sdea.service_info_len", Kind::U16);
static SDEA_OUI: Field = Field::new("OUI", "wifi_nan.sdea.service_info.oui", Kind::U24);
static SDEA_SERVICE_PROTOCOL_TYPE: Field =
    Field::new("Service Protocol Type", "wifi_nan.sdea.service_info.protocol_type", Kind::U8)
        .strings(service_protocol_type);
static SDEA_SERVICE_SPECIFIC_INFO: Field =
    Field::new("Service Specific Info", "wifi_nan.sdea.service_info.specific_info", Kind::Bytes);

/// Decode a service info block: OUI, protocol type and opaque info.
pub fn service_info<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.uint_as(&SDEA_OUI, crate::cursor::Endian::Big)?;
    r.u8(&SDEA_SERVICE_PROTOCOL_TYPE)?;
    r.rest(&SDEA_SERVICE_SPECIFIC_INFO);
    Ok(())
}

/// Service Descriptor Extension.
pub fn service_descriptor_extension<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u8(&SDEA_INSTANCE_ID)?;
    let control = r.bitmask(
        &SDEA_CTRL,
        &[
            &SDEA_FSD,
            &SDEA_FSD_GAS,
            &SDEA_DATA_PATH,
            &SDEA_DATA_PATH_TYPE,
            &SDEA_MULTICAST_TYPE,
            &SDEA_QOS,
            &SDEA_SECURITY,
            &SDEA_RANGING,
            &SDEA_RANGE_LIMIT_PRESENT,
            &SDEA_SERVICE_UPDATE_PRESENT,
            &SDEA_CTRL_RESERVED,
        ],
    )?;

    if control & 0x0100 != 0 {
        r.u16(&SDEA_INGRESS)?;
        r.u16(&SDEA_EGRESS)?;
    }

    if control & 0x0200 != 0 {
        r.u8(&SDEA_SERVICE_UPDATE)?;
    }

    if r.remaining() >= 2 {
        let len = r.u16(&SDEA_SERVICE_INFO_LEN)?;
        r.group("Service Info", len.into(), service_info)?;
    }

    Ok(())
}

static DEV_CAP_MAP_ID: Field = Field::new("Map ID", "wifi_nan.dev_cap.map_id", Kind::U8);
static DEV_CAP_MAP_ID_APPLY: Field = Field::new("Apply to", "wifi_nan.dev_cap.map_id.apply_to", Kind::U8)
    .mask(0x01)
    .strings(map_id_apply);
static DEV_CAP_MAP_ID_VALUE: Field = Field::new("Map ID", "wifi_nan.dev_cap.map_id.id", Kind::U8).mask(0x1E);
static DEV_CAP_MAP_ID_RESERVED: Field =
    Field::new("Reserved", "wifi_nan.dev_cap.map_id.reserved", Kind::U8).mask(0xE0);

static COMMITTED_DW: Field = Field::new("Committed DW Info", "wifi_nan.dev_cap.committed_dw", Kind::U16);
static COMMITTED_DW_24: Field = Field::new("2.4 GHz DW", "wifi_nan.dev_cap.committed_dw.24ghz", Kind::U16).mask(0x0007);
static COMMITTED_DW_5: Field = Field::new("5 GHz DW", "wifi_nan.dev_cap.committed_dw.5ghz", Kind::U16).mask(0x0038);
static COMMITTED_DW_24_OVERWRITE: Field =
    Field::new("2.4 GHz DW Overwrite", "wifi_nan.dev_cap.committed_dw.24ghz_overwrite", Kind::U16).mask(0x03C0);
static COMMITTED_DW_5_OVERWRITE: Field =
    Field::new("5 GHz DW Overwrite", "wifi_nan.dev_cap.committed_dw.5ghz_overwrite", Kind::U16).mask(0x3C00);
static COMMITTED_DW_RESERVED: Field =
    Field::new("Reserved", "wifi_nan.dev_cap.committed_dw.reserved", Kind::U16).mask(0xC000);

static SUPPORTED_BANDS: Field = Field::new("Supported Bands", "wifi_nan.dev_cap.supported_bands", Kind::U8);
static BAND_SUB_1: Field = Field::new("Sub-1 GHz", "wifi_nan.dev_cap.supported_bands.sub_1ghz", Kind::Bool)
    .mask(0x02)
    .strings(yes_no);
static BAND_24: Field = Field::new("2.4 GHz", "wifi_nan.dev_cap.supported_bands.24ghz", Kind::Bool)
    .mask(0x04)
    .strings(yes_no);
static BAND_5: Field = Field::new("4.9 and 5 GHz", "wifi_nan.dev_cap.supported_bands.5ghz", Kind::Bool)
    .mask(0x10)
    .strings(yes_no);
static BAND_60: Field = Field::new("60 GHz", "wifi_nan.dev_cap.supported_bands.60ghz", Kind::Bool)
    .mask(0x80)
    .strings(yes_no);
static SUPPORTED_BANDS_RESERVED: Field =
    Field::new("Reserved", "wifi_nan.dev_cap.supported_bands.reserved", Kind::U8).mask(0x69);

static OPERATION_MODE: Field = Field::new("Operation Mode", "wifi_nan.dev_cap.op_mode", Kind::U8);
static OP_MODE_VHT: Field = Field::new("PHY Mode VHT", "wifi_nan.dev_cap.op_mode.vht", Kind::Bool)
    .mask(0x01)
    .strings(yes_no);
static OP_MODE_VHT8080: Field = Field::new("VHT 80+80", "wifi_nan.dev_cap.op_mode.vht8080", Kind::Bool)
    .mask(0x02)
    .strings(yes_no);
static OP_MODE_VHT160: Field = Field::new("VHT 160", "wifi_nan.dev_cap.op_mode.vht160", Kind::Bool)
    .mask(0x04)
    .strings(yes_no);
static OP_MODE_PAGING: Field = Field::new("Paging NDL Support", "wifi_nan.dev_cap.op_mode.paging_ndl", Kind::Bool)
    .mask(0x08)
    .strings(yes_no);
static OPERATION_MODE_RESERVED: Field =
    Field::new("Reserved", "wifi_nan.dev_cap.op_mode.reserved", Kind::U8).mask(0xF0);

static ANTENNAS: Field = Field::new("Number of Antennas", "wifi_nan.dev_cap.antennas", Kind::U8);
static ANTENNAS_TX: Field = Field::new("Number of TX Antennas", "wifi_nan.dev_cap.antennas.tx", Kind::U8).mask(0x0F);
static ANTENNAS_RX: Field = Field::new("Number of RX Antennas", "wifi_nan.dev_cap.antennas.rx", Kind::U8).mask(0xF0);

static MAX_CHANNEL_SWITCH_TIME: Field =
    Field::new("Max Channel Switch Time (us)", "wifi_nan.dev_cap.max_channel_switch_time", Kind::U16);

static CAPABILITIES: Field = Field::new("Capabilities", "wifi_nan.dev_cap.capabilities", Kind::U8);
static CAP_DFS_MASTER: Field = Field::new("DFS Master", "wifi_nan.dev_cap.capabilities.dfs_master", Kind::Bool)
    .mask(0x01)
    .strings(yes_no);
static CAP_EXTENDED_KEY_ID: Field =
    Field::new("Extended Key ID", "wifi_nan.dev_cap.capabilities.extended_key_id", Kind::Bool)
        .mask(0x02)
        .strings(yes_no);
static CAP_SIMULTANEOUS_NDP: Field = Field::new(
    "Simultaneous NDP Reception",
    "wifi_nan.dev_cap.capabilities.simultaneous_ndp",
    Kind::Bool,
)
.mask(0x04)
.strings(yes_no);
static CAP_NDPE: Field = Field::new("NDPE Attribute Support", "wifi_nan.dev_cap.capabilities.ndpe", Kind::Bool)
    .mask(0x08)
    .strings(yes_no);
static CAPABILITIES_RESERVED: Field =
    Field::new("Reserved", "wifi_nan.dev_cap.capabilities.reserved", Kind::U8).mask(0xF0);

/// Device Capability.
pub fn device_capability<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.bitmask(
        &DEV_CAP_MAP_ID,
        &[&DEV_CAP_MAP_ID_APPLY, &DEV_CAP_MAP_ID_VALUE, &DEV_CAP_MAP_ID_RESERVED],
    )?;
    r.bitmask(
        &COMMITTED_DW,
        &[
            &COMMITTED_DW_24,
            &COMMITTED_DW_5,
            &COMMITTED_DW_24_OVERWRITE,
            &COMMITTED_DW_5_OVERWRITE,
            &COMMITTED_DW_RESERVED,
        ],
    )?;
    r.bitmask(
        &SUPPORTED_BANDS,
        &[&BAND_SUB_1, &BAND_24, &BAND_5, &BAND_60, &SUPPORTED_BANDS_RESERVED],
    )?;
    r.bitmask(
        &OPERATION_MODE,
        &[
            &OP_MODE_VHT,
            &OP_MODE_VHT8080,
            &OP_MODE_VHT160,
            &OP_MODE_PAGING,
            &OPERATION_MODE_RESERVED,
        ],
    )?;
    r.bitmask(&ANTENNAS, &[&ANTENNAS_TX, &ANTENNAS_RX])?;
    r.u16(&MAX_CHANNEL_SWITCH_TIME)?;
    r.bitmask(
        &CAPABILITIES,
        &[
            &CAP_DFS_MASTER,
            &CAP_EXTENDED_KEY_ID,
            &CAP_SIMULTANEOUS_NDP,
            &CAP_NDPE,
            &CAPABILITIES_RESERVED,
        ],
    )?;
    Ok(())
}
