//! Wi-Fi NAN translation tables.

use crate::tables::{RangeTable, ValueTable, lookup, lookup_range};

pub static ATTRIBUTES: ValueTable = &[
    (0x00, "Master Indication Attribute"),
    (0x01, "Cluster Attribute"),
    (0x02, "Service ID List Attribute"),
    (0x03, "Service Descriptor Attribute"),
    (0x04, "NAN Connection Capability Attribute"),
    (0x05, "WLAN Infrastructure Attribute"),
    (0x06, "P2P Operation Attribute"),
    (0x07, "IBSS Attribute"),
    (0x08, "Mesh Attribute"),
    (0x09, "Further NAN Service Discovery Attribute"),
    (0x0A, "Further Availability Map Attribute"),
    (0x0B, "Country Code Attribute"),
    (0x0C, "Ranging Attribute"),
    (0x0D, "Cluster Discovery Attribute"),
    (0x0E, "Service Descriptor Extension Attribute"),
    (0x0F, "Device Capability"),
    (0x10, "NDP Attribute"),
    (0x11, "Reserved (NMSG)"),
    (0x12, "NAN Availability"),
    (0x13, "NDC Attribute"),
    (0x14, "NDL Attribute"),
    (0x15, "NDL QoS Attribute"),
    (0x16, "Reserved (Multicast Schedule)"),
    (0x17, "Unaligned Schedule Attribute"),
    (0x18, "Reserved (Unicast Schedule)"),
    (0x19, "Ranging Information Attribute"),
    (0x1A, "Ranging Setup Attribute"),
    (0x1B, "FTM Ranging Report Attribute"),
    (0x1C, "Element Container Attribute"),
    (0x1D, "Extended WLAN Infrastructure Attribute"),
    (0x1E, "Extended P2P Operation Attribute"),
    (0x1F, "Extended IBSS Attribute"),
    (0x20, "Extended Mesh Attribute"),
    (0x21, "Cipher Suite Info Attribute"),
    (0x22, "Security Context Info Attribute"),
    (0x23, "Shared-Key Descriptor Attribute"),
    (0x24, "Reserved (Multicast Schedule Change)"),
    (0x25, "Reserved (Multicast Schedule Owner Change)"),
    (0x26, "Public Availability Attribute"),
    (0x27, "Subscribe Service ID List Attribute"),
    (0x28, "NDP Extension Attribute"),
    (0xDD, "Vendor Specific Attribute"),
];

const UNKNOWN_PREFIX: &[u8] = b"Unknown attribute ID (";
const UNKNOWN_LABEL_CAP: usize = UNKNOWN_PREFIX.len() + 4;

/// `Unknown attribute ID (n)` for every identifier, with its length.
static UNKNOWN_LABELS: [([u8; UNKNOWN_LABEL_CAP], usize); 256] = unknown_labels();

const fn unknown_labels() -> [([u8; UNKNOWN_LABEL_CAP], usize); 256] {
    let mut labels = [([0; UNKNOWN_LABEL_CAP], 0); 256];

    let mut id = 0;
    while id < 256 {
        let mut buf = [0; UNKNOWN_LABEL_CAP];
        let mut len = 0;
        while len < UNKNOWN_PREFIX.len() {
            buf[len] = UNKNOWN_PREFIX[len];
            len += 1;
        }

        let digits = if id >= 100 { 3 } else if id >= 10 { 2 } else { 1 };
        let mut n = id;
        let mut d = digits;
        while d > 0 {
            d -= 1;
            buf[len + d] = b'0' + (n % 10) as u8;
            n /= 10;
        }
        len += digits;
        buf[len] = b')';

        labels[id] = (buf, len + 1);
        id += 1;
    }

    labels
}

/// Label an attribute identifier, naming the identifier when it is unknown.
pub fn attribute(id: u8) -> &'static str {
    ATTRIBUTES.iter().find(|(i, _)| *i == id).map_or_else(
        || {
            let (buf, len) = &UNKNOWN_LABELS[usize::from(id)];
            core::str::from_utf8(&buf[..*len]).unwrap_or("Unknown attribute ID")
        },
        |(_, s)| *s,
    )
}

pub fn attribute_code(v: u64) -> &'static str {
    lookup(ATTRIBUTES, v)
}

pub static ACTION_SUBTYPES: ValueTable = &[
    (0x00, "Reserved"),
    (0x01, "Ranging Request"),
    (0x02, "Ranging Response"),
    (0x03, "Ranging Termination"),
    (0x04, "Ranging Report"),
    (0x05, "Data Path Request"),
    (0x06, "Data Path Response"),
    (0x07, "Data Path Confirm"),
    (0x08, "Data Path Key Installment"),
    (0x09, "Data Path Termination"),
    (0x0A, "Schedule Request"),
    (0x0B, "Schedule Response"),
    (0x0C, "Schedule Confirm"),
    (0x0D, "Schedule Update Notification"),
];

pub fn action_subtype(v: u64) -> &'static str {
    lookup(ACTION_SUBTYPES, v)
}

pub fn service_control_type(v: u64) -> &'static str {
    lookup(&[(0, "Publish"), (1, "Subscribe"), (2, "Follow up")], v)
}

pub fn srf_type(v: u64) -> &'static str {
    lookup(&[(0, "Address Set is a sequence of MAC Addresses"), (1, "Address Set is a Bloom filter")], v)
}

pub fn srf_include(v: u64) -> &'static str {
    lookup(
        &[
            (0, "Only STAs Not Present in Address Set Shall Send Responses"),
            (1, "Only STAs Present in Address Set Shall Send Responses"),
        ],
        v,
    )
}

pub fn map_id_apply(v: u64) -> &'static str {
    lookup(&[(0, "Only specified map"), (1, "All maps")], v)
}

pub fn availability_interval_duration(v: u64) -> &'static str {
    lookup(&[(0, "16 TU"), (1, "32 TU"), (2, "64 TU"), (3, "Reserved")], v)
}

pub fn device_role(v: u64) -> &'static str {
    lookup(
        &[
            (0, "AP"),
            (1, "Non-AP STA associated with AP"),
            (2, "Non-AP STA listening to AP"),
        ],
        v,
    )
}

pub fn usage_preference(v: u64) -> &'static str {
    lookup(&[(0, "Not preferred"), (1, "Low"), (2, "Medium"), (3, "High")], v)
}

pub fn time_bitmap_duration(v: u64) -> &'static str {
    lookup(&[(0, "16 TU"), (1, "32 TU"), (2, "64 TU"), (3, "128 TU")], v)
}

pub fn time_bitmap_period(v: u64) -> &'static str {
    lookup(
        &[
            (0, "No repeat"),
            (1, "128 TU"),
            (2, "256 TU"),
            (3, "512 TU"),
            (4, "1024 TU"),
            (5, "2048 TU"),
            (6, "4096 TU"),
            (7, "8192 TU"),
        ],
        v,
    )
}

pub fn entries_type(v: u64) -> &'static str {
    lookup(&[(0, "Band"), (1, "Operating Class and Channel")], v)
}

pub fn band(v: u64) -> &'static str {
    lookup(
        &[
            (0, "Reserved (for TV white spaces)"),
            (1, "Sub-1 GHz"),
            (2, "2.4 GHz"),
            (3, "Reserved (for 3.6 GHz)"),
            (4, "4.9 and 5 GHz"),
            (5, "Reserved (for 60 GHz)"),
            (6, "45 GHz"),
            (7, "60 GHz"),
        ],
        v,
    )
}

pub fn unaligned_type(v: u64) -> &'static str {
    lookup(
        &[
            (0, "Band ID field included"),
            (1, "Channel Entry included"),
            (2, "Channel Entry with Auxiliary Channel included"),
            (3, "Reserved"),
        ],
        v,
    )
}

pub fn ndp_type(v: u64) -> &'static str {
    lookup(
        &[
            (0, "Request"),
            (1, "Response"),
            (2, "Confirm"),
            (3, "Security Install"),
            (4, "Terminate"),
        ],
        v,
    )
}

pub fn ndl_type(v: u64) -> &'static str {
    lookup(&[(0, "Request"), (1, "Response"), (2, "Confirm")], v)
}

pub fn ranging_type(v: u64) -> &'static str {
    lookup(&[(0, "Request"), (1, "Response"), (2, "Termination")], v)
}

pub fn ndl_setup_reason(v: u64) -> &'static str {
    lookup(&[(0, "NDP"), (1, "FSD using GAS")], v)
}

pub fn ndl_kind(v: u64) -> &'static str {
    lookup(&[(0, "S-NDL"), (1, "Reserved (P-NDL)")], v)
}

/// Statuses of data path and schedule negotiation.
static STATUS_DATA_PATH: RangeTable = &[
    (0, 0, "Continued"),
    (1, 1, "Accepted"),
    (2, 2, "Rejected"),
    (3, 15, "Reserved"),
];

/// Statuses of ranging negotiation.
static STATUS_RANGING: RangeTable = &[(0, 0, "Accepted"), (1, 1, "Rejected"), (2, 15, "Reserved")];

pub fn status_data_path(v: u64) -> &'static str {
    lookup_range(STATUS_DATA_PATH, v)
}

pub fn status_ranging(v: u64) -> &'static str {
    lookup_range(STATUS_RANGING, v)
}

pub static REASON_CODES: ValueTable = &[
    (0, "Reserved"),
    (1, "UNSPECIFIED_REASON"),
    (2, "RESOURCE_LIMITATION"),
    (3, "INVALID_PARAMETERS"),
    (4, "FTM_PARAMETERS_INCAPABLE"),
    (5, "NO_MOVEMENT"),
    (6, "INVALID_AVAILABILITY"),
    (7, "IMMUTABLE_UNACCEPTABLE"),
    (8, "SECURITY_POLICY"),
    (9, "QoS_UNACCEPTABLE"),
    (10, "NDP_REJECTED"),
    (11, "NDL_UNACCEPTABLE"),
    (12, "Ranging Schedule unacceptable"),
];

pub fn reason_code(v: u64) -> &'static str {
    lookup(REASON_CODES, v)
}

pub fn service_protocol_type(v: u64) -> &'static str {
    lookup(&[(0, "Reserved"), (1, "Bonjour"), (2, "Generic"), (3, "CSA Matter")], v)
}

pub fn ndpe_tlv_type(v: u64) -> &'static str {
    lookup(&[(0, "IPv6 Link Local"), (1, "Service Info")], v)
}

pub fn cipher_suite(v: u64) -> &'static str {
    lookup(
        &[
            (0, "Reserved"),
            (1, "NCS-SK-128"),
            (2, "NCS-SK-256"),
            (3, "NCS-PK-2WDH-128"),
            (4, "NCS-PK-2WDH-256"),
            (5, "NCS-GTK-CCMP-128"),
            (6, "NCS-GTK-GCMP-256"),
            (7, "NCS-PK-PASN-128"),
            (8, "NCS-PK-PASN-256"),
        ],
        v,
    )
}

pub fn security_context_id_type(v: u64) -> &'static str {
    lookup(&[(1, "PMKID")], v)
}

pub fn key_descriptor_type(v: u64) -> &'static str {
    lookup(&[(1, "RC4"), (2, "IEEE 802.11 key descriptor")], v)
}

pub fn key_type(v: u64) -> &'static str {
    lookup(&[(0, "Group Key"), (1, "Pairwise Key")], v)
}

pub fn multicast_type(v: u64) -> &'static str {
    lookup(&[(0, "One-to-many"), (1, "Many-to-many")], v)
}

pub fn data_path_type(v: u64) -> &'static str {
    lookup(&[(0, "Unicast NDP"), (1, "Multicast NDP")], v)
}
