//! Foundation Fieldbus HSE translation tables.

use crate::tables::{ValueTable, lookup};

use super::dispatch::Protocol;

pub static PROTOCOLS: ValueTable = &[
    (1, "FDA Session Management"),
    (2, "SM"),
    (3, "FMS"),
    (4, "LAN Redundancy"),
];

pub static MSG_TYPES: ValueTable = &[
    (0, "Request Message"),
    (1, "Response Message"),
    (2, "Error Message"),
];

pub fn protocol(v: u64) -> &'static str {
    lookup(PROTOCOLS, v)
}

pub fn msg_type(v: u64) -> &'static str {
    lookup(MSG_TYPES, v)
}

pub fn confirmed(v: u64) -> &'static str {
    if v != 0 { "Confirmed" } else { "Unconfirmed" }
}

pub static ERR_CLASSES: ValueTable = &[
    (1, "VFD State"),
    (2, "Application Reference"),
    (3, "Definition"),
    (4, "Resource"),
    (5, "Service"),
    (6, "Access"),
    (7, "OD"),
    (8, "Other"),
    (9, "Rejection"),
    (10, "FF FMS"),
    (11, "FF SM"),
];

static ERR_CODES_VFD_STATE: ValueTable = &[(0, "other")];

static ERR_CODES_APP_REF: ValueTable = &[(0, "other"), (1, "application-unreachable")];

static ERR_CODES_DEFINITION: ValueTable = &[
    (0, "other"),
    (1, "object-undefined"),
    (2, "object-attributes-inconsistent"),
    (3, "name-already-exists"),
];

static ERR_CODES_RESOURCE: ValueTable = &[(0, "other"), (1, "memory-unavailable")];

static ERR_CODES_SERVICE: ValueTable = &[
    (0, "other"),
    (1, "object-state-conflict"),
    (2, "pdu-size"),
    (3, "object-constraint-conflict"),
    (4, "parameter-inconsistent"),
    (5, "illegal-parameter"),
    (6, "permanent-internal-fault"),
    (7, "user-doesnt-respond"),
    (8, "service-not-supported"),
    (9, "session-not-found"),
    (10, "max-sessions-exceeded"),
    (11, "invalid-session-index"),
    (12, "duplicate-request"),
    (13, "resources-busy"),
    (14, "response time-out"),
];

static ERR_CODES_ACCESS: ValueTable = &[
    (0, "object-invalidated"),
    (1, "hardware-fault"),
    (2, "object-access-denied"),
    (3, "invalid-address"),
    (4, "object-attribute-inconsistent"),
    (5, "object-access-unsupported"),
    (6, "object-non-existent"),
    (7, "type-conflict"),
    (8, "named-access-unsupported"),
    (9, "access-to-element-unsupported"),
];

static ERR_CODES_OD: ValueTable = &[
    (0, "other"),
    (1, "name-length-overflow"),
    (2, "od-overflow"),
    (3, "od-write-protected"),
    (4, "extension-length-overflow"),
    (5, "od-description-length-overflow"),
    (6, "operational-problem"),
];

static ERR_CODES_OTHER: ValueTable = &[(0, "other")];

static ERR_CODES_REJECTION: ValueTable = &[
    (0, "other"),
    (1, "invalid-pdu"),
    (2, "pdu-size-exceeded"),
    (3, "unknown-service"),
    (4, "invalid-invoke-id"),
];

static ERR_CODES_FF_FMS: ValueTable = &[
    (0, "other"),
    (1, "invalid-od-version"),
    (2, "od-not-loaded"),
    (3, "index-out-of-range"),
    (4, "subindex-out-of-range"),
];

static ERR_CODES_FF_SM: ValueTable = &[
    (0, "other"),
    (1, "device-not-commissioned"),
    (2, "tag-mismatch"),
    (3, "address-in-use"),
    (4, "invalid-device-index"),
];

pub fn err_class(v: u64) -> &'static str {
    lookup(ERR_CLASSES, v)
}

/// Label an error code, whose meaning depends on its error class.
pub fn err_code(class: u8, code: u8) -> &'static str {
    let table = match class {
        1 => ERR_CODES_VFD_STATE,
        2 => ERR_CODES_APP_REF,
        3 => ERR_CODES_DEFINITION,
        4 => ERR_CODES_RESOURCE,
        5 => ERR_CODES_SERVICE,
        6 => ERR_CODES_ACCESS,
        7 => ERR_CODES_OD,
        8 => ERR_CODES_OTHER,
        9 => ERR_CODES_REJECTION,
        10 => ERR_CODES_FF_FMS,
        11 => ERR_CODES_FF_SM,
        _ => return "Unknown",
    };
    lookup(table, code.into())
}

/// A service: identifier, display name and filter abbreviation.
pub type Service = (u8, &'static str, &'static str);

static FDA_CONFIRMED: &[Service] = &[(1, "Open Session", "open_sess"), (2, "Idle", "idle")];

static FDA_UNCONFIRMED: &[Service] = &[];

static SM_CONFIRMED: &[Service] = &[
    (3, "Identify", "id"),
    (12, "Clear Address", "clear_addr"),
    (14, "Set Assignment Info", "set_assign_info"),
    (15, "Clear Assignment Info", "clear_assign_info"),
];

static SM_UNCONFIRMED: &[Service] = &[
    (1, "Find Tag Query", "find_tag_query"),
    (2, "Find Tag Reply", "find_tag_reply"),
    (16, "Device Annunciation", "dev_annunc"),
];

static FMS_CONFIRMED: &[Service] = &[
    (0, "Status", "status"),
    (2, "Identify", "id"),
    (4, "Get OD", "get_od"),
    (5, "Initiate Put OD", "init_put_od"),
    (6, "Put OD", "put_od"),
    (7, "Terminate Put OD", "terminate_put_od"),
    (8, "Generic Initiate Download Sequence", "gen_init_download_seq"),
    (9, "Generic Download Segment", "gen_download_seg"),
    (10, "Generic Terminate Download Sequence", "gen_terminate_download_seq"),
    (11, "Initiate Download Sequence", "init_download_seq"),
    (12, "Download Segment", "download_seg"),
    (13, "Terminate Download Sequence", "terminate_download_seq"),
    (14, "Initiate Upload Sequence", "init_upload_seq"),
    (15, "Upload Segment", "upload_seg"),
    (16, "Terminate Upload Sequence", "terminate_upload_seq"),
    (17, "Request Domain Download", "req_dom_download"),
    (18, "Request Domain Upload", "req_dom_upload"),
    (19, "Create Program Invocation", "create_pi"),
    (20, "Delete Program Invocation", "del_pi"),
    (21, "Start", "start"),
    (22, "Stop", "stop"),
    (23, "Resume", "resume"),
    (24, "Reset", "reset"),
    (25, "Kill", "kill"),
    (26, "Read", "read"),
    (27, "Write", "write"),
    (28, "Define Variable List", "def_var_list"),
    (29, "Delete Variable List", "del_var_list"),
    (33, "Alter Event Condition Monitoring", "alter_ev_condition_monitoring"),
    (34, "Acknowledge Event Notification", "ack_ev_notification"),
    (82, "Read with Subindex", "read_with_subidx"),
    (83, "Write with Subindex", "write_with_subidx"),
    (96, "Initiate", "init"),
];

static FMS_UNCONFIRMED: &[Service] = &[
    (1, "Unsolicited Status", "unsolicited_status"),
    (30, "Information Report", "info_report"),
    (31, "Information Report On Change", "info_report_on_change"),
    (32, "Event Notification", "ev_notification"),
    (84, "Information Report with Subindex", "info_report_with_subidx"),
    (85, "Information Report On Change with Subindex", "info_report_on_change_with_subidx"),
    (112, "Abort", "abort"),
];

static LAN_CONFIRMED: &[Service] = &[
    (1, "Get Redundancy Info", "get_info"),
    (2, "Put Redundancy Info", "put_info"),
    (3, "Get Redundancy Statistics", "get_statistics"),
];

static LAN_UNCONFIRMED: &[Service] = &[(4, "Diagnostic Message", "diagnostic_msg")];

/// The service table for a protocol and confirmed flag.
pub fn services(protocol: Protocol, confirmed: bool) -> &'static [Service] {
    match (protocol, confirmed) {
        (Protocol::Fda, true) => FDA_CONFIRMED,
        (Protocol::Fda, false) => FDA_UNCONFIRMED,
        (Protocol::Sm, true) => SM_CONFIRMED,
        (Protocol::Sm, false) => SM_UNCONFIRMED,
        (Protocol::Fms, true) => FMS_CONFIRMED,
        (Protocol::Fms, false) => FMS_UNCONFIRMED,
        (Protocol::Lan, true) => LAN_CONFIRMED,
        (Protocol::Lan, false) => LAN_UNCONFIRMED,
    }
}

/// Look up a service name.
pub fn service_name(protocol: Protocol, confirmed: bool, id: u8) -> &'static str {
    services(protocol, confirmed)
        .iter()
        .find(|(i, ..)| *i == id)
        .map_or("Unknown", |(_, name, _)| *name)
}

pub static QUERY_TYPES: ValueTable = &[
    (0, "FB Tag"),
    (1, "PD Tag"),
    (2, "VFD Tag"),
    (3, "Device ID"),
    (4, "PD Tag and Device ID"),
];

pub fn query_type(v: u64) -> &'static str {
    lookup(QUERY_TYPES, v)
}

pub fn smk_state(v: u64) -> &'static str {
    lookup(&[(1, "Uninitialized"), (2, "Initialized"), (3, "SM Operational")], v)
}

pub fn dev_redundancy_role(v: u64) -> &'static str {
    lookup(&[(0, "Reserved"), (1, "Backup"), (2, "Primary")], v)
}

pub fn redundant_dev_type(v: u64) -> &'static str {
    lookup(&[(0, "Non-redundant"), (1, "Type 1a"), (2, "Type 1b"), (3, "Type 2")], v)
}

pub fn interface(v: u64) -> &'static str {
    lookup(&[(0, "Interface A"), (1, "Interface B")], v)
}

pub fn logical_status(v: u64) -> &'static str {
    lookup(
        &[
            (0, "Ready for communication"),
            (2, "Limited number of services"),
            (4, "OD loading non-interacting"),
            (5, "OD loading interacting"),
        ],
        v,
    )
}

pub fn physical_status(v: u64) -> &'static str {
    lookup(
        &[
            (0, "Operational"),
            (1, "Partially operational"),
            (2, "Inoperable"),
            (3, "Needs commissioning"),
        ],
        v,
    )
}

pub fn consequence(v: u64) -> &'static str {
    lookup(&[(0, "Replace OD"), (1, "Extend OD")], v)
}

pub fn final_result(v: u64) -> &'static str {
    lookup(&[(0, "Success"), (1, "Failure")], v)
}

pub fn pi_state(v: u64) -> &'static str {
    lookup(
        &[
            (0, "Non-existent"),
            (1, "Unrunnable"),
            (2, "Idle"),
            (3, "Running"),
            (4, "Stopped"),
            (5, "Starting"),
            (6, "Stopping"),
            (7, "Resuming"),
            (8, "Resetting"),
        ],
        v,
    )
}

pub fn abort_id(v: u64) -> &'static str {
    lookup(&[(0, "User"), (1, "FMS"), (2, "FDA Session")], v)
}

pub fn abort_reason(v: u64) -> &'static str {
    lookup(
        &[
            (0, "Other"),
            (1, "Max FMS PDU Size Insufficient"),
            (2, "Feature Not Supported"),
            (3, "Version OD Incompatible"),
            (4, "User Initiated"),
            (5, "Password Error"),
            (6, "Profile Number Incompatible"),
            (7, "Limited Services Permitted"),
            (8, "OD Loading Interacting"),
        ],
        v,
    )
}
