//! LAN redundancy services.

use crate::{
    error::Error,
    reader::Reader,
    sink::{Field, FieldSink, Kind},
};

use super::{
    common::{empty, error_tail, list, pd_tag, reserved},
    dispatch::{Leaf, ServiceKey},
};

pub const GET_INFO: u8 = 1;
pub const PUT_INFO: u8 = 2;
pub const GET_STATISTICS: u8 = 3;
pub const DIAGNOSTIC: u8 = 4;

static LR_ATTRS_VER: Field = Field::new("LAN Redundancy Attributes Version", "ff.lr.lr_attrs_ver", Kind::U32);
static MAX_MSG_NUM_DIFF: Field =
    Field::new("Max Message Number Difference", "ff.lr.max_msg_num_diff", Kind::U8);
static DIAG_MSG_INTVL: Field =
    Field::new("Diagnostic Message Interval", "ff.lr.diag_msg_intvl", Kind::U32);
static AGING_TIME: Field = Field::new("Aging Time", "ff.lr.aging_time", Kind::U32);
static DIAG_MSG_IF_A_SEND_ADDR: Field = Field::new(
    "Diagnostic Message Interface A Send Address",
    "ff.lr.diag_msg_if_a_send_addr",
    Kind::Ipv6,
);
static DIAG_MSG_IF_A_RECV_ADDR: Field = Field::new(
    "Diagnostic Message Interface A Receive Address",
    "ff.lr.diag_msg_if_a_recv_addr",
    Kind::Ipv6,
);
static DIAG_MSG_IF_B_SEND_ADDR: Field = Field::new(
    "Diagnostic Message Interface B Send Address",
    "ff.lr.diag_msg_if_b_send_addr",
    Kind::Ipv6,
);
static DIAG_MSG_IF_B_RECV_ADDR: Field = Field::new(
    "Diagnostic Message Interface B Receive Address",
    "ff.lr.diag_msg_if_b_recv_addr",
    Kind::Ipv6,
);

/// The redundancy attributes exchanged by Get and Put Redundancy Info.
fn redundancy_info<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u32(&LR_ATTRS_VER)?;
    r.u8(&MAX_MSG_NUM_DIFF)?;
    reserved(r, 1)?;
    r.u32(&DIAG_MSG_INTVL)?;
    r.u32(&AGING_TIME)?;
    r.ipv6(&DIAG_MSG_IF_A_SEND_ADDR)?;
    r.ipv6(&DIAG_MSG_IF_A_RECV_ADDR)?;
    r.ipv6(&DIAG_MSG_IF_B_SEND_ADDR)?;
    r.ipv6(&DIAG_MSG_IF_B_RECV_ADDR)?;
    Ok(())
}

static NUM_DIAG_SVR_IND_RECV_A: Field = Field::new(
    "Number of Diagnostic Server Indications Received on Interface A",
    "ff.lr.num_diag_svr_ind_recv_a",
    Kind::U32,
);
static NUM_DIAG_SVR_IND_MISS_A: Field = Field::new(
    "Number of Diagnostic Server Indications Missed on Interface A",
    "ff.lr.num_diag_svr_ind_miss_a",
    Kind::U32,
);
static NUM_REM_DEV_DIAG_RECV_FAULT_A: Field = Field::new(
    "Number of Remote Device Diagnostic Receive Faults on Interface A",
    "ff.lr.num_rem_dev_diag_recv_fault_a",
    Kind::U32,
);
static NUM_DIAG_SVR_IND_RECV_B: Field = Field::new(
    "Number of Diagnostic Server Indications Received on Interface B",
    "ff.lr.num_diag_svr_ind_recv_b",
    Kind::U32,
);
static NUM_DIAG_SVR_IND_MISS_B: Field = Field::new(
    "Number of Diagnostic Server Indications Missed on Interface B",
    "ff.lr.num_diag_svr_ind_miss_b",
    Kind::U32,
);
static NUM_REM_DEV_DIAG_RECV_FAULT_B: Field = Field::new(
    "Number of Remote Device Diagnostic Receive Faults on Interface B",
    "ff.lr.num_rem_dev_diag_recv_fault_b",
    Kind::U32,
);
static NUM_X_CABLE_STAT: Field =
    Field::new("Number of X Cable Statistics", "ff.lr.num_x_cable_stat", Kind::U32);
static X_CABLE_STAT: Field = Field::new("X Cable Statistics", "ff.lr.x_cable_stat", Kind::U32);

fn get_statistics_rsp<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u32(&NUM_DIAG_SVR_IND_RECV_A)?;
    r.u32(&NUM_DIAG_SVR_IND_MISS_A)?;
    r.u32(&NUM_REM_DEV_DIAG_RECV_FAULT_A)?;
    r.u32(&NUM_DIAG_SVR_IND_RECV_B)?;
    r.u32(&NUM_DIAG_SVR_IND_MISS_B)?;
    r.u32(&NUM_REM_DEV_DIAG_RECV_FAULT_B)?;

    let count = r.u32(&NUM_X_CABLE_STAT)?;
    list(r, "X Cable Statistics", count as usize, 4, |r| {
        r.u32(&X_CABLE_STAT).map(|_| ())
    })
}

static DEV_IDX: Field = Field::new("Device Index", "ff.lr.dev_idx", Kind::U16);
static NUM_OF_NETWORK_IFS: Field =
    Field::new("Number of Network Interfaces", "ff.lr.num_of_network_ifs", Kind::U8);
static TRANSMISSION_IF: Field =
    Field::new("Transmission Interface", "ff.lr.transmission_if", Kind::U8);
static IF_A_TO_A_STATUS: Field =
    Field::new("Interface A to A Status", "ff.lr.if_a_to_a_status", Kind::U32);
static IF_B_TO_A_STATUS: Field =
    Field::new("Interface B to A Status", "ff.lr.if_b_to_a_status", Kind::U32);
static IF_A_TO_B_STATUS: Field =
    Field::new("Interface A to B Status", "ff.lr.if_a_to_b_status", Kind::U32);
static IF_B_TO_B_STATUS: Field =
    Field::new("Interface B to B Status", "ff.lr.if_b_to_b_status", Kind::U32);

fn diagnostic<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u16(&DEV_IDX)?;
    r.u8(&NUM_OF_NETWORK_IFS)?;
    r.u8(&TRANSMISSION_IF)?;
    r.u32(&DIAG_MSG_INTVL)?;
    pd_tag(r)?;
    r.u32(&IF_A_TO_A_STATUS)?;
    r.u32(&IF_B_TO_A_STATUS)?;
    r.u32(&IF_A_TO_B_STATUS)?;
    r.u32(&IF_B_TO_B_STATUS)?;
    Ok(())
}

pub(super) fn dissect<S: FieldSink + ?Sized>(
    r: &mut Reader<'_, '_, S>,
    key: &ServiceKey,
    leaf: &Leaf<'_>,
) -> Result<Option<&'static str>, Error> {
    match (key.confirmed, key.service) {
        (false, DIAGNOSTIC) => leaf.run(r, "LAN Redundancy Diagnostic Message Request", diagnostic),
        (true, GET_INFO) => leaf.by_type(
            r,
            [
                "LAN Redundancy Get Information Request",
                "LAN Redundancy Get Information Response",
                "LAN Redundancy Get Information Error",
            ],
            empty,
            redundancy_info,
            error_tail,
        ),
        (true, PUT_INFO) => leaf.by_type(
            r,
            [
                "LAN Redundancy Put Information Request",
                "LAN Redundancy Put Information Response",
                "LAN Redundancy Put Information Error",
            ],
            redundancy_info,
            redundancy_info,
            error_tail,
        ),
        (true, GET_STATISTICS) => leaf.by_type(
            r,
            [
                "LAN Redundancy Get Statistics Request",
                "LAN Redundancy Get Statistics Response",
                "LAN Redundancy Get Statistics Error",
            ],
            empty,
            get_statistics_rsp,
            error_tail,
        ),
        _ => Ok(None),
    }
}
