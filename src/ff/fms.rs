//! FMS fieldbus message specification services.

use crate::{
    error::Error,
    reader::Reader,
    sink::{Field, FieldSink, Kind},
};

use super::{
    common::{empty, error_tail, list, reserved},
    dispatch::{Leaf, ServiceKey},
    tables::{abort_id, abort_reason, consequence, final_result, logical_status, physical_status, pi_state},
};

/// Request, response and error labels of a confirmed service.
macro_rules! labels {
    ($name:literal) => {
        [
            concat!("FMS ", $name, " Request"),
            concat!("FMS ", $name, " Response"),
            concat!("FMS ", $name, " Error"),
        ]
    };
}

static INDEX: Field = Field::new("Index", "ff.fms.idx", Kind::U32);
static SUBINDEX: Field = Field::new("Subindex", "ff.fms.subidx", Kind::U32);
static VALUE: Field = Field::new("Value", "ff.fms.value", Kind::Bytes);
static MORE_FOLLOWS: Field = Field::new("More Follows", "ff.fms.more_follows", Kind::Bool);
static LOAD_DATA: Field = Field::new("Load Data", "ff.fms.load_data", Kind::Bytes);
static FINAL_RESULT: Field =
    Field::new("Final Result", "ff.fms.final_result", Kind::U8).strings(final_result);

fn index<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u32(&INDEX).map(|_| ())
}

fn index_value<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u32(&INDEX)?;
    r.rest(&VALUE);
    Ok(())
}

fn value<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.rest(&VALUE);
    Ok(())
}

fn subindex<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u32(&INDEX)?;
    r.u32(&SUBINDEX)?;
    Ok(())
}

fn subindex_value<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    subindex(r)?;
    r.rest(&VALUE);
    Ok(())
}

static LOGICAL_STATUS: Field =
    Field::new("Logical Status", "ff.fms.logical_status", Kind::U8).strings(logical_status);
static PHYSICAL_STATUS: Field =
    Field::new("Physical Status", "ff.fms.physical_status", Kind::U8).strings(physical_status);
static LOCAL_DETAIL: Field = Field::new("Local Detail", "ff.fms.local_detail", Kind::Bytes);

fn status<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u8(&LOGICAL_STATUS)?;
    r.u8(&PHYSICAL_STATUS)?;
    reserved(r, 2)?;
    r.bytes(&LOCAL_DETAIL, 4)?;
    Ok(())
}

static VENDOR_NAME: Field = Field::new("Vendor Name", "ff.fms.vendor_name", Kind::String);
static MODEL_NAME: Field = Field::new("Model Name", "ff.fms.model_name", Kind::String);
static REVISION: Field = Field::new("Revision", "ff.fms.revision", Kind::String);

fn identify_rsp<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.string(&VENDOR_NAME, 32)?;
    r.string(&MODEL_NAME, 32)?;
    r.string(&REVISION, 32)
}

static ALL_ATTRS: Field = Field::new("All Attributes", "ff.fms.get_od.all_attrs", Kind::Bool);
static START_IDX_FLAG: Field =
    Field::new("Start Index Flag", "ff.fms.get_od.start_idx_flag", Kind::Bool);
static NUM_OF_INDEXES: Field = Field::new("Number of Indexes", "ff.fms.num_of_indexes", Kind::U32);
static LIST_INDEX: Field = Field::new("Index", "ff.fms.list.idx", Kind::U32);

/// Read a count of indexes and the list it describes.
fn index_list<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    let count = r.u32(&NUM_OF_INDEXES)?;
    list(r, "Index List", count as usize, 4, |r| r.u32(&LIST_INDEX).map(|_| ()))
}

fn get_od_req<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.boolean(&ALL_ATTRS)?;
    r.boolean(&START_IDX_FLAG)?;
    reserved(r, 2)?;
    index_list(r)
}

static NUM_OF_OBJ_DESC: Field =
    Field::new("Number of Object Descriptions", "ff.fms.num_of_obj_desc", Kind::U8);
static OBJ_DESC_LEN: Field = Field::new("Length", "ff.fms.obj_desc.len", Kind::U8);
static OBJ_DESC: Field = Field::new("Object Description", "ff.fms.obj_desc", Kind::Bytes);

/// Read `count` length-prefixed object descriptions.
fn object_descriptions<S: FieldSink + ?Sized>(
    r: &mut Reader<'_, '_, S>,
    count: u8,
) -> Result<(), Error> {
    r.cursor().expect_records(count.into(), 1)?;

    for _ in 0..count {
        let n = usize::from(r.cursor().peek_u8()?);
        r.group("Object Description", 1 + n, |r| {
            r.u8(&OBJ_DESC_LEN)?;
            r.bytes(&OBJ_DESC, n)?;
            Ok(())
        })?;
    }

    Ok(())
}

fn get_od_rsp<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.boolean(&MORE_FOLLOWS)?;
    let count = r.u8(&NUM_OF_OBJ_DESC)?;
    reserved(r, 2)?;
    object_descriptions(r, count)
}

static CONSEQUENCE: Field =
    Field::new("Consequence", "ff.fms.consequence", Kind::U16).strings(consequence);

fn initiate_put_od_req<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    reserved(r, 2)?;
    r.u16(&CONSEQUENCE)?;
    Ok(())
}

fn put_od_req<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    let count = r.u8(&NUM_OF_OBJ_DESC)?;
    reserved(r, 3)?;
    object_descriptions(r, count)
}

fn error_index<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    error_tail(r)?;
    index(r)
}

fn segment_req<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u32(&INDEX)?;
    r.boolean(&MORE_FOLLOWS)?;
    reserved(r, 3)?;
    r.rest(&LOAD_DATA);
    Ok(())
}

fn segment_rsp<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.boolean(&MORE_FOLLOWS)?;
    reserved(r, 3)?;
    r.rest(&LOAD_DATA);
    Ok(())
}

fn final_result_rsp<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u8(&FINAL_RESULT)?;
    reserved(r, 3)
}

fn terminate_download_req<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u32(&INDEX)?;
    final_result_rsp(r)
}

static ADDITIONAL_INFO: Field =
    Field::new("Additional Information", "ff.fms.additional_info", Kind::String);

fn domain_req<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u32(&INDEX)?;
    r.string(&ADDITIONAL_INFO, 16)
}

static DELETABLE: Field = Field::new("Deletable", "ff.fms.create_pi.deletable", Kind::Bool);
static REUSABLE: Field = Field::new("Reusable", "ff.fms.create_pi.reusable", Kind::Bool);
static NUM_OF_DOM_IDXES: Field =
    Field::new("Number of Domain Indexes", "ff.fms.num_of_dom_idxes", Kind::U32);
static DOM_IDX: Field = Field::new("Domain Index", "ff.fms.dom_idx", Kind::U32);

fn create_pi_req<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.boolean(&DELETABLE)?;
    r.boolean(&REUSABLE)?;
    reserved(r, 2)?;
    let count = r.u32(&NUM_OF_DOM_IDXES)?;
    list(r, "Domain Index List", count as usize, 4, |r| r.u32(&DOM_IDX).map(|_| ()))
}

static EXECUTION_ARGUMENT: Field =
    Field::new("Execution Argument", "ff.fms.execution_argument", Kind::Bytes);
static PI_STATE: Field = Field::new("PI State", "ff.fms.pi_state", Kind::U8).strings(pi_state);

fn execution_req<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u32(&INDEX)?;
    r.rest(&EXECUTION_ARGUMENT);
    Ok(())
}

fn pi_error<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    error_tail(r)?;
    r.u8(&PI_STATE)?;
    reserved(r, 3)
}

static EVENT_NUM: Field = Field::new("Event Number", "ff.fms.event_num", Kind::U32);
static ENABLED: Field = Field::new("Enabled", "ff.fms.enabled", Kind::Bool);

fn event_notification<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u32(&INDEX)?;
    r.u32(&EVENT_NUM)?;
    r.rest(&VALUE);
    Ok(())
}

fn alter_ev_condition_req<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u32(&INDEX)?;
    r.boolean(&ENABLED)?;
    reserved(r, 3)
}

fn ack_ev_notification_req<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u32(&INDEX)?;
    r.u32(&EVENT_NUM)?;
    Ok(())
}

static VER_OD_CALLING: Field = Field::new("Version OD Calling", "ff.fms.init.ver_od_calling", Kind::I16);
static PROF_NUM_CALLING: Field =
    Field::new("Profile Number Calling", "ff.fms.init.prof_num_calling", Kind::Bytes);
static ACCESS_PROTECTION_CALLING: Field = Field::new(
    "Access Protection Supported Calling",
    "ff.fms.init.access_protection_supported_calling",
    Kind::Bool,
);
static PASSWD_CALLING: Field = Field::new(
    "Password and Access Groups Calling",
    "ff.fms.init.passwd_and_access_grps_calling",
    Kind::U16,
);
static VER_OD_CALLED: Field = Field::new("Version OD Called", "ff.fms.init.ver_od_called", Kind::I16);
static PROF_NUM_CALLED: Field =
    Field::new("Profile Number Called", "ff.fms.init.prof_num_called", Kind::Bytes);

fn initiate_req<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.i16(&VER_OD_CALLING)?;
    r.bytes(&PROF_NUM_CALLING, 2)?;
    r.boolean(&ACCESS_PROTECTION_CALLING)?;
    reserved(r, 1)?;
    r.u16(&PASSWD_CALLING)?;
    Ok(())
}

fn initiate_rsp<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.i16(&VER_OD_CALLED)?;
    r.bytes(&PROF_NUM_CALLED, 2)?;
    Ok(())
}

static ABORT_ID: Field = Field::new("Abort Identifier", "ff.fms.abort.id", Kind::U8).strings(abort_id);
static REASON_CODE: Field =
    Field::new("Reason Code", "ff.fms.abort.reason_code", Kind::U8).strings(abort_reason);
static ABORT_DETAIL: Field = Field::new("Abort Detail", "ff.fms.abort.detail", Kind::Bytes);

fn abort<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u8(&ABORT_ID)?;
    r.u8(&REASON_CODE)?;
    reserved(r, 2)?;
    r.bytes(&ABORT_DETAIL, 16)?;
    Ok(())
}

pub(super) fn dissect<S: FieldSink + ?Sized>(
    r: &mut Reader<'_, '_, S>,
    key: &ServiceKey,
    leaf: &Leaf<'_>,
) -> Result<Option<&'static str>, Error> {
    if !key.confirmed {
        return match key.service {
            1 => leaf.run(r, "FMS Unsolicited Status Request", status),
            30 => leaf.run(r, "FMS Information Report Request", index_value),
            31 => leaf.run(r, "FMS Information Report On Change Request", index_value),
            32 => leaf.run(r, "FMS Event Notification Request", event_notification),
            84 => leaf.run(
                r,
                "FMS Information Report with Subindex Request",
                subindex_value,
            ),
            85 => leaf.run(
                r,
                "FMS Information Report On Change with Subindex Request",
                subindex_value,
            ),
            112 => leaf.run(r, "FMS Abort Request", abort),
            _ => Ok(None),
        };
    }

    match key.service {
        0 => leaf.by_type(r, labels!("Status"), empty, status, error_tail),
        2 => leaf.by_type(r, labels!("Identify"), empty, identify_rsp, error_tail),
        4 => leaf.by_type(r, labels!("Get OD"), get_od_req, get_od_rsp, error_tail),
        5 => leaf.by_type(r, labels!("Initiate Put OD"), initiate_put_od_req, empty, error_tail),
        6 => leaf.by_type(r, labels!("Put OD"), put_od_req, empty, error_tail),
        7 => leaf.by_type(r, labels!("Terminate Put OD"), empty, empty, error_index),
        8 => leaf.by_type(
            r,
            labels!("Generic Initiate Download Sequence"),
            index,
            empty,
            error_tail,
        ),
        9 => leaf.by_type(r, labels!("Generic Download Segment"), segment_req, empty, error_tail),
        10 => leaf.by_type(
            r,
            labels!("Generic Terminate Download Sequence"),
            index,
            final_result_rsp,
            error_tail,
        ),
        11 => leaf.by_type(r, labels!("Initiate Download Sequence"), index, empty, error_tail),
        12 => leaf.by_type(r, labels!("Download Segment"), index, segment_rsp, error_tail),
        13 => leaf.by_type(
            r,
            labels!("Terminate Download Sequence"),
            terminate_download_req,
            empty,
            error_tail,
        ),
        14 => leaf.by_type(r, labels!("Initiate Upload Sequence"), index, empty, error_tail),
        15 => leaf.by_type(r, labels!("Upload Segment"), index, segment_rsp, error_tail),
        16 => leaf.by_type(r, labels!("Terminate Upload Sequence"), index, empty, error_tail),
        17 => leaf.by_type(r, labels!("Request Domain Download"), domain_req, empty, error_tail),
        18 => leaf.by_type(r, labels!("Request Domain Upload"), domain_req, empty, error_tail),
        19 => leaf.by_type(r, labels!("Create Program Invocation"), create_pi_req, index, error_tail),
        20 => leaf.by_type(r, labels!("Delete Program Invocation"), index, empty, error_tail),
        21 => leaf.by_type(r, labels!("Start"), execution_req, empty, pi_error),
        22 => leaf.by_type(r, labels!("Stop"), index, empty, pi_error),
        23 => leaf.by_type(r, labels!("Resume"), execution_req, empty, pi_error),
        24 => leaf.by_type(r, labels!("Reset"), index, empty, pi_error),
        25 => leaf.by_type(r, labels!("Kill"), index, empty, error_tail),
        26 => leaf.by_type(r, labels!("Read"), index, value, error_tail),
        27 => leaf.by_type(r, labels!("Write"), index_value, empty, error_tail),
        28 => leaf.by_type(r, labels!("Define Variable List"), index_list, index, error_tail),
        29 => leaf.by_type(r, labels!("Delete Variable List"), index, empty, error_tail),
        33 => leaf.by_type(
            r,
            labels!("Alter Event Condition Monitoring"),
            alter_ev_condition_req,
            empty,
            error_tail,
        ),
        34 => leaf.by_type(
            r,
            labels!("Acknowledge Event Notification"),
            ack_ev_notification_req,
            empty,
            error_tail,
        ),
        82 => leaf.by_type(r, labels!("Read with Subindex"), subindex, value, error_tail),
        83 => leaf.by_type(r, labels!("Write with Subindex"), subindex_value, empty, error_tail),
        96 => leaf.by_type(r, labels!("Initiate"), initiate_req, initiate_rsp, error_tail),
        _ => Ok(None),
    }
}
