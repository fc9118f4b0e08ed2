//! FDA session management services.

use crate::{
    error::Error,
    reader::Reader,
    sink::{Field, FieldSink, Kind},
};

use super::{
    common::{empty, error_tail, pd_tag, reserved},
    dispatch::{Leaf, ServiceKey},
};

pub const OPEN_SESSION: u8 = 1;
pub const IDLE: u8 = 2;

static SESS_IDX: Field = Field::new("Session Index", "ff.fda.open_sess.sess_idx", Kind::U32);
static MAX_BUF_SIZ: Field = Field::new("Max Buffer Size", "ff.fda.open_sess.max_buf_siz", Kind::U32);
static MAX_MSG_LEN: Field =
    Field::new("Max Message Length", "ff.fda.open_sess.max_msg_len", Kind::U32);
static NMA_CONF_USE: Field =
    Field::new("NMA Configuration Use", "ff.fda.open_sess.nma_conf_use", Kind::U8);
static INACTIVITY_CLOSE_TIME: Field =
    Field::new("Inactivity Close Time", "ff.fda.open_sess.inactivity_close_time", Kind::U16);
static TRANSMIT_DELAY_TIME: Field =
    Field::new("Transmit Delay Time", "ff.fda.open_sess.transmit_delay_time", Kind::U32);

/// Open Session request and response share one layout.
fn open_session<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u32(&SESS_IDX)?;
    r.u32(&MAX_BUF_SIZ)?;
    r.u32(&MAX_MSG_LEN)?;
    reserved(r, 1)?;
    r.u8(&NMA_CONF_USE)?;
    r.u16(&INACTIVITY_CLOSE_TIME)?;
    r.u32(&TRANSMIT_DELAY_TIME)?;
    pd_tag(r)
}

pub(super) fn dissect<S: FieldSink + ?Sized>(
    r: &mut Reader<'_, '_, S>,
    key: &ServiceKey,
    leaf: &Leaf<'_>,
) -> Result<Option<&'static str>, Error> {
    if !key.confirmed {
        return Ok(None);
    }

    match key.service {
        OPEN_SESSION => leaf.by_type(
            r,
            [
                "FDA Open Session Request",
                "FDA Open Session Response",
                "FDA Open Session Error",
            ],
            open_session,
            open_session,
            error_tail,
        ),
        IDLE => leaf.by_type(
            r,
            ["FDA Idle Request", "FDA Idle Response", "FDA Idle Error"],
            empty,
            empty,
            error_tail,
        ),
        _ => Ok(None),
    }
}
