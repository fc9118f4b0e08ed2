//! Post-NAN connectivity attributes: infrastructure, P2P, IBSS, mesh and
//! ranging, in both their original and extended forms.

use crate::{
    error::Error,
    reader::Reader,
    sink::{Field, FieldSink, Kind},
    tables::yes_no,
};

use super::tables::{availability_interval_duration, device_role};

static MAP_CTRL: Field = Field::new("Map Control", "wifi_nan.map_ctrl", Kind::U8);
static MAP_CTRL_MAP_ID: Field = Field::new("Map ID", "wifi_nan.map_ctrl.map_id", Kind::U8).mask(0x0F);
static MAP_CTRL_DURATION: Field =
    Field::new("Availability Interval Duration", "wifi_nan.map_ctrl.interval_duration", Kind::U8)
        .mask(0x30)
        .strings(availability_interval_duration);
static MAP_CTRL_REPEAT: Field = Field::new("Repeat", "wifi_nan.map_ctrl.repeat", Kind::Bool)
    .mask(0x40)
    .strings(yes_no);
static MAP_CTRL_RESERVED: Field =
    Field::new("Reserved", "wifi_nan.map_ctrl.reserved", Kind::U8).mask(0x80);

static AVAILABILITY_BITMAP: Field =
    Field::new("Availability Intervals Bitmap", "wifi_nan.availability_intervals_bitmap", Kind::Bytes);

/// Decode a one-byte map control.
pub fn map_control<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<u8, Error> {
    r.bitmask(
        &MAP_CTRL,
        &[&MAP_CTRL_MAP_ID, &MAP_CTRL_DURATION, &MAP_CTRL_REPEAT, &MAP_CTRL_RESERVED],
    )
    .map(|v| v as u8)
}

/// Decode an availability intervals bitmap filling the rest of the
/// attribute.
pub fn availability_bitmap<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.rest(&AVAILABILITY_BITMAP);
    Ok(())
}

static BSSID: Field = Field::new("BSSID", "wifi_nan.bssid", Kind::Ether);
static MAC_ADDRESS: Field = Field::new("MAC Address", "wifi_nan.mac_address", Kind::Ether);
static DEVICE_ROLE: Field = Field::new("Device Role", "wifi_nan.device_role", Kind::U8).strings(device_role);

static P2P_ROLE: Field = Field::new("P2P Device Role", "wifi_nan.p2p.role", Kind::U8);
static P2P_ROLE_DEVICE: Field = Field::new("P2P Device", "wifi_nan.p2p.role.device", Kind::Bool)
    .mask(0x01)
    .strings(yes_no);
static P2P_ROLE_GROUP_OWNER: Field = Field::new("P2P Group Owner", "wifi_nan.p2p.role.group_owner", Kind::Bool)
    .mask(0x02)
    .strings(yes_no);
static P2P_ROLE_CLIENT: Field = Field::new("P2P Client", "wifi_nan.p2p.role.client", Kind::Bool)
    .mask(0x04)
    .strings(yes_no);
static P2P_ROLE_RESERVED: Field =
    Field::new("Reserved", "wifi_nan.p2p.role.reserved", Kind::U8).mask(0xF8);

static MESH_ID: Field = Field::new("Mesh ID", "wifi_nan.mesh.id", Kind::Bytes);

static RANGING_PROTOCOL: Field = Field::new("Ranging Protocol", "wifi_nan.ranging.protocol", Kind::U8);

fn p2p_role<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.bitmask(
        &P2P_ROLE,
        &[&P2P_ROLE_DEVICE, &P2P_ROLE_GROUP_OWNER, &P2P_ROLE_CLIENT, &P2P_ROLE_RESERVED],
    )?;
    Ok(())
}

/// WLAN Infrastructure.
pub fn wlan_infra<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.ether(&BSSID)?;
    r.ether(&MAC_ADDRESS)?;
    map_control(r)?;
    r.u8(&DEVICE_ROLE)?;
    availability_bitmap(r)
}

/// P2P Operation.
pub fn p2p_operation<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    p2p_role(r)?;
    r.ether(&MAC_ADDRESS)?;
    map_control(r)?;
    availability_bitmap(r)
}

/// IBSS.
pub fn ibss<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.ether(&BSSID)?;
    r.ether(&MAC_ADDRESS)?;
    map_control(r)?;
    availability_bitmap(r)
}

/// Mesh.
pub fn mesh<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.ether(&MAC_ADDRESS)?;
    map_control(r)?;
    r.rest(&MESH_ID);
    Ok(())
}

/// Ranging.
pub fn ranging<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.ether(&MAC_ADDRESS)?;
    map_control(r)?;
    r.u8(&RANGING_PROTOCOL)?;
    availability_bitmap(r)
}

/// Extended WLAN Infrastructure.
pub fn ext_wlan_infra<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.ether(&BSSID)?;
    r.ether(&MAC_ADDRESS)?;
    r.u8(&DEVICE_ROLE)?;
    Ok(())
}

/// Extended P2P Operation.
pub fn ext_p2p_operation<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    p2p_role(r)?;
    r.ether(&MAC_ADDRESS)?;
    Ok(())
}

/// Extended IBSS.
pub fn ext_ibss<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.ether(&BSSID)?;
    r.ether(&MAC_ADDRESS)?;
    Ok(())
}

/// Extended Mesh.
pub fn ext_mesh<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.ether(&MAC_ADDRESS)?;
    r.rest(&MESH_ID);
    Ok(())
}
