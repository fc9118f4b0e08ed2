//! Availability and schedule attributes, and the time bitmaps and channel
//! entries they are built from.

use tracing::debug;

use crate::{
    cursor::Endian,
    error::Error,
    reader::Reader,
    sink::{Field, FieldSink, Kind, Value},
    tables::yes_no,
};

use super::{
    channel::channel_set,
    tables::{band, entries_type, time_bitmap_duration, time_bitmap_period, unaligned_type, usage_preference},
};

/// The shape of every entry in a band/channel entry list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandChannelEntries {
    /// One band identifier byte per entry.
    Bands,
    /// Operating class and channel bitmaps, with an auxiliary bitmap for
    /// non-contiguous bandwidth.
    Channels { non_contiguous: bool },
}

impl BandChannelEntries {
    /// Select the shape from the list's control byte.
    pub fn from_control(control: u8) -> Self {
        if control & 0x01 == 0 {
            Self::Bands
        } else {
            Self::Channels {
                non_contiguous: control & 0x02 != 0,
            }
        }
    }

    pub fn entry_len(self) -> usize {
        match self {
            Self::Bands => 1,
            Self::Channels {
                non_contiguous: false,
            } => 4,
            Self::Channels {
                non_contiguous: true,
            } => 6,
        }
    }
}

/// What follows the control byte of an unaligned schedule window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnalignedShape {
    BandId,
    Channel,
    ChannelWithAux,
}

impl UnalignedShape {
    /// Select the shape from the two-bit window type. Type 3 is reserved.
    pub fn from_type(kind: u8) -> Option<Self> {
        Some(match kind {
            0 => Self::BandId,
            1 => Self::Channel,
            2 => Self::ChannelWithAux,
            _ => return None,
        })
    }

    pub fn len(self) -> usize {
        match self {
            Self::BandId => 1,
            Self::Channel => 4,
            Self::ChannelWithAux => 6,
        }
    }
}

static MAP_ID: Field = Field::new("Map ID", "wifi_nan.map_id", Kind::U8);

static TIME_BITMAP_CTRL: Field = Field::new("Time Bitmap Control", "wifi_nan.time_bitmap.ctrl", Kind::U16);
static TIME_BITMAP_DURATION: Field =
    Field::new("Bit Duration", "wifi_nan.time_bitmap.ctrl.bit_duration", Kind::U16)
        .mask(0x0007)
        .strings(time_bitmap_duration);
static TIME_BITMAP_PERIOD: Field = Field::new("Period", "wifi_nan.time_bitmap.ctrl.period", Kind::U16)
    .mask(0x0038)
    .strings(time_bitmap_period);
static TIME_BITMAP_START: Field =
    Field::new("Start Offset", "wifi_nan.time_bitmap.ctrl.start_offset", Kind::U16).mask(0x7FC0);
static TIME_BITMAP_CTRL_RESERVED: Field =
    Field::new("Reserved", "wifi_nan.time_bitmap.ctrl.reserved", Kind::U16).mask(0x8000);
static TIME_BITMAP_LEN: Field = Field::new("Time Bitmap Length", "wifi_nan.time_bitmap.len", Kind::U8);
static TIME_BITMAP: Field = Field::new("Time Bitmap", "wifi_nan.time_bitmap", Kind::Bytes);

/// Decode a time bitmap control word, length and bitmap.
pub fn time_bitmap<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.bitmask(
        &TIME_BITMAP_CTRL,
        &[
            &TIME_BITMAP_DURATION,
            &TIME_BITMAP_PERIOD,
            &TIME_BITMAP_START,
            &TIME_BITMAP_CTRL_RESERVED,
        ],
    )?;
    let len = r.u8(&TIME_BITMAP_LEN)?;
    r.bytes(&TIME_BITMAP, len.into())?;
    Ok(())
}

/// Size of a schedule entry with an empty time bitmap.
pub const SCHEDULE_ENTRY_MIN_LEN: usize = 4;

/// Decode schedule entries until the region is exhausted.
pub fn schedule_entries<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    while !r.at_end() {
        let mut peek = r.cursor().clone();
        peek.skip(3)?;
        let len = usize::from(peek.u8()?);

        r.group("Schedule Entry", SCHEDULE_ENTRY_MIN_LEN + len, |r| {
            r.u8(&MAP_ID)?;
            time_bitmap(r)
        })?;
    }
    Ok(())
}

static OP_CLASS: Field = Field::new("Operating Class", "wifi_nan.channel_entry.op_class", Kind::U8);
static CHANNEL_BITMAP: Field =
    Field::new("Channel Bitmap", "wifi_nan.channel_entry.channel_bitmap", Kind::U16);
static CHANNEL_SET: Field = Field::new("Channel Set", "wifi_nan.channel_entry.channel_set", Kind::Channels);
static PRIMARY_CHANNEL_BITMAP: Field =
    Field::new("Primary Channel Bitmap", "wifi_nan.channel_entry.primary_bitmap", Kind::U8);
static AUX_CHANNEL_BITMAP: Field =
    Field::new("Auxiliary Channel Bitmap", "wifi_nan.channel_entry.aux_channel_bitmap", Kind::U16);

/// Decode a channel entry, returning its operating class.
///
/// The channel set is published only for operating classes with a row in
/// the channel table.
pub fn channel_entry<S: FieldSink + ?Sized>(
    r: &mut Reader<'_, '_, S>,
    aux: bool,
) -> Result<u8, Error> {
    let op_class = r.u8(&OP_CLASS)?;

    let start = r.offset();
    let bitmap = r.u16(&CHANNEL_BITMAP)?;
    if let Some(set) = channel_set(op_class) {
        let raw = r.cursor().before(2);
        r.emit(
            &CHANNEL_SET,
            start,
            raw,
            Value::Channels(set.select(bitmap)),
            Some(set.label()),
        );
    }

    r.u8(&PRIMARY_CHANNEL_BITMAP)?;
    if aux {
        r.u16(&AUX_CHANNEL_BITMAP)?;
    }

    Ok(op_class)
}

/// Fail for an operating class the channel table has no row for.
fn known_class(op_class: u8) -> Result<(), Error> {
    if channel_set(op_class).is_none() {
        debug!(op_class, "unknown operating class");
        Err(Error::UnknownOperatingClass(op_class))?;
    }
    Ok(())
}

static BAND_CHANNEL_CTRL: Field =
    Field::new("Band/Channel Entries List Control", "wifi_nan.band_channel.ctrl", Kind::U8);
static ENTRIES_TYPE: Field = Field::new("Type", "wifi_nan.band_channel.ctrl.type", Kind::U8)
    .mask(0x01)
    .strings(entries_type);
static NON_CONTIGUOUS_BW: Field =
    Field::new("Non-contiguous Bandwidth", "wifi_nan.band_channel.ctrl.non_contiguous_bw", Kind::Bool)
        .mask(0x02)
        .strings(yes_no);
static NUM_ENTRIES: Field =
    Field::new("Number of Entries", "wifi_nan.band_channel.ctrl.num_entries", Kind::U8).mask(0xF0);
static BAND_CHANNEL_CTRL_RESERVED: Field =
    Field::new("Reserved", "wifi_nan.band_channel.ctrl.reserved", Kind::U8).mask(0x0C);
static BAND_ID: Field = Field::new("Band ID", "wifi_nan.band_id", Kind::U8).strings(band);

/// Decode a band/channel entry list.
///
/// An unknown operating class stops the list.
pub fn band_channel_entries<S: FieldSink + ?Sized>(
    r: &mut Reader<'_, '_, S>,
) -> Result<(), Error> {
    let control = r.bitmask(
        &BAND_CHANNEL_CTRL,
        &[&ENTRIES_TYPE, &NON_CONTIGUOUS_BW, &NUM_ENTRIES, &BAND_CHANNEL_CTRL_RESERVED],
    )? as u8;
    let shape = BandChannelEntries::from_control(control);
    let count = usize::from(control >> 4);

    r.cursor().expect_records(count, shape.entry_len())?;

    for _ in 0..count {
        match shape {
            BandChannelEntries::Bands => {
                r.u8(&BAND_ID)?;
            }
            BandChannelEntries::Channels { non_contiguous } => {
                let op_class = r.cursor().peek_u8()?;
                r.group("Channel Entry", shape.entry_len(), |r| {
                    channel_entry(r, non_contiguous).map(|_| ())
                })?;
                known_class(op_class)?;
            }
        }
    }

    Ok(())
}

static SEQUENCE_ID: Field = Field::new("Sequence ID", "wifi_nan.availability.sequence_id", Kind::U8);
static ATTR_CTRL: Field = Field::new("Attribute Control", "wifi_nan.availability.ctrl", Kind::U16);
static ATTR_CTRL_MAP_ID: Field =
    Field::new("Map ID", "wifi_nan.availability.ctrl.map_id", Kind::U16).mask(0x000F);
static ATTR_CTRL_COMMITTED: Field = Field::new(
    "Committed Changed",
    "wifi_nan.availability.ctrl.committed_changed",
    Kind::Bool,
)
.mask(0x0010)
.strings(yes_no);
static ATTR_CTRL_POTENTIAL: Field = Field::new(
    "Potential Changed",
    "wifi_nan.availability.ctrl.potential_changed",
    Kind::Bool,
)
.mask(0x0020)
.strings(yes_no);
static ATTR_CTRL_PUBLIC: Field = Field::new(
    "Public Availability Attribute Changed",
    "wifi_nan.availability.ctrl.public_availability_changed",
    Kind::Bool,
)
.mask(0x0040)
.strings(yes_no);
static ATTR_CTRL_NDC: Field =
    Field::new("NDC Attribute Changed", "wifi_nan.availability.ctrl.ndc_changed", Kind::Bool)
        .mask(0x0080)
        .strings(yes_no);
static ATTR_CTRL_RESERVED: Field =
    Field::new("Reserved", "wifi_nan.availability.ctrl.reserved", Kind::U16).mask(0xFF00);

static ENTRY_LEN: Field = Field::new("Length", "wifi_nan.availability.entry.len", Kind::U16);
static ENTRY_CTRL: Field = Field::new("Entry Control", "wifi_nan.availability.entry.ctrl", Kind::U16);
static ENTRY_COMMITTED: Field =
    Field::new("Committed", "wifi_nan.availability.entry.ctrl.committed", Kind::Bool)
        .mask(0x0001)
        .strings(yes_no);
static ENTRY_POTENTIAL: Field =
    Field::new("Potential", "wifi_nan.availability.entry.ctrl.potential", Kind::Bool)
        .mask(0x0002)
        .strings(yes_no);
static ENTRY_CONDITIONAL: Field =
    Field::new("Conditional", "wifi_nan.availability.entry.ctrl.conditional", Kind::Bool)
        .mask(0x0004)
        .strings(yes_no);
static ENTRY_USAGE_PREFERENCE: Field = Field::new(
    "Usage Preference",
    "wifi_nan.availability.entry.ctrl.usage_preference",
    Kind::U16,
)
.mask(0x0018)
.strings(usage_preference);
static ENTRY_UTILIZATION: Field =
    Field::new("Utilization", "wifi_nan.availability.entry.ctrl.utilization", Kind::U16).mask(0x00E0);
static ENTRY_RX_NSS: Field =
    Field::new("Rx Nss", "wifi_nan.availability.entry.ctrl.rx_nss", Kind::U16).mask(0x0F00);
static ENTRY_TIME_BITMAP_PRESENT: Field = Field::new(
    "Time Bitmap Present",
    "wifi_nan.availability.entry.ctrl.time_bitmap_present",
    Kind::Bool,
)
.mask(0x1000)
.strings(yes_no);
static ENTRY_CTRL_RESERVED: Field =
    Field::new("Reserved", "wifi_nan.availability.entry.ctrl.reserved", Kind::U16).mask(0xE000);

/// Decode one availability entry, its length field included.
fn availability_entry<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u16(&ENTRY_LEN)?;
    let control = r.bitmask(
        &ENTRY_CTRL,
        &[
            &ENTRY_COMMITTED,
            &ENTRY_POTENTIAL,
            &ENTRY_CONDITIONAL,
            &ENTRY_USAGE_PREFERENCE,
            &ENTRY_UTILIZATION,
            &ENTRY_RX_NSS,
            &ENTRY_TIME_BITMAP_PRESENT,
            &ENTRY_CTRL_RESERVED,
        ],
    )?;

    if control & 0x1000 != 0 {
        time_bitmap(r)?;
    }

    band_channel_entries(r)
}

/// NAN Availability.
pub fn availability<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u8(&SEQUENCE_ID)?;
    r.bitmask(
        &ATTR_CTRL,
        &[
            &ATTR_CTRL_MAP_ID,
            &ATTR_CTRL_COMMITTED,
            &ATTR_CTRL_POTENTIAL,
            &ATTR_CTRL_PUBLIC,
            &ATTR_CTRL_NDC,
            &ATTR_CTRL_RESERVED,
        ],
    )?;

    while !r.at_end() {
        let len = usize::from(r.cursor().clone().u16(Endian::Little)?);
        r.group("Availability Entry", 2 + len, availability_entry)?;
    }

    Ok(())
}

static UNALIGNED_CTRL: Field = Field::new("Attribute Control", "wifi_nan.unaligned_sch.ctrl", Kind::U16);
static UNALIGNED_SCHEDULE_ID: Field =
    Field::new("Schedule ID", "wifi_nan.unaligned_sch.ctrl.schedule_id", Kind::U16).mask(0x000F);
static UNALIGNED_SEQUENCE_ID: Field =
    Field::new("Sequence ID", "wifi_nan.unaligned_sch.ctrl.sequence_id", Kind::U16).mask(0x0F00);
static UNALIGNED_CTRL_RESERVED: Field =
    Field::new("Reserved", "wifi_nan.unaligned_sch.ctrl.reserved", Kind::U16).mask(0xF0F0);
static STARTING_TIME: Field = Field::new("Starting Time", "wifi_nan.unaligned_sch.starting_time", Kind::U32);
static DURATION: Field = Field::new("Duration", "wifi_nan.unaligned_sch.duration", Kind::U32);
static PERIOD: Field = Field::new("Period", "wifi_nan.unaligned_sch.period", Kind::U32);
static COUNT_DOWN: Field = Field::new("Count Down", "wifi_nan.unaligned_sch.count_down", Kind::U8);
static ULW_OVERWRITE: Field = Field::new("ULW Overwrite", "wifi_nan.unaligned_sch.ulw_overwrite", Kind::U8);
static ULW_OVERWRITE_ALL: Field =
    Field::new("Overwrite All", "wifi_nan.unaligned_sch.ulw_overwrite.all", Kind::Bool)
        .mask(0x01)
        .strings(yes_no);
static ULW_OVERWRITE_MAP_ID: Field =
    Field::new("Map ID", "wifi_nan.unaligned_sch.ulw_overwrite.map_id", Kind::U8).mask(0x1E);
static ULW_OVERWRITE_RESERVED: Field =
    Field::new("Reserved", "wifi_nan.unaligned_sch.ulw_overwrite.reserved", Kind::U8).mask(0xE0);
static ULW_CTRL: Field = Field::new("ULW Control", "wifi_nan.unaligned_sch.ulw_ctrl", Kind::U8);
static ULW_TYPE: Field = Field::new("Type", "wifi_nan.unaligned_sch.ulw_ctrl.type", Kind::U8)
    .mask(0x03)
    .strings(unaligned_type);
static ULW_CHANNEL_AVAILABILITY: Field = Field::new(
    "Channel Availability",
    "wifi_nan.unaligned_sch.ulw_ctrl.channel_availability",
    Kind::Bool,
)
.mask(0x04)
.strings(yes_no);
static ULW_RX_NSS: Field =
    Field::new("Rx Nss", "wifi_nan.unaligned_sch.ulw_ctrl.rx_nss", Kind::U8).mask(0x78);
static ULW_CTRL_RESERVED: Field =
    Field::new("Reserved", "wifi_nan.unaligned_sch.ulw_ctrl.reserved", Kind::U8).mask(0x80);

/// Unaligned Schedule.
pub fn unaligned_schedule<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.bitmask(
        &UNALIGNED_CTRL,
        &[&UNALIGNED_SCHEDULE_ID, &UNALIGNED_SEQUENCE_ID, &UNALIGNED_CTRL_RESERVED],
    )?;
    r.u32(&STARTING_TIME)?;
    r.u32(&DURATION)?;
    r.u32(&PERIOD)?;
    r.u8(&COUNT_DOWN)?;
    r.bitmask(
        &ULW_OVERWRITE,
        &[&ULW_OVERWRITE_ALL, &ULW_OVERWRITE_MAP_ID, &ULW_OVERWRITE_RESERVED],
    )?;

    if r.at_end() {
        return Ok(());
    }

    let control = r.bitmask(
        &ULW_CTRL,
        &[&ULW_TYPE, &ULW_CHANNEL_AVAILABILITY, &ULW_RX_NSS, &ULW_CTRL_RESERVED],
    )? as u8;
    match UnalignedShape::from_type(control & 0x03) {
        Some(UnalignedShape::BandId) => {
            r.u8(&BAND_ID)?;
        }
        Some(shape @ (UnalignedShape::Channel | UnalignedShape::ChannelWithAux)) => {
            let aux = shape == UnalignedShape::ChannelWithAux;
            let op_class = r.cursor().peek_u8()?;
            r.group("Channel Entry", shape.len(), |r| channel_entry(r, aux).map(|_| ()))?;
            known_class(op_class)?;
        }
        None => {}
    }

    Ok(())
}

/// Public Availability.
pub fn public_availability<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    schedule_entries(r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cursor::Cursor,
        error::DiagnosticKind,
        sink::{Recorder, recorder::direct_fields},
    };

    #[test]
    fn shapes_follow_control_bits() {
        assert_eq!(BandChannelEntries::from_control(0x30), BandChannelEntries::Bands);
        assert_eq!(
            BandChannelEntries::from_control(0x31),
            BandChannelEntries::Channels {
                non_contiguous: false
            }
        );
        assert_eq!(BandChannelEntries::from_control(0x33).entry_len(), 6);
        assert_eq!(UnalignedShape::from_type(0).map(UnalignedShape::len), Some(1));
        assert_eq!(UnalignedShape::from_type(1).map(UnalignedShape::len), Some(4));
        assert_eq!(UnalignedShape::from_type(2).map(UnalignedShape::len), Some(6));
        assert_eq!(UnalignedShape::from_type(3), None);
    }

    #[test]
    fn band_entries() {
        let data = [0x20, 2, 4];
        let mut sink = Recorder::new();
        let mut r = Reader::new(Cursor::new(&data), &mut sink, Endian::Little);
        band_channel_entries(&mut r).unwrap();

        let bands: alloc::vec::Vec<_> = sink.fields().filter(|f| f.field.abbrev == "wifi_nan.band_id").collect();
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[1].label, Some("4.9 and 5 GHz"));
    }

    #[test]
    fn non_contiguous_channel_entries() {
        let data = [0x13, 115, 0x03, 0x00, 0x01, 0x0F, 0x00];
        let mut sink = Recorder::new();
        let mut r = Reader::new(Cursor::new(&data), &mut sink, Endian::Little);
        band_channel_entries(&mut r).unwrap();
        assert!(r.at_end());

        let entry = sink.group("Channel Entry").unwrap();
        let fields = direct_fields(entry);
        assert_eq!(fields.len(), 5);
        assert_eq!(fields[4].field.abbrev, "wifi_nan.channel_entry.aux_channel_bitmap");
    }

    #[test]
    fn unknown_class_stops_the_list() {
        let data = [0x21, 0, 0x01, 0x00, 0x01, 115, 0x01, 0x00, 0x01];
        let mut sink = Recorder::new();
        let mut r = Reader::new(Cursor::new(&data), &mut sink, Endian::Little);

        let err = band_channel_entries(&mut r).unwrap_err();
        assert_eq!(err.kind(), DiagnosticKind::UnknownOperatingClass);
        assert_eq!(sink.groups("Channel Entry").len(), 1);
        assert!(sink.field("wifi_nan.channel_entry.channel_set").is_none());
    }

    #[test]
    fn time_bitmap_subfields() {
        // Duration 32 TU, period 512 TU, start offset 5.
        let word: u16 = 1 | 3 << 3 | 5 << 6;
        let mut data = alloc::vec::Vec::from(word.to_le_bytes());
        data.extend_from_slice(&[2, 0xFF, 0x00]);

        let mut sink = Recorder::new();
        let mut r = Reader::new(Cursor::new(&data), &mut sink, Endian::Little);
        time_bitmap(&mut r).unwrap();

        assert_eq!(sink.field("wifi_nan.time_bitmap.ctrl.bit_duration").unwrap().label, Some("32 TU"));
        assert_eq!(sink.field("wifi_nan.time_bitmap.ctrl.period").unwrap().label, Some("512 TU"));
        assert_eq!(
            sink.field("wifi_nan.time_bitmap.ctrl.start_offset").unwrap().value,
            Value::Uint(5)
        );
        assert_eq!(sink.field("wifi_nan.time_bitmap").unwrap().raw.len(), 2);
    }
}
