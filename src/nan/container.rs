//! Attributes carrying IEEE 802.11 elements, and the collaborator that
//! decodes them.

use crate::{
    cursor::Endian,
    error::Error,
    reader::Reader,
    sink::{Field, FieldSink, Kind},
};

static ELEMENT_ID: Field = Field::new("Element ID", "wifi_nan.element.id", Kind::U8);
static ELEMENT_LEN: Field = Field::new("Element Length", "wifi_nan.element.len", Kind::U8);
/// Element bytes no decoder claimed.
pub static ELEMENT_DATA: Field = Field::new("Element Data", "wifi_nan.element.data", Kind::Bytes);

/// Element ID under which vendor specific attribute bodies are decoded.
pub const VENDOR_SPECIFIC_ELEMENT_ID: u8 = 0xDD;

/// Decode 802.11 elements embedded in NAN attributes.
///
/// The decoder receives a reader over exactly one element body. Errors it
/// returns are reported as diagnostics for that element and decoding
/// continues with the next one.
///
/// The default implementation emits the body as opaque bytes.
#[allow(unused_variables)]
pub trait ElementDecoder {
    fn decode<S: FieldSink + ?Sized>(&mut self, id: u8, r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
        r.rest(&ELEMENT_DATA);
        Ok(())
    }
}

/// An [`ElementDecoder`] emitting every element as raw bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawElements;

impl ElementDecoder for RawElements {}

impl<D: ElementDecoder + ?Sized> ElementDecoder for &mut D {
    fn decode<S: FieldSink + ?Sized>(&mut self, id: u8, r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
        (**self).decode(id, r)
    }
}

static MAP_ID: Field = Field::new("Map ID", "wifi_nan.element_container.map_id", Kind::U8);

/// Element Container.
pub fn element_container<S, D>(r: &mut Reader<'_, '_, S>, elements: &mut D) -> Result<(), Error>
where
    S: FieldSink + ?Sized,
    D: ElementDecoder + ?Sized,
{
    r.u8(&MAP_ID)?;
    while !r.at_end() {
        let id = r.u8(&ELEMENT_ID)?;
        let len = r.u8(&ELEMENT_LEN)?;
        r.group("Element", len.into(), |r| elements.decode(id, r))?;
    }
    Ok(())
}

static OUI: Field = Field::new("OUI", "wifi_nan.vendor.oui", Kind::U24);

/// Vendor Specific: an OUI followed by a body handed to the element
/// decoder.
pub fn vendor_specific<S, D>(r: &mut Reader<'_, '_, S>, elements: &mut D) -> Result<(), Error>
where
    S: FieldSink + ?Sized,
    D: ElementDecoder + ?Sized,
{
    r.uint_as(&OUI, Endian::Big)?;
    let len = r.remaining();
    r.group("Vendor Specific Body", len, |r| elements.decode(VENDOR_SPECIFIC_ELEMENT_ID, r))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cursor::Cursor,
        sink::{Recorder, Value},
    };

    static SSID: Field = Field::new("SSID", "test.ssid", Kind::String);

    struct Ssids(usize);

    impl ElementDecoder for Ssids {
        fn decode<S: FieldSink + ?Sized>(&mut self, id: u8, r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
            if id == 0 {
                self.0 += 1;
                let len = r.remaining();
                r.string(&SSID, len)
            } else {
                RawElements.decode(id, r)
            }
        }
    }

    #[test]
    fn elements_go_to_the_decoder() {
        let data = [0x02, 0, 3, b'n', b'a', b'n', 0x30, 1, 0xEE];
        let mut sink = Recorder::new();
        let mut decoder = Ssids(0);
        let mut r = Reader::new(Cursor::new(&data), &mut sink, Endian::Little);
        element_container(&mut r, &mut decoder).unwrap();

        assert_eq!(decoder.0, 1);
        assert_eq!(sink.groups("Element").len(), 2);
        assert_eq!(sink.field("test.ssid").unwrap().value, Value::String("nan".into()));
        assert_eq!(&sink.field("wifi_nan.element.data").unwrap().raw[..], &[0xEE]);
    }

    #[test]
    fn overlong_element_stops_the_container() {
        let data = [0x02, 0, 9, b'x'];
        let mut sink = crate::sink::NullSink;
        let mut r = Reader::new(Cursor::new(&data), &mut sink, Endian::Little);
        assert!(element_container(&mut r, &mut RawElements).is_err());
    }
}
