//! Security attributes.
//!
//! The shared key descriptor carries an IEEE 802.11 EAPOL key descriptor,
//! whose multi-byte fields are big-endian even inside a little-endian NAN
//! attribute.

use crate::{
    cursor::Endian,
    error::Error,
    reader::Reader,
    sink::{Field, FieldSink, Kind},
    tables::yes_no,
};

use super::tables::{cipher_suite, key_descriptor_type, key_type, security_context_id_type};

static CAPABILITIES: Field = Field::new("Capabilities", "wifi_nan.cipher_suite.capabilities", Kind::U8);
static CAP_REPLAY_COUNTERS: Field =
    Field::new("Number of Replay Counters", "wifi_nan.cipher_suite.capabilities.replay_counters", Kind::U8)
        .mask(0x01);
static CAP_GTK_CSID: Field = Field::new("GTK CSID", "wifi_nan.cipher_suite.capabilities.gtk_csid", Kind::U8)
    .mask(0x06);
static CAPABILITIES_RESERVED: Field =
    Field::new("Reserved", "wifi_nan.cipher_suite.capabilities.reserved", Kind::U8).mask(0xF8);
static CIPHER_SUITE_ID: Field =
    Field::new("Cipher Suite ID", "wifi_nan.cipher_suite.id", Kind::U8).strings(cipher_suite);
static PUBLISH_ID: Field = Field::new("Publish ID", "wifi_nan.security.publish_id", Kind::U8);

/// Length of one cipher suite entry.
pub const CIPHER_SUITE_LEN: usize = 2;

/// Cipher Suite Info.
pub fn cipher_suite_info<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.bitmask(&CAPABILITIES, &[&CAP_REPLAY_COUNTERS, &CAP_GTK_CSID, &CAPABILITIES_RESERVED])?;
    while r.remaining() >= CIPHER_SUITE_LEN {
        r.group("Cipher Suite", CIPHER_SUITE_LEN, |r| {
            r.u8(&CIPHER_SUITE_ID)?;
            r.u8(&PUBLISH_ID)?;
            Ok(())
        })?;
    }
    Ok(())
}

static CONTEXT_ID_LEN: Field = Field::new("Security Context Identifier Length", "wifi_nan.security_context.id_len", Kind::U16);
static CONTEXT_ID_TYPE: Field =
    Field::new("Security Context Identifier Type", "wifi_nan.security_context.id_type", Kind::U8)
        .strings(security_context_id_type);
static CONTEXT_ID: Field = Field::new("Security Context Identifier", "wifi_nan.security_context.id", Kind::Bytes);

/// Security Context Info: identifiers until the attribute is exhausted.
pub fn security_context_info<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    while !r.at_end() {
        let len = usize::from(r.u16(&CONTEXT_ID_LEN)?);
        r.u8(&CONTEXT_ID_TYPE)?;
        r.u8(&PUBLISH_ID)?;
        r.bytes(&CONTEXT_ID, len)?;
    }
    Ok(())
}

static DESCRIPTOR_TYPE: Field =
    Field::new("Descriptor Type", "wifi_nan.shared_key.descriptor_type", Kind::U8).strings(key_descriptor_type);

static KEY_INFO: Field = Field::new("Key Information", "wifi_nan.shared_key.key_info", Kind::U16);
static KEY_INFO_VERSION: Field =
    Field::new("Key Descriptor Version", "wifi_nan.shared_key.key_info.version", Kind::U16).mask(0x0007);
static KEY_INFO_TYPE: Field = Field::new("Key Type", "wifi_nan.shared_key.key_info.type", Kind::U16)
    .mask(0x0008)
    .strings(key_type);
static KEY_INFO_INDEX: Field = Field::new("Key Index", "wifi_nan.shared_key.key_info.index", Kind::U16).mask(0x0030);
static KEY_INFO_INSTALL: Field = Field::new("Install", "wifi_nan.shared_key.key_info.install", Kind::Bool)
    .mask(0x0040)
    .strings(yes_no);
static KEY_INFO_ACK: Field = Field::new("Key ACK", "wifi_nan.shared_key.key_info.ack", Kind::Bool)
    .mask(0x0080)
    .strings(yes_no);
static KEY_INFO_MIC: Field = Field::new("Key MIC", "wifi_nan.shared_key.key_info.mic", Kind::Bool)
    .mask(0x0100)
    .strings(yes_no);
static KEY_INFO_SECURE: Field = Field::new("Secure", "wifi_nan.shared_key.key_info.secure", Kind::Bool)
    .mask(0x0200)
    .strings(yes_no);
static KEY_INFO_ERROR: Field = Field::new("Error", "wifi_nan.shared_key.key_info.error", Kind::Bool)
    .mask(0x0400)
    .strings(yes_no);
static KEY_INFO_REQUEST: Field = Field::new("Request", "wifi_nan.shared_key.key_info.request", Kind::Bool)
    .mask(0x0800)
    .strings(yes_no);
static KEY_INFO_ENCRYPTED: Field =
    Field::new("Encrypted Key Data", "wifi_nan.shared_key.key_info.encrypted", Kind::Bool)
        .mask(0x1000)
        .strings(yes_no);
static KEY_INFO_SMK: Field = Field::new("SMK Message", "wifi_nan.shared_key.key_info.smk", Kind::Bool)
    .mask(0x2000)
    .strings(yes_no);
static KEY_INFO_RESERVED: Field =
    Field::new("Reserved", "wifi_nan.shared_key.key_info.reserved", Kind::U16).mask(0xC000);

static KEY_LEN: Field = Field::new("Key Length", "wifi_nan.shared_key.key_len", Kind::U16);
static REPLAY_COUNTER: Field = Field::new("Replay Counter", "wifi_nan.shared_key.replay_counter", Kind::U64);
static KEY_NONCE: Field = Field::new("Key Nonce", "wifi_nan.shared_key.nonce", Kind::Bytes);
static KEY_IV: Field = Field::new("Key IV", "wifi_nan.shared_key.iv", Kind::Bytes);
static KEY_RSC: Field = Field::new("Key RSC", "wifi_nan.shared_key.rsc", Kind::Bytes);
static KEY_RESERVED: Field = Field::new("Reserved", "wifi_nan.shared_key.reserved", Kind::Bytes);
static KEY_MIC: Field = Field::new("Key MIC", "wifi_nan.shared_key.mic", Kind::Bytes);
static KEY_DATA_LEN: Field = Field::new("Key Data Length", "wifi_nan.shared_key.data_len", Kind::U16);
static KEY_DATA: Field = Field::new("Key Data", "wifi_nan.shared_key.data", Kind::Bytes);

/// Decode an EAPOL key descriptor.
fn key_descriptor<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u8(&DESCRIPTOR_TYPE)?;
    r.bitmask_as(
        &KEY_INFO,
        &[
            &KEY_INFO_VERSION,
            &KEY_INFO_TYPE,
            &KEY_INFO_INDEX,
            &KEY_INFO_INSTALL,
            &KEY_INFO_ACK,
            &KEY_INFO_MIC,
            &KEY_INFO_SECURE,
            &KEY_INFO_ERROR,
            &KEY_INFO_REQUEST,
            &KEY_INFO_ENCRYPTED,
            &KEY_INFO_SMK,
            &KEY_INFO_RESERVED,
        ],
        Endian::Big,
    )?;
    r.uint_as(&KEY_LEN, Endian::Big)?;
    r.uint_as(&REPLAY_COUNTER, Endian::Big)?;
    r.bytes(&KEY_NONCE, 32)?;
    r.bytes(&KEY_IV, 16)?;
    r.bytes(&KEY_RSC, 8)?;
    r.bytes(&KEY_RESERVED, 8)?;
    r.bytes(&KEY_MIC, 16)?;
    let len = r.uint_as(&KEY_DATA_LEN, Endian::Big)? as usize;
    r.bytes(&KEY_DATA, len)?;
    Ok(())
}

/// Shared-Key Descriptor.
pub fn shared_key_descriptor<S: FieldSink + ?Sized>(r: &mut Reader<'_, '_, S>) -> Result<(), Error> {
    r.u8(&PUBLISH_ID)?;
    if !r.at_end() {
        let len = r.remaining();
        r.group("Key Descriptor", len, key_descriptor)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cursor::Cursor,
        sink::{Recorder, Value},
    };

    #[test]
    fn key_descriptor_is_big_endian() {
        let mut data = alloc::vec![5, 2];
        data.extend_from_slice(&[0x01, 0x8A]);
        data.extend_from_slice(&[0x00, 0x10]);
        data.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 3]);
        data.extend_from_slice(&[0xAA; 32]);
        data.extend_from_slice(&[0; 16 + 8 + 8]);
        data.extend_from_slice(&[0xBB; 16]);
        data.extend_from_slice(&[0x00, 0x02, 0xDE, 0xAD]);

        let mut sink = Recorder::new();
        let mut r = Reader::new(Cursor::new(&data), &mut sink, Endian::Little);
        shared_key_descriptor(&mut r).unwrap();
        assert!(r.at_end());

        assert_eq!(sink.field("wifi_nan.shared_key.key_info").unwrap().value, Value::Uint(0x018A));
        assert_eq!(sink.field("wifi_nan.shared_key.key_info.version").unwrap().value, Value::Uint(2));
        assert_eq!(sink.field("wifi_nan.shared_key.key_info.type").unwrap().label, Some("Pairwise Key"));
        assert_eq!(sink.field("wifi_nan.shared_key.key_info.ack").unwrap().value, Value::Bool(true));
        assert_eq!(sink.field("wifi_nan.shared_key.key_info.mic").unwrap().value, Value::Bool(true));
        assert_eq!(sink.field("wifi_nan.shared_key.key_len").unwrap().value, Value::Uint(16));
        assert_eq!(sink.field("wifi_nan.shared_key.replay_counter").unwrap().value, Value::Uint(3));
        assert_eq!(&sink.field("wifi_nan.shared_key.data").unwrap().raw[..], &[0xDE, 0xAD]);
        assert!(sink.diagnostics().next().is_none());
    }

    #[test]
    fn cipher_suites_pair_with_publish_ids() {
        let data = [0x00, 1, 7, 2, 8];
        let mut sink = Recorder::new();
        let mut r = Reader::new(Cursor::new(&data), &mut sink, Endian::Little);
        cipher_suite_info(&mut r).unwrap();

        assert_eq!(sink.groups("Cipher Suite").len(), 2);
        let suites: alloc::vec::Vec<_> = sink
            .fields()
            .filter(|f| f.field.abbrev == "wifi_nan.cipher_suite.id")
            .filter_map(|f| f.label)
            .collect();
        assert_eq!(suites, ["NCS-SK-128", "NCS-SK-256"]);
    }
}
