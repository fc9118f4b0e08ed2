//! Length-prefixed framing for messages carried over TCP.
//!
//! A UDP datagram holds exactly one message. Over TCP, the message length
//! at offset 8 of the header says where one message ends and the next one
//! begins.

use either::Either::{self, Left, Right};

use super::header::HEADER_LEN;

/// Offset of the message length within the header.
pub const LENGTH_OFFSET: usize = 8;

/// Read the message length from the start of a buffer.
///
/// Returns `None` while the buffer is too short to hold the length field.
pub fn pdu_length(buf: &[u8]) -> Option<u32> {
    let r: [u8; 4] = buf.get(LENGTH_OFFSET..LENGTH_OFFSET + 4)?.try_into().ok()?;
    Some(u32::from_be_bytes(r))
}

/// Split one complete message off the start of a buffer.
///
/// Returns the message and the bytes after it, or the total number of bytes
/// needed before a message can be split off. A message length shorter than
/// the header still yields a header-sized message, so a stream never stalls
/// on a corrupt length.
pub fn split_pdu(buf: &[u8]) -> Either<(&[u8], &[u8]), usize> {
    let Some(length) = pdu_length(buf) else {
        return Right(HEADER_LEN);
    };

    let length = usize::try_from(length).unwrap_or(usize::MAX).max(HEADER_LEN);
    if buf.len() < length {
        return Right(length);
    }

    Left(buf.split_at(length))
}
