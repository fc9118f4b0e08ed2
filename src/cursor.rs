//! Bounds-checked sequential reads over a borrowed byte region.

use alloc::{borrow::Cow, string::String};

use crate::error::Error;

/// Byte order of a multi-byte read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little,
}

/// A forward-only reader over a byte region.
///
/// Offsets reported by [`Cursor::offset`] are absolute: a cursor derived
/// with [`Cursor::split`] keeps counting from the start of the buffer the
/// outermost cursor was built over.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    base: usize,
    pos: usize,
}

macro_rules! read_uint {
    ($name:ident, $t:ty, $n:literal, $(#[$attr:meta])*) => {
        $(#[$attr])*
        pub fn $name(&mut self, endian: Endian) -> Result<$t, Error> {
            let r: [u8; $n] = self.array()?;
            Ok(match endian {
                Endian::Big => <$t>::from_be_bytes(r),
                Endian::Little => <$t>::from_le_bytes(r),
            })
        }
    };
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, base: 0, pos: 0 }
    }

    /// Absolute offset of the next byte to be read.
    pub fn offset(&self) -> usize {
        self.base + self.pos
    }

    /// Absolute offset one past the last byte of the region.
    pub fn end(&self) -> usize {
        self.base + self.data.len()
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn at_end(&self) -> bool {
        self.remaining() == 0
    }

    /// Take an exact number of bytes, advancing the cursor.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], Error> {
        let available = self.remaining();
        if n > available {
            Err(Error::Truncated { requested: n, available })?;
        }

        let r = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(r)
    }

    /// Take a fixed-size array of bytes.
    pub fn array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let mut r = [0; N];
        r.copy_from_slice(self.take(N)?);
        Ok(r)
    }

    /// Take every remaining byte.
    pub fn rest(&mut self) -> &'a [u8] {
        let r = &self.data[self.pos..];
        self.pos = self.data.len();
        r
    }

    /// The `n` bytes most recently consumed.
    pub fn before(&self, n: usize) -> &'a [u8] {
        &self.data[self.pos - n..self.pos]
    }

    pub fn skip(&mut self, n: usize) -> Result<(), Error> {
        self.take(n).map(|_| ())
    }

    /// Look at the next byte without consuming it.
    pub fn peek_u8(&self) -> Result<u8, Error> {
        self.data.get(self.pos).copied().ok_or(Error::Truncated {
            requested: 1,
            available: 0,
        })
    }

    /// Consume `n` bytes and return a cursor over exactly those bytes.
    pub fn split(&mut self, n: usize) -> Result<Cursor<'a>, Error> {
        let base = self.offset();
        let data = self.take(n)?;
        Ok(Cursor { data, base, pos: 0 })
    }

    /// Check that `count` records of `size` bytes fit in the region, before
    /// a count-driven loop runs.
    pub fn expect_records(&self, count: usize, size: usize) -> Result<(), Error> {
        let requested = count.saturating_mul(size);
        let available = self.remaining();
        if requested > available {
            Err(Error::Truncated { requested, available })?;
        }
        Ok(())
    }

    pub fn u8(&mut self) -> Result<u8, Error> {
        let [r] = self.array()?;
        Ok(r)
    }

    read_uint!(u16, u16, 2, /** Read a 16-bit unsigned integer. */);
    read_uint!(u32, u32, 4, /** Read a 32-bit unsigned integer. */);
    read_uint!(u64, u64, 8, /** Read a 64-bit unsigned integer. */);
    read_uint!(i16, i16, 2, /** Read a 16-bit signed integer. */);

    /// Read a 24-bit unsigned integer.
    pub fn u24(&mut self, endian: Endian) -> Result<u32, Error> {
        let [a, b, c] = self.array()?;
        Ok(match endian {
            Endian::Big => u32::from_be_bytes([0, a, b, c]),
            Endian::Little => u32::from_le_bytes([a, b, c, 0]),
        })
    }

    /// Read a 48-bit unsigned integer.
    pub fn u48(&mut self, endian: Endian) -> Result<u64, Error> {
        let [a, b, c, d, e, f] = self.array()?;
        Ok(match endian {
            Endian::Big => u64::from_be_bytes([0, 0, a, b, c, d, e, f]),
            Endian::Little => u64::from_le_bytes([a, b, c, d, e, f, 0, 0]),
        })
    }

    /// Read an unsigned integer of 1 to 8 bytes.
    pub fn uint(&mut self, width: usize, endian: Endian) -> Result<u64, Error> {
        match width {
            1 => self.u8().map(u64::from),
            2 => self.u16(endian).map(u64::from),
            3 => self.u24(endian).map(u64::from),
            4 => self.u32(endian).map(u64::from),
            6 => self.u48(endian),
            8 => self.u64(endian),
            _ => {
                let r = self.take(width.min(8))?;
                Ok(match endian {
                    Endian::Big => r.iter().fold(0, |acc, b| acc << 8 | u64::from(*b)),
                    Endian::Little => r.iter().rev().fold(0, |acc, b| acc << 8 | u64::from(*b)),
                })
            }
        }
    }

    /// Read a fixed-width text field.
    ///
    /// The whole field is kept, including any NUL or space padding.
    pub fn fixed_string(&mut self, n: usize) -> Result<Cow<'a, str>, Error> {
        Ok(String::from_utf8_lossy(self.take(n)?))
    }

    /// Read a 16-byte address block.
    pub fn ipv6(&mut self) -> Result<[u8; 16], Error> {
        self.array()
    }

    /// Read a 6-byte MAC address.
    pub fn ether(&mut self) -> Result<[u8; 6], Error> {
        self.array()
    }
}

/// Extract the bits selected by `mask`, shifted down to bit zero.
pub fn bits(value: u64, mask: u64) -> u64 {
    if mask == 0 {
        value
    } else {
        (value & mask) >> mask.trailing_zeros()
    }
}

/// Read bit `index` of a byte, counting from the most significant bit.
pub fn bit_msb(byte: u8, index: u8) -> bool {
    debug_assert!(index < 8);
    byte & (0x80 >> index) != 0
}

/// Read `width` bits of a byte starting at bit `start`, counting from the
/// most significant bit.
pub fn bits_msb(byte: u8, start: u8, width: u8) -> u8 {
    debug_assert!(start + width <= 8 && width > 0);
    let shift = 8 - start - width;
    let mask = (0xFFu16 >> (8 - width)) as u8;
    (byte >> shift) & mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_advance_and_track_offsets() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
        let mut c = Cursor::new(&data);

        assert_eq!(c.u8().unwrap(), 0x01);
        assert_eq!(c.u16(Endian::Big).unwrap(), 0x0203);
        assert_eq!(c.offset(), 3);

        let mut sub = c.split(3).unwrap();
        assert_eq!(sub.offset(), 3);
        assert_eq!(sub.u24(Endian::Little).unwrap(), 0x060504);
        assert!(sub.at_end());

        assert_eq!(c.remaining(), 1);
        assert_eq!(c.u16(Endian::Big), Err(Error::Truncated { requested: 2, available: 1 }));
        // A failed read leaves the cursor where it was.
        assert_eq!(c.u8().unwrap(), 0x07);
    }

    #[test]
    fn endianness_is_per_read() {
        let data = [0x12, 0x34, 0x12, 0x34];
        let mut c = Cursor::new(&data);
        assert_eq!(c.u16(Endian::Big).unwrap(), 0x1234);
        assert_eq!(c.u16(Endian::Little).unwrap(), 0x3412);
    }

    #[test]
    fn wide_reads() {
        let data = [0, 0, 0, 0, 0, 1, 0xFF, 0xFF];
        assert_eq!(Cursor::new(&data).u48(Endian::Big).unwrap(), 1);
        assert_eq!(Cursor::new(&data).u64(Endian::Big).unwrap(), 0x1_FFFF);
        assert_eq!(Cursor::new(&data[..2]).i16(Endian::Big).unwrap(), 0);
        assert_eq!(Cursor::new(&data[6..]).i16(Endian::Big).unwrap(), -1);
    }

    #[test]
    fn fixed_strings_keep_padding() {
        let mut data = [0u8; 8];
        data[..4].copy_from_slice(b"DEV1");
        data[4] = b' ';
        let s = Cursor::new(&data).fixed_string(8).unwrap();
        assert_eq!(s, "DEV1 \0\0\0");
        assert_eq!(s.len(), 8);
    }

    #[test]
    fn record_counts_are_checked_before_looping() {
        let data = [0u8; 8];
        let c = Cursor::new(&data);
        assert!(c.expect_records(2, 4).is_ok());
        assert_eq!(
            c.expect_records(0xFFFF_FFFF, 4),
            Err(Error::Truncated { requested: 0xFFFF_FFFFusize.saturating_mul(4), available: 8 })
        );
        assert!(c.expect_records(usize::MAX, 2).is_err());
    }

    #[test]
    fn msb_first_bits() {
        assert!(bit_msb(0x80, 0));
        assert!(!bit_msb(0x80, 1));
        assert!(bit_msb(0x01, 7));
        assert_eq!(bits_msb(0b1010_0111, 0, 6), 0b101001);
        assert_eq!(bits_msb(0b1010_0111, 6, 2), 0b11);
        assert_eq!(bits_msb(0xFF, 0, 8), 0xFF);
    }

    #[test]
    fn masked_bits() {
        assert_eq!(bits(0xF3, 0x0C), 0);
        assert_eq!(bits(0xFC, 0x0C), 3);
        assert_eq!(bits(0xABCD, 0xF000), 0xA);
        assert_eq!(bits(0xABCD, 0), 0xABCD);
    }
}
