//! Channel numbers of global operating classes.
//!
//! A channel entry names channels by an operating class and a 16-bit
//! bitmap: bit `i` of the bitmap selects the `i`-th channel of the class.
//! Some rows of the operating class table carry no channel list at all, and
//! say why instead.

use tinyvec::ArrayVec;

/// Channels selected by a channel bitmap.
pub type Channels = ArrayVec<[u8; 16]>;

/// The channels of an operating class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelSet {
    Channels(&'static [u8]),
    Reserved,
    VendorSpecific,
    DerivedFromRegulation,
}

impl ChannelSet {
    /// Enumerate the channels selected by `bitmap`.
    ///
    /// Bits past the end of the class's channel list select nothing. Sets
    /// without a channel list select nothing.
    pub fn select(self, bitmap: u16) -> Channels {
        let mut r = Channels::new();
        if let Self::Channels(list) = self {
            for (i, channel) in list.iter().enumerate().take(16) {
                if bitmap & (1 << i) != 0 {
                    r.push(*channel);
                }
            }
        }
        r
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Channels(_) => "Channels",
            Self::Reserved => "Reserved",
            Self::VendorSpecific => "Vendor Specific",
            Self::DerivedFromRegulation => "Derived from regulation",
        }
    }
}

use ChannelSet::{Channels as C, DerivedFromRegulation, Reserved, VendorSpecific};

/// Inclusive ranges of operating classes and their channels.
static OPERATING_CLASSES: &[(u8, u8, ChannelSet)] = &[
    (1, 80, Reserved),
    (81, 81, C(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13])),
    (82, 82, C(&[14])),
    (83, 83, C(&[1, 2, 3, 4, 5, 6, 7, 8, 9])),
    (84, 84, C(&[5, 6, 7, 8, 9, 10, 11, 12, 13])),
    (85, 87, DerivedFromRegulation),
    (88, 93, Reserved),
    (94, 94, C(&[133, 137])),
    (95, 95, C(&[132, 134, 136, 138])),
    (96, 96, C(&[131, 132, 133, 134, 135, 136, 137, 138])),
    (97, 100, Reserved),
    (101, 101, C(&[21, 25])),
    (102, 102, C(&[11, 13, 15, 17, 19])),
    (103, 103, C(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10])),
    (104, 104, C(&[184, 192])),
    (105, 105, C(&[188, 196])),
    (106, 106, C(&[191, 195])),
    (107, 107, C(&[189, 191, 193, 195, 197])),
    (108, 108, C(&[188, 189, 190, 191, 192, 193, 194, 195, 196, 197])),
    (109, 109, C(&[184, 188, 192, 196])),
    (110, 110, C(&[183, 184, 185, 186, 187, 188, 189])),
    (111, 111, C(&[182, 183, 184, 185, 186, 187, 188, 189])),
    (112, 112, C(&[8, 12, 16])),
    (113, 113, C(&[7, 8, 9, 10, 11])),
    (114, 114, C(&[6, 7, 8, 9, 10, 11])),
    (115, 115, C(&[36, 40, 44, 48])),
    (116, 116, C(&[36, 44])),
    (117, 117, C(&[40, 48])),
    (118, 118, C(&[52, 56, 60, 64])),
    (119, 119, C(&[52, 60])),
    (120, 120, C(&[56, 64])),
    (121, 121, C(&[100, 104, 108, 112, 116, 120, 124, 128, 132, 136, 140, 144])),
    (122, 122, C(&[100, 108, 116, 124, 132, 140])),
    (123, 123, C(&[104, 112, 120, 128, 136, 144])),
    (124, 124, C(&[149, 153, 157, 161])),
    (125, 125, C(&[149, 153, 157, 161, 165, 169, 173, 177])),
    (126, 126, C(&[149, 157, 165, 173])),
    (127, 127, C(&[153, 161, 169, 177])),
    (128, 128, C(&[42, 58, 106, 122, 138, 155])),
    (129, 129, C(&[50, 114])),
    (130, 130, C(&[42, 58, 106, 122, 138, 155])),
    (131, 179, Reserved),
    (180, 180, C(&[1, 2, 3, 4, 5, 6])),
    (181, 191, Reserved),
    (192, 254, VendorSpecific),
    (255, 255, Reserved),
];

/// Look up the channels of an operating class.
///
/// Returns `None` for classes with no row.
pub fn channel_set(op_class: u8) -> Option<ChannelSet> {
    OPERATING_CLASSES
        .iter()
        .find(|(lo, hi, _)| (*lo..=*hi).contains(&op_class))
        .map(|(_, _, set)| *set)
}
