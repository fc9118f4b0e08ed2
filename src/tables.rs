//! Code to label lookups shared by both protocol families.
//!
//! Lookups are total: a code with no entry maps to `"Unknown"`. Tables
//! whose gaps are reserved by the standard list those ranges explicitly.

/// A table of single codes.
pub type ValueTable = &'static [(u8, &'static str)];

/// A table of inclusive code ranges.
pub type RangeTable = &'static [(u8, u8, &'static str)];

pub const UNKNOWN: &str = "Unknown";

/// Label a code from a value table.
pub fn lookup(table: ValueTable, code: u64) -> &'static str {
    table
        .iter()
        .find(|(c, _)| u64::from(*c) == code)
        .map_or(UNKNOWN, |(_, s)| *s)
}

/// Label a code from a range table.
pub fn lookup_range(table: RangeTable, code: u64) -> &'static str {
    table
        .iter()
        .find(|(lo, hi, _)| (u64::from(*lo)..=u64::from(*hi)).contains(&code))
        .map_or(UNKNOWN, |(_, _, s)| *s)
}

/// Label a boolean.
pub fn yes_no(v: u64) -> &'static str {
    if v != 0 { "Yes" } else { "No" }
}

/// Label a presence flag.
pub fn present(v: u64) -> &'static str {
    if v != 0 { "Present" } else { "Not present" }
}
