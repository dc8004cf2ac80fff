use std::cmp::Ordering;
use std::io;

use byteorder::{ByteOrder, LittleEndian as LE, WriteBytesExt};

use crate::error::{Error, ErrorKind};

/// The largest Unicode codepoint.
const MAX_CODEPOINT: u32 = 0x10FFFF;

/// The number of bytes used to encode a single range.
const RANGE_SIZE: usize = 8;

/// An immutable table of codepoint ranges.
///
/// Ranges are inclusive on both ends, sorted in ascending order and neither
/// overlap nor touch. Tables bundled with this crate uphold this, and tables
/// built with `RangeTableOwned` are validated when they are constructed, so
/// membership tests never need to re-check it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RangeTable<'a> {
    ranges: &'a [(u32, u32)],
}

impl<'a> RangeTable<'a> {
    /// Wrap a slice of sorted, disjoint and non-adjacent ranges.
    ///
    /// This does not validate its input. If the ranges are not sorted, then
    /// membership tests may return incorrect results (but will never panic).
    pub const fn new(ranges: &'a [(u32, u32)]) -> RangeTable<'a> {
        RangeTable { ranges }
    }

    /// Returns true if and only if the given codepoint is in this table.
    pub fn contains(&self, cp: u32) -> bool {
        self.ranges
            .binary_search_by(|&(start, end)| {
                if start > cp {
                    Ordering::Greater
                } else if end < cp {
                    Ordering::Less
                } else {
                    Ordering::Equal
                }
            })
            .is_ok()
    }

    /// Returns true if and only if the given scalar value is in this table.
    pub fn contains_char(&self, c: char) -> bool {
        self.contains(c as u32)
    }

    /// Return the ranges in this table.
    pub fn ranges(&self) -> &'a [(u32, u32)] {
        self.ranges
    }

    /// Return the number of ranges in this table.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Returns true if and only if this table contains no ranges.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Return the total number of codepoints covered by this table.
    pub fn codepoint_count(&self) -> u32 {
        self.ranges.iter().map(|&(start, end)| end - start + 1).sum()
    }

    /// Encode this table as a flat sequence of little endian `u32` pairs.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = vec![0; self.ranges.len() * RANGE_SIZE];
        for (chunk, &(start, end)) in
            buf.chunks_mut(RANGE_SIZE).zip(self.ranges.iter())
        {
            LE::write_u32(&mut chunk[..4], start);
            LE::write_u32(&mut chunk[4..], end);
        }
        buf
    }

    /// Write the encoding produced by `to_bytes` to the given writer.
    pub fn write_to<W: io::Write>(&self, mut wtr: W) -> io::Result<()> {
        for &(start, end) in self.ranges {
            wtr.write_u32::<LE>(start)?;
            wtr.write_u32::<LE>(end)?;
        }
        Ok(())
    }
}

/// An owned table of codepoint ranges.
///
/// Every constructor validates the ranges it is given, which makes this the
/// type to use for tables that don't come from this crate.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RangeTableOwned {
    ranges: Vec<(u32, u32)>,
}

impl RangeTableOwned {
    /// Build a table from an arbitrary collection of codepoints.
    ///
    /// Codepoints may be given in any order and may repeat. Consecutive
    /// codepoints are merged into a single range. An error is returned if any
    /// codepoint exceeds `U+10FFFF`.
    pub fn from_codepoints<I>(codepoints: I) -> Result<RangeTableOwned, Error>
    where
        I: IntoIterator<Item = u32>,
    {
        let mut cps: Vec<u32> = codepoints.into_iter().collect();
        cps.sort_unstable();
        cps.dedup();
        if let Some(&cp) = cps.last() {
            if cp > MAX_CODEPOINT {
                let index = cps.len() - 1;
                return Err(Error::new(ErrorKind::InvalidRange {
                    index,
                    start: cp,
                    end: cp,
                }));
            }
        }

        let mut ranges: Vec<(u32, u32)> = vec![];
        for cp in cps {
            if let Some(last) = ranges.last_mut() {
                if last.1 + 1 == cp {
                    last.1 = cp;
                    continue;
                }
            }
            ranges.push((cp, cp));
        }
        Ok(RangeTableOwned { ranges })
    }

    /// Build a table from ranges that are expected to already be sorted,
    /// disjoint and non-adjacent.
    pub fn from_ranges(
        ranges: Vec<(u32, u32)>,
    ) -> Result<RangeTableOwned, Error> {
        validate(&ranges)?;
        Ok(RangeTableOwned { ranges })
    }

    /// Decode a table from the encoding produced by `RangeTable::to_bytes`.
    ///
    /// The length of `bytes` must be a multiple of 8, and the decoded ranges
    /// must satisfy the same invariants as `from_ranges`.
    pub fn from_bytes(bytes: &[u8]) -> Result<RangeTableOwned, Error> {
        if bytes.len() % RANGE_SIZE != 0 {
            return Err(Error::new(ErrorKind::InvalidLength(bytes.len())));
        }
        let ranges = bytes
            .chunks(RANGE_SIZE)
            .map(|c| (LE::read_u32(&c[..4]), LE::read_u32(&c[4..])))
            .collect();
        RangeTableOwned::from_ranges(ranges)
    }

    /// Borrow this table.
    pub fn as_table(&self) -> RangeTable<'_> {
        RangeTable::new(&self.ranges)
    }
}

/// Check that the given ranges are well formed, sorted, disjoint and not
/// adjacent to one another.
pub(crate) fn validate(ranges: &[(u32, u32)]) -> Result<(), Error> {
    let mut prev_end: Option<u32> = None;
    for (index, &(start, end)) in ranges.iter().enumerate() {
        if start > end || end > MAX_CODEPOINT {
            return Err(Error::new(ErrorKind::InvalidRange {
                index,
                start,
                end,
            }));
        }
        if let Some(prev_end) = prev_end {
            if start <= prev_end + 1 {
                return Err(Error::new(ErrorKind::Unordered { index }));
            }
        }
        prev_end = Some(end);
    }
    Ok(())
}
