//! Container layout, all multi-byte values big-endian:
//!
//! - 1 byte: number of distinct bytes K, stored as K mod 256. A leading 0 means 256.
//! - 5*K bytes: (byte value, u32 count) pairs in first-seen order.
//! - The packed codeword payload, only when K >= 2.
//!
//! An empty source gives an empty container, so a zero-length container and a leading
//! zero byte are told apart by length, not by value.

use std::io::{Read, Write};

use log::debug;

use crate::bitstream::bitreader::BitReader;
use crate::tools::error::{malformed, CodecError};
use crate::tools::freq_count::{FreqEntry, FreqTable};

/// Bytes per persisted frequency entry: symbol + u32 count.
pub const ENTRY_LEN: usize = 5;
/// Extension appended to the input path when no output path is given.
pub const DEFAULT_EXTENSION: &str = "hfm";

/// Size of the header for K distinct symbols.
pub fn header_len(kinds: usize) -> usize {
    if kinds == 0 {
        0
    } else {
        1 + ENTRY_LEN * kinds
    }
}

/// Write the symbol count and frequency table. Writes nothing for an empty table.
pub fn write_header<W: Write>(table: &FreqTable, sink: &mut W) -> Result<usize, CodecError> {
    if table.is_empty() {
        return Ok(0);
    }
    let mut header = Vec::with_capacity(header_len(table.kinds()));
    // 256 wraps to 0
    header.push(table.kinds() as u8);
    for entry in table.entries() {
        header.push(entry.symbol);
        header.extend_from_slice(&entry.count.to_be_bytes());
    }
    sink.write_all(&header)?;
    debug!(
        "Wrote header of {} bytes for {} symbols.",
        header.len(),
        table.kinds()
    );
    Ok(header.len())
}

/// Read the header. Returns None for a zero-length container. The reader is left on the
/// first payload bit.
pub fn read_header<R: Read>(br: &mut BitReader<R>) -> Result<Option<FreqTable>, CodecError> {
    let kinds = match br.byte()? {
        None => return Ok(None),
        Some(0) => 256,
        Some(k) => k as usize,
    };

    let raw = br.bytes(ENTRY_LEN * kinds)?.ok_or_else(|| {
        malformed(format!(
            "frequency table for {} symbols is truncated",
            kinds
        ))
    })?;

    let entries = raw
        .chunks_exact(ENTRY_LEN)
        .map(|c| FreqEntry {
            symbol: c[0],
            count: u32::from_be_bytes([c[1], c[2], c[3], c[4]]),
        })
        .collect();
    let table = FreqTable::from_entries(entries)?;
    debug!(
        "Read header: {} symbols, {} source bytes.",
        table.kinds(),
        table.total()
    );
    Ok(Some(table))
}
