use std::io::{ErrorKind, Read};

use log::debug;

use super::error::{malformed, CodecError};

/// Read buffer used while counting.
const CHUNK_SIZE: usize = 64 * 1024;

/// One distinct byte value and how many times it occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreqEntry {
    pub symbol: u8,
    pub count: u32,
}

/// Byte counts of a source, in the order each byte value was first seen.
/// The order is part of the container format: it is the tie-break order of the tree builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreqTable {
    entries: Vec<FreqEntry>,
    total: u64,
}

impl FreqTable {
    /// Returns a frequency count of everything the reader yields. Reads the source once.
    pub fn from_reader<R: Read>(mut source: R) -> Result<Self, CodecError> {
        let mut counter = Counter::default();
        let mut buf = vec![0_u8; CHUNK_SIZE];
        loop {
            let size = match source.read(&mut buf) {
                Ok(0) => break,
                Ok(size) => size,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            counter.add(&buf[..size])?;
        }
        let table = counter.finish();
        debug!(
            "Counted {} bytes, {} distinct values.",
            table.total,
            table.kinds()
        );
        Ok(table)
    }

    /// Returns a frequency count of an in-memory slice.
    pub fn from_bytes(data: &[u8]) -> Result<Self, CodecError> {
        let mut counter = Counter::default();
        counter.add(data)?;
        Ok(counter.finish())
    }

    /// Rebuild a table from entries persisted in a container.
    pub fn from_entries(entries: Vec<FreqEntry>) -> Result<Self, CodecError> {
        let mut seen = [false; 256];
        for entry in &entries {
            if entry.count == 0 {
                return Err(malformed(format!(
                    "byte {:#04x} has a zero count",
                    entry.symbol
                )));
            }
            if seen[entry.symbol as usize] {
                return Err(malformed(format!(
                    "byte {:#04x} is listed twice",
                    entry.symbol
                )));
            }
            seen[entry.symbol as usize] = true;
        }
        let total = entries.iter().map(|e| e.count as u64).sum();
        Ok(Self { entries, total })
    }

    /// Number of distinct byte values (K).
    pub fn kinds(&self) -> usize {
        self.entries.len()
    }

    /// Total number of bytes counted.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn entries(&self) -> &[FreqEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Running counts. `slot` maps a byte value to its position in `entries`.
struct Counter {
    slot: [Option<u8>; 256],
    entries: Vec<FreqEntry>,
    total: u64,
}

impl Default for Counter {
    fn default() -> Self {
        Self {
            slot: [None; 256],
            entries: Vec::with_capacity(256),
            total: 0,
        }
    }
}

impl Counter {
    fn add(&mut self, data: &[u8]) -> Result<(), CodecError> {
        for &byte in data {
            match self.slot[byte as usize] {
                Some(idx) => {
                    let entry = &mut self.entries[idx as usize];
                    entry.count = entry
                        .count
                        .checked_add(1)
                        .ok_or(CodecError::CountOverflow(byte))?;
                }
                None => {
                    // At most 255 entries exist before this push, so the index fits a u8
                    self.slot[byte as usize] = Some(self.entries.len() as u8);
                    self.entries.push(FreqEntry {
                        symbol: byte,
                        count: 1,
                    });
                }
            }
        }
        self.total += data.len() as u64;
        Ok(())
    }

    fn finish(self) -> FreqTable {
        FreqTable {
            entries: self.entries,
            total: self.total,
        }
    }
}
