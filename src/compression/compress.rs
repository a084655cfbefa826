use std::ffi::OsString;
use std::fs::File;
use std::io::{self, Cursor, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, trace};

use super::container::{header_len, write_header, DEFAULT_EXTENSION};
use crate::bitstream::bitpacker::BitPacker;
use crate::huffman_coding::codebook::Codebook;
use crate::huffman_coding::tree::HuffmanTree;
use crate::tools::error::CodecError;
use crate::tools::freq_count::FreqTable;
use crate::tools::staged_write::staged_write;

/// Size of the read buffer and of the packer output between drains.
const CHUNK_SIZE: usize = 64 * 1024;

/// What a compress run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressStats {
    /// Bytes read from the source.
    pub source_len: u64,
    /// Distinct byte values in the source (K).
    pub kinds: usize,
    pub header_len: usize,
    pub payload_len: u64,
}

impl CompressStats {
    pub fn container_len(&self) -> u64 {
        self.header_len as u64 + self.payload_len
    }
}

/// Compress `source` into a container written to `sink`.
///
/// The source is read twice: once to count bytes, then (after seeking back to where counting
/// started) once to encode them. Empty and single-symbol sources produce a header only.
pub fn compress<R: Read + Seek, W: Write>(
    source: &mut R,
    sink: &mut W,
) -> Result<CompressStats, CodecError> {
    info!("Preprocessing...");
    let start = source.stream_position()?;
    let table = FreqTable::from_reader(&mut *source)?;

    let mut stats = CompressStats {
        source_len: table.total(),
        kinds: table.kinds(),
        header_len: header_len(table.kinds()),
        payload_len: 0,
    };

    // Zero or one distinct byte: the header alone describes the source
    if table.kinds() < 2 {
        write_header(&table, sink)?;
        debug!("{} distinct byte(s), no payload.", table.kinds());
        return Ok(stats);
    }

    info!("Building Huffman tree...");
    let tree = HuffmanTree::build(&table)?;
    info!("Generating codebook...");
    let book = Codebook::from_tree(&tree)?;

    info!("Encoding...");
    write_header(&table, sink)?;
    source.seek(SeekFrom::Start(start))?;
    stats.payload_len = encode_payload(&book, table.total(), source, sink)?;
    debug!(
        "Encoded {} bytes into {} payload bytes.",
        stats.source_len, stats.payload_len
    );
    Ok(stats)
}

/// Concatenate the codeword of every source byte and write the packed bits.
/// Returns the number of payload bytes written.
fn encode_payload<R: Read, W: Write>(
    book: &Codebook,
    expected: u64,
    source: &mut R,
    sink: &mut W,
) -> Result<u64, CodecError> {
    let mut bp = BitPacker::new(CHUNK_SIZE + 8);
    let mut buf = vec![0_u8; CHUNK_SIZE];
    let mut consumed: u64 = 0;
    let mut written: u64 = 0;

    loop {
        let size = match source.read(&mut buf) {
            Ok(0) => break,
            Ok(size) => size,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        for &byte in &buf[..size] {
            let code = book.get(byte).ok_or_else(source_changed)?;
            bp.out_code(code);
        }
        consumed += size as u64;
        if bp.output.len() >= CHUNK_SIZE {
            written += bp.drain_to(sink)? as u64;
        }
    }
    if consumed != expected {
        return Err(source_changed());
    }

    bp.flush();
    trace!("Payload ends at {}", bp.loc());
    written += bp.drain_to(sink)? as u64;
    Ok(written)
}

fn source_changed() -> CodecError {
    CodecError::Io(io::Error::new(
        ErrorKind::InvalidData,
        "source changed between counting and encoding",
    ))
}

/// Compress an in-memory buffer.
pub fn encode_bytes(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::new();
    compress(&mut Cursor::new(data), &mut out)?;
    Ok(out)
}

/// `<input>.hfm`
pub fn default_output(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(".");
    name.push(DEFAULT_EXTENSION);
    PathBuf::from(name)
}

/// Compress the file at `input`. The output goes to `output`, or to `<input>.hfm` when
/// no output is given, and only appears once compression has succeeded.
pub fn compress_file(input: &Path, output: Option<&Path>) -> Result<CompressStats, CodecError> {
    let output = output.map_or_else(|| default_output(input), Path::to_path_buf);
    info!("Input  file - {}", input.display());
    info!("Output file - {}", output.display());

    let mut fin = File::open(input)?;
    let stats = staged_write(&output, |f_out| compress(&mut fin, f_out))?;
    info!(
        "Compressed {} bytes to {} bytes.",
        stats.source_len,
        stats.container_len()
    );
    Ok(stats)
}
