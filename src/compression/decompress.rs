use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use log::{debug, info, trace};

use super::container::read_header;
use crate::bitstream::bitreader::BitReader;
use crate::huffman_coding::tree::HuffmanTree;
use crate::tools::error::{malformed, CodecError};
use crate::tools::staged_write::staged_write;

/// Decoded bytes are collected up to this size before each write.
const CHUNK_SIZE: usize = 64 * 1024;

/// Uncompress the container in `source` into `sink`. Returns the number of bytes written.
pub fn decompress<R: Read, W: Write>(source: &mut R, sink: &mut W) -> Result<u64, CodecError> {
    let mut br = BitReader::new(source);
    let table = match read_header(&mut br)? {
        Some(table) => table,
        None => {
            debug!("Empty container.");
            return Ok(0);
        }
    };

    // A single symbol is just a run
    if table.kinds() == 1 {
        let entry = table.entries()[0];
        debug!("Single symbol {:#04x} x {}.", entry.symbol, entry.count);
        write_run(entry.symbol, entry.count as u64, sink)?;
        return Ok(entry.count as u64);
    }

    info!("Building Huffman tree...");
    let tree = HuffmanTree::build(&table)?;
    info!("Decoding...");
    decode_payload(&tree, table.total(), &mut br, sink)
}

fn write_run<W: Write>(symbol: u8, count: u64, sink: &mut W) -> Result<(), CodecError> {
    let chunk = vec![symbol; CHUNK_SIZE.min(count as usize)];
    let mut left = count;
    while left > 0 {
        let n = left.min(chunk.len() as u64) as usize;
        sink.write_all(&chunk[..n])?;
        left -= n as u64;
    }
    Ok(())
}

/// Walk the tree from the root, one payload bit per step, emitting a byte every time a leaf
/// is reached. Stops as soon as `total` bytes are out, so padding bits are never decoded.
fn decode_payload<R: Read, W: Write>(
    tree: &HuffmanTree,
    total: u64,
    br: &mut BitReader<R>,
    sink: &mut W,
) -> Result<u64, CodecError> {
    let mut out: Vec<u8> = Vec::with_capacity(CHUNK_SIZE);
    let leaves = tree.leaves();
    let root = tree.root();
    let mut node = root;
    let mut written: u64 = 0;

    while written < total {
        let bit = match br.bit()? {
            Some(bit) => bit,
            None => {
                return Err(malformed(format!(
                    "payload ends after {} of {} bytes",
                    written + out.len() as u64,
                    total
                )))
            }
        };
        node = tree.step(node, bit);
        if node < leaves {
            if let Some(symbol) = tree.symbol(node) {
                out.push(symbol);
            }
            node = root;
            if out.len() == CHUNK_SIZE {
                sink.write_all(&out)?;
                written += out.len() as u64;
                out.clear();
            } else if written + (out.len() as u64) == total {
                break;
            }
        }
    }
    sink.write_all(&out)?;
    written += out.len() as u64;
    trace!("Stopped decoding at {}", br.loc());
    Ok(written)
}

/// Decompress an in-memory container.
pub fn decode_bytes(container: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut src = container;
    let mut out = Vec::new();
    decompress(&mut src, &mut out)?;
    Ok(out)
}

/// Uncompress the container at `input` into `output`. The output only appears once
/// decoding has succeeded.
pub fn decompress_file(input: &Path, output: &Path) -> Result<u64, CodecError> {
    info!("Input  file - {}", input.display());
    info!("Output file - {}", output.display());

    let mut fin = File::open(input)?;
    let written = staged_write(output, |f_out| decompress(&mut fin, f_out))?;
    info!("Restored {} bytes.", written);
    Ok(written)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::compression::compress::encode_bytes;

    #[test]
    fn empty_container_test() {
        assert!(decode_bytes(&[]).unwrap().is_empty());
    }

    #[test]
    fn single_symbol_test() {
        let out = decode_bytes(&[1, 0x41, 0, 0, 0, 10]).unwrap();
        assert_eq!(out, vec![0x41; 10]);
    }

    #[test]
    fn long_run_test() {
        // More than one write chunk
        let out = decode_bytes(&[1, 0x00, 0, 2, 0, 1]).unwrap();
        assert_eq!(out.len(), 0x020001);
        assert!(out.iter().all(|&b| b == 0));
    }

    #[test]
    fn scenario_three_test() {
        let container = [
            3, 0x00, 0, 0, 0, 2, 0x01, 0, 0, 0, 2, 0x02, 0, 0, 0, 1, 0b1101_1010,
        ];
        assert_eq!(
            decode_bytes(&container).unwrap(),
            vec![0x00, 0x01, 0x00, 0x01, 0x02]
        );
    }

    #[test]
    fn padding_is_not_decoded_test() {
        // "aab" -> 110 + five padding zeros, which would decode as five more 'b's
        let container = encode_bytes(b"aab").unwrap();
        assert_eq!(decode_bytes(&container).unwrap(), b"aab");
    }

    #[test]
    fn trailing_garbage_ignored_test() {
        let mut container = encode_bytes(b"hello world").unwrap();
        container.extend_from_slice(&[0xff, 0x00, 0x55]);
        assert_eq!(decode_bytes(&container).unwrap(), b"hello world");
    }

    #[test]
    fn truncated_payload_test() {
        let mut container = encode_bytes(b"the quick brown fox jumps over the lazy dog").unwrap();
        container.truncate(container.len() - 3);
        assert!(matches!(
            decode_bytes(&container),
            Err(CodecError::MalformedContainer(_))
        ));
    }

    #[test]
    fn truncated_header_test() {
        assert!(matches!(
            decode_bytes(&[3, 0x00, 0, 0]),
            Err(CodecError::MalformedContainer(_))
        ));
    }

    #[test]
    fn round_trip_test() {
        let cases: Vec<Vec<u8>> = vec![
            vec![],
            vec![7],
            vec![0x41; 1000],
            b"ab".to_vec(),
            (0..=255).collect(),
            (0..100_000_u32).map(|i| (i % 7 + i % 13) as u8).collect(),
        ];
        for data in cases {
            let container = encode_bytes(&data).unwrap();
            assert_eq!(decode_bytes(&container).unwrap(), data);
        }
    }
}
