//! A byte-level Huffman file compressor.
//!
//! Version 0.1.0
//!
//! Each file gets one static Huffman tree. The tree is built from the byte counts of the
//! file, which are stored in the container header, so uncompressing rebuilds the exact same
//! tree before walking the payload bit by bit.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> hfm compress -i test.jpg`
//!
//! This will compress the file and create the file test.jpg.hfm.
//!
//! `$> hfm uncompress -i test.jpg.hfm -o test.jpg`
//!
//! restores it. The same operations are available on readers and writers through
//! [`compress`] and [`decompress`].
//!
pub mod bitstream;
pub mod compression;
pub mod huffman_coding;
pub mod tools;

pub use compression::compress::{compress, compress_file, encode_bytes, CompressStats};
pub use compression::decompress::{decode_bytes, decompress, decompress_file};
pub use tools::error::CodecError;
