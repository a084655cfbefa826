//! The compression module ties the pieces together.
//!
//! Compression happens in the following steps:
//! - Frequency count: one pass over the source, keeping the order each byte value first appears.
//! - Huffman tree: built from the counts with a deterministic two-minimum scan.
//! - Codebook: one codeword per byte value, read off the tree.
//! - Packing: a second pass over the source writes the codewords after the container header.
//!
//! Sources with zero or one distinct byte value skip the last three steps; the header
//! alone describes them.
//!
//! Decompression reads the header, rebuilds the same tree and walks it once per payload bit
//! until the original length has been restored.
//!

pub mod compress;
pub mod container;
pub mod decompress;
