//! The bitstream module forms the bit-level I/O of the compressor.
//!
//! - bitpacker: packs codewords most significant bit first into bytes, zero padding the last byte.
//! - bitreader: hands the payload back one bit at a time in the same order.
//!
//! It is designed to interface with the other modules of this crate and is not intended for
//! more general use.
//!
pub mod bitpacker;
pub mod bitreader;
