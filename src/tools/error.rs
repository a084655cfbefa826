use std::io;

use thiserror::Error;

/// Everything that can go wrong while compressing or uncompressing a file.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Reading the source or writing the sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The container is truncated or its frequency table makes no sense.
    #[error("Malformed container: {0}")]
    MalformedContainer(String),
    /// The tree builder needs at least two distinct symbols.
    #[error("Can't build a huffman tree from {0} symbol(s)")]
    TooFewSymbols(usize),
    /// A symbol occurs more often than the 4 byte count field can hold.
    #[error("Byte {0:#04x} occurs more than {} times", u32::MAX)]
    CountOverflow(u8),
    /// A codeword does not fit the 64 bit packer word.
    #[error("Codeword for byte {0:#04x} is longer than 64 bits")]
    CodeTooLong(u8),
}

/// Build a MalformedContainer error from anything printable.
pub(crate) fn malformed(why: impl Into<String>) -> CodecError {
    CodecError::MalformedContainer(why.into())
}
