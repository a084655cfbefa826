//! BitReader: reads the packed codeword payload of a container one bit at a time,
//! most significant bit of each byte first.
//!
//! NOTE: This module can read from any I/O source that supports the read() call.
//!

use std::io::{ErrorKind, Read};

const BUFFER_SIZE: usize = 64 * 1024;

#[derive(Debug)]
pub struct BitReader<R> {
    buffer: Vec<u8>,
    cursor: usize,
    bit_index: usize,
    source: R,
}

impl<R: Read> BitReader<R> {
    /// Creates a new BitReader (with a 64k buffer).
    pub fn new(source: R) -> Self {
        Self {
            buffer: vec![0; BUFFER_SIZE],
            cursor: BUFFER_SIZE,
            bit_index: 0,
            source,
        }
    }

    /// Check (and refill) buffer. Returns true if we have data, false if there is no more
    fn have_data(&mut self) -> std::io::Result<bool> {
        // Only try to read more data when the buffer cursor has reached the end of the buffer
        if self.cursor == self.buffer.len() {
            self.buffer.resize(BUFFER_SIZE, 0);
            let size = loop {
                match self.source.read(&mut self.buffer) {
                    Ok(size) => break size,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                }
            };
            // If nothing came back from our read attempt, then we have no more data.
            if size == 0 {
                self.buffer.clear();
                self.cursor = 0;
                return Ok(false);
            }
            // Adjust the buffer if we read less than the buffer size
            self.buffer.truncate(size);
            self.cursor = 0;
            self.bit_index = 0;
        }
        Ok(true)
    }

    /// Return the next bit (1 or 0), or None if there is no more data to read
    pub fn bit(&mut self) -> std::io::Result<Option<u8>> {
        if self.bit_index == 0 && !self.have_data()? {
            return Ok(None);
        }
        let bit = (self.buffer[self.cursor] >> (7 - self.bit_index)) & 1;
        self.bit_index += 1;
        if self.bit_index == 8 {
            self.bit_index = 0;
            self.cursor += 1;
        }
        Ok(Some(bit))
    }

    /// Returns the next 8 bits as a byte, or None if there is no more data to read. A stream
    /// that ends part way through the byte also gives None.
    pub fn byte(&mut self) -> std::io::Result<Option<u8>> {
        // Byte aligned: take it straight from the buffer
        if self.bit_index == 0 {
            if !self.have_data()? {
                return Ok(None);
            }
            let byte = self.buffer[self.cursor];
            self.cursor += 1;
            return Ok(Some(byte));
        }
        let mut byte = 0_u8;
        for _ in 0..8 {
            match self.bit()? {
                Some(bit) => byte = (byte << 1) | bit,
                None => return Ok(None),
            }
        }
        Ok(Some(byte))
    }

    /// Returns the next n bytes, or None if the stream ends before n bytes were read.
    pub fn bytes(&mut self, n: usize) -> std::io::Result<Option<Vec<u8>>> {
        let mut result: Vec<u8> = Vec::with_capacity(n);
        while result.len() < n {
            match self.byte()? {
                Some(byte) => result.push(byte),
                None => return Ok(None),
            }
        }
        Ok(Some(result))
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}

#[cfg(test)]
mod test {
    use super::BitReader;
    use std::io::Read;

    #[test]
    fn basic_test() {
        let x = [0b10000001_u8].as_slice();
        let mut br = BitReader::new(x);
        assert_eq!(br.bit().unwrap(), Some(1));
        for _ in 0..6 {
            assert_eq!(br.bit().unwrap(), Some(0));
        }
        assert_eq!(br.bit().unwrap(), Some(1));
        assert_eq!(br.bit().unwrap(), None);
        // Stays exhausted
        assert_eq!(br.bit().unwrap(), None);
    }

    #[test]
    fn msb_first_test() {
        let x = [0b01010000_u8, 0b1000_0000].as_slice();
        let mut br = BitReader::new(x);
        let bits: Vec<u8> = (0..9).map(|_| br.bit().unwrap().unwrap()).collect();
        assert_eq!(bits, vec![0, 1, 0, 1, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn loc_test() {
        let x = "Hello, world!".as_bytes();
        let mut br = BitReader::new(x);
        for _ in 0..41 {
            br.bit().unwrap();
        }
        assert_eq!(br.loc(), "[5.1]");
    }

    #[test]
    fn byte_test() {
        let x = "Hello, world!".as_bytes();
        let mut br = BitReader::new(x);
        assert_eq!(br.byte().unwrap(), Some(b'H'));
        assert_eq!(br.byte().unwrap(), Some(b'e'));
        assert_eq!(br.loc(), "[2.0]");
    }

    #[test]
    fn unaligned_byte_test() {
        let x = [0b1010_1010_u8, 0b1100_0000].as_slice();
        let mut br = BitReader::new(x);
        assert_eq!(br.bit().unwrap(), Some(1));
        assert_eq!(br.byte().unwrap(), Some(0b0101_0101));
        assert_eq!(br.bit().unwrap(), Some(1));
        // Only 6 bits left
        assert_eq!(br.byte().unwrap(), None);
    }

    #[test]
    fn bytes_test() {
        let x = "Hello, world!".as_bytes();
        let mut br = BitReader::new(x);
        assert_eq!(br.bytes(5).unwrap(), Some(b"Hello".to_vec()));
        assert_eq!(br.bytes(0).unwrap(), Some(vec![]));
        assert_eq!(br.bytes(8).unwrap(), Some(b", world!".to_vec()));
        assert_eq!(br.byte().unwrap(), None);
    }

    #[test]
    fn bytes_short_stream_test() {
        let mut br = BitReader::new([1_u8, 2, 3].as_slice());
        assert_eq!(br.bytes(4).unwrap(), None);
    }

    /// A reader that hands out one byte per read call.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.0.is_empty() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.0[0];
            self.0 = &self.0[1..];
            Ok(1)
        }
    }

    #[test]
    fn short_reads_bytes_test() {
        let mut br = BitReader::new(Trickle(b"abc"));
        assert_eq!(br.bytes(3).unwrap(), Some(b"abc".to_vec()));
        assert_eq!(br.bit().unwrap(), None);
    }

    #[test]
    fn short_reads_test() {
        let mut br = BitReader::new(Trickle(&[0xf0, 0x0f]));
        let bits: Vec<u8> = std::iter::from_fn(|| br.bit().unwrap()).collect();
        assert_eq!(bits, vec![1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1]);
    }
}
