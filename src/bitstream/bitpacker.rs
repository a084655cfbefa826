use std::io::Write;

use log::error;

use crate::huffman_coding::codebook::Codeword;

/// Creates a bitstream for output. Codewords go in most significant bit first; completed
/// bytes collect in `output` until they are drained to a writer.
pub struct BitPacker {
    pub output: Vec<u8>,
    /// Number of real bits in the final byte after flush() (0 means the byte was full).
    queue: u64,
    q_bits: u8,
}

impl BitPacker {
    /// Create a new BitPacker with an output buffer of size specified. Call flush() to
    /// flush the bit queue to the buffer before the last drain.
    pub fn new(size: usize) -> Self {
        Self {
            output: Vec::with_capacity(size),
            queue: 0,
            q_bits: 0,
        }
    }

    /// Move every complete byte from the queue to the output buffer.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /// Put up to 32 right aligned bits on the stream.
    fn out_bits(&mut self, bits: u64, depth: u8) {
        if depth == 0 {
            return;
        }
        self.queue <<= depth; //shift queue by bit length
        self.queue |= bits & (u64::MAX >> (64 - depth)); //add data portion to queue
        self.q_bits += depth; //update depth of queue bits
        self.write_stream();
    }

    /// Put a codeword on the stream. Codewords longer than 32 bits go in two halves so the
    /// queue never holds more than 39 bits.
    pub fn out_code(&mut self, code: Codeword) {
        if code.len > 32 {
            let low = code.len - 32;
            self.out_bits(code.bits >> low, 32);
            self.out_bits(code.bits, low);
        } else {
            self.out_bits(code.bits, code.len);
        }
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the least
    /// signficant bits.
    pub fn flush(&mut self) {
        if self.q_bits > 0 {
            self.queue <<= 8 - self.q_bits; //pad the queue with zeros
            self.q_bits += 8 - self.q_bits;
            self.write_stream(); // write out all that is left
            if self.q_bits > 0 {
                error!("Stuff left in the BitPacker queue.");
            }
        }
    }

    /// Write all complete bytes to `sink` and empty the output buffer. Bits still in the
    /// queue stay there.
    pub fn drain_to<W: Write>(&mut self, sink: &mut W) -> std::io::Result<usize> {
        sink.write_all(&self.output)?;
        let written = self.output.len();
        self.output.clear();
        Ok(written)
    }

    /// Debugging function to return the number of bytes.bits queued so far
    pub fn loc(&self) -> String {
        format! {"[{}.{}]",((self.output.len() * 8) + self.q_bits as usize)/8, ((self.output.len() * 8) + self.q_bits as usize)%8}
    }
}
