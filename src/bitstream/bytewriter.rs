//! ByteWriter: builds the little-endian byte stream of a bjpeg container.
//!

/// Accumulates container bytes in memory. The driver decides where they end up.
#[derive(Debug, Default)]
pub struct ByteWriter {
    /// Output buffer holding everything written so far.
    pub output: Vec<u8>,
}

impl ByteWriter {
    /// Create a new ByteWriter with room for `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            output: Vec::with_capacity(capacity),
        }
    }

    /// Put a u32 on the stream, least significant byte first.
    pub fn out32(&mut self, data: u32) {
        self.output.extend_from_slice(&data.to_le_bytes());
    }

    /// Put an i32 on the stream, two's complement, least significant byte first.
    pub fn out_i32(&mut self, data: i32) {
        self.output.extend_from_slice(&data.to_le_bytes());
    }

    /// Put an f32 on the stream as its IEEE-754 bit pattern.
    pub fn out_f32(&mut self, data: f32) {
        self.out32(data.to_bits());
    }

    /// Debugging function to return the number of bytes output so far
    pub fn loc(&self) -> String {
        format!("[{}]", self.output.len())
    }

    /// Hand over the finished stream.
    pub fn into_output(self) -> Vec<u8> {
        self.output
    }
}
