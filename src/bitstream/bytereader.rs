//! ByteReader: reads the little-endian byte stream of a bjpeg container.
//!
//! Every read is bounds checked. Running off the end of the data is reported as a malformed
//! container together with the offset where the read started.

use crate::error::{Error, Result};

/// Cursor over an in-memory container.
#[derive(Debug)]
pub struct ByteReader<'a> {
    buffer: &'a [u8],
    cursor: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, cursor: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    /// Take the next `n` bytes, or fail without moving the cursor.
    pub fn bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(Error::malformed(format!(
                "needed {} bytes at offset {}, only {} left",
                n,
                self.cursor,
                self.remaining()
            )));
        }
        let buffer: &'a [u8] = self.buffer;
        let out = &buffer[self.cursor..self.cursor + n];
        self.cursor += n;
        Ok(out)
    }

    fn array4(&mut self) -> Result<[u8; 4]> {
        let mut out = [0u8; 4];
        out.copy_from_slice(self.bytes(4)?);
        Ok(out)
    }

    pub fn in32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.array4()?))
    }

    pub fn in_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.array4()?))
    }

    pub fn in_f32(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.in32()?))
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}]", self.cursor)
    }
}

#[cfg(test)]
mod test {
    use super::ByteReader;
    use crate::error::Error;

    #[test]
    fn short_reads_advance() {
        let x = "Hello, world!".as_bytes();
        let mut br = ByteReader::new(x);
        assert_eq!(br.bytes(2).unwrap(), b"He");
        assert_eq!(br.remaining(), 11);
    }

    #[test]
    fn bytes_test() {
        let x = "Hello, world!".as_bytes();
        let mut br = ByteReader::new(x);
        assert_eq!(br.bytes(5).unwrap(), "Hello".as_bytes());
    }

    #[test]
    fn in32_test() {
        let x = [1, 2, 3, 4, 0xfe, 0xff, 0xff, 0xff];
        let mut br = ByteReader::new(&x);
        assert_eq!(br.in32().unwrap(), 0x0403_0201);
        assert_eq!(br.in_i32().unwrap(), -2);
        assert_eq!(br.remaining(), 0);
    }

    #[test]
    fn in_f32_test() {
        let x = [0x00, 0x00, 0x80, 0x3f];
        let mut br = ByteReader::new(&x);
        assert_eq!(br.in_f32().unwrap(), 1.0);
    }

    #[test]
    fn loc_test() {
        let x = "Hello, world!".as_bytes();
        let mut br = ByteReader::new(x);
        br.bytes(5).unwrap();
        br.bytes(1).unwrap();
        assert_eq!(br.loc(), "[6]");
    }

    #[test]
    fn truncated_read_fails_in_place() {
        let x = [1, 2, 3];
        let mut br = ByteReader::new(&x);
        assert!(matches!(br.in32(), Err(Error::MalformedContainer(_))));
        assert_eq!(br.loc(), "[0]");
        assert_eq!(br.bytes(1).unwrap(), [1]);
    }
}
