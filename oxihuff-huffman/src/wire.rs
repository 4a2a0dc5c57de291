//! Little-endian field parsing with offset-aware errors.

use oxihuff_core::error::{OxiHuffError, Result};

/// Sequential reader over a byte slice. Every short read becomes a
/// [`OxiHuffError::MalformedContainer`] naming the field and the absolute
/// offset where it should have started.
#[derive(Debug)]
pub(crate) struct FieldReader<'a> {
    data: &'a [u8],
    pos: usize,
    /// Offset of `data[0]` within the enclosing buffer.
    base: u64,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self::with_base(data, 0)
    }

    pub(crate) fn with_base(data: &'a [u8], base: u64) -> Self {
        Self { data, pos: 0, base }
    }

    /// Absolute offset of the next unread byte.
    pub(crate) fn offset(&self) -> u64 {
        self.base + self.pos as u64
    }

    /// Bytes consumed so far.
    pub(crate) fn consumed(&self) -> usize {
        self.pos
    }

    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub(crate) fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    pub(crate) fn bytes(&mut self, len: usize, field: &str) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(OxiHuffError::malformed(
                self.offset(),
                format!(
                    "{field} needs {len} bytes but only {} remain",
                    self.remaining()
                ),
            ));
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    pub(crate) fn u8(&mut self, field: &str) -> Result<u8> {
        Ok(self.bytes(1, field)?[0])
    }

    pub(crate) fn u32(&mut self, field: &str) -> Result<u32> {
        let raw = self.bytes(4, field)?;
        Ok(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_little_endian() {
        let mut reader = FieldReader::new(&[0x78, 0x56, 0x34, 0x12, 0xAB]);
        assert_eq!(reader.u32("count").unwrap(), 0x1234_5678);
        assert_eq!(reader.u8("tag").unwrap(), 0xAB);
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.consumed(), 5);
    }

    #[test]
    fn test_short_read_reports_offset() {
        let mut reader = FieldReader::with_base(&[1, 2], 10);
        let err = reader.u32("payload length").unwrap_err();
        match err {
            OxiHuffError::MalformedContainer { offset, message } => {
                assert_eq!(offset, 10);
                assert!(message.contains("payload length"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
