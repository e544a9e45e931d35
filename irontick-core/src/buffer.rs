//! Buffer trait for reading big-endian wire fields.
//!
//! The venue's binary frames are big-endian throughout; these accessors
//! are the only byte-order-aware code in the crate.

/// Trait for read-only buffer access with big-endian primitive reads.
pub trait ReadBuffer {
    /// Returns the buffer as a byte slice.
    fn as_slice(&self) -> &[u8];

    /// Returns the length of the buffer in bytes.
    fn len(&self) -> usize;

    /// Returns true if the buffer is empty.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads a u8 at the given offset.
    ///
    /// # Arguments
    /// * `offset` - Byte offset to read from
    #[inline(always)]
    fn get_u8(&self, offset: usize) -> u8 {
        self.as_slice()[offset]
    }

    /// Reads a u16 in big-endian at the given offset.
    ///
    /// # Arguments
    /// * `offset` - Byte offset to read from
    #[inline(always)]
    fn get_u16_be(&self, offset: usize) -> u16 {
        let bytes = &self.as_slice()[offset..offset + 2];
        u16::from_be_bytes([bytes[0], bytes[1]])
    }

    /// Reads a u32 in big-endian at the given offset.
    ///
    /// # Arguments
    /// * `offset` - Byte offset to read from
    #[inline(always)]
    fn get_u32_be(&self, offset: usize) -> u32 {
        let bytes = &self.as_slice()[offset..offset + 4];
        u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    /// Reads a u64 in big-endian at the given offset.
    ///
    /// # Arguments
    /// * `offset` - Byte offset to read from
    #[inline(always)]
    fn get_u64_be(&self, offset: usize) -> u64 {
        let bytes = &self.as_slice()[offset..offset + 8];
        u64::from_be_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ])
    }

    /// Returns a slice of bytes at the given offset and length.
    ///
    /// # Arguments
    /// * `offset` - Byte offset to start from
    /// * `len` - Number of bytes to read
    #[inline(always)]
    fn get_bytes(&self, offset: usize, len: usize) -> &[u8] {
        &self.as_slice()[offset..offset + len]
    }
}

impl ReadBuffer for [u8] {
    fn as_slice(&self) -> &[u8] {
        self
    }

    fn len(&self) -> usize {
        <[u8]>::len(self)
    }
}

impl ReadBuffer for Vec<u8> {
    fn as_slice(&self) -> &[u8] {
        self
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_u16_be() {
        let buf: Vec<u8> = vec![0x12, 0x34, 0x56];
        assert_eq!(buf.get_u16_be(0), 0x1234);
        assert_eq!(buf.get_u16_be(1), 0x3456);
    }

    #[test]
    fn test_get_u32_be() {
        let buf: &[u8] = &[0x00, 0x0B, 0x45, 0x01];
        assert_eq!(buf.get_u32_be(0), 738_561);
    }

    #[test]
    fn test_get_u64_be() {
        let buf: &[u8] = &[0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00];
        assert_eq!(buf.get_u64_be(0), 256);
    }

    #[test]
    fn test_get_bytes_and_len() {
        let buf: &[u8] = &[1, 2, 3, 4, 5];
        assert_eq!(ReadBuffer::len(buf), 5);
        assert!(!buf.is_empty());
        assert_eq!(buf.get_bytes(1, 3), &[2, 3, 4]);
        assert_eq!(buf.get_u8(4), 5);
    }
}
