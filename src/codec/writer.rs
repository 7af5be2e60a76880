//! Body writer
//!
//! Growable little-endian output buffer for outgoing frames.

use bytes::{BufMut, Bytes, BytesMut};

use super::MAX_STRING_LEN;
use crate::error::{P9Error, Result};

/// Growable output buffer
///
/// Appends never disturb bytes already written; the underlying `BytesMut`
/// reallocates as needed.
#[derive(Debug, Default)]
pub struct WireWriter {
    buf: BytesMut,
}

impl WireWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with room for `capacity` bytes before reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// View the bytes written so far
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buf.put_u16_le(value);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.put_u32_le(value);
    }

    pub fn write_u64(&mut self, value: u64) {
        self.buf.put_u64_le(value);
    }

    /// Append raw bytes with no length prefix
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
    }

    /// Append a u16 length prefix followed by the string bytes
    ///
    /// Fails with `StringTooLong` if the string cannot be described by a
    /// 16-bit length; nothing is written in that case.
    pub fn write_string(&mut self, s: impl AsRef<[u8]>) -> Result<()> {
        let s = s.as_ref();
        if s.len() > MAX_STRING_LEN {
            return Err(P9Error::StringTooLong { len: s.len() });
        }
        self.buf.put_u16_le(s.len() as u16);
        self.buf.put_slice(s);
        Ok(())
    }

    /// Drop everything written after the first `len` bytes
    pub fn truncate(&mut self, len: usize) {
        self.buf.truncate(len);
    }

    /// Finish writing and hand out the buffer
    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }
}
