//! Body reader
//!
//! A bounds-checked little-endian cursor over a frame body.

use bytes::{Buf, Bytes};

use super::WireString;
use crate::error::{P9Error, Result};

/// Cursor over a received frame body
///
/// Every read names the field it is decoding so a `Truncated` error can say
/// what was being read and where. Byte ranges handed out by
/// [`read_bytes`](WireReader::read_bytes) share the body allocation.
#[derive(Debug, Clone)]
pub struct WireReader {
    /// Bytes not yet consumed
    buf: Bytes,

    /// Length of the buffer when the reader was created
    len: usize,
}

impl WireReader {
    /// Create a reader over a body buffer
    pub fn new(buf: Bytes) -> Self {
        let len = buf.len();
        Self { buf, len }
    }

    /// Create a reader over a copy of `bytes`
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(bytes))
    }

    /// Number of bytes consumed so far
    pub fn offset(&self) -> usize {
        self.len - self.buf.len()
    }

    /// Number of bytes left to read
    pub fn remaining(&self) -> usize {
        self.buf.len()
    }

    /// Consume the reader, returning whatever was not read
    pub fn into_remaining(self) -> Bytes {
        self.buf
    }

    fn ensure(&self, field: &'static str, needed: usize) -> Result<()> {
        if self.buf.len() < needed {
            return Err(P9Error::Truncated {
                field,
                offset: self.offset(),
                needed,
                remaining: self.buf.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&mut self, field: &'static str) -> Result<u8> {
        self.ensure(field, 1)?;
        Ok(self.buf.get_u8())
    }

    pub fn read_u16(&mut self, field: &'static str) -> Result<u16> {
        self.ensure(field, 2)?;
        Ok(self.buf.get_u16_le())
    }

    pub fn read_u32(&mut self, field: &'static str) -> Result<u32> {
        self.ensure(field, 4)?;
        Ok(self.buf.get_u32_le())
    }

    pub fn read_u64(&mut self, field: &'static str) -> Result<u64> {
        self.ensure(field, 8)?;
        Ok(self.buf.get_u64_le())
    }

    /// Read exactly `n` raw bytes without copying
    pub fn read_bytes(&mut self, field: &'static str, n: usize) -> Result<Bytes> {
        self.ensure(field, n)?;
        Ok(self.buf.split_to(n))
    }

    /// Read a u16 length followed by that many bytes
    pub fn read_string(&mut self, field: &'static str) -> Result<WireString> {
        let start = self.offset();
        let n = self.read_u16(field)? as usize;
        if self.buf.len() < n {
            // Report the fault at the start of the string, not after its prefix
            return Err(P9Error::Truncated {
                field,
                offset: start,
                needed: n + 2,
                remaining: self.buf.len() + 2,
            });
        }
        Ok(WireString::from(self.buf.split_to(n)))
    }
}
