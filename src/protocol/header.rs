//! Common frame header
//!
//! `size[4] type[1] tag[2]`, present on every 9P message.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codec::{WireReader, WireWriter};
use crate::error::{P9Error, Result};

/// Header size: 4 bytes size + 1 byte type + 2 bytes tag
pub const HEADER_SIZE: usize = 7;

/// The fixed prefix of every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Header {
    /// Total frame length, including these 7 bytes
    pub size: u32,

    /// Raw message-type byte
    pub mtype: u8,

    /// Transaction tag
    pub tag: u16,
}

impl Header {
    /// Parse a header from exactly 7 bytes
    ///
    /// Fails with `MalformedSize` if the declared size cannot even hold the
    /// header itself.
    pub fn parse(bytes: &[u8; HEADER_SIZE]) -> Result<Self> {
        let mut r = WireReader::from_slice(bytes);
        let header = Self {
            size: r.read_u32("size")?,
            mtype: r.read_u8("type")?,
            tag: r.read_u16("tag")?,
        };
        if (header.size as usize) < HEADER_SIZE {
            return Err(P9Error::MalformedSize { size: header.size });
        }
        Ok(header)
    }

    /// Number of body bytes that follow the header
    pub fn body_len(&self) -> usize {
        (self.size as usize).saturating_sub(HEADER_SIZE)
    }

    pub(crate) fn write(&self, w: &mut WireWriter) {
        w.write_u32(self.size);
        w.write_u8(self.mtype);
        w.write_u16(self.tag);
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "size {} type {} tag {}", self.size, self.mtype, self.tag)
    }
}
