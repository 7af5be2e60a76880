//! QID codec
//!
//! A QID is the server's unique identity for a file:
//! ```text
//! ┌──────────┬─────────────┬──────────────────┐
//! │ type (1) │ version (4) │     path (8)     │
//! └──────────┴─────────────┴──────────────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codec::{WireReader, WireWriter};
use crate::error::Result;

/// Size of a QID on the wire
pub const QID_SIZE: usize = 13;

// QID type bits
pub const QTDIR: u8 = 0x80;
pub const QTAPPEND: u8 = 0x40;
pub const QTEXCL: u8 = 0x20;
pub const QTMOUNT: u8 = 0x10;
pub const QTAUTH: u8 = 0x08;
pub const QTTMP: u8 = 0x04;
pub const QTFILE: u8 = 0x00;

/// Server-assigned unique file identity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Qid {
    /// File type bits (`QTDIR`, `QTAPPEND`, ...)
    pub qtype: u8,

    /// Version number for the given path
    pub version: u32,

    /// Unique identification for the file
    pub path: u64,
}

impl Qid {
    pub fn new(qtype: u8, version: u32, path: u64) -> Self {
        Self {
            qtype,
            version,
            path,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.qtype & QTDIR != 0
    }
}

/// Read a 13-byte QID
pub fn read_qid(r: &mut WireReader, field: &'static str) -> Result<Qid> {
    Ok(Qid {
        qtype: r.read_u8(field)?,
        version: r.read_u32(field)?,
        path: r.read_u64(field)?,
    })
}

/// Write a 13-byte QID
pub fn write_qid(w: &mut WireWriter, qid: &Qid) {
    w.write_u8(qid.qtype);
    w.write_u32(qid.version);
    w.write_u64(qid.path);
}

impl fmt::Display for Qid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Plan 9 fcall style: (path version type-letters)
        write!(f, "({:016x} {} ", self.path, self.version)?;
        if self.qtype & QTDIR != 0 {
            f.write_str("d")?;
        }
        if self.qtype & QTAPPEND != 0 {
            f.write_str("a")?;
        }
        if self.qtype & QTEXCL != 0 {
            f.write_str("l")?;
        }
        if self.qtype & QTAUTH != 0 {
            f.write_str("A")?;
        }
        f.write_str(")")
    }
}
