//! Stat (directory entry) codec
//!
//! ```text
//! ┌──────────┬──────────┬─────────┬──────────┬──────────┬───────────┬───────────┐
//! │ size (2) │ type (2) │ dev (4) │ qid (13) │ mode (4) │ atime (4) │ mtime (4) │ ...
//! └──────────┴──────────┴─────────┴──────────┴──────────┴───────────┴───────────┘
//!      ┌────────────┬──────────┬─────────┬─────────┬──────────┐
//!  ... │ length (8) │ name (s) │ uid (s) │ gid (s) │ muid (s) │
//!      └────────────┴──────────┴─────────┴─────────┴──────────┘
//! ```
//!
//! Rstat and Twstat wrap the record in a second u16 length. Both prefixes
//! are advisory: the decoder reads and drops them unless
//! `Config::strict_stat_length` asks for them to be checked. All knowledge of
//! the two prefixes lives in this module.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::qid::{read_qid, write_qid, QID_SIZE};
use super::Qid;
use crate::codec::{WireReader, WireString, WireWriter};
use crate::error::{P9Error, Result};

/// Bytes of a stat record after its size prefix, excluding string contents
pub const STAT_FIXED_SIZE: usize = 2 + 4 + QID_SIZE + 4 + 4 + 4 + 8 + 4 * 2;

// Permission bits in Stat::mode and Tcreate perm
pub const DMDIR: u32 = 0x8000_0000;
pub const DMAPPEND: u32 = 0x4000_0000;
pub const DMEXCL: u32 = 0x2000_0000;
pub const DMAUTH: u32 = 0x0800_0000;
pub const DMTMP: u32 = 0x0400_0000;

/// File metadata record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    /// Server type
    pub stype: u16,

    /// Server subtype
    pub dev: u32,

    pub qid: Qid,

    /// Permission bits (`DMDIR`, ... plus rwx bits)
    pub mode: u32,

    /// Last read time (seconds since the epoch)
    pub atime: u32,

    /// Last write time (seconds since the epoch)
    pub mtime: u32,

    pub length: u64,

    /// Last element of the path
    pub name: WireString,

    pub uid: WireString,
    pub gid: WireString,

    /// Last modifier
    pub muid: WireString,
}

impl Stat {
    /// Value of the record's own size prefix
    pub fn size(&self) -> usize {
        STAT_FIXED_SIZE + self.name.len() + self.uid.len() + self.gid.len() + self.muid.len()
    }
}

fn check_length(declared: usize, actual: usize) -> Result<()> {
    if declared != actual {
        return Err(P9Error::StatLengthMismatch { declared, actual });
    }
    Ok(())
}

/// Read a stat record, including its own size prefix
pub fn read_stat(r: &mut WireReader, strict: bool) -> Result<Stat> {
    let declared = r.read_u16("stat.size")? as usize;
    let start = r.offset();

    let stat = Stat {
        stype: r.read_u16("stat.type")?,
        dev: r.read_u32("stat.dev")?,
        qid: read_qid(r, "stat.qid")?,
        mode: r.read_u32("stat.mode")?,
        atime: r.read_u32("stat.atime")?,
        mtime: r.read_u32("stat.mtime")?,
        length: r.read_u64("stat.length")?,
        name: r.read_string("stat.name")?,
        uid: r.read_string("stat.uid")?,
        gid: r.read_string("stat.gid")?,
        muid: r.read_string("stat.muid")?,
    };

    if strict {
        check_length(declared, r.offset() - start)?;
    }
    Ok(stat)
}

/// Read the `statlen[2] stat[n]` pair carried by Rstat and Twstat
pub fn read_stat_with_len(r: &mut WireReader, strict: bool) -> Result<Stat> {
    let declared = r.read_u16("statlen")? as usize;
    let start = r.offset();
    let stat = read_stat(r, strict)?;
    if strict {
        check_length(declared, r.offset() - start)?;
    }
    Ok(stat)
}

fn checked_size(stat: &Stat) -> Result<u16> {
    let size = stat.size();
    u16::try_from(size).map_err(|_| P9Error::Overflow {
        field: "stat.size",
        len: size,
    })
}

/// Write a stat record with an accurate size prefix
///
/// Fails with `Overflow` if the record as a whole does not fit a u16 size
/// prefix, even when every individual string does. Nothing is written in
/// that case.
pub fn write_stat(w: &mut WireWriter, stat: &Stat) -> Result<()> {
    let size = checked_size(stat)?;
    write_record(w, stat, size)
}

// Every string fits once the record size does, so this cannot fail part way
fn write_record(w: &mut WireWriter, stat: &Stat, size: u16) -> Result<()> {
    w.write_u16(size);
    w.write_u16(stat.stype);
    w.write_u32(stat.dev);
    write_qid(w, &stat.qid);
    w.write_u32(stat.mode);
    w.write_u32(stat.atime);
    w.write_u32(stat.mtime);
    w.write_u64(stat.length);
    w.write_string(&stat.name)?;
    w.write_string(&stat.uid)?;
    w.write_string(&stat.gid)?;
    w.write_string(&stat.muid)?;
    Ok(())
}

/// Write `statlen[2] stat[n]` as carried by Rstat and Twstat
///
/// Both prefixes are checked before anything is written.
pub fn write_stat_with_len(w: &mut WireWriter, stat: &Stat) -> Result<()> {
    let size = checked_size(stat)?;
    let statlen = 2 + size as usize;
    let statlen = u16::try_from(statlen).map_err(|_| P9Error::Overflow {
        field: "statlen",
        len: statlen,
    })?;

    w.write_u16(statlen);
    write_record(w, stat, size)
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' '{}' '{}' '{}' q {} m {:#o} at {} mt {} l {} t {} d {}",
            self.name,
            self.uid,
            self.gid,
            self.muid,
            self.qid,
            self.mode,
            self.atime,
            self.mtime,
            self.length,
            self.stype,
            self.dev
        )
    }
}
