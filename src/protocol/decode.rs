//! Per-message body decoders
//!
//! One routine per message kind. Each consumes the body strictly left to
//! right in wire order and stops after its last field; bytes left over are
//! tolerated. Reading past the end of the body fails with `Truncated`.

use super::message::Message;
use super::qid::{read_qid, QID_SIZE};
use super::stat::read_stat_with_len;
use crate::codec::WireReader;
use crate::config::Config;
use crate::error::Result;

// =============================================================================
// Session
// =============================================================================

/// size[4] Tversion tag[2] msize[4] version[s]
pub(crate) fn decode_tversion(r: &mut WireReader, _config: &Config) -> Result<Message> {
    Ok(Message::Tversion {
        msize: r.read_u32("msize")?,
        version: r.read_string("version")?,
    })
}

/// size[4] Rversion tag[2] msize[4] version[s]
pub(crate) fn decode_rversion(r: &mut WireReader, _config: &Config) -> Result<Message> {
    Ok(Message::Rversion {
        msize: r.read_u32("msize")?,
        version: r.read_string("version")?,
    })
}

/// size[4] Tauth tag[2] afid[4] uname[s] aname[s]
pub(crate) fn decode_tauth(r: &mut WireReader, _config: &Config) -> Result<Message> {
    Ok(Message::Tauth {
        afid: r.read_u32("afid")?,
        uname: r.read_string("uname")?,
        aname: r.read_string("aname")?,
    })
}

/// size[4] Rauth tag[2] aqid[13]
pub(crate) fn decode_rauth(r: &mut WireReader, _config: &Config) -> Result<Message> {
    Ok(Message::Rauth {
        aqid: read_qid(r, "aqid")?,
    })
}

/// size[4] Rerror tag[2] ename[s]
pub(crate) fn decode_rerror(r: &mut WireReader, _config: &Config) -> Result<Message> {
    Ok(Message::Rerror {
        ename: r.read_string("ename")?,
    })
}

/// size[4] Tflush tag[2] oldtag[2]
pub(crate) fn decode_tflush(r: &mut WireReader, _config: &Config) -> Result<Message> {
    Ok(Message::Tflush {
        oldtag: r.read_u16("oldtag")?,
    })
}

/// size[4] Rflush tag[2]
pub(crate) fn decode_rflush(_r: &mut WireReader, _config: &Config) -> Result<Message> {
    Ok(Message::Rflush)
}

/// size[4] Tattach tag[2] fid[4] afid[4] uname[s] aname[s]
pub(crate) fn decode_tattach(r: &mut WireReader, _config: &Config) -> Result<Message> {
    Ok(Message::Tattach {
        fid: r.read_u32("fid")?,
        afid: r.read_u32("afid")?,
        uname: r.read_string("uname")?,
        aname: r.read_string("aname")?,
    })
}

/// size[4] Rattach tag[2] qid[13]
pub(crate) fn decode_rattach(r: &mut WireReader, _config: &Config) -> Result<Message> {
    Ok(Message::Rattach {
        qid: read_qid(r, "qid")?,
    })
}

// =============================================================================
// Walk
// =============================================================================

/// size[4] Twalk tag[2] fid[4] newfid[4] nwname[2] nwname*(wname[s])
pub(crate) fn decode_twalk(r: &mut WireReader, _config: &Config) -> Result<Message> {
    let fid = r.read_u32("fid")?;
    let newfid = r.read_u32("newfid")?;
    let nwname = r.read_u16("nwname")? as usize;

    // Each name takes at least its 2-byte prefix; don't trust nwname for the
    // allocation beyond what the body can hold.
    let mut wnames = Vec::with_capacity(nwname.min(r.remaining() / 2));
    for _ in 0..nwname {
        wnames.push(r.read_string("wname")?);
    }

    Ok(Message::Twalk {
        fid,
        newfid,
        wnames,
    })
}

/// size[4] Rwalk tag[2] nwqid[2] nwqid*(wqid[13])
pub(crate) fn decode_rwalk(r: &mut WireReader, _config: &Config) -> Result<Message> {
    let nwqid = r.read_u16("nwqid")? as usize;

    let mut wqids = Vec::with_capacity(nwqid.min(r.remaining() / QID_SIZE));
    for _ in 0..nwqid {
        wqids.push(read_qid(r, "wqid")?);
    }

    Ok(Message::Rwalk { wqids })
}

// =============================================================================
// Open / Create
// =============================================================================

/// size[4] Topen tag[2] fid[4] mode[1]
pub(crate) fn decode_topen(r: &mut WireReader, _config: &Config) -> Result<Message> {
    Ok(Message::Topen {
        fid: r.read_u32("fid")?,
        mode: r.read_u8("mode")?,
    })
}

/// size[4] Ropen tag[2] qid[13] iounit[4]
pub(crate) fn decode_ropen(r: &mut WireReader, _config: &Config) -> Result<Message> {
    Ok(Message::Ropen {
        qid: read_qid(r, "qid")?,
        iounit: r.read_u32("iounit")?,
    })
}

/// size[4] Tcreate tag[2] fid[4] name[s] perm[4] mode[1]
pub(crate) fn decode_tcreate(r: &mut WireReader, _config: &Config) -> Result<Message> {
    Ok(Message::Tcreate {
        fid: r.read_u32("fid")?,
        name: r.read_string("name")?,
        perm: r.read_u32("perm")?,
        mode: r.read_u8("mode")?,
    })
}

/// size[4] Rcreate tag[2] qid[13] iounit[4]
pub(crate) fn decode_rcreate(r: &mut WireReader, _config: &Config) -> Result<Message> {
    Ok(Message::Rcreate {
        qid: read_qid(r, "qid")?,
        iounit: r.read_u32("iounit")?,
    })
}

// =============================================================================
// Read / Write
// =============================================================================

/// size[4] Tread tag[2] fid[4] offset[8] count[4]
pub(crate) fn decode_tread(r: &mut WireReader, _config: &Config) -> Result<Message> {
    Ok(Message::Tread {
        fid: r.read_u32("fid")?,
        offset: r.read_u64("offset")?,
        count: r.read_u32("count")?,
    })
}

/// size[4] Rread tag[2] count[4] data[count]
///
/// A count larger than the rest of the body is `Truncated`, never a short
/// slice.
pub(crate) fn decode_rread(r: &mut WireReader, _config: &Config) -> Result<Message> {
    let count = r.read_u32("count")? as usize;
    Ok(Message::Rread {
        data: r.read_bytes("data", count)?,
    })
}

/// size[4] Twrite tag[2] fid[4] offset[8] count[4] data[count]
pub(crate) fn decode_twrite(r: &mut WireReader, _config: &Config) -> Result<Message> {
    let fid = r.read_u32("fid")?;
    let offset = r.read_u64("offset")?;
    let count = r.read_u32("count")? as usize;
    Ok(Message::Twrite {
        fid,
        offset,
        data: r.read_bytes("data", count)?,
    })
}

/// size[4] Rwrite tag[2] count[4]
pub(crate) fn decode_rwrite(r: &mut WireReader, _config: &Config) -> Result<Message> {
    Ok(Message::Rwrite {
        count: r.read_u32("count")?,
    })
}

// =============================================================================
// Clunk / Remove / Stat
// =============================================================================

/// size[4] Tclunk tag[2] fid[4]
pub(crate) fn decode_tclunk(r: &mut WireReader, _config: &Config) -> Result<Message> {
    Ok(Message::Tclunk {
        fid: r.read_u32("fid")?,
    })
}

/// size[4] Rclunk tag[2]
pub(crate) fn decode_rclunk(_r: &mut WireReader, _config: &Config) -> Result<Message> {
    Ok(Message::Rclunk)
}

/// size[4] Tremove tag[2] fid[4]
pub(crate) fn decode_tremove(r: &mut WireReader, _config: &Config) -> Result<Message> {
    Ok(Message::Tremove {
        fid: r.read_u32("fid")?,
    })
}

/// size[4] Rremove tag[2]
pub(crate) fn decode_rremove(_r: &mut WireReader, _config: &Config) -> Result<Message> {
    Ok(Message::Rremove)
}

/// size[4] Tstat tag[2] fid[4]
pub(crate) fn decode_tstat(r: &mut WireReader, _config: &Config) -> Result<Message> {
    Ok(Message::Tstat {
        fid: r.read_u32("fid")?,
    })
}

/// size[4] Rstat tag[2] stat[n]
pub(crate) fn decode_rstat(r: &mut WireReader, config: &Config) -> Result<Message> {
    Ok(Message::Rstat {
        stat: read_stat_with_len(r, config.strict_stat_length)?,
    })
}

/// size[4] Twstat tag[2] fid[4] stat[n]
pub(crate) fn decode_twstat(r: &mut WireReader, config: &Config) -> Result<Message> {
    Ok(Message::Twstat {
        fid: r.read_u32("fid")?,
        stat: read_stat_with_len(r, config.strict_stat_length)?,
    })
}

/// size[4] Rwstat tag[2]
pub(crate) fn decode_rwstat(_r: &mut WireReader, _config: &Config) -> Result<Message> {
    Ok(Message::Rwstat)
}
