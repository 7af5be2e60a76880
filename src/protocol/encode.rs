//! Message encoders
//!
//! The inverse of the decoders: every message is written in the same field
//! order the decoder reads it, behind a header whose size is exact.

use bytes::Bytes;

use super::header::Header;
use super::message::Message;
use super::qid::write_qid;
use super::stat::write_stat_with_len;
use crate::codec::WireWriter;
use crate::config::Config;
use crate::error::{P9Error, Result};

/// Encode a message as a complete frame under the default size limit
///
/// The default limit is the one [`Frame::decode`](super::Frame::decode)
/// enforces, so every frame this returns decodes with default settings.
pub fn encode_message(tag: u16, message: &Message) -> Result<Bytes> {
    encode_message_with(tag, message, &Config::default())
}

/// Encode a message as a complete frame
///
/// Fails with `MessageTooLarge` if the frame exceeds
/// `config.max_message_size`, and with `StringTooLong` or `Overflow` if a
/// field cannot be described by its wire length prefix.
pub fn encode_message_with(tag: u16, message: &Message, config: &Config) -> Result<Bytes> {
    let len = message.encoded_len();
    let size = u32::try_from(len).map_err(|_| P9Error::Overflow { field: "size", len })?;
    if size > config.max_message_size {
        return Err(P9Error::MessageTooLarge {
            size,
            max: config.max_message_size,
        });
    }

    let mut w = WireWriter::with_capacity(len);
    Header {
        size,
        mtype: message.message_type() as u8,
        tag,
    }
    .write(&mut w);
    encode_body(&mut w, message)?;
    debug_assert_eq!(w.len(), len);

    tracing::trace!("encoded {} tag {} ({} bytes)", message.message_type(), tag, len);
    Ok(w.freeze())
}

fn count_u16(field: &'static str, len: usize) -> Result<u16> {
    u16::try_from(len).map_err(|_| P9Error::Overflow { field, len })
}

fn count_u32(field: &'static str, len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| P9Error::Overflow { field, len })
}

/// Write a message body in wire order
///
/// On error the writer is left as it was before the call.
pub fn encode_body(w: &mut WireWriter, message: &Message) -> Result<()> {
    let start = w.len();
    let result = write_fields(w, message);
    if result.is_err() {
        w.truncate(start);
    }
    result
}

fn write_fields(w: &mut WireWriter, message: &Message) -> Result<()> {
    match message {
        Message::Tversion { msize, version } | Message::Rversion { msize, version } => {
            w.write_u32(*msize);
            w.write_string(version)?;
        }
        Message::Tauth { afid, uname, aname } => {
            w.write_u32(*afid);
            w.write_string(uname)?;
            w.write_string(aname)?;
        }
        Message::Rauth { aqid } => write_qid(w, aqid),
        Message::Rerror { ename } => w.write_string(ename)?,
        Message::Tflush { oldtag } => w.write_u16(*oldtag),
        Message::Tattach {
            fid,
            afid,
            uname,
            aname,
        } => {
            w.write_u32(*fid);
            w.write_u32(*afid);
            w.write_string(uname)?;
            w.write_string(aname)?;
        }
        Message::Rattach { qid } => write_qid(w, qid),
        Message::Twalk {
            fid,
            newfid,
            wnames,
        } => {
            w.write_u32(*fid);
            w.write_u32(*newfid);
            w.write_u16(count_u16("nwname", wnames.len())?);
            for name in wnames {
                w.write_string(name)?;
            }
        }
        Message::Rwalk { wqids } => {
            w.write_u16(count_u16("nwqid", wqids.len())?);
            for qid in wqids {
                write_qid(w, qid);
            }
        }
        Message::Topen { fid, mode } => {
            w.write_u32(*fid);
            w.write_u8(*mode);
        }
        Message::Ropen { qid, iounit } | Message::Rcreate { qid, iounit } => {
            write_qid(w, qid);
            w.write_u32(*iounit);
        }
        Message::Tcreate {
            fid,
            name,
            perm,
            mode,
        } => {
            w.write_u32(*fid);
            w.write_string(name)?;
            w.write_u32(*perm);
            w.write_u8(*mode);
        }
        Message::Tread { fid, offset, count } => {
            w.write_u32(*fid);
            w.write_u64(*offset);
            w.write_u32(*count);
        }
        Message::Rread { data } => {
            w.write_u32(count_u32("data", data.len())?);
            w.write_bytes(data);
        }
        Message::Twrite { fid, offset, data } => {
            w.write_u32(*fid);
            w.write_u64(*offset);
            w.write_u32(count_u32("data", data.len())?);
            w.write_bytes(data);
        }
        Message::Rwrite { count } => w.write_u32(*count),
        Message::Tclunk { fid } | Message::Tremove { fid } | Message::Tstat { fid } => {
            w.write_u32(*fid)
        }
        Message::Rstat { stat } => write_stat_with_len(w, stat)?,
        Message::Twstat { fid, stat } => {
            w.write_u32(*fid);
            write_stat_with_len(w, stat)?;
        }
        Message::Rflush | Message::Rclunk | Message::Rremove | Message::Rwstat => {}
    }
    Ok(())
}
