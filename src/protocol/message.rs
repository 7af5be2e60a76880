//! Message definitions
//!
//! The 27 message kinds of 9P2000 (13 request/response pairs plus Rerror)
//! as one closed sum type.

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::header::HEADER_SIZE;
use super::qid::QID_SIZE;
use super::{Qid, Stat};
use crate::codec::WireString;
use crate::error::P9Error;

/// Message-type byte values
///
/// Requests are even, responses odd. 106 would be `Terror`, which the
/// protocol never sends, so it stays unassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MessageType {
    Tversion = 100,
    Rversion = 101,
    Tauth = 102,
    Rauth = 103,
    Tattach = 104,
    Rattach = 105,
    Rerror = 107,
    Tflush = 108,
    Rflush = 109,
    Twalk = 110,
    Rwalk = 111,
    Topen = 112,
    Ropen = 113,
    Tcreate = 114,
    Rcreate = 115,
    Tread = 116,
    Rread = 117,
    Twrite = 118,
    Rwrite = 119,
    Tclunk = 120,
    Rclunk = 121,
    Tremove = 122,
    Rremove = 123,
    Tstat = 124,
    Rstat = 125,
    Twstat = 126,
    Rwstat = 127,
}

impl MessageType {
    /// True for T-messages (client to server)
    pub fn is_request(self) -> bool {
        (self as u8) % 2 == 0
    }

    pub fn name(self) -> &'static str {
        match self {
            MessageType::Tversion => "Tversion",
            MessageType::Rversion => "Rversion",
            MessageType::Tauth => "Tauth",
            MessageType::Rauth => "Rauth",
            MessageType::Tattach => "Tattach",
            MessageType::Rattach => "Rattach",
            MessageType::Rerror => "Rerror",
            MessageType::Tflush => "Tflush",
            MessageType::Rflush => "Rflush",
            MessageType::Twalk => "Twalk",
            MessageType::Rwalk => "Rwalk",
            MessageType::Topen => "Topen",
            MessageType::Ropen => "Ropen",
            MessageType::Tcreate => "Tcreate",
            MessageType::Rcreate => "Rcreate",
            MessageType::Tread => "Tread",
            MessageType::Rread => "Rread",
            MessageType::Twrite => "Twrite",
            MessageType::Rwrite => "Rwrite",
            MessageType::Tclunk => "Tclunk",
            MessageType::Rclunk => "Rclunk",
            MessageType::Tremove => "Tremove",
            MessageType::Rremove => "Rremove",
            MessageType::Tstat => "Tstat",
            MessageType::Rstat => "Rstat",
            MessageType::Twstat => "Twstat",
            MessageType::Rwstat => "Rwstat",
        }
    }
}

impl TryFrom<u8> for MessageType {
    type Error = P9Error;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        let mtype = match byte {
            100 => MessageType::Tversion,
            101 => MessageType::Rversion,
            102 => MessageType::Tauth,
            103 => MessageType::Rauth,
            104 => MessageType::Tattach,
            105 => MessageType::Rattach,
            107 => MessageType::Rerror,
            108 => MessageType::Tflush,
            109 => MessageType::Rflush,
            110 => MessageType::Twalk,
            111 => MessageType::Rwalk,
            112 => MessageType::Topen,
            113 => MessageType::Ropen,
            114 => MessageType::Tcreate,
            115 => MessageType::Rcreate,
            116 => MessageType::Tread,
            117 => MessageType::Rread,
            118 => MessageType::Twrite,
            119 => MessageType::Rwrite,
            120 => MessageType::Tclunk,
            121 => MessageType::Rclunk,
            122 => MessageType::Tremove,
            123 => MessageType::Rremove,
            124 => MessageType::Tstat,
            125 => MessageType::Rstat,
            126 => MessageType::Twstat,
            127 => MessageType::Rwstat,
            _ => return Err(P9Error::UnknownMessageType(byte)),
        };
        Ok(mtype)
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded 9P message body
///
/// The transaction tag travels in the frame [`Header`](super::Header), not
/// here. `Rread` and `Twrite` payloads share the frame body buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// Negotiate protocol version and maximum message size
    Tversion { msize: u32, version: WireString },
    Rversion { msize: u32, version: WireString },

    /// Open an authentication file
    Tauth { afid: u32, uname: WireString, aname: WireString },
    Rauth { aqid: Qid },

    Rerror { ename: WireString },

    /// Abort the request tagged `oldtag`
    Tflush { oldtag: u16 },
    Rflush,

    /// Establish a root fid
    Tattach {
        fid: u32,
        afid: u32,
        uname: WireString,
        aname: WireString,
    },
    Rattach { qid: Qid },

    /// Walk `fid` through `wnames` in order, binding the result to `newfid`
    Twalk {
        fid: u32,
        newfid: u32,
        wnames: Vec<WireString>,
    },
    /// One QID per name component successfully walked
    Rwalk { wqids: Vec<Qid> },

    Topen { fid: u32, mode: u8 },
    Ropen { qid: Qid, iounit: u32 },

    Tcreate {
        fid: u32,
        name: WireString,
        perm: u32,
        mode: u8,
    },
    Rcreate { qid: Qid, iounit: u32 },

    Tread { fid: u32, offset: u64, count: u32 },
    Rread { data: Bytes },

    Twrite { fid: u32, offset: u64, data: Bytes },
    Rwrite { count: u32 },

    Tclunk { fid: u32 },
    Rclunk,

    Tremove { fid: u32 },
    Rremove,

    Tstat { fid: u32 },
    Rstat { stat: Stat },

    Twstat { fid: u32, stat: Stat },
    Rwstat,
}

fn string_len(s: &WireString) -> usize {
    2 + s.len()
}

impl Message {
    /// Get the message type
    pub fn message_type(&self) -> MessageType {
        match self {
            Message::Tversion { .. } => MessageType::Tversion,
            Message::Rversion { .. } => MessageType::Rversion,
            Message::Tauth { .. } => MessageType::Tauth,
            Message::Rauth { .. } => MessageType::Rauth,
            Message::Rerror { .. } => MessageType::Rerror,
            Message::Tflush { .. } => MessageType::Tflush,
            Message::Rflush => MessageType::Rflush,
            Message::Tattach { .. } => MessageType::Tattach,
            Message::Rattach { .. } => MessageType::Rattach,
            Message::Twalk { .. } => MessageType::Twalk,
            Message::Rwalk { .. } => MessageType::Rwalk,
            Message::Topen { .. } => MessageType::Topen,
            Message::Ropen { .. } => MessageType::Ropen,
            Message::Tcreate { .. } => MessageType::Tcreate,
            Message::Rcreate { .. } => MessageType::Rcreate,
            Message::Tread { .. } => MessageType::Tread,
            Message::Rread { .. } => MessageType::Rread,
            Message::Twrite { .. } => MessageType::Twrite,
            Message::Rwrite { .. } => MessageType::Rwrite,
            Message::Tclunk { .. } => MessageType::Tclunk,
            Message::Rclunk => MessageType::Rclunk,
            Message::Tremove { .. } => MessageType::Tremove,
            Message::Rremove => MessageType::Rremove,
            Message::Tstat { .. } => MessageType::Tstat,
            Message::Rstat { .. } => MessageType::Rstat,
            Message::Twstat { .. } => MessageType::Twstat,
            Message::Rwstat => MessageType::Rwstat,
        }
    }

    /// Exact body length this message encodes to
    pub fn body_len(&self) -> usize {
        match self {
            Message::Tversion { version, .. } | Message::Rversion { version, .. } => {
                4 + string_len(version)
            }
            Message::Tauth { uname, aname, .. } => 4 + string_len(uname) + string_len(aname),
            Message::Rauth { .. } | Message::Rattach { .. } => QID_SIZE,
            Message::Rerror { ename } => string_len(ename),
            Message::Tflush { .. } => 2,
            Message::Tattach { uname, aname, .. } => 8 + string_len(uname) + string_len(aname),
            Message::Twalk { wnames, .. } => 8 + 2 + wnames.iter().map(string_len).sum::<usize>(),
            Message::Rwalk { wqids } => 2 + wqids.len() * QID_SIZE,
            Message::Topen { .. } => 4 + 1,
            Message::Ropen { .. } | Message::Rcreate { .. } => QID_SIZE + 4,
            Message::Tcreate { name, .. } => 4 + string_len(name) + 4 + 1,
            Message::Tread { .. } => 4 + 8 + 4,
            Message::Rread { data } => 4 + data.len(),
            Message::Twrite { data, .. } => 4 + 8 + 4 + data.len(),
            Message::Rwrite { .. } => 4,
            Message::Tclunk { .. } | Message::Tremove { .. } | Message::Tstat { .. } => 4,
            Message::Rstat { stat } => 2 + 2 + stat.size(),
            Message::Twstat { stat, .. } => 4 + 2 + 2 + stat.size(),
            Message::Rflush | Message::Rclunk | Message::Rremove | Message::Rwstat => 0,
        }
    }

    /// Exact frame length this message encodes to, header included
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.body_len()
    }

    fn fmt_fields(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Tversion { msize, version } | Message::Rversion { msize, version } => {
                write!(f, " msize {} version '{}'", msize, version)
            }
            Message::Tauth { afid, uname, aname } => {
                write!(f, " afid {} uname '{}' aname '{}'", afid, uname, aname)
            }
            Message::Rauth { aqid } => write!(f, " qid {}", aqid),
            Message::Rerror { ename } => write!(f, " ename '{}'", ename),
            Message::Tflush { oldtag } => write!(f, " oldtag {}", oldtag),
            Message::Tattach {
                fid,
                afid,
                uname,
                aname,
            } => write!(
                f,
                " fid {} afid {} uname '{}' aname '{}'",
                fid, afid, uname, aname
            ),
            Message::Rattach { qid } => write!(f, " qid {}", qid),
            Message::Twalk {
                fid,
                newfid,
                wnames,
            } => {
                write!(f, " fid {} newfid {} nwname {}", fid, newfid, wnames.len())?;
                for (i, name) in wnames.iter().enumerate() {
                    write!(f, " {}:'{}'", i, name)?;
                }
                Ok(())
            }
            Message::Rwalk { wqids } => {
                write!(f, " nwqid {}", wqids.len())?;
                for (i, qid) in wqids.iter().enumerate() {
                    write!(f, " {}:{}", i, qid)?;
                }
                Ok(())
            }
            Message::Topen { fid, mode } => write!(f, " fid {} mode {}", fid, mode),
            Message::Ropen { qid, iounit } | Message::Rcreate { qid, iounit } => {
                write!(f, " qid {} iounit {}", qid, iounit)
            }
            Message::Tcreate {
                fid,
                name,
                perm,
                mode,
            } => write!(
                f,
                " fid {} name '{}' perm {:#o} mode {}",
                fid, name, perm, mode
            ),
            Message::Tread { fid, offset, count } => {
                write!(f, " fid {} offset {} count {}", fid, offset, count)
            }
            Message::Rread { data } => write!(f, " count {}", data.len()),
            Message::Twrite { fid, offset, data } => {
                write!(f, " fid {} offset {} count {}", fid, offset, data.len())
            }
            Message::Rwrite { count } => write!(f, " count {}", count),
            Message::Tclunk { fid } | Message::Tremove { fid } | Message::Tstat { fid } => {
                write!(f, " fid {}", fid)
            }
            Message::Rstat { stat } => write!(f, " stat {}", stat),
            Message::Twstat { fid, stat } => write!(f, " fid {} stat {}", fid, stat),
            Message::Rflush | Message::Rclunk | Message::Rremove | Message::Rwstat => Ok(()),
        }
    }

    /// Render as `Name tag N fields...`
    pub(crate) fn fmt_tagged(&self, tag: u16, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} tag {}", self.message_type(), tag)?;
        self.fmt_fields(f)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message_type().name())?;
        self.fmt_fields(f)
    }
}
