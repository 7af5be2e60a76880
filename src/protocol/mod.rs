//! Protocol Module
//!
//! Typed 9P2000 messages and the frame codec that carries them.
//!
//! ## Frame Format
//! ```text
//! ┌──────────┬──────────┬─────────┬─────────────────────────────┐
//! │ size (4) │ type (1) │ tag (2) │       body (size - 7)       │
//! └──────────┴──────────┴─────────┴─────────────────────────────┘
//! ```
//! All integers are little-endian; `size` counts the whole frame.
//!
//! ### Message Types
//! - 100/101: Tversion / Rversion - msize[4] version[s]
//! - 102/103: Tauth / Rauth
//! - 104/105: Tattach / Rattach
//! - 107:     Rerror - ename[s]
//! - 108/109: Tflush / Rflush
//! - 110/111: Twalk / Rwalk
//! - 112/113: Topen / Ropen
//! - 114/115: Tcreate / Rcreate
//! - 116/117: Tread / Rread
//! - 118/119: Twrite / Rwrite
//! - 120/121: Tclunk / Rclunk
//! - 122/123: Tremove / Rremove
//! - 124/125: Tstat / Rstat
//! - 126/127: Twstat / Rwstat
//!
//! ## Decode Pipeline
//! stream → [`FrameReader`] (header + raw body) → [`dispatch`] (type byte) →
//! per-message decoder → [`Frame`]

mod decode;
mod encode;
mod frame;
mod header;
mod message;
mod qid;
mod registry;
mod stat;

pub use encode::{encode_body, encode_message, encode_message_with};
pub use frame::{read_frame, write_frame, Frame, FrameReader, Frames, ReadState};
pub use header::{Header, HEADER_SIZE};
pub use message::{Message, MessageType};
pub use qid::{
    read_qid, write_qid, Qid, QID_SIZE, QTAPPEND, QTAUTH, QTDIR, QTEXCL, QTFILE, QTMOUNT, QTTMP,
};
pub use registry::{decode_body, decoder_for, dispatch, BodyDecoder};
pub use stat::{
    read_stat, read_stat_with_len, write_stat, write_stat_with_len, Stat, DMAPPEND, DMAUTH,
    DMDIR, DMEXCL, DMTMP, STAT_FIXED_SIZE,
};

/// Non-data size of Twrite/Rread: size[4] type[1] tag[2] fid[4] offset[8] count[4]
pub const IOHDRSZ: u32 = 24;

/// Default maximum message size
pub const MSIZE: u32 = 2 * 1_048_576 + IOHDRSZ;

/// Default protocol version string
pub const DEFAULT_VERSION: &str = "9P2000";

/// Tag value meaning "no tag" (used by Tversion)
pub const NOTAG: u16 = !0;

/// Fid value meaning "no fid" (afid of an unauthenticated Tattach)
pub const NOFID: u32 = !0;

/// Uid value meaning "no uid"
pub const NOUID: u32 = !0;

// Open modes for Topen/Tcreate
pub const OREAD: u8 = 0;
pub const OWRITE: u8 = 1;
pub const ORDWR: u8 = 2;
pub const OEXEC: u8 = 3;
pub const OTRUNC: u8 = 0x10;
pub const ORCLOSE: u8 = 0x40;
