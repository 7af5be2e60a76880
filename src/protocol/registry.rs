//! Message registry and dispatcher
//!
//! Maps a header's type byte to the routine that decodes its body. The
//! dispatcher runs before any body byte is read, so an unknown type leaves
//! the stream positioned right after the header.

use bytes::Bytes;

use super::decode::*;
use super::header::Header;
use super::message::{Message, MessageType};
use crate::codec::WireReader;
use crate::config::Config;
use crate::error::Result;

/// A body decoder: consumes a body in wire order and builds the message
pub type BodyDecoder = fn(&mut WireReader, &Config) -> Result<Message>;

/// Look up the decoder for a known message type
pub fn decoder_for(mtype: MessageType) -> BodyDecoder {
    match mtype {
        MessageType::Tversion => decode_tversion,
        MessageType::Rversion => decode_rversion,
        MessageType::Tauth => decode_tauth,
        MessageType::Rauth => decode_rauth,
        MessageType::Tattach => decode_tattach,
        MessageType::Rattach => decode_rattach,
        MessageType::Rerror => decode_rerror,
        MessageType::Tflush => decode_tflush,
        MessageType::Rflush => decode_rflush,
        MessageType::Twalk => decode_twalk,
        MessageType::Rwalk => decode_rwalk,
        MessageType::Topen => decode_topen,
        MessageType::Ropen => decode_ropen,
        MessageType::Tcreate => decode_tcreate,
        MessageType::Rcreate => decode_rcreate,
        MessageType::Tread => decode_tread,
        MessageType::Rread => decode_rread,
        MessageType::Twrite => decode_twrite,
        MessageType::Rwrite => decode_rwrite,
        MessageType::Tclunk => decode_tclunk,
        MessageType::Rclunk => decode_rclunk,
        MessageType::Tremove => decode_tremove,
        MessageType::Rremove => decode_rremove,
        MessageType::Tstat => decode_tstat,
        MessageType::Rstat => decode_rstat,
        MessageType::Twstat => decode_twstat,
        MessageType::Rwstat => decode_rwstat,
    }
}

/// Select the decoder for a frame from its header
///
/// Fails with `UnknownMessageType` if the type byte is not assigned.
pub fn dispatch(header: &Header) -> Result<(MessageType, BodyDecoder)> {
    let mtype = MessageType::try_from(header.mtype)?;
    Ok((mtype, decoder_for(mtype)))
}

/// Decode a complete body with the decoder `dispatch` selected
pub fn decode_body(
    mtype: MessageType,
    decoder: BodyDecoder,
    body: Bytes,
    config: &Config,
) -> Result<Message> {
    let mut reader = WireReader::new(body);
    let message = decoder(&mut reader, config)?;

    if reader.remaining() > 0 {
        tracing::trace!(
            "{} left {} trailing body bytes unread",
            mtype,
            reader.remaining()
        );
    }

    Ok(message)
}
