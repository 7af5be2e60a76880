//! Frame reader
//!
//! Pulls one complete frame at a time off a byte stream.
//!
//! ## State Machine
//! ```text
//!            7 header bytes                 size-7 body bytes
//! AwaitingHeader ───────────────▶ AwaitingBody ──────────────────▶ AwaitingHeader
//!       │                              │                            (frame returned)
//!       │ EOF after 0 bytes: Ok(None)  │ EOF short of size-7: ShortBody
//!       │ EOF after 1..6: ShortHeader  │
//!       │ size < 7: MalformedSize      │
//!       │ unknown type: UnknownMessageType (no body bytes consumed)
//!       │ size > max: MessageTooLarge  │
//! ```
//!
//! A source that returns `WouldBlock` (or `TimedOut`) surfaces as
//! `P9Error::Io` with the bytes read so far kept; the next `read_frame`
//! call resumes in the same state. Any other error resets the reader, and
//! the stream position is then unspecified: frame boundaries are only known
//! by having consumed the previous frame in full, so the caller should
//! abandon the stream.

use std::fmt;
use std::io::{self, ErrorKind, Read, Write};

use bytes::{Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use super::encode::{encode_message, encode_message_with};
use super::header::{Header, HEADER_SIZE};
use super::message::Message;
use super::registry::{decode_body, dispatch};
use crate::config::Config;
use crate::error::{P9Error, Result};

/// One complete wire message: header plus decoded body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub header: Header,
    pub message: Message,
}

impl Frame {
    /// Build an outgoing frame; the header size is computed from the message
    ///
    /// Fails with `Overflow` if the message is too large for the u32 size
    /// field.
    pub fn new(tag: u16, message: Message) -> Result<Self> {
        let len = message.encoded_len();
        let size = u32::try_from(len).map_err(|_| P9Error::Overflow { field: "size", len })?;
        Ok(Self {
            header: Header {
                size,
                mtype: message.message_type() as u8,
                tag,
            },
            message,
        })
    }

    pub fn tag(&self) -> u16 {
        self.header.tag
    }

    /// Encode the frame to bytes under the default size limit
    pub fn encode(&self) -> Result<Bytes> {
        encode_message(self.header.tag, &self.message)
    }

    /// Encode the frame to bytes under `config.max_message_size`
    pub fn encode_with(&self, config: &Config) -> Result<Bytes> {
        encode_message_with(self.header.tag, &self.message, config)
    }

    /// Decode a single frame held in memory
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Self::decode_with(bytes, &Config::default())
    }

    /// Decode a single frame held in memory with an explicit config
    pub fn decode_with(bytes: &[u8], config: &Config) -> Result<Self> {
        let mut reader = FrameReader::with_config(bytes, config.clone());
        reader
            .read_frame()?
            .ok_or(P9Error::ShortHeader { got: 0 })
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.message.fmt_tagged(self.header.tag, f)
    }
}

/// Where the reader is within the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadState {
    /// `filled` of the 7 header bytes have arrived
    AwaitingHeader { filled: usize },

    /// The header is in; `remaining` body bytes are still to come
    AwaitingBody { header: Header, remaining: usize },
}

/// Reads frames one at a time from a byte stream
pub struct FrameReader<R> {
    reader: R,
    config: Config,
    state: ReadState,

    /// Partial header, valid up to the `filled` count in `state`
    header_buf: [u8; HEADER_SIZE],

    /// Body buffer of the frame in progress, sized once the header is in
    body: BytesMut,
}

impl<R: Read> FrameReader<R> {
    /// Create a reader with the default config
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, Config::default())
    }

    pub fn with_config(reader: R, config: Config) -> Self {
        Self {
            reader,
            config,
            state: ReadState::AwaitingHeader { filled: 0 },
            header_buf: [0u8; HEADER_SIZE],
            body: BytesMut::new(),
        }
    }

    pub fn state(&self) -> ReadState {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read and decode the next frame
    ///
    /// Returns `Ok(None)` when the stream ends cleanly before the first
    /// header byte. Blocks only inside the underlying reader.
    pub fn read_frame(&mut self) -> Result<Option<Frame>> {
        let result = self.advance();
        match &result {
            Err(P9Error::Io(e)) if is_retryable(e) => {
                tracing::trace!("Source not ready in state {:?}", self.state);
            }
            Err(e) => {
                tracing::debug!("Rejected frame: {}", e);
                self.reset();
            }
            Ok(_) => {}
        }
        result
    }

    fn reset(&mut self) {
        self.state = ReadState::AwaitingHeader { filled: 0 };
        self.body = BytesMut::new();
    }

    fn advance(&mut self) -> Result<Option<Frame>> {
        let (header, remaining) = match self.state {
            ReadState::AwaitingBody { header, remaining } => (header, remaining),
            ReadState::AwaitingHeader { .. } => {
                let header = match self.read_header()? {
                    Some(header) => header,
                    None => return Ok(None),
                };

                // Pick the decoder before the size check and before touching the body
                dispatch(&header)?;
                if header.size > self.config.max_message_size {
                    return Err(P9Error::MessageTooLarge {
                        size: header.size,
                        max: self.config.max_message_size,
                    });
                }

                tracing::trace!("Read header: {}", header);
                let remaining = header.body_len();
                self.body = BytesMut::zeroed(remaining);
                self.state = ReadState::AwaitingBody { header, remaining };
                (header, remaining)
            }
        };

        self.read_body(header, remaining)?;
        let body = std::mem::take(&mut self.body).freeze();
        self.state = ReadState::AwaitingHeader { filled: 0 };

        let (mtype, decoder) = dispatch(&header)?;
        let message = decode_body(mtype, decoder, body, &self.config)?;
        Ok(Some(Frame { header, message }))
    }

    fn read_header(&mut self) -> Result<Option<Header>> {
        let mut filled = match self.state {
            ReadState::AwaitingHeader { filled } => filled,
            ReadState::AwaitingBody { .. } => 0,
        };

        let result = fill(&mut self.reader, &mut self.header_buf, &mut filled);
        self.state = ReadState::AwaitingHeader { filled };
        if !result? {
            if filled == 0 {
                return Ok(None);
            }
            return Err(P9Error::ShortHeader { got: filled });
        }

        Header::parse(&self.header_buf).map(Some)
    }

    fn read_body(&mut self, header: Header, remaining: usize) -> Result<()> {
        let expected = self.body.len();
        let mut filled = expected - remaining;
        let result = fill(&mut self.reader, &mut self.body, &mut filled);
        self.state = ReadState::AwaitingBody {
            header,
            remaining: expected - filled,
        };
        // EOF landing exactly on the body boundary is a complete frame
        if !result? {
            return Err(P9Error::ShortBody {
                expected,
                got: filled,
            });
        }
        Ok(())
    }

    /// Iterate over frames until clean end of stream
    ///
    /// The iterator stops after yielding the first error, including a
    /// `WouldBlock`; resume a non-blocking source with `read_frame`.
    pub fn frames(self) -> Frames<R> {
        Frames {
            reader: self,
            done: false,
        }
    }
}

/// Iterator over frames of a stream
pub struct Frames<R> {
    reader: FrameReader<R>,
    done: bool,
}

impl<R: Read> Iterator for Frames<R> {
    type Item = Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.read_frame() {
            Ok(Some(frame)) => Some(Ok(frame)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

fn is_retryable(e: &io::Error) -> bool {
    matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut)
}

/// Read into `buf[*filled..]` until it is full or the source ends
///
/// Returns `false` if the source ended first. `filled` keeps the progress
/// made before an error so the read can be resumed.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8], filled: &mut usize) -> Result<bool> {
    while *filled < buf.len() {
        match reader.read(&mut buf[*filled..]) {
            Ok(0) => return Ok(false),
            Ok(n) => *filled += n,
            Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(true)
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read one frame from a blocking stream with the default config
///
/// Partial progress is not kept across calls; use a [`FrameReader`] for
/// non-blocking sources.
pub fn read_frame<R: Read>(reader: &mut R) -> Result<Option<Frame>> {
    FrameReader::new(reader).read_frame()
}

/// Encode and write a frame to a stream
pub fn write_frame<W: Write>(writer: &mut W, frame: &Frame) -> Result<()> {
    let bytes = frame.encode()?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}
