//! # p9wire
//!
//! A codec for the 9P2000 distributed file protocol:
//! - Frame reader over any `std::io::Read` byte source
//! - Typed decoding of all 27 message kinds
//! - Byte-exact encoding of outgoing frames
//! - Zero-copy read/write payloads backed by `bytes`
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Byte Source (Read)                       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     Frame Reader                             │
//! │            (7-byte header, then size-7 body)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                Registry / Dispatcher                         │
//! │              (type byte → body decoder)                      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Compound   │          │  Primitive  │
//!   │ (QID, Stat) │─────────▶│ (ints, str) │
//!   └─────────────┘          └─────────────┘
//! ```
//!
//! The codec does not judge protocol legality (unknown fids, out-of-order
//! replies); that belongs to whatever client or server sits on top.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod protocol;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{P9Error, Result};
pub use config::Config;
pub use codec::WireString;
pub use protocol::{Frame, FrameReader, Message, MessageType, Qid, Stat};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of p9wire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
