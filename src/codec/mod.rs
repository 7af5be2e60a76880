//! Primitive Codec
//!
//! Fixed-width little-endian integers and length-prefixed strings, the
//! building blocks every 9P message body is made of.
//!
//! ## Wire Format
//! ```text
//! u8   ┌────┐
//!      │ b0 │
//!      └────┘
//! u16  ┌────┬────┐                 (least significant byte first)
//!      │ b0 │ b1 │
//!      └────┴────┘
//! s    ┌──────────┬───────────────────────┐
//!      │ len (2)  │   len bytes of text   │
//!      └──────────┴───────────────────────┘
//! ```
//!
//! Reads go through [`WireReader`], a cursor over a frame body that fails
//! with `Truncated` instead of reading past the end. Writes go through
//! [`WireWriter`], a growable buffer.

mod reader;
mod string;
mod writer;

pub use reader::WireReader;
pub use string::{WireString, MAX_STRING_LEN};
pub use writer::WireWriter;
