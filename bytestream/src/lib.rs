//! Bounded byte cursor primitives for the partsys codec.
//!
//! This crate provides [`ByteWriter`] and [`ByteReader`] for byte-level encoding
//! and decoding over fixed buffers.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads/writes are bounds-checked.
//! - **No domain knowledge** - This crate knows nothing about particle systems.
//! - **Explicit errors** - All failures return structured errors, never panic.
//!
//! # Example
//!
//! ```
//! use bytestream::{ByteReader, ByteWriter};
//!
//! let mut buf = [0u8; 4];
//! let mut writer = ByteWriter::new(&mut buf);
//! writer.write_u8(0x80).unwrap();
//! writer.write_i8(-9).unwrap();
//! let used = writer.finish();
//!
//! let mut reader = ByteReader::new(&buf[..used]);
//! assert_eq!(reader.read_u8().unwrap(), 0x80);
//! assert_eq!(reader.read_i8().unwrap(), -9);
//! assert!(reader.is_empty());
//! ```

mod error;
mod reader;
mod writer;

pub use error::{ByteError, ByteResult};
pub use reader::ByteReader;
pub use writer::ByteWriter;
