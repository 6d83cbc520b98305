//! # mcal-icc
//!
//! ICC v2.4 display profile encoding and decoding.
//!
//! Serializes a [`ProfileDescriptor`] (white point, primaries, tone-curve
//! gamma, text metadata) into a binary `.icc` file any standards-compliant
//! color-management consumer can parse, and reads such files back for
//! validation and inspection.
//!
//! # File structure
//!
//! ```text
//! +----------------------+
//! | 128-byte header      |  version 2.4.0.0, 'mntr', 'RGB ', 'XYZ ', 'acsp'
//! +----------------------+
//! | tag count (u32)      |
//! | 12-byte tag entries  |  sorted by ascending signature
//! +----------------------+
//! | tag data blob        |  each payload padded to a 4-byte boundary
//! +----------------------+
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use mcal_icc::{ProfileDescriptor, write_profile};
//!
//! let desc = ProfileDescriptor::new("My Display");
//! write_profile("display.icc", &desc)?;
//! # Ok::<(), mcal_icc::IccError>(())
//! ```
//!
//! # Atomicity
//!
//! [`write_profile`] encodes fully in memory, writes to a temporary file
//! in the destination directory, and atomically renames it into place.
//! A failed export never leaves a partial `.icc` behind.
//!
//! # Dependencies
//!
//! - `mcal-core` - XYZ types and illuminant constants
//! - `tempfile` - atomic publish of the output file
//! - `thiserror` - error types

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod descriptor;
mod error;
mod fixed;
mod read;
mod write;

pub use descriptor::ProfileDescriptor;
pub use error::{IccError, IccResult};
pub use fixed::{s15f16_decode, s15f16_encode, u8f8_decode, u8f8_encode};
pub use read::{ParsedProfile, TagEntry, parse_profile, read_profile};
pub use write::{encode_profile, write_profile};
