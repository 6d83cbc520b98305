//! # mcal-io
//!
//! Text-format I/O for calibration sessions.
//!
//! - [`ti3`] - Argyll CMS `.ti3` measurement sets, for handing raw
//!   samples to third-party profiling tools
//! - [`samples`] - plain CSV sample files (capture-loop output, CLI
//!   input) and the per-session log with delta-E per row
//!
//! # Example
//!
//! ```rust,no_run
//! use mcal_core::{Rgb, SampleStore};
//! use mcal_io::{samples, ti3};
//!
//! let store = samples::read_samples("session.csv")?;
//! ti3::write_ti3("session.ti3", &store)?;
//! # Ok::<(), mcal_io::IoError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod publish;
pub mod samples;
pub mod ti3;

pub use error::{IoError, IoResult};
