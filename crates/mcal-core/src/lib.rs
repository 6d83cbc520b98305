//! # mcal-core
//!
//! Core types for display calibration: measurement samples, patch
//! sequences, and white-point targets.
//!
//! A calibration session accumulates `(target, captured)` RGB pairs in a
//! [`SampleStore`]: the target is the patch color commanded on the display,
//! the captured value is the averaged camera response for that patch. The
//! solver, gamma estimator, and quality analyzer in `mcal-calibrate` all
//! read from the store; the ICC encoder in `mcal-icc` consumes their
//! outputs.
//!
//! # Usage
//!
//! ```rust
//! use mcal_core::{Rgb, SampleStore};
//!
//! let mut store = SampleStore::new();
//! store.record(Rgb::new(255, 0, 0), Rgb::new(240, 10, 15));
//! assert_eq!(store.len(), 1);
//! ```
//!
//! # Concurrency
//!
//! The store is single-threaded by contract: one writer (the capture loop)
//! appends, readers run after capture completes. Hosts embedding this in a
//! concurrent environment must serialize access externally.
//!
//! # Used By
//!
//! - `mcal-calibrate` - CCM solving, gamma fitting, quality metrics
//! - `mcal-icc` - profile encoding
//! - `mcal-io` - measurement-set export

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod sample;
mod xyz;
pub mod patches;

pub use sample::{Rgb, Sample, SampleStore};
pub use xyz::{Xyz, WhitePoint, D50, D65};
