//! # mcal-calibrate
//!
//! The calibration engine: turns a session's `(target, captured)` sample
//! pairs into a color-correction matrix, a display gamma estimate, a
//! quality report, and an ICC profile descriptor.
//!
//! # Pipeline
//!
//! ```text
//! SampleStore -> Ccm::solve      -> 3x3 correction matrix (least squares)
//!             -> gamma::estimate -> GammaFit (fitted or 2.2 fallback)
//!             -> metrics::analyze-> PerformanceMetrics (delta-E, grade)
//!             -> profile::derive_descriptor -> ProfileDescriptor
//! ```
//!
//! # Example
//!
//! ```rust
//! use mcal_core::{Rgb, SampleStore, WhitePoint};
//! use mcal_calibrate::{Ccm, metrics};
//!
//! let mut store = SampleStore::new();
//! store.record(Rgb::new(255, 0, 0), Rgb::new(240, 10, 15));
//! store.record(Rgb::new(0, 255, 0), Rgb::new(20, 230, 25));
//! store.record(Rgb::new(0, 0, 255), Rgb::new(15, 20, 235));
//!
//! let ccm = Ccm::solve(&store).expect("3 samples are enough");
//! let report = metrics::analyze(&store, WhitePoint::D65, 2.2).unwrap();
//! assert!(report.avg_corrected <= report.avg_raw);
//! ```
//!
//! # Fallback policy
//!
//! Statistical anomalies never abort the pipeline: an implausible gamma
//! fit is replaced by 2.2 (carried as [`GammaFit::Fallback`] and logged),
//! and a rank-deficient sample set yields a best-effort matrix rather
//! than an error. Only I/O failures are hard errors, and those live in
//! the encoder and export crates.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod ccm;
pub mod gamma;
pub mod metrics;
pub mod profile;

pub use ccm::Ccm;
pub use gamma::{FallbackReason, GammaFit};
pub use metrics::{Grade, PerformanceMetrics, delta_e};
pub use profile::derive_descriptor;
