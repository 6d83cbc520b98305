//! # mcal-math
//!
//! Small dense linear algebra for display calibration: f64 3-vectors,
//! 3x3 matrices, and an overdetermined least-squares solver.
//!
//! Calibration works on tens of samples, so everything here is sized for
//! `N x 3` coefficient stacks against `3 x 3` unknowns - no large-matrix
//! machinery.
//!
//! # Usage
//!
//! ```rust
//! use mcal_math::{Mat3, Vec3, lstsq};
//!
//! let captured = vec![
//!     Vec3::new(240.0, 10.0, 15.0),
//!     Vec3::new(20.0, 230.0, 25.0),
//!     Vec3::new(15.0, 20.0, 235.0),
//! ];
//! let target = vec![
//!     Vec3::new(255.0, 0.0, 0.0),
//!     Vec3::new(0.0, 255.0, 0.0),
//!     Vec3::new(0.0, 0.0, 255.0),
//! ];
//!
//! // M minimizing ||captured_rows * M - target_rows||
//! let m: Mat3 = lstsq::solve_rows(&captured, &target).unwrap();
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - f64 vector/matrix interop
//! - [`nalgebra`] - SVD for the least-squares solve
//!
//! # Used By
//!
//! - `mcal-calibrate` - color-correction matrix solving

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod vec3;
mod mat3;
pub mod lstsq;

pub use vec3::Vec3;
pub use mat3::Mat3;
