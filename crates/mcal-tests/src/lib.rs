//! Integration tests for mcal crates.
//!
//! End-to-end tests that run whole calibration sessions through the
//! solver, the quality report, the ICC encoder, and the text exporters.
