//! Integration test suite for odometer.
//!
//! # Test Categories
//!
//! - `reconciliation`: Digit diffing across many value pairs
//! - `pipeline`: Value source, settle timer and update loop together,
//!   run on a paused tokio clock

mod fixtures;

mod pipeline;
mod reconciliation;
