//! # Course library.
//!
//! This library allows other crates in the workspace to access items defined inside the course
//! crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Controller interface - the hardware the course is driven through
pub mod controller;

/// Normal course - loads the per-segment PID file and runs each segment in turn
pub mod normal_course;
