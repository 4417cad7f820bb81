//! Utility functions
//!
//! - Conversion between `image` crate pixel buffers and [`crate::Buffer`]

pub mod convert;
