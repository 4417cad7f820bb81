//! Core data structures (Buffer, Plane, StatsRecord)

/// N-dimensional sample buffer
pub mod buffer;
/// Single-channel planes and strided views
pub mod plane;
/// Image property record
pub mod stats;

pub use buffer::{Buffer, Kernel};
pub use plane::{Plane, PlaneView};
pub use stats::{ChannelStats, StatsRecord};
