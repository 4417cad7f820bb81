//! picture_kit - image array transformations
//!
//! Convolution filtering, block pooling, quarter-turn rotation and channel
//! statistics over in-memory pixel buffers. Buffers are row-major and
//! channel-last: `height x width` for grayscale, `height x width x 3` for RGB.
//!
//! Every operation validates its arguments up front and returns a fresh
//! buffer; inputs are never modified.
//!
//! ```
//! use picture_kit::{Buffer, apply_filter};
//!
//! let image = Buffer::new(&[5, 5], (1..=25).map(f64::from).collect()).unwrap();
//! let kernel = Buffer::filled(&[2, 2], 1.0);
//! let filtered = apply_filter(&image, "custom", 3, Some(&kernel)).unwrap();
//! assert_eq!(filtered.shape(), &[4, 4]);
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Defaults and environment settings
pub mod config;
/// Per-channel routing shared by the engines
pub mod dispatch;
/// Crate error type
pub mod error;
/// Convolution filtering and kernel construction
pub mod filter;
/// Core data structures (Buffer, Plane, StatsRecord)
pub mod models;
/// Block pooling
pub mod pool;
/// Quarter-turn rotation
pub mod rotate;
/// Channel statistics
pub mod stats;
/// Utility functions (`image` crate interop)
pub mod utils;

pub use error::{Error, Result};
pub use filter::{FilterOptions, FilterType, KernelKind};
pub use models::{Buffer, ChannelStats, Kernel, Plane, PlaneView, StatsRecord};
pub use pool::{PoolOptions, PoolingFunction};

/// Apply a named filter to a grayscale or RGB image
///
/// # Arguments
/// * `image` - `H x W` or `H x W x 3` buffer
/// * `filter_type` - `"blur"`, `"sharpen"` or `"custom"`
/// * `filter_size` - side of the predefined kernel (ignored for `"custom"`)
/// * `custom_filter` - `kh x kw` or `kh x kw x 3` kernel for `"custom"`
///
/// # Returns
/// Filtered image, min-max normalized per channel
pub fn apply_filter(
    image: &Buffer,
    filter_type: &str,
    filter_size: usize,
    custom_filter: Option<&Kernel>,
) -> Result<Buffer> {
    let options = FilterOptions {
        filter_type: filter_type.parse()?,
        filter_size,
        custom_kernel: custom_filter.cloned(),
    };
    filter::apply(image, &options)
}

/// Apply a filter described by typed options
pub fn apply_filter_with(image: &Buffer, options: &FilterOptions) -> Result<Buffer> {
    filter::apply(image, options)
}

/// Compress an image by block pooling
///
/// # Arguments
/// * `image` - `H x W` or `H x W x 3` buffer
/// * `block_size` - tile side, at least 1 and no larger than either dimension
/// * `pooling_function` - `"max"`, `"min"` or `"mean"`
///
/// # Returns
/// `floor(H / block_size) x floor(W / block_size)` image
pub fn pool_image(image: &Buffer, block_size: usize, pooling_function: &str) -> Result<Buffer> {
    pool::validate(image, block_size)?;
    let options = PoolOptions {
        block_size,
        function: pooling_function.parse()?,
    };
    pool::pool(image, &options)
}

/// Pool an image with typed options
pub fn pool_image_with(image: &Buffer, options: &PoolOptions) -> Result<Buffer> {
    pool::pool(image, options)
}

/// Rotate an `H x W x C` image clockwise by 1 to 4 quarter turns
pub fn rotate_image(image: &Buffer, quarter_turns: u32) -> Result<Buffer> {
    rotate::rotate(image, quarter_turns)
}

/// Extract dimensions, pixel count and per-channel mean/median of an RGB(A) image
pub fn extract_properties(image: &Buffer) -> Result<StatsRecord> {
    stats::extract(image)
}
