//! Defaults and environment-driven runtime settings
//!
//! Defaults are plain constants; option structs are built fresh per call from
//! them. Environment settings are read once and cached.

use std::sync::OnceLock;

/// Default kernel size for predefined filters
pub const DEFAULT_FILTER_SIZE: usize = 3;
/// Default pooling block size
pub const DEFAULT_BLOCK_SIZE: usize = 2;
/// Weight of every cell in the blur kernel, independent of kernel size
pub const BLUR_WEIGHT: f64 = 0.01;
/// Center weight of the sharpen kernel
pub const SHARPEN_CENTER: f64 = 5.0;
/// Weight of the sharpen diamond around the center
pub const SHARPEN_RING: f64 = -1.0;

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

static PARALLEL_CHANNELS: OnceLock<bool> = OnceLock::new();

/// Whether multi-channel buffers may be processed on the rayon pool
pub fn parallel_channels() -> bool {
    *PARALLEL_CHANNELS.get_or_init(|| parse_env_bool_u8("PICTURE_KIT_PARALLEL", true))
}

static PARALLEL_MIN_PIXELS: OnceLock<usize> = OnceLock::new();

/// Per-channel pixel count below which channels are processed sequentially
pub fn parallel_min_pixels() -> usize {
    *PARALLEL_MIN_PIXELS.get_or_init(|| parse_env_usize("PICTURE_KIT_PARALLEL_MIN_PIXELS", 4096))
}
