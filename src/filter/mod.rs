//! Convolution filtering with predefined and custom kernels
//!
//! - Kernel construction (`blur`, `sharpen`)
//! - Valid-mode sliding-window correlation over strided views
//! - Per-channel min-max normalization of the filtered output

/// Sliding-window correlation and normalization
pub mod convolve;
/// Predefined kernels
pub mod kernel;

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::config::DEFAULT_FILTER_SIZE;
use crate::error::{Error, Result};
use crate::models::{Buffer, Kernel};

pub use convolve::{convolve_2d, convolve_3d, correlate_valid, min_max_normalize};
pub use kernel::{KernelKind, build_kernel, build_kernel_named};

/// Filter selector accepted by [`apply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    /// Predefined blur kernel
    Blur,
    /// Predefined sharpen kernel
    Sharpen,
    /// Caller-supplied kernel
    Custom,
}

impl FilterType {
    /// Lowercase name used at the string boundary
    pub fn name(self) -> &'static str {
        match self {
            Self::Blur => "blur",
            Self::Sharpen => "sharpen",
            Self::Custom => "custom",
        }
    }

    fn predefined(self) -> Option<KernelKind> {
        match self {
            Self::Blur => Some(KernelKind::Blur),
            Self::Sharpen => Some(KernelKind::Sharpen),
            Self::Custom => None,
        }
    }
}

impl FromStr for FilterType {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "blur" => Ok(Self::Blur),
            "sharpen" => Ok(Self::Sharpen),
            "custom" => Ok(Self::Custom),
            other => Err(Error::InvalidFilterType(other.to_string())),
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters for one [`apply`] call
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOptions {
    /// Which kernel to use
    pub filter_type: FilterType,
    /// Side of the predefined kernel; ignored for custom kernels
    pub filter_size: usize,
    /// Kernel used when `filter_type` is [`FilterType::Custom`]
    pub custom_kernel: Option<Kernel>,
}

impl FilterOptions {
    /// Predefined kernel of the given size
    pub fn predefined(kind: KernelKind, filter_size: usize) -> Self {
        let filter_type = match kind {
            KernelKind::Blur => FilterType::Blur,
            KernelKind::Sharpen => FilterType::Sharpen,
        };
        Self {
            filter_type,
            filter_size,
            custom_kernel: None,
        }
    }

    /// Caller-supplied kernel
    pub fn custom(kernel: Kernel) -> Self {
        Self {
            filter_type: FilterType::Custom,
            filter_size: DEFAULT_FILTER_SIZE,
            custom_kernel: Some(kernel),
        }
    }
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self::predefined(KernelKind::Blur, DEFAULT_FILTER_SIZE)
    }
}

/// Apply a predefined or custom filter to a grayscale or RGB buffer.
///
/// A rank 3 custom kernel on a rank 2 image contributes only its first
/// channel; a rank 2 kernel on a rank 3 image is applied to every channel.
/// All validation happens before any window is evaluated.
pub fn apply(image: &Buffer, options: &FilterOptions) -> Result<Buffer> {
    if !image.is_gray_or_rgb() {
        return Err(Error::InvalidImageDimension(format!(
            "expected a 2D image or a 3D image with 3 channels, got shape {:?}",
            image.shape()
        )));
    }

    let built;
    let kernel: &Kernel = match options.filter_type.predefined() {
        Some(kind) => {
            if options.filter_size == 0 {
                return Err(Error::InvalidFilterDimension(
                    "filter size must be at least 1".to_string(),
                ));
            }
            if image.height() <= options.filter_size || image.width() <= options.filter_size {
                return Err(Error::InvalidImageDimension(format!(
                    "image size has to be bigger than filter size: image {}x{}, filter {}",
                    image.height(),
                    image.width(),
                    options.filter_size
                )));
            }
            built = build_kernel(kind, options.filter_size);
            &built
        }
        None => {
            let custom = options.custom_kernel.as_ref().ok_or_else(|| {
                Error::InvalidFilterDimension("custom filter type requires a kernel".to_string())
            })?;
            if !custom.is_gray_or_rgb() {
                return Err(Error::InvalidFilterDimension(format!(
                    "expected a 2D filter or a 3D filter with 3 channels, got shape {:?}",
                    custom.shape()
                )));
            }
            custom
        }
    };

    debug!(
        "apply filter {}: image {:?}, kernel {:?}",
        options.filter_type,
        image.shape(),
        kernel.shape()
    );

    if image.rank() == 3 && kernel.rank() == 3 {
        return convolve_3d(image, kernel);
    }

    // Rank 2 kernels broadcast over all channels; rank 3 kernels on a
    // rank 2 image contribute channel 0 only
    let taps = kernel.channel_view(0).ok_or_else(|| {
        Error::InvalidFilterDimension(format!("filter shape {:?} has no channels", kernel.shape()))
    })?;
    convolve::convolve_broadcast(image, taps)
}
