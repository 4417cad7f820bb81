//! Block pooling for lossy downsampling
//!
//! The spatial extent is cropped to a multiple of the block size, then every
//! non-overlapping `block x block` tile collapses to one sample.

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::config::DEFAULT_BLOCK_SIZE;
use crate::dispatch::map_each;
use crate::error::{Error, Result};
use crate::models::plane::{nan_max, nan_min};
use crate::models::{Buffer, Plane, PlaneView};

/// Tile reduction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoolingFunction {
    /// Largest sample
    #[default]
    Max,
    /// Smallest sample
    Min,
    /// Arithmetic mean
    Mean,
}

impl PoolingFunction {
    /// Lowercase name used at the string boundary
    pub fn name(self) -> &'static str {
        match self {
            Self::Max => "max",
            Self::Min => "min",
            Self::Mean => "mean",
        }
    }

    /// Reduce a non-empty run of samples; `None` when empty.
    ///
    /// A NaN sample makes the result NaN for every function.
    pub fn reduce(self, samples: impl Iterator<Item = f64>) -> Option<f64> {
        match self {
            Self::Max => samples.reduce(nan_max),
            Self::Min => samples.reduce(nan_min),
            Self::Mean => {
                let (sum, count) = samples.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
                (count > 0).then(|| sum / count as f64)
            }
        }
    }
}

impl FromStr for PoolingFunction {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "max" => Ok(Self::Max),
            "min" => Ok(Self::Min),
            "mean" => Ok(Self::Mean),
            other => Err(Error::InvalidArgument(format!(
                "pooling function `{other}` is not one of max, min, mean"
            ))),
        }
    }
}

impl fmt::Display for PoolingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters for one [`pool`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolOptions {
    /// Tile side
    pub block_size: usize,
    /// Tile reduction
    pub function: PoolingFunction,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            function: PoolingFunction::default(),
        }
    }
}

/// Check buffer shape and block size without touching samples
pub fn validate(image: &Buffer, block_size: usize) -> Result<()> {
    if block_size < 1 {
        return Err(Error::InvalidArgument(
            "block size must be a positive integer greater than 0".to_string(),
        ));
    }
    if !image.is_gray_or_rgb() {
        return Err(Error::DimensionError(format!(
            "the input image needs to be of shape n x m or n x m x 3, got {:?}",
            image.shape()
        )));
    }
    if image.height() < block_size || image.width() < block_size {
        return Err(Error::InvalidArgument(format!(
            "block size {} must not be larger than the image ({}x{})",
            block_size,
            image.height(),
            image.width()
        )));
    }
    Ok(())
}

/// Pool one plane; trailing rows and columns that do not fill a block are dropped
pub fn pool_plane(plane: PlaneView<'_>, block_size: usize, function: PoolingFunction) -> Plane {
    if block_size == 0 {
        return Plane::default();
    }
    let out_w = plane.width() / block_size;
    let out_h = plane.height() / block_size;

    Plane::from_fn(out_w, out_h, |x, y| {
        plane
            .subview(x * block_size, y * block_size, block_size, block_size)
            .and_then(|tile| function.reduce(tile.iter()))
            .unwrap_or(f64::NAN)
    })
}

/// Downsample a grayscale or RGB buffer by block pooling.
///
/// Output is `floor(H / b) x floor(W / b)`, with channels pooled independently.
pub fn pool(image: &Buffer, options: &PoolOptions) -> Result<Buffer> {
    validate(image, options.block_size)?;
    debug!(
        "pool {}: image {:?}, block {}",
        options.function,
        image.shape(),
        options.block_size
    );
    map_each(image, |view| {
        pool_plane(view, options.block_size, options.function)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn img1() -> Buffer {
        Buffer::new(&[3, 3], vec![5.0, 4.0, 3.0, 2.0, 2.0, 1.0, 8.0, 2.0, 0.0]).unwrap()
    }

    fn opts(block_size: usize, function: PoolingFunction) -> PoolOptions {
        PoolOptions {
            block_size,
            function,
        }
    }

    #[test]
    fn test_reduce() {
        let samples = [5.0, 4.0, 2.0, 2.0];
        assert_eq!(PoolingFunction::Max.reduce(samples.into_iter()), Some(5.0));
        assert_eq!(PoolingFunction::Min.reduce(samples.into_iter()), Some(2.0));
        assert_eq!(PoolingFunction::Mean.reduce(samples.into_iter()), Some(3.25));
        assert_eq!(PoolingFunction::Mean.reduce(std::iter::empty()), None);
    }

    #[test]
    fn test_nan_propagates() {
        let samples = [5.0, f64::NAN, 2.0];
        for function in [PoolingFunction::Max, PoolingFunction::Min, PoolingFunction::Mean] {
            assert!(function.reduce(samples.into_iter()).is_some_and(f64::is_nan));
        }

        let image = Buffer::new(&[2, 4], vec![1.0, f64::NAN, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]).unwrap();
        let max = pool(&image, &opts(2, PoolingFunction::Max)).unwrap();
        assert!(max.data()[0].is_nan());
        assert_eq!(max.data()[1], 8.0);
    }

    #[test]
    fn test_block_2_crops_remainder() {
        let image = img1();
        let max = pool(&image, &opts(2, PoolingFunction::Max)).unwrap();
        assert_eq!(max.shape(), &[1, 1]);
        assert_eq!(max.data(), &[5.0]);
        assert_eq!(pool(&image, &opts(2, PoolingFunction::Min)).unwrap().data(), &[2.0]);
        assert_eq!(pool(&image, &opts(2, PoolingFunction::Mean)).unwrap().data(), &[3.25]);
    }

    #[test]
    fn test_block_1_is_identity() {
        let image = img1();
        for function in [PoolingFunction::Max, PoolingFunction::Min, PoolingFunction::Mean] {
            assert_eq!(pool(&image, &opts(1, function)).unwrap(), image);
        }
    }

    #[test]
    fn test_rectangular_tiles() {
        let plane = Plane::from_fn(5, 4, |x, y| (y * 5 + x) as f64);
        let out = pool_plane(plane.as_view(), 2, PoolingFunction::Max);
        assert_eq!((out.width(), out.height()), (2, 2));
        assert_eq!(out.data(), &[6.0, 8.0, 16.0, 18.0]);
    }

    #[test]
    fn test_validation() {
        let image = img1();
        assert!(matches!(validate(&image, 0), Err(Error::InvalidArgument(_))));
        assert!(matches!(validate(&image, 4), Err(Error::InvalidArgument(_))));
        assert!(matches!(
            validate(&Buffer::zeros(&[1]), 1),
            Err(Error::DimensionError(_))
        ));
        assert!(matches!(
            validate(&Buffer::zeros(&[4, 1, 1]), 1),
            Err(Error::DimensionError(_))
        ));
        assert!(matches!(
            "median".parse::<PoolingFunction>(),
            Err(Error::InvalidArgument(_))
        ));
    }
}
