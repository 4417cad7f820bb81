use crate::error::{Error, Result};
use crate::models::{Plane, PlaneView};

/// Owned, contiguous, row-major numeric array.
///
/// Images are rank 2 (`height x width`) or rank 3 channel-last
/// (`height x width x channels`). Other ranks can be constructed so that the
/// engines can reject them with a proper error instead of a panic.
#[derive(Debug, Clone, PartialEq)]
pub struct Buffer {
    shape: Vec<usize>,
    data: Vec<f64>,
}

/// Kernels share the buffer representation: rank 2, or rank 3 with per-channel weights.
pub type Kernel = Buffer;

impl Buffer {
    /// Wrap samples in the given shape
    pub fn new(shape: &[usize], data: Vec<f64>) -> Result<Self> {
        let expected = shape
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or(Error::SizeMismatch {
                expected: usize::MAX,
                actual: data.len(),
            })?;
        if expected != data.len() {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            shape: shape.to_vec(),
            data,
        })
    }

    /// Assemble from parts the caller has already checked
    pub(crate) fn from_parts(shape: Vec<usize>, data: Vec<f64>) -> Self {
        debug_assert_eq!(shape.iter().product::<usize>(), data.len());
        Self { shape, data }
    }

    /// Zero-filled buffer of the given shape
    pub fn zeros(shape: &[usize]) -> Self {
        Self::filled(shape, 0.0)
    }

    /// Buffer of the given shape where every sample is `value`
    pub fn filled(shape: &[usize], value: f64) -> Self {
        let len = shape.iter().product();
        Self {
            shape: shape.to_vec(),
            data: vec![value; len],
        }
    }

    /// Build a buffer from any samples convertible to `f64`
    pub fn from_samples<T: Copy + Into<f64>>(shape: &[usize], samples: &[T]) -> Result<Self> {
        Self::new(shape, samples.iter().map(|&s| s.into()).collect())
    }

    /// Stack equally sized planes along a trailing channel axis.
    ///
    /// A single plane yields a rank 2 buffer unless `keep_channel_axis` is set.
    pub fn from_planes(planes: Vec<Plane>, keep_channel_axis: bool) -> Result<Self> {
        let Some(first) = planes.first() else {
            return Err(Error::DimensionError("no channels to stack".to_string()));
        };
        let (width, height) = (first.width(), first.height());
        if let Some(bad) = planes
            .iter()
            .find(|p| p.width() != width || p.height() != height)
        {
            return Err(Error::DimensionError(format!(
                "channel planes disagree: {}x{} vs {}x{}",
                height,
                width,
                bad.height(),
                bad.width()
            )));
        }

        if planes.len() == 1 && !keep_channel_axis {
            let plane = planes.into_iter().next().unwrap_or_default();
            return Ok(Self {
                shape: vec![height, width],
                data: plane.into_vec(),
            });
        }

        let channels = planes.len();
        let mut data = Vec::with_capacity(width * height * channels);
        for i in 0..width * height {
            for plane in &planes {
                data.push(plane.data()[i]);
            }
        }
        Ok(Self {
            shape: vec![height, width, channels],
            data,
        })
    }

    /// Full shape
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of axes
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Size of axis 0 (0 for rank 0)
    pub fn height(&self) -> usize {
        self.shape.first().copied().unwrap_or(0)
    }

    /// Size of axis 1 (0 below rank 2)
    pub fn width(&self) -> usize {
        self.shape.get(1).copied().unwrap_or(0)
    }

    /// Size of the channel axis: 1 for rank 2, `shape[2]` for rank 3
    pub fn channels(&self) -> usize {
        match self.rank() {
            3 => self.shape[2],
            _ => 1,
        }
    }

    /// True for rank 2, or rank 3 with exactly three channels
    pub fn is_gray_or_rgb(&self) -> bool {
        self.rank() == 2 || (self.rank() == 3 && self.shape[2] == 3)
    }

    /// Row-major samples
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Sample at a full index, `None` when rank or bounds do not match
    pub fn get(&self, index: &[usize]) -> Option<f64> {
        if index.len() != self.shape.len() {
            return None;
        }
        let mut offset = 0usize;
        for (&i, &dim) in index.iter().zip(&self.shape) {
            if i >= dim {
                return None;
            }
            offset = offset * dim + i;
        }
        self.data.get(offset).copied()
    }

    /// Zero-copy view of one channel of a rank 2 or rank 3 buffer
    pub fn channel_view(&self, channel: usize) -> Option<PlaneView<'_>> {
        if !matches!(self.rank(), 2 | 3) || channel >= self.channels() {
            return None;
        }
        let channels = self.channels();
        let (width, height) = (self.width(), self.height());
        if width == 0 || height == 0 {
            return PlaneView::from_slice(width, height, width * channels, channels, &[]);
        }
        PlaneView::from_slice(
            width,
            height,
            width * channels,
            channels,
            &self.data[channel..],
        )
    }

    /// Copy one channel into an owned plane
    pub fn channel(&self, channel: usize) -> Option<Plane> {
        self.channel_view(channel).map(|v| v.to_plane())
    }
}

impl From<Plane> for Buffer {
    fn from(plane: Plane) -> Self {
        Self {
            shape: vec![plane.height(), plane.width()],
            data: plane.into_vec(),
        }
    }
}
