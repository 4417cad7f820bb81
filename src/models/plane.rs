/// Owned single-channel 2D array of samples, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl Plane {
    /// Create a zero-filled plane with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    /// Create a plane where every sample is `value`
    pub fn filled(width: usize, height: usize, value: f64) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Wrap row-major samples; `None` if the length does not match
    pub fn from_vec(width: usize, height: usize, data: Vec<f64>) -> Option<Self> {
        if width.checked_mul(height)? != data.len() {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Build a plane by evaluating `f(x, y)` for every sample
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Get plane width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get plane height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get sample at (x, y)
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y * self.width + x])
    }

    /// Row-major samples
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Mutable row-major samples
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Consume the plane, returning its samples
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Borrow the whole plane as a strided view
    pub fn as_view(&self) -> PlaneView<'_> {
        PlaneView {
            width: self.width,
            height: self.height,
            row_stride: self.width,
            col_stride: 1,
            data: &self.data,
        }
    }

    /// Smallest and largest sample, `None` for an empty plane.
    ///
    /// A NaN sample makes both bounds NaN.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let mut iter = self.data.iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (nan_min(lo, v), nan_max(hi, v))))
    }
}

/// Larger of two samples; NaN if either is NaN
pub(crate) fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.max(b) }
}

/// Smaller of two samples; NaN if either is NaN
pub(crate) fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.min(b) }
}

impl Default for Plane {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// Borrowed 2D view into a backing slice.
///
/// Element `(x, y)` lives at `y * row_stride + x * col_stride`. A column stride
/// larger than one addresses one channel of an interleaved buffer, and
/// [`PlaneView::subview`] gives overlapping windows without copying.
#[derive(Debug, Clone, Copy)]
pub struct PlaneView<'a> {
    width: usize,
    height: usize,
    row_stride: usize,
    col_stride: usize,
    data: &'a [f64],
}

impl<'a> PlaneView<'a> {
    /// Create a view; `None` if the last addressed element is out of range
    pub fn from_slice(
        width: usize,
        height: usize,
        row_stride: usize,
        col_stride: usize,
        data: &'a [f64],
    ) -> Option<Self> {
        if width > 0 && height > 0 {
            let last = (height - 1)
                .checked_mul(row_stride)?
                .checked_add((width - 1).checked_mul(col_stride)?)?;
            if last >= data.len() {
                return None;
            }
        }
        Some(Self {
            width,
            height,
            row_stride,
            col_stride,
            data,
        })
    }

    /// View width
    pub fn width(&self) -> usize {
        self.width
    }

    /// View height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Sample at (x, y)
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y * self.row_stride + x * self.col_stride])
    }

    /// Sample at (x, y) without the `Option`; panics when out of bounds
    #[inline]
    pub(crate) fn at(&self, x: usize, y: usize) -> f64 {
        debug_assert!(x < self.width && y < self.height);
        self.data[y * self.row_stride + x * self.col_stride]
    }

    /// Window of `width x height` starting at (x, y), sharing the backing slice
    pub fn subview(&self, x: usize, y: usize, width: usize, height: usize) -> Option<PlaneView<'a>> {
        if x.checked_add(width)? > self.width || y.checked_add(height)? > self.height {
            return None;
        }
        let start = y * self.row_stride + x * self.col_stride;
        let data = if width == 0 || height == 0 {
            &self.data[..0]
        } else {
            &self.data[start..]
        };
        Some(PlaneView {
            width,
            height,
            row_stride: self.row_stride,
            col_stride: self.col_stride,
            data,
        })
    }

    /// Samples in row-major order
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| self.at(x, y)))
    }

    /// Element-wise product sum with a view of identical dimensions
    pub fn dot(&self, other: &PlaneView<'_>) -> f64 {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        let mut acc = 0.0;
        for y in 0..self.height {
            for x in 0..self.width {
                acc += self.at(x, y) * other.at(x, y);
            }
        }
        acc
    }

    /// Copy the view into an owned plane
    pub fn to_plane(&self) -> Plane {
        Plane::from_fn(self.width, self.height, |x, y| self.at(x, y))
    }
}
