use std::fmt;
use std::str::FromStr;

use crate::config::{BLUR_WEIGHT, SHARPEN_CENTER, SHARPEN_RING};
use crate::error::Error;
use crate::models::Kernel;

/// Predefined kernels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelKind {
    /// Uniform kernel of constant weight
    Blur,
    /// Diamond of -1 around a center of 5
    Sharpen,
}

impl KernelKind {
    /// Lowercase name used at the string boundary
    pub fn name(self) -> &'static str {
        match self {
            Self::Blur => "blur",
            Self::Sharpen => "sharpen",
        }
    }
}

impl FromStr for KernelKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blur" => Ok(Self::Blur),
            "sharpen" => Ok(Self::Sharpen),
            other => Err(Error::InvalidKernelKind(other.to_string())),
        }
    }
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Build a `size x size` predefined kernel.
///
/// The blur kernel is filled with [`BLUR_WEIGHT`] whatever the size; it is not
/// normalized to sum to one. Even sizes are accepted and follow the same
/// construction.
pub fn build_kernel(kind: KernelKind, size: usize) -> Kernel {
    let data = match kind {
        KernelKind::Blur => vec![BLUR_WEIGHT; size * size],
        KernelKind::Sharpen => sharpen_cells(size),
    };
    Kernel::from_parts(vec![size, size], data)
}

/// Parse `kind` and build the kernel
pub fn build_kernel_named(kind: &str, size: usize) -> Result<Kernel, Error> {
    Ok(build_kernel(kind.parse()?, size))
}

fn sharpen_cells(size: usize) -> Vec<f64> {
    let half = size / 2;
    let mut cells = vec![SHARPEN_RING; size * size];
    if size == 0 {
        return cells;
    }
    cells[half * size + half] = SHARPEN_CENTER;

    // Zero the corner triangles outside the diamond, top and bottom rows inward
    for i in 0..half {
        let keep = (half - i)..(half + 1 + i).min(size);
        for row in [i, size - 1 - i] {
            for col in (0..size).filter(|c| !keep.contains(c)) {
                cells[row * size + col] = 0.0;
            }
        }
    }
    cells
}
