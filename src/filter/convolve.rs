use log::debug;

use crate::dispatch::map_channels;
use crate::error::{Error, Result};
use crate::models::{Buffer, Kernel, Plane, PlaneView};

/// Valid (stride 1, no padding) sliding-window product sum of `kernel` over `image`.
///
/// Output is `(H - kh + 1) x (W - kw + 1)`. Each window is a strided view into
/// the image, so no window is copied.
pub fn correlate_valid(image: PlaneView<'_>, kernel: PlaneView<'_>) -> Plane {
    let (kw, kh) = (kernel.width(), kernel.height());
    let out_w = (image.width() + 1).saturating_sub(kw);
    let out_h = (image.height() + 1).saturating_sub(kh);

    let mut out = Plane::new(out_w, out_h);
    let samples = out.data_mut();
    for y in 0..out_h {
        for x in 0..out_w {
            if let Some(window) = image.subview(x, y, kw, kh) {
                samples[y * out_w + x] = window.dot(&kernel);
            }
        }
    }
    out
}

/// Rescale to `[0, 1]` with `(v - min) / (max - min)`.
///
/// A constant plane is returned unchanged. A NaN sample turns every sample
/// into NaN.
pub fn min_max_normalize(mut plane: Plane) -> Plane {
    let Some((lo, hi)) = plane.min_max() else {
        return plane;
    };
    if hi != lo {
        let range = hi - lo;
        for v in plane.data_mut() {
            *v = (*v - lo) / range;
        }
    }
    plane
}

fn filter_plane(image: PlaneView<'_>, kernel: PlaneView<'_>) -> Plane {
    min_max_normalize(correlate_valid(image, kernel))
}

fn check_fits(image: (usize, usize), kernel: (usize, usize)) -> Result<()> {
    let ((ih, iw), (kh, kw)) = (image, kernel);
    if kh == 0 || kw == 0 {
        return Err(Error::InvalidFilterDimension(format!(
            "filter must not be empty, got {kh}x{kw}"
        )));
    }
    if ih <= kh || iw <= kw {
        return Err(Error::InvalidImageDimension(format!(
            "image size has to be bigger than filter size: image {ih}x{iw}, filter {kh}x{kw}"
        )));
    }
    Ok(())
}

/// Filter a single-channel plane and min-max normalize the result
pub fn convolve_2d(image: &Plane, kernel: &Plane) -> Result<Plane> {
    check_fits(
        (image.height(), image.width()),
        (kernel.height(), kernel.width()),
    )?;
    debug!(
        "convolve_2d: image {}x{}, kernel {}x{}",
        image.height(),
        image.width(),
        kernel.height(),
        kernel.width()
    );
    Ok(filter_plane(image.as_view(), kernel.as_view()))
}

/// Filter a three-channel buffer with a three-channel kernel.
///
/// Channel `c` of the image is filtered with channel `c` of the kernel and
/// normalized on its own.
pub fn convolve_3d(image: &Buffer, kernel: &Kernel) -> Result<Buffer> {
    if image.rank() != 3 || image.channels() != 3 {
        return Err(Error::InvalidImageDimension(format!(
            "expected a height x width x 3 image, got shape {:?}",
            image.shape()
        )));
    }
    if kernel.rank() != 3 || kernel.channels() != 3 {
        return Err(Error::InvalidFilterDimension(format!(
            "expected a kh x kw x 3 filter, got shape {:?}",
            kernel.shape()
        )));
    }
    check_fits(
        (image.height(), image.width()),
        (kernel.height(), kernel.width()),
    )?;
    debug!(
        "convolve_3d: image {:?}, kernel {:?}",
        image.shape(),
        kernel.shape()
    );

    let taps: Vec<PlaneView<'_>> = (0..3).filter_map(|c| kernel.channel_view(c)).collect();
    map_channels(image, |c, view| filter_plane(view, taps[c]))
}

/// Filter every channel of a rank 2 or rank 3 image with the same 2D kernel
pub(crate) fn convolve_broadcast(image: &Buffer, kernel: PlaneView<'_>) -> Result<Buffer> {
    check_fits(
        (image.height(), image.width()),
        (kernel.height(), kernel.width()),
    )?;
    map_channels(image, |_, view| filter_plane(view, kernel))
}
