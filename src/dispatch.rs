//! Per-channel routing shared by the filtering, pooling and rotation engines
//!
//! A rank 2 buffer is treated as one channel and comes back rank 2; a rank 3
//! buffer has every channel mapped independently and restacked channel-last.

use log::trace;
use rayon::prelude::*;

use crate::config;
use crate::error::{Error, Result};
use crate::models::{Buffer, Plane, PlaneView};

/// Apply `op` to every channel of a rank 2 or rank 3 buffer.
///
/// `op` receives the channel index and a zero-copy view of that channel. All
/// returned planes must have the same dimensions. Channels go to the rayon
/// pool when there is more than one, [`config::parallel_channels`] is set and
/// each channel has at least [`config::parallel_min_pixels`] samples.
pub fn map_channels<F>(buffer: &Buffer, op: F) -> Result<Buffer>
where
    F: Fn(usize, PlaneView<'_>) -> Plane + Sync,
{
    let parallel = buffer.channels() > 1
        && config::parallel_channels()
        && buffer.height() * buffer.width() >= config::parallel_min_pixels();
    map_channels_with(buffer, parallel, op)
}

/// [`map_channels`] with the parallel decision made by the caller
pub fn map_channels_with<F>(buffer: &Buffer, parallel: bool, op: F) -> Result<Buffer>
where
    F: Fn(usize, PlaneView<'_>) -> Plane + Sync,
{
    if !matches!(buffer.rank(), 2 | 3) {
        return Err(Error::DimensionError(format!(
            "expected a rank 2 or rank 3 buffer, got rank {}",
            buffer.rank()
        )));
    }

    let channels = buffer.channels();
    if channels == 0 {
        // No samples to map; the output extent still comes from `op`
        let blank = Plane::new(buffer.width(), buffer.height());
        let shaped = op(0, blank.as_view());
        return Buffer::new(&[shaped.height(), shaped.width(), 0], Vec::new());
    }

    let run = |c: usize| -> Result<Plane> {
        let view = buffer.channel_view(c).ok_or_else(|| {
            Error::DimensionError(format!("channel {c} out of range for {channels} channels"))
        })?;
        Ok(op(c, view))
    };

    trace!(
        "dispatch: {} channel(s) of {}x{}, parallel={}",
        channels,
        buffer.height(),
        buffer.width(),
        parallel
    );

    let planes = if parallel {
        (0..channels).into_par_iter().map(run).collect::<Result<Vec<_>>>()?
    } else {
        (0..channels).map(run).collect::<Result<Vec<_>>>()?
    };

    Buffer::from_planes(planes, buffer.rank() == 3)
}

/// Apply the same plane operation to every channel, ignoring the channel index
pub fn map_each<F>(buffer: &Buffer, op: F) -> Result<Buffer>
where
    F: Fn(PlaneView<'_>) -> Plane + Sync,
{
    map_channels(buffer, |_, view| op(view))
}
