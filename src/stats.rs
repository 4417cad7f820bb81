//! Per-channel image properties

use log::debug;

use crate::error::{Error, Result};
use crate::models::{Buffer, ChannelStats, PlaneView, StatsRecord};

fn channel_stats(view: PlaneView<'_>) -> ChannelStats {
    let mut samples: Vec<f64> = view.iter().collect();
    let count = samples.len();
    if count == 0 {
        return ChannelStats {
            mean: f64::NAN,
            median: f64::NAN,
        };
    }

    let mean = samples.iter().sum::<f64>() / count as f64;
    samples.sort_by(|a, b| a.total_cmp(b));
    let median = if count % 2 == 1 {
        samples[count / 2]
    } else {
        (samples[count / 2 - 1] + samples[count / 2]) / 2.0
    };
    ChannelStats { mean, median }
}

/// Dimensions, pixel count and per-channel mean/median of an RGB or RGBA buffer.
///
/// The alpha channel of an RGBA buffer is ignored. An image with no pixels
/// reports `NaN` for every mean and median.
pub fn extract(image: &Buffer) -> Result<StatsRecord> {
    if image.rank() != 3 || !(3..=4).contains(&image.channels()) {
        return Err(Error::InvalidType(format!(
            "RGB or RGBA image must be height x width x 3 or 4, got shape {:?}",
            image.shape()
        )));
    }
    debug!("extract: image {:?}", image.shape());

    let stats = |c: usize| -> Result<ChannelStats> {
        image
            .channel_view(c)
            .map(channel_stats)
            .ok_or_else(|| Error::InvalidType(format!("missing channel {c}")))
    };

    Ok(StatsRecord {
        dimension: (image.height(), image.width()),
        total_pixels: image.height() * image.width(),
        r_channel: stats(0)?,
        g_channel: stats(1)?,
        b_channel: stats(2)?,
    })
}
