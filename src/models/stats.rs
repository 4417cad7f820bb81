use std::fmt;

/// Mean and median of one channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelStats {
    /// Arithmetic mean over all pixels
    pub mean: f64,
    /// Median over all pixels (average of the two middle samples for even counts)
    pub median: f64,
}

/// Image properties extracted from an RGB or RGBA buffer
#[derive(Debug, Clone, PartialEq)]
pub struct StatsRecord {
    /// `(height, width)`
    pub dimension: (usize, usize),
    /// `height * width`
    pub total_pixels: usize,
    /// Channel 0
    pub r_channel: ChannelStats,
    /// Channel 1
    pub g_channel: ChannelStats,
    /// Channel 2
    pub b_channel: ChannelStats,
}

impl fmt::Display for StatsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Image dimension: {} x {}", self.dimension.0, self.dimension.1)?;
        writeln!(f, "Total pixels: {} pixels", self.total_pixels)?;
        for (name, stats) in [
            ("R", &self.r_channel),
            ("G", &self.g_channel),
            ("B", &self.b_channel),
        ] {
            writeln!(f, "{name} Channel:")?;
            writeln!(f, "    Mean: {}", stats.mean)?;
            writeln!(f, "    Median: {}", stats.median)?;
        }
        Ok(())
    }
}
