use crate::media::{Channel, PixelBuffer};

/// How far around the peak a zero point is searched for
pub const ZERO_POINT_SEARCH_RADIUS: u8 = 20;

/// Occurrence count of every intensity value of one channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [usize; 256],
}

impl Histogram {
    /// counts `channel` over all pixels, except the first `skip` pixels in buffer order
    pub fn of(pixels: &PixelBuffer, channel: Channel, skip: usize) -> Self {
        let mut counts = [0; 256];
        for value in pixels.channel(channel).skip(skip) {
            counts[value as usize] += 1;
        }

        Self { counts }
    }

    pub fn count(&self, value: u8) -> usize {
        self.counts[value as usize]
    }

    pub fn counts(&self) -> &[usize; 256] {
        &self.counts
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// the most frequent value, ties go to the lowest value
    pub fn peak(&self) -> u8 {
        let mut peak = 0;
        for value in 1..=255u8 {
            if self.count(value) > self.count(peak) {
                peak = value;
            }
        }

        peak
    }

    /// The least frequent value within [`ZERO_POINT_SEARCH_RADIUS`] of `peak`, the search
    /// window is clamped to `1..=254`.
    ///
    /// The neighbour of the peak that points towards the middle of the value range is the
    /// starting candidate, it is only replaced by a value with a strictly smaller count.
    pub fn zero_point(&self, peak: u8) -> u8 {
        let mut zero = if peak > 127 { peak - 1 } else { peak + 1 };
        let low = peak.saturating_sub(ZERO_POINT_SEARCH_RADIUS).max(1);
        let high = peak.saturating_add(ZERO_POINT_SEARCH_RADIUS).min(254);

        for value in low..=high {
            if value != peak && self.count(value) < self.count(zero) {
                zero = value;
            }
        }

        zero
    }
}
