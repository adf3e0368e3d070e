//! Reversible embedding by shifting the blue channel histogram.
//!
//! The values strictly between the histogram peak and a nearby zero point are moved one step
//! towards the zero point, which frees the value right next to the peak. Each pixel at the peak
//! then carries one bit: it stays at the peak for a 0 and moves into the freed value for a 1.
//!
//! The first [`RESERVED_PIXELS`] pixels are left out of the histogram and hold the metadata:
//!
//! | pixel | blue value                            |
//! |-------|---------------------------------------|
//! | 0..=7 | signature `10, 20, ..., 80`           |
//! | 8     | peak                                  |
//! | 9     | zero point                            |
//! | 10    | `1` when shifted right, `0` otherwise |
//! | 11    | payload length in bytes, low byte     |
//! | 12    | payload length in bytes, high byte    |

use log::debug;

use super::{ensure_capacity, HideBits};
use crate::error::SteganoError;
use crate::media::{Channel, Histogram, PixelBuffer};
use crate::result::Result;

const CHANNEL: Channel = Channel::Blue;

/// pixels that are never part of the histogram
pub const RESERVED_PIXELS: usize = 32;

const SIGNATURE_LEN: usize = 8;
const PEAK: usize = 8;
const ZERO: usize = 9;
const DIRECTION: usize = 10;
const LENGTH_LOW: usize = 11;
const LENGTH_HIGH: usize = 12;

/// the length field counts bytes in two 8 bit samples
const MAX_BYTES: usize = u16::MAX as usize;

#[inline]
fn signature(index: usize) -> u8 {
    (index as u8 + 1) * 10
}

/// Peak and zero point of the carrier, `None` when the zero point is the neighbour the peak
/// pixels move into and already holds pixels, those would read back as 1-bits.
fn anchors(histogram: &Histogram) -> Option<(u8, u8)> {
    let peak = histogram.peak();
    let zero = histogram.zero_point(peak);
    if zero.abs_diff(peak) == 1 && histogram.count(zero) > 0 {
        debug!(
            "histogram: zero point {zero} next to peak {peak} holds {} pixels",
            histogram.count(zero)
        );
        return None;
    }

    Some((peak, zero))
}

/// Histogram shifting on the blue channel, around the most frequent value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HistogramPeakShift;

impl HideBits for HistogramPeakShift {
    fn name(&self) -> &'static str {
        "histogram"
    }

    /// every pixel at the peak carries one bit, counted in whole bytes
    fn capacity(&self, carrier: &PixelBuffer) -> usize {
        if carrier.pixel_count() <= RESERVED_PIXELS {
            return 0;
        }
        let histogram = Histogram::of(carrier, CHANNEL, RESERVED_PIXELS);
        match anchors(&histogram) {
            Some((peak, _)) => (histogram.count(peak) / 8).min(MAX_BYTES) * 8,
            None => 0,
        }
    }

    fn hide_bits(&self, carrier: &mut PixelBuffer, bits: &[bool]) -> Result<()> {
        let bytes = (bits.len() + 7) / 8;
        ensure_capacity(self.name(), bytes * 8, self.capacity(carrier))?;

        let histogram = Histogram::of(carrier, CHANNEL, RESERVED_PIXELS);
        let Some((peak, zero)) = anchors(&histogram) else {
            return Err(SteganoError::CapacityExceeded {
                technique: self.name(),
                required: bytes * 8,
                available: 0,
            });
        };
        let shift_right = zero > peak;
        debug!(
            "histogram: peak {peak} ({} pixels), zero point {zero} ({} pixels), shifting {}",
            histogram.count(peak),
            histogram.count(zero),
            if shift_right { "right" } else { "left" }
        );

        let (low, high) = if shift_right { (peak, zero) } else { (zero, peak) };
        let mark = if shift_right { peak + 1 } else { peak - 1 };

        let mut bits = bits.iter().copied().chain(std::iter::repeat(false)).take(bytes * 8);
        let mut pending = bits.next();
        for pixel in RESERVED_PIXELS..carrier.pixel_count() {
            let value = carrier.nth_mut(pixel, CHANNEL);
            if *value > low && *value < high {
                *value = if shift_right { *value + 1 } else { *value - 1 };
            } else if *value == peak {
                if let Some(bit) = pending {
                    if bit {
                        *value = mark;
                    }
                    pending = bits.next();
                }
            }
        }

        for index in 0..SIGNATURE_LEN {
            *carrier.nth_mut(index, CHANNEL) = signature(index);
        }
        *carrier.nth_mut(PEAK, CHANNEL) = peak;
        *carrier.nth_mut(ZERO, CHANNEL) = zero;
        *carrier.nth_mut(DIRECTION, CHANNEL) = u8::from(shift_right);
        *carrier.nth_mut(LENGTH_LOW, CHANNEL) = (bytes & 0xFF) as u8;
        *carrier.nth_mut(LENGTH_HIGH, CHANNEL) = (bytes >> 8) as u8;

        Ok(())
    }

    fn unveil_bits(&self, carrier: &PixelBuffer) -> Result<Vec<bool>> {
        let signed = carrier.pixel_count() > LENGTH_HIGH
            && (0..SIGNATURE_LEN).all(|index| carrier.nth(index, CHANNEL) == signature(index));
        if !signed {
            return Err(SteganoError::SignatureMismatch(self.name()));
        }

        let peak = i16::from(carrier.nth(PEAK, CHANNEL));
        let mark = if carrier.nth(DIRECTION, CHANNEL) == 1 {
            peak + 1
        } else {
            peak - 1
        };
        let bytes = usize::from(carrier.nth(LENGTH_LOW, CHANNEL))
            | (usize::from(carrier.nth(LENGTH_HIGH, CHANNEL)) << 8);
        debug!("histogram: peak {peak}, marks at {mark}, {bytes} bytes");

        let mut bits = Vec::with_capacity(bytes * 8);
        for pixel in RESERVED_PIXELS..carrier.pixel_count() {
            if bits.len() == bytes * 8 {
                break;
            }
            let value = i16::from(carrier.nth(pixel, CHANNEL));
            if value == peak {
                bits.push(false);
            } else if value == mark {
                bits.push(true);
            }
        }

        Ok(bits)
    }
}
