use log::debug;

use super::{ensure_capacity, HideBits};
use crate::bit_codec::ends_with_terminator;
use crate::media::{Channel, PixelBuffer};
use crate::result::Result;

/// Bit position that is overwritten in the red, green and blue channel, alpha is never used
type BitPositions = [u8; 3];

/// Overwrites bit 0 of red, green and blue, pixel by pixel in buffer order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BitPlaneLsb {
    /// Upper bound of bits read while unveiling, `None` reads the whole capacity
    pub max_decode_bits: Option<usize>,
}

/// Like [`BitPlaneLsb`] but with a different bit per channel: bit 1 of red, bit 0 of green
/// and bit 2 of blue. This spreads the embedding noise across the channels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MultiPlaneLsb {
    /// Upper bound of bits read while unveiling, `None` reads the whole capacity
    pub max_decode_bits: Option<usize>,
}

const SINGLE_PLANE: BitPositions = [0, 0, 0];
const MULTI_PLANE: BitPositions = [1, 0, 2];

impl HideBits for BitPlaneLsb {
    fn name(&self) -> &'static str {
        "lsb"
    }

    fn capacity(&self, carrier: &PixelBuffer) -> usize {
        plane_capacity(carrier)
    }

    fn hide_bits(&self, carrier: &mut PixelBuffer, bits: &[bool]) -> Result<()> {
        hide_in_planes(carrier, bits, SINGLE_PLANE, self.name())
    }

    fn unveil_bits(&self, carrier: &PixelBuffer) -> Result<Vec<bool>> {
        Ok(unveil_from_planes(carrier, SINGLE_PLANE, self.max_decode_bits))
    }
}

impl HideBits for MultiPlaneLsb {
    fn name(&self) -> &'static str {
        "lsb-improved"
    }

    fn capacity(&self, carrier: &PixelBuffer) -> usize {
        plane_capacity(carrier)
    }

    fn hide_bits(&self, carrier: &mut PixelBuffer, bits: &[bool]) -> Result<()> {
        hide_in_planes(carrier, bits, MULTI_PLANE, self.name())
    }

    fn unveil_bits(&self, carrier: &PixelBuffer) -> Result<Vec<bool>> {
        Ok(unveil_from_planes(carrier, MULTI_PLANE, self.max_decode_bits))
    }
}

/// one bit per color channel, 3 per pixel
#[inline(always)]
fn plane_capacity(carrier: &PixelBuffer) -> usize {
    carrier.pixel_count() * Channel::COLORS.len()
}

/// the `slot`-th usable sample: pixel `slot / 3`, color channel `slot % 3`
#[inline(always)]
fn slot(slot: usize) -> (usize, usize) {
    (slot / Channel::COLORS.len(), slot % Channel::COLORS.len())
}

fn hide_in_planes(
    carrier: &mut PixelBuffer,
    bits: &[bool],
    positions: BitPositions,
    name: &'static str,
) -> Result<()> {
    ensure_capacity(name, bits.len(), plane_capacity(carrier))?;
    debug!("{name}: hiding {} bits in {} pixels", bits.len(), carrier.pixel_count());

    for (i, bit) in bits.iter().enumerate() {
        let (pixel, color) = slot(i);
        let position = positions[color];
        let sample = carrier.nth_mut(pixel, Channel::COLORS[color]);
        *sample = (*sample & !(1 << position)) | ((*bit as u8) << position);
    }

    Ok(())
}

fn unveil_from_planes(
    carrier: &PixelBuffer,
    positions: BitPositions,
    max_decode_bits: Option<usize>,
) -> Vec<bool> {
    let capacity = plane_capacity(carrier);
    let ceiling = max_decode_bits.map_or(capacity, |max| max.min(capacity));
    let mut bits = Vec::new();

    for i in 0..ceiling {
        let (pixel, color) = slot(i);
        let sample = carrier.nth(pixel, Channel::COLORS[color]);
        bits.push((sample >> positions[color]) & 1 == 1);

        if bits.len() % 8 == 0 && ends_with_terminator(&bits) {
            break;
        }
    }

    bits
}
