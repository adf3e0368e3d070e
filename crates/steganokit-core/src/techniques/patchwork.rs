use log::debug;

use super::{ensure_capacity, HideBits};
use crate::bit_codec::{ends_with_terminator, TERMINATOR_BITS};
use crate::error::SteganoError;
use crate::media::{Channel, PixelBuffer};
use crate::result::Result;

/// edge length of a patch
const PATCH: u32 = 8;

/// Biases the blue channel of an 8×8 patch per bit: +1 for a 1-bit, -1 for a 0-bit.
///
/// Unveiling compares the mean of each patch to the mean of the one pixel ring around it. There
/// is no length field, reading stops as soon as the terminator shows up.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SpatialPatchBias {
    /// Upper bound of bits read while unveiling, `None` means one bit per distinct patch origin
    pub max_decode_bits: Option<usize>,
}

/// Top left pixel of the patch that carries bit `index`.
///
/// A pure function of the index and the image dimensions, so no coordinate table needs to be
/// stored. The image must be larger than 8 pixels in both directions.
pub fn patch_origin(index: usize, width: u32, height: u32) -> (u32, u32) {
    let x = (index * 29) % (width - PATCH) as usize;
    let y = (index * 37) % (height - PATCH) as usize;

    (x as u32, y as u32)
}

/// Number of distinct origins [`patch_origin`] visits before it repeats.
///
/// The x sequence repeats after `(width - 8) / gcd(29, width - 8)` steps, the y sequence after
/// `(height - 8) / gcd(37, height - 8)` steps, the pair after the least common multiple.
pub fn origin_period(width: u32, height: u32) -> usize {
    if width <= PATCH || height <= PATCH {
        return 0;
    }

    let columns = (width - PATCH) as usize;
    let rows = (height - PATCH) as usize;
    lcm(columns / gcd(29, columns), rows / gcd(37, rows))
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn lcm(a: usize, b: usize) -> usize {
    a / gcd(a, b) * b
}

impl SpatialPatchBias {
    fn ceiling(&self, carrier: &PixelBuffer) -> usize {
        let period = origin_period(carrier.width(), carrier.height());
        if period == 0 {
            return 0;
        }

        self.max_decode_bits.unwrap_or(period)
    }
}

impl HideBits for SpatialPatchBias {
    fn name(&self) -> &'static str {
        "patchwork"
    }

    fn capacity(&self, carrier: &PixelBuffer) -> usize {
        self.ceiling(carrier)
    }

    fn hide_bits(&self, carrier: &mut PixelBuffer, bits: &[bool]) -> Result<()> {
        ensure_capacity(self.name(), bits.len(), self.capacity(carrier))?;
        debug!("patchwork: hiding {} bits in 8x8 patches", bits.len());

        let (width, height) = (carrier.width(), carrier.height());
        let mut staged = carrier.clone();
        for (index, bit) in bits.iter().enumerate() {
            let (x0, y0) = patch_origin(index, width, height);
            for y in y0..y0 + PATCH {
                for x in x0..x0 + PATCH {
                    let blue = staged.get(x, y, Channel::Blue);
                    let biased = if *bit {
                        blue.saturating_add(1)
                    } else {
                        blue.saturating_sub(1)
                    };
                    staged.set(x, y, Channel::Blue, biased);
                }
            }
        }

        // overlapping patches and clamped samples can flip earlier bits
        let flipped = (0..bits.len()).find(|i| patch_outshines_ring(&staged, *i) != bits[*i]);
        if let Some(index) = flipped {
            let (x, y) = patch_origin(index, width, height);
            debug!("patchwork: bit {index} does not read back from the patch at ({x}, {y})");
            return Err(SteganoError::EmbeddingFailed {
                technique: "patchwork",
                x,
                y,
            });
        }

        *carrier = staged;
        Ok(())
    }

    fn unveil_bits(&self, carrier: &PixelBuffer) -> Result<Vec<bool>> {
        let ceiling = self.ceiling(carrier);
        debug!("patchwork: reading up to {ceiling} bits");

        let mut bits = Vec::new();
        for index in 0..ceiling {
            bits.push(patch_outshines_ring(carrier, index));

            if bits.len() % 8 == 0 && bits.len() >= TERMINATOR_BITS && ends_with_terminator(&bits) {
                break;
            }
        }

        Ok(bits)
    }
}

/// `true` when the blue mean inside the patch exceeds the blue mean of the ring around it
fn patch_outshines_ring(carrier: &PixelBuffer, index: usize) -> bool {
    let (width, height) = (carrier.width(), carrier.height());
    let (x0, y0) = patch_origin(index, width, height);

    let (mut patch_sum, mut patch_count) = (0u64, 0u64);
    let (mut ring_sum, mut ring_count) = (0u64, 0u64);
    for y in y0.saturating_sub(1)..(y0 + PATCH + 1).min(height) {
        for x in x0.saturating_sub(1)..(x0 + PATCH + 1).min(width) {
            let blue = carrier.get(x, y, Channel::Blue) as u64;
            if (x0..x0 + PATCH).contains(&x) && (y0..y0 + PATCH).contains(&y) {
                patch_sum += blue;
                patch_count += 1;
            } else {
                ring_sum += blue;
                ring_count += 1;
            }
        }
    }

    // patch_sum / patch_count > ring_sum / ring_count, without division
    patch_sum * ring_count > ring_sum * patch_count
}
