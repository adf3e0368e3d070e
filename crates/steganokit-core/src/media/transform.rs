//! 8×8 two dimensional DCT-II / DCT-III over one channel of a [`PixelBuffer`].
//!
//! The transform is orthonormal: `C(0) = 1/√2`, `C(k > 0) = 1` and a global factor of `1/4`,
//! computed straight from the nested sum definition.

use std::f64::consts::{FRAC_1_SQRT_2, PI};
use std::sync::OnceLock;

use crate::media::{Channel, PixelBuffer};

/// Edge length of a block
pub const BLOCK_SIZE: usize = 8;

/// Row-major 8×8 samples or coefficients, indexed `[row][col]`
pub type Block = [[f64; BLOCK_SIZE]; BLOCK_SIZE];

/// `cos((2x + 1) * k * PI / 16)`, indexed `[k][x]`
fn cosines() -> &'static Block {
    static COSINES: OnceLock<Block> = OnceLock::new();
    COSINES.get_or_init(|| {
        let mut table = [[0.0; BLOCK_SIZE]; BLOCK_SIZE];
        for (k, row) in table.iter_mut().enumerate() {
            for (x, value) in row.iter_mut().enumerate() {
                *value = ((2 * x + 1) as f64 * k as f64 * PI / 16.0).cos();
            }
        }
        table
    })
}

#[inline(always)]
fn scale(k: usize) -> f64 {
    if k == 0 {
        FRAC_1_SQRT_2
    } else {
        1.0
    }
}

/// Weight of the sample at `(row, col)` in the coefficient `(u, v)`.
///
/// Changing that sample by `d` changes the coefficient by exactly `d * basis(u, v, row, col)`.
#[inline(always)]
pub fn basis(u: usize, v: usize, row: usize, col: usize) -> f64 {
    let cos = cosines();
    0.25 * scale(u) * scale(v) * cos[u][row] * cos[v][col]
}

/// Type-II DCT of a block of samples.
pub fn forward_dct(block: &Block) -> Block {
    let cos = cosines();
    let mut coefficients = [[0.0; BLOCK_SIZE]; BLOCK_SIZE];
    for (u, coefficient_row) in coefficients.iter_mut().enumerate() {
        for (v, coefficient) in coefficient_row.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (row, samples) in block.iter().enumerate() {
                for (col, sample) in samples.iter().enumerate() {
                    sum += sample * cos[u][row] * cos[v][col];
                }
            }
            *coefficient = 0.25 * scale(u) * scale(v) * sum;
        }
    }

    coefficients
}

/// Type-III DCT, the inverse of [`forward_dct`].
pub fn inverse_dct(coefficients: &Block) -> Block {
    let cos = cosines();
    let mut block = [[0.0; BLOCK_SIZE]; BLOCK_SIZE];
    for (row, samples) in block.iter_mut().enumerate() {
        for (col, sample) in samples.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (u, coefficient_row) in coefficients.iter().enumerate() {
                for (v, coefficient) in coefficient_row.iter().enumerate() {
                    sum += scale(u) * scale(v) * coefficient * cos[u][row] * cos[v][col];
                }
            }
            *sample = 0.25 * sum;
        }
    }

    block
}

/// Reads the 8×8 window of `channel` whose top left pixel is `(x, y)`.
///
/// The caller guarantees that the window lies inside the buffer.
pub fn extract_block(pixels: &PixelBuffer, x: u32, y: u32, channel: Channel) -> Block {
    let mut block = [[0.0; BLOCK_SIZE]; BLOCK_SIZE];
    for (row, samples) in block.iter_mut().enumerate() {
        for (col, sample) in samples.iter_mut().enumerate() {
            *sample = pixels.get(x + col as u32, y + row as u32, channel) as f64;
        }
    }

    block
}

/// Writes a block back, every sample rounded to the nearest integer and clamped to `0..=255`.
pub fn write_block(pixels: &mut PixelBuffer, x: u32, y: u32, block: &Block, channel: Channel) {
    for (row, samples) in block.iter().enumerate() {
        for (col, sample) in samples.iter().enumerate() {
            pixels.set(x + col as u32, y + row as u32, channel, to_sample(*sample));
        }
    }
}

#[inline(always)]
pub fn to_sample(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Top left pixel of every complete block, in raster order. Partial blocks at the right and
/// bottom edge are never visited.
pub fn block_origins(width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
    let size = BLOCK_SIZE as u32;
    let (blocks_wide, blocks_tall) = (width / size, height / size);
    (0..blocks_tall).flat_map(move |by| (0..blocks_wide).map(move |bx| (bx * size, by * size)))
}

/// Number of complete blocks in a `width` × `height` image
pub fn block_count(width: u32, height: u32) -> usize {
    let size = BLOCK_SIZE as u32;
    (width / size) as usize * (height / size) as usize
}
