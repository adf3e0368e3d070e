//! Coefficient embedding in the 8×8 DCT domain of the blue channel.
//!
//! Block `(0, 0)` is the metadata block: its DC coefficient is forced even as a signature and
//! 16 coefficients at rows 1..=4, cols 0..=3 carry the message length in bits (big endian) as
//! coefficient parity. Every other block carries up to 4 message bits at the mid frequencies
//! `(3,3) (3,4) (4,3) (4,4)` by quantization index modulation with a step of 8.
//!
//! Rounding and clamping the inverse transform back into 8 bit samples moves the coefficients
//! a little. After a block is written, its samples are nudged by ±1 until every embedded
//! coefficient reads back as intended, see [`settle`].

use byteorder::{BigEndian, ByteOrder};
use log::{debug, trace, warn};

use super::{ensure_capacity, HideBits};
use crate::bit_codec::{bits_from_bytes, bytes_from_bits};
use crate::error::SteganoError;
use crate::media::transform::{
    basis, block_count, block_origins, extract_block, forward_dct, inverse_dct, to_sample,
    write_block, Block, BLOCK_SIZE,
};
use crate::media::{Channel, PixelBuffer};
use crate::result::Result;

const CHANNEL: Channel = Channel::Blue;

/// quantization step of the payload coefficients
const STEP: f64 = 8.0;

const DC: (usize, usize) = (0, 0);

/// rows 1..=4, cols 0..=3
const LENGTH_POSITIONS: [(usize, usize); 16] = [
    (1, 0), (1, 1), (1, 2), (1, 3),
    (2, 0), (2, 1), (2, 2), (2, 3),
    (3, 0), (3, 1), (3, 2), (3, 3),
    (4, 0), (4, 1), (4, 2), (4, 3),
];

const PAYLOAD_POSITIONS: [(usize, usize); 4] = [(3, 3), (3, 4), (4, 3), (4, 4)];

/// the length field is 16 bits wide
const MAX_BITS: usize = u16::MAX as usize;

/// upper bound of ±1 sample moves spent on one block
const MAX_SETTLE_STEPS: usize = 512;

/// Parity embedding in DCT coefficients of the blue channel, with a metadata block.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyCoefficientQuant;

impl HideBits for FrequencyCoefficientQuant {
    fn name(&self) -> &'static str {
        "dct"
    }

    fn capacity(&self, carrier: &PixelBuffer) -> usize {
        let blocks = block_count(carrier.width(), carrier.height());
        (blocks.saturating_sub(1) * PAYLOAD_POSITIONS.len()).min(MAX_BITS)
    }

    fn hide_bits(&self, carrier: &mut PixelBuffer, bits: &[bool]) -> Result<()> {
        ensure_capacity(self.name(), bits.len(), self.capacity(carrier))?;
        debug!(
            "dct: hiding {} bits in {} blocks",
            bits.len(),
            block_count(carrier.width(), carrier.height())
        );

        let mut length = [0u8; 2];
        BigEndian::write_u16(&mut length, bits.len() as u16);
        let mut metadata = vec![Mark::parity(DC, false)];
        metadata.extend(
            LENGTH_POSITIONS
                .iter()
                .zip(bits_from_bytes(&length)?)
                .map(|(position, bit)| Mark::parity(*position, bit)),
        );

        // all blocks go to a staged copy, the carrier only sees a complete embedding
        let mut staged = carrier.clone();
        let mut origins = block_origins(carrier.width(), carrier.height());
        if let Some((x, y)) = origins.next() {
            embed_block(&mut staged, x, y, &metadata)?;
        }

        for ((x, y), chunk) in origins.zip(bits.chunks(PAYLOAD_POSITIONS.len())) {
            let marks: Vec<_> = PAYLOAD_POSITIONS
                .iter()
                .zip(chunk)
                .map(|(position, bit)| Mark::quantized(*position, *bit))
                .collect();
            embed_block(&mut staged, x, y, &marks)?;
        }

        *carrier = staged;
        Ok(())
    }

    fn unveil_bits(&self, carrier: &PixelBuffer) -> Result<Vec<bool>> {
        let mut origins = block_origins(carrier.width(), carrier.height());
        let Some((x, y)) = origins.next() else {
            return Err(SteganoError::SignatureMismatch(self.name()));
        };

        let metadata = forward_dct(&extract_block(carrier, x, y, CHANNEL));
        if read_parity(metadata[DC.0][DC.1]) {
            return Err(SteganoError::SignatureMismatch(self.name()));
        }

        let length_bits: Vec<bool> = LENGTH_POSITIONS
            .iter()
            .map(|(u, v)| read_parity(metadata[*u][*v]))
            .collect();
        let length = BigEndian::read_u16(&bytes_from_bits(&length_bits)?) as usize;
        if length == 0 || length > self.capacity(carrier) {
            debug!("dct: declared length {length} is out of range");
            return Err(SteganoError::SignatureMismatch(self.name()));
        }

        let mut bits = Vec::with_capacity(length);
        for (x, y) in origins {
            let coefficients = forward_dct(&extract_block(carrier, x, y, CHANNEL));
            for (u, v) in PAYLOAD_POSITIONS {
                if bits.len() == length {
                    return Ok(bits);
                }
                bits.push(read_quantized(coefficients[u][v]));
            }
        }

        Ok(bits)
    }
}

/// `true` for an odd coefficient
#[inline]
fn read_parity(coefficient: f64) -> bool {
    (coefficient.round() as i64).rem_euclid(2) == 1
}

/// `true` when the coefficient sits on the half step lattice `k * STEP + STEP / 2`
#[inline]
fn read_quantized(coefficient: f64) -> bool {
    ((coefficient / (STEP / 2.0)).round() as i64).rem_euclid(2) == 1
}

#[derive(Debug, Clone, Copy)]
enum Embedding {
    /// even for 0, odd for 1
    Parity,
    /// multiple of `STEP` for 0, offset by `STEP / 2` for 1
    Quantized,
}

/// one bit that a coefficient has to carry
#[derive(Debug, Clone, Copy)]
struct Mark {
    position: (usize, usize),
    bit: bool,
    embedding: Embedding,
}

impl Mark {
    fn parity(position: (usize, usize), bit: bool) -> Self {
        Self {
            position,
            bit,
            embedding: Embedding::Parity,
        }
    }

    fn quantized(position: (usize, usize), bit: bool) -> Self {
        Self {
            position,
            bit,
            embedding: Embedding::Quantized,
        }
    }

    /// lattice of coefficient values that read back as `bit`: `(period, offset)`
    fn lattice(&self) -> (f64, f64) {
        let bit = if self.bit { 1.0 } else { 0.0 };
        match self.embedding {
            Embedding::Parity => (2.0, bit),
            Embedding::Quantized => (STEP, bit * STEP / 2.0),
        }
    }

    /// distance from the lattice that is still read back safely
    fn tolerance(&self) -> f64 {
        match self.embedding {
            Embedding::Parity => 0.25,
            Embedding::Quantized => STEP / 4.0 - 0.5,
        }
    }

    /// the value the coefficient is forced to
    fn target(&self, coefficient: f64) -> f64 {
        let bit = if self.bit { 1.0 } else { 0.0 };
        match self.embedding {
            Embedding::Parity => (coefficient / 2.0).floor() * 2.0 + bit,
            Embedding::Quantized => (coefficient / STEP).round() * STEP + bit * STEP / 2.0,
        }
    }

    fn read(&self, coefficient: f64) -> bool {
        match self.embedding {
            Embedding::Parity => read_parity(coefficient),
            Embedding::Quantized => read_quantized(coefficient),
        }
    }

    /// squared distance beyond the tolerance, 0 when the coefficient is safe
    fn penalty(&self, coefficient: f64) -> f64 {
        let (period, offset) = self.lattice();
        let nearest = ((coefficient - offset) / period).round() * period + offset;
        let excess = ((coefficient - nearest).abs() - self.tolerance()).max(0.0);
        excess * excess
    }

    fn coefficient<'b>(&self, block: &'b mut Block) -> &'b mut f64 {
        &mut block[self.position.0][self.position.1]
    }
}

/// Forces the marked coefficients of one block and writes the block back.
///
/// Fails with [`SteganoError::EmbeddingFailed`] when the block cannot be settled, e.g. a flat
/// black block where every move towards the target is clamped away.
fn embed_block(carrier: &mut PixelBuffer, x: u32, y: u32, marks: &[Mark]) -> Result<()> {
    let mut coefficients = forward_dct(&extract_block(carrier, x, y, CHANNEL));
    for mark in marks {
        let coefficient = mark.coefficient(&mut coefficients);
        *coefficient = mark.target(*coefficient);
    }

    let mut samples = inverse_dct(&coefficients);
    for sample in samples.iter_mut().flatten() {
        *sample = to_sample(*sample) as f64;
    }

    if !settle(&mut samples, marks) {
        warn!("dct: block at ({x}, {y}) could not be settled");
        return Err(SteganoError::EmbeddingFailed {
            technique: "dct",
            x,
            y,
        });
    }
    write_block(carrier, x, y, &samples, CHANNEL);
    Ok(())
}

/// Moves single integer samples by ±1, always taking the move that reduces the total penalty
/// of all marks the most, until every mark is within tolerance.
///
/// Returns `false` when no move helps any more or the step limit is reached.
fn settle(samples: &mut Block, marks: &[Mark]) -> bool {
    let mut actual = forward_dct(samples);
    let total = |actual: &Block| -> f64 {
        marks
            .iter()
            .map(|m| m.penalty(actual[m.position.0][m.position.1]))
            .sum()
    };

    for step in 0..MAX_SETTLE_STEPS {
        let current = total(&actual);
        if current == 0.0 {
            trace!("dct: block settled after {step} moves");
            return true;
        }

        let mut best: Option<(usize, usize, f64)> = None;
        let mut best_gain = 1e-12;
        for row in 0..BLOCK_SIZE {
            for col in 0..BLOCK_SIZE {
                for delta in [-1.0, 1.0] {
                    let moved = samples[row][col] + delta;
                    if !(0.0..=255.0).contains(&moved) {
                        continue;
                    }
                    let penalty: f64 = marks
                        .iter()
                        .map(|m| {
                            let (u, v) = m.position;
                            m.penalty(actual[u][v] + delta * basis(u, v, row, col))
                        })
                        .sum();
                    if current - penalty > best_gain {
                        best_gain = current - penalty;
                        best = Some((row, col, delta));
                    }
                }
            }
        }

        let Some((row, col, delta)) = best else {
            break;
        };
        samples[row][col] += delta;
        for mark in marks {
            let (u, v) = mark.position;
            actual[u][v] += delta * basis(u, v, row, col);
        }
    }

    let actual = forward_dct(samples);
    marks
        .iter()
        .all(|m| m.read(actual[m.position.0][m.position.1]) == m.bit)
}
