//! The five embedding techniques.
//!
//! Every technique implements [`HideBits`]; the closed [`Technique`] enum dispatches to them
//! and is what callers select, usually by parsing one of the selector strings
//! `lsb | lsb-improved | patchwork | dct | histogram`.

mod dct;
mod histogram_shift;
mod lsb;
mod patchwork;

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use enum_dispatch::enum_dispatch;

pub use dct::FrequencyCoefficientQuant;
pub use histogram_shift::HistogramPeakShift;
pub use lsb::{BitPlaneLsb, MultiPlaneLsb};
pub use patchwork::{patch_origin, SpatialPatchBias};

use crate::error::SteganoError;
use crate::media::PixelBuffer;
use crate::result::Result;

/// Hides a bit sequence in pixel data and unveils it again
#[enum_dispatch]
pub trait HideBits {
    /// selector of the technique, as accepted by [`Technique::from_str`]
    fn name(&self) -> &'static str;

    /// number of bits the carrier can take
    fn capacity(&self, carrier: &PixelBuffer) -> usize;

    /// Embeds `bits` into the carrier in place.
    ///
    /// Fails with [`SteganoError::CapacityExceeded`] before the carrier is touched, when
    /// the bits do not fit.
    fn hide_bits(&self, carrier: &mut PixelBuffer, bits: &[bool]) -> Result<()>;

    /// Reads the embedded bits back.
    ///
    /// Terminator driven techniques return the bits up to and including the terminator, or up
    /// to their decode ceiling when none was found.
    fn unveil_bits(&self, carrier: &PixelBuffer) -> Result<Vec<bool>>;
}

#[enum_dispatch(HideBits)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Technique {
    Lsb(BitPlaneLsb),
    LsbImproved(MultiPlaneLsb),
    Patchwork(SpatialPatchBias),
    Dct(FrequencyCoefficientQuant),
    Histogram(HistogramPeakShift),
}

impl Default for Technique {
    fn default() -> Self {
        Self::Lsb(BitPlaneLsb::default())
    }
}

impl Technique {
    /// all selectors, in the order techniques are listed to users
    pub const SELECTORS: [&'static str; 5] = ["lsb", "lsb-improved", "patchwork", "dct", "histogram"];

    pub fn all() -> [Technique; 5] {
        [
            BitPlaneLsb::default().into(),
            MultiPlaneLsb::default().into(),
            SpatialPatchBias::default().into(),
            FrequencyCoefficientQuant.into(),
            HistogramPeakShift.into(),
        ]
    }

    /// Overrides the decode ceiling of terminator driven techniques. `None` restores the
    /// ceiling derived from the buffer size. Length driven techniques are returned unchanged.
    pub fn with_max_decode_bits(self, max_decode_bits: Option<usize>) -> Self {
        match self {
            Self::Lsb(_) => Self::Lsb(BitPlaneLsb { max_decode_bits }),
            Self::LsbImproved(_) => Self::LsbImproved(MultiPlaneLsb { max_decode_bits }),
            Self::Patchwork(_) => Self::Patchwork(SpatialPatchBias { max_decode_bits }),
            other => other,
        }
    }
}

impl FromStr for Technique {
    type Err = SteganoError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "lsb" => Ok(BitPlaneLsb::default().into()),
            "lsb-improved" => Ok(MultiPlaneLsb::default().into()),
            "patchwork" => Ok(SpatialPatchBias::default().into()),
            "dct" => Ok(FrequencyCoefficientQuant.into()),
            "histogram" => Ok(HistogramPeakShift.into()),
            _ => Err(SteganoError::UnknownTechnique(s.to_string())),
        }
    }
}

impl Display for Technique {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// fails with [`SteganoError::CapacityExceeded`] when `required` exceeds `available`
pub(crate) fn ensure_capacity(technique: &'static str, required: usize, available: usize) -> Result<()> {
    if required > available {
        return Err(SteganoError::CapacityExceeded {
            technique,
            required,
            available,
        });
    }

    Ok(())
}
