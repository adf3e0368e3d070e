//! # Steganokit Core API
//!
//! Hides short text messages in the pixels of RGBA images and unveils them again. Five
//! techniques are available through the [`Technique`] enum:
//!
//! | selector       | domain                        | framing                |
//! |----------------|-------------------------------|------------------------|
//! | `lsb`          | bit 0 of red, green, blue     | terminator             |
//! | `lsb-improved` | bits 1, 0, 2 of red, green, blue | terminator          |
//! | `patchwork`    | ±1 bias of 8×8 blue patches   | terminator             |
//! | `dct`          | 8×8 DCT of the blue channel   | signature and length   |
//! | `histogram`    | blue histogram shifting       | signature and length   |
//!
//! [`SteganoCore`] works on in-memory [`PixelBuffer`]s, while [`api`] and [`commands`] read
//! and write image files.
//!
//! # Usage Examples
//!
//! ## Hide and unveil a message in memory
//!
//! ```rust
//! use steganokit_core::{PixelBuffer, SteganoCore, Technique};
//!
//! let mut pixels = PixelBuffer::from_fn(64, 64, |x, y| [x as u8, y as u8, 128, 255]);
//! let lsb: Technique = "lsb".parse().expect("Unknown technique");
//!
//! SteganoCore::hide_text(&mut pixels, "Hello, World!", &lsb).expect("Failed to hide message");
//! let message = SteganoCore::unveil_text(&pixels, &lsb).expect("Failed to unveil message");
//!
//! assert_eq!(message, "Hello, World!");
//! ```
//!
//! ## Hide a message inside an image file
//!
//! ```rust,no_run
//! use tempfile::tempdir;
//!
//! let temp_dir = tempdir().expect("Failed to create temporary directory");
//!
//! steganokit_core::api::hide::prepare()
//!     .with_message("Hello, World!")
//!     .with_image("carrier.png")
//!     .using_technique("dct".parse().expect("Unknown technique"))
//!     .with_output(temp_dir.path().join("image-with-secret.png"))
//!     .execute()
//!     .expect("Failed to hide message in image");
//! ```

#![warn(
    // clippy::unwrap_used,
    // clippy::expect_used,
    clippy::redundant_else,
)]

pub mod api;
pub mod bit_codec;
pub mod commands;
pub mod error;
pub mod media;
pub mod result;
pub mod techniques;

use log::{debug, warn};

pub use crate::bit_codec::Unveiled;
pub use crate::error::SteganoError;
pub use crate::media::{Channel, Persist, PixelBuffer};
pub use crate::result::Result;
pub use crate::techniques::{HideBits, Technique};

pub struct SteganoCore;

impl SteganoCore {
    /// Frames `text` with the terminator and hides it with `technique`.
    ///
    /// The carrier is left untouched when the message does not fit.
    pub fn hide_text(carrier: &mut PixelBuffer, text: &str, technique: &Technique) -> Result<()> {
        let bits = bit_codec::to_bits(text)?;
        debug!(
            "hiding {} bytes as {} bits with `{technique}`",
            text.len(),
            bits.len()
        );

        technique.hide_bits(carrier, &bits)
    }

    /// Unveils the text hidden with `technique` and reports whether it was terminated.
    pub fn unveil(carrier: &PixelBuffer, technique: &Technique) -> Result<Unveiled> {
        let bits = technique.unveil_bits(carrier)?;
        let unveiled = bit_codec::decode(&bits)?;
        if !unveiled.terminated {
            warn!(
                "no terminator found in {} unveiled bits with `{technique}`, the text may be garbage",
                bits.len()
            );
        }

        Ok(unveiled)
    }

    /// Like [`SteganoCore::unveil`], but only returns the text.
    pub fn unveil_text(carrier: &PixelBuffer, technique: &Technique) -> Result<String> {
        Self::unveil(carrier, technique).map(|unveiled| unveiled.text)
    }

    /// number of whole bytes of text that fit into the carrier, after the terminator
    pub fn text_capacity(carrier: &PixelBuffer, technique: &Technique) -> usize {
        (technique.capacity(carrier) / 8).saturating_sub(bit_codec::TERMINATOR.len())
    }
}
