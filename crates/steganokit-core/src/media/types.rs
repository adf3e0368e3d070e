use std::fs::File;
use std::path::Path;

use log::error;

use crate::error::SteganoError;
use crate::media::{Persist, PixelBuffer};
use crate::result::Result;

/// Image formats a carrier can be read from. Writing is always PNG, any lossy format would
/// destroy the hidden bits.
const READABLE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

impl PixelBuffer {
    /// decodes an image file into RGBA8 pixels
    pub fn from_file(f: &Path) -> Result<Self> {
        let Some(ext) = f.extension().and_then(|e| e.to_str()) else {
            return Err(SteganoError::UnsupportedMedia);
        };
        if !READABLE_EXTENSIONS.contains(&ext.to_lowercase().as_str()) {
            return Err(SteganoError::UnsupportedMedia);
        }

        let image = image::open(f).map_err(|e| {
            error!("Error opening image {f:?}: {e}");
            SteganoError::InvalidImageMedia
        })?;

        Ok(Self::from(image.to_rgba8()))
    }

    /// writes the pixels losslessly as PNG
    pub fn save_to_writer<W: std::io::Write + std::io::Seek>(&self, writer: &mut W) -> Result<()> {
        self.clone()
            .into_image()?
            .write_to(writer, image::ImageOutputFormat::Png)
            .map_err(|e| {
                error!("Error saving image: {e}");
                SteganoError::ImageEncodingError
            })
    }
}

impl Persist for PixelBuffer {
    fn save_as(&self, file: &Path) -> Result<()> {
        let mut f = File::create(file).map_err(|e| {
            error!("Error creating file {file:?}: {e}");
            SteganoError::WriteError { source: e }
        })?;
        self.save_to_writer(&mut f)
    }
}
