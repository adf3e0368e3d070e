use std::path::{Path, PathBuf};

use log::info;

use crate::{Persist, PixelBuffer, SteganoCore, SteganoError, Technique};

pub fn prepare() -> HideApi {
    HideApi::default()
}

#[derive(Default, Debug)]
pub struct HideApi {
    message: Option<String>,
    image: Option<PathBuf>,
    output: Option<PathBuf>,
    technique: Technique,
}

impl HideApi {
    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    pub fn use_message<S: AsRef<str>>(mut self, message: Option<S>) -> Self {
        self.message = message.map(|s| s.as_ref().to_string());
        self
    }

    /// the carrier image, PNG or JPEG
    pub fn with_image<A: AsRef<Path>>(mut self, image: A) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    /// where the image with the hidden message goes, always written as PNG
    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    /// Set the embedding technique, defaults to `lsb`
    pub fn using_technique(mut self, technique: Technique) -> Self {
        self.technique = technique;
        self
    }

    pub fn execute(self) -> Result<(), SteganoError> {
        let Some(message) = self.message else {
            return Err(SteganoError::MissingMessage);
        };
        let Some(image) = self.image else {
            return Err(SteganoError::CarrierNotSet);
        };
        let Some(output) = self.output else {
            return Err(SteganoError::TargetNotSet);
        };

        let mut pixels = PixelBuffer::from_file(&image)?;
        SteganoCore::hide_text(&mut pixels, &message, &self.technique)?;
        pixels.save_as(&output)?;
        info!("message hidden with `{}` in {output:?}", self.technique);

        Ok(())
    }
}
