use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;

use crate::{PixelBuffer, SteganoCore, SteganoError, Technique};

pub fn prepare() -> UnveilApi {
    UnveilApi::default()
}

#[derive(Default, Debug)]
pub struct UnveilApi {
    secret_media: Option<PathBuf>,
    output_file: Option<PathBuf>,
    technique: Technique,
    require_terminator: bool,
}

impl UnveilApi {
    /// This is the secret image that contains the message to be unveiled
    pub fn from_secret_file(mut self, secret_image: impl AsRef<Path>) -> Self {
        self.secret_media = Some(secret_image.as_ref().to_path_buf());
        self
    }

    /// Also write the unveiled message into this file
    pub fn into_output_file(mut self, output_file: impl AsRef<Path>) -> Self {
        self.output_file = Some(output_file.as_ref().to_path_buf());
        self
    }

    /// The technique the message was hidden with, defaults to `lsb`
    pub fn using_technique(mut self, technique: Technique) -> Self {
        self.technique = technique;
        self
    }

    /// Fail with [`SteganoError::TerminatorNotFound`] instead of returning everything that was
    /// decoded, when the message is not terminated
    pub fn require_terminator(mut self, required: bool) -> Self {
        self.require_terminator = required;
        self
    }

    /// Execute the unveil process and return the message
    pub fn execute(self) -> Result<String, SteganoError> {
        let Some(secret_media) = self.secret_media else {
            return Err(SteganoError::CarrierNotSet);
        };

        let pixels = PixelBuffer::from_file(&secret_media)?;
        let unveiled = SteganoCore::unveil(&pixels, &self.technique)?;
        if self.require_terminator && !unveiled.terminated {
            return Err(SteganoError::TerminatorNotFound);
        }

        if let Some(output_file) = self.output_file {
            let mut target =
                File::create(&output_file).map_err(|source| SteganoError::WriteError { source })?;
            target
                .write_all(unveiled.text.as_bytes())
                .map_err(|source| SteganoError::WriteError { source })?;
            info!("message written to {output_file:?}");
        }

        Ok(unveiled.text)
    }
}
