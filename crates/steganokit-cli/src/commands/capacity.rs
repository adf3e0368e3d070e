use std::path::PathBuf;

use clap::Args;
use steganokit_core::Technique;

use crate::CliResult;

/// Shows how much text an image can carry with each technique
#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// Carrier image such as PNG or JPEG
    #[arg(short = 'i', long = "in", value_name = "image file", required = true)]
    pub media: PathBuf,

    /// Only show this technique
    #[arg(short, long, value_name = "technique")]
    pub technique: Option<Technique>,
}

impl CapacityArgs {
    pub fn run(self) -> CliResult<()> {
        for capacity in steganokit_core::commands::capacity(&self.media, self.technique)? {
            println!(
                "{:<14} {:>9} bits {:>8} bytes of text",
                capacity.technique.to_string(),
                capacity.bits,
                capacity.text_bytes
            );
        }

        Ok(())
    }
}
