use std::path::PathBuf;

use clap::Args;
use steganokit_core::Technique;

use crate::CliResult;

/// Hides a text message in a PNG or JPEG image, the result is always a PNG
#[derive(Args, Debug)]
pub struct HideArgs {
    /// Carrier image such as PNG or JPEG, used readonly.
    #[arg(short = 'i', long = "in", value_name = "image file", required = true)]
    pub media: PathBuf,

    /// Final image will be stored as file
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output image file",
        required = true
    )]
    pub write_to_file: PathBuf,

    /// A text message that will be hidden
    #[arg(short, long, value_name = "text message", required = true)]
    pub message: String,

    /// lsb | lsb-improved | patchwork | dct | histogram
    #[arg(short, long, value_name = "technique", default_value = "lsb")]
    pub technique: Technique,
}

impl HideArgs {
    pub fn run(self) -> CliResult<()> {
        steganokit_core::commands::hide(
            &self.media,
            &self.write_to_file,
            &self.message,
            self.technique,
        )
    }
}
