use std::path::PathBuf;

use clap::Args;
use steganokit_core::Technique;

use crate::CliResult;

/// Unveils a text message from an image and prints it
#[derive(Args, Debug)]
pub struct UnveilArgs {
    /// Source image that contains the secret message
    #[arg(
        short = 'i',
        long = "in",
        value_name = "media source file",
        required = true
    )]
    pub media: PathBuf,

    /// Also store the message in this file
    #[arg(short = 'o', long = "out", value_name = "output file")]
    pub output_file: Option<PathBuf>,

    /// lsb | lsb-improved | patchwork | dct | histogram
    #[arg(short, long, value_name = "technique", default_value = "lsb")]
    pub technique: Technique,

    /// Fail when the message has no terminator, instead of printing everything that was decoded
    #[arg(long)]
    pub strict: bool,
}

impl UnveilArgs {
    pub fn run(self, max_decode_bits: Option<usize>) -> CliResult<()> {
        let message = steganokit_core::commands::unveil(
            &self.media,
            self.technique.with_max_decode_bits(max_decode_bits),
            self.output_file.as_deref(),
            self.strict,
        )?;
        println!("{message}");

        Ok(())
    }
}
