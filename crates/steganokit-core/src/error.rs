use thiserror::Error;

#[derive(Error, Debug)]
pub enum SteganoError {
    /// Represents a message that does not fit into the carrier with the chosen technique.
    /// Raised before the carrier is touched, so the carrier stays unmodified.
    #[error(
        "Capacity Error: technique `{technique}` can carry {available} bits in this image, but {required} bits are needed"
    )]
    CapacityExceeded {
        technique: &'static str,
        required: usize,
        available: usize,
    },

    /// Represents a carrier region that does not read back the bits written into it, for
    /// example a black block that clamps every change away or overlapping patches.
    /// Raised before the carrier is touched, so the carrier stays unmodified.
    #[error(
        "Embedding Error: technique `{technique}` cannot embed reliably into the region at ({x}, {y}) of this image"
    )]
    EmbeddingFailed {
        technique: &'static str,
        x: u32,
        y: u32,
    },

    /// Represents a technique selector that is not one of `lsb | lsb-improved | patchwork | dct | histogram`
    #[error("Unknown technique: `{0}`")]
    UnknownTechnique(String),

    /// Represents a carrier that was not encoded with the given technique, or was altered afterwards
    #[error("Signature mismatch: the image does not carry a `{0}` payload")]
    SignatureMismatch(&'static str),

    /// Represents an unveiled bit stream without an end marker, only raised on strict unveil
    #[error("No terminator found in the unveiled data")]
    TerminatorNotFound,

    /// Represents a pixel buffer whose sample count does not match `width * height * 4`
    #[error("Invalid pixel buffer: {len} samples do not match {width}x{height} RGBA pixels")]
    InvalidPixelBuffer { width: u32, height: u32, len: usize },

    /// Represents an unsupported carrier media. For example, a Movie file is not supported
    #[error("Media format is not supported")]
    UnsupportedMedia,

    /// Represents an invalid carrier image media. For example, a broken PNG file
    #[error("Image media is invalid")]
    InvalidImageMedia,

    /// Represents a failure when encoding an image file.
    #[error("Image encoding error")]
    ImageEncodingError,

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("No carrier media set")]
    CarrierNotSet,

    #[error("No target file set")]
    TargetNotSet,

    #[error("API Error: Missing message")]
    MissingMessage,
}
