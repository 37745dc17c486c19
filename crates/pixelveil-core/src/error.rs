use thiserror::Error;

pub use pixelveil_crypt::CryptError;

#[derive(Error, Debug)]
pub enum StegError {
    /// Raised before any pixel is touched when the message does not fit
    #[error(
        "Message too large: the message requires {required} bits, but the image can only hold {available} bits. \
         Try a larger image, a shorter message, or compression."
    )]
    CapacityExceeded { required: usize, available: usize },

    /// Represents an invalid carrier image. For example, a broken PNG file
    #[error("Image media is invalid")]
    InvalidImageMedia,

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write the target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents a failure when encoding the output image.
    #[error("Image encoding error")]
    ImageEncodingError,

    /// Format and authentication failures bubble up from the envelope layer unchanged
    #[error(transparent)]
    Crypto(#[from] CryptError),

    #[error("No carrier image set")]
    CarrierNotSet,

    #[error("No target file set")]
    TargetNotSet,

    #[error("API Error: Missing message")]
    MissingMessage,

    #[error("API Error: Missing password")]
    MissingPassword,
}
