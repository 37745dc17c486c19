pub use aes_gcm::Error as AesGcmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptError {
    /// The envelope string does not have the `salt:nonce:ciphertext:tag[:1]`
    /// shape, or one of its segments is empty, not base64, or has a bogus length
    #[error("Not a valid encoded message")]
    Format,

    /// The AEAD tag did not verify: wrong password or tampered data
    #[error("Authentication failed: wrong password or corrupted image")]
    Authentication,

    #[error("Encryption error")]
    Encryption(AesGcmError),

    #[error("Compression error")]
    Compression(std::io::Error),

    #[error("Decompression error")]
    Decompression(std::io::Error),

    #[error("Invalid text data found inside the envelope")]
    InvalidTextData(#[from] std::string::FromUtf8Error),
}
