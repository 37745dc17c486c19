//! # Envelope Encryption
//!
//! Seals a text message into the colon-delimited envelope format that
//! pixelveil embeds into images, and opens it again:
//!
//! `base64(salt):base64(nonce):base64(ciphertext):base64(tag)[:1]`
//!
//! Key derivation is PBKDF2-HMAC-SHA512 with 65535 iterations and a 32 byte
//! salt, encryption is AES-256-GCM. These parameters are part of the wire
//! format shared with previously encoded images and must not change.

use std::io::{Read, Write};

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, Key, KeyInit, Nonce};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha512;
use zeroize::Zeroize;

pub mod envelope;
pub mod error;

pub use crate::envelope::Envelope;
pub use crate::error::CryptError;

pub(crate) const SALT_LEN: usize = 32;
pub(crate) const NONCE_LEN: usize = 12;
pub(crate) const TAG_LEN: usize = 16;
const KEY_LEN: usize = 32;
const PBKDF2_ROUNDS: u32 = 65535;

pub type Result<T> = std::result::Result<T, CryptError>;

/// Encrypt a message with a password into an envelope string.
///
/// When `compress` is set the plaintext is gzipped before encryption. The
/// compression outcome is never checked against a size threshold, small or
/// incompressible inputs may well expand.
pub fn seal(message: &str, password: &str, compress: bool) -> Result<String> {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    let mut key = derive_key(password.as_bytes(), &salt);

    let plaintext = if compress {
        gzip(message.as_bytes())?
    } else {
        message.as_bytes().to_vec()
    };

    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));
    let mut sealed = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext.as_slice())
        .map_err(CryptError::Encryption)?;
    key.zeroize();

    // AEAD output is ciphertext || tag, the envelope keeps them as separate fields
    let tag = sealed.split_off(sealed.len() - TAG_LEN);

    Ok(Envelope {
        salt: salt.to_vec(),
        nonce: nonce.to_vec(),
        ciphertext: sealed,
        tag,
        compressed: compress,
    }
    .to_string())
}

/// Decrypt an envelope string with a password.
///
/// Fails with [`CryptError::Format`] when the envelope does not parse and with
/// [`CryptError::Authentication`] when the tag does not verify. The latter is
/// the only reliable wrong-password signal in the whole pipeline, it must
/// never degrade into garbage output.
pub fn open(envelope: &str, password: &str) -> Result<String> {
    let envelope = Envelope::parse(envelope)?;
    let mut key = derive_key(password.as_bytes(), &envelope.salt);

    let mut sealed = envelope.ciphertext.clone();
    sealed.extend_from_slice(&envelope.tag);

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));
    let plaintext = cipher
        .decrypt(Nonce::from_slice(&envelope.nonce), sealed.as_slice())
        .map_err(|_| CryptError::Authentication)?;
    key.zeroize();

    let plaintext = if envelope.compressed {
        gunzip(&plaintext)?
    } else {
        plaintext
    };

    Ok(String::from_utf8(plaintext)?)
}

fn derive_key(password: &[u8], salt: &[u8]) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha512>(password, salt, PBKDF2_ROUNDS, &mut key);
    key
}

fn gzip(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).map_err(CryptError::Compression)?;
    encoder.finish().map_err(CryptError::Compression)
}

fn gunzip(data: &[u8]) -> Result<Vec<u8>> {
    let mut plain = Vec::new();
    GzDecoder::new(data)
        .read_to_end(&mut plain)
        .map_err(CryptError::Decompression)?;
    Ok(plain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_open_round_trip() {
        let message = "lorem ipsum dolor sit amet, consectetur adipiscing elit";
        let sealed = seal(message, "resistance is futile", false).unwrap();

        assert_ne!(sealed, message);
        assert_eq!(open(&sealed, "resistance is futile").unwrap(), message);
    }

    #[test]
    fn test_seal_open_round_trip_with_compression() {
        let message = "a".repeat(2048);
        let sealed = seal(&message, "pw", true).unwrap();

        assert!(sealed.ends_with(":1"));
        assert_eq!(open(&sealed, "pw").unwrap(), message);
    }

    #[test]
    fn test_compression_is_applied_even_when_it_expands() {
        // a 3 byte message cannot shrink under gzip, yet the flag wins
        let sealed = seal("abc", "pw", true).unwrap();
        assert!(sealed.ends_with(":1"));
        assert_eq!(open(&sealed, "pw").unwrap(), "abc");
    }

    #[test]
    fn test_uncompressed_envelope_has_four_segments() {
        let sealed = seal("hello", "pw", false).unwrap();
        assert_eq!(sealed.split(':').count(), 4);
    }

    #[test]
    fn test_wrong_password_is_an_authentication_failure() {
        let sealed = seal("hello", "correct horse", false).unwrap();
        assert!(matches!(
            open(&sealed, "battery staple"),
            Err(CryptError::Authentication)
        ));
    }

    #[test]
    fn test_tampered_ciphertext_is_an_authentication_failure() {
        let sealed = seal("hello hello hello", "pw", false).unwrap();
        let mut segments: Vec<String> = sealed.split(':').map(String::from).collect();
        // flip the ciphertext segment into different but valid base64
        segments[2] = segments[2].replacen(
            segments[2].chars().next().unwrap(),
            if segments[2].starts_with('A') { "B" } else { "A" },
            1,
        );
        let tampered = segments.join(":");
        assert!(matches!(
            open(&tampered, "pw"),
            Err(CryptError::Authentication)
        ));
    }

    #[test]
    fn test_garbage_fails_with_format_error() {
        assert!(matches!(
            open("not an envelope at all", "pw"),
            Err(CryptError::Format)
        ));
    }

    #[test]
    fn test_salts_and_nonces_are_fresh_per_seal() {
        let a = seal("same message", "same password", false).unwrap();
        let b = seal("same message", "same password", false).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_unicode_round_trip() {
        let message = "grüße aus münchen — 你好世界 🦀";
        let sealed = seal(message, "pw", false).unwrap();
        assert_eq!(open(&sealed, "pw").unwrap(), message);
    }
}
