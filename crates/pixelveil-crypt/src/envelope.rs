//! The colon-delimited envelope carried inside the image:
//! `base64(salt):base64(nonce):base64(ciphertext):base64(tag)[:1]`
//!
//! The trailing `:1` marks a gzip-compressed plaintext. Envelopes written by
//! older versions have exactly 4 segments, which must keep decoding as
//! uncompressed.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::CryptError;
use crate::{NONCE_LEN, SALT_LEN, TAG_LEN};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub salt: Vec<u8>,
    pub nonce: Vec<u8>,
    pub ciphertext: Vec<u8>,
    pub tag: Vec<u8>,
    pub compressed: bool,
}

impl Envelope {
    pub fn parse(envelope: &str) -> Result<Self, CryptError> {
        let segments: Vec<&str> = envelope.split(':').collect();
        if segments.len() < 4 || segments.len() > 5 {
            return Err(CryptError::Format);
        }
        if segments.iter().take(4).any(|s| s.is_empty()) {
            return Err(CryptError::Format);
        }

        let salt = BASE64.decode(segments[0]).map_err(|_| CryptError::Format)?;
        let nonce = BASE64.decode(segments[1]).map_err(|_| CryptError::Format)?;
        let ciphertext = BASE64.decode(segments[2]).map_err(|_| CryptError::Format)?;
        let tag = BASE64.decode(segments[3]).map_err(|_| CryptError::Format)?;

        if salt.len() != SALT_LEN || nonce.len() != NONCE_LEN || tag.len() != TAG_LEN {
            return Err(CryptError::Format);
        }

        Ok(Self {
            salt,
            nonce,
            ciphertext,
            tag,
            // absent segment means uncompressed, older envelopes lack it entirely
            compressed: segments.len() == 5 && segments[4] == "1",
        })
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            BASE64.encode(&self.salt),
            BASE64.encode(&self.nonce),
            BASE64.encode(&self.ciphertext),
            BASE64.encode(&self.tag),
        )?;
        if self.compressed {
            write!(f, ":1")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine as _;

    fn valid_envelope(compressed: bool) -> Envelope {
        Envelope {
            salt: vec![1; SALT_LEN],
            nonce: vec![2; NONCE_LEN],
            ciphertext: vec![3; 42],
            tag: vec![4; TAG_LEN],
            compressed,
        }
    }

    #[test]
    fn should_round_trip_an_uncompressed_envelope() {
        let env = valid_envelope(false);
        let text = env.to_string();
        assert_eq!(text.split(':').count(), 4);
        assert_eq!(Envelope::parse(&text).unwrap(), env);
    }

    #[test]
    fn should_round_trip_a_compressed_envelope() {
        let env = valid_envelope(true);
        let text = env.to_string();
        assert!(text.ends_with(":1"));
        assert_eq!(text.split(':').count(), 5);
        assert_eq!(Envelope::parse(&text).unwrap(), env);
    }

    #[test]
    fn should_treat_an_unknown_fifth_segment_as_uncompressed() {
        let mut text = valid_envelope(false).to_string();
        text.push_str(":0");
        let env = Envelope::parse(&text).unwrap();
        assert!(!env.compressed);
    }

    #[test]
    fn should_reject_wrong_segment_counts() {
        assert!(matches!(
            Envelope::parse("a:b:c"),
            Err(CryptError::Format)
        ));
        let mut text = valid_envelope(true).to_string();
        text.push_str(":x");
        assert!(matches!(Envelope::parse(&text), Err(CryptError::Format)));
    }

    #[test]
    fn should_reject_empty_segments() {
        let text = valid_envelope(false).to_string();
        let broken = text.replacen(&BASE64.encode(vec![2; NONCE_LEN]), "", 1);
        assert!(matches!(Envelope::parse(&broken), Err(CryptError::Format)));
    }

    #[test]
    fn should_reject_invalid_base64() {
        assert!(matches!(
            Envelope::parse("!!!:b64:b64:b64"),
            Err(CryptError::Format)
        ));
    }

    #[test]
    fn should_reject_bogus_field_lengths() {
        let env = Envelope {
            salt: vec![1; 16], // too short
            ..valid_envelope(false)
        };
        assert!(matches!(
            Envelope::parse(&env.to_string()),
            Err(CryptError::Format)
        ));
    }
}
