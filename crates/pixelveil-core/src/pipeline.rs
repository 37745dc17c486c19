//! Orchestration: envelope encryption composed with scrambled LSB embedding.

use std::fmt;

use crate::bits::{bits_to_text, text_to_bits};
use crate::media::image::{embed, extract, PixelBuffer, WritePlan};
use crate::permute::descramble;
use crate::result::Result;

/// Appended to the user password before deriving the scramble key.
///
/// Not secret-critical: it only decouples the permutation seed from the raw
/// password. The value is fixed for compatibility with previously encoded
/// images.
pub const SCRAMBLE_SUFFIX: &str = "S3cReTK3Y";

#[derive(Debug, Clone, Copy)]
pub struct HideOptions {
    /// gzip the message before encryption
    pub compress: bool,
    /// fill unused capacity with random bits for statistical camouflage
    pub obfuscate: bool,
}

impl Default for HideOptions {
    fn default() -> Self {
        Self {
            compress: false,
            obfuscate: true,
        }
    }
}

/// How much of the image's capacity a hide operation used, computed before
/// any pixel is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityReport {
    pub total_bits: usize,
    pub used_bits: usize,
}

impl CapacityReport {
    pub fn utilization(&self) -> f64 {
        if self.total_bits == 0 {
            return 0.0;
        }
        self.used_bits as f64 / self.total_bits as f64 * 100.0
    }
}

impl fmt::Display for CapacityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} bits used ({:.2}%)",
            self.used_bits,
            self.total_bits,
            self.utilization()
        )
    }
}

/// Hide and reveal messages in pixel buffers.
///
/// Stateless across calls; the only configuration is the scramble suffix,
/// which defaults to the compatibility constant and is explicit here so that
/// tests and future formats can vary it.
#[derive(Debug, Clone)]
pub struct Pipeline {
    scramble_suffix: String,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            scramble_suffix: SCRAMBLE_SUFFIX.to_string(),
        }
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scramble_suffix<S: Into<String>>(suffix: S) -> Self {
        Self {
            scramble_suffix: suffix.into(),
        }
    }

    fn scramble_key(&self, password: &str) -> String {
        format!("{password}{}", self.scramble_suffix)
    }

    /// Seal the message into an envelope and embed it into the buffer.
    ///
    /// Fails before any mutation when the envelope does not fit the image.
    pub fn hide(
        &self,
        buffer: &mut PixelBuffer,
        message: &str,
        password: &str,
        options: HideOptions,
    ) -> Result<CapacityReport> {
        let envelope = pixelveil_crypt::seal(message, password, options.compress)?;
        let bits = text_to_bits(&envelope, 1);

        let report = CapacityReport {
            total_bits: buffer.capacity_bits(),
            used_bits: bits.len(),
        };

        let plan = WritePlan::prepare(
            &bits,
            &self.scramble_key(password),
            report.total_bits,
            options.obfuscate,
        )?;
        embed(buffer, &plan);

        Ok(report)
    }

    /// Extract, descramble and open the message hidden in the buffer.
    ///
    /// The descramble runs over the entire capacity; the bit codec's end
    /// marker finds where the real message stops. A wrong password surfaces
    /// here as [`CryptError::Authentication`], never as garbage text.
    ///
    /// [`CryptError::Authentication`]: pixelveil_crypt::CryptError::Authentication
    pub fn reveal(&self, buffer: &PixelBuffer, password: &str) -> Result<String> {
        let raw = extract(buffer);
        let descrambled = descramble(&raw, &self.scramble_key(password));
        let envelope = bits_to_text(&descrambled, 1);

        Ok(pixelveil_crypt::open(&envelope, password)?)
    }

    /// Size the bit sequence a message would occupy, for pre-flight checks.
    ///
    /// Compression and encryption overhead are not predictable from the
    /// plaintext length, so this runs a real seal with a throwaway password.
    pub fn estimate_used_bits(&self, message: &str, compress: bool) -> Result<usize> {
        let envelope = pixelveil_crypt::seal(message, "estimate", compress)?;
        Ok(text_to_bits(&envelope, 1).len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::prepare_linear_buffer;

    #[test]
    fn report_formats_utilization_with_two_decimals() {
        let report = CapacityReport {
            total_bits: 30_000,
            used_bits: 1234,
        };
        assert_eq!(report.to_string(), "1234 of 30000 bits used (4.11%)");
    }

    #[test]
    fn estimate_matches_a_real_hide() {
        let pipeline = Pipeline::new();
        let message = "Hello, World!";

        let estimated = pipeline.estimate_used_bits(message, false).unwrap();

        let mut buffer = prepare_linear_buffer(100, 100);
        let report = pipeline
            .hide(&mut buffer, message, "pw", HideOptions::default())
            .unwrap();

        assert_eq!(estimated, report.used_bits);
    }

    #[test]
    fn a_different_scramble_suffix_changes_the_embedding() {
        let message = "same message";
        let password = "same password";

        let mut a = prepare_linear_buffer(50, 50);
        Pipeline::with_scramble_suffix("suffix-a")
            .hide(&mut a, message, password, HideOptions::default())
            .unwrap();

        // the other pipeline cannot open what the first one hid
        let result = Pipeline::with_scramble_suffix("suffix-b").reveal(&a, password);
        assert!(result.is_err());
    }
}
