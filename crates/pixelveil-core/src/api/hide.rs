use std::path::{Path, PathBuf};

use crate::commands;
use crate::pipeline::{CapacityReport, HideOptions};
use crate::{Result, StegError};

pub fn prepare() -> HideApi {
    HideApi::default()
}

#[derive(Debug)]
pub struct HideApi {
    message: Option<String>,
    image: Option<PathBuf>,
    output: Option<PathBuf>,
    password: Option<String>,
    compress: bool,
    obfuscate: bool,
}

impl Default for HideApi {
    fn default() -> Self {
        Self {
            message: None,
            image: None,
            output: None,
            password: None,
            compress: false,
            obfuscate: true,
        }
    }
}

impl HideApi {
    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    pub fn with_image<A: AsRef<Path>>(mut self, image: A) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    /// Set the password used to encrypt the message and seed the scrambling
    pub fn with_password(mut self, password: &str) -> Self {
        self.password = Some(password.to_string());
        self
    }

    /// Compress the message before encryption
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Leave unused pixels untouched instead of filling them with noise
    pub fn without_obfuscation(mut self) -> Self {
        self.obfuscate = false;
        self
    }

    pub fn execute(self) -> Result<CapacityReport> {
        let Some(message) = self.message else {
            return Err(StegError::MissingMessage);
        };
        let Some(password) = self.password else {
            return Err(StegError::MissingPassword);
        };
        let Some(image) = self.image else {
            return Err(StegError::CarrierNotSet);
        };
        let Some(output) = self.output else {
            return Err(StegError::TargetNotSet);
        };

        commands::hide_file(
            &image,
            &output,
            &message,
            &password,
            HideOptions {
                compress: self.compress,
                obfuscate: self.obfuscate,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refuses_to_run_without_a_message() {
        let result = prepare()
            .with_image("in.png")
            .with_output("out.png")
            .with_password("pw")
            .execute();
        assert!(matches!(result, Err(StegError::MissingMessage)));
    }

    #[test]
    fn refuses_to_run_without_a_password() {
        let result = prepare()
            .with_message("hello")
            .with_image("in.png")
            .with_output("out.png")
            .execute();
        assert!(matches!(result, Err(StegError::MissingPassword)));
    }

    #[test]
    fn refuses_to_run_without_carrier_or_target() {
        let result = prepare().with_message("hello").with_password("pw").execute();
        assert!(matches!(result, Err(StegError::CarrierNotSet)));

        let result = prepare()
            .with_message("hello")
            .with_password("pw")
            .with_image("in.png")
            .execute();
        assert!(matches!(result, Err(StegError::TargetNotSet)));
    }
}
