use std::path::{Path, PathBuf};

use crate::commands;
use crate::{Result, StegError};

pub fn prepare() -> RevealApi {
    RevealApi::default()
}

#[derive(Default, Debug)]
pub struct RevealApi {
    secret_image: Option<PathBuf>,
    password: Option<String>,
}

impl RevealApi {
    /// The image that contains the hidden message
    pub fn with_secret_image(mut self, secret_image: impl AsRef<Path>) -> Self {
        self.secret_image = Some(secret_image.as_ref().to_path_buf());
        self
    }

    pub fn with_password(mut self, password: &str) -> Self {
        self.password = Some(password.to_string());
        self
    }

    pub fn execute(self) -> Result<String> {
        let Some(secret_image) = self.secret_image else {
            return Err(StegError::CarrierNotSet);
        };
        let Some(password) = self.password else {
            return Err(StegError::MissingPassword);
        };

        commands::reveal_file(&secret_image, &password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refuses_to_run_without_an_image() {
        let result = prepare().with_password("pw").execute();
        assert!(matches!(result, Err(StegError::CarrierNotSet)));
    }

    #[test]
    fn refuses_to_run_without_a_password() {
        let result = prepare().with_secret_image("secret.png").execute();
        assert!(matches!(result, Err(StegError::MissingPassword)));
    }
}
