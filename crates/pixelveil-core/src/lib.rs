//! # Pixelveil Core
//!
//! Hides a password-encrypted text message in the least significant bits of
//! a PNG image's color channels, scrambled across the whole image by a
//! password-derived permutation so the payload has no detectable location.
//!
//! The layers, bottom up:
//!
//! - [`permute`] — deterministic bit-position permutation keyed by the
//!   password (plus a fixed suffix)
//! - [`bits`] — text to terminated, redundant bit sequence and back
//! - [`media::image`] — the [`PixelBuffer`] carrier and the LSB embedder
//! - [`pipeline`] — envelope encryption ([`pixelveil_crypt`]) composed with
//!   the embedder
//! - [`api`] / [`commands`] — fluent builders and path-level helpers
//!
//! # Usage Examples
//!
//! ## Hide a message inside an image
//!
//! ```no_run
//! pixelveil_core::api::hide::prepare()
//!     .with_message("Hello, World!")
//!     .with_password("SuperSecret42")
//!     .with_image("carrier.png")
//!     .with_output("carrier-with-secret.png")
//!     .execute()
//!     .expect("Failed to hide message in image");
//! ```
//!
//! ## Reveal a message from an image
//!
//! ```no_run
//! let message = pixelveil_core::api::reveal::prepare()
//!     .with_secret_image("carrier-with-secret.png")
//!     .with_password("SuperSecret42")
//!     .execute()
//!     .expect("Failed to reveal message from image");
//! ```

#![warn(clippy::redundant_else)]

pub mod api;
pub mod bits;
pub mod commands;
pub mod error;
pub mod media;
pub mod permute;
pub mod pipeline;
pub mod result;

pub use crate::error::StegError;
pub use crate::media::image::{PixelBuffer, WritePlan};
pub use crate::pipeline::{CapacityReport, HideOptions, Pipeline, SCRAMBLE_SUFFIX};
pub use crate::result::Result;
