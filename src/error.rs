//! Error types for the core library.
//!
//! The bridges in [`crate::ffi`] and `crate::jni` work in `anyhow::Result`
//! and convert these into envelopes, status codes or Java exceptions.

use thiserror::Error;

/// Errors surfaced by the core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Input text could not be decoded.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Configuration could not be parsed or holds an unusable value.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A different configuration is already installed for this process.
    #[error("already initialized with a different config")]
    AlreadyInitialized,

    /// Output buffer shorter than the input.
    #[error("output buffer holds {output} elements, input has {input}")]
    BufferTooSmall { input: usize, output: usize },
}

impl From<std::str::Utf8Error> for Error {
    fn from(e: std::str::Utf8Error) -> Self {
        Error::Encoding(e.to_string())
    }
}

impl Error {
    /// Stable short code used in C ABI error envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Encoding(_) => "ENCODING",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::AlreadyInitialized => "ALREADY_INITIALIZED",
            Error::BufferTooSmall { .. } => "BUFFER_TOO_SMALL",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
