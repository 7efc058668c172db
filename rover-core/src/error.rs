// SPDX-License-Identifier: MIT
//
// Mars Rover Photo Picker
// Copyright (c) 2025 Mars Rover Photo Picker Contributors

//! Error types for the photo picker
//!
//! Every failure a run can end with is classified into one of a small set of kinds
//! so the binary can report it uniformly.

use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for photo selection
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport-level failure: timeout, refused connection, broken body
    #[error("{0}")]
    Network(String),

    /// Service-level failure: bad status, malformed payload, explicit error field
    #[error("{0}")]
    Api(String),

    /// Well-formed but empty result after every fallback was exhausted
    #[error("{0}")]
    NoPhotos(String),

    /// Configuration validation failed
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Classification reported alongside the message on failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NetworkFailure,
    ApiFailure,
    NoPhotosFound,
    ConfigError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::NetworkFailure => "NetworkFailure",
            ErrorKind::ApiFailure => "ApiFailure",
            ErrorKind::NoPhotosFound => "NoPhotosFound",
            ErrorKind::ConfigError => "ConfigError",
        };
        f.write_str(name)
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Network(_) => ErrorKind::NetworkFailure,
            Error::Api(_) => ErrorKind::ApiFailure,
            Error::NoPhotos(_) => ErrorKind::NoPhotosFound,
            Error::Config(_) => ErrorKind::ConfigError,
        }
    }
}

// Payload decoding failures are the service's fault, not the transport's
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Api(format!("Invalid JSON response: {}", e))
    }
}
