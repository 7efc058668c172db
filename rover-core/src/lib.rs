// SPDX-License-Identifier: MIT
//
// Mars Rover Photo Picker
// Copyright (c) 2025 Mars Rover Photo Picker Contributors

//! Rover Core Library
//!
//! Picks a random Mars rover, queries the NASA Mars Rover Photos API for a random day of
//! that rover's mission and returns one random photo.
//!
//! # Architecture
//!
//! The library is organized into modules representing core concerns:
//! - `rover`: Rover catalogue with sol ranges and date windows
//! - `query`: Earth-date and sol query construction
//! - `photos`: Response payload decoding and random photo choice
//! - `fetcher`: HTTPS client behind the `PhotoSource` trait
//! - `selector`: Selection flow with the sol fallback policy
//! - `config`: Configuration from `MARS_*` environment variables
//! - `report`: stdout/stderr reporting and exit status
//! - `error`: Unified error types

pub mod config;
pub mod error;
pub mod fetcher;
pub mod photos;
pub mod query;
pub mod report;
pub mod rover;
pub mod selector;

pub use error::{Error, ErrorKind, Result};
pub use rover::Rover;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Public endpoint of the photos API
pub const DEFAULT_API_BASE_URL: &str = "https://api.nasa.gov/mars-photos/api/v1";

/// Days behind today that Curiosity is queried at
pub const DEFAULT_CURIOSITY_LAG_DAYS: u32 = 15;

/// Sol queries after an empty earth-date result
pub const DEFAULT_SOL_RETRIES: u32 = 2;
