// SPDX-License-Identifier: MIT
//
// Mars Rover Photo Picker
// Copyright (c) 2025 Mars Rover Photo Picker Contributors

//! Response payload of the photos endpoint
//!
//! The service answers with a JSON object whose keys group photo records, normally a
//! single `photos` key. An `error` key at the top level signals a service-side failure
//! even on a 2xx status.

use crate::{Error, Result};
use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Members the service always fills with photo records
const PHOTO_KEYS: [&str; 2] = ["photos", "latest_photos"];

/// Camera metadata attached to a photo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Camera {
    pub name: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

/// A single photo record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Photo {
    /// Image URL
    pub img_src: String,

    #[serde(default)]
    pub id: Option<u64>,

    #[serde(default)]
    pub sol: Option<u32>,

    #[serde(default)]
    pub earth_date: Option<String>,

    #[serde(default)]
    pub camera: Option<Camera>,
}

/// Photos keyed by grouping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoSet {
    groups: BTreeMap<String, Vec<Photo>>,
}

impl PhotoSet {
    pub fn new(groups: BTreeMap<String, Vec<Photo>>) -> Self {
        Self { groups }
    }

    /// Decode a response body
    ///
    /// Non-array members are metadata and are skipped, except a `photos` member that is not
    /// an array. That, a non-object body or an `error` member is an API failure.
    pub fn from_json(body: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        let serde_json::Value::Object(map) = value else {
            return Err(Error::Api(
                "Invalid JSON response: expected an object at the top level".to_string(),
            ));
        };

        if let Some(err) = map.get("error") {
            let message = match err {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Object(obj) => obj
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| err.to_string()),
                other => other.to_string(),
            };
            return Err(Error::Api(format!("API error: {}", message)));
        }

        let mut groups = BTreeMap::new();
        for (key, member) in map {
            if member.is_array() {
                let photos: Vec<Photo> = serde_json::from_value(member)?;
                groups.insert(key, photos);
            } else if PHOTO_KEYS.contains(&key.as_str()) {
                return Err(Error::Api(format!(
                    "Invalid JSON response: `{}` is not an array",
                    key
                )));
            }
        }

        Ok(Self { groups })
    }

    /// Total number of photos across groupings
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.values().all(Vec::is_empty)
    }

    /// Pick a random non-empty grouping, then a random photo inside it
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Photo> {
        self.groups
            .values()
            .filter(|photos| !photos.is_empty())
            .choose(rng)
            .and_then(|photos| photos.choose(rng))
    }
}
