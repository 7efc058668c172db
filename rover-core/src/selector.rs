//! Photo selection with the sol fallback policy
//!
//! A run issues the primary earth-date query first. For rovers with a known sol range an
//! empty result triggers up to `sol_retries` further queries, each with a freshly drawn
//! sol. Transport and API failures end the run immediately; only empty results fall back.

use crate::{
    fetcher::PhotoSource,
    photos::Photo,
    query::{self, Query, QueryKey},
    rover::Rover,
    Error, Result,
};
use chrono::NaiveDate;
use rand::Rng;
use tracing::{debug, info};

/// Tunables for a selection run
#[derive(Debug, Clone)]
pub struct SelectionSettings {
    /// Days behind today that Curiosity is queried at
    pub curiosity_lag_days: u32,
    /// Sol queries attempted after an empty earth-date result
    pub sol_retries: u32,
    /// Optional camera filter applied to every query
    pub camera: Option<String>,
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            curiosity_lag_days: crate::DEFAULT_CURIOSITY_LAG_DAYS,
            sol_retries: crate::DEFAULT_SOL_RETRIES,
            camera: None,
        }
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct Selection {
    pub rover: Rover,
    /// Query that produced the photo
    pub query: Query,
    pub photo: Photo,
    /// Requests issued, including the successful one
    pub attempts: u32,
}

/// Picks one photo for one rover; built once per run
pub struct PhotoSelector<S, R> {
    source: S,
    rng: R,
    rover: Rover,
    settings: SelectionSettings,
}

impl<S: PhotoSource, R: Rng> PhotoSelector<S, R> {
    /// Create a selector with a randomly chosen rover
    pub fn new(source: S, mut rng: R, settings: SelectionSettings) -> Self {
        let rover = Rover::choose(&mut rng);
        Self::with_rover(source, rng, rover, settings)
    }

    /// Create a selector for a fixed rover
    pub fn with_rover(source: S, rng: R, rover: Rover, settings: SelectionSettings) -> Self {
        Self {
            source,
            rng,
            rover,
            settings,
        }
    }

    pub fn rover(&self) -> Rover {
        self.rover
    }

    /// Run the full selection flow once
    pub async fn run(&mut self, today: NaiveDate) -> Result<Selection> {
        let camera = self.settings.camera.clone();
        let primary = query::primary_query(
            self.rover,
            today,
            self.settings.curiosity_lag_days,
            &mut self.rng,
        )
        .with_camera(camera.as_deref());

        info!(rover = %self.rover, query = ?primary.key, "Querying photos");
        let mut attempts = 1;
        if let Some(selection) = self.attempt(primary.clone(), attempts).await? {
            return Ok(selection);
        }

        if !self.rover.has_sol_fallback() {
            return Err(Error::NoPhotos(format!(
                "No photos found for {} on {}",
                self.rover.display_name(),
                describe(&primary.key)
            )));
        }

        for retry in 1..=self.settings.sol_retries {
            let Some(fallback) = query::sol_query(self.rover, &mut self.rng) else {
                break;
            };
            let fallback = fallback.with_camera(camera.as_deref());
            attempts += 1;

            info!(
                rover = %self.rover,
                query = ?fallback.key,
                retry,
                "Empty result, retrying with a random sol"
            );
            if let Some(selection) = self.attempt(fallback, attempts).await? {
                return Ok(selection);
            }
        }

        Err(Error::NoPhotos(format!(
            "No photos found for {} after {} sol retries",
            self.rover.display_name(),
            self.settings.sol_retries
        )))
    }

    /// Issue one query; `Ok(None)` means the service returned no photos
    async fn attempt(&mut self, query: Query, attempts: u32) -> Result<Option<Selection>> {
        let photos = self.source.fetch(self.rover, &query).await?;
        if photos.is_empty() {
            debug!(query = ?query.key, "No photos for query");
            return Ok(None);
        }

        let photo = photos
            .choose(&mut self.rng)
            .cloned()
            .ok_or_else(|| Error::NoPhotos(format!("No photos found for {}", describe(&query.key))))?;

        Ok(Some(Selection {
            rover: self.rover,
            query,
            photo,
            attempts,
        }))
    }
}

fn describe(key: &QueryKey) -> String {
    match key {
        QueryKey::EarthDate(date) => date.format("%Y-%m-%d").to_string(),
        QueryKey::Sol(sol) => format!("sol {}", sol),
    }
}
