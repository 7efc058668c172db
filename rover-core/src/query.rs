//! Query construction for the photos endpoint

use crate::rover::{DateWindow, Rover};
use chrono::{Duration, NaiveDate};
use rand::Rng;

/// Onboard cameras the service accepts in the `camera` filter
pub const CAMERAS: [&str; 9] = [
    "FHAZ", "RHAZ", "MAST", "CHEMCAM", "MAHLI", "MARDI", "NAVCAM", "PANCAM", "MINITES",
];

/// Index photos are looked up by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKey {
    EarthDate(NaiveDate),
    Sol(u32),
}

/// One request against the photos endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub key: QueryKey,
    pub camera: Option<String>,
}

impl Query {
    pub fn earth_date(date: NaiveDate) -> Self {
        Self {
            key: QueryKey::EarthDate(date),
            camera: None,
        }
    }

    pub fn sol(sol: u32) -> Self {
        Self {
            key: QueryKey::Sol(sol),
            camera: None,
        }
    }

    pub fn with_camera(mut self, camera: Option<&str>) -> Self {
        self.camera = camera.map(|c| c.to_ascii_lowercase());
        self
    }

    /// Query-string pairs, API key last
    pub fn to_pairs(&self, api_key: &str) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        match self.key {
            QueryKey::EarthDate(date) => {
                pairs.push(("earth_date", date.format("%Y-%m-%d").to_string()))
            }
            QueryKey::Sol(sol) => pairs.push(("sol", sol.to_string())),
        }
        if let Some(camera) = &self.camera {
            pairs.push(("camera", camera.clone()));
        }
        pairs.push(("api_key", api_key.to_string()));
        pairs
    }
}

/// Build the first, earth-date based query for a rover
///
/// Curiosity is queried `curiosity_lag_days` behind `today`, never earlier than its landing
/// date; the retired rovers get a uniformly random date inside their window.
pub fn primary_query<R: Rng + ?Sized>(
    rover: Rover,
    today: NaiveDate,
    curiosity_lag_days: u32,
    rng: &mut R,
) -> Query {
    match rover.date_window() {
        Some(window) => Query::earth_date(random_date(window, rng)),
        None => {
            let landed = rover.operational_window(today).start;
            let date = today
                .checked_sub_signed(Duration::days(i64::from(curiosity_lag_days)))
                .map_or(landed, |date| date.max(landed));
            Query::earth_date(date)
        }
    }
}

/// Build a sol query with a fresh random sol, or `None` for rovers without sol support
pub fn sol_query<R: Rng + ?Sized>(rover: Rover, rng: &mut R) -> Option<Query> {
    random_sol(rover, rng).map(Query::sol)
}

/// Uniform date in `window`, drawn as a whole-second offset from the start and truncated
pub fn random_date<R: Rng + ?Sized>(window: DateWindow, rng: &mut R) -> NaiveDate {
    let start = window.start.and_time(chrono::NaiveTime::MIN);
    let end = window.end.and_time(chrono::NaiveTime::MIN);
    let span = (end - start).num_seconds().max(0);
    let offset = rng.gen_range(0..=span);
    (start + Duration::seconds(offset)).date()
}

/// Uniform sol in `[1, max_sol]`
pub fn random_sol<R: Rng + ?Sized>(rover: Rover, rng: &mut R) -> Option<u32> {
    rover.max_sol().map(|max| rng.gen_range(1..=max))
}
