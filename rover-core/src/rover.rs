//! Rover catalogue: names, sol ranges and operational date windows

use crate::{Error, Result};
use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mars rovers the photo service knows about
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Rover {
    Curiosity,
    Opportunity,
    Spirit,
}

/// Inclusive range of earth dates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl Rover {
    pub const ALL: [Rover; 3] = [Rover::Curiosity, Rover::Opportunity, Rover::Spirit];

    /// Pick a rover uniformly at random
    pub fn choose<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Lower-case name, also used as the URL path segment
    pub fn as_str(&self) -> &'static str {
        match self {
            Rover::Curiosity => "curiosity",
            Rover::Opportunity => "opportunity",
            Rover::Spirit => "spirit",
        }
    }

    /// Human-readable name for messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Rover::Curiosity => "Curiosity",
            Rover::Opportunity => "Opportunity",
            Rover::Spirit => "Spirit",
        }
    }

    /// Highest sol the service holds photos for, if this rover supports sol queries
    pub fn max_sol(&self) -> Option<u32> {
        match self {
            Rover::Curiosity => None,
            Rover::Opportunity => Some(5108),
            Rover::Spirit => Some(2208),
        }
    }

    /// Window random earth dates are drawn from
    ///
    /// Curiosity is still active and is queried at a fixed lag behind today instead.
    pub fn date_window(&self) -> Option<DateWindow> {
        match self {
            Rover::Curiosity => None,
            Rover::Opportunity => Some(DateWindow {
                start: ymd(2013, 12, 29),
                end: ymd(2015, 12, 28),
            }),
            Rover::Spirit => Some(DateWindow {
                start: ymd(2004, 6, 2),
                end: ymd(2010, 3, 21),
            }),
        }
    }

    /// Full operational window as of `today`
    pub fn operational_window(&self, today: NaiveDate) -> DateWindow {
        match self.date_window() {
            Some(window) => window,
            None => DateWindow {
                start: ymd(2012, 8, 6),
                end: today,
            },
        }
    }

    /// Whether an empty earth-date result falls back to random sols
    pub fn has_sol_fallback(&self) -> bool {
        self.max_sol().is_some()
    }
}

// Only called with literal calendar dates above
fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

impl fmt::Display for Rover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rover {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "curiosity" => Ok(Rover::Curiosity),
            "opportunity" => Ok(Rover::Opportunity),
            "spirit" => Ok(Rover::Spirit),
            other => Err(Error::Config(format!(
                "Unknown rover '{}'. Expected one of: curiosity, opportunity, spirit",
                other
            ))),
        }
    }
}
