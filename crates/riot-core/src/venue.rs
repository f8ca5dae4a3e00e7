//! Venue table and riot scenarios.
//!
//! A mission selects one riot cause; its venue fixes the world width,
//! spawn x and horizontal boundaries for the whole mission.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Horizontal limits for walking and driving.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boundaries {
    pub left: f64,
    pub right: f64,
}

/// Geometry of one venue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VenueConfig {
    pub world_width: f64,
    /// Player and transport start x.
    pub start_x: f64,
    pub boundaries: Boundaries,
}

/// Why a riot broke out, and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiotCause {
    pub title: String,
    pub description: String,
    /// Key into the venue table.
    pub venue: String,
}

/// Errors raised while loading or validating mission configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed mission config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("riot cause '{title}' references unknown venue '{venue}'")]
    UnknownVenue { title: String, venue: String },

    #[error("venue '{name}' has invalid boundaries: left {left} >= right {right}")]
    InvalidBoundaries { name: String, left: f64, right: f64 },

    #[error("venue '{name}' has non-positive world width {width}")]
    InvalidWorldWidth { name: String, width: f64 },

    #[error("venue '{name}' start x {start_x} lies outside its boundaries")]
    StartOutOfBounds { name: String, start_x: f64 },

    #[error("mission config has no riot causes")]
    NoCauses,

    #[error("riot cause index {index} out of range ({count} causes)")]
    UnknownCause { index: usize, count: usize },
}

/// Venues plus the riot causes that can be drawn for a mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionConfig {
    pub venues: BTreeMap<String, VenueConfig>,
    pub causes: Vec<RiotCause>,
}

impl Default for MissionConfig {
    fn default() -> Self {
        let mut venues = BTreeMap::new();
        venues.insert(
            "Downtown Business District".to_string(),
            VenueConfig {
                world_width: 4000.0,
                start_x: 100.0,
                boundaries: Boundaries {
                    left: 0.0,
                    right: 4000.0,
                },
            },
        );
        venues.insert(
            "City Stadium Area".to_string(),
            VenueConfig {
                world_width: 3500.0,
                start_x: 200.0,
                boundaries: Boundaries {
                    left: 200.0,
                    right: 3300.0,
                },
            },
        );
        venues.insert(
            "City Hall Plaza".to_string(),
            VenueConfig {
                world_width: 3000.0,
                start_x: 150.0,
                boundaries: Boundaries {
                    left: 150.0,
                    right: 2850.0,
                },
            },
        );

        let causes = vec![
            RiotCause {
                title: "Civil Unrest in Downtown".to_string(),
                description: "Peaceful protest turned violent after provocateurs infiltrated \
                              the crowd. Protect local businesses and maintain order."
                    .to_string(),
                venue: "Downtown Business District".to_string(),
            },
            RiotCause {
                title: "Sports Riot".to_string(),
                description: "Championship game aftermath has turned destructive. Contain the \
                              situation and prevent damage to the stadium."
                    .to_string(),
                venue: "City Stadium Area".to_string(),
            },
            RiotCause {
                title: "Political Demonstration".to_string(),
                description: "Opposing groups have clashed during a political rally. Separate \
                              the groups and prevent escalation."
                    .to_string(),
                venue: "City Hall Plaza".to_string(),
            },
        ];

        Self { venues, causes }
    }
}

impl MissionConfig {
    /// Parse and validate a JSON mission config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MissionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check venue geometry and that every cause points at a known venue.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.causes.is_empty() {
            return Err(ConfigError::NoCauses);
        }
        for (name, venue) in &self.venues {
            if venue.world_width <= 0.0 {
                return Err(ConfigError::InvalidWorldWidth {
                    name: name.clone(),
                    width: venue.world_width,
                });
            }
            let Boundaries { left, right } = venue.boundaries;
            if left >= right {
                return Err(ConfigError::InvalidBoundaries {
                    name: name.clone(),
                    left,
                    right,
                });
            }
            if venue.start_x < left || venue.start_x > right {
                return Err(ConfigError::StartOutOfBounds {
                    name: name.clone(),
                    start_x: venue.start_x,
                });
            }
        }
        for cause in &self.causes {
            if !self.venues.contains_key(&cause.venue) {
                return Err(ConfigError::UnknownVenue {
                    title: cause.title.clone(),
                    venue: cause.venue.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn venue(&self, name: &str) -> Option<&VenueConfig> {
        self.venues.get(name)
    }
}
