//! UserProfile domain model.
//!
//! Represents a user's stated (or mock-generated) preferences used to bias
//! prompt text, plus a small amount of interaction history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::{Result, SageError};

/// Self-reported expertise level, used to tune answer depth.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExpertiseLevel {
    #[default]
    Beginner,
    Intermediate,
    Expert,
}

/// Per-user preference record, persisted as one JSON file per user.
///
/// Mutated in place on each query (interaction history) and via
/// `--update-profile`; never deleted by the normal CLI flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Primary key; also the stem of the profile's file name
    pub user_id: String,
    pub name: String,
    pub city: String,
    pub profession: String,
    #[serde(default)]
    pub expertise_level: ExpertiseLevel,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub preferred_topics: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub interaction_count: u64,
}

impl UserProfile {
    /// Creates an empty profile for the given user id.
    pub fn new(user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.into(),
            name: String::new(),
            city: String::new(),
            profession: String::new(),
            expertise_level: ExpertiseLevel::default(),
            interests: Vec::new(),
            preferred_topics: Vec::new(),
            created_at: now,
            last_updated: now,
            interaction_count: 0,
        }
    }

    /// Sets one field by name, as used by `--update-profile`.
    ///
    /// List-valued fields (`interests`, `preferred_topics`) accept
    /// comma-separated input. `expertise_level` must parse into
    /// [`ExpertiseLevel`]. Unknown field names are a config error.
    /// `last_updated` is refreshed on success.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
        match field {
            "name" => self.name = value.to_string(),
            "city" => self.city = value.to_string(),
            "profession" => self.profession = value.to_string(),
            "expertise_level" => {
                self.expertise_level = value.parse().map_err(|_| {
                    SageError::config(format!(
                        "Invalid expertise level '{value}'. Valid values: beginner, intermediate, expert"
                    ))
                })?;
            }
            "interests" => self.interests = split_list(value),
            "preferred_topics" => self.preferred_topics = split_list(value),
            _ => {
                return Err(SageError::config(format!(
                    "Unknown profile field '{field}'. Valid fields: name, city, profession, \
                     expertise_level, interests, preferred_topics"
                )));
            }
        }
        self.last_updated = Utc::now();
        Ok(())
    }

    /// Records one completed query against this profile.
    pub fn record_interaction(&mut self) {
        self.interaction_count += 1;
        self.last_updated = Utc::now();
    }
}

/// Splits comma-separated list input, trimming whitespace and dropping
/// empty entries.
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Returns `true` if the id is safe to use as a file stem.
///
/// Profile files are named after the user id, so ids are restricted to
/// `[A-Za-z0-9_-]` and must be non-empty.
pub fn is_valid_user_id(user_id: &str) -> bool {
    !user_id.is_empty()
        && user_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
