//! Personalization-instruction builder.
//!
//! Formats a profile into the natural-language prefix injected into the
//! model's system instruction. Pure and deterministic: the same profile
//! always yields the identical string.

use super::model::{ExpertiseLevel, UserProfile};

/// Maximum number of interests mentioned in the prefix.
const MAX_INTERESTS: usize = 3;
/// Maximum number of preferred topics mentioned in the prefix.
const MAX_TOPICS: usize = 2;

/// Builds the personalization prefix for a profile.
///
/// A profile without a name produces an empty string (no personalization).
/// Empty fields are omitted; `beginner` expertise is the baseline and is
/// not mentioned.
pub fn build_instruction(profile: &UserProfile) -> String {
    if profile.name.is_empty() {
        return String::new();
    }

    let mut parts = vec![format!("You're helping {}", profile.name)];

    if !profile.city.is_empty() {
        parts.push(format!("from {}", profile.city));
    }

    if !profile.profession.is_empty() {
        parts.push(format!("who works as a {}", profile.profession));
    }

    if !profile.interests.is_empty() {
        let interests = profile
            .interests
            .iter()
            .take(MAX_INTERESTS)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        parts.push(format!("who likes {interests}"));
    }

    if profile.expertise_level != ExpertiseLevel::Beginner {
        parts.push(format!("with {} expertise", profile.expertise_level));
    }

    if !profile.preferred_topics.is_empty() {
        let topics = profile
            .preferred_topics
            .iter()
            .take(MAX_TOPICS)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        parts.push(format!("and prefers topics like {topics}"));
    }

    format!(
        "{}. Personalize examples and explanations accordingly.",
        parts.join(" ")
    )
}
