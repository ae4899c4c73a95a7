//! Mock preference data for newly created profiles.
//!
//! A user id seen for the first time gets a profile filled from these fixed
//! pools, standing in for real preference input.

use rand::Rng;
use rand::seq::SliceRandom;

use super::model::{ExpertiseLevel, UserProfile};

const NAMES: &[&str] = &[
    "Alex", "Sam", "Jordan", "Taylor", "Casey", "Morgan", "Riley", "Quinn",
];

const CITIES: &[&str] = &[
    "San Francisco",
    "New York",
    "London",
    "Tokyo",
    "Berlin",
    "Sydney",
    "Toronto",
    "Paris",
];

const INTERESTS: &[&str] = &[
    "artificial intelligence",
    "machine learning",
    "data science",
    "web development",
    "mobile apps",
    "cybersecurity",
    "blockchain",
    "cloud computing",
    "IoT",
    "robotics",
    "quantum computing",
    "biotechnology",
    "renewable energy",
    "space exploration",
    "music",
    "photography",
    "cooking",
    "travel",
    "fitness",
    "reading",
];

const PROFESSIONS: &[&str] = &[
    "software engineer",
    "data scientist",
    "product manager",
    "designer",
    "researcher",
    "consultant",
    "entrepreneur",
    "student",
    "teacher",
    "analyst",
];

const PREFERRED_TOPICS: &[&str] = &[
    "AI and machine learning",
    "web development",
    "data analysis",
    "cybersecurity",
    "cloud computing",
    "mobile development",
    "DevOps",
];

const EXPERTISE_LEVELS: &[ExpertiseLevel] = &[
    ExpertiseLevel::Beginner,
    ExpertiseLevel::Intermediate,
    ExpertiseLevel::Expert,
];

/// Creates a profile for an unseen user id, filled with mock preferences.
///
/// The result always has a non-empty name, city, and profession, 2-4
/// interests, 1-3 preferred topics, and `interaction_count == 0`.
pub fn mock_profile(user_id: impl Into<String>) -> UserProfile {
    let mut profile = UserProfile::new(user_id);
    populate_mock_data(&mut profile);
    profile
}

/// Fills the preference fields of `profile` from the mock pools.
pub fn populate_mock_data(profile: &mut UserProfile) {
    let mut rng = rand::thread_rng();

    profile.name = pick(&mut rng, NAMES);
    profile.city = pick(&mut rng, CITIES);
    profile.profession = pick(&mut rng, PROFESSIONS);

    let interest_count = rng.gen_range(2..=4);
    profile.interests = sample(&mut rng, INTERESTS, interest_count);

    let topic_count = rng.gen_range(1..=3);
    profile.preferred_topics = sample(&mut rng, PREFERRED_TOPICS, topic_count);

    profile.expertise_level = EXPERTISE_LEVELS
        .choose(&mut rng)
        .copied()
        .unwrap_or_default();
}

fn pick(rng: &mut impl Rng, pool: &[&str]) -> String {
    // Pools are non-empty constants
    pool.choose(rng).map(|s| s.to_string()).unwrap_or_default()
}

fn sample(rng: &mut impl Rng, pool: &[&str], count: usize) -> Vec<String> {
    pool.choose_multiple(rng, count)
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_profile_has_all_fields_populated() {
        let profile = mock_profile("new-user");
        assert_eq!(profile.user_id, "new-user");
        assert!(!profile.name.is_empty());
        assert!(!profile.city.is_empty());
        assert!(!profile.profession.is_empty());
        assert!((2..=4).contains(&profile.interests.len()));
        assert!((1..=3).contains(&profile.preferred_topics.len()));
        assert_eq!(profile.interaction_count, 0);
    }

    #[test]
    fn test_mock_values_come_from_pools() {
        let profile = mock_profile("u1");
        assert!(NAMES.contains(&profile.name.as_str()));
        assert!(CITIES.contains(&profile.city.as_str()));
        assert!(PROFESSIONS.contains(&profile.profession.as_str()));
        for interest in &profile.interests {
            assert!(INTERESTS.contains(&interest.as_str()));
        }
        for topic in &profile.preferred_topics {
            assert!(PREFERRED_TOPICS.contains(&topic.as_str()));
        }
    }

    #[test]
    fn test_sampled_lists_have_no_duplicates() {
        for _ in 0..20 {
            let profile = mock_profile("u1");
            let mut interests = profile.interests.clone();
            interests.sort();
            interests.dedup();
            assert_eq!(interests.len(), profile.interests.len());
        }
    }
}
