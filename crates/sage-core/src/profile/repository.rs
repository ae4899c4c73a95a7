//! Profile repository trait.
//!
//! Defines the interface for profile persistence operations.

use super::model::UserProfile;
use crate::error::Result;

/// An abstract repository for managing user-profile persistence.
///
/// This trait defines the contract for persisting and retrieving profiles,
/// decoupling the application's core logic from the specific storage
/// mechanism (one JSON file per user in the default implementation).
///
/// # Implementation Notes
///
/// Implementations should handle:
/// - User id validation (ids become file names)
/// - Recovery from malformed stored data
///
/// No concurrent-writer contract is defined; the CLI is single-process and
/// the last writer wins.
#[async_trait::async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Returns the stored profile for `user_id`, creating and persisting a
    /// mock-populated default if none exists (or the stored one is
    /// unreadable).
    async fn get_or_create(&self, user_id: &str) -> Result<UserProfile>;

    /// Returns the stored profile for `user_id`, or `None` if absent.
    /// Never creates.
    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserProfile>>;

    /// Persists the profile, replacing any existing record.
    async fn save(&self, profile: &UserProfile) -> Result<()>;

    /// Sets one field on an existing profile and persists it.
    ///
    /// Fails with a not-found style error if the profile does not exist.
    async fn update_field(&self, user_id: &str, field: &str, value: &str) -> Result<UserProfile>;

    /// Enumerates the ids of all stored profiles, sorted.
    async fn list_ids(&self) -> Result<Vec<String>>;

    /// Removes the stored profile, if any. Not exposed on the CLI surface.
    async fn delete(&self, user_id: &str) -> Result<()>;
}
