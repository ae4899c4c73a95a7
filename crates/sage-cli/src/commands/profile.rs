//! Profile management commands: list, show, update.
//!
//! These operate purely on the local store and need no API keys.

use colored::Colorize;

use sage_core::error::{Result, SageError};
use sage_core::profile::{ProfileRepository, UserProfile};
use sage_infrastructure::JsonDirProfileRepository;

/// Prints the ids of all stored profiles.
pub async fn list_users() -> Result<()> {
    let repository = JsonDirProfileRepository::at_default_location()?;
    let ids = repository.list_ids().await?;

    if ids.is_empty() {
        println!("No user profiles stored yet.");
        return Ok(());
    }

    println!("{}", "Stored user profiles:".bright_blue());
    for id in ids {
        println!("  {id}");
    }
    Ok(())
}

/// Prints one stored profile, erroring if it does not exist.
pub async fn show_profile(user_id: &str) -> Result<()> {
    let repository = JsonDirProfileRepository::at_default_location()?;
    let profile = repository
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| SageError::config(format!("No profile exists for user '{user_id}'")))?;

    println!("{}", format!("Profile '{user_id}':").bright_blue());
    print!("{}", format_profile(&profile));
    Ok(())
}

/// Updates one field of a stored profile and prints the result.
pub async fn update_profile(user_id: &str, field: &str, value: &str) -> Result<()> {
    let repository = JsonDirProfileRepository::at_default_location()?;
    let profile = repository.update_field(user_id, field, value).await?;

    println!(
        "{}",
        format!("Updated {field} for '{user_id}'.").bright_green()
    );
    print!("{}", format_profile(&profile));
    Ok(())
}

/// Renders a profile as aligned plain-text lines.
fn format_profile(profile: &UserProfile) -> String {
    let mut out = String::new();
    let mut line = |label: &str, value: String| {
        out.push_str(&format!("  {label:<18} {value}\n"));
    };

    line("name:", profile.name.clone());
    line("city:", profile.city.clone());
    line("profession:", profile.profession.clone());
    line("expertise level:", profile.expertise_level.to_string());
    line("interests:", profile.interests.join(", "));
    line("preferred topics:", profile.preferred_topics.join(", "));
    line("interactions:", profile.interaction_count.to_string());
    line(
        "last updated:",
        profile.last_updated.format("%Y-%m-%d %H:%M UTC").to_string(),
    );
    out
}
