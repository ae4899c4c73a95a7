//! User-profile domain module.
//!
//! # Module Structure
//!
//! - `model`: profile record and expertise-level enum
//! - `mock`: mock preference pools for first-seen users
//! - `instruction`: personalization-instruction builder
//! - `repository`: persistence trait

mod instruction;
mod mock;
mod model;
mod repository;

pub use instruction::build_instruction;
pub use mock::{mock_profile, populate_mock_data};
pub use model::{ExpertiseLevel, UserProfile, is_valid_user_id};
pub use repository::ProfileRepository;
