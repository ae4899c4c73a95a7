//! Application layer for Sage: the use case orchestrating one query.

pub mod ask_usecase;

pub use ask_usecase::{AskOutcome, AskUseCase};
