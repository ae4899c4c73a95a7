//! Search and generation domain: transient wire-facing models and the
//! service traits the interaction layer implements.

pub mod model;
pub mod service;

pub use model::{ExtractedPage, SearchHit, SearchResponse};
pub use service::{GenerationService, SearchService};
