//! Service layer: orchestrates domain types and external collaborators.

pub mod generation_service;
pub mod post_service;

pub use generation_service::{Generation, GenerationService};
pub use post_service::{PostService, PostSubmission};
