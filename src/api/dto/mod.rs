//! Data Transfer Objects for REST request/response serialization.
//!
//! Field names match what the browser client already sends and reads, so
//! they are kept short (`photo`, not `image_base64`).

pub mod generation_dto;
pub mod post_dto;

pub use generation_dto::*;
pub use post_dto::*;
