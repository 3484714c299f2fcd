//! # genimage-gateway
//!
//! REST gateway for an AI image generation gallery.
//!
//! Clients submit a text prompt; the gateway forwards it to an external
//! text-to-image inference API, caches the result by normalized prompt, and
//! returns a base64 image. Users can then share an image to a community
//! feed: the photo is uploaded to an image host and the post is recorded in
//! the document store.
//!
//! ## Architecture
//!
//! ```text
//! Clients (browser, client::ApiClient)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── GenerationService ── ImageCache (domain/)
//!     │        └── InferenceClient (inference/) ──► text-to-image API
//!     │
//!     └── PostService (service/)
//!              ├── ImageHost (hosting/) ──► Cloudinary
//!              └── PostStore (persistence/) ──► PostgreSQL
//! ```

pub mod api;
pub mod app_state;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod hosting;
pub mod inference;
pub mod persistence;
pub mod service;

#[cfg(test)]
mod test_support;
