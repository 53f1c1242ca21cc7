//! Backend catalog access: wire models, the response envelope, and the HTTP client.

pub mod client;
pub mod envelope;
pub mod error;
pub mod models;

pub use client::{StorefrontApi, StorefrontClient};
pub use envelope::{Envelope, ErrorFlag};
pub use error::{ApiError, OrWarn};
pub use models::{Category, ImageUpload, Occasion, Product, ScoredProduct};
