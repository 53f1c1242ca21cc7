//! tiyara - storefront client for the Tiyara fashion catalog
//!
//! Fetches product lists from the catalog backend, filters and pages them
//! locally, and talks to the body-shape, skin-tone, visual-search and chat
//! advisors.

pub mod advisor;
pub mod browse;
pub mod catalog;
pub mod chat;
pub mod commands;
pub mod config;
pub mod debounce;
pub mod filters;
pub mod format;
pub mod paginate;
pub mod sequence;

pub use advisor::SkinTone;
pub use browse::BrowseSession;
pub use catalog::{ApiError, Product, StorefrontApi, StorefrontClient};
pub use config::{Config, OutputFormat};
pub use filters::{FilterEvent, FilterState};
pub use paginate::{paginate, Page};
