//! CLI command implementations.

pub mod advisor;
pub mod browse;
pub mod catalog;
pub mod chat;
pub mod listing;
pub mod product;

#[cfg(test)]
pub(crate) mod mock;

pub use advisor::AdvisorCommand;
pub use browse::BrowseCommand;
pub use catalog::CatalogCommand;
pub use chat::ChatCommand;
pub use listing::{fetch_listing, Listing, ListingCommand};
pub use product::ProductCommand;
