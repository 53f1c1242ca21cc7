//! Listing commands: fetch a product list, filter it, show one page.

use crate::browse::BrowseSession;
use crate::catalog::{OrWarn, Product, StorefrontApi, StorefrontClient};
use crate::config::Config;
use crate::format::Formatter;
use anyhow::{Context, Result};
use std::fmt;
use tracing::{debug, info};

/// Where a listing's products come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    /// The whole catalog
    All,
    /// A category's catalog (`/allCategories/:category`)
    Catalog(String),
    /// A category with its sub-categories (`/category_product/:category`)
    Category(String),
    Occasion(String),
    /// Products under a price ceiling
    PriceUnder(String),
    /// Products picked for a body shape
    BodyShape(String),
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listing::All => write!(f, "all products"),
            Listing::Catalog(name) | Listing::Category(name) => write!(f, "category '{}'", name),
            Listing::Occasion(name) => write!(f, "occasion '{}'", name),
            Listing::PriceUnder(price) => write!(f, "products under ₹{}", price),
            Listing::BodyShape(shape) => write!(f, "picks for body shape '{}'", shape),
        }
    }
}

/// Fetches the products behind a listing.
///
/// The category catalog and price views show an empty list when the
/// backend fails; the others report the error.
pub async fn fetch_listing(client: &impl StorefrontApi, listing: &Listing) -> Result<Vec<Product>> {
    info!("Fetching {}", listing);

    let products = match listing {
        Listing::All => client.all_products().await.context("Failed to fetch products")?,
        Listing::Catalog(name) => client.category_catalog(name).await.or_warn("category catalog"),
        Listing::Category(name) => {
            let result = client
                .category_products(name)
                .await
                .with_context(|| format!("Failed to fetch category '{}'", name))?;
            debug!("Category '{}' has {} sub-categories", name, result.categories.len());
            result.filtered_products
        }
        Listing::Occasion(name) => {
            client
                .occasion(name)
                .await
                .with_context(|| format!("Failed to fetch occasion '{}'", name))?
                .filtered_products
        }
        Listing::PriceUnder(price) => client.products_under(price).await.or_warn("price"),
        Listing::BodyShape(shape) => {
            let result = client
                .body_shape_recommendations(shape)
                .await
                .with_context(|| format!("Failed to fetch recommendations for '{}'", shape))?;
            debug!("Body shape tags: {}", result.final_tag.join(", "));
            result.recommended_products
        }
    };

    debug!("Fetched {} products", products.len());
    Ok(products)
}

/// Shows one filtered page of a listing.
pub struct ListingCommand {
    config: Config,
}

impl ListingCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches, filters and formats page `page` of `listing`.
    pub async fn execute(&self, listing: &Listing, page: usize) -> Result<String> {
        let client = StorefrontClient::new(&self.config).context("Failed to create HTTP client")?;
        self.execute_with_client(&client, listing, page).await
    }

    /// Same as [`execute`](Self::execute) with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl StorefrontApi,
        listing: &Listing,
        page: usize,
    ) -> Result<String> {
        let mut session = BrowseSession::empty(self.config.page_size);
        let ticket = session.begin_load();
        let products = fetch_listing(client, listing).await?;
        session.finish_load(ticket, products);

        session.apply_filters(self.config.filters.clone());
        session.go_to(page);

        let filters = session.state().chain().descriptions();
        if !filters.is_empty() {
            debug!("Active filters: {}", filters.join(", "));
        }
        info!(
            "{} of {} products match, page {}/{}",
            session.filtered().len(),
            session.products().len(),
            session.page_number(),
            session.total_pages()
        );

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_page(&session.page(), &filters))
    }

    /// Lists the brands available in `listing`, for use with `--brand`.
    pub async fn brands(&self, listing: &Listing) -> Result<String> {
        let client = StorefrontClient::new(&self.config).context("Failed to create HTTP client")?;
        self.brands_with_client(&client, listing).await
    }

    pub async fn brands_with_client(
        &self,
        client: &impl StorefrontApi,
        listing: &Listing,
    ) -> Result<String> {
        let products = fetch_listing(client, listing).await?;
        let session = BrowseSession::new(products, self.config.page_size);
        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_names("Brands", &session.available_brands()))
    }
}
