//! Category and occasion directory commands.

use crate::catalog::{OrWarn, StorefrontApi, StorefrontClient};
use crate::config::{Config, OutputFormat};
use crate::format::Formatter;
use anyhow::{Context, Result};
use tracing::info;

/// Lists categories, main categories and occasions.
pub struct CatalogCommand {
    config: Config,
}

impl CatalogCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn client(&self) -> Result<StorefrontClient> {
        StorefrontClient::new(&self.config).context("Failed to create HTTP client")
    }

    pub async fn categories(&self) -> Result<String> {
        self.categories_with_client(&self.client()?).await
    }

    /// All category tiles. Failures propagate.
    pub async fn categories_with_client(&self, client: &impl StorefrontApi) -> Result<String> {
        let categories = client.categories().await.context("Failed to fetch categories")?;
        info!("Found {} categories", categories.len());

        if self.config.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(&categories)?);
        }
        let names: Vec<String> = categories.into_iter().map(|c| c.category).collect();
        Ok(Formatter::new(self.config.format).format_names("Categories", &names))
    }

    pub async fn main_categories(&self) -> Result<String> {
        self.main_categories_with_client(&self.client()?).await
    }

    /// Top-level categories; an unavailable backend shows an empty list.
    pub async fn main_categories_with_client(
        &self,
        client: &impl StorefrontApi,
    ) -> Result<String> {
        let categories = client.main_categories().await.or_warn("main categories");

        if self.config.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(&categories)?);
        }
        let names: Vec<String> = categories.into_iter().map(|c| c.category).collect();
        Ok(Formatter::new(self.config.format).format_names("Main categories", &names))
    }

    pub async fn occasions(&self) -> Result<String> {
        self.occasions_with_client(&self.client()?).await
    }

    /// Occasions with their suggested categories; failures show an empty list.
    pub async fn occasions_with_client(&self, client: &impl StorefrontApi) -> Result<String> {
        let occasions = client.occasions().await.or_warn("occasions");

        if self.config.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(&occasions)?);
        }
        let names: Vec<String> = occasions
            .into_iter()
            .map(|o| {
                if o.categories.is_empty() {
                    o.occasion
                } else {
                    let categories: Vec<String> =
                        o.categories.into_iter().map(|c| c.category).collect();
                    format!("{} ({})", o.occasion, categories.join(", "))
                }
            })
            .collect();
        Ok(Formatter::new(self.config.format).format_names("Occasions", &names))
    }

    pub async fn sub_categories(&self, category: &str) -> Result<String> {
        self.sub_categories_with_client(&self.client()?, category).await
    }

    /// Sub-categories offered for one category, "All" first.
    pub async fn sub_categories_with_client(
        &self,
        client: &impl StorefrontApi,
        category: &str,
    ) -> Result<String> {
        let result = client
            .category_products(category)
            .await
            .with_context(|| format!("Failed to fetch category '{}'", category))?;

        let mut names = vec!["All".to_string()];
        names.extend(result.categories.into_iter().map(|c| c.category));
        Ok(Formatter::new(self.config.format).format_names("Sub-categories", &names))
    }
}
