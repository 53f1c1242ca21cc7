//! Product detail and similar-product commands.

use crate::catalog::{Product, StorefrontApi, StorefrontClient};
use crate::config::{Config, OutputFormat};
use crate::format::Formatter;
use anyhow::{Context, Result};
use tracing::{info, warn};

/// Looks up products by id.
pub struct ProductCommand {
    config: Config,
}

fn validate_id(id: &str) -> Result<&str> {
    let id = id.trim();
    if id.is_empty() || id.contains('/') {
        anyhow::bail!("Invalid product id: '{}'", id);
    }
    Ok(id)
}

impl ProductCommand {
    /// Creates a new product command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches a product by id and returns formatted output.
    pub async fn execute(&self, id: &str) -> Result<String> {
        let client = StorefrontClient::new(&self.config).context("Failed to create HTTP client")?;
        self.execute_with_client(&client, id).await
    }

    /// Fetches a product with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl StorefrontApi,
        id: &str,
    ) -> Result<String> {
        let id = validate_id(id)?;
        info!("Looking up product: {}", id);

        let product =
            client.product(id).await.with_context(|| format!("Failed to fetch product {}", id))?;

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_product(&product))
    }

    /// Fetches several products; ids that fail are reported and skipped.
    pub async fn execute_batch(&self, ids: &[String]) -> Result<String> {
        let client = StorefrontClient::new(&self.config).context("Failed to create HTTP client")?;
        self.execute_batch_with_client(&client, ids).await
    }

    pub async fn execute_batch_with_client(
        &self,
        client: &impl StorefrontApi,
        ids: &[String],
    ) -> Result<String> {
        let mut products: Vec<Product> = Vec::new();

        for id in ids {
            let Ok(id) = validate_id(id) else {
                warn!("Skipping invalid product id: {:?}", id);
                continue;
            };

            match client.product(id).await {
                Ok(product) => products.push(product),
                Err(e) => warn!("Failed to fetch product {}: {}", id, e),
            }
        }

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_products(&products))
    }

    /// Shows a product followed by similar products.
    pub async fn recommend(&self, id: &str) -> Result<String> {
        let client = StorefrontClient::new(&self.config).context("Failed to create HTTP client")?;
        self.recommend_with_client(&client, id).await
    }

    pub async fn recommend_with_client(
        &self,
        client: &impl StorefrontApi,
        id: &str,
    ) -> Result<String> {
        let id = validate_id(id)?;
        info!("Fetching recommendations for product: {}", id);

        let result = client
            .recommendations(id)
            .await
            .with_context(|| format!("Failed to fetch recommendations for {}", id))?;
        let similar: Vec<Product> =
            result.recommendations.into_iter().map(|r| r.recommended_product).collect();

        let formatter = Formatter::new(self.config.format);
        if self.config.format == OutputFormat::Json {
            let value = serde_json::json!({ "product": result.product, "recommendations": similar });
            return Ok(serde_json::to_string_pretty(&value)?);
        }

        Ok(format!(
            "{}\n\nSimilar products:\n\n{}",
            formatter.format_product(&result.product),
            formatter.format_products(&similar)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::mock::MockStorefront;
    use crate::filters::test_support::product;

    fn wardrobe() -> Vec<Product> {
        let mut kurta = product("3", "Biba", 1299.0, 4.6, "30% OFF");
        kurta.individual_category = "Kurtas".to_string();
        let mut other = product("4", "Aurelia", 1499.0, 4.1, "10% OFF");
        other.individual_category = "Kurtas".to_string();
        vec![product("1", "Roadster", 599.0, 4.2, "45% OFF"), kurta, other]
    }

    fn make_test_config() -> Config {
        Config::default()
    }

    #[tokio::test]
    async fn test_product_command_success() {
        let client = MockStorefront::new(wardrobe());
        let cmd = ProductCommand::new(make_test_config());

        let output = cmd.execute_with_client(&client, " 3 ").await.unwrap();
        assert!(output.contains("ID:       3"));
        assert!(output.contains("Brand:    Biba"));
    }

    #[tokio::test]
    async fn test_product_command_invalid_id() {
        let client = MockStorefront::new(wardrobe());
        let cmd = ProductCommand::new(make_test_config());

        let err = cmd.execute_with_client(&client, "  ").await.unwrap_err();
        assert!(err.to_string().contains("Invalid product id"));
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_product_command_not_found() {
        let client = MockStorefront::new(wardrobe());
        let cmd = ProductCommand::new(make_test_config());

        let err = cmd.execute_with_client(&client, "42").await.unwrap_err();
        assert!(err.to_string().contains("Failed to fetch product 42"));
    }

    #[tokio::test]
    async fn test_batch_skips_failures() {
        let client = MockStorefront::new(wardrobe());
        let cmd = ProductCommand::new(make_test_config());

        let ids = vec!["1".to_string(), "42".to_string(), "a/b".to_string(), "3".to_string()];
        let output = cmd.execute_batch_with_client(&client, &ids).await.unwrap();
        assert!(output.contains("Roadster"));
        assert!(output.contains("Biba"));
        assert!(output.contains("Total: 2 products"));
        assert_eq!(client.call_count(), 3);
    }

    #[tokio::test]
    async fn test_recommend() {
        let client = MockStorefront::new(wardrobe());
        let cmd = ProductCommand::new(make_test_config());

        let output = cmd.recommend_with_client(&client, "3").await.unwrap();
        let (head, similar) = output.split_once("Similar products:").unwrap();
        assert!(head.contains("Biba"));
        assert!(similar.contains("Aurelia"));
        assert!(!similar.contains("Roadster"));
    }

    #[tokio::test]
    async fn test_recommend_json() {
        let client = MockStorefront::new(wardrobe());
        let mut config = make_test_config();
        config.format = OutputFormat::Json;
        let cmd = ProductCommand::new(config);

        let output = cmd.recommend_with_client(&client, "3").await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["product"]["_id"], "3");
        assert_eq!(value["recommendations"].as_array().unwrap().len(), 1);
    }
}
