//! HTTP client for the Tiyara catalog backend.

use super::envelope::Envelope;
use super::error::ApiError;
use super::models::{
    BodyShapeData, BodyShapeQuizResponse, BodyShapeRecommendations, Category, CategoryProducts,
    ChatRequest, ChatResponse, ImageRecommendations, ImageUpload, MainCategory, Measurements,
    Occasion, OccasionProducts, Product, ProductRecommendations, QuizAnswers, ScoredProduct,
    SkinToneData,
};
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use wreq::multipart::{Form, Part};
use wreq::{Client, RequestBuilder, StatusCode};

/// Every backend operation the storefront consumes. Implemented over HTTP by
/// [`StorefrontClient`] and by in-memory fakes in tests.
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// Full product catalog (`GET /allProducts`).
    async fn all_products(&self) -> Result<Vec<Product>, ApiError>;

    /// Category tiles (`GET /allCategories`).
    async fn categories(&self) -> Result<Vec<Category>, ApiError>;

    /// Catalog of one category (`GET /allCategories/:category`).
    async fn category_catalog(&self, category: &str) -> Result<Vec<Product>, ApiError>;

    /// Products plus sub-category tiles (`GET /category_product/:category`).
    async fn category_products(&self, category: &str) -> Result<CategoryProducts, ApiError>;

    /// Top-level categories (`GET /main_category`).
    async fn main_categories(&self) -> Result<Vec<MainCategory>, ApiError>;

    /// Occasion list (`GET /occasions`).
    async fn occasions(&self) -> Result<Vec<Occasion>, ApiError>;

    /// Products for one occasion (`GET /occasions/:name`).
    async fn occasion(&self, name: &str) -> Result<OccasionProducts, ApiError>;

    /// Products under a price ceiling (`GET /prices/:price`).
    async fn products_under(&self, price: &str) -> Result<Vec<Product>, ApiError>;

    /// Single product detail (`GET /products/:id`).
    async fn product(&self, id: &str) -> Result<Product, ApiError>;

    /// Similar products (`GET /recommend/:id`).
    async fn recommendations(&self, id: &str) -> Result<ProductRecommendations, ApiError>;

    /// Products for a body shape (`GET /recommend/body_shape/:shape`).
    async fn body_shape_recommendations(
        &self,
        shape: &str,
    ) -> Result<BodyShapeRecommendations, ApiError>;

    /// Classifies measurements (`POST /body-shape/measurements`).
    async fn classify_measurements(
        &self,
        measurements: &Measurements,
    ) -> Result<BodyShapeData, ApiError>;

    /// Classifies quiz answers (`POST /body-shape-quiz`).
    async fn classify_quiz(&self, answers: &QuizAnswers)
        -> Result<BodyShapeQuizResponse, ApiError>;

    /// Visually similar products for an image (`POST /image-recommend`), each
    /// resolved through [`StorefrontApi::product`].
    async fn image_recommendations(&self, image: ImageUpload)
        -> Result<Vec<ScoredProduct>, ApiError>;

    /// Skin-tone bucket for a photo (`POST /predict-skin-tone`).
    async fn predict_skin_tone(&self, image: ImageUpload) -> Result<SkinToneData, ApiError>;

    /// Chat assistant turn (`POST /chat`).
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError>;
}

/// Catalog HTTP client. Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct StorefrontClient {
    client: Client,
    base_url: String,
}

impl StorefrontClient {
    /// Creates a client for the configured backend.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, &config.api_url)
    }

    /// Creates a client against an explicit base URL (used by tests).
    pub fn with_base_url(config: &Config, base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a request and returns the status together with the raw body.
    async fn send(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<(StatusCode, String), ApiError> {
        let response = request
            .send()
            .await
            .map_err(|source| ApiError::Transport { endpoint: endpoint.to_string(), source })?;

        let status = response.status();
        debug!("{} responded {}", endpoint, status);

        let body = response
            .text()
            .await
            .map_err(|source| ApiError::Transport { endpoint: endpoint.to_string(), source })?;

        Ok((status, body))
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let (status, body) = self.send(endpoint, request).await?;
        if !status.is_success() {
            return Err(status_error(endpoint, status, &body));
        }
        decode(endpoint, &body)
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        debug!("GET {}", endpoint);
        let request = self.client.get(self.url(endpoint)).header("Accept", "application/json");
        self.fetch(endpoint, request).await
    }

    async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        debug!("POST {}", endpoint);
        let payload = serde_json::to_vec(body)
            .map_err(|source| ApiError::Encode { endpoint: endpoint.to_string(), source })?;

        let request = self
            .client
            .post(self.url(endpoint))
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .body(payload);
        self.fetch(endpoint, request).await
    }

    async fn post_image<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        image: ImageUpload,
    ) -> Result<T, ApiError> {
        debug!("POST {} ({} bytes, multipart)", endpoint, image.bytes.len());
        let request = self.client.post(self.url(endpoint)).multipart(image_form(image));
        self.fetch(endpoint, request).await
    }
}

fn image_form(image: ImageUpload) -> Form {
    let part = Part::bytes(image.bytes).file_name(image.file_name);
    Form::new().part("image", part)
}

fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn decode<T: DeserializeOwned>(endpoint: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body)
        .map_err(|source| ApiError::Decode { endpoint: endpoint.to_string(), source })
}

/// Builds a status error, borrowing the envelope message when the body has one.
fn status_error(endpoint: &str, status: StatusCode, body: &str) -> ApiError {
    let message = serde_json::from_str::<Envelope<serde_json::Value>>(body)
        .ok()
        .map(|envelope| envelope.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unexpected status").to_string());

    ApiError::Status { endpoint: endpoint.to_string(), status: status.as_u16(), message }
}

/// `/main_category` sometimes answers with a bare array instead of an envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum MainCategoryBody {
    Bare(Vec<MainCategory>),
    Wrapped(Envelope<Vec<MainCategory>>),
}

#[async_trait]
impl StorefrontApi for StorefrontClient {
    async fn all_products(&self) -> Result<Vec<Product>, ApiError> {
        info!("Fetching full catalog");
        let endpoint = "/allProducts";
        self.get::<Envelope<Vec<Product>>>(endpoint).await?.into_data_or_default(endpoint)
    }

    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        let endpoint = "/allCategories";
        self.get::<Envelope<Vec<Category>>>(endpoint).await?.into_data_or_default(endpoint)
    }

    async fn category_catalog(&self, category: &str) -> Result<Vec<Product>, ApiError> {
        info!("Fetching category: {}", category);
        let endpoint = format!("/allCategories/{}", segment(category));
        self.get::<Envelope<Vec<Product>>>(&endpoint).await?.into_data_or_default(&endpoint)
    }

    async fn category_products(&self, category: &str) -> Result<CategoryProducts, ApiError> {
        info!("Fetching category products: {}", category);
        let endpoint = format!("/category_product/{}", segment(category));
        self.get::<Envelope<CategoryProducts>>(&endpoint).await?.into_data_or_default(&endpoint)
    }

    async fn main_categories(&self) -> Result<Vec<MainCategory>, ApiError> {
        let endpoint = "/main_category";
        match self.get::<MainCategoryBody>(endpoint).await? {
            MainCategoryBody::Bare(categories) => Ok(categories),
            MainCategoryBody::Wrapped(envelope) => envelope.into_data_or_default(endpoint),
        }
    }

    async fn occasions(&self) -> Result<Vec<Occasion>, ApiError> {
        let endpoint = "/occasions";
        self.get::<Envelope<Vec<Occasion>>>(endpoint).await?.into_data_or_default(endpoint)
    }

    async fn occasion(&self, name: &str) -> Result<OccasionProducts, ApiError> {
        info!("Fetching occasion: {}", name);
        let endpoint = format!("/occasions/{}", segment(name));
        self.get::<Envelope<OccasionProducts>>(&endpoint).await?.into_data_or_default(&endpoint)
    }

    async fn products_under(&self, price: &str) -> Result<Vec<Product>, ApiError> {
        info!("Fetching products under {}", price);
        let endpoint = format!("/prices/{}", segment(price));
        self.get::<Envelope<Vec<Product>>>(&endpoint).await?.into_data_or_default(&endpoint)
    }

    async fn product(&self, id: &str) -> Result<Product, ApiError> {
        let endpoint = format!("/products/{}", segment(id));
        self.get::<Envelope<Product>>(&endpoint).await?.into_data(&endpoint)
    }

    async fn recommendations(&self, id: &str) -> Result<ProductRecommendations, ApiError> {
        info!("Fetching recommendations for {}", id);
        let endpoint = format!("/recommend/{}", segment(id));
        self.get::<Envelope<ProductRecommendations>>(&endpoint).await?.into_data(&endpoint)
    }

    async fn body_shape_recommendations(
        &self,
        shape: &str,
    ) -> Result<BodyShapeRecommendations, ApiError> {
        info!("Fetching recommendations for body shape {}", shape);
        let endpoint = format!("/recommend/body_shape/{}", segment(shape));
        self.get::<Envelope<BodyShapeRecommendations>>(&endpoint)
            .await?
            .into_data_or_default(&endpoint)
    }

    async fn classify_measurements(
        &self,
        measurements: &Measurements,
    ) -> Result<BodyShapeData, ApiError> {
        let endpoint = "/body-shape/measurements";
        self.post_json::<_, Envelope<BodyShapeData>>(endpoint, measurements)
            .await?
            .into_data(endpoint)
    }

    async fn classify_quiz(
        &self,
        answers: &QuizAnswers,
    ) -> Result<BodyShapeQuizResponse, ApiError> {
        let endpoint = "/body-shape-quiz";
        self.post_json::<_, Envelope<BodyShapeQuizResponse>>(endpoint, answers)
            .await?
            .into_data(endpoint)
    }

    async fn image_recommendations(
        &self,
        image: ImageUpload,
    ) -> Result<Vec<ScoredProduct>, ApiError> {
        let endpoint = "/image-recommend";
        info!("Uploading {} for visual recommendations", image.file_name);

        let request = self.client.post(self.url(endpoint)).multipart(image_form(image));
        let (status, body) = self.send(endpoint, request).await?;
        let parsed = serde_json::from_str::<ImageRecommendations>(&body);

        if !status.is_success() {
            let message = parsed
                .ok()
                .and_then(|p| p.error)
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| "Failed to fetch recommendations".to_string());
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let parsed =
            parsed.map_err(|source| ApiError::Decode { endpoint: endpoint.to_string(), source })?;
        if let Some(message) = parsed.error.filter(|e| !e.is_empty()) {
            return Err(ApiError::Application { endpoint: endpoint.to_string(), message });
        }

        let mut lookups = JoinSet::new();
        for (index, rec) in parsed.recommendations.into_iter().enumerate() {
            let client = self.clone();
            lookups.spawn(async move {
                let result = client.product(&rec.product_id).await;
                (index, rec, result)
            });
        }

        let mut resolved = Vec::new();
        while let Some(joined) = lookups.join_next().await {
            match joined {
                Ok((index, rec, Ok(product))) => {
                    resolved.push((index, ScoredProduct { product, score: rec.score }))
                }
                Ok((_, rec, Err(err))) => {
                    warn!("Failed to fetch product {}: {}", rec.product_id, err)
                }
                Err(err) => warn!("Product lookup task failed: {}", err),
            }
        }

        resolved.sort_by_key(|(index, _)| *index);
        Ok(resolved.into_iter().map(|(_, scored)| scored).collect())
    }

    async fn predict_skin_tone(&self, image: ImageUpload) -> Result<SkinToneData, ApiError> {
        let endpoint = "/predict-skin-tone";
        info!("Uploading {} for skin-tone prediction", image.file_name);
        self.post_image::<Envelope<SkinToneData>>(endpoint, image).await?.into_data(endpoint)
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        self.post_json("/chat", request).await
    }
}
