//! In-memory storefront for command tests.

use crate::catalog::models::{
    BodyShapeData, BodyShapeDetails, BodyShapeQuizResponse, BodyShapeRecommendations,
    CategoryProducts, ChatProduct, ChatRequest, ChatResponse, MainCategory, Measurements,
    OccasionProducts, ProductRecommendations, QuizAnswers, RecommendedProduct, SkinToneData,
};
use crate::catalog::{
    ApiError, Category, ImageUpload, Occasion, Product, ScoredProduct, StorefrontApi,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};

/// Serves a fixed catalog. With `failing` set every call reports an
/// application error.
#[derive(Default)]
pub struct MockStorefront {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub occasions: Vec<Occasion>,
    pub skin_tone: String,
    pub failing: bool,
    calls: AtomicU32,
}

impl MockStorefront {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products, skin_tone: "mid-dark".to_string(), ..Default::default() }
    }

    pub fn failing() -> Self {
        Self { failing: true, ..Default::default() }
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self, endpoint: &str) -> Result<(), ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            Err(ApiError::Application {
                endpoint: endpoint.to_string(),
                message: "backend unavailable".to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn in_category(&self, category: &str) -> Vec<Product> {
        self.products.iter().filter(|p| p.category == category).cloned().collect()
    }
}

fn details(name: &str) -> BodyShapeDetails {
    BodyShapeDetails {
        name: name.to_string(),
        description: format!("{} silhouette", name),
        ..Default::default()
    }
}

#[async_trait]
impl StorefrontApi for MockStorefront {
    async fn all_products(&self) -> Result<Vec<Product>, ApiError> {
        self.check("/allProducts")?;
        Ok(self.products.clone())
    }

    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.check("/allCategories")?;
        Ok(self.categories.clone())
    }

    async fn category_catalog(&self, category: &str) -> Result<Vec<Product>, ApiError> {
        self.check("/allCategories/:category")?;
        Ok(self.in_category(category))
    }

    async fn category_products(&self, category: &str) -> Result<CategoryProducts, ApiError> {
        self.check("/category_product/:category")?;
        let filtered_products = self.in_category(category);
        let categories = crate::filters::sub_categories(&filtered_products)
            .into_iter()
            .skip(1)
            .map(|category| Category { category, image: String::new() })
            .collect();
        Ok(CategoryProducts { filtered_products, categories })
    }

    async fn main_categories(&self) -> Result<Vec<MainCategory>, ApiError> {
        self.check("/main_category")?;
        Ok(self
            .categories
            .iter()
            .map(|c| MainCategory { category: c.category.clone(), image: c.image.clone() })
            .collect())
    }

    async fn occasions(&self) -> Result<Vec<Occasion>, ApiError> {
        self.check("/occasions")?;
        Ok(self.occasions.clone())
    }

    async fn occasion(&self, name: &str) -> Result<OccasionProducts, ApiError> {
        self.check("/occasions/:name")?;
        let needle = name.to_lowercase();
        Ok(OccasionProducts {
            filtered_products: self
                .products
                .iter()
                .filter(|p| p.tags.to_lowercase().contains(&needle))
                .cloned()
                .collect(),
            categories: Vec::new(),
        })
    }

    async fn products_under(&self, price: &str) -> Result<Vec<Product>, ApiError> {
        self.check("/prices/:price")?;
        let ceiling: f64 = price.parse().map_err(|_| ApiError::Application {
            endpoint: "/prices/:price".to_string(),
            message: "Invalid price".to_string(),
        })?;
        Ok(self.products.iter().filter(|p| p.original_price <= ceiling).cloned().collect())
    }

    async fn product(&self, id: &str) -> Result<Product, ApiError> {
        self.check("/products/:id")?;
        self.products.iter().find(|p| p.id == id).cloned().ok_or_else(|| {
            ApiError::Application {
                endpoint: "/products/:id".to_string(),
                message: "Product not found".to_string(),
            }
        })
    }

    async fn recommendations(&self, id: &str) -> Result<ProductRecommendations, ApiError> {
        let product = self.product(id).await?;
        let recommendations = self
            .products
            .iter()
            .filter(|p| p.id != id && p.individual_category == product.individual_category)
            .map(|p| RecommendedProduct { recommended_product: p.clone() })
            .collect();
        Ok(ProductRecommendations { recommendations, product })
    }

    async fn body_shape_recommendations(
        &self,
        shape: &str,
    ) -> Result<BodyShapeRecommendations, ApiError> {
        self.check("/recommend/body_shape/:shape")?;
        Ok(BodyShapeRecommendations {
            final_tag: vec![shape.to_lowercase()],
            recommended_products: self.products.clone(),
        })
    }

    async fn classify_measurements(
        &self,
        measurements: &Measurements,
    ) -> Result<BodyShapeData, ApiError> {
        self.check("/body-shape/measurements")?;
        Ok(BodyShapeData {
            body_shape: "Hourglass".to_string(),
            waist_hip_ratio: measurements.waist / measurements.hip,
            data: details("Hourglass"),
        })
    }

    async fn classify_quiz(
        &self,
        answers: &QuizAnswers,
    ) -> Result<BodyShapeQuizResponse, ApiError> {
        self.check("/body-shape-quiz")?;
        let shape = if answers.broad_shoulders == "yes" { "Inverted Triangle" } else { "Pear" };
        Ok(BodyShapeQuizResponse { body_shape: shape.to_string(), details: details(shape) })
    }

    async fn image_recommendations(
        &self,
        _image: ImageUpload,
    ) -> Result<Vec<ScoredProduct>, ApiError> {
        self.check("/image-recommend")?;
        Ok(self
            .products
            .iter()
            .take(2)
            .enumerate()
            .map(|(i, p)| ScoredProduct { product: p.clone(), score: 0.9 - i as f64 * 0.1 })
            .collect())
    }

    async fn predict_skin_tone(&self, _image: ImageUpload) -> Result<SkinToneData, ApiError> {
        self.check("/predict-skin-tone")?;
        Ok(SkinToneData { skin_tone: self.skin_tone.clone() })
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        self.check("/chat")?;
        let products: Vec<ChatProduct> = Vec::new();
        Ok(ChatResponse {
            reply: format!(
                "You said '{}' after {} turns",
                request.message,
                request.conversation_history.len()
            ),
            products,
            is_product_query: false,
        })
    }
}
