//! Data models for catalog products, categories, advisors and the chat assistant.
//!
//! Field names follow the backend's JSON exactly; numeric fields tolerate
//! strings because the catalog export is not consistent about them.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// A catalog product as served by `/allProducts` and friends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Backend identifier (numeric in most exports, carried as text)
    #[serde(rename = "_id", default, deserialize_with = "de::text")]
    pub id: String,
    /// Retailer product page
    #[serde(rename = "URL", default, deserialize_with = "de::text")]
    pub url: String,
    /// Top-level category, e.g. "Western Wear"
    #[serde(rename = "Category", default, deserialize_with = "de::text")]
    pub category: String,
    #[serde(default, deserialize_with = "de::text")]
    pub image_url: String,
    #[serde(rename = "BrandName", default, deserialize_with = "de::text")]
    pub brand: String,
    /// Leaf category label, e.g. "Tops"
    #[serde(rename = "Individual_category", default, deserialize_with = "de::text")]
    pub individual_category: String,
    #[serde(rename = "Description", default, deserialize_with = "de::text")]
    pub description: String,
    #[serde(rename = "DiscountPrice", default = "de::missing", deserialize_with = "de::numeric")]
    pub discount_price: f64,
    /// List price; the price filters compare against this field
    #[serde(rename = "OriginalPrice", default = "de::missing", deserialize_with = "de::numeric")]
    pub original_price: f64,
    /// Offer label with an embedded percentage, e.g. "30% OFF"
    #[serde(rename = "DiscountOffer", default, deserialize_with = "de::text")]
    pub discount_offer: String,
    /// Comma-separated sizes, e.g. "S, M, L, XL"
    #[serde(rename = "SizeOption", default, deserialize_with = "de::text")]
    pub size_option: String,
    #[serde(rename = "Ratings", default = "de::missing", deserialize_with = "de::numeric")]
    pub rating: f64,
    #[serde(rename = "Reviews", default = "de::missing", deserialize_with = "de::numeric")]
    pub reviews: f64,
    /// Free-text comma-separated tags
    #[serde(default, deserialize_with = "de::text")]
    pub tags: String,
}

impl Product {
    /// Returns the individual size options.
    pub fn sizes(&self) -> Vec<&str> {
        self.size_option.split(',').map(str::trim).filter(|s| !s.is_empty()).collect()
    }

    /// Returns the discount percentage embedded in the offer label (0 when absent).
    pub fn discount_percent(&self) -> f64 {
        crate::filters::discount::parse_discount_percent(&self.discount_offer)
    }

    /// Returns the review count when the field held a usable number.
    pub fn review_count(&self) -> Option<u64> {
        (self.reviews.is_finite() && self.reviews >= 0.0).then(|| self.reviews as u64)
    }
}

/// Category tile from `/allCategories`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, deserialize_with = "de::text")]
    pub category: String,
    #[serde(default, deserialize_with = "de::text")]
    pub image: String,
}

/// Top-level category from `/main_category`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MainCategory {
    #[serde(default, alias = "name", deserialize_with = "de::text")]
    pub category: String,
    #[serde(default, deserialize_with = "de::text")]
    pub image: String,
}

/// Products of one category together with its sub-category tiles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryProducts {
    #[serde(default)]
    pub filtered_products: Vec<Product>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// An occasion (wedding, office, ...) and the categories it suggests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Occasion {
    #[serde(default, deserialize_with = "de::text")]
    pub occasion: String,
    #[serde(default, deserialize_with = "de::text")]
    pub image: String,
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// Products for one occasion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OccasionProducts {
    #[serde(default)]
    pub filtered_products: Vec<Product>,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Similar-product recommendations for a single product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecommendations {
    #[serde(default)]
    pub recommendations: Vec<RecommendedProduct>,
    pub product: Product,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedProduct {
    pub recommended_product: Product,
}

/// Raw `/image-recommend` response; this endpoint does not use the envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageRecommendations {
    #[serde(default)]
    pub recommendations: Vec<ImageRecommendation>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRecommendation {
    #[serde(rename = "productId", deserialize_with = "de::text")]
    pub product_id: String,
    #[serde(default = "de::missing", deserialize_with = "de::numeric")]
    pub score: f64,
}

/// A resolved product paired with its visual-similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredProduct {
    pub product: Product,
    pub score: f64,
}

/// An image to upload to the visual advisors.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), bytes }
    }

    /// Reads an image from disk.
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        Ok(Self { file_name, bytes })
    }
}

/// Body measurements in inches, sent to `/body-shape/measurements`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurements {
    #[serde(serialize_with = "ser::as_text")]
    pub bust: f64,
    #[serde(serialize_with = "ser::as_text")]
    pub waist: f64,
    #[serde(serialize_with = "ser::as_text")]
    pub high_hip: f64,
    #[serde(serialize_with = "ser::as_text")]
    pub hip: f64,
    #[serde(serialize_with = "ser::as_text")]
    pub shoulder: f64,
}

/// Answers to the body-shape quiz, sent to `/body-shape-quiz`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswers {
    pub widest_part: String,
    pub waist_defined: String,
    pub hips_description: String,
    pub broad_shoulders: String,
    pub weight_change: String,
    pub athletic_build: String,
    pub derriere: String,
    pub bust_size: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BodyShapeDetails {
    #[serde(default, deserialize_with = "de::text")]
    pub name: String,
    #[serde(default, deserialize_with = "de::text")]
    pub description: String,
    #[serde(default, deserialize_with = "de::text")]
    pub image: String,
    #[serde(default)]
    pub recommendations: Vec<StyleTip>,
}

/// A garment suggestion attached to a body shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleTip {
    #[serde(default, deserialize_with = "de::text")]
    pub name: String,
    #[serde(default, deserialize_with = "de::text")]
    pub description: String,
    #[serde(default, deserialize_with = "de::text")]
    pub image: String,
}

/// Classification result for measurements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyShapeData {
    #[serde(rename = "bodyShape")]
    pub body_shape: String,
    #[serde(rename = "waistHipRatio", default = "de::missing", deserialize_with = "de::numeric")]
    pub waist_hip_ratio: f64,
    #[serde(default)]
    pub data: BodyShapeDetails,
}

/// Classification result for quiz answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyShapeQuizResponse {
    #[serde(rename = "bodyShape")]
    pub body_shape: String,
    #[serde(default)]
    pub details: BodyShapeDetails,
}

/// Products picked for a body shape, plus the style tags that drove the pick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BodyShapeRecommendations {
    #[serde(default)]
    pub final_tag: Vec<String>,
    #[serde(default)]
    pub recommended_products: Vec<Product>,
}

/// Skin-tone prediction from `/predict-skin-tone`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkinToneData {
    pub skin_tone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// Product card attached to an assistant reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatProduct {
    #[serde(rename = "Product_id", default, deserialize_with = "de::text")]
    pub product_id: String,
    #[serde(rename = "BrandName", default, deserialize_with = "de::text")]
    pub brand: String,
    #[serde(rename = "Individual_category", default, deserialize_with = "de::text")]
    pub individual_category: String,
    #[serde(rename = "Description", default, deserialize_with = "de::text")]
    pub description: String,
    #[serde(rename = "OriginalPrice", default = "de::missing", deserialize_with = "de::numeric")]
    pub original_price: f64,
    #[serde(rename = "DiscountOffer", default, deserialize_with = "de::text")]
    pub discount_offer: String,
    #[serde(default, deserialize_with = "de::text")]
    pub image_url: String,
    #[serde(rename = "Ratings", default = "de::missing", deserialize_with = "de::numeric")]
    pub rating: f64,
}

/// One prior turn sent as conversation context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub conversation_history: Vec<ChatTurn>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default, deserialize_with = "de::text")]
    pub reply: String,
    #[serde(default)]
    pub products: Vec<ChatProduct>,
    #[serde(default)]
    pub is_product_query: bool,
}

/// Lenient deserializers for the catalog export.
pub(crate) mod de {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Value used when a numeric field is absent altogether.
    pub fn missing() -> f64 {
        f64::NAN
    }

    /// Coerces text the way a loosely-typed frontend would: blank is zero,
    /// anything unparseable is NaN. Only the exact spelling `Infinity` is
    /// infinite; `inf` and `nan` are not numbers. `0x`, `0o` and `0b`
    /// prefixes are read as integers.
    pub fn coerce(text: &str) -> f64 {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return 0.0;
        }
        match trimmed {
            "Infinity" | "+Infinity" => return f64::INFINITY,
            "-Infinity" => return f64::NEG_INFINITY,
            _ => {}
        }

        let radix = match trimmed.get(..2).map(str::to_ascii_lowercase).as_deref() {
            Some("0x") => Some(16),
            Some("0o") => Some(8),
            Some("0b") => Some(2),
            _ => None,
        };
        if let Some(radix) = radix {
            return u64::from_str_radix(&trimmed[2..], radix).map_or(f64::NAN, |n| n as f64);
        }

        if trimmed.to_ascii_lowercase().contains("inf") {
            return f64::NAN;
        }
        trimmed.parse().unwrap_or(f64::NAN)
    }

    pub fn numeric<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
            Some(Value::String(s)) => coerce(&s),
            Some(Value::Bool(b)) => f64::from(u8::from(b)),
            Some(Value::Null) | None => 0.0,
            Some(_) => f64::NAN,
        })
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        })
    }
}

mod ser {
    use serde::Serializer;

    /// Measurements go over the wire as form text, e.g. `"34"` or `"34.5"`.
    pub fn as_text<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }
}
