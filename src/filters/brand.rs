//! Brand set membership filter.

use super::Filter;
use crate::catalog::Product;
use std::collections::BTreeSet;

/// Keeps products whose brand is one of the selected brands. Matching is
/// exact; an empty selection keeps everything.
pub struct BrandFilter {
    brands: BTreeSet<String>,
}

impl BrandFilter {
    pub fn new(brands: impl IntoIterator<Item = String>) -> Self {
        Self { brands: brands.into_iter().collect() }
    }
}

impl Filter for BrandFilter {
    fn matches(&self, product: &Product) -> bool {
        self.brands.is_empty() || self.brands.contains(&product.brand)
    }

    fn description(&self) -> String {
        if self.brands.is_empty() {
            "Brand: any".to_string()
        } else {
            let brands: Vec<&str> = self.brands.iter().map(String::as_str).collect();
            format!("Brand: {}", brands.join(", "))
        }
    }
}

/// Distinct non-empty brand names, sorted case-insensitively.
pub fn available_brands(products: &[Product]) -> Vec<String> {
    let unique: BTreeSet<&str> =
        products.iter().map(|p| p.brand.as_str()).filter(|b| !b.trim().is_empty()).collect();

    let mut brands: Vec<String> = unique.into_iter().map(str::to_string).collect();
    brands.sort_by_key(|b| b.to_lowercase());
    brands
}
