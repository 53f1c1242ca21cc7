//! Sub-category selection used by the category, occasion and price views.

use super::Filter;
use crate::catalog::Product;

/// Keeps products whose `Individual_category` equals the selection.
pub struct SubCategoryFilter {
    category: String,
}

impl SubCategoryFilter {
    pub fn new(category: impl Into<String>) -> Self {
        Self { category: category.into() }
    }
}

impl Filter for SubCategoryFilter {
    fn matches(&self, product: &Product) -> bool {
        product.individual_category == self.category
    }

    fn description(&self) -> String {
        format!("Category: {}", self.category)
    }
}

/// "All" followed by the distinct sub-categories in first-seen order.
pub fn sub_categories(products: &[Product]) -> Vec<String> {
    let mut seen = vec!["All".to_string()];
    for product in products {
        if !seen.iter().any(|c| c == &product.individual_category) {
            seen.push(product.individual_category.clone());
        }
    }
    seen
}
