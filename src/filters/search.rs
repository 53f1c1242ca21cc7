//! Free-text search over brand, category and tags.

use super::normalize::{normalize, tokens};
use super::Filter;
use crate::catalog::Product;

/// Matches a product when any query token occurs in its normalized
/// brand/category/tags text. An empty query matches everything.
pub struct SearchFilter {
    tokens: Vec<String>,
}

impl SearchFilter {
    pub fn new(query: &str) -> Self {
        Self { tokens: tokens(query) }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// The text a product is searched by.
pub fn searchable_text(product: &Product) -> String {
    normalize(&format!(
        "{} {} {}",
        normalize(&product.brand),
        normalize(&product.individual_category),
        normalize(&product.tags)
    ))
}

impl Filter for SearchFilter {
    fn matches(&self, product: &Product) -> bool {
        if self.tokens.is_empty() {
            return true;
        }
        let text = searchable_text(product);
        self.tokens.iter().any(|token| text.contains(token.as_str()))
    }

    fn description(&self) -> String {
        if self.tokens.is_empty() {
            "Search: any".to_string()
        } else {
            format!("Search: {}", self.tokens.join(" | "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::product;

    fn tagged(brand: &str, category: &str, tags: &str) -> Product {
        let mut p = product("1", brand, 999.0, 4.0, "10% OFF");
        p.individual_category = category.to_string();
        p.tags = tags.to_string();
        p
    }

    #[test]
    fn test_synonym_match() {
        let tee = tagged("Roadster", "Tshirts", "Tops, T-Shirt, Casual");

        assert!(SearchFilter::new("tshirt").matches(&tee));
        assert!(SearchFilter::new("T-Shirt").matches(&tee));
        assert!(SearchFilter::new("t shirt").matches(&tee));
        assert!(!SearchFilter::new("shoes").matches(&tee));
    }

    #[test]
    fn test_any_token_matches() {
        let dress = tagged("Zara", "Dresses", "Party, Maxi");
        assert!(SearchFilter::new("sneakers maxi").matches(&dress));
        assert!(!SearchFilter::new("sneakers loafers").matches(&dress));
    }

    #[test]
    fn test_brand_and_category_are_searched() {
        let kurta = tagged("Biba", "Kurtas", "");
        assert!(SearchFilter::new("BIBA").matches(&kurta));
        assert!(SearchFilter::new("kurta").matches(&kurta));
    }

    #[test]
    fn test_description_is_not_searched() {
        let mut p = tagged("Zara", "Dresses", "Party");
        p.description = "Sequinned evening gown".to_string();
        assert!(!SearchFilter::new("sequinned").matches(&p));
    }

    #[test]
    fn test_empty_query_matches_all() {
        let filter = SearchFilter::new("   ");
        assert!(filter.is_empty());
        assert!(filter.matches(&tagged("", "", "")));
        assert_eq!(filter.description(), "Search: any");
    }

    #[test]
    fn test_exact_substring_of_field_matches() {
        let p = tagged("Vero Moda", "Jumpsuits", "Denim, Utility");
        for field in [&p.brand, &p.individual_category, &p.tags] {
            let query = normalize(field);
            for word in query.split(' ') {
                assert!(SearchFilter::new(word).matches(&p), "{:?} should match", word);
            }
        }
    }

    #[test]
    fn test_description() {
        assert_eq!(SearchFilter::new("Red T-Shirt").description(), "Search: red | tshirt");
    }
}
