//! Minimum rating filter.

use super::Filter;
use crate::catalog::Product;

/// Filters products by minimum star rating.
pub struct RatingFilter {
    min_stars: f64,
}

impl RatingFilter {
    pub fn new(min_stars: f64) -> Self {
        Self { min_stars }
    }
}

impl Filter for RatingFilter {
    fn matches(&self, product: &Product) -> bool {
        product.rating >= self.min_stars
    }

    fn description(&self) -> String {
        format!("Rating: >= {:.1} stars", self.min_stars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::rated;

    #[test]
    fn test_rating_filter() {
        let filter = RatingFilter::new(4.0);

        assert!(!filter.matches(&rated(3.9)));
        assert!(filter.matches(&rated(4.0)));
        assert!(filter.matches(&rated(4.6)));
    }

    #[test]
    fn test_unrated_product_excluded() {
        let filter = RatingFilter::new(1.0);
        assert!(!filter.matches(&rated(f64::NAN)));
    }

    #[test]
    fn test_zero_threshold() {
        let filter = RatingFilter::new(0.0);
        assert!(filter.matches(&rated(0.0)));
        assert!(filter.matches(&rated(5.0)));
    }

    #[test]
    fn test_description() {
        assert_eq!(RatingFilter::new(3.5).description(), "Rating: >= 3.5 stars");
    }
}
