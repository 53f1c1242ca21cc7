//! Price range filter.

use super::Filter;
use crate::catalog::Product;

/// Filters products by list price (`OriginalPrice`), bounds inclusive.
///
/// A product whose price did not parse (NaN) fails any active bound.
pub struct PriceFilter {
    min: Option<f64>,
    max: Option<f64>,
}

impl PriceFilter {
    /// Creates a new price filter with optional min/max bounds.
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Creates a filter with only minimum price.
    pub fn min(price: f64) -> Self {
        Self { min: Some(price), max: None }
    }

    /// Creates a filter with only maximum price.
    pub fn max(price: f64) -> Self {
        Self { min: None, max: Some(price) }
    }

    /// Creates a filter with both min and max.
    pub fn range(min: f64, max: f64) -> Self {
        Self { min: Some(min), max: Some(max) }
    }
}

impl Filter for PriceFilter {
    fn matches(&self, product: &Product) -> bool {
        let price = product.original_price;
        let above_min = self.min.map_or(true, |min| price >= min);
        let below_max = self.max.map_or(true, |max| price <= max);
        above_min && below_max
    }

    fn description(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("Price: ₹{:.0} - ₹{:.0}", min, max),
            (Some(min), None) => format!("Price: >= ₹{:.0}", min),
            (None, Some(max)) => format!("Price: <= ₹{:.0}", max),
            (None, None) => "Price: any".to_string(),
        }
    }
}
