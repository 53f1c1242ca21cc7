//! Minimum discount filter.

use super::Filter;
use crate::catalog::Product;
use regex_lite::Regex;
use std::sync::LazyLock;

static FIRST_INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

/// Extracts the first integer from an offer label such as "30% OFF".
///
/// Labels without digits count as 0% rather than being rejected.
pub fn parse_discount_percent(label: &str) -> f64 {
    FIRST_INTEGER
        .find(label)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Keeps products whose advertised discount is at least the threshold.
pub struct DiscountFilter {
    min_percent: f64,
}

impl DiscountFilter {
    pub fn new(min_percent: f64) -> Self {
        Self { min_percent }
    }
}

impl Filter for DiscountFilter {
    fn matches(&self, product: &Product) -> bool {
        parse_discount_percent(&product.discount_offer) >= self.min_percent
    }

    fn description(&self) -> String {
        format!("Discount: >= {:.0}%", self.min_percent)
    }
}
