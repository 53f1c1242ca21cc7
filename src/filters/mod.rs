//! Product filtering system with composable filters.
//!
//! Every listing view filters through [`filter_products`] so that search and
//! predicate semantics stay identical across views.

pub mod brand;
pub mod category;
pub mod composer;
pub mod discount;
pub mod normalize;
pub mod price;
pub mod rating;
pub mod search;

use crate::catalog::Product;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub use brand::{available_brands, BrandFilter};
pub use category::{sub_categories, SubCategoryFilter};
pub use composer::{FilterComposer, FilterEvent};
pub use discount::DiscountFilter;
pub use price::PriceFilter;
pub use rating::RatingFilter;
pub use search::SearchFilter;

/// Trait for filtering products.
pub trait Filter: Send + Sync {
    /// Returns true if the product passes the filter.
    fn matches(&self, product: &Product) -> bool;

    /// Returns a description of this filter.
    fn description(&self) -> String;
}

/// A chain of filters that must all pass.
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Creates an empty filter chain.
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Adds a filter to the chain.
    pub fn add(&mut self, filter: impl Filter + 'static) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Checks if a product passes all filters.
    pub fn matches(&self, product: &Product) -> bool {
        self.filters.iter().all(|f| f.matches(product))
    }

    /// Returns the matching products, leaving the source untouched.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products.iter().filter(|p| self.matches(p)).cloned().collect()
    }

    /// Returns true if no filters are configured.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns the number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns descriptions of all filters.
    pub fn descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.description()).collect()
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder that only adds the filters whose inputs are active.
pub struct FilterChainBuilder {
    chain: FilterChain,
}

impl FilterChainBuilder {
    pub fn new() -> Self {
        Self { chain: FilterChain::new() }
    }

    /// Adds a free-text search filter unless the query has no tokens.
    pub fn search(mut self, query: &str) -> Self {
        let filter = SearchFilter::new(query);
        if !filter.is_empty() {
            self.chain.add(filter);
        }
        self
    }

    /// Adds a price range filter.
    pub fn price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        if min.is_some() || max.is_some() {
            self.chain.add(PriceFilter::new(min, max));
        }
        self
    }

    /// Adds a brand membership filter.
    pub fn brands(mut self, brands: &BTreeSet<String>) -> Self {
        if !brands.is_empty() {
            self.chain.add(BrandFilter::new(brands.iter().cloned()));
        }
        self
    }

    /// Adds a minimum rating filter.
    pub fn min_rating(mut self, min: Option<f64>) -> Self {
        if let Some(min) = min {
            self.chain.add(RatingFilter::new(min));
        }
        self
    }

    /// Adds a minimum discount filter.
    pub fn min_discount(mut self, min: Option<f64>) -> Self {
        if let Some(min) = min {
            self.chain.add(DiscountFilter::new(min));
        }
        self
    }

    /// Adds a sub-category filter; "All" selects everything.
    pub fn sub_category(mut self, category: Option<&str>) -> Self {
        if let Some(category) = category.filter(|c| *c != "All") {
            self.chain.add(SubCategoryFilter::new(category));
        }
        self
    }

    pub fn build(self) -> FilterChain {
        self.chain
    }
}

impl Default for FilterChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The user's current filter selections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Free-text search
    pub search: String,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Selected brands; empty means any brand
    pub brands: BTreeSet<String>,
    pub min_rating: Option<f64>,
    /// Minimum discount percentage
    pub min_discount: Option<f64>,
    /// Selected sub-category; `None` or "All" means any
    pub sub_category: Option<String>,
}

impl FilterState {
    /// Returns true when no filter is active.
    pub fn is_empty(&self) -> bool {
        self.chain().is_empty()
    }

    /// Resets every selection.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Selects a brand, or deselects it if already selected.
    pub fn toggle_brand(&mut self, brand: &str) {
        if !self.brands.remove(brand) {
            self.brands.insert(brand.to_string());
        }
    }

    /// Builds the filter chain for the active selections.
    pub fn chain(&self) -> FilterChain {
        FilterChainBuilder::new()
            .search(&self.search)
            .price_range(self.min_price, self.max_price)
            .brands(&self.brands)
            .min_rating(self.min_rating)
            .min_discount(self.min_discount)
            .sub_category(self.sub_category.as_deref())
            .build()
    }
}

/// Filters `products` by `state`. The source list is never modified.
pub fn filter_products(products: &[Product], state: &FilterState) -> Vec<Product> {
    state.chain().apply(products)
}

/// Filters and hands the result to the view's setter.
pub fn apply_filters<F>(products: &[Product], state: &FilterState, set_filtered: F)
where
    F: FnOnce(Vec<Product>),
{
    set_filtered(filter_products(products, state));
}
