//! Catalog query engine: composable filters + sorting over an in-memory
//! product collection.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use tillpoint_core::{DomainError, ValueObject};

use crate::product::{Product, StockStatus};

/// Active/inactive dimension of the list screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

/// Stock level dimension, matching the derived [`StockStatus`] badge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockFilter {
    #[default]
    All,
    Low,
    Out,
}

/// List ordering. Each key carries its own direction, matching the screen:
/// name A-Z, most expensive first, emptiest shelf first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Price,
    Stock,
}

impl FromStr for StatusFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(DomainError::validation(format!(
                "unknown status filter: {other}"
            ))),
        }
    }
}

impl FromStr for StockFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "low" => Ok(Self::Low),
            "out" => Ok(Self::Out),
            other => Err(DomainError::validation(format!(
                "unknown stock filter: {other}"
            ))),
        }
    }
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "price" => Ok(Self::Price),
            "stock" => Ok(Self::Stock),
            other => Err(DomainError::validation(format!("unknown sort key: {other}"))),
        }
    }
}

/// Immutable snapshot of the list screen's filter bar.
///
/// Every dimension composes by logical AND; a dimension left at its
/// `all`/empty value leaves the sequence unchanged. `Default` matches
/// everything and sorts by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Case-insensitive substring against name or code, substring against
    /// barcode. Empty or whitespace-only text disables the dimension.
    pub search: Option<String>,
    pub status: StatusFilter,
    /// Exact category label; `None` means all categories.
    pub category: Option<String>,
    pub stock: StockFilter,
    pub sort: SortKey,
}

impl ValueObject for CatalogQuery {}

impl CatalogQuery {
    /// Whether a product satisfies every filter dimension.
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_search(product)
            && self.matches_status(product)
            && self.matches_category(product)
            && self.matches_stock(product)
    }

    fn matches_search(&self, product: &Product) -> bool {
        let Some(text) = self.search.as_deref() else {
            return true;
        };
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        product.name().to_lowercase().contains(&needle)
            || product.code().to_lowercase().contains(&needle)
            || product.barcode().is_some_and(|b| b.contains(&needle))
    }

    fn matches_status(&self, product: &Product) -> bool {
        match self.status {
            StatusFilter::All => true,
            StatusFilter::Active => product.is_active(),
            StatusFilter::Inactive => !product.is_active(),
        }
    }

    fn matches_category(&self, product: &Product) -> bool {
        match &self.category {
            None => true,
            Some(label) => product.category() == label,
        }
    }

    fn matches_stock(&self, product: &Product) -> bool {
        match self.stock {
            StockFilter::All => true,
            StockFilter::Low => product.stock_status() == StockStatus::Low,
            StockFilter::Out => product.stock_status() == StockStatus::Out,
        }
    }
}

/// Filter and order a product snapshot for display.
///
/// Returns a fresh sequence; the input is never mutated. Name ordering is
/// case-folded rather than fully collated, which is as locale-aware as this
/// stack gets without pulling in ICU.
pub fn filter_and_sort(products: &[Product], query: &CatalogQuery) -> Vec<Product> {
    let mut matched: Vec<Product> = products
        .iter()
        .filter(|product| query.matches(product))
        .cloned()
        .collect();

    match query.sort {
        SortKey::Name => matched.sort_by_key(|product| product.name().to_lowercase()),
        SortKey::Price => matched.sort_by(|a, b| b.price_cents().cmp(&a.price_cents())),
        SortKey::Stock => matched.sort_by_key(|product| product.stock()),
    }

    tracing::debug!(
        scanned = products.len(),
        matched = matched.len(),
        sort = ?query.sort,
        "catalog query evaluated"
    );

    matched
}
