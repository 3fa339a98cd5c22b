//! Paginated catalog report model.
//!
//! The external renderer (PDF or otherwise) consumes this pre-paginated,
//! serializable document; nothing here draws anything.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tillpoint_core::{DomainError, DomainResult};

use crate::product::Product;

/// One printable line of the catalog report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub code: String,
    pub name: String,
    pub category: String,
    /// Price formatted as a decimal string, e.g. `"18.50"`.
    pub price: String,
    pub stock: u32,
    /// Stock badge label, e.g. `"low stock"`.
    pub status: String,
}

impl ReportRow {
    fn from_product(product: &Product) -> Self {
        Self {
            code: product.code().to_string(),
            name: product.name().to_string(),
            category: product.category().to_string(),
            price: format_price(product.price_cents()),
            stock: product.stock(),
            status: product.stock_status().label().to_string(),
        }
    }
}

/// One page of report rows. Page numbers start at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPage {
    pub number: u32,
    pub rows: Vec<ReportRow>,
}

/// Complete report document: pages plus catalog totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogReport {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub product_count: usize,
    /// Units on hand across all listed products.
    pub total_units: u64,
    /// Inventory value in smallest currency unit (price x stock, summed).
    pub total_value_cents: u64,
    pub pages: Vec<ReportPage>,
}

impl CatalogReport {
    /// Build a report from an already filtered/sorted sequence.
    ///
    /// Row order follows the input sequence. An empty sequence produces a
    /// report with zero pages.
    pub fn build(
        title: impl Into<String>,
        products: &[Product],
        rows_per_page: usize,
        generated_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if rows_per_page == 0 {
            return Err(DomainError::validation("rows_per_page must be at least 1"));
        }

        let rows: Vec<ReportRow> = products.iter().map(ReportRow::from_product).collect();
        let pages = rows
            .chunks(rows_per_page)
            .enumerate()
            .map(|(index, chunk)| ReportPage {
                number: index as u32 + 1,
                rows: chunk.to_vec(),
            })
            .collect();

        Ok(Self {
            title: title.into(),
            generated_at,
            product_count: products.len(),
            total_units: products.iter().map(|p| u64::from(p.stock())).sum(),
            total_value_cents: products
                .iter()
                .map(|p| p.price_cents() * u64::from(p.stock()))
                .sum(),
            pages,
        })
    }
}

/// Format a cent amount as a plain decimal string.
pub fn format_price(cents: u64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}
