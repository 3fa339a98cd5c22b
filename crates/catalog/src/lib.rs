//! Product catalog domain module.
//!
//! This crate contains the product record model, the query engine behind the
//! catalog screen (filtering, sorting), the in-process store contract, and
//! the paginated report model handed to an external renderer. Pure,
//! synchronous domain logic; rendering and durable persistence stay with the
//! host application.

pub mod product;
pub mod query;
pub mod report;
pub mod store;

pub use product::{Product, ProductDraft, ProductId, StockStatus};
pub use query::{CatalogQuery, SortKey, StatusFilter, StockFilter, filter_and_sort};
pub use report::{CatalogReport, ReportPage, ReportRow, format_price};
pub use store::{CatalogStore, InMemoryCatalogStore};
