//! In-process catalog store contract.
//!
//! The surrounding application owns durable persistence; this trait is the
//! seam it plugs into. The in-memory implementation backs tests and the
//! desktop host's working set.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tillpoint_core::{DomainError, DomainResult};

use crate::product::{Product, ProductId};

/// Catalog persistence seam: create/update-by-id plus snapshot reads.
pub trait CatalogStore: Send + Sync {
    fn get(&self, id: &ProductId) -> Option<Product>;

    /// Insert a new record. Conflicts on a duplicate id or duplicate code.
    fn create(&self, product: Product) -> DomainResult<()>;

    /// Replace an existing record by id. Code uniqueness is enforced against
    /// every other record.
    fn update(&self, product: Product) -> DomainResult<()>;

    /// Snapshot of all records, order unspecified.
    fn list(&self) -> Vec<Product>;

    /// Whether any record already uses this code. Feed this to
    /// `unique_product_code` as the regenerate-on-conflict predicate.
    fn code_exists(&self, code: &str) -> bool;
}

impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore + ?Sized,
{
    fn get(&self, id: &ProductId) -> Option<Product> {
        (**self).get(id)
    }

    fn create(&self, product: Product) -> DomainResult<()> {
        (**self).create(product)
    }

    fn update(&self, product: Product) -> DomainResult<()> {
        (**self).update(product)
    }

    fn list(&self) -> Vec<Product> {
        (**self).list()
    }

    fn code_exists(&self, code: &str) -> bool {
        (**self).code_exists(code)
    }
}

/// In-memory catalog store.
#[derive(Debug)]
pub struct InMemoryCatalogStore {
    inner: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryCatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn get(&self, id: &ProductId) -> Option<Product> {
        let map = self.inner.read().ok()?;
        map.get(id).cloned()
    }

    fn create(&self, product: Product) -> DomainResult<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::invariant("catalog store lock poisoned"))?;

        if map.contains_key(&product.id_typed()) {
            return Err(DomainError::conflict("product id already exists"));
        }
        if map.values().any(|existing| existing.code() == product.code()) {
            return Err(DomainError::conflict(format!(
                "product code {} already exists",
                product.code()
            )));
        }

        tracing::debug!(product_id = %product.id_typed(), code = product.code(), "product created");
        map.insert(product.id_typed(), product);
        Ok(())
    }

    fn update(&self, product: Product) -> DomainResult<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::invariant("catalog store lock poisoned"))?;

        if !map.contains_key(&product.id_typed()) {
            return Err(DomainError::not_found());
        }
        let duplicate_code = map.values().any(|existing| {
            existing.id_typed() != product.id_typed() && existing.code() == product.code()
        });
        if duplicate_code {
            return Err(DomainError::conflict(format!(
                "product code {} already exists",
                product.code()
            )));
        }

        tracing::debug!(product_id = %product.id_typed(), code = product.code(), "product updated");
        map.insert(product.id_typed(), product);
        Ok(())
    }

    fn list(&self) -> Vec<Product> {
        match self.inner.read() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => vec![],
        }
    }

    fn code_exists(&self, code: &str) -> bool {
        match self.inner.read() {
            Ok(map) => map.values().any(|existing| existing.code() == code),
            Err(_) => false,
        }
    }
}
