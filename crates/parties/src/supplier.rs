use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use tillpoint_core::{DomainError, DomainResult, Entity, RecordId, ValueObject};

/// Supplier identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplierId(pub RecordId);

impl SupplierId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for SupplierId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Contact information for a supplier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl ValueObject for ContactInfo {}

/// Supplier record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    id: SupplierId,
    name: String,
    contact: ContactInfo,
    active: bool,
}

impl Supplier {
    /// Register a supplier. Name must be non-empty after trimming.
    pub fn register(
        id: SupplierId,
        name: impl Into<String>,
        contact: ContactInfo,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("supplier name cannot be empty"));
        }

        Ok(Self {
            id,
            name,
            contact,
            active: true,
        })
    }

    pub fn id_typed(&self) -> SupplierId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Suspend the supplier. Suspended suppliers keep their record so
    /// existing product references stay resolvable.
    pub fn suspend(&mut self) -> DomainResult<()> {
        if !self.active {
            return Err(DomainError::conflict("supplier is already suspended"));
        }
        self.active = false;
        Ok(())
    }
}

impl Entity for Supplier {
    type Id = SupplierId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// In-memory supplier registry.
///
/// Product records hold only a [`SupplierId`]; lookups go through here and a
/// dangling id simply resolves to `None`.
#[derive(Debug)]
pub struct SupplierDirectory {
    inner: RwLock<HashMap<SupplierId, Supplier>>,
}

impl SupplierDirectory {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    pub fn register(&self, supplier: Supplier) -> DomainResult<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::invariant("supplier directory lock poisoned"))?;

        if map.contains_key(&supplier.id_typed()) {
            return Err(DomainError::conflict("supplier id already registered"));
        }

        map.insert(supplier.id_typed(), supplier);
        Ok(())
    }

    pub fn get(&self, id: SupplierId) -> Option<Supplier> {
        let map = self.inner.read().ok()?;
        map.get(&id).cloned()
    }

    pub fn list(&self) -> Vec<Supplier> {
        match self.inner.read() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => vec![],
        }
    }
}

impl Default for SupplierDirectory {
    fn default() -> Self {
        Self::new()
    }
}
