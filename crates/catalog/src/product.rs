use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tillpoint_codes::validate_ean13;
use tillpoint_core::{DomainError, DomainResult, Entity, RecordId, ValueObject};
use tillpoint_parties::SupplierId;

/// Product identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub RecordId);

impl ProductId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Stock level badge, derived from `stock` and `min_stock`. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Out,
    Low,
    Normal,
}

impl StockStatus {
    /// Display label used on list badges and report rows.
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::Out => "out of stock",
            StockStatus::Low => "low stock",
            StockStatus::Normal => "in stock",
        }
    }
}

/// Immutable snapshot of the product form: every user-editable field.
///
/// Numeric fields arrive already coerced by the form layer; this type only
/// enforces domain rules (non-empty labels, barcode shape).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub code: String,
    pub barcode: Option<String>,
    /// Price in smallest currency unit (e.g., cents).
    pub price_cents: u64,
    /// Free-form category label. An open set: users introduce new labels at
    /// any time, so this is never an enum.
    pub category: String,
    pub stock: u32,
    pub min_stock: u32,
    pub supplier: Option<SupplierId>,
    /// Opaque embedded image payload. Stored and returned untouched.
    pub photo: Option<Vec<u8>>,
}

impl ValueObject for ProductDraft {}

impl ProductDraft {
    fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.code.trim().is_empty() {
            return Err(DomainError::validation("code cannot be empty"));
        }
        if self.category.trim().is_empty() {
            return Err(DomainError::validation("category cannot be empty"));
        }
        if let Some(barcode) = &self.barcode {
            validate_ean13(barcode)?;
        }
        Ok(())
    }
}

/// Product record.
///
/// Records are mutated in place for edits and status toggles and never
/// physically removed: delete means `active = false`, keeping the record
/// for sales history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    code: String,
    barcode: Option<String>,
    price_cents: u64,
    category: String,
    stock: u32,
    min_stock: u32,
    supplier: Option<SupplierId>,
    photo: Option<Vec<u8>>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Product {
    /// Materialize a record from a validated form snapshot.
    pub fn create(id: ProductId, draft: ProductDraft, now: DateTime<Utc>) -> DomainResult<Self> {
        draft.validate()?;

        Ok(Self {
            id,
            name: draft.name,
            code: draft.code,
            barcode: draft.barcode,
            price_cents: draft.price_cents,
            category: draft.category,
            stock: draft.stock,
            min_stock: draft.min_stock,
            supplier: draft.supplier,
            photo: draft.photo,
            active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply an edited form snapshot in place. The active flag is toggled
    /// separately, not through the form.
    pub fn apply(&mut self, draft: ProductDraft, now: DateTime<Utc>) -> DomainResult<()> {
        draft.validate()?;

        self.name = draft.name;
        self.code = draft.code;
        self.barcode = draft.barcode;
        self.price_cents = draft.price_cents;
        self.category = draft.category;
        self.stock = draft.stock;
        self.min_stock = draft.min_stock;
        self.supplier = draft.supplier;
        self.photo = draft.photo;
        self.updated_at = now;
        Ok(())
    }

    /// Soft delete: the record stays behind for history and stops being
    /// offered for sale.
    pub fn deactivate(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        if !self.active {
            return Err(DomainError::conflict("product is already inactive"));
        }
        self.active = false;
        self.updated_at = now;
        Ok(())
    }

    pub fn activate(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        if self.active {
            return Err(DomainError::conflict("product is already active"));
        }
        self.active = true;
        self.updated_at = now;
        Ok(())
    }

    /// Relative stock movement. Rejects any delta that would take stock
    /// below zero, leaving the record unchanged.
    pub fn adjust_stock(&mut self, delta: i64, now: DateTime<Utc>) -> DomainResult<()> {
        let next = i64::from(self.stock) + delta;
        let next = u32::try_from(next)
            .map_err(|_| DomainError::invariant("stock adjustment out of range"))?;

        self.stock = next;
        self.updated_at = now;
        Ok(())
    }

    /// Derived stock badge.
    ///
    /// `stock <= min_stock` is deliberately inclusive; with `min_stock == 0`
    /// the low branch is unreachable because zero stock is already out.
    pub fn stock_status(&self) -> StockStatus {
        if self.stock == 0 {
            StockStatus::Out
        } else if self.stock <= self.min_stock {
            StockStatus::Low
        } else {
            StockStatus::Normal
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn barcode(&self) -> Option<&str> {
        self.barcode.as_deref()
    }

    pub fn price_cents(&self) -> u64 {
        self.price_cents
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn min_stock(&self) -> u32 {
        self.min_stock
    }

    pub fn supplier(&self) -> Option<SupplierId> {
        self.supplier
    }

    pub fn photo(&self) -> Option<&[u8]> {
        self.photo.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tillpoint_codes::generate_ean13;

    fn test_product_id() -> ProductId {
        ProductId::new(RecordId::new())
    }

    fn test_draft() -> ProductDraft {
        ProductDraft {
            name: "Espresso Beans 1kg".to_string(),
            code: "P123456001".to_string(),
            barcode: None,
            price_cents: 1_850,
            category: "Coffee".to_string(),
            stock: 12,
            min_stock: 4,
            supplier: None,
            photo: None,
        }
    }

    #[test]
    fn create_materializes_an_active_record() {
        let product = Product::create(test_product_id(), test_draft(), Utc::now()).unwrap();
        assert!(product.is_active());
        assert_eq!(product.name(), "Espresso Beans 1kg");
        assert_eq!(product.stock_status(), StockStatus::Normal);
    }

    #[test]
    fn create_rejects_empty_name() {
        let draft = ProductDraft {
            name: "   ".to_string(),
            ..test_draft()
        };
        let err = Product::create(test_product_id(), draft, Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn create_rejects_empty_code() {
        let draft = ProductDraft {
            code: "".to_string(),
            ..test_draft()
        };
        let err = Product::create(test_product_id(), draft, Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn create_rejects_empty_category() {
        let draft = ProductDraft {
            category: " ".to_string(),
            ..test_draft()
        };
        let err = Product::create(test_product_id(), draft, Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn create_rejects_invalid_barcode() {
        let draft = ProductDraft {
            barcode: Some("1234567890123".to_string()),
            ..test_draft()
        };
        let err = Product::create(test_product_id(), draft, Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn create_accepts_generated_barcode() {
        let draft = ProductDraft {
            barcode: Some(generate_ean13()),
            ..test_draft()
        };
        Product::create(test_product_id(), draft, Utc::now()).unwrap();
    }

    #[test]
    fn apply_edits_fields_and_bumps_updated_at() {
        let created = Utc::now();
        let mut product = Product::create(test_product_id(), test_draft(), created).unwrap();

        let later = created + chrono::Duration::seconds(5);
        let draft = ProductDraft {
            name: "Espresso Beans 500g".to_string(),
            price_cents: 990,
            ..test_draft()
        };
        product.apply(draft, later).unwrap();

        assert_eq!(product.name(), "Espresso Beans 500g");
        assert_eq!(product.price_cents(), 990);
        assert_eq!(product.created_at(), created);
        assert_eq!(product.updated_at(), later);
    }

    #[test]
    fn apply_rejects_invalid_draft_without_mutating() {
        let mut product = Product::create(test_product_id(), test_draft(), Utc::now()).unwrap();
        let before = product.clone();

        let draft = ProductDraft {
            name: "".to_string(),
            ..test_draft()
        };
        assert!(product.apply(draft, Utc::now()).is_err());
        assert_eq!(product, before);
    }

    #[test]
    fn deactivate_then_activate_roundtrip() {
        let mut product = Product::create(test_product_id(), test_draft(), Utc::now()).unwrap();

        product.deactivate(Utc::now()).unwrap();
        assert!(!product.is_active());

        let err = product.deactivate(Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        product.activate(Utc::now()).unwrap();
        assert!(product.is_active());
    }

    #[test]
    fn adjust_stock_moves_both_ways() {
        let mut product = Product::create(test_product_id(), test_draft(), Utc::now()).unwrap();
        assert_eq!(product.stock(), 12);

        product.adjust_stock(-12, Utc::now()).unwrap();
        assert_eq!(product.stock(), 0);
        assert_eq!(product.stock_status(), StockStatus::Out);

        product.adjust_stock(3, Utc::now()).unwrap();
        assert_eq!(product.stock(), 3);
    }

    #[test]
    fn adjust_stock_rejects_underflow_and_leaves_record_unchanged() {
        let mut product = Product::create(test_product_id(), test_draft(), Utc::now()).unwrap();
        let before = product.clone();

        let err = product.adjust_stock(-13, Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert_eq!(product, before);
    }

    #[test]
    fn stock_status_boundary_is_inclusive() {
        let mut product = Product::create(
            test_product_id(),
            ProductDraft {
                stock: 4,
                min_stock: 4,
                ..test_draft()
            },
            Utc::now(),
        )
        .unwrap();
        assert_eq!(product.stock_status(), StockStatus::Low);

        product.adjust_stock(1, Utc::now()).unwrap();
        assert_eq!(product.stock_status(), StockStatus::Normal);
    }

    #[test]
    fn zero_min_stock_never_reports_low() {
        let product = Product::create(
            test_product_id(),
            ProductDraft {
                stock: 0,
                min_stock: 0,
                ..test_draft()
            },
            Utc::now(),
        )
        .unwrap();
        assert_eq!(product.stock_status(), StockStatus::Out);
    }

    #[test]
    fn photo_payload_is_stored_untouched() {
        let payload = vec![0x89, 0x50, 0x4e, 0x47];
        let draft = ProductDraft {
            photo: Some(payload.clone()),
            ..test_draft()
        };
        let product = Product::create(test_product_id(), draft, Utc::now()).unwrap();
        assert_eq!(product.photo(), Some(payload.as_slice()));
    }
}
