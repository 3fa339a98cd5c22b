//! Parties module (suppliers).
//!
//! This crate contains supplier records and the in-memory directory the
//! catalog resolves weak supplier references through. Pure domain logic,
//! no IO, no HTTP, no storage.

pub mod supplier;

pub use supplier::{ContactInfo, Supplier, SupplierDirectory, SupplierId};
