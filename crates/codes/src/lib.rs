//! Product code and barcode generation for the catalog.
//!
//! Pure generators: no IO beyond the system clock and OS entropy, no failure
//! path. Validation of hand-entered barcodes lives here too, so the form
//! boundary and the generator share one checksum routine.

pub mod barcode;
pub mod code;

pub use barcode::{IN_STORE_PREFIX, ean13_check_digit, generate_ean13, validate_ean13};
pub use code::{generate_product_code, unique_product_code};
