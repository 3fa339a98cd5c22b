//! EAN-13 barcode generation and validation.

use rand::Rng;

use tillpoint_core::{DomainError, DomainResult};

/// Fixed application prefix for generated barcodes.
///
/// GS1 reserves the 200-299 range for in-store numbering, so codes generated
/// here can never collide with globally assigned manufacturer prefixes.
pub const IN_STORE_PREFIX: &str = "200";

/// Compute the EAN-13 check digit over the first 12 digits.
///
/// Digits at even 0-indexed positions weigh 1, odd positions weigh 3;
/// the check digit is `(10 - sum mod 10) mod 10`.
pub fn ean13_check_digit(digits: &[u8; 12]) -> u8 {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(position, &digit)| {
            if position % 2 == 0 {
                u32::from(digit)
            } else {
                u32::from(digit) * 3
            }
        })
        .sum();

    ((10 - sum % 10) % 10) as u8
}

/// Generate a checksum-valid EAN-13 barcode under [`IN_STORE_PREFIX`].
pub fn generate_ean13() -> String {
    let body: u32 = rand::rng().random_range(0..1_000_000_000);
    let first12 = format!("{IN_STORE_PREFIX}{body:09}");

    let mut digits = [0u8; 12];
    for (slot, byte) in digits.iter_mut().zip(first12.bytes()) {
        *slot = byte - b'0';
    }

    format!("{first12}{}", ean13_check_digit(&digits))
}

/// Validate a barcode string: exactly 13 ASCII digits with a correct
/// check digit.
pub fn validate_ean13(code: &str) -> DomainResult<()> {
    let bytes = code.as_bytes();

    if bytes.len() != 13 {
        return Err(DomainError::validation(format!(
            "barcode must be exactly 13 digits, got {} characters",
            bytes.len()
        )));
    }

    if !bytes.iter().all(u8::is_ascii_digit) {
        return Err(DomainError::validation(
            "barcode must contain only digits 0-9",
        ));
    }

    let mut digits = [0u8; 12];
    for (slot, byte) in digits.iter_mut().zip(bytes) {
        *slot = byte - b'0';
    }

    let expected = ean13_check_digit(&digits);
    let found = bytes[12] - b'0';
    if found != expected {
        return Err(DomainError::validation(format!(
            "barcode check digit mismatch (expected {expected}, found {found})"
        )));
    }

    Ok(())
}
