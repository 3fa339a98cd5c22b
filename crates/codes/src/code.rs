//! Short product code generation.

use chrono::Utc;
use rand::Rng;

/// Generate a product code: `P` + last 6 digits of the millisecond clock +
/// 3-digit zero-padded random number.
///
/// Codes are highly likely to be unique within a session, not globally.
/// Callers that need hard uniqueness regenerate on conflict, see
/// [`unique_product_code`].
pub fn generate_product_code() -> String {
    let millis = Utc::now().timestamp_millis();
    let time_tail = millis.rem_euclid(1_000_000);
    let noise: u16 = rand::rng().random_range(0..1000);

    format!("P{time_tail:06}{noise:03}")
}

/// Generate product codes until the caller's predicate reports the code as
/// free.
///
/// The time component advances every millisecond, so repeated collisions die
/// out on their own.
pub fn unique_product_code(mut is_taken: impl FnMut(&str) -> bool) -> String {
    loop {
        let code = generate_product_code();
        if !is_taken(&code) {
            return code;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_code_shape(code: &str) {
        assert_eq!(code.len(), 10, "code {code:?} has wrong length");
        assert!(code.starts_with('P'), "code {code:?} missing prefix");
        assert!(
            code[1..].bytes().all(|b| b.is_ascii_digit()),
            "code {code:?} has non-digit tail"
        );
    }

    #[test]
    fn generated_code_matches_expected_shape() {
        for _ in 0..100 {
            assert_code_shape(&generate_product_code());
        }
    }

    #[test]
    fn unique_code_retries_until_predicate_clears() {
        let mut rejected = 0;
        let code = unique_product_code(|_| {
            rejected += 1;
            rejected <= 3
        });
        assert_eq!(rejected, 4);
        assert_code_shape(&code);
    }

    #[test]
    fn unique_code_returns_first_candidate_when_nothing_is_taken() {
        let code = unique_product_code(|_| false);
        assert_code_shape(&code);
    }
}
